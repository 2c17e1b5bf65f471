use serde::Serialize;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::field::field_model::FieldDescriptor;

/// Phase of a discovery run a trace event belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TracePhase {
    InitialSnapshot,
    FillRound,
    ChoiceOption,
    Finished,
}

/// One line of the JSONL discovery trace.
#[derive(Debug, Serialize)]
pub struct TraceEvent {
    pub timestamp_ms: u128,
    pub phase: TracePhase,
    pub iteration: u32,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub trigger: Option<String>,

    pub snapshot_size: usize,
    pub revealed: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl TraceEvent {
    pub fn now(phase: TracePhase, iteration: u32) -> Self {
        Self {
            timestamp_ms: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis())
                .unwrap_or_default(),
            phase,
            iteration,
            trigger: None,
            snapshot_size: 0,
            revealed: vec![],
            note: None,
        }
    }

    pub fn with_trigger(mut self, trigger: impl ToString) -> Self {
        self.trigger = Some(trigger.to_string());
        self
    }

    pub fn with_snapshot_size(mut self, size: usize) -> Self {
        self.snapshot_size = size;
        self
    }

    pub fn with_revealed(mut self, fields: &[FieldDescriptor]) -> Self {
        self.revealed = fields
            .iter()
            .map(|f| format!("{} ({})", f.label, f.kind.as_str()))
            .collect();
        self
    }

    pub fn with_note(mut self, note: impl ToString) -> Self {
        self.note = Some(note.to_string());
        self
    }
}
