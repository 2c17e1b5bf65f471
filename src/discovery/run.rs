use std::time::Instant;

use serde::Serialize;
use tracing::warn;

use crate::browser::page::FormPage;
use crate::discovery::error::{DiscoveryError, Step};
use crate::discovery::snapshot::take_snapshot;
use crate::field::field_model::FieldDescriptor;
use crate::trace::logger::TraceLogger;
use crate::trace::trace::TraceEvent;

/// Why a discovery run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TerminationReason {
    /// A fill round revealed nothing new
    FixedPoint,
    /// `max_iterations` productive rounds ran; more fields may exist
    IterationBound,
    /// The caller's timeout expired; the inventory is partial
    TimedOut,
    /// The first snapshot was empty
    NoFields,
}

/// Counters reported alongside the inventory.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    pub termination: TerminationReason,
    /// Fill + snapshot rounds executed by the discovery loop
    pub fill_rounds: u32,
    pub snapshots: u32,
    pub fill_failures: u32,
    pub option_failures: u32,
    pub choice_fields_explored: u32,
    pub fields_revealed_by_choices: u32,
    pub elapsed_ms: u128,
}

impl RunSummary {
    fn new() -> Self {
        Self {
            termination: TerminationReason::FixedPoint,
            fill_rounds: 0,
            snapshots: 0,
            fill_failures: 0,
            option_failures: 0,
            choice_fields_explored: 0,
            fields_revealed_by_choices: 0,
            elapsed_ms: 0,
        }
    }

    /// True unless a bound or timeout cut the run short.
    pub fn fully_explored(&self) -> bool {
        matches!(
            self.termination,
            TerminationReason::FixedPoint | TerminationReason::NoFields
        )
    }
}

/// Per-run bookkeeping shared by the discovery loop and the choice explorer.
pub struct RunContext<'a> {
    started: Instant,
    deadline: Option<Instant>,
    tracer: Option<&'a TraceLogger>,
    timed_out: bool,
    pub summary: RunSummary,
}

impl<'a> RunContext<'a> {
    pub fn new(deadline: Option<Instant>, tracer: Option<&'a TraceLogger>) -> Self {
        Self {
            started: Instant::now(),
            deadline,
            tracer,
            timed_out: false,
            summary: RunSummary::new(),
        }
    }

    /// Check the soft deadline; latches once expired.
    pub fn expired(&mut self) -> bool {
        if !self.timed_out {
            if let Some(deadline) = self.deadline {
                if Instant::now() >= deadline {
                    warn!(
                        elapsed_ms = self.started.elapsed().as_millis() as u64,
                        "discovery timeout reached, returning partial inventory"
                    );
                    self.timed_out = true;
                }
            }
        }
        self.timed_out
    }

    pub fn timed_out(&self) -> bool {
        self.timed_out
    }

    /// Take a snapshot, counting it and attaching step context on failure.
    pub fn snapshot(
        &mut self,
        page: &mut dyn FormPage,
        step: Step,
        iteration: u32,
    ) -> Result<Vec<FieldDescriptor>, DiscoveryError> {
        self.summary.snapshots += 1;
        take_snapshot(page).map_err(|source| DiscoveryError::Extraction {
            step,
            iteration,
            source,
        })
    }

    pub fn trace(&self, event: TraceEvent) {
        if let Some(tracer) = self.tracer {
            tracer.log(&event);
        }
    }

    pub fn finish(mut self, termination: TerminationReason) -> RunSummary {
        self.summary.termination = if self.timed_out {
            TerminationReason::TimedOut
        } else {
            termination
        };
        self.summary.elapsed_ms = self.started.elapsed().as_millis();
        self.summary
    }
}
