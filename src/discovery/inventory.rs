use std::collections::HashSet;

use tracing::debug;

use crate::field::field_model::{FieldDescriptor, FieldKind};
use crate::field::identity::{field_key, label_kind_key};

/// How a field came to be detected; stamped onto it exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Provenance {
    /// Present in the first snapshot
    Initial,
    /// Appeared after the dummy-fill round with this number
    FillRound(u32),
    /// Appeared after selecting `option` on the choice field labelled `label`
    Choice {
        iteration: u32,
        label: String,
        option: String,
    },
}

impl Provenance {
    fn stamp(&self, field: &mut FieldDescriptor) {
        match self {
            Provenance::Initial => {
                field.conditional = false;
                field.discovered_at_iteration = 0;
                field.triggered_by = None;
            }
            Provenance::FillRound(iteration) => {
                field.conditional = true;
                field.discovered_at_iteration = *iteration;
                field.triggered_by = None;
            }
            Provenance::Choice {
                iteration,
                label,
                option,
            } => {
                field.conditional = true;
                field.discovered_at_iteration = *iteration;
                field.triggered_by = Some(format!("{} = {}", label, option));
            }
        }
    }
}

/// Growing field inventory for one discovery run.
///
/// A set keyed by identity that remembers insertion order. A field is known
/// when its identity key, or its (label, kind) pair, has been seen before.
#[derive(Debug, Default)]
pub struct DiscoverySession {
    fields: Vec<FieldDescriptor>,
    keys: HashSet<String>,
    label_kinds: HashSet<(String, FieldKind)>,
    iteration: u32,
}

impl DiscoverySession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_known(&self, field: &FieldDescriptor) -> bool {
        self.keys.contains(&field_key(field)) || self.label_kinds.contains(&label_kind_key(field))
    }

    /// Add every unseen field of `snapshot`, stamped with `provenance`.
    ///
    /// Returns the number of fields added; they are the last entries of
    /// `fields()`.
    pub fn absorb(&mut self, snapshot: Vec<FieldDescriptor>, provenance: &Provenance) -> usize {
        let mut added = 0;

        for mut field in snapshot {
            let key = field_key(&field);
            if self.is_known(&field) {
                debug!(key = %key, "field already known");
                continue;
            }

            provenance.stamp(&mut field);
            debug!(
                key = %key,
                label = %field.label,
                kind = field.kind.as_str(),
                iteration = field.discovered_at_iteration,
                triggered_by = field.triggered_by.as_deref().unwrap_or(""),
                "detected new field"
            );

            self.keys.insert(key);
            self.label_kinds.insert(label_kind_key(&field));
            self.fields.push(field);
            added += 1;
        }

        added
    }

    /// Fields in discovery order.
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// The `count` most recently added fields.
    pub fn latest(&self, count: usize) -> &[FieldDescriptor] {
        let start = self.fields.len().saturating_sub(count);
        &self.fields[start..]
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Number of completed productive fill rounds.
    pub fn iteration(&self) -> u32 {
        self.iteration
    }

    pub fn advance_iteration(&mut self) -> u32 {
        self.iteration += 1;
        self.iteration
    }

    pub fn into_fields(self) -> Vec<FieldDescriptor> {
        self.fields
    }
}
