use std::collections::HashSet;

use tracing::{debug, warn};

use crate::browser::page::FormPage;
use crate::field::field_model::{FieldDescriptor, FieldKind};
use crate::field::fill::dummy_value;
use crate::field::identity::field_key;

/// Outcome of one dummy-fill pass.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FillReport {
    pub filled: u32,
    pub skipped: u32,
    pub failed: u32,
}

/// Give every field of `fields` a canned value.
///
/// Radio groups are filled once. A field whose injection fails is logged and
/// skipped; the pass continues with the remaining fields.
pub fn fill_fields(page: &mut dyn FormPage, fields: &[FieldDescriptor]) -> FillReport {
    let mut report = FillReport::default();
    let mut radio_groups = HashSet::new();

    for field in fields {
        if field.kind == FieldKind::Radio {
            let group = field.group.clone().unwrap_or_else(|| field_key(field));
            if !radio_groups.insert(group) {
                report.skipped += 1;
                continue;
            }
        }

        let Some(value) = dummy_value(field) else {
            report.skipped += 1;
            continue;
        };

        match page.apply_value(field, &value) {
            Ok(()) => {
                debug!(label = %field.label, kind = field.kind.as_str(), ?value, "filled field");
                report.filled += 1;
            }
            Err(e) => {
                warn!(label = %field.label, kind = field.kind.as_str(), error = %e, "fill failed, skipping field");
                report.failed += 1;
            }
        }
    }

    report
}
