use std::collections::HashSet;

use tracing::{debug, info, warn};

use crate::browser::page::FormPage;
use crate::discovery::config::DiscoveryConfig;
use crate::discovery::error::{DiscoveryError, Step};
use crate::discovery::inventory::{DiscoverySession, Provenance};
use crate::discovery::run::RunContext;
use crate::field::field_model::{FieldDescriptor, FieldKind};
use crate::field::identity::field_key;
use crate::trace::trace::{TraceEvent, TracePhase};

// ============================================================================
// Eligibility
// ============================================================================

/// Radio groups always qualify; selects qualify when they have between one
/// and `cap` options.
pub fn is_explorable(field: &FieldDescriptor, cap: usize) -> bool {
    if !field.kind.is_choice() {
        return false;
    }
    field.kind == FieldKind::Radio
        || (!field.choice_options.is_empty() && field.choice_options.len() <= cap)
}

/// Eligible fields of the inventory, one entry per radio group.
pub fn explorable_fields(fields: &[FieldDescriptor], cap: usize) -> Vec<FieldDescriptor> {
    let mut radio_groups = HashSet::new();

    fields
        .iter()
        .filter(|f| is_explorable(f, cap))
        .filter(|f| {
            f.kind != FieldKind::Radio
                || radio_groups.insert(f.group.clone().unwrap_or_else(|| field_key(f)))
        })
        .cloned()
        .collect()
}

// ============================================================================
// Exploration
// ============================================================================

/// Cycle every option of every eligible field collected so far.
///
/// Fields revealed here are stamped `iteration` (one past the last fill
/// round) and are not themselves explored in this run.
pub fn explore_choices(
    page: &mut dyn FormPage,
    session: &mut DiscoverySession,
    config: &DiscoveryConfig,
    ctx: &mut RunContext<'_>,
) -> Result<(), DiscoveryError> {
    let candidates = explorable_fields(session.fields(), config.option_cardinality_cap);
    let iteration = session.iteration() + 1;

    info!(candidates = candidates.len(), "exploring multiple-choice fields");

    for field in &candidates {
        if ctx.expired() {
            return Ok(());
        }
        explore_field(page, field, session, config, iteration, ctx)?;
    }

    Ok(())
}

/// Select each option of `field` in document order and attribute whatever
/// appears to `"<label> = <option text>"`.
///
/// Options are tried independently; the page is not reset between trials.
pub fn explore_field(
    page: &mut dyn FormPage,
    field: &FieldDescriptor,
    session: &mut DiscoverySession,
    config: &DiscoveryConfig,
    iteration: u32,
    ctx: &mut RunContext<'_>,
) -> Result<(), DiscoveryError> {
    let options = match page.choice_options(field) {
        Ok(options) => options,
        Err(e) => {
            warn!(label = %field.label, error = %e, "could not enumerate options, skipping field");
            ctx.summary.option_failures += 1;
            return Ok(());
        }
    };

    // The live option list can differ from the descriptor's
    if field.kind == FieldKind::Select && options.len() > config.option_cardinality_cap {
        debug!(label = %field.label, options = options.len(), "select exceeds cardinality cap");
        return Ok(());
    }

    ctx.summary.choice_fields_explored += 1;
    debug!(label = %field.label, kind = field.kind.as_str(), options = options.len(), "trying each option");

    for (index, option) in options.iter().enumerate() {
        if ctx.expired() {
            return Ok(());
        }

        if let Err(e) = page.select_option(field, index) {
            warn!(label = %field.label, option = %option.text, error = %e, "option selection failed, skipping option");
            ctx.summary.option_failures += 1;
            continue;
        }

        let snapshot = ctx.snapshot(page, Step::ChoiceExploration, iteration)?;
        let snapshot_size = snapshot.len();
        let provenance = Provenance::Choice {
            iteration,
            label: field.label.clone(),
            option: option.text.clone(),
        };
        let added = session.absorb(snapshot, &provenance);
        ctx.summary.fields_revealed_by_choices += added as u32;

        if added > 0 {
            info!(label = %field.label, option = %option.text, added, "option revealed new fields");
        }

        ctx.trace(
            TraceEvent::now(TracePhase::ChoiceOption, iteration)
                .with_trigger(format!("{} = {}", field.label, option.text))
                .with_snapshot_size(snapshot_size)
                .with_revealed(session.latest(added)),
        );
    }

    Ok(())
}
