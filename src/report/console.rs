use std::collections::BTreeMap;

use crate::discovery::orchestrator::DiscoveryOutcome;
use crate::discovery::run::TerminationReason;

// ============================================================================
// Console reporter: discovery summary for the terminal
// ============================================================================

/// Format a discovery outcome for terminal output.
///
/// Produces output like:
/// ```text
/// === Form inputs: 4 total ===
///
///   [0] text      First name
///   [2] textarea  Details  <- Employed = Yes
///
/// Conditional: 1   Triggered by choices: 1
/// Iteration 0: 3 inputs
/// Iteration 2: 1 inputs
/// Stopped: fixed point reached (2 fill rounds, 6 snapshots)
/// ```
pub fn format_console_summary(outcome: &DiscoveryOutcome) -> String {
    let mut out = String::new();

    out.push_str(&format!("=== Form inputs: {} total ===\n\n", outcome.fields.len()));

    for field in &outcome.fields {
        let label = if field.label.is_empty() {
            "<no label>"
        } else {
            field.label.as_str()
        };
        out.push_str(&format!(
            "  [{}] {:<9} {}",
            field.discovered_at_iteration,
            field.kind.as_str(),
            label
        ));
        if let Some(trigger) = &field.triggered_by {
            out.push_str(&format!("  <- {}", trigger));
        }
        out.push('\n');
    }

    out.push_str(&format!(
        "\nConditional: {}   Triggered by choices: {}\n",
        outcome.conditional_count(),
        outcome.triggered_count()
    ));

    let mut by_iteration: BTreeMap<u32, usize> = BTreeMap::new();
    for field in &outcome.fields {
        *by_iteration.entry(field.discovered_at_iteration).or_default() += 1;
    }
    for (iteration, count) in &by_iteration {
        out.push_str(&format!("Iteration {}: {} inputs\n", iteration, count));
    }

    let summary = &outcome.summary;
    out.push_str(&format!(
        "Stopped: {} ({} fill rounds, {} snapshots)\n",
        describe_termination(summary.termination),
        summary.fill_rounds,
        summary.snapshots
    ));

    if summary.fill_failures > 0 || summary.option_failures > 0 {
        out.push_str(&format!(
            "Skipped interactions: {} fills, {} option selections\n",
            summary.fill_failures, summary.option_failures
        ));
    }

    out
}

pub fn describe_termination(reason: TerminationReason) -> &'static str {
    match reason {
        TerminationReason::FixedPoint => "fixed point reached",
        TerminationReason::IterationBound => "iteration bound reached, form may have more fields",
        TerminationReason::TimedOut => "timed out, inventory is partial",
        TerminationReason::NoFields => "no form inputs found",
    }
}
