use std::time::Instant;

use serde::Serialize;
use tracing::info;

use crate::browser::page::FormPage;
use crate::discovery::choice::explore_choices;
use crate::discovery::config::DiscoveryConfig;
use crate::discovery::error::{DiscoveryError, Step};
use crate::discovery::fixed_point::run_to_fixed_point;
use crate::discovery::inventory::{DiscoverySession, Provenance};
use crate::discovery::run::{RunContext, RunSummary, TerminationReason};
use crate::field::field_model::FieldDescriptor;
use crate::trace::logger::TraceLogger;
use crate::trace::trace::{TraceEvent, TracePhase};

/// Result of one discovery run: the inventory in discovery order plus how
/// the run ended.
#[derive(Debug, Clone, Serialize)]
pub struct DiscoveryOutcome {
    pub fields: Vec<FieldDescriptor>,
    pub summary: RunSummary,
}

impl DiscoveryOutcome {
    pub fn conditional_count(&self) -> usize {
        self.fields.iter().filter(|f| f.conditional).count()
    }

    pub fn triggered_count(&self) -> usize {
        self.fields.iter().filter(|f| f.triggered_by.is_some()).count()
    }
}

/// Discover every input of the form currently loaded in `page`.
///
/// Runs the fill loop to a fixed point (or the iteration bound), then
/// cycles the options of every eligible radio group and short select.
/// Extraction failures abort the run; per-field failures are skipped.
pub fn discover(
    page: &mut dyn FormPage,
    config: &DiscoveryConfig,
) -> Result<DiscoveryOutcome, DiscoveryError> {
    run_discovery(page, config, None)
}

/// `discover` with every round and option trial written to `tracer`.
pub fn discover_traced(
    page: &mut dyn FormPage,
    config: &DiscoveryConfig,
    tracer: &TraceLogger,
) -> Result<DiscoveryOutcome, DiscoveryError> {
    run_discovery(page, config, Some(tracer))
}

fn run_discovery(
    page: &mut dyn FormPage,
    config: &DiscoveryConfig,
    tracer: Option<&TraceLogger>,
) -> Result<DiscoveryOutcome, DiscoveryError> {
    let deadline = config.timeout.map(|t| Instant::now() + t);
    let mut ctx = RunContext::new(deadline, tracer);
    let mut session = DiscoverySession::new();

    let initial = ctx.snapshot(page, Step::InitialSnapshot, 0)?;
    session.absorb(initial.clone(), &Provenance::Initial);

    ctx.trace(
        TraceEvent::now(TracePhase::InitialSnapshot, 0)
            .with_snapshot_size(initial.len())
            .with_revealed(session.fields()),
    );
    info!(fields = session.len(), "initial snapshot");

    if session.is_empty() {
        info!("no form inputs found on the page");
        return Ok(finish(session, ctx, TerminationReason::NoFields));
    }

    let termination = run_to_fixed_point(page, &mut session, initial, config, &mut ctx)?;

    if !ctx.timed_out() {
        explore_choices(page, &mut session, config, &mut ctx)?;
    }

    Ok(finish(session, ctx, termination))
}

fn finish(
    session: DiscoverySession,
    ctx: RunContext<'_>,
    termination: TerminationReason,
) -> DiscoveryOutcome {
    let termination = if ctx.timed_out() {
        TerminationReason::TimedOut
    } else {
        termination
    };

    ctx.trace(
        TraceEvent::now(TracePhase::Finished, session.iteration())
            .with_snapshot_size(session.len())
            .with_note(format!("{:?}", termination)),
    );

    let summary = ctx.finish(termination);
    let fields = session.into_fields();
    let conditional = fields.iter().filter(|f| f.conditional).count();

    info!(
        total = fields.len(),
        conditional,
        termination = ?summary.termination,
        "discovery finished"
    );

    DiscoveryOutcome { fields, summary }
}
