use tracing::{info, warn};

use crate::browser::page::FormPage;
use crate::discovery::config::DiscoveryConfig;
use crate::discovery::error::{DiscoveryError, Step};
use crate::discovery::fill_driver::fill_fields;
use crate::discovery::inventory::{DiscoverySession, Provenance};
use crate::discovery::run::{RunContext, TerminationReason};
use crate::field::field_model::FieldDescriptor;
use crate::trace::trace::{TraceEvent, TracePhase};

/// Fill and re-snapshot until nothing new appears.
///
/// `current` is the snapshot the first round fills (normally the initial
/// one, already absorbed into `session`). Each round that reveals fields
/// stamps them with the round number and advances the session iteration;
/// the first round revealing nothing ends the loop at a fixed point. After
/// `max_iterations` productive rounds the loop stops regardless.
///
/// Returns `TimedOut` as soon as the deadline is seen to have passed.
pub fn run_to_fixed_point(
    page: &mut dyn FormPage,
    session: &mut DiscoverySession,
    mut current: Vec<FieldDescriptor>,
    config: &DiscoveryConfig,
    ctx: &mut RunContext<'_>,
) -> Result<TerminationReason, DiscoveryError> {
    loop {
        if session.iteration() >= config.max_iterations {
            warn!(
                max_iterations = config.max_iterations,
                fields = session.len(),
                "reached maximum iterations, stopping discovery loop"
            );
            return Ok(TerminationReason::IterationBound);
        }

        let round = session.iteration() + 1;

        if ctx.expired() {
            return Ok(TerminationReason::TimedOut);
        }

        ctx.summary.fill_rounds += 1;
        let fill = fill_fields(page, &current);
        ctx.summary.fill_failures += fill.failed;

        if ctx.expired() {
            return Ok(TerminationReason::TimedOut);
        }

        current = ctx.snapshot(page, Step::FillRound, round)?;
        let added = session.absorb(current.clone(), &Provenance::FillRound(round));

        ctx.trace(
            TraceEvent::now(TracePhase::FillRound, round)
                .with_snapshot_size(current.len())
                .with_revealed(session.latest(added))
                .with_note(format!(
                    "filled={} skipped={} failed={}",
                    fill.filled, fill.skipped, fill.failed
                )),
        );

        if added == 0 {
            info!(round, fields = session.len(), "no new fields, fixed point reached");
            return Ok(TerminationReason::FixedPoint);
        }

        info!(round, added, "fill round revealed conditional fields");
        session.advance_iteration();
    }
}
