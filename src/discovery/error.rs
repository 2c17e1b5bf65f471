use std::fmt;

use thiserror::Error;

use crate::browser::error::PageError;

/// Where in a run a page interaction happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    InitialSnapshot,
    FillRound,
    ChoiceExploration,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Step::InitialSnapshot => "initial snapshot",
            Step::FillRound => "fill round",
            Step::ChoiceExploration => "choice exploration",
        };
        f.write_str(name)
    }
}

/// Fatal errors that abort a discovery run.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// The page could not produce a snapshot; the partial inventory is discarded
    #[error("Field extraction failed during {step} (iteration {iteration}): {source}")]
    Extraction {
        step: Step,
        iteration: u32,
        #[source]
        source: PageError,
    },
}
