//! Progressive discovery of web form inputs, including fields that only
//! appear after other fields are filled or a choice is made.
//!
//! The engine drives any [`FormPage`]: it snapshots the visible fields,
//! fills them with canned values until nothing new appears, then cycles the
//! options of radio groups and short selects to surface their branches.

pub mod browser;
pub mod cli;
pub mod discovery;
pub mod field;
pub mod report;
pub mod trace;

pub use browser::error::PageError;
pub use browser::page::FormPage;
pub use discovery::config::DiscoveryConfig;
pub use discovery::error::DiscoveryError;
pub use discovery::orchestrator::{DiscoveryOutcome, discover, discover_traced};
pub use discovery::run::{RunSummary, TerminationReason};
pub use field::field_model::{ChoiceOption, FieldDescriptor, FieldKind, FillValue};
pub use field::identity::field_key;
