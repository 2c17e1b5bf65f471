pub mod choice;
pub mod config;
pub mod error;
pub mod fill_driver;
pub mod fixed_point;
pub mod inventory;
pub mod orchestrator;
pub mod run;
pub mod snapshot;
