use std::time::Duration;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::browser::session::DEFAULT_SERVER_SCRIPT;
use crate::discovery::config::{
    DEFAULT_MAX_ITERATIONS, DEFAULT_OPTION_CARDINALITY_CAP, DiscoveryConfig,
};

// ============================================================================
// CLI Argument Parsing (clap derive)
// ============================================================================

#[derive(Parser, Debug)]
#[command(
    name = "form-discovery",
    version,
    about = "Discover every input of a web form, including conditional fields"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to config file (default: form-discovery.yaml in current dir)
    #[arg(long, global = true)]
    pub config: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Load a page and inventory its form inputs
    Discover {
        /// URL of the page holding the form
        #[arg(long)]
        url: String,

        /// Maximum fill rounds that may reveal new fields
        #[arg(long)]
        max_iterations: Option<u32>,

        /// Largest select explored option by option
        #[arg(long)]
        option_cap: Option<usize>,

        /// Stop after this many seconds and keep what was found
        #[arg(long)]
        timeout_secs: Option<u64>,

        /// Directory for the JSON record
        #[arg(short, long)]
        output_dir: Option<String>,

        /// Append a JSONL trace of every round to this file
        #[arg(long)]
        trace: Option<String>,

        /// Print the summary without writing a record
        #[arg(long, default_value_t = false)]
        no_save: bool,
    },
}

// ============================================================================
// Config File Model (optional YAML)
// ============================================================================

/// Optional YAML config file: `form-discovery.yaml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub discovery: DiscoverySection,
    #[serde(default)]
    pub browser: BrowserSection,
    #[serde(default)]
    pub output: OutputSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoverySection {
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u32,

    #[serde(default = "default_option_cap")]
    pub option_cardinality_cap: usize,

    pub timeout_secs: Option<u64>,
}

impl Default for DiscoverySection {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            option_cardinality_cap: DEFAULT_OPTION_CARDINALITY_CAP,
            timeout_secs: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowserSection {
    #[serde(default = "default_server_script")]
    pub server_script: String,

    /// Pause after each value injection so reactive logic can settle
    #[serde(default = "default_settle_ms")]
    pub settle_ms: u64,
}

impl Default for BrowserSection {
    fn default() -> Self {
        Self {
            server_script: default_server_script(),
            settle_ms: default_settle_ms(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputSection {
    #[serde(default = "default_output_dir")]
    pub dir: String,
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
        }
    }
}

// Serde default helpers
fn default_max_iterations() -> u32 { DEFAULT_MAX_ITERATIONS }
fn default_option_cap() -> usize { DEFAULT_OPTION_CARDINALITY_CAP }
fn default_server_script() -> String { DEFAULT_SERVER_SCRIPT.to_string() }
fn default_settle_ms() -> u64 { 1000 }
fn default_output_dir() -> String { "output".to_string() }

// ============================================================================
// Config File Loading
// ============================================================================

/// Load config from a YAML file. Returns defaults if file is missing or malformed.
pub fn load_config(path: Option<&str>) -> AppConfig {
    let config_path = path.unwrap_or("form-discovery.yaml");
    match std::fs::read_to_string(config_path) {
        Ok(content) => parse_config(&content),
        Err(_) => AppConfig::default(),
    }
}

pub fn parse_config(content: &str) -> AppConfig {
    match serde_yaml::from_str(content) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!(error = %e, "malformed config file, using defaults");
            AppConfig::default()
        }
    }
}

// ============================================================================
// Config Builders (merge CLI args with config file)
// ============================================================================

/// Resolve discovery bounds: CLI flag > config file > default.
pub fn build_discovery_config(
    file: &DiscoverySection,
    max_iterations: Option<u32>,
    option_cap: Option<usize>,
    timeout_secs: Option<u64>,
) -> DiscoveryConfig {
    DiscoveryConfig {
        max_iterations: max_iterations.unwrap_or(file.max_iterations),
        option_cardinality_cap: option_cap.unwrap_or(file.option_cardinality_cap),
        timeout: timeout_secs.or(file.timeout_secs).map(Duration::from_secs),
    }
}
