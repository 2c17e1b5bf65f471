use std::time::Duration;

pub const DEFAULT_MAX_ITERATIONS: u32 = 5;
pub const DEFAULT_OPTION_CARDINALITY_CAP: usize = 4;

/// Bounds for one discovery run.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscoveryConfig {
    /// Maximum productive fill rounds before the loop stops (default 5).
    /// Zero means "initial snapshot only".
    pub max_iterations: u32,

    /// Selects with more options than this are not explored (default 4)
    pub option_cardinality_cap: usize,

    /// Soft deadline for the whole run; partial results are returned on expiry
    pub timeout: Option<Duration>,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            option_cardinality_cap: DEFAULT_OPTION_CARDINALITY_CAP,
            timeout: None,
        }
    }
}

impl DiscoveryConfig {
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_option_cap(mut self, cap: usize) -> Self {
        self.option_cardinality_cap = cap;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}
