//! Configuration for minimization behavior.

use serde::{Deserialize, Serialize};

/// Configuration for the delta-debugging minimizer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MinimizerConfig {
    /// Maximum number of search iterations (structural rounds plus value
    /// positions scanned) before giving up. Backstops termination; the
    /// well-founded shrink measures normally converge far earlier.
    pub max_iterations: usize,

    /// Length below which structural removal stops.
    pub min_size: usize,

    /// Whether to re-verify that the minimized sequence still reproduces
    /// a failure before reporting it.
    pub verify_final: bool,

    /// When set, a teardown error demotes the candidate to inconclusive
    /// instead of letting the observed verdict stand.
    pub strict_teardown: bool,
}

impl Default for MinimizerConfig {
    fn default() -> Self {
        Self {
            max_iterations: 1000,
            min_size: 1,
            verify_final: true,
            strict_teardown: false,
        }
    }
}

impl MinimizerConfig {
    /// Creates a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the iteration budget.
    pub fn with_max_iterations(mut self, max: usize) -> Self {
        self.max_iterations = max;
        self
    }

    /// Sets the minimum sequence length.
    pub fn with_min_size(mut self, min: usize) -> Self {
        self.min_size = min;
        self
    }

    /// Enables or disables final re-verification.
    pub fn with_verify_final(mut self, verify: bool) -> Self {
        self.verify_final = verify;
        self
    }

    /// Enables or disables strict teardown handling.
    pub fn with_strict_teardown(mut self, strict: bool) -> Self {
        self.strict_teardown = strict;
        self
    }
}
