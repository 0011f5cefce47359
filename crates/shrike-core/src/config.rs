//! Driver configuration.

use serde::{Deserialize, Serialize};

/// Policy for choosing among registered command kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SelectionWeighting {
    /// Every registered kind is equally likely.
    #[default]
    Uniform,

    /// Kinds are chosen in proportion to their registered weight.
    Weighted,
}

/// Configuration for the sequence driver.
///
/// All knobs have documented defaults and builder-style setters:
///
/// ```
/// use shrike_core::config::{DriverConfig, SelectionWeighting};
///
/// let config = DriverConfig::new()
///     .with_max_length(20)
///     .with_selection_weighting(SelectionWeighting::Weighted);
/// assert_eq!(config.max_length, 20);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriverConfig {
    /// Target number of commands per generated sequence. A run that
    /// executes this many commands without divergence completes.
    pub max_length: usize,

    /// Retry budget per sequence position. Applies independently to
    /// construction discards inside the registry and to validity
    /// rejections in the driver; exceeding either bound is a generation
    /// failure, never a silent success.
    pub max_generation_retries: usize,

    /// Policy for choosing among registered command kinds.
    pub selection_weighting: SelectionWeighting,

    /// When set, the minimizer only accepts shrink candidates that
    /// reproduce the original assertion, not just any failure.
    pub shrink_require_same_failure: bool,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            max_length: 50,
            max_generation_retries: 100,
            selection_weighting: SelectionWeighting::Uniform,
            shrink_require_same_failure: false,
        }
    }
}

impl DriverConfig {
    /// Creates a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the target sequence length.
    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = max_length;
        self
    }

    /// Sets the per-position generation retry budget.
    pub fn with_max_generation_retries(mut self, retries: usize) -> Self {
        self.max_generation_retries = retries;
        self
    }

    /// Sets the command kind selection policy.
    pub fn with_selection_weighting(mut self, weighting: SelectionWeighting) -> Self {
        self.selection_weighting = weighting;
        self
    }

    /// Requires shrink candidates to reproduce the original assertion.
    pub fn with_shrink_require_same_failure(mut self, require: bool) -> Self {
        self.shrink_require_same_failure = require;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DriverConfig::default();
        assert_eq!(config.max_length, 50);
        assert_eq!(config.max_generation_retries, 100);
        assert_eq!(config.selection_weighting, SelectionWeighting::Uniform);
        assert!(!config.shrink_require_same_failure);
    }

    #[test]
    fn test_builder() {
        let config = DriverConfig::new()
            .with_max_length(10)
            .with_max_generation_retries(5)
            .with_selection_weighting(SelectionWeighting::Weighted)
            .with_shrink_require_same_failure(true);

        assert_eq!(config.max_length, 10);
        assert_eq!(config.max_generation_retries, 5);
        assert_eq!(config.selection_weighting, SelectionWeighting::Weighted);
        assert!(config.shrink_require_same_failure);
    }

    #[test]
    fn test_serialization_round_trip() {
        let config = DriverConfig::new().with_max_length(7);
        let json = serde_json::to_string(&config).unwrap();
        let restored: DriverConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.max_length, 7);
    }
}
