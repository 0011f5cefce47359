//! Result types for minimization.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fmt::Debug;
use std::time::Duration;

use shrike_core::{describe_sequence, CommandSequence, Failure};

/// The minimal reproducing case found by the minimizer.
///
/// Holds the minimized sequence as live command handles, ready to be
/// replayed through the driver, plus the reproduced failure and the search
/// statistics. [`report`](MinimalFailure::report) produces the
/// serializable form handed to the reporting harness.
pub struct MinimalFailure<S, T> {
    /// The minimized sequence; still reproduces a failure when replayed.
    pub sequence: CommandSequence<S, T>,

    /// The failure reproduced by the minimized sequence.
    pub failure: Failure,

    /// Statistics about the search.
    pub stats: ShrinkStats,
}

impl<S, T> MinimalFailure<S, T>
where
    S: Clone + Debug + Send + Sync + 'static,
    T: Send + 'static,
{
    /// Returns the number of commands in the minimized sequence.
    pub fn length(&self) -> usize {
        self.sequence.len()
    }

    /// Returns the human-readable rendering of the minimized sequence.
    pub fn descriptions(&self) -> Vec<String> {
        describe_sequence(&self.sequence)
    }

    /// Produces the serializable report for the harness.
    pub fn report(&self) -> MinimalFailureReport {
        MinimalFailureReport {
            sequence: self.descriptions(),
            failure: self.failure.clone(),
            stats: self.stats.clone(),
        }
    }
}

impl<S, T> fmt::Display for MinimalFailure<S, T>
where
    S: Clone + Debug + Send + Sync + 'static,
    T: Send + 'static,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "MinimalFailure {{ {} -> {} commands, {} }}",
            self.stats.original_length,
            self.stats.minimized_length,
            self.failure
        )
    }
}

impl<S, T> fmt::Debug for MinimalFailure<S, T>
where
    S: Clone + Debug + Send + Sync + 'static,
    T: Send + 'static,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MinimalFailure")
            .field("sequence", &self.descriptions())
            .field("failure", &self.failure)
            .field("stats", &self.stats)
            .finish()
    }
}

/// The serializable form of a minimal reproducing case.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MinimalFailureReport {
    /// Rendering of each command in the minimized sequence, in order.
    pub sequence: Vec<String>,

    /// The reproduced failure.
    pub failure: Failure,

    /// Statistics about the search.
    pub stats: ShrinkStats,
}

/// Statistics about one minimization search.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShrinkStats {
    /// Length of the input sequence.
    pub original_length: usize,

    /// Length of the minimized sequence.
    pub minimized_length: usize,

    /// Total candidate replays performed.
    pub replays: usize,

    /// Accepted structural removals.
    pub structural_removals: usize,

    /// Accepted value substitutions.
    pub value_shrinks: usize,

    /// Candidates rejected because they passed.
    pub passed_candidates: usize,

    /// Candidates rejected because a precondition no longer held.
    pub invalid_candidates: usize,

    /// Candidates rejected because the SUT could not be constructed (or,
    /// under strict teardown, released).
    pub inconclusive_candidates: usize,

    /// Candidates rejected because they failed with a different assertion
    /// while the same failure was required.
    pub different_failures: usize,

    /// Teardown errors observed during candidate replays.
    pub teardown_errors: usize,

    /// Number of times structural granularity had to increase.
    pub granularity_increases: usize,

    /// Maximum structural granularity reached.
    pub max_granularity: usize,

    /// Wall-clock duration of the search.
    #[serde(skip)]
    pub duration: Option<Duration>,
}

impl ShrinkStats {
    /// Records a granularity increase.
    pub fn record_granularity(&mut self, granularity: usize) {
        self.granularity_increases += 1;
        if granularity > self.max_granularity {
            self.max_granularity = granularity;
        }
    }

    /// Returns the percentage reduction achieved.
    pub fn reduction_percentage(&self) -> f64 {
        if self.original_length == 0 {
            return 0.0;
        }
        (1.0 - self.minimized_length as f64 / self.original_length as f64) * 100.0
    }
}

impl fmt::Display for ShrinkStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Stats {{ {} -> {} commands ({:.1}% reduction), {} replays, {} removals, {} value shrinks",
            self.original_length,
            self.minimized_length,
            self.reduction_percentage(),
            self.replays,
            self.structural_removals,
            self.value_shrinks
        )?;
        if self.inconclusive_candidates > 0 {
            write!(f, ", {} inconclusive", self.inconclusive_candidates)?;
        }
        if self.teardown_errors > 0 {
            write!(f, ", {} teardown errors", self.teardown_errors)?;
        }
        write!(f, " }}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reduction_percentage() {
        let stats = ShrinkStats {
            original_length: 10,
            minimized_length: 1,
            ..Default::default()
        };
        assert!((stats.reduction_percentage() - 90.0).abs() < 0.1);

        let empty = ShrinkStats::default();
        assert_eq!(empty.reduction_percentage(), 0.0);
    }

    #[test]
    fn test_record_granularity() {
        let mut stats = ShrinkStats::default();
        stats.record_granularity(4);
        stats.record_granularity(8);
        stats.record_granularity(2);

        assert_eq!(stats.granularity_increases, 3);
        assert_eq!(stats.max_granularity, 8);
    }

    #[test]
    fn test_stats_display() {
        let stats = ShrinkStats {
            original_length: 10,
            minimized_length: 2,
            replays: 17,
            teardown_errors: 3,
            ..Default::default()
        };
        let rendered = stats.to_string();
        assert!(rendered.contains("10 -> 2"));
        assert!(rendered.contains("17 replays"));
        assert!(rendered.contains("3 teardown errors"));
    }

    #[test]
    fn test_stats_serialization() {
        let stats = ShrinkStats {
            original_length: 5,
            minimized_length: 1,
            duration: Some(Duration::from_millis(12)),
            ..Default::default()
        };
        let json = serde_json::to_string(&stats).unwrap();
        let restored: ShrinkStats = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.original_length, 5);
        // Durations are not serialized.
        assert!(restored.duration.is_none());
    }
}
