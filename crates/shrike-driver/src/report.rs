//! Run reports.

use std::fmt;
use std::fmt::Debug;

use shrike_core::{describe_sequence, CommandSequence, RunId, RunOutcome};

use crate::trace::ExecutionTrace;

/// The full record of one driven run.
///
/// Carries the outcome together with the accepted sequence (shared command
/// handles, ready for replay by the minimizer) and the execution trace of
/// model states. The structured [`RunOutcome`] inside is what gets handed
/// to the reporting harness.
pub struct RunReport<S, T> {
    /// Unique identifier of this run attempt.
    pub id: RunId,

    /// The seed the run was generated from. Replaying with the same seed
    /// reproduces the same command sequence.
    pub seed: u64,

    /// Completion or captured failure.
    pub outcome: RunOutcome,

    /// The driven sequence, including the failing command if the run
    /// failed.
    pub sequence: CommandSequence<S, T>,

    /// Model states before and after every executed command.
    pub trace: ExecutionTrace<S>,

    /// Rendering of the teardown error, if SUT release failed after the
    /// outcome was captured.
    pub teardown_error: Option<String>,
}

impl<S, T> RunReport<S, T>
where
    S: Clone + Debug + Send + Sync + 'static,
    T: Send + 'static,
{
    /// Returns true if the run surfaced a failure.
    pub fn is_failure(&self) -> bool {
        self.outcome.is_failure()
    }

    /// Returns the number of commands driven.
    pub fn length(&self) -> usize {
        self.sequence.len()
    }

    /// Returns the human-readable rendering of the driven sequence.
    pub fn descriptions(&self) -> Vec<String> {
        describe_sequence(&self.sequence)
    }
}

impl<S, T> fmt::Debug for RunReport<S, T>
where
    S: Clone + Debug + Send + Sync + 'static,
    T: Send + 'static,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RunReport")
            .field("id", &self.id)
            .field("seed", &self.seed)
            .field("outcome", &self.outcome)
            .field("sequence", &self.descriptions())
            .field("trace_len", &self.trace.len())
            .field("teardown_error", &self.teardown_error)
            .finish()
    }
}
