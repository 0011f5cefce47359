//! Failures, run outcomes and run identifiers.
//!
//! These are the structured results handed to the reporting harness: a run
//! either completes silently or produces a [`Failure`] with enough context
//! to replay the exact divergence deterministically given the same seed.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::error::AssertionError;

/// Unique identifier for a test run.
///
/// Each run attempt is assigned a unique RunId so that reports from
/// repeated runs and shrink replays can be told apart.
///
/// # Examples
///
/// ```
/// use shrike_core::report::RunId;
///
/// let run_id = RunId::new();
/// println!("Run ID: {}", run_id);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RunId(Uuid);

impl RunId {
    /// Creates a new unique RunId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a RunId from a UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A captured divergence between model and system under test.
///
/// Carries the position of the triggering command within its sequence, a
/// rendering of the model state preceding it, the command's description,
/// and the assertion surfaced from execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Failure {
    /// Zero-based position of the triggering command in the sequence.
    pub position: usize,

    /// Rendering of the model state the command was applied in.
    pub state_before: String,

    /// Human-readable rendering of the triggering command.
    pub command: String,

    /// The assertion raised by the command's execution.
    pub assertion: AssertionError,
}

impl Failure {
    /// Creates a new failure record.
    pub fn new(
        position: usize,
        state_before: impl Into<String>,
        command: impl Into<String>,
        assertion: AssertionError,
    ) -> Self {
        Self {
            position,
            state_before: state_before.into(),
            command: command.into(),
            assertion,
        }
    }

    /// Returns true if `other` reproduces the same assertion.
    ///
    /// Positions are allowed to differ: removing commands during shrinking
    /// shifts the triggering command toward the front.
    pub fn same_assertion(&self, other: &Failure) -> bool {
        self.assertion.message == other.assertion.message
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} at position {} (state {}): {}",
            self.command, self.position, self.state_before, self.assertion
        )
    }
}

/// The result of driving one command sequence to completion or failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunOutcome {
    /// The sequence reached its target length without divergence.
    Completed {
        /// Number of commands executed.
        length: usize,
    },

    /// A command's execution diverged from the model's prediction.
    Failed(Failure),
}

impl RunOutcome {
    /// Returns true if the run surfaced a failure.
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    /// Returns the failure, if any.
    pub fn failure(&self) -> Option<&Failure> {
        match self {
            Self::Failed(failure) => Some(failure),
            Self::Completed { .. } => None,
        }
    }
}

impl fmt::Display for RunOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Completed { length } => write!(f, "Completed({length})"),
            Self::Failed(failure) => write!(f, "Failed({failure})"),
        }
    }
}
