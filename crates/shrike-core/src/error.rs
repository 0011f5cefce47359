//! Error types for the testing engine.
//!
//! This module provides the error types shared across the engine crates,
//! using `thiserror` for ergonomic error handling. Assertion failures are
//! deliberately separate from the other errors: they are the signal the
//! engine exists to find, not a defect in the engine or the test setup.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// A mismatch between the behavior predicted by the model and the behavior
/// observed on the system under test.
///
/// Raised from [`Command::run`](crate::command::Command::run). The driver
/// captures it together with the command's position and the model state
/// preceding it; it is never propagated as a program error.
///
/// # Examples
///
/// ```
/// use shrike_core::error::AssertionError;
///
/// let err = AssertionError::new("counter out of step")
///     .with_expected("0")
///     .with_observed("1");
/// assert!(err.to_string().contains("expected 0"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssertionError {
    /// What went wrong.
    pub message: String,

    /// Rendering of the value the model predicted, if captured.
    pub expected: Option<String>,

    /// Rendering of the value the SUT produced, if captured.
    pub observed: Option<String>,
}

impl AssertionError {
    /// Creates a new assertion error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            expected: None,
            observed: None,
        }
    }

    /// Attaches a rendering of the predicted value.
    pub fn with_expected(mut self, expected: impl Into<String>) -> Self {
        self.expected = Some(expected.into());
        self
    }

    /// Attaches a rendering of the observed value.
    pub fn with_observed(mut self, observed: impl Into<String>) -> Self {
        self.observed = Some(observed.into());
        self
    }
}

impl fmt::Display for AssertionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "assertion failed: {}", self.message)?;
        if let Some(ref expected) = self.expected {
            write!(f, " (expected {}", expected)?;
            if let Some(ref observed) = self.observed {
                write!(f, ", observed {}", observed)?;
            }
            write!(f, ")")?;
        } else if let Some(ref observed) = self.observed {
            write!(f, " (observed {})", observed)?;
        }
        Ok(())
    }
}

impl std::error::Error for AssertionError {}

/// Checks a predicted-versus-observed condition inside a command's `run`.
///
/// Returns `Ok(())` when the condition holds and an [`AssertionError`] with
/// the given message otherwise, so it composes with `?`:
///
/// ```
/// use shrike_core::error::ensure;
///
/// fn check(observed: u64) -> Result<(), shrike_core::error::AssertionError> {
///     ensure(observed == 0, format!("expected 0, observed {observed}"))?;
///     Ok(())
/// }
/// ```
pub fn ensure(condition: bool, message: impl Into<String>) -> Result<(), AssertionError> {
    if condition {
        Ok(())
    } else {
        Err(AssertionError::new(message))
    }
}

/// Errors raised while acquiring or releasing the system under test.
///
/// During shrinking these are treated as inconclusive for the single
/// candidate being replayed; they are recorded for diagnostics, never
/// silently swallowed and never reported as the overall test result.
#[derive(Debug, Clone, Error)]
pub enum SutError {
    /// The SUT could not be constructed for a run attempt.
    #[error("sut construction failed: {0}")]
    Construction(String),

    /// The SUT could not be torn down at the end of a run attempt.
    #[error("sut teardown failed: {0}")]
    Teardown(String),
}

impl SutError {
    /// Creates a new construction error.
    pub fn construction(message: impl Into<String>) -> Self {
        Self::Construction(message.into())
    }

    /// Creates a new teardown error.
    pub fn teardown(message: impl Into<String>) -> Self {
        Self::Teardown(message.into())
    }

    /// Returns true if this error was raised during construction.
    pub fn is_construction(&self) -> bool {
        matches!(self, Self::Construction(_))
    }
}
