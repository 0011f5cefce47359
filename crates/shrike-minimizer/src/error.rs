//! Error types for minimization.

use thiserror::Error;

/// Errors that can occur during minimization.
#[derive(Debug, Clone, Error)]
pub enum MinimizerError {
    /// The input sequence is empty.
    #[error("cannot minimize an empty sequence")]
    EmptySequence,

    /// The input sequence does not reproduce a failure, so there is
    /// nothing to minimize.
    #[error("sequence does not reproduce a failure")]
    NoFailure,

    /// The iteration budget was exhausted before the search converged.
    #[error("minimization stopped after {0} iterations")]
    MaxIterationsReached(usize),

    /// The search reached an inconsistent state.
    #[error("internal minimizer error: {0}")]
    Internal(String),
}
