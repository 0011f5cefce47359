//! Fixed-sequence replay.
//!
//! The minimizer evaluates every shrink candidate by replaying it through
//! the driving loop with generation skipped: validate, apply to the model,
//! execute against a freshly constructed SUT, classify. Construction
//! errors make a candidate inconclusive; teardown errors are reported
//! alongside the verdict so the caller decides their weight.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fmt::Debug;

use shrike_core::{DynCommand, Failure, SutFactory};

use crate::driver::SequenceDriver;

/// Classification of one replayed sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReplayOutcome {
    /// Every command executed without divergence.
    Passed,

    /// A command's execution diverged from the model's prediction.
    Failed(Failure),

    /// A command's validity predicate rejected the state at its position;
    /// the sequence was not executed past it.
    Invalid {
        /// Position of the first invalid command.
        position: usize,
    },

    /// The SUT could not be constructed; the sequence could not be judged.
    Inconclusive {
        /// Rendering of the construction error.
        reason: String,
    },
}

impl ReplayOutcome {
    /// Returns true if the replay reproduced a failure.
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    /// Returns the reproduced failure, if any.
    pub fn failure(&self) -> Option<&Failure> {
        match self {
            Self::Failed(failure) => Some(failure),
            _ => None,
        }
    }
}

impl fmt::Display for ReplayOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Passed => write!(f, "Passed"),
            Self::Failed(failure) => write!(f, "Failed({failure})"),
            Self::Invalid { position } => write!(f, "Invalid(position {position})"),
            Self::Inconclusive { reason } => write!(f, "Inconclusive({reason})"),
        }
    }
}

/// A replay verdict together with any teardown error that followed it.
///
/// The teardown error is kept separate from the outcome: the verdict was
/// already observed when teardown ran, and the minimizer decides whether a
/// noisy teardown demotes the candidate.
#[derive(Debug, Clone)]
pub struct ReplayResult {
    /// The verdict observed while executing the sequence.
    pub outcome: ReplayOutcome,

    /// Rendering of the teardown error, if teardown failed.
    pub teardown_error: Option<String>,
}

impl<S, F> SequenceDriver<S, F>
where
    S: Clone + Debug + Send + Sync + 'static,
    F: SutFactory,
{
    /// Replays a fixed sequence against a freshly constructed SUT.
    ///
    /// Runs steps 2b-2e of the driving loop with generation skipped. The
    /// SUT is torn down on every exit path.
    pub async fn replay(&self, sequence: &[DynCommand<S, F::Sut>]) -> ReplayResult {
        let mut sut = match self.sut_factory().setup().await {
            Ok(sut) => sut,
            Err(err) => {
                tracing::warn!(error = %err, "sut construction failed during replay");
                return ReplayResult {
                    outcome: ReplayOutcome::Inconclusive {
                        reason: err.to_string(),
                    },
                    teardown_error: None,
                };
            }
        };

        let outcome = self.replay_on(&mut sut, sequence).await;

        let teardown_error = self.sut_factory().teardown(sut).await.err();
        if let Some(ref err) = teardown_error {
            tracing::warn!(error = %err, "sut teardown failed during replay");
        }

        ReplayResult {
            outcome,
            teardown_error: teardown_error.map(|err| err.to_string()),
        }
    }

    async fn replay_on(&self, sut: &mut F::Sut, sequence: &[DynCommand<S, F::Sut>]) -> ReplayOutcome {
        let mut state = self.initial_state().clone();

        for (position, command) in sequence.iter().enumerate() {
            if !command.is_valid(&state) {
                return ReplayOutcome::Invalid { position };
            }

            let next = command.next_state(&state);
            if let Err(assertion) = command.run(&state, sut).await {
                return ReplayOutcome::Failed(Failure::new(
                    position,
                    format!("{state:?}"),
                    command.describe(),
                    assertion,
                ));
            }
            state = next;
        }

        ReplayOutcome::Passed
    }
}
