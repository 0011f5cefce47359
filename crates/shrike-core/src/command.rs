//! The command capability.
//!
//! A command is one unit of interaction with the system under test. It
//! defines a pure transition on the abstract model state, a side-effecting
//! execution against the real system that asserts the two agree, and a
//! validity predicate that guards both. Commands are immutable once
//! constructed so that the same instance can be shared by many candidate
//! sequences during shrinking.

use async_trait::async_trait;
use std::fmt::Debug;
use std::sync::Arc;

use crate::error::AssertionError;

/// A shared, read-only handle to a command.
///
/// Sequences hold these handles rather than owned commands: during
/// shrinking the same generated command appears in many candidate
/// sequences, and since commands never mutate after construction no copy
/// is needed.
pub type DynCommand<S, T> = Arc<dyn Command<State = S, Sut = T>>;

/// The finite lazy sequence of strictly-simpler replacements for a command.
pub type CommandShrinks<S, T> = Box<dyn Iterator<Item = DynCommand<S, T>> + Send>;

/// One discrete interaction step with the system under test.
///
/// Implementations define how the abstract model state advances
/// ([`next_state`](Command::next_state)), how the real system is exercised
/// and checked against the model's prediction ([`run`](Command::run)), and
/// in which states the command may be applied at all
/// ([`is_valid`](Command::is_valid)).
///
/// A command that is invalid for a given state is never applied to the
/// model and never executed against the SUT in that state; the driver
/// discards it and generates another.
///
/// # Immutability
///
/// Commands must not mutate after construction. All randomness a command
/// needs is drawn while it is built (see the generator registry), which is
/// also what allows [`shrink`](Command::shrink) to offer strictly-simpler
/// variants of those drawn values later.
#[async_trait]
pub trait Command: Send + Sync {
    /// The abstract model state this command transitions.
    type State: Clone + Debug + Send + Sync + 'static;

    /// The system under test this command executes against.
    type Sut: Send + 'static;

    /// Returns the state resulting from applying this command to the given
    /// state. Must be deterministic given `state` and the command's own
    /// already-generated parameters.
    ///
    /// The default implementation returns the given state unchanged.
    fn next_state(&self, state: &Self::State) -> Self::State {
        state.clone()
    }

    /// Applies this command to the system under test, assuming the model is
    /// in `state`, and checks that the system behaves as the model
    /// predicts.
    ///
    /// An `Err` is a test-assertion failure: the condition the engine
    /// exists to find, consumed by the driver rather than propagated as a
    /// program error. The default implementation does nothing.
    async fn run(&self, _state: &Self::State, _sut: &mut Self::Sut) -> Result<(), AssertionError> {
        Ok(())
    }

    /// Returns whether this command may be applied in the given state.
    ///
    /// Defaults to `true`.
    fn is_valid(&self, _state: &Self::State) -> bool {
        true
    }

    /// Returns a human-readable rendering of this command for failure
    /// reports. The default identifies the command's type.
    fn describe(&self) -> String {
        let name = std::any::type_name::<Self>();
        name.rsplit("::").next().unwrap_or(name).to_string()
    }

    /// Returns the finite lazy sequence of strictly-simpler variants of
    /// this command, in decreasing order of preference.
    ///
    /// The minimizer tries these as in-place replacements when reducing a
    /// failing sequence. Each yielded command must be strictly simpler
    /// under some well-founded measure, or shrinking may not terminate.
    /// The default yields nothing.
    fn shrink(&self) -> CommandShrinks<Self::State, Self::Sut> {
        Box::new(std::iter::empty())
    }
}

/// Checks whether a command is valid for the given state.
pub fn is_valid_command<S, T>(command: &dyn Command<State = S, Sut = T>, state: &S) -> bool
where
    S: Clone + Debug + Send + Sync + 'static,
    T: Send + 'static,
{
    command.is_valid(state)
}
