//! Command sequences.
//!
//! A sequence is an ordered list of shared command handles and represents
//! one test case. Every prefix of an accepted sequence, replayed from the
//! initial model state, satisfies each command's validity predicate at the
//! point it is applied; invalid commands are never retained.

use std::fmt::Debug;

use crate::command::DynCommand;

/// An ordered list of shared command handles representing one test case.
pub type CommandSequence<S, T> = Vec<DynCommand<S, T>>;

/// Returns the human-readable rendering of each command in order.
pub fn describe_sequence<S, T>(sequence: &[DynCommand<S, T>]) -> Vec<String>
where
    S: Clone + Debug + Send + Sync + 'static,
    T: Send + 'static,
{
    sequence.iter().map(|command| command.describe()).collect()
}

/// Renders a sequence for failure reports, one command per line.
pub fn render_sequence<S, T>(sequence: &[DynCommand<S, T>]) -> String
where
    S: Clone + Debug + Send + Sync + 'static,
    T: Send + 'static,
{
    describe_sequence(sequence).join("\n")
}
