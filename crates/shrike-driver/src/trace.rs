//! Execution traces.
//!
//! A trace pairs every executed command with the model state before and
//! after it. Because model transitions are pure, a trace can be re-derived
//! from the initial state and a sequence without touching the SUT; the
//! minimizer uses this to reject invalid shrink candidates before paying
//! for a SUT instance.

use std::fmt::Debug;

use shrike_core::DynCommand;

/// One executed command with its surrounding model states.
#[derive(Debug, Clone)]
pub struct TraceStep<S> {
    /// Model state the command was applied in.
    pub state_before: S,

    /// Human-readable rendering of the command.
    pub command: String,

    /// Model state predicted by the command's transition.
    pub state_after: S,
}

/// The ordered model-state history of one driven sequence.
#[derive(Debug, Clone)]
pub struct ExecutionTrace<S> {
    steps: Vec<TraceStep<S>>,
}

impl<S> ExecutionTrace<S> {
    /// Creates an empty trace.
    pub fn new() -> Self {
        Self { steps: Vec::new() }
    }

    /// Appends a step.
    pub fn record(&mut self, state_before: S, command: impl Into<String>, state_after: S) {
        self.steps.push(TraceStep {
            state_before,
            command: command.into(),
            state_after,
        });
    }

    /// Returns the number of recorded steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Returns true if no steps were recorded.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Returns the recorded steps in execution order.
    pub fn steps(&self) -> &[TraceStep<S>] {
        &self.steps
    }

    /// Returns the model state preceding the command at `position`.
    pub fn state_before(&self, position: usize) -> Option<&S> {
        self.steps.get(position).map(|step| &step.state_before)
    }

    /// Returns the model state after the last recorded step.
    pub fn final_state(&self) -> Option<&S> {
        self.steps.last().map(|step| &step.state_after)
    }
}

impl<S> Default for ExecutionTrace<S> {
    fn default() -> Self {
        Self::new()
    }
}

/// Re-derives the execution trace of a sequence using model transitions
/// only, with no SUT involved.
///
/// Returns the position of the first command whose validity predicate does
/// not hold, if any; a sequence accepted by the driver always traces
/// cleanly.
pub fn model_trace<S, T>(
    initial_state: &S,
    sequence: &[DynCommand<S, T>],
) -> Result<ExecutionTrace<S>, usize>
where
    S: Clone + Debug + Send + Sync + 'static,
    T: Send + 'static,
{
    let mut state = initial_state.clone();
    let mut trace = ExecutionTrace::new();
    for (position, command) in sequence.iter().enumerate() {
        if !command.is_valid(&state) {
            return Err(position);
        }
        let next = command.next_state(&state);
        trace.record(state, command.describe(), next.clone());
        state = next;
    }
    Ok(trace)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{CounterState, Decrement, Increment};
    use std::sync::Arc;

    #[test]
    fn test_trace_accessors() {
        let mut trace = ExecutionTrace::new();
        assert!(trace.is_empty());
        assert!(trace.final_state().is_none());

        trace.record(CounterState { value: 0 }, "Increment", CounterState { value: 1 });
        trace.record(CounterState { value: 1 }, "Increment", CounterState { value: 2 });

        assert_eq!(trace.len(), 2);
        assert_eq!(trace.state_before(1).unwrap().value, 1);
        assert_eq!(trace.final_state().unwrap().value, 2);
        assert_eq!(trace.steps()[0].command, "Increment");
    }

    #[test]
    fn test_model_trace_follows_transitions() {
        let sequence: Vec<shrike_core::DynCommand<_, _>> =
            vec![Arc::new(Increment), Arc::new(Increment), Arc::new(Decrement)];

        let trace = model_trace(&CounterState { value: 0 }, &sequence).unwrap();
        assert_eq!(trace.len(), 3);
        assert_eq!(trace.final_state().unwrap().value, 1);
    }

    #[test]
    fn test_model_trace_reports_first_invalid_position() {
        // Decrement requires a positive counter; at the initial state it is
        // invalid.
        let sequence: Vec<shrike_core::DynCommand<_, _>> =
            vec![Arc::new(Increment), Arc::new(Decrement), Arc::new(Decrement)];

        assert!(model_trace(&CounterState { value: 0 }, &sequence).is_ok());

        let sequence: Vec<shrike_core::DynCommand<_, _>> =
            vec![Arc::new(Decrement), Arc::new(Increment)];
        assert_eq!(
            model_trace(&CounterState { value: 0 }, &sequence).unwrap_err(),
            0
        );
    }

    #[test]
    fn test_model_trace_deterministic() {
        let sequence: Vec<shrike_core::DynCommand<_, _>> =
            vec![Arc::new(Increment), Arc::new(Increment)];
        let initial = CounterState { value: 0 };

        let first = model_trace(&initial, &sequence).unwrap();
        let second = model_trace(&initial, &sequence).unwrap();
        assert_eq!(
            first.final_state().unwrap().value,
            second.final_state().unwrap().value
        );
    }
}
