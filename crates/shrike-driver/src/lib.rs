//! Shrike Driver - The sequence driver for the stateful testing engine.
//!
//! The driver orchestrates the main loop: generate a command for the
//! current model state, validate it, apply it to the model, execute it
//! against the system under test, detect divergence, repeat until a target
//! length or failure.
//!
//! # Modes
//!
//! - [`SequenceDriver::run`]: seeded generation mode; produces a
//!   [`RunReport`] containing the outcome, the accepted sequence and its
//!   execution trace.
//! - [`SequenceDriver::replay`]: fixed-sequence mode used by the
//!   minimizer; replays a candidate against a fresh SUT and classifies it
//!   as passed, failed, invalid or inconclusive.
//!
//! The SUT is a scoped resource: constructed at the start of a run or
//! replay attempt and torn down on every exit path, so shrink iterations
//! that replay hundreds of candidates do not leak resources.

mod driver;
mod replay;
mod report;
mod trace;

#[cfg(test)]
pub(crate) mod fixtures;

pub use driver::{DriveError, SequenceDriver};
pub use replay::{ReplayOutcome, ReplayResult};
pub use report::RunReport;
pub use trace::{model_trace, ExecutionTrace, TraceStep};
