//! Shrike Core - Core types for the stateful testing engine.
//!
//! This crate provides the fundamental types used throughout the shrike
//! testing engine, including:
//!
//! - [`command`]: The `Command` capability driving model and SUT in lockstep
//! - [`sut`]: Scoped acquisition and release of the system under test
//! - [`sequence`]: Command sequences and their rendering
//! - [`report`]: Failures, run outcomes and run identifiers
//! - [`config`]: Driver configuration
//! - [`error`]: Error types shared across the engine
//!
//! # Overview
//!
//! The engine exercises a stateful system by generating sequences of
//! commands and applying each command to an abstract model and to the real
//! system under test at the same time. A command predicts the next model
//! state and asserts that the real system agrees; a mismatch is the failure
//! signal the engine exists to find. This crate defines the contract those
//! commands satisfy and the value types that flow between the driver and
//! the minimizer.
//!
//! # Example
//!
//! ```
//! use shrike_core::command::Command;
//! use shrike_core::error::{ensure, AssertionError};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug)]
//! struct CounterState {
//!     value: u64,
//! }
//!
//! struct Increment;
//!
//! #[async_trait]
//! impl Command for Increment {
//!     type State = CounterState;
//!     type Sut = u64;
//!
//!     fn next_state(&self, state: &CounterState) -> CounterState {
//!         CounterState { value: state.value + 1 }
//!     }
//!
//!     async fn run(&self, state: &CounterState, sut: &mut u64) -> Result<(), AssertionError> {
//!         *sut += 1;
//!         ensure(*sut == state.value + 1, "counter out of step with model")
//!     }
//! }
//! ```

pub mod command;
pub mod config;
pub mod error;
pub mod report;
pub mod sequence;
pub mod sut;

// Re-export commonly used types at the crate root for convenience
pub use command::{is_valid_command, Command, CommandShrinks, DynCommand};
pub use config::{DriverConfig, SelectionWeighting};
pub use error::{ensure, AssertionError, SutError};
pub use report::{Failure, RunId, RunOutcome};
pub use sequence::{describe_sequence, render_sequence, CommandSequence};
pub use sut::SutFactory;
