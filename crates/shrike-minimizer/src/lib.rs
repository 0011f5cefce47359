//! # shrike-minimizer
//!
//! Failing-sequence minimization for the stateful testing engine, using
//! delta debugging over two shrink dimensions.
//!
//! Given a command sequence that reproduces a divergence between model and
//! system under test, the minimizer searches for the smallest sequence
//! that still reproduces a failure:
//!
//! - **Structural**: remove spans of commands using the classic DDMIN
//!   chunk partitioning (subsets, then complements, doubling granularity
//!   when no removal succeeds).
//! - **Value**: replace individual commands with the strictly-simpler
//!   variants offered by their own `shrink()` sequence.
//!
//! The two dimensions alternate until neither makes progress. Every
//! candidate is replayed from the initial model state against a freshly
//! constructed SUT; candidates that pass, become invalid, or cannot be
//! judged (SUT construction failed) are rejected and the search continues.
//!
//! ## Example
//!
//! ```rust,ignore
//! use shrike_minimizer::{DeltaDebugMinimizer, MinimizerConfig};
//!
//! let minimizer = DeltaDebugMinimizer::new(MinimizerConfig::default());
//! let minimal = minimizer.minimize(&driver, &report.sequence).await?;
//!
//! println!(
//!     "reduced {} -> {} commands:\n{}",
//!     minimal.stats.original_length,
//!     minimal.stats.minimized_length,
//!     minimal.descriptions().join("\n"),
//! );
//! ```
//!
//! ## Configuration
//!
//! ```rust,ignore
//! let config = MinimizerConfig::new()
//!     .with_max_iterations(500)   // backstop for the search
//!     .with_min_size(1)           // stop shrinking below this length
//!     .with_verify_final(true)    // re-check the result before reporting
//!     .with_strict_teardown(false);
//! ```

mod config;
mod ddmin;
mod error;
mod result;
mod value;

#[cfg(test)]
pub(crate) mod fixtures;

pub use config::MinimizerConfig;
pub use ddmin::DeltaDebugMinimizer;
pub use error::MinimizerError;
pub use result::{MinimalFailure, MinimalFailureReport, ShrinkStats};
