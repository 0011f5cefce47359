//! Delta debugging over command sequences.
//!
//! Implements the classic DDMIN algorithm from "Simplifying and Isolating
//! Failure-Inducing Input" by Zeller & Hildebrandt (2002), applied to
//! command sequences and combined with a second, per-command value shrink
//! dimension.
//!
//! The structural pass removes chunks of commands and replays each
//! candidate to verify the failure survives, increasing granularity when
//! removal fails and resetting it when removal succeeds. The value pass
//! (see the sibling module) then substitutes strictly-simpler variants of
//! individual commands. The passes alternate until neither makes
//! progress.

use std::fmt::Debug;
use std::time::Instant;
use tracing::{debug, info, warn};

use shrike_core::{DynCommand, Failure, SutFactory};
use shrike_driver::{ReplayOutcome, SequenceDriver};

use crate::config::MinimizerConfig;
use crate::error::MinimizerError;
use crate::result::{MinimalFailure, ShrinkStats};

/// Splits a sequence into `n` chunks of approximately equal size.
fn split_into_chunks<S, T>(commands: &[DynCommand<S, T>], n: usize) -> Vec<Vec<DynCommand<S, T>>>
where
    S: Clone + Debug + Send + Sync + 'static,
    T: Send + 'static,
{
    let len = commands.len();
    if n == 0 || len == 0 {
        return vec![];
    }

    let chunk_size = (len + n - 1) / n; // Ceiling division
    commands.chunks(chunk_size).map(|chunk| chunk.to_vec()).collect()
}

/// Returns the i-th chunk of the split.
fn chunk_at<S, T>(commands: &[DynCommand<S, T>], n: usize, i: usize) -> Vec<DynCommand<S, T>>
where
    S: Clone + Debug + Send + Sync + 'static,
    T: Send + 'static,
{
    split_into_chunks(commands, n)
        .into_iter()
        .nth(i)
        .unwrap_or_default()
}

/// Returns all chunks except the i-th one.
fn complement_at<S, T>(commands: &[DynCommand<S, T>], n: usize, i: usize) -> Vec<DynCommand<S, T>>
where
    S: Clone + Debug + Send + Sync + 'static,
    T: Send + 'static,
{
    split_into_chunks(commands, n)
        .into_iter()
        .enumerate()
        .filter(|(index, _)| *index != i)
        .flat_map(|(_, chunk)| chunk)
        .collect()
}

/// Delta-debugging minimizer over failing command sequences.
///
/// Every accepted step strictly reduces a well-founded measure (sequence
/// length, then remaining shrink depth per command), so the search
/// terminates; `max_iterations` backstops it regardless.
pub struct DeltaDebugMinimizer {
    pub(crate) config: MinimizerConfig,
}

impl DeltaDebugMinimizer {
    /// Creates a minimizer with the given configuration.
    pub fn new(config: MinimizerConfig) -> Self {
        Self { config }
    }

    /// Creates a minimizer with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(MinimizerConfig::default())
    }

    /// Minimizes a failing sequence while preserving failure reproduction.
    ///
    /// Alternates the structural and value dimensions until a fixed point:
    /// no chunk removal and no value substitution yields a smaller failing
    /// sequence. Whether "failing" means the identical assertion is
    /// controlled by the driver's `shrink_require_same_failure`
    /// configuration.
    ///
    /// # Errors
    ///
    /// * `MinimizerError::EmptySequence` - the input is empty.
    /// * `MinimizerError::NoFailure` - the input does not fail.
    /// * `MinimizerError::MaxIterationsReached` - budget exhausted.
    /// * `MinimizerError::Internal` - final verification did not fail.
    pub async fn minimize<S, F>(
        &self,
        driver: &SequenceDriver<S, F>,
        sequence: &[DynCommand<S, F::Sut>],
    ) -> Result<MinimalFailure<S, F::Sut>, MinimizerError>
    where
        S: Clone + Debug + Send + Sync + 'static,
        F: SutFactory,
    {
        let start = Instant::now();

        if sequence.is_empty() {
            return Err(MinimizerError::EmptySequence);
        }

        let mut stats = ShrinkStats {
            original_length: sequence.len(),
            ..Default::default()
        };

        info!(original_length = sequence.len(), "starting minimization");

        // Verify the sequence actually reproduces a failure.
        let original_failure = match self.check(driver, sequence, None, &mut stats).await {
            Some(failure) => failure,
            None => return Err(MinimizerError::NoFailure),
        };

        let reference = if driver.config().shrink_require_same_failure {
            Some(original_failure.clone())
        } else {
            None
        };

        let mut current: Vec<DynCommand<S, F::Sut>> = sequence.to_vec();
        let mut best_failure = original_failure;
        let mut iterations = 0usize;

        // Alternate both shrink dimensions until neither makes progress.
        loop {
            let length_before = current.len();

            current = self
                .structural_pass(
                    driver,
                    current,
                    reference.as_ref(),
                    &mut stats,
                    &mut best_failure,
                    &mut iterations,
                )
                .await?;

            let value_changed = self
                .value_pass(
                    driver,
                    &mut current,
                    reference.as_ref(),
                    &mut stats,
                    &mut best_failure,
                    &mut iterations,
                )
                .await?;

            if current.len() == length_before && !value_changed {
                break;
            }
        }

        if self.config.verify_final {
            match self.check(driver, &current, reference.as_ref(), &mut stats).await {
                Some(failure) => best_failure = failure,
                None => {
                    warn!("minimized sequence no longer reproduces the failure");
                    return Err(MinimizerError::Internal(
                        "minimized sequence no longer reproduces the failure".into(),
                    ));
                }
            }
        }

        stats.minimized_length = current.len();
        stats.duration = Some(start.elapsed());

        info!(
            original_length = stats.original_length,
            minimized_length = stats.minimized_length,
            replays = stats.replays,
            reduction_percent = stats.reduction_percentage(),
            "minimization complete"
        );

        Ok(MinimalFailure {
            sequence: current,
            failure: best_failure,
            stats,
        })
    }

    /// One full DDMIN round over the current best sequence.
    async fn structural_pass<S, F>(
        &self,
        driver: &SequenceDriver<S, F>,
        mut current: Vec<DynCommand<S, F::Sut>>,
        reference: Option<&Failure>,
        stats: &mut ShrinkStats,
        best_failure: &mut Failure,
        iterations: &mut usize,
    ) -> Result<Vec<DynCommand<S, F::Sut>>, MinimizerError>
    where
        S: Clone + Debug + Send + Sync + 'static,
        F: SutFactory,
    {
        let min_size = self.config.min_size.max(1);
        let mut n = 2;

        while current.len() >= min_size && n <= current.len() {
            *iterations += 1;
            if *iterations > self.config.max_iterations {
                return Err(MinimizerError::MaxIterationsReached(
                    self.config.max_iterations,
                ));
            }

            let mut reduced = false;

            // Try reducing to individual chunks.
            for i in 0..n {
                let chunk = chunk_at(&current, n, i);
                if chunk.len() < min_size || chunk.len() == current.len() {
                    continue;
                }

                if let Some(failure) = self.check(driver, &chunk, reference, stats).await {
                    debug!(chunk_index = i, chunk_len = chunk.len(), "reduced to subset");
                    current = chunk;
                    n = 2;
                    reduced = true;
                    *best_failure = failure;
                    stats.structural_removals += 1;
                    break;
                }
            }

            if reduced {
                continue;
            }

            // Try removing individual chunks.
            for i in 0..n {
                let complement = complement_at(&current, n, i);
                if complement.len() < min_size || complement.len() == current.len() {
                    continue;
                }

                if let Some(failure) = self.check(driver, &complement, reference, stats).await {
                    debug!(
                        chunk_index = i,
                        removed = current.len() - complement.len(),
                        "reduced to complement"
                    );
                    current = complement;
                    n = n.saturating_sub(1).max(2);
                    reduced = true;
                    *best_failure = failure;
                    stats.structural_removals += 1;
                    break;
                }
            }

            if !reduced {
                if n >= current.len() {
                    // Maximum granularity reached, nothing more to remove.
                    break;
                }
                n = (2 * n).min(current.len());
                stats.record_granularity(n);
            }
        }

        Ok(current)
    }

    /// Replays a candidate and decides whether it counts as failing.
    ///
    /// Returns the reproduced failure on acceptance. Rejections are
    /// classified into the statistics: passed, invalid, inconclusive or
    /// wrong-failure. Teardown errors are counted and, under strict
    /// teardown, demote the candidate.
    pub(crate) async fn check<S, F>(
        &self,
        driver: &SequenceDriver<S, F>,
        candidate: &[DynCommand<S, F::Sut>],
        reference: Option<&Failure>,
        stats: &mut ShrinkStats,
    ) -> Option<Failure>
    where
        S: Clone + Debug + Send + Sync + 'static,
        F: SutFactory,
    {
        stats.replays += 1;
        let result = driver.replay(candidate).await;

        let teardown_failed = result.teardown_error.is_some();
        if teardown_failed {
            stats.teardown_errors += 1;
        }
        if teardown_failed && self.config.strict_teardown {
            stats.inconclusive_candidates += 1;
            return None;
        }

        match result.outcome {
            ReplayOutcome::Failed(failure) => {
                if let Some(reference) = reference {
                    if !reference.same_assertion(&failure) {
                        stats.different_failures += 1;
                        return None;
                    }
                }
                Some(failure)
            }
            ReplayOutcome::Passed => {
                stats.passed_candidates += 1;
                None
            }
            ReplayOutcome::Invalid { .. } => {
                stats.invalid_candidates += 1;
                None
            }
            ReplayOutcome::Inconclusive { .. } => {
                stats.inconclusive_candidates += 1;
                None
            }
        }
    }
}

impl Default for DeltaDebugMinimizer {
    fn default() -> Self {
        Self::with_defaults()
    }
}
