//! The value shrink dimension.
//!
//! For each position in the current best failing sequence, try the
//! strictly-simpler replacements offered by that command's own `shrink()`
//! sequence. Candidates whose substitution breaks a later precondition are
//! rejected with a model-only trace, before a SUT is constructed; the
//! survivors are replayed in full. An accepted substitution stays at the
//! same position so the simpler command's own shrink candidates are tried
//! next, descending until no replacement reproduces the failure.

use std::fmt::Debug;
use tracing::debug;

use shrike_core::{DynCommand, Failure, SutFactory};
use shrike_driver::{model_trace, SequenceDriver};

use crate::ddmin::DeltaDebugMinimizer;
use crate::error::MinimizerError;
use crate::result::ShrinkStats;

impl DeltaDebugMinimizer {
    /// One full value-shrink sweep over the current best sequence.
    ///
    /// Returns whether any substitution was accepted.
    pub(crate) async fn value_pass<S, F>(
        &self,
        driver: &SequenceDriver<S, F>,
        current: &mut Vec<DynCommand<S, F::Sut>>,
        reference: Option<&Failure>,
        stats: &mut ShrinkStats,
        best_failure: &mut Failure,
        iterations: &mut usize,
    ) -> Result<bool, MinimizerError>
    where
        S: Clone + Debug + Send + Sync + 'static,
        F: SutFactory,
    {
        let mut changed = false;
        let mut position = 0;

        while position < current.len() {
            *iterations += 1;
            if *iterations > self.config.max_iterations {
                return Err(MinimizerError::MaxIterationsReached(
                    self.config.max_iterations,
                ));
            }

            let mut replaced = false;
            for candidate in current[position].shrink() {
                let mut trial = current.clone();
                trial[position] = candidate;

                // Reject without a SUT when the substitution breaks a
                // precondition somewhere in the sequence.
                if model_trace(driver.initial_state(), &trial).is_err() {
                    stats.invalid_candidates += 1;
                    continue;
                }

                if let Some(failure) = self.check(driver, &trial, reference, stats).await {
                    debug!(
                        position,
                        command = %trial[position].describe(),
                        "value shrink accepted"
                    );
                    *current = trial;
                    *best_failure = failure;
                    stats.value_shrinks += 1;
                    replaced = true;
                    changed = true;
                    break;
                }
            }

            if !replaced {
                position += 1;
            }
            // On replacement the position is rescanned: the accepted
            // command offers its own, still-simpler candidates.
        }

        Ok(changed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MinimizerConfig;
    use crate::fixtures::{Register, RegisterFactory, RegisterState, SetRegister};
    use shrike_core::{DriverConfig, DynCommand};
    use shrike_driver::{ReplayOutcome, SequenceDriver};
    use shrike_generator::CommandRegistry;
    use std::sync::Arc;

    fn register_driver(config: DriverConfig) -> SequenceDriver<RegisterState, RegisterFactory> {
        SequenceDriver::new(
            CommandRegistry::new(),
            RegisterFactory,
            RegisterState { value: 0 },
        )
        .with_config(config)
    }

    fn set(value: i64) -> DynCommand<RegisterState, Register> {
        Arc::new(SetRegister { value })
    }

    #[tokio::test]
    async fn test_value_shrink_finds_boundary() {
        // The register corrupts writes above 7; shrinking Set(63) probes
        // halved values down to the smallest that still fails.
        let driver = register_driver(DriverConfig::new());
        let failing = vec![set(63)];

        let minimal = DeltaDebugMinimizer::with_defaults()
            .minimize(&driver, &failing)
            .await
            .unwrap();

        assert_eq!(minimal.descriptions(), vec!["Set(8)"]);
        assert!(minimal.stats.value_shrinks > 0);
    }

    #[tokio::test]
    async fn test_structural_and_value_dimensions_combine() {
        let driver = register_driver(DriverConfig::new());
        let failing = vec![set(3), set(5), set(63)];

        let minimal = DeltaDebugMinimizer::with_defaults()
            .minimize(&driver, &failing)
            .await
            .unwrap();

        assert_eq!(minimal.descriptions(), vec!["Set(8)"]);
        assert!(minimal.stats.structural_removals > 0);
        assert!(minimal.stats.value_shrinks > 0);
    }

    #[tokio::test]
    async fn test_same_failure_constraint_limits_shrinking() {
        // Set(63) fails with the odd-write assertion. All of its halving
        // candidates are even, so requiring the identical assertion pins
        // the sequence at the original value.
        let driver =
            register_driver(DriverConfig::new().with_shrink_require_same_failure(true));
        let failing = vec![set(63)];

        let minimal = DeltaDebugMinimizer::with_defaults()
            .minimize(&driver, &failing)
            .await
            .unwrap();

        assert_eq!(minimal.descriptions(), vec!["Set(63)"]);
        assert_eq!(
            minimal.failure.assertion.message,
            "register corrupted an odd write"
        );
        assert!(minimal.stats.different_failures > 0);
    }

    #[tokio::test]
    async fn test_result_is_a_local_minimum() {
        let driver = register_driver(DriverConfig::new());
        let failing = vec![set(3), set(63)];

        let minimal = DeltaDebugMinimizer::with_defaults()
            .minimize(&driver, &failing)
            .await
            .unwrap();
        assert_eq!(minimal.descriptions(), vec!["Set(8)"]);

        // Removing the only command leaves a passing (empty) sequence.
        let removed = driver.replay(&[]).await;
        assert_eq!(removed.outcome, ReplayOutcome::Passed);

        // Every remaining shrink candidate of Set(8) passes too.
        for candidate in minimal.sequence[0].shrink() {
            let result = driver.replay(&[candidate]).await;
            assert_eq!(result.outcome, ReplayOutcome::Passed);
        }
    }

    #[tokio::test]
    async fn test_report_serializes() {
        let driver = register_driver(DriverConfig::new());
        let failing = vec![set(63)];

        let minimal = DeltaDebugMinimizer::new(MinimizerConfig::new())
            .minimize(&driver, &failing)
            .await
            .unwrap();

        let report = minimal.report();
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("Set(8)"));
        assert!(json.contains("register corrupted an even write"));
    }
}
