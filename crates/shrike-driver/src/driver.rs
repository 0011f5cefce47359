//! The sequence driver.

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use std::fmt::Debug;
use thiserror::Error;

use shrike_core::{
    CommandSequence, DriverConfig, DynCommand, Failure, RunId, RunOutcome, SutError, SutFactory,
};
use shrike_generator::{CommandRegistry, GeneratorError};

use crate::report::RunReport;
use crate::trace::ExecutionTrace;

/// Errors that abort a run without producing an outcome.
///
/// An assertion failure is not among them: divergence between model and
/// SUT is the expected product of a run and is reported through
/// [`RunOutcome::Failed`], not through this type.
#[derive(Debug, Error)]
pub enum DriveError {
    /// No valid command could be generated within the retry budget.
    ///
    /// Distinct from an assertion failure: this signals a defect in the
    /// model or the registered generators, not in the system under test.
    #[error("command generation exhausted at position {position}")]
    GenerationExhausted {
        /// Sequence position at which generation gave up.
        position: usize,
        #[source]
        source: GeneratorError,
    },

    /// The SUT could not be constructed for this run attempt.
    #[error(transparent)]
    Sut(#[from] SutError),
}

/// Drives the model/SUT pair through command sequences.
///
/// Owns the command registry, the SUT factory, the initial model state and
/// the run configuration. Exactly one sequence is driven at a time against
/// exactly one SUT instance; randomness consumption is strictly sequential
/// and replayable from the seed.
pub struct SequenceDriver<S, F>
where
    S: Clone + Debug + Send + Sync + 'static,
    F: SutFactory,
{
    registry: CommandRegistry<S, F::Sut>,
    sut_factory: F,
    initial_state: S,
    config: DriverConfig,
}

impl<S, F> SequenceDriver<S, F>
where
    S: Clone + Debug + Send + Sync + 'static,
    F: SutFactory,
{
    /// Creates a driver over the given registry, SUT factory and initial
    /// model state.
    pub fn new(registry: CommandRegistry<S, F::Sut>, sut_factory: F, initial_state: S) -> Self {
        Self {
            registry,
            sut_factory,
            initial_state,
            config: DriverConfig::default(),
        }
    }

    /// Replaces the run configuration.
    pub fn with_config(mut self, config: DriverConfig) -> Self {
        self.config = config;
        self
    }

    /// Returns the run configuration.
    pub fn config(&self) -> &DriverConfig {
        &self.config
    }

    /// Returns the initial model state.
    pub fn initial_state(&self) -> &S {
        &self.initial_state
    }

    /// Returns the SUT factory.
    pub fn sut_factory(&self) -> &F {
        &self.sut_factory
    }

    /// Drives one freshly generated sequence from the given seed.
    ///
    /// Acquires a SUT, runs the generate/validate/apply/execute loop until
    /// the configured length or a divergence, and releases the SUT on
    /// every exit path. A teardown error is recorded on the report rather
    /// than masking a captured outcome.
    pub async fn run(&self, seed: u64) -> Result<RunReport<S, F::Sut>, DriveError> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut sut = self.sut_factory.setup().await?;

        let driven = self.drive(&mut sut, &mut rng).await;

        let teardown_error = self.sut_factory.teardown(sut).await.err();
        if let Some(ref err) = teardown_error {
            tracing::warn!(error = %err, seed, "sut teardown failed after run");
        }

        let (outcome, sequence, trace) = driven?;
        tracing::info!(seed, %outcome, length = sequence.len(), "run finished");

        Ok(RunReport {
            id: RunId::new(),
            seed,
            outcome,
            sequence,
            trace,
            teardown_error: teardown_error.map(|err| err.to_string()),
        })
    }

    /// The main loop: steps 2a-2e of the driving algorithm.
    async fn drive(
        &self,
        sut: &mut F::Sut,
        rng: &mut ChaCha8Rng,
    ) -> Result<(RunOutcome, CommandSequence<S, F::Sut>, ExecutionTrace<S>), DriveError> {
        let mut state = self.initial_state.clone();
        let mut sequence = CommandSequence::new();
        let mut trace = ExecutionTrace::new();

        while sequence.len() < self.config.max_length {
            let position = sequence.len();
            let command = self
                .next_valid_command(&state, rng)
                .map_err(|source| DriveError::GenerationExhausted { position, source })?;

            let next = command.next_state(&state);
            tracing::trace!(position, command = %command.describe(), "executing command");

            if let Err(assertion) = command.run(&state, sut).await {
                let failure = Failure::new(
                    position,
                    format!("{state:?}"),
                    command.describe(),
                    assertion,
                );
                tracing::debug!(%failure, "assertion failure");
                trace.record(state, command.describe(), next);
                sequence.push(command);
                return Ok((RunOutcome::Failed(failure), sequence, trace));
            }

            trace.record(state, command.describe(), next.clone());
            state = next;
            sequence.push(command);
        }

        let length = sequence.len();
        Ok((RunOutcome::Completed { length }, sequence, trace))
    }

    /// Generates a command that is valid for the given state.
    ///
    /// The registry retries construction discards internally; this loop
    /// additionally retries commands whose validity predicate rejects the
    /// state, under the same bounded budget.
    fn next_valid_command(
        &self,
        state: &S,
        rng: &mut ChaCha8Rng,
    ) -> Result<DynCommand<S, F::Sut>, GeneratorError> {
        let retries = self.config.max_generation_retries;
        for _ in 0..retries {
            let command = self.registry.any_command(
                state,
                rng,
                self.config.selection_weighting,
                retries,
            )?;
            if command.is_valid(state) {
                return Ok(command);
            }
            tracing::trace!(command = %command.describe(), "precondition rejected");
        }
        Err(GeneratorError::Exhausted { attempts: retries })
    }
}

impl<S, F> Debug for SequenceDriver<S, F>
where
    S: Clone + Debug + Send + Sync + 'static,
    F: SutFactory,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SequenceDriver")
            .field("registry", &self.registry)
            .field("initial_state", &self.initial_state)
            .field("config", &self.config)
            .finish()
    }
}
