//! The command generator registry.
//!
//! Holds the closed list of command kinds and builds one instance at a
//! time for the driver: pick a kind (uniformly or by weight), run its
//! constructor against the current model state, and retry on discard with
//! a fresh draw, up to a bounded number of attempts.

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use std::fmt;
use std::fmt::Debug;

use shrike_core::{DynCommand, SelectionWeighting};

use crate::factory::CommandFactory;

/// Errors that can occur during command generation.
#[derive(Debug, Clone, thiserror::Error)]
pub enum GeneratorError {
    /// The retry budget was used up without producing a command.
    ///
    /// Signals a modeling or generator defect (every kind keeps
    /// discarding, or every generated instance is invalid for every
    /// reachable state), not a defect in the system under test.
    #[error("command generation exhausted after {attempts} attempts")]
    Exhausted {
        /// Number of construction attempts made.
        attempts: usize,
    },

    /// No command kinds are registered.
    #[error("no command kinds registered")]
    EmptyRegistry,
}

/// The closed set of command kinds available to the driver.
///
/// # Example
///
/// ```ignore
/// let registry = CommandRegistry::new()
///     .with_factory(CommandFactory::stateless("increment", |_| Ok(Arc::new(Increment))))
///     .with_factory(CommandFactory::from_state("pop", |state, _| {
///         if state.is_empty() {
///             return Err(Discard::because("stack empty"));
///         }
///         Ok(Arc::new(Pop))
///     }).with_weight(2.0));
/// ```
pub struct CommandRegistry<S, T> {
    factories: Vec<CommandFactory<S, T>>,
}

impl<S, T> CommandRegistry<S, T>
where
    S: Clone + Debug + Send + Sync + 'static,
    T: Send + 'static,
{
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            factories: Vec::new(),
        }
    }

    /// Registers a command kind.
    pub fn with_factory(mut self, factory: CommandFactory<S, T>) -> Self {
        self.factories.push(factory);
        self
    }

    /// Registers multiple command kinds.
    pub fn with_factories(
        mut self,
        factories: impl IntoIterator<Item = CommandFactory<S, T>>,
    ) -> Self {
        self.factories.extend(factories);
        self
    }

    /// Returns the number of registered kinds.
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    /// Returns true if no kinds are registered.
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    /// Selects a factory index according to the weighting policy.
    fn select_index(&self, rng: &mut ChaCha8Rng, weighting: SelectionWeighting) -> usize {
        match weighting {
            SelectionWeighting::Uniform => rng.gen_range(0..self.factories.len()),
            SelectionWeighting::Weighted => {
                let total_weight: f64 = self.factories.iter().map(|f| f.weight()).sum();
                if total_weight <= 0.0 {
                    return rng.gen_range(0..self.factories.len());
                }

                let mut roll = rng.gen::<f64>() * total_weight;
                for (i, factory) in self.factories.iter().enumerate() {
                    roll -= factory.weight();
                    if roll <= 0.0 {
                        return i;
                    }
                }
                self.factories.len() - 1
            }
        }
    }

    /// Builds one command instance appropriate for the given state.
    ///
    /// Selects a kind, constructs it (drawing internal values from the
    /// rng), and retries on [`Discard`](crate::Discard) with a different
    /// draw, up to `max_retries` attempts. The returned handle erases the
    /// concrete kind so the driver treats all commands uniformly.
    ///
    /// # Errors
    ///
    /// * `GeneratorError::EmptyRegistry` - no kinds are registered.
    /// * `GeneratorError::Exhausted` - every attempt discarded.
    pub fn any_command(
        &self,
        state: &S,
        rng: &mut ChaCha8Rng,
        weighting: SelectionWeighting,
        max_retries: usize,
    ) -> Result<DynCommand<S, T>, GeneratorError> {
        if self.factories.is_empty() {
            return Err(GeneratorError::EmptyRegistry);
        }

        for _ in 0..max_retries {
            let index = self.select_index(rng, weighting);
            let factory = &self.factories[index];
            match factory.build(state, rng) {
                Ok(command) => return Ok(command),
                Err(discard) => {
                    tracing::trace!(kind = factory.name(), %discard, "command construction discarded");
                }
            }
        }

        Err(GeneratorError::Exhausted {
            attempts: max_retries,
        })
    }
}

impl<S, T> Default for CommandRegistry<S, T>
where
    S: Clone + Debug + Send + Sync + 'static,
    T: Send + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<S, T> fmt::Debug for CommandRegistry<S, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandRegistry")
            .field("kinds", &self.factories.len())
            .finish()
    }
}
