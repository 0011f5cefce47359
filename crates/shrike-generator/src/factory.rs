//! Command kind factories.
//!
//! One factory per registered command kind. The build closure receives the
//! current model state and the run's rng, draws whatever internal values
//! the command needs, and either returns a shared command handle or
//! signals a [`Discard`] when the kind cannot produce a valid instance for
//! this state.

use rand_chacha::ChaCha8Rng;
use std::fmt;
use std::fmt::Debug;

use shrike_core::DynCommand;

/// A command kind rejecting construction for the current state.
///
/// Discarding is not a failure: the registry regenerates with a fresh
/// draw, bounded by the retry budget.
#[derive(Debug, Clone, Default)]
pub struct Discard {
    /// Optional explanation, used in trace logs.
    pub reason: Option<String>,
}

impl Discard {
    /// Creates a discard with no explanation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a discard carrying an explanation.
    pub fn because(reason: impl Into<String>) -> Self {
        Self {
            reason: Some(reason.into()),
        }
    }
}

impl fmt::Display for Discard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.reason {
            Some(ref reason) => write!(f, "discarded: {}", reason),
            None => write!(f, "discarded"),
        }
    }
}

type BuildFn<S, T> =
    Box<dyn Fn(&S, &mut ChaCha8Rng) -> Result<DynCommand<S, T>, Discard> + Send + Sync>;

/// One registered command kind: a named constructor plus a relative
/// selection weight.
///
/// Kinds whose construction depends on the current state use
/// [`from_state`](CommandFactory::from_state); kinds that construct the
/// same way in every state use [`stateless`](CommandFactory::stateless).
pub struct CommandFactory<S, T> {
    name: String,
    weight: f64,
    build: BuildFn<S, T>,
}

impl<S, T> CommandFactory<S, T>
where
    S: Clone + Debug + Send + Sync + 'static,
    T: Send + 'static,
{
    /// Creates a factory whose constructor inspects the current model
    /// state.
    pub fn from_state<F>(name: impl Into<String>, build: F) -> Self
    where
        F: Fn(&S, &mut ChaCha8Rng) -> Result<DynCommand<S, T>, Discard> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            weight: 1.0,
            build: Box::new(build),
        }
    }

    /// Creates a factory whose constructor ignores the current model
    /// state.
    pub fn stateless<F>(name: impl Into<String>, build: F) -> Self
    where
        F: Fn(&mut ChaCha8Rng) -> Result<DynCommand<S, T>, Discard> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            weight: 1.0,
            build: Box::new(move |_state, rng| build(rng)),
        }
    }

    /// Sets the relative selection weight (default 1.0). Only consulted
    /// under weighted selection.
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    /// Returns the kind's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the kind's selection weight.
    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// Constructs an instance for the given state, drawing internal values
    /// from the rng.
    pub fn build(&self, state: &S, rng: &mut ChaCha8Rng) -> Result<DynCommand<S, T>, Discard> {
        (self.build)(state, rng)
    }
}

impl<S, T> fmt::Debug for CommandFactory<S, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandFactory")
            .field("name", &self.name)
            .field("weight", &self.weight)
            .finish()
    }
}
