//! The consumed value-generator capability.
//!
//! Commands draw their internal random values through this contract while
//! they are being constructed, so that the same values can later be
//! shrunk. General-purpose combinator libraries stay outside the engine;
//! only the capability itself is defined here, along with two small
//! reference instances used by fixtures.

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

/// A replayable source of values of one type.
///
/// `generate` draws a value from the rng (sized by `size`); `shrinks`
/// yields a finite sequence of candidates, each strictly simpler than the
/// given value under an implementation-defined partial order. The engine
/// depends only on this contract.
pub trait ValueGen: Send + Sync {
    /// The type of values produced by this generator.
    type Value;

    /// Draws a value. Consumes rng state sequentially so that replaying
    /// from the same seed reproduces the same draw.
    fn generate(&self, rng: &mut ChaCha8Rng, size: usize) -> Self::Value;

    /// Returns the finite sequence of strictly-simpler candidates for a
    /// previously generated value.
    fn shrinks(&self, value: &Self::Value) -> Box<dyn Iterator<Item = Self::Value> + Send>;
}

/// Closure-backed [`ValueGen`] adapter.
///
/// Shrinks nothing unless a shrink closure is attached:
///
/// ```
/// use shrike_generator::{FnGen, ValueGen};
/// use rand::prelude::*;
/// use rand_chacha::ChaCha8Rng;
///
/// let flag = FnGen::new(|rng: &mut ChaCha8Rng, _size| rng.gen_bool(0.5))
///     .with_shrinks(|value: &bool| if *value { vec![false] } else { vec![] });
///
/// let mut rng = ChaCha8Rng::seed_from_u64(1);
/// let _ = flag.generate(&mut rng, 10);
/// assert_eq!(flag.shrinks(&true).collect::<Vec<_>>(), vec![false]);
/// ```
pub struct FnGen<V> {
    generate: Box<dyn Fn(&mut ChaCha8Rng, usize) -> V + Send + Sync>,
    shrinks: Box<dyn Fn(&V) -> Vec<V> + Send + Sync>,
}

impl<V> FnGen<V> {
    /// Creates a generator from a draw closure, with no shrink candidates.
    pub fn new<F>(generate: F) -> Self
    where
        F: Fn(&mut ChaCha8Rng, usize) -> V + Send + Sync + 'static,
    {
        Self {
            generate: Box::new(generate),
            shrinks: Box::new(|_| Vec::new()),
        }
    }

    /// Attaches a shrink closure. Each returned candidate must be strictly
    /// simpler than its input.
    pub fn with_shrinks<F>(mut self, shrinks: F) -> Self
    where
        F: Fn(&V) -> Vec<V> + Send + Sync + 'static,
    {
        self.shrinks = Box::new(shrinks);
        self
    }
}

impl<V: Send + 'static> ValueGen for FnGen<V> {
    type Value = V;

    fn generate(&self, rng: &mut ChaCha8Rng, size: usize) -> V {
        (self.generate)(rng, size)
    }

    fn shrinks(&self, value: &V) -> Box<dyn Iterator<Item = V> + Send> {
        Box::new((self.shrinks)(value).into_iter())
    }
}

/// Uniform integer range generator, shrinking toward the lower bound.
///
/// Shrink candidates halve the distance to the lower bound, starting from
/// the bound itself, so the minimizer probes large simplifications before
/// small ones.
#[derive(Debug, Clone, Copy)]
pub struct IntRange {
    lo: i64,
    hi: i64,
}

impl IntRange {
    /// Creates a generator for the inclusive range `lo..=hi`.
    pub fn new(lo: i64, hi: i64) -> Self {
        debug_assert!(lo <= hi, "empty range");
        Self { lo, hi }
    }
}

impl ValueGen for IntRange {
    type Value = i64;

    fn generate(&self, rng: &mut ChaCha8Rng, _size: usize) -> i64 {
        rng.gen_range(self.lo..=self.hi)
    }

    fn shrinks(&self, value: &i64) -> Box<dyn Iterator<Item = i64> + Send> {
        let value = *value;
        let mut candidates = Vec::new();
        let mut delta = value.saturating_sub(self.lo);
        while delta > 0 {
            candidates.push(value - delta);
            delta /= 2;
        }
        Box::new(candidates.into_iter())
    }
}
