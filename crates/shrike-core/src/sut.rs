//! Scoped acquisition and release of the system under test.
//!
//! The SUT is a mutable, single-instance resource owned by the driver for
//! the duration of exactly one run attempt. Shrinking replays candidate
//! sequences hundreds of times, each against a fresh instance, so the
//! factory is invoked symmetrically on every exit path to avoid leaking
//! resources across attempts.

use async_trait::async_trait;

use crate::error::SutError;

/// Constructs and destroys instances of the system under test.
///
/// One instance is set up at the start of a run or shrink-replay attempt
/// and torn down at its end, including on failure paths.
///
/// # Example
///
/// ```
/// use shrike_core::sut::SutFactory;
/// use shrike_core::error::SutError;
/// use async_trait::async_trait;
///
/// struct CounterFactory;
///
/// #[async_trait]
/// impl SutFactory for CounterFactory {
///     type Sut = u64;
///
///     async fn setup(&self) -> Result<u64, SutError> {
///         Ok(0)
///     }
/// }
/// ```
#[async_trait]
pub trait SutFactory: Send + Sync {
    /// The system under test produced by this factory.
    type Sut: Send + 'static;

    /// Constructs a fresh SUT instance for one run attempt.
    async fn setup(&self) -> Result<Self::Sut, SutError>;

    /// Releases a SUT instance at the end of its run attempt.
    ///
    /// The default implementation drops the instance.
    async fn teardown(&self, sut: Self::Sut) -> Result<(), SutError> {
        drop(sut);
        Ok(())
    }
}
