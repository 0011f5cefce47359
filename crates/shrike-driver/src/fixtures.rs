//! Counter model/SUT pair used by the driver tests.

use async_trait::async_trait;
use shrike_core::{ensure, AssertionError, Command, SutError, SutFactory};
use shrike_generator::{CommandFactory, CommandRegistry};
use std::sync::Arc;

/// Routes engine logs into the test harness output. Safe to call from
/// every test; only the first call installs the subscriber.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CounterState {
    pub value: i64,
}

impl CounterState {
    pub fn zero() -> Self {
        Self { value: 0 }
    }
}

/// A real integer counter, optionally with a planted reset bug.
pub struct Counter {
    value: i64,
    buggy_reset: bool,
}

impl Counter {
    pub fn increment(&mut self) {
        self.value += 1;
    }

    pub fn decrement(&mut self) {
        self.value -= 1;
    }

    pub fn reset(&mut self) {
        // The planted bug: reset leaves the counter at 1.
        self.value = if self.buggy_reset { 1 } else { 0 };
    }

    pub fn value(&self) -> i64 {
        self.value
    }
}

#[derive(Default)]
pub struct CounterFactory {
    pub buggy_reset: bool,
    pub fail_setup: bool,
    pub fail_teardown: bool,
}

#[async_trait]
impl SutFactory for CounterFactory {
    type Sut = Counter;

    async fn setup(&self) -> Result<Counter, SutError> {
        if self.fail_setup {
            return Err(SutError::construction("counter backend unavailable"));
        }
        Ok(Counter {
            value: 0,
            buggy_reset: self.buggy_reset,
        })
    }

    async fn teardown(&self, sut: Counter) -> Result<(), SutError> {
        drop(sut);
        if self.fail_teardown {
            return Err(SutError::teardown("counter backend refused shutdown"));
        }
        Ok(())
    }
}

pub struct Increment;

#[async_trait]
impl Command for Increment {
    type State = CounterState;
    type Sut = Counter;

    fn next_state(&self, state: &CounterState) -> CounterState {
        CounterState {
            value: state.value + 1,
        }
    }

    async fn run(&self, state: &CounterState, sut: &mut Counter) -> Result<(), AssertionError> {
        sut.increment();
        ensure(
            sut.value() == state.value + 1,
            "counter out of step after increment",
        )
    }

    fn describe(&self) -> String {
        "Increment".to_string()
    }
}

pub struct Reset;

#[async_trait]
impl Command for Reset {
    type State = CounterState;
    type Sut = Counter;

    fn next_state(&self, _state: &CounterState) -> CounterState {
        CounterState { value: 0 }
    }

    async fn run(&self, _state: &CounterState, sut: &mut Counter) -> Result<(), AssertionError> {
        sut.reset();
        ensure(sut.value() == 0, "expected counter 0 after reset")
    }

    fn describe(&self) -> String {
        "Reset".to_string()
    }
}

pub struct Decrement;

#[async_trait]
impl Command for Decrement {
    type State = CounterState;
    type Sut = Counter;

    fn next_state(&self, state: &CounterState) -> CounterState {
        CounterState {
            value: state.value - 1,
        }
    }

    async fn run(&self, state: &CounterState, sut: &mut Counter) -> Result<(), AssertionError> {
        sut.decrement();
        ensure(
            sut.value() == state.value - 1,
            "counter out of step after decrement",
        )
    }

    fn is_valid(&self, state: &CounterState) -> bool {
        state.value > 0
    }

    fn describe(&self) -> String {
        "Decrement".to_string()
    }
}

/// A command that is invalid in every reachable state.
pub struct NeverValid;

#[async_trait]
impl Command for NeverValid {
    type State = CounterState;
    type Sut = Counter;

    fn is_valid(&self, _state: &CounterState) -> bool {
        false
    }

    fn describe(&self) -> String {
        "NeverValid".to_string()
    }
}

pub fn counter_registry() -> CommandRegistry<CounterState, Counter> {
    CommandRegistry::new()
        .with_factory(CommandFactory::stateless("increment", |_| {
            Ok(Arc::new(Increment) as shrike_core::DynCommand<_, _>)
        }))
        .with_factory(CommandFactory::stateless("reset", |_| {
            Ok(Arc::new(Reset) as shrike_core::DynCommand<_, _>)
        }))
}
