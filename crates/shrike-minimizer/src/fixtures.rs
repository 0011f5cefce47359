//! Model/SUT pairs with planted bugs, used by the minimizer tests.

use async_trait::async_trait;
use shrike_core::{ensure, AssertionError, Command, DynCommand, SutError, SutFactory};
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

/// An integer counter whose reset leaves the value at 1 instead of 0.
pub struct BuggyCounter {
    value: i64,
}

#[derive(Default)]
pub struct CounterFactory {
    pub fail_setup: bool,
    pub fail_teardown: bool,
}

#[async_trait]
impl SutFactory for CounterFactory {
    type Sut = BuggyCounter;

    async fn setup(&self) -> Result<BuggyCounter, SutError> {
        if self.fail_setup {
            return Err(SutError::construction("counter backend unavailable"));
        }
        Ok(BuggyCounter { value: 0 })
    }

    async fn teardown(&self, sut: BuggyCounter) -> Result<(), SutError> {
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
    type Sut = BuggyCounter;

    fn next_state(&self, state: &CounterState) -> CounterState {
        CounterState {
            value: state.value + 1,
        }
    }

    async fn run(&self, state: &CounterState, sut: &mut BuggyCounter) -> Result<(), AssertionError> {
        sut.value += 1;
        ensure(
            sut.value == state.value + 1,
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
    type Sut = BuggyCounter;

    fn next_state(&self, _state: &CounterState) -> CounterState {
        CounterState { value: 0 }
    }

    async fn run(&self, _state: &CounterState, sut: &mut BuggyCounter) -> Result<(), AssertionError> {
        // The planted bug.
        sut.value = 1;
        ensure(sut.value == 0, "expected counter 0 after reset")
    }

    fn describe(&self) -> String {
        "Reset".to_string()
    }
}

pub fn counter_sequence(increments: usize) -> Vec<DynCommand<CounterState, BuggyCounter>> {
    let mut sequence: Vec<DynCommand<CounterState, BuggyCounter>> = Vec::new();
    for _ in 0..increments {
        sequence.push(Arc::new(Increment));
    }
    sequence.push(Arc::new(Reset));
    sequence
}

pub fn counter_registry() -> shrike_generator::CommandRegistry<CounterState, BuggyCounter> {
    use shrike_generator::{CommandFactory, CommandRegistry};

    CommandRegistry::new()
        .with_factory(CommandFactory::stateless("increment", |_| {
            Ok(Arc::new(Increment) as DynCommand<_, _>)
        }))
        .with_factory(CommandFactory::stateless("reset", |_| {
            Ok(Arc::new(Reset) as DynCommand<_, _>)
        }))
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegisterState {
    pub value: i64,
}

/// A register that corrupts every write above 7.
pub struct Register {
    stored: i64,
}

pub struct RegisterFactory;

#[async_trait]
impl SutFactory for RegisterFactory {
    type Sut = Register;

    async fn setup(&self) -> Result<Register, SutError> {
        Ok(Register { stored: 0 })
    }
}

pub struct SetRegister {
    pub value: i64,
}

#[async_trait]
impl Command for SetRegister {
    type State = RegisterState;
    type Sut = Register;

    fn next_state(&self, _state: &RegisterState) -> RegisterState {
        RegisterState { value: self.value }
    }

    async fn run(&self, _state: &RegisterState, sut: &mut Register) -> Result<(), AssertionError> {
        sut.stored = if self.value > 7 {
            self.value + 1
        } else {
            self.value
        };
        if sut.stored != self.value {
            let message = if self.value % 2 == 0 {
                "register corrupted an even write"
            } else {
                "register corrupted an odd write"
            };
            return Err(AssertionError::new(message)
                .with_expected(self.value.to_string())
                .with_observed(sut.stored.to_string()));
        }
        Ok(())
    }

    fn describe(&self) -> String {
        format!("Set({})", self.value)
    }

    fn shrink(&self) -> shrike_core::CommandShrinks<RegisterState, Register> {
        use shrike_generator::{IntRange, ValueGen};

        let candidates = IntRange::new(0, 100).shrinks(&self.value);
        Box::new(candidates.map(|value| Arc::new(SetRegister { value }) as DynCommand<_, _>))
    }
}
