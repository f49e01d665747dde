//! Fuzz target for the lifecycle transition engine
//!
//! Hosts deliver callbacks in orders the OS never promises to keep; the
//! machine must absorb all of them.
//!
//! # Strategy
//!
//! - Arbitrary callback sequences: double-fires, skipped steps, teardown
//!   noise, premature transitions
//!
//! # Invariants
//!
//! - apply never panics
//! - Destroyed is terminal: no emission, no state change afterwards
//! - Every emitted chain ends with the callback's own command
//! - A discarded or rejected callback leaves the state untouched
//! - Replaying an emitted trace through a fresh machine is the identity

#![no_main]

use arbitrary::Arbitrary;
use hostbridge_core::{EventKind, LifecycleState, Machine, Outcome};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Clone, Copy, Arbitrary)]
enum FuzzEvent {
    Create,
    Start,
    Resume,
    Pause,
    Stop,
    BackPressed,
    ConfigChanged,
    LowMemory,
    Destroy,
}

impl From<FuzzEvent> for EventKind {
    fn from(event: FuzzEvent) -> Self {
        match event {
            FuzzEvent::Create => Self::Create,
            FuzzEvent::Start => Self::Start,
            FuzzEvent::Resume => Self::Resume,
            FuzzEvent::Pause => Self::Pause,
            FuzzEvent::Stop => Self::Stop,
            FuzzEvent::BackPressed => Self::BackPressed,
            FuzzEvent::ConfigChanged => Self::ConfigChanged,
            FuzzEvent::LowMemory => Self::LowMemory,
            FuzzEvent::Destroy => Self::Destroy,
        }
    }
}

fuzz_target!(|events: Vec<FuzzEvent>| {
    let mut machine = Machine::new();
    let mut trace = Vec::new();

    for event in events {
        let kind = EventKind::from(event);
        let before = machine.state();

        match machine.apply(kind) {
            Ok(Outcome::Emit(chain)) => {
                let last = *chain.last().expect("emitted chain is never empty");
                assert_eq!(EventKind::from(last), kind);
                trace.extend(chain);
            }
            Ok(Outcome::Discarded(_)) => assert_eq!(machine.state(), before),
            Err(_) => {
                assert_eq!(kind, EventKind::Create);
                assert_eq!(machine.state(), before);
            }
        }

        if before == LifecycleState::Destroyed {
            assert_eq!(machine.state(), LifecycleState::Destroyed);
        }
    }

    let mut replayed = Machine::new();
    for &command in &trace {
        match replayed.apply(EventKind::from(command)) {
            Ok(Outcome::Emit(chain)) => assert_eq!(chain, vec![command]),
            other => panic!("replay of {command:?} was not emitted 1:1: {other:?}"),
        }
    }
    assert_eq!(replayed.state(), machine.state());
});
