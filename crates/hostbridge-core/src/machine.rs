//! Lifecycle transition engine.
//!
//! Holds the canonical [`LifecycleState`] and enforces legal transitions.
//! Host callbacks are validated one at a time; out-of-order callbacks are
//! coerced forward by synthesizing the minimal missing transitions, because
//! real hosts are observed to skip and double-fire callbacks. This is a
//! tolerance policy, not silent data loss: the normalizer logs every
//! synthesized chain.
//!
//! # State Machine
//!
//! ```text
//! ┌───────────────┐ Create ┌─────────┐ Start ┌─────────┐ Resume ┌─────────┐
//! │ Uninitialized │───────>│ Created │──────>│ Started │───────>│ Resumed │
//! └───────────────┘        └─────────┘       └─────────┘        └─────────┘
//!                                               ↑                 │    ↑
//!                                         Start │           Pause │    │ Resume
//!                                               │                 ↓    │
//!                                          ┌─────────┐  Stop  ┌─────────┐
//!                                          │ Stopped │<───────│ Paused  │
//!                                          └─────────┘        └─────────┘
//!
//!                 Destroy: any non-Destroyed state ──> Destroyed (terminal)
//! ```
//!
//! `BackPressed`, `ConfigChanged`, and `LowMemory` pass through from any
//! state between `Created` and `Stopped` without changing it.

use crate::{
    command::CommandKind,
    error::ProtocolViolation,
    event::EventKind,
    state::LifecycleState,
};

/// Result of validating a single host callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Deliver these commands, in order. The last entry is always the
    /// command for the callback itself; anything before it was synthesized.
    Emit(Vec<CommandKind>),
    /// The callback was absorbed: no command, no state change.
    Discarded(Discard),
}

/// Why a callback produced no command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Discard {
    /// The machine is already in the callback's post-state (host
    /// double-fire).
    Duplicate,
    /// The callback arrived before `Create`; there is no window handle to
    /// synthesize one from.
    BeforeCreate,
    /// The machine is `Destroyed`; further callbacks are teardown noise.
    Terminal,
}

/// Lifecycle transition engine.
///
/// Pure state machine: no I/O, no locks. The caller owns serialization of
/// [`Machine::apply`] calls (the bridge holds one mutex around the
/// normalizer+machine pair).
#[derive(Debug, Clone)]
pub struct Machine {
    state: LifecycleState,
}

impl Default for Machine {
    fn default() -> Self {
        Self::new()
    }
}

impl Machine {
    /// Create a machine in [`LifecycleState::Uninitialized`].
    #[must_use]
    pub fn new() -> Self {
        Self { state: LifecycleState::Uninitialized }
    }

    /// Current canonical state.
    #[must_use]
    pub fn state(&self) -> LifecycleState {
        self.state
    }

    /// Validate one host callback against the current state.
    ///
    /// Returns the ordered command chain to deliver (synthesized
    /// predecessors first, the callback's own command last), or the reason
    /// the callback was discarded.
    ///
    /// # Errors
    ///
    /// [`ProtocolViolation`] if `Create` arrives in any state other than
    /// [`LifecycleState::Uninitialized`]. Container reuse is unsupported;
    /// the bridge instance must be discarded. The state is left untouched.
    pub fn apply(&mut self, event: EventKind) -> Result<Outcome, ProtocolViolation> {
        if event == EventKind::Create {
            if self.state != LifecycleState::Uninitialized {
                return Err(ProtocolViolation { state: self.state });
            }
            self.state = LifecycleState::Created;
            return Ok(Outcome::Emit(vec![CommandKind::Create]));
        }

        if self.state.is_terminal() {
            return Ok(Outcome::Discarded(Discard::Terminal));
        }

        match event {
            EventKind::Destroy => {
                self.state = LifecycleState::Destroyed;
                Ok(Outcome::Emit(vec![CommandKind::Destroy]))
            },
            EventKind::BackPressed | EventKind::ConfigChanged | EventKind::LowMemory => {
                if self.state == LifecycleState::Uninitialized {
                    return Ok(Outcome::Discarded(Discard::BeforeCreate));
                }
                Ok(Outcome::Emit(vec![event.command()]))
            },
            _ => Ok(self.apply_transition(event)),
        }
    }

    /// Apply one of the forward-chain transitions (`Start`, `Resume`,
    /// `Pause`, `Stop`), coercing forward when the precondition is unmet.
    fn apply_transition(&mut self, event: EventKind) -> Outcome {
        if self.state == LifecycleState::Uninitialized {
            return Outcome::Discarded(Discard::BeforeCreate);
        }
        if event.post_state() == Some(self.state) {
            return Outcome::Discarded(Discard::Duplicate);
        }

        let mut chain = Vec::new();
        while !event.valid_from(self.state) {
            // The forward chain visits every transition precondition, so
            // this always terminates within one lap.
            let Some((synthesized, next)) = self.state.forward_step() else {
                break;
            };
            chain.push(synthesized);
            self.state = next;
        }
        debug_assert!(event.valid_from(self.state));

        chain.push(event.command());
        if let Some(next) = event.post_state() {
            self.state = next;
        }
        Outcome::Emit(chain)
    }
}

impl EventKind {
    /// States this event may fire from directly, without synthesis.
    fn valid_from(self, state: LifecycleState) -> bool {
        use LifecycleState as S;
        match self {
            Self::Create => state == S::Uninitialized,
            Self::Start => matches!(state, S::Created | S::Stopped),
            Self::Resume => matches!(state, S::Started | S::Paused),
            Self::Pause => state == S::Resumed,
            Self::Stop => state == S::Paused,
            Self::Destroy => !state.is_terminal(),
            Self::BackPressed | Self::ConfigChanged | Self::LowMemory => {
                !matches!(state, S::Uninitialized | S::Destroyed)
            },
        }
    }

    /// State the machine lands in after this event. `None` for pass-through
    /// notifications, which never change state.
    fn post_state(self) -> Option<LifecycleState> {
        use LifecycleState as S;
        match self {
            Self::Create => Some(S::Created),
            Self::Start => Some(S::Started),
            Self::Resume => Some(S::Resumed),
            Self::Pause => Some(S::Paused),
            Self::Stop => Some(S::Stopped),
            Self::Destroy => Some(S::Destroyed),
            Self::BackPressed | Self::ConfigChanged | Self::LowMemory => None,
        }
    }

    /// The engine-facing command this event maps to.
    fn command(self) -> CommandKind {
        match self {
            Self::Create => CommandKind::Create,
            Self::Start => CommandKind::Start,
            Self::Resume => CommandKind::Resume,
            Self::Pause => CommandKind::Pause,
            Self::Stop => CommandKind::Stop,
            Self::BackPressed => CommandKind::BackPressed,
            Self::ConfigChanged => CommandKind::ConfigChanged,
            Self::LowMemory => CommandKind::LowMemory,
            Self::Destroy => CommandKind::Destroy,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn emit(machine: &mut Machine, event: EventKind) -> Vec<CommandKind> {
        match machine.apply(event).unwrap() {
            Outcome::Emit(chain) => chain,
            Outcome::Discarded(reason) => panic!("expected emission, got {reason:?}"),
        }
    }

    #[test]
    fn full_forward_walk_emits_one_command_per_callback() {
        let mut machine = Machine::new();

        assert_eq!(emit(&mut machine, EventKind::Create), vec![CommandKind::Create]);
        assert_eq!(machine.state(), LifecycleState::Created);

        assert_eq!(emit(&mut machine, EventKind::Start), vec![CommandKind::Start]);
        assert_eq!(emit(&mut machine, EventKind::Resume), vec![CommandKind::Resume]);
        assert_eq!(emit(&mut machine, EventKind::Pause), vec![CommandKind::Pause]);
        assert_eq!(emit(&mut machine, EventKind::Stop), vec![CommandKind::Stop]);
        assert_eq!(machine.state(), LifecycleState::Stopped);

        assert_eq!(emit(&mut machine, EventKind::Destroy), vec![CommandKind::Destroy]);
        assert_eq!(machine.state(), LifecycleState::Destroyed);
    }

    #[test]
    fn pause_resume_cycle_is_one_to_one() {
        let mut machine = Machine::new();
        for event in [EventKind::Create, EventKind::Start, EventKind::Resume] {
            emit(&mut machine, event);
        }

        assert_eq!(emit(&mut machine, EventKind::Pause), vec![CommandKind::Pause]);
        assert_eq!(emit(&mut machine, EventKind::Resume), vec![CommandKind::Resume]);
        assert_eq!(emit(&mut machine, EventKind::Pause), vec![CommandKind::Pause]);
        assert_eq!(machine.state(), LifecycleState::Paused);
    }

    #[test]
    fn resume_skipping_start_synthesizes_start() {
        let mut machine = Machine::new();
        emit(&mut machine, EventKind::Create);

        let chain = emit(&mut machine, EventKind::Resume);
        assert_eq!(chain, vec![CommandKind::Start, CommandKind::Resume]);
        assert_eq!(machine.state(), LifecycleState::Resumed);
    }

    #[test]
    fn stop_skipping_pause_synthesizes_pause() {
        let mut machine = Machine::new();
        for event in [EventKind::Create, EventKind::Start, EventKind::Resume] {
            emit(&mut machine, event);
        }

        let chain = emit(&mut machine, EventKind::Stop);
        assert_eq!(chain, vec![CommandKind::Pause, CommandKind::Stop]);
        assert_eq!(machine.state(), LifecycleState::Stopped);
    }

    #[test]
    fn restart_from_stopped() {
        let mut machine = Machine::new();
        for event in [
            EventKind::Create,
            EventKind::Start,
            EventKind::Resume,
            EventKind::Pause,
            EventKind::Stop,
        ] {
            emit(&mut machine, event);
        }

        assert_eq!(emit(&mut machine, EventKind::Start), vec![CommandKind::Start]);
        assert_eq!(machine.state(), LifecycleState::Started);
    }

    #[test]
    fn double_fire_is_discarded_as_duplicate() {
        let mut machine = Machine::new();
        for event in [
            EventKind::Create,
            EventKind::Start,
            EventKind::Resume,
            EventKind::Pause,
        ] {
            emit(&mut machine, event);
        }

        assert_eq!(
            machine.apply(EventKind::Pause).unwrap(),
            Outcome::Discarded(Discard::Duplicate)
        );
        assert_eq!(machine.state(), LifecycleState::Paused);
    }

    #[test]
    fn notifications_pass_through_without_state_change() {
        let mut machine = Machine::new();
        emit(&mut machine, EventKind::Create);

        assert_eq!(emit(&mut machine, EventKind::BackPressed), vec![CommandKind::BackPressed]);
        assert_eq!(emit(&mut machine, EventKind::ConfigChanged), vec![CommandKind::ConfigChanged]);
        assert_eq!(emit(&mut machine, EventKind::LowMemory), vec![CommandKind::LowMemory]);
        assert_eq!(machine.state(), LifecycleState::Created);
    }

    #[test]
    fn notifications_before_create_are_discarded() {
        let mut machine = Machine::new();

        assert_eq!(
            machine.apply(EventKind::ConfigChanged).unwrap(),
            Outcome::Discarded(Discard::BeforeCreate)
        );
        assert_eq!(machine.state(), LifecycleState::Uninitialized);
    }

    #[test]
    fn transitions_before_create_are_discarded() {
        let mut machine = Machine::new();

        assert_eq!(
            machine.apply(EventKind::Resume).unwrap(),
            Outcome::Discarded(Discard::BeforeCreate)
        );
        assert_eq!(machine.state(), LifecycleState::Uninitialized);
    }

    #[test]
    fn create_twice_is_a_protocol_violation() {
        let mut machine = Machine::new();
        emit(&mut machine, EventKind::Create);

        let violation = machine.apply(EventKind::Create).unwrap_err();
        assert_eq!(violation.state, LifecycleState::Created);
        assert_eq!(machine.state(), LifecycleState::Created);
    }

    #[test]
    fn create_after_destroy_is_a_protocol_violation() {
        let mut machine = Machine::new();
        emit(&mut machine, EventKind::Create);
        emit(&mut machine, EventKind::Destroy);

        let violation = machine.apply(EventKind::Create).unwrap_err();
        assert_eq!(violation.state, LifecycleState::Destroyed);
    }

    #[test]
    fn destroyed_is_terminal() {
        let mut machine = Machine::new();
        emit(&mut machine, EventKind::Create);
        emit(&mut machine, EventKind::Destroy);

        for event in [
            EventKind::Start,
            EventKind::Resume,
            EventKind::Pause,
            EventKind::Stop,
            EventKind::BackPressed,
            EventKind::ConfigChanged,
            EventKind::LowMemory,
            EventKind::Destroy,
        ] {
            assert_eq!(
                machine.apply(event).unwrap(),
                Outcome::Discarded(Discard::Terminal)
            );
            assert_eq!(machine.state(), LifecycleState::Destroyed);
        }
    }

    #[test]
    fn destroy_from_uninitialized_still_emits() {
        let mut machine = Machine::new();

        assert_eq!(emit(&mut machine, EventKind::Destroy), vec![CommandKind::Destroy]);
        assert_eq!(machine.state(), LifecycleState::Destroyed);
    }

    #[test]
    fn start_while_resumed_coerces_around_the_cycle() {
        let mut machine = Machine::new();
        for event in [EventKind::Create, EventKind::Start, EventKind::Resume] {
            emit(&mut machine, event);
        }

        let chain = emit(&mut machine, EventKind::Start);
        assert_eq!(
            chain,
            vec![CommandKind::Pause, CommandKind::Stop, CommandKind::Start]
        );
        assert_eq!(machine.state(), LifecycleState::Started);
    }
}
