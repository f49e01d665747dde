//! Event normalization.
//!
//! The [`Normalizer`] sits between the raw host boundary and the command
//! dispatcher. It validates each callback against the [`Machine`], discards
//! redundant or premature callbacks, and converts everything else into an
//! ordered batch of [`Command`]s: synthesized predecessors first, the
//! callback's own command last.

use crate::{
    command::{Command, CommandKind},
    error::ProtocolViolation,
    event::LifecycleEvent,
    machine::{Discard, Machine, Outcome},
    state::LifecycleState,
};

/// Validates raw host callbacks and converts each into an ordered command
/// batch.
///
/// Pure apart from the [`Machine`] state it owns. The caller serializes
/// access; the bridge holds a single mutex around the normalizer+machine
/// pair and keeps the engine sink call outside it.
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    machine: Machine,
}

impl Normalizer {
    /// Create a normalizer over a fresh machine.
    #[must_use]
    pub fn new() -> Self {
        Self { machine: Machine::new() }
    }

    /// Current canonical state.
    #[must_use]
    pub fn state(&self) -> LifecycleState {
        self.machine.state()
    }

    /// Validate one callback and return the commands to dispatch, in order.
    ///
    /// An empty batch means the callback was absorbed (duplicate, premature,
    /// or post-terminal noise). The machine state advances exactly once per
    /// call, even when several transitions are synthesized; the whole chain
    /// is handed to the dispatcher as one ordered batch.
    ///
    /// # Errors
    ///
    /// [`ProtocolViolation`] on `Create` outside `Uninitialized`; see
    /// [`Machine::apply`].
    pub fn normalize<H>(
        &mut self,
        event: LifecycleEvent<H>,
    ) -> Result<Vec<Command<H>>, ProtocolViolation> {
        let kind = event.kind();
        let from = self.machine.state();

        let chain = match self.machine.apply(kind)? {
            Outcome::Discarded(reason) => {
                match reason {
                    Discard::Duplicate => {
                        tracing::debug!(event = ?kind, state = ?from, "duplicate callback discarded");
                    },
                    Discard::BeforeCreate => {
                        tracing::warn!(event = ?kind, "callback before Create discarded");
                    },
                    Discard::Terminal => {
                        tracing::debug!(event = ?kind, "callback after Destroy discarded");
                    },
                }
                return Ok(Vec::new());
            },
            Outcome::Emit(chain) => chain,
        };

        if chain.len() > 1 {
            tracing::warn!(
                event = ?kind,
                from = ?from,
                synthesized = chain.len() - 1,
                "out-of-order callback, synthesizing missing transitions"
            );
        }

        let mut commands = Vec::with_capacity(chain.len());
        for synthesized in &chain[..chain.len() - 1] {
            // Only the four forward-chain kinds are ever synthesized; none
            // of them carries a payload.
            let command = match synthesized {
                CommandKind::Start => Command::Start,
                CommandKind::Resume => Command::Resume,
                CommandKind::Pause => Command::Pause,
                CommandKind::Stop => Command::Stop,
                _ => continue,
            };
            commands.push(command);
        }
        commands.push(event.into_command());

        Ok(commands)
    }
}
