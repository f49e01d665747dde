//! Canonical lifecycle states.

use crate::command::CommandKind;

/// Canonical lifecycle state of the hosted application container.
///
/// Exactly one value exists per bridge instance. It is owned by the
/// [`crate::Machine`] and mutated only through validated transitions.
/// [`LifecycleState::Destroyed`] is terminal: once reached, no further
/// transition is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecycleState {
    /// No callback accepted yet; the container has not produced a handle.
    Uninitialized,
    /// `Create` accepted; the engine owns the window/view handle.
    Created,
    /// Visible but not in the foreground.
    Started,
    /// In the foreground and receiving input.
    Resumed,
    /// Lost the foreground; still visible.
    Paused,
    /// No longer visible; restartable via `Start`.
    Stopped,
    /// Terminal. The container is gone.
    Destroyed,
}

impl LifecycleState {
    /// `true` once the machine can never transition again.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        self == Self::Destroyed
    }

    /// Next synthetic step along the canonical forward chain.
    ///
    /// `None` from the endpoints: `Uninitialized` has no handle to
    /// synthesize a `Create` from, and `Destroyed` never moves.
    pub(crate) fn forward_step(self) -> Option<(CommandKind, LifecycleState)> {
        match self {
            Self::Created | Self::Stopped => Some((CommandKind::Start, Self::Started)),
            Self::Started => Some((CommandKind::Resume, Self::Resumed)),
            Self::Resumed => Some((CommandKind::Pause, Self::Paused)),
            Self::Paused => Some((CommandKind::Stop, Self::Stopped)),
            Self::Uninitialized | Self::Destroyed => None,
        }
    }
}
