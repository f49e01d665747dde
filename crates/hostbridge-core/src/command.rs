//! Engine-facing commands.
//!
//! A [`Command`] is the normalized instruction handed to the engine command
//! sink. It carries no host-specific types beyond the opaque handle `H`,
//! which the bridge forwards without inspecting.

use crate::event::ConfigDelta;

/// Normalized engine-facing instruction derived from a host callback.
///
/// One command maps 1:1 to a validated state transition, or to a pass-through
/// notification (`BackPressed`, `ConfigChanged`, `LowMemory`) that leaves
/// [`crate::LifecycleState`] unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command<H> {
    /// Initialize the engine against the given window/view handle.
    Create(H),
    /// The container became visible.
    Start,
    /// The container gained the foreground.
    Resume,
    /// The container lost the foreground.
    Pause,
    /// The container is no longer visible.
    Stop,
    /// System back navigation.
    BackPressed,
    /// Configuration changed; the delta is forwarded unchanged.
    ConfigChanged(ConfigDelta),
    /// System memory pressure.
    LowMemory,
    /// The container is going away; release everything.
    Destroy,
}

impl<H> Command<H> {
    /// Payload-free discriminant of this command.
    #[must_use]
    pub fn kind(&self) -> CommandKind {
        match self {
            Self::Create(_) => CommandKind::Create,
            Self::Start => CommandKind::Start,
            Self::Resume => CommandKind::Resume,
            Self::Pause => CommandKind::Pause,
            Self::Stop => CommandKind::Stop,
            Self::BackPressed => CommandKind::BackPressed,
            Self::ConfigChanged(_) => CommandKind::ConfigChanged,
            Self::LowMemory => CommandKind::LowMemory,
            Self::Destroy => CommandKind::Destroy,
        }
    }
}

/// Payload-free discriminant of [`Command`].
///
/// Used for transition chains inside the machine, delivery accounting, and
/// logging, so none of those paths need the host handle type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    /// `Command::Create`.
    Create,
    /// `Command::Start`.
    Start,
    /// `Command::Resume`.
    Resume,
    /// `Command::Pause`.
    Pause,
    /// `Command::Stop`.
    Stop,
    /// `Command::BackPressed`.
    BackPressed,
    /// `Command::ConfigChanged`.
    ConfigChanged,
    /// `Command::LowMemory`.
    LowMemory,
    /// `Command::Destroy`.
    Destroy,
}
