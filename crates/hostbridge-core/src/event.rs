//! Host-originated lifecycle events.
//!
//! A [`LifecycleEvent`] is the immutable value a host callback produces. It
//! is consumed exactly once by the [`crate::Normalizer`]. The window/view
//! handle type `H` and the [`ConfigDelta`] payload are opaque to the bridge.

use bytes::Bytes;

use crate::command::{Command, CommandKind};

/// Opaque configuration snapshot (orientation, density, locale, …).
///
/// Carried through to the engine unchanged. The bridge observes only its
/// presence, never its contents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigDelta(Bytes);

impl ConfigDelta {
    /// Wrap a host-encoded configuration payload.
    pub fn new(raw: impl Into<Bytes>) -> Self {
        Self(raw.into())
    }

    /// The raw payload, exactly as the host produced it.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

/// A host callback, one variant per container notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LifecycleEvent<H> {
    /// Container created. The only event that carries data: the window/view
    /// handle the engine renders into.
    Create(H),
    /// Container became visible.
    Start,
    /// Container gained the foreground.
    Resume,
    /// Container lost the foreground.
    Pause,
    /// Container is no longer visible.
    Stop,
    /// System back navigation.
    BackPressed,
    /// Configuration changed.
    ConfigChanged(ConfigDelta),
    /// System memory pressure.
    LowMemory,
    /// Container is going away.
    Destroy,
}

impl<H> LifecycleEvent<H> {
    /// Payload-free discriminant of this event.
    ///
    /// The [`crate::Machine`] validates transitions purely on kinds, so it
    /// never touches the handle type.
    #[must_use]
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Create(_) => EventKind::Create,
            Self::Start => EventKind::Start,
            Self::Resume => EventKind::Resume,
            Self::Pause => EventKind::Pause,
            Self::Stop => EventKind::Stop,
            Self::BackPressed => EventKind::BackPressed,
            Self::ConfigChanged(_) => EventKind::ConfigChanged,
            Self::LowMemory => EventKind::LowMemory,
            Self::Destroy => EventKind::Destroy,
        }
    }

    /// The engine-facing command this event maps to, consuming the payload.
    #[must_use]
    pub fn into_command(self) -> Command<H> {
        match self {
            Self::Create(handle) => Command::Create(handle),
            Self::Start => Command::Start,
            Self::Resume => Command::Resume,
            Self::Pause => Command::Pause,
            Self::Stop => Command::Stop,
            Self::BackPressed => Command::BackPressed,
            Self::ConfigChanged(delta) => Command::ConfigChanged(delta),
            Self::LowMemory => Command::LowMemory,
            Self::Destroy => Command::Destroy,
        }
    }
}

/// Payload-free discriminant of [`LifecycleEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// `LifecycleEvent::Create`.
    Create,
    /// `LifecycleEvent::Start`.
    Start,
    /// `LifecycleEvent::Resume`.
    Resume,
    /// `LifecycleEvent::Pause`.
    Pause,
    /// `LifecycleEvent::Stop`.
    Stop,
    /// `LifecycleEvent::BackPressed`.
    BackPressed,
    /// `LifecycleEvent::ConfigChanged`.
    ConfigChanged,
    /// `LifecycleEvent::LowMemory`.
    LowMemory,
    /// `LifecycleEvent::Destroy`.
    Destroy,
}

/// Replay mapping: every command kind names the event kind that produces it.
///
/// Useful for replaying an emitted command trace back through a fresh
/// machine, which must be the identity (the canonicalization is idempotent).
impl From<CommandKind> for EventKind {
    fn from(kind: CommandKind) -> Self {
        match kind {
            CommandKind::Create => Self::Create,
            CommandKind::Start => Self::Start,
            CommandKind::Resume => Self::Resume,
            CommandKind::Pause => Self::Pause,
            CommandKind::Stop => Self::Stop,
            CommandKind::BackPressed => Self::BackPressed,
            CommandKind::ConfigChanged => Self::ConfigChanged,
            CommandKind::LowMemory => Self::LowMemory,
            CommandKind::Destroy => Self::Destroy,
        }
    }
}
