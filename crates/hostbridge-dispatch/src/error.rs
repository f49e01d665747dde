//! Delivery-layer errors.

use hostbridge_core::CommandKind;
use thiserror::Error;

/// A command could not be handed to the engine sink.
///
/// Recoverable: the lifecycle state already reflects the host's view, so the
/// bridge keeps going even though the engine missed this notification. The
/// dispatcher counts and logs every occurrence.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryFailure {
    /// No engine sink is attached to the runtime context.
    #[error("dropped {command:?}: no engine sink attached")]
    NoSink {
        /// The command that was dropped.
        command: CommandKind,
    },

    /// A sink is attached but the engine is not reachable: it has not seen
    /// `Create` yet, or it has already been torn down by `Destroy`.
    #[error("dropped {command:?}: engine not reachable (uninitialized or torn down)")]
    Unreachable {
        /// The command that was dropped.
        command: CommandKind,
    },
}
