//! Error types for the lifecycle bridge core.
//!
//! Strongly typed and deliberately small: anomalous callback ordering is a
//! normalization policy, not an error, so the only error here is the one
//! condition the bridge cannot absorb.

use thiserror::Error;

use crate::state::LifecycleState;

/// Fatal bridge error: the host delivered `Create` to an already-initialized
/// machine.
///
/// Container reuse is not supported by this bridge. The instance is unusable
/// afterwards and the container must be restarted. Every other host anomaly
/// is absorbed by the tolerance policy instead of surfacing an error.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("protocol violation: Create received in state {state:?}, container reuse is unsupported")]
pub struct ProtocolViolation {
    /// State the machine was in when the extra `Create` arrived.
    pub state: LifecycleState,
}
