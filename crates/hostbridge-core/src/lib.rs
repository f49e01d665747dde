//! Lifecycle bridge core.
//!
//! Pure state machine layer for bridging an OS-managed application container
//! to a long-lived native engine runtime. The host pushes lifecycle callbacks
//! on a UI-affine thread, in an order the OS does not guarantee to be strictly
//! sequential or complete; this crate turns that unreliable stream into a
//! canonical command sequence with exactly-once semantics per logical
//! transition.
//!
//! # Components
//!
//! - [`Machine`]: the canonical [`LifecycleState`] plus the transition and
//!   forward-synthesis rules
//! - [`Normalizer`]: validates raw [`LifecycleEvent`]s and emits ordered
//!   [`Command`] batches
//! - [`ProtocolViolation`]: the single fatal condition (container reuse)
//!
//! Cross-thread delivery lives in `hostbridge-dispatch`; this crate performs
//! no I/O and takes no locks, so the same code runs in production and in
//! deterministic tests.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod command;
mod error;
mod event;
mod machine;
mod normalizer;
mod state;

pub use command::{Command, CommandKind};
pub use error::ProtocolViolation;
pub use event::{ConfigDelta, EventKind, LifecycleEvent};
pub use machine::{Discard, Machine, Outcome};
pub use normalizer::Normalizer;
pub use state::LifecycleState;
