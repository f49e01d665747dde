//! Cross-thread delivery layer for the lifecycle bridge.
//!
//! `hostbridge-core` decides *what* the engine must be told;
//! this crate decides *how* it is told: in the exact order produced, one
//! command at a time, never before the previous command was accepted, and
//! never on an engine that is not there to receive it.
//!
//! # Components
//!
//! - [`EngineSink`]: capability trait the engine runtime implements, one
//!   entry point per command kind
//! - [`EngineContext`]: explicitly owned runtime context, sink lifetime
//!   scoped from `Create` to `Destroy`
//! - [`Dispatcher`]: FIFO queue plus a sink-scoped mutex; ordered,
//!   serialized, at-most-once delivery with [`DeliveryFailure`] accounting
//! - [`HostCallbacks`]: capability trait mirroring the container's
//!   notification entry points
//! - [`Bridge`]: the facade hosts talk to; locks the normalizer, keeps the
//!   engine call outside the lock, and never lets an error escape into a
//!   host callback

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod bridge;
mod context;
mod dispatcher;
mod error;
mod host;
mod sink;

pub use bridge::Bridge;
pub use context::EngineContext;
pub use dispatcher::Dispatcher;
pub use error::DeliveryFailure;
pub use host::HostCallbacks;
pub use sink::EngineSink;
