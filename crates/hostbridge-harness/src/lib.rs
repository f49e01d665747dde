//! Test harness for the lifecycle bridge.
//!
//! Instrumentation shared by the workspace's integration tests: a recording
//! engine sink with overlap detection, and scripted host callback sequences
//! for both single-threaded and multi-threaded host simulations. The same
//! helpers drive unit-style scenarios and the concurrency stress tests, so
//! every test observes the bridge through the real [`EngineSink`] boundary.
//!
//! [`EngineSink`]: hostbridge_dispatch::EngineSink

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod recording;
pub mod script;

pub use recording::{RecordingSink, SinkCall};
pub use script::{canonical_session, drive, drive_concurrently, notification_batches};
