//! Recording engine sink.

use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, AtomicU64, Ordering},
    },
    time::Duration,
};

use hostbridge_core::{CommandKind, ConfigDelta};
use hostbridge_dispatch::EngineSink;
use parking_lot::Mutex;

/// A single engine entry point invocation observed by [`RecordingSink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkCall<H> {
    /// `on_create` with the forwarded window handle.
    Create(H),
    /// `on_start`.
    Start,
    /// `on_resume`.
    Resume,
    /// `on_pause`.
    Pause,
    /// `on_stop`.
    Stop,
    /// `on_back_pressed`.
    BackPressed,
    /// `on_config_changed` with the forwarded delta.
    ConfigChanged(ConfigDelta),
    /// `on_low_memory`.
    LowMemory,
    /// `on_destroy`.
    Destroy,
}

impl<H> SinkCall<H> {
    /// Command kind this call corresponds to.
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

struct Shared<H> {
    calls: Mutex<Vec<SinkCall<H>>>,
    in_flight: AtomicBool,
    overlaps: AtomicU64,
}

/// Thread-safe [`EngineSink`] that records every entry point invocation.
///
/// Clones share one trace: hand one clone to the bridge, keep another for
/// assertions. Each invocation checks that no other invocation is currently
/// in flight (the dispatcher's one-command-at-a-time guarantee), and an
/// optional artificial latency holds each call open to widen the race
/// window in concurrency tests.
pub struct RecordingSink<H> {
    shared: Arc<Shared<H>>,
    latency: Option<Duration>,
}

impl<H> Clone for RecordingSink<H> {
    fn clone(&self) -> Self {
        Self { shared: Arc::clone(&self.shared), latency: self.latency }
    }
}

impl<H> Default for RecordingSink<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> RecordingSink<H> {
    /// Sink with an empty trace and no artificial latency.
    #[must_use]
    pub fn new() -> Self {
        Self {
            shared: Arc::new(Shared {
                calls: Mutex::new(Vec::new()),
                in_flight: AtomicBool::new(false),
                overlaps: AtomicU64::new(0),
            }),
            latency: None,
        }
    }

    /// Sink that holds each call open for `latency` before returning.
    #[must_use]
    pub fn with_latency(latency: Duration) -> Self {
        Self { latency: Some(latency), ..Self::new() }
    }

    /// Snapshot of the recorded calls, in delivery order.
    pub fn calls(&self) -> Vec<SinkCall<H>>
    where
        H: Clone,
    {
        self.shared.calls.lock().clone()
    }

    /// Command kinds of the recorded calls, in delivery order.
    pub fn kinds(&self) -> Vec<CommandKind> {
        self.shared.calls.lock().iter().map(SinkCall::kind).collect()
    }

    /// Number of recorded calls.
    pub fn call_count(&self) -> usize {
        self.shared.calls.lock().len()
    }

    /// Invocations that overlapped another invocation. Always zero when
    /// delivery is properly serialized.
    pub fn overlaps(&self) -> u64 {
        self.shared.overlaps.load(Ordering::SeqCst)
    }

    fn record(&self, call: SinkCall<H>) {
        if self.shared.in_flight.swap(true, Ordering::SeqCst) {
            self.shared.overlaps.fetch_add(1, Ordering::SeqCst);
        }
        if let Some(latency) = self.latency {
            std::thread::sleep(latency);
        }
        self.shared.calls.lock().push(call);
        self.shared.in_flight.store(false, Ordering::SeqCst);
    }
}

impl<H: Send> EngineSink<H> for RecordingSink<H> {
    fn on_create(&mut self, handle: H) {
        self.record(SinkCall::Create(handle));
    }

    fn on_start(&mut self) {
        self.record(SinkCall::Start);
    }

    fn on_resume(&mut self) {
        self.record(SinkCall::Resume);
    }

    fn on_pause(&mut self) {
        self.record(SinkCall::Pause);
    }

    fn on_stop(&mut self) {
        self.record(SinkCall::Stop);
    }

    fn on_back_pressed(&mut self) {
        self.record(SinkCall::BackPressed);
    }

    fn on_config_changed(&mut self, delta: ConfigDelta) {
        self.record(SinkCall::ConfigChanged(delta));
    }

    fn on_low_memory(&mut self) {
        self.record(SinkCall::LowMemory);
    }

    fn on_destroy(&mut self) {
        self.record(SinkCall::Destroy);
    }
}
