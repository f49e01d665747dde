//! The lifecycle bridge facade.
//!
//! [`Bridge`] is what an embedding hands its host-side glue: it owns the
//! normalizer+machine pair under a single mutex, the dispatcher beside it,
//! and translates the host's unreliable callback stream into the engine's
//! ordered command stream.
//!
//! Locking discipline: normalization and enqueueing happen under the state
//! lock (so command order equals transition order across host threads); the
//! engine sink is only ever called after that lock is released, so slow
//! engine work never blocks another host callback from being normalized.

use std::sync::atomic::{AtomicBool, Ordering};

use hostbridge_core::{
    ConfigDelta, LifecycleEvent, LifecycleState, Normalizer, ProtocolViolation,
};
use parking_lot::Mutex;

use crate::{
    context::EngineContext,
    dispatcher::Dispatcher,
    host::HostCallbacks,
    sink::EngineSink,
};

/// Lifecycle bridge between a host container and the engine runtime.
///
/// Shareable across host threads (`&self` everywhere); supports
/// single-threaded embeddings identically, where the locks are simply never
/// contended.
#[derive(Debug)]
pub struct Bridge<H, S> {
    normalizer: Mutex<Normalizer>,
    dispatcher: Dispatcher<H, S>,
    poisoned: AtomicBool,
}

impl<H, S> Bridge<H, S>
where
    H: Send,
    S: EngineSink<H>,
{
    /// Bridge over the given engine runtime context.
    pub fn new(context: EngineContext<S>) -> Self {
        Self {
            normalizer: Mutex::new(Normalizer::new()),
            dispatcher: Dispatcher::new(context),
            poisoned: AtomicBool::new(false),
        }
    }

    /// Bridge that owns the given sink directly.
    pub fn with_sink(sink: S) -> Self {
        Self::new(EngineContext::new(sink))
    }

    /// Feed one host callback through normalization and delivery.
    ///
    /// Absorbs every host anomaly except the fatal one. After a
    /// [`ProtocolViolation`] the bridge is poisoned: all further callbacks
    /// are discarded, because the state machine can no longer trust the
    /// container's identity.
    ///
    /// # Errors
    ///
    /// [`ProtocolViolation`] when the host re-delivers `Create`; the
    /// container must be restarted.
    pub fn handle(&self, event: LifecycleEvent<H>) -> Result<(), ProtocolViolation> {
        if self.poisoned.load(Ordering::Acquire) {
            tracing::debug!(event = ?event.kind(), "bridge poisoned, callback discarded");
            return Ok(());
        }

        {
            let mut normalizer = self.normalizer.lock();
            match normalizer.normalize(event) {
                Ok(batch) => {
                    if !batch.is_empty() {
                        // Enqueue under the state lock: queue order must
                        // equal transition order.
                        self.dispatcher.enqueue(batch);
                    }
                },
                Err(violation) => {
                    self.poisoned.store(true, Ordering::Release);
                    return Err(violation);
                },
            }
        }

        self.dispatcher.drain();
        Ok(())
    }

    /// Current canonical lifecycle state.
    pub fn state(&self) -> LifecycleState {
        self.normalizer.lock().state()
    }

    /// `true` after a [`ProtocolViolation`] has disabled the bridge.
    pub fn is_poisoned(&self) -> bool {
        self.poisoned.load(Ordering::Acquire)
    }

    /// Number of commands dropped because the engine was unreachable.
    pub fn delivery_failures(&self) -> u64 {
        self.dispatcher.delivery_failures()
    }

    /// Attach an engine sink to the runtime context.
    pub fn attach_engine(&self, sink: S) {
        self.dispatcher.attach(sink);
    }

    /// Detach and return the engine sink, if any.
    pub fn detach_engine(&self) -> Option<S> {
        self.dispatcher.detach()
    }

    fn absorb(&self, result: Result<(), ProtocolViolation>) {
        if let Err(violation) = result {
            tracing::error!(%violation, "fatal lifecycle protocol violation, bridge disabled");
        }
    }
}

/// The bridge *is* the adapter: host glue forwards each container callback
/// to the matching method, and the bridge guarantees nothing ever
/// propagates back out.
impl<H, S> HostCallbacks<H> for Bridge<H, S>
where
    H: Send,
    S: EngineSink<H>,
{
    fn on_create(&self, handle: H) {
        self.absorb(self.handle(LifecycleEvent::Create(handle)));
    }

    fn on_start(&self) {
        self.absorb(self.handle(LifecycleEvent::Start));
    }

    fn on_resume(&self) {
        self.absorb(self.handle(LifecycleEvent::Resume));
    }

    fn on_pause(&self) {
        self.absorb(self.handle(LifecycleEvent::Pause));
    }

    fn on_stop(&self) {
        self.absorb(self.handle(LifecycleEvent::Stop));
    }

    fn on_back_pressed(&self) {
        self.absorb(self.handle(LifecycleEvent::BackPressed));
    }

    fn on_config_changed(&self, delta: ConfigDelta) {
        self.absorb(self.handle(LifecycleEvent::ConfigChanged(delta)));
    }

    fn on_low_memory(&self) {
        self.absorb(self.handle(LifecycleEvent::LowMemory));
    }

    fn on_destroy(&self) {
        self.absorb(self.handle(LifecycleEvent::Destroy));
    }
}
