//! Serializing command dispatcher.
//!
//! Marshals normalized commands from the producing (host) thread to the
//! engine's execution context. Three guarantees, in the order they matter:
//!
//! 1. Commands reach the sink in exactly the order the normalizer produced
//!    them. The producer enqueues while still holding the state lock, so
//!    queue order *is* transition order even with multiple host threads.
//! 2. A command counts as delivered only when the sink's entry point has
//!    returned.
//! 3. No two commands are ever in flight concurrently: delivery happens
//!    under a sink-scoped mutex, held across the drain loop but never
//!    across the state lock.

use std::{
    collections::VecDeque,
    sync::atomic::{AtomicU64, Ordering},
};

use hostbridge_core::Command;
use parking_lot::Mutex;

use crate::{context::EngineContext, sink::EngineSink};

/// Ordered, serialized, at-most-once command delivery.
///
/// The queue lock is only ever held per-push/per-pop; the context lock is
/// held for the duration of each sink call, which is bounded by the sink's
/// own promptness contract. Lock order is queue-under-context only, so the
/// two cannot deadlock against the bridge's state lock.
#[derive(Debug)]
pub struct Dispatcher<H, S> {
    queue: Mutex<VecDeque<Command<H>>>,
    context: Mutex<EngineContext<S>>,
    failures: AtomicU64,
}

impl<H, S> Dispatcher<H, S>
where
    H: Send,
    S: EngineSink<H>,
{
    /// Dispatcher over the given runtime context.
    pub fn new(context: EngineContext<S>) -> Self {
        Self {
            queue: Mutex::new(VecDeque::new()),
            context: Mutex::new(context),
            failures: AtomicU64::new(0),
        }
    }

    /// Append a normalized batch to the delivery queue.
    ///
    /// The caller must still hold the lock that serialized normalization;
    /// that is what makes queue order equal transition order across
    /// threads.
    pub fn enqueue(&self, batch: Vec<Command<H>>) {
        self.queue.lock().extend(batch);
    }

    /// Deliver queued commands until the queue is empty.
    ///
    /// Blocks only behind an in-flight sink call from another thread; that
    /// thread's drain loop will also pick up anything enqueued meanwhile,
    /// so every queued command is delivered by somebody, exactly once, in
    /// order.
    pub fn drain(&self) {
        let mut context = self.context.lock();
        loop {
            let command = self.queue.lock().pop_front();
            let Some(command) = command else { break };

            if let Err(failure) = context.deliver(command) {
                self.failures.fetch_add(1, Ordering::Relaxed);
                tracing::warn!(%failure, "lifecycle command dropped");
            }
        }
    }

    /// Enqueue and immediately drain. Convenience for single-producer
    /// embeddings.
    pub fn dispatch(&self, batch: Vec<Command<H>>) {
        self.enqueue(batch);
        self.drain();
    }

    /// Number of commands dropped because the engine was unreachable.
    #[must_use]
    pub fn delivery_failures(&self) -> u64 {
        self.failures.load(Ordering::Relaxed)
    }

    /// Attach an engine sink to the runtime context.
    pub fn attach(&self, sink: S) {
        self.context.lock().attach(sink);
    }

    /// Detach and return the engine sink, if any.
    pub fn detach(&self) -> Option<S> {
        self.context.lock().detach()
    }
}
