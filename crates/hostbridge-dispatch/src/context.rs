//! Engine runtime context.

use hostbridge_core::Command;

use crate::{error::DeliveryFailure, sink::EngineSink};

/// Explicitly owned handle to the engine runtime.
///
/// Replaces the implicit global runtime handle hosts traditionally reach
/// through: the context is constructed by the embedder, handed to the
/// dispatcher, and owns the sink for the whole bridge lifetime. The engine
/// counts as *reachable* only between the delivery of `Create` and the
/// delivery of `Destroy`; outside that window every command except `Destroy`
/// is refused.
#[derive(Debug)]
pub struct EngineContext<S> {
    sink: Option<S>,
    initialized: bool,
}

impl<S> EngineContext<S> {
    /// Context owning the given sink. The engine is not reachable until
    /// `Create` has been delivered.
    pub fn new(sink: S) -> Self {
        Self { sink: Some(sink), initialized: false }
    }

    /// Context with no sink; every delivery fails until [`attach`] is
    /// called.
    ///
    /// [`attach`]: EngineContext::attach
    #[must_use]
    pub fn detached() -> Self {
        Self { sink: None, initialized: false }
    }

    /// Attach a sink. Any previously attached sink is dropped and the
    /// engine is considered uninitialized until the next `Create`.
    pub fn attach(&mut self, sink: S) {
        self.sink = Some(sink);
        self.initialized = false;
    }

    /// Detach and return the current sink, leaving the context unreachable.
    pub fn detach(&mut self) -> Option<S> {
        self.initialized = false;
        self.sink.take()
    }

    /// `true` between the delivery of `Create` and the delivery of
    /// `Destroy`.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Hand one command to the sink, synchronously.
    ///
    /// Returns once the sink's entry point has returned; that is the
    /// engine's acceptance. `Create` marks the engine initialized;
    /// `Destroy` marks it torn down and is attempted whenever a sink object
    /// exists at all, so engine cleanup stays idempotent even when the
    /// teardown ordering went sideways.
    ///
    /// # Errors
    ///
    /// [`DeliveryFailure`] if no sink is attached, or if the engine is
    /// outside its Create..Destroy window for any command but `Destroy`.
    pub fn deliver<H>(&mut self, command: Command<H>) -> Result<(), DeliveryFailure>
    where
        S: EngineSink<H>,
    {
        let kind = command.kind();
        let Some(sink) = self.sink.as_mut() else {
            return Err(DeliveryFailure::NoSink { command: kind });
        };

        if !self.initialized && !matches!(command, Command::Create(_) | Command::Destroy) {
            return Err(DeliveryFailure::Unreachable { command: kind });
        }

        match command {
            Command::Create(handle) => {
                sink.on_create(handle);
                self.initialized = true;
            },
            Command::Start => sink.on_start(),
            Command::Resume => sink.on_resume(),
            Command::Pause => sink.on_pause(),
            Command::Stop => sink.on_stop(),
            Command::BackPressed => sink.on_back_pressed(),
            Command::ConfigChanged(delta) => sink.on_config_changed(delta),
            Command::LowMemory => sink.on_low_memory(),
            Command::Destroy => {
                sink.on_destroy();
                self.initialized = false;
            },
        }
        Ok(())
    }
}
