//! Host-facing capability trait.

use hostbridge_core::ConfigDelta;

/// The container's notification entry points, as a capability interface.
///
/// Hosts traditionally deliver lifecycle callbacks by subclassing a fixed
/// base class; this trait replaces that hierarchy with an interface the
/// host-side glue forwards into. Every method is fire-and-forget from the
/// host's perspective: no return value, no error, callable from any thread.
/// Implementations must absorb all failures internally, since most hosts
/// kill the process on an unhandled failure inside a lifecycle callback.
pub trait HostCallbacks<H> {
    /// Container created; `handle` is the window/view object, passed
    /// through opaquely.
    fn on_create(&self, handle: H);

    /// Container became visible.
    fn on_start(&self);

    /// Container gained the foreground.
    fn on_resume(&self);

    /// Container lost the foreground.
    fn on_pause(&self);

    /// Container is no longer visible.
    fn on_stop(&self);

    /// System back navigation.
    fn on_back_pressed(&self);

    /// Configuration changed.
    fn on_config_changed(&self, delta: ConfigDelta);

    /// System memory pressure.
    fn on_low_memory(&self);

    /// Container is going away.
    fn on_destroy(&self);
}
