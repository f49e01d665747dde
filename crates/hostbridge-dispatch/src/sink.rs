//! Engine command sink capability trait.

use hostbridge_core::ConfigDelta;

/// The native engine's lifecycle entry points.
///
/// The bridge treats the engine as an opaque target: one entry point per
/// command kind, each expected to return promptly and to be idempotent under
/// at-most-once-per-transition delivery. A call returning *is* the engine's
/// acknowledgement; the dispatcher considers the command delivered at that
/// point and not before.
///
/// The sink is single-threaded-affine: the dispatcher guarantees no two
/// entry points are ever in flight concurrently, so implementations need no
/// internal locking against the bridge.
///
/// Generic over the opaque window/view handle type `H`, which reaches the
/// engine exactly as the host produced it.
pub trait EngineSink<H>: Send {
    /// Initialize against the host's window/view handle.
    fn on_create(&mut self, handle: H);

    /// The container became visible.
    fn on_start(&mut self);

    /// The container gained the foreground.
    fn on_resume(&mut self);

    /// The container lost the foreground.
    fn on_pause(&mut self);

    /// The container is no longer visible.
    fn on_stop(&mut self);

    /// System back navigation.
    fn on_back_pressed(&mut self);

    /// Configuration changed; the delta is the host's payload, unparsed.
    fn on_config_changed(&mut self, delta: ConfigDelta);

    /// System memory pressure.
    fn on_low_memory(&mut self);

    /// The container is going away; release everything. Must tolerate being
    /// called more than once.
    fn on_destroy(&mut self);
}
