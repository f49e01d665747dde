//! Bridge integration tests.
//!
//! Exercises the full pipeline (host callbacks through normalization,
//! synthesis, and serialized delivery) against the recording sink.

use std::time::Duration;

use hostbridge_core::{CommandKind, ConfigDelta, LifecycleEvent, LifecycleState};
use hostbridge_dispatch::{Bridge, EngineContext, HostCallbacks};
use hostbridge_harness::{
    RecordingSink, SinkCall, canonical_session, drive, drive_concurrently, notification_batches,
};

#[test]
fn end_to_end_session_delivers_one_to_one() {
    let sink = RecordingSink::new();
    let bridge = Bridge::with_sink(sink.clone());

    let violations = drive(&bridge, canonical_session(7u32));

    assert_eq!(violations, 0);
    assert_eq!(bridge.state(), LifecycleState::Destroyed);
    assert_eq!(bridge.delivery_failures(), 0);
    assert_eq!(
        sink.kinds(),
        vec![
            CommandKind::Create,
            CommandKind::Start,
            CommandKind::Resume,
            CommandKind::Pause,
            CommandKind::Resume,
            CommandKind::Pause,
            CommandKind::Stop,
            CommandKind::Destroy,
        ]
    );
}

#[test]
fn window_handle_reaches_the_engine_unchanged() {
    let sink = RecordingSink::new();
    let bridge = Bridge::with_sink(sink.clone());

    drive(&bridge, vec![LifecycleEvent::Create(0xCAFE_u32)]);

    assert_eq!(sink.calls().first(), Some(&SinkCall::Create(0xCAFE)));
}

#[test]
fn config_delta_reaches_the_engine_unchanged() {
    let sink = RecordingSink::new();
    let bridge = Bridge::with_sink(sink.clone());
    drive(&bridge, vec![LifecycleEvent::Create(1u32), LifecycleEvent::Start]);

    let delta = ConfigDelta::new(&b"orientation=landscape"[..]);
    drive(&bridge, vec![LifecycleEvent::ConfigChanged(delta.clone())]);

    assert_eq!(sink.calls().last(), Some(&SinkCall::ConfigChanged(delta)));
}

#[test]
fn skipped_start_is_synthesized_in_order() {
    let sink = RecordingSink::new();
    let bridge = Bridge::with_sink(sink.clone());

    drive(&bridge, vec![LifecycleEvent::Create(1u32), LifecycleEvent::Resume]);

    assert_eq!(
        sink.kinds(),
        vec![CommandKind::Create, CommandKind::Start, CommandKind::Resume]
    );
    assert_eq!(bridge.state(), LifecycleState::Resumed);
}

#[test]
fn double_pause_reaches_the_engine_once() {
    let sink = RecordingSink::new();
    let bridge = Bridge::with_sink(sink.clone());

    drive(
        &bridge,
        vec![
            LifecycleEvent::Create(1u32),
            LifecycleEvent::Start,
            LifecycleEvent::Resume,
            LifecycleEvent::Pause,
            LifecycleEvent::Pause,
        ],
    );

    assert_eq!(
        sink.kinds(),
        vec![
            CommandKind::Create,
            CommandKind::Start,
            CommandKind::Resume,
            CommandKind::Pause,
        ]
    );
}

#[test]
fn container_reuse_poisons_the_bridge() {
    let sink = RecordingSink::new();
    let bridge = Bridge::with_sink(sink.clone());
    drive(&bridge, vec![LifecycleEvent::Create(1u32), LifecycleEvent::Start]);

    let violations = drive(&bridge, vec![LifecycleEvent::Create(2u32)]);
    assert_eq!(violations, 1);
    assert!(bridge.is_poisoned());

    // Everything after the violation is discarded without reaching the
    // engine or the state machine.
    drive(&bridge, vec![LifecycleEvent::Resume, LifecycleEvent::Destroy]);
    assert_eq!(bridge.state(), LifecycleState::Started);
    assert_eq!(sink.kinds(), vec![CommandKind::Create, CommandKind::Start]);
}

#[test]
fn unreachable_engine_records_delivery_failures() {
    let bridge: Bridge<u32, RecordingSink<u32>> = Bridge::new(EngineContext::detached());

    drive(&bridge, vec![LifecycleEvent::Create(1u32), LifecycleEvent::Start]);

    // The host's view of the state advances even though the engine missed
    // both notifications.
    assert_eq!(bridge.state(), LifecycleState::Started);
    assert_eq!(bridge.delivery_failures(), 2);
}

#[test]
fn late_attached_engine_misses_the_create_window() {
    let bridge: Bridge<u32, RecordingSink<u32>> = Bridge::new(EngineContext::detached());
    drive(&bridge, vec![LifecycleEvent::Create(1u32)]);

    let sink = RecordingSink::new();
    bridge.attach_engine(sink.clone());
    drive(&bridge, vec![LifecycleEvent::Start]);

    // Start drops: this sink never saw Create. Destroy is still attempted
    // so teardown stays idempotent.
    drive(&bridge, vec![LifecycleEvent::Destroy]);
    assert_eq!(sink.kinds(), vec![CommandKind::Destroy]);
    assert_eq!(bridge.delivery_failures(), 2);
}

#[test]
fn detaching_the_engine_mid_session_drops_commands() {
    let sink = RecordingSink::new();
    let bridge = Bridge::with_sink(sink.clone());
    drive(&bridge, vec![LifecycleEvent::Create(1u32), LifecycleEvent::Start]);

    assert!(bridge.detach_engine().is_some());
    drive(&bridge, vec![LifecycleEvent::Resume]);

    assert_eq!(sink.kinds(), vec![CommandKind::Create, CommandKind::Start]);
    assert_eq!(bridge.delivery_failures(), 1);
}

#[test]
fn concurrent_notifications_are_serialized_and_counted() {
    const THREADS: usize = 4;
    const PER_THREAD: usize = 8;

    let sink = RecordingSink::with_latency(Duration::from_millis(1));
    let bridge = Bridge::with_sink(sink.clone());
    drive(
        &bridge,
        vec![
            LifecycleEvent::Create(1u32),
            LifecycleEvent::Start,
            LifecycleEvent::Resume,
        ],
    );

    drive_concurrently(&bridge, notification_batches(THREADS, PER_THREAD));
    drive(&bridge, vec![LifecycleEvent::Destroy]);

    assert_eq!(sink.overlaps(), 0);
    assert_eq!(bridge.delivery_failures(), 0);
    // Every accepted notification reached the sink exactly once.
    assert_eq!(sink.call_count(), 3 + THREADS * PER_THREAD + 1);
    assert_eq!(sink.kinds().last(), Some(&CommandKind::Destroy));
}

#[test]
fn capability_interface_absorbs_everything() {
    let sink = RecordingSink::new();
    let bridge = Bridge::with_sink(sink.clone());

    bridge.on_create(5u32);
    bridge.on_resume();
    // A second create is fatal internally but must return normally.
    bridge.on_create(6u32);
    bridge.on_low_memory();

    assert!(bridge.is_poisoned());
    assert_eq!(
        sink.kinds(),
        vec![CommandKind::Create, CommandKind::Start, CommandKind::Resume]
    );
}
