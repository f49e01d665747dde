//! Scripted host callback sequences.
//!
//! Replays canned or generated callback sequences into a [`Bridge`], either
//! from a single simulated host thread or from several at once. The
//! concurrent variant models containers that deliver configuration-change
//! notifications on a different thread than pause/resume.

use hostbridge_core::{ConfigDelta, LifecycleEvent};
use hostbridge_dispatch::{Bridge, EngineSink};

/// The canonical full session: create through destroy with one extra
/// pause/resume cycle, exactly as a host delivers it when the user
/// backgrounds and foregrounds the app once before leaving.
pub fn canonical_session<H>(handle: H) -> Vec<LifecycleEvent<H>> {
    vec![
        LifecycleEvent::Create(handle),
        LifecycleEvent::Start,
        LifecycleEvent::Resume,
        LifecycleEvent::Pause,
        LifecycleEvent::Resume,
        LifecycleEvent::Pause,
        LifecycleEvent::Stop,
        LifecycleEvent::Destroy,
    ]
}

/// Replay a callback sequence into the bridge from one host thread.
///
/// Fatal callbacks are absorbed the same way the host-facing capability
/// interface absorbs them; the return value is how many were rejected as
/// protocol violations.
pub fn drive<H, S>(bridge: &Bridge<H, S>, events: Vec<LifecycleEvent<H>>) -> usize
where
    H: Send,
    S: EngineSink<H>,
{
    tracing::debug!(callbacks = events.len(), "driving scripted host sequence");

    let mut violations = 0;
    for event in events {
        if bridge.handle(event).is_err() {
            violations += 1;
        }
    }
    violations
}

/// Replay one callback batch per simulated host thread, concurrently.
///
/// Blocks until every batch has been fully delivered.
pub fn drive_concurrently<H, S>(bridge: &Bridge<H, S>, batches: Vec<Vec<LifecycleEvent<H>>>)
where
    H: Send,
    S: EngineSink<H>,
{
    tracing::debug!(threads = batches.len(), "driving concurrent host batches");

    std::thread::scope(|scope| {
        for batch in batches {
            scope.spawn(move || {
                for event in batch {
                    let _ = bridge.handle(event);
                }
            });
        }
    });
}

/// Batches of pass-through notifications for multi-threaded delivery tests,
/// alternating configuration changes and memory-pressure signals.
pub fn notification_batches<H>(threads: usize, per_thread: usize) -> Vec<Vec<LifecycleEvent<H>>> {
    (0..threads)
        .map(|thread| {
            (0..per_thread)
                .map(|i| {
                    if (thread + i) % 2 == 0 {
                        LifecycleEvent::ConfigChanged(ConfigDelta::new(vec![thread as u8, i as u8]))
                    } else {
                        LifecycleEvent::LowMemory
                    }
                })
                .collect()
        })
        .collect()
}
