//! Fuzz target for the full bridge pipeline (normalize → enqueue → deliver)
//!
//! # Strategy
//!
//! - Arbitrary callback sequences with arbitrary handle and config payloads
//!   pushed through Bridge::handle into a counting sink
//!
//! # Invariants
//!
//! - The pipeline never panics
//! - The first delivered command is Create or Destroy
//! - Create is delivered at most once, Destroy at most once and always last
//! - Transition commands never repeat back-to-back
//! - The bridge stays poisoned once poisoned

#![no_main]

use std::sync::{Arc, Mutex};

use arbitrary::Arbitrary;
use hostbridge_core::{CommandKind, ConfigDelta, LifecycleEvent};
use hostbridge_dispatch::{Bridge, EngineSink};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Clone, Arbitrary)]
enum FuzzEvent {
    Create(u8),
    Start,
    Resume,
    Pause,
    Stop,
    BackPressed,
    ConfigChanged(Vec<u8>),
    LowMemory,
    Destroy,
}

impl From<FuzzEvent> for LifecycleEvent<u8> {
    fn from(event: FuzzEvent) -> Self {
        match event {
            FuzzEvent::Create(handle) => Self::Create(handle),
            FuzzEvent::Start => Self::Start,
            FuzzEvent::Resume => Self::Resume,
            FuzzEvent::Pause => Self::Pause,
            FuzzEvent::Stop => Self::Stop,
            FuzzEvent::BackPressed => Self::BackPressed,
            FuzzEvent::ConfigChanged(raw) => Self::ConfigChanged(ConfigDelta::new(raw)),
            FuzzEvent::LowMemory => Self::LowMemory,
            FuzzEvent::Destroy => Self::Destroy,
        }
    }
}

#[derive(Clone, Default)]
struct TraceSink {
    kinds: Arc<Mutex<Vec<CommandKind>>>,
}

impl TraceSink {
    fn push(&self, kind: CommandKind) {
        self.kinds.lock().unwrap().push(kind);
    }
}

impl EngineSink<u8> for TraceSink {
    fn on_create(&mut self, _handle: u8) {
        self.push(CommandKind::Create);
    }
    fn on_start(&mut self) {
        self.push(CommandKind::Start);
    }
    fn on_resume(&mut self) {
        self.push(CommandKind::Resume);
    }
    fn on_pause(&mut self) {
        self.push(CommandKind::Pause);
    }
    fn on_stop(&mut self) {
        self.push(CommandKind::Stop);
    }
    fn on_back_pressed(&mut self) {
        self.push(CommandKind::BackPressed);
    }
    fn on_config_changed(&mut self, _delta: ConfigDelta) {
        self.push(CommandKind::ConfigChanged);
    }
    fn on_low_memory(&mut self) {
        self.push(CommandKind::LowMemory);
    }
    fn on_destroy(&mut self) {
        self.push(CommandKind::Destroy);
    }
}

fuzz_target!(|events: Vec<FuzzEvent>| {
    let sink = TraceSink::default();
    let bridge = Bridge::with_sink(sink.clone());
    let mut was_poisoned = false;

    for event in events {
        let _ = bridge.handle(LifecycleEvent::from(event));
        if was_poisoned {
            assert!(bridge.is_poisoned());
        }
        was_poisoned = bridge.is_poisoned();
    }

    let trace = sink.kinds.lock().unwrap().clone();

    if let Some(first) = trace.first() {
        assert!(matches!(first, CommandKind::Create | CommandKind::Destroy));
    }
    assert!(trace.iter().filter(|kind| **kind == CommandKind::Create).count() <= 1);

    let destroys = trace.iter().filter(|kind| **kind == CommandKind::Destroy).count();
    assert!(destroys <= 1);
    if destroys == 1 {
        assert_eq!(trace.last(), Some(&CommandKind::Destroy));
    }

    let is_notification = |kind: &CommandKind| {
        matches!(
            kind,
            CommandKind::BackPressed | CommandKind::ConfigChanged | CommandKind::LowMemory
        )
    };
    let transitions: Vec<&CommandKind> = trace.iter().filter(|kind| !is_notification(kind)).collect();
    for pair in transitions.windows(2) {
        assert_ne!(pair[0], pair[1]);
    }
});
