//! Sound driver that records timestamped calls, for offline rendering.

use tp_engine::{Clock, ManualClock, SoundDriver};
use tp_ir::PitchClass;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventKind {
    Play {
        pitch: PitchClass,
        octave: u8,
        duration_hint: u32,
    },
    Stop,
}

/// A driver call and the clock time it happened at.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimedEvent {
    pub at_micros: u32,
    pub kind: EventKind,
}

pub struct RecordingDriver {
    clock: ManualClock,
    events: Vec<TimedEvent>,
}

impl RecordingDriver {
    /// Record against `clock`, normally a clone of the player's clock.
    pub fn new(clock: ManualClock) -> Self {
        Self {
            clock,
            events: Vec::new(),
        }
    }

    pub fn events(&self) -> &[TimedEvent] {
        &self.events
    }

    pub fn into_events(self) -> Vec<TimedEvent> {
        self.events
    }

    fn record(&mut self, kind: EventKind) {
        self.events.push(TimedEvent {
            at_micros: self.clock.now_micros(),
            kind,
        });
    }
}

impl SoundDriver for RecordingDriver {
    fn play_note(&mut self, pitch: PitchClass, octave: u8, duration_hint: u32) {
        self.record(EventKind::Play {
            pitch,
            octave,
            duration_hint,
        });
    }

    fn stop_sound(&mut self) {
        // Consecutive stops carry no information
        if self.events.last().map(|e| e.kind) != Some(EventKind::Stop) {
            self.record(EventKind::Stop);
        }
    }
}
