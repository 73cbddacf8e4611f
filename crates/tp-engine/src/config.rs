//! Player configuration.

use tp_ir::{Timebase, DEFAULT_TEMPO, MAX_TEMPO};

use crate::error::PlayerError;

/// Default number of notes decoded ahead of playback.
pub const DEFAULT_QUEUE_CAPACITY: usize = 4;

/// Default maximum nesting of bounded repeats.
pub const DEFAULT_REPEAT_DEPTH: usize = 4;

/// Default number of instructions one `spool()` call may decode.
pub const DEFAULT_SPOOL_BUDGET: u16 = 32;

/// Constructor-time options for a [`TunePlayer`](crate::TunePlayer).
///
/// Queue capacity and repeat depth are const generics on the player itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlayerConfig {
    /// Tempo at start and after every stop, 1..=1023 bpm
    pub default_tempo: u16,
    /// Stop each note after its sounding time, for drivers that cannot
    /// time a note themselves
    pub manual_cutoff: bool,
    /// Invoke the stop callback on pause, stop and tune end
    pub callbacks: bool,
    /// Upper bound on instructions decoded per `spool()` call
    pub spool_budget: u16,
}

impl PlayerConfig {
    pub const fn new() -> Self {
        Self {
            default_tempo: DEFAULT_TEMPO,
            manual_cutoff: false,
            callbacks: true,
            spool_budget: DEFAULT_SPOOL_BUDGET,
        }
    }

    pub const fn with_default_tempo(mut self, bpm: u16) -> Self {
        self.default_tempo = bpm;
        self
    }

    pub const fn with_manual_cutoff(mut self, enabled: bool) -> Self {
        self.manual_cutoff = enabled;
        self
    }

    pub const fn with_callbacks(mut self, enabled: bool) -> Self {
        self.callbacks = enabled;
        self
    }

    pub const fn with_spool_budget(mut self, budget: u16) -> Self {
        self.spool_budget = budget;
        self
    }

    /// Check option ranges.
    pub fn validate(&self) -> Result<(), PlayerError> {
        if self.default_tempo == 0 || self.default_tempo > MAX_TEMPO {
            return Err(PlayerError::InvalidTempo(self.default_tempo));
        }
        if self.spool_budget == 0 {
            return Err(PlayerError::ZeroSpoolBudget);
        }
        Ok(())
    }

    /// Timebase at the default tempo. Falls back to 120 bpm if the
    /// configured tempo is invalid.
    pub fn default_timebase(&self) -> Timebase {
        Timebase::from_bpm(self.default_tempo).unwrap_or_default()
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self::new()
    }
}
