//! Tone-style sound driver.

use tp_engine::SoundDriver;
use tp_ir::{FrequencyModel, PitchClass};

use crate::traits::ToneOutput;

/// Plays each note as a fixed-frequency tone with a duration, so the output
/// silences itself and the player needs no manual cutoff.
pub struct ToneDriver<O> {
    output: O,
    model: FrequencyModel,
}

impl<O: ToneOutput> ToneDriver<O> {
    pub fn new(output: O) -> Self {
        Self::with_model(output, FrequencyModel::default())
    }

    pub fn with_model(output: O, model: FrequencyModel) -> Self {
        Self { output, model }
    }

    pub fn output(&self) -> &O {
        &self.output
    }
}

impl<O: ToneOutput> SoundDriver for ToneDriver<O> {
    fn play_note(&mut self, pitch: PitchClass, octave: u8, duration_hint: u32) {
        let hz = self.model.hz(pitch, octave);
        // Sub-millisecond hints would round to "forever"
        let ms = match duration_hint {
            0 => 0,
            micros => (micros / 1000).max(1),
        };
        self.output.tone(hz, ms);
    }

    fn stop_sound(&mut self) {
        self.output.no_tone();
    }
}
