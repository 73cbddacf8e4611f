//! Pitch-to-frequency conversion for sound drivers.
//!
//! Octave 0 is C1 (≈32.7 Hz) and octave 7 is C8. All integer models are
//! approximations good enough for a piezo or small speaker.

use crate::pitch::PitchClass;

/// Octave 7 (C8..B8) frequencies in Hz. Lower octaves are derived by shifting.
const TOP_OCTAVE_HZ: [u16; 12] = [
    4186, 4435, 4699, 4978, 5274, 5588, 5920, 6272, 6645, 7040, 7459, 7902,
];

/// Rounded 12-TET frequencies for every octave, C1..B8.
const NOTE_HZ: [[u16; 12]; 8] = [
    [33, 35, 37, 39, 41, 44, 46, 49, 52, 55, 58, 62],
    [65, 69, 73, 78, 82, 87, 93, 98, 104, 110, 117, 123],
    [131, 139, 147, 156, 165, 175, 185, 196, 208, 220, 233, 247],
    [262, 277, 294, 311, 330, 349, 370, 392, 415, 440, 466, 494],
    [523, 554, 587, 622, 659, 698, 740, 784, 831, 880, 932, 988],
    [1047, 1109, 1175, 1245, 1319, 1397, 1480, 1568, 1661, 1760, 1865, 1976],
    [2093, 2217, 2349, 2489, 2637, 2794, 2960, 3136, 3322, 3520, 3729, 3951],
    [4186, 4435, 4699, 4978, 5274, 5588, 5920, 6272, 6645, 7040, 7459, 7902],
];

/// Timer reload values for octave 0 at a 2 MHz timer clock (16 MHz / 8).
const OCTAVE0_COUNTS: [u16; 12] = [
    61155, 57723, 54483, 51425, 48539, 45814, 43243, 40816, 38525, 36363, 34322, 32395,
];

/// Highest octave any model accepts. Larger values are clamped.
pub const MAX_OCTAVE: u8 = 7;

/// How a tone driver turns a pitch into an integer frequency.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FrequencyModel {
    /// Shift the top octave down. One 12-entry table, up to a few Hz of error
    /// in low octaves.
    #[default]
    Shifted,
    /// Look up a full 8-octave table.
    Table,
}

impl FrequencyModel {
    /// Frequency in Hz for `pitch` in `octave`.
    pub fn hz(self, pitch: PitchClass, octave: u8) -> u16 {
        let octave = octave.min(MAX_OCTAVE);
        match self {
            FrequencyModel::Shifted => TOP_OCTAVE_HZ[pitch.index() as usize] >> (MAX_OCTAVE - octave),
            FrequencyModel::Table => NOTE_HZ[octave as usize][pitch.index() as usize],
        }
    }
}

/// Frequency in Hz using the shifted model.
pub fn tone_frequency(pitch: PitchClass, octave: u8) -> u16 {
    FrequencyModel::Shifted.hz(pitch, octave)
}

/// Exact 12-TET frequency (A in octave 3 = 440 Hz).
pub fn equal_tempered_hz(pitch: PitchClass, octave: u8) -> f32 {
    // octave 0 C is MIDI note 24
    let midi = 24 + octave.min(MAX_OCTAVE) as i32 * 12 + pitch.index() as i32;
    440.0 * libm::powf(2.0, (midi - 69) as f32 / 12.0)
}

/// Timer counter top for a fast-PWM output at a 2 MHz timer clock.
pub fn timer_counter_top(pitch: PitchClass, octave: u8) -> u16 {
    OCTAVE0_COUNTS[pitch.index() as usize] >> octave.min(MAX_OCTAVE)
}

/// Compare value for a 50% duty cycle.
pub fn timer_compare_value(counter_top: u16) -> u16 {
    counter_top >> 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a440_in_both_integer_models() {
        assert_eq!(FrequencyModel::Shifted.hz(PitchClass::A, 3), 440);
        assert_eq!(FrequencyModel::Table.hz(PitchClass::A, 3), 440);
    }

    #[test]
    fn shifted_model_halves_per_octave() {
        let high = tone_frequency(PitchClass::C, 7);
        let low = tone_frequency(PitchClass::C, 6);
        assert_eq!(high, 4186);
        assert_eq!(low, 2093);
    }

    #[test]
    fn shifted_model_stays_close_to_table() {
        for octave in 0..=MAX_OCTAVE {
            for pc in PitchClass::ALL {
                let shifted = FrequencyModel::Shifted.hz(pc, octave) as i32;
                let table = FrequencyModel::Table.hz(pc, octave) as i32;
                assert!((shifted - table).abs() <= 2, "{}{}: {} vs {}", pc, octave, shifted, table);
            }
        }
    }

    #[test]
    fn octave_is_clamped() {
        assert_eq!(tone_frequency(PitchClass::B, 9), tone_frequency(PitchClass::B, 7));
        assert_eq!(timer_counter_top(PitchClass::B, 12), timer_counter_top(PitchClass::B, 7));
    }

    #[test]
    fn equal_tempered_reference_pitches() {
        assert!((equal_tempered_hz(PitchClass::A, 3) - 440.0).abs() < 0.01);
        assert!((equal_tempered_hz(PitchClass::C, 0) - 32.703).abs() < 0.01);
        assert!((equal_tempered_hz(PitchClass::A, 4) - 880.0).abs() < 0.05);
    }

    #[test]
    fn counter_top_matches_two_megahertz_timer() {
        let top = timer_counter_top(PitchClass::A, 3) as u32;
        // 2 MHz / 440 Hz ≈ 4545
        assert!((2_000_000 / top).abs_diff(440) <= 1);
        assert_eq!(timer_compare_value(4545), 2272);
    }
}
