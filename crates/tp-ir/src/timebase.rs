//! Tempo-derived timing.
//!
//! The smallest rhythmic unit is 1/24 of a beat. A `Timebase` stores how
//! many microseconds that unit lasts at the current tempo.

use crate::instruction::{Effect, NoteWord};

/// Dividend for bpm → µs-per-unit: 60_000_000 µs / 24 units per beat.
pub const TIMEBASE_DIVIDEND: u32 = 2_500_000;

/// Tempo used until the first Setting instruction (and after every stop).
pub const DEFAULT_TEMPO: u16 = 120;

/// Largest tempo the Setting instruction can encode (10 bits).
pub const MAX_TEMPO: u16 = 0x3FF;

/// Microseconds per 1/24 beat.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timebase(u32);

impl Timebase {
    /// Timebase for `bpm`, or `None` when bpm is zero.
    pub const fn from_bpm(bpm: u16) -> Option<Self> {
        if bpm == 0 {
            None
        } else {
            Some(Self(TIMEBASE_DIVIDEND / bpm as u32))
        }
    }

    /// Timebase at [`DEFAULT_TEMPO`].
    pub const fn default_tempo() -> Self {
        Self(TIMEBASE_DIVIDEND / DEFAULT_TEMPO as u32)
    }

    /// Raw microseconds per unit.
    pub const fn micros_per_unit(self) -> u32 {
        self.0
    }

    /// Total and sounding duration of a note, in microseconds.
    ///
    /// Returns `(on_micros, total_micros)`. `on_micros` is 0 for legato,
    /// meaning the driver should sustain through to the next note.
    pub fn note_durations(self, note: &NoteWord) -> (u32, u32) {
        let length = note.length as u32;
        let units = if note.triplet { length * 2 } else { length * 3 };
        let total = units * self.0;
        let on = match note.effect {
            Effect::Legato => 0,
            Effect::Staccato => total / 2,
            // 7/8 of the time, leaving a short gap before the next note
            Effect::Normal | Effect::Reserved => total * 7 / 8,
        };
        (on, total)
    }
}

impl Default for Timebase {
    fn default() -> Self {
        Self::default_tempo()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instruction::Pitch;
    use crate::PitchClass;

    fn note(length: u8, effect: Effect, triplet: bool) -> NoteWord {
        NoteWord {
            pitch: Pitch::Class(PitchClass::C),
            octave: 4,
            length,
            effect,
            triplet,
        }
    }

    #[test]
    fn default_tempo_timebase() {
        assert_eq!(Timebase::default_tempo().micros_per_unit(), 20_833);
        assert_eq!(Timebase::default(), Timebase::from_bpm(120).unwrap());
    }

    #[test]
    fn zero_bpm_has_no_timebase() {
        assert_eq!(Timebase::from_bpm(0), None);
    }

    #[test]
    fn max_tempo_timebase() {
        assert_eq!(Timebase::from_bpm(MAX_TEMPO).unwrap().micros_per_unit(), 2443);
    }

    #[test]
    fn normal_eighth_at_120() {
        let (on, total) = Timebase::default_tempo().note_durations(&note(8, Effect::Normal, false));
        assert_eq!(total, 24 * 20_833);
        assert_eq!(total, 499_992);
        assert_eq!(on, 499_992 * 7 / 8);
    }

    #[test]
    fn triplet_uses_two_units_per_length() {
        let tb = Timebase::from_bpm(100).unwrap();
        let (_, total) = tb.note_durations(&note(3, Effect::Normal, true));
        assert_eq!(total, 6 * 25_000);
    }

    #[test]
    fn staccato_is_half() {
        let tb = Timebase::from_bpm(100).unwrap();
        let (on, total) = tb.note_durations(&note(4, Effect::Staccato, false));
        assert_eq!(total, 300_000);
        assert_eq!(on, 150_000);
    }

    #[test]
    fn legato_has_no_cutoff() {
        let (on, total) = Timebase::default_tempo().note_durations(&note(4, Effect::Legato, false));
        assert_eq!(on, 0);
        assert!(total > 0);
    }

    #[test]
    fn reserved_effect_plays_like_normal() {
        let tb = Timebase::default_tempo();
        assert_eq!(
            tb.note_durations(&note(5, Effect::Reserved, false)),
            tb.note_durations(&note(5, Effect::Normal, false)),
        );
    }

    #[test]
    fn longest_slowest_note_does_not_overflow() {
        let tb = Timebase::from_bpm(1).unwrap();
        let (on, total) = tb.note_durations(&note(64, Effect::Normal, false));
        assert_eq!(total, 192 * 2_500_000);
        assert_eq!(on, total * 7 / 8);
        assert!(on <= total);
    }
}
