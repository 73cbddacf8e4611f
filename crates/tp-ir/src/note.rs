//! Fully-resolved notes, ready for dispatch.

use crate::instruction::{NoteWord, Pitch};
use crate::pitch::PitchClass;
use crate::timebase::Timebase;

/// What a queued note does when dispatched.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NoteKind {
    /// Sound a pitch
    Pitch(PitchClass),
    /// Silence for the note's length
    Rest,
    /// Halt playback
    End,
}

/// A decoded note with its timing resolved against the tempo in effect
/// when it was decoded.
///
/// Invariant: `on_micros <= total_micros`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NoteDescriptor {
    pub kind: NoteKind,
    /// 0..=7
    pub octave: u8,
    /// How long the note sounds. 0 means no explicit cutoff.
    pub on_micros: u32,
    /// Time until the next note starts.
    pub total_micros: u32,
}

impl NoteDescriptor {
    /// Resolve a note word at `timebase`.
    pub fn resolve(word: &NoteWord, timebase: Timebase) -> Self {
        let (on, total) = timebase.note_durations(word);
        match word.pitch {
            Pitch::Class(pc) => Self {
                kind: NoteKind::Pitch(pc),
                octave: word.octave,
                on_micros: on,
                total_micros: total,
            },
            Pitch::Rest => Self {
                kind: NoteKind::Rest,
                octave: word.octave,
                on_micros: 0,
                total_micros: total,
            },
        }
    }

    /// The marker queued by a non-looping End instruction.
    pub const fn end() -> Self {
        Self {
            kind: NoteKind::End,
            octave: 0,
            on_micros: 0,
            total_micros: 0,
        }
    }

    pub const fn is_end(&self) -> bool {
        matches!(self.kind, NoteKind::End)
    }
}
