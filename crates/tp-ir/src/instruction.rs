//! 16-bit instruction words.
//!
//! Layout (bit 15 = MSB):
//!
//! ```text
//! note/rest  oooo OOOL LLLL LEET   o=opcode 0..=12  O=octave  L=length-1  E=effect  T=triplet
//! repeat     1101 MMDD DDDD DDDD   M=mode  D=backward distance
//! setting    1110 xxBB BBBB BBBB   B=tempo in bpm
//! end        1111 xxxx xxxx xxxR   R=loop back to address 0
//! ```

use core::fmt;

use crate::pitch::PitchClass;

/// Address of a word in the instruction stream.
pub type Address = u16;

/// Opcode of a rest.
pub const OP_REST: u8 = 12;
/// Opcode of a backward repeat.
pub const OP_REPEAT: u8 = 13;
/// Opcode of a tempo setting.
pub const OP_SETTING: u8 = 14;
/// Opcode of the end of a tune.
pub const OP_END: u8 = 15;

/// End of tune, stop playback.
pub const END_STOP: u16 = 0xF000;
/// End of tune, restart from address 0.
pub const END_LOOP: u16 = 0xF001;

/// Longest note, in length units.
pub const MAX_LENGTH: u8 = 64;
/// Furthest a repeat can jump back.
pub const MAX_DISTANCE: u16 = 0x3FF;

/// What a note word sounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Pitch {
    Class(PitchClass),
    Rest,
}

/// Articulation of a note.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Effect {
    /// Sounds for 7/8 of its length
    #[default]
    Normal,
    /// Sounds for half of its length
    Staccato,
    /// Sounds through to the next note
    Legato,
    /// Unassigned encoding, played as `Normal`
    Reserved,
}

impl Effect {
    const fn from_bits(bits: u16) -> Self {
        match bits & 0x3 {
            0 => Effect::Normal,
            1 => Effect::Staccato,
            2 => Effect::Legato,
            _ => Effect::Reserved,
        }
    }

    const fn bits(self) -> u16 {
        match self {
            Effect::Normal => 0,
            Effect::Staccato => 1,
            Effect::Legato => 2,
            Effect::Reserved => 3,
        }
    }
}

/// How many extra passes a repeat makes over its body.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RepeatMode {
    Once,
    Twice,
    Thrice,
    /// Jumps back on every encounter. A tune with an `Every` repeat that
    /// no other control flow escapes never finishes.
    Every,
}

impl RepeatMode {
    const fn from_bits(bits: u16) -> Self {
        match bits & 0x3 {
            0 => RepeatMode::Once,
            1 => RepeatMode::Twice,
            2 => RepeatMode::Thrice,
            _ => RepeatMode::Every,
        }
    }

    const fn bits(self) -> u16 {
        match self {
            RepeatMode::Once => 0,
            RepeatMode::Twice => 1,
            RepeatMode::Thrice => 2,
            RepeatMode::Every => 3,
        }
    }

    /// Extra passes for bounded modes, `None` for `Every`.
    pub const fn count(self) -> Option<u8> {
        match self {
            RepeatMode::Once => Some(1),
            RepeatMode::Twice => Some(2),
            RepeatMode::Thrice => Some(3),
            RepeatMode::Every => None,
        }
    }

    /// Frame counter stored on first encounter (passes left after this jump).
    pub const fn initial_remaining(self) -> Option<u8> {
        match self.count() {
            Some(n) => Some(n - 1),
            None => None,
        }
    }

    const fn name(self) -> &'static str {
        match self {
            RepeatMode::Once => "once",
            RepeatMode::Twice => "twice",
            RepeatMode::Thrice => "thrice",
            RepeatMode::Every => "every",
        }
    }
}

/// Fields of a playable note or rest.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NoteWord {
    pub pitch: Pitch,
    /// 0..=7
    pub octave: u8,
    /// 1..=64 units
    pub length: u8,
    pub effect: Effect,
    pub triplet: bool,
}

impl NoteWord {
    /// A normal, non-triplet note.
    pub const fn new(pitch: Pitch, octave: u8, length: u8) -> Self {
        Self {
            pitch,
            octave,
            length,
            effect: Effect::Normal,
            triplet: false,
        }
    }

    pub const fn with_effect(mut self, effect: Effect) -> Self {
        self.effect = effect;
        self
    }

    pub const fn with_triplet(mut self, triplet: bool) -> Self {
        self.triplet = triplet;
        self
    }
}

/// A decoded instruction word.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Instruction {
    Note(NoteWord),
    Repeat { mode: RepeatMode, distance: u16 },
    Tempo(u16),
    End { looping: bool },
}

impl Instruction {
    /// Decode a raw word. Every word decodes to something.
    pub const fn decode(word: u16) -> Self {
        let opcode = (word >> 12) as u8;
        match opcode {
            OP_REPEAT => Instruction::Repeat {
                mode: RepeatMode::from_bits(word >> 10),
                distance: word & MAX_DISTANCE,
            },
            OP_SETTING => Instruction::Tempo(word & 0x3FF),
            OP_END => Instruction::End { looping: word & 0x1 != 0 },
            _ => {
                let pitch = match PitchClass::from_index(opcode) {
                    Some(pc) => Pitch::Class(pc),
                    None => Pitch::Rest,
                };
                Instruction::Note(NoteWord {
                    pitch,
                    octave: ((word >> 9) & 0x7) as u8,
                    length: ((word >> 3) & 0x3F) as u8 + 1,
                    effect: Effect::from_bits(word >> 1),
                    triplet: word & 0x1 != 0,
                })
            }
        }
    }

    /// Encode to a raw word. Out-of-range fields are truncated to their bit width,
    /// lengths are clamped to 1..=64.
    pub const fn encode(&self) -> u16 {
        match *self {
            Instruction::Note(n) => {
                let opcode = match n.pitch {
                    Pitch::Class(pc) => pc.index() as u16,
                    Pitch::Rest => OP_REST as u16,
                };
                let length = match n.length {
                    0 => 1,
                    l if l > MAX_LENGTH => MAX_LENGTH,
                    l => l,
                };
                (opcode << 12)
                    | ((n.octave as u16 & 0x7) << 9)
                    | (((length - 1) as u16 & 0x3F) << 3)
                    | (n.effect.bits() << 1)
                    | n.triplet as u16
            }
            Instruction::Repeat { mode, distance } => {
                ((OP_REPEAT as u16) << 12) | (mode.bits() << 10) | (distance & MAX_DISTANCE)
            }
            Instruction::Tempo(bpm) => ((OP_SETTING as u16) << 12) | (bpm & 0x3FF),
            Instruction::End { looping } => {
                if looping {
                    END_LOOP
                } else {
                    END_STOP
                }
            }
        }
    }

    /// A normal note of `length` units.
    pub const fn note(pitch: PitchClass, octave: u8, length: u8) -> Self {
        Instruction::Note(NoteWord::new(Pitch::Class(pitch), octave, length))
    }

    /// A rest of `length` units.
    pub const fn rest(length: u8) -> Self {
        Instruction::Note(NoteWord::new(Pitch::Rest, 0, length))
    }

    pub const fn repeat(mode: RepeatMode, distance: u16) -> Self {
        Instruction::Repeat { mode, distance }
    }

    pub const fn tempo(bpm: u16) -> Self {
        Instruction::Tempo(bpm)
    }

    pub const fn end(looping: bool) -> Self {
        Instruction::End { looping }
    }
}

impl From<u16> for Instruction {
    fn from(word: u16) -> Self {
        Instruction::decode(word)
    }
}

impl From<Instruction> for u16 {
    fn from(inst: Instruction) -> Self {
        inst.encode()
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instruction::Note(n) => {
                match n.pitch {
                    Pitch::Class(pc) => write!(f, "{}{} x{}", pc, n.octave, n.length)?,
                    Pitch::Rest => write!(f, "rest x{}", n.length)?,
                }
                match n.effect {
                    Effect::Normal => {}
                    Effect::Staccato => f.write_str(" staccato")?,
                    Effect::Legato => f.write_str(" legato")?,
                    Effect::Reserved => f.write_str(" effect3")?,
                }
                if n.triplet {
                    f.write_str(" triplet")?;
                }
                Ok(())
            }
            Instruction::Repeat { mode, distance } => {
                write!(f, "repeat {} -{}", mode.name(), distance)
            }
            Instruction::Tempo(bpm) => write!(f, "tempo {}", bpm),
            Instruction::End { looping: true } => f.write_str("end loop"),
            Instruction::End { looping: false } => f.write_str("end stop"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn decode_note_fields() {
        // E, octave 4, length 3, staccato, no triplet
        let word = (4 << 12) | (4 << 9) | (2 << 3) | (1 << 1);
        match Instruction::decode(word) {
            Instruction::Note(n) => {
                assert_eq!(n.pitch, Pitch::Class(PitchClass::E));
                assert_eq!(n.octave, 4);
                assert_eq!(n.length, 3);
                assert_eq!(n.effect, Effect::Staccato);
                assert!(!n.triplet);
            }
            other => panic!("expected note, got {:?}", other),
        }
    }

    #[test]
    fn opcode_12_is_rest() {
        let inst = Instruction::decode(0xC000);
        assert_eq!(inst, Instruction::rest(1));
    }

    #[test]
    fn decode_repeat() {
        let word = 0xD000 | (1 << 10) | 5;
        assert_eq!(
            Instruction::decode(word),
            Instruction::Repeat { mode: RepeatMode::Twice, distance: 5 }
        );
    }

    #[test]
    fn decode_setting_ignores_upper_bits() {
        assert_eq!(Instruction::decode(0xE000 | 140), Instruction::Tempo(140));
        assert_eq!(Instruction::decode(0xEC00 | 140), Instruction::Tempo(140));
    }

    #[test]
    fn decode_end() {
        assert_eq!(Instruction::decode(END_STOP), Instruction::End { looping: false });
        assert_eq!(Instruction::decode(END_LOOP), Instruction::End { looping: true });
        assert_eq!(Instruction::decode(0xFFFE), Instruction::End { looping: false });
    }

    #[test]
    fn encode_matches_hand_built_words() {
        assert_eq!(Instruction::note(PitchClass::C, 4, 4).encode(), 0x0818);
        assert_eq!(Instruction::repeat(RepeatMode::Thrice, 3).encode(), 0xD803);
        assert_eq!(Instruction::tempo(1023).encode(), 0xE3FF);
        assert_eq!(Instruction::end(true).encode(), END_LOOP);
    }

    #[test]
    fn encode_clamps_length() {
        let zero = Instruction::Note(NoteWord::new(Pitch::Rest, 0, 0)).encode();
        assert_eq!(Instruction::decode(zero), Instruction::rest(1));
        let long = Instruction::Note(NoteWord::new(Pitch::Rest, 0, 200)).encode();
        assert_eq!(Instruction::decode(long), Instruction::rest(64));
    }

    #[test]
    fn repeat_counts() {
        assert_eq!(RepeatMode::Once.initial_remaining(), Some(0));
        assert_eq!(RepeatMode::Thrice.initial_remaining(), Some(2));
        assert_eq!(RepeatMode::Every.initial_remaining(), None);
    }

    #[test]
    fn display() {
        let n = NoteWord::new(Pitch::Class(PitchClass::FSharp), 5, 8)
            .with_effect(Effect::Legato)
            .with_triplet(true);
        assert_eq!(Instruction::Note(n).to_string(), "F#5 x8 legato triplet");
        assert_eq!(Instruction::rest(2).to_string(), "rest x2");
        assert_eq!(Instruction::repeat(RepeatMode::Twice, 3).to_string(), "repeat twice -3");
        assert_eq!(Instruction::tempo(90).to_string(), "tempo 90");
        assert_eq!(Instruction::end(false).to_string(), "end stop");
    }
}
