//! Disassembly listings and tune summaries.

use std::fmt;

use tp_ir::{Address, Instruction, Pitch, RepeatMode};

/// One disassembled word.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ListingLine {
    pub address: Address,
    pub word: u16,
    pub instruction: Instruction,
}

impl fmt::Display for ListingLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04x}  {:04x}  {}", self.address, self.word, self.instruction)
    }
}

/// Decode every word in `words`, in address order.
pub fn disassemble(words: &[u16]) -> Vec<ListingLine> {
    words
        .iter()
        .enumerate()
        .map(|(i, &word)| ListingLine {
            address: i as Address,
            word,
            instruction: Instruction::decode(word),
        })
        .collect()
}

/// Static counts over a tune.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TuneSummary {
    pub words: usize,
    pub notes: usize,
    pub rests: usize,
    pub tempo_changes: usize,
    pub repeats: usize,
    /// Repeats that jump forever
    pub endless_repeats: usize,
    /// First End marker, `Some(true)` if it loops
    pub end: Option<bool>,
}

/// Count instruction kinds in `words`.
pub fn summarize(words: &[u16]) -> TuneSummary {
    let mut summary = TuneSummary {
        words: words.len(),
        ..TuneSummary::default()
    };
    for &word in words {
        match Instruction::decode(word) {
            Instruction::Note(n) if n.pitch == Pitch::Rest => summary.rests += 1,
            Instruction::Note(_) => summary.notes += 1,
            Instruction::Repeat { mode, .. } => {
                summary.repeats += 1;
                if mode == RepeatMode::Every {
                    summary.endless_repeats += 1;
                }
            }
            Instruction::Tempo(_) => summary.tempo_changes += 1,
            Instruction::End { looping } => {
                summary.end.get_or_insert(looping);
            }
        }
    }
    summary
}

impl fmt::Display for TuneSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} words: {} notes, {} rests, {} tempo changes, {} repeats",
            self.words, self.notes, self.rests, self.tempo_changes, self.repeats
        )?;
        match self.end {
            Some(true) => write!(f, ", loops"),
            Some(false) => write!(f, ", stops"),
            None => write!(f, ", no end marker"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tp_ir::{Effect, NoteWord, PitchClass, END_LOOP, END_STOP};

    #[test]
    fn listing_line_format() {
        let word = Instruction::Note(
            NoteWord::new(Pitch::Class(PitchClass::E), 4, 3).with_effect(Effect::Staccato),
        )
        .encode();
        let lines = disassemble(&[0, 0, 0, word]);
        assert_eq!(lines[3].to_string(), format!("0003  {:04x}  E4 x3 staccato", word));
    }

    #[test]
    fn listing_covers_every_word() {
        let lines = disassemble(&[END_LOOP, 0xE050]);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].instruction, Instruction::End { looping: true });
        assert_eq!(lines[1].instruction, Instruction::Tempo(80));
        assert_eq!(lines[1].address, 1);
    }

    #[test]
    fn summary_counts() {
        let words = [
            Instruction::tempo(90).encode(),
            Instruction::note(PitchClass::C, 4, 2).encode(),
            Instruction::rest(1).encode(),
            Instruction::repeat(RepeatMode::Twice, 2).encode(),
            Instruction::repeat(RepeatMode::Every, 4).encode(),
            END_STOP,
            END_LOOP,
        ];
        let summary = summarize(&words);
        assert_eq!(
            summary,
            TuneSummary {
                words: 7,
                notes: 1,
                rests: 1,
                tempo_changes: 1,
                repeats: 2,
                endless_repeats: 1,
                end: Some(false),
            }
        );
        assert_eq!(
            summary.to_string(),
            "7 words: 1 notes, 1 rests, 1 tempo changes, 2 repeats, stops"
        );
    }

    #[test]
    fn summary_without_end() {
        assert_eq!(summarize(&[]).end, None);
    }
}
