//! Instruction decoding.
//!
//! Turns one raw word plus the current cursor into a control-flow effect
//! or a fully-resolved note. Decoding does not touch the queue or the
//! driver; the player applies the result.

use tp_ir::{Address, Instruction, NoteDescriptor, Timebase};

use crate::error::PlayerError;
use crate::repeat_stack::{RepeatFrame, RepeatStack};

/// Read position and the timebase notes are decoded with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cursor {
    pub address: Address,
    pub timebase: Timebase,
}

impl Cursor {
    /// Cursor at address 0.
    pub const fn start(timebase: Timebase) -> Self {
        Self {
            address: 0,
            timebase,
        }
    }

    /// Move to the decoded position and take any tempo change.
    pub fn apply(&mut self, decoded: &Decoded) {
        self.address = decoded.next_address;
        if let Some(timebase) = decoded.tempo {
            self.timebase = timebase;
        }
    }
}

/// Outcome of decoding one instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Decoded {
    /// Where the cursor goes next
    pub next_address: Address,
    /// Note to enqueue, if the instruction produced one
    pub note: Option<NoteDescriptor>,
    /// New timebase, for Setting instructions
    pub tempo: Option<Timebase>,
}

impl Decoded {
    const fn jump(next_address: Address) -> Self {
        Self {
            next_address,
            note: None,
            tempo: None,
        }
    }
}

/// Decode `word`, read from `cursor.address`.
///
/// Bounded repeats push, update or pop frames on `repeats`. If a new frame
/// does not fit, the stack is left unchanged and the error is returned.
pub fn decode_one<const R: usize>(
    word: u16,
    cursor: Cursor,
    repeats: &mut RepeatStack<R>,
) -> Result<Decoded, PlayerError> {
    let here = cursor.address;
    let next = here.wrapping_add(1);

    let decoded = match Instruction::decode(word) {
        Instruction::Note(note) => Decoded {
            next_address: next,
            note: Some(NoteDescriptor::resolve(&note, cursor.timebase)),
            tempo: None,
        },
        Instruction::Repeat { mode, distance } => {
            let target = here.saturating_sub(distance);
            match mode.initial_remaining() {
                None => Decoded::jump(target),
                Some(initial) => Decoded::jump(resolve_repeat(here, target, next, initial, repeats)?),
            }
        }
        Instruction::Tempo(bpm) => match Timebase::from_bpm(bpm) {
            Some(timebase) => Decoded {
                next_address: next,
                note: None,
                tempo: Some(timebase),
            },
            None => {
                log::warn!("Ignoring tempo 0 at address {}", here);
                Decoded::jump(next)
            }
        },
        Instruction::End { looping: true } => Decoded::jump(0),
        // The cursor stays on the End word; the player rewinds on dispatch.
        Instruction::End { looping: false } => Decoded {
            next_address: here,
            note: Some(NoteDescriptor::end()),
            tempo: None,
        },
    };
    Ok(decoded)
}

/// Next address for a bounded repeat at `here`.
fn resolve_repeat<const R: usize>(
    here: Address,
    target: Address,
    next: Address,
    initial: u8,
    repeats: &mut RepeatStack<R>,
) -> Result<Address, PlayerError> {
    match repeats.unwind_to(here) {
        Some(frame) if frame.remaining == 0 => {
            repeats.pop();
            Ok(next)
        }
        Some(frame) => {
            frame.remaining -= 1;
            Ok(target)
        }
        None => {
            repeats.push(RepeatFrame {
                address: here,
                remaining: initial,
            })?;
            Ok(target)
        }
    }
}
