//! Core types for tuneplayer.
//!
//! Defines the 16-bit instruction word format, the decoded note
//! descriptors the engine queues, and the tempo and frequency maths
//! shared by the engine and sound drivers.
//!
//! Designed to be `no_std` compatible.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod frequency;
mod instruction;
mod note;
mod pitch;
mod timebase;

pub use frequency::{
    equal_tempered_hz, timer_compare_value, timer_counter_top, tone_frequency, FrequencyModel,
    MAX_OCTAVE,
};
pub use instruction::{
    Address, Effect, Instruction, NoteWord, Pitch, RepeatMode, END_LOOP, END_STOP, MAX_DISTANCE,
    MAX_LENGTH, OP_END, OP_REPEAT, OP_REST, OP_SETTING,
};
pub use note::{NoteDescriptor, NoteKind};
pub use pitch::PitchClass;
pub use timebase::{Timebase, DEFAULT_TEMPO, MAX_TEMPO, TIMEBASE_DIVIDEND};
