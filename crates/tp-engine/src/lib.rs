//! Playback engine for tuneplayer.
//!
//! Decodes a 16-bit instruction stream ahead of time into a small queue and
//! dispatches notes to a sound driver when they fall due. Single-threaded,
//! non-blocking and fixed-size: the host loop drives everything through
//! [`TunePlayer::update`].

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod clock;
mod config;
mod decoder;
mod driver;
mod error;
mod playback_queue;
mod player;
mod repeat_stack;
mod source;

#[cfg(feature = "std")]
pub use clock::StdClock;
pub use clock::{Clock, ManualClock};
pub use config::{PlayerConfig, DEFAULT_QUEUE_CAPACITY, DEFAULT_REPEAT_DEPTH, DEFAULT_SPOOL_BUDGET};
pub use decoder::{decode_one, Cursor, Decoded};
pub use driver::{SilentDriver, SoundDriver};
pub use error::PlayerError;
pub use playback_queue::PlaybackQueue;
pub use player::{PlaybackState, StopCallback, TunePlayer};
pub use repeat_stack::{RepeatFrame, RepeatStack};
pub use source::{MemorySource, NoteSource};
