//! Note sources: where instruction words come from.

use tp_ir::{Address, END_STOP};

/// Supplies the raw instruction word stored at an address.
///
/// Reads must not depend on or change engine state.
pub trait NoteSource {
    /// Initialise the backing storage. Called from `TunePlayer::begin`.
    fn begin(&mut self) {}

    /// Raw word at `address`.
    fn load_word(&self, address: Address) -> u16;
}

impl<S: NoteSource + ?Sized> NoteSource for &mut S {
    fn begin(&mut self) {
        (**self).begin()
    }

    fn load_word(&self, address: Address) -> u16 {
        (**self).load_word(address)
    }
}

/// A tune held in memory: a `&'static [u16]` in flash, an array, or a `Vec<u16>`.
///
/// Reads past the end return an End word, so an unterminated tune stops
/// instead of playing whatever follows it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemorySource<T> {
    words: T,
}

impl<T: AsRef<[u16]>> MemorySource<T> {
    pub const fn new(words: T) -> Self {
        Self { words }
    }

    /// Number of words in the tune.
    pub fn len(&self) -> usize {
        self.words.as_ref().len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.as_ref().is_empty()
    }

    pub fn words(&self) -> &[u16] {
        self.words.as_ref()
    }

    pub fn into_inner(self) -> T {
        self.words
    }
}

impl<T: AsRef<[u16]>> NoteSource for MemorySource<T> {
    fn load_word(&self, address: Address) -> u16 {
        self.words
            .as_ref()
            .get(address as usize)
            .copied()
            .unwrap_or(END_STOP)
    }
}
