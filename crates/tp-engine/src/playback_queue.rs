//! Bounded FIFO of decoded notes.

use heapless::Deque;
use tp_ir::NoteDescriptor;

/// Notes decoded ahead of playback, oldest first.
///
/// Capacity is fixed at `N`, so at most `N` notes of lookahead are buffered.
pub struct PlaybackQueue<const N: usize> {
    notes: Deque<NoteDescriptor, N>,
}

impl<const N: usize> PlaybackQueue<N> {
    pub const fn new() -> Self {
        Self {
            notes: Deque::new(),
        }
    }

    /// Append a note, handing it back if the queue is full.
    pub fn push(&mut self, note: NoteDescriptor) -> Result<(), NoteDescriptor> {
        self.notes.push_back(note)
    }

    /// Take the oldest note.
    pub fn pop(&mut self) -> Option<NoteDescriptor> {
        self.notes.pop_front()
    }

    pub fn peek(&self) -> Option<&NoteDescriptor> {
        self.notes.front()
    }

    pub fn iter(&self) -> impl Iterator<Item = &NoteDescriptor> {
        self.notes.iter()
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.notes.is_full()
    }

    pub const fn capacity(&self) -> usize {
        N
    }

    pub fn clear(&mut self) {
        self.notes.clear();
    }
}

impl<const N: usize> Default for PlaybackQueue<N> {
    fn default() -> Self {
        Self::new()
    }
}
