//! Bounded stack of in-flight repeats.

use arrayvec::ArrayVec;
use tp_ir::Address;

use crate::error::PlayerError;

/// An active bounded repeat.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RepeatFrame {
    /// Address of the repeat instruction
    pub address: Address,
    /// Jumps left before the repeat falls through (0..=2)
    pub remaining: u8,
}

/// Fixed-capacity stack of [`RepeatFrame`]s. Holds at most one frame per address.
#[derive(Clone, Debug, Default)]
pub struct RepeatStack<const N: usize> {
    frames: ArrayVec<RepeatFrame, N>,
}

impl<const N: usize> RepeatStack<N> {
    pub fn new() -> Self {
        Self {
            frames: ArrayVec::new(),
        }
    }

    /// Push a new frame. Fails when the stack is already `N` deep.
    pub fn push(&mut self, frame: RepeatFrame) -> Result<(), PlayerError> {
        self.frames
            .try_push(frame)
            .map_err(|_| PlayerError::RepeatOverflow {
                address: frame.address,
                depth: N,
            })
    }

    pub fn pop(&mut self) -> Option<RepeatFrame> {
        self.frames.pop()
    }

    pub fn peek(&self) -> Option<&RepeatFrame> {
        self.frames.last()
    }

    /// Make the frame for `address` the top of the stack, dropping any
    /// frames above it, and return it. `None` if no frame has that address.
    ///
    /// Frames above an enclosing repeat belong to loops that were left without
    /// falling through, so they can never be resumed.
    pub fn unwind_to(&mut self, address: Address) -> Option<&mut RepeatFrame> {
        let index = self.frames.iter().rposition(|f| f.address == address)?;
        self.frames.truncate(index + 1);
        self.frames.last_mut()
    }

    pub fn contains(&self, address: Address) -> bool {
        self.frames.iter().any(|f| f.address == address)
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub const fn capacity(&self) -> usize {
        N
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn clear(&mut self) {
        self.frames.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(address: Address, remaining: u8) -> RepeatFrame {
        RepeatFrame { address, remaining }
    }

    #[test]
    fn push_pop_is_lifo() {
        let mut stack = RepeatStack::<4>::new();
        stack.push(frame(3, 0)).unwrap();
        stack.push(frame(7, 2)).unwrap();
        assert_eq!(stack.peek(), Some(&frame(7, 2)));
        assert_eq!(stack.pop(), Some(frame(7, 2)));
        assert_eq!(stack.pop(), Some(frame(3, 0)));
        assert_eq!(stack.pop(), None);
    }

    #[test]
    fn overflow_is_reported() {
        let mut stack = RepeatStack::<2>::new();
        stack.push(frame(1, 0)).unwrap();
        stack.push(frame(2, 0)).unwrap();
        assert_eq!(
            stack.push(frame(3, 0)),
            Err(PlayerError::RepeatOverflow { address: 3, depth: 2 })
        );
        assert_eq!(stack.depth(), 2);
        assert_eq!(stack.peek(), Some(&frame(2, 0)));
    }

    #[test]
    fn zero_capacity_stack_rejects_every_push() {
        let mut stack = RepeatStack::<0>::new();
        assert!(stack.push(frame(0, 0)).is_err());
    }

    #[test]
    fn unwind_to_top_keeps_everything() {
        let mut stack = RepeatStack::<4>::new();
        stack.push(frame(1, 1)).unwrap();
        stack.push(frame(5, 2)).unwrap();
        let top = stack.unwind_to(5).unwrap();
        top.remaining -= 1;
        assert_eq!(stack.depth(), 2);
        assert_eq!(stack.peek(), Some(&frame(5, 1)));
    }

    #[test]
    fn unwind_to_deeper_frame_drops_frames_above() {
        let mut stack = RepeatStack::<4>::new();
        stack.push(frame(9, 0)).unwrap();
        stack.push(frame(4, 1)).unwrap();
        stack.push(frame(6, 2)).unwrap();
        assert_eq!(stack.unwind_to(9).copied(), Some(frame(9, 0)));
        assert_eq!(stack.depth(), 1);
    }

    #[test]
    fn unwind_to_unknown_address_leaves_stack() {
        let mut stack = RepeatStack::<4>::new();
        stack.push(frame(2, 0)).unwrap();
        assert!(stack.unwind_to(3).is_none());
        assert_eq!(stack.depth(), 1);
        assert!(stack.contains(2));
        assert!(!stack.contains(3));
    }
}
