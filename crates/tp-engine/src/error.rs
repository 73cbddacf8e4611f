//! Engine error type.

use core::fmt;

use tp_ir::Address;

/// Errors reported by the playback engine.
///
/// All of them are deterministic given the instruction stream and the
/// configuration. Decoding never fails for transient reasons.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayerError {
    /// A bounded repeat at `address` needed a frame but the stack already
    /// holds `depth` frames
    RepeatOverflow { address: Address, depth: usize },
    /// Default tempo outside 1..=1023 bpm
    InvalidTempo(u16),
    /// Spool budget of zero instructions
    ZeroSpoolBudget,
}

impl fmt::Display for PlayerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerError::RepeatOverflow { address, depth } => write!(
                f,
                "Repeat at address {} exceeds maximum nesting depth of {}",
                address, depth
            ),
            PlayerError::InvalidTempo(bpm) => write!(f, "Invalid tempo: {} bpm", bpm),
            PlayerError::ZeroSpoolBudget => write!(f, "Spool budget must be non-zero"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for PlayerError {}
