//! Tune file formats for tuneplayer.
//!
//! Loads instruction streams from raw binary images and from the C array
//! initialisers authoring tools emit, and renders them back as listings.

mod binary;
mod listing;
mod text;

pub use binary::{load_binary, write_binary};
pub use binrw::Endian;
pub use listing::{disassemble, summarize, ListingLine, TuneSummary};
pub use text::load_text;

/// Error type for tune loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// Binary image has an odd number of bytes
    TruncatedWord,
    /// No `{ ... }` array initialiser in the text
    MissingArray,
    /// Array element `index` is not a number
    InvalidNumber { index: usize },
    /// Array element `index` does not fit in 16 bits
    WordOutOfRange { index: usize },
    /// Binary reader or writer failure
    Binary(String),
}

impl std::fmt::Display for FormatError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FormatError::TruncatedWord => write!(f, "Tune image ends in the middle of a word"),
            FormatError::MissingArray => write!(f, "No array initialiser found"),
            FormatError::InvalidNumber { index } => write!(f, "Element {} is not a number", index),
            FormatError::WordOutOfRange { index } => {
                write!(f, "Element {} does not fit in 16 bits", index)
            }
            FormatError::Binary(msg) => write!(f, "Binary error: {}", msg),
        }
    }
}

impl std::error::Error for FormatError {}

impl From<binrw::Error> for FormatError {
    fn from(err: binrw::Error) -> Self {
        FormatError::Binary(err.to_string())
    }
}
