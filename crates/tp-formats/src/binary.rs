//! Raw binary tune images: a headerless run of 16-bit words.

use std::io::Cursor;

use binrw::helpers::until_eof;
use binrw::{BinRead, BinWrite, Endian};

use crate::FormatError;

#[derive(BinRead, BinWrite)]
struct TuneImage {
    #[br(parse_with = until_eof)]
    words: Vec<u16>,
}

/// Load a tune image stored in `endian` byte order.
pub fn load_binary(data: &[u8], endian: Endian) -> Result<Vec<u16>, FormatError> {
    if data.len() % 2 != 0 {
        return Err(FormatError::TruncatedWord);
    }
    let image = TuneImage::read_options(&mut Cursor::new(data), endian, ())?;
    log::debug!("Loaded {} words from binary image", image.words.len());
    Ok(image.words)
}

/// Encode `words` as a tune image.
pub fn write_binary(words: &[u16], endian: Endian) -> Result<Vec<u8>, FormatError> {
    let image = TuneImage {
        words: words.to_vec(),
    };
    let mut out = Cursor::new(Vec::with_capacity(words.len() * 2));
    image.write_options(&mut out, endian, ())?;
    Ok(out.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn little_endian_by_word() {
        let words = load_binary(&[0x18, 0x08, 0x00, 0xF0], Endian::Little).unwrap();
        assert_eq!(words, [0x0818, 0xF000]);
    }

    #[test]
    fn big_endian_by_word() {
        let words = load_binary(&[0x08, 0x18, 0xF0, 0x01], Endian::Big).unwrap();
        assert_eq!(words, [0x0818, 0xF001]);
    }

    #[test]
    fn odd_length_is_truncated() {
        assert_eq!(
            load_binary(&[0x18, 0x08, 0x00], Endian::Little),
            Err(FormatError::TruncatedWord)
        );
    }

    #[test]
    fn empty_image_has_no_words() {
        assert!(load_binary(&[], Endian::Little).unwrap().is_empty());
    }

    #[test]
    fn writer_matches_byte_order() {
        let words = [0x0818, 0xD803];
        assert_eq!(write_binary(&words, Endian::Little).unwrap(), [0x18, 0x08, 0x03, 0xD8]);
        assert_eq!(write_binary(&words, Endian::Big).unwrap(), [0x08, 0x18, 0xD8, 0x03]);
    }
}
