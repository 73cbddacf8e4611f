//! WAV encoding for 16-bit stereo PCM.

use std::io::{Cursor, Seek, Write};

use binrw::{BinResult, BinWrite};

/// One stereo sample pair.
#[derive(BinWrite, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[bw(little)]
pub struct Frame {
    pub left: i16,
    pub right: i16,
}

impl Frame {
    pub const fn silence() -> Self {
        Self { left: 0, right: 0 }
    }

    /// The same sample on both channels.
    pub const fn mono(sample: i16) -> Self {
        Self {
            left: sample,
            right: sample,
        }
    }
}

/// RIFF, `fmt ` and `data` chunk headers for PCM.
#[derive(BinWrite)]
#[bw(little, magic = b"RIFF")]
struct WavHeader {
    riff_size: u32,
    #[bw(magic = b"WAVEfmt ")]
    fmt_size: u32,
    format: u16,
    channels: u16,
    sample_rate: u32,
    byte_rate: u32,
    block_align: u16,
    bits_per_sample: u16,
    #[bw(magic = b"data")]
    data_size: u32,
}

impl WavHeader {
    fn stereo16(sample_rate: u32, frames: usize) -> Self {
        let block_align: u16 = 4;
        let data_size = frames as u32 * block_align as u32;
        Self {
            riff_size: 36 + data_size,
            fmt_size: 16,
            format: 1,
            channels: 2,
            sample_rate,
            byte_rate: sample_rate * block_align as u32,
            block_align,
            bits_per_sample: 16,
            data_size,
        }
    }
}

pub fn write_wav<W: Write + Seek>(w: &mut W, frames: &[Frame], sample_rate: u32) -> BinResult<()> {
    WavHeader::stereo16(sample_rate, frames.len()).write_le(w)?;
    for frame in frames {
        frame.write_le(w)?;
    }
    Ok(())
}

pub fn frames_to_wav(frames: &[Frame], sample_rate: u32) -> BinResult<Vec<u8>> {
    let mut buf = Cursor::new(Vec::with_capacity(44 + frames.len() * 4));
    write_wav(&mut buf, frames, sample_rate)?;
    Ok(buf.into_inner())
}
