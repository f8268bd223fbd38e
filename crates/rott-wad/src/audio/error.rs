//! Audio decode errors

use thiserror::Error;

/// Audio decode result type
pub type AudioResult<T> = Result<T, AudioError>;

/// Reasons a sound, song or speaker lump could not be decoded
#[derive(Debug, Error)]
pub enum AudioError {
    /// First 19 bytes are not "Creative Voice File"
    #[error("Missing \"Creative Voice File\" signature")]
    BadSignature,

    /// Byte 19 of a VOC file is not 0x1A
    #[error("Missing 0x1A marker after VOC signature")]
    MissingEofMarker,

    /// VOC version other than 0x010A or 0x0114
    #[error("Unsupported VOC version 0x{0:04X}")]
    UnsupportedVersion(u16),

    /// Block 9 channel/codec combination is not mono 8-bit or stereo 16-bit
    #[error("Invalid VOC format block: {channels} channels, codec {codec}")]
    InvalidFormatBlock {
        /// Channel count
        channels: u8,
        /// Codec id
        codec: i16,
    },

    /// Block 9 declares a negative or zero sample rate
    #[error("Invalid VOC sample rate {0}")]
    InvalidSampleRate(i32),

    /// A block runs past the end of the lump
    #[error("VOC block at offset {offset} runs past the end of the {len}-byte lump")]
    Truncated {
        /// Offset of the offending block
        offset: usize,
        /// Lump length
        len: usize,
    },

    /// The block walk found no sample payload
    #[error("VOC lump contains no sample data")]
    NoSampleData,

    /// Lump does not start with "MThd"
    #[error("Missing MThd signature")]
    NotMidi,

    /// PC speaker lump shorter than its 4-byte header
    #[error("PC speaker lump is {0} bytes, shorter than its 4-byte header")]
    SpeakerTooShort(usize),

    /// Sample format too large for a RIFF/WAVE header
    #[error(
        "WAVE header overflow: {sample_rate} Hz, {bits_per_sample} bit, {channels} channel(s), {data_size} bytes"
    )]
    WaveOverflow {
        /// Samples per second
        sample_rate: u32,
        /// Bits per sample
        bits_per_sample: u16,
        /// Channel count
        channels: u16,
        /// Sample data size
        data_size: u64,
    },

    /// Binary read or write error
    #[error("Binary format error: {0}")]
    BinRead(#[from] binrw::Error),
}

impl AudioError {
    /// Version and format errors mean the lump is well-formed but unsupported
    pub fn is_unsupported(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedVersion(_) | Self::InvalidFormatBlock { .. }
        )
    }
}
