//! Creative Voice File (VOC) sound effects
//!
//! ```text
//! header (26 bytes)   "Creative Voice File", 0x1A, header_size, version, id_code
//! blocks              { type:u8, length:u24, body } ... type 0
//! ```
//!
//! Block 1 carries 8-bit mono samples with a time constant, block 9 carries
//! an explicit sample rate, bit depth and channel count. Other block types
//! are skipped.

use crate::audio::{AudioError, AudioResult, PcmSound};
use binrw::io::Cursor;
use binrw::{BinRead, BinWrite};
use serde::Serialize;
use tracing::debug;

/// File signature, compared case-insensitively
pub const VOC_SIGNATURE: &[u8; 19] = b"Creative Voice File";

/// Byte that must follow the signature
pub const VOC_EOF_MARKER: u8 = 0x1A;

/// Size of the fixed VOC header
pub const VOC_HEADER_SIZE: usize = 26;

/// Versions this decoder accepts
pub const SUPPORTED_VERSIONS: [u16; 2] = [0x010A, 0x0114];

/// Block walk stops when fewer bytes than this remain after a block type
pub const MIN_BLOCK_REMAINING: usize = 10;

/// Terminator block
pub const BLOCK_TERMINATOR: u8 = 0;

/// 8-bit mono sound data block
pub const BLOCK_SOUND_DATA: u8 = 1;

/// Sound data block with explicit format
pub const BLOCK_SOUND_DATA_NEW: u8 = 9;

/// Block 9 codec id for 8-bit unsigned PCM
pub const CODEC_PCM_8BIT: i16 = 0;

/// Block 9 codec id for 16-bit signed PCM
pub const CODEC_PCM_16BIT: i16 = 4;

/// Size of the block 9 format sub-header
pub const FORMAT_BLOCK_SIZE: usize = 12;

/// VOC main header
#[derive(Debug, Clone, PartialEq, Eq, BinRead, BinWrite, Serialize)]
#[brw(little)]
pub struct VocHeader {
    /// "Creative Voice File"
    pub signature: [u8; 19],
    /// Always 0x1A
    pub eof_marker: u8,
    /// Offset of the first block
    pub header_size: u16,
    /// Format version
    pub version: u16,
    /// Version check value
    pub id_code: u16,
}

/// Block 9 sub-header
#[derive(Debug, Clone, PartialEq, Eq, BinRead, BinWrite)]
#[brw(little)]
pub struct VocFormatBlock {
    /// Samples per second
    pub sample_rate: i32,
    /// Bits per sample
    pub bits_per_sample: u8,
    /// Channel count
    pub channels: u8,
    /// Codec id
    pub codec: i16,
    /// Unused
    pub reserved: [u8; 4],
}

impl VocFormatBlock {
    fn validate(&self) -> AudioResult<()> {
        let stereo = self.channels > 1 && self.codec == CODEC_PCM_16BIT;
        let mono = self.channels == 1 && self.codec == CODEC_PCM_8BIT;
        if !(stereo || mono) {
            return Err(AudioError::InvalidFormatBlock {
                channels: self.channels,
                codec: self.codec,
            });
        }
        if self.sample_rate <= 0 {
            return Err(AudioError::InvalidSampleRate(self.sample_rate));
        }
        Ok(())
    }
}

/// Decoded VOC lump
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VocSound {
    /// Parsed main header
    pub header: VocHeader,
    /// Concatenated samples of every sound block
    pub pcm: PcmSound,
}

/// True when `data` starts with the VOC signature
pub fn is_voc(data: &[u8]) -> bool {
    data.len() > VOC_SIGNATURE.len() && data[..VOC_SIGNATURE.len()].eq_ignore_ascii_case(VOC_SIGNATURE)
}

/// Sample rate encoded by a block 1 time constant byte
pub fn rate_from_time_constant(time_constant: u8) -> u32 {
    256_000_000 / (65536 - (u32::from(time_constant) << 8))
}

impl VocSound {
    /// Parse a VOC lump and extract its samples
    pub fn parse(data: &[u8]) -> AudioResult<Self> {
        if !is_voc(data) {
            return Err(AudioError::BadSignature);
        }
        if data.len() < VOC_HEADER_SIZE {
            return Err(AudioError::Truncated {
                offset: 0,
                len: data.len(),
            });
        }

        let header = VocHeader::read(&mut Cursor::new(data))?;
        if header.eof_marker != VOC_EOF_MARKER {
            return Err(AudioError::MissingEofMarker);
        }
        if !SUPPORTED_VERSIONS.contains(&header.version) {
            return Err(AudioError::UnsupportedVersion(header.version));
        }

        let mut samples = Vec::new();
        let mut format = None;
        let mut pos = usize::from(header.header_size);
        while pos < data.len() {
            let block_start = pos;
            let block_type = data[pos];
            pos += 1;
            if block_type == BLOCK_TERMINATOR || data.len() - pos < MIN_BLOCK_REMAINING {
                break;
            }

            let length = u32::from_le_bytes([data[pos], data[pos + 1], data[pos + 2], 0]) as usize;
            pos += 3;
            let body = data
                .get(pos..pos + length)
                .ok_or(AudioError::Truncated {
                    offset: block_start,
                    len: data.len(),
                })?;

            match block_type {
                BLOCK_SOUND_DATA => {
                    if body.len() < 2 {
                        return Err(AudioError::Truncated {
                            offset: block_start,
                            len: data.len(),
                        });
                    }
                    format = Some((rate_from_time_constant(body[0]), 8, 1));
                    samples.extend_from_slice(&body[2..]);
                }
                BLOCK_SOUND_DATA_NEW => {
                    if body.len() < FORMAT_BLOCK_SIZE {
                        return Err(AudioError::Truncated {
                            offset: block_start,
                            len: data.len(),
                        });
                    }
                    let block = VocFormatBlock::read(&mut Cursor::new(body))?;
                    block.validate()?;
                    format = Some((
                        block.sample_rate as u32,
                        u16::from(block.bits_per_sample),
                        u16::from(block.channels),
                    ));
                    samples.extend_from_slice(&body[FORMAT_BLOCK_SIZE..]);
                }
                other => debug!("Skipping VOC block type {} ({} bytes)", other, length),
            }
            pos += length;
        }

        let (sample_rate, bits_per_sample, channels) = format.ok_or(AudioError::NoSampleData)?;
        debug!(
            "Decoded VOC: {} bytes at {} Hz, {} bit, {} channel(s)",
            samples.len(),
            sample_rate,
            bits_per_sample,
            channels
        );

        Ok(Self {
            header,
            pcm: PcmSound {
                sample_rate,
                bits_per_sample,
                channels,
                samples,
            },
        })
    }
}
