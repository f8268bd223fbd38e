//! PCM samples and their RIFF/WAVE container

use crate::audio::{AudioError, AudioResult};
use binrw::io::Cursor;
use binrw::{BinRead, BinWrite};
use serde::Serialize;

/// Size of the canonical WAVE header
pub const WAVE_HEADER_SIZE: usize = 44;

/// WAVE format tag for integer PCM
pub const WAVE_FORMAT_PCM: u16 = 1;

/// Size of the PCM `fmt ` chunk body
pub const FMT_CHUNK_SIZE: u32 = 16;

/// Canonical 44-byte RIFF/WAVE header
#[derive(Debug, Clone, PartialEq, Eq, BinRead, BinWrite)]
#[brw(little)]
pub struct WaveHeader {
    /// Size of everything after this field
    #[brw(magic = b"RIFF")]
    pub riff_size: u32,
    /// Size of the `fmt ` chunk body
    #[brw(magic = b"WAVEfmt ")]
    pub fmt_size: u32,
    /// Format tag, 1 for PCM
    pub format_tag: u16,
    /// Channel count
    pub channels: u16,
    /// Samples per second
    pub sample_rate: u32,
    /// Bytes per second
    pub byte_rate: u32,
    /// Bytes per sample frame
    pub block_align: u16,
    /// Bits per sample
    pub bits_per_sample: u16,
    /// Size of the sample data
    #[brw(magic = b"data")]
    pub data_size: u32,
}

impl WaveHeader {
    /// Header describing `data_size` bytes of PCM in the given format
    ///
    /// Fails when a header field does not fit its 32-bit slot.
    pub fn pcm(
        sample_rate: u32,
        bits_per_sample: u16,
        channels: u16,
        data_size: u32,
    ) -> AudioResult<Self> {
        let overflow = || AudioError::WaveOverflow {
            sample_rate,
            bits_per_sample,
            channels,
            data_size: u64::from(data_size),
        };

        let block_align = channels.checked_mul(bits_per_sample).ok_or_else(overflow)? / 8;
        let byte_rate = sample_rate
            .checked_mul(u32::from(block_align))
            .ok_or_else(overflow)?;
        let riff_size = data_size
            .checked_add(WAVE_HEADER_SIZE as u32 - 8)
            .ok_or_else(overflow)?;

        Ok(Self {
            riff_size,
            fmt_size: FMT_CHUNK_SIZE,
            format_tag: WAVE_FORMAT_PCM,
            channels,
            sample_rate,
            byte_rate,
            block_align,
            bits_per_sample,
            data_size,
        })
    }
}

/// Raw PCM samples with their format
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PcmSound {
    /// Samples per second
    pub sample_rate: u32,
    /// Bits per sample
    pub bits_per_sample: u16,
    /// Channel count
    pub channels: u16,
    /// Interleaved sample bytes
    #[serde(skip)]
    pub samples: Vec<u8>,
}

impl PcmSound {
    /// Playback length in milliseconds
    pub fn duration_ms(&self) -> u64 {
        let frame = u64::from(self.channels) * u64::from(self.bits_per_sample) / 8;
        if frame == 0 || self.sample_rate == 0 {
            return 0;
        }
        self.samples.len() as u64 * 1000 / (frame * u64::from(self.sample_rate))
    }

    /// Wrap the samples in a canonical RIFF/WAVE file
    pub fn to_wav(&self) -> AudioResult<Vec<u8>> {
        let data_size =
            u32::try_from(self.samples.len()).map_err(|_| AudioError::WaveOverflow {
                sample_rate: self.sample_rate,
                bits_per_sample: self.bits_per_sample,
                channels: self.channels,
                data_size: self.samples.len() as u64,
            })?;
        let header = WaveHeader::pcm(
            self.sample_rate,
            self.bits_per_sample,
            self.channels,
            data_size,
        )?;

        let mut cursor = Cursor::new(Vec::with_capacity(WAVE_HEADER_SIZE + self.samples.len()));
        header.write(&mut cursor)?;
        let mut out = cursor.into_inner();
        out.extend_from_slice(&self.samples);
        Ok(out)
    }
}
