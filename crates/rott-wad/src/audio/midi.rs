//! MIDI songs, exported byte for byte

use crate::audio::{AudioError, AudioResult};
use binrw::BinRead;
use binrw::io::Cursor;
use serde::Serialize;

/// Chunk id of a standard MIDI file header
pub const MIDI_SIGNATURE: &[u8; 4] = b"MThd";

/// `MThd` chunk
#[derive(Debug, Clone, Copy, PartialEq, Eq, BinRead, Serialize)]
#[br(big, magic = b"MThd")]
pub struct MidiHeader {
    /// Chunk body length, 6 in well-formed files
    pub length: u32,
    /// File format, 0, 1 or 2
    pub format: u16,
    /// Number of tracks
    pub tracks: u16,
    /// Ticks per quarter note or SMPTE timing
    pub division: u16,
}

/// MIDI lump
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MidiSong {
    /// Header fields, when the lump is long enough to carry them
    pub header: Option<MidiHeader>,
    data: Vec<u8>,
}

/// True when `data` starts with "MThd", compared case-insensitively
pub fn is_midi(data: &[u8]) -> bool {
    data.len() > MIDI_SIGNATURE.len() && data[..MIDI_SIGNATURE.len()].eq_ignore_ascii_case(MIDI_SIGNATURE)
}

impl MidiSong {
    /// Check the signature and keep the bytes
    pub fn parse(data: &[u8]) -> AudioResult<Self> {
        if !is_midi(data) {
            return Err(AudioError::NotMidi);
        }

        Ok(Self {
            header: MidiHeader::read(&mut Cursor::new(data)).ok(),
            data: data.to_vec(),
        })
    }

    /// The lump unchanged, ready to be written as a `.mid` file
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }
}
