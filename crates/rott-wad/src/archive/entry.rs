//! Decoded directory entries

use crate::archive::error::{ArchiveError, ArchiveResult};
use crate::archive::header::DirectoryRecord;
use serde::Serialize;

/// Maximum length of a lump name
pub const MAX_NAME_LEN: usize = 8;

/// One lump in the WAD directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectoryEntry {
    /// Position in the directory, starting at 0
    pub id: usize,
    /// Upper-case name, at most 8 characters
    pub name: String,
    /// Absolute offset of the lump data
    pub offset: u32,
    /// Size of the lump data in bytes
    pub size: u32,
}

impl DirectoryEntry {
    /// Decode a raw directory record at position `id`
    pub fn from_record(id: usize, record: &DirectoryRecord) -> ArchiveResult<Self> {
        let offset = u32::try_from(record.offset).map_err(|_| {
            ArchiveError::not_an_archive(format!(
                "directory entry {id} has negative offset {}",
                record.offset
            ))
        })?;
        let size = u32::try_from(record.size).map_err(|_| {
            ArchiveError::not_an_archive(format!(
                "directory entry {id} has negative size {}",
                record.size
            ))
        })?;

        Ok(Self {
            id,
            name: decode_name(&record.name),
            offset,
            size,
        })
    }

    /// True when the entry carries no data
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Offset one past the last byte of the lump
    pub fn end(&self) -> u64 {
        u64::from(self.offset) + u64::from(self.size)
    }

    /// Case-insensitive name comparison
    pub fn name_matches(&self, name: &str) -> bool {
        self.name == normalize_name(name)
    }
}

/// Decode an on-disk name: stop at the first NUL, upper-case the rest
pub fn decode_name(raw: &[u8; MAX_NAME_LEN]) -> String {
    let end = raw.iter().position(|&b| b == 0).unwrap_or(raw.len());
    String::from_utf8_lossy(&raw[..end]).to_ascii_uppercase()
}

/// Canonical form used for lookups: upper case, clipped to 8 characters
pub fn normalize_name(name: &str) -> String {
    name.trim_end_matches('\0')
        .chars()
        .take(MAX_NAME_LEN)
        .collect::<String>()
        .to_ascii_uppercase()
}
