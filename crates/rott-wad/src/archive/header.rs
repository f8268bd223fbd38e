//! WAD header and directory record layout

use crate::archive::error::{ArchiveError, ArchiveResult};
use binrw::{BinRead, BinWrite};

/// Magic of an internal (game) WAD, the only kind ROTT ships
pub const IWAD_MAGIC: [u8; 4] = *b"IWAD";

/// Magic of a patch WAD; recognized only to produce a precise error
pub const PWAD_MAGIC: [u8; 4] = *b"PWAD";

/// Size of the WAD header in bytes
pub const HEADER_SIZE: usize = 12;

/// Size of one directory record in bytes
pub const DIRECTORY_RECORD_SIZE: usize = 16;

/// WAD file header
///
/// - Magic "IWAD" (4 bytes)
/// - Number of directory entries (4 bytes, little-endian)
/// - Offset of the directory (4 bytes, little-endian)
#[derive(Debug, Clone, PartialEq, Eq, BinRead, BinWrite)]
#[brw(little)]
pub struct WadHeader {
    /// Magic signature, "IWAD" for ROTT archives
    pub magic: [u8; 4],

    /// Number of records in the directory
    pub entry_count: i32,

    /// Absolute file offset of the directory
    pub directory_offset: i32,
}

impl WadHeader {
    /// Create a header for an IWAD with the given directory shape
    pub fn new(entry_count: i32, directory_offset: i32) -> Self {
        Self {
            magic: IWAD_MAGIC,
            entry_count,
            directory_offset,
        }
    }

    /// Validate magic and directory fields
    pub fn validate(&self) -> ArchiveResult<()> {
        if self.magic == PWAD_MAGIC {
            return Err(ArchiveError::not_an_archive(
                "PWAD archives are not supported, ROTT only uses IWAD",
            ));
        }

        if self.magic != IWAD_MAGIC {
            return Err(ArchiveError::not_an_archive(format!(
                "bad magic {:?}, expected \"IWAD\"",
                String::from_utf8_lossy(&self.magic)
            )));
        }

        if self.entry_count <= 0 {
            return Err(ArchiveError::not_an_archive(format!(
                "directory holds {} entries",
                self.entry_count
            )));
        }

        if self.directory_offset < 0 {
            return Err(ArchiveError::not_an_archive(format!(
                "negative directory offset {}",
                self.directory_offset
            )));
        }

        Ok(())
    }

    /// Size in bytes of the directory this header describes
    pub fn directory_size(&self) -> u64 {
        u64::try_from(self.entry_count).unwrap_or(0) * DIRECTORY_RECORD_SIZE as u64
    }
}

/// Raw directory record as stored on disk
///
/// - Lump offset (4 bytes, little-endian)
/// - Lump size (4 bytes, little-endian)
/// - Lump name (8 bytes, NUL padded)
#[derive(Debug, Clone, PartialEq, Eq, BinRead, BinWrite)]
#[brw(little)]
pub struct DirectoryRecord {
    /// Absolute offset of the lump data
    pub offset: i32,

    /// Size of the lump data in bytes
    pub size: i32,

    /// NUL padded lump name
    pub name: [u8; 8],
}

impl DirectoryRecord {
    /// Build a record, padding or truncating `name` to 8 bytes
    pub fn new(name: &str, offset: i32, size: i32) -> Self {
        let mut raw = [0u8; 8];
        for (dst, src) in raw.iter_mut().zip(name.bytes()) {
            *dst = src;
        }

        Self {
            offset,
            size,
            name: raw,
        }
    }
}
