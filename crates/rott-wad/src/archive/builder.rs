//! WAD archive builder

use crate::archive::error::{ArchiveError, ArchiveResult};
use crate::archive::header::{DirectoryRecord, HEADER_SIZE, WadHeader};
use binrw::BinWrite;
use binrw::io::Cursor;

/// Builder for IWAD archives
///
/// Lump data is laid out directly after the header in insertion order and
/// the directory follows the last lump.
#[derive(Debug, Default, Clone)]
pub struct WadBuilder {
    lumps: Vec<(String, Vec<u8>)>,
}

impl WadBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a lump
    pub fn add_lump(mut self, name: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        self.lumps.push((name.into(), data.into()));
        self
    }

    /// Append a zero-size marker lump
    pub fn add_marker(self, name: impl Into<String>) -> Self {
        self.add_lump(name, Vec::new())
    }

    /// Number of lumps added so far
    pub fn len(&self) -> usize {
        self.lumps.len()
    }

    /// True when no lump has been added
    pub fn is_empty(&self) -> bool {
        self.lumps.is_empty()
    }

    /// Serialize the archive
    pub fn build(&self) -> ArchiveResult<Vec<u8>> {
        let data_size: usize = self.lumps.iter().map(|(_, data)| data.len()).sum();
        let directory_offset = to_i32(HEADER_SIZE + data_size)?;
        let entry_count = to_i32(self.lumps.len())?;

        let mut cursor = Cursor::new(Vec::with_capacity(
            HEADER_SIZE + data_size + self.lumps.len() * 16,
        ));
        WadHeader::new(entry_count, directory_offset).write(&mut cursor)?;

        let mut records = Vec::with_capacity(self.lumps.len());
        let mut offset = HEADER_SIZE;
        for (name, data) in &self.lumps {
            let record_offset = if data.is_empty() { 0 } else { to_i32(offset)? };
            records.push(DirectoryRecord::new(name, record_offset, to_i32(data.len())?));
            cursor.get_mut().extend_from_slice(data);
            offset += data.len();
        }

        cursor.set_position(offset as u64);
        for record in &records {
            record.write(&mut cursor)?;
        }

        Ok(cursor.into_inner())
    }
}

fn to_i32(value: usize) -> ArchiveResult<i32> {
    i32::try_from(value)
        .map_err(|_| ArchiveError::not_an_archive(format!("{value} does not fit a WAD field")))
}
