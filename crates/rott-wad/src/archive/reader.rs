//! Random-access WAD reader

use crate::archive::VALIDITY_MARKER;
use crate::archive::entry::{DirectoryEntry, normalize_name};
use crate::archive::error::{ArchiveError, ArchiveResult};
use crate::archive::header::{DirectoryRecord, HEADER_SIZE, WadHeader};
use binrw::BinRead;
use std::fs::File;
use std::io::{BufReader, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// An opened WAD archive
///
/// The directory is read once on open. Lump data is read on demand and the
/// underlying handle stays open until [`WadArchive::close`] or drop.
#[derive(Debug)]
pub struct WadArchive<R: Read + Seek = BufReader<File>> {
    reader: Option<R>,
    path: Option<PathBuf>,
    header: WadHeader,
    entries: Vec<DirectoryEntry>,
    file_len: u64,
}

impl WadArchive<BufReader<File>> {
    /// Open a WAD file from disk
    pub fn open<P: AsRef<Path>>(path: P) -> ArchiveResult<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ArchiveError::NotFound(path.to_path_buf())
            } else {
                ArchiveError::Io(e)
            }
        })?;

        let mut archive = Self::from_reader(BufReader::new(file))?;
        archive.path = Some(path.to_path_buf());
        info!(
            "Opened {} ({} lumps)",
            path.display(),
            archive.entries.len()
        );
        Ok(archive)
    }
}

impl<R: Read + Seek> WadArchive<R> {
    /// Parse the header and directory from any seekable source
    pub fn from_reader(mut reader: R) -> ArchiveResult<Self> {
        let file_len = reader.seek(SeekFrom::End(0))?;
        reader.seek(SeekFrom::Start(0))?;

        if file_len < HEADER_SIZE as u64 {
            return Err(ArchiveError::not_an_archive(format!(
                "{file_len} bytes is shorter than the {HEADER_SIZE}-byte header"
            )));
        }

        let header = WadHeader::read(&mut reader)?;
        header.validate()?;

        let directory_offset = u64::try_from(header.directory_offset).unwrap_or(0);
        let directory_size = header.directory_size();
        if directory_offset + directory_size > file_len {
            return Err(ArchiveError::Truncated {
                offset: directory_offset,
                size: directory_size,
                available: file_len.saturating_sub(directory_offset),
            });
        }

        reader.seek(SeekFrom::Start(directory_offset))?;
        let count = usize::try_from(header.entry_count).unwrap_or(0);
        let mut entries = Vec::with_capacity(count);
        for id in 0..count {
            let record = DirectoryRecord::read(&mut reader)?;
            let entry = DirectoryEntry::from_record(id, &record)?;
            if entry.size > 0 && entry.end() > file_len {
                warn!(
                    "Lump {} ({}) spans {}..{} past end of file ({} bytes)",
                    entry.id,
                    entry.name,
                    entry.offset,
                    entry.end(),
                    file_len
                );
            }
            entries.push(entry);
        }

        match entries.first() {
            Some(first) if first.name == VALIDITY_MARKER => {}
            Some(first) => {
                return Err(ArchiveError::not_an_archive(format!(
                    "first lump is {:?}, expected {VALIDITY_MARKER:?}",
                    first.name
                )));
            }
            None => return Err(ArchiveError::not_an_archive("directory is empty")),
        }

        debug!(
            "Parsed WAD directory: {} entries at offset {}",
            entries.len(),
            directory_offset
        );

        Ok(Self {
            reader: Some(reader),
            path: None,
            header,
            entries,
            file_len,
        })
    }

    /// Path the archive was opened from, if any
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Parsed header
    pub fn header(&self) -> &WadHeader {
        &self.header
    }

    /// Size of the underlying file in bytes
    pub fn file_len(&self) -> u64 {
        self.file_len
    }

    /// All directory entries in file order
    pub fn entries(&self) -> &[DirectoryEntry] {
        &self.entries
    }

    /// Number of directory entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false for an opened archive
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True until [`WadArchive::close`] is called
    pub fn is_open(&self) -> bool {
        self.reader.is_some()
    }

    /// Entry at directory position `index`
    pub fn entry_by_index(&self, index: usize) -> ArchiveResult<&DirectoryEntry> {
        self.entries
            .get(index)
            .ok_or(ArchiveError::IndexOutOfRange {
                index,
                count: self.entries.len(),
            })
    }

    /// Entry named `name`, case-insensitive
    ///
    /// When several entries share a name the last one wins.
    pub fn entry_by_name(&self, name: &str) -> ArchiveResult<&DirectoryEntry> {
        self.index_of(name)
            .map(|index| &self.entries[index])
            .ok_or_else(|| ArchiveError::EntryNotFound(normalize_name(name)))
    }

    /// Directory position of `name`, case-insensitive, last match wins
    pub fn index_of(&self, name: &str) -> Option<usize> {
        let wanted = normalize_name(name);
        self.entries.iter().rposition(|e| e.name == wanted)
    }

    /// Last entry whose data starts at `offset`
    pub fn entry_by_offset(&self, offset: u32) -> Option<&DirectoryEntry> {
        self.entries.iter().rev().find(|e| e.offset == offset)
    }

    /// Last entry whose data is exactly `size` bytes
    pub fn entry_by_size(&self, size: u32) -> Option<&DirectoryEntry> {
        self.entries.iter().rev().find(|e| e.size == size)
    }

    /// Read the data of `entry`
    ///
    /// Zero-size entries yield an empty buffer without touching the file.
    pub fn read_lump(&mut self, entry: &DirectoryEntry) -> ArchiveResult<Vec<u8>> {
        self.read_range(entry.offset, entry.size)
    }

    /// Read the data of the lump named `name`
    pub fn read_lump_by_name(&mut self, name: &str) -> ArchiveResult<Vec<u8>> {
        let (offset, size) = {
            let entry = self.entry_by_name(name)?;
            (entry.offset, entry.size)
        };
        self.read_range(offset, size)
    }

    /// Read the data of the lump at directory position `index`
    pub fn read_lump_by_index(&mut self, index: usize) -> ArchiveResult<Vec<u8>> {
        let (offset, size) = {
            let entry = self.entry_by_index(index)?;
            (entry.offset, entry.size)
        };
        self.read_range(offset, size)
    }

    fn read_range(&mut self, offset: u32, size: u32) -> ArchiveResult<Vec<u8>> {
        let reader = self.reader.as_mut().ok_or(ArchiveError::Closed)?;
        if size == 0 {
            return Ok(Vec::new());
        }

        let start = u64::from(offset);
        let end = start + u64::from(size);
        if end > self.file_len {
            return Err(ArchiveError::Truncated {
                offset: start,
                size: u64::from(size),
                available: self.file_len.saturating_sub(start),
            });
        }

        reader.seek(SeekFrom::Start(start))?;
        let mut buffer = vec![0u8; size as usize];
        reader.read_exact(&mut buffer).map_err(|e| {
            if e.kind() == std::io::ErrorKind::UnexpectedEof {
                ArchiveError::Truncated {
                    offset: start,
                    size: u64::from(size),
                    available: self.file_len.saturating_sub(start),
                }
            } else {
                ArchiveError::Io(e)
            }
        })?;

        Ok(buffer)
    }

    /// Release the underlying handle; calling it again is a no-op
    pub fn close(&mut self) {
        if self.reader.take().is_some() {
            debug!("Closed WAD archive");
        }
    }
}
