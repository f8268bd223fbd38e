//! Error types for archive operations

use std::path::PathBuf;
use thiserror::Error;

/// Archive operation result type
pub type ArchiveResult<T> = Result<T, ArchiveError>;

/// Errors raised while opening a WAD or reading lumps from it
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// The archive file does not exist
    #[error("WAD file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Bad magic, empty directory or missing `WALLSTRT` signature
    #[error("Not a ROTT WAD archive: {reason}")]
    NotAnArchive {
        /// Why the file was rejected
        reason: String,
    },

    /// A read ran past the end of the file
    #[error("Truncated read: {size} bytes at offset {offset}, only {available} available")]
    Truncated {
        /// Offset the read started at
        offset: u64,
        /// Number of bytes requested
        size: u64,
        /// Number of bytes actually present from `offset`
        available: u64,
    },

    /// No directory entry carries this name
    #[error("Lump not found: {0}")]
    EntryNotFound(String),

    /// Directory index past the end of the directory
    #[error("Directory index {index} out of range (directory has {count} entries)")]
    IndexOutOfRange {
        /// Requested index
        index: usize,
        /// Number of directory entries
        count: usize,
    },

    /// The archive handle was closed
    #[error("WAD archive is closed")]
    Closed,

    /// Binary read error
    #[error("Binary format error: {0}")]
    BinRead(#[from] binrw::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ArchiveError {
    /// Errors that invalidate the whole archive, not just one lump
    pub fn is_archive_level(&self) -> bool {
        matches!(self, Self::NotFound(_) | Self::NotAnArchive { .. })
    }

    /// Errors local to a single lump read; browsing can continue
    pub fn is_lump_level(&self) -> bool {
        matches!(
            self,
            Self::Truncated { .. } | Self::EntryNotFound(_) | Self::IndexOutOfRange { .. }
        )
    }

    pub(crate) fn not_an_archive(reason: impl Into<String>) -> Self {
        Self::NotAnArchive {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_error_levels() {
        assert!(ArchiveError::not_an_archive("bad magic").is_archive_level());
        assert!(ArchiveError::NotFound(PathBuf::from("x.wad")).is_archive_level());
        assert!(!ArchiveError::Closed.is_archive_level());

        let truncated = ArchiveError::Truncated {
            offset: 10,
            size: 20,
            available: 5,
        };
        assert!(truncated.is_lump_level());
        assert!(!truncated.is_archive_level());
        assert!(ArchiveError::EntryNotFound("PAL".to_string()).is_lump_level());
    }

    #[test]
    fn test_error_display() {
        let err = ArchiveError::Truncated {
            offset: 100,
            size: 64,
            available: 12,
        };
        assert_eq!(
            err.to_string(),
            "Truncated read: 64 bytes at offset 100, only 12 available"
        );
        assert_eq!(
            ArchiveError::not_an_archive("bad magic").to_string(),
            "Not a ROTT WAD archive: bad magic"
        );
    }
}
