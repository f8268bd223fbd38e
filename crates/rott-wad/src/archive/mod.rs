//! WAD archive container
//!
//! ROTT ships its assets in a single IWAD. The layout is:
//!
//! - **Header** (12 bytes): magic "IWAD", entry count, directory offset
//! - **Lump data**: raw lump payloads, referenced by offset
//! - **Directory** (16 bytes per entry): offset, size, 8-byte name
//!
//! The first directory entry must be `WALLSTRT`; files failing that check are
//! rejected even when the magic is right.
//!
//! ```rust,no_run
//! use rott_wad::archive::WadArchive;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut wad = WadArchive::open("DARKWAR.WAD")?;
//! let palette = wad.read_lump_by_name("PAL")?;
//! println!("{} lumps, PAL is {} bytes", wad.len(), palette.len());
//! # Ok(())
//! # }
//! ```

mod builder;
mod entry;
mod error;
mod header;
mod reader;

pub use builder::WadBuilder;
pub use entry::{DirectoryEntry, MAX_NAME_LEN, decode_name, normalize_name};
pub use error::{ArchiveError, ArchiveResult};
pub use header::{
    DIRECTORY_RECORD_SIZE, DirectoryRecord, HEADER_SIZE, IWAD_MAGIC, PWAD_MAGIC, WadHeader,
};
pub use reader::WadArchive;

/// Name every valid ROTT WAD carries in its first directory entry
pub const VALIDITY_MARKER: &str = "WALLSTRT";
