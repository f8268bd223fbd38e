//! Lump decode errors

use crate::archive::ArchiveError;
use crate::audio::AudioError;
use crate::lump::LumpKind;
use crate::palette::PaletteError;
use crate::raster::RasterError;
use thiserror::Error;

/// Lump decode result type
pub type LumpResult<T> = Result<T, LumpError>;

/// Failure to read, decode or export a single lump
///
/// Always local to one lump; enumeration of the rest of the directory can
/// continue.
#[derive(Debug, Error)]
pub enum LumpError {
    /// Reading the lump bytes failed
    #[error(transparent)]
    Archive(#[from] ArchiveError),

    /// Palette lump has the wrong size
    #[error(transparent)]
    Palette(#[from] PaletteError),

    /// Raster decode failed
    #[error(transparent)]
    Raster(#[from] RasterError),

    /// Audio decode failed
    #[error(transparent)]
    Audio(#[from] AudioError),

    /// A raster lump was decoded without a usable palette
    #[error("No usable palette to decode {0} lump")]
    MissingPalette(LumpKind),

    /// Markers and empty entries carry no data
    #[error("{0} lumps carry no data to decode")]
    NotDecodable(LumpKind),

    /// Writing an export failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
