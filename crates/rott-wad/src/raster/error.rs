//! Raster decode errors

use thiserror::Error;

/// Raster decode result type
pub type RasterResult<T> = Result<T, RasterError>;

/// Reasons a raster lump could not be decoded
///
/// None of these are fatal to the archive; the lump simply has no image.
#[derive(Debug, Error)]
pub enum RasterError {
    /// Lump is not the size its format or header requires
    #[error("Size mismatch: expected {expected} bytes, got {actual}")]
    SizeMismatch {
        /// Required size
        expected: usize,
        /// Actual lump size
        actual: usize,
    },

    /// Header fields are out of range
    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    /// Column or post data points outside the lump
    #[error("Read at offset {offset} is outside the {len}-byte lump")]
    OutOfBounds {
        /// Offending offset
        offset: usize,
        /// Lump length
        len: usize,
    },

    /// Binary read error
    #[error("Binary format error: {0}")]
    BinRead(#[from] binrw::Error),
}

impl RasterError {
    pub(crate) fn invalid_header(msg: impl Into<String>) -> Self {
        Self::InvalidHeader(msg.into())
    }
}
