//! Palette errors

use thiserror::Error;

/// Palette result type
pub type PaletteResult<T> = Result<T, PaletteError>;

/// Errors raised while building a palette
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PaletteError {
    /// Raw palette lump is not 768 bytes
    #[error("Palette must be {expected} bytes, got {actual}")]
    WrongSize {
        /// Required size
        expected: usize,
        /// Size of the supplied buffer
        actual: usize,
    },
}
