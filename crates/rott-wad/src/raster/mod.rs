//! Raster lump decoders
//!
//! Every decoder turns raw lump bytes plus a [`Palette`] into a
//! [`RasterImage`]. Decoding is eager: on success the returned value holds
//! the full pixel grid, on failure nothing is produced and the lump has no
//! preview.
//!
//! | Format       | Header   | Pixel order                         |
//! |--------------|----------|-------------------------------------|
//! | Flat         | none     | transposed, 64x64                   |
//! | Sky          | none     | transposed, 256x200                 |
//! | Patch        | 8 bytes  | column-major                        |
//! | Pic          | 2 bytes  | four interleaved planes             |
//! | Masked       | 10 bytes | column offsets + run-length posts   |
//! | TransMasked  | 12 bytes | posts with shading posts            |
//! | Colormap     | none     | 32 shade tables                     |

pub mod colormap;
mod error;
mod image;
pub mod masked;
pub mod modex;
pub mod patch;
pub mod pic;
pub mod transmasked;

pub use colormap::Colormap;
pub use error::{RasterError, RasterResult};
pub use image::RasterImage;
pub use masked::{MaskedHeader, MaskedSprite};
pub use modex::{Flat, Sky};
pub use patch::{Patch, PatchHeader};
pub use pic::Pic;
pub use transmasked::{TransMaskedHeader, TransMaskedSprite};

use crate::palette::Palette;

/// Row-start value that ends a sprite column
pub const POST_END: u8 = 0xFF;

/// Common decode capability of all raster formats
pub trait RasterDecode: Sized {
    /// Decode raw lump bytes with `palette`
    fn decode(data: &[u8], palette: &Palette) -> RasterResult<Self>;

    /// Decoded pixels
    fn image(&self) -> &RasterImage;

    /// Take ownership of the decoded pixels
    fn into_image(self) -> RasterImage;
}

pub(crate) fn byte_at(data: &[u8], offset: usize) -> RasterResult<u8> {
    data.get(offset).copied().ok_or(RasterError::OutOfBounds {
        offset,
        len: data.len(),
    })
}

pub(crate) fn u16_at(data: &[u8], offset: usize) -> RasterResult<u16> {
    match data.get(offset..offset + 2) {
        Some(&[lo, hi]) => Ok(u16::from_le_bytes([lo, hi])),
        _ => Err(RasterError::OutOfBounds {
            offset,
            len: data.len(),
        }),
    }
}

pub(crate) fn i16_at(data: &[u8], offset: usize) -> RasterResult<i16> {
    u16_at(data, offset).map(|v| v as i16)
}
