//! Patch graphics: 8-byte header followed by column-major pixels

use crate::palette::Palette;
use crate::raster::{RasterDecode, RasterError, RasterImage, RasterResult, i16_at, u16_at};
use serde::Serialize;
use tracing::debug;

/// Offset of the pixel data
pub const PATCH_HEADER_SIZE: usize = 8;

/// Patch header
///
/// `origin_y` is read from offset 8, past the 2 padding bytes at offset 6,
/// and therefore overlaps the first two pixel bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PatchHeader {
    /// Width in pixels
    pub width: u16,
    /// Height in pixels
    pub height: u16,
    /// Horizontal origin
    pub origin_x: i16,
    /// Vertical origin
    pub origin_y: i16,
}

impl PatchHeader {
    /// Read the header fields from a lump
    pub fn parse(data: &[u8]) -> RasterResult<Self> {
        if data.len() < PATCH_HEADER_SIZE {
            return Err(RasterError::SizeMismatch {
                expected: PATCH_HEADER_SIZE,
                actual: data.len(),
            });
        }

        Ok(Self {
            width: u16_at(data, 0)?,
            height: u16_at(data, 2)?,
            origin_x: i16_at(data, 4)?,
            origin_y: i16_at(data, 8).unwrap_or(0),
        })
    }

    /// Number of pixel bytes the header promises
    pub fn pixel_count(&self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }
}

/// Decoded patch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patch {
    /// Parsed header
    pub header: PatchHeader,
    image: RasterImage,
}

impl RasterDecode for Patch {
    fn decode(data: &[u8], palette: &Palette) -> RasterResult<Self> {
        let header = PatchHeader::parse(data)?;
        if header.width == 0 || header.height == 0 {
            return Err(RasterError::invalid_header(format!(
                "patch is {}x{}",
                header.width, header.height
            )));
        }

        let expected = PATCH_HEADER_SIZE + header.pixel_count();
        if data.len() < expected {
            return Err(RasterError::SizeMismatch {
                expected,
                actual: data.len(),
            });
        }

        let width = u32::from(header.width);
        let height = u32::from(header.height);
        let mut image = RasterImage::new(width, height);
        let columns = data[PATCH_HEADER_SIZE..expected].chunks_exact(usize::from(header.height));
        for (x, column) in columns.enumerate() {
            for (y, &index) in column.iter().enumerate() {
                image.put(x as u32, y as u32, palette.color_at(index));
            }
        }

        debug!(
            "Decoded {}x{} patch, origin ({}, {})",
            width, height, header.origin_x, header.origin_y
        );
        Ok(Self { header, image })
    }

    fn image(&self) -> &RasterImage {
        &self.image
    }

    fn into_image(self) -> RasterImage {
        self.image
    }
}
