//! Planar pic graphics
//!
//! A pic starts with two bytes, the plane size and the height; the width is
//! four times the plane size. Pixels are stored as four interleaved planes.
//! Within a plane a column advances by one byte while a row advances by
//! `plane_size` bytes, so pixel `(x, y)` lives at
//! `2 + x / 4 + (x % 4) * height * plane_size + y * plane_size`.

use crate::palette::Palette;
use crate::raster::{RasterDecode, RasterError, RasterImage, RasterResult, byte_at};
use tracing::debug;

/// Size of the pic header
pub const PIC_HEADER_SIZE: usize = 2;

/// Pixel value that is never drawn
pub const PIC_SKIP_INDEX: u8 = 255;

/// Decoded pic
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pic {
    /// Bytes per plane row; the width is four times this
    pub plane_size: u8,
    image: RasterImage,
}

impl Pic {
    /// Width in pixels for a given plane size
    pub fn width_for(plane_size: u8) -> u32 {
        u32::from(plane_size) * 4
    }
}

impl RasterDecode for Pic {
    fn decode(data: &[u8], palette: &Palette) -> RasterResult<Self> {
        if data.len() < PIC_HEADER_SIZE {
            return Err(RasterError::SizeMismatch {
                expected: PIC_HEADER_SIZE,
                actual: data.len(),
            });
        }

        let plane_size = data[0];
        let height = data[1];
        if plane_size == 0 || height == 0 {
            return Err(RasterError::invalid_header(format!(
                "plane size {plane_size}, height {height}"
            )));
        }

        let width = Self::width_for(plane_size);
        let expected = PIC_HEADER_SIZE + width as usize * usize::from(height);
        if data.len() < expected {
            return Err(RasterError::SizeMismatch {
                expected,
                actual: data.len(),
            });
        }

        let plane = usize::from(plane_size);
        let column_span = usize::from(height) * plane;
        let mut image = RasterImage::masked(width, u32::from(height), palette.mask_color());
        for x in 0..width as usize {
            let base = PIC_HEADER_SIZE + x / 4 + (x % 4) * column_span;
            for y in 0..usize::from(height) {
                let index = byte_at(data, base + y * plane)?;
                if index != PIC_SKIP_INDEX {
                    image.put_indexed(x as u32, y as u32, palette, index);
                }
            }
        }

        debug!("Decoded {}x{} pic", width, height);
        Ok(Self { plane_size, image })
    }

    fn image(&self) -> &RasterImage {
        &self.image
    }

    fn into_image(self) -> RasterImage {
        self.image
    }
}
