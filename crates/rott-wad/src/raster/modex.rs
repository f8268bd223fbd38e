//! Flat and sky textures
//!
//! Both store their pixels transposed: the lump is a `height`-wide,
//! `width`-tall grid in row-major order. Rotating that grid 90° clockwise
//! yields the displayed image, so output pixel `(x, y)` comes from byte
//! `(width - 1 - x) * height + y`.

use crate::palette::Palette;
use crate::raster::{RasterDecode, RasterError, RasterImage, RasterResult};
use tracing::debug;

/// Flat edge length
pub const FLAT_SIZE: u32 = 64;

/// Flat lump size in bytes
pub const FLAT_LUMP_SIZE: usize = 4096;

/// Sky width in pixels
pub const SKY_WIDTH: u32 = 256;

/// Sky height in pixels
pub const SKY_HEIGHT: u32 = 200;

/// Sky lump size in bytes
pub const SKY_LUMP_SIZE: usize = 51200;

/// 64x64 floor/ceiling texture
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flat {
    image: RasterImage,
}

impl RasterDecode for Flat {
    fn decode(data: &[u8], palette: &Palette) -> RasterResult<Self> {
        let image = decode_rotated(data, FLAT_SIZE, FLAT_SIZE, palette)?;
        Ok(Self { image })
    }

    fn image(&self) -> &RasterImage {
        &self.image
    }

    fn into_image(self) -> RasterImage {
        self.image
    }
}

/// 256x200 sky backdrop
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sky {
    image: RasterImage,
}

impl RasterDecode for Sky {
    fn decode(data: &[u8], palette: &Palette) -> RasterResult<Self> {
        let image = decode_rotated(data, SKY_WIDTH, SKY_HEIGHT, palette)?;
        Ok(Self { image })
    }

    fn image(&self) -> &RasterImage {
        &self.image
    }

    fn into_image(self) -> RasterImage {
        self.image
    }
}

fn decode_rotated(
    data: &[u8],
    width: u32,
    height: u32,
    palette: &Palette,
) -> RasterResult<RasterImage> {
    let expected = width as usize * height as usize;
    if data.len() != expected {
        return Err(RasterError::SizeMismatch {
            expected,
            actual: data.len(),
        });
    }

    let mut image = RasterImage::new(width, height);
    let column_len = height as usize;
    for x in 0..width {
        let column = &data[(width - 1 - x) as usize * column_len..][..column_len];
        for (y, &index) in column.iter().enumerate() {
            image.put(x, y as u32, palette.color_at(index));
        }
    }

    debug!("Decoded {}x{} transposed texture", width, height);
    Ok(image)
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::test_utils::gradient_palette;

    fn palette() -> Palette {
        Palette::from_raw(&gradient_palette()).expect("Operation should succeed")
    }

    #[test]
    fn test_flat_dimensions() {
        let flat = Flat::decode(&[1u8; FLAT_LUMP_SIZE], &palette()).expect("Operation should succeed");
        assert_eq!((flat.image().width(), flat.image().height()), (64, 64));
        assert_eq!(flat.image().transparent_count(), 0);
    }

    #[test]
    fn test_flat_rotation() {
        let palette = palette();
        let mut data = vec![1u8; FLAT_LUMP_SIZE];
        // First stored row ends up as the rightmost displayed column
        data[0] = 9;
        data[63] = 17;
        let flat = Flat::decode(&data, &palette).expect("Operation should succeed");

        assert_eq!(flat.image().pixel(63, 0), Some(palette.color_at(9)));
        assert_eq!(flat.image().pixel(63, 63), Some(palette.color_at(17)));
        assert_eq!(flat.image().pixel(0, 0), Some(palette.color_at(1)));
    }

    #[test]
    fn test_flat_wrong_size() {
        assert!(matches!(
            Flat::decode(&[0u8; 4095], &palette()),
            Err(RasterError::SizeMismatch {
                expected: 4096,
                actual: 4095
            })
        ));
        assert!(Flat::decode(&[0u8; 4097], &palette()).is_err());
    }

    #[test]
    fn test_sky_dimensions_and_orientation() {
        let palette = palette();
        let mut data = vec![2u8; SKY_LUMP_SIZE];
        // Stored column 255 (last 200 bytes) becomes displayed column 0
        data[SKY_LUMP_SIZE - 200] = 40;
        let sky = Sky::decode(&data, &palette).expect("Operation should succeed");

        assert_eq!((sky.image().width(), sky.image().height()), (256, 200));
        assert_eq!(sky.image().pixel(0, 0), Some(palette.color_at(40)));
        assert_eq!(sky.image().pixel(1, 0), Some(palette.color_at(2)));
    }

    #[test]
    fn test_sky_wrong_size() {
        assert!(Sky::decode(&[0u8; FLAT_LUMP_SIZE], &palette()).is_err());
    }
}
