//! Masked sprites: column offsets followed by run-length posts
//!
//! ```text
//! header (10 bytes)   orig_size, width, height, left_offset, top_offset
//! offsets             width x u16, absolute offset of each column
//! column              { row_start:u8, count:u8, count x pixel } ... 0xFF
//! ```

use crate::palette::Palette;
use crate::raster::{
    POST_END, RasterDecode, RasterError, RasterImage, RasterResult, byte_at, u16_at,
};
use binrw::io::Cursor;
use binrw::{BinRead, BinWrite};
use serde::Serialize;
use tracing::debug;

/// Size of the masked header
pub const MASKED_HEADER_SIZE: usize = 10;

/// Masked sprite header
#[derive(Debug, Clone, Copy, PartialEq, Eq, BinRead, BinWrite, Serialize)]
#[brw(little)]
pub struct MaskedHeader {
    /// Size of the source graphic
    pub orig_size: u16,
    /// Width in pixels
    pub width: u16,
    /// Height in pixels
    pub height: u16,
    /// Horizontal draw offset
    pub left_offset: i16,
    /// Vertical draw offset
    pub top_offset: i16,
}

impl MaskedHeader {
    /// Parse the header from the start of a lump
    pub fn parse(data: &[u8]) -> RasterResult<Self> {
        if data.len() < MASKED_HEADER_SIZE {
            return Err(RasterError::SizeMismatch {
                expected: MASKED_HEADER_SIZE,
                actual: data.len(),
            });
        }
        Ok(Self::read(&mut Cursor::new(data))?)
    }
}

/// Decoded masked sprite
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaskedSprite {
    /// Parsed header
    pub header: MaskedHeader,
    image: RasterImage,
}

impl RasterDecode for MaskedSprite {
    fn decode(data: &[u8], palette: &Palette) -> RasterResult<Self> {
        let header = MaskedHeader::parse(data)?;
        let mut image = masked_canvas(data, header.width, header.height, MASKED_HEADER_SIZE, palette)?;

        for x in 0..header.width {
            let mut pos = usize::from(u16_at(data, MASKED_HEADER_SIZE + 2 * usize::from(x))?);
            loop {
                let row_start = byte_at(data, pos)?;
                if row_start == POST_END {
                    break;
                }
                let count = byte_at(data, pos + 1)?;
                if u16::from(row_start) + u16::from(count) > header.height {
                    break;
                }
                pos += 2;
                for i in 0..count {
                    let index = byte_at(data, pos + usize::from(i))?;
                    image.put_indexed(
                        u32::from(x),
                        u32::from(row_start) + u32::from(i),
                        palette,
                        index,
                    );
                }
                pos += usize::from(count);
            }
        }

        debug!(
            "Decoded {}x{} masked sprite, offset ({}, {})",
            header.width, header.height, header.left_offset, header.top_offset
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

/// Validate dimensions and the column offset table, then allocate a
/// mask-filled canvas
pub(crate) fn masked_canvas(
    data: &[u8],
    width: u16,
    height: u16,
    header_size: usize,
    palette: &Palette,
) -> RasterResult<RasterImage> {
    if width == 0 || height == 0 {
        return Err(RasterError::invalid_header(format!(
            "sprite is {width}x{height}"
        )));
    }

    let table_end = header_size + 2 * usize::from(width);
    if data.len() < table_end {
        return Err(RasterError::SizeMismatch {
            expected: table_end,
            actual: data.len(),
        });
    }

    Ok(RasterImage::masked(
        u32::from(width),
        u32::from(height),
        palette.mask_color(),
    ))
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::test_utils::{MaskedBuilder, gradient_palette};

    fn palette() -> Palette {
        Palette::from_raw(&gradient_palette()).expect("Operation should succeed")
    }

    #[test]
    fn test_header_parse() {
        let data = MaskedBuilder::new(3, 4).offsets(-1, 2).build();
        let header = MaskedHeader::parse(&data).expect("Operation should succeed");
        assert_eq!(header.width, 3);
        assert_eq!(header.height, 4);
        assert_eq!(header.left_offset, -1);
        assert_eq!(header.top_offset, 2);
    }

    #[test]
    fn test_header_field_positions() {
        let data = [
            0x40, 0x00, // orig_size
            0x08, 0x00, // width
            0x10, 0x00, // height
            0xFC, 0xFF, // left_offset
            0x05, 0x00, // top_offset
        ];
        let header = MaskedHeader::parse(&data).expect("Operation should succeed");
        assert_eq!(header.orig_size, 64);
        assert_eq!((header.width, header.height), (8, 16));
        assert_eq!((header.left_offset, header.top_offset), (-4, 5));
    }

    #[test]
    fn test_empty_column_is_all_mask() {
        let palette = palette();
        let data = MaskedBuilder::new(2, 4)
            .post(1, 1, &[7, 8])
            .build();
        let sprite = MaskedSprite::decode(&data, &palette).expect("Operation should succeed");

        for y in 0..4 {
            assert!(sprite.image().is_transparent(0, y));
            assert_eq!(sprite.image().pixel(0, y), Some(palette.mask_color()));
        }
        assert!(sprite.image().is_transparent(1, 0));
        assert_eq!(sprite.image().pixel(1, 1), Some(palette.color_at(7)));
        assert_eq!(sprite.image().pixel(1, 2), Some(palette.color_at(8)));
        assert!(sprite.image().is_transparent(1, 3));
    }

    #[test]
    fn test_multiple_posts() {
        let palette = palette();
        let data = MaskedBuilder::new(1, 6)
            .post(0, 0, &[1])
            .post(0, 4, &[2, 3])
            .build();
        let sprite = MaskedSprite::decode(&data, &palette).expect("Operation should succeed");

        assert_eq!(sprite.image().pixel(0, 0), Some(palette.color_at(1)));
        assert!(sprite.image().is_transparent(0, 1));
        assert_eq!(sprite.image().pixel(0, 5), Some(palette.color_at(3)));
        assert_eq!(sprite.image().transparent_count(), 3);
    }

    #[test]
    fn test_post_past_height_ends_column() {
        let palette = palette();
        let data = MaskedBuilder::new(1, 4)
            .post(0, 0, &[1])
            .post(0, 3, &[2, 3])
            .post(0, 1, &[4])
            .build();
        let sprite = MaskedSprite::decode(&data, &palette).expect("Operation should succeed");

        assert_eq!(sprite.image().pixel(0, 0), Some(palette.color_at(1)));
        // Everything after the oversized post is ignored
        assert!(sprite.image().is_transparent(0, 1));
        assert!(sprite.image().is_transparent(0, 3));
    }

    #[test]
    fn test_truncated_post_is_error() {
        let palette = palette();
        let mut data = MaskedBuilder::new(1, 8).post(0, 0, &[1, 2, 3, 4]).build();
        data.truncate(data.len() - 3);
        assert!(matches!(
            MaskedSprite::decode(&data, &palette),
            Err(RasterError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn test_short_offset_table() {
        let palette = palette();
        let mut data = MaskedBuilder::new(4, 4).build();
        data.truncate(MASKED_HEADER_SIZE + 3);
        assert!(matches!(
            MaskedSprite::decode(&data, &palette),
            Err(RasterError::SizeMismatch { expected: 18, .. })
        ));
    }
}
