//! Translucent masked sprites
//!
//! Same column/post layout as [`crate::raster::masked`] with a 12-byte
//! header. A post whose first data byte is `0xFE` is a shading post: it
//! carries no pixel bytes and draws every pixel with palette index 32.

use crate::palette::Palette;
use crate::raster::masked::masked_canvas;
use crate::raster::{
    POST_END, RasterDecode, RasterError, RasterImage, RasterResult, byte_at, u16_at,
};
use binrw::io::Cursor;
use binrw::{BinRead, BinWrite};
use serde::Serialize;
use tracing::debug;

/// Size of the transmasked header
pub const TRANS_MASKED_HEADER_SIZE: usize = 12;

/// Marker byte of a shading post
pub const SHADE_POST: u8 = 0xFE;

/// Palette index used to draw shading posts
pub const SHADE_INDEX: u8 = 32;

/// Translucency levels that identify a transmasked lump
pub const TRANSLUCENCY_LEVELS: [u16; 2] = [21, 34];

/// Transmasked sprite header
#[derive(Debug, Clone, Copy, PartialEq, Eq, BinRead, BinWrite, Serialize)]
#[brw(little)]
pub struct TransMaskedHeader {
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
    /// Translucency level, 21 or 34 in shipped data
    pub trans_level: u16,
}

impl TransMaskedHeader {
    /// Parse the header from the start of a lump
    pub fn parse(data: &[u8]) -> RasterResult<Self> {
        if data.len() < TRANS_MASKED_HEADER_SIZE {
            return Err(RasterError::SizeMismatch {
                expected: TRANS_MASKED_HEADER_SIZE,
                actual: data.len(),
            });
        }
        Ok(Self::read(&mut Cursor::new(data))?)
    }
}

/// Decoded transmasked sprite
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransMaskedSprite {
    /// Parsed header
    pub header: TransMaskedHeader,
    image: RasterImage,
}

impl RasterDecode for TransMaskedSprite {
    fn decode(data: &[u8], palette: &Palette) -> RasterResult<Self> {
        let header = TransMaskedHeader::parse(data)?;
        let mut image = masked_canvas(
            data,
            header.width,
            header.height,
            TRANS_MASKED_HEADER_SIZE,
            palette,
        )?;

        for x in 0..header.width {
            let column = u32::from(x);
            let mut pos =
                usize::from(u16_at(data, TRANS_MASKED_HEADER_SIZE + 2 * usize::from(x))?);
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
                if count == 0 {
                    continue;
                }

                let top = u32::from(row_start);
                if byte_at(data, pos)? == SHADE_POST {
                    for i in 0..u32::from(count) {
                        image.put_indexed(column, top + i, palette, SHADE_INDEX);
                    }
                    pos += 1;
                } else {
                    for i in 0..count {
                        let index = byte_at(data, pos + usize::from(i))?;
                        image.put_indexed(column, top + u32::from(i), palette, index);
                    }
                    pos += usize::from(count);
                }
            }
        }

        debug!(
            "Decoded {}x{} transmasked sprite, level {}",
            header.width, header.height, header.trans_level
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
        let data = MaskedBuilder::new(2, 2).trans_level(34).build();
        let header = TransMaskedHeader::parse(&data).expect("Operation should succeed");
        assert_eq!(header.trans_level, 34);
        assert_eq!(header.width, 2);
    }

    #[test]
    fn test_shade_post() {
        let palette = palette();
        let data = MaskedBuilder::new(1, 5)
            .trans_level(21)
            .shaded_post(0, 1, 3)
            .build();
        let sprite = TransMaskedSprite::decode(&data, &palette).expect("Operation should succeed");

        assert!(sprite.image().is_transparent(0, 0));
        for y in 1..4 {
            assert_eq!(sprite.image().pixel(0, y), Some(palette.color_at(SHADE_INDEX)));
        }
        assert!(sprite.image().is_transparent(0, 4));
    }

    #[test]
    fn test_regular_post_after_shade_post() {
        let palette = palette();
        let data = MaskedBuilder::new(1, 6)
            .trans_level(21)
            .shaded_post(0, 0, 2)
            .post(0, 3, &[9, 10])
            .build();
        let sprite = TransMaskedSprite::decode(&data, &palette).expect("Operation should succeed");

        assert_eq!(sprite.image().pixel(0, 1), Some(palette.color_at(SHADE_INDEX)));
        assert!(sprite.image().is_transparent(0, 2));
        assert_eq!(sprite.image().pixel(0, 3), Some(palette.color_at(9)));
        assert_eq!(sprite.image().pixel(0, 4), Some(palette.color_at(10)));
    }

    #[test]
    fn test_truncated_header() {
        assert!(matches!(
            TransMaskedSprite::decode(&[0u8; 11], &palette()),
            Err(RasterError::SizeMismatch { expected: 12, .. })
        ));
    }
}
