//! Light-level shade tables
//!
//! 32 tables of 256 palette indices. Tables are addressed with a stride of
//! 255 bytes, so consecutive tables overlap by one byte.

use crate::palette::Palette;
use crate::raster::{RasterDecode, RasterError, RasterImage, RasterResult};
use tracing::debug;

/// Colormap lump size in bytes
pub const COLORMAP_SIZE: usize = 8192;

/// Number of shade tables
pub const TABLE_COUNT: usize = 32;

/// Entries per table
pub const TABLE_LEN: usize = 256;

/// Distance between the starts of consecutive tables
pub const TABLE_STRIDE: usize = 0xFF;

/// Shade tables plus a 256x32 diagnostic image, one row per table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Colormap {
    tables: Vec<[u8; TABLE_LEN]>,
    image: RasterImage,
}

impl Colormap {
    /// Split a colormap lump into its shade tables
    pub fn parse_tables(data: &[u8]) -> RasterResult<Vec<[u8; TABLE_LEN]>> {
        if data.len() != COLORMAP_SIZE {
            return Err(RasterError::SizeMismatch {
                expected: COLORMAP_SIZE,
                actual: data.len(),
            });
        }

        Ok((0..TABLE_COUNT)
            .map(|t| {
                let mut table = [0u8; TABLE_LEN];
                table.copy_from_slice(&data[t * TABLE_STRIDE..t * TABLE_STRIDE + TABLE_LEN]);
                table
            })
            .collect())
    }

    /// Shade table `index`, 0..32
    pub fn table(&self, index: usize) -> Option<&[u8; TABLE_LEN]> {
        self.tables.get(index)
    }

    /// All shade tables
    pub fn tables(&self) -> &[[u8; TABLE_LEN]] {
        &self.tables
    }

    /// One table rendered as a 256x1 strip
    pub fn table_image(&self, index: usize) -> Option<RasterImage> {
        u32::try_from(index).ok().and_then(|row| self.image.row(row))
    }
}

impl RasterDecode for Colormap {
    fn decode(data: &[u8], palette: &Palette) -> RasterResult<Self> {
        let tables = Self::parse_tables(data)?;

        let mut image = RasterImage::new(TABLE_LEN as u32, TABLE_COUNT as u32);
        for (row, table) in tables.iter().enumerate() {
            for (shade, &index) in table.iter().enumerate() {
                image.put(shade as u32, row as u32, palette.color_at(index));
            }
        }

        debug!("Decoded colormap ({} tables)", tables.len());
        Ok(Self { tables, image })
    }

    fn image(&self) -> &RasterImage {
        &self.image
    }

    fn into_image(self) -> RasterImage {
        self.image
    }
}
