//! 256-color palette with darkness and mask support
//!
//! A palette lump is 256 RGB triplets, 768 bytes, no header. Two settings
//! change how indices resolve:
//!
//! - **mask index** (default 255): the transparent sentinel; always resolves
//!   to the raw triplet at full opacity
//! - **alpha** (default 255): darkness level; anything below 255 ANDs every
//!   channel with the alpha value and sets the alpha channel to it
//!
//! Index 0 always resolves to the zero color. Changing either setting
//! recomputes the whole table.

mod color;
mod error;

pub use color::Rgba;
pub use error::{PaletteError, PaletteResult};

use crate::raster::RasterImage;
use tracing::debug;

/// Size of a raw palette lump in bytes
pub const PALETTE_SIZE: usize = 768;

/// Number of palette entries
pub const PALETTE_ENTRIES: usize = 256;

/// Default transparent index
pub const DEFAULT_MASK_INDEX: u8 = 255;

/// Alpha value meaning "no darkness"
pub const FULL_BRIGHT: u8 = 255;

/// Decoded palette
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    raw: Vec<u8>,
    colors: Vec<Rgba>,
    mask_index: u8,
    alpha: u8,
}

impl Palette {
    /// Build a palette from a raw 768-byte lump
    pub fn from_raw(data: &[u8]) -> PaletteResult<Self> {
        if !Self::is_palette(data) {
            return Err(PaletteError::WrongSize {
                expected: PALETTE_SIZE,
                actual: data.len(),
            });
        }

        let mut palette = Self {
            raw: data.to_vec(),
            colors: vec![Rgba::default(); PALETTE_ENTRIES],
            mask_index: DEFAULT_MASK_INDEX,
            alpha: FULL_BRIGHT,
        };
        palette.recompute();
        Ok(palette)
    }

    /// True when `data` has the exact size of a palette lump
    pub fn is_palette(data: &[u8]) -> bool {
        data.len() == PALETTE_SIZE
    }

    /// Color for palette index `index`
    pub fn color_at(&self, index: u8) -> Rgba {
        self.colors[usize::from(index)]
    }

    /// Color drawn for transparent pixels
    pub fn mask_color(&self) -> Rgba {
        self.color_at(self.mask_index)
    }

    /// Current transparent index
    pub fn mask_index(&self) -> u8 {
        self.mask_index
    }

    /// Current darkness level
    pub fn alpha(&self) -> u8 {
        self.alpha
    }

    /// Raw lump bytes
    pub fn raw(&self) -> &[u8] {
        &self.raw
    }

    /// All 256 resolved colors
    pub fn colors(&self) -> &[Rgba] {
        &self.colors
    }

    /// Change the transparent index and rebuild the table
    pub fn set_mask_index(&mut self, index: u8) {
        self.mask_index = index;
        self.recompute();
    }

    /// Change the darkness level and rebuild the table
    pub fn set_alpha(&mut self, alpha: u8) {
        self.alpha = alpha;
        self.recompute();
    }

    /// Builder-style [`Palette::set_mask_index`]
    pub fn with_mask_index(mut self, index: u8) -> Self {
        self.set_mask_index(index);
        self
    }

    /// Builder-style [`Palette::set_alpha`]
    pub fn with_alpha(mut self, alpha: u8) -> Self {
        self.set_alpha(alpha);
        self
    }

    /// 256x1 strip, pixel `x` is `color_at(x)`
    pub fn preview(&self) -> RasterImage {
        let mut image = RasterImage::new(PALETTE_ENTRIES as u32, 1);
        for (x, color) in self.colors.iter().enumerate() {
            image.put(x as u32, 0, *color);
        }
        image
    }

    fn recompute(&mut self) {
        for (index, slot) in self.colors.iter_mut().enumerate() {
            *slot = resolve(&self.raw, index, self.mask_index, self.alpha);
        }
        debug!(
            "Palette rebuilt (mask index {}, alpha {})",
            self.mask_index, self.alpha
        );
    }
}

fn resolve(raw: &[u8], index: usize, mask_index: u8, alpha: u8) -> Rgba {
    // Index 0 is never a valid lookup
    if index == 0 {
        return Rgba::default();
    }

    let base = index * 3;
    let (r, g, b) = (raw[base], raw[base + 1], raw[base + 2]);
    if index == usize::from(mask_index) || alpha == FULL_BRIGHT {
        Rgba::opaque(r, g, b)
    } else {
        Rgba::new(r & alpha, g & alpha, b & alpha, alpha)
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::test_utils::gradient_palette;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_wrong_size_rejected() {
        assert_eq!(
            Palette::from_raw(&[0u8; 767]),
            Err(PaletteError::WrongSize {
                expected: 768,
                actual: 767
            })
        );
        assert!(Palette::from_raw(&[0u8; 769]).is_err());
        assert!(Palette::is_palette(&[0u8; 768]));
    }

    #[test]
    fn test_single_red_entry() {
        let mut raw = vec![0u8; PALETTE_SIZE];
        raw[3] = 255;
        let palette = Palette::from_raw(&raw).expect("Operation should succeed");
        assert_eq!(palette.color_at(1), Rgba::new(255, 0, 0, 255));
    }

    #[test]
    fn test_index_zero_is_default() {
        let palette = Palette::from_raw(&[0xAB; PALETTE_SIZE]).expect("Operation should succeed");
        assert_eq!(palette.color_at(0), Rgba::default());
        assert_eq!(palette.color_at(1), Rgba::opaque(0xAB, 0xAB, 0xAB));
    }

    #[test]
    fn test_mask_index_is_raw_triplet() {
        let palette = Palette::from_raw(&gradient_palette()).expect("Operation should succeed");
        let raw = palette.raw();
        assert_eq!(
            palette.mask_color(),
            Rgba::opaque(raw[3 * 255], raw[3 * 255 + 1], raw[3 * 255 + 2])
        );
    }

    #[test]
    fn test_zero_alpha_blackens_everything_but_mask() {
        let palette = Palette::from_raw(&[0xFF; PALETTE_SIZE])
            .expect("Operation should succeed")
            .with_mask_index(7)
            .with_alpha(0);

        for index in 1..=255u8 {
            let color = palette.color_at(index);
            if index == 7 {
                assert_eq!(color, Rgba::opaque(0xFF, 0xFF, 0xFF));
            } else {
                assert_eq!(color, Rgba::new(0, 0, 0, 0));
            }
        }
    }

    #[test]
    fn test_darkness_is_bitwise_and() {
        let palette = Palette::from_raw(&[0b1011_0110; PALETTE_SIZE])
            .expect("Operation should succeed")
            .with_alpha(0b1111_0000);
        assert_eq!(
            palette.color_at(3),
            Rgba::new(0b1011_0000, 0b1011_0000, 0b1011_0000, 0b1111_0000)
        );
    }

    #[test]
    fn test_settings_recompute_table() {
        let mut palette = Palette::from_raw(&[0x0F; PALETTE_SIZE]).expect("Operation should succeed");
        palette.set_alpha(0);
        assert_eq!(palette.color_at(10).a, 0);
        palette.set_alpha(FULL_BRIGHT);
        assert_eq!(palette.color_at(10), Rgba::opaque(0x0F, 0x0F, 0x0F));
        assert_eq!(palette.alpha(), FULL_BRIGHT);
    }

    #[test]
    fn test_mask_index_zero_uses_default_color() {
        let palette = Palette::from_raw(&[0x40; PALETTE_SIZE])
            .expect("Operation should succeed")
            .with_mask_index(0);
        assert_eq!(palette.mask_color(), Rgba::default());
    }

    #[test]
    fn test_preview_strip() {
        let palette = Palette::from_raw(&gradient_palette()).expect("Operation should succeed");
        let preview = palette.preview();
        assert_eq!((preview.width(), preview.height()), (256, 1));
        assert_eq!(preview.pixel(1, 0), Some(palette.color_at(1)));
        assert_eq!(preview.pixel(200, 0), Some(palette.color_at(200)));
    }
}
