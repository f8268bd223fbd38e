//! Decode configuration and palette selection

use crate::palette::{Palette, PaletteResult};
use serde::{Deserialize, Serialize};

/// Palette lump used for everything except the Apogee logo screens
pub const DEFAULT_PALETTE: &str = "PAL";

/// Palette lump of the Apogee logo screens
pub const APOGEE_PALETTE: &str = "AP_PAL";

/// Lumps drawn with [`APOGEE_PALETTE`]
pub const APOGEE_LUMPS: [&str; 2] = ["AP_WRLD", "AP_TITL"];

/// Mask index of the Apogee logo screens
pub const APOGEE_MASK_INDEX: u8 = 0;

/// Settings applied when decoding lumps
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodeOptions {
    /// Darkness (palette alpha) applied to every raster, `None` for full bright
    pub darkness: Option<u8>,
    /// Transparent index override, `None` keeps 255
    pub mask_index: Option<u8>,
    /// Palette lump for ordinary rasters
    pub default_palette: String,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            darkness: None,
            mask_index: None,
            default_palette: DEFAULT_PALETTE.to_string(),
        }
    }
}

impl DecodeOptions {
    /// Set the darkness level
    pub fn with_darkness(mut self, darkness: u8) -> Self {
        self.darkness = Some(darkness);
        self
    }

    /// Set the transparent index
    pub fn with_mask_index(mut self, index: u8) -> Self {
        self.mask_index = Some(index);
        self
    }

    /// Use another palette lump for ordinary rasters
    pub fn with_default_palette(mut self, name: impl Into<String>) -> Self {
        self.default_palette = name.into();
        self
    }

    /// Name of the palette lump that draws `lump`
    pub fn palette_lump_for(&self, lump: &str) -> &str {
        if is_apogee_lump(lump) {
            APOGEE_PALETTE
        } else {
            &self.default_palette
        }
    }

    /// Build the palette for `lump` from the raw palette lump
    ///
    /// Mask index first (the Apogee screens force index 0), darkness second.
    pub fn build_palette(&self, lump: &str, raw: &[u8]) -> PaletteResult<Palette> {
        let mut palette = Palette::from_raw(raw)?;

        let mask_index = if is_apogee_lump(lump) {
            Some(APOGEE_MASK_INDEX)
        } else {
            self.mask_index
        };
        if let Some(index) = mask_index {
            palette.set_mask_index(index);
        }
        if let Some(darkness) = self.darkness {
            palette.set_alpha(darkness);
        }

        Ok(palette)
    }
}

fn is_apogee_lump(name: &str) -> bool {
    APOGEE_LUMPS.iter().any(|lump| name.eq_ignore_ascii_case(lump))
}
