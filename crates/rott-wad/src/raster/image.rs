//! Decoded pixel grid

use crate::palette::{Palette, Rgba};

/// Decoded raster: row-major RGBA pixels plus a transparency flag per pixel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    width: u32,
    height: u32,
    pixels: Vec<Rgba>,
    transparent: Vec<bool>,
}

impl RasterImage {
    /// Opaque image filled with the zero color
    pub fn new(width: u32, height: u32) -> Self {
        let len = width as usize * height as usize;
        Self {
            width,
            height,
            pixels: vec![Rgba::default(); len],
            transparent: vec![false; len],
        }
    }

    /// Image where every pixel is `color` and flagged transparent
    pub fn masked(width: u32, height: u32, color: Rgba) -> Self {
        let len = width as usize * height as usize;
        Self {
            width,
            height,
            pixels: vec![color; len],
            transparent: vec![true; len],
        }
    }

    /// Width in pixels
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Row-major pixel colors
    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    /// Color at `(x, y)`, `None` outside the image
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        self.offset(x, y).map(|i| self.pixels[i])
    }

    /// True when `(x, y)` is a transparent pixel
    pub fn is_transparent(&self, x: u32, y: u32) -> bool {
        self.offset(x, y).is_some_and(|i| self.transparent[i])
    }

    /// Number of transparent pixels
    pub fn transparent_count(&self) -> usize {
        self.transparent.iter().filter(|&&t| t).count()
    }

    /// Set an opaque pixel; writes outside the image are ignored
    pub fn put(&mut self, x: u32, y: u32, color: Rgba) {
        if let Some(i) = self.offset(x, y) {
            self.pixels[i] = color;
            self.transparent[i] = false;
        }
    }

    /// Set a pixel from a palette index
    ///
    /// The pixel is flagged transparent when `index` is the palette's mask
    /// index.
    pub fn put_indexed(&mut self, x: u32, y: u32, palette: &Palette, index: u8) {
        if let Some(i) = self.offset(x, y) {
            self.pixels[i] = palette.color_at(index);
            self.transparent[i] = index == palette.mask_index();
        }
    }

    /// Copy of row `y` as a `width`x1 image
    pub fn row(&self, y: u32) -> Option<Self> {
        if y >= self.height {
            return None;
        }
        let start = y as usize * self.width as usize;
        let end = start + self.width as usize;
        Some(Self {
            width: self.width,
            height: 1,
            pixels: self.pixels[start..end].to_vec(),
            transparent: self.transparent[start..end].to_vec(),
        })
    }

    /// Flatten to RGBA8 bytes; transparent pixels get alpha 0
    pub fn to_rgba_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.pixels.len() * 4);
        for (color, &transparent) in self.pixels.iter().zip(&self.transparent) {
            let alpha = if transparent { 0 } else { color.a };
            out.extend_from_slice(&[color.r, color.g, color.b, alpha]);
        }
        out
    }

    fn offset(&self, x: u32, y: u32) -> Option<usize> {
        (x < self.width && y < self.height)
            .then(|| y as usize * self.width as usize + x as usize)
    }
}
