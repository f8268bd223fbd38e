//! Synthetic lump builders for unit tests

use crate::archive::WadBuilder;

/// Palette where every entry is distinct: `(i, i / 2, 255 - i)`
pub fn gradient_palette() -> Vec<u8> {
    (0..=255u8).flat_map(|i| [i, i / 2, 255 - i]).collect()
}

/// Flat whose first bytes cannot pass for a sprite header
pub fn flat_lump() -> Vec<u8> {
    (0..4096usize)
        .map(|i| if i < 8 { 0 } else { (i % 250 + 1) as u8 })
        .collect()
}

/// Patch lump with origin `(-2, <pixel bytes>)` and pixels from `pixel(x, y)`
pub fn patch_lump(width: u16, height: u16, pixel: impl Fn(usize, usize) -> u8) -> Vec<u8> {
    let mut data = Vec::new();
    data.extend_from_slice(&width.to_le_bytes());
    data.extend_from_slice(&height.to_le_bytes());
    data.extend_from_slice(&(-2i16).to_le_bytes());
    data.extend_from_slice(&[0, 0]);
    for x in 0..usize::from(width) {
        for y in 0..usize::from(height) {
            data.push(pixel(x, y));
        }
    }
    data
}

/// Pic lump in planar order with the zero trailer
pub fn pic_lump(plane_size: u8, height: u8, pixel: impl Fn(usize, usize) -> u8) -> Vec<u8> {
    let plane = usize::from(plane_size);
    let rows = usize::from(height);
    let width = plane * 4;

    let mut data = vec![0u8; 2 + width * rows + 2];
    data[0] = plane_size;
    data[1] = height;
    for x in 0..width {
        for y in 0..rows {
            data[2 + x / 4 + (x % 4) * rows * plane + y * plane] = pixel(x, y);
        }
    }
    data
}

/// Builder for masked and transmasked sprites
pub struct MaskedBuilder {
    width: u16,
    height: u16,
    left: i16,
    top: i16,
    trans_level: Option<u16>,
    columns: Vec<Vec<u8>>,
}

impl MaskedBuilder {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            left: 0,
            top: 0,
            trans_level: None,
            columns: vec![Vec::new(); usize::from(width)],
        }
    }

    pub fn offsets(mut self, left: i16, top: i16) -> Self {
        self.left = left;
        self.top = top;
        self
    }

    /// Switch to the 12-byte transmasked header
    pub fn trans_level(mut self, level: u16) -> Self {
        self.trans_level = Some(level);
        self
    }

    pub fn post(mut self, column: usize, row_start: u8, pixels: &[u8]) -> Self {
        let data = &mut self.columns[column];
        data.push(row_start);
        data.push(pixels.len() as u8);
        data.extend_from_slice(pixels);
        self
    }

    pub fn shaded_post(mut self, column: usize, row_start: u8, count: u8) -> Self {
        self.columns[column].extend_from_slice(&[row_start, count, 0xFE]);
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let header_size = if self.trans_level.is_some() { 12 } else { 10 };
        let orig_size = (u32::from(self.width) * u32::from(self.height)) as u16;

        let mut data = Vec::new();
        data.extend_from_slice(&orig_size.to_le_bytes());
        data.extend_from_slice(&self.width.to_le_bytes());
        data.extend_from_slice(&self.height.to_le_bytes());
        data.extend_from_slice(&self.left.to_le_bytes());
        data.extend_from_slice(&self.top.to_le_bytes());
        if let Some(level) = self.trans_level {
            data.extend_from_slice(&level.to_le_bytes());
        }

        let mut offset = header_size + 2 * self.columns.len();
        for column in &self.columns {
            data.extend_from_slice(&(offset as u16).to_le_bytes());
            offset += column.len() + 1;
        }
        for column in &self.columns {
            data.extend_from_slice(column);
            data.push(0xFF);
        }
        data
    }
}

/// Builder for VOC lumps
pub struct VocBuilder {
    version: u16,
    blocks: Vec<u8>,
}

impl Default for VocBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl VocBuilder {
    pub fn new() -> Self {
        Self {
            version: 0x010A,
            blocks: Vec::new(),
        }
    }

    pub fn version(mut self, version: u16) -> Self {
        self.version = version;
        self
    }

    pub fn raw_block(mut self, block_type: u8, body: &[u8]) -> Self {
        self.blocks.push(block_type);
        self.blocks
            .extend_from_slice(&(body.len() as u32).to_le_bytes()[..3]);
        self.blocks.extend_from_slice(body);
        self
    }

    /// Block 1: time constant, codec 0, 8-bit mono samples
    pub fn sound_block(self, time_constant: u8, samples: &[u8]) -> Self {
        let mut body = vec![time_constant, 0];
        body.extend_from_slice(samples);
        self.raw_block(1, &body)
    }

    /// Block 9: explicit format
    pub fn format_block(
        self,
        sample_rate: i32,
        bits: u8,
        channels: u8,
        codec: i16,
        samples: &[u8],
    ) -> Self {
        let mut body = Vec::new();
        body.extend_from_slice(&sample_rate.to_le_bytes());
        body.push(bits);
        body.push(channels);
        body.extend_from_slice(&codec.to_le_bytes());
        body.extend_from_slice(&[0; 4]);
        body.extend_from_slice(samples);
        self.raw_block(9, &body)
    }

    pub fn build(&self) -> Vec<u8> {
        let mut data = b"Creative Voice File".to_vec();
        data.push(0x1A);
        data.extend_from_slice(&26u16.to_le_bytes());
        data.extend_from_slice(&self.version.to_le_bytes());
        data.extend_from_slice(&(!self.version).wrapping_add(0x1234).to_le_bytes());
        data.extend_from_slice(&self.blocks);
        data.push(0);
        data
    }
}

/// Minimal standard MIDI file
pub fn midi_lump() -> Vec<u8> {
    b"MThd\0\0\0\x06\0\0\0\x01\0\x60MTrk\0\0\0\x04\0\xFF\x2F\0".to_vec()
}

/// A small archive with one lump of every kind
pub fn sample_wad() -> Vec<u8> {
    let mut ap_pal = gradient_palette();
    ap_pal.reverse();

    WadBuilder::new()
        .add_marker("WALLSTRT")
        .add_lump("WALL1", flat_lump())
        .add_marker("WALLSTOP")
        .add_lump("PAL", gradient_palette())
        .add_lump("AP_PAL", ap_pal)
        .add_lump("AP_WRLD", pic_lump(2, 4, |x, _| x as u8))
        .add_lump("COLORMAP", vec![3u8; 8192])
        .add_marker("MASKSTRT")
        .add_lump("SPRITE", MaskedBuilder::new(8, 8).post(2, 1, &[5, 6, 7]).build())
        .add_marker("MASKSTOP")
        .add_marker("DIGISTRT")
        .add_lump("SND1", VocBuilder::new().sound_block(0xA6, &[0x80; 64]).build())
        .add_marker("DIGISTOP")
        .add_marker("SONGSTRT")
        .add_lump("SONG1", midi_lump())
        .add_marker("PCSTART")
        .add_lump("PCSP1", vec![14, 0, 3, 0, 1, 2, 3, 4, 5])
        .add_marker("PCSTOP")
        .add_lump("LICENSE", b"Copyright Apogee".to_vec())
        .add_lump("MYSTERY", vec![9u8; 33])
        .add_marker("NOTHING")
        .build()
        .expect("Synthetic WAD should build")
}
