//! Content sniffing
//!
//! Lumps carry no type tag. [`classify`] runs a fixed sequence of structural
//! checks and the first match wins; several formats share sizes or header
//! shapes, so the order is significant:
//!
//! 1. sky size
//! 2. pic header and trailer
//! 3. patch header
//! 4. colormap size
//! 5. masked header
//! 6. transmasked header
//! 7. flat size
//! 8. palette size
//! 9. VOC signature
//! 10. MIDI signature

use crate::audio::{is_midi, is_voc};
use crate::lump::LumpKind;
use crate::palette::Palette;
use crate::raster::colormap::COLORMAP_SIZE;
use crate::raster::masked::MASKED_HEADER_SIZE;
use crate::raster::modex::{FLAT_LUMP_SIZE, SKY_LUMP_SIZE};
use crate::raster::patch::PATCH_HEADER_SIZE;
use crate::raster::pic::PIC_HEADER_SIZE;
use crate::raster::transmasked::{TRANS_MASKED_HEADER_SIZE, TRANSLUCENCY_LEVELS};

/// Lump names that hold plain text
pub const ASCII_LUMP_NAMES: [&str; 6] = [
    "VENDOR", "TABLES", "GUSMIDI", "SHARTITL", "SHARTIT2", "LICENSE",
];

/// Pixel counts a patch header may declare, truncated to 16 bits
pub const PATCH_PIXEL_COUNTS: [u16; 3] = [16384, 45504, 64000];

/// Largest patch width
pub const PATCH_MAX_WIDTH: u16 = 320;

/// Largest patch height
pub const PATCH_MAX_HEIGHT: u16 = 200;

/// Largest pic plane size (320 pixels wide)
pub const PIC_MAX_PLANE_SIZE: u8 = 80;

/// Size of the zero trailer after pic data
pub const PIC_TRAILER_SIZE: usize = 2;

/// Smallest masked dimension
pub const MASKED_MIN_DIMENSION: u16 = 3;

/// Masked dimensions must stay below this
pub const MASKED_MAX_DIMENSION: u16 = 2048;

/// Masked lumps with a translucency level are only rejected at this size
pub const TRANS_MIN_DIMENSION: u16 = 64;

/// Classify lump contents
pub fn classify(data: &[u8]) -> LumpKind {
    if data.is_empty() {
        LumpKind::Unknown
    } else if is_sky(data) {
        LumpKind::Sky
    } else if is_pic(data) {
        LumpKind::Pic
    } else if is_patch(data) {
        LumpKind::Patch
    } else if is_colormap(data) {
        LumpKind::Colormap
    } else if is_masked(data) {
        LumpKind::Masked
    } else if is_trans_masked(data) {
        LumpKind::TransMasked
    } else if is_flat(data) {
        LumpKind::Flat
    } else if Palette::is_palette(data) {
        LumpKind::Palette
    } else if is_voc(data) {
        LumpKind::Sound
    } else if is_midi(data) {
        LumpKind::Music
    } else {
        LumpKind::Unknown
    }
}

/// Text lumps recognized by name
pub fn classify_by_name(name: &str) -> Option<LumpKind> {
    ASCII_LUMP_NAMES
        .iter()
        .any(|ascii| name.eq_ignore_ascii_case(ascii))
        .then_some(LumpKind::Ascii)
}

/// Content classification with the name rule as fallback for unknown data
pub fn classify_named(name: &str, data: &[u8]) -> LumpKind {
    match classify(data) {
        LumpKind::Unknown => classify_by_name(name).unwrap_or(LumpKind::Unknown),
        kind => kind,
    }
}

/// Exactly one sky worth of bytes
pub fn is_sky(data: &[u8]) -> bool {
    data.len() == SKY_LUMP_SIZE
}

/// Exactly one flat worth of bytes
pub fn is_flat(data: &[u8]) -> bool {
    data.len() == FLAT_LUMP_SIZE
}

/// Exactly one colormap worth of bytes
pub fn is_colormap(data: &[u8]) -> bool {
    data.len() == COLORMAP_SIZE
}

/// Pic header, data size and zero trailer agree
pub fn is_pic(data: &[u8]) -> bool {
    if data.len() <= PIC_HEADER_SIZE {
        return false;
    }

    let plane_size = data[0];
    let height = usize::from(data[1]);
    let width = usize::from(plane_size) * 4;
    width * height + PIC_HEADER_SIZE + PIC_TRAILER_SIZE == data.len()
        && plane_size <= PIC_MAX_PLANE_SIZE
        && data[data.len() - 2..] == [0, 0]
}

/// Patch header declares a known pixel count that matches the lump size
pub fn is_patch(data: &[u8]) -> bool {
    if data.len() <= PATCH_HEADER_SIZE {
        return false;
    }

    let width = u16::from_le_bytes([data[0], data[1]]);
    let height = u16::from_le_bytes([data[2], data[3]]);
    let pixels = usize::from(width) * usize::from(height);
    // Pixel count compared as a 16-bit value, as the game tools store it
    let truncated = pixels as u16;

    PATCH_PIXEL_COUNTS.contains(&truncated)
        && width <= PATCH_MAX_WIDTH
        && height <= PATCH_MAX_HEIGHT
        && pixels + PATCH_HEADER_SIZE == data.len()
}

/// Plausible masked header that does not look like a transmasked one
pub fn is_masked(data: &[u8]) -> bool {
    if data.len() <= MASKED_HEADER_SIZE {
        return false;
    }

    let Some((width, height)) = sprite_dimensions(data) else {
        return false;
    };

    let translucent = u16_at(data, 10).is_some_and(|level| TRANSLUCENCY_LEVELS.contains(&level));
    !(translucent && width >= TRANS_MIN_DIMENSION && height >= TRANS_MIN_DIMENSION)
}

/// Plausible transmasked header
///
/// The column sanity pass compares single offset-table bytes against the
/// lump length. A byte can never exceed most lump lengths, so the pass only
/// ever turns a short-table rejection back into a match.
pub fn is_trans_masked(data: &[u8]) -> bool {
    if data.len() <= TRANS_MASKED_HEADER_SIZE {
        return false;
    }

    let Some((width, _)) = sprite_dimensions(data) else {
        return false;
    };
    if !u16_at(data, 10).is_some_and(|level| TRANSLUCENCY_LEVELS.contains(&level)) {
        return false;
    }

    let columns = usize::from(width);
    let table_end = TRANS_MASKED_HEADER_SIZE + columns * 2;
    let mut plausible = data.len() >= table_end;
    for c in 0..columns {
        let Some(&byte) = data.get(TRANS_MASKED_HEADER_SIZE + c) else {
            break;
        };
        let byte = usize::from(byte);
        if byte > data.len() || byte < columns + TRANS_MASKED_HEADER_SIZE {
            plausible = true;
        }
    }
    plausible
}

fn sprite_dimensions(data: &[u8]) -> Option<(u16, u16)> {
    let width = u16_at(data, 2)?;
    let height = u16_at(data, 4)?;
    let range = MASKED_MIN_DIMENSION..MASKED_MAX_DIMENSION;
    (range.contains(&width) && range.contains(&height)).then_some((width, height))
}

fn u16_at(data: &[u8], offset: usize) -> Option<u16> {
    match data.get(offset..offset + 2)? {
        &[lo, hi] => Some(u16::from_le_bytes([lo, hi])),
        _ => None,
    }
}
