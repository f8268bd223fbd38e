//! Text, JSON and PNG rendering of browser results.

use crate::error::CliError;
use png::{BitDepth, ColorType, Encoder};
use rott_wad::audio::Tone;
use rott_wad::{DecodedLump, LoadedLump, LumpInfo, MarkerController, RasterImage};
use serde::Serialize;
use std::fmt::Write as _;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Bytes shown in the hex preview of unknown lumps
pub const HEX_PREVIEW_LEN: usize = 32;

/// Encode `image` as an 8-bit RGBA PNG at `path`.
pub fn write_png(path: &Path, image: &RasterImage) -> Result<(), CliError> {
    let writer = BufWriter::new(File::create(path)?);
    let mut encoder = Encoder::new(writer, image.width(), image.height());
    encoder.set_color(ColorType::Rgba);
    encoder.set_depth(BitDepth::Eight);
    let mut writer = encoder.write_header()?;
    writer.write_image_data(&image.to_rgba_bytes())?;
    writer.finish()?;
    Ok(())
}

/// Directory listing as an aligned table.
pub fn listing_table(lumps: &[LumpInfo]) -> String {
    let mut table = format!("{:>5}  {:<8}  {:>10}  {:>8}  {}\n", "ID", "NAME", "OFFSET", "SIZE", "KIND");
    for lump in lumps {
        let _ = writeln!(
            table,
            "{:>5}  {:<8}  {:>10}  {:>8}  {}",
            lump.entry.id, lump.entry.name, lump.entry.offset, lump.entry.size, lump.kind
        );
    }
    table
}

/// Directory listing as pretty-printed JSON.
pub fn listing_json(lumps: &[LumpInfo]) -> Result<String, CliError> {
    Ok(serde_json::to_string_pretty(lumps)?)
}

/// One line per marker.
pub fn marker_table(markers: &MarkerController) -> String {
    let mut table = String::new();
    for marker in markers.markers() {
        let _ = writeln!(table, "{:>5}  {}", marker.id, marker.name);
    }
    table
}

/// Everything worth printing about a decoded lump.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LumpDetails {
    /// Directory name
    pub name: String,
    /// Directory position
    pub id: usize,
    /// Data offset
    pub offset: u32,
    /// Data size
    pub size: u32,
    /// Classified kind
    pub kind: String,
    /// Enclosing section marker, if any
    pub section: Option<String>,
    /// Kind-specific facts as `(label, value)` pairs
    pub facts: Vec<(String, String)>,
}

impl LumpDetails {
    /// Describe `lump`, which lives in `section`.
    pub fn new(lump: &LoadedLump, section: Option<&str>) -> Self {
        Self {
            name: lump.entry.name.clone(),
            id: lump.entry.id,
            offset: lump.entry.offset,
            size: lump.entry.size,
            kind: lump.kind.to_string(),
            section: section.map(str::to_string),
            facts: facts(&lump.decoded),
        }
    }
}

impl std::fmt::Display for LumpDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{:<12}{}", "name", self.name)?;
        writeln!(f, "{:<12}{}", "id", self.id)?;
        writeln!(f, "{:<12}{}", "offset", self.offset)?;
        writeln!(f, "{:<12}{}", "size", self.size)?;
        writeln!(f, "{:<12}{}", "kind", self.kind)?;
        if let Some(section) = &self.section {
            writeln!(f, "{:<12}{}", "section", section)?;
        }
        for (label, value) in &self.facts {
            writeln!(f, "{label:<12}{value}")?;
        }
        Ok(())
    }
}

fn fact(label: &str, value: impl ToString) -> (String, String) {
    (label.to_string(), value.to_string())
}

fn facts(decoded: &DecodedLump) -> Vec<(String, String)> {
    let mut facts = Vec::new();
    if let Some(image) = decoded.image() {
        facts.push(fact("dimensions", format!("{}x{}", image.width(), image.height())));
        facts.push(fact("transparent", image.transparent_count()));
    }

    match decoded {
        DecodedLump::Palette(palette) => {
            facts.push(fact("mask index", palette.mask_index()));
            facts.push(fact("alpha", palette.alpha()));
        }
        DecodedLump::Colormap(colormap) => {
            facts.push(fact("tables", colormap.tables().len()));
        }
        DecodedLump::Pic(pic) => {
            facts.push(fact("plane size", pic.plane_size));
        }
        DecodedLump::Patch(patch) => {
            let header = &patch.header;
            facts.push(fact("origin", format!("{}, {}", header.origin_x, header.origin_y)));
        }
        DecodedLump::Masked(sprite) => {
            let header = &sprite.header;
            facts.push(fact("offset", format!("{}, {}", header.left_offset, header.top_offset)));
            facts.push(fact("orig size", header.orig_size));
        }
        DecodedLump::TransMasked(sprite) => {
            let header = &sprite.header;
            facts.push(fact("offset", format!("{}, {}", header.left_offset, header.top_offset)));
            facts.push(fact("orig size", header.orig_size));
            facts.push(fact("translucency", header.trans_level));
        }
        DecodedLump::Sound(sound) => {
            let pcm = &sound.pcm;
            facts.push(fact("version", format!("{:#06x}", sound.header.version)));
            facts.push(fact("sample rate", format!("{} Hz", pcm.sample_rate)));
            facts.push(fact("format", format!("{} bit, {} channel(s)", pcm.bits_per_sample, pcm.channels)));
            facts.push(fact("samples", pcm.samples.len()));
            facts.push(fact("duration", format!("{} ms", pcm.duration_ms())));
        }
        DecodedLump::Music(song) => {
            if let Some(header) = &song.header {
                facts.push(fact("format", header.format));
                facts.push(fact("tracks", header.tracks));
                facts.push(fact("division", header.division));
            }
        }
        DecodedLump::PcSpeaker(sound) => {
            let tones = sound
                .events()
                .filter(|event| event.tone != Tone::Silence)
                .count();
            facts.push(fact("priority", sound.priority));
            facts.push(fact("notes", sound.notes().len()));
            facts.push(fact("tones", tones));
            facts.push(fact("duration", format!("{} ms", sound.duration_ms())));
        }
        DecodedLump::Ascii(text) => {
            facts.push(fact("text", text.trimmed().lines().next().unwrap_or_default()));
        }
        DecodedLump::Unknown(lump) => {
            facts.push(fact("bytes", lump.hex_preview(HEX_PREVIEW_LEN)));
        }
        DecodedLump::Flat(_) | DecodedLump::Sky(_) => {}
    }

    facts
}
