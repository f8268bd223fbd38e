//! Byte exports of decoded lumps
//!
//! | Kind                   | Export                    |
//! |------------------------|---------------------------|
//! | Sound                  | `.wav` (or raw `.voc`)    |
//! | Music                  | `.mid`, byte for byte     |
//! | Ascii                  | `.txt`, byte for byte     |
//! | everything non-raster  | `.lmp`, byte for byte     |
//!
//! Rasters have no byte export here; image encoding is left to the caller.
//! File names are the lower-cased lump name plus extension, and empty lumps
//! produce no export.

use crate::lump::{DecodedLump, LumpResult};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Extension of a raw VOC dump
pub const VOC_EXTENSION: &str = "voc";

/// Extension of a raw lump dump
pub const RAW_EXTENSION: &str = "lmp";

/// A file ready to be written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LumpExport {
    /// Lower-case file name with extension
    pub file_name: String,
    /// File contents
    pub data: Vec<u8>,
}

impl LumpExport {
    /// Export named after `lump` with extension `ext`
    pub fn new(lump: &str, ext: &str, data: Vec<u8>) -> Self {
        Self {
            file_name: export_file_name(lump, ext),
            data,
        }
    }

    /// Write into `dir`, returning the full path
    pub fn write_to(&self, dir: &Path) -> LumpResult<PathBuf> {
        let path = dir.join(&self.file_name);
        fs::write(&path, &self.data)?;
        debug!("Wrote {} ({} bytes)", path.display(), self.data.len());
        Ok(path)
    }
}

/// `name.ext` in lower case
pub fn export_file_name(lump: &str, ext: &str) -> String {
    format!("{}.{}", lump.trim_end_matches('\0'), ext).to_ascii_lowercase()
}

/// Canonical byte export of a decoded lump
///
/// `raw` is the undecoded lump. Returns `None` for rasters and empty lumps.
pub fn export_lump(lump: &str, decoded: &DecodedLump, raw: &[u8]) -> LumpResult<Option<LumpExport>> {
    if raw.is_empty() {
        return Ok(None);
    }

    let kind = decoded.kind();
    let Some(ext) = kind.extension() else {
        return Ok(None);
    };

    let data = match decoded {
        DecodedLump::Sound(voc) => voc.pcm.to_wav()?,
        DecodedLump::Music(song) => song.as_bytes().to_vec(),
        _ if kind.is_raster() => return Ok(None),
        _ => raw.to_vec(),
    };

    Ok(Some(LumpExport::new(lump, ext, data)))
}

/// Unmodified VOC dump
pub fn export_raw_voc(lump: &str, raw: &[u8]) -> Option<LumpExport> {
    (!raw.is_empty()).then(|| LumpExport::new(lump, VOC_EXTENSION, raw.to_vec()))
}

/// Unmodified lump dump
pub fn export_raw(lump: &str, raw: &[u8]) -> Option<LumpExport> {
    (!raw.is_empty()).then(|| LumpExport::new(lump, RAW_EXTENSION, raw.to_vec()))
}
