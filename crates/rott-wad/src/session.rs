//! Browsing session over one opened archive
//!
//! A [`WadSession`] owns the archive handle, the marker controller built
//! from its directory and the decode options. Opening a new file means
//! building a new session; a session never re-points its handle.
//!
//! Decoding a lump reads it, classifies it, picks its palette when it is a
//! raster and then decodes it. Failures past the open are local to the lump asked for.

use crate::archive::{ArchiveError, DirectoryEntry, WadArchive};
use crate::lump::{DecodedLump, LumpError, LumpKind};
use crate::marker::MarkerController;
use crate::options::DecodeOptions;
use crate::palette::Palette;
use serde::Serialize;
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;
use thiserror::Error;
use tracing::{debug, warn};

/// Session result type
pub type SessionResult<T> = Result<T, SessionError>;

/// Session failures
#[derive(Debug, Error)]
pub enum SessionError {
    /// The archive could not be opened; nothing can be browsed
    #[error("Failed to open archive: {0}")]
    Open(#[source] ArchiveError),

    /// One lump failed; the rest of the archive is still usable
    #[error("Lump {name}: {source}")]
    Lump {
        /// Name of the lump
        name: String,
        /// What went wrong
        #[source]
        source: LumpError,
    },
}

impl SessionError {
    /// Whether the session is unusable after this error
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Open(_))
    }

    fn lump(name: &str, source: impl Into<LumpError>) -> Self {
        Self::Lump {
            name: name.to_string(),
            source: source.into(),
        }
    }
}

/// A directory entry with its classified kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LumpInfo {
    /// Directory entry
    #[serde(flatten)]
    pub entry: DirectoryEntry,
    /// Classified kind
    pub kind: LumpKind,
}

/// A lump read and decoded in one go
#[derive(Debug)]
pub struct LoadedLump {
    /// Directory entry
    pub entry: DirectoryEntry,
    /// Classified kind
    pub kind: LumpKind,
    /// Undecoded bytes
    pub data: Vec<u8>,
    /// Decoded value
    pub decoded: DecodedLump,
}

/// An opened archive ready for browsing
#[derive(Debug)]
pub struct WadSession<R: Read + Seek = BufReader<File>> {
    archive: WadArchive<R>,
    markers: MarkerController,
    options: DecodeOptions,
}

impl WadSession<BufReader<File>> {
    /// Open a WAD file and index its markers
    pub fn open<P: AsRef<Path>>(path: P, options: DecodeOptions) -> SessionResult<Self> {
        let archive = WadArchive::open(path).map_err(SessionError::Open)?;
        Ok(Self::with_archive(archive, options))
    }
}

impl<R: Read + Seek> WadSession<R> {
    /// Open a WAD from any seekable source
    pub fn from_reader(reader: R, options: DecodeOptions) -> SessionResult<Self> {
        let archive = WadArchive::from_reader(reader).map_err(SessionError::Open)?;
        Ok(Self::with_archive(archive, options))
    }

    /// Wrap an already opened archive
    pub fn with_archive(archive: WadArchive<R>, options: DecodeOptions) -> Self {
        let mut markers = MarkerController::new();
        markers.rebuild(archive.entries());
        debug!("Session indexed {} markers", markers.len());

        Self {
            archive,
            markers,
            options,
        }
    }

    /// The underlying archive
    pub fn archive(&self) -> &WadArchive<R> {
        &self.archive
    }

    /// Markers of the archive
    pub fn markers(&self) -> &MarkerController {
        &self.markers
    }

    /// Decode settings in use
    pub fn options(&self) -> &DecodeOptions {
        &self.options
    }

    /// Change the decode settings for later decodes
    pub fn set_options(&mut self, options: DecodeOptions) {
        self.options = options;
    }

    /// Every directory entry with its kind
    ///
    /// A lump that cannot be read is listed as [`LumpKind::Unknown`].
    pub fn lumps(&mut self) -> Vec<LumpInfo> {
        let entries = self.archive.entries().to_vec();
        entries
            .into_iter()
            .map(|entry| {
                let kind = self.kind_of(&entry);
                LumpInfo { entry, kind }
            })
            .collect()
    }

    fn kind_of(&mut self, entry: &DirectoryEntry) -> LumpKind {
        if entry.size == 0 {
            return self.markers.classify_entry(entry, &[]);
        }
        match self.archive.read_lump(entry) {
            Ok(data) => self.markers.classify_entry(entry, &data),
            Err(e) => {
                warn!("Cannot read lump {} ({}): {}", entry.name, entry.id, e);
                LumpKind::Unknown
            }
        }
    }

    /// Classified kind of the lump named `name`
    pub fn kind(&mut self, name: &str) -> SessionResult<LumpKind> {
        let entry = self.entry(name)?;
        Ok(self.kind_of(&entry))
    }

    /// Raw bytes of the lump named `name`
    pub fn read(&mut self, name: &str) -> SessionResult<Vec<u8>> {
        self.archive
            .read_lump_by_name(name)
            .map_err(|e| SessionError::lump(name, e))
    }

    /// Decode the lump named `name`
    pub fn decode(&mut self, name: &str) -> SessionResult<DecodedLump> {
        self.load(name).map(|lump| lump.decoded)
    }

    /// Read, classify and decode the lump named `name`
    pub fn load(&mut self, name: &str) -> SessionResult<LoadedLump> {
        let entry = self.entry(name)?;
        let data = self
            .archive
            .read_lump(&entry)
            .map_err(|e| SessionError::lump(name, e))?;
        let kind = self.markers.classify_entry(&entry, &data);
        if !kind.is_decodable() {
            return Err(SessionError::lump(name, LumpError::NotDecodable(kind)));
        }

        let palette = if kind.needs_palette() {
            match self.palette_for(&entry.name) {
                Some(Ok(palette)) => Some(palette),
                Some(Err(e)) => return Err(SessionError::lump(name, e)),
                None => return Err(SessionError::lump(name, LumpError::MissingPalette(kind))),
            }
        } else {
            None
        };

        let decoded = DecodedLump::decode(kind, &data, palette.as_ref()).map_err(|e| {
            warn!("Failed to decode {} as {}: {}", entry.name, kind, e);
            SessionError::lump(name, e)
        })?;

        Ok(LoadedLump {
            entry,
            kind,
            data,
            decoded,
        })
    }

    /// Palette that draws `lump`
    ///
    /// `None` when the palette lump is absent from the directory, `Some(Err)`
    /// when it cannot be read or is malformed.
    pub fn palette_for(&mut self, lump: &str) -> Option<Result<Palette, LumpError>> {
        let palette_lump = self.options.palette_lump_for(lump).to_string();
        let raw = match self.archive.read_lump_by_name(&palette_lump) {
            Ok(raw) => raw,
            Err(ArchiveError::EntryNotFound(_)) => {
                debug!("Palette {} not found for {}", palette_lump, lump);
                return None;
            }
            Err(e) => return Some(Err(LumpError::Archive(e))),
        };
        Some(
            self.options
                .build_palette(lump, &raw)
                .map_err(LumpError::from),
        )
    }

    /// Release the archive handle; later reads fail
    pub fn close(&mut self) {
        self.archive.close();
    }

    fn entry(&self, name: &str) -> SessionResult<DirectoryEntry> {
        self.archive
            .entry_by_name(name)
            .cloned()
            .map_err(|e| SessionError::lump(name, e))
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::archive::WadBuilder;
    use crate::palette::Rgba;
    use crate::test_utils::{gradient_palette, sample_wad};
    use binrw::io::Cursor;
    use pretty_assertions::assert_eq;

    fn session() -> WadSession<Cursor<Vec<u8>>> {
        WadSession::from_reader(Cursor::new(sample_wad()), DecodeOptions::default())
            .expect("Operation should succeed")
    }

    fn kind_of(lumps: &[LumpInfo], name: &str) -> LumpKind {
        lumps
            .iter()
            .find(|l| l.entry.name == name)
            .map(|l| l.kind)
            .expect("Lump should be listed")
    }

    #[test]
    fn test_lump_kinds() {
        let mut session = session();
        let lumps = session.lumps();
        assert_eq!(lumps.len(), session.archive().len());

        assert_eq!(kind_of(&lumps, "WALLSTRT"), LumpKind::Marker);
        assert_eq!(kind_of(&lumps, "WALL1"), LumpKind::Flat);
        assert_eq!(kind_of(&lumps, "PAL"), LumpKind::Palette);
        assert_eq!(kind_of(&lumps, "AP_WRLD"), LumpKind::Pic);
        assert_eq!(kind_of(&lumps, "COLORMAP"), LumpKind::Colormap);
        assert_eq!(kind_of(&lumps, "SPRITE"), LumpKind::Masked);
        assert_eq!(kind_of(&lumps, "SND1"), LumpKind::Sound);
        assert_eq!(kind_of(&lumps, "SONG1"), LumpKind::Music);
        assert_eq!(kind_of(&lumps, "PCSP1"), LumpKind::PcSpeaker);
        assert_eq!(kind_of(&lumps, "LICENSE"), LumpKind::Ascii);
        assert_eq!(kind_of(&lumps, "MYSTERY"), LumpKind::Unknown);
        assert_eq!(kind_of(&lumps, "NOTHING"), LumpKind::Empty);
    }

    #[test]
    fn test_decode_uses_default_palette() {
        let mut session = session();
        let palette = Palette::from_raw(&gradient_palette()).expect("Operation should succeed");

        let decoded = session.decode("wall1").expect("Operation should succeed");
        assert_eq!(decoded.kind(), LumpKind::Flat);
        let image = decoded.image().expect("Flat should have an image");
        assert_eq!((image.width(), image.height()), (64, 64));
        // (0, 0) reads raw[63 * 64], which the flat builder fills with 63*64 % 250 + 1
        assert_eq!(image.pixel(0, 0), Some(palette.color_at((63 * 64 % 250 + 1) as u8)));
    }

    #[test]
    fn test_apogee_screen_uses_apogee_palette() {
        let mut session = session();
        let decoded = session.decode("AP_WRLD").expect("Operation should succeed");
        let DecodedLump::Pic(pic) = &decoded else {
            panic!("AP_WRLD should decode as a pic");
        };
        assert_eq!(pic.plane_size, 2);

        let palette = session
            .palette_for("AP_WRLD")
            .expect("AP_PAL is present")
            .expect("Operation should succeed");
        assert_eq!(palette.mask_index(), 0);
        assert_eq!(palette.mask_color(), Rgba::default());

        let mut reversed = gradient_palette();
        reversed.reverse();
        assert_eq!(palette.raw(), reversed.as_slice());
    }

    #[test]
    fn test_markers_and_empty_not_decodable() {
        let mut session = session();
        for name in ["WALLSTRT", "NOTHING"] {
            let err = session.decode(name).expect_err("Should not decode");
            assert!(!err.is_fatal());
            assert!(matches!(
                err,
                SessionError::Lump {
                    source: LumpError::NotDecodable(_),
                    ..
                }
            ));
        }
    }

    #[test]
    fn test_unknown_lump_is_local() {
        let mut session = session();
        let err = session.decode("NOSUCH").expect_err("Should not decode");
        assert!(!err.is_fatal());
        assert!(session.decode("SND1").is_ok());
    }

    #[test]
    fn test_missing_palette() {
        let data = WadBuilder::new()
            .add_marker("WALLSTRT")
            .add_lump("WALL1", crate::test_utils::flat_lump())
            .build()
            .expect("Operation should succeed");
        let mut session = WadSession::from_reader(Cursor::new(data), DecodeOptions::default())
            .expect("Operation should succeed");

        let err = session.decode("WALL1").expect_err("Should not decode");
        assert!(matches!(
            err,
            SessionError::Lump {
                source: LumpError::MissingPalette(LumpKind::Flat),
                ..
            }
        ));
    }

    #[test]
    fn test_truncated_palette_is_not_missing() {
        use crate::archive::{DIRECTORY_RECORD_SIZE, HEADER_SIZE};

        let mut data = WadBuilder::new()
            .add_marker("WALLSTRT")
            .add_lump("WALL1", crate::test_utils::flat_lump())
            .add_lump("PAL", gradient_palette())
            .build()
            .expect("Operation should succeed");

        // PAL is the third record; stretch its size past the end of the file
        let directory = HEADER_SIZE + 4096 + 768;
        let record = directory + 2 * DIRECTORY_RECORD_SIZE;
        data[record + 4..record + 8].copy_from_slice(&0x0010_0000i32.to_le_bytes());

        let mut session = WadSession::from_reader(Cursor::new(data), DecodeOptions::default())
            .expect("Operation should succeed");
        let err = session.decode("WALL1").expect_err("Should not decode");
        assert!(matches!(
            err,
            SessionError::Lump {
                source: LumpError::Archive(ArchiveError::Truncated { .. }),
                ..
            }
        ));
    }

    #[test]
    fn test_open_failure_is_fatal() {
        let err = WadSession::from_reader(Cursor::new(vec![0u8; 4]), DecodeOptions::default())
            .expect_err("Should not open");
        assert!(err.is_fatal());
    }

    #[test]
    fn test_pc_speaker_section() {
        let session = session();
        let id = session.archive().index_of("PCSP1").expect("Lump should exist");
        let section = session.markers().section_of(id).expect("Lump is in a section");
        assert_eq!(section.name, "PCSTART");
    }

    #[test]
    fn test_close() {
        let mut session = session();
        session.close();
        session.close();
        assert!(matches!(
            session.read("SND1"),
            Err(SessionError::Lump {
                source: LumpError::Archive(ArchiveError::Closed),
                ..
            })
        ));
    }
}
