//! Decoder for Rise of the Triad WAD archives
//!
#![allow(clippy::cast_possible_truncation)] // Intentional for binary format parsing
#![allow(clippy::cast_possible_wrap)] // Intentional for binary operations
#![allow(clippy::cast_lossless)] // Sometimes clearer than From
#![allow(clippy::uninlined_format_args)] // Backwards compatibility
#![allow(clippy::doc_markdown)] // Lump names don't need backticks
#![allow(clippy::module_name_repetitions)] // Clear naming is preferred
#![allow(clippy::similar_names)] // Domain-specific naming patterns
#![allow(clippy::cast_precision_loss)] // Tone frequencies and durations
#![allow(clippy::derive_partial_eq_without_eq)] // Binary format structs
#![allow(clippy::redundant_closure_for_method_calls)] // Iterator chains
#![allow(clippy::return_self_not_must_use)] // Builder patterns
#![allow(clippy::use_self)] // Type clarity
//! This crate reads the WAD archives of Rise of the Triad (1994) and decodes
//! the lumps inside them into images, PCM audio, MIDI and text.
//!
//! # Supported Formats
//!
//! - **Archive**: `IWAD` header and 16-byte directory records
//! - **Palette**: 256-entry RGB palettes with mask index and darkness
//! - **Rasters**: flats, skies, patches, planar pics, masked and transmasked
//!   sprites, colormaps
//! - **Audio**: Creative VOC sounds (exported as RIFF/WAVE), MIDI songs and
//!   PC speaker note lists
//! - **Text**: ASCII lumps; anything unrecognized stays raw bytes
//!
//! # Browsing
//!
//! [`WadSession`] opens an archive, classifies every directory entry by
//! content and decodes lumps on demand:
//!
//! ```no_run
//! use rott_wad::{DecodeOptions, WadSession};
//!
//! let mut session = WadSession::open("DARKWAR.WAD", DecodeOptions::default())?;
//! for lump in session.lumps() {
//!     println!("{:8} {:>8} {}", lump.entry.name, lump.entry.size, lump.kind);
//! }
//! let sound = session.decode("PLAYER1")?;
//! println!("PLAYER1 decoded as {}", sound.kind());
//! # Ok::<(), rott_wad::SessionError>(())
//! ```
//!
//! The library only emits `tracing` events; installing a subscriber is up to
//! the application.

#![warn(missing_docs)]

/// WAD header, directory and random-access lump reads
pub mod archive;
/// VOC, MIDI and PC speaker sound lumps
pub mod audio;
pub mod export;
/// Content classification and dispatch to the format decoders
pub mod lump;
/// Section markers and the marker controller
pub mod marker;
pub mod options;
/// 256-color palettes
pub mod palette;
/// Picture lumps
///
/// See the [`raster`] module for the layout of each format.
pub mod raster;
pub mod session;

// Test utilities module
#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
pub(crate) mod test_utils;

pub use archive::{ArchiveError, DirectoryEntry, WadArchive, WadBuilder};
pub use export::{LumpExport, export_lump};
pub use lump::{DecodedLump, LumpError, LumpKind, classify};
pub use marker::{Marker, MarkerController};
pub use options::DecodeOptions;
pub use palette::{Palette, Rgba};
pub use raster::{RasterDecode, RasterImage};
pub use session::{LoadedLump, LumpInfo, SessionError, SessionResult, WadSession};
