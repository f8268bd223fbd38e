//! Section markers
//!
//! ROTT groups lumps between zero-size delimiter entries such as
//! `WALLSTRT`/`WALLSTOP`. Markers are recognized by name only: some WADs
//! give them a non-zero size.

mod controller;

pub use controller::{Marker, MarkerController};

/// Every delimiter name used by ROTT archives
pub const MARKER_NAMES: [&str; 34] = [
    "WALLSTRT", "WALLSTOP", "ANIMSTRT", "EXITSTRT", "EXITSTOP", "ABVMSTRT", "ABVWSTRT", "HMSKSTRT",
    "GUNSTART", "ELEVSTRT", "ELEVSTOP", "DOORSTRT", "DOORSTOP", "SIDESTRT", "SIDESTOP", "MASKSTRT",
    "MASKSTOP", "UPDNSTRT", "UPDNSTOP", "SKYSTART", "SKYSTOP", "ORDRSTRT", "ORDRSTOP", "SPECMAPS",
    "PLAYMAPS", "SHAPSTRT", "SHAPSTOP", "DIGISTRT", "DIGISTOP", "SONGSTRT", "PCSTART", "PCSTOP",
    "ADSTART", "ADSTOP",
];

/// Marker opening the PC speaker section
pub const PC_SPEAKER_SECTION: &str = "PCSTART";

/// True when `name` is a section delimiter, compared case-insensitively
pub fn is_marker(name: &str) -> bool {
    MARKER_NAMES
        .iter()
        .any(|marker| name.eq_ignore_ascii_case(marker))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_marker() {
        assert!(is_marker("WALLSTRT"));
        assert!(is_marker("pcstop"));
        assert!(is_marker("AdStart"));
        assert!(!is_marker("WALL1"));
        assert!(!is_marker("WALLSTRT2"));
        assert!(!is_marker(""));
    }
}
