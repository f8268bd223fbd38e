//! Lump kinds

use serde::Serialize;
use std::fmt;

/// What a directory entry contains
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LumpKind {
    /// Section delimiter, recognized by name
    Marker,
    /// Zero-size entry that is not a known marker
    Empty,
    /// 256-color palette
    Palette,
    /// Shade tables
    Colormap,
    /// 64x64 floor/ceiling texture
    Flat,
    /// 256x200 sky
    Sky,
    /// Planar pic
    Pic,
    /// Patch graphic
    Patch,
    /// Masked sprite
    Masked,
    /// Translucent masked sprite
    TransMasked,
    /// Plain text
    Ascii,
    /// VOC sound effect
    Sound,
    /// MIDI song
    Music,
    /// PC speaker sound effect
    PcSpeaker,
    /// Unclassified data
    Unknown,
}

impl LumpKind {
    /// Short lower-case name
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Marker => "marker",
            Self::Empty => "empty",
            Self::Palette => "palette",
            Self::Colormap => "colormap",
            Self::Flat => "flat",
            Self::Sky => "sky",
            Self::Pic => "pic",
            Self::Patch => "patch",
            Self::Masked => "masked",
            Self::TransMasked => "trans_masked",
            Self::Ascii => "ascii",
            Self::Sound => "sound",
            Self::Music => "music",
            Self::PcSpeaker => "pc_speaker",
            Self::Unknown => "unknown",
        }
    }

    /// Decodes to a picture
    pub fn is_raster(self) -> bool {
        matches!(
            self,
            Self::Colormap
                | Self::Flat
                | Self::Sky
                | Self::Pic
                | Self::Patch
                | Self::Masked
                | Self::TransMasked
        )
    }

    /// Decodes to something audible
    pub fn is_audio(self) -> bool {
        matches!(self, Self::Sound | Self::Music | Self::PcSpeaker)
    }

    /// Needs a palette to decode
    pub fn needs_palette(self) -> bool {
        self.is_raster()
    }

    /// Carries data that can be decoded
    pub fn is_decodable(self) -> bool {
        !matches!(self, Self::Marker | Self::Empty)
    }

    /// File extension of the canonical export
    pub fn extension(self) -> Option<&'static str> {
        match self {
            Self::Marker | Self::Empty => None,
            Self::Sound => Some("wav"),
            Self::Music => Some("mid"),
            Self::Ascii => Some("txt"),
            kind if kind.is_raster() => Some("png"),
            _ => Some("lmp"),
        }
    }
}

impl fmt::Display for LumpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
