//! Dispatch from a classified lump to its decoder

use crate::audio::{MidiSong, SpeakerSound, VocSound};
use crate::lump::text::{AsciiText, UnknownLump};
use crate::lump::{LumpError, LumpKind, LumpResult};
use crate::palette::Palette;
use crate::raster::{
    Colormap, Flat, MaskedSprite, Patch, Pic, RasterDecode, RasterImage, Sky, TransMaskedSprite,
};
use tracing::debug;

/// A decoded lump, owned by the caller
#[derive(Debug, Clone, PartialEq)]
pub enum DecodedLump {
    /// Palette
    Palette(Palette),
    /// Shade tables
    Colormap(Colormap),
    /// Floor/ceiling texture
    Flat(Flat),
    /// Sky backdrop
    Sky(Sky),
    /// Planar pic
    Pic(Pic),
    /// Patch graphic
    Patch(Patch),
    /// Masked sprite
    Masked(MaskedSprite),
    /// Translucent masked sprite
    TransMasked(TransMaskedSprite),
    /// VOC sound effect
    Sound(VocSound),
    /// MIDI song
    Music(MidiSong),
    /// PC speaker effect
    PcSpeaker(SpeakerSound),
    /// Plain text
    Ascii(AsciiText),
    /// Unclassified bytes
    Unknown(UnknownLump),
}

impl DecodedLump {
    /// Decode `data` as `kind`
    ///
    /// Raster kinds need `palette`; every other kind ignores it.
    pub fn decode(kind: LumpKind, data: &[u8], palette: Option<&Palette>) -> LumpResult<Self> {
        let raster_palette = || palette.ok_or(LumpError::MissingPalette(kind));

        let decoded = match kind {
            LumpKind::Marker | LumpKind::Empty => return Err(LumpError::NotDecodable(kind)),
            LumpKind::Palette => Self::Palette(Palette::from_raw(data)?),
            LumpKind::Colormap => Self::Colormap(Colormap::decode(data, raster_palette()?)?),
            LumpKind::Flat => Self::Flat(Flat::decode(data, raster_palette()?)?),
            LumpKind::Sky => Self::Sky(Sky::decode(data, raster_palette()?)?),
            LumpKind::Pic => Self::Pic(Pic::decode(data, raster_palette()?)?),
            LumpKind::Patch => Self::Patch(Patch::decode(data, raster_palette()?)?),
            LumpKind::Masked => Self::Masked(MaskedSprite::decode(data, raster_palette()?)?),
            LumpKind::TransMasked => {
                Self::TransMasked(TransMaskedSprite::decode(data, raster_palette()?)?)
            }
            LumpKind::Sound => Self::Sound(VocSound::parse(data)?),
            LumpKind::Music => Self::Music(MidiSong::parse(data)?),
            LumpKind::PcSpeaker => Self::PcSpeaker(SpeakerSound::parse(data)?),
            LumpKind::Ascii => Self::Ascii(AsciiText::parse(data)),
            LumpKind::Unknown => Self::Unknown(UnknownLump::new(data)),
        };

        debug!("Decoded {} byte(s) as {}", data.len(), kind);
        Ok(decoded)
    }

    /// Kind this value was decoded as
    pub fn kind(&self) -> LumpKind {
        match self {
            Self::Palette(_) => LumpKind::Palette,
            Self::Colormap(_) => LumpKind::Colormap,
            Self::Flat(_) => LumpKind::Flat,
            Self::Sky(_) => LumpKind::Sky,
            Self::Pic(_) => LumpKind::Pic,
            Self::Patch(_) => LumpKind::Patch,
            Self::Masked(_) => LumpKind::Masked,
            Self::TransMasked(_) => LumpKind::TransMasked,
            Self::Sound(_) => LumpKind::Sound,
            Self::Music(_) => LumpKind::Music,
            Self::PcSpeaker(_) => LumpKind::PcSpeaker,
            Self::Ascii(_) => LumpKind::Ascii,
            Self::Unknown(_) => LumpKind::Unknown,
        }
    }

    /// Decoded pixels of a raster lump
    pub fn image(&self) -> Option<&RasterImage> {
        match self {
            Self::Colormap(lump) => Some(lump.image()),
            Self::Flat(lump) => Some(lump.image()),
            Self::Sky(lump) => Some(lump.image()),
            Self::Pic(lump) => Some(lump.image()),
            Self::Patch(lump) => Some(lump.image()),
            Self::Masked(lump) => Some(lump.image()),
            Self::TransMasked(lump) => Some(lump.image()),
            _ => None,
        }
    }

    /// Something to show for this lump: raster pixels or a palette strip
    pub fn preview(&self) -> Option<RasterImage> {
        match self {
            Self::Palette(palette) => Some(palette.preview()),
            other => other.image().cloned(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::lump::classify;
    use crate::test_utils::{MaskedBuilder, VocBuilder, flat_lump, gradient_palette};

    #[test]
    fn test_decode_dispatch() {
        let palette = Palette::from_raw(&gradient_palette()).expect("Operation should succeed");

        let flat = flat_lump();
        let decoded = DecodedLump::decode(classify(&flat), &flat, Some(&palette))
            .expect("Operation should succeed");
        assert_eq!(decoded.kind(), LumpKind::Flat);
        assert_eq!(decoded.image().map(RasterImage::width), Some(64));

        let sprite = MaskedBuilder::new(4, 4).post(1, 0, &[3]).build();
        let decoded = DecodedLump::decode(classify(&sprite), &sprite, Some(&palette))
            .expect("Operation should succeed");
        assert_eq!(decoded.kind(), LumpKind::Masked);

        let voc = VocBuilder::new().sound_block(0xA6, &[0x80; 32]).build();
        let decoded =
            DecodedLump::decode(LumpKind::Sound, &voc, None).expect("Operation should succeed");
        assert!(decoded.image().is_none());
        assert!(decoded.preview().is_none());
    }

    #[test]
    fn test_raster_requires_palette() {
        assert!(matches!(
            DecodedLump::decode(LumpKind::Flat, &flat_lump(), None),
            Err(LumpError::MissingPalette(LumpKind::Flat))
        ));
    }

    #[test]
    fn test_markers_not_decodable() {
        assert!(matches!(
            DecodedLump::decode(LumpKind::Marker, &[], None),
            Err(LumpError::NotDecodable(LumpKind::Marker))
        ));
    }

    #[test]
    fn test_palette_preview() {
        let raw = gradient_palette();
        let decoded =
            DecodedLump::decode(LumpKind::Palette, &raw, None).expect("Operation should succeed");
        let preview = decoded.preview().expect("Operation should succeed");
        assert_eq!((preview.width(), preview.height()), (256, 1));
    }

    #[test]
    fn test_decode_failure_is_local_error() {
        let palette = Palette::from_raw(&gradient_palette()).expect("Operation should succeed");
        let err = DecodedLump::decode(LumpKind::Sky, &[0u8; 10], Some(&palette))
            .expect_err("Must fail");
        assert!(matches!(err, LumpError::Raster(_)));
    }
}
