//! PC speaker sound effects
//!
//! A 4-byte header (`length:i16`, `priority:i16`) followed by one byte per
//! tone. Each byte indexes [`FREQUENCIES`]; index 0 is a rest. Every tone
//! lasts `length * 1000 / 140` milliseconds.

use crate::audio::{AudioError, AudioResult};
use serde::Serialize;

/// Size of the speaker header
pub const SPEAKER_HEADER_SIZE: usize = 4;

/// Timer ticks per second the tone length is expressed in
pub const SPEAKER_TICK_RATE: u32 = 140;

/// Tone frequencies in Hz by note index, index 0 is silence
pub const FREQUENCIES: [f32; 96] = [
    0.0, 175.00, 180.02, 185.01, 190.02, 196.02, 202.02, 208.01, 214.02, 220.02, 226.02, 233.04,
    240.02, 247.03, 254.03, 262.00, 269.03, 277.03, 285.04, 294.03, 302.07, 311.04, 320.05,
    330.06, 339.06, 349.08, 359.06, 370.09, 381.08, 392.10, 403.10, 415.01, 427.05, 440.12,
    453.16, 466.08, 480.15, 494.07, 508.16, 523.09, 539.16, 554.19, 571.17, 587.19, 604.14,
    622.09, 640.11, 659.21, 679.10, 698.17, 719.21, 740.18, 762.41, 784.47, 807.29, 831.48,
    855.32, 880.57, 906.67, 932.17, 960.69, 988.55, 1017.20, 1046.64, 1077.85, 1109.93, 1141.79,
    1175.54, 1210.12, 1244.19, 1281.61, 1318.43, 1357.42, 1397.16, 1439.30, 1480.37, 1523.85,
    1569.97, 1614.58, 1661.81, 1711.87, 1762.45, 1813.34, 1864.34, 1921.38, 1975.46, 2036.14,
    2093.29, 2157.64, 2217.80, 2285.78, 2353.41, 2420.24, 2490.98, 2565.97, 2639.77,
];

/// What the speaker plays for one step
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Tone {
    /// Speaker off
    Silence,
    /// Square wave at this frequency
    Hz(f32),
}

/// One step of a speaker sound
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ToneEvent {
    /// Tone to play
    pub tone: Tone,
    /// How long to play it
    pub duration_ms: u32,
}

/// Decoded PC speaker lump
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeakerSound {
    /// Tone length in 1/140 s ticks
    pub length: i16,
    /// Playback priority
    pub priority: i16,
    notes: Vec<u8>,
}

impl SpeakerSound {
    /// Split a speaker lump into header and note indices
    pub fn parse(data: &[u8]) -> AudioResult<Self> {
        if data.len() < SPEAKER_HEADER_SIZE {
            return Err(AudioError::SpeakerTooShort(data.len()));
        }

        Ok(Self {
            length: i16::from_le_bytes([data[0], data[1]]),
            priority: i16::from_le_bytes([data[2], data[3]]),
            notes: data[SPEAKER_HEADER_SIZE..].to_vec(),
        })
    }

    /// Raw note indices
    pub fn notes(&self) -> &[u8] {
        &self.notes
    }

    /// Duration of every tone; negative lengths play for 0 ms
    pub fn tone_duration_ms(&self) -> u32 {
        u32::try_from(self.length).unwrap_or(0) * 1000 / SPEAKER_TICK_RATE
    }

    /// Total playback time
    pub fn duration_ms(&self) -> u64 {
        u64::from(self.tone_duration_ms()) * self.notes.len() as u64
    }

    /// Tones in playback order, computed on demand
    pub fn events(&self) -> impl Iterator<Item = ToneEvent> + '_ {
        let duration_ms = self.tone_duration_ms();
        self.notes.iter().map(move |&note| ToneEvent {
            tone: tone_for(note),
            duration_ms,
        })
    }
}

/// Tone for a note index; indices past the table are rests
pub fn tone_for(note: u8) -> Tone {
    match FREQUENCIES.get(usize::from(note)) {
        Some(&hz) if note != 0 => Tone::Hz(hz),
        _ => Tone::Silence,
    }
}
