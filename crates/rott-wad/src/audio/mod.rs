//! Sound effects, music and PC speaker lumps
//!
//! - [`VocSound`]: Creative Voice File samples, exportable as WAVE
//! - [`MidiSong`]: MIDI songs, passed through unchanged
//! - [`SpeakerSound`]: PC speaker tone sequences

mod error;
pub mod midi;
pub mod speaker;
pub mod voc;
pub mod wave;

pub use error::{AudioError, AudioResult};
pub use midi::{MidiHeader, MidiSong, is_midi};
pub use speaker::{SpeakerSound, Tone, ToneEvent};
pub use voc::{VocHeader, VocSound, is_voc};
pub use wave::{PcmSound, WaveHeader};
