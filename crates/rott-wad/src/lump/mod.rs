//! Lump classification and decoding
//!
//! A lump goes through three steps: [`classify`] sniffs its kind from the
//! bytes (with [`classify_by_name`] as a fallback for text lumps),
//! [`DecodedLump::decode`] runs the matching decoder, and the caller owns
//! the result.

pub mod classify;
mod decode;
mod error;
mod kind;
pub mod text;

pub use classify::{classify, classify_by_name, classify_named};
pub use decode::DecodedLump;
pub use error::{LumpError, LumpResult};
pub use kind::LumpKind;
pub use text::{AsciiText, UnknownLump};
