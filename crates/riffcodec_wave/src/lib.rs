//! Decoding and encoding of canonical PCM WAVE files.
//!
//! A file is read as a fixed sequence of three chunks, `RIFF`, `fmt ` and `data`,
//! followed by the interleaved sample frames, which are split into one `i32`
//! sequence per channel.

mod chunk;
mod data;
mod file;
mod fmt;
mod header;
mod samples;

#[cfg(test)]
mod fixtures;

pub use data::*;
pub use file::*;
pub use fmt::*;
pub use header::*;
pub use samples::{decode_samples, encode_samples, n_samples, BitDepth};

use riffcodec_core::RiffcodecResult;
use std::io::Read;

/// Decodes a complete file from `reader`. See [`WaveFile::decode`].
pub fn decode(reader: &mut impl Read) -> RiffcodecResult<WaveFile> {
    WaveFile::decode(reader)
}

/// Encodes `file` into a new buffer. See [`WaveFile::encode`].
pub fn encode(file: &WaveFile) -> RiffcodecResult<Vec<u8>> {
    file.encode()
}
