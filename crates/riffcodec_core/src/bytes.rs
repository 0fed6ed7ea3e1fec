// https://www.mmsp.ece.mcgill.ca/Documents/AudioFormats/WAVE/WAVE.html
// https://ccrma.stanford.edu/courses/422-winter-2014/projects/WaveFormat/

use std::io::{self, Read};

/// A four character code, stored as the big-endian integer of its ASCII bytes.
#[derive(PartialEq, Eq, Clone, Copy, Hash)]
pub struct ChunkId(u32);

impl ChunkId {
    pub const RIFF: Self = Self::new(*b"RIFF");
    pub const WAVE: Self = Self::new(*b"WAVE");
    pub const FMT: Self = Self::new(*b"fmt ");
    pub const DATA: Self = Self::new(*b"data");

    pub const fn new(bytes: [u8; 4]) -> Self {
        Self(u32::from_be_bytes(bytes))
    }

    pub const fn to_be_bytes(self) -> [u8; 4] {
        self.0.to_be_bytes()
    }

    pub const fn get(self) -> u32 {
        self.0
    }
}

impl From<[u8; 4]> for ChunkId {
    fn from(bytes: [u8; 4]) -> Self {
        Self::new(bytes)
    }
}

impl std::fmt::Display for ChunkId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use std::fmt::Write;

        for byte in self.to_be_bytes() {
            if byte.is_ascii_graphic() || byte == b' ' {
                f.write_char(byte as char)?;
            } else {
                write!(f, "\\x{byte:02x}")?;
            }
        }

        Ok(())
    }
}

impl std::fmt::Debug for ChunkId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ChunkId(\"{self}\")")
    }
}

/// Reads exactly `N` bytes, looping over partial reads.
///
/// A stream that ends early is reported as [`io::ErrorKind::UnexpectedEof`].
#[inline]
pub fn read_array<const N: usize>(reader: &mut impl Read) -> io::Result<[u8; N]> {
    let mut bytes = [0u8; N];
    reader.read_exact(&mut bytes)?;

    Ok(bytes)
}

/// Sequential field decoding over a fixed byte window.
///
/// Tags are read big-endian, numeric fields little-endian. Callers size the window
/// for the fields they read; reading past its end panics.
pub struct FieldReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> FieldReader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    pub fn tag(&mut self) -> ChunkId {
        ChunkId::new(self.array())
    }

    pub fn u16_le(&mut self) -> u16 {
        u16::from_le_bytes(self.array())
    }

    pub fn u32_le(&mut self) -> u32 {
        u32::from_le_bytes(self.array())
    }

    pub fn bytes(&mut self, n: usize) -> &'a [u8] {
        let buf = self.buf;
        let bytes = &buf[self.pos..self.pos + n];
        self.pos += n;

        bytes
    }

    fn array<const N: usize>(&mut self) -> [u8; N] {
        let mut bytes = [0u8; N];
        bytes.copy_from_slice(self.bytes(N));

        bytes
    }
}

/// The inverse of [`FieldReader`], appending fields to a byte buffer.
pub struct FieldWriter<'a> {
    buf: &'a mut Vec<u8>,
}

impl<'a> FieldWriter<'a> {
    pub fn new(buf: &'a mut Vec<u8>) -> Self {
        Self { buf }
    }

    pub fn put_tag(&mut self, tag: ChunkId) -> &mut Self {
        self.put_bytes(&tag.to_be_bytes())
    }

    pub fn put_u16_le(&mut self, value: u16) -> &mut Self {
        self.put_bytes(&value.to_le_bytes())
    }

    pub fn put_u32_le(&mut self, value: u32) -> &mut Self {
        self.put_bytes(&value.to_le_bytes())
    }

    pub fn put_bytes(&mut self, bytes: &[u8]) -> &mut Self {
        self.buf.extend_from_slice(bytes);
        self
    }
}
