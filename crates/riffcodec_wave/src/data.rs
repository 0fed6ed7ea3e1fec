use crate::chunk::{expect_chunk_id, read_chunk_bytes, TAG_LEN};
use log::trace;
use riffcodec_core::{ChunkId, FieldReader, FieldWriter, RiffcodecResult};
use std::io::Read;

/// The descriptor preceding the interleaved sample frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataChunkHeader {
    pub byte_len: u32,
}

/// The `data` chunk with its samples split into one sequence per channel.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DataChunk {
    /// Length of the sample region as declared on disk.
    pub byte_len: u32,
    pub channels: Vec<Vec<i32>>,
}

impl DataChunkHeader {
    pub const CHUNK_ID: ChunkId = ChunkId::DATA;
    pub const BYTE_LEN: usize = 8;

    pub fn read(reader: &mut impl Read) -> RiffcodecResult<Self> {
        expect_chunk_id(reader, Self::CHUNK_ID)?;

        let buf = read_chunk_bytes::<{ DataChunkHeader::BYTE_LEN - TAG_LEN }>(
            reader,
            Self::CHUNK_ID,
        )?;
        let byte_len = FieldReader::new(&buf).u32_le();

        trace!("read {} chunk header, byte_len: {byte_len}", Self::CHUNK_ID);
        Ok(Self { byte_len })
    }

    pub fn write(&self, out: &mut FieldWriter) {
        out.put_tag(Self::CHUNK_ID).put_u32_le(self.byte_len);
    }
}

impl DataChunk {
    pub fn n_channels(&self) -> usize {
        self.channels.len()
    }

    /// Samples per channel.
    pub fn n_samples(&self) -> usize {
        self.channels.first().map_or(0, Vec::len)
    }

    pub fn channel(&self, i: usize) -> Option<&[i32]> {
        self.channels.get(i).map(Vec::as_slice)
    }
}
