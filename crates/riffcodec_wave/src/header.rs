use crate::chunk::{expect_chunk_id, read_chunk_bytes, TAG_LEN};
use log::trace;
use riffcodec_core::{ChunkId, FieldReader, FieldWriter, RiffcodecError, RiffcodecResult};
use std::io::Read;

/// The leading RIFF chunk descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RiffHeader {
    /// Size of the file from the format tag onwards, i.e. total size minus 8.
    ///
    /// Recorded as declared; it is not checked against the stream length.
    pub size: u32,
}

impl RiffHeader {
    pub const CHUNK_ID: ChunkId = ChunkId::RIFF;
    pub const FORMAT_ID: ChunkId = ChunkId::WAVE;

    /// Bytes occupied by the header on disk.
    pub const BYTE_LEN: usize = 12;

    pub fn read(reader: &mut impl Read) -> RiffcodecResult<Self> {
        expect_chunk_id(reader, Self::CHUNK_ID)?;

        let buf = read_chunk_bytes::<{ RiffHeader::BYTE_LEN - TAG_LEN }>(
            reader,
            Self::CHUNK_ID,
        )?;
        let mut fields = FieldReader::new(&buf);

        let size = fields.u32_le();
        let format = fields.tag();
        if format != Self::FORMAT_ID {
            return Err(RiffcodecError::invalid_tag(Self::FORMAT_ID, format));
        }

        trace!("read {} header, size: {size}", Self::CHUNK_ID);
        Ok(Self { size })
    }

    pub fn write(&self, out: &mut FieldWriter) {
        out.put_tag(Self::CHUNK_ID)
            .put_u32_le(self.size)
            .put_tag(Self::FORMAT_ID);
    }
}
