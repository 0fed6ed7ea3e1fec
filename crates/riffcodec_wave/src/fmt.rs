// https://www.mmsp.ece.mcgill.ca/Documents/AudioFormats/WAVE/WAVE.html
// https://github.com/tpn/winsdk-10/blob/master/Include/10.0.14393.0/shared/mmreg.h

use crate::{
    chunk::{expect_chunk_id, read_chunk_bytes, TAG_LEN},
    BitDepth,
};
use log::{debug, trace};
use riffcodec_core::{ChunkId, FieldReader, FieldWriter, RiffcodecError, RiffcodecResult};
use std::io::Read;

/// The `fmt ` chunk describing how the sample data is laid out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FmtChunk {
    /// Body length as declared on disk. Recomputed from the body when encoding.
    pub chunk_size: u32,

    /// Format tag as declared. Only integer PCM sample data is decoded; other tags
    /// are kept but their samples are still read as integer PCM.
    pub audio_format: u16,
    pub n_channels: u16,
    pub sample_rate: u32,
    pub byte_rate: u32,
    pub block_align: u16,
    pub bits_per_sample: u16,

    /// Raw bytes following the 16 byte PCM body, e.g. `cbSize` and the
    /// `WAVE_FORMAT_EXTENSIBLE` fields.
    pub extension: Vec<u8>,
}

impl FmtChunk {
    pub const CHUNK_ID: ChunkId = ChunkId::FMT;

    /// Bytes occupied by the fixed part of the chunk on disk, including tag and size.
    pub const BYTE_LEN: usize = 24;

    pub const PCM_BODY_LEN: u32 = 16;
    pub const MAX_EXTENSION_LEN: usize = 24;

    pub const FORMAT_PCM: u16 = 0x0001;

    pub fn read(reader: &mut impl Read) -> RiffcodecResult<Self> {
        expect_chunk_id(reader, Self::CHUNK_ID)?;

        let buf = read_chunk_bytes::<{ FmtChunk::BYTE_LEN - TAG_LEN }>(
            reader,
            Self::CHUNK_ID,
        )?;
        let mut fields = FieldReader::new(&buf);

        let mut chunk = Self {
            chunk_size: fields.u32_le(),
            audio_format: fields.u16_le(),
            n_channels: fields.u16_le(),
            sample_rate: fields.u32_le(),
            byte_rate: fields.u32_le(),
            block_align: fields.u16_le(),
            bits_per_sample: fields.u16_le(),
            extension: Vec::new(),
        };

        if chunk.chunk_size > Self::PCM_BODY_LEN {
            let ext_len = (chunk.chunk_size - Self::PCM_BODY_LEN) as usize;
            if ext_len > Self::MAX_EXTENSION_LEN {
                return Err(RiffcodecError::invalid_data("format chunk extension too long"));
            }

            chunk.extension = vec![0u8; ext_len];
            reader
                .read_exact(&mut chunk.extension)
                .map_err(|e| RiffcodecError::from_chunk_read(Self::CHUNK_ID, e))?;
        }

        if !chunk.is_pcm() {
            debug!(
                "{} chunk declares non-PCM format {:#06x}, samples read as integer PCM",
                Self::CHUNK_ID,
                chunk.audio_format
            );
        }

        trace!(
            "read {} chunk, format: {:#06x}, channels: {}, rate: {}, bits: {}",
            Self::CHUNK_ID,
            chunk.audio_format,
            chunk.n_channels,
            chunk.sample_rate,
            chunk.bits_per_sample
        );

        Ok(chunk)
    }

    pub fn is_pcm(&self) -> bool {
        self.audio_format == Self::FORMAT_PCM
    }

    /// Length of the body that [`FmtChunk::write`] emits.
    pub fn body_len(&self) -> u32 {
        Self::PCM_BODY_LEN + self.extension.len() as u32
    }

    pub fn bit_depth(&self) -> RiffcodecResult<BitDepth> {
        BitDepth::try_from(self.bits_per_sample)
    }

    /// Writes the chunk with its size field taken from [`FmtChunk::body_len`].
    pub fn write(&self, out: &mut FieldWriter) {
        out.put_tag(Self::CHUNK_ID)
            .put_u32_le(self.body_len())
            .put_u16_le(self.audio_format)
            .put_u16_le(self.n_channels)
            .put_u32_le(self.sample_rate)
            .put_u32_le(self.byte_rate)
            .put_u16_le(self.block_align)
            .put_u16_le(self.bits_per_sample)
            .put_bytes(&self.extension);
    }
}
