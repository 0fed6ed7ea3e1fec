use crate::{samples, BitDepth, DataChunk, DataChunkHeader, FmtChunk, RiffHeader};
use log::debug;
use riffcodec_core::{FieldWriter, RiffcodecError, RiffcodecResult};
use std::{
    io::{Read, Write},
    time::Duration,
};

/// A fully decoded WAVE file.
///
/// Chunks are expected in the order `RIFF`, `fmt `, `data` with nothing in between;
/// other layouts fail to decode rather than being searched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaveFile {
    header: RiffHeader,
    fmt: FmtChunk,
    data: DataChunk,
    depth: BitDepth,
}

impl WaveFile {
    /// Assembles a file from its chunks, checking that the sample data matches the
    /// format description.
    pub fn from_parts(header: RiffHeader, fmt: FmtChunk, data: DataChunk) -> RiffcodecResult<Self> {
        let depth = fmt.bit_depth()?;

        if fmt.n_channels == 0 {
            return Err(RiffcodecError::invalid_input("format declares zero channels"));
        }

        if data.channels.len() != fmt.n_channels as usize {
            return Err(RiffcodecError::invalid_input(
                "channel count does not match format",
            ));
        }

        let n_samples = data.n_samples();
        if data.channels.iter().any(|channel| channel.len() != n_samples) {
            return Err(RiffcodecError::invalid_input("channels have different lengths"));
        }

        if fmt.extension.len() > FmtChunk::MAX_EXTENSION_LEN {
            return Err(RiffcodecError::invalid_input("format chunk extension too long"));
        }

        Ok(Self {
            header,
            fmt,
            data,
            depth,
        })
    }

    /// Decodes a complete file, stopping at the first failing chunk.
    pub fn decode(reader: &mut impl Read) -> RiffcodecResult<Self> {
        let header = RiffHeader::read(reader)?;
        let fmt = FmtChunk::read(reader)?;
        let DataChunkHeader { byte_len } = DataChunkHeader::read(reader)?;

        let depth = fmt.bit_depth()?;
        let channels = samples::decode_samples(reader, depth, fmt.n_channels, byte_len)?;

        let file = Self {
            header,
            fmt,
            data: DataChunk { byte_len, channels },
            depth,
        };

        debug!(
            "decoded wave file: {} channels, {} Hz, {} bits, {} samples",
            file.n_channels(),
            file.sample_rate(),
            depth.bits(),
            file.n_samples()
        );

        Ok(file)
    }

    /// Encodes the file into a new buffer.
    ///
    /// All size fields are recomputed from the emitted content. `byte_rate` and
    /// `block_align` are written as recorded.
    pub fn encode(&self) -> RiffcodecResult<Vec<u8>> {
        let data_len = self
            .data
            .n_samples()
            .checked_mul(self.data.n_channels() * self.depth.byte_width())
            .and_then(|len| u32::try_from(len).ok())
            .ok_or_else(|| RiffcodecError::invalid_input("sample data exceeds 4 GiB"))?;

        let fmt_len = self.fmt.body_len();
        let size = [4, 8 + fmt_len, 8]
            .into_iter()
            .try_fold(data_len, u32::checked_add)
            .ok_or_else(|| RiffcodecError::invalid_input("file exceeds 4 GiB"))?;

        let mut buf = Vec::with_capacity(size as usize + 8);

        let mut out = FieldWriter::new(&mut buf);
        RiffHeader { size }.write(&mut out);
        self.fmt.write(&mut out);
        DataChunkHeader { byte_len: data_len }.write(&mut out);

        samples::encode_samples(&self.data.channels, self.depth, &mut buf)?;
        debug_assert_eq!(buf.len(), size as usize + 8);

        debug!("encoded wave file: {} bytes", buf.len());
        Ok(buf)
    }

    /// Encodes the file and hands the whole buffer to `writer`.
    pub fn write_to(&self, writer: &mut impl Write) -> RiffcodecResult<()> {
        let buf = self.encode()?;
        writer.write_all(&buf)?;

        Ok(())
    }

    pub fn header(&self) -> &RiffHeader {
        &self.header
    }

    pub fn fmt(&self) -> &FmtChunk {
        &self.fmt
    }

    pub fn data(&self) -> &DataChunk {
        &self.data
    }

    pub fn into_parts(self) -> (RiffHeader, FmtChunk, DataChunk) {
        (self.header, self.fmt, self.data)
    }

    pub fn bit_depth(&self) -> BitDepth {
        self.depth
    }

    pub fn n_channels(&self) -> usize {
        self.data.n_channels()
    }

    pub fn sample_rate(&self) -> u32 {
        self.fmt.sample_rate
    }

    /// Samples per channel.
    pub fn n_samples(&self) -> usize {
        self.data.n_samples()
    }

    pub fn channels(&self) -> &[Vec<i32>] {
        &self.data.channels
    }

    /// Playback length, or zero when the sample rate is unknown.
    pub fn duration(&self) -> Duration {
        match self.sample_rate() {
            0 => Duration::ZERO,
            rate => Duration::from_secs_f64(self.n_samples() as f64 / rate as f64),
        }
    }
}
