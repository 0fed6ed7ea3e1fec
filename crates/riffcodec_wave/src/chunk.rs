use riffcodec_core::{read_array, ChunkId, RiffcodecError, RiffcodecResult};
use std::io::Read;

/// Bytes occupied by a chunk's leading tag.
pub(crate) const TAG_LEN: usize = 4;

/// Reads a chunk's leading tag and checks it before anything else is consumed.
pub(crate) fn expect_chunk_id(reader: &mut impl Read, expected: ChunkId) -> RiffcodecResult<()> {
    let bytes = read_chunk_bytes::<TAG_LEN>(reader, expected)?;

    let found = ChunkId::new(bytes);
    if found != expected {
        return Err(RiffcodecError::invalid_tag(expected, found));
    }

    Ok(())
}

/// Reads the next `N` bytes belonging to `chunk`, mapping a short stream to
/// [`RiffcodecError::ShortRead`].
pub(crate) fn read_chunk_bytes<const N: usize>(
    reader: &mut impl Read,
    chunk: ChunkId,
) -> RiffcodecResult<[u8; N]> {
    read_array(reader).map_err(|e| RiffcodecError::from_chunk_read(chunk, e))
}
