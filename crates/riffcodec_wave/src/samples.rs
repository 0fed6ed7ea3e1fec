use log::debug;
use num_traits::{
    ops::bytes::{FromBytes, ToBytes},
    AsPrimitive, NumCast, PrimInt,
};
use riffcodec_core::{RiffcodecError, RiffcodecResult};
use std::{io::Read, mem::size_of};

/// Upper bound on samples preallocated across all channels of a plane, so a bogus
/// declared length or channel count fails on read instead of on allocation.
const MAX_PREALLOC_SAMPLES: usize = 1 << 16;

/// Supported PCM sample widths.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum BitDepth {
    Eight,
    Sixteen,
    ThirtyTwo,
}

impl BitDepth {
    pub fn bits(self) -> u16 {
        match self {
            Self::Eight => 8,
            Self::Sixteen => 16,
            Self::ThirtyTwo => 32,
        }
    }

    pub fn byte_width(self) -> usize {
        match self {
            Self::Eight => size_of::<i8>(),
            Self::Sixteen => size_of::<i16>(),
            Self::ThirtyTwo => size_of::<i32>(),
        }
    }
}

impl TryFrom<u16> for BitDepth {
    type Error = RiffcodecError;

    #[track_caller]
    fn try_from(bits: u16) -> Result<Self, Self::Error> {
        match bits {
            8 => Ok(Self::Eight),
            16 => Ok(Self::Sixteen),
            32 => Ok(Self::ThirtyTwo),
            _ => Err(RiffcodecError::unsupported_bit_depth(bits)),
        }
    }
}

/// Samples per channel held by a sample region of `byte_len` bytes. Trailing bytes that
/// do not make up a whole frame are ignored.
pub fn n_samples(byte_len: u32, n_channels: u16, depth: BitDepth) -> usize {
    match n_channels {
        0 => 0,
        n => byte_len as usize / n as usize / depth.byte_width(),
    }
}

/// Reads `byte_len` bytes worth of interleaved frames and splits them per channel.
pub fn decode_samples(
    reader: &mut impl Read,
    depth: BitDepth,
    n_channels: u16,
    byte_len: u32,
) -> RiffcodecResult<Vec<Vec<i32>>> {
    if n_channels == 0 {
        return Err(RiffcodecError::invalid_data("format declares zero channels"));
    }

    let n_samples = n_samples(byte_len, n_channels, depth);
    debug!("decoding {n_samples} samples for {n_channels} channels at {} bits", depth.bits());

    match depth {
        BitDepth::Eight => decode_plane::<i8>(reader, n_channels as usize, n_samples),
        BitDepth::Sixteen => decode_plane::<i16>(reader, n_channels as usize, n_samples),
        BitDepth::ThirtyTwo => decode_plane::<i32>(reader, n_channels as usize, n_samples),
    }
}

/// Interleaves `channels` frame by frame and appends them to `out` at the width given by
/// `depth`.
pub fn encode_samples(
    channels: &[Vec<i32>],
    depth: BitDepth,
    out: &mut Vec<u8>,
) -> RiffcodecResult<()> {
    let n_samples = channels.first().map_or(0, Vec::len);
    if channels.iter().any(|channel| channel.len() != n_samples) {
        return Err(RiffcodecError::invalid_input("channels have different lengths"));
    }

    debug!(
        "encoding {n_samples} samples for {} channels at {} bits",
        channels.len(),
        depth.bits()
    );

    match depth {
        BitDepth::Eight => encode_plane::<i8>(channels, n_samples, out),
        BitDepth::Sixteen => encode_plane::<i16>(channels, n_samples, out),
        BitDepth::ThirtyTwo => encode_plane::<i32>(channels, n_samples, out),
    }
}

trait PcmSample:
    PrimInt + AsPrimitive<i32> + ToBytes + FromBytes<Bytes = <Self as ToBytes>::Bytes>
{
}

impl<T> PcmSample for T where
    T: PrimInt + AsPrimitive<i32> + ToBytes + FromBytes<Bytes = <T as ToBytes>::Bytes>
{
}

/// Per-channel capacity reserved up front; the sum over all channels stays within
/// [`MAX_PREALLOC_SAMPLES`].
fn prealloc_len(n_channels: usize, n_samples: usize) -> usize {
    n_samples.min(MAX_PREALLOC_SAMPLES / n_channels.max(1))
}

fn decode_plane<T: PcmSample>(
    reader: &mut impl Read,
    n_channels: usize,
    n_samples: usize,
) -> RiffcodecResult<Vec<Vec<i32>>> {
    let mut channels = (0..n_channels)
        .map(|_| Vec::with_capacity(prealloc_len(n_channels, n_samples)))
        .collect::<Vec<_>>();

    if n_samples == 0 {
        return Ok(channels);
    }

    let width = size_of::<T>();
    let mut frame = vec![0u8; width * n_channels];

    for _ in 0..n_samples {
        reader
            .read_exact(&mut frame)
            .map_err(|e| RiffcodecError::sample_read_failure(e))?;

        for (channel, raw) in channels.iter_mut().zip(frame.chunks_exact(width)) {
            channel.push(decode_sample::<T>(raw));
        }
    }

    Ok(channels)
}

fn encode_plane<T: PcmSample>(
    channels: &[Vec<i32>],
    n_samples: usize,
    out: &mut Vec<u8>,
) -> RiffcodecResult<()> {
    out.reserve(n_samples * channels.len() * size_of::<T>());

    for i in 0..n_samples {
        for channel in channels {
            let sample = <T as NumCast>::from(channel[i])
                .ok_or_else(|| RiffcodecError::invalid_input("sample out of range for bit depth"))?;

            out.extend_from_slice(sample.to_le_bytes().as_ref());
        }
    }

    Ok(())
}

#[inline]
fn decode_sample<T: PcmSample>(raw: &[u8]) -> i32 {
    let mut bytes = T::zero().to_le_bytes();
    bytes.as_mut().copy_from_slice(raw);

    <T as FromBytes>::from_le_bytes(&bytes).as_()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{self, Cursor, ErrorKind};

    #[test]
    fn sample_count_divides_by_channels_and_width() {
        assert_eq!(n_samples(8, 2, BitDepth::Sixteen), 2);
        assert_eq!(n_samples(9, 2, BitDepth::Sixteen), 2);
        assert_eq!(n_samples(12, 3, BitDepth::Eight), 4);
        assert_eq!(n_samples(16, 1, BitDepth::ThirtyTwo), 4);
        assert_eq!(n_samples(0, 2, BitDepth::Sixteen), 0);
    }

    #[test]
    fn unsupported_depths_are_rejected() {
        for bits in [0u16, 1, 4, 12, 24, 64] {
            match BitDepth::try_from(bits) {
                Err(RiffcodecError::UnsupportedBitDepth { bits: found, .. }) => {
                    assert_eq!(found, bits)
                }
                result => panic!("expected RiffcodecError::UnsupportedBitDepth found: {result:?}"),
            }
        }
    }

    #[test]
    fn frames_are_channel_minor() {
        let bytes: [u8; 8] = [0x01, 0x00, 0x02, 0x00, 0x03, 0x00, 0x04, 0x00];
        let channels =
            decode_samples(&mut Cursor::new(bytes), BitDepth::Sixteen, 2, 8).unwrap();

        assert_eq!(channels, [vec![1, 3], vec![2, 4]]);
    }

    #[test]
    fn zero_length_region_reads_nothing() {
        struct Unreadable;

        impl Read for Unreadable {
            fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
                Err(io::Error::new(ErrorKind::Other, "read attempted"))
            }
        }

        let channels = decode_samples(&mut Unreadable, BitDepth::Sixteen, 2, 0).unwrap();
        assert_eq!(channels, [Vec::<i32>::new(), Vec::new()]);
    }

    #[test]
    fn zero_channels_are_invalid() {
        match decode_samples(&mut Cursor::new([0u8; 4]), BitDepth::Sixteen, 0, 4) {
            Err(RiffcodecError::InvalidData { .. }) => (),
            result => panic!("expected RiffcodecError::InvalidData found: {result:?}"),
        }
    }

    #[test]
    fn truncated_frame_is_sample_read_failure() {
        let bytes: [u8; 3] = [0x01, 0x00, 0x02];

        match decode_samples(&mut Cursor::new(bytes), BitDepth::Sixteen, 2, 4) {
            Err(RiffcodecError::SampleReadFailure { error, .. }) => {
                assert_eq!(error.kind(), ErrorKind::UnexpectedEof)
            }
            result => panic!("expected RiffcodecError::SampleReadFailure found: {result:?}"),
        }
    }

    #[cfg(debug_assertions)]
    #[test]
    fn sample_read_failure_points_at_the_frame_read() {
        let error = decode_samples(&mut Cursor::new([0u8; 1]), BitDepth::Sixteen, 1, 2)
            .expect_err("stream ends mid-frame");

        assert!(format!("{error:?}").contains("samples.rs"), "{error:?}");
    }

    #[test]
    fn preallocation_is_bounded_across_channels() {
        for n_channels in [1, 2, 6, 1000, u16::MAX as usize] {
            let len = prealloc_len(n_channels, u32::MAX as usize);
            assert!(len * n_channels <= MAX_PREALLOC_SAMPLES, "{n_channels} channels");
        }

        assert_eq!(prealloc_len(2, 10), 10);
        assert_eq!(prealloc_len(1, u32::MAX as usize), MAX_PREALLOC_SAMPLES);
    }

    #[test]
    fn maximal_channel_count_fails_on_read() {
        match decode_samples(&mut io::empty(), BitDepth::Eight, u16::MAX, u32::MAX) {
            Err(RiffcodecError::SampleReadFailure { error, .. }) => {
                assert_eq!(error.kind(), ErrorKind::UnexpectedEof)
            }
            result => panic!("expected RiffcodecError::SampleReadFailure found: {result:?}"),
        }
    }

    #[test]
    fn mismatched_channel_lengths_are_rejected() {
        let mut out = Vec::new();

        match encode_samples(&[vec![1, 2], vec![3]], BitDepth::Sixteen, &mut out) {
            Err(RiffcodecError::InvalidInput { .. }) => (),
            result => panic!("expected RiffcodecError::InvalidInput found: {result:?}"),
        }
        assert!(out.is_empty());
    }

    #[test]
    fn out_of_range_samples_are_rejected() {
        let mut out = Vec::new();

        match encode_samples(&[vec![128]], BitDepth::Eight, &mut out) {
            Err(RiffcodecError::InvalidInput { .. }) => (),
            result => panic!("expected RiffcodecError::InvalidInput found: {result:?}"),
        }

        match encode_samples(&[vec![i16::MIN as i32 - 1]], BitDepth::Sixteen, &mut out) {
            Err(RiffcodecError::InvalidInput { .. }) => (),
            result => panic!("expected RiffcodecError::InvalidInput found: {result:?}"),
        }
    }

    macro_rules! impl_test {
        ($name:ident, $depth:expr, $bytes:expr, $samples:expr) => {
            mod $name {
                use super::super::*;
                use std::io::Cursor;

                const BYTES: &[u8] = &$bytes;
                const SAMPLES: &[i32] = &$samples;

                #[test]
                fn decodes_signed_little_endian() {
                    let channels = decode_samples(
                        &mut Cursor::new(BYTES),
                        $depth,
                        1,
                        BYTES.len() as u32,
                    )
                    .unwrap();

                    assert_eq!(channels, [SAMPLES.to_vec()]);
                }

                #[test]
                fn encodes_at_declared_width() {
                    let mut out = Vec::new();
                    encode_samples(&[SAMPLES.to_vec()], $depth, &mut out).unwrap();

                    assert_eq!(out, BYTES);
                }
            }
        };
    }

    impl_test!(eight_bit, BitDepth::Eight, [0xff, 0x7f, 0x80, 0x00], [-1, 127, -128, 0]);
    impl_test!(
        sixteen_bit,
        BitDepth::Sixteen,
        [0xff, 0xff, 0xff, 0x7f, 0x00, 0x80, 0x34, 0x12],
        [-1, i16::MAX as i32, i16::MIN as i32, 0x1234]
    );
    impl_test!(
        thirty_two_bit,
        BitDepth::ThirtyTwo,
        [0xff, 0xff, 0xff, 0xff, 0x00, 0x00, 0x00, 0x80, 0x78, 0x56, 0x34, 0x12],
        [-1, i32::MIN, 0x1234_5678]
    );
}
