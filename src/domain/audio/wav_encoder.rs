//! PCM WAV encoder
//!
//! Output layout (all integers little-endian):
//! - 44-byte canonical RIFF/WAVE header
//! - 16-bit signed PCM, mono, sample rate passed through unchanged
//!
//! The channel count written into the header is always 1. Sources deliver
//! channel 0 only, so any wider upstream layout is already flattened.

use crate::domain::recording::SampleBlock;

/// Size of the RIFF/WAVE header in bytes
pub const HEADER_LEN: usize = 44;

/// Channels written into every header
pub const NUM_CHANNELS: u16 = 1;

/// Bits per encoded sample
pub const BITS_PER_SAMPLE: u16 = 16;

const BYTES_PER_SAMPLE: usize = (BITS_PER_SAMPLE / 8) as usize;

/// PCM format tag in the `fmt ` chunk
const FORMAT_PCM: u16 = 1;

/// Size of the `fmt ` chunk body for plain PCM
const FMT_CHUNK_LEN: u32 = 16;

/// Encode blocks, in order, into a complete mono 16-bit WAV buffer.
///
/// When the blocks hold no samples at all the result is an empty buffer
/// rather than a header describing zero frames.
///
/// Header size fields are 32-bit; for rates or lengths past `u32::MAX`
/// they wrap modulo 2^32.
pub fn encode(blocks: &[SampleBlock], sample_rate: u32) -> Vec<u8> {
    let total_samples: usize = blocks.iter().map(SampleBlock::len).sum();
    if total_samples == 0 {
        return Vec::new();
    }

    let data_len = total_samples * BYTES_PER_SAMPLE;
    let mut out = Vec::with_capacity(HEADER_LEN + data_len);
    write_header(&mut out, data_len as u32, sample_rate);

    for block in blocks {
        for &sample in block.samples() {
            out.extend_from_slice(&quantize(sample).to_le_bytes());
        }
    }

    debug_assert_eq!(out.len(), HEADER_LEN + data_len);
    out
}

fn write_header(out: &mut Vec<u8>, data_len: u32, sample_rate: u32) {
    let block_align = NUM_CHANNELS * BITS_PER_SAMPLE / 8;
    let byte_rate = sample_rate.wrapping_mul(u32::from(block_align));

    // RIFF chunk
    out.extend_from_slice(b"RIFF");
    out.extend_from_slice(&data_len.wrapping_add(36).to_le_bytes());
    out.extend_from_slice(b"WAVE");

    // fmt chunk
    out.extend_from_slice(b"fmt ");
    out.extend_from_slice(&FMT_CHUNK_LEN.to_le_bytes());
    out.extend_from_slice(&FORMAT_PCM.to_le_bytes());
    out.extend_from_slice(&NUM_CHANNELS.to_le_bytes());
    out.extend_from_slice(&sample_rate.to_le_bytes());
    out.extend_from_slice(&byte_rate.to_le_bytes());
    out.extend_from_slice(&block_align.to_le_bytes());
    out.extend_from_slice(&BITS_PER_SAMPLE.to_le_bytes());

    // data chunk
    out.extend_from_slice(b"data");
    out.extend_from_slice(&data_len.to_le_bytes());
}

/// Convert one float sample to signed 16-bit PCM.
///
/// Negative samples scale by 32768 and the rest by 32767, so -1.0 maps to
/// `i16::MIN` and 1.0 to `i16::MAX`. Out-of-range input is clamped first;
/// NaN encodes as 0. Ties round away from zero.
pub fn quantize(sample: f32) -> i16 {
    let s = f64::from(sample.clamp(-1.0, 1.0));
    let scaled = if s < 0.0 { s * 32768.0 } else { s * 32767.0 };
    scaled.round() as i16
}

#[cfg(test)]
mod tests {
    use super::*;

    fn u16_at(bytes: &[u8], offset: usize) -> u16 {
        u16::from_le_bytes([bytes[offset], bytes[offset + 1]])
    }

    fn u32_at(bytes: &[u8], offset: usize) -> u32 {
        u32::from_le_bytes(bytes[offset..offset + 4].try_into().unwrap())
    }

    fn data_samples(bytes: &[u8]) -> Vec<i16> {
        bytes[HEADER_LEN..]
            .chunks_exact(2)
            .map(|c| i16::from_le_bytes([c[0], c[1]]))
            .collect()
    }

    #[test]
    fn no_blocks_encodes_to_nothing() {
        assert!(encode(&[], 44_100).is_empty());
    }

    #[test]
    fn only_empty_blocks_encode_to_nothing() {
        let blocks = vec![SampleBlock::default(), SampleBlock::default()];
        assert!(encode(&blocks, 44_100).is_empty());
    }

    #[test]
    fn header_fields() {
        let blocks = vec![SampleBlock::silence(3), SampleBlock::silence(2)];
        let bytes = encode(&blocks, 22_050);

        assert_eq!(bytes.len(), HEADER_LEN + 10);
        assert_eq!(&bytes[0..4], b"RIFF");
        assert_eq!(u32_at(&bytes, 4), 36 + 10);
        assert_eq!(&bytes[8..12], b"WAVE");
        assert_eq!(&bytes[12..16], b"fmt ");
        assert_eq!(u32_at(&bytes, 16), 16);
        assert_eq!(u16_at(&bytes, 20), 1);
        assert_eq!(u16_at(&bytes, 22), 1);
        assert_eq!(u32_at(&bytes, 24), 22_050);
        assert_eq!(u32_at(&bytes, 28), 44_100);
        assert_eq!(u16_at(&bytes, 32), 2);
        assert_eq!(u16_at(&bytes, 34), 16);
        assert_eq!(&bytes[36..40], b"data");
        assert_eq!(u32_at(&bytes, 40), 10);
    }

    #[test]
    fn asymmetric_scaling() {
        let blocks = vec![SampleBlock::new(vec![0.0, 1.0, -1.0, 0.5, -0.5])];
        let bytes = encode(&blocks, 44_100);
        assert_eq!(data_samples(&bytes), vec![0, 32767, -32768, 16384, -16384]);
    }

    #[test]
    fn clamps_out_of_range() {
        assert_eq!(quantize(1.5), quantize(1.0));
        assert_eq!(quantize(-2.0), quantize(-1.0));
        assert_eq!(quantize(f32::INFINITY), i16::MAX);
        assert_eq!(quantize(f32::NEG_INFINITY), i16::MIN);
    }

    #[test]
    fn nan_encodes_as_zero() {
        assert_eq!(quantize(f32::NAN), 0);
    }

    #[test]
    fn rounds_to_nearest() {
        // 0.25 * 32767 = 8191.75
        assert_eq!(quantize(0.25), 8192);
        // -0.25 * 32768 is exact
        assert_eq!(quantize(-0.25), -8192);
        // 0.1 * 32767 = 3276.7
        assert_eq!(quantize(0.1), 3277);
    }

    #[test]
    fn samples_follow_block_then_index_order() {
        let blocks = vec![
            SampleBlock::new(vec![1.0, 0.0]),
            SampleBlock::default(),
            SampleBlock::new(vec![-1.0]),
        ];
        let bytes = encode(&blocks, 8000);
        assert_eq!(data_samples(&bytes), vec![32767, 0, -32768]);
    }

    #[test]
    fn encoding_is_deterministic() {
        let blocks = vec![SampleBlock::new(vec![0.3, -0.7, 0.99, -0.01])];
        assert_eq!(encode(&blocks, 48_000), encode(&blocks, 48_000));
    }

    #[test]
    fn byte_rate_wraps_like_a_u32_field() {
        let blocks = vec![SampleBlock::silence(1)];
        let bytes = encode(&blocks, u32::MAX);
        assert_eq!(u32_at(&bytes, 24), u32::MAX);
        assert_eq!(u32_at(&bytes, 28), u32::MAX.wrapping_mul(2));
    }
}
