//! Conformance scenarios for the RLE decode path: literal and repeat runs,
//! planar and interleaved scatter, multi-byte sample placement, and the
//! buffer invariants the host relies on.

use dicompix_rs::decode::decode_rle;
use dicompix_rs::DecoderContext;

/// 64-byte RLE header: segment count plus up to fifteen offsets.
fn rle_header(offsets: &[u32]) -> Vec<u8> {
    let mut payload = Vec::with_capacity(64);
    payload.extend_from_slice(&(offsets.len() as u32).to_le_bytes());
    for index in 0..15 {
        let offset = offsets.get(index).copied().unwrap_or(0);
        payload.extend_from_slice(&offset.to_le_bytes());
    }
    payload
}

fn context(columns: u32, rows: u32, bits_allocated: u32, spp: u32, planar: u32) -> DecoderContext {
    let mut ctx = DecoderContext::new();
    ctx.columns = columns;
    ctx.rows = rows;
    ctx.bits_allocated = bits_allocated;
    ctx.samples_per_pixel = spp;
    ctx.planar_configuration = planar;
    ctx
}

#[test]
fn single_segment_literal_run() {
    let mut payload = rle_header(&[64]);
    payload.extend_from_slice(&[0x03, 0x0A, 0x0B, 0x0C, 0x0D]);

    let mut ctx = context(4, 1, 8, 1, 0);
    ctx.encoded_buffer.assign(&payload);
    decode_rle(&mut ctx).unwrap();

    assert_eq!(ctx.decoded_buffer.as_slice(), &[0x0A, 0x0B, 0x0C, 0x0D]);
}

#[test]
fn single_segment_repeat_run() {
    let mut payload = rle_header(&[64]);
    payload.extend_from_slice(&[0xFD, 0x55]);

    let mut ctx = context(4, 1, 8, 1, 0);
    ctx.encoded_buffer.assign(&payload);
    decode_rle(&mut ctx).unwrap();

    assert_eq!(ctx.decoded_buffer.as_slice(), &[0x55; 4]);
}

/// Three segments of `01 02` land as planes when the context is planar.
#[test]
fn three_segment_planar_rgb() {
    let mut payload = rle_header(&[64, 67, 70]);
    for _ in 0..3 {
        payload.extend_from_slice(&[0x01, 0x01, 0x02]);
    }

    let mut ctx = context(2, 1, 8, 3, 1);
    ctx.encoded_buffer.assign(&payload);
    decode_rle(&mut ctx).unwrap();

    assert_eq!(ctx.decoded_buffer.as_slice(), &[1, 2, 1, 2, 1, 2]);
}

/// The same payload interleaves sample-by-sample when the context is chunky.
#[test]
fn three_segment_interleaved_rgb() {
    let mut payload = rle_header(&[64, 67, 70]);
    for _ in 0..3 {
        payload.extend_from_slice(&[0x01, 0x01, 0x02]);
    }

    let mut ctx = context(2, 1, 8, 3, 0);
    ctx.encoded_buffer.assign(&payload);
    decode_rle(&mut ctx).unwrap();

    assert_eq!(ctx.decoded_buffer.as_slice(), &[1, 1, 1, 2, 2, 2]);
}

/// With 16-bit samples, segment `s` carries byte plane `s` and lands at byte
/// `bytes_per_sample - s - 1` within each sample.
#[test]
fn sixteen_bit_sample_byte_placement() {
    let mut payload = rle_header(&[64, 67]);
    payload.extend_from_slice(&[0x01, 0xAA, 0xBB]);
    payload.extend_from_slice(&[0x01, 0xCC, 0xDD]);

    let mut ctx = context(2, 1, 16, 1, 0);
    ctx.encoded_buffer.assign(&payload);
    decode_rle(&mut ctx).unwrap();

    assert_eq!(ctx.decoded_buffer.as_slice(), &[0xCC, 0xAA, 0xDD, 0xBB]);
}

/// Offsets all pointing at the payload end decode to a zero fill of the full
/// declared geometry.
#[test]
fn empty_segments_zero_fill_the_output() {
    let payload = rle_header(&[64]);

    let mut ctx = context(4, 2, 8, 1, 0);
    ctx.encoded_buffer.assign(&payload);
    decode_rle(&mut ctx).unwrap();

    assert_eq!(ctx.decoded_buffer.len(), 8);
    assert!(ctx.decoded_buffer.as_slice().iter().all(|&b| b == 0));
}

/// `decoded_buffer.size == columns · rows · ceil(bits_allocated/8) · spp`
/// for any successful decode, and the encoded bytes are untouched.
#[test]
fn buffer_invariants_hold() {
    let mut payload = rle_header(&[64]);
    payload.extend_from_slice(&[0xFD, 0x55]);
    let pristine = payload.clone();

    let mut ctx = context(4, 1, 8, 1, 0);
    ctx.encoded_buffer.assign(&payload);
    decode_rle(&mut ctx).unwrap();

    assert_eq!(ctx.decoded_buffer.len(), 4 * 1 * 1 * 1);
    assert_eq!(ctx.encoded_buffer.as_slice(), pristine.as_slice());
}

/// A pad byte (`-128`) between runs is skipped, not treated as data or error.
#[test]
fn pad_bytes_are_ignored_between_runs() {
    let mut payload = rle_header(&[64]);
    payload.extend_from_slice(&[0x80, 0x01, 0x0A, 0x0B, 0x80, 0xFF, 0x0C]);

    let mut ctx = context(4, 1, 8, 1, 0);
    ctx.encoded_buffer.assign(&payload);
    decode_rle(&mut ctx).unwrap();

    assert_eq!(ctx.decoded_buffer.as_slice(), &[0x0A, 0x0B, 0x0C, 0x0C]);
}
