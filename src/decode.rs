//! Dispatcher entry points.
//!
//! Each function sizes and fills the context's decoded buffer from its
//! encoded buffer. On error the decoded buffer is in an unspecified,
//! partially-written state and should be discarded by the caller.

use crate::context::{DecoderContext, DecoderParameters};
use crate::error::DecodeError;
use crate::jpeg1::{decode_jpeg12, decode_jpeg16, decode_jpeg8, scan_bit_depth};
use crate::rle::RleDecoder;

/// Decode a DICOM RLE payload.
///
/// The decoded buffer is sized `columns · rows · bytes-per-sample ·
/// samples-per-pixel`; each RLE segment scatters one byte plane of one sample
/// into it, interleaved or planar per the context flag, most significant
/// byte first within each sample.
pub fn decode_rle(ctx: &mut DecoderContext) -> Result<(), DecodeError> {
    let bytes_per_sample = ctx.bytes_per_sample();
    let pixel_count = ctx.columns as usize * ctx.rows as usize;
    let samples_per_pixel = ctx.samples_per_pixel as usize;
    let interleaved = ctx.planar_configuration == 0;

    let size = pixel_count * bytes_per_sample * samples_per_pixel;
    ctx.decoded_buffer.reset(size);

    let decoder = RleDecoder::new(ctx.encoded_buffer.as_slice())?;
    if decoder.segment_count() > 0 && bytes_per_sample == 0 {
        return Err(DecodeError::UnsupportedGeometry {
            context: "DecodeRle",
            reason: "bits allocated is 0".into(),
        });
    }

    for segment in 0..decoder.segment_count() {
        let sample = segment / bytes_per_sample;
        let sample_byte = segment % bytes_per_sample;

        let base = if interleaved {
            sample * bytes_per_sample
        } else {
            sample * bytes_per_sample * pixel_count
        };
        let start = base + (bytes_per_sample - sample_byte - 1);
        let stride = if interleaved {
            samples_per_pixel * bytes_per_sample
        } else {
            bytes_per_sample
        };

        decoder.decode_segment(segment, ctx.decoded_buffer.as_mut_slice(), start, stride)?;
    }

    Ok(())
}

/// Decode a baseline/extended/lossless JPEG payload.
///
/// The sample precision is recovered from the stream's SOF marker, falling
/// back to the context's `bits_stored` when the scan comes up empty, and the
/// matching engine variant is selected: ≤8, ≤12 or ≤16 bits.
pub fn decode_jpeg(ctx: &mut DecoderContext, params: &DecoderParameters) -> Result<(), DecodeError> {
    let mut bit_depth = scan_bit_depth(ctx.encoded_buffer.as_slice());
    if bit_depth == 0 {
        bit_depth = ctx.bits_stored;
    }
    if bit_depth == 0 {
        return Err(DecodeError::UnknownBitDepth);
    }

    if bit_depth <= 8 {
        decode_jpeg8(ctx, params)
    } else if bit_depth <= 12 {
        decode_jpeg12(ctx, params)
    } else if bit_depth <= 16 {
        decode_jpeg16(ctx, params)
    } else {
        Err(DecodeError::UnsupportedBitDepth(bit_depth))
    }
}

/// Decode a JPEG-LS payload. See [`crate::jpegls::decode_jpegls`].
pub fn decode_jpegls(
    ctx: &mut DecoderContext,
    params: &DecoderParameters,
) -> Result<(), DecodeError> {
    crate::jpegls::decode_jpegls(ctx, params)
}

/// Decode a JPEG 2000 payload. See [`crate::jpeg2000::decode_jpeg2000`].
pub fn decode_jpeg2000(
    ctx: &mut DecoderContext,
    params: &DecoderParameters,
) -> Result<(), DecodeError> {
    crate::jpeg2000::decode_jpeg2000(ctx, params)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unrecoverable_bit_depth_is_fatal() {
        let mut ctx = DecoderContext::new();
        ctx.bits_stored = 0;
        ctx.encoded_buffer.assign(&[0xFF, 0xD8, 0xFF, 0xD9]);

        assert_eq!(
            decode_jpeg(&mut ctx, &DecoderParameters::default()),
            Err(DecodeError::UnknownBitDepth)
        );
    }

    #[test]
    fn oversized_bit_depth_is_fatal() {
        let mut ctx = DecoderContext::new();
        // SOF0 declaring 17-bit samples.
        ctx.encoded_buffer
            .assign(&[0xFF, 0xC0, 0x00, 0x0B, 0x11, 0x00, 0x01, 0x00, 0x01, 0x01]);

        assert_eq!(
            decode_jpeg(&mut ctx, &DecoderParameters::default()),
            Err(DecodeError::UnsupportedBitDepth(17))
        );
    }

    #[test]
    fn rle_with_segments_needs_a_byte_stride() {
        let mut ctx = DecoderContext::new();
        ctx.columns = 2;
        ctx.rows = 1;
        ctx.bits_allocated = 0;
        ctx.samples_per_pixel = 1;

        let mut payload = vec![0u8; 64];
        payload[0] = 1;
        payload[4..8].copy_from_slice(&64u32.to_le_bytes());
        ctx.encoded_buffer.assign(&payload);

        assert!(matches!(
            decode_rle(&mut ctx),
            Err(DecodeError::UnsupportedGeometry { .. })
        ));
    }
}
