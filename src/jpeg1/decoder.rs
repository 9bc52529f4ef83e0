//! Baseline JPEG decode adapters.
//!
//! The dispatcher picks one of the three entry points by scanned bit depth;
//! all three drive the same engine, which selects its own sample path from
//! the frame header. Keeping the three names keeps the routing contract (and
//! the error tags) aligned with the depth the caller asked for.

use jpeg_decoder::{ColorTransform, Decoder, PixelFormat};

use crate::context::{DecoderContext, DecoderParameters};
use crate::error::DecodeError;
use crate::source::EncodedSource;

/// Decode a payload routed as 8 bits per sample.
pub fn decode_jpeg8(ctx: &mut DecoderContext, params: &DecoderParameters) -> Result<(), DecodeError> {
    decode_baseline(ctx, params, "JpegDecoder8")
}

/// Decode a payload routed as up to 12 bits per sample.
pub fn decode_jpeg12(ctx: &mut DecoderContext, params: &DecoderParameters) -> Result<(), DecodeError> {
    decode_baseline(ctx, params, "JpegDecoder12")
}

/// Decode a payload routed as up to 16 bits per sample.
pub fn decode_jpeg16(ctx: &mut DecoderContext, params: &DecoderParameters) -> Result<(), DecodeError> {
    decode_baseline(ctx, params, "JpegDecoder16")
}

fn decode_baseline(
    ctx: &mut DecoderContext,
    params: &DecoderParameters,
    tag: &'static str,
) -> Result<(), DecodeError> {
    let bytes_per_sample = ctx.bytes_per_sample();
    let signed_samples = ctx.pixel_representation == 1;

    let mut decoder = Decoder::new(EncodedSource::new(ctx.encoded_buffer.as_slice()));
    decoder.read_info().map_err(|error| DecodeError::Engine {
        context: tag,
        message: format!("read_header: {error}"),
    })?;
    let info = decoder.info().ok_or(DecodeError::Engine {
        context: tag,
        message: "read_header: no frame info".into(),
    })?;

    if params.convert_colorspace_to_rgb && info.pixel_format == PixelFormat::RGB24 {
        // The engine already decodes color output to RGB; signed samples have
        // no meaningful RGB conversion.
        if signed_samples {
            return Err(DecodeError::SignedColorConversion { context: tag });
        }
    } else {
        // Pass-through: leave the components exactly as they were encoded.
        decoder.set_color_transform(ColorTransform::None);
    }

    let components = component_count(info.pixel_format);
    let size = info.width as usize * info.height as usize * bytes_per_sample * components;
    ctx.decoded_buffer.reset(size);

    let data = decoder.decode().map_err(|error| DecodeError::Engine {
        context: tag,
        message: format!("decode: {error}"),
    })?;

    let out = ctx.decoded_buffer.as_mut_slice();
    if data.len() > out.len() {
        return Err(DecodeError::OutputOverrun {
            context: tag,
            size: out.len(),
        });
    }
    out[..data.len()].copy_from_slice(&data);
    Ok(())
}

fn component_count(format: PixelFormat) -> usize {
    match format {
        PixelFormat::L8 | PixelFormat::L16 => 1,
        PixelFormat::RGB24 => 3,
        _ => 4,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // SOI + SOF0 only: enough header for the engine to report the frame, with
    // three components so the output format is RGB24.
    fn rgb_frame_header() -> Vec<u8> {
        let mut data = vec![0xFF, 0xD8];
        data.extend_from_slice(&[
            0xFF, 0xC0, 0x00, 0x11, // SOF0, length 17
            0x08, // precision
            0x00, 0x01, 0x00, 0x01, // 1 x 1
            0x03, // three components
            0x01, 0x11, 0x00, 0x02, 0x11, 0x00, 0x03, 0x11, 0x00,
        ]);
        data
    }

    #[test]
    fn signed_conversion_is_rejected_before_decoding() {
        let mut ctx = DecoderContext::new();
        ctx.bits_allocated = 8;
        ctx.pixel_representation = 1;
        ctx.encoded_buffer.assign(&rgb_frame_header());

        let params = DecoderParameters {
            convert_colorspace_to_rgb: true,
        };
        assert!(matches!(
            decode_jpeg8(&mut ctx, &params),
            Err(DecodeError::SignedColorConversion { .. })
        ));
    }

    #[test]
    fn garbage_input_is_an_engine_error() {
        let mut ctx = DecoderContext::new();
        ctx.bits_allocated = 8;
        ctx.encoded_buffer.assign(&[0x00, 0x01, 0x02, 0x03]);

        assert!(matches!(
            decode_jpeg8(&mut ctx, &DecoderParameters::default()),
            Err(DecodeError::Engine { .. })
        ));
    }
}
