//! JPEG 2000 decode adapter over the OpenJPEG-backed engine.

use crate::context::{DecoderContext, DecoderParameters};
use crate::error::DecodeError;
use crate::jpeg2000::probe_signature;

const CONTEXT: &str = "Jpeg2000Decoder::decode";

/// Decode a JP2 or J2K payload into the context's decoded buffer.
///
/// The buffer is sized `columns · rows · components · depth` where `depth`
/// derives from the first component's precision. Sample copy-out follows the
/// layouts the downstream consumers rely on: single-component data is written
/// one byte per sample up to 8-bit precision and as little-endian 16-bit
/// values above that, three-component data byte-per-sample, interleaved or
/// planar per the context flag.
pub fn decode_jpeg2000(
    ctx: &mut DecoderContext,
    _params: &DecoderParameters,
) -> Result<(), DecodeError> {
    let format =
        probe_signature(ctx.encoded_buffer.as_slice()).ok_or(DecodeError::UnknownCodestreamFormat)?;
    ctx.post_message(&format!("Jpeg2000Decoder: {format:?} signature detected"));

    let image =
        jpeg2k::Image::from_bytes(ctx.encoded_buffer.as_slice()).map_err(|error| {
            DecodeError::Engine {
                context: CONTEXT,
                message: error.to_string(),
            }
        })?;

    let components = image.components();
    if components.is_empty() {
        return Err(DecodeError::Engine {
            context: CONTEXT,
            message: "image has no components".into(),
        });
    }

    let precision = components[0].precision();
    let depth = (precision as usize).div_ceil(8);
    if !(1..=4).contains(&depth) {
        return Err(DecodeError::UnsupportedGeometry {
            context: CONTEXT,
            reason: format!("component precision {precision}"),
        });
    }

    let num_pixels = ctx.columns as usize * ctx.rows as usize;
    ctx.decoded_buffer.reset(num_pixels * components.len() * depth);
    let out = ctx.decoded_buffer.as_mut_slice();

    let mut unsupported = None;
    match (components.len(), ctx.planar_configuration) {
        (1, _) => {
            // `depth` only sizes the buffer; the per-sample write width is
            // fixed at one byte or one little-endian 16-bit value.
            let data = components[0].data();
            if precision <= 8 {
                for (dst, &sample) in out.iter_mut().zip(data.iter().take(num_pixels)) {
                    *dst = sample as u8;
                }
            } else {
                for (chunk, &sample) in out.chunks_exact_mut(2).zip(data.iter().take(num_pixels)) {
                    chunk.copy_from_slice(&(sample as u16).to_le_bytes());
                }
            }
        }
        (3, 0) => {
            let (red, green, blue) =
                (components[0].data(), components[1].data(), components[2].data());
            let count = num_pixels.min(red.len()).min(green.len()).min(blue.len());
            for i in 0..count {
                out[i * 3] = red[i] as u8;
                out[i * 3 + 1] = green[i] as u8;
                out[i * 3 + 2] = blue[i] as u8;
            }
        }
        (3, 1) => {
            for (plane, component) in components.iter().enumerate() {
                let base = plane * num_pixels;
                for (i, &sample) in component.data().iter().take(num_pixels).enumerate() {
                    out[base + i] = sample as u8;
                }
            }
        }
        (count, planar) => {
            // Geometry outside the supported set: leave the zero-filled
            // buffer in place and tell the host.
            unsupported = Some(format!(
                "Jpeg2000Decoder: unsupported geometry ({count} components, planar configuration {planar}); no samples copied"
            ));
        }
    }
    if let Some(message) = unsupported {
        ctx.post_message(&message);
    }

    Ok(())
}
