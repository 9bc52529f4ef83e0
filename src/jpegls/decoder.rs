//! JPEG-LS decode adapter over the CharLS engine.

use crate::context::{DecoderContext, DecoderParameters};
use crate::error::DecodeError;
use crate::jpegls::header::read_frame_header;

/// Decode a JPEG-LS payload into the context's decoded buffer.
///
/// The buffer is sized from the stream's own frame header, not from the
/// context geometry. The engine always receives the full encoded span and is
/// never asked for BGR reordering.
pub fn decode_jpegls(
    ctx: &mut DecoderContext,
    _params: &DecoderParameters,
) -> Result<(), DecodeError> {
    let info = read_frame_header(ctx.encoded_buffer.as_slice())?;

    let bytes_per_sample = (info.bits_per_sample as usize).div_ceil(8);
    let size = info.width as usize
        * info.height as usize
        * info.component_count as usize
        * bytes_per_sample;
    ctx.decoded_buffer.reset(size);

    let mut engine = charls::CharLS::default();
    let data = engine
        .decode(ctx.encoded_buffer.as_slice())
        .map_err(|error| DecodeError::Engine {
            context: "JpeglsDecoder::decode",
            message: error.to_string(),
        })?;

    let out = ctx.decoded_buffer.as_mut_slice();
    if data.len() > out.len() {
        return Err(DecodeError::OutputOverrun {
            context: "JpeglsDecoder::decode",
            size: out.len(),
        });
    }
    out[..data.len()].copy_from_slice(&data);
    Ok(())
}
