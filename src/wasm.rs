//! WebAssembly bindings.
//!
//! Thin wrappers for JavaScript hosts: each decoder takes the encoded bytes
//! plus the geometry scalars it needs and returns the decoded bytes. The host
//! provides `onNativePixelDecoderMessage` for non-fatal engine messages and
//! `onNativePixelDecoderException` for fatal errors; fatal errors are also
//! thrown as the returned `Err`.

use wasm_bindgen::prelude::*;

use crate::context::{DecoderContext, DecoderParameters};
use crate::decode;
use crate::error::DecodeError;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_name = onNativePixelDecoderMessage)]
    fn on_native_pixel_decoder_message(message: &str, length: usize);

    #[wasm_bindgen(js_name = onNativePixelDecoderException)]
    fn on_native_pixel_decoder_exception(message: &str, length: usize);
}

fn context_for(data: &[u8]) -> DecoderContext {
    let mut ctx = DecoderContext::new();
    ctx.encoded_buffer.assign(data);
    ctx.set_message_sink(Box::new(|text| {
        on_native_pixel_decoder_message(text, text.len());
    }));
    ctx
}

fn throw(error: DecodeError) -> JsValue {
    let message = error.to_string();
    on_native_pixel_decoder_exception(&message, message.len());
    JsValue::from_str(&message)
}

fn take_decoded(mut ctx: DecoderContext) -> Vec<u8> {
    std::mem::take(&mut ctx.decoded_buffer).into_vec()
}

/// Decode a DICOM RLE payload to raw pixels.
#[wasm_bindgen]
pub fn decode_rle(
    data: &[u8],
    columns: u32,
    rows: u32,
    bits_allocated: u32,
    samples_per_pixel: u32,
    planar_configuration: u32,
) -> Result<Vec<u8>, JsValue> {
    let mut ctx = context_for(data);
    ctx.columns = columns;
    ctx.rows = rows;
    ctx.bits_allocated = bits_allocated;
    ctx.samples_per_pixel = samples_per_pixel;
    ctx.planar_configuration = planar_configuration;

    decode::decode_rle(&mut ctx).map_err(throw)?;
    Ok(take_decoded(ctx))
}

/// Decode a baseline/extended/lossless JPEG payload to raw pixels.
#[wasm_bindgen]
pub fn decode_jpeg(
    data: &[u8],
    bits_allocated: u32,
    bits_stored: u32,
    pixel_representation: u32,
    convert_colorspace_to_rgb: bool,
) -> Result<Vec<u8>, JsValue> {
    let mut ctx = context_for(data);
    ctx.bits_allocated = bits_allocated;
    ctx.bits_stored = bits_stored;
    ctx.pixel_representation = pixel_representation;

    let params = DecoderParameters {
        convert_colorspace_to_rgb,
    };
    decode::decode_jpeg(&mut ctx, &params).map_err(throw)?;
    Ok(take_decoded(ctx))
}

/// Decode a JPEG-LS payload to raw pixels.
#[wasm_bindgen]
pub fn decode_jpegls(data: &[u8]) -> Result<Vec<u8>, JsValue> {
    let mut ctx = context_for(data);
    decode::decode_jpegls(&mut ctx, &DecoderParameters::default()).map_err(throw)?;
    Ok(take_decoded(ctx))
}

/// Decode a JPEG 2000 payload to raw pixels.
#[wasm_bindgen]
pub fn decode_jpeg2000(
    data: &[u8],
    columns: u32,
    rows: u32,
    planar_configuration: u32,
) -> Result<Vec<u8>, JsValue> {
    let mut ctx = context_for(data);
    ctx.columns = columns;
    ctx.rows = rows;
    ctx.planar_configuration = planar_configuration;

    decode::decode_jpeg2000(&mut ctx, &DecoderParameters::default()).map_err(throw)?;
    Ok(take_decoded(ctx))
}
