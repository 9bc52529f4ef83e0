//! C foreign function interface.
//!
//! Opaque handles over [`DecoderContext`] and [`DecoderParameters`] plus the
//! accessor and decode symbols a host runtime binds against. Non-fatal
//! messages and fatal errors are delivered through the two callbacks
//! registered with [`RegisterNativePixelDecoderCallbacks`]; decode calls
//! additionally return 0 on success and a nonzero kind code on failure.
#![allow(non_snake_case)]

use std::ffi::CString;
use std::os::raw::{c_char, c_int, c_uchar};
use std::ptr;

use crate::context::{DecoderContext, DecoderParameters};
use crate::decode;
use crate::error::DecodeError;

/// Opaque decoder-context handle.
#[repr(C)]
pub struct NativeDecoderContext {
    _private: [u8; 0],
}

/// Opaque decoder-parameters handle.
#[repr(C)]
pub struct NativeDecoderParameters {
    _private: [u8; 0],
}

/// Host callback taking a message pointer and its byte length.
pub type NativePixelDecoderCallback = extern "C" fn(*const c_char, usize);

struct FfiContext {
    inner: DecoderContext,
    exception_callback: Option<NativePixelDecoderCallback>,
}

unsafe fn context_mut<'a>(ctx: *mut NativeDecoderContext) -> Option<&'a mut FfiContext> {
    unsafe { (ctx as *mut FfiContext).as_mut() }
}

unsafe fn params_mut<'a>(params: *mut NativeDecoderParameters) -> Option<&'a mut DecoderParameters> {
    unsafe { (params as *mut DecoderParameters).as_mut() }
}

fn emit(callback: NativePixelDecoderCallback, text: &str) {
    let length = text.len();
    if let Ok(text) = CString::new(text) {
        callback(text.as_ptr(), length);
    }
}

fn error_code(error: &DecodeError) -> c_int {
    match error {
        DecodeError::InputExhausted { .. } | DecodeError::MalformedInput { .. } => 1,
        DecodeError::OutputOverrun { .. } => 2,
        DecodeError::SegmentOutOfRange { .. } => 3,
        DecodeError::UnknownBitDepth | DecodeError::UnsupportedBitDepth(_) => 4,
        DecodeError::SignedColorConversion { .. } => 5,
        _ => 6,
    }
}

fn finish(state: &mut FfiContext, result: Result<(), DecodeError>) -> c_int {
    match result {
        Ok(()) => 0,
        Err(error) => {
            if let Some(callback) = state.exception_callback {
                emit(callback, &error.to_string());
            }
            error_code(&error)
        }
    }
}

/// Allocate a decoder context. Release with [`ReleaseDecoderContext`].
#[unsafe(no_mangle)]
pub extern "C" fn CreateDecoderContext() -> *mut NativeDecoderContext {
    let state = Box::new(FfiContext {
        inner: DecoderContext::new(),
        exception_callback: None,
    });
    Box::into_raw(state) as *mut NativeDecoderContext
}

/// Free a context created by [`CreateDecoderContext`].
///
/// # Safety
/// `ctx` must be a handle from [`CreateDecoderContext`] not yet released.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn ReleaseDecoderContext(ctx: *mut NativeDecoderContext) {
    if !ctx.is_null() {
        drop(unsafe { Box::from_raw(ctx as *mut FfiContext) });
    }
}

/// Allocate a parameters record. Release with [`ReleaseDecoderParameters`].
#[unsafe(no_mangle)]
pub extern "C" fn CreateDecoderParameters() -> *mut NativeDecoderParameters {
    Box::into_raw(Box::new(DecoderParameters::default())) as *mut NativeDecoderParameters
}

/// Free a parameters record created by [`CreateDecoderParameters`].
///
/// # Safety
/// `params` must be a handle from [`CreateDecoderParameters`] not yet released.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn ReleaseDecoderParameters(params: *mut NativeDecoderParameters) {
    if !params.is_null() {
        drop(unsafe { Box::from_raw(params as *mut DecoderParameters) });
    }
}

/// Register the host's message and exception callbacks on a context. Either
/// may be null to leave that channel on its default.
///
/// # Safety
/// `ctx` must be a valid context handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn RegisterNativePixelDecoderCallbacks(
    ctx: *mut NativeDecoderContext,
    message_callback: Option<NativePixelDecoderCallback>,
    exception_callback: Option<NativePixelDecoderCallback>,
) {
    let Some(state) = (unsafe { context_mut(ctx) }) else {
        return;
    };
    state.exception_callback = exception_callback;
    if let Some(callback) = message_callback {
        state
            .inner
            .set_message_sink(Box::new(move |text| emit(callback, text)));
    }
}

macro_rules! field_accessors {
    ($($get:ident / $set:ident => $field:ident),+ $(,)?) => {
        $(
            /// # Safety
            /// `ctx` must be a valid context handle.
            #[unsafe(no_mangle)]
            pub unsafe extern "C" fn $get(ctx: *mut NativeDecoderContext) -> u32 {
                unsafe { context_mut(ctx) }.map_or(0, |state| state.inner.$field)
            }

            /// # Safety
            /// `ctx` must be a valid context handle.
            #[unsafe(no_mangle)]
            pub unsafe extern "C" fn $set(ctx: *mut NativeDecoderContext, value: u32) {
                if let Some(state) = unsafe { context_mut(ctx) } {
                    state.inner.$field = value;
                }
            }
        )+
    };
}

field_accessors! {
    GetColumns / SetColumns => columns,
    GetRows / SetRows => rows,
    GetBitsAllocated / SetBitsAllocated => bits_allocated,
    GetBitsStored / SetBitsStored => bits_stored,
    GetSamplesPerPixel / SetSamplesPerPixel => samples_per_pixel,
    GetPixelRepresentation / SetPixelRepresentation => pixel_representation,
    GetPlanarConfiguration / SetPlanarConfiguration => planar_configuration,
    GetPhotometricInterpretation / SetPhotometricInterpretation => photometric_interpretation,
}

/// Pointer to the encoded payload bytes.
///
/// # Safety
/// `ctx` must be a valid context handle; the pointer is invalidated by the
/// next buffer mutation on the context.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn GetEncodedBuffer(ctx: *mut NativeDecoderContext) -> *mut c_uchar {
    unsafe { context_mut(ctx) }
        .map_or(ptr::null_mut(), |state| {
            state.inner.encoded_buffer.as_mut_slice().as_mut_ptr()
        })
}

/// # Safety
/// `ctx` must be a valid context handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn GetEncodedBufferSize(ctx: *mut NativeDecoderContext) -> usize {
    unsafe { context_mut(ctx) }.map_or(0, |state| state.inner.encoded_buffer.len())
}

/// Copy `size` bytes from `data` into the context's encoded buffer.
///
/// # Safety
/// `ctx` must be a valid context handle and `data` must point to `size`
/// readable bytes.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn SetEncodedBuffer(
    ctx: *mut NativeDecoderContext,
    data: *const c_uchar,
    size: usize,
) {
    let Some(state) = (unsafe { context_mut(ctx) }) else {
        return;
    };
    if data.is_null() {
        return;
    }
    let bytes = unsafe { std::slice::from_raw_parts(data, size) };
    state.inner.encoded_buffer.assign(bytes);
}

/// Allocate (zero-filled) `size` bytes of encoded-buffer storage.
///
/// # Safety
/// `ctx` must be a valid context handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn SetEncodedBufferSize(ctx: *mut NativeDecoderContext, size: usize) {
    if let Some(state) = unsafe { context_mut(ctx) } {
        state.inner.encoded_buffer.reset(size);
    }
}

/// Pointer to the decoded pixel bytes.
///
/// # Safety
/// `ctx` must be a valid context handle; the pointer is invalidated by the
/// next decode or buffer mutation on the context.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn GetDecodedBuffer(ctx: *mut NativeDecoderContext) -> *mut c_uchar {
    unsafe { context_mut(ctx) }
        .map_or(ptr::null_mut(), |state| {
            state.inner.decoded_buffer.as_mut_slice().as_mut_ptr()
        })
}

/// # Safety
/// `ctx` must be a valid context handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn GetDecodedBufferSize(ctx: *mut NativeDecoderContext) -> usize {
    unsafe { context_mut(ctx) }.map_or(0, |state| state.inner.decoded_buffer.len())
}

/// Copy `size` bytes from `data` into the context's decoded buffer.
///
/// # Safety
/// `ctx` must be a valid context handle and `data` must point to `size`
/// readable bytes.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn SetDecodedBuffer(
    ctx: *mut NativeDecoderContext,
    data: *const c_uchar,
    size: usize,
) {
    let Some(state) = (unsafe { context_mut(ctx) }) else {
        return;
    };
    if data.is_null() {
        return;
    }
    let bytes = unsafe { std::slice::from_raw_parts(data, size) };
    state.inner.decoded_buffer.assign(bytes);
}

/// Allocate (zero-filled) `size` bytes of decoded-buffer storage.
///
/// # Safety
/// `ctx` must be a valid context handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn SetDecodedBufferSize(ctx: *mut NativeDecoderContext, size: usize) {
    if let Some(state) = unsafe { context_mut(ctx) } {
        state.inner.decoded_buffer.reset(size);
    }
}

/// # Safety
/// `params` must be a valid parameters handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn GetConvertColorspaceToRgb(params: *mut NativeDecoderParameters) -> bool {
    unsafe { params_mut(params) }.is_some_and(|p| p.convert_colorspace_to_rgb)
}

/// # Safety
/// `params` must be a valid parameters handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn SetConvertColorspaceToRgb(
    params: *mut NativeDecoderParameters,
    value: bool,
) {
    if let Some(p) = unsafe { params_mut(params) } {
        p.convert_colorspace_to_rgb = value;
    }
}

/// Decode the context's RLE payload. Returns 0 on success.
///
/// # Safety
/// `ctx` must be a valid context handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn DecodeRle(
    ctx: *mut NativeDecoderContext,
    _params: *mut NativeDecoderParameters,
) -> c_int {
    let Some(state) = (unsafe { context_mut(ctx) }) else {
        return -1;
    };
    let result = decode::decode_rle(&mut state.inner);
    finish(state, result)
}

/// Decode the context's baseline-JPEG payload. Returns 0 on success.
///
/// # Safety
/// `ctx` and `params` must be valid handles.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn DecodeJpeg(
    ctx: *mut NativeDecoderContext,
    params: *mut NativeDecoderParameters,
) -> c_int {
    let Some(state) = (unsafe { context_mut(ctx) }) else {
        return -1;
    };
    let params = unsafe { params_mut(params) }.copied().unwrap_or_default();
    let result = decode::decode_jpeg(&mut state.inner, &params);
    finish(state, result)
}

/// Decode the context's JPEG-LS payload. Returns 0 on success.
///
/// # Safety
/// `ctx` and `params` must be valid handles.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn DecodeJpegLs(
    ctx: *mut NativeDecoderContext,
    params: *mut NativeDecoderParameters,
) -> c_int {
    let Some(state) = (unsafe { context_mut(ctx) }) else {
        return -1;
    };
    let params = unsafe { params_mut(params) }.copied().unwrap_or_default();
    let result = decode::decode_jpegls(&mut state.inner, &params);
    finish(state, result)
}

/// Decode the context's JPEG 2000 payload. Returns 0 on success.
///
/// # Safety
/// `ctx` and `params` must be valid handles.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn DecodeJpeg2000(
    ctx: *mut NativeDecoderContext,
    params: *mut NativeDecoderParameters,
) -> c_int {
    let Some(state) = (unsafe { context_mut(ctx) }) else {
        return -1;
    };
    let params = unsafe { params_mut(params) }.copied().unwrap_or_default();
    let result = decode::decode_jpeg2000(&mut state.inner, &params);
    finish(state, result)
}
