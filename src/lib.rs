/*!
# dicompix-rs

`dicompix-rs` turns medically-encoded pixel payloads into raw pixel buffers.
The host hands over one already-extracted compressed payload plus the pixel
geometry it expects; the crate identifies the encoding family, runs the right
decompressor and leaves the bytes in the context for the host to read back.

The DICOM RLE decompressor and the JPEG bit-depth scanner live here in full.
The JPEG-family codecs are thin adapters over dedicated engines: baseline
JPEG through `jpeg-decoder`, JPEG-LS through CharLS, JPEG 2000 through
OpenJPEG.

## Decoding a payload

```rust,no_run
use dicompix_rs::{decode, DecoderContext};

let mut ctx = DecoderContext::new();
ctx.columns = 512;
ctx.rows = 512;
ctx.bits_allocated = 16;
ctx.samples_per_pixel = 1;
// ctx.encoded_buffer.assign(&payload);

decode::decode_rle(&mut ctx)?;
let pixels = ctx.decoded_buffer.as_slice();
# Ok::<(), dicompix_rs::DecodeError>(())
```

JPEG payloads take a parameters record as well:

```rust,no_run
# use dicompix_rs::{decode, DecoderContext, DecoderParameters};
# let mut ctx = DecoderContext::new();
let params = DecoderParameters {
    convert_colorspace_to_rgb: true,
};
decode::decode_jpeg(&mut ctx, &params)?;
# Ok::<(), dicompix_rs::DecodeError>(())
```

The crate never encodes, never resamples and never parses container formats;
it decodes exactly one payload per call. Contexts are independent, so
concurrent decodes on distinct contexts are safe.
*/

pub mod context;
pub mod decode;
pub mod error;
pub mod jpeg1;
pub mod jpeg2000;
pub mod jpeg_marker_code;
pub mod jpegls;
pub mod rle;
pub mod source;

pub mod ffi;

#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use context::{DecoderContext, DecoderParameters, MessageSink, PixelBuffer};
pub use error::DecodeError;

/// Geometry a compressed frame declares about itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameInfo {
    /// Width of the frame in samples.
    pub width: u32,
    /// Height of the frame in samples.
    pub height: u32,
    /// Meaningful bits per sample (up to 16 for medical imagery).
    pub bits_per_sample: i32,
    /// Number of components (1 for grayscale, 3 for color).
    pub component_count: i32,
}
