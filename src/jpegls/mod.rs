//! JPEG-LS (ISO/IEC 14495-1 / ITU-T T.87) decode adapter.
//!
//! The frame header is read here — the output buffer is sized from the
//! dimensions the stream itself declares, not from the context metadata —
//! and the CharLS engine decompresses the full encoded span.

pub mod decoder;
pub mod header;

pub use decoder::decode_jpegls;
pub use header::read_frame_header;
