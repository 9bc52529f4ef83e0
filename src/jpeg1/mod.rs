//! Baseline JPEG family (ISO/IEC 10918-1 / ITU-T T.81).
//!
//! Two pieces: a marker scanner that recovers the sample precision from a
//! Start-of-Frame header without a full parse, and the 8-/12-/16-bit decode
//! adapters over the bundled engine.

pub mod bit_depth;
pub mod decoder;

pub use bit_depth::scan_bit_depth;
pub use decoder::{decode_jpeg12, decode_jpeg16, decode_jpeg8};
