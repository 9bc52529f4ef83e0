//! JPEG 2000 (ISO/IEC 15444-1) decode adapter.
//!
//! A payload arrives either boxed (JP2 file format) or as a raw codestream
//! (J2K); the signature bytes at offset zero tell the two apart before the
//! engine is constructed.

pub mod decoder;

pub use decoder::decode_jpeg2000;

/// RFC 3745 JP2 signature box: the full 12-byte form.
pub const JP2_RFC3745_MAGIC: [u8; 12] = [
    0x00, 0x00, 0x00, 0x0C, 0x6A, 0x50, 0x20, 0x20, 0x0D, 0x0A, 0x87, 0x0A,
];

/// Legacy four-byte JP2 magic, accepted at offset zero on its own.
pub const JP2_MAGIC: [u8; 4] = [0x0D, 0x0A, 0x87, 0x0A];

/// SOC + SIZ marker pair opening a raw J2K codestream.
pub const J2K_CODESTREAM_MAGIC: [u8; 4] = [0xFF, 0x4F, 0xFF, 0x51];

/// The two codestream framings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodestreamFormat {
    Jp2,
    J2k,
}

/// Identify the codec family from the payload's first bytes, or `None` when
/// neither signature matches.
pub fn probe_signature(data: &[u8]) -> Option<CodestreamFormat> {
    if data.starts_with(&JP2_RFC3745_MAGIC) || data.starts_with(&JP2_MAGIC) {
        Some(CodestreamFormat::Jp2)
    } else if data.starts_with(&J2K_CODESTREAM_MAGIC) {
        Some(CodestreamFormat::J2k)
    } else {
        None
    }
}
