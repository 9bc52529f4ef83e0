use thiserror::Error;

/// Fatal decode failures.
///
/// Any of these abandons the in-flight decode; the contents of the context's
/// decoded buffer are unspecified afterwards and the host should discard it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DecodeError {
    /// The encoded payload ended before the decoder got what it needed.
    #[error("{context}: encoded data ends prematurely")]
    InputExhausted { context: &'static str },

    /// The payload's framing is inconsistent (bad segment table, offsets
    /// outside the payload, and the like).
    #[error("{context}: malformed input: {reason}")]
    MalformedInput {
        context: &'static str,
        reason: String,
    },

    /// A write would land past the end of the decoded buffer.
    #[error("{context}: write exceeds the decoded buffer ({size} bytes)")]
    OutputOverrun { context: &'static str, size: usize },

    /// RLE segment index outside `0..segment_count`.
    #[error("RleDecoder::decode_segment: segment number out of range ({segment})")]
    SegmentOutOfRange { segment: usize },

    /// Neither the JPEG stream nor the context metadata yielded a bit depth.
    #[error("DecodeJpeg: JPEG bit depth is 0")]
    UnknownBitDepth,

    /// The recovered bit depth has no matching baseline engine.
    #[error("DecodeJpeg: unsupported JPEG bit depth ({0})")]
    UnsupportedBitDepth(u32),

    /// Colorspace conversion was requested for two's-complement samples.
    #[error("{context}: JPEG codec unable to perform colorspace conversion on signed pixel data")]
    SignedColorConversion { context: &'static str },

    /// The payload matches neither the JP2 signatures nor the J2K codestream magic.
    #[error("DecodeJpeg2000: unrecognized JPEG 2000 signature")]
    UnknownCodestreamFormat,

    /// The geometry in the context (or recovered from the stream) is one the
    /// decoders cannot scatter samples into.
    #[error("{context}: unsupported geometry: {reason}")]
    UnsupportedGeometry {
        context: &'static str,
        reason: String,
    },

    /// A codec engine reported failure; `message` is the engine's own text.
    #[error("{context}: {message}")]
    Engine {
        context: &'static str,
        message: String,
    },
}
