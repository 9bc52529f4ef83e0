//! Decoder context and parameters.
//!
//! A [`DecoderContext`] is owned by the host: it carries the pixel geometry,
//! the encoded payload and, after a successful decode, the decoded bytes.
//! Contexts are plain state; all decoding happens in [`crate::decode`].

/// Host-installable sink for non-fatal decoder messages (engine info and
/// warnings). Fatal errors travel through `Result`, not the sink.
pub type MessageSink = Box<dyn FnMut(&str) + Send>;

/// An owning, zero-filled byte buffer.
///
/// `reset` discards the previous allocation. A buffer belongs to exactly one
/// context; decoders only ever see it as a slice.
#[derive(Debug, Default)]
pub struct PixelBuffer {
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Discard the current contents and reallocate `size` zeroed bytes.
    pub fn reset(&mut self, size: usize) {
        self.data = vec![0; size];
    }

    /// Replace the contents with a copy of `bytes`.
    pub fn assign(&mut self, bytes: &[u8]) {
        self.data = bytes.to_vec();
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Consume the buffer, yielding its bytes.
    pub fn into_vec(self) -> Vec<u8> {
        self.data
    }
}

/// Geometry metadata and payload buffers for one decode call.
///
/// The numeric fields mirror the image module attributes the host already
/// has: `columns`/`rows` in samples, `bits_allocated`/`bits_stored` per
/// sample, `pixel_representation` 0 = unsigned / 1 = two's complement,
/// `planar_configuration` 0 = interleaved / 1 = planar.
/// `photometric_interpretation` is an opaque tag carried for the host's
/// benefit; the decoders never branch on it.
#[derive(Default)]
pub struct DecoderContext {
    pub columns: u32,
    pub rows: u32,
    pub bits_allocated: u32,
    pub bits_stored: u32,
    pub samples_per_pixel: u32,
    pub pixel_representation: u32,
    pub planar_configuration: u32,
    pub photometric_interpretation: u32,

    pub encoded_buffer: PixelBuffer,
    pub decoded_buffer: PixelBuffer,

    message_sink: Option<MessageSink>,
}

impl DecoderContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bytes needed to store one sample of `bits_allocated` bits.
    pub fn bytes_per_sample(&self) -> usize {
        (self.bits_allocated as usize).div_ceil(8)
    }

    /// Route non-fatal decoder messages to the given sink instead of the
    /// default `tracing` target.
    pub fn set_message_sink(&mut self, sink: MessageSink) {
        self.message_sink = Some(sink);
    }

    pub(crate) fn post_message(&mut self, text: &str) {
        match &mut self.message_sink {
            Some(sink) => sink(text),
            None => tracing::debug!(target: "dicompix", "{text}"),
        }
    }
}

impl std::fmt::Debug for DecoderContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DecoderContext")
            .field("columns", &self.columns)
            .field("rows", &self.rows)
            .field("bits_allocated", &self.bits_allocated)
            .field("bits_stored", &self.bits_stored)
            .field("samples_per_pixel", &self.samples_per_pixel)
            .field("pixel_representation", &self.pixel_representation)
            .field("planar_configuration", &self.planar_configuration)
            .field("photometric_interpretation", &self.photometric_interpretation)
            .field("encoded_buffer", &self.encoded_buffer.len())
            .field("decoded_buffer", &self.decoded_buffer.len())
            .finish()
    }
}

/// Options recognized by the decoders.
#[derive(Debug, Clone, Copy, Default)]
pub struct DecoderParameters {
    /// Ask the baseline JPEG engine to convert YCbCr/RGB input to RGB output.
    /// Ignored by the other codecs.
    pub convert_colorspace_to_rgb: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_discards_and_zero_fills() {
        let mut buffer = PixelBuffer::default();
        buffer.assign(&[1, 2, 3]);
        buffer.reset(5);
        assert_eq!(buffer.len(), 5);
        assert!(buffer.as_slice().iter().all(|&b| b == 0));

        buffer.reset(0);
        assert!(buffer.is_empty());
    }

    #[test]
    fn bytes_per_sample_rounds_up() {
        let mut ctx = DecoderContext::new();
        for (bits, bytes) in [(0, 0), (1, 1), (8, 1), (12, 2), (16, 2)] {
            ctx.bits_allocated = bits;
            assert_eq!(ctx.bytes_per_sample(), bytes);
        }
    }

    #[test]
    fn message_sink_receives_posts() {
        use std::sync::{Arc, Mutex};

        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink_seen = Arc::clone(&seen);

        let mut ctx = DecoderContext::new();
        ctx.set_message_sink(Box::new(move |text| {
            sink_seen.lock().unwrap().push(text.to_owned());
        }));
        ctx.post_message("engine says hello");

        assert_eq!(seen.lock().unwrap().as_slice(), ["engine says hello"]);
    }
}
