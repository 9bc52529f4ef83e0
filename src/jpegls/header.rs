//! JPEG-LS frame-header reader.

use crate::error::DecodeError;
use crate::jpeg_marker_code::{
    has_length_segment, is_standalone_marker, JpegMarkerCode, JPEG_MARKER_START_BYTE,
};
use crate::FrameInfo;

const CONTEXT: &str = "JpeglsHeader::read_frame_header";

/// Walk the marker stream up to the SOF55 segment and return the frame
/// geometry it declares.
///
/// The stream must open with SOI. Unrelated segments (SPIFF/APPn, LSE,
/// comments) are skipped by their declared length; the walk fails if scan
/// data or the end of the stream arrives before a frame header.
pub fn read_frame_header(data: &[u8]) -> Result<FrameInfo, DecodeError> {
    let mut reader = MarkerReader { data, position: 0 };

    if reader.read_marker()? != JpegMarkerCode::StartOfImage as u8 {
        return Err(DecodeError::MalformedInput {
            context: CONTEXT,
            reason: "missing start-of-image marker".into(),
        });
    }

    loop {
        let code = reader.read_marker()?;
        if code == JpegMarkerCode::StartOfFrameJpegls as u8 {
            return reader.read_frame_segment();
        }
        if code == JpegMarkerCode::StartOfScan as u8 || code == JpegMarkerCode::EndOfImage as u8 {
            return Err(DecodeError::MalformedInput {
                context: CONTEXT,
                reason: "no JPEG-LS frame header before scan data".into(),
            });
        }
        if is_standalone_marker(code) {
            continue;
        }
        if has_length_segment(code) || matches!(code, 0xC0..=0xCF) {
            reader.skip_segment()?;
            continue;
        }
        return Err(DecodeError::MalformedInput {
            context: CONTEXT,
            reason: format!("unknown marker {code:#04x}"),
        });
    }
}

struct MarkerReader<'a> {
    data: &'a [u8],
    position: usize,
}

impl MarkerReader<'_> {
    fn read_byte(&mut self) -> Result<u8, DecodeError> {
        let byte = *self.data.get(self.position).ok_or(DecodeError::InputExhausted {
            context: CONTEXT,
        })?;
        self.position += 1;
        Ok(byte)
    }

    fn read_u16(&mut self) -> Result<u16, DecodeError> {
        let hi = self.read_byte()? as u16;
        let lo = self.read_byte()? as u16;
        Ok((hi << 8) | lo)
    }

    fn read_marker(&mut self) -> Result<u8, DecodeError> {
        if self.read_byte()? != JPEG_MARKER_START_BYTE {
            return Err(DecodeError::MalformedInput {
                context: CONTEXT,
                reason: "marker start byte not found".into(),
            });
        }
        self.read_byte()
    }

    fn skip_segment(&mut self) -> Result<(), DecodeError> {
        let length = self.read_u16()? as usize;
        if length < 2 || self.position + (length - 2) > self.data.len() {
            return Err(DecodeError::MalformedInput {
                context: CONTEXT,
                reason: "invalid marker segment size".into(),
            });
        }
        self.position += length - 2;
        Ok(())
    }

    /// SOF55 body: length, precision, height, width, component count.
    fn read_frame_segment(&mut self) -> Result<FrameInfo, DecodeError> {
        let _length = self.read_u16()?;
        let bits_per_sample = self.read_byte()? as i32;
        let height = self.read_u16()? as u32;
        let width = self.read_u16()? as u32;
        let component_count = self.read_byte()? as i32;

        if width == 0 || height == 0 || bits_per_sample == 0 || component_count == 0 {
            return Err(DecodeError::MalformedInput {
                context: CONTEXT,
                reason: format!(
                    "frame header declares {width}x{height}, {component_count} components, {bits_per_sample} bits"
                ),
            });
        }

        Ok(FrameInfo {
            width,
            height,
            bits_per_sample,
            component_count,
        })
    }
}
