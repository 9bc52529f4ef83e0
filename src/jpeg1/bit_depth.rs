//! Bit-depth recovery from a JPEG marker stream.

use crate::jpeg_marker_code::{has_length_segment, is_standalone_marker, is_start_of_frame};

/// Walk the marker sequence of `data` and return the sample precision carried
/// by the first Start-of-Frame marker, or 0 when no SOF is found or an
/// unknown marker stops the walk.
///
/// The walk never entropy-decodes: length-bearing segments are skipped by
/// their declared length, standalone markers by two bytes, `FF FF` fill bytes
/// one at a time. A lone `FF` followed by anything in `03..=BF` is treated as
/// a two-byte marker and stepped over.
pub fn scan_bit_depth(data: &[u8]) -> u32 {
    let mut offset = 0usize;

    while offset + 4 < data.len() {
        if data[offset] != 0xFF {
            return 0;
        }
        let code = data[offset + 1];

        if is_start_of_frame(code) {
            // SOF body: length (2 bytes), then the precision byte.
            return u32::from(data[offset + 4]);
        }

        if code == 0xFF {
            // Fill byte; the next byte may start the real marker.
            offset += 1;
        } else if is_standalone_marker(code) {
            offset += 2;
        } else if has_length_segment(code) {
            let length = u16::from_be_bytes([data[offset + 2], data[offset + 3]]) as usize;
            offset += length + 2;
        } else if (0x03..=0xBF).contains(&code) {
            offset += 2;
        } else {
            return 0;
        }
    }

    0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_precision_from_every_sof_variant() {
        for sof in [
            0xC0u8, 0xC1, 0xC2, 0xC3, 0xC5, 0xC6, 0xC7, 0xC9, 0xCA, 0xCB, 0xCD, 0xCE, 0xCF,
        ] {
            for precision in [1u8, 8, 12, 16] {
                let data = [0xFF, 0xD8, 0xFF, sof, 0x00, 0x0B, precision, 0, 1, 0, 1, 1];
                assert_eq!(scan_bit_depth(&data), u32::from(precision), "SOF {sof:#04x}");
            }
        }
    }

    #[test]
    fn skips_app_segments_before_the_frame_header() {
        let mut data = vec![0xFF, 0xD8];
        data.extend_from_slice(&[0xFF, 0xE0, 0x00, 0x10]);
        data.extend_from_slice(&[0u8; 14]);
        data.extend_from_slice(&[0xFF, 0xC0, 0x00, 0x11, 0x08, 0x00, 0x10, 0x00, 0x10]);
        assert_eq!(scan_bit_depth(&data), 8);
    }

    #[test]
    fn returns_zero_without_a_frame_header() {
        assert_eq!(scan_bit_depth(&[0xFF, 0xD8, 0xFF, 0xD9]), 0);
        assert_eq!(scan_bit_depth(&[]), 0);
    }

    #[test]
    fn unknown_leading_byte_stops_the_walk() {
        assert_eq!(scan_bit_depth(&[0x00, 0x01, 0x02, 0x03, 0x04, 0x05]), 0);
        // FF 02 is not a steppable marker either.
        assert_eq!(scan_bit_depth(&[0xFF, 0x02, 0x00, 0x00, 0x00, 0x00]), 0);
    }

    #[test]
    fn fill_bytes_advance_one_at_a_time() {
        let data = [0xFF, 0xFF, 0xFF, 0xC0, 0x00, 0x0B, 0x0C, 0, 1, 0, 1, 1];
        assert_eq!(scan_bit_depth(&data), 12);
    }

    #[test]
    fn tem_marker_is_stepped_over() {
        let data = [0xFF, 0x01, 0xFF, 0xC0, 0x00, 0x0B, 0x08, 0, 1, 0, 1, 1];
        assert_eq!(scan_bit_depth(&data), 8);
    }

    #[test]
    fn restart_markers_are_standalone() {
        let data = [0xFF, 0xD0, 0xFF, 0xC3, 0x00, 0x0B, 0x10, 0, 1, 0, 1, 1];
        assert_eq!(scan_bit_depth(&data), 16);
    }
}
