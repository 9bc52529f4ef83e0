//! JPEG marker codes and classification helpers.
//!
//! Only the codes the crate actually inspects get names; everything else is
//! classified by range so marker walks can skip unknown segments.

/// Every JPEG marker is introduced by this byte.
pub const JPEG_MARKER_START_BYTE: u8 = 0xFF;

/// Marker codes with dedicated handling in this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum JpegMarkerCode {
    /// SOI: start of image.
    StartOfImage = 0xD8,
    /// EOI: end of image.
    EndOfImage = 0xD9,
    /// SOS: start of scan.
    StartOfScan = 0xDA,
    /// SOF55: start of a JPEG-LS frame (ISO/IEC 14495-1).
    StartOfFrameJpegls = 0xF7,
}

/// True for every Start-of-Frame code of ITU-T T.81: `C0..CF` minus DHT
/// (`C4`), the reserved JPG marker (`C8`) and DAC (`CC`). The byte after a
/// SOF's length field is the sample precision.
pub fn is_start_of_frame(code: u8) -> bool {
    matches!(code, 0xC0..=0xCF) && !matches!(code, 0xC4 | 0xC8 | 0xCC)
}

/// True for two-byte markers that carry no length field: TEM, RST0-7, SOI
/// and EOI.
pub fn is_standalone_marker(code: u8) -> bool {
    matches!(code, 0x01 | 0xD0..=0xD9)
}

/// True for markers followed by a big-endian 16-bit segment length: the
/// table/scan markers, APPn, the JPEG extension block and COM.
pub fn has_length_segment(code: u8) -> bool {
    matches!(
        code,
        0xC4 | 0xC8 | 0xCC | 0xDA..=0xDF | 0xE0..=0xEF | 0xF0..=0xFD | 0xFE
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_of_frame_set_matches_t81() {
        let expected = [
            0xC0, 0xC1, 0xC2, 0xC3, 0xC5, 0xC6, 0xC7, 0xC9, 0xCA, 0xCB, 0xCD, 0xCE, 0xCF,
        ];
        for code in 0u8..=0xFF {
            assert_eq!(is_start_of_frame(code), expected.contains(&code), "code {code:#04x}");
        }
    }

    #[test]
    fn classifications_do_not_overlap() {
        for code in 0u8..=0xFF {
            let classes = [
                is_start_of_frame(code),
                is_standalone_marker(code),
                has_length_segment(code),
            ];
            assert!(classes.iter().filter(|&&c| c).count() <= 1, "code {code:#04x}");
        }
    }
}
