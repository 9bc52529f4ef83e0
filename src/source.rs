//! In-memory byte source fed to the codec engines.

use std::io::{self, Read, Seek, SeekFrom};

const END_OF_IMAGE: [u8; 2] = [0xFF, 0xD9];

/// Read-only cursor over an encoded payload.
///
/// Once the real bytes are exhausted the source yields the two-byte EOI
/// sequence `FF D9` exactly once before reporting end-of-stream. Several JPEG
/// engines insist on a stream terminator even when handed fixed memory; a
/// payload truncated right at the entropy tail then ends cleanly instead of
/// failing mid-read.
pub struct EncodedSource<'a> {
    data: &'a [u8],
    offset: usize,
    eoi_emitted: usize,
}

impl<'a> EncodedSource<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            offset: 0,
            eoi_emitted: 0,
        }
    }

    /// Advance the cursor, clamping at end-of-stream.
    pub fn skip(&mut self, count: usize) {
        self.offset = self.offset.saturating_add(count).min(self.data.len());
    }

    /// Current offset into the real payload (the synthesized EOI not included).
    pub fn position(&self) -> usize {
        self.offset
    }
}

impl Read for EncodedSource<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.offset < self.data.len() {
            let count = buf.len().min(self.data.len() - self.offset);
            buf[..count].copy_from_slice(&self.data[self.offset..self.offset + count]);
            self.offset += count;
            return Ok(count);
        }

        let count = buf.len().min(END_OF_IMAGE.len() - self.eoi_emitted);
        buf[..count].copy_from_slice(&END_OF_IMAGE[self.eoi_emitted..self.eoi_emitted + count]);
        self.eoi_emitted += count;
        Ok(count)
    }
}

impl Seek for EncodedSource<'_> {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        let target = match pos {
            SeekFrom::Start(n) => n as i64,
            SeekFrom::Current(n) => self.offset as i64 + n,
            SeekFrom::End(n) => self.data.len() as i64 + n,
        };
        if target < 0 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "seek before start of encoded data",
            ));
        }
        self.offset = (target as usize).min(self.data.len());
        Ok(self.offset as u64)
    }
}
