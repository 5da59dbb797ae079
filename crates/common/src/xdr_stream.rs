//! Readers for streams of XDR values.
//!
//! Two encodings are supported:
//!
//! * size-prefixed binary frames, the format stellar-core uses for its
//!   metadata stream: a 4-byte big-endian length whose high bit is the
//!   record-marking continuation bit (RFC 4506), followed by the payload;
//! * base64 text, one value per line, as printed by `stellar-xdr` tooling.
//!   Blank lines are skipped.

use std::io::{BufRead, BufReader, ErrorKind, Read};
use std::marker::PhantomData;

use stellar_xdr::curr::{Limits, ReadXdr};

use crate::error::{Error, Result};

/// Frames larger than this are treated as corrupt input.
pub const MAX_FRAME_SIZE: u32 = 256 * 1024 * 1024;

/// Reads size-prefixed XDR frames.
pub struct XdrFrameReader<R> {
    reader: BufReader<R>,
    frames_read: u64,
}

impl<R: Read> XdrFrameReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader: BufReader::new(reader),
            frames_read: 0,
        }
    }

    /// Number of frames decoded so far.
    pub fn frames_read(&self) -> u64 {
        self.frames_read
    }

    /// Read the next value, or `None` at a clean end of stream.
    ///
    /// A stream that ends inside a header or payload is an error.
    pub fn read_one<T: ReadXdr>(&mut self) -> Result<Option<T>> {
        let mut header = [0u8; 4];
        let mut filled = 0;
        while filled < header.len() {
            match self.reader.read(&mut header[filled..]) {
                Ok(0) if filled == 0 => return Ok(None),
                Ok(0) => {
                    return Err(Error::InvalidData(format!(
                        "truncated frame header after {} frames",
                        self.frames_read
                    )))
                }
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => {}
                Err(e) => return Err(e.into()),
            }
        }

        let size = u32::from_be_bytes(header) & 0x7FFF_FFFF;
        if size > MAX_FRAME_SIZE {
            return Err(Error::InvalidData(format!(
                "frame of {size} bytes exceeds limit of {MAX_FRAME_SIZE}"
            )));
        }

        let mut payload = vec![0u8; size as usize];
        self.reader.read_exact(&mut payload)?;
        let value = T::from_xdr(&payload, Limits::none())?;
        self.frames_read += 1;
        Ok(Some(value))
    }

    /// Iterate over the remaining values.
    pub fn values<T: ReadXdr>(self) -> Values<R, T> {
        Values {
            source: Source::Frames(self),
            failed: false,
            _marker: PhantomData,
        }
    }
}

/// Reads base64-encoded XDR values, one per line.
pub struct XdrBase64Reader<R> {
    reader: BufReader<R>,
    line: String,
    line_no: u64,
}

impl<R: Read> XdrBase64Reader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader: BufReader::new(reader),
            line: String::new(),
            line_no: 0,
        }
    }

    /// Read the next value, or `None` at end of input.
    pub fn read_one<T: ReadXdr>(&mut self) -> Result<Option<T>> {
        loop {
            self.line.clear();
            if self.reader.read_line(&mut self.line)? == 0 {
                return Ok(None);
            }
            self.line_no += 1;
            let trimmed = self.line.trim();
            if trimmed.is_empty() {
                continue;
            }
            return T::from_xdr_base64(trimmed, Limits::none())
                .map(Some)
                .map_err(|e| Error::InvalidData(format!("line {}: {e}", self.line_no)));
        }
    }

    pub fn values<T: ReadXdr>(self) -> Values<R, T> {
        Values {
            source: Source::Base64(self),
            failed: false,
            _marker: PhantomData,
        }
    }
}

enum Source<R> {
    Frames(XdrFrameReader<R>),
    Base64(XdrBase64Reader<R>),
}

/// Iterator over decoded values; stops after the first error.
pub struct Values<R, T> {
    source: Source<R>,
    failed: bool,
    _marker: PhantomData<fn() -> T>,
}

impl<R: Read, T: ReadXdr> Iterator for Values<R, T> {
    type Item = Result<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let next = match &mut self.source {
            Source::Frames(r) => r.read_one::<T>(),
            Source::Base64(r) => r.read_one::<T>(),
        };
        self.failed = next.is_err();
        next.transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stellar_xdr::curr::{LedgerCloseMeta, LedgerCloseMetaV2, WriteXdr};

    fn frame(meta: &LedgerCloseMeta) -> Vec<u8> {
        let payload = meta.to_xdr(Limits::none()).unwrap();
        let mut out = ((payload.len() as u32) | 0x8000_0000).to_be_bytes().to_vec();
        out.extend_from_slice(&payload);
        out
    }

    fn meta(seq: u32) -> LedgerCloseMeta {
        let mut v2 = LedgerCloseMetaV2::default();
        v2.ledger_header.header.ledger_seq = seq;
        LedgerCloseMeta::V2(v2)
    }

    #[test]
    fn test_reads_frames_until_eof() {
        let mut data = frame(&meta(7));
        data.extend(frame(&meta(8)));
        let mut reader = XdrFrameReader::new(data.as_slice());

        let first: LedgerCloseMeta = reader.read_one().unwrap().unwrap();
        let second: LedgerCloseMeta = reader.read_one().unwrap().unwrap();
        assert_eq!(first, meta(7));
        assert_eq!(second, meta(8));
        assert!(reader.read_one::<LedgerCloseMeta>().unwrap().is_none());
        assert_eq!(reader.frames_read(), 2);
    }

    #[test]
    fn test_truncated_payload_is_error() {
        let mut data = frame(&meta(7));
        data.truncate(data.len() - 1);
        let mut reader = XdrFrameReader::new(data.as_slice());
        assert!(reader.read_one::<LedgerCloseMeta>().is_err());
    }

    #[test]
    fn test_truncated_header_is_error() {
        let data = [0x80u8, 0x00];
        let mut reader = XdrFrameReader::new(&data[..]);
        let err = reader.read_one::<LedgerCloseMeta>().unwrap_err();
        assert!(matches!(err, Error::InvalidData(_)));
    }

    #[test]
    fn test_base64_lines() {
        let text = format!(
            "{}\n\n{}\n",
            meta(1).to_xdr_base64(Limits::none()).unwrap(),
            meta(2).to_xdr_base64(Limits::none()).unwrap()
        );
        let values: Vec<LedgerCloseMeta> = XdrBase64Reader::new(text.as_bytes())
            .values()
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(values, vec![meta(1), meta(2)]);
    }

    #[test]
    fn test_base64_bad_line_reports_line_number() {
        let text = "not base64 at all\n";
        let err = XdrBase64Reader::new(text.as_bytes())
            .read_one::<LedgerCloseMeta>()
            .unwrap_err();
        assert!(err.to_string().contains("line 1"));
    }
}
