//! Character sources feeding the parser.
//!
//! A source is a pull-based sequence of UTF-16 code units. `Ok(None)` marks
//! the end of input and is distinct from every code unit. Lookahead and
//! position tracking belong to the parser, so a source only has to hand out
//! units in order.

use std::io::{self, BufRead};
use std::slice;
use std::str::EncodeUtf16;

/// A sequential source of UTF-16 code units.
pub trait CharSource {
    /// Take the next code unit, or `None` at end of input.
    fn next_unit(&mut self) -> io::Result<Option<u16>>;
}

impl<S: CharSource + ?Sized> CharSource for &mut S {
    fn next_unit(&mut self) -> io::Result<Option<u16>> {
        (**self).next_unit()
    }
}

/// Code units already held in memory.
pub struct Utf16Source<'a> {
    units: slice::Iter<'a, u16>,
}

impl<'a> Utf16Source<'a> {
    pub fn new(units: &'a [u16]) -> Self {
        Self {
            units: units.iter(),
        }
    }
}

impl CharSource for Utf16Source<'_> {
    fn next_unit(&mut self) -> io::Result<Option<u16>> {
        Ok(self.units.next().copied())
    }
}

/// A Rust string, encoded to UTF-16 as it is read.
pub struct StrSource<'a> {
    units: EncodeUtf16<'a>,
}

impl<'a> StrSource<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            units: text.encode_utf16(),
        }
    }
}

impl CharSource for StrSource<'_> {
    fn next_unit(&mut self) -> io::Result<Option<u16>> {
        Ok(self.units.next())
    }
}

/// UTF-8 bytes from a reader, decoded one character at a time.
///
/// Characters outside the Basic Multilingual Plane come out as a surrogate
/// pair. A UTF-8 byte order mark at the very start is skipped. Malformed
/// UTF-8 fails with [`io::ErrorKind::InvalidData`].
pub struct ReaderSource<R> {
    reader: R,
    pending: Option<u16>,
    started: bool,
}

impl<R: BufRead> ReaderSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            pending: None,
            started: false,
        }
    }

    pub fn into_inner(self) -> R {
        self.reader
    }

    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        loop {
            let byte = match self.reader.fill_buf() {
                Ok(buf) => buf.first().copied(),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            if byte.is_some() {
                self.reader.consume(1);
            }
            return Ok(byte);
        }
    }

    fn read_char(&mut self) -> io::Result<Option<char>> {
        let lead = match self.read_byte()? {
            Some(b) => b,
            None => return Ok(None),
        };
        let width = utf8_width(lead);
        if width == 0 {
            return Err(invalid_utf8(lead));
        }

        let mut buf = [lead, 0, 0, 0];
        for slot in buf.iter_mut().take(width).skip(1) {
            *slot = self.read_byte()?.ok_or_else(|| invalid_utf8(lead))?;
        }

        std::str::from_utf8(&buf[..width])
            .ok()
            .and_then(|s| s.chars().next())
            .map(Some)
            .ok_or_else(|| invalid_utf8(lead))
    }
}

impl<R: BufRead> CharSource for ReaderSource<R> {
    fn next_unit(&mut self) -> io::Result<Option<u16>> {
        if let Some(unit) = self.pending.take() {
            return Ok(Some(unit));
        }

        let mut ch = self.read_char()?;
        if !self.started {
            self.started = true;
            if ch == Some('\u{FEFF}') {
                ch = self.read_char()?;
            }
        }

        let Some(ch) = ch else {
            return Ok(None);
        };
        let mut units = [0u16; 2];
        let encoded = ch.encode_utf16(&mut units);
        if encoded.len() == 2 {
            self.pending = Some(encoded[1]);
        }
        Ok(Some(encoded[0]))
    }
}

/// Byte length of a UTF-8 sequence from its lead byte, or 0 if invalid.
fn utf8_width(lead: u8) -> usize {
    match lead {
        0x00..=0x7F => 1,
        0xC2..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF4 => 4,
        _ => 0,
    }
}

fn invalid_utf8(lead: u8) -> io::Error {
    io::Error::new(
        io::ErrorKind::InvalidData,
        format!("invalid UTF-8 sequence starting with byte 0x{:02x}", lead),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(mut source: impl CharSource) -> io::Result<Vec<u16>> {
        let mut out = Vec::new();
        while let Some(unit) = source.next_unit()? {
            out.push(unit);
        }
        Ok(out)
    }

    #[test]
    fn test_str_source_matches_encode_utf16() {
        let text = "a\u{e9}\u{1F600}z";
        let expected: Vec<u16> = text.encode_utf16().collect();
        assert_eq!(drain(StrSource::new(text)).unwrap(), expected);
    }

    #[test]
    fn test_utf16_source_passes_lone_surrogates() {
        let units = [0x22, 0xD800, 0x22];
        assert_eq!(drain(Utf16Source::new(&units)).unwrap(), units.to_vec());
    }

    #[test]
    fn test_reader_source_decodes_utf8() {
        let text = "[\"\u{e9}\u{4f60}\u{1F600}\"]";
        let expected: Vec<u16> = text.encode_utf16().collect();
        let source = ReaderSource::new(text.as_bytes());
        assert_eq!(drain(source).unwrap(), expected);
    }

    #[test]
    fn test_reader_source_skips_leading_bom() {
        let bytes = b"\xEF\xBB\xBFnull";
        let expected: Vec<u16> = "null".encode_utf16().collect();
        assert_eq!(drain(ReaderSource::new(&bytes[..])).unwrap(), expected);
    }

    #[test]
    fn test_reader_source_rejects_invalid_utf8() {
        let bytes = b"\"\xFF\"";
        let err = drain(ReaderSource::new(&bytes[..])).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn test_reader_source_rejects_truncated_sequence() {
        let bytes = b"\xE4\xBD";
        let err = drain(ReaderSource::new(&bytes[..])).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn test_end_is_sticky() {
        let mut source = StrSource::new("x");
        assert_eq!(source.next_unit().unwrap(), Some(b'x' as u16));
        assert_eq!(source.next_unit().unwrap(), None);
        assert_eq!(source.next_unit().unwrap(), None);
    }
}
