// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Text base. Text is ordered bytewise and has no metric.

use super::{BaseKind, BaseValue, fx_hash};
use crate::bytes::{ByteReader, ByteWriter};
use crate::error::{ParseError, SerializationError};
use crate::text::{Cursor, TextOptions};
use std::cmp::Ordering;
use std::hash::Hasher;

impl BaseValue for String {
    const KIND: BaseKind = BaseKind::Text;

    #[inline]
    fn compare(&self, other: &Self) -> Ordering {
        self.as_str().cmp(other.as_str())
    }

    #[inline]
    fn hash_extended(&self, seed: u64) -> u64 {
        fx_hash(seed, |h| h.write(self.as_bytes()))
    }

    /// Accepts either a bare token or a double-quoted string.
    fn parse(text: &str) -> Result<Self, ParseError> {
        let trimmed = text.trim();
        if trimmed.starts_with('"') {
            let mut cursor = Cursor::new(trimmed);
            let value = cursor.take_quoted("text")?;
            cursor.finish("text")?;
            Ok(value)
        } else {
            Ok(trimmed.to_owned())
        }
    }

    fn format(&self, _options: &TextOptions) -> String {
        let mut out = String::with_capacity(self.len() + 2);
        out.push('"');
        for c in self.chars() {
            if c == '"' || c == '\\' {
                out.push('\\');
            }
            out.push(c);
        }
        out.push('"');
        out
    }

    /// Inside collections text must be quoted.
    fn scan(cursor: &mut Cursor<'_>, construct: &'static str) -> Result<Self, ParseError> {
        cursor.take_quoted(construct)
    }

    fn write_binary(&self, writer: &mut ByteWriter) {
        writer.put_u32(self.len() as u32);
        writer.put_bytes(self.as_bytes());
    }

    fn read_binary(reader: &mut ByteReader<'_>) -> Result<Self, SerializationError> {
        let len = reader.get_u32()? as usize;
        let bytes = reader.take(len)?;
        String::from_utf8(bytes.to_vec()).map_err(|_| SerializationError::InvalidUtf8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bytes::Endian;
    use crate::error::{Error, UnsupportedOperation};

    #[test]
    fn test_quote_round_trip() {
        let s = String::from(r#"say "hi" \o/"#);
        let formatted = s.format(&TextOptions::new());
        assert_eq!(formatted, r#""say \"hi\" \\o/""#);
        assert_eq!(<String as BaseValue>::parse(&formatted).unwrap(), s);
    }

    #[test]
    fn test_binary_round_trip() {
        let s = String::from("zürich");
        let mut w = ByteWriter::new(Endian::Big);
        s.write_binary(&mut w);
        let bytes = w.into_bytes();
        let mut r = ByteReader::new(&bytes, Endian::Big);
        assert_eq!(String::read_binary(&mut r).unwrap(), s);
    }

    #[test]
    fn test_invalid_utf8() {
        let mut w = ByteWriter::new(Endian::Little);
        w.put_u32(2);
        w.put_bytes(&[0xFF, 0xFE]);
        let bytes = w.into_bytes();
        let mut r = ByteReader::new(&bytes, Endian::Little);
        assert_eq!(
            String::read_binary(&mut r),
            Err(SerializationError::InvalidUtf8)
        );
    }

    #[test]
    fn test_distance_unsupported() {
        let a = String::from("a");
        assert_eq!(
            a.scalar_distance(&a),
            Err(Error::Unsupported(UnsupportedOperation {
                operation: "distance",
                base: BaseKind::Text,
            }))
        );
    }
}
