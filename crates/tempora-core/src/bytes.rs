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

//! # Endian-aware byte buffers
//!
//! `ByteWriter` appends fixed-width fields in a chosen byte order and
//! `ByteReader` consumes them back, honouring the order recorded in the data
//! rather than the order of the machine doing the reading. The reader keeps
//! track of the host order it was configured with so callers can tell whether
//! decoding swapped bytes, which lets tests simulate a foreign-endian reader.
//!
//! ## Usage
//!
//! ```rust
//! use tempora_core::bytes::{ByteReader, ByteWriter, Endian};
//!
//! let mut w = ByteWriter::new(Endian::Big);
//! w.put_i64(-42);
//! w.put_f64(1.5);
//!
//! let bytes = w.into_bytes();
//! let mut r = ByteReader::new(&bytes, Endian::Big);
//! assert_eq!(r.get_i64().unwrap(), -42);
//! assert_eq!(r.get_f64().unwrap(), 1.5);
//! assert!(r.finish().is_ok());
//! ```

use crate::error::SerializationError;
use byteorder::{BigEndian, ByteOrder, LittleEndian};

/// Byte order of multi-byte fields.
///
/// The discriminants are the values written into the endianness byte of the
/// binary header: `0` for big-endian (XDR), `1` for little-endian (NDR).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endian {
    /// Most significant byte first.
    Big = 0,
    /// Least significant byte first.
    Little = 1,
}

impl Endian {
    /// The byte order of the machine running this code.
    #[cfg(target_endian = "little")]
    pub const NATIVE: Endian = Endian::Little;
    /// The byte order of the machine running this code.
    #[cfg(target_endian = "big")]
    pub const NATIVE: Endian = Endian::Big;

    /// Decodes an endianness byte.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use tempora_core::bytes::Endian;
    ///
    /// assert_eq!(Endian::from_byte(1).unwrap(), Endian::Little);
    /// assert!(Endian::from_byte(9).is_err());
    /// ```
    #[inline]
    pub fn from_byte(b: u8) -> Result<Self, SerializationError> {
        match b {
            0 => Ok(Endian::Big),
            1 => Ok(Endian::Little),
            other => Err(SerializationError::UnknownEndian(other)),
        }
    }

    /// Returns the endianness byte for this order.
    #[inline]
    pub const fn to_byte(self) -> u8 {
        self as u8
    }
}

impl Default for Endian {
    #[inline]
    fn default() -> Self {
        Self::NATIVE
    }
}

macro_rules! writer_put {
    ($name:ident, $t:ty, $write:ident, $size:expr) => {
        #[doc = concat!("Appends a `", stringify!($t), "` in the writer's byte order.")]
        #[inline]
        pub fn $name(&mut self, v: $t) {
            let mut buf = [0u8; $size];
            match self.endian {
                Endian::Big => BigEndian::$write(&mut buf, v),
                Endian::Little => LittleEndian::$write(&mut buf, v),
            }
            self.buf.extend_from_slice(&buf);
        }
    };
}

macro_rules! reader_get {
    ($name:ident, $t:ty, $read:ident, $size:expr) => {
        #[doc = concat!("Reads a `", stringify!($t), "` in the data's byte order.")]
        #[inline]
        pub fn $name(&mut self) -> Result<$t, SerializationError> {
            let bytes = self.take($size)?;
            Ok(match self.endian {
                Endian::Big => BigEndian::$read(bytes),
                Endian::Little => LittleEndian::$read(bytes),
            })
        }
    };
}

/// A growable output buffer writing fields in a fixed byte order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ByteWriter {
    buf: Vec<u8>,
    endian: Endian,
}

impl ByteWriter {
    /// Creates an empty writer producing `endian` ordered fields.
    #[inline]
    pub fn new(endian: Endian) -> Self {
        Self {
            buf: Vec::new(),
            endian,
        }
    }

    /// Creates an empty writer with room for `capacity` bytes.
    #[inline]
    pub fn with_capacity(endian: Endian, capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
            endian,
        }
    }

    /// Returns the byte order used by this writer.
    #[inline]
    pub const fn endian(&self) -> Endian {
        self.endian
    }

    /// Returns the number of bytes written so far.
    #[inline]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Returns `true` if nothing has been written.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Appends a single byte.
    #[inline]
    pub fn put_u8(&mut self, v: u8) {
        self.buf.push(v);
    }

    /// Appends raw bytes unchanged.
    #[inline]
    pub fn put_bytes(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    writer_put!(put_u32, u32, write_u32, 4);
    writer_put!(put_i32, i32, write_i32, 4);
    writer_put!(put_i64, i64, write_i64, 8);
    writer_put!(put_f64, f64, write_f64, 8);

    /// Returns the written bytes.
    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.buf
    }

    /// Consumes the writer and returns the written bytes.
    #[inline]
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }
}

/// A cursor over a byte slice decoding fields in the data's byte order.
#[derive(Debug, Clone)]
pub struct ByteReader<'a> {
    data: &'a [u8],
    pos: usize,
    endian: Endian,
    host: Endian,
}

impl<'a> ByteReader<'a> {
    /// Creates a reader over `data` whose fields are in `endian` order.
    #[inline]
    pub fn new(data: &'a [u8], endian: Endian) -> Self {
        Self {
            data,
            pos: 0,
            endian,
            host: Endian::NATIVE,
        }
    }

    /// Pretends the reading machine has byte order `host`.
    ///
    /// This only affects [`ByteReader::swaps_bytes`]; decoded values are always
    /// correct because fields are read in the data's declared order.
    #[inline]
    pub fn with_host(mut self, host: Endian) -> Self {
        self.host = host;
        self
    }

    /// Changes the byte order of the fields still to be read.
    #[inline]
    pub fn set_endian(&mut self, endian: Endian) {
        self.endian = endian;
    }

    /// Returns the byte order of the data.
    #[inline]
    pub const fn endian(&self) -> Endian {
        self.endian
    }

    /// Returns `true` when the data order differs from the host order.
    #[inline]
    pub fn swaps_bytes(&self) -> bool {
        self.endian != self.host
    }

    /// Returns the current read offset.
    #[inline]
    pub const fn position(&self) -> usize {
        self.pos
    }

    /// Returns the number of unread bytes.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Consumes `n` raw bytes.
    #[inline]
    pub fn take(&mut self, n: usize) -> Result<&'a [u8], SerializationError> {
        let remaining = self.remaining();
        if n > remaining {
            return Err(SerializationError::BufferTooShort {
                needed: n,
                remaining,
            });
        }
        let slice = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    /// Reads a single byte.
    #[inline]
    pub fn get_u8(&mut self) -> Result<u8, SerializationError> {
        Ok(self.take(1)?[0])
    }

    reader_get!(get_u32, u32, read_u32, 4);
    reader_get!(get_i32, i32, read_i32, 4);
    reader_get!(get_i64, i64, read_i64, 8);
    reader_get!(get_f64, f64, read_f64, 8);

    /// Fails with `TrailingBytes` unless the whole input has been consumed.
    #[inline]
    pub fn finish(&self) -> Result<(), SerializationError> {
        match self.remaining() {
            0 => Ok(()),
            n => Err(SerializationError::TrailingBytes(n)),
        }
    }
}

/// Encodes bytes as uppercase hex.
///
/// # Examples
///
/// ```rust
/// # use tempora_core::bytes::to_hex;
///
/// assert_eq!(to_hex(&[0x01, 0xAB]), "01AB");
/// ```
#[inline]
pub fn to_hex(bytes: &[u8]) -> String {
    hex::encode_upper(bytes)
}

/// Decodes hex text in either case.
#[inline]
pub fn from_hex(text: &str) -> Result<Vec<u8>, SerializationError> {
    hex::decode(text.trim()).map_err(|_| SerializationError::InvalidHex)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_both_orders() {
        for endian in [Endian::Big, Endian::Little] {
            let mut w = ByteWriter::new(endian);
            w.put_u8(7);
            w.put_u32(0xDEAD_BEEF);
            w.put_i32(-5);
            w.put_i64(i64::MIN);
            w.put_f64(-0.25);
            let bytes = w.into_bytes();
            assert_eq!(bytes.len(), 1 + 4 + 4 + 8 + 8);

            let mut r = ByteReader::new(&bytes, endian);
            assert_eq!(r.get_u8().unwrap(), 7);
            assert_eq!(r.get_u32().unwrap(), 0xDEAD_BEEF);
            assert_eq!(r.get_i32().unwrap(), -5);
            assert_eq!(r.get_i64().unwrap(), i64::MIN);
            assert_eq!(r.get_f64().unwrap(), -0.25);
            assert!(r.finish().is_ok());
        }
    }

    #[test]
    fn test_byte_layout() {
        let mut big = ByteWriter::new(Endian::Big);
        big.put_u32(1);
        assert_eq!(big.as_slice(), &[0, 0, 0, 1]);

        let mut little = ByteWriter::new(Endian::Little);
        little.put_u32(1);
        assert_eq!(little.as_slice(), &[1, 0, 0, 0]);
    }

    #[test]
    fn test_swap_flag() {
        let data = [0u8; 8];
        let r = ByteReader::new(&data, Endian::Little).with_host(Endian::Big);
        assert!(r.swaps_bytes());
        let r = ByteReader::new(&data, Endian::Little).with_host(Endian::Little);
        assert!(!r.swaps_bytes());
    }

    #[test]
    fn test_buffer_too_short() {
        let data = [1u8, 2, 3];
        let mut r = ByteReader::new(&data, Endian::Little);
        assert_eq!(
            r.get_i64(),
            Err(SerializationError::BufferTooShort {
                needed: 8,
                remaining: 3
            })
        );
    }

    #[test]
    fn test_trailing_bytes() {
        let data = [1u8, 2];
        let mut r = ByteReader::new(&data, Endian::Little);
        r.get_u8().unwrap();
        assert_eq!(r.finish(), Err(SerializationError::TrailingBytes(1)));
    }

    #[test]
    fn test_hex() {
        assert_eq!(from_hex("01ab").unwrap(), vec![0x01, 0xAB]);
        assert_eq!(from_hex("0G"), Err(SerializationError::InvalidHex));
    }
}
