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

//! # Binary Header
//!
//! Every encoded value starts with
//!
//! ```text
//! [endian:1][type tag:1][flags:1][srid:4]?
//! ```
//!
//! The endianness byte is `0` for big-endian and `1` for little-endian and
//! governs every multi-byte field that follows. The type tag packs the shape
//! into the high nibble and the base type into the low nibble; boxes use the
//! low nibble to tell `TBox` from `STBox`. The SRID is present only when
//! [`HAS_SRID`] is set.

use tempora_core::base::BaseKind;
use tempora_core::bytes::{ByteReader, ByteWriter, Endian};
use tempora_core::error::SerializationError;

/// The lower bound is inclusive.
pub const LOWER_INC: u8 = 0x01;
/// The upper bound is inclusive.
pub const UPPER_INC: u8 = 0x02;
/// The box has a z range.
pub const HAS_Z: u8 = 0x04;
/// The box is geodetic.
pub const GEODETIC: u8 = 0x08;
/// A 4-byte SRID follows the flags byte.
pub const HAS_SRID: u8 = 0x10;
/// The box has a value or spatial dimension.
pub const HAS_X: u8 = 0x20;
/// The box has a time dimension.
pub const HAS_T: u8 = 0x40;

/// The shape of an encoded value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    Span,
    SpanSet,
    Set,
    TBox,
    STBox,
}

/// A decoded type tag.
///
/// # Examples
///
/// ```rust
/// # use tempora_core::base::BaseKind;
/// # use tempora_wkb::header::{Shape, TypeTag};
///
/// let tag = TypeTag::new(Shape::SpanSet, Some(BaseKind::Float));
/// assert_eq!(tag.to_byte(), 0x13);
/// assert_eq!(TypeTag::from_byte(0x13).unwrap(), tag);
/// assert_eq!(TypeTag::from_byte(0x31).unwrap().shape(), Shape::STBox);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeTag {
    shape: Shape,
    base: Option<BaseKind>,
}

impl TypeTag {
    /// Creates a tag. Boxes carry no base type.
    #[inline]
    pub const fn new(shape: Shape, base: Option<BaseKind>) -> Self {
        Self { shape, base }
    }

    #[inline]
    pub const fn shape(&self) -> Shape {
        self.shape
    }

    #[inline]
    pub const fn base(&self) -> Option<BaseKind> {
        self.base
    }

    /// The tag byte.
    pub fn to_byte(self) -> u8 {
        let base = self.base.map_or(0, BaseKind::code);
        match self.shape {
            Shape::Span => base,
            Shape::SpanSet => 0x10 | base,
            Shape::Set => 0x20 | base,
            Shape::TBox => 0x30,
            Shape::STBox => 0x31,
        }
    }

    /// Decodes a tag byte.
    ///
    /// # Errors
    ///
    /// `SerializationError::UnknownTypeTag` for bytes naming no known type.
    pub fn from_byte(b: u8) -> Result<Self, SerializationError> {
        let unknown = SerializationError::UnknownTypeTag(b);
        match b {
            0x30 => return Ok(Self::new(Shape::TBox, None)),
            0x31 => return Ok(Self::new(Shape::STBox, None)),
            _ => {}
        }
        let shape = match b >> 4 {
            0 => Shape::Span,
            1 => Shape::SpanSet,
            2 => Shape::Set,
            _ => return Err(unknown),
        };
        let base = BaseKind::from_code(b & 0x0F).ok_or(unknown)?;
        Ok(Self::new(shape, Some(base)))
    }
}

/// A decoded header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    /// Byte order of the body.
    pub endian: Endian,
    /// The type tag.
    pub tag: TypeTag,
    /// The flags byte, including [`HAS_SRID`] if an SRID was present.
    pub flags: u8,
    /// The SRID, if present.
    pub srid: Option<i32>,
}

/// Writes a header in the writer's byte order.
pub fn write_header(writer: &mut ByteWriter, tag: TypeTag, flags: u8, srid: Option<i32>) {
    writer.put_u8(writer.endian().to_byte());
    writer.put_u8(tag.to_byte());
    match srid {
        Some(srid) => {
            writer.put_u8(flags | HAS_SRID);
            writer.put_i32(srid);
        }
        None => writer.put_u8(flags & !HAS_SRID),
    }
}

/// Reads a header and switches the reader to the declared byte order.
///
/// # Errors
///
/// Unknown endianness or tag bytes, or a buffer too short for the header.
pub fn read_header(reader: &mut ByteReader<'_>) -> Result<Header, SerializationError> {
    let endian = Endian::from_byte(reader.get_u8()?)?;
    reader.set_endian(endian);
    if reader.swaps_bytes() {
        log::debug!("decoding {:?}-endian input on a host of the other order", endian);
    }
    let tag = TypeTag::from_byte(reader.get_u8()?)?;
    let flags = reader.get_u8()?;
    let srid = if flags & HAS_SRID != 0 {
        Some(reader.get_i32()?)
    } else {
        None
    };
    log::trace!("header: tag {:?}, flags 0x{:02X}, srid {:?}", tag, flags, srid);
    Ok(Header {
        endian,
        tag,
        flags,
        srid,
    })
}

/// Reads a header and checks its tag.
///
/// # Errors
///
/// `SerializationError::TypeMismatch` for a well-formed header of another
/// type, or any [`read_header`] error.
pub fn expect_header(reader: &mut ByteReader<'_>, expected: TypeTag) -> Result<Header, SerializationError> {
    let header = read_header(reader)?;
    if header.tag != expected {
        return Err(SerializationError::TypeMismatch {
            expected: expected.to_byte(),
            found: header.tag.to_byte(),
        });
    }
    Ok(header)
}

/// Fails with `InvalidFlags` if `flags` has bits outside `allowed`.
#[inline]
pub fn check_flags(flags: u8, allowed: u8) -> Result<(), SerializationError> {
    if flags & !allowed != 0 {
        return Err(SerializationError::InvalidFlags(flags));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tags() {
        assert_eq!(TypeTag::new(Shape::Span, Some(BaseKind::Int)).to_byte(), 0x01);
        assert_eq!(TypeTag::new(Shape::Set, Some(BaseKind::Timestamp)).to_byte(), 0x24);
        assert_eq!(TypeTag::new(Shape::TBox, None).to_byte(), 0x30);
        assert_eq!(TypeTag::from_byte(0x05).unwrap().base(), Some(BaseKind::Text));
        assert_eq!(TypeTag::from_byte(0x40), Err(SerializationError::UnknownTypeTag(0x40)));
        assert_eq!(TypeTag::from_byte(0x0F), Err(SerializationError::UnknownTypeTag(0x0F)));
    }

    #[test]
    fn test_header_round_trip_with_srid() {
        let tag = TypeTag::new(Shape::STBox, None);
        let mut w = ByteWriter::new(Endian::Big);
        write_header(&mut w, tag, HAS_X | HAS_T, Some(4326));
        let bytes = w.into_bytes();
        assert_eq!(&bytes[..3], &[0x00, 0x31, HAS_X | HAS_T | HAS_SRID]);
        assert_eq!(&bytes[3..], &4326i32.to_be_bytes());

        let mut r = ByteReader::new(&bytes, Endian::Little);
        let header = read_header(&mut r).unwrap();
        assert_eq!(header.endian, Endian::Big);
        assert_eq!(header.srid, Some(4326));
        assert_eq!(r.endian(), Endian::Big);
    }

    #[test]
    fn test_header_errors() {
        let mut r = ByteReader::new(&[0x07, 0x01, 0x00], Endian::Little);
        assert_eq!(read_header(&mut r), Err(SerializationError::UnknownEndian(0x07)));
        let mut r = ByteReader::new(&[0x01, 0x01], Endian::Little);
        assert!(matches!(
            read_header(&mut r),
            Err(SerializationError::BufferTooShort { .. })
        ));
        let mut r = ByteReader::new(&[0x01, 0x03, 0x00], Endian::Little);
        assert_eq!(
            expect_header(&mut r, TypeTag::new(Shape::Span, Some(BaseKind::Int))),
            Err(SerializationError::TypeMismatch {
                expected: 0x01,
                found: 0x03
            })
        );
        assert_eq!(check_flags(0x04, LOWER_INC | UPPER_INC), Err(SerializationError::InvalidFlags(0x04)));
    }
}
