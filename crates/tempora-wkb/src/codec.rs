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

//! # Encoding and Decoding
//!
//! Bodies follow the header:
//!
//! ```text
//! span      lower upper
//! span set  count:u32 ([bounds:1] lower upper)*
//! set       count:u32 value*
//! tbox      [bounds:1 xmin xmax]? [bounds:1 tmin tmax]?
//! stbox     [xmin xmax ymin ymax [zmin zmax]?]? [bounds:1 tmin tmax]?
//! ```
//!
//! Values are written with [`BaseValue::write_binary`]; text values carry a
//! `u32` length prefix. Decoders validate the result, so a well-formed
//! buffer holding reversed bounds or unsorted sets is still rejected.

use crate::error::WkbError;
use crate::header::{
    GEODETIC, HAS_SRID, HAS_T, HAS_X, HAS_Z, LOWER_INC, Shape, TypeTag, UPPER_INC, check_flags,
    expect_header, read_header, write_header,
};
use crate::options::WkbOptions;
use tempora_box::composer::BoundingBox;
use tempora_box::stbox::{Extent, STBox};
use tempora_box::tbox::TBox;
use tempora_core::base::{BaseKind, BaseValue};
use tempora_core::bytes::{ByteReader, ByteWriter, Endian, from_hex, to_hex};
use tempora_core::error::SerializationError;
use tempora_core::time::Timestamp;
use tempora_span::instant_set::InstantSet;
use tempora_span::span::Span;
use tempora_span::span_set::SpanSet;

/// A value with a binary encoding.
pub trait WkbEncode {
    /// Appends the header and body in the writer's byte order.
    fn write_wkb(&self, writer: &mut ByteWriter);
}

/// A value that can be decoded from its binary encoding.
pub trait WkbDecode: Sized {
    /// Reads one value, header included, leaving the reader after its body.
    ///
    /// # Errors
    ///
    /// A [`WkbError`] for malformed input or an invalid decoded value.
    fn read_wkb(reader: &mut ByteReader<'_>) -> Result<Self, WkbError>;
}

#[inline]
fn write_bounds<T: BaseValue>(writer: &mut ByteWriter, span: &Span<T>) {
    writer.put_u8(span.bound_flags());
    span.lower().write_binary(writer);
    span.upper().write_binary(writer);
}

#[inline]
fn read_bounds<T: BaseValue>(reader: &mut ByteReader<'_>) -> Result<Span<T>, WkbError> {
    let flags = reader.get_u8()?;
    check_flags(flags, LOWER_INC | UPPER_INC)?;
    read_span_body(reader, flags)
}

#[inline]
fn read_span_body<T: BaseValue>(reader: &mut ByteReader<'_>, flags: u8) -> Result<Span<T>, WkbError> {
    let lower = T::read_binary(reader)?;
    let upper = T::read_binary(reader)?;
    Ok(Span::make(lower, upper, flags & LOWER_INC != 0, flags & UPPER_INC != 0)?)
}

/// Reads a `u32` element count, bounded by the bytes left.
#[inline]
fn read_count(reader: &mut ByteReader<'_>, min_element_size: usize) -> Result<usize, WkbError> {
    let count = reader.get_u32()? as usize;
    let needed = count.saturating_mul(min_element_size);
    if needed > reader.remaining() {
        return Err(SerializationError::BufferTooShort {
            needed,
            remaining: reader.remaining(),
        }
        .into());
    }
    Ok(count)
}

impl<T: BaseValue> WkbEncode for Span<T> {
    fn write_wkb(&self, writer: &mut ByteWriter) {
        write_header(writer, TypeTag::new(Shape::Span, Some(T::KIND)), self.bound_flags(), None);
        self.lower().write_binary(writer);
        self.upper().write_binary(writer);
    }
}

impl<T: BaseValue> WkbDecode for Span<T> {
    fn read_wkb(reader: &mut ByteReader<'_>) -> Result<Self, WkbError> {
        let header = expect_header(reader, TypeTag::new(Shape::Span, Some(T::KIND)))?;
        check_flags(header.flags, LOWER_INC | UPPER_INC)?;
        read_span_body(reader, header.flags)
    }
}

impl<T: BaseValue> WkbEncode for SpanSet<T> {
    fn write_wkb(&self, writer: &mut ByteWriter) {
        write_header(writer, TypeTag::new(Shape::SpanSet, Some(T::KIND)), 0, None);
        writer.put_u32(self.len() as u32);
        for span in self.spans() {
            write_bounds(writer, span);
        }
    }
}

impl<T: BaseValue> WkbDecode for SpanSet<T> {
    fn read_wkb(reader: &mut ByteReader<'_>) -> Result<Self, WkbError> {
        let header = expect_header(reader, TypeTag::new(Shape::SpanSet, Some(T::KIND)))?;
        check_flags(header.flags, 0)?;
        let count = read_count(reader, 1)?;
        let mut spans = Vec::with_capacity(count);
        for _ in 0..count {
            spans.push(read_bounds(reader)?);
        }
        Ok(SpanSet::from_sorted(spans)?)
    }
}

impl<T: BaseValue> WkbEncode for InstantSet<T> {
    fn write_wkb(&self, writer: &mut ByteWriter) {
        write_header(writer, TypeTag::new(Shape::Set, Some(T::KIND)), 0, None);
        writer.put_u32(self.len() as u32);
        for value in self.values() {
            value.write_binary(writer);
        }
    }
}

impl<T: BaseValue> WkbDecode for InstantSet<T> {
    fn read_wkb(reader: &mut ByteReader<'_>) -> Result<Self, WkbError> {
        let header = expect_header(reader, TypeTag::new(Shape::Set, Some(T::KIND)))?;
        check_flags(header.flags, 0)?;
        let count = read_count(reader, 1)?;
        let mut values = Vec::with_capacity(count);
        for _ in 0..count {
            values.push(T::read_binary(reader)?);
        }
        Ok(InstantSet::new(values)?)
    }
}

impl WkbEncode for TBox {
    fn write_wkb(&self, writer: &mut ByteWriter) {
        let flags = (if self.has_x() { HAS_X } else { 0 }) | (if self.has_t() { HAS_T } else { 0 });
        write_header(writer, TypeTag::new(Shape::TBox, None), flags, None);
        if let Some(span) = self.span() {
            write_bounds(writer, span);
        }
        if let Some(period) = self.period() {
            write_bounds(writer, period);
        }
    }
}

impl WkbDecode for TBox {
    fn read_wkb(reader: &mut ByteReader<'_>) -> Result<Self, WkbError> {
        let header = expect_header(reader, TypeTag::new(Shape::TBox, None))?;
        check_flags(header.flags, HAS_X | HAS_T)?;
        let span = if header.flags & HAS_X != 0 {
            Some(read_bounds::<f64>(reader)?)
        } else {
            None
        };
        let period = if header.flags & HAS_T != 0 {
            Some(read_bounds::<Timestamp>(reader)?)
        } else {
            None
        };
        Ok(TBox::new(span, period)?)
    }
}

impl WkbEncode for STBox {
    fn write_wkb(&self, writer: &mut ByteWriter) {
        let mut flags = 0;
        if self.has_x() {
            flags |= HAS_X;
        }
        if self.has_z() {
            flags |= HAS_Z;
        }
        if self.has_t() {
            flags |= HAS_T;
        }
        if self.is_geodetic() {
            flags |= GEODETIC;
        }
        let srid = (self.srid() != 0).then_some(self.srid());
        write_header(writer, TypeTag::new(Shape::STBox, None), flags, srid);
        if let Some(e) = self.extent() {
            writer.put_f64(e.xmin());
            writer.put_f64(e.xmax());
            writer.put_f64(e.ymin());
            writer.put_f64(e.ymax());
            if let (Some(zmin), Some(zmax)) = (e.zmin(), e.zmax()) {
                writer.put_f64(zmin);
                writer.put_f64(zmax);
            }
        }
        if let Some(period) = self.period() {
            write_bounds(writer, period);
        }
    }
}

impl WkbDecode for STBox {
    fn read_wkb(reader: &mut ByteReader<'_>) -> Result<Self, WkbError> {
        let header = expect_header(reader, TypeTag::new(Shape::STBox, None))?;
        let flags = header.flags;
        check_flags(flags, HAS_X | HAS_Z | HAS_T | GEODETIC | HAS_SRID)?;
        if flags & HAS_Z != 0 && flags & HAS_X == 0 {
            return Err(SerializationError::InvalidFlags(flags).into());
        }
        let extent = if flags & HAS_X != 0 {
            let xmin = reader.get_f64()?;
            let xmax = reader.get_f64()?;
            let ymin = reader.get_f64()?;
            let ymax = reader.get_f64()?;
            let extent = Extent::new(xmin, xmax, ymin, ymax)?;
            Some(if flags & HAS_Z != 0 {
                let zmin = reader.get_f64()?;
                let zmax = reader.get_f64()?;
                extent.with_z(zmin, zmax)?
            } else {
                extent
            })
        } else {
            None
        };
        let period = if flags & HAS_T != 0 {
            Some(read_bounds::<Timestamp>(reader)?)
        } else {
            None
        };
        Ok(STBox::new(extent, period)?
            .with_srid(header.srid.unwrap_or(0))
            .with_geodetic(flags & GEODETIC != 0))
    }
}

impl WkbEncode for BoundingBox {
    fn write_wkb(&self, writer: &mut ByteWriter) {
        match self {
            BoundingBox::Period(p) => p.write_wkb(writer),
            BoundingBox::TBox(b) => b.write_wkb(writer),
            BoundingBox::STBox(b) => b.write_wkb(writer),
        }
    }
}

impl WkbDecode for BoundingBox {
    /// Dispatches on the type tag: a timestamp span, a `TBox` or an `STBox`.
    fn read_wkb(reader: &mut ByteReader<'_>) -> Result<Self, WkbError> {
        let period_tag = TypeTag::new(Shape::Span, Some(BaseKind::Timestamp));
        let header = read_header(&mut reader.clone())?;
        match header.tag.shape() {
            Shape::TBox => Ok(BoundingBox::TBox(TBox::read_wkb(reader)?)),
            Shape::STBox => Ok(BoundingBox::STBox(STBox::read_wkb(reader)?)),
            _ if header.tag == period_tag => Ok(BoundingBox::Period(Span::read_wkb(reader)?)),
            _ => Err(SerializationError::TypeMismatch {
                expected: period_tag.to_byte(),
                found: header.tag.to_byte(),
            }
            .into()),
        }
    }
}

/// Encodes `value`; with [`WkbOptions::hex`] the bytes are uppercase hex text.
///
/// # Examples
///
/// ```rust
/// # use tempora_core::bytes::Endian;
/// # use tempora_span::span::Span;
/// # use tempora_wkb::codec::to_wkb;
/// # use tempora_wkb::options::WkbOptions;
///
/// let span = Span::make(1i32, 5, true, false).unwrap();
/// let bytes = to_wkb(&span, &WkbOptions::new().endian(Endian::Little));
/// assert_eq!(bytes, [0x01, 0x01, 0x01, 1, 0, 0, 0, 5, 0, 0, 0]);
///
/// let hex = to_wkb(&span, &WkbOptions::new().endian(Endian::Big).hex(true));
/// assert_eq!(hex, b"0001010000000100000005");
/// ```
pub fn to_wkb<V: WkbEncode + ?Sized>(value: &V, options: &WkbOptions) -> Vec<u8> {
    let mut writer = ByteWriter::new(options.byte_order());
    value.write_wkb(&mut writer);
    let bytes = writer.into_bytes();
    if options.is_hex() {
        to_hex(&bytes).into_bytes()
    } else {
        bytes
    }
}

/// Encodes `value` as uppercase hex text.
pub fn to_hex_wkb<V: WkbEncode + ?Sized>(value: &V, options: &WkbOptions) -> String {
    let mut writer = ByteWriter::new(options.byte_order());
    value.write_wkb(&mut writer);
    to_hex(writer.as_slice())
}

/// Decodes one value from `reader` and requires that nothing follows it.
///
/// The reader's initial byte order is irrelevant; the header sets it.
///
/// # Errors
///
/// A [`WkbError`] for malformed input, trailing bytes or an invalid value.
pub fn decode<V: WkbDecode>(reader: &mut ByteReader<'_>) -> Result<V, WkbError> {
    let value = V::read_wkb(reader)?;
    reader.finish()?;
    Ok(value)
}

/// Decodes a complete binary buffer.
///
/// # Errors
///
/// See [`decode`].
pub fn from_wkb<V: WkbDecode>(bytes: &[u8]) -> Result<V, WkbError> {
    decode(&mut ByteReader::new(bytes, Endian::NATIVE))
}

/// Decodes hex text in either case.
///
/// # Errors
///
/// `SerializationError::InvalidHex` for malformed hex, otherwise see [`decode`].
pub fn from_hex_wkb<V: WkbDecode>(text: &str) -> Result<V, WkbError> {
    from_wkb(&from_hex(text)?)
}
