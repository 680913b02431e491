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

//! # Box Text Input
//!
//! Readers for the forms written by the box `Display` impls:
//!
//! ```text
//! tbox   := 'TBOX' ('XT' '(' span ',' period ')' | 'X' '(' span ')' | 'T' '(' period ')')
//! stbox  := ['SRID=' int ';'] ('STBOX' | 'GEODSTBOX') dims '(' body ')'
//! dims   := 'ZT' | 'XT' | 'Z' | 'X' | 'T'
//! body   := coords [',' period] | period
//! coords := '(' point ',' point ')'
//! point  := '(' float ',' float [',' float] ')'
//! ```
//!
//! Keywords are case-insensitive and whitespace may precede any token.

use crate::stbox::{Extent, STBox};
use crate::tbox::TBox;
use std::str::FromStr;
use tempora_core::error::{Error, ParseError};
use tempora_core::text::Cursor;
use tempora_core::time::Timestamp;
use tempora_span::parse::read_span;

const TBOX: &str = "tbox";
const STBOX: &str = "stbox";

/// Reads a `TBox` at the cursor.
///
/// # Errors
///
/// A [`ParseError`] naming the missing token, or a span error.
pub fn read_tbox(cursor: &mut Cursor<'_>) -> Result<TBox, Error> {
    let start = cursor.position();
    if !cursor.consume_keyword("TBOX") {
        return Err(ParseError::missing(TBOX, "TBOX keyword", start).into());
    }
    let (hasx, hast) = if cursor.consume_keyword("XT") {
        (true, true)
    } else if cursor.consume_keyword("X") {
        (true, false)
    } else if cursor.consume_keyword("T") {
        (false, true)
    } else {
        return Err(ParseError::missing(TBOX, "dimension X, T or XT", cursor.position()).into());
    };
    cursor.expect('(', TBOX, "opening parenthesis")?;
    let span = if hasx {
        Some(read_span::<f64>(cursor)?)
    } else {
        None
    };
    if hasx && hast {
        cursor.expect(',', TBOX, "comma")?;
    }
    let period = if hast {
        Some(read_span::<Timestamp>(cursor)?)
    } else {
        None
    };
    cursor.expect(')', TBOX, "closing parenthesis")?;
    TBox::new(span, period).map_err(|e| ParseError::invalid_value(TBOX, e.to_string(), "box", start).into())
}

fn read_point(cursor: &mut Cursor<'_>, has_z: bool) -> Result<(f64, f64, Option<f64>), Error> {
    cursor.expect('(', STBOX, "opening parenthesis")?;
    let x = cursor.value::<f64>(STBOX)?;
    cursor.expect(',', STBOX, "comma")?;
    let y = cursor.value::<f64>(STBOX)?;
    let z = if has_z {
        cursor.expect(',', STBOX, "comma")?;
        Some(cursor.value::<f64>(STBOX)?)
    } else {
        None
    };
    cursor.expect(')', STBOX, "closing parenthesis")?;
    Ok((x, y, z))
}

fn read_extent(cursor: &mut Cursor<'_>, has_z: bool) -> Result<Extent, Error> {
    let start = cursor.position();
    cursor.expect('(', STBOX, "opening parenthesis")?;
    let lo = read_point(cursor, has_z)?;
    cursor.expect(',', STBOX, "comma")?;
    let hi = read_point(cursor, has_z)?;
    cursor.expect(')', STBOX, "closing parenthesis")?;
    let invalid = |e: crate::error::BoxError| -> Error {
        ParseError::invalid_value(STBOX, e.to_string(), "extent", start).into()
    };
    let extent = Extent::new(lo.0, hi.0, lo.1, hi.1).map_err(invalid)?;
    match lo.2.zip(hi.2) {
        Some((zmin, zmax)) => extent.with_z(zmin, zmax).map_err(invalid),
        None => Ok(extent),
    }
}

/// Reads an `STBox` at the cursor.
///
/// # Errors
///
/// A [`ParseError`] naming the missing token or the invalid extent, or a
/// span error.
pub fn read_stbox(cursor: &mut Cursor<'_>) -> Result<STBox, Error> {
    let start = cursor.position();
    let srid = if cursor.consume_keyword("SRID=") {
        let srid = cursor.value::<i32>(STBOX)?;
        cursor.expect(';', STBOX, "semicolon")?;
        srid
    } else {
        0
    };
    let geodetic = if cursor.consume_keyword("GEODSTBOX") {
        true
    } else if cursor.consume_keyword("STBOX") {
        false
    } else {
        return Err(ParseError::missing(STBOX, "STBOX keyword", cursor.position()).into());
    };
    let (hasx, has_z, hast) = if cursor.consume_keyword("ZT") {
        (true, true, true)
    } else if cursor.consume_keyword("XT") {
        (true, false, true)
    } else if cursor.consume_keyword("Z") {
        (true, true, false)
    } else if cursor.consume_keyword("X") {
        (true, false, false)
    } else if cursor.consume_keyword("T") {
        (false, false, true)
    } else {
        return Err(ParseError::missing(STBOX, "dimension X, Z, T, XT or ZT", cursor.position()).into());
    };
    cursor.expect('(', STBOX, "opening parenthesis")?;
    let extent = if hasx {
        Some(read_extent(cursor, has_z)?)
    } else {
        None
    };
    if hasx && hast {
        cursor.expect(',', STBOX, "comma")?;
    }
    let period = if hast {
        Some(read_span::<Timestamp>(cursor)?)
    } else {
        None
    };
    cursor.expect(')', STBOX, "closing parenthesis")?;
    let stbox = STBox::new(extent, period)
        .map_err(|e| -> Error { ParseError::invalid_value(STBOX, e.to_string(), "box", start).into() })?;
    Ok(stbox.with_srid(srid).with_geodetic(geodetic))
}

fn parse_all<R>(
    text: &str,
    construct: &'static str,
    read: impl FnOnce(&mut Cursor<'_>) -> Result<R, Error>,
) -> Result<R, Error> {
    let mut cursor = Cursor::new(text);
    let result = read(&mut cursor).inspect_err(|e| log::debug!("rejected {construct} input: {e}"))?;
    cursor.finish(construct)?;
    Ok(result)
}

/// Parses a complete `TBox`.
///
/// # Examples
///
/// ```rust
/// # use tempora_box::text::parse_tbox;
///
/// let b = parse_tbox("TBOX X([1, 2))").unwrap();
/// assert_eq!(b.to_string(), "TBOX X([1, 2))");
/// assert!(parse_tbox("TBOX X([1, 2)").is_err());
/// ```
///
/// # Errors
///
/// See [`read_tbox`]; also rejects trailing input.
pub fn parse_tbox(text: &str) -> Result<TBox, Error> {
    parse_all(text, TBOX, read_tbox)
}

/// Parses a complete `STBox`.
///
/// # Errors
///
/// See [`read_stbox`]; also rejects trailing input.
pub fn parse_stbox(text: &str) -> Result<STBox, Error> {
    parse_all(text, STBOX, read_stbox)
}

impl FromStr for TBox {
    type Err = Error;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_tbox(s)
    }
}

impl FromStr for STBox {
    type Err = Error;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_stbox(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempora_core::error::ParseErrorKind;

    #[test]
    fn test_tbox_round_trip() {
        for text in [
            "TBOX X([1, 2))",
            "TBOX T([2001-01-01 00:00:00+00, 2001-01-02 00:00:00+00])",
            "TBOX XT((1.5, 2], [2001-01-01 00:00:00+00, 2001-01-02 00:00:00+00))",
        ] {
            let b: TBox = text.parse().unwrap();
            assert_eq!(b.to_string(), text);
        }
    }

    #[test]
    fn test_tbox_case_and_whitespace() {
        let b = parse_tbox("  tbox x ( [ 1 , 2 ] ) ").unwrap();
        assert_eq!(b.to_string(), "TBOX X([1, 2])");
    }

    #[test]
    fn test_stbox_round_trip() {
        for text in [
            "STBOX X((1,2),(3,4))",
            "SRID=4326;GEODSTBOX Z((1,2,3),(4,5,6))",
            "STBOX T([2001-01-01 00:00:00+00, 2001-01-02 00:00:00+00])",
            "SRID=3857;STBOX XT(((1,2),(3,4)),[2001-01-01 00:00:00+00, 2001-01-02 00:00:00+00])",
            "STBOX ZT(((1,2,3),(4,5,6)),(2001-01-01 00:00:00+00, 2001-01-02 00:00:00+00])",
        ] {
            let b: STBox = text.parse().unwrap();
            assert_eq!(b.to_string(), text);
        }
        let geo = parse_stbox("SRID=4326;GEODSTBOX Z((1,2,3),(4,5,6))").unwrap();
        assert!(geo.is_geodetic());
        assert_eq!(geo.srid(), 4326);
        assert!(geo.has_z());
    }

    #[test]
    fn test_errors() {
        let Err(Error::Parse(e)) = parse_tbox("TBOX XT([1, 2] [2001-01-01, 2001-01-02])") else {
            panic!("expected a parse error");
        };
        assert_eq!(e.construct, "tbox");
        assert_eq!(e.kind, ParseErrorKind::Missing("comma"));

        let Err(Error::Parse(e)) = parse_stbox("STBOX X((3,2),(1,4))") else {
            panic!("expected a parse error");
        };
        assert!(matches!(e.kind, ParseErrorKind::InvalidValue { .. }));

        assert!(matches!(parse_stbox("BOX X((1,2),(3,4))"), Err(Error::Parse(_))));
        assert!(matches!(parse_tbox("TBOX X([1, 2]) extra"), Err(Error::Parse(_))));
        assert!(matches!(parse_tbox("TBOX X([2, 1])"), Err(Error::InvalidSpan(_))));
    }
}
