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

//! # Base Values
//!
//! Interval logic is written once against the [`BaseValue`] capability trait
//! and instantiated for every element type a span can range over. The trait
//! bundles what the interval layer needs from an element: a total order,
//! hashing consistent with that order, text and binary I/O, and, for
//! discrete domains, a successor so that `[1, 3]` and `[4, 6]` can be
//! recognized as touching.
//!
//! ## Submodules
//!
//! - `numeric`: `i32` (int), `i64` (bigint) and `f64` (float).
//! - `temporal`: `Timestamp`.
//! - `text`: `String`.
//!
//! ## Metric bases
//!
//! Bases with a meaningful difference additionally implement [`Metric`],
//! which powers span widths, distances, shifting and bucketing. Text has no
//! metric; operators that need one report [`UnsupportedOperation`] when they
//! are reached through the scalar (type-erased) path.

mod numeric;
mod temporal;
mod text;

use crate::bytes::{ByteReader, ByteWriter};
use crate::error::{Error, ParseError, SerializationError, UnsupportedOperation};
use crate::text::{Cursor, TextOptions, VALUE_DELIMITERS};
use rustc_hash::FxHasher;
use std::cmp::Ordering;
use std::fmt::{Debug, Display};
use std::hash::Hasher;
use std::ops::Add;

/// Tag identifying the element type of a span or set.
///
/// The discriminant is the code used in the low nibble of binary type tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BaseKind {
    /// 32-bit signed integer.
    Int = 1,
    /// 64-bit signed integer.
    BigInt = 2,
    /// 64-bit IEEE float.
    Float = 3,
    /// Microsecond timestamp.
    Timestamp = 4,
    /// UTF-8 text.
    Text = 5,
}

impl BaseKind {
    /// All kinds in code order.
    pub const ALL: [BaseKind; 5] = [
        BaseKind::Int,
        BaseKind::BigInt,
        BaseKind::Float,
        BaseKind::Timestamp,
        BaseKind::Text,
    ];

    /// Returns the binary code of this kind.
    #[inline]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Looks a kind up by its binary code.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use tempora_core::base::BaseKind;
    ///
    /// assert_eq!(BaseKind::from_code(4), Some(BaseKind::Timestamp));
    /// assert_eq!(BaseKind::from_code(0), None);
    /// ```
    #[inline]
    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.code() == code)
    }

    /// Returns the user-facing type name.
    #[inline]
    pub const fn name(self) -> &'static str {
        match self {
            BaseKind::Int => "int",
            BaseKind::BigInt => "bigint",
            BaseKind::Float => "float",
            BaseKind::Timestamp => "timestamptz",
            BaseKind::Text => "text",
        }
    }

    /// Returns `true` for integer and float kinds.
    #[inline]
    pub const fn is_numeric(self) -> bool {
        matches!(self, BaseKind::Int | BaseKind::BigInt | BaseKind::Float)
    }
}

impl Display for BaseKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Capabilities an element type must provide to be used as a span bound.
pub trait BaseValue: Clone + Debug + Sized {
    /// The tag of this base type.
    const KIND: BaseKind;

    /// Whether values are discrete, i.e. have a successor.
    const DISCRETE: bool = false;

    /// Total order over values.
    fn compare(&self, other: &Self) -> Ordering;

    /// Equality consistent with [`BaseValue::compare`].
    #[inline]
    fn equal(&self, other: &Self) -> bool {
        self.compare(other) == Ordering::Equal
    }

    /// Hashes the value with `seed` mixed in.
    fn hash_extended(&self, seed: u64) -> u64;

    /// A 32-bit hash, folded from [`BaseValue::hash_extended`] with seed 0.
    #[inline]
    fn hash32(&self) -> u32 {
        let h = self.hash_extended(0);
        (h ^ (h >> 32)) as u32
    }

    /// Parses a single value token.
    fn parse(text: &str) -> Result<Self, ParseError>;

    /// Formats the value so that [`BaseValue::parse`] reads it back.
    fn format(&self, options: &TextOptions) -> String;

    /// Reads a value from a cursor as part of `construct`.
    ///
    /// Unquoted values end at the next delimiter.
    fn scan(cursor: &mut Cursor<'_>, construct: &'static str) -> Result<Self, ParseError> {
        let (token, start) = cursor.take_until(VALUE_DELIMITERS);
        if token.is_empty() {
            return Err(ParseError::missing(construct, "value", start));
        }
        Self::parse(token)
            .map_err(|_| ParseError::invalid_value(construct, token, Self::KIND.name(), start))
    }

    /// Appends the binary encoding of the value.
    fn write_binary(&self, writer: &mut ByteWriter);

    /// Decodes a value written by [`BaseValue::write_binary`].
    fn read_binary(reader: &mut ByteReader<'_>) -> Result<Self, SerializationError>;

    /// The next value of a discrete domain, `None` if continuous or at the maximum.
    #[inline]
    fn successor(&self) -> Option<Self> {
        None
    }

    /// The previous value of a discrete domain, `None` if continuous or at the minimum.
    #[inline]
    fn predecessor(&self) -> Option<Self> {
        None
    }

    /// Returns `true` if the values are distinct but nothing lies between them.
    ///
    /// Always `false` for continuous domains.
    #[inline]
    fn is_adjacent(&self, other: &Self) -> bool {
        self.successor().is_some_and(|s| s.equal(other))
            || other.successor().is_some_and(|s| s.equal(self))
    }

    /// Numeric view of the value, `None` for non-numeric bases.
    #[inline]
    fn to_f64(&self) -> Option<f64> {
        None
    }

    /// Distance between two values as a plain float.
    #[inline]
    fn scalar_distance(&self, _other: &Self) -> Result<f64, Error> {
        Err(UnsupportedOperation {
            operation: "distance",
            base: Self::KIND,
        }
        .into())
    }
}

/// A base with a signed difference between values.
pub trait Metric: BaseValue {
    /// The type of differences between values.
    type Distance: Copy + PartialEq + PartialOrd + Debug + Add<Output = Self::Distance>;

    /// The zero difference.
    fn zero_distance() -> Self::Distance;

    /// The signed difference `self - origin`.
    fn delta(&self, origin: &Self) -> Self::Distance;

    /// The absolute difference between the values.
    fn distance(&self, other: &Self) -> Self::Distance {
        if self.compare(other) == Ordering::Less {
            other.delta(self)
        } else {
            self.delta(other)
        }
    }

    /// Moves the value by a signed difference, `None` on overflow.
    fn offset(&self, by: Self::Distance) -> Option<Self>;

    /// Returns the start of the bucket of width `size` aligned at `origin`
    /// that contains the value, `None` on overflow or non-positive `size`.
    fn bucket_start(&self, size: Self::Distance, origin: &Self) -> Option<Self>;

    /// Converts a difference into a float in natural units (seconds for time).
    fn to_scalar(distance: Self::Distance) -> f64;
}

/// Hashes with FxHasher after mixing in `seed`.
#[inline]
pub(crate) fn fx_hash(seed: u64, feed: impl FnOnce(&mut FxHasher)) -> u64 {
    let mut hasher = FxHasher::default();
    hasher.write_u64(seed);
    feed(&mut hasher);
    hasher.finish()
}
