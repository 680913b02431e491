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

//! Integer and float bases.

use super::{BaseKind, BaseValue, Metric, fx_hash};
use crate::bytes::{ByteReader, ByteWriter};
use crate::error::{Error, ParseError, SerializationError};
use crate::text::TextOptions;
use num_traits::PrimInt;
use std::cmp::Ordering;
use std::hash::Hasher;

#[inline]
fn int_successor<T: PrimInt>(v: T) -> Option<T> {
    v.checked_add(&T::one())
}

#[inline]
fn int_predecessor<T: PrimInt>(v: T) -> Option<T> {
    v.checked_sub(&T::one())
}

/// Floors `value` to a multiple of `size` counted from `origin`.
#[inline]
fn int_bucket(value: i128, size: i128, origin: i128) -> Option<i128> {
    if size <= 0 {
        return None;
    }
    Some((value - origin).div_euclid(size) * size + origin)
}

macro_rules! impl_integer_base {
    ($t:ty, $kind:expr, $put:ident, $get:ident) => {
        impl BaseValue for $t {
            const KIND: BaseKind = $kind;
            const DISCRETE: bool = true;

            #[inline]
            fn compare(&self, other: &Self) -> Ordering {
                self.cmp(other)
            }

            #[inline]
            fn hash_extended(&self, seed: u64) -> u64 {
                fx_hash(seed, |h| h.write_i64(*self as i64))
            }

            fn parse(text: &str) -> Result<Self, ParseError> {
                text.trim().parse::<$t>().map_err(|_| {
                    ParseError::invalid_value(Self::KIND.name(), text, Self::KIND.name(), 0)
                })
            }

            #[inline]
            fn format(&self, _options: &TextOptions) -> String {
                self.to_string()
            }

            #[inline]
            fn write_binary(&self, writer: &mut ByteWriter) {
                writer.$put(*self);
            }

            #[inline]
            fn read_binary(reader: &mut ByteReader<'_>) -> Result<Self, SerializationError> {
                reader.$get()
            }

            #[inline]
            fn successor(&self) -> Option<Self> {
                int_successor(*self)
            }

            #[inline]
            fn predecessor(&self) -> Option<Self> {
                int_predecessor(*self)
            }

            #[inline]
            fn to_f64(&self) -> Option<f64> {
                Some(*self as f64)
            }

            #[inline]
            fn scalar_distance(&self, other: &Self) -> Result<f64, Error> {
                Ok(Self::to_scalar(Metric::distance(self, other)))
            }
        }

        impl Metric for $t {
            type Distance = i64;

            #[inline]
            fn zero_distance() -> i64 {
                0
            }

            #[inline]
            fn delta(&self, origin: &Self) -> i64 {
                let d = *self as i128 - *origin as i128;
                d.clamp(i64::MIN as i128, i64::MAX as i128) as i64
            }

            #[inline]
            fn offset(&self, by: i64) -> Option<Self> {
                <$t>::try_from(*self as i128 + by as i128).ok()
            }

            #[inline]
            fn bucket_start(&self, size: i64, origin: &Self) -> Option<Self> {
                let start = int_bucket(*self as i128, size as i128, *origin as i128)?;
                <$t>::try_from(start).ok()
            }

            #[inline]
            fn to_scalar(distance: i64) -> f64 {
                distance as f64
            }
        }
    };
}

impl_integer_base!(i32, BaseKind::Int, put_i32, get_i32);
impl_integer_base!(i64, BaseKind::BigInt, put_i64, get_i64);

/// Rounds to `digits` fractional digits and drops trailing zeros.
fn format_float(value: f64, options: &TextOptions) -> String {
    match options.decimal_digits() {
        Some(digits) if value.is_finite() => {
            let s = format!("{:.*}", digits, value);
            let s = if s.contains('.') {
                s.trim_end_matches('0').trim_end_matches('.').to_owned()
            } else {
                s
            };
            if s == "-0" { "0".to_owned() } else { s }
        }
        _ => value.to_string(),
    }
}

impl BaseValue for f64 {
    const KIND: BaseKind = BaseKind::Float;

    #[inline]
    fn compare(&self, other: &Self) -> Ordering {
        self.total_cmp(other)
    }

    #[inline]
    fn hash_extended(&self, seed: u64) -> u64 {
        fx_hash(seed, |h| h.write_u64(self.to_bits()))
    }

    fn parse(text: &str) -> Result<Self, ParseError> {
        text.trim()
            .parse::<f64>()
            .map_err(|_| ParseError::invalid_value("float", text, "float", 0))
    }

    #[inline]
    fn format(&self, options: &TextOptions) -> String {
        format_float(*self, options)
    }

    #[inline]
    fn write_binary(&self, writer: &mut ByteWriter) {
        writer.put_f64(*self);
    }

    #[inline]
    fn read_binary(reader: &mut ByteReader<'_>) -> Result<Self, SerializationError> {
        reader.get_f64()
    }

    #[inline]
    fn to_f64(&self) -> Option<f64> {
        Some(*self)
    }

    #[inline]
    fn scalar_distance(&self, other: &Self) -> Result<f64, Error> {
        Ok(Metric::distance(self, other))
    }
}

impl Metric for f64 {
    type Distance = f64;

    #[inline]
    fn zero_distance() -> f64 {
        0.0
    }

    #[inline]
    fn delta(&self, origin: &Self) -> f64 {
        self - origin
    }

    #[inline]
    fn offset(&self, by: f64) -> Option<Self> {
        let v = self + by;
        v.is_finite().then_some(v)
    }

    #[inline]
    fn bucket_start(&self, size: f64, origin: &Self) -> Option<Self> {
        if !(size > 0.0) {
            return None;
        }
        let start = ((self - origin) / size).floor() * size + origin;
        start.is_finite().then_some(start)
    }

    #[inline]
    fn to_scalar(distance: f64) -> f64 {
        distance
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_successor_and_adjacency() {
        assert_eq!(3i32.successor(), Some(4));
        assert_eq!(i32::MAX.successor(), None);
        assert_eq!(i64::MIN.predecessor(), None);
        assert!(3i32.is_adjacent(&4));
        assert!(4i32.is_adjacent(&3));
        assert!(!3i32.is_adjacent(&5));
        assert!(!3i32.is_adjacent(&3));
    }

    #[test]
    fn test_float_is_never_adjacent() {
        assert!(!1.0f64.is_adjacent(&1.0000001));
        assert_eq!(1.0f64.successor(), None);
    }

    #[test]
    fn test_float_total_order() {
        assert_eq!(f64::NAN.compare(&f64::NAN), Ordering::Equal);
        assert_eq!(1.0f64.compare(&f64::INFINITY), Ordering::Less);
    }

    #[test]
    fn test_parse_and_format() {
        assert_eq!(<i32 as BaseValue>::parse(" 42 ").unwrap(), 42);
        assert!(<i32 as BaseValue>::parse("4.2").is_err());
        assert_eq!(<f64 as BaseValue>::parse("1.5").unwrap(), 1.5);
        assert_eq!(1.0f64.format(&TextOptions::new()), "1");
        assert_eq!(
            1.23456f64.format(&TextOptions::new().max_decimal_digits(2)),
            "1.23"
        );
        assert_eq!(2.4f64.format(&TextOptions::new().max_decimal_digits(0)), "2");
    }

    #[test]
    fn test_hash_consistent_with_equality() {
        assert_eq!(7i64.hash32(), 7i64.hash32());
        assert_ne!(7i64.hash_extended(1), 7i64.hash_extended(2));
        assert_eq!(2.5f64.hash_extended(9), 2.5f64.hash_extended(9));
    }

    #[test]
    fn test_metric() {
        assert_eq!(Metric::distance(&3i32, &10), 7);
        assert_eq!(Metric::distance(&10i32, &3), 7);
        assert_eq!(Metric::distance(&i32::MIN, &i32::MAX), u32::MAX as i64);
        assert_eq!(3i32.offset(-5), Some(-2));
        assert_eq!(i32::MAX.offset(1), None);
        assert_eq!(7i32.bucket_start(5, &0), Some(5));
        assert_eq!((-1i32).bucket_start(5, &0), Some(-5));
        assert_eq!(7i32.bucket_start(0, &0), None);
        assert_eq!(7.5f64.bucket_start(2.0, &1.0), Some(7.0));
        assert_eq!(2.0f64.scalar_distance(&5.5).unwrap(), 3.5);
    }
}
