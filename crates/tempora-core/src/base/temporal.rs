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

//! Timestamp base.

use super::{BaseKind, BaseValue, Metric, fx_hash};
use crate::bytes::{ByteReader, ByteWriter};
use crate::error::{Error, ParseError, SerializationError};
use crate::text::TextOptions;
use crate::time::{MICROS_PER_SECOND, Timestamp};
use chrono::TimeDelta;
use std::cmp::Ordering;
use std::hash::Hasher;

impl BaseValue for Timestamp {
    const KIND: BaseKind = BaseKind::Timestamp;

    #[inline]
    fn compare(&self, other: &Self) -> Ordering {
        self.cmp(other)
    }

    #[inline]
    fn hash_extended(&self, seed: u64) -> u64 {
        fx_hash(seed, |h| h.write_i64(self.micros()))
    }

    fn parse(text: &str) -> Result<Self, ParseError> {
        Timestamp::parse_text(text)
            .ok_or_else(|| ParseError::invalid_value("timestamptz", text, "timestamptz", 0))
    }

    #[inline]
    fn format(&self, _options: &TextOptions) -> String {
        self.to_string()
    }

    #[inline]
    fn write_binary(&self, writer: &mut ByteWriter) {
        writer.put_i64(self.micros());
    }

    #[inline]
    fn read_binary(reader: &mut ByteReader<'_>) -> Result<Self, SerializationError> {
        reader.get_i64().map(Timestamp::from_micros)
    }

    #[inline]
    fn scalar_distance(&self, other: &Self) -> Result<f64, Error> {
        Ok(Self::to_scalar(Metric::distance(self, other)))
    }
}

impl Metric for Timestamp {
    type Distance = TimeDelta;

    #[inline]
    fn zero_distance() -> TimeDelta {
        TimeDelta::zero()
    }

    #[inline]
    fn delta(&self, origin: &Self) -> TimeDelta {
        Timestamp::delta(*self, *origin)
    }

    #[inline]
    fn offset(&self, by: TimeDelta) -> Option<Self> {
        self.checked_add(by)
    }

    fn bucket_start(&self, size: TimeDelta, origin: &Self) -> Option<Self> {
        let size = size.num_microseconds()?;
        if size <= 0 {
            return None;
        }
        let shifted = self.micros().checked_sub(origin.micros())?;
        let start = shifted
            .div_euclid(size)
            .checked_mul(size)?
            .checked_add(origin.micros())?;
        Some(Timestamp::from_micros(start))
    }

    /// Seconds as a float.
    #[inline]
    fn to_scalar(distance: TimeDelta) -> f64 {
        match distance.num_microseconds() {
            Some(us) => us as f64 / MICROS_PER_SECOND as f64,
            None => distance.num_milliseconds() as f64 / 1_000.0,
        }
    }
}
