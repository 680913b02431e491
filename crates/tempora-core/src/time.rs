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

//! # Timestamps
//!
//! A [`Timestamp`] is a signed count of microseconds since
//! `2000-01-01 00:00:00 UTC`, the epoch used by the storage layers this
//! library feeds. Calendar conversion, parsing and formatting go through
//! `chrono`; the stored value is a plain `i64` so that ordering, hashing and
//! binary encoding stay trivial.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeDelta, Utc};
use std::fmt::Display;

/// Seconds between the Unix epoch and 2000-01-01 00:00:00 UTC.
const EPOCH_OFFSET_SECS: i64 = 946_684_800;

/// Microseconds per second.
pub const MICROS_PER_SECOND: i64 = 1_000_000;

/// An instant in time with microsecond resolution.
///
/// # Examples
///
/// ```rust
/// # use tempora_core::time::Timestamp;
///
/// let t = Timestamp::from_ymd_hms(2000, 1, 1, 0, 0, 1).unwrap();
/// assert_eq!(t.micros(), 1_000_000);
/// assert_eq!(t.to_string(), "2000-01-01 00:00:01+00");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Timestamp(i64);

impl Timestamp {
    /// The epoch, `2000-01-01 00:00:00 UTC`.
    pub const EPOCH: Timestamp = Timestamp(0);

    /// Creates a timestamp from microseconds since the epoch.
    #[inline]
    pub const fn from_micros(micros: i64) -> Self {
        Self(micros)
    }

    /// Returns the microseconds since the epoch.
    #[inline]
    pub const fn micros(self) -> i64 {
        self.0
    }

    /// Converts a `chrono` UTC date-time.
    #[inline]
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(dt.timestamp_micros() - EPOCH_OFFSET_SECS * MICROS_PER_SECOND)
    }

    /// Converts to a `chrono` UTC date-time, or `None` outside chrono's range.
    #[inline]
    pub fn to_datetime(self) -> Option<DateTime<Utc>> {
        let unix = self
            .0
            .checked_add(EPOCH_OFFSET_SECS * MICROS_PER_SECOND)?;
        DateTime::from_timestamp_micros(unix)
    }

    /// Builds a UTC timestamp from calendar fields.
    pub fn from_ymd_hms(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
    ) -> Option<Self> {
        let dt = NaiveDate::from_ymd_opt(year, month, day)?
            .and_hms_opt(hour, minute, second)?
            .and_utc();
        Some(Self::from_datetime(dt))
    }

    /// Adds a signed duration, returning `None` on overflow.
    #[inline]
    pub fn checked_add(self, delta: TimeDelta) -> Option<Self> {
        self.0.checked_add(delta.num_microseconds()?).map(Self)
    }

    /// Returns `self - other` as a duration.
    #[inline]
    pub fn delta(self, other: Timestamp) -> TimeDelta {
        TimeDelta::microseconds(self.0.saturating_sub(other.0))
    }

    /// Parses the accepted textual forms.
    ///
    /// Dates may be followed by a time (separated by a space or `T`), an
    /// optional fraction and an optional UTC offset such as `+00`, `+01:30` or
    /// `Z`. A value without offset is taken as UTC, a bare date as midnight.
    /// `@<micros>` reads a raw microsecond count.
    pub fn parse_text(text: &str) -> Option<Self> {
        let text = text.trim();
        if let Some(raw) = text.strip_prefix('@') {
            return raw.parse().ok().map(Self);
        }
        let normalized = match text.as_bytes().get(10) {
            Some(b'T') | Some(b't') => {
                let mut s = text.to_owned();
                s.replace_range(10..11, " ");
                s
            }
            _ => text.to_owned(),
        };
        let normalized = match normalized.strip_suffix(['Z', 'z']) {
            Some(s) => format!("{}+00", s),
            None => normalized,
        };

        if let Ok(dt) = DateTime::parse_from_str(&normalized, "%Y-%m-%d %H:%M:%S%.f%#z") {
            return Some(Self::from_datetime(dt.with_timezone(&Utc)));
        }
        if let Ok(dt) = DateTime::parse_from_str(&normalized, "%Y-%m-%d %H:%M%#z") {
            return Some(Self::from_datetime(dt.with_timezone(&Utc)));
        }
        if let Ok(ndt) = NaiveDateTime::parse_from_str(&normalized, "%Y-%m-%d %H:%M:%S%.f") {
            return Some(Self::from_datetime(ndt.and_utc()));
        }
        if let Ok(ndt) = NaiveDateTime::parse_from_str(&normalized, "%Y-%m-%d %H:%M") {
            return Some(Self::from_datetime(ndt.and_utc()));
        }
        NaiveDate::parse_from_str(&normalized, "%Y-%m-%d")
            .ok()?
            .and_hms_opt(0, 0, 0)
            .map(|ndt| Self::from_datetime(ndt.and_utc()))
    }
}

impl Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let Some(dt) = self.to_datetime() else {
            return write!(f, "@{}", self.0);
        };
        write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S"))?;
        let fraction = self.0.rem_euclid(MICROS_PER_SECOND);
        if fraction != 0 {
            let digits = format!("{:06}", fraction);
            write!(f, ".{}", digits.trim_end_matches('0'))?;
        }
        write!(f, "+00")
    }
}

impl From<DateTime<Utc>> for Timestamp {
    #[inline]
    fn from(dt: DateTime<Utc>) -> Self {
        Self::from_datetime(dt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_epoch() {
        let t = Timestamp::from_ymd_hms(2000, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(t, Timestamp::EPOCH);
        assert_eq!(t.to_string(), "2000-01-01 00:00:00+00");
    }

    #[test]
    fn test_before_epoch_is_negative() {
        let t = Timestamp::from_ymd_hms(1999, 12, 31, 23, 59, 59).unwrap();
        assert_eq!(t.micros(), -MICROS_PER_SECOND);
        assert_eq!(t.to_string(), "1999-12-31 23:59:59+00");
    }

    #[test]
    fn test_parse_forms() {
        let expected = Timestamp::from_ymd_hms(2001, 1, 1, 8, 0, 0).unwrap();
        assert_eq!(Timestamp::parse_text("2001-01-01 08:00:00+00"), Some(expected));
        assert_eq!(Timestamp::parse_text("2001-01-01 08:00:00"), Some(expected));
        assert_eq!(Timestamp::parse_text("2001-01-01T08:00:00Z"), Some(expected));
        assert_eq!(Timestamp::parse_text("2001-01-01 09:30:00+01:30"), Some(expected));
        assert_eq!(Timestamp::parse_text("2001-01-01 08:00"), Some(expected));
        assert_eq!(
            Timestamp::parse_text("2001-01-01"),
            Timestamp::from_ymd_hms(2001, 1, 1, 0, 0, 0)
        );
        assert_eq!(Timestamp::parse_text("not a time"), None);
    }

    #[test]
    fn test_fractional_seconds() {
        let t = Timestamp::parse_text("2001-01-01 08:00:00.25+00").unwrap();
        assert_eq!(t.micros() % MICROS_PER_SECOND, 250_000);
        assert_eq!(t.to_string(), "2001-01-01 08:00:00.25+00");
        assert_eq!(Timestamp::parse_text(&t.to_string()), Some(t));
    }

    #[test]
    fn test_out_of_range_round_trips() {
        let t = Timestamp::from_micros(i64::MAX);
        let s = t.to_string();
        assert!(s.starts_with('@'));
        assert_eq!(Timestamp::parse_text(&s), Some(t));
    }

    #[test]
    fn test_delta_and_add() {
        let a = Timestamp::from_ymd_hms(2001, 1, 1, 0, 0, 0).unwrap();
        let b = a.checked_add(TimeDelta::hours(2)).unwrap();
        assert_eq!(b.delta(a), TimeDelta::hours(2));
        assert_eq!(a.delta(b), TimeDelta::hours(-2));
    }
}
