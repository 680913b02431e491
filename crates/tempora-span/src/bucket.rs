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

//! Fixed-width bucketing of values and spans.
//!
//! Buckets are half-open spans `[origin + k * size, origin + (k + 1) * size)`
//! for integer `k`, so every value falls into exactly one of them.

use crate::span::Span;
use std::cmp::Ordering;
use tempora_core::base::Metric;

/// Returns the bucket of width `size` aligned at `origin` that contains `value`.
///
/// Returns `None` if `size` is not positive or the bucket overflows the base.
///
/// # Examples
///
/// ```rust
/// # use tempora_span::bucket::span_bucket;
///
/// assert_eq!(span_bucket(&7i32, 5, &0).unwrap().to_string(), "[5, 10)");
/// assert_eq!(span_bucket(&-1i32, 5, &0).unwrap().to_string(), "[-5, 0)");
/// assert_eq!(span_bucket(&2.5, 1.0, &0.5).unwrap().to_string(), "[2.5, 3.5)");
/// assert!(span_bucket(&7i32, 0, &0).is_none());
/// ```
pub fn span_bucket<T>(value: &T, size: T::Distance, origin: &T) -> Option<Span<T>>
where
    T: Metric,
{
    let start = value.bucket_start(size, origin)?;
    bucket_at(start, size)
}

/// The bucket starting at `start`, `None` if its end overflows or does not advance.
#[inline]
fn bucket_at<T>(start: T, size: T::Distance) -> Option<Span<T>>
where
    T: Metric,
{
    let end = start.offset(size)?;
    if end.compare(&start) != Ordering::Greater {
        return None;
    }
    Span::make(start, end, true, false).ok()
}

/// Lists, in order, the buckets that share at least one value with `span`.
///
/// Returns `None` if `size` is not positive or a bucket overflows the base.
///
/// # Examples
///
/// ```rust
/// # use tempora_span::bucket::bucket_list;
/// # use tempora_span::span::Span;
///
/// let span = Span::make(3, 12, true, false).unwrap();
/// let buckets = bucket_list(&span, 5_i64, &0).unwrap();
/// let text: Vec<String> = buckets.iter().map(|b| b.to_string()).collect();
/// assert_eq!(text, ["[0, 5)", "[5, 10)", "[10, 15)"]);
/// ```
pub fn bucket_list<T>(span: &Span<T>, size: T::Distance, origin: &T) -> Option<Vec<Span<T>>>
where
    T: Metric,
{
    let mut bucket = span_bucket(span.lower(), size, origin)?;
    let mut out = Vec::new();
    loop {
        if bucket.after(span) {
            break;
        }
        if bucket.overlaps(span) {
            out.push(bucket.clone());
        }
        bucket = bucket_at(bucket.upper().clone(), size)?;
    }
    log::trace!("span {span} covers {} buckets", out.len());
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;
    use tempora_core::time::Timestamp;

    #[test]
    fn test_span_bucket_integers() {
        let bucket = |value: i32, size: i64, origin: i32| span_bucket(&value, size, &origin);
        let expected = |lower: i32, upper: i32| Span::make(lower, upper, true, false).ok();
        assert_eq!(bucket(0, 5, 0), expected(0, 5));
        assert_eq!(bucket(4, 5, 0), expected(0, 5));
        assert_eq!(bucket(4, 5, 2), expected(2, 7));
        assert_eq!(bucket(1, 5, 2), expected(-3, 2));
        assert_eq!(bucket(-6, 5, 0), expected(-10, -5));
        assert_eq!(span_bucket(&10i64, 4i64, &0i64), Span::make(8i64, 12, true, false).ok());
    }

    #[test]
    fn test_span_bucket_overflow() {
        assert_eq!(span_bucket(&i32::MAX, 10i64, &0), None);
        assert_eq!(span_bucket(&0i32, 0i64, &0), None);
        assert_eq!(span_bucket(&1.0, -1.0, &0.0), None);
    }

    #[test]
    fn test_bucket_list_excludes_touching_bucket() {
        let span = Span::make(0.0, 10.0, true, false).unwrap();
        let buckets = bucket_list(&span, 5.0, &0.0).unwrap();
        assert_eq!(
            buckets,
            vec![
                Span::make(0.0, 5.0, true, false).unwrap(),
                Span::make(5.0, 10.0, true, false).unwrap()
            ]
        );
        // Open lower bound on a bucket edge
        let span = Span::make(5.0, 7.0, false, true).unwrap();
        assert_eq!(bucket_list(&span, 5.0, &0.0).unwrap().len(), 1);
    }

    #[test]
    fn test_bucket_list_timestamps() {
        let t = |h, m| Timestamp::from_ymd_hms(2024, 5, 1, h, m, 0).unwrap();
        let period = Span::make(t(9, 30), t(11, 0), true, true).unwrap();
        let buckets = bucket_list(&period, TimeDelta::hours(1), &Timestamp::EPOCH).unwrap();
        assert_eq!(buckets.len(), 3);
        assert_eq!(buckets[0].lower(), &t(9, 0));
        assert_eq!(buckets[2].lower(), &t(11, 0));
    }
}
