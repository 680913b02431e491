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

//! Merge routines over strictly increasing value slices.
//!
//! Point-shaped operands (bare values and instant sets) are combined here
//! directly instead of being promoted to degenerate spans.

use crate::span::RelativePosition;
use crate::span_set::SpanSet;
use std::cmp::Ordering;
use tempora_core::base::BaseValue;

/// Returns the values in `a` or `b`.
pub(crate) fn union<T>(a: &[T], b: &[T]) -> Vec<T>
where
    T: BaseValue,
{
    let mut out = Vec::with_capacity(a.len() + b.len());
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        match a[i].compare(&b[j]) {
            Ordering::Less => {
                out.push(a[i].clone());
                i += 1;
            }
            Ordering::Greater => {
                out.push(b[j].clone());
                j += 1;
            }
            Ordering::Equal => {
                out.push(a[i].clone());
                i += 1;
                j += 1;
            }
        }
    }
    out.extend_from_slice(&a[i..]);
    out.extend_from_slice(&b[j..]);
    out
}

/// Returns the values in both `a` and `b`.
pub(crate) fn intersection<T>(a: &[T], b: &[T]) -> Vec<T>
where
    T: BaseValue,
{
    let mut out = Vec::new();
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        match a[i].compare(&b[j]) {
            Ordering::Less => i += 1,
            Ordering::Greater => j += 1,
            Ordering::Equal => {
                out.push(a[i].clone());
                i += 1;
                j += 1;
            }
        }
    }
    out
}

/// Returns the values of `a` not in `b`.
pub(crate) fn minus<T>(a: &[T], b: &[T]) -> Vec<T>
where
    T: BaseValue,
{
    let mut out = Vec::with_capacity(a.len());
    let mut j = 0;
    for value in a {
        while j < b.len() && b[j].compare(value) == Ordering::Less {
            j += 1;
        }
        if j == b.len() || !b[j].equal(value) {
            out.push(value.clone());
        }
    }
    out
}

/// Returns `true` if every value of `b` is in `a`.
pub(crate) fn contains<T>(a: &[T], b: &[T]) -> bool
where
    T: BaseValue,
{
    let mut i = 0;
    for value in b {
        while i < a.len() && a[i].compare(value) == Ordering::Less {
            i += 1;
        }
        if i == a.len() || !a[i].equal(value) {
            return false;
        }
    }
    true
}

/// Returns `true` if `a` and `b` share a value.
pub(crate) fn overlaps<T>(a: &[T], b: &[T]) -> bool
where
    T: BaseValue,
{
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        match a[i].compare(&b[j]) {
            Ordering::Less => i += 1,
            Ordering::Greater => j += 1,
            Ordering::Equal => return true,
        }
    }
    false
}

/// Keeps the values inside (`keep_inside`) or outside the spans of `set`.
pub(crate) fn filter_by_span_set<T>(values: &[T], set: &SpanSet<T>, keep_inside: bool) -> Vec<T>
where
    T: BaseValue,
{
    let spans = set.spans();
    let mut out = Vec::with_capacity(values.len());
    let mut k = 0;
    for value in values {
        while k < spans.len() && spans[k].relative_position(value) == RelativePosition::After {
            k += 1;
        }
        let inside = spans.get(k).is_some_and(|s| s.contains_value(value));
        if inside == keep_inside {
            out.push(value.clone());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::span::Span;

    #[test]
    fn test_merges() {
        let a = [1, 3, 5, 7];
        let b = [2, 3, 7, 9];
        assert_eq!(union(&a, &b), vec![1, 2, 3, 5, 7, 9]);
        assert_eq!(intersection(&a, &b), vec![3, 7]);
        assert_eq!(minus(&a, &b), vec![1, 5]);
        assert_eq!(minus(&b, &a), vec![2, 9]);
    }

    #[test]
    fn test_contains_and_overlaps() {
        assert!(contains(&[1, 2, 3, 4], &[2, 4]));
        assert!(!contains(&[1, 2, 3, 4], &[2, 5]));
        assert!(overlaps(&[1.0, 5.0], &[0.0, 5.0]));
        assert!(!overlaps(&[1.0, 5.0], &[0.0, 4.0]));
    }

    #[test]
    fn test_filter_by_span_set() {
        let set = SpanSet::new([
            Span::make(2.0, 4.0, true, false).unwrap(),
            Span::make(6.0, 8.0, true, true).unwrap(),
        ])
        .unwrap();
        let values = [1.0, 2.0, 4.0, 7.0, 9.0];
        assert_eq!(filter_by_span_set(&values, &set, true), vec![2.0, 7.0]);
        assert_eq!(filter_by_span_set(&values, &set, false), vec![1.0, 4.0, 9.0]);
    }
}
