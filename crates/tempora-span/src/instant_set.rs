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

//! # Instant Sets
//!
//! An [`InstantSet`] is a strictly increasing collection of distinct values,
//! the point-shaped analogue of a [`SpanSet`]. Sets of timestamps are the
//! common case and are available as [`TimestampSet`].

use crate::points;
use crate::span::Span;
use crate::span_set::{SpanSet, normalize};
use std::cmp::Ordering;
use std::fmt::Display;
use std::hash::Hash;
use tempora_core::base::{BaseValue, Metric};
use tempora_core::error::{Error, InvalidCollection};
use tempora_core::text::TextOptions;
use tempora_core::time::Timestamp;

/// A set of distinct timestamps.
pub type TimestampSet = InstantSet<Timestamp>;

/// A strictly increasing, non-empty sequence of values.
#[derive(Clone, Debug)]
pub struct InstantSet<T>
where
    T: BaseValue,
{
    values: Vec<T>,
}

impl<T> InstantSet<T>
where
    T: BaseValue,
{
    /// Builds a set from strictly increasing values.
    ///
    /// # Errors
    ///
    /// `InvalidCollection::Empty` for no values and
    /// `InvalidCollection::NotIncreasing` naming the first value that is not
    /// greater than its predecessor.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use tempora_span::instant_set::InstantSet;
    /// # use tempora_core::error::InvalidCollection;
    ///
    /// assert!(InstantSet::make(&[1, 2, 3]).is_ok());
    /// assert_eq!(
    ///     InstantSet::make(&[1, 1]).unwrap_err(),
    ///     InvalidCollection::NotIncreasing { index: 1 }
    /// );
    /// ```
    pub fn make(values: &[T]) -> Result<Self, InvalidCollection> {
        Self::new(values.to_vec())
    }

    /// Like [`InstantSet::make`], taking ownership of the values.
    ///
    /// # Errors
    ///
    /// See [`InstantSet::make`].
    pub fn new(values: Vec<T>) -> Result<Self, InvalidCollection> {
        if values.is_empty() {
            return Err(InvalidCollection::Empty);
        }
        if let Some(index) = values
            .windows(2)
            .position(|w| w[0].compare(&w[1]) != Ordering::Less)
        {
            return Err(InvalidCollection::NotIncreasing { index: index + 1 });
        }
        Ok(Self { values })
    }

    /// Builds a set from values in any order, dropping duplicates.
    ///
    /// # Errors
    ///
    /// `InvalidCollection::Empty` for no values.
    pub fn from_unsorted<I>(values: I) -> Result<Self, InvalidCollection>
    where
        I: IntoIterator<Item = T>,
    {
        let mut values: Vec<T> = values.into_iter().collect();
        if values.is_empty() {
            return Err(InvalidCollection::Empty);
        }
        values.sort_unstable_by(T::compare);
        values.dedup_by(|a, b| a.equal(b));
        Ok(Self { values })
    }

    /// Wraps non-empty values known to be strictly increasing.
    #[inline]
    pub(crate) fn from_sorted_unchecked(values: Vec<T>) -> Self {
        debug_assert!(!values.is_empty(), "InstantSet must not be empty");
        debug_assert!(values.windows(2).all(|w| w[0].compare(&w[1]) == Ordering::Less));
        Self { values }
    }

    /// Wraps values known to be strictly increasing, `None` if empty.
    #[inline]
    pub(crate) fn from_sorted_values(values: Vec<T>) -> Option<Self> {
        (!values.is_empty()).then(|| Self::from_sorted_unchecked(values))
    }

    /// Returns the values in increasing order.
    #[inline]
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// Returns the number of values.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always `false`: an instant set holds at least one value.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the `n`-th value.
    #[inline]
    pub fn value_n(&self, n: usize) -> Option<&T> {
        self.values.get(n)
    }

    /// Returns the smallest value.
    #[inline]
    pub fn start_value(&self) -> &T {
        &self.values[0]
    }

    /// Returns the largest value.
    #[inline]
    pub fn end_value(&self) -> &T {
        &self.values[self.values.len() - 1]
    }

    /// Iterates over the values.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.values.iter()
    }

    /// Consumes the set and returns its values.
    #[inline]
    pub fn into_values(self) -> Vec<T> {
        self.values
    }

    /// Binary search: `Ok(i)` if `value` is the `i`-th value, otherwise
    /// `Err(i)` with its insertion point (`0` before the first value, `len()`
    /// after the last).
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use tempora_span::instant_set::InstantSet;
    ///
    /// let set = InstantSet::make(&[10, 20, 30]).unwrap();
    /// assert_eq!(set.binary_search(&20), Ok(1));
    /// assert_eq!(set.binary_search(&5), Err(0));
    /// assert_eq!(set.binary_search(&25), Err(2));
    /// assert_eq!(set.binary_search(&35), Err(3));
    /// ```
    #[inline]
    pub fn binary_search(&self, value: &T) -> Result<usize, usize> {
        self.values.binary_search_by(|v| v.compare(value))
    }

    /// Returns `true` if `value` is in the set.
    #[inline]
    pub fn contains_value(&self, value: &T) -> bool {
        self.binary_search(value).is_ok()
    }

    /// The closed span from the first to the last value.
    #[inline]
    pub fn bounding_span(&self) -> Span<T> {
        Span::closed(self.start_value().clone(), self.end_value().clone())
    }

    /// Converts each value into a single-point span.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use tempora_span::instant_set::InstantSet;
    ///
    /// let floats = InstantSet::make(&[1.0, 2.0]).unwrap();
    /// assert_eq!(floats.to_span_set().to_string(), "{[1, 1], [2, 2]}");
    ///
    /// // Consecutive integers touch and merge
    /// let ints = InstantSet::make(&[1, 2, 5]).unwrap();
    /// assert_eq!(ints.to_span_set().to_string(), "{[1, 3), [5, 6)}");
    /// ```
    pub fn to_span_set(&self) -> SpanSet<T> {
        let mut spans: Vec<Span<T>> = self.values.iter().cloned().map(Span::point).collect();
        SpanSet::from_normalized(normalize(&mut spans))
    }

    /// Returns `true` if every value of `other` is in `self`.
    #[inline]
    pub fn contains(&self, other: &Self) -> bool {
        points::contains(&self.values, &other.values)
    }

    /// Returns `true` if every value of `self` is in `other`.
    #[inline]
    pub fn contained(&self, other: &Self) -> bool {
        other.contains(self)
    }

    /// Returns `true` if the sets share a value.
    #[inline]
    pub fn overlaps(&self, other: &Self) -> bool {
        points::overlaps(&self.values, &other.values)
    }

    /// Returns `true` if the last value of one set is the predecessor of the
    /// first value of the other (discrete bases only).
    #[inline]
    pub fn adjacent(&self, other: &Self) -> bool {
        self.bounding_span().adjacent(&other.bounding_span())
    }

    /// Returns `true` if both sets hold the same values.
    #[inline]
    pub fn same(&self, other: &Self) -> bool {
        self.values.len() == other.values.len()
            && self.values.iter().zip(&other.values).all(|(a, b)| a.equal(b))
    }

    /// Returns the values in either set.
    #[inline]
    pub fn union(&self, other: &Self) -> Self {
        Self {
            values: points::union(&self.values, &other.values),
        }
    }

    /// Returns the values in both sets, `None` if there are none.
    #[inline]
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        Self::from_sorted_values(points::intersection(&self.values, &other.values))
    }

    /// Returns the values of `self` not in `other`, `None` if there are none.
    #[inline]
    pub fn minus(&self, other: &Self) -> Option<Self> {
        Self::from_sorted_values(points::minus(&self.values, &other.values))
    }

    /// Scalar distance between the bounding spans of the sets.
    ///
    /// # Errors
    ///
    /// `UnsupportedOperation` for bases without a metric.
    #[inline]
    pub fn distance_scalar(&self, other: &Self) -> Result<f64, Error> {
        self.bounding_span().distance_scalar(&other.bounding_span())
    }

    /// Hashes the set from its values.
    pub fn hash32(&self) -> u32 {
        self.values
            .iter()
            .fold(1u32, |acc, v| acc.wrapping_mul(31).wrapping_add(v.hash32()))
    }

    /// Hashes the set with `seed` mixed in.
    pub fn hash_extended(&self, seed: u64) -> u64 {
        self.values.iter().fold(seed ^ 1, |acc, v| {
            acc.wrapping_mul(31).wrapping_add(v.hash_extended(seed))
        })
    }

    /// Formats the set as `{a, b, c}` using `options`.
    pub fn to_text(&self, options: &TextOptions) -> String {
        let parts: Vec<String> = self.values.iter().map(|v| v.format(options)).collect();
        format!("{{{}}}", parts.join(", "))
    }
}

impl<T> InstantSet<T>
where
    T: Metric,
{
    /// Distance between the bounding spans of the sets, zero if one starts
    /// before the other ends.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use tempora_span::instant_set::InstantSet;
    ///
    /// let a = InstantSet::make(&[1, 3]).unwrap();
    /// let b = InstantSet::make(&[6, 20]).unwrap();
    /// assert_eq!(a.distance(&b), 3_i64);
    /// // Interleaved values: the bounding spans overlap
    /// let c = InstantSet::make(&[2, 30]).unwrap();
    /// assert_eq!(a.distance(&c), 0_i64);
    /// ```
    #[inline]
    pub fn distance(&self, other: &Self) -> T::Distance {
        self.bounding_span().distance(&other.bounding_span())
    }

    /// Shifts every value by `by`, `None` on overflow.
    pub fn shift(&self, by: T::Distance) -> Option<Self> {
        let values = self
            .values
            .iter()
            .map(|v| v.offset(by))
            .collect::<Option<Vec<_>>>()?;
        Some(Self { values })
    }
}

impl<T> PartialEq for InstantSet<T>
where
    T: BaseValue,
{
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.same(other)
    }
}

impl<T> Eq for InstantSet<T> where T: BaseValue {}

impl<T> PartialOrd for InstantSet<T>
where
    T: BaseValue,
{
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for InstantSet<T>
where
    T: BaseValue,
{
    /// Lexicographic over the values, shorter prefix first.
    fn cmp(&self, other: &Self) -> Ordering {
        for (a, b) in self.values.iter().zip(&other.values) {
            let ord = a.compare(b);
            if ord != Ordering::Equal {
                return ord;
            }
        }
        self.values.len().cmp(&other.values.len())
    }
}

impl<T> Hash for InstantSet<T>
where
    T: BaseValue,
{
    #[inline]
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash_extended(0));
    }
}

impl<T> Display for InstantSet<T>
where
    T: BaseValue,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_text(&TextOptions::default()))
    }
}

impl<T> TryFrom<Vec<T>> for InstantSet<T>
where
    T: BaseValue,
{
    type Error = InvalidCollection;

    #[inline]
    fn try_from(values: Vec<T>) -> Result<Self, Self::Error> {
        Self::new(values)
    }
}

impl<'a, T> IntoIterator for &'a InstantSet<T>
where
    T: BaseValue,
{
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
