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

//! # Span Sets
//!
//! A [`SpanSet`] is a normalized collection of spans: sorted by lower bound,
//! pairwise disjoint and never touching. Construction from arbitrary spans
//! runs [`normalize`] (sort, then a single merge pass), so every set has a
//! unique representation and equality is plain element-wise comparison.
//!
//! All binary operators walk both sorted span arrays in lockstep and cost
//! `O(n + m)`; lookups of a single value or span use binary search.

use crate::span::{RelativePosition, Span};
use std::cmp::Ordering;
use std::fmt::Display;
use std::hash::Hash;
use tempora_core::base::{BaseValue, Metric};
use tempora_core::error::{Error, InvalidCollection};
use tempora_core::text::TextOptions;

/// Sorts `spans` and merges every run of overlapping or adjacent spans.
///
/// The output is sorted, pairwise disjoint and non-adjacent. The input is
/// left sorted.
///
/// # Examples
///
/// ```rust
/// # use tempora_span::span::Span;
/// # use tempora_span::span_set::normalize;
///
/// let mut spans = [
///     Span::make(8.0, 9.0, true, true).unwrap(),
///     Span::make(2.0, 5.0, true, true).unwrap(),
///     Span::make(1.0, 3.0, true, true).unwrap(),
/// ];
/// let merged = normalize(&mut spans);
/// assert_eq!(merged.len(), 2);
/// assert_eq!(merged[0].to_string(), "[1, 5]");
/// assert_eq!(merged[1].to_string(), "[8, 9]");
/// ```
pub fn normalize<T>(spans: &mut [Span<T>]) -> Vec<Span<T>>
where
    T: BaseValue,
{
    spans.sort_unstable_by(Span::cmp);
    let merged = merge_sorted(spans.iter().cloned());
    log::trace!("normalized {} spans into {}", spans.len(), merged.len());
    merged
}

/// Merge pass over spans already sorted by [`Span::cmp`].
fn merge_sorted<T, I>(spans: I) -> Vec<Span<T>>
where
    T: BaseValue,
    I: IntoIterator<Item = Span<T>>,
{
    let iter = spans.into_iter();
    let mut out: Vec<Span<T>> = Vec::with_capacity(iter.size_hint().0);
    for span in iter {
        match out.last_mut() {
            Some(last) if last.overlaps(&span) || last.adjacent(&span) => {
                *last = last.expand(&span);
            }
            _ => out.push(span),
        }
    }
    out
}

/// A sorted set of disjoint, non-adjacent spans.
#[derive(Clone, Debug)]
pub struct SpanSet<T>
where
    T: BaseValue,
{
    spans: Vec<Span<T>>,
    extent: Span<T>,
}

impl<T> SpanSet<T>
where
    T: BaseValue,
{
    /// Builds a set from spans in any order, merging overlapping and adjacent ones.
    ///
    /// # Errors
    ///
    /// `InvalidCollection::Empty` if `spans` is empty.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use tempora_span::span::Span;
    /// # use tempora_span::span_set::SpanSet;
    ///
    /// let set = SpanSet::new([
    ///     Span::make(4, 6, true, true).unwrap(),
    ///     Span::make(1, 3, true, true).unwrap(),
    /// ])
    /// .unwrap();
    /// assert_eq!(set.len(), 1);
    /// assert_eq!(set.to_string(), "{[1, 7)}");
    /// ```
    pub fn new<I>(spans: I) -> Result<Self, InvalidCollection>
    where
        I: IntoIterator<Item = Span<T>>,
    {
        let mut spans: Vec<Span<T>> = spans.into_iter().collect();
        if spans.is_empty() {
            return Err(InvalidCollection::Empty);
        }
        let merged = normalize(&mut spans);
        Ok(Self::from_normalized(merged))
    }

    /// Builds a set from spans that are already sorted, disjoint and non-adjacent.
    ///
    /// # Errors
    ///
    /// `InvalidCollection::Empty` for no spans, `InvalidCollection::NotDisjoint`
    /// naming the first span that does not lie strictly after its predecessor.
    pub fn from_sorted(spans: Vec<Span<T>>) -> Result<Self, InvalidCollection> {
        if spans.is_empty() {
            return Err(InvalidCollection::Empty);
        }
        for (index, pair) in spans.windows(2).enumerate() {
            if !pair[0].before(&pair[1]) || pair[0].adjacent(&pair[1]) {
                return Err(InvalidCollection::NotDisjoint { index: index + 1 });
            }
        }
        Ok(Self::from_normalized(spans))
    }

    /// Wraps a single span.
    #[inline]
    pub fn from_span(span: Span<T>) -> Self {
        Self {
            extent: span.clone(),
            spans: vec![span],
        }
    }

    /// Wraps normalized spans. `spans` must be non-empty.
    pub(crate) fn from_normalized(spans: Vec<Span<T>>) -> Self {
        debug_assert!(!spans.is_empty(), "SpanSet must not be empty");
        debug_assert!(
            spans
                .windows(2)
                .all(|w| w[0].before(&w[1]) && !w[0].adjacent(&w[1])),
            "SpanSet spans must be sorted, disjoint and non-adjacent"
        );
        let first = &spans[0];
        let last = &spans[spans.len() - 1];
        let extent = Span::new_unchecked(
            first.lower().clone(),
            last.upper().clone(),
            first.lower_inc(),
            last.upper_inc(),
        );
        Self { spans, extent }
    }

    /// Wraps normalized spans, `None` if there are none.
    #[inline]
    pub(crate) fn from_pieces(spans: Vec<Span<T>>) -> Option<Self> {
        (!spans.is_empty()).then(|| Self::from_normalized(spans))
    }

    /// Returns the spans in increasing order.
    #[inline]
    pub fn spans(&self) -> &[Span<T>] {
        &self.spans
    }

    /// Returns the number of spans.
    #[inline]
    pub fn len(&self) -> usize {
        self.spans.len()
    }

    /// Always `false`: a span set holds at least one span.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// Returns the `n`-th span.
    #[inline]
    pub fn span_n(&self, n: usize) -> Option<&Span<T>> {
        self.spans.get(n)
    }

    /// Returns the first span.
    #[inline]
    pub fn start_span(&self) -> &Span<T> {
        &self.spans[0]
    }

    /// Returns the last span.
    #[inline]
    pub fn end_span(&self) -> &Span<T> {
        &self.spans[self.spans.len() - 1]
    }

    /// Returns the smallest span containing the whole set.
    #[inline]
    pub fn bounding_span(&self) -> &Span<T> {
        &self.extent
    }

    /// Iterates over the spans.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Span<T>> {
        self.spans.iter()
    }

    /// Consumes the set and returns its spans.
    #[inline]
    pub fn into_spans(self) -> Vec<Span<T>> {
        self.spans
    }

    /// Binary search for `value`: `Ok(i)` if span `i` contains it, otherwise
    /// `Err(i)` with the index of the first span after it (`0` before the
    /// first span, `len()` after the last).
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use tempora_span::span::Span;
    /// # use tempora_span::span_set::SpanSet;
    ///
    /// let set = SpanSet::new([
    ///     Span::make(1.0, 2.0, true, true).unwrap(),
    ///     Span::make(5.0, 6.0, true, true).unwrap(),
    /// ])
    /// .unwrap();
    /// assert_eq!(set.find(&0.0), Err(0));
    /// assert_eq!(set.find(&1.5), Ok(0));
    /// assert_eq!(set.find(&3.0), Err(1));
    /// assert_eq!(set.find(&9.0), Err(2));
    /// ```
    pub fn find(&self, value: &T) -> Result<usize, usize> {
        let index = self
            .spans
            .partition_point(|s| s.relative_position(value) == RelativePosition::After);
        match self.spans.get(index) {
            Some(s) if s.contains_value(value) => Ok(index),
            _ => Err(index),
        }
    }

    /// Locates `value` relative to the bounding span.
    #[inline]
    pub fn relative_position(&self, value: &T) -> RelativePosition {
        self.extent.relative_position(value)
    }

    /// Returns `true` if some span contains `value`.
    #[inline]
    pub fn contains_value(&self, value: &T) -> bool {
        self.find(value).is_ok()
    }

    /// Returns `true` if a single span of the set contains `span`.
    pub fn contains_span(&self, span: &Span<T>) -> bool {
        if !self.extent.contains(span) {
            return false;
        }
        let index = self.spans.partition_point(|s| s.before(span));
        self.spans.get(index).is_some_and(|s| s.contains(span))
    }

    /// Returns `true` if every span of `other` lies within `self`.
    pub fn contains(&self, other: &Self) -> bool {
        if !self.extent.contains(&other.extent) {
            return false;
        }
        let (mut i, mut j) = (0, 0);
        while i < self.spans.len() && j < other.spans.len() {
            let (a, b) = (&self.spans[i], &other.spans[j]);
            if a.before(b) {
                i += 1;
            } else if a.contains(b) {
                j += 1;
            } else {
                return false;
            }
        }
        j == other.spans.len()
    }

    /// Returns `true` if every span of `self` lies within `other`.
    #[inline]
    pub fn contained(&self, other: &Self) -> bool {
        other.contains(self)
    }

    /// Advances whichever cursor's span ends first.
    #[inline]
    fn step(a: &Span<T>, b: &Span<T>, i: &mut usize, j: &mut usize) {
        match a.upper_bound().cmp(&b.upper_bound()) {
            Ordering::Less => *i += 1,
            Ordering::Greater => *j += 1,
            Ordering::Equal => {
                *i += 1;
                *j += 1;
            }
        }
    }

    /// Returns `true` if the sets share at least one value.
    pub fn overlaps(&self, other: &Self) -> bool {
        if !self.extent.overlaps(&other.extent) {
            return false;
        }
        let (mut i, mut j) = (0, 0);
        while i < self.spans.len() && j < other.spans.len() {
            let (a, b) = (&self.spans[i], &other.spans[j]);
            if a.overlaps(b) {
                return true;
            }
            Self::step(a, b, &mut i, &mut j);
        }
        false
    }

    /// Returns `true` if the last span of one set touches the first span of
    /// the other without sharing a value. Interior gaps are not considered.
    #[inline]
    pub fn adjacent(&self, other: &Self) -> bool {
        self.extent.adjacent(&other.extent)
    }

    /// Returns `true` if the sets hold the same values.
    #[inline]
    pub fn same(&self, other: &Self) -> bool {
        self.spans == other.spans
    }

    /// Returns `true` if `self` ends before `other` begins.
    #[inline]
    pub fn before(&self, other: &Self) -> bool {
        self.extent.before(&other.extent)
    }

    /// Returns `true` if `self` begins after `other` ends.
    #[inline]
    pub fn after(&self, other: &Self) -> bool {
        self.extent.after(&other.extent)
    }

    /// Returns `true` if `self` does not extend past the end of `other`.
    #[inline]
    pub fn overbefore(&self, other: &Self) -> bool {
        self.extent.overbefore(&other.extent)
    }

    /// Returns `true` if `self` does not extend before the start of `other`.
    #[inline]
    pub fn overafter(&self, other: &Self) -> bool {
        self.extent.overafter(&other.extent)
    }

    /// Returns the set of values in either set.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use tempora_span::span::Span;
    /// # use tempora_span::span_set::SpanSet;
    ///
    /// let a = SpanSet::from_span(Span::make(1.0, 3.0, true, false).unwrap());
    /// let b = SpanSet::from_span(Span::make(3.0, 4.0, true, true).unwrap());
    /// assert_eq!(a.union(&b).to_string(), "{[1, 4]}");
    /// ```
    pub fn union(&self, other: &Self) -> Self {
        let mut merged = Vec::with_capacity(self.spans.len() + other.spans.len());
        let (mut i, mut j) = (0, 0);
        while i < self.spans.len() && j < other.spans.len() {
            if self.spans[i].cmp(&other.spans[j]) != Ordering::Greater {
                merged.push(self.spans[i].clone());
                i += 1;
            } else {
                merged.push(other.spans[j].clone());
                j += 1;
            }
        }
        merged.extend_from_slice(&self.spans[i..]);
        merged.extend_from_slice(&other.spans[j..]);
        Self::from_normalized(merge_sorted(merged))
    }

    /// Returns the values in both sets, `None` if there are none.
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        if !self.extent.overlaps(&other.extent) {
            return None;
        }
        let mut out = Vec::new();
        let (mut i, mut j) = (0, 0);
        while i < self.spans.len() && j < other.spans.len() {
            let (a, b) = (&self.spans[i], &other.spans[j]);
            if let Some(common) = a.intersection(b) {
                out.push(common);
            }
            Self::step(a, b, &mut i, &mut j);
        }
        Self::from_pieces(out)
    }

    /// Returns the values of `self` not in `other`, `None` if there are none.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use tempora_span::span::Span;
    /// # use tempora_span::span_set::SpanSet;
    ///
    /// let a = SpanSet::from_span(Span::make(0.0, 10.0, true, true).unwrap());
    /// let b = SpanSet::new([
    ///     Span::make(2.0, 3.0, true, true).unwrap(),
    ///     Span::make(5.0, 6.0, true, true).unwrap(),
    /// ])
    /// .unwrap();
    /// assert_eq!(a.minus(&b).unwrap().to_string(), "{[0, 2), (3, 5), (6, 10]}");
    /// assert!(b.minus(&a).is_none());
    /// ```
    pub fn minus(&self, other: &Self) -> Option<Self> {
        if !self.extent.overlaps(&other.extent) {
            return Some(self.clone());
        }
        let mut out = Vec::with_capacity(self.spans.len());
        let mut k = 0;
        for span in &self.spans {
            let mut current = span.clone();
            loop {
                while k < other.spans.len() && other.spans[k].before(&current) {
                    k += 1;
                }
                if k == other.spans.len() || current.before(&other.spans[k]) {
                    out.push(current);
                    break;
                }
                let (before, after) = current.minus_split(&other.spans[k]);
                out.extend(before);
                match after {
                    Some(rest) => current = rest,
                    None => break,
                }
            }
        }
        Self::from_pieces(out)
    }

    /// Returns the smallest span enclosing both sets, ignoring gaps.
    #[inline]
    pub fn super_union(&self, other: &Self) -> Span<T> {
        self.extent.expand(&other.extent)
    }

    /// Scalar distance between the bounding spans of the sets.
    ///
    /// # Errors
    ///
    /// `UnsupportedOperation` for bases without a metric.
    #[inline]
    pub fn distance_scalar(&self, other: &Self) -> Result<f64, Error> {
        self.extent.distance_scalar(&other.extent)
    }

    /// Hashes the set from its spans.
    pub fn hash32(&self) -> u32 {
        self.spans
            .iter()
            .fold(1u32, |acc, s| acc.wrapping_mul(31).wrapping_add(s.hash32()))
    }

    /// Hashes the set with `seed` mixed in.
    pub fn hash_extended(&self, seed: u64) -> u64 {
        self.spans.iter().fold(seed ^ 1, |acc, s| {
            acc.wrapping_mul(31).wrapping_add(s.hash_extended(seed))
        })
    }

    /// Formats the set as `{[a, b], [c, d)}` using `options`.
    pub fn to_text(&self, options: &TextOptions) -> String {
        let parts: Vec<String> = self.spans.iter().map(|s| s.to_text(options)).collect();
        format!("{{{}}}", parts.join(", "))
    }
}

impl<T> SpanSet<T>
where
    T: Metric,
{
    /// Distance between the bounding spans of the sets. A set lying inside a
    /// gap of the other is at distance zero.
    #[inline]
    pub fn distance(&self, other: &Self) -> T::Distance {
        self.extent.distance(&other.extent)
    }

    /// Sum of the widths of all spans.
    pub fn duration(&self) -> T::Distance {
        self.spans
            .iter()
            .fold(T::zero_distance(), |acc, s| acc + s.width())
    }

    /// Shifts every span by `by`, `None` on overflow.
    pub fn shift(&self, by: T::Distance) -> Option<Self> {
        let spans = self
            .spans
            .iter()
            .map(|s| s.shift_scale(Some(by), None))
            .collect::<Option<Vec<_>>>()?;
        Some(Self::from_normalized(spans))
    }
}

impl<T> PartialEq for SpanSet<T>
where
    T: BaseValue,
{
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.same(other)
    }
}

impl<T> Eq for SpanSet<T> where T: BaseValue {}

impl<T> PartialOrd for SpanSet<T>
where
    T: BaseValue,
{
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for SpanSet<T>
where
    T: BaseValue,
{
    /// Lexicographic over the spans.
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.spans.cmp(&other.spans)
    }
}

impl<T> Hash for SpanSet<T>
where
    T: BaseValue,
{
    #[inline]
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash_extended(0));
    }
}

impl<T> Display for SpanSet<T>
where
    T: BaseValue,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_text(&TextOptions::default()))
    }
}

impl<T> From<Span<T>> for SpanSet<T>
where
    T: BaseValue,
{
    #[inline]
    fn from(span: Span<T>) -> Self {
        Self::from_span(span)
    }
}

impl<'a, T> IntoIterator for &'a SpanSet<T>
where
    T: BaseValue,
{
    type Item = &'a Span<T>;
    type IntoIter = std::slice::Iter<'a, Span<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn f(lower: f64, upper: f64) -> Span<f64> {
        Span::make(lower, upper, true, true).unwrap()
    }

    fn fo(lower: f64, upper: f64, li: bool, ui: bool) -> Span<f64> {
        Span::make(lower, upper, li, ui).unwrap()
    }

    fn set(spans: &[Span<f64>]) -> SpanSet<f64> {
        SpanSet::new(spans.iter().cloned()).unwrap()
    }

    #[test]
    fn test_normalize_merges_overlaps() {
        let mut spans = [f(1.0, 3.0), f(2.0, 5.0), f(8.0, 9.0)];
        assert_eq!(normalize(&mut spans), vec![f(1.0, 5.0), f(8.0, 9.0)]);
    }

    #[test]
    fn test_normalize_collapses_touching_run() {
        let mut spans = [
            fo(3.0, 4.0, true, false),
            fo(1.0, 2.0, true, false),
            fo(2.0, 3.0, true, false),
            f(4.0, 4.0),
        ];
        assert_eq!(normalize(&mut spans), vec![f(1.0, 4.0)]);
    }

    #[test]
    fn test_normalize_keeps_open_gap() {
        // [1,2) and (2,3]: the point 2 is missing
        let mut spans = [fo(2.0, 3.0, false, true), fo(1.0, 2.0, true, false)];
        assert_eq!(normalize(&mut spans).len(), 2);
    }

    #[test]
    fn test_normalize_discrete_adjacency() {
        let mut spans = [
            Span::make(4, 6, true, true).unwrap(),
            Span::make(1, 3, true, true).unwrap(),
            Span::make(8, 9, true, true).unwrap(),
        ];
        let merged = normalize(&mut spans);
        assert_eq!(
            merged,
            vec![
                Span::make(1, 6, true, true).unwrap(),
                Span::make(8, 9, true, true).unwrap()
            ]
        );
    }

    #[test]
    fn test_new_rejects_empty() {
        assert_eq!(
            SpanSet::<f64>::new(Vec::new()).unwrap_err(),
            InvalidCollection::Empty
        );
    }

    #[test]
    fn test_from_sorted_validates() {
        assert!(SpanSet::from_sorted(vec![f(1.0, 2.0), f(3.0, 4.0)]).is_ok());
        assert_eq!(
            SpanSet::from_sorted(vec![f(3.0, 4.0), f(1.0, 2.0)]).unwrap_err(),
            InvalidCollection::NotDisjoint { index: 1 }
        );
        assert_eq!(
            SpanSet::from_sorted(vec![fo(1.0, 2.0, true, false), f(2.0, 4.0)]).unwrap_err(),
            InvalidCollection::NotDisjoint { index: 1 }
        );
    }

    #[test]
    fn test_bounding_span() {
        let s = set(&[fo(1.0, 2.0, false, true), fo(5.0, 6.0, true, false)]);
        assert_eq!(s.bounding_span(), &fo(1.0, 6.0, false, false));
        assert_eq!(s.start_span(), &fo(1.0, 2.0, false, true));
        assert_eq!(s.end_span(), &fo(5.0, 6.0, true, false));
        assert_eq!(s.span_n(2), None);
    }

    #[test]
    fn test_find_and_contains_value() {
        let s = set(&[fo(1.0, 2.0, true, false), f(5.0, 6.0)]);
        assert_eq!(s.find(&1.0), Ok(0));
        assert_eq!(s.find(&2.0), Err(1));
        assert_eq!(s.find(&6.0), Ok(1));
        assert_eq!(s.find(&7.0), Err(2));
        assert!(!s.contains_value(&3.0));
        assert_eq!(s.relative_position(&0.0), RelativePosition::Before);
        assert_eq!(s.relative_position(&3.0), RelativePosition::During);
    }

    #[test]
    fn test_contains() {
        let a = set(&[f(0.0, 4.0), f(6.0, 10.0)]);
        assert!(a.contains(&set(&[f(1.0, 2.0), f(3.0, 4.0), f(7.0, 8.0)])));
        assert!(!a.contains(&set(&[f(1.0, 2.0), f(4.0, 6.0)])));
        assert!(!a.contains(&set(&[f(5.0, 5.0)])));
        assert!(a.contains_span(&f(6.0, 10.0)));
        assert!(!a.contains_span(&f(3.0, 7.0)));
        assert!(set(&[f(7.0, 8.0)]).contained(&a));
    }

    #[test]
    fn test_overlaps() {
        let a = set(&[f(0.0, 1.0), f(4.0, 5.0), f(9.0, 10.0)]);
        assert!(a.overlaps(&set(&[f(2.0, 3.0), f(5.0, 6.0)])));
        assert!(!a.overlaps(&set(&[f(2.0, 3.0), f(6.0, 8.0)])));
        assert!(!a.overlaps(&set(&[fo(1.0, 4.0, false, false)])));
    }

    #[test]
    fn test_adjacent_only_at_extremes() {
        let a = set(&[f(1.0, 2.0), f(5.0, 6.0)]);
        // Filling an interior gap does not make the sets adjacent
        let gap = set(&[fo(2.0, 5.0, false, false)]);
        assert!(!a.adjacent(&gap));
        assert!(!gap.adjacent(&a));
        let after = set(&[fo(6.0, 8.0, false, true)]);
        assert!(a.adjacent(&after));
        assert!(after.adjacent(&a));
        let before = set(&[fo(-1.0, 0.0, true, true), fo(0.5, 1.0, true, false)]);
        assert!(a.adjacent(&before));
        let overlapping = set(&[fo(6.0, 8.0, true, true)]);
        assert!(!a.adjacent(&overlapping));
        let distant = set(&[f(8.0, 9.0)]);
        assert!(!a.adjacent(&distant));
    }

    #[test]
    fn test_union() {
        let a = set(&[f(1.0, 2.0), f(5.0, 6.0)]);
        let b = set(&[f(2.0, 3.0), f(8.0, 9.0)]);
        assert_eq!(a.union(&b), set(&[f(1.0, 3.0), f(5.0, 6.0), f(8.0, 9.0)]));
    }

    #[test]
    fn test_intersection() {
        let a = set(&[f(0.0, 4.0), f(6.0, 10.0)]);
        let b = set(&[f(3.0, 7.0), f(9.0, 12.0)]);
        assert_eq!(
            a.intersection(&b),
            Some(set(&[f(3.0, 4.0), f(6.0, 7.0), f(9.0, 10.0)]))
        );
        assert_eq!(a.intersection(&set(&[fo(4.0, 6.0, false, false)])), None);
    }

    #[test]
    fn test_minus() {
        let a = set(&[f(0.0, 4.0), f(6.0, 10.0)]);
        let b = set(&[f(3.0, 7.0)]);
        assert_eq!(
            a.minus(&b),
            Some(set(&[fo(0.0, 3.0, true, false), fo(7.0, 10.0, false, true)]))
        );
        // One subtrahend span spanning several minuend spans
        let c = set(&[f(-1.0, 11.0)]);
        assert_eq!(a.minus(&c), None);
        // Disjoint
        assert_eq!(a.minus(&set(&[f(20.0, 21.0)])), Some(a.clone()));
        // Many holes in one span
        let d = set(&[f(1.0, 1.0), f(2.0, 2.0), f(8.0, 9.0)]);
        assert_eq!(
            a.minus(&d),
            Some(set(&[
                fo(0.0, 1.0, true, false),
                fo(1.0, 2.0, false, false),
                fo(2.0, 4.0, false, true),
                fo(6.0, 8.0, true, false),
                fo(9.0, 10.0, false, true),
            ]))
        );
    }

    #[test]
    fn test_distance() {
        let a = set(&[f(1.0, 2.0), f(10.0, 11.0)]);
        let b = set(&[f(13.0, 14.0)]);
        assert_eq!(a.distance(&b), 2.0);
        assert_eq!(b.distance(&a), 2.0);
        assert_eq!(a.distance_scalar(&b).unwrap(), 2.0);
        // Inside an interior gap: the bounding spans overlap
        let c = set(&[f(3.0, 4.0)]);
        assert_eq!(a.distance(&c), 0.0);
        assert_eq!(c.distance(&a), 0.0);
        assert_eq!(a.distance_scalar(&c).unwrap(), 0.0);
        assert_eq!(a.distance(&set(&[f(2.0, 3.0)])), 0.0);
    }

    #[test]
    fn test_super_union_and_duration() {
        let a = set(&[f(1.0, 2.0)]);
        let b = set(&[f(5.0, 6.0)]);
        assert_eq!(a.super_union(&b), f(1.0, 6.0));
        assert_eq!(set(&[f(1.0, 2.0), f(5.0, 8.0)]).duration(), 4.0);
        assert_eq!(a.shift(1.0), Some(set(&[f(2.0, 3.0)])));
    }

    #[test]
    fn test_positional() {
        let a = set(&[f(1.0, 2.0), f(3.0, 4.0)]);
        let b = set(&[f(5.0, 6.0)]);
        assert!(a.before(&b));
        assert!(b.after(&a));
        assert!(a.overbefore(&b));
        assert!(b.overafter(&a));
    }

    #[test]
    fn test_display_and_hash() {
        let a = set(&[f(1.0, 2.0), fo(3.0, 4.0, false, false)]);
        assert_eq!(a.to_string(), "{[1, 2], (3, 4)}");
        assert_eq!(a.hash32(), a.clone().hash32());
    }
}
