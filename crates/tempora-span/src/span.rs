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

//! # Spans
//!
//! A [`Span`] is a single interval over an ordered base type with an
//! independent inclusive/exclusive flag on each bound. Spans are immutable
//! values: every operator returns a new span (or a small collection of them)
//! and never fails on well-formed input, using `Option` or an empty result
//! for "nothing there".
//!
//! ## Canonical discrete spans
//!
//! Over discrete bases (`i32`, `i64`) every span is stored as `[a, b)`: an
//! exclusive lower bound is replaced by its successor and an inclusive upper
//! bound by the exclusive successor. `[1, 5]` and `[1, 6)` are therefore the
//! same span, and touching discrete spans such as `[1, 3]` and `[4, 6]` are
//! recognized as adjacent through plain bound equality.
//!
//! ## Bound order
//!
//! Bounds are compared as points on the line with a tie-break: at equal
//! values an inclusive lower bound sorts before an exclusive one, and an
//! inclusive upper bound sorts after an exclusive one. This gives spans the
//! B-tree order used for indexing and drives every sweep over sorted spans.

use smallvec::SmallVec;
use std::cmp::Ordering;
use std::convert::Infallible;
use std::fmt::Display;
use std::hash::Hash;
use tempora_core::base::{BaseKind, BaseValue, Metric};
use tempora_core::error::{Error, InvalidSpan};
use tempora_core::text::TextOptions;

/// Flag bit marking an inclusive lower bound.
pub const LOWER_INC: u8 = 0x01;
/// Flag bit marking an inclusive upper bound.
pub const UPPER_INC: u8 = 0x02;

/// One end of a span, used for bound-aware ordering.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Bound<'a, T> {
    value: &'a T,
    inclusive: bool,
    lower: bool,
}

impl<T: BaseValue> Bound<'_, T> {
    /// Orders two bounds; at equal values exclusive lower bounds come after
    /// and exclusive upper bounds come before their inclusive counterparts.
    pub(crate) fn cmp(&self, other: &Self) -> Ordering {
        let result = self.value.compare(other.value);
        if result != Ordering::Equal {
            return result;
        }
        match (self.inclusive, other.inclusive) {
            (false, false) if self.lower == other.lower => Ordering::Equal,
            (false, false) | (false, true) => {
                if self.lower {
                    Ordering::Greater
                } else {
                    Ordering::Less
                }
            }
            (true, false) => {
                if other.lower {
                    Ordering::Less
                } else {
                    Ordering::Greater
                }
            }
            (true, true) => Ordering::Equal,
        }
    }
}

/// Where a value lies relative to a span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelativePosition {
    /// The value precedes every point of the span.
    Before,
    /// The value is contained in the span.
    During,
    /// The value follows every point of the span.
    After,
}

/// An interval over an ordered base type.
///
/// # Invariants
///
/// `lower <= upper`, and if `lower == upper` both bounds are inclusive.
/// Spans over discrete bases are kept in canonical `[a, b)` form.
#[derive(Clone, Debug)]
pub struct Span<T>
where
    T: BaseValue,
{
    lower: T,
    upper: T,
    lower_inc: bool,
    upper_inc: bool,
}

impl<T> Span<T>
where
    T: BaseValue,
{
    /// Creates a span, validating and canonicalizing its bounds.
    ///
    /// # Errors
    ///
    /// `InvalidSpan::ReversedBounds` if `lower > upper`, and
    /// `InvalidSpan::EmptyOpenPoint` if the span contains no value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use tempora_span::span::Span;
    /// # use tempora_core::error::InvalidSpan;
    ///
    /// let s = Span::make(1.0, 5.0, true, false).unwrap();
    /// assert_eq!(s.to_string(), "[1, 5)");
    ///
    /// assert_eq!(Span::make(5, 1, true, true).unwrap_err(), InvalidSpan::ReversedBounds);
    /// assert_eq!(Span::make(3.0, 3.0, true, false).unwrap_err(), InvalidSpan::EmptyOpenPoint);
    ///
    /// // Discrete spans are canonical.
    /// assert_eq!(Span::make(1, 5, true, true).unwrap(), Span::make(1, 6, true, false).unwrap());
    /// ```
    pub fn make(lower: T, upper: T, lower_inc: bool, upper_inc: bool) -> Result<Self, InvalidSpan> {
        match lower.compare(&upper) {
            Ordering::Greater => return Err(InvalidSpan::ReversedBounds),
            Ordering::Equal if !(lower_inc && upper_inc) => {
                return Err(InvalidSpan::EmptyOpenPoint);
            }
            _ => {}
        }
        if !T::DISCRETE {
            return Ok(Self::new_unchecked(lower, upper, lower_inc, upper_inc));
        }
        let (lower, lower_inc) = if lower_inc {
            (lower, true)
        } else {
            match lower.successor() {
                Some(next) => (next, true),
                None => return Err(InvalidSpan::EmptyOpenPoint),
            }
        };
        let (upper, upper_inc) = match (upper_inc, upper.successor()) {
            (true, Some(next)) => (next, false),
            (inc, _) => (upper, inc),
        };
        match lower.compare(&upper) {
            Ordering::Less => Ok(Self::new_unchecked(lower, upper, lower_inc, upper_inc)),
            Ordering::Equal if upper_inc => {
                Ok(Self::new_unchecked(lower, upper, lower_inc, upper_inc))
            }
            _ => Err(InvalidSpan::EmptyOpenPoint),
        }
    }

    /// Creates a span without validation.
    ///
    /// The caller must ensure the invariants hold and, for discrete bases,
    /// that the span is canonical. Checked by a `debug_assert!`.
    #[inline]
    pub(crate) fn new_unchecked(lower: T, upper: T, lower_inc: bool, upper_inc: bool) -> Self {
        debug_assert!(
            match lower.compare(&upper) {
                Ordering::Less => true,
                Ordering::Equal => lower_inc && upper_inc,
                Ordering::Greater => false,
            },
            "Invalid span: bounds are reversed or the span is empty"
        );
        Self {
            lower,
            upper,
            lower_inc,
            upper_inc,
        }
    }

    /// Creates the span holding the single value `value`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use tempora_span::span::Span;
    ///
    /// assert_eq!(Span::point(2.5).to_string(), "[2.5, 2.5]");
    /// assert_eq!(Span::point(7).to_string(), "[7, 8)");
    /// ```
    #[inline]
    pub fn point(value: T) -> Self {
        if T::DISCRETE
            && let Some(next) = value.successor()
        {
            return Self::new_unchecked(value, next, true, false);
        }
        Self::new_unchecked(value.clone(), value, true, true)
    }

    /// The closed span `[lower, upper]`, canonicalized for discrete bases.
    /// `lower` must not exceed `upper`.
    #[inline]
    pub(crate) fn closed(lower: T, upper: T) -> Self {
        if T::DISCRETE
            && let Some(next) = upper.successor()
        {
            return Self::new_unchecked(lower, next, true, false);
        }
        Self::new_unchecked(lower, upper, true, true)
    }

    /// Returns the lower bound value.
    #[inline]
    pub fn lower(&self) -> &T {
        &self.lower
    }

    /// Returns the upper bound value.
    #[inline]
    pub fn upper(&self) -> &T {
        &self.upper
    }

    /// Returns `true` if the lower bound is inclusive.
    #[inline]
    pub const fn lower_inc(&self) -> bool {
        self.lower_inc
    }

    /// Returns `true` if the upper bound is inclusive.
    #[inline]
    pub const fn upper_inc(&self) -> bool {
        self.upper_inc
    }

    /// Returns the base-type tag.
    #[inline]
    pub const fn kind(&self) -> BaseKind {
        T::KIND
    }

    /// Returns the bound inclusivity as `LOWER_INC | UPPER_INC` bits.
    #[inline]
    pub const fn bound_flags(&self) -> u8 {
        (if self.lower_inc { LOWER_INC } else { 0 }) | (if self.upper_inc { UPPER_INC } else { 0 })
    }

    /// Returns `true` if the span holds exactly one value.
    #[inline]
    pub fn is_point(&self) -> bool {
        if T::DISCRETE && !self.upper_inc {
            return self.lower.successor().is_some_and(|s| s.equal(&self.upper));
        }
        self.lower.equal(&self.upper)
    }

    /// Consumes the span and returns `(lower, upper, lower_inc, upper_inc)`.
    #[inline]
    pub fn into_parts(self) -> (T, T, bool, bool) {
        (self.lower, self.upper, self.lower_inc, self.upper_inc)
    }

    #[inline]
    pub(crate) fn lower_bound(&self) -> Bound<'_, T> {
        Bound {
            value: &self.lower,
            inclusive: self.lower_inc,
            lower: true,
        }
    }

    #[inline]
    pub(crate) fn upper_bound(&self) -> Bound<'_, T> {
        Bound {
            value: &self.upper,
            inclusive: self.upper_inc,
            lower: false,
        }
    }

    /// Total order: lower bound first, then upper bound.
    #[inline]
    pub fn cmp(&self, other: &Self) -> Ordering {
        self.lower_bound()
            .cmp(&other.lower_bound())
            .then_with(|| self.upper_bound().cmp(&other.upper_bound()))
    }

    /// Returns `true` if the spans denote the same set of values.
    #[inline]
    pub fn same(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }

    /// Returns `true` if `value` lies within the span.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use tempora_span::span::Span;
    ///
    /// let s = Span::make(1.0, 5.0, true, false).unwrap();
    /// assert!(s.contains_value(&1.0));
    /// assert!(!s.contains_value(&5.0));
    /// ```
    #[inline]
    pub fn contains_value(&self, value: &T) -> bool {
        self.relative_position(value) == RelativePosition::During
    }

    /// Locates `value` relative to the span.
    pub fn relative_position(&self, value: &T) -> RelativePosition {
        match self.lower.compare(value) {
            Ordering::Greater => return RelativePosition::Before,
            Ordering::Equal if !self.lower_inc => return RelativePosition::Before,
            _ => {}
        }
        match self.upper.compare(value) {
            Ordering::Less => RelativePosition::After,
            Ordering::Equal if !self.upper_inc => RelativePosition::After,
            _ => RelativePosition::During,
        }
    }

    /// Returns `true` if every value of `other` lies within `self`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use tempora_span::span::Span;
    ///
    /// let a = Span::make(0.0, 10.0, true, true).unwrap();
    /// let b = Span::make(0.0, 10.0, false, false).unwrap();
    /// assert!(a.contains(&b));
    /// assert!(!b.contains(&a));
    /// ```
    #[inline]
    pub fn contains(&self, other: &Self) -> bool {
        self.lower_bound().cmp(&other.lower_bound()) != Ordering::Greater
            && self.upper_bound().cmp(&other.upper_bound()) != Ordering::Less
    }

    /// Returns `true` if every value of `self` lies within `other`.
    #[inline]
    pub fn contained(&self, other: &Self) -> bool {
        other.contains(self)
    }

    /// Returns `true` if the spans share at least one value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use tempora_span::span::Span;
    ///
    /// let a = Span::make(1.0, 5.0, true, true).unwrap();
    /// let b = Span::make(5.0, 10.0, true, true).unwrap();
    /// let c = Span::make(5.0, 10.0, false, true).unwrap();
    /// assert!(a.overlaps(&b));
    /// assert!(!a.overlaps(&c));
    /// ```
    #[inline]
    pub fn overlaps(&self, other: &Self) -> bool {
        touches_or_crosses(self, other) && touches_or_crosses(other, self)
    }

    /// Returns `true` if the spans share a bound without sharing a value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use tempora_span::span::Span;
    ///
    /// let a = Span::make(1.0, 5.0, true, false).unwrap();
    /// let b = Span::make(5.0, 10.0, true, true).unwrap();
    /// assert!(a.adjacent(&b));
    /// assert!(b.adjacent(&a));
    /// ```
    #[inline]
    pub fn adjacent(&self, other: &Self) -> bool {
        (self.upper.equal(&other.lower) && self.upper_inc != other.lower_inc)
            || (other.upper.equal(&self.lower) && other.upper_inc != self.lower_inc)
    }

    /// Returns `true` if `self` ends strictly before `other` begins.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use tempora_span::span::Span;
    ///
    /// let a = Span::make(1.0, 5.0, true, false).unwrap();
    /// let b = Span::make(5.0, 10.0, true, true).unwrap();
    /// assert!(a.before(&b));
    /// let a = Span::make(1.0, 5.0, true, true).unwrap();
    /// assert!(!a.before(&b));
    /// ```
    #[inline]
    pub fn before(&self, other: &Self) -> bool {
        match self.upper.compare(&other.lower) {
            Ordering::Less => true,
            Ordering::Equal => !self.upper_inc || !other.lower_inc,
            Ordering::Greater => false,
        }
    }

    /// Alias of [`Span::before`].
    #[inline]
    pub fn left(&self, other: &Self) -> bool {
        self.before(other)
    }

    /// Returns `true` if `self` begins strictly after `other` ends.
    #[inline]
    pub fn after(&self, other: &Self) -> bool {
        other.before(self)
    }

    /// Alias of [`Span::after`].
    #[inline]
    pub fn right(&self, other: &Self) -> bool {
        self.after(other)
    }

    /// Returns `true` if `self` does not extend past the end of `other`.
    #[inline]
    pub fn overbefore(&self, other: &Self) -> bool {
        match self.upper.compare(&other.upper) {
            Ordering::Less => true,
            Ordering::Equal => !self.upper_inc || other.upper_inc,
            Ordering::Greater => false,
        }
    }

    /// Alias of [`Span::overbefore`].
    #[inline]
    pub fn overleft(&self, other: &Self) -> bool {
        self.overbefore(other)
    }

    /// Returns `true` if `self` does not extend before the start of `other`.
    #[inline]
    pub fn overafter(&self, other: &Self) -> bool {
        match other.lower.compare(&self.lower) {
            Ordering::Less => true,
            Ordering::Equal => !self.lower_inc || other.lower_inc,
            Ordering::Greater => false,
        }
    }

    /// Alias of [`Span::overafter`].
    #[inline]
    pub fn overright(&self, other: &Self) -> bool {
        self.overafter(other)
    }

    /// Returns the smallest span containing both spans.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use tempora_span::span::Span;
    ///
    /// let a = Span::make(1.0, 2.0, true, true).unwrap();
    /// let b = Span::make(4.0, 5.0, false, false).unwrap();
    /// assert_eq!(a.expand(&b).to_string(), "[1, 5)");
    /// ```
    pub fn expand(&self, other: &Self) -> Self {
        let (lower, lower_inc) = if self.lower_bound().cmp(&other.lower_bound()) != Ordering::Greater {
            (&self.lower, self.lower_inc)
        } else {
            (&other.lower, other.lower_inc)
        };
        let (upper, upper_inc) = if self.upper_bound().cmp(&other.upper_bound()) != Ordering::Less {
            (&self.upper, self.upper_inc)
        } else {
            (&other.upper, other.upper_inc)
        };
        Self::new_unchecked(lower.clone(), upper.clone(), lower_inc, upper_inc)
    }

    /// Returns the union when the spans overlap or touch.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use tempora_span::span::Span;
    ///
    /// let a = Span::make(1, 3, true, true).unwrap();
    /// let b = Span::make(4, 6, true, true).unwrap();
    /// assert_eq!(a.union(&b), Some(Span::make(1, 6, true, true).unwrap()));
    ///
    /// let c = Span::make(8, 9, true, true).unwrap();
    /// assert_eq!(a.union(&c), None);
    /// ```
    #[inline]
    pub fn union(&self, other: &Self) -> Option<Self> {
        (self.overlaps(other) || self.adjacent(other)).then(|| self.expand(other))
    }

    /// Returns the common part of the spans.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use tempora_span::span::Span;
    ///
    /// let a = Span::make(0.0, 10.0, true, true).unwrap();
    /// let b = Span::make(5.0, 15.0, false, true).unwrap();
    /// assert_eq!(a.intersection(&b).unwrap().to_string(), "(5, 10]");
    /// ```
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        if !self.overlaps(other) {
            return None;
        }
        let (lower, lower_inc) = if self.lower_bound().cmp(&other.lower_bound()) != Ordering::Less {
            (&self.lower, self.lower_inc)
        } else {
            (&other.lower, other.lower_inc)
        };
        let (upper, upper_inc) = if self.upper_bound().cmp(&other.upper_bound()) != Ordering::Greater {
            (&self.upper, self.upper_inc)
        } else {
            (&other.upper, other.upper_inc)
        };
        Some(Self::new_unchecked(
            lower.clone(),
            upper.clone(),
            lower_inc,
            upper_inc,
        ))
    }

    /// Splits the part of `self` not covered by an overlapping `other` into
    /// the piece before `other` and the piece after it.
    pub(crate) fn minus_split(&self, other: &Self) -> (Option<Self>, Option<Self>) {
        debug_assert!(self.overlaps(other));
        let before = (self.lower_bound().cmp(&other.lower_bound()) == Ordering::Less).then(|| {
            Self::new_unchecked(
                self.lower.clone(),
                other.lower.clone(),
                self.lower_inc,
                !other.lower_inc,
            )
        });
        let after = (self.upper_bound().cmp(&other.upper_bound()) == Ordering::Greater).then(|| {
            Self::new_unchecked(
                other.upper.clone(),
                self.upper.clone(),
                !other.upper_inc,
                self.upper_inc,
            )
        });
        (before, after)
    }

    /// Returns the parts of `self` not covered by `other`: none, one, or two
    /// disjoint pieces in increasing order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use tempora_span::span::Span;
    ///
    /// let a = Span::make(0.0, 10.0, true, true).unwrap();
    /// let hole = Span::make(4.0, 6.0, true, true).unwrap();
    ///
    /// let pieces = a.minus(&hole);
    /// assert_eq!(pieces.len(), 2);
    /// assert_eq!(pieces[0].to_string(), "[0, 4)");
    /// assert_eq!(pieces[1].to_string(), "(6, 10]");
    /// ```
    pub fn minus(&self, other: &Self) -> SmallVec<[Self; 2]> {
        let mut result = SmallVec::new();
        if !self.overlaps(other) {
            result.push(self.clone());
            return result;
        }
        let (before, after) = self.minus_split(other);
        result.extend(before);
        result.extend(after);
        result
    }

    /// The last value of the span that the distance to a later span is measured from.
    #[inline]
    fn distance_upper(&self) -> T {
        if T::DISCRETE && !self.upper_inc {
            self.upper
                .predecessor()
                .unwrap_or_else(|| self.upper.clone())
        } else {
            self.upper.clone()
        }
    }

    /// Measures the gap between the spans with `dist`, or `None` if they overlap.
    fn gap_with<D, E>(
        &self,
        other: &Self,
        dist: &mut impl FnMut(&T, &T) -> Result<D, E>,
    ) -> Result<Option<D>, E> {
        if self.overlaps(other) {
            return Ok(None);
        }
        if self.before(other) {
            dist(&self.distance_upper(), &other.lower).map(Some)
        } else {
            dist(&other.distance_upper(), &self.lower).map(Some)
        }
    }

    /// Scalar distance between the spans, in the units of the base
    /// (seconds for timestamps).
    ///
    /// # Errors
    ///
    /// `UnsupportedOperation` for bases without a metric, such as text.
    pub fn distance_scalar(&self, other: &Self) -> Result<f64, Error> {
        let zero = self.lower.scalar_distance(&self.lower)?;
        Ok(self
            .gap_with(other, &mut |a: &T, b: &T| a.scalar_distance(b))?
            .unwrap_or(zero))
    }
}

impl<T> Span<T>
where
    T: Metric,
{
    /// Distance between the spans: zero if they overlap, otherwise the gap
    /// between the nearest values.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use tempora_span::span::Span;
    ///
    /// let a = Span::make(1, 3, true, true).unwrap();
    /// let b = Span::make(6, 9, true, true).unwrap();
    /// assert_eq!(a.distance(&b), 3_i64);
    /// assert_eq!(b.distance(&a), 3_i64);
    /// ```
    pub fn distance(&self, other: &Self) -> T::Distance {
        let gap = self.gap_with(other, &mut |a: &T, b: &T| {
            Ok::<_, Infallible>(Metric::distance(a, b))
        });
        match gap {
            Ok(d) => d.unwrap_or_else(T::zero_distance),
            Err(never) => match never {},
        }
    }

    /// Distance from the span to a value.
    #[inline]
    pub fn distance_value(&self, value: &T) -> T::Distance {
        self.distance(&Self::point(value.clone()))
    }

    /// Returns `upper - lower`.
    #[inline]
    pub fn width(&self) -> T::Distance {
        self.upper.delta(&self.lower)
    }

    /// Shifts the span by `shift` and/or rescales it to `width`.
    ///
    /// Returns `None` if the result overflows or `width` is not positive.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use tempora_span::span::Span;
    ///
    /// let s = Span::make(1.0, 3.0, true, false).unwrap();
    /// assert_eq!(s.shift_scale(Some(10.0), None).unwrap().to_string(), "[11, 13)");
    /// assert_eq!(s.shift_scale(None, Some(5.0)).unwrap().to_string(), "[1, 6)");
    /// ```
    pub fn shift_scale(&self, shift: Option<T::Distance>, width: Option<T::Distance>) -> Option<Self> {
        let lower = match shift {
            Some(by) => self.lower.offset(by)?,
            None => self.lower.clone(),
        };
        let upper = match (width, shift) {
            (Some(w), _) => {
                if !(w > T::zero_distance()) {
                    return None;
                }
                lower.offset(w)?
            }
            (None, Some(by)) => self.upper.offset(by)?,
            (None, None) => self.upper.clone(),
        };
        Self::make(lower, upper, self.lower_inc, self.upper_inc).ok()
    }
}

/// `a` starts no later than `b` ends, sharing at least the touching point.
#[inline]
fn touches_or_crosses<T: BaseValue>(a: &Span<T>, b: &Span<T>) -> bool {
    match a.lower.compare(&b.upper) {
        Ordering::Less => true,
        Ordering::Equal => a.lower_inc && b.upper_inc,
        Ordering::Greater => false,
    }
}

impl<T> Span<T>
where
    T: BaseValue,
{
    /// Hashes the span; equal spans hash equally.
    pub fn hash32(&self) -> u32 {
        let mut result = u32::from(self.bound_flags()).wrapping_mul(0x9E37_79B9);
        result = result.rotate_left(1) ^ self.lower.hash32();
        result = result.rotate_left(1) ^ self.upper.hash32();
        result
    }

    /// Hashes the span with `seed` mixed in.
    pub fn hash_extended(&self, seed: u64) -> u64 {
        let mut result = (u64::from(self.bound_flags()) ^ seed).wrapping_mul(0x9E37_79B9_7F4A_7C15);
        result = result.rotate_left(1) ^ self.lower.hash_extended(seed);
        result = result.rotate_left(1) ^ self.upper.hash_extended(seed);
        result
    }

    /// Formats the span as `[lower, upper)` using `options`.
    pub fn to_text(&self, options: &TextOptions) -> String {
        format!(
            "{}{}, {}{}",
            if self.lower_inc { '[' } else { '(' },
            self.lower.format(options),
            self.upper.format(options),
            if self.upper_inc { ']' } else { ')' },
        )
    }
}

impl<T> PartialEq for Span<T>
where
    T: BaseValue,
{
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.same(other)
    }
}

impl<T> Eq for Span<T> where T: BaseValue {}

impl<T> PartialOrd for Span<T>
where
    T: BaseValue,
{
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(Span::cmp(self, other))
    }
}

impl<T> Ord for Span<T>
where
    T: BaseValue,
{
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        Span::cmp(self, other)
    }
}

impl<T> Hash for Span<T>
where
    T: BaseValue,
{
    #[inline]
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash_extended(0));
    }
}

impl<T> Display for Span<T>
where
    T: BaseValue,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_text(&TextOptions::default()))
    }
}

impl<T> From<T> for Span<T>
where
    T: BaseValue,
{
    #[inline]
    fn from(value: T) -> Self {
        Self::point(value)
    }
}

impl<T> TryFrom<std::ops::Range<T>> for Span<T>
where
    T: BaseValue,
{
    type Error = InvalidSpan;

    #[inline]
    fn try_from(range: std::ops::Range<T>) -> Result<Self, Self::Error> {
        Self::make(range.start, range.end, true, false)
    }
}

impl<T> TryFrom<std::ops::RangeInclusive<T>> for Span<T>
where
    T: BaseValue,
{
    type Error = InvalidSpan;

    #[inline]
    fn try_from(range: std::ops::RangeInclusive<T>) -> Result<Self, Self::Error> {
        let (start, end) = range.into_inner();
        Self::make(start, end, true, true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempora_core::time::Timestamp;

    fn f(lower: f64, upper: f64, li: bool, ui: bool) -> Span<f64> {
        Span::make(lower, upper, li, ui).unwrap()
    }

    fn i(lower: i32, upper: i32, li: bool, ui: bool) -> Span<i32> {
        Span::make(lower, upper, li, ui).unwrap()
    }

    #[test]
    fn test_make_rejects_invalid() {
        assert_eq!(Span::make(5.0, 1.0, true, true), Err(InvalidSpan::ReversedBounds));
        assert_eq!(Span::make(1.0, 1.0, true, false), Err(InvalidSpan::EmptyOpenPoint));
        assert_eq!(Span::make(1.0, 1.0, false, true), Err(InvalidSpan::EmptyOpenPoint));
        assert!(Span::make(1.0, 1.0, true, true).is_ok());
        // (1, 2) holds no integer
        assert_eq!(Span::make(1, 2, false, false), Err(InvalidSpan::EmptyOpenPoint));
    }

    #[test]
    fn test_discrete_canonical_form() {
        let s = i(1, 5, false, true);
        assert_eq!(*s.lower(), 2);
        assert_eq!(*s.upper(), 6);
        assert!(s.lower_inc());
        assert!(!s.upper_inc());
        assert_eq!(s.to_string(), "[2, 6)");

        // No successor at the maximum
        let s = i(1, i32::MAX, true, true);
        assert!(s.upper_inc());
        assert_eq!(*s.upper(), i32::MAX);
        assert_eq!(Span::make(i32::MAX, i32::MAX, false, true), Err(InvalidSpan::EmptyOpenPoint));
    }

    #[test]
    fn test_adjacent_touching_spans() {
        // [1,5) and [5,10]
        for (a, b) in [
            (f(1.0, 5.0, true, false), f(5.0, 10.0, true, true)),
            (f(1.0, 5.0, true, true), f(5.0, 10.0, false, true)),
        ] {
            assert!(a.adjacent(&b));
            assert!(b.adjacent(&a));
            assert!(!a.overlaps(&b));
            assert!(a.before(&b));
            assert!(b.after(&a));
        }
        let a = i(1, 5, true, false);
        let b = i(5, 10, true, true);
        assert!(a.adjacent(&b));
        assert!(!a.overlaps(&b));
        assert!(a.before(&b));
    }

    #[test]
    fn test_shared_point_overlaps() {
        // [1,5] and [5,10]
        let a = f(1.0, 5.0, true, true);
        let b = f(5.0, 10.0, true, true);
        assert!(!a.adjacent(&b));
        assert!(a.overlaps(&b));
        assert!(!a.before(&b));

        let a = i(1, 5, true, true);
        let b = i(5, 10, true, true);
        assert!(!a.adjacent(&b));
        assert!(a.overlaps(&b));
    }

    #[test]
    fn test_discrete_gap_of_one_is_adjacent() {
        let a = i(1, 3, true, true);
        let b = i(4, 6, true, true);
        assert!(a.adjacent(&b));
        assert_eq!(a.union(&b), Some(i(1, 6, true, true)));
    }

    #[test]
    fn test_open_bounds_are_not_adjacent() {
        // [1,5) and (5,10]: the point 5 is missing from both
        let a = f(1.0, 5.0, true, false);
        let b = f(5.0, 10.0, false, true);
        assert!(!a.adjacent(&b));
        assert!(!a.overlaps(&b));
        assert!(a.union(&b).is_none());
    }

    #[test]
    fn test_bound_ordering() {
        // Inclusive lower sorts first
        assert_eq!(f(1.0, 2.0, true, true).cmp(&f(1.0, 2.0, false, true)), Ordering::Less);
        // Inclusive upper sorts last
        assert_eq!(f(1.0, 2.0, true, true).cmp(&f(1.0, 2.0, true, false)), Ordering::Greater);
        assert_eq!(f(1.0, 3.0, true, true).cmp(&f(2.0, 2.0, true, true)), Ordering::Less);
        assert_eq!(f(1.0, 3.0, true, true).cmp(&f(1.0, 3.0, true, true)), Ordering::Equal);
    }

    #[test]
    fn test_contains() {
        let a = f(0.0, 10.0, true, false);
        assert!(a.contains(&f(0.0, 5.0, true, true)));
        assert!(a.contains(&f(2.0, 10.0, true, false)));
        assert!(!a.contains(&f(2.0, 10.0, true, true)));
        assert!(!a.contains(&f(-1.0, 5.0, true, true)));
        assert!(f(2.0, 3.0, true, true).contained(&a));
        assert!(a.contains_value(&0.0));
        assert!(!a.contains_value(&10.0));
        assert_eq!(a.relative_position(&-1.0), RelativePosition::Before);
        assert_eq!(a.relative_position(&10.0), RelativePosition::After);
    }

    #[test]
    fn test_positional() {
        let a = f(1.0, 5.0, true, true);
        let b = f(3.0, 5.0, true, false);
        assert!(!a.overbefore(&b));
        assert!(b.overbefore(&a));
        assert!(b.overafter(&a));
        assert!(!a.overafter(&b));
        assert!(a.overleft(&a));
        assert!(a.overright(&a));
        assert!(!a.left(&a));
        assert!(!a.right(&a));
    }

    #[test]
    fn test_intersection() {
        let a = f(0.0, 10.0, true, true);
        // Disjoint
        assert!(a.intersection(&f(11.0, 12.0, true, true)).is_none());
        // Touching at a shared point
        assert_eq!(a.intersection(&f(10.0, 12.0, true, true)), Some(f(10.0, 10.0, true, true)));
        // Inclusivity from the tighter bound
        assert_eq!(a.intersection(&f(0.0, 10.0, false, false)), Some(f(0.0, 10.0, false, false)));
    }

    #[test]
    fn test_minus() {
        let base = f(0.0, 10.0, true, true);

        // 1. Disjoint
        let d = base.minus(&f(12.0, 15.0, true, true));
        assert_eq!(d.as_slice(), &[base.clone()]);

        // 2. Full cover
        assert!(base.minus(&f(-5.0, 15.0, true, true)).is_empty());

        // 3. Clip right keeps the boundary point open
        let d = base.minus(&f(8.0, 15.0, true, true));
        assert_eq!(d.as_slice(), &[f(0.0, 8.0, true, false)]);

        // 4. Clip left
        let d = base.minus(&f(-5.0, 2.0, true, false));
        assert_eq!(d.as_slice(), &[f(2.0, 10.0, true, true)]);

        // 5. Split
        let d = base.minus(&f(4.0, 6.0, false, false));
        assert_eq!(d.as_slice(), &[f(0.0, 4.0, true, true), f(6.0, 10.0, true, true)]);

        // 6. Removing an open interval leaves single points
        let d = f(0.0, 1.0, true, true).minus(&f(0.0, 1.0, false, false));
        assert_eq!(d.as_slice(), &[f(0.0, 0.0, true, true), f(1.0, 1.0, true, true)]);

        // Discrete split
        let d = i(0, 10, true, true).minus(&i(4, 6, true, true));
        assert_eq!(d.as_slice(), &[i(0, 3, true, true), i(7, 10, true, true)]);
    }

    #[test]
    fn test_expand() {
        let a = f(1.0, 2.0, false, false);
        let b = f(1.0, 2.0, true, true);
        assert_eq!(a.expand(&b), b);
        let p = f(7.0, 7.0, true, true);
        let e = a.expand(&p);
        assert!(e.contains(&a) && e.contains(&p));
    }

    #[test]
    fn test_distance() {
        assert_eq!(f(1.0, 3.0, true, true).distance(&f(5.0, 7.0, true, true)), 2.0);
        assert_eq!(f(1.0, 3.0, true, true).distance(&f(2.0, 7.0, true, true)), 0.0);
        // [1,3) and [5,7): last integer of the first span is 2
        assert_eq!(i(1, 3, true, false).distance(&i(5, 7, true, false)), 3);
        assert_eq!(i(5, 7, true, false).distance_value(&1), 4);
        assert_eq!(i(1, 3, true, true).distance_value(&2), 0);

        let t1 = Timestamp::from_ymd_hms(2001, 1, 1, 0, 0, 0).unwrap();
        let t2 = Timestamp::from_ymd_hms(2001, 1, 1, 1, 0, 0).unwrap();
        let t3 = Timestamp::from_ymd_hms(2001, 1, 1, 2, 0, 0).unwrap();
        let p1 = Span::make(t1, t2, true, true).unwrap();
        let p2 = Span::make(t3, t3, true, true).unwrap();
        assert_eq!(p1.distance(&p2), chrono::TimeDelta::hours(1));
        assert_eq!(p1.distance_scalar(&p2).unwrap(), 3600.0);
    }

    #[test]
    fn test_distance_scalar_unsupported_for_text() {
        let a = Span::point(String::from("a"));
        let b = Span::point(String::from("b"));
        assert!(matches!(a.distance_scalar(&b), Err(Error::Unsupported(_))));
    }

    #[test]
    fn test_width_and_shift_scale() {
        assert_eq!(i(1, 5, true, true).width(), 5);
        let s = f(1.0, 3.0, true, true);
        assert_eq!(s.shift_scale(Some(-1.0), Some(4.0)), Some(f(0.0, 4.0, true, true)));
        assert_eq!(s.shift_scale(None, Some(0.0)), None);
        assert_eq!(i(1, 3, true, true).shift_scale(Some(i64::MAX), None), None);
    }

    #[test]
    fn test_hash_follows_equality() {
        let a = i(1, 5, true, true);
        let b = i(1, 6, true, false);
        assert_eq!(a, b);
        assert_eq!(a.hash32(), b.hash32());
        assert_eq!(a.hash_extended(3), b.hash_extended(3));
        assert_ne!(
            f(1.0, 2.0, true, true).hash32(),
            f(1.0, 2.0, true, false).hash32()
        );
    }

    #[test]
    fn test_conversions() {
        assert_eq!(Span::try_from(1.0..2.0).unwrap(), f(1.0, 2.0, true, false));
        assert_eq!(Span::try_from(1..=2).unwrap(), i(1, 3, true, false));
        assert_eq!(Span::from(3.0), f(3.0, 3.0, true, true));
        assert!(Span::from(3).is_point());
        assert!(!i(3, 5, true, false).is_point());
    }

    #[test]
    fn test_bound_flags() {
        assert_eq!(f(1.0, 2.0, true, false).bound_flags(), LOWER_INC);
        assert_eq!(f(1.0, 2.0, false, true).bound_flags(), UPPER_INC);
        assert_eq!(f(1.0, 2.0, true, true).bound_flags(), LOWER_INC | UPPER_INC);
    }
}
