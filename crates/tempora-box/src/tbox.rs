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

//! # Value-Time Boxes
//!
//! A [`TBox`] summarizes a temporal number by the span of its values and the
//! period it is defined on. Either dimension may be absent, but not both.
//! Topological operators compare the boxes on the dimensions they share;
//! positional operators need the dimension they talk about in both boxes.

use crate::error::{BoxError, Dimension};
use chrono::TimeDelta;
use std::cmp::Ordering;
use std::fmt::Display;
use tempora_core::text::TextOptions;
use tempora_core::time::Timestamp;
use tempora_span::span::Span;

/// A box over a float value span and a time span.
#[derive(Debug, Clone, PartialEq)]
pub struct TBox {
    span: Option<Span<f64>>,
    period: Option<Span<Timestamp>>,
}

/// Merges two optional spans into the smallest span covering whatever is present.
#[inline]
pub(crate) fn expand_option<T>(a: &Option<Span<T>>, b: &Option<Span<T>>) -> Option<Span<T>>
where
    T: tempora_core::BaseValue,
{
    match (a, b) {
        (Some(x), Some(y)) => Some(x.expand(y)),
        (Some(x), None) | (None, Some(x)) => Some(x.clone()),
        (None, None) => None,
    }
}

/// Orders two optional spans, absent first.
#[inline]
pub(crate) fn cmp_option<T>(a: &Option<Span<T>>, b: &Option<Span<T>>) -> Ordering
where
    T: tempora_core::BaseValue,
{
    match (a, b) {
        (Some(x), Some(y)) => x.cmp(y),
        (Some(_), None) => Ordering::Greater,
        (None, Some(_)) => Ordering::Less,
        (None, None) => Ordering::Equal,
    }
}

impl TBox {
    /// Creates a box from its dimensions.
    ///
    /// # Errors
    ///
    /// `BoxError::NoDimension` if both are absent.
    pub fn new(span: Option<Span<f64>>, period: Option<Span<Timestamp>>) -> Result<Self, BoxError> {
        if span.is_none() && period.is_none() {
            return Err(BoxError::NoDimension);
        }
        Ok(Self { span, period })
    }

    /// A box with only a value span.
    #[inline]
    pub fn from_span(span: Span<f64>) -> Self {
        Self {
            span: Some(span),
            period: None,
        }
    }

    /// A box with only a period.
    #[inline]
    pub fn from_period(period: Span<Timestamp>) -> Self {
        Self {
            span: None,
            period: Some(period),
        }
    }

    /// The degenerate box of a single value at a single instant.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use tempora_box::tbox::TBox;
    /// # use tempora_core::time::Timestamp;
    ///
    /// let t = Timestamp::from_ymd_hms(2001, 1, 1, 0, 0, 0).unwrap();
    /// let b = TBox::from_instant(1.5, t);
    /// assert_eq!(
    ///     b.to_string(),
    ///     "TBOX XT([1.5, 1.5], [2001-01-01 00:00:00+00, 2001-01-01 00:00:00+00])"
    /// );
    /// ```
    #[inline]
    pub fn from_instant(value: f64, t: Timestamp) -> Self {
        Self {
            span: Some(Span::point(value)),
            period: Some(Span::point(t)),
        }
    }

    /// Returns the value span.
    #[inline]
    pub fn span(&self) -> Option<&Span<f64>> {
        self.span.as_ref()
    }

    /// Returns the period.
    #[inline]
    pub fn period(&self) -> Option<&Span<Timestamp>> {
        self.period.as_ref()
    }

    /// Returns `true` if the box has a value dimension.
    #[inline]
    pub fn has_x(&self) -> bool {
        self.span.is_some()
    }

    /// Returns `true` if the box has a time dimension.
    #[inline]
    pub fn has_t(&self) -> bool {
        self.period.is_some()
    }

    /// Returns the smallest box containing both boxes.
    pub fn expand(&self, other: &Self) -> Self {
        Self {
            span: expand_option(&self.span, &other.span),
            period: expand_option(&self.period, &other.period),
        }
    }

    /// Orders boxes by period, then value span, then present dimensions.
    pub fn cmp(&self, other: &Self) -> Ordering {
        if let (Some(a), Some(b)) = (&self.period, &other.period) {
            let ord = a.cmp(b);
            if ord != Ordering::Equal {
                return ord;
            }
        }
        if let (Some(a), Some(b)) = (&self.span, &other.span) {
            let ord = a.cmp(b);
            if ord != Ordering::Equal {
                return ord;
            }
        }
        (self.has_x(), self.has_t()).cmp(&(other.has_x(), other.has_t()))
    }

    /// The dimensions both boxes have.
    fn common(&self, other: &Self) -> Result<(bool, bool), BoxError> {
        let hasx = self.has_x() && other.has_x();
        let hast = self.has_t() && other.has_t();
        if !hasx && !hast {
            return Err(BoxError::NoCommonDimension);
        }
        Ok((hasx, hast))
    }

    /// Evaluates `pred` on every common dimension.
    fn all_common(
        &self,
        other: &Self,
        x: impl FnOnce(&Span<f64>, &Span<f64>) -> bool,
        t: impl FnOnce(&Span<Timestamp>, &Span<Timestamp>) -> bool,
    ) -> Result<bool, BoxError> {
        self.common(other)?;
        let x_ok = match (&self.span, &other.span) {
            (Some(a), Some(b)) => x(a, b),
            _ => true,
        };
        let t_ok = match (&self.period, &other.period) {
            (Some(a), Some(b)) => t(a, b),
            _ => true,
        };
        Ok(x_ok && t_ok)
    }

    /// Returns `true` if `self` contains `other` on every common dimension.
    ///
    /// # Errors
    ///
    /// `BoxError::NoCommonDimension` if the boxes share no dimension.
    pub fn contains(&self, other: &Self) -> Result<bool, BoxError> {
        self.all_common(other, |a, b| a.contains(b), |a, b| a.contains(b))
    }

    /// Returns `true` if `other` contains `self` on every common dimension.
    ///
    /// # Errors
    ///
    /// `BoxError::NoCommonDimension` if the boxes share no dimension.
    #[inline]
    pub fn contained(&self, other: &Self) -> Result<bool, BoxError> {
        other.contains(self)
    }

    /// Returns `true` if the boxes overlap on every common dimension.
    ///
    /// # Errors
    ///
    /// `BoxError::NoCommonDimension` if the boxes share no dimension.
    pub fn overlaps(&self, other: &Self) -> Result<bool, BoxError> {
        self.all_common(other, |a, b| a.overlaps(b), |a, b| a.overlaps(b))
    }

    /// Returns `true` if the boxes are equal on every common dimension.
    ///
    /// # Errors
    ///
    /// `BoxError::NoCommonDimension` if the boxes share no dimension.
    pub fn same(&self, other: &Self) -> Result<bool, BoxError> {
        self.all_common(other, |a, b| a.same(b), |a, b| a.same(b))
    }

    /// Returns `true` if the boxes touch without sharing an interior: every
    /// common dimension overlaps or is adjacent, and at least one is adjacent.
    ///
    /// # Errors
    ///
    /// `BoxError::NoCommonDimension` if the boxes share no dimension.
    pub fn adjacent(&self, other: &Self) -> Result<bool, BoxError> {
        let touching = self.all_common(
            other,
            |a, b| a.overlaps(b) || a.adjacent(b),
            |a, b| a.overlaps(b) || a.adjacent(b),
        )?;
        let any_adjacent = self.span.as_ref().zip(other.span.as_ref()).is_some_and(|(a, b)| a.adjacent(b))
            || self
                .period
                .as_ref()
                .zip(other.period.as_ref())
                .is_some_and(|(a, b)| a.adjacent(b));
        Ok(touching && any_adjacent)
    }

    fn both_x<'a>(&'a self, other: &'a Self) -> Result<(&'a Span<f64>, &'a Span<f64>), BoxError> {
        self.span
            .as_ref()
            .zip(other.span.as_ref())
            .ok_or(BoxError::MissingDimension(Dimension::X))
    }

    fn both_t<'a>(
        &'a self,
        other: &'a Self,
    ) -> Result<(&'a Span<Timestamp>, &'a Span<Timestamp>), BoxError> {
        self.period
            .as_ref()
            .zip(other.period.as_ref())
            .ok_or(BoxError::MissingDimension(Dimension::T))
    }

    /// Returns `true` if `self` lies strictly below `other` on the value axis.
    ///
    /// # Errors
    ///
    /// `BoxError::MissingDimension` unless both boxes have a value span.
    #[inline]
    pub fn left(&self, other: &Self) -> Result<bool, BoxError> {
        self.both_x(other).map(|(a, b)| a.left(b))
    }

    /// Returns `true` if `self` does not extend above `other`.
    ///
    /// # Errors
    ///
    /// `BoxError::MissingDimension` unless both boxes have a value span.
    #[inline]
    pub fn overleft(&self, other: &Self) -> Result<bool, BoxError> {
        self.both_x(other).map(|(a, b)| a.overleft(b))
    }

    /// Returns `true` if `self` lies strictly above `other` on the value axis.
    ///
    /// # Errors
    ///
    /// `BoxError::MissingDimension` unless both boxes have a value span.
    #[inline]
    pub fn right(&self, other: &Self) -> Result<bool, BoxError> {
        self.both_x(other).map(|(a, b)| a.right(b))
    }

    /// Returns `true` if `self` does not extend below `other`.
    ///
    /// # Errors
    ///
    /// `BoxError::MissingDimension` unless both boxes have a value span.
    #[inline]
    pub fn overright(&self, other: &Self) -> Result<bool, BoxError> {
        self.both_x(other).map(|(a, b)| a.overright(b))
    }

    /// Returns `true` if `self` ends strictly before `other` begins.
    ///
    /// # Errors
    ///
    /// `BoxError::MissingDimension` unless both boxes have a period.
    #[inline]
    pub fn before(&self, other: &Self) -> Result<bool, BoxError> {
        self.both_t(other).map(|(a, b)| a.before(b))
    }

    /// Returns `true` if `self` does not end after `other`.
    ///
    /// # Errors
    ///
    /// `BoxError::MissingDimension` unless both boxes have a period.
    #[inline]
    pub fn overbefore(&self, other: &Self) -> Result<bool, BoxError> {
        self.both_t(other).map(|(a, b)| a.overbefore(b))
    }

    /// Returns `true` if `self` begins strictly after `other` ends.
    ///
    /// # Errors
    ///
    /// `BoxError::MissingDimension` unless both boxes have a period.
    #[inline]
    pub fn after(&self, other: &Self) -> Result<bool, BoxError> {
        self.both_t(other).map(|(a, b)| a.after(b))
    }

    /// Returns `true` if `self` does not begin before `other`.
    ///
    /// # Errors
    ///
    /// `BoxError::MissingDimension` unless both boxes have a period.
    #[inline]
    pub fn overafter(&self, other: &Self) -> Result<bool, BoxError> {
        self.both_t(other).map(|(a, b)| a.overafter(b))
    }

    /// Returns the box covering both boxes.
    ///
    /// # Errors
    ///
    /// `BoxError::DimensionMismatch` for boxes with different dimensions and
    /// `BoxError::NotContiguous` for boxes that do not overlap.
    pub fn union(&self, other: &Self) -> Result<Self, BoxError> {
        if self.has_x() != other.has_x() || self.has_t() != other.has_t() {
            return Err(BoxError::DimensionMismatch);
        }
        if !self.overlaps(other)? {
            return Err(BoxError::NotContiguous);
        }
        Ok(self.expand(other))
    }

    /// Returns the common part on the shared dimensions, `None` if the boxes
    /// share no dimension or are disjoint on one of them.
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        let (hasx, hast) = self.common(other).ok()?;
        let span = if hasx {
            Some(self.span.as_ref()?.intersection(other.span.as_ref()?)?)
        } else {
            None
        };
        let period = if hast {
            Some(self.period.as_ref()?.intersection(other.period.as_ref()?)?)
        } else {
            None
        };
        Some(Self { span, period })
    }

    /// Widens the value span by `delta` on both sides.
    ///
    /// # Errors
    ///
    /// `BoxError::MissingDimension` without a value span, or an invalid span
    /// if a negative `delta` would invert it.
    pub fn expand_value(&self, delta: f64) -> Result<Self, BoxError> {
        let span = self.span.as_ref().ok_or(BoxError::MissingDimension(Dimension::X))?;
        let widened = Span::make(
            span.lower() - delta,
            span.upper() + delta,
            span.lower_inc(),
            span.upper_inc(),
        )?;
        Ok(Self {
            span: Some(widened),
            period: self.period.clone(),
        })
    }

    /// Widens the period by `delta` on both sides.
    ///
    /// # Errors
    ///
    /// `BoxError::MissingDimension` without a period, or an invalid span if
    /// the timestamps overflow or a negative `delta` would invert it.
    pub fn expand_time(&self, delta: TimeDelta) -> Result<Self, BoxError> {
        let period = self.period.as_ref().ok_or(BoxError::MissingDimension(Dimension::T))?;
        Ok(Self {
            span: self.span.clone(),
            period: Some(widen_period(period, delta)?),
        })
    }

    /// Shifts the period by `shift` and/or rescales it to `width`; `None`
    /// without a period or on overflow.
    pub fn shift_scale_time(&self, shift: Option<TimeDelta>, width: Option<TimeDelta>) -> Option<Self> {
        let period = self.period.as_ref()?.shift_scale(shift, width)?;
        Some(Self {
            span: self.span.clone(),
            period: Some(period),
        })
    }

    /// Formats the box as `TBOX X(...)`, `TBOX T(...)` or `TBOX XT(...)`.
    pub fn to_text(&self, options: &TextOptions) -> String {
        match (&self.span, &self.period) {
            (Some(x), Some(t)) => format!("TBOX XT({}, {})", x.to_text(options), t.to_text(options)),
            (Some(x), None) => format!("TBOX X({})", x.to_text(options)),
            (None, Some(t)) => format!("TBOX T({})", t.to_text(options)),
            (None, None) => String::from("TBOX()"),
        }
    }
}

/// Widens a period by `delta` on both sides.
pub(crate) fn widen_period(
    period: &Span<Timestamp>,
    delta: TimeDelta,
) -> Result<Span<Timestamp>, BoxError> {
    let overflow = BoxError::InvalidBounds("timestamp out of range");
    let lower = period.lower().checked_add(-delta).ok_or(overflow.clone())?;
    let upper = period.upper().checked_add(delta).ok_or(overflow)?;
    Ok(Span::make(lower, upper, period.lower_inc(), period.upper_inc())?)
}

impl Eq for TBox {}

impl PartialOrd for TBox {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(Ord::cmp(self, other))
    }
}

impl Ord for TBox {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        TBox::cmp(self, other)
    }
}

impl Display for TBox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_text(&TextOptions::default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(hour: u32) -> Timestamp {
        Timestamp::from_ymd_hms(2001, 1, 1, hour, 0, 0).unwrap()
    }

    fn tbox(xmin: f64, xmax: f64, tmin: u32, tmax: u32) -> TBox {
        TBox::new(
            Some(Span::make(xmin, xmax, true, true).unwrap()),
            Some(Span::make(t(tmin), t(tmax), true, true).unwrap()),
        )
        .unwrap()
    }

    #[test]
    fn test_new_requires_a_dimension() {
        assert_eq!(TBox::new(None, None), Err(BoxError::NoDimension));
    }

    #[test]
    fn test_expand() {
        let a = tbox(1.0, 2.0, 1, 2);
        let b = tbox(5.0, 6.0, 3, 4);
        assert_eq!(a.expand(&b), tbox(1.0, 6.0, 1, 4));
        let only_x = TBox::from_span(Span::make(0.0, 1.0, true, false).unwrap());
        let merged = a.expand(&only_x);
        assert_eq!(merged.span(), Some(&Span::make(0.0, 2.0, true, true).unwrap()));
        assert_eq!(merged.period(), a.period());
    }

    #[test]
    fn test_cmp_orders_time_first() {
        let early_high = tbox(10.0, 11.0, 1, 2);
        let late_low = tbox(0.0, 1.0, 3, 4);
        assert_eq!(early_high.cmp(&late_low), Ordering::Less);
        let a = tbox(0.0, 1.0, 1, 2);
        let b = tbox(0.0, 2.0, 1, 2);
        assert_eq!(a.cmp(&b), Ordering::Less);
        assert_eq!(a.cmp(&a.clone()), Ordering::Equal);
        let x_only = TBox::from_span(Span::make(0.0, 1.0, true, true).unwrap());
        assert_eq!(x_only.cmp(&a), Ordering::Less);
    }

    #[test]
    fn test_topological() {
        let outer = tbox(0.0, 10.0, 0, 10);
        let inner = tbox(2.0, 3.0, 2, 3);
        assert_eq!(outer.contains(&inner), Ok(true));
        assert_eq!(inner.contained(&outer), Ok(true));
        assert_eq!(inner.contains(&outer), Ok(false));
        assert_eq!(outer.overlaps(&tbox(9.0, 12.0, 9, 12)), Ok(true));
        assert_eq!(outer.overlaps(&tbox(11.0, 12.0, 9, 12)), Ok(false));
        assert_eq!(outer.same(&outer.clone()), Ok(true));
        let x_only = TBox::from_span(Span::make(0.0, 1.0, true, true).unwrap());
        let t_only = TBox::from_period(Span::point(t(1)));
        assert_eq!(x_only.overlaps(&t_only), Err(BoxError::NoCommonDimension));
        // Only the shared dimension counts
        assert_eq!(outer.contains(&t_only), Ok(true));
    }

    #[test]
    fn test_adjacent() {
        let a = TBox::new(
            Some(Span::make(0.0, 1.0, true, false).unwrap()),
            Some(Span::make(t(0), t(5), true, true).unwrap()),
        )
        .unwrap();
        let b = tbox(1.0, 2.0, 2, 3);
        assert_eq!(a.adjacent(&b), Ok(true));
        assert_eq!(a.adjacent(&tbox(0.5, 2.0, 2, 3)), Ok(false));
        assert_eq!(a.adjacent(&tbox(1.5, 2.0, 2, 3)), Ok(false));
    }

    #[test]
    fn test_positional() {
        let a = tbox(0.0, 1.0, 0, 1);
        let b = tbox(2.0, 3.0, 2, 3);
        assert_eq!(a.left(&b), Ok(true));
        assert_eq!(a.overleft(&b), Ok(true));
        assert_eq!(b.right(&a), Ok(true));
        assert_eq!(b.overright(&a), Ok(true));
        assert_eq!(a.before(&b), Ok(true));
        assert_eq!(a.overbefore(&b), Ok(true));
        assert_eq!(b.after(&a), Ok(true));
        assert_eq!(b.overafter(&a), Ok(true));
        let t_only = TBox::from_period(Span::point(t(1)));
        assert_eq!(
            a.left(&t_only),
            Err(BoxError::MissingDimension(Dimension::X))
        );
    }

    #[test]
    fn test_union_and_intersection() {
        let a = tbox(0.0, 5.0, 0, 5);
        let b = tbox(3.0, 8.0, 3, 8);
        assert_eq!(a.union(&b), Ok(tbox(0.0, 8.0, 0, 8)));
        assert_eq!(a.intersection(&b), Some(tbox(3.0, 5.0, 3, 5)));
        let far = tbox(10.0, 11.0, 3, 8);
        assert_eq!(a.union(&far), Err(BoxError::NotContiguous));
        assert_eq!(a.intersection(&far), None);
        let x_only = TBox::from_span(Span::make(0.0, 1.0, true, true).unwrap());
        assert_eq!(a.union(&x_only), Err(BoxError::DimensionMismatch));
    }

    #[test]
    fn test_expand_value_and_time() {
        let a = tbox(1.0, 2.0, 2, 3);
        assert_eq!(a.expand_value(1.0), Ok(tbox(0.0, 3.0, 2, 3)));
        assert_eq!(a.expand_time(TimeDelta::hours(1)), Ok(tbox(1.0, 2.0, 1, 4)));
        assert!(a.expand_value(-2.0).is_err());
        let shifted = a.shift_scale_time(Some(TimeDelta::hours(1)), None).unwrap();
        assert_eq!(shifted, tbox(1.0, 2.0, 3, 4));
    }

    #[test]
    fn test_display() {
        let x_only = TBox::from_span(Span::make(1.0, 2.0, true, false).unwrap());
        assert_eq!(x_only.to_string(), "TBOX X([1, 2))");
        let t_only = TBox::from_period(Span::point(t(1)));
        assert_eq!(
            t_only.to_string(),
            "TBOX T([2001-01-01 01:00:00+00, 2001-01-01 01:00:00+00])"
        );
    }
}
