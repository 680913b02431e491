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

//! # Cross-Shape Algebra
//!
//! Every operator family is available for all pairs of the four shapes: a
//! bare value, an [`InstantSet`], a [`Span`] and a [`SpanSet`]. Operands are
//! described through the [`Shape`] trait, and each operator promotes the
//! poorer operand to what the richer one needs before delegating to the
//! span or span-set algorithm. Point-shaped pairs are merged directly
//! without materializing degenerate spans.
//!
//! ## Set operators
//!
//! [`SetAlgebra`] fixes the result type of `union`, `intersection` and
//! `minus` per pair. Results are point-shaped whenever the operator keeps
//! only values of a point-shaped operand:
//!
//! | lhs \ rhs       | value / set         | span / span set        |
//! |-----------------|---------------------|------------------------|
//! | value           | set, value, value   | span set, value, value |
//! | instant set     | set, set, set       | span set, set, set     |
//! | span / span set | span set, rhs, span set | span set, span set, span set |

use crate::instant_set::InstantSet;
use crate::points;
use crate::span::Span;
use crate::span_set::SpanSet;
use std::borrow::Cow;
use tempora_core::base::{BaseValue, Metric};
use tempora_core::error::Error;
use tempora_core::time::Timestamp;

/// A value, set of values, span or span set over the base `T`.
pub trait Shape<T>
where
    T: BaseValue,
{
    /// The smallest span containing the shape.
    fn bounding_span(&self) -> Cow<'_, Span<T>>;

    /// The shape as a single span, if it is exactly one.
    fn as_span(&self) -> Option<Cow<'_, Span<T>>>;

    /// The shape as a span set.
    fn to_span_set(&self) -> Cow<'_, SpanSet<T>>;

    /// The values of a point-shaped operand.
    #[inline]
    fn points(&self) -> Option<&[T]> {
        None
    }
}

/// A shape made of isolated values.
pub trait PointShape<T>: Shape<T>
where
    T: BaseValue,
{
    /// The values in increasing order.
    fn values(&self) -> &[T];
}

impl<T> Shape<T> for Span<T>
where
    T: BaseValue,
{
    #[inline]
    fn bounding_span(&self) -> Cow<'_, Span<T>> {
        Cow::Borrowed(self)
    }

    #[inline]
    fn as_span(&self) -> Option<Cow<'_, Span<T>>> {
        Some(Cow::Borrowed(self))
    }

    #[inline]
    fn to_span_set(&self) -> Cow<'_, SpanSet<T>> {
        Cow::Owned(SpanSet::from_span(self.clone()))
    }
}

impl<T> Shape<T> for SpanSet<T>
where
    T: BaseValue,
{
    #[inline]
    fn bounding_span(&self) -> Cow<'_, Span<T>> {
        Cow::Borrowed(SpanSet::bounding_span(self))
    }

    #[inline]
    fn as_span(&self) -> Option<Cow<'_, Span<T>>> {
        (self.len() == 1).then(|| Cow::Borrowed(self.start_span()))
    }

    #[inline]
    fn to_span_set(&self) -> Cow<'_, SpanSet<T>> {
        Cow::Borrowed(self)
    }
}

impl<T> Shape<T> for InstantSet<T>
where
    T: BaseValue,
{
    #[inline]
    fn bounding_span(&self) -> Cow<'_, Span<T>> {
        Cow::Owned(InstantSet::bounding_span(self))
    }

    #[inline]
    fn as_span(&self) -> Option<Cow<'_, Span<T>>> {
        (self.len() == 1).then(|| Cow::Owned(Span::point(self.start_value().clone())))
    }

    #[inline]
    fn to_span_set(&self) -> Cow<'_, SpanSet<T>> {
        Cow::Owned(InstantSet::to_span_set(self))
    }

    #[inline]
    fn points(&self) -> Option<&[T]> {
        Some(self.values())
    }
}

impl<T> PointShape<T> for InstantSet<T>
where
    T: BaseValue,
{
    #[inline]
    fn values(&self) -> &[T] {
        InstantSet::values(self)
    }
}

/// Returns `true` if `shape` contains every value of `values`.
fn contains_all<T, A>(shape: &A, values: &[T]) -> bool
where
    T: BaseValue,
    A: Shape<T> + ?Sized,
{
    if let Some(own) = shape.points() {
        return points::contains(own, values);
    }
    if let Some(span) = shape.as_span() {
        return values.iter().all(|v| span.contains_value(v));
    }
    let set = shape.to_span_set();
    values.iter().all(|v| set.contains_value(v))
}

/// Returns `true` if `shape` contains at least one value of `values`.
fn contains_any<T, A>(shape: &A, values: &[T]) -> bool
where
    T: BaseValue,
    A: Shape<T> + ?Sized,
{
    if let Some(own) = shape.points() {
        return points::overlaps(own, values);
    }
    if let Some(span) = shape.as_span() {
        return values.iter().any(|v| span.contains_value(v));
    }
    let set = shape.to_span_set();
    values.iter().any(|v| set.contains_value(v))
}

/// Returns `true` if `a` contains `b`.
///
/// # Examples
///
/// ```rust
/// # use tempora_span::ops;
/// # use tempora_span::span::Span;
/// # use tempora_span::span_set::SpanSet;
///
/// let set = SpanSet::new([
///     Span::make(1.0, 2.0, true, true).unwrap(),
///     Span::make(5.0, 6.0, true, true).unwrap(),
/// ])
/// .unwrap();
/// assert!(ops::contains(&set, &1.5));
/// assert!(!ops::contains(&set, &3.0));
/// assert!(ops::contains(&set.bounding_span().clone(), &set));
/// ```
pub fn contains<T, A, B>(a: &A, b: &B) -> bool
where
    T: BaseValue,
    A: Shape<T> + ?Sized,
    B: Shape<T> + ?Sized,
{
    if let Some(values) = b.points() {
        return contains_all(a, values);
    }
    match (a.as_span(), b.as_span()) {
        (Some(x), Some(y)) => x.contains(&y),
        _ => a.to_span_set().contains(&b.to_span_set()),
    }
}

/// Returns `true` if `a` is contained in `b`.
#[inline]
pub fn contained<T, A, B>(a: &A, b: &B) -> bool
where
    T: BaseValue,
    A: Shape<T> + ?Sized,
    B: Shape<T> + ?Sized,
{
    contains(b, a)
}

/// Returns `true` if `a` and `b` share a value.
pub fn overlaps<T, A, B>(a: &A, b: &B) -> bool
where
    T: BaseValue,
    A: Shape<T> + ?Sized,
    B: Shape<T> + ?Sized,
{
    if !a.bounding_span().overlaps(&b.bounding_span()) {
        return false;
    }
    if let Some(values) = a.points() {
        return contains_any(b, values);
    }
    if let Some(values) = b.points() {
        return contains_any(a, values);
    }
    match (a.as_span(), b.as_span()) {
        (Some(x), Some(y)) => x.overlaps(&y),
        _ => a.to_span_set().overlaps(&b.to_span_set()),
    }
}

/// Returns `true` if the bounding span of one operand ends where the bounding
/// span of the other begins, with exactly one of the two bounds inclusive.
/// Gaps inside a set are not considered.
///
/// # Examples
///
/// ```rust
/// # use tempora_span::ops;
/// # use tempora_span::span::Span;
///
/// let span = Span::make(1.0, 5.0, true, false).unwrap();
/// assert!(ops::adjacent(&span, &5.0));
/// assert!(!ops::adjacent(&span, &4.0));
/// ```
pub fn adjacent<T, A, B>(a: &A, b: &B) -> bool
where
    T: BaseValue,
    A: Shape<T> + ?Sized,
    B: Shape<T> + ?Sized,
{
    a.bounding_span().adjacent(&b.bounding_span())
}

/// Returns `true` if `a` and `b` hold exactly the same values.
pub fn same<T, A, B>(a: &A, b: &B) -> bool
where
    T: BaseValue,
    A: Shape<T> + ?Sized,
    B: Shape<T> + ?Sized,
{
    if let (Some(x), Some(y)) = (a.points(), b.points()) {
        return x.len() == y.len() && x.iter().zip(y).all(|(p, q)| p.equal(q));
    }
    match (a.as_span(), b.as_span()) {
        (Some(x), Some(y)) => x.same(&y),
        _ => a.to_span_set().same(&b.to_span_set()),
    }
}

/// Returns `true` if `a` ends strictly before `b` begins.
#[inline]
pub fn before<T, A, B>(a: &A, b: &B) -> bool
where
    T: BaseValue,
    A: Shape<T> + ?Sized,
    B: Shape<T> + ?Sized,
{
    a.bounding_span().before(&b.bounding_span())
}

/// Returns `true` if `a` begins strictly after `b` ends.
#[inline]
pub fn after<T, A, B>(a: &A, b: &B) -> bool
where
    T: BaseValue,
    A: Shape<T> + ?Sized,
    B: Shape<T> + ?Sized,
{
    a.bounding_span().after(&b.bounding_span())
}

/// Returns `true` if `a` does not extend past the end of `b`.
#[inline]
pub fn overbefore<T, A, B>(a: &A, b: &B) -> bool
where
    T: BaseValue,
    A: Shape<T> + ?Sized,
    B: Shape<T> + ?Sized,
{
    a.bounding_span().overbefore(&b.bounding_span())
}

/// Returns `true` if `a` does not extend before the start of `b`.
#[inline]
pub fn overafter<T, A, B>(a: &A, b: &B) -> bool
where
    T: BaseValue,
    A: Shape<T> + ?Sized,
    B: Shape<T> + ?Sized,
{
    a.bounding_span().overafter(&b.bounding_span())
}

/// Distance between the bounding spans of `a` and `b`, zero if they overlap.
///
/// # Examples
///
/// ```rust
/// # use chrono::TimeDelta;
/// # use tempora_core::time::Timestamp;
/// # use tempora_span::ops;
/// # use tempora_span::span::Span;
///
/// let t = |h| Timestamp::from_ymd_hms(2024, 1, 1, h, 0, 0).unwrap();
/// let period = Span::make(t(1), t(3), true, true).unwrap();
/// assert_eq!(ops::distance(&period, &t(5)), TimeDelta::hours(2));
/// assert_eq!(ops::distance_scalar(&period, &t(5)).unwrap(), 7200.0);
/// ```
pub fn distance<T, A, B>(a: &A, b: &B) -> T::Distance
where
    T: Metric,
    A: Shape<T> + ?Sized,
    B: Shape<T> + ?Sized,
{
    a.bounding_span().distance(&b.bounding_span())
}

/// Distance between the bounding spans of `a` and `b` as a plain float, in
/// seconds for time.
///
/// # Errors
///
/// `UnsupportedOperation` for bases without a metric.
pub fn distance_scalar<T, A, B>(a: &A, b: &B) -> Result<f64, Error>
where
    T: BaseValue,
    A: Shape<T> + ?Sized,
    B: Shape<T> + ?Sized,
{
    a.bounding_span().distance_scalar(&b.bounding_span())
}

/// Union, intersection and difference with a fixed result type per pair.
pub trait SetAlgebra<Rhs: ?Sized = Self> {
    /// The type of `union`.
    type Union;
    /// The type of a non-empty `intersection`.
    type Intersection;
    /// The type of a non-empty `minus`.
    type Difference;

    /// Values in either operand.
    fn union(&self, rhs: &Rhs) -> Self::Union;

    /// Values in both operands, `None` if there are none.
    fn intersection(&self, rhs: &Rhs) -> Option<Self::Intersection>;

    /// Values of `self` not in `rhs`, `None` if there are none.
    fn minus(&self, rhs: &Rhs) -> Option<Self::Difference>;
}

/// Values in either operand.
///
/// # Examples
///
/// ```rust
/// # use tempora_span::ops;
/// # use tempora_span::span::Span;
///
/// let a = Span::make(1.0, 2.0, true, true).unwrap();
/// let b = Span::make(5.0, 6.0, true, true).unwrap();
/// assert_eq!(ops::union(&a, &b).to_string(), "{[1, 2], [5, 6]}");
/// assert_eq!(ops::union(&3i32, &7i32).to_string(), "{3, 7}");
/// ```
#[inline]
pub fn union<A, B>(a: &A, b: &B) -> A::Union
where
    A: SetAlgebra<B> + ?Sized,
    B: ?Sized,
{
    SetAlgebra::union(a, b)
}

/// Values in both operands, `None` if there are none.
#[inline]
pub fn intersection<A, B>(a: &A, b: &B) -> Option<A::Intersection>
where
    A: SetAlgebra<B> + ?Sized,
    B: ?Sized,
{
    SetAlgebra::intersection(a, b)
}

/// Values of `a` not in `b`, `None` if there are none.
///
/// # Examples
///
/// ```rust
/// # use tempora_span::ops;
/// # use tempora_span::span::Span;
///
/// let span = Span::make(0.0, 10.0, true, true).unwrap();
/// let cut = ops::minus(&span, &5.0f64).unwrap();
/// assert_eq!(cut.to_string(), "{[0, 5), (5, 10]}");
/// assert_eq!(ops::minus(&5.0f64, &span), None);
/// ```
#[inline]
pub fn minus<A, B>(a: &A, b: &B) -> Option<A::Difference>
where
    A: SetAlgebra<B> + ?Sized,
    B: ?Sized,
{
    SetAlgebra::minus(a, b)
}

fn union_points<T, A, B>(a: &A, b: &B) -> InstantSet<T>
where
    T: BaseValue,
    A: PointShape<T> + ?Sized,
    B: PointShape<T> + ?Sized,
{
    InstantSet::from_sorted_unchecked(points::union(a.values(), b.values()))
}

fn union_spans<T, A, B>(a: &A, b: &B) -> SpanSet<T>
where
    T: BaseValue,
    A: Shape<T> + ?Sized,
    B: Shape<T> + ?Sized,
{
    a.to_span_set().union(&b.to_span_set())
}

/// Values of `a` that lie inside (`keep_inside`) or outside `b`.
fn filter_points<T, A, B>(a: &A, b: &B, keep_inside: bool) -> Vec<T>
where
    T: BaseValue,
    A: PointShape<T> + ?Sized,
    B: Shape<T> + ?Sized,
{
    if let Some(other) = b.points() {
        return if keep_inside {
            points::intersection(a.values(), other)
        } else {
            points::minus(a.values(), other)
        };
    }
    if let Some(span) = b.as_span() {
        return a
            .values()
            .iter()
            .filter(|v| span.contains_value(v) == keep_inside)
            .cloned()
            .collect();
    }
    points::filter_by_span_set(a.values(), &b.to_span_set(), keep_inside)
}

fn intersection_value<T, A, B>(a: &A, b: &B) -> Option<T>
where
    T: BaseValue,
    A: PointShape<T> + ?Sized,
    B: Shape<T> + ?Sized,
{
    filter_points(a, b, true).into_iter().next()
}

fn intersection_value_rhs<T, A, B>(a: &A, b: &B) -> Option<T>
where
    T: BaseValue,
    A: Shape<T> + ?Sized,
    B: PointShape<T> + ?Sized,
{
    filter_points(b, a, true).into_iter().next()
}

fn minus_value<T, A, B>(a: &A, b: &B) -> Option<T>
where
    T: BaseValue,
    A: PointShape<T> + ?Sized,
    B: Shape<T> + ?Sized,
{
    filter_points(a, b, false).into_iter().next()
}

fn intersection_points<T, A, B>(a: &A, b: &B) -> Option<InstantSet<T>>
where
    T: BaseValue,
    A: PointShape<T> + ?Sized,
    B: Shape<T> + ?Sized,
{
    InstantSet::from_sorted_values(filter_points(a, b, true))
}

fn intersection_points_rhs<T, A, B>(a: &A, b: &B) -> Option<InstantSet<T>>
where
    T: BaseValue,
    A: Shape<T> + ?Sized,
    B: PointShape<T> + ?Sized,
{
    InstantSet::from_sorted_values(filter_points(b, a, true))
}

fn minus_points<T, A, B>(a: &A, b: &B) -> Option<InstantSet<T>>
where
    T: BaseValue,
    A: PointShape<T> + ?Sized,
    B: Shape<T> + ?Sized,
{
    InstantSet::from_sorted_values(filter_points(a, b, false))
}

fn intersection_spans<T, A, B>(a: &A, b: &B) -> Option<SpanSet<T>>
where
    T: BaseValue,
    A: Shape<T> + ?Sized,
    B: Shape<T> + ?Sized,
{
    match (a.as_span(), b.as_span()) {
        (Some(x), Some(y)) => x.intersection(&y).map(SpanSet::from_span),
        _ => a.to_span_set().intersection(&b.to_span_set()),
    }
}

fn minus_spans<T, A, B>(a: &A, b: &B) -> Option<SpanSet<T>>
where
    T: BaseValue,
    A: Shape<T> + ?Sized,
    B: Shape<T> + ?Sized,
{
    match (a.as_span(), b.as_span()) {
        (Some(x), Some(y)) => SpanSet::from_pieces(x.minus(&y).into_vec()),
        _ => a.to_span_set().minus(&b.to_span_set()),
    }
}

/// Implements [`SetAlgebra`] for one operand pair from three helper functions.
macro_rules! impl_set_algebra {
    (
        [$($generics:tt)*] $lhs:ty, $rhs:ty =>
        $union:ty = $union_fn:ident,
        $inter:ty = $inter_fn:ident,
        $diff:ty = $diff_fn:ident
    ) => {
        impl<$($generics)*> SetAlgebra<$rhs> for $lhs {
            type Union = $union;
            type Intersection = $inter;
            type Difference = $diff;

            #[inline]
            fn union(&self, rhs: &$rhs) -> Self::Union {
                $union_fn(self, rhs)
            }

            #[inline]
            fn intersection(&self, rhs: &$rhs) -> Option<Self::Intersection> {
                $inter_fn(self, rhs)
            }

            #[inline]
            fn minus(&self, rhs: &$rhs) -> Option<Self::Difference> {
                $diff_fn(self, rhs)
            }
        }
    };
}

impl_set_algebra!([T: BaseValue] InstantSet<T>, InstantSet<T> =>
    InstantSet<T> = union_points, InstantSet<T> = intersection_points, InstantSet<T> = minus_points);
impl_set_algebra!([T: BaseValue] InstantSet<T>, Span<T> =>
    SpanSet<T> = union_spans, InstantSet<T> = intersection_points, InstantSet<T> = minus_points);
impl_set_algebra!([T: BaseValue] InstantSet<T>, SpanSet<T> =>
    SpanSet<T> = union_spans, InstantSet<T> = intersection_points, InstantSet<T> = minus_points);
impl_set_algebra!([T: BaseValue] Span<T>, InstantSet<T> =>
    SpanSet<T> = union_spans, InstantSet<T> = intersection_points_rhs, SpanSet<T> = minus_spans);
impl_set_algebra!([T: BaseValue] Span<T>, Span<T> =>
    SpanSet<T> = union_spans, SpanSet<T> = intersection_spans, SpanSet<T> = minus_spans);
impl_set_algebra!([T: BaseValue] Span<T>, SpanSet<T> =>
    SpanSet<T> = union_spans, SpanSet<T> = intersection_spans, SpanSet<T> = minus_spans);
impl_set_algebra!([T: BaseValue] SpanSet<T>, InstantSet<T> =>
    SpanSet<T> = union_spans, InstantSet<T> = intersection_points_rhs, SpanSet<T> = minus_spans);
impl_set_algebra!([T: BaseValue] SpanSet<T>, Span<T> =>
    SpanSet<T> = union_spans, SpanSet<T> = intersection_spans, SpanSet<T> = minus_spans);
impl_set_algebra!([T: BaseValue] SpanSet<T>, SpanSet<T> =>
    SpanSet<T> = union_spans, SpanSet<T> = intersection_spans, SpanSet<T> = minus_spans);

/// Makes bare values of each listed base usable as point-shaped operands.
macro_rules! impl_bare_value_shape {
    ($($base:ty),* $(,)?) => {
        $(
            impl Shape<$base> for $base {
                #[inline]
                fn bounding_span(&self) -> Cow<'_, Span<$base>> {
                    Cow::Owned(Span::point(self.clone()))
                }

                #[inline]
                fn as_span(&self) -> Option<Cow<'_, Span<$base>>> {
                    Some(Cow::Owned(Span::point(self.clone())))
                }

                #[inline]
                fn to_span_set(&self) -> Cow<'_, SpanSet<$base>> {
                    Cow::Owned(SpanSet::from_span(Span::point(self.clone())))
                }

                #[inline]
                fn points(&self) -> Option<&[$base]> {
                    Some(std::slice::from_ref(self))
                }
            }

            impl PointShape<$base> for $base {
                #[inline]
                fn values(&self) -> &[$base] {
                    std::slice::from_ref(self)
                }
            }

            impl_set_algebra!([] $base, $base =>
                InstantSet<$base> = union_points, $base = intersection_value, $base = minus_value);
            impl_set_algebra!([] $base, InstantSet<$base> =>
                InstantSet<$base> = union_points, $base = intersection_value, $base = minus_value);
            impl_set_algebra!([] $base, Span<$base> =>
                SpanSet<$base> = union_spans, $base = intersection_value, $base = minus_value);
            impl_set_algebra!([] $base, SpanSet<$base> =>
                SpanSet<$base> = union_spans, $base = intersection_value, $base = minus_value);
            impl_set_algebra!([] InstantSet<$base>, $base =>
                InstantSet<$base> = union_points, InstantSet<$base> = intersection_points,
                InstantSet<$base> = minus_points);
            impl_set_algebra!([] Span<$base>, $base =>
                SpanSet<$base> = union_spans, $base = intersection_value_rhs, SpanSet<$base> = minus_spans);
            impl_set_algebra!([] SpanSet<$base>, $base =>
                SpanSet<$base> = union_spans, $base = intersection_value_rhs, SpanSet<$base> = minus_spans);
        )*
    };
}

impl_bare_value_shape!(i32, i64, f64, Timestamp, String);

#[cfg(test)]
mod tests {
    use super::*;

    fn f(lower: f64, upper: f64) -> Span<f64> {
        Span::make(lower, upper, true, true).unwrap()
    }

    fn fo(lower: f64, upper: f64, li: bool, ui: bool) -> Span<f64> {
        Span::make(lower, upper, li, ui).unwrap()
    }

    fn ss(spans: &[Span<f64>]) -> SpanSet<f64> {
        SpanSet::new(spans.iter().cloned()).unwrap()
    }

    fn is(values: &[f64]) -> InstantSet<f64> {
        InstantSet::make(values).unwrap()
    }

    #[test]
    fn test_contains_across_shapes() {
        let span = f(1.0, 10.0);
        let set = ss(&[f(1.0, 2.0), f(5.0, 6.0)]);
        let points = is(&[1.0, 5.5]);
        assert!(contains(&span, &3.0));
        assert!(contains(&span, &set));
        assert!(contains(&span, &points));
        assert!(contains(&set, &points));
        assert!(!contains(&set, &3.0));
        assert!(contains(&points, &5.5));
        assert!(!contains(&points, &f(1.0, 5.5)));
        assert!(contains(&3.0f64, &3.0f64));
        assert!(contained(&points, &set));
        assert!(contained(&set, &span));
    }

    #[test]
    fn test_point_set_contains_discrete_span() {
        // {1, 2} covers [1, 3) over the integers
        let points = InstantSet::make(&[1, 2]).unwrap();
        let span = Span::make(1, 2, true, true).unwrap();
        assert!(contains(&points, &span));
    }

    #[test]
    fn test_overlaps_across_shapes() {
        let set = ss(&[f(1.0, 2.0), f(5.0, 6.0)]);
        assert!(overlaps(&set, &is(&[3.0, 5.0])));
        assert!(!overlaps(&set, &is(&[3.0, 4.0])));
        assert!(overlaps(&is(&[3.0, 5.0]), &set));
        assert!(overlaps(&set, &f(2.0, 3.0)));
        assert!(!overlaps(&set, &fo(2.0, 5.0, false, false)));
        assert!(overlaps(&2.0f64, &2.0f64));
        assert!(!overlaps(&2.0f64, &3.0f64));
    }

    #[test]
    fn test_adjacent_across_shapes() {
        let span = fo(1.0, 5.0, true, false);
        assert!(adjacent(&span, &5.0));
        assert!(adjacent(&5.0, &span));
        assert!(adjacent(&span, &f(5.0, 10.0)));
        assert!(!adjacent(&f(1.0, 5.0), &f(5.0, 10.0)));
        let set = ss(&[f(1.0, 2.0), f(5.0, 6.0)]);
        assert!(!adjacent(&set, &fo(2.0, 5.0, false, false)));
        assert!(!adjacent(&fo(2.0, 5.0, false, false), &set));
        assert!(adjacent(&set, &fo(6.0, 7.0, false, true)));
        assert!(adjacent(&fo(0.0, 1.0, true, false), &set));
        assert!(!adjacent(&set, &is(&[3.0])));
        assert!(!adjacent(&set, &6.0));
        assert!(adjacent(&3i32, &4i32));
        // Integer sets touch only at their extremes
        let ints = InstantSet::make(&[1, 5]).unwrap();
        assert!(adjacent(&ints, &6i32));
        assert!(adjacent(&0i32, &ints));
        assert!(!adjacent(&ints, &3i32));
        assert!(!adjacent(&ints, &InstantSet::make(&[2, 4]).unwrap()));
        assert!(!adjacent(&3.0f64, &4.0f64));
    }

    #[test]
    fn test_same_across_shapes() {
        assert!(same(&is(&[2.0]), &2.0));
        assert!(same(&f(2.0, 2.0), &2.0));
        assert!(same(&ss(&[f(1.0, 3.0)]), &f(1.0, 3.0)));
        assert!(!same(&ss(&[f(1.0, 2.0), f(4.0, 5.0)]), &f(1.0, 5.0)));
        let ints = InstantSet::make(&[1, 2, 3]).unwrap();
        assert!(same(&ints, &Span::make(1, 3, true, true).unwrap()));
    }

    #[test]
    fn test_positional_uses_bounding_spans() {
        let set = ss(&[f(1.0, 2.0), f(5.0, 6.0)]);
        assert!(before(&set, &7.0));
        assert!(!before(&set, &6.0));
        assert!(after(&is(&[8.0, 9.0]), &set));
        assert!(overbefore(&set, &f(0.0, 6.0)));
        assert!(!overbefore(&set, &fo(0.0, 6.0, true, false)));
        assert!(overafter(&set, &1.0));
    }

    #[test]
    fn test_distance_across_shapes() {
        let set = ss(&[f(1.0, 2.0), f(10.0, 11.0)]);
        assert_eq!(distance(&set, &13.0), 2.0);
        assert_eq!(distance(&13.0, &set), 2.0);
        // Values in an interior gap lie within the bounding span
        assert_eq!(distance(&set, &4.0), 0.0);
        assert_eq!(distance(&is(&[4.0, 5.0]), &set), 0.0);
        assert_eq!(distance(&is(&[3.0, 4.0]), &is(&[5.5])), 1.5);
        assert_eq!(distance(&is(&[3.0, 7.0]), &is(&[4.5])), 0.0);
        assert_eq!(distance(&f(0.0, 1.0), &f(3.0, 4.0)), 2.0);
        assert_eq!(distance(&set, &f(1.5, 3.0)), 0.0);
        assert_eq!(distance(&1i32, &Span::make(3, 5, true, true).unwrap()), 2);
        assert_eq!(distance_scalar(&set, &13.0).unwrap(), 2.0);
        assert_eq!(distance_scalar(&set, &4.0).unwrap(), 0.0);
    }

    #[test]
    fn test_distance_scalar_rejects_text() {
        let a = "a".to_string();
        let b = "b".to_string();
        assert!(matches!(distance_scalar(&a, &b), Err(Error::Unsupported(_))));
    }

    #[test]
    fn test_union_result_types() {
        let points: InstantSet<f64> = union(&1.0, &is(&[2.0]));
        assert_eq!(points.values(), &[1.0, 2.0]);
        let spans: SpanSet<f64> = union(&1.0, &f(1.0, 2.0));
        assert_eq!(spans, ss(&[f(1.0, 2.0)]));
        let spans = union(&f(1.0, 2.0), &is(&[4.0]));
        assert_eq!(spans, ss(&[f(1.0, 2.0), f(4.0, 4.0)]));
        let spans = union(&ss(&[f(1.0, 2.0)]), &fo(2.0, 3.0, false, true));
        assert_eq!(spans, ss(&[f(1.0, 3.0)]));
    }

    #[test]
    fn test_intersection_result_types() {
        let set = ss(&[f(1.0, 2.0), f(5.0, 6.0)]);
        assert_eq!(intersection(&1.5, &set), Some(1.5));
        assert_eq!(intersection(&set, &3.0), None);
        assert_eq!(
            intersection(&is(&[1.0, 3.0, 5.0]), &set).unwrap().values(),
            &[1.0, 5.0]
        );
        assert_eq!(
            intersection(&set, &is(&[1.0, 3.0])).unwrap().values(),
            &[1.0]
        );
        assert_eq!(intersection(&f(0.0, 1.5), &set), Some(ss(&[f(1.0, 1.5)])));
        assert_eq!(intersection(&f(0.0, 1.0), &f(2.0, 3.0)), None);
        assert_eq!(intersection(&2.0f64, &2.0f64), Some(2.0));
    }

    #[test]
    fn test_minus_result_types() {
        let set = ss(&[f(1.0, 2.0), f(5.0, 6.0)]);
        assert_eq!(minus(&3.0, &set), Some(3.0));
        assert_eq!(minus(&1.0, &set), None);
        assert_eq!(minus(&is(&[1.0, 3.0]), &set).unwrap().values(), &[3.0]);
        assert_eq!(
            minus(&set, &is(&[5.0])),
            Some(ss(&[f(1.0, 2.0), fo(5.0, 6.0, false, true)]))
        );
        assert_eq!(
            minus(&f(0.0, 10.0), &set),
            Some(ss(&[
                fo(0.0, 1.0, true, false),
                fo(2.0, 5.0, false, false),
                fo(6.0, 10.0, false, true)
            ]))
        );
        assert_eq!(minus(&f(0.0, 1.0), &f(0.0, 1.0)), None);
    }

    #[test]
    fn test_time_shapes() {
        let t = |h| Timestamp::from_ymd_hms(2024, 3, 1, h, 0, 0).unwrap();
        let period = Span::make(t(8), t(12), true, false).unwrap();
        let instants = InstantSet::make(&[t(9), t(12)]).unwrap();
        assert!(overlaps(&period, &instants));
        assert!(!contains(&period, &instants));
        assert!(adjacent(&period, &t(12)));
        assert_eq!(minus(&instants, &period).unwrap().values(), &[t(12)]);
    }
}
