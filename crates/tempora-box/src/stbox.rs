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

//! # Space-Time Boxes
//!
//! An [`STBox`] summarizes a temporal point by its spatial extent and the
//! period it is defined on. Both dimensions are optional but at least one is
//! present. Spatial operators require matching SRIDs and the same geodetic
//! flag; geodetic boxes are compared on their raw coordinates.

use crate::error::{BoxError, Dimension};
use crate::instant::Point;
use crate::tbox::{cmp_option, expand_option, widen_period};
use chrono::TimeDelta;
use std::cmp::Ordering;
use std::fmt::Display;
use tempora_core::BaseValue;
use tempora_core::text::TextOptions;
use tempora_core::time::Timestamp;
use tempora_span::span::Span;

/// A closed axis-aligned spatial extent, optionally with a z range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent {
    xmin: f64,
    xmax: f64,
    ymin: f64,
    ymax: f64,
    z: Option<(f64, f64)>,
}

impl Extent {
    /// Creates a 2D extent.
    ///
    /// # Errors
    ///
    /// `BoxError::InvalidBounds` if a minimum exceeds its maximum or a
    /// coordinate is NaN.
    pub fn new(xmin: f64, xmax: f64, ymin: f64, ymax: f64) -> Result<Self, BoxError> {
        check_axis(xmin, xmax)?;
        check_axis(ymin, ymax)?;
        Ok(Self {
            xmin,
            xmax,
            ymin,
            ymax,
            z: None,
        })
    }

    /// Adds a z range to the extent.
    ///
    /// # Errors
    ///
    /// `BoxError::InvalidBounds` if `zmin` exceeds `zmax` or either is NaN.
    pub fn with_z(self, zmin: f64, zmax: f64) -> Result<Self, BoxError> {
        check_axis(zmin, zmax)?;
        Ok(Self {
            z: Some((zmin, zmax)),
            ..self
        })
    }

    /// The degenerate extent of a single point.
    #[inline]
    pub fn from_point(p: &Point) -> Self {
        Self {
            xmin: p.x,
            xmax: p.x,
            ymin: p.y,
            ymax: p.y,
            z: p.z.map(|z| (z, z)),
        }
    }

    #[inline]
    pub fn xmin(&self) -> f64 {
        self.xmin
    }

    #[inline]
    pub fn xmax(&self) -> f64 {
        self.xmax
    }

    #[inline]
    pub fn ymin(&self) -> f64 {
        self.ymin
    }

    #[inline]
    pub fn ymax(&self) -> f64 {
        self.ymax
    }

    #[inline]
    pub fn zmin(&self) -> Option<f64> {
        self.z.map(|(lo, _)| lo)
    }

    #[inline]
    pub fn zmax(&self) -> Option<f64> {
        self.z.map(|(_, hi)| hi)
    }

    #[inline]
    pub fn has_z(&self) -> bool {
        self.z.is_some()
    }

    /// The smallest extent covering both. The z range is kept only if both
    /// extents have one.
    pub fn expand(&self, other: &Self) -> Self {
        Self {
            xmin: self.xmin.min(other.xmin),
            xmax: self.xmax.max(other.xmax),
            ymin: self.ymin.min(other.ymin),
            ymax: self.ymax.max(other.ymax),
            z: self
                .z
                .zip(other.z)
                .map(|((a0, a1), (b0, b1))| (a0.min(b0), a1.max(b1))),
        }
    }

    /// The common part of both extents, `None` if they are disjoint.
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        let x = intersect_axis((self.xmin, self.xmax), (other.xmin, other.xmax))?;
        let y = intersect_axis((self.ymin, self.ymax), (other.ymin, other.ymax))?;
        let z = match self.z.zip(other.z) {
            Some((a, b)) => Some(intersect_axis(a, b)?),
            None => None,
        };
        Some(Self {
            xmin: x.0,
            xmax: x.1,
            ymin: y.0,
            ymax: y.1,
            z,
        })
    }

    /// Pairs of `(self, other)` ranges on x, y and, if both have one, z.
    fn axes(&self, other: &Self) -> impl Iterator<Item = ((f64, f64), (f64, f64))> {
        [
            ((self.xmin, self.xmax), (other.xmin, other.xmax)),
            ((self.ymin, self.ymax), (other.ymin, other.ymax)),
        ]
        .into_iter()
        .chain(self.z.zip(other.z))
    }

    /// Orders 2D extents before 3D ones, then by minima and maxima.
    fn cmp(&self, other: &Self) -> Ordering {
        let ord = self.has_z().cmp(&other.has_z());
        if ord != Ordering::Equal {
            return ord;
        }
        let mins = [self.xmin, self.ymin, self.zmin().unwrap_or(0.0)];
        let other_mins = [other.xmin, other.ymin, other.zmin().unwrap_or(0.0)];
        let maxs = [self.xmax, self.ymax, self.zmax().unwrap_or(0.0)];
        let other_maxs = [other.xmax, other.ymax, other.zmax().unwrap_or(0.0)];
        mins.iter()
            .zip(other_mins.iter())
            .chain(maxs.iter().zip(other_maxs.iter()))
            .map(|(a, b)| a.total_cmp(b))
            .find(|o| *o != Ordering::Equal)
            .unwrap_or(Ordering::Equal)
    }

    fn to_text(&self, options: &TextOptions) -> String {
        let coord = |v: f64| v.format(options);
        match self.z {
            Some((zmin, zmax)) => format!(
                "(({},{},{}),({},{},{}))",
                coord(self.xmin),
                coord(self.ymin),
                coord(zmin),
                coord(self.xmax),
                coord(self.ymax),
                coord(zmax)
            ),
            None => format!(
                "(({},{}),({},{}))",
                coord(self.xmin),
                coord(self.ymin),
                coord(self.xmax),
                coord(self.ymax)
            ),
        }
    }
}

#[inline]
fn check_axis(min: f64, max: f64) -> Result<(), BoxError> {
    if min.is_nan() || max.is_nan() {
        return Err(BoxError::InvalidBounds("coordinate is NaN"));
    }
    if min > max {
        return Err(BoxError::InvalidBounds("minimum exceeds maximum"));
    }
    Ok(())
}

#[inline]
fn intersect_axis(a: (f64, f64), b: (f64, f64)) -> Option<(f64, f64)> {
    let lo = a.0.max(b.0);
    let hi = a.1.min(b.1);
    (lo <= hi).then_some((lo, hi))
}

#[inline]
fn axis_overlaps(a: (f64, f64), b: (f64, f64)) -> bool {
    a.0 <= b.1 && b.0 <= a.1
}

#[inline]
fn axis_touches(a: (f64, f64), b: (f64, f64)) -> bool {
    a.1 == b.0 || b.1 == a.0
}

/// A box over a spatial extent and a time span.
///
/// `PartialEq` compares fields exactly; [`STBox::cmp`] orders coordinates by
/// their IEEE total order, so the two may disagree on `-0.0` against `0.0`.
#[derive(Debug, Clone, PartialEq)]
pub struct STBox {
    extent: Option<Extent>,
    period: Option<Span<Timestamp>>,
    geodetic: bool,
    srid: i32,
}

impl STBox {
    /// Creates a planar box with SRID 0.
    ///
    /// # Errors
    ///
    /// `BoxError::NoDimension` if both dimensions are absent.
    pub fn new(extent: Option<Extent>, period: Option<Span<Timestamp>>) -> Result<Self, BoxError> {
        if extent.is_none() && period.is_none() {
            return Err(BoxError::NoDimension);
        }
        Ok(Self {
            extent,
            period,
            geodetic: false,
            srid: 0,
        })
    }

    /// Sets the spatial reference system.
    #[inline]
    pub fn with_srid(mut self, srid: i32) -> Self {
        self.srid = srid;
        self
    }

    /// Sets the geodetic flag.
    #[inline]
    pub fn with_geodetic(mut self, geodetic: bool) -> Self {
        self.geodetic = geodetic;
        self
    }

    /// The degenerate box of a point at an instant.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use tempora_box::instant::Point;
    /// # use tempora_box::stbox::STBox;
    /// # use tempora_core::time::Timestamp;
    ///
    /// let t = Timestamp::from_ymd_hms(2001, 1, 1, 0, 0, 0).unwrap();
    /// let b = STBox::from_instant(&Point::new(1.0, 2.0), t).with_srid(4326);
    /// assert_eq!(
    ///     b.to_string(),
    ///     "SRID=4326;STBOX XT(((1,2),(1,2)),[2001-01-01 00:00:00+00, 2001-01-01 00:00:00+00])"
    /// );
    /// ```
    pub fn from_instant(point: &Point, t: Timestamp) -> Self {
        Self {
            extent: Some(Extent::from_point(point)),
            period: Some(Span::point(t)),
            geodetic: false,
            srid: 0,
        }
    }

    /// A planar box with only a spatial extent.
    #[inline]
    pub fn from_extent(extent: Extent) -> Self {
        Self {
            extent: Some(extent),
            period: None,
            geodetic: false,
            srid: 0,
        }
    }

    /// A box with only a period.
    #[inline]
    pub fn from_period(period: Span<Timestamp>) -> Self {
        Self {
            extent: None,
            period: Some(period),
            geodetic: false,
            srid: 0,
        }
    }

    #[inline]
    pub fn extent(&self) -> Option<&Extent> {
        self.extent.as_ref()
    }

    #[inline]
    pub fn period(&self) -> Option<&Span<Timestamp>> {
        self.period.as_ref()
    }

    #[inline]
    pub fn srid(&self) -> i32 {
        self.srid
    }

    #[inline]
    pub fn is_geodetic(&self) -> bool {
        self.geodetic
    }

    #[inline]
    pub fn has_x(&self) -> bool {
        self.extent.is_some()
    }

    #[inline]
    pub fn has_z(&self) -> bool {
        self.extent.is_some_and(|e| e.has_z())
    }

    #[inline]
    pub fn has_t(&self) -> bool {
        self.period.is_some()
    }

    /// Field-by-field equality.
    #[inline]
    pub fn eq_exact(&self, other: &Self) -> bool {
        self == other
    }

    fn check_compatible(&self, other: &Self) -> Result<(), BoxError> {
        if self.srid != other.srid {
            return Err(BoxError::SridMismatch {
                left: self.srid,
                right: other.srid,
            });
        }
        if self.geodetic != other.geodetic {
            return Err(BoxError::GeodeticMismatch);
        }
        Ok(())
    }

    /// Returns the smallest box containing both boxes.
    ///
    /// # Errors
    ///
    /// SRID or geodetic mismatches, and `BoxError::DimensionMismatch` when
    /// only one of the extents has a z range.
    pub fn expand(&self, other: &Self) -> Result<Self, BoxError> {
        self.check_compatible(other)?;
        let extent = match (&self.extent, &other.extent) {
            (Some(a), Some(b)) => {
                if a.has_z() != b.has_z() {
                    return Err(BoxError::DimensionMismatch);
                }
                Some(a.expand(b))
            }
            (Some(e), None) | (None, Some(e)) => Some(*e),
            (None, None) => None,
        };
        Ok(Self {
            extent,
            period: expand_option(&self.period, &other.period),
            geodetic: self.geodetic,
            srid: self.srid,
        })
    }

    /// Orders boxes by SRID, period, minimum then maximum coordinates, and
    /// finally by their flags.
    pub fn cmp(&self, other: &Self) -> Ordering {
        let ord = self.srid.cmp(&other.srid);
        if ord != Ordering::Equal {
            return ord;
        }
        if self.has_t() && other.has_t() {
            let ord = cmp_option(&self.period, &other.period);
            if ord != Ordering::Equal {
                return ord;
            }
        }
        if let (Some(a), Some(b)) = (&self.extent, &other.extent) {
            let ord = a.cmp(b);
            if ord != Ordering::Equal {
                return ord;
            }
        }
        let flags = |b: &Self| (b.has_x(), b.has_z(), b.has_t(), b.geodetic);
        flags(self).cmp(&flags(other))
    }

    /// Checks compatibility and returns which of space and time both boxes have.
    fn common(&self, other: &Self) -> Result<(bool, bool), BoxError> {
        self.check_compatible(other)?;
        let hasx = self.has_x() && other.has_x();
        let hast = self.has_t() && other.has_t();
        if !hasx && !hast {
            return Err(BoxError::NoCommonDimension);
        }
        Ok((hasx, hast))
    }

    fn all_common(
        &self,
        other: &Self,
        axis: impl Fn((f64, f64), (f64, f64)) -> bool,
        t: impl FnOnce(&Span<Timestamp>, &Span<Timestamp>) -> bool,
    ) -> Result<bool, BoxError> {
        self.common(other)?;
        let space_ok = match (&self.extent, &other.extent) {
            (Some(a), Some(b)) => a.axes(b).all(|(p, q)| axis(p, q)),
            _ => true,
        };
        let time_ok = match (&self.period, &other.period) {
            (Some(a), Some(b)) => t(a, b),
            _ => true,
        };
        Ok(space_ok && time_ok)
    }

    /// Returns `true` if `self` contains `other` on every common dimension.
    ///
    /// # Errors
    ///
    /// SRID or geodetic mismatches, or `BoxError::NoCommonDimension`.
    pub fn contains(&self, other: &Self) -> Result<bool, BoxError> {
        self.all_common(other, |a, b| a.0 <= b.0 && b.1 <= a.1, |a, b| a.contains(b))
    }

    /// Returns `true` if `other` contains `self` on every common dimension.
    ///
    /// # Errors
    ///
    /// SRID or geodetic mismatches, or `BoxError::NoCommonDimension`.
    #[inline]
    pub fn contained(&self, other: &Self) -> Result<bool, BoxError> {
        other.contains(self)
    }

    /// Returns `true` if the boxes intersect on every common dimension.
    ///
    /// # Errors
    ///
    /// SRID or geodetic mismatches, or `BoxError::NoCommonDimension`.
    pub fn overlaps(&self, other: &Self) -> Result<bool, BoxError> {
        self.all_common(other, axis_overlaps, |a, b| a.overlaps(b))
    }

    /// Returns `true` if the boxes are equal on every common dimension.
    ///
    /// # Errors
    ///
    /// SRID or geodetic mismatches, or `BoxError::NoCommonDimension`.
    pub fn same(&self, other: &Self) -> Result<bool, BoxError> {
        self.all_common(other, |a, b| a == b, |a, b| a.same(b))
    }

    /// Returns `true` if the boxes meet only along a boundary: they intersect
    /// or are adjacent on every common dimension and touch on at least one.
    ///
    /// # Errors
    ///
    /// SRID or geodetic mismatches, or `BoxError::NoCommonDimension`.
    pub fn adjacent(&self, other: &Self) -> Result<bool, BoxError> {
        let touching = self.all_common(other, axis_overlaps, |a, b| a.overlaps(b) || a.adjacent(b))?;
        let space_touch = match (&self.extent, &other.extent) {
            (Some(a), Some(b)) => a.axes(b).any(|(p, q)| axis_touches(p, q)),
            _ => false,
        };
        let time_touch = match (&self.period, &other.period) {
            (Some(a), Some(b)) => a.adjacent(b),
            _ => false,
        };
        Ok(touching && (space_touch || time_touch))
    }

    /// The ranges of both boxes along one spatial axis.
    fn axis_pair(
        &self,
        other: &Self,
        pick: impl Fn(&Extent) -> Option<(f64, f64)>,
        dim: Dimension,
    ) -> Result<((f64, f64), (f64, f64)), BoxError> {
        self.check_compatible(other)?;
        let a = self.extent.as_ref().and_then(&pick);
        let b = other.extent.as_ref().and_then(&pick);
        a.zip(b).ok_or(BoxError::MissingDimension(dim))
    }

    fn x_pair(&self, other: &Self) -> Result<((f64, f64), (f64, f64)), BoxError> {
        self.axis_pair(other, |e| Some((e.xmin, e.xmax)), Dimension::X)
    }

    fn y_pair(&self, other: &Self) -> Result<((f64, f64), (f64, f64)), BoxError> {
        self.axis_pair(other, |e| Some((e.ymin, e.ymax)), Dimension::X)
    }

    fn z_pair(&self, other: &Self) -> Result<((f64, f64), (f64, f64)), BoxError> {
        self.axis_pair(other, |e| e.z, Dimension::Z)
    }

    fn t_pair<'a>(
        &'a self,
        other: &'a Self,
    ) -> Result<(&'a Span<Timestamp>, &'a Span<Timestamp>), BoxError> {
        self.period
            .as_ref()
            .zip(other.period.as_ref())
            .ok_or(BoxError::MissingDimension(Dimension::T))
    }

    /// Strictly left of `other` on x.
    pub fn left(&self, other: &Self) -> Result<bool, BoxError> {
        self.x_pair(other).map(|(a, b)| a.1 < b.0)
    }

    /// Does not extend right of `other` on x.
    pub fn overleft(&self, other: &Self) -> Result<bool, BoxError> {
        self.x_pair(other).map(|(a, b)| a.1 <= b.1)
    }

    /// Strictly right of `other` on x.
    pub fn right(&self, other: &Self) -> Result<bool, BoxError> {
        self.x_pair(other).map(|(a, b)| a.0 > b.1)
    }

    /// Does not extend left of `other` on x.
    pub fn overright(&self, other: &Self) -> Result<bool, BoxError> {
        self.x_pair(other).map(|(a, b)| a.0 >= b.0)
    }

    /// Strictly below `other` on y.
    pub fn below(&self, other: &Self) -> Result<bool, BoxError> {
        self.y_pair(other).map(|(a, b)| a.1 < b.0)
    }

    /// Does not extend above `other` on y.
    pub fn overbelow(&self, other: &Self) -> Result<bool, BoxError> {
        self.y_pair(other).map(|(a, b)| a.1 <= b.1)
    }

    /// Strictly above `other` on y.
    pub fn above(&self, other: &Self) -> Result<bool, BoxError> {
        self.y_pair(other).map(|(a, b)| a.0 > b.1)
    }

    /// Does not extend below `other` on y.
    pub fn overabove(&self, other: &Self) -> Result<bool, BoxError> {
        self.y_pair(other).map(|(a, b)| a.0 >= b.0)
    }

    /// Strictly in front of `other` on z.
    pub fn front(&self, other: &Self) -> Result<bool, BoxError> {
        self.z_pair(other).map(|(a, b)| a.1 < b.0)
    }

    /// Does not extend behind `other` on z.
    pub fn overfront(&self, other: &Self) -> Result<bool, BoxError> {
        self.z_pair(other).map(|(a, b)| a.1 <= b.1)
    }

    /// Strictly behind `other` on z.
    pub fn back(&self, other: &Self) -> Result<bool, BoxError> {
        self.z_pair(other).map(|(a, b)| a.0 > b.1)
    }

    /// Does not extend in front of `other` on z.
    pub fn overback(&self, other: &Self) -> Result<bool, BoxError> {
        self.z_pair(other).map(|(a, b)| a.0 >= b.0)
    }

    /// Ends strictly before `other` begins.
    pub fn before(&self, other: &Self) -> Result<bool, BoxError> {
        self.t_pair(other).map(|(a, b)| a.before(b))
    }

    /// Does not end after `other`.
    pub fn overbefore(&self, other: &Self) -> Result<bool, BoxError> {
        self.t_pair(other).map(|(a, b)| a.overbefore(b))
    }

    /// Begins strictly after `other` ends.
    pub fn after(&self, other: &Self) -> Result<bool, BoxError> {
        self.t_pair(other).map(|(a, b)| a.after(b))
    }

    /// Does not begin before `other`.
    pub fn overafter(&self, other: &Self) -> Result<bool, BoxError> {
        self.t_pair(other).map(|(a, b)| a.overafter(b))
    }

    /// Returns the box covering both boxes.
    ///
    /// # Errors
    ///
    /// `BoxError::DimensionMismatch` for boxes with different dimensions,
    /// `BoxError::NotContiguous` for disjoint boxes, and compatibility errors.
    pub fn union(&self, other: &Self) -> Result<Self, BoxError> {
        if self.has_x() != other.has_x() || self.has_z() != other.has_z() || self.has_t() != other.has_t() {
            return Err(BoxError::DimensionMismatch);
        }
        if !self.overlaps(other)? {
            return Err(BoxError::NotContiguous);
        }
        self.expand(other)
    }

    /// Returns the common part on the shared dimensions, `None` if the boxes
    /// are incompatible, share no dimension, or are disjoint.
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        let (hasx, hast) = self.common(other).ok()?;
        let extent = if hasx {
            Some(self.extent.as_ref()?.intersection(other.extent.as_ref()?)?)
        } else {
            None
        };
        let period = if hast {
            Some(self.period.as_ref()?.intersection(other.period.as_ref()?)?)
        } else {
            None
        };
        Some(Self {
            extent,
            period,
            geodetic: self.geodetic,
            srid: self.srid,
        })
    }

    /// Widens every spatial axis by `delta` on both sides.
    ///
    /// # Errors
    ///
    /// `BoxError::MissingDimension` without an extent, or
    /// `BoxError::InvalidBounds` if a negative `delta` would invert an axis.
    pub fn expand_space(&self, delta: f64) -> Result<Self, BoxError> {
        let e = self.extent.as_ref().ok_or(BoxError::MissingDimension(Dimension::X))?;
        let mut widened = Extent::new(e.xmin - delta, e.xmax + delta, e.ymin - delta, e.ymax + delta)?;
        if let Some((zmin, zmax)) = e.z {
            widened = widened.with_z(zmin - delta, zmax + delta)?;
        }
        Ok(Self {
            extent: Some(widened),
            ..self.clone()
        })
    }

    /// Widens the period by `delta` on both sides.
    ///
    /// # Errors
    ///
    /// `BoxError::MissingDimension` without a period, or an invalid span.
    pub fn expand_time(&self, delta: TimeDelta) -> Result<Self, BoxError> {
        let period = self.period.as_ref().ok_or(BoxError::MissingDimension(Dimension::T))?;
        Ok(Self {
            period: Some(widen_period(period, delta)?),
            ..self.clone()
        })
    }

    /// Formats the box as `[SRID=n;]STBOX|GEODSTBOX dims(...)`.
    pub fn to_text(&self, options: &TextOptions) -> String {
        let mut out = String::new();
        if self.srid != 0 {
            out.push_str(&format!("SRID={};", self.srid));
        }
        out.push_str(if self.geodetic { "GEODSTBOX " } else { "STBOX " });
        let dims = match (self.has_x(), self.has_z(), self.has_t()) {
            (true, true, true) => "ZT",
            (true, true, false) => "Z",
            (true, false, true) => "XT",
            (true, false, false) => "X",
            (false, _, _) => "T",
        };
        out.push_str(dims);
        out.push('(');
        match (&self.extent, &self.period) {
            (Some(e), Some(p)) => {
                out.push_str(&e.to_text(options));
                out.push(',');
                out.push_str(&p.to_text(options));
            }
            (Some(e), None) => out.push_str(&e.to_text(options)),
            (None, Some(p)) => out.push_str(&p.to_text(options)),
            (None, None) => {}
        }
        out.push(')');
        out
    }
}

impl Display for STBox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_text(&TextOptions::default()))
    }
}
