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

//! # Bounding-Box Composer
//!
//! Builds the bounding box of a temporal value one instant at a time. The
//! value's [`TemporalKind`] picks the box type once; every later instant must
//! be of the same kind. The composer moves through
//! `Empty -> Single -> Accumulating -> Final` and can be restarted.
//!
//! Number boxes need care at the ends of the value span. A minimum or maximum
//! reached strictly inside the sequence is always attained, so its bound is
//! inclusive. An extremum reached only at the first or last instant takes the
//! inclusivity of that end of the sequence. Under step interpolation a value
//! holds over the whole segment that follows it, so every value but the last
//! is attained in the interior.

use crate::error::BoxError;
use crate::instant::{Interpolation, TemporalInstant, TemporalKind};
use crate::stbox::{Extent, STBox};
use crate::tbox::TBox;
use std::cmp::Ordering;
use std::fmt::Display;
use tempora_core::text::TextOptions;
use tempora_core::time::Timestamp;
use tempora_span::span::Span;

/// The bounding box of a temporal value.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundingBox {
    /// The period of an alpha value.
    Period(Span<Timestamp>),
    /// The value-time box of a number.
    TBox(TBox),
    /// The space-time box of a point.
    STBox(STBox),
}

impl BoundingBox {
    /// The temporal kind this box summarizes.
    #[inline]
    pub fn kind(&self) -> TemporalKind {
        match self {
            Self::Period(_) => TemporalKind::Alpha,
            Self::TBox(_) => TemporalKind::Number,
            Self::STBox(_) => TemporalKind::Spatial,
        }
    }

    /// The time extent of the box.
    #[inline]
    pub fn period(&self) -> Option<&Span<Timestamp>> {
        match self {
            Self::Period(p) => Some(p),
            Self::TBox(b) => b.period(),
            Self::STBox(b) => b.period(),
        }
    }

    /// Returns the smallest box containing both boxes.
    ///
    /// # Errors
    ///
    /// `BoxError::KindMismatch` for boxes of different kinds, and any
    /// compatibility error of the spatial boxes.
    pub fn expand(&self, other: &Self) -> Result<Self, BoxError> {
        match (self, other) {
            (Self::Period(a), Self::Period(b)) => Ok(Self::Period(a.expand(b))),
            (Self::TBox(a), Self::TBox(b)) => Ok(Self::TBox(a.expand(b))),
            (Self::STBox(a), Self::STBox(b)) => Ok(Self::STBox(a.expand(b)?)),
            _ => Err(BoxError::KindMismatch {
                expected: self.kind(),
                found: other.kind(),
            }),
        }
    }

    /// Orders boxes by kind, then by the ordering of the box type.
    pub fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Period(a), Self::Period(b)) => a.cmp(b),
            (Self::TBox(a), Self::TBox(b)) => a.cmp(b),
            (Self::STBox(a), Self::STBox(b)) => a.cmp(b),
            _ => kind_rank(self.kind()).cmp(&kind_rank(other.kind())),
        }
    }

    /// Returns `true` if the boxes compare equal.
    ///
    /// Spatial boxes are compared with [`STBox::cmp`] rather than field
    /// equality.
    #[inline]
    pub fn same(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }

    /// Formats the box with the given options.
    pub fn to_text(&self, options: &TextOptions) -> String {
        match self {
            Self::Period(p) => p.to_text(options),
            Self::TBox(b) => b.to_text(options),
            Self::STBox(b) => b.to_text(options),
        }
    }
}

#[inline]
const fn kind_rank(kind: TemporalKind) -> u8 {
    match kind {
        TemporalKind::Alpha => 0,
        TemporalKind::Number => 1,
        TemporalKind::Spatial => 2,
    }
}

impl Display for BoundingBox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_text(&TextOptions::default()))
    }
}

impl From<Span<Timestamp>> for BoundingBox {
    #[inline]
    fn from(value: Span<Timestamp>) -> Self {
        Self::Period(value)
    }
}

impl From<TBox> for BoundingBox {
    #[inline]
    fn from(value: TBox) -> Self {
        Self::TBox(value)
    }
}

impl From<STBox> for BoundingBox {
    #[inline]
    fn from(value: STBox) -> Self {
        Self::STBox(value)
    }
}

/// The lifecycle state of a [`BoxComposer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComposerState {
    /// No instant yet.
    Empty,
    /// Exactly one instant.
    Single,
    /// Two or more instants.
    Accumulating,
    /// The box is frozen.
    Final,
}

impl Display for ComposerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "Empty"),
            Self::Single => write!(f, "Single"),
            Self::Accumulating => write!(f, "Accumulating"),
            Self::Final => write!(f, "Final"),
        }
    }
}

/// A running minimum or maximum of the value dimension.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Extremum {
    value: f64,
    interior: bool,
    at_first: bool,
    at_last: bool,
}

impl Extremum {
    #[inline]
    fn first(value: f64) -> Self {
        Self {
            value,
            interior: false,
            at_first: true,
            at_last: true,
        }
    }

    #[inline]
    fn inclusive(&self, lower_inc: bool, upper_inc: bool) -> bool {
        self.interior || (self.at_first && lower_inc) || (self.at_last && upper_inc)
    }

    /// The previous last instant now lies inside the sequence.
    #[inline]
    fn close_last(&mut self) {
        if self.at_last {
            self.at_last = false;
            self.interior = true;
        }
    }

    /// `value` is attained on the open segment after the previous instant.
    #[inline]
    fn attained_inside(&mut self, value: f64) {
        if value == self.value {
            self.interior = true;
        }
    }

    /// Folds in the value of a new last instant.
    #[inline]
    fn incorporate(&mut self, value: f64, better: impl Fn(f64, f64) -> bool) {
        if better(value, self.value) {
            *self = Self {
                value,
                interior: false,
                at_first: false,
                at_last: true,
            };
        } else if value == self.value {
            self.at_last = true;
        }
    }
}

/// Per-kind running state.
#[derive(Debug, Clone, PartialEq)]
enum Accumulator {
    Alpha,
    Number { min: Extremum, max: Extremum, prev: f64 },
    Spatial { extent: Extent },
}

/// Incrementally builds the bounding box of a sequence of instants.
///
/// # Examples
///
/// ```rust
/// # use tempora_box::composer::{BoxComposer, ComposerState};
/// # use tempora_box::instant::{InstantValue, Interpolation, TemporalInstant};
/// # use tempora_core::time::Timestamp;
///
/// let t = |h| Timestamp::from_ymd_hms(2001, 1, 1, h, 0, 0).unwrap();
/// let mut composer = BoxComposer::new(Interpolation::Linear);
/// composer.push(&TemporalInstant::new(InstantValue::Float(3.0), t(1))).unwrap();
/// composer.push(&TemporalInstant::new(InstantValue::Float(1.0), t(2))).unwrap();
/// composer.push(&TemporalInstant::new(InstantValue::Float(5.0), t(3))).unwrap();
/// assert_eq!(composer.state(), ComposerState::Accumulating);
///
/// let bbox = composer.finish(false, false).unwrap();
/// assert_eq!(
///     bbox.to_string(),
///     "TBOX XT([1, 5), (2001-01-01 01:00:00+00, 2001-01-01 03:00:00+00))"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct BoxComposer {
    interpolation: Interpolation,
    srid: i32,
    geodetic: bool,
    state: ComposerState,
    kind: Option<TemporalKind>,
    acc: Option<Accumulator>,
    first_t: Option<Timestamp>,
    last_t: Option<Timestamp>,
    result: Option<BoundingBox>,
}

impl BoxComposer {
    /// Creates an empty composer for sequences with the given interpolation.
    pub fn new(interpolation: Interpolation) -> Self {
        Self {
            interpolation,
            srid: 0,
            geodetic: false,
            state: ComposerState::Empty,
            kind: None,
            acc: None,
            first_t: None,
            last_t: None,
            result: None,
        }
    }

    /// Sets the SRID stamped on spatial boxes.
    #[inline]
    pub fn srid(mut self, srid: i32) -> Self {
        self.srid = srid;
        self
    }

    /// Marks spatial boxes as geodetic.
    #[inline]
    pub fn geodetic(mut self, geodetic: bool) -> Self {
        self.geodetic = geodetic;
        self
    }

    /// The current lifecycle state.
    #[inline]
    pub fn state(&self) -> ComposerState {
        self.state
    }

    /// The interpolation the instants are read with.
    #[inline]
    pub fn interpolation(&self) -> Interpolation {
        self.interpolation
    }

    /// The kind fixed by the first instant.
    #[inline]
    pub fn kind(&self) -> Option<TemporalKind> {
        self.kind
    }

    /// Folds one instant into the box.
    ///
    /// # Errors
    ///
    /// - `BoxError::Finalized` after [`finish`](Self::finish).
    /// - `BoxError::KindMismatch` if the value kind differs from the first instant.
    /// - `BoxError::NotIncreasing` if `instant.t` does not follow the previous instant.
    /// - `BoxError::DimensionMismatch` when mixing 2D and 3D points.
    pub fn push(&mut self, instant: &TemporalInstant) -> Result<(), BoxError> {
        if self.state == ComposerState::Final {
            return Err(BoxError::Finalized);
        }
        let kind = instant.kind();
        if let Some(expected) = self.kind.filter(|k| *k != kind) {
            return Err(BoxError::KindMismatch {
                expected,
                found: kind,
            });
        }
        if self.last_t.is_some_and(|last| instant.t <= last) {
            return Err(BoxError::NotIncreasing);
        }

        let acc = match self.acc.take() {
            None => Self::start(instant)?,
            Some(acc) => match self.fold(acc.clone(), instant) {
                Ok(next) => next,
                Err(e) => {
                    self.acc = Some(acc);
                    return Err(e);
                }
            },
        };
        self.acc = Some(acc);
        self.kind = Some(kind);
        self.first_t.get_or_insert(instant.t);
        self.last_t = Some(instant.t);

        let next = match self.state {
            ComposerState::Empty => ComposerState::Single,
            _ => ComposerState::Accumulating,
        };
        if next != self.state {
            log::debug!("box composer: {} -> {} ({})", self.state, next, kind);
            self.state = next;
        }
        Ok(())
    }

    fn start(instant: &TemporalInstant) -> Result<Accumulator, BoxError> {
        Ok(match instant.kind() {
            TemporalKind::Alpha => Accumulator::Alpha,
            TemporalKind::Number => {
                let v = number(instant)?;
                Accumulator::Number {
                    min: Extremum::first(v),
                    max: Extremum::first(v),
                    prev: v,
                }
            }
            TemporalKind::Spatial => Accumulator::Spatial {
                extent: Extent::from_point(point(instant)?),
            },
        })
    }

    fn fold(&self, acc: Accumulator, instant: &TemporalInstant) -> Result<Accumulator, BoxError> {
        Ok(match acc {
            Accumulator::Alpha => Accumulator::Alpha,
            Accumulator::Number {
                mut min,
                mut max,
                prev,
            } => {
                let v = number(instant)?;
                // The previous instant was last; unless it was also first it
                // is now inside the sequence.
                if self.state == ComposerState::Accumulating {
                    min.close_last();
                    max.close_last();
                } else {
                    min.at_last = false;
                    max.at_last = false;
                }
                let holds = match self.interpolation {
                    Interpolation::Discrete => false,
                    Interpolation::Step => true,
                    Interpolation::Linear => prev == v,
                };
                if holds {
                    min.attained_inside(prev);
                    max.attained_inside(prev);
                }
                min.incorporate(v, |a, b| a < b);
                max.incorporate(v, |a, b| a > b);
                Accumulator::Number { min, max, prev: v }
            }
            Accumulator::Spatial { extent } => {
                let next = Extent::from_point(point(instant)?);
                if next.has_z() != extent.has_z() {
                    return Err(BoxError::DimensionMismatch);
                }
                Accumulator::Spatial {
                    extent: extent.expand(&next),
                }
            }
        })
    }

    fn build(&self, lower_inc: bool, upper_inc: bool) -> Result<BoundingBox, BoxError> {
        let (Some(acc), Some(first), Some(last)) = (&self.acc, self.first_t, self.last_t) else {
            return Err(BoxError::Empty);
        };
        let period = Span::make(first, last, lower_inc, upper_inc)?;
        Ok(match acc {
            Accumulator::Alpha => BoundingBox::Period(period),
            Accumulator::Number { min, max, .. } => {
                let span = Span::make(
                    min.value,
                    max.value,
                    min.inclusive(lower_inc, upper_inc),
                    max.inclusive(lower_inc, upper_inc),
                )?;
                BoundingBox::TBox(TBox::new(Some(span), Some(period))?)
            }
            Accumulator::Spatial { extent } => BoundingBox::STBox(
                STBox::new(Some(*extent), Some(period))?
                    .with_srid(self.srid)
                    .with_geodetic(self.geodetic),
            ),
        })
    }

    /// The box of the instants pushed so far, taking both ends as inclusive.
    /// After [`finish`](Self::finish) this is the final box.
    pub fn current(&self) -> Option<BoundingBox> {
        match &self.result {
            Some(b) => Some(b.clone()),
            None => self.build(true, true).ok(),
        }
    }

    /// Freezes the box with the sequence's edge inclusivity.
    ///
    /// # Errors
    ///
    /// - `BoxError::Empty` without instants.
    /// - `BoxError::InvalidBounds` if a single instant or a discrete sequence
    ///   is given an exclusive end.
    /// - `BoxError::Finalized` if already frozen.
    pub fn finish(&mut self, lower_inc: bool, upper_inc: bool) -> Result<&BoundingBox, BoxError> {
        match self.state {
            ComposerState::Final => return Err(BoxError::Finalized),
            ComposerState::Empty => return Err(BoxError::Empty),
            ComposerState::Single if !(lower_inc && upper_inc) => {
                return Err(BoxError::InvalidBounds("a single instant must have inclusive bounds"));
            }
            _ => {}
        }
        if self.interpolation == Interpolation::Discrete && !(lower_inc && upper_inc) {
            return Err(BoxError::InvalidBounds("discrete sequences must have inclusive bounds"));
        }
        let bbox = self.build(lower_inc, upper_inc)?;
        log::debug!("box composer: {} -> {}", self.state, ComposerState::Final);
        self.state = ComposerState::Final;
        Ok(self.result.insert(bbox))
    }

    /// The frozen box, if [`finish`](Self::finish) succeeded.
    #[inline]
    pub fn bounding_box(&self) -> Option<&BoundingBox> {
        self.result.as_ref()
    }

    /// Discards all state, keeping interpolation, SRID and geodetic flag.
    pub fn restart(&mut self) {
        log::debug!("box composer: {} -> {}", self.state, ComposerState::Empty);
        self.state = ComposerState::Empty;
        self.kind = None;
        self.acc = None;
        self.first_t = None;
        self.last_t = None;
        self.result = None;
    }

    /// Rebuilds the box from scratch over `instants`.
    ///
    /// # Errors
    ///
    /// Any error of [`push`](Self::push) or [`finish`](Self::finish).
    pub fn recompute(
        &mut self,
        instants: &[TemporalInstant],
        lower_inc: bool,
        upper_inc: bool,
    ) -> Result<&BoundingBox, BoxError> {
        self.restart();
        for instant in instants {
            self.push(instant)?;
        }
        self.finish(lower_inc, upper_inc)
    }
}

#[inline]
fn number(instant: &TemporalInstant) -> Result<f64, BoxError> {
    instant.value.as_f64().ok_or(BoxError::KindMismatch {
        expected: TemporalKind::Number,
        found: instant.kind(),
    })
}

#[inline]
fn point(instant: &TemporalInstant) -> Result<&crate::instant::Point, BoxError> {
    instant.value.as_point().ok_or(BoxError::KindMismatch {
        expected: TemporalKind::Spatial,
        found: instant.kind(),
    })
}

/// The box of a single instant.
///
/// # Examples
///
/// ```rust
/// # use tempora_box::composer::instant_box;
/// # use tempora_box::instant::{InstantValue, TemporalInstant};
/// # use tempora_core::time::Timestamp;
///
/// let t = Timestamp::from_ymd_hms(2001, 1, 1, 0, 0, 0).unwrap();
/// let b = instant_box(&TemporalInstant::new(InstantValue::Bool(true), t));
/// assert_eq!(b.to_string(), "[2001-01-01 00:00:00+00, 2001-01-01 00:00:00+00]");
/// ```
pub fn instant_box(instant: &TemporalInstant) -> BoundingBox {
    match (instant.value.as_f64(), instant.value.as_point()) {
        (Some(v), _) => BoundingBox::TBox(TBox::from_instant(v, instant.t)),
        (None, Some(p)) => BoundingBox::STBox(STBox::from_instant(p, instant.t)),
        (None, None) => BoundingBox::Period(Span::point(instant.t)),
    }
}

/// The box of a set of instants.
///
/// # Errors
///
/// `BoxError::Empty` for no instants, and any [`BoxComposer::push`] error.
pub fn instant_set_box(instants: &[TemporalInstant]) -> Result<BoundingBox, BoxError> {
    sequence_box(instants, true, true, Interpolation::Discrete)
}

/// The box of a sequence with the given edge inclusivity and interpolation.
///
/// # Errors
///
/// Any [`BoxComposer::push`] or [`BoxComposer::finish`] error.
pub fn sequence_box(
    instants: &[TemporalInstant],
    lower_inc: bool,
    upper_inc: bool,
    interpolation: Interpolation,
) -> Result<BoundingBox, BoxError> {
    let mut composer = BoxComposer::new(interpolation);
    composer.recompute(instants, lower_inc, upper_inc).cloned()
}

/// The box of a sequence set, folded from the boxes of its sequences.
///
/// # Errors
///
/// `BoxError::Empty` for no boxes, or a [`BoundingBox::expand`] error.
pub fn sequence_set_box(boxes: &[BoundingBox]) -> Result<BoundingBox, BoxError> {
    let (first, rest) = boxes.split_first().ok_or(BoxError::Empty)?;
    rest.iter().try_fold(first.clone(), |acc, b| acc.expand(b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instant::{InstantValue, Point};

    fn t(hour: u32) -> Timestamp {
        Timestamp::from_ymd_hms(2001, 1, 1, hour, 0, 0).unwrap()
    }

    fn floats(values: &[f64]) -> Vec<TemporalInstant> {
        values
            .iter()
            .enumerate()
            .map(|(i, v)| TemporalInstant::new(InstantValue::Float(*v), t(i as u32 + 1)))
            .collect()
    }

    fn value_span(bbox: &BoundingBox) -> Span<f64> {
        match bbox {
            BoundingBox::TBox(b) => b.span().cloned().unwrap(),
            other => panic!("expected a TBox, got {:?}", other),
        }
    }

    #[test]
    fn test_state_transitions() {
        let mut c = BoxComposer::new(Interpolation::Linear);
        assert_eq!(c.state(), ComposerState::Empty);
        assert_eq!(c.current(), None);
        let instants = floats(&[1.0, 2.0]);
        c.push(&instants[0]).unwrap();
        assert_eq!(c.state(), ComposerState::Single);
        c.push(&instants[1]).unwrap();
        assert_eq!(c.state(), ComposerState::Accumulating);
        c.finish(true, true).unwrap();
        assert_eq!(c.state(), ComposerState::Final);
        assert_eq!(c.push(&instants[0]), Err(BoxError::Finalized));
        assert!(c.bounding_box().is_some());
        c.restart();
        assert_eq!(c.state(), ComposerState::Empty);
        assert!(c.bounding_box().is_none());
    }

    #[test]
    fn test_interior_extrema_are_inclusive() {
        // Interior minimum 1, maximum 5 reached only at the open upper end.
        let bbox = sequence_box(&floats(&[3.0, 1.0, 5.0]), false, false, Interpolation::Linear).unwrap();
        let span = value_span(&bbox);
        assert_eq!((*span.lower(), *span.upper()), (1.0, 5.0));
        assert!(span.lower_inc());
        assert!(!span.upper_inc());

        // Maximum 5 in the middle, minimum 1 only at the open lower end.
        let bbox = sequence_box(&floats(&[1.0, 5.0, 3.0]), false, false, Interpolation::Linear).unwrap();
        let span = value_span(&bbox);
        assert!(!span.lower_inc());
        assert!(span.upper_inc());

        // The same extremum at both ends, only the upper end open.
        let bbox = sequence_box(&floats(&[1.0, 3.0, 1.0]), true, false, Interpolation::Linear).unwrap();
        let span = value_span(&bbox);
        assert!(span.lower_inc());
        assert!(span.upper_inc());
    }

    #[test]
    fn test_step_attains_first_value() {
        let instants = floats(&[5.0, 1.0, 3.0]);
        let linear = value_span(&sequence_box(&instants, false, true, Interpolation::Linear).unwrap());
        assert!(!linear.upper_inc());
        let step = value_span(&sequence_box(&instants, false, true, Interpolation::Step).unwrap());
        assert!(step.upper_inc());
        assert!(step.lower_inc());
    }

    #[test]
    fn test_constant_sequence_with_open_ends() {
        let bbox = sequence_box(&floats(&[2.0, 2.0]), false, false, Interpolation::Linear).unwrap();
        let span = value_span(&bbox);
        assert!(span.is_point());
    }

    #[test]
    fn test_invalid_bounds() {
        let one = floats(&[1.0]);
        assert!(matches!(
            sequence_box(&one, false, true, Interpolation::Linear),
            Err(BoxError::InvalidBounds(_))
        ));
        assert!(matches!(
            sequence_box(&floats(&[1.0, 2.0]), true, false, Interpolation::Discrete),
            Err(BoxError::InvalidBounds(_))
        ));
        assert_eq!(
            sequence_box(&[], true, true, Interpolation::Linear),
            Err(BoxError::Empty)
        );
    }

    #[test]
    fn test_push_validation() {
        let mut c = BoxComposer::new(Interpolation::Linear);
        c.push(&TemporalInstant::new(InstantValue::Int(1), t(2))).unwrap();
        assert_eq!(
            c.push(&TemporalInstant::new(InstantValue::Int(2), t(1))),
            Err(BoxError::NotIncreasing)
        );
        assert_eq!(
            c.push(&TemporalInstant::new(InstantValue::Bool(true), t(3))),
            Err(BoxError::KindMismatch {
                expected: TemporalKind::Number,
                found: TemporalKind::Alpha,
            })
        );
        // Failed pushes leave the state untouched
        assert_eq!(c.state(), ComposerState::Single);
        c.push(&TemporalInstant::new(InstantValue::Int(4), t(3))).unwrap();
        assert_eq!(value_span(&c.current().unwrap()), Span::make(1.0, 4.0, true, true).unwrap());
    }

    #[test]
    fn test_spatial_and_alpha() {
        let points = vec![
            TemporalInstant::new(InstantValue::Point(Point::new(0.0, 0.0)), t(1)),
            TemporalInstant::new(InstantValue::Point(Point::new(2.0, 1.0)), t(2)),
        ];
        let mut c = BoxComposer::new(Interpolation::Linear).srid(4326);
        let bbox = c.recompute(&points, true, false).unwrap();
        assert_eq!(
            bbox.to_string(),
            "SRID=4326;STBOX XT(((0,0),(2,1)),[2001-01-01 01:00:00+00, 2001-01-01 02:00:00+00))"
        );
        let mixed_z = TemporalInstant::new(InstantValue::Point(Point::new_3d(0.0, 0.0, 1.0)), t(3));
        c.restart();
        c.push(&points[0]).unwrap();
        assert_eq!(c.push(&mixed_z), Err(BoxError::DimensionMismatch));

        let texts = vec![
            TemporalInstant::new(InstantValue::Text("a".into()), t(1)),
            TemporalInstant::new(InstantValue::Text("b".into()), t(3)),
        ];
        let bbox = instant_set_box(&texts).unwrap();
        assert_eq!(bbox, BoundingBox::Period(Span::make(t(1), t(3), true, true).unwrap()));
    }

    #[test]
    fn test_sequence_set_box() {
        let a = sequence_box(&floats(&[1.0, 2.0]), true, true, Interpolation::Linear).unwrap();
        let b = instant_box(&TemporalInstant::new(InstantValue::Float(7.0), t(9)));
        let merged = sequence_set_box(&[a.clone(), b]).unwrap();
        assert_eq!(value_span(&merged), Span::make(1.0, 7.0, true, true).unwrap());
        let period = BoundingBox::Period(Span::point(t(1)));
        assert!(matches!(
            sequence_set_box(&[a, period]),
            Err(BoxError::KindMismatch { .. })
        ));
        assert_eq!(sequence_set_box(&[]), Err(BoxError::Empty));
    }

    #[test]
    fn test_bounding_box_same_uses_cmp() {
        let a = BoundingBox::STBox(STBox::from_extent(Extent::new(0.0, 1.0, 0.0, 1.0).unwrap()));
        let b = BoundingBox::STBox(STBox::from_extent(Extent::new(0.0, 1.0, 0.0, 1.0).unwrap()));
        assert!(a.same(&b));
        let c = BoundingBox::Period(Span::point(t(1)));
        assert!(!a.same(&c));
        assert_eq!(c.cmp(&a), Ordering::Less);
    }
}
