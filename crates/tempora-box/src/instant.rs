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

//! Temporal instants as seen by the bounding-box layer.
//!
//! The owners of instants, sequences and sequence sets live outside this
//! workspace. The composer only needs each instant's timestamp and a value
//! projection, and the value decides which kind of box summarizes it.

use std::fmt::Display;
use tempora_core::time::Timestamp;

/// The family of a temporal value, which selects its bounding-box type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemporalKind {
    /// Booleans and text: boxed by their period.
    Alpha,
    /// Integers and floats: boxed by a value span and a period.
    Number,
    /// Points: boxed by a spatial extent and a period.
    Spatial,
}

impl Display for TemporalKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Alpha => write!(f, "alpha"),
            Self::Number => write!(f, "number"),
            Self::Spatial => write!(f, "spatial"),
        }
    }
}

/// A 2D or 3D point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    /// X coordinate (longitude for geodetic data).
    pub x: f64,
    /// Y coordinate (latitude for geodetic data).
    pub y: f64,
    /// Optional Z coordinate.
    pub z: Option<f64>,
}

impl Point {
    /// Creates a 2D point.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y, z: None }
    }

    /// Creates a 3D point.
    #[inline]
    pub const fn new_3d(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z: Some(z) }
    }

    /// Returns `true` for 3D points.
    #[inline]
    pub const fn has_z(&self) -> bool {
        self.z.is_some()
    }
}

/// The value carried by an instant.
#[derive(Debug, Clone, PartialEq)]
pub enum InstantValue {
    /// A boolean.
    Bool(bool),
    /// An integer.
    Int(i32),
    /// A float.
    Float(f64),
    /// A text value.
    Text(String),
    /// A point.
    Point(Point),
}

impl InstantValue {
    /// The temporal kind this value belongs to.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use tempora_box::instant::{InstantValue, TemporalKind};
    ///
    /// assert_eq!(InstantValue::Int(3).kind(), TemporalKind::Number);
    /// assert_eq!(InstantValue::Text("a".into()).kind(), TemporalKind::Alpha);
    /// ```
    #[inline]
    pub const fn kind(&self) -> TemporalKind {
        match self {
            Self::Bool(_) | Self::Text(_) => TemporalKind::Alpha,
            Self::Int(_) | Self::Float(_) => TemporalKind::Number,
            Self::Point(_) => TemporalKind::Spatial,
        }
    }

    /// The numeric projection of number values.
    #[inline]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(v) => Some(f64::from(*v)),
            Self::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// The point of spatial values.
    #[inline]
    pub fn as_point(&self) -> Option<&Point> {
        match self {
            Self::Point(p) => Some(p),
            _ => None,
        }
    }
}

/// A value at a timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct TemporalInstant {
    /// The value.
    pub value: InstantValue,
    /// The timestamp.
    pub t: Timestamp,
}

impl TemporalInstant {
    /// Creates an instant.
    #[inline]
    pub fn new(value: InstantValue, t: Timestamp) -> Self {
        Self { value, t }
    }

    /// The temporal kind of the value.
    #[inline]
    pub const fn kind(&self) -> TemporalKind {
        self.value.kind()
    }
}

/// How values evolve between consecutive instants of a sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Interpolation {
    /// Only the instants themselves carry values.
    Discrete,
    /// Each value holds until the next instant.
    Step,
    /// Values change linearly between instants.
    #[default]
    Linear,
}
