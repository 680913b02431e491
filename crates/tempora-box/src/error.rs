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

//! Errors raised by box operators and the bounding-box composer.

use crate::instant::TemporalKind;
use std::fmt::Display;
use tempora_core::error::InvalidSpan;

/// A box dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    /// The value axis of a `TBox` or the x/y plane of an `STBox`.
    X,
    /// The z axis of an `STBox`.
    Z,
    /// The time axis.
    T,
}

impl Display for Dimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::X => write!(f, "X"),
            Self::Z => write!(f, "Z"),
            Self::T => write!(f, "T"),
        }
    }
}

/// Failures of box operators and box construction.
#[derive(Debug, Clone, PartialEq)]
pub enum BoxError {
    /// A box was requested with no dimension at all.
    NoDimension,
    /// The operands share no dimension to compare on.
    NoCommonDimension,
    /// An operand lacks the dimension the operator works on.
    MissingDimension(Dimension),
    /// The operands have different dimensions where equal ones are required.
    DimensionMismatch,
    /// Spatial boxes with different spatial reference systems.
    SridMismatch {
        /// SRID of the left operand.
        left: i32,
        /// SRID of the right operand.
        right: i32,
    },
    /// A geodetic box was combined with a planar one.
    GeodeticMismatch,
    /// The union of the boxes would not be contiguous.
    NotContiguous,
    /// Boxes or instants of different temporal kinds were combined.
    KindMismatch {
        /// The kind already established.
        expected: TemporalKind,
        /// The kind that was supplied.
        found: TemporalKind,
    },
    /// The composer received input after it was finalized.
    Finalized,
    /// The composer was finalized without any instant.
    Empty,
    /// Instant timestamps are not strictly increasing.
    NotIncreasing,
    /// The edge inclusivity does not suit the sequence.
    InvalidBounds(&'static str),
    /// A span could not be formed from the accumulated bounds.
    InvalidSpan(InvalidSpan),
}

impl Display for BoxError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoDimension => write!(f, "A box must have at least one dimension"),
            Self::NoCommonDimension => write!(f, "The boxes must have at least one common dimension"),
            Self::MissingDimension(d) => write!(f, "The box must have {} dimension", d),
            Self::DimensionMismatch => write!(f, "The boxes must be of the same dimensionality"),
            Self::SridMismatch { left, right } => write!(
                f,
                "Operation on mixed SRID: {} and {}",
                left, right
            ),
            Self::GeodeticMismatch => write!(f, "Operation on mixed planar and geodetic coordinates"),
            Self::NotContiguous => write!(f, "Result of box union would not be contiguous"),
            Self::KindMismatch { expected, found } => write!(
                f,
                "Expected a {} value but found a {} value",
                expected, found
            ),
            Self::Finalized => write!(f, "The bounding box has already been finalized"),
            Self::Empty => write!(f, "A bounding box needs at least one instant"),
            Self::NotIncreasing => write!(f, "Instant timestamps must be strictly increasing"),
            Self::InvalidBounds(reason) => write!(f, "Invalid sequence bounds: {}", reason),
            Self::InvalidSpan(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for BoxError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidSpan(e) => Some(e),
            _ => None,
        }
    }
}

impl From<InvalidSpan> for BoxError {
    #[inline]
    fn from(e: InvalidSpan) -> Self {
        Self::InvalidSpan(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            BoxError::MissingDimension(Dimension::T).to_string(),
            "The box must have T dimension"
        );
        assert_eq!(
            BoxError::SridMismatch { left: 4326, right: 3857 }.to_string(),
            "Operation on mixed SRID: 4326 and 3857"
        );
        assert_eq!(
            BoxError::KindMismatch {
                expected: TemporalKind::Number,
                found: TemporalKind::Spatial
            }
            .to_string(),
            "Expected a number value but found a spatial value"
        );
    }

    #[test]
    fn test_source() {
        use std::error::Error;
        let e = BoxError::from(InvalidSpan::ReversedBounds);
        assert!(e.source().is_some());
        assert!(BoxError::Empty.source().is_none());
    }
}
