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

//! Error taxonomy shared by every Tempora crate.
//!
//! Construction failures (`InvalidSpan`, `InvalidCollection`) are raised when a
//! value would violate its invariants, `ParseError` and `SerializationError`
//! report rejected text or binary input, and `UnsupportedOperation` marks an
//! operator that has no meaning for the requested base type. The umbrella
//! `Error` wraps all of them so callers can propagate with `?` across layers.

use crate::base::BaseKind;
use std::fmt::Display;

/// Reasons a span cannot be constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InvalidSpan {
    /// The lower bound is greater than the upper bound.
    ReversedBounds,
    /// Lower equals upper but at least one bound is exclusive, so the span is empty.
    EmptyOpenPoint,
}

impl Display for InvalidSpan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ReversedBounds => {
                write!(f, "Span lower bound must be less than or equal to its upper bound")
            }
            Self::EmptyOpenPoint => write!(f, "Span cannot be empty"),
        }
    }
}

impl std::error::Error for InvalidSpan {}

/// Reasons an ordered collection cannot be constructed from its elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InvalidCollection {
    /// The collection has no elements.
    Empty,
    /// The element at `index` is not strictly greater than its predecessor.
    NotIncreasing {
        /// Position of the offending element.
        index: usize,
    },
    /// The span at `index` overlaps or touches its predecessor.
    NotDisjoint {
        /// Position of the offending span.
        index: usize,
    },
}

impl Display for InvalidCollection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "Collection must contain at least one element"),
            Self::NotIncreasing { index } => write!(
                f,
                "Elements must be strictly increasing (violated at index {})",
                index
            ),
            Self::NotDisjoint { index } => write!(
                f,
                "Spans must be disjoint and non-adjacent (violated at index {})",
                index
            ),
        }
    }
}

impl std::error::Error for InvalidCollection {}

/// What a text parser was missing or could not understand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// An expected token (e.g. `"closing bracket/parenthesis"`) was not found.
    Missing(&'static str),
    /// A token could not be read as a value of the base type.
    InvalidValue {
        /// The offending token.
        token: String,
        /// The name of the base type that was expected.
        type_name: &'static str,
    },
    /// Input remained after a complete value was read.
    TrailingInput,
}

/// A text parse failure naming the construct and the byte offset where it stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// The construct being parsed, e.g. `"span"` or `"span set"`.
    pub construct: &'static str,
    /// What went wrong.
    pub kind: ParseErrorKind,
    /// Byte offset into the input at which parsing stopped.
    pub offset: usize,
}

impl ParseError {
    /// Creates a "missing token" error.
    #[inline]
    pub fn missing(construct: &'static str, token: &'static str, offset: usize) -> Self {
        Self {
            construct,
            kind: ParseErrorKind::Missing(token),
            offset,
        }
    }

    /// Creates an "invalid value" error.
    #[inline]
    pub fn invalid_value(
        construct: &'static str,
        token: impl Into<String>,
        type_name: &'static str,
        offset: usize,
    ) -> Self {
        Self {
            construct,
            kind: ParseErrorKind::InvalidValue {
                token: token.into(),
                type_name,
            },
            offset,
        }
    }

    /// Creates a "trailing input" error.
    #[inline]
    pub fn trailing(construct: &'static str, offset: usize) -> Self {
        Self {
            construct,
            kind: ParseErrorKind::TrailingInput,
            offset,
        }
    }

    /// Returns the same error with its offset moved forward by `base`.
    #[inline]
    pub fn shifted(mut self, base: usize) -> Self {
        self.offset += base;
        self
    }
}

impl Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            ParseErrorKind::Missing(token) => write!(
                f,
                "Could not parse {}: missing {} at offset {}",
                self.construct, token, self.offset
            ),
            ParseErrorKind::InvalidValue { token, type_name } => write!(
                f,
                "Could not parse {}: invalid {} value '{}' at offset {}",
                self.construct, type_name, token, self.offset
            ),
            ParseErrorKind::TrailingInput => write!(
                f,
                "Could not parse {}: extraneous characters at offset {}",
                self.construct, self.offset
            ),
        }
    }
}

impl std::error::Error for ParseError {}

/// A structural mismatch in binary input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SerializationError {
    /// Fewer bytes remained than a field required.
    BufferTooShort {
        /// Bytes required by the field being read.
        needed: usize,
        /// Bytes that were actually left.
        remaining: usize,
    },
    /// The endianness byte was neither `0` nor `1`.
    UnknownEndian(u8),
    /// The type tag does not name a known value type.
    UnknownTypeTag(u8),
    /// The type tag names a valid type, but not the one being decoded.
    TypeMismatch {
        /// Tag of the requested type.
        expected: u8,
        /// Tag found in the input.
        found: u8,
    },
    /// The flags byte carries bits that are invalid for the type.
    InvalidFlags(u8),
    /// A text value is not valid UTF-8.
    InvalidUtf8,
    /// Bytes remained after the value was fully decoded.
    TrailingBytes(usize),
    /// The hex encoding is malformed.
    InvalidHex,
}

impl Display for SerializationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BufferTooShort { needed, remaining } => write!(
                f,
                "Buffer too short: needed {} bytes but only {} remain",
                needed, remaining
            ),
            Self::UnknownEndian(b) => write!(f, "Unknown endianness byte 0x{:02X}", b),
            Self::UnknownTypeTag(t) => write!(f, "Unknown type tag 0x{:02X}", t),
            Self::TypeMismatch { expected, found } => write!(
                f,
                "Type tag mismatch: expected 0x{:02X}, found 0x{:02X}",
                expected, found
            ),
            Self::InvalidFlags(b) => write!(f, "Invalid flags byte 0x{:02X}", b),
            Self::InvalidUtf8 => write!(f, "Text value is not valid UTF-8"),
            Self::TrailingBytes(n) => write!(f, "{} unexpected trailing bytes", n),
            Self::InvalidHex => write!(f, "Invalid hex encoding"),
        }
    }
}

impl std::error::Error for SerializationError {}

/// An operator invoked on a base type for which it has no meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UnsupportedOperation {
    /// Name of the operator, e.g. `"distance"`.
    pub operation: &'static str,
    /// The base type it was invoked on.
    pub base: BaseKind,
}

impl Display for UnsupportedOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Operation '{}' is not supported for base type {}",
            self.operation, self.base
        )
    }
}

impl std::error::Error for UnsupportedOperation {}

/// The error type for every fallible Tempora operation.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// A span violated its bound invariants.
    InvalidSpan(InvalidSpan),
    /// A collection violated its ordering invariants.
    InvalidCollection(InvalidCollection),
    /// Text input was rejected.
    Parse(ParseError),
    /// Binary input was rejected.
    Serialization(SerializationError),
    /// The operator is undefined for the base type.
    Unsupported(UnsupportedOperation),
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidSpan(e) => write!(f, "Invalid span: {}", e),
            Self::InvalidCollection(e) => write!(f, "Invalid collection: {}", e),
            Self::Parse(e) => write!(f, "Parse error: {}", e),
            Self::Serialization(e) => write!(f, "Serialization error: {}", e),
            Self::Unsupported(e) => write!(f, "Unsupported operation: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidSpan(e) => Some(e),
            Self::InvalidCollection(e) => Some(e),
            Self::Parse(e) => Some(e),
            Self::Serialization(e) => Some(e),
            Self::Unsupported(e) => Some(e),
        }
    }
}

impl From<InvalidSpan> for Error {
    fn from(e: InvalidSpan) -> Self {
        Self::InvalidSpan(e)
    }
}

impl From<InvalidCollection> for Error {
    fn from(e: InvalidCollection) -> Self {
        Self::InvalidCollection(e)
    }
}

impl From<ParseError> for Error {
    fn from(e: ParseError) -> Self {
        Self::Parse(e)
    }
}

impl From<SerializationError> for Error {
    fn from(e: SerializationError) -> Self {
        Self::Serialization(e)
    }
}

impl From<UnsupportedOperation> for Error {
    fn from(e: UnsupportedOperation) -> Self {
        Self::Unsupported(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_message_names_construct_and_token() {
        let e = ParseError::missing("span", "closing bracket/parenthesis", 4);
        assert_eq!(
            e.to_string(),
            "Could not parse span: missing closing bracket/parenthesis at offset 4"
        );
    }

    #[test]
    fn test_parse_error_shift() {
        let e = ParseError::invalid_value("int", "x", "int", 0).shifted(7);
        assert_eq!(e.offset, 7);
    }

    #[test]
    fn test_error_conversions() {
        let e: Error = InvalidSpan::ReversedBounds.into();
        assert!(matches!(e, Error::InvalidSpan(InvalidSpan::ReversedBounds)));

        let e: Error = SerializationError::UnknownEndian(7).into();
        assert_eq!(
            e.to_string(),
            "Serialization error: Unknown endianness byte 0x07"
        );

        let e: Error = UnsupportedOperation {
            operation: "distance",
            base: BaseKind::Text,
        }
        .into();
        assert!(std::error::Error::source(&e).is_some());
    }
}
