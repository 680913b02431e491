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

//! Errors raised while decoding binary input.

use std::fmt::Display;
use tempora_box::error::BoxError;
use tempora_core::error::{Error, InvalidCollection, InvalidSpan, SerializationError};

/// A binary decoding failure.
#[derive(Debug, Clone, PartialEq)]
pub enum WkbError {
    /// The bytes do not follow the binary layout.
    Serialization(SerializationError),
    /// The bytes decode to a span or collection that violates its invariants.
    InvalidValue(Error),
    /// The bytes decode to a box that violates its invariants.
    InvalidBox(BoxError),
}

impl Display for WkbError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Serialization(e) => write!(f, "Malformed binary input: {}", e),
            Self::InvalidValue(e) => write!(f, "Decoded an invalid value: {}", e),
            Self::InvalidBox(e) => write!(f, "Decoded an invalid box: {}", e),
        }
    }
}

impl std::error::Error for WkbError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Serialization(e) => Some(e),
            Self::InvalidValue(e) => Some(e),
            Self::InvalidBox(e) => Some(e),
        }
    }
}

impl From<SerializationError> for WkbError {
    #[inline]
    fn from(e: SerializationError) -> Self {
        Self::Serialization(e)
    }
}

impl From<InvalidSpan> for WkbError {
    #[inline]
    fn from(e: InvalidSpan) -> Self {
        Self::InvalidValue(e.into())
    }
}

impl From<InvalidCollection> for WkbError {
    #[inline]
    fn from(e: InvalidCollection) -> Self {
        Self::InvalidValue(e.into())
    }
}

impl From<BoxError> for WkbError {
    #[inline]
    fn from(e: BoxError) -> Self {
        Self::InvalidBox(e)
    }
}

impl From<Error> for WkbError {
    #[inline]
    fn from(e: Error) -> Self {
        match e {
            Error::Serialization(e) => Self::Serialization(e),
            other => Self::InvalidValue(other),
        }
    }
}
