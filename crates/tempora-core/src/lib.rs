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

//! # Tempora Core
//!
//! Foundational building blocks for the Tempora interval algebra. Everything
//! the span, box and binary crates need from their element types lives here,
//! so that interval logic never has to know whether it is ordering integers,
//! floats, timestamps or text.
//!
//! ## Modules
//!
//! - `base`: The `BaseValue` capability trait (total order, hashing, text and
//!   binary I/O, discrete successors) and the `Metric` extension for bases with
//!   a distance, implemented for `i32`, `i64`, `f64`, `Timestamp` and `String`.
//! - `time`: The `Timestamp` type, a microsecond count since 2000-01-01 UTC.
//! - `bytes`: Endian-aware `ByteWriter`/`ByteReader` plus hex helpers.
//! - `text`: A whitespace-skipping `Cursor` shared by every text parser and
//!   the `TextOptions` output configuration.
//! - `error`: The error taxonomy (`InvalidSpan`, `InvalidCollection`,
//!   `ParseError`, `SerializationError`, `UnsupportedOperation`) unified
//!   under `Error`.
//!
//! Refer to each module for detailed APIs and examples.

pub mod base;
pub mod bytes;
pub mod error;
pub mod text;
pub mod time;

pub use base::{BaseKind, BaseValue, Metric};
pub use error::Error;
pub use time::Timestamp;
