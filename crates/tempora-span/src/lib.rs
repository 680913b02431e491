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

//! # Tempora Span
//!
//! Immutable interval types over any [`BaseValue`](tempora_core::BaseValue)
//! and the relational algebra between them.
//!
//! ## Modules
//!
//! - `span`: The single interval `Span<T>` with inclusive/exclusive bounds,
//!   closed-form topological and positional predicates, `union`,
//!   `intersection`, `minus`, `expand` and `distance`.
//! - `span_set`: `SpanSet<T>`, a normalized set of disjoint, non-adjacent
//!   spans, the `normalize` pass, and linear-time sweeps for every operator.
//! - `instant_set`: `InstantSet<T>` (and `TimestampSet`), strictly
//!   increasing point sets merged directly on their sorted values.
//! - `ops`: The cross-shape matrix. Free functions accept any pair of value,
//!   instant set, span and span set through the `Shape` trait; the
//!   `SetAlgebra` trait fixes the result type of set operators per pair.
//! - `bucket`: Fixed-width bucketing of values and spans.
//! - `parse`: Recursive-descent text input and `FromStr` impls.
//!
//! Refer to each module for detailed APIs and examples.

pub mod bucket;
pub mod instant_set;
pub mod ops;
pub mod parse;
pub mod span;
pub mod span_set;

mod points;

pub use instant_set::{InstantSet, TimestampSet};
pub use ops::{SetAlgebra, Shape};
pub use span::Span;
pub use span_set::SpanSet;
