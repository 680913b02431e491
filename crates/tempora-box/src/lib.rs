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

//! # Tempora Box
//!
//! Bounding boxes for temporal values and the composer that builds them.
//!
//! ## Modules
//!
//! - `tbox`: `TBox`, a value span and a period, with topological and
//!   positional operators.
//! - `stbox`: `STBox`, a spatial extent and a period under an SRID.
//! - `instant`: The instants the composer consumes and their `TemporalKind`.
//! - `composer`: `BoundingBox` and the `BoxComposer` state machine, plus folds
//!   for instant sets, sequences and sequence sets.
//! - `text`: Parsers for the `TBOX` and `STBOX` text forms.
//! - `error`: `BoxError`.

pub mod composer;
pub mod error;
pub mod instant;
pub mod stbox;
pub mod tbox;
pub mod text;

pub use composer::{BoundingBox, BoxComposer, ComposerState};
pub use error::{BoxError, Dimension};
pub use instant::{InstantValue, Interpolation, Point, TemporalInstant, TemporalKind};
pub use stbox::{Extent, STBox};
pub use tbox::TBox;
