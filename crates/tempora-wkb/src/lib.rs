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

//! # Tempora WKB
//!
//! An endian-aware binary encoding for spans, span sets, instant sets and
//! bounding boxes, with an uppercase hex variant.
//!
//! ## Modules
//!
//! - `header`: The `[endian][tag][flags][srid?]` header, type tags and flag bits.
//! - `codec`: The `WkbEncode`/`WkbDecode` traits, their impls and the
//!   `to_wkb`/`from_wkb` entry points.
//! - `options`: `WkbOptions`, the writer configuration.
//! - `error`: `WkbError`.
//!
//! # Examples
//!
//! ```rust
//! # use tempora_core::bytes::Endian;
//! # use tempora_span::span_set::SpanSet;
//! # use tempora_wkb::{from_hex_wkb, to_hex_wkb, WkbOptions};
//!
//! let set: SpanSet<i32> = "{[1, 3), [5, 8)}".parse().unwrap();
//! let hex = to_hex_wkb(&set, &WkbOptions::new().endian(Endian::Big));
//! assert!(hex.starts_with("001100"));
//! assert_eq!(from_hex_wkb::<SpanSet<i32>>(&hex).unwrap(), set);
//! ```

pub mod codec;
pub mod error;
pub mod header;
pub mod options;

pub use codec::{WkbDecode, WkbEncode, decode, from_hex_wkb, from_wkb, to_hex_wkb, to_wkb};
pub use error::WkbError;
pub use options::WkbOptions;
