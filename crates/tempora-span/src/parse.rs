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

//! # Text Input
//!
//! Recursive-descent readers for the text forms written by `Display`:
//!
//! ```text
//! span         := ('[' | '(') value ',' value (']' | ')')
//! span set     := '{' span (',' span)* '}'
//! set          := '{' value (',' value)* '}'
//! ```
//!
//! Whitespace may appear before any token. The `read_*` functions consume
//! one construct from a shared [`Cursor`] so that enclosing grammars (such as
//! bounding boxes) can embed them; the `parse_*` functions additionally
//! reject trailing input.

use crate::instant_set::InstantSet;
use crate::span::Span;
use crate::span_set::SpanSet;
use std::str::FromStr;
use tempora_core::base::BaseValue;
use tempora_core::error::{Error, ParseError};
use tempora_core::text::Cursor;

const SPAN: &str = "span";
const SPAN_SET: &str = "span set";
const SET: &str = "set";

/// Reads a span at the cursor.
///
/// # Errors
///
/// A [`ParseError`] naming the missing
/// token, or [`InvalidSpan`](tempora_core::error::InvalidSpan) if the bounds
/// do not form a span.
pub fn read_span<T>(cursor: &mut Cursor<'_>) -> Result<Span<T>, Error>
where
    T: BaseValue,
{
    let start = cursor.position();
    let lower_inc = match cursor.consume_one_of(&['[', '(']) {
        Some(open) => open == '[',
        None => {
            return Err(ParseError::missing(SPAN, "opening bracket/parenthesis", start).into());
        }
    };
    let lower = cursor.value::<T>(SPAN)?;
    cursor.expect(',', SPAN, "comma")?;
    let upper = cursor.value::<T>(SPAN)?;
    let upper_inc = match cursor.consume_one_of(&[']', ')']) {
        Some(close) => close == ']',
        None => {
            return Err(
                ParseError::missing(SPAN, "closing bracket/parenthesis", cursor.position()).into(),
            );
        }
    };
    Ok(Span::make(lower, upper, lower_inc, upper_inc)?)
}

/// Reads a span set at the cursor, normalizing its spans.
///
/// # Errors
///
/// As for [`read_span`], plus missing braces or commas.
pub fn read_span_set<T>(cursor: &mut Cursor<'_>) -> Result<SpanSet<T>, Error>
where
    T: BaseValue,
{
    cursor.expect('{', SPAN_SET, "opening brace")?;
    let mut spans = vec![read_span(cursor)?];
    while cursor.consume(',') {
        spans.push(read_span(cursor)?);
    }
    cursor.expect('}', SPAN_SET, "closing brace")?;
    Ok(SpanSet::new(spans)?)
}

/// Reads an instant set at the cursor. Values must be strictly increasing.
///
/// # Errors
///
/// A parse error for malformed text, or
/// [`InvalidCollection`](tempora_core::error::InvalidCollection) for values
/// out of order.
pub fn read_instant_set<T>(cursor: &mut Cursor<'_>) -> Result<InstantSet<T>, Error>
where
    T: BaseValue,
{
    cursor.expect('{', SET, "opening brace")?;
    let mut values = vec![cursor.value::<T>(SET)?];
    while cursor.consume(',') {
        values.push(cursor.value::<T>(SET)?);
    }
    cursor.expect('}', SET, "closing brace")?;
    Ok(InstantSet::new(values)?)
}

/// Runs `read` over the whole of `text`.
fn parse_all<R>(
    text: &str,
    construct: &'static str,
    read: impl FnOnce(&mut Cursor<'_>) -> Result<R, Error>,
) -> Result<R, Error> {
    let mut cursor = Cursor::new(text);
    let result = read(&mut cursor).inspect_err(|e| log::debug!("rejected {construct} input: {e}"))?;
    cursor.finish(construct)?;
    Ok(result)
}

/// Parses a span, rejecting trailing input.
///
/// # Examples
///
/// ```rust
/// # use tempora_span::parse::parse_span;
/// # use tempora_span::span::Span;
///
/// let span: Span<f64> = parse_span(" ( 1.5 , 4 ] ").unwrap();
/// assert_eq!(span.to_string(), "(1.5, 4]");
/// assert!(parse_span::<f64>("[1,5").is_err());
/// ```
pub fn parse_span<T>(text: &str) -> Result<Span<T>, Error>
where
    T: BaseValue,
{
    parse_all(text, SPAN, read_span)
}

/// Parses a span set, rejecting trailing input.
pub fn parse_span_set<T>(text: &str) -> Result<SpanSet<T>, Error>
where
    T: BaseValue,
{
    parse_all(text, SPAN_SET, read_span_set)
}

/// Parses an instant set, rejecting trailing input.
pub fn parse_instant_set<T>(text: &str) -> Result<InstantSet<T>, Error>
where
    T: BaseValue,
{
    parse_all(text, SET, read_instant_set)
}

impl<T> FromStr for Span<T>
where
    T: BaseValue,
{
    type Err = Error;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_span(s)
    }
}

impl<T> FromStr for SpanSet<T>
where
    T: BaseValue,
{
    type Err = Error;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_span_set(s)
    }
}

impl<T> FromStr for InstantSet<T>
where
    T: BaseValue,
{
    type Err = Error;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_instant_set(s)
    }
}
