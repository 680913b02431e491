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

//! # Text cursor and output options
//!
//! Every recursive-descent parser in the workspace walks its input with a
//! [`Cursor`]. The cursor skips whitespace before each token, so grammar code
//! only states which token it expects next and which construct it belongs
//! to; the cursor turns a mismatch into a [`ParseError`] that names both and
//! records the byte offset.
//!
//! [`TextOptions`] configures how values are written back out.

use crate::base::BaseValue;
use crate::error::ParseError;

/// Delimiters that terminate an unquoted value token.
pub const VALUE_DELIMITERS: &[char] = &[',', ')', ']', '}', ';'];

/// Output configuration for text formatting.
///
/// # Examples
///
/// ```rust
/// # use tempora_core::text::TextOptions;
///
/// let opts = TextOptions::new().max_decimal_digits(2);
/// assert_eq!(opts.decimal_digits(), Some(2));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct TextOptions {
    max_decimal_digits: Option<usize>,
}

impl TextOptions {
    /// Creates the default options: floats are written with the shortest
    /// representation that reads back exactly.
    #[inline]
    pub const fn new() -> Self {
        Self {
            max_decimal_digits: None,
        }
    }

    /// Rounds floats to at most `digits` fractional digits.
    #[inline]
    pub const fn max_decimal_digits(mut self, digits: usize) -> Self {
        self.max_decimal_digits = Some(digits);
        self
    }

    /// Returns the configured rounding, if any.
    #[inline]
    pub const fn decimal_digits(&self) -> Option<usize> {
        self.max_decimal_digits
    }
}

/// A position within text input.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    /// Creates a cursor at the start of `input`.
    #[inline]
    pub fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    /// Returns the current byte offset.
    #[inline]
    pub const fn position(&self) -> usize {
        self.pos
    }

    /// Returns the unread input.
    #[inline]
    pub fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    /// Advances past any whitespace.
    #[inline]
    pub fn skip_whitespace(&mut self) {
        let rest = self.rest();
        self.pos += rest.len() - rest.trim_start().len();
    }

    /// Returns the next non-whitespace character without consuming it.
    #[inline]
    pub fn peek(&mut self) -> Option<char> {
        self.skip_whitespace();
        self.rest().chars().next()
    }

    /// Returns `true` if only whitespace remains.
    #[inline]
    pub fn is_at_end(&mut self) -> bool {
        self.peek().is_none()
    }

    /// Consumes `ch` if it is the next token.
    #[inline]
    pub fn consume(&mut self, ch: char) -> bool {
        if self.peek() == Some(ch) {
            self.pos += ch.len_utf8();
            true
        } else {
            false
        }
    }

    /// Consumes `ch` or fails naming the expected `token` and `construct`.
    #[inline]
    pub fn expect(
        &mut self,
        ch: char,
        construct: &'static str,
        token: &'static str,
    ) -> Result<(), ParseError> {
        if self.consume(ch) {
            Ok(())
        } else {
            Err(ParseError::missing(construct, token, self.pos))
        }
    }

    /// Consumes whichever of `choices` comes next and returns it.
    #[inline]
    pub fn consume_one_of(&mut self, choices: &[char]) -> Option<char> {
        let next = self.peek()?;
        if choices.contains(&next) {
            self.pos += next.len_utf8();
            Some(next)
        } else {
            None
        }
    }

    /// Consumes `keyword` if it is next, ignoring ASCII case.
    pub fn consume_keyword(&mut self, keyword: &str) -> bool {
        self.skip_whitespace();
        let rest = self.rest();
        if rest.len() >= keyword.len()
            && rest.is_char_boundary(keyword.len())
            && rest[..keyword.len()].eq_ignore_ascii_case(keyword)
        {
            self.pos += keyword.len();
            true
        } else {
            false
        }
    }

    /// Consumes text up to (not including) the first of `delimiters` and
    /// returns it trimmed, together with its starting offset.
    pub fn take_until(&mut self, delimiters: &[char]) -> (&'a str, usize) {
        self.skip_whitespace();
        let start = self.pos;
        let rest = self.rest();
        let len = rest.find(|c| delimiters.contains(&c)).unwrap_or(rest.len());
        self.pos += len;
        (rest[..len].trim_end(), start)
    }

    /// Consumes a double-quoted string, resolving `\"` and `\\` escapes.
    pub fn take_quoted(&mut self, construct: &'static str) -> Result<String, ParseError> {
        self.expect('"', construct, "opening double quote")?;
        let mut out = String::new();
        let mut chars = self.rest().char_indices();
        while let Some((i, c)) = chars.next() {
            match c {
                '"' => {
                    self.pos += i + 1;
                    return Ok(out);
                }
                '\\' => match chars.next() {
                    Some((_, escaped)) => out.push(escaped),
                    None => break,
                },
                other => out.push(other),
            }
        }
        self.pos = self.input.len();
        Err(ParseError::missing(construct, "closing double quote", self.pos))
    }

    /// Reads one base value; it is terminated by a delimiter or, for quoted
    /// bases, by its closing quote.
    #[inline]
    pub fn value<T: BaseValue>(&mut self, construct: &'static str) -> Result<T, ParseError> {
        T::scan(self, construct)
    }

    /// Fails unless only whitespace remains.
    #[inline]
    pub fn finish(&mut self, construct: &'static str) -> Result<(), ParseError> {
        if self.is_at_end() {
            Ok(())
        } else {
            Err(ParseError::trailing(construct, self.pos))
        }
    }
}
