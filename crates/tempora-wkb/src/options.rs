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

//! Writer configuration.

use tempora_core::bytes::Endian;

/// Options for encoding values.
///
/// # Examples
///
/// ```rust
/// # use tempora_core::bytes::Endian;
/// # use tempora_wkb::options::WkbOptions;
///
/// let opts = WkbOptions::new().endian(Endian::Big).hex(true);
/// assert_eq!(opts.byte_order(), Endian::Big);
/// assert!(opts.is_hex());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WkbOptions {
    endian: Endian,
    hex: bool,
}

impl WkbOptions {
    /// Native byte order, raw bytes.
    #[inline]
    pub const fn new() -> Self {
        Self {
            endian: Endian::NATIVE,
            hex: false,
        }
    }

    /// Sets the byte order of the output.
    #[inline]
    pub const fn endian(mut self, endian: Endian) -> Self {
        self.endian = endian;
        self
    }

    /// Emits uppercase hex text instead of raw bytes.
    #[inline]
    pub const fn hex(mut self, hex: bool) -> Self {
        self.hex = hex;
        self
    }

    #[inline]
    pub const fn byte_order(&self) -> Endian {
        self.endian
    }

    #[inline]
    pub const fn is_hex(&self) -> bool {
        self.hex
    }
}

impl Default for WkbOptions {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}
