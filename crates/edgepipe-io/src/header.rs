//! Graymap header parsing.
//!
//! The header is the magic token followed by width, height and max value as
//! whitespace-delimited ASCII decimals. A `#` anywhere in the header starts a
//! comment that runs to the end of its line.

use crate::Variant;
use edgepipe_core::{Error, Image, Result};

/// Parsed graymap header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    /// Sample encoding.
    pub variant: Variant,
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Largest sample value.
    pub max_value: u8,
}

impl Header {
    /// Returns `width * height`.
    #[inline]
    pub fn sample_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// Byte cursor shared by the header and text sample readers.
pub(crate) struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(bytes: &'a [u8], pos: usize) -> Self {
        Self { bytes, pos }
    }

    #[inline]
    pub(crate) fn pos(&self) -> usize {
        self.pos
    }

    #[inline]
    pub(crate) fn remaining(&self) -> &'a [u8] {
        &self.bytes[self.pos.min(self.bytes.len())..]
    }

    #[inline]
    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    pub(crate) fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(b) if is_whitespace(b)) {
            self.pos += 1;
        }
    }

    pub(crate) fn skip_whitespace_and_comments(&mut self) {
        loop {
            self.skip_whitespace();
            if self.peek() != Some(b'#') {
                break;
            }
            while let Some(b) = self.peek() {
                self.pos += 1;
                if b == b'\n' {
                    break;
                }
            }
        }
    }

    /// Reads one run of non-whitespace bytes, or `None` at end of input.
    pub(crate) fn next_token(&mut self) -> Option<&'a [u8]> {
        let start = self.pos;
        while matches!(self.peek(), Some(b) if !is_whitespace(b) && b != b'#') {
            self.pos += 1;
        }
        (self.pos > start).then(|| &self.bytes[start..self.pos])
    }

    /// Reads a signed header integer, skipping comments first.
    fn header_int(&mut self, what: &str) -> Result<i64> {
        self.skip_whitespace_and_comments();
        let token = self
            .next_token()
            .ok_or_else(|| Error::format(format!("unexpected end of header reading {}", what)))?;
        parse_signed(token)
            .ok_or_else(|| Error::format(format!("invalid {} token {:?}", what, lossy(token))))
    }
}

/// Parses the header and returns it with the byte offset where it ends.
///
/// For the binary variant the offset points just past the single whitespace
/// byte that separates the max value from the samples. For the text variant
/// it points just past the max value token.
///
/// # Errors
///
/// - [`Error::Format`] for an unknown magic token, a short or non-numeric
///   header, or a max value outside `1..=255`
/// - [`Error::InvalidDimensions`] if width or height is not positive
pub fn parse_header(bytes: &[u8]) -> Result<(Header, usize)> {
    let variant = Variant::detect(bytes)?;
    if let Some(&b) = bytes.get(2) {
        if !is_whitespace(b) && b != b'#' {
            return Err(Error::format(format!(
                "unrecognized magic token {:?}",
                lossy(&bytes[..3])
            )));
        }
    }

    let mut cursor = Cursor::new(bytes, 2);
    let width = cursor.header_int("width")?;
    let height = cursor.header_int("height")?;
    if width <= 0 || height <= 0 {
        return Err(Error::invalid_dimensions(
            width,
            height,
            "width and height must be positive",
        ));
    }
    let (Ok(w), Ok(h)) = (u32::try_from(width), u32::try_from(height)) else {
        return Err(Error::invalid_dimensions(width, height, "dimension too large"));
    };
    Image::sample_count(w, h)?;

    let max_value = cursor.header_int("max value")?;
    let max_value = u8::try_from(max_value)
        .ok()
        .filter(|&m| m > 0)
        .ok_or_else(|| {
            Error::format(format!("unsupported max value {} (expected 1..=255)", max_value))
        })?;

    let mut offset = cursor.pos();
    if variant.is_binary() && bytes.get(offset).is_some_and(|&b| is_whitespace(b)) {
        offset += 1;
    }

    Ok((
        Header {
            variant,
            width: w,
            height: h,
            max_value,
        },
        offset,
    ))
}

#[inline]
pub(crate) fn is_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r' | b'\x0b' | b'\x0c')
}

fn parse_signed(token: &[u8]) -> Option<i64> {
    let (negative, digits) = match token.split_first() {
        Some((b'-', rest)) => (true, rest),
        Some((b'+', rest)) => (false, rest),
        _ => (false, token),
    };
    let value = parse_unsigned(digits)? as i64;
    Some(if negative { -value } else { value })
}

/// Parses an unsigned ASCII decimal, rejecting empty input and overflow.
pub(crate) fn parse_unsigned(digits: &[u8]) -> Option<u32> {
    if digits.is_empty() {
        return None;
    }
    digits.iter().try_fold(0u32, |acc, &d| {
        if !d.is_ascii_digit() {
            return None;
        }
        acc.checked_mul(10)?.checked_add((d - b'0') as u32)
    })
}

pub(crate) fn lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_header() {
        let (h, offset) = parse_header(b"P5\n4 3\n255\nabcdefghijkl").unwrap();
        assert_eq!(h.variant, Variant::Binary);
        assert_eq!((h.width, h.height, h.max_value), (4, 3, 255));
        assert_eq!(offset, 11);
        assert_eq!(h.sample_count(), 12);
    }

    #[test]
    fn test_comments_anywhere_in_header() {
        let data = b"P2\n# made by hand\n4 # width\n# height next\n3\n#max\n200\n0";
        let (h, _) = parse_header(data).unwrap();
        assert_eq!((h.width, h.height, h.max_value), (4, 3, 200));
    }

    #[test]
    fn test_comment_directly_after_magic() {
        let (h, _) = parse_header(b"P2# comment\n2 2 255\n").unwrap();
        assert_eq!((h.width, h.height), (2, 2));
    }

    #[test]
    fn test_crlf_header() {
        let (h, offset) = parse_header(b"P5\r\n2 2\r\n255\n\x01\x02\x03\x04").unwrap();
        assert_eq!((h.width, h.height), (2, 2));
        assert_eq!(offset, 13);
    }

    #[test]
    fn test_non_positive_dimensions() {
        let err = parse_header(b"P2\n0 5\n255\n").unwrap_err();
        assert!(err.is_dimension_error());
        let err = parse_header(b"P5\n5 -2\n255\n").unwrap_err();
        assert!(matches!(err, Error::InvalidDimensions { width: 5, height: -2, .. }));
    }

    #[test]
    fn test_short_header() {
        assert!(parse_header(b"P5\n10").unwrap_err().is_format_error());
        assert!(parse_header(b"P5").unwrap_err().is_format_error());
    }

    #[test]
    fn test_bad_tokens() {
        assert!(parse_header(b"P2\n1x 2\n255\n").unwrap_err().is_format_error());
        assert!(parse_header(b"P2\n1 2\n65535\n").unwrap_err().is_format_error());
        assert!(parse_header(b"P2\n1 2\n0\n").unwrap_err().is_format_error());
        assert!(parse_header(b"P22\n1 2\n255\n").unwrap_err().is_format_error());
    }

    #[test]
    fn test_parse_unsigned() {
        assert_eq!(parse_unsigned(b"0"), Some(0));
        assert_eq!(parse_unsigned(b"255"), Some(255));
        assert_eq!(parse_unsigned(b""), None);
        assert_eq!(parse_unsigned(b"12a"), None);
        assert_eq!(parse_unsigned(b"99999999999"), None);
    }
}
