// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Token scanning for OFF lines
//!
//! Every OFF line after the header is a run of whitespace-separated numbers.
//! Scanning stops at the first token that does not parse, matching the
//! behaviour of stream extraction: `1 2 3 foo 4` yields `[1, 2, 3]`.
//! A `#` anywhere on a line starts a trailing comment.

use smallvec::SmallVec;

/// Per-line float buffer; vertex lines rarely exceed 16 values
pub type FloatBuf = SmallVec<[f64; 16]>;

/// Per-line integer buffer; most faces are triangles or quads
pub type IntBuf = SmallVec<[u64; 8]>;

/// Cut a line at the first `#` (SIMD-accelerated search)
#[inline]
pub fn strip_comment(line: &str) -> &str {
    match memchr::memchr(b'#', line.as_bytes()) {
        // '#' is ASCII so the byte offset is a char boundary
        Some(pos) => &line[..pos],
        None => line,
    }
}

/// True if the line holds nothing but whitespace and/or a comment
#[inline]
pub fn is_blank_or_comment(line: &str) -> bool {
    strip_comment(line).trim().is_empty()
}

/// Parse leading float tokens using fast-float
#[inline]
pub fn parse_floats(line: &str) -> FloatBuf {
    let mut values = FloatBuf::new();
    for token in strip_comment(line).split_ascii_whitespace() {
        match fast_float::parse::<f64, _>(token) {
            Ok(value) => values.push(value),
            Err(_) => break,
        }
    }
    values
}

/// Parse leading non-negative integer tokens using lexical-core
///
/// A negative or fractional token ends the scan.
#[inline]
pub fn parse_uints(line: &str) -> IntBuf {
    let mut values = IntBuf::new();
    for token in strip_comment(line).split_ascii_whitespace() {
        match lexical_core::parse::<u64>(token.as_bytes()) {
            Ok(value) => values.push(value),
            Err(_) => break,
        }
    }
    values
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_floats() {
        let values = parse_floats("0.5 -1 2e3\t4.25");
        assert_eq!(values.as_slice(), &[0.5, -1.0, 2000.0, 4.25]);
    }

    #[test]
    fn test_parse_floats_stops_at_garbage() {
        let values = parse_floats("1.0 2.0 abc 3.0");
        assert_eq!(values.as_slice(), &[1.0, 2.0]);
    }

    #[test]
    fn test_trailing_comment() {
        let values = parse_floats("1 2 3 # corner");
        assert_eq!(values.len(), 3);
        assert_eq!(strip_comment("4 0 1 2 3#quad"), "4 0 1 2 3");
    }

    #[test]
    fn test_parse_uints() {
        let values = parse_uints("4 0 1 2 3");
        assert_eq!(values.as_slice(), &[4, 0, 1, 2, 3]);
    }

    #[test]
    fn test_parse_uints_rejects_negative_and_fraction() {
        assert_eq!(parse_uints("3 -1 2").as_slice(), &[3]);
        assert_eq!(parse_uints("3 1.5 2").as_slice(), &[3]);
    }

    #[test]
    fn test_blank_or_comment() {
        assert!(is_blank_or_comment(""));
        assert!(is_blank_or_comment("   \t"));
        assert!(is_blank_or_comment("  # indented comment"));
        assert!(!is_blank_or_comment("OFF"));
    }
}
