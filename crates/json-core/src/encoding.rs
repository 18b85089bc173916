//! Encoding detection (interface only — see `spec.md` §1 and §6).
//!
//! This never transcodes anything; it only classifies the leading bytes so
//! `parse`/`parse_many` can reject non-UTF-8 input with a clear error
//! instead of silently misparsing it byte-by-byte.

use core::fmt;

/// The detected encoding of an input byte slice, based on the leading
/// zero-byte pattern of its first (up to) four bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Encoding {
    Utf8,
    Utf16Le,
    Utf16Be,
    Utf32Le,
    Utf32Be,
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Utf8 => "UTF-8",
            Self::Utf16Le => "UTF-16LE",
            Self::Utf16Be => "UTF-16BE",
            Self::Utf32Le => "UTF-32LE",
            Self::Utf32Be => "UTF-32BE",
        };
        write!(f, "{name}")
    }
}

/// Classifies the first up to four bytes of `input` per the JSON encoding
/// heuristic (RFC 7159 Appendix B): a BOM-less scheme detects UTF-16/32 from
/// the position of NUL bytes, since a valid JSON document starts with an
/// ASCII structural byte or whitespace.
#[must_use]
pub fn detect_encoding(input: &[u8]) -> Encoding {
    let b = |i: usize| input.get(i).copied().unwrap_or(1);
    match (b(0) == 0, b(1) == 0, b(2) == 0, b(3) == 0) {
        (true, true, true, false) => Encoding::Utf32Be,
        (true, false, true, false) => Encoding::Utf16Be,
        (false, true, false, true) => Encoding::Utf16Le,
        (false, true, true, true) => Encoding::Utf32Le,
        _ => Encoding::Utf8,
    }
}
