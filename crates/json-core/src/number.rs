//! The number scanner: a six-state DFA recognizing the JSON `number`
//! production, plus the representation policy that promotes a scanned
//! literal to the narrowest exact [`crate::Number`] variant.

use alloc::string::ToString;

use num_bigint::BigInt;

use crate::text::Str;

/// Result of a successful number scan: `len` is the number of bytes that
/// make up the literal; `int_part_len` is the number of leading bytes that
/// belong to the integer part (sign + digits, no `.`/`e`/`E`). `int_part_len
/// == len` means the literal has no fractional or exponent part.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberScan {
    pub len: usize,
    pub int_part_len: usize,
}

/// Scans a JSON number starting at `input[0]`, matching the six-state DFA
/// in `spec.md` §4.3 (`start, int1, int2, frac_exp_or_done, frac, exp1,
/// exp2`): `start`/`int1` consume an optional `-` and the integer part
/// (`0`, or `[1-9][0-9]*`, landing in `frac_exp_or_done` or `int2`
/// respectively); `frac`/`exp1`/`exp2` consume an optional `.` fraction and
/// an optional `e`/`E` exponent, each of which only counts as consumed once
/// at least one digit following it has been seen — a bare trailing `.` or
/// `e` with no digits is not part of the match and is left for the caller.
///
/// Returns `None` if `input` does not start with a valid number (the
/// scanner never reads past `input.len()`, and never backtracks past the
/// longest accepted prefix).
#[must_use]
pub fn scan_number(input: &[u8]) -> Option<NumberScan> {
    let len = input.len();
    let mut i = 0usize;

    if i < len && input[i] == b'-' {
        i += 1;
    }

    match input.get(i) {
        Some(b'0') => i += 1,
        Some(b'1'..=b'9') => {
            i += 1;
            while matches!(input.get(i), Some(b'0'..=b'9')) {
                i += 1;
            }
        }
        _ => return None,
    }
    let int_part_len = i;

    if input.get(i) == Some(&b'.') {
        let mut j = i + 1;
        let frac_digits_start = j;
        while matches!(input.get(j), Some(b'0'..=b'9')) {
            j += 1;
        }
        if j > frac_digits_start {
            i = j;
        }
    }

    if matches!(input.get(i), Some(b'e' | b'E')) {
        let mut j = i + 1;
        if matches!(input.get(j), Some(b'+' | b'-')) {
            j += 1;
        }
        let exp_digits_start = j;
        while matches!(input.get(j), Some(b'0'..=b'9')) {
            j += 1;
        }
        if j > exp_digits_start {
            i = j;
        }
    }

    Some(NumberScan {
        len: i,
        int_part_len,
    })
}

/// The resolved, exact numeric representation of a JSON number literal.
#[derive(Debug, Clone)]
pub enum Number<'a> {
    Int64(i64),
    Double(f64),
    BigInt(BigInt),
    /// The original source text, preserved verbatim, for a literal with a
    /// fractional/exponent part that overflows `f64`.
    HugeLiteral(Str<'a>),
}

impl PartialEq for Number<'_> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Int64(a), Self::Int64(b)) => a == b,
            (Self::Double(a), Self::Double(b)) => a.to_bits() == b.to_bits(),
            (Self::BigInt(a), Self::BigInt(b)) => a == b,
            (Self::HugeLiteral(a), Self::HugeLiteral(b)) => a == b,
            _ => false,
        }
    }
}

/// Builds the exact [`Number`] for a scanned literal, following the
/// representation policy in `spec.md` §3/§4.3:
///
/// - No fraction/exponent (`int_part_len == literal.len()`): `Int64` if it
///   fits in `i64`, else `BigInt`.
/// - Otherwise: `Double` if the literal parses to a finite `f64`, else
///   `HugeLiteral` holding the original bytes.
#[must_use]
pub fn build_number<'a>(literal: &'a str, int_part_len: usize) -> Number<'a> {
    if int_part_len == literal.len() {
        if let Ok(v) = literal.parse::<i64>() {
            return Number::Int64(v);
        }
        // `i64::parse` also rejects "-0"-style and leading-zero-free forms
        // the DFA already guarantees are well-formed; fall back to BigInt
        // for anything that doesn't fit i64 (including values in the u64
        // range and beyond, per the boundary cases in spec.md §8).
        let big = BigInt::parse_bytes(literal.as_bytes(), 10).unwrap_or_default();
        return Number::BigInt(big);
    }

    let significand = literal
        .find(['e', 'E'])
        .map_or(literal, |exp_start| &literal[..exp_start]);

    match literal.parse::<f64>() {
        // A literal whose significand has a nonzero digit but which rounds
        // to exactly 0.0 has underflowed past what `f64` can represent; that
        // loses information just as surely as overflowing to infinity, so it
        // falls back to `HugeLiteral` rather than silently reporting `0.0`.
        // A nonzero digit in the exponent alone (e.g. "0e999", "0.0e1")
        // doesn't make the value nonzero, so it's not part of this check.
        Ok(v) if v.is_finite() && (v != 0.0 || !has_nonzero_digit(significand)) => {
            Number::Double(v)
        }
        _ => Number::HugeLiteral(Str::from(literal)),
    }
}

fn has_nonzero_digit(significand: &str) -> bool {
    significand.bytes().any(|b| (b'1'..=b'9').contains(&b))
}

/// Renders a `Number` back to its JSON decimal form, per `spec.md` §4.7.
#[must_use]
pub fn format_number(n: &Number<'_>) -> alloc::string::String {
    match n {
        Number::Int64(v) => v.to_string(),
        Number::Double(v) => format_double(*v),
        Number::BigInt(v) => v.to_string(),
        Number::HugeLiteral(s) => s.as_str().to_string(),
    }
}

fn format_double(v: f64) -> alloc::string::String {
    let mut buf = ryu::Buffer::new();
    let rendered = buf.format_finite(v);
    // ryu already appends ".0" to whole-valued doubles in its normal (non
    // scientific-notation) form; only its scientific-notation form (e.g.
    // "1e300") can still be integral without a literal ".0" in it.
    if v.fract() == 0.0 && !rendered.contains(['.', 'e', 'E']) {
        return alloc::format!("{rendered}.0");
    }
    rendered.to_string()
}
