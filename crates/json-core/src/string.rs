//! The string scanner: validates a JSON quoted string's body (control
//! characters, escape sequences) and produces a zero-copy view when
//! possible, falling back to an owned, unescaped buffer when the body
//! contains any escape sequence.

use alloc::string::String;

use crate::error::ErrorKind;
use crate::text::Str;

/// Result of successfully scanning a quoted string body.
pub struct StringScan<'a> {
    /// The string's content, with escapes resolved.
    pub value: Str<'a>,
    /// Number of bytes consumed from the byte *after* the opening quote up
    /// to and including the closing quote.
    pub consumed: usize,
}

/// Scans a quoted string body. `input` must start immediately after the
/// opening `"`. On success, returns the unescaped value and how many bytes
/// (including the closing quote) were consumed from `input`.
///
/// # Errors
///
/// Returns the `ErrorKind` and the byte offset (relative to `input`) at
/// which the problem was found.
pub fn scan_string(input: &[u8]) -> Result<StringScan<'_>, (ErrorKind, usize)> {
    let mut i = 0usize;
    let mut has_escape = false;

    // Fast path: find the closing quote without building any buffer, so a
    // string with no escapes is a single memchr-style scan and zero copies.
    loop {
        match input.get(i) {
            None => return Err((ErrorKind::EndedInsideQuote, i)),
            Some(b'"') => {
                if !has_escape {
                    let body = core::str::from_utf8(&input[..i])
                        .map_err(|_| (ErrorKind::InvalidUtf8, 0))?;
                    return Ok(StringScan {
                        value: Str::from(body),
                        consumed: i + 1,
                    });
                }
                break;
            }
            Some(b'\\') => {
                has_escape = true;
                break;
            }
            Some(b'\n' | b'\t' | b'\r') => {
                return Err((ErrorKind::TabNewlineCrInsideQuotes, i));
            }
            Some(&b) if b < 0x20 => return Err((ErrorKind::ControlCharInsideQuotes, i)),
            Some(_) => i += 1,
        }
    }

    // Slow path: an escape was found. Unescape into an owned buffer,
    // re-validating from the start (the bytes already scanned are known
    // escape-free and control-char-free, so this is a straight copy up to
    // the point the fast-path loop stopped).
    let mut out = String::with_capacity(input.len());
    out.push_str(
        core::str::from_utf8(&input[..i]).map_err(|_| (ErrorKind::InvalidUtf8, 0))?,
    );

    loop {
        match input.get(i) {
            None => return Err((ErrorKind::EndedInsideQuote, i)),
            Some(b'"') => {
                i += 1;
                return Ok(StringScan {
                    value: Str::from(out),
                    consumed: i,
                });
            }
            Some(b'\n' | b'\t' | b'\r') => {
                return Err((ErrorKind::TabNewlineCrInsideQuotes, i));
            }
            Some(&b) if b < 0x20 => return Err((ErrorKind::ControlCharInsideQuotes, i)),
            Some(b'\\') => {
                i += 1;
                let (decoded_len, ch_or_bytes) = decode_escape(input, i)?;
                match ch_or_bytes {
                    EscapeOutput::Char(c) => out.push(c),
                    EscapeOutput::Byte(b) => out.push(b as char),
                }
                i += decoded_len;
            }
            Some(&b) => {
                // Copy one UTF-8 scalar's worth of bytes at a time so we
                // never split a multi-byte sequence.
                let start = i;
                let width = utf8_len(b);
                let end = (start + width).min(input.len());
                let chunk = input.get(start..end).ok_or((ErrorKind::InvalidUtf8, start))?;
                let s = core::str::from_utf8(chunk).map_err(|_| (ErrorKind::InvalidUtf8, start))?;
                out.push_str(s);
                i = end;
            }
        }
    }
}

enum EscapeOutput {
    Char(char),
    Byte(u8),
}

/// Decodes a single escape sequence starting right after the `\`. Returns
/// how many bytes (after the `\`) were consumed, and the decoded output.
fn decode_escape(input: &[u8], i: usize) -> Result<(usize, EscapeOutput), (ErrorKind, usize)> {
    match input.get(i) {
        None => Err((ErrorKind::EndedInsideQuote, i)),
        Some(b'"') => Ok((1, EscapeOutput::Byte(b'"'))),
        Some(b'\\') => Ok((1, EscapeOutput::Byte(b'\\'))),
        Some(b'/') => Ok((1, EscapeOutput::Byte(b'/'))),
        Some(b'b') => Ok((1, EscapeOutput::Byte(0x08))),
        Some(b'f') => Ok((1, EscapeOutput::Byte(0x0C))),
        Some(b'n') => Ok((1, EscapeOutput::Byte(b'\n'))),
        Some(b'r') => Ok((1, EscapeOutput::Byte(b'\r'))),
        Some(b't') => Ok((1, EscapeOutput::Byte(b'\t'))),
        Some(b'u') => decode_unicode_escape(input, i),
        _ => Err((ErrorKind::InvalidEscapeChar, i)),
    }
}

fn decode_unicode_escape(
    input: &[u8],
    i: usize,
) -> Result<(usize, EscapeOutput), (ErrorKind, usize)> {
    let first = read_hex4(input, i + 1).ok_or((ErrorKind::InvalidUnicodeEscape, i))?;

    if (0xD800..=0xDBFF).contains(&first) {
        // High surrogate: must be immediately followed by \uXXXX low surrogate.
        if input.get(i + 5) != Some(&b'\\') || input.get(i + 6) != Some(&b'u') {
            return Err((ErrorKind::InvalidUnicodeEscape, i));
        }
        let second = read_hex4(input, i + 7).ok_or((ErrorKind::InvalidUnicodeEscape, i))?;
        if !(0xDC00..=0xDFFF).contains(&second) {
            return Err((ErrorKind::InvalidUnicodeEscape, i));
        }
        let scalar = 0x10000 + (u32::from(first) - 0xD800) * 0x400 + (u32::from(second) - 0xDC00);
        let c = char::from_u32(scalar).ok_or((ErrorKind::InvalidUnicodeEscape, i))?;
        return Ok((11, EscapeOutput::Char(c)));
    }
    if (0xDC00..=0xDFFF).contains(&first) {
        // Lone low surrogate.
        return Err((ErrorKind::InvalidUnicodeEscape, i));
    }

    let c = char::from_u32(u32::from(first)).ok_or((ErrorKind::InvalidUnicodeEscape, i))?;
    Ok((5, EscapeOutput::Char(c)))
}

fn read_hex4(input: &[u8], start: usize) -> Option<u16> {
    let bytes = input.get(start..start + 4)?;
    let mut value: u16 = 0;
    for &b in bytes {
        let digit = (b as char).to_digit(16)?;
        value = value * 16 + digit as u16;
    }
    Some(value)
}

fn utf8_len(first_byte: u8) -> usize {
    match first_byte {
        0x00..=0x7F => 1,
        0xC0..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF7 => 4,
        _ => 1,
    }
}
