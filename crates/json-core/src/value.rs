//! The value model: a tagged sum of the six JSON value kinds, with a
//! compact serializer and structural equality (`spec.md` §3, §4.7).

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use hashbrown::HashMap;

use crate::number::{self, Number};
use crate::text::Str;

/// An ordered mapping from string key to [`Value`]. Iteration order is
/// unspecified (`spec.md` §3) — a plain `hashbrown::HashMap` is therefore
/// sufficient and avoids pulling in an order-preserving map this crate has
/// no use for.
pub type Object<'a> = HashMap<Str<'a>, Value<'a>>;

/// A parsed JSON value.
///
/// `Null` is a first-class variant: JSON's `null` is always exactly
/// representable this way, so there is no separate "null array"/"null
/// object" case distinct from `Value::Null` itself (see `DESIGN.md` for how
/// this resolves the source's null/empty pointer-identity trick).
#[derive(Debug, Clone, PartialEq)]
pub enum Value<'a> {
    Null,
    Bool(bool),
    Number(Number<'a>),
    String(Str<'a>),
    Array(Vec<Value<'a>>),
    Object(Object<'a>),
}

impl<'a> Value<'a> {
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_array(&self) -> Option<&[Value<'a>]> {
        match self {
            Self::Array(a) => Some(a),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_object(&self) -> Option<&Object<'a>> {
        match self {
            Self::Object(o) => Some(o),
            _ => None,
        }
    }

    /// Renders this value in the compact form described in `spec.md` §4.7:
    /// minimal whitespace, JSON-valid string escaping, `ryu`'s shortest
    /// round-trippable form for doubles (with a trailing `.0` for integral
    /// values), and unspecified object key order.
    #[must_use]
    pub fn to_json_string(&self) -> String {
        let mut out = String::new();
        write_value(self, &mut out);
        out
    }
}

impl fmt::Display for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_json_string())
    }
}

fn write_value(value: &Value<'_>, out: &mut String) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(true) => out.push_str("true"),
        Value::Bool(false) => out.push_str("false"),
        Value::Number(n) => out.push_str(&number::format_number(n)),
        Value::String(s) => write_json_string(s, out),
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_value(item, out);
            }
            out.push(']');
        }
        Value::Object(map) => {
            out.push('{');
            for (i, (key, val)) in map.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_json_string(key, out);
                out.push(':');
                write_value(val, out);
            }
            out.push('}');
        }
    }
}

/// Escapes `s` as a JSON string literal (quotes included), per the
/// `asciiControlJsonEscape` policy in `spec.md` §9: the short escapes for
/// `"`, `\`, and the named control characters, `\u00XX` for any other
/// control byte, and everything else (including non-ASCII UTF-8) emitted
/// verbatim.
fn write_json_string(s: &str, out: &mut String) {
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{08}' => out.push_str("\\b"),
            '\u{0C}' => out.push_str("\\f"),
            c if (c as u32) < 0x20 => {
                let _ = write_hex_escape(c as u32, out);
            }
            c => out.push(c),
        }
    }
    out.push('"');
}

fn write_hex_escape(code_point: u32, out: &mut String) -> fmt::Result {
    use fmt::Write;
    write!(out, "\\u{code_point:04x}")
}
