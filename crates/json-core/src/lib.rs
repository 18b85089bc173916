//! A streaming, single-pass, allocation-conscious JSON lexer/parser core.
//!
//! `json-core` recognizes the JSON grammar byte-by-byte through a
//! character-classification table and a `context × character-class`
//! dispatch, producing a [`Value`] tree with exact numeric fidelity
//! (`Int64`, `Double`, arbitrary-precision `BigInt`, or a preserved
//! [`Number::HugeLiteral`] when even a `BigInt` can't hold a literal's
//! fractional/exponent form without losing precision) and zero-copy string
//! payloads wherever the source contains no escape sequences.
//!
//! Two modes are supported: strict RFC 7159 parsing, and a lenient
//! superset that additionally accepts unquoted string literals, trailing
//! commas, and `//`, `#`, and `/* */` comments.
//!
//! # Example
//!
//! ```
//! use json_core::{parse, Options, Value};
//!
//! let value = parse(br#"{"a":1,"b":[true,null]}"#, Options::strict()).unwrap();
//! let Value::Object(map) = value else { panic!("expected object") };
//! assert_eq!(map.len(), 2);
//! ```
#![no_std]

extern crate alloc;

mod builder;
mod classifier;
mod encoding;
mod error;
mod number;
mod parser;
mod string;
mod text;
mod value;

pub use crate::encoding::{detect_encoding, Encoding};
pub use crate::error::{Error, ErrorKind};
pub use crate::number::Number;
pub use crate::parser::{parse, parse_many, Options};
pub use crate::text::Str;
pub use crate::value::{Object, Value};
