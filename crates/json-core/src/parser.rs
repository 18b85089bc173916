//! The parser state machine: the core of the core (`spec.md` §4.6).
//!
//! Driven by a `context × character-class` dispatch, `Parser` owns a cursor
//! into the input, a stack of open container builders, the current object
//! key (when inside `ObjectColon`/`ObjectValue`), a line counter, and the
//! list of completed root values. There is no process-wide parser state —
//! `spec.md` §5/§9 permits that as an optional, explicitly non-default,
//! non-concurrent fast path, and this crate does not build it (see
//! `DESIGN.md`).

use alloc::vec::Vec;

use crate::builder::{ArrayBuilder, Builder, ObjectBuilder};
use crate::classifier::{self, CharClass};
use crate::encoding::{self, Encoding};
use crate::error::{Error, ErrorKind};
use crate::number;
use crate::string;
use crate::text::Str;
use crate::value::Value;

/// Options recognized by [`parse`] and [`parse_many`] (`spec.md` §6).
#[derive(Debug, Clone, Copy, Default)]
pub struct Options {
    /// Enables unquoted string literals, trailing commas in arrays and
    /// objects, and `//`, `#`, and `/* */` comments.
    pub lenient: bool,
}

impl Options {
    /// Strict RFC 7159 parsing (the default).
    #[must_use]
    pub fn strict() -> Self {
        Self { lenient: false }
    }

    /// The lenient superset described in `spec.md` §4.4/§4.6 and
    /// `SPEC_FULL.md` §4.6.
    #[must_use]
    pub fn lenient() -> Self {
        Self { lenient: true }
    }
}

/// Parses exactly one root value. `bytes` must be UTF-8 (encodings other
/// than UTF-8 are detected and rejected before any byte is scanned).
///
/// # Errors
///
/// Returns an [`Error`] for any malformed input, for an input containing no
/// value, or for an input containing more than one root value.
pub fn parse(bytes: &[u8], options: Options) -> Result<Value<'_>, Error> {
    let mut values = parse_many(bytes, options)?;
    if values.len() > 1 {
        return Err(Error::new(ErrorKind::MultipleRoots, 1, 1, 0));
    }
    Ok(values.remove(0))
}

/// Parses one or more whitespace-separated root values.
///
/// # Errors
///
/// Returns an [`Error`] for any malformed input or for an input containing
/// no value at all.
pub fn parse_many(bytes: &[u8], options: Options) -> Result<Vec<Value<'_>>, Error> {
    let encoding = encoding::detect_encoding(bytes);
    if encoding != Encoding::Utf8 {
        return Err(Error::new(ErrorKind::UnsupportedEncoding(encoding), 1, 1, 0));
    }
    Parser::new(bytes, options).run()
}

/// Which kind of token the parser expects to see next (`spec.md` §4.6).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Context {
    Root,
    ObjectKey,
    ObjectColon,
    ObjectValue,
    ArrayValue,
    Comma { object: bool },
}

/// One entry in the builder stack: the open container, the context its
/// parent resumes in once this container finishes, and (if the parent is
/// itself an object) the key this container will be inserted under once
/// finalized.
///
/// `current_key` on `Parser` is only ever valid for the *innermost* open
/// object; pushing a nested container as that object's value must park the
/// pending key here so a deeper object's own keys don't clobber it — the key
/// is restored to `Parser::current_key` right before the finished container
/// is handed to its parent in `pop_container`.
struct Frame<'a> {
    builder: Builder<'a>,
    parent_context: Context,
    parent_key: Option<Str<'a>>,
}

struct Parser<'a> {
    input: &'a [u8],
    cursor: usize,
    options: Options,
    context: Context,
    stack: Vec<Frame<'a>>,
    current_key: Option<Str<'a>>,
    line: usize,
    line_start: usize,
    roots: Vec<Value<'a>>,
}

impl<'a> Parser<'a> {
    fn new(input: &'a [u8], options: Options) -> Self {
        Self {
            input,
            cursor: 0,
            options,
            context: Context::Root,
            stack: Vec::new(),
            current_key: None,
            line: 1,
            line_start: 0,
            roots: Vec::new(),
        }
    }

    fn error(&self, kind: ErrorKind) -> Error {
        self.error_at(kind, self.cursor)
    }

    fn error_at(&self, kind: ErrorKind, offset: usize) -> Error {
        Error::new(kind, self.line, offset - self.line_start + 1, offset)
    }

    fn peek(&self) -> Option<u8> {
        self.input.get(self.cursor).copied()
    }

    fn bump_newline(&mut self) {
        self.line += 1;
        self.line_start = self.cursor + 1;
    }

    fn run(mut self) -> Result<Vec<Value<'a>>, Error> {
        while let Some(byte) = self.peek() {
            let class = classifier::classify(byte);
            self.step(class)?;
        }

        if !self.stack.is_empty() {
            return Err(self.error(ErrorKind::EndedInsideStructure));
        }
        if self.roots.is_empty() {
            return Err(self.error(ErrorKind::NoJson));
        }
        Ok(self.roots)
    }

    fn step(&mut self, class: CharClass) -> Result<(), Error> {
        match self.context {
            Context::Root => self.step_root(class),
            Context::ObjectKey => self.step_object_key(class),
            Context::ObjectColon => self.step_object_colon(class),
            Context::ObjectValue => self.step_value(class, true),
            Context::ArrayValue => self.step_value(class, false),
            Context::Comma { object } => self.step_comma(class, object),
        }
    }

    fn skip_whitespace_or_comment(&mut self, class: CharClass) -> Result<bool, Error> {
        match class {
            CharClass::SpaceTabCr => {
                self.cursor += 1;
                Ok(true)
            }
            CharClass::Newline => {
                self.cursor += 1;
                self.bump_newline();
                Ok(true)
            }
            CharClass::Slash | CharClass::Hash if self.options.lenient => {
                self.skip_comment()?;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    /// Consumes one `//line`, `/* block */`, or `#line` comment starting at
    /// the cursor (lenient mode only; `SPEC_FULL.md` §4.6).
    fn skip_comment(&mut self) -> Result<(), Error> {
        let start = self.cursor;
        match self.peek() {
            Some(b'#') => {
                self.cursor += 1;
                self.skip_to_end_of_line();
                Ok(())
            }
            Some(b'/') => match self.input.get(self.cursor + 1) {
                Some(b'/') => {
                    self.cursor += 2;
                    self.skip_to_end_of_line();
                    Ok(())
                }
                Some(b'*') => {
                    self.cursor += 2;
                    loop {
                        match self.peek() {
                            None => return Err(self.error_at(ErrorKind::UnexpectedChar, start)),
                            Some(b'*') if self.input.get(self.cursor + 1) == Some(&b'/') => {
                                self.cursor += 2;
                                return Ok(());
                            }
                            Some(b'\n') => {
                                self.cursor += 1;
                                self.bump_newline();
                            }
                            Some(_) => self.cursor += 1,
                        }
                    }
                }
                _ => Err(self.error_at(ErrorKind::UnexpectedChar, start)),
            },
            _ => Err(self.error_at(ErrorKind::UnexpectedChar, start)),
        }
    }

    fn skip_to_end_of_line(&mut self) {
        while let Some(b) = self.peek() {
            if b == b'\n' {
                return;
            }
            self.cursor += 1;
        }
    }

    fn step_root(&mut self, class: CharClass) -> Result<(), Error> {
        if self.skip_whitespace_or_comment(class)? {
            return Ok(());
        }
        match class {
            CharClass::StartObject => {
                self.cursor += 1;
                self.push_container(true, Context::Root);
                Ok(())
            }
            CharClass::StartArray => {
                self.cursor += 1;
                self.push_container(false, Context::Root);
                Ok(())
            }
            CharClass::Quote => {
                self.cursor += 1;
                let value = self.scan_string_value()?;
                self.roots.push(value);
                Ok(())
            }
            CharClass::AsciiControl => Err(self.error(ErrorKind::ControlChar)),
            CharClass::NotAscii => Err(self.error(ErrorKind::UnexpectedChar)),
            CharClass::EndObject
            | CharClass::EndArray
            | CharClass::NameSeparator
            | CharClass::ValueSeparator => Err(self.error(ErrorKind::UnexpectedChar)),
            CharClass::Slash | CharClass::Hash => Err(self.error(ErrorKind::UnexpectedChar)),
            CharClass::Other => {
                let value = self.scan_unquoted_value()?;
                self.roots.push(value);
                Ok(())
            }
        }
    }

    fn step_object_key(&mut self, class: CharClass) -> Result<(), Error> {
        if self.skip_whitespace_or_comment(class)? {
            return Ok(());
        }
        match class {
            CharClass::Quote => {
                self.cursor += 1;
                let key = self.scan_string_key()?;
                self.current_key = Some(key);
                self.context = Context::ObjectColon;
                Ok(())
            }
            CharClass::Other if self.options.lenient => {
                let key = self.scan_unquoted_key()?;
                self.current_key = Some(key);
                self.context = Context::ObjectColon;
                Ok(())
            }
            CharClass::EndObject => {
                let top_empty = self.stack.last().is_some_and(Frame::is_empty_ref);
                if top_empty || self.options.lenient {
                    self.cursor += 1;
                    self.pop_container()
                } else {
                    Err(self.error(ErrorKind::UnexpectedChar))
                }
            }
            CharClass::AsciiControl => Err(self.error(ErrorKind::ControlChar)),
            _ => Err(self.error(ErrorKind::UnexpectedChar)),
        }
    }

    fn step_object_colon(&mut self, class: CharClass) -> Result<(), Error> {
        if self.skip_whitespace_or_comment(class)? {
            return Ok(());
        }
        if class == CharClass::NameSeparator {
            self.cursor += 1;
            self.context = Context::ObjectValue;
            Ok(())
        } else if class == CharClass::AsciiControl {
            Err(self.error(ErrorKind::ControlChar))
        } else {
            Err(self.error(ErrorKind::UnexpectedChar))
        }
    }

    fn step_value(&mut self, class: CharClass, object: bool) -> Result<(), Error> {
        if self.skip_whitespace_or_comment(class)? {
            return Ok(());
        }
        match class {
            CharClass::StartObject => {
                self.cursor += 1;
                self.push_container(true, Context::Comma { object });
                Ok(())
            }
            CharClass::StartArray => {
                self.cursor += 1;
                self.push_container(false, Context::Comma { object });
                Ok(())
            }
            CharClass::Quote => {
                self.cursor += 1;
                let value = self.scan_string_value()?;
                self.emit(value);
                self.context = Context::Comma { object };
                Ok(())
            }
            CharClass::EndArray if !object => {
                let top_empty = self.stack.last().is_some_and(Frame::is_empty_ref);
                if top_empty || self.options.lenient {
                    self.cursor += 1;
                    self.pop_container()
                } else {
                    Err(self.error(ErrorKind::UnexpectedChar))
                }
            }
            CharClass::AsciiControl => Err(self.error(ErrorKind::ControlChar)),
            CharClass::NotAscii => Err(self.error(ErrorKind::UnexpectedChar)),
            CharClass::Other => {
                let value = self.scan_unquoted_value()?;
                self.emit(value);
                self.context = Context::Comma { object };
                Ok(())
            }
            _ => Err(self.error(ErrorKind::UnexpectedChar)),
        }
    }

    fn step_comma(&mut self, class: CharClass, object: bool) -> Result<(), Error> {
        if self.skip_whitespace_or_comment(class)? {
            return Ok(());
        }
        match class {
            CharClass::ValueSeparator => {
                self.cursor += 1;
                self.context = if object {
                    Context::ObjectKey
                } else {
                    Context::ArrayValue
                };
                Ok(())
            }
            CharClass::EndObject if object => {
                self.cursor += 1;
                self.pop_container()
            }
            CharClass::EndArray if !object => {
                self.cursor += 1;
                self.pop_container()
            }
            CharClass::AsciiControl => Err(self.error(ErrorKind::ControlChar)),
            _ => Err(self.error(ErrorKind::UnexpectedChar)),
        }
    }

    fn push_container(&mut self, object: bool, parent_context: Context) {
        let builder = if object {
            Builder::Object(ObjectBuilder::default())
        } else {
            Builder::Array(ArrayBuilder::default())
        };
        self.stack.push(Frame {
            builder,
            parent_context,
            parent_key: self.current_key.take(),
        });
        self.context = if object {
            Context::ObjectKey
        } else {
            Context::ArrayValue
        };
    }

    fn pop_container(&mut self) -> Result<(), Error> {
        let frame = self.stack.pop().expect("pop_container called with empty stack");
        let value = frame.builder.finalize();
        self.context = frame.parent_context;
        self.current_key = frame.parent_key;
        self.emit(value);
        Ok(())
    }

    /// Delivers a completed value to wherever it belongs: the root list, the
    /// current array builder, or the current object builder under
    /// `current_key`.
    fn emit(&mut self, value: Value<'a>) {
        if self.stack.is_empty() {
            self.roots.push(value);
            return;
        }
        let frame = self.stack.last_mut().expect("non-empty stack");
        match &mut frame.builder {
            Builder::Array(b) => b.add_value(value),
            Builder::Object(b) => {
                let key = self
                    .current_key
                    .take()
                    .expect("ObjectValue context always has a current key");
                b.insert(key, value);
            }
        }
    }

    fn scan_string_value(&mut self) -> Result<Value<'a>, Error> {
        let scan = self.do_scan_string()?;
        Ok(Value::String(scan))
    }

    fn scan_string_key(&mut self) -> Result<Str<'a>, Error> {
        self.do_scan_string()
    }

    /// A well-formed quoted string body never contains a raw `\n` byte (it
    /// is always rejected as `TabNewlineCrInsideQuotes`), so scanning one
    /// never needs to advance the line counter.
    fn do_scan_string(&mut self) -> Result<Str<'a>, Error> {
        let start = self.cursor;
        let body = &self.input[start..];
        match string::scan_string(body) {
            Ok(result) => {
                self.cursor = start + result.consumed;
                Ok(result.value)
            }
            Err((kind, offset)) => Err(self.error_at(kind, start + offset)),
        }
    }

    fn scan_unquoted_value(&mut self) -> Result<Value<'a>, Error> {
        let start = self.cursor;
        let body = &self.input[start..];

        if let Some(scan) = number::scan_number(body) {
            if self.terminator_continues(start + scan.len) {
                return self.reject_or_unquoted(start);
            }
            let literal = core::str::from_utf8(&body[..scan.len])
                .expect("number scan only consumes ASCII digit/sign/dot/e bytes");
            let n = number::build_number(literal, scan.int_part_len);
            self.cursor = start + scan.len;
            return Ok(Value::Number(n));
        }

        if let Some(value) = self.match_keyword(body) {
            let (len, value) = value;
            if self.terminator_continues(start + len) {
                return self.reject_or_unquoted(start);
            }
            self.cursor = start + len;
            return Ok(value);
        }

        if self.options.lenient {
            return Ok(self.scan_unquoted_literal());
        }

        Err(self.error_at(ErrorKind::NotAKeywordOrNumber, start))
    }

    fn scan_unquoted_key(&mut self) -> Result<Str<'a>, Error> {
        let start = self.cursor;
        match self.scan_unquoted_value()? {
            Value::String(s) => Ok(s),
            _ => Err(self.error_at(ErrorKind::InvalidKey, start)),
        }
    }

    /// A tentative keyword/number match must not be immediately followed by
    /// another `Other`-class byte (`spec.md` §4.6, "Terminator
    /// disambiguation"): in strict mode that rejects the input outright, in
    /// lenient mode it means the whole run is re-scanned as one unquoted
    /// literal instead (`reject_or_unquoted` picks the mode-appropriate
    /// outcome; this just detects whether the next byte continues the run).
    fn terminator_continues(&self, end: usize) -> bool {
        matches!(
            self.input.get(end).map(|&b| classifier::classify(b)),
            Some(CharClass::Other)
        )
    }

    fn reject_or_unquoted(&mut self, start: usize) -> Result<Value<'a>, Error> {
        if self.options.lenient {
            self.cursor = start;
            Ok(self.scan_unquoted_literal())
        } else {
            Err(self.error_at(ErrorKind::NotAKeywordOrNumber, start))
        }
    }

    fn match_keyword(&self, body: &'a [u8]) -> Option<(usize, Value<'a>)> {
        for (literal, value) in [
            (&b"null"[..], Value::Null),
            (&b"true"[..], Value::Bool(true)),
            (&b"false"[..], Value::Bool(false)),
        ] {
            if body.starts_with(literal) {
                return Some((literal.len(), value));
            }
        }
        None
    }

    /// Lenient mode only (`spec.md` §4.4): extends the cursor over a run of
    /// `Other`-class bytes and returns it as a string value.
    fn scan_unquoted_literal(&mut self) -> Value<'a> {
        let start = self.cursor;
        let mut end = start;
        while let Some(b) = self.input.get(end) {
            if classifier::classify(*b) != CharClass::Other {
                break;
            }
            end += 1;
        }
        self.cursor = end;
        let text = core::str::from_utf8(&self.input[start..end])
            .unwrap_or("");
        Value::String(Str::from(text))
    }
}

impl Frame<'_> {
    fn is_empty_ref(&self) -> bool {
        self.builder.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(s: &str) -> Result<Value<'_>, Error> {
        parse(s.as_bytes(), Options::strict())
    }

    fn pl(s: &str) -> Result<Value<'_>, Error> {
        parse(s.as_bytes(), Options::lenient())
    }

    #[test]
    fn scalars() {
        assert_eq!(p("true").unwrap(), Value::Bool(true));
        assert_eq!(p("null").unwrap(), Value::Null);
        assert_eq!(
            p("\"hello, world\"").unwrap(),
            Value::String(Str::from("hello, world"))
        );
    }

    #[test]
    fn arrays() {
        assert_eq!(p("[]").unwrap(), Value::Array(alloc::vec![]));
        assert_eq!(p("[null]").unwrap(), Value::Array(alloc::vec![Value::Null]));
        assert_eq!(
            p("[false,true,null,false]").unwrap(),
            Value::Array(alloc::vec![
                Value::Bool(false),
                Value::Bool(true),
                Value::Null,
                Value::Bool(false),
            ])
        );
    }

    #[test]
    fn objects() {
        let v = p(r#"{"a":null,"b":0}"#).unwrap();
        let Value::Object(map) = v else { panic!("expected object") };
        assert_eq!(map.get("a"), Some(&Value::Null));
        assert_eq!(
            map.get("b"),
            Some(&Value::Number(number::build_number("0", 1)))
        );
    }

    #[test]
    fn nested_multi_key_object() {
        let input = r#"{"key":182993,"key2":"value2","key3":null,"key4":["hello","is","this","working"],"key5":{"another":false}}"#;
        let v = p(input).unwrap();
        let Value::Object(map) = v else { panic!("expected object") };
        assert_eq!(map.len(), 5);
        assert_eq!(map.get("key3"), Some(&Value::Null));
        let Some(Value::Array(items)) = map.get("key4") else {
            panic!("expected array at key4")
        };
        assert_eq!(items.len(), 4);
        let Some(Value::Object(inner)) = map.get("key5") else {
            panic!("expected object at key5")
        };
        assert_eq!(inner.get("another"), Some(&Value::Bool(false)));
    }

    #[test]
    fn strict_vs_lenient_unquoted_literal() {
        assert!(matches!(
            p("[a]").unwrap_err().kind(),
            ErrorKind::NotAKeywordOrNumber
        ));
        assert_eq!(
            pl("[a]").unwrap(),
            Value::Array(alloc::vec![Value::String(Str::from("a"))])
        );
    }

    #[test]
    fn lenient_keyword_or_number_followed_by_other_rescans_as_unquoted() {
        // A number/keyword tentative match immediately followed by another
        // `Other`-class byte must be re-scanned as one unquoted literal in
        // lenient mode, not accepted as the number/keyword with the rest
        // left dangling.
        assert_eq!(
            pl("[123abc]").unwrap(),
            Value::Array(alloc::vec![Value::String(Str::from("123abc"))])
        );
        assert_eq!(pl("nullable").unwrap(), Value::String(Str::from("nullable")));
        assert_eq!(pl("trueish").unwrap(), Value::String(Str::from("trueish")));
        assert!(matches!(
            p("123abc").unwrap_err().kind(),
            ErrorKind::NotAKeywordOrNumber
        ));
    }

    #[test]
    fn strict_vs_lenient_trailing_comma() {
        assert!(matches!(p("[1,2,]").unwrap_err().kind(), ErrorKind::UnexpectedChar));
        let v = pl("[1,2,]").unwrap();
        assert_eq!(
            v,
            Value::Array(alloc::vec![
                Value::Number(number::build_number("1", 1)),
                Value::Number(number::build_number("2", 1)),
            ])
        );
    }

    #[test]
    fn unclosed_structures() {
        assert!(matches!(p("{").unwrap_err().kind(), ErrorKind::EndedInsideStructure));
        assert!(matches!(p("[").unwrap_err().kind(), ErrorKind::EndedInsideStructure));
    }

    #[test]
    fn assorted_unexpected_char() {
        for input in ["}", "]", ":", ",", "[}", "[,", "{]", "{,"] {
            let err = p(input).unwrap_err();
            assert!(
                matches!(err.kind(), ErrorKind::UnexpectedChar),
                "input {input:?} produced {:?}",
                err.kind()
            );
        }
    }

    #[test]
    fn raw_control_char_in_string_errors() {
        assert!(matches!(
            p("\"a\tb\"").unwrap_err().kind(),
            ErrorKind::TabNewlineCrInsideQuotes
        ));
        assert!(matches!(
            p("\"a\nb\"").unwrap_err().kind(),
            ErrorKind::TabNewlineCrInsideQuotes
        ));
    }

    #[test]
    fn multi_root() {
        assert!(matches!(p("null null").unwrap_err().kind(), ErrorKind::MultipleRoots));
        let many = parse_many(b"null null", Options::strict()).unwrap();
        assert_eq!(many, alloc::vec![Value::Null, Value::Null]);
    }

    #[test]
    fn empty_input_is_no_json() {
        assert!(matches!(p("").unwrap_err().kind(), ErrorKind::NoJson));
        assert!(matches!(p("   ").unwrap_err().kind(), ErrorKind::NoJson));
    }

    #[test]
    fn lenient_comments_are_skipped() {
        let v = pl("// leading\n{\"a\": 1 /* inline */, \"b\": 2 # trailing\n}").unwrap();
        let Value::Object(map) = v else { panic!("expected object") };
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn non_utf8_encoding_is_rejected() {
        let utf16le = [b'[', 0x00, b' ', 0x00];
        let err = parse(&utf16le, Options::strict()).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::UnsupportedEncoding(_)));
    }
}
