//! The borrowed-or-owned text seam backing [`crate::Value::String`], object
//! keys, and [`crate::Number::HugeLiteral`].
//!
//! A string with no escape sequences is scanned as a borrowed view straight
//! into the caller's input buffer — no allocation. A string containing any
//! escape must be unescaped into an owned buffer at construction time, per
//! `spec.md` §4.2 and §3 ("Lifecycle").

use alloc::boxed::Box;
use alloc::borrow::Borrow;
use alloc::string::String;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::ops::Deref;

/// A string that is either a zero-copy view into the original input, or an
/// owned buffer (built when unescaping was required).
#[derive(Debug, Clone)]
pub enum Str<'a> {
    Borrowed(&'a str),
    Owned(Box<str>),
}

impl<'a> Str<'a> {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Borrowed(s) => s,
            Self::Owned(s) => s,
        }
    }

    #[must_use]
    pub fn is_borrowed(&self) -> bool {
        matches!(self, Self::Borrowed(_))
    }
}

impl<'a> From<&'a str> for Str<'a> {
    fn from(s: &'a str) -> Self {
        Self::Borrowed(s)
    }
}

impl From<String> for Str<'_> {
    fn from(s: String) -> Self {
        Self::Owned(s.into_boxed_str())
    }
}

impl<'a> Deref for Str<'a> {
    type Target = str;

    fn deref(&self) -> &str {
        self.as_str()
    }
}

/// Lets `hashbrown::HashMap<Str, _>::get` be called with a plain `&str` key,
/// the same way `std::collections::HashMap<String, _>` borrows as `&str`.
impl Borrow<str> for Str<'_> {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl PartialEq for Str<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for Str<'_> {}

impl Hash for Str<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_str().hash(state);
    }
}

impl fmt::Display for Str<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
