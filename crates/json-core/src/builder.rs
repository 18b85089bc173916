//! Value builders: the transient accumulators for an in-progress array or
//! object (`spec.md` §4.5).
//!
//! The two capability sets (`{add_value, is_empty, finalize}` for arrays,
//! `{set_key, add_value, is_empty, finalize}` for objects) are expressed as
//! a sum type and a `match` in `Parser` rather than as a vtable/trait object
//! — dispatch on which kind of container is open is always exactly one of
//! two possibilities and stays O(1) either way (`spec.md` §9, "Dynamic
//! dispatch for container methods").

use alloc::vec::Vec;

use crate::text::Str;
use crate::value::{Object, Value};

/// An in-progress array: values are appended in order.
#[derive(Debug, Default)]
pub struct ArrayBuilder<'a> {
    items: Vec<Value<'a>>,
}

impl<'a> ArrayBuilder<'a> {
    pub fn add_value(&mut self, value: Value<'a>) {
        self.items.push(value);
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn finalize(self) -> Value<'a> {
        Value::Array(self.items)
    }
}

/// An in-progress object: keys are set one at a time, immediately followed
/// by the value for that key.
///
/// Duplicate keys are last-write-wins, silently — `spec.md` §4.5/§9 leaves
/// this as an open question and resolves it this way; RFC 7159 itself calls
/// the behavior implementation-defined.
#[derive(Debug, Default)]
pub struct ObjectBuilder<'a> {
    entries: Object<'a>,
}

impl<'a> ObjectBuilder<'a> {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Inserts `value` under `key`, silently overwriting any existing value
    /// for that key.
    pub fn insert(&mut self, key: Str<'a>, value: Value<'a>) {
        self.entries.insert(key, value);
    }

    #[must_use]
    pub fn finalize(self) -> Value<'a> {
        Value::Object(self.entries)
    }
}

/// One entry in the parser's builder stack: whichever container kind is
/// currently open, plus the context its parent should resume in once this
/// container finishes.
pub enum Builder<'a> {
    Array(ArrayBuilder<'a>),
    Object(ObjectBuilder<'a>),
}

impl<'a> Builder<'a> {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Array(b) => b.is_empty(),
            Self::Object(b) => b.is_empty(),
        }
    }

    #[must_use]
    pub fn finalize(self) -> Value<'a> {
        match self {
            Self::Array(b) => b.finalize(),
            Self::Object(b) => b.finalize(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn array_builder_appends_in_order() {
        let mut b = ArrayBuilder::default();
        assert!(b.is_empty());
        b.add_value(Value::Bool(true));
        b.add_value(Value::Null);
        assert!(!b.is_empty());
        assert_eq!(
            b.finalize(),
            Value::Array(alloc::vec![Value::Bool(true), Value::Null])
        );
    }

    #[test]
    fn object_builder_last_write_wins() {
        let mut b = ObjectBuilder::default();
        b.insert(Str::from("a"), Value::Bool(false));
        b.insert(Str::from("a"), Value::Bool(true));
        let Value::Object(map) = b.finalize() else {
            panic!("expected object");
        };
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("a"), Some(&Value::Bool(true)));
    }
}
