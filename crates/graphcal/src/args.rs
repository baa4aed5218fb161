//! Caller-supplied arguments for an endpoint call.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// A single argument slot.
#[derive(Debug, Clone, PartialEq)]
pub enum Field {
    /// A present value. Never JSON `null`.
    Value(Value),
    /// Explicitly set to null. Sent as `null` in a request body so the field
    /// is cleared server-side; treated as absent in path and query position.
    Clear,
}

/// Arguments keyed by logical name (`user_id`, `select`, `is_all_day`).
///
/// A key that was never set is absent. Setting a key to JSON `null` also
/// leaves it absent, matching the behavior of tool-calling frameworks that
/// send `null` for "not provided". Falsy values such as `false`, `0`, `""`
/// and `[]` are present. Use [`Arguments::clear`] to send an explicit `null`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Arguments {
    values: BTreeMap<String, Field>,
}

impl Arguments {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds arguments from a JSON object, skipping `null` members.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `input` is neither an object nor
    /// `null`.
    pub fn from_json(input: Value) -> Result<Self> {
        match input {
            Value::Null => Ok(Self::new()),
            Value::Object(map) => Ok(Self::from_map(map)),
            _ => Err(Error::InvalidArgument {
                argument: "input".to_string(),
                expected: "a JSON object",
            }),
        }
    }

    /// Builds arguments from a JSON map, skipping `null` members.
    pub fn from_map(map: Map<String, Value>) -> Self {
        let mut args = Self::new();
        for (name, value) in map {
            args.insert(name, value);
        }
        args
    }

    /// Sets `name` to `value`. A JSON `null` removes the argument.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    /// Marks `name` as explicitly null.
    #[must_use]
    pub fn clear(mut self, name: impl Into<String>) -> Self {
        self.values.insert(name.into(), Field::Clear);
        self
    }

    /// Sets `name` to `value`. A JSON `null` removes the argument.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        let name = name.into();
        match value.into() {
            Value::Null => {
                self.values.remove(&name);
            }
            value => {
                self.values.insert(name, Field::Value(value));
            }
        }
    }

    /// The present value of `name`, if any. Cleared arguments yield `None`.
    pub fn value(&self, name: &str) -> Option<&Value> {
        match self.values.get(name) {
            Some(Field::Value(value)) => Some(value),
            Some(Field::Clear) | None => None,
        }
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.values.get(name)
    }

    /// Names of every set or cleared argument.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl From<Map<String, Value>> for Arguments {
    fn from(map: Map<String, Value>) -> Self {
        Self::from_map(map)
    }
}
