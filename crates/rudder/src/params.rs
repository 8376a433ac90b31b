//! Invocation parameters.
//!
//! A [`ParamSet`] holds everything an invocation carried besides the route:
//! named option values (unique keys, last occurrence wins) and unnamed
//! positional values in their original order. It is built once by the
//! parser and consumed read-only by the resolved action.

use serde::Serialize;
use std::collections::HashMap;

/// The value of a named option.
///
/// Bare `--name` options produce a boolean flag; `--name=value` options
/// produce text. Serializes untagged, so flags become JSON booleans and
/// text values become JSON strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ParamValue {
    /// A bare option with no `=`, e.g. `--force`.
    Flag(bool),
    /// An option with an explicit value, e.g. `--name=Ada`. The value may
    /// be empty (`--name=`).
    Text(String),
}

impl ParamValue {
    /// Returns the text value, or `None` for flags.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::Text(value) => Some(value),
            ParamValue::Flag(_) => None,
        }
    }

    /// Interprets the value as a boolean.
    ///
    /// Flags report their own state; text values are true for `"1"` and
    /// (case-insensitively) `"true"`.
    pub fn as_bool(&self) -> bool {
        match self {
            ParamValue::Flag(value) => *value,
            ParamValue::Text(value) => value == "1" || value.eq_ignore_ascii_case("true"),
        }
    }
}

/// Named and positional parameters for one invocation.
///
/// # Example
///
/// ```rust
/// use rudder::{ParamSet, ParamValue};
///
/// let mut params = ParamSet::new();
/// params.insert("name", ParamValue::Text("Ada".into()));
/// params.push_positional("extra");
///
/// assert_eq!(params.get_str("name"), Some("Ada"));
/// assert_eq!(params.positional(), ["extra"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ParamSet {
    named: HashMap<String, ParamValue>,
    positional: Vec<String>,
}

impl ParamSet {
    /// Creates an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a named option value, replacing any previous value for the
    /// same name.
    pub fn insert(&mut self, name: impl Into<String>, value: ParamValue) {
        self.named.insert(name.into(), value);
    }

    /// Appends an unnamed positional value.
    pub fn push_positional(&mut self, value: impl Into<String>) {
        self.positional.push(value.into());
    }

    /// Returns the value of a named option, if present.
    pub fn named(&self, name: &str) -> Option<&ParamValue> {
        self.named.get(name)
    }

    /// Returns the text value of a named option.
    ///
    /// `None` if the option is absent or is a bare flag.
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.named.get(name).and_then(ParamValue::as_str)
    }

    /// Returns true if the named option is present and truthy.
    pub fn get_flag(&self, name: &str) -> bool {
        self.named.get(name).is_some_and(ParamValue::as_bool)
    }

    /// Returns true if a named option is present, regardless of its value.
    pub fn contains(&self, name: &str) -> bool {
        self.named.contains_key(name)
    }

    /// The positional values, in invocation order.
    pub fn positional(&self) -> &[String] {
        &self.positional
    }

    /// Returns true if there are no named or positional values.
    pub fn is_empty(&self) -> bool {
        self.named.is_empty() && self.positional.is_empty()
    }
}
