//! Tagged attribute values and dotted attribute paths.
//!
//! Inventory records are arbitrary nested JSON. Rules never touch raw JSON:
//! they pattern-match on [`AttrValue`] and walk [`AttrPath`]s, where a missing
//! key is an ordinary "absent" result rather than an error.

use crate::error::{PathError, ShapeError};
use serde::Serialize;
use serde::de::{Deserialize, Deserializer};
use serde_json::{Number, Value};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

pub type Attributes = BTreeMap<String, AttrValue>;

#[derive(Clone, Debug, Default, Serialize)]
#[serde(untagged)]
pub enum AttrValue {
    #[default]
    Null,
    Bool(bool),
    /// Kept as parsed: integers stay exact, only floats are floats.
    Number(Number),
    String(String),
    List(Vec<AttrValue>),
    Map(Attributes),
}

impl AttrValue {
    /// Shape name used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            AttrValue::Null => "null",
            AttrValue::Bool(_) => "a boolean",
            AttrValue::Number(_) => "a number",
            AttrValue::String(_) => "a string",
            AttrValue::List(_) => "a list",
            AttrValue::Map(_) => "a mapping",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, AttrValue::Null)
    }

    pub fn is_scalar(&self) -> bool {
        matches!(
            self,
            AttrValue::Bool(_) | AttrValue::Number(_) | AttrValue::String(_)
        )
    }

    /// Null, `""`, `[]` and `{}` are empty. Booleans and numbers never are.
    pub fn is_empty(&self) -> bool {
        match self {
            AttrValue::Null => true,
            AttrValue::Bool(_) | AttrValue::Number(_) => false,
            AttrValue::String(s) => s.is_empty(),
            AttrValue::List(items) => items.is_empty(),
            AttrValue::Map(map) => map.is_empty(),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttrValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&Attributes> {
        match self {
            AttrValue::Map(map) => Some(map),
            _ => None,
        }
    }
}

impl From<Value> for AttrValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => AttrValue::Null,
            Value::Bool(b) => AttrValue::Bool(b),
            Value::Number(n) => AttrValue::Number(n),
            Value::String(s) => AttrValue::String(s),
            Value::Array(items) => AttrValue::List(items.into_iter().map(Into::into).collect()),
            Value::Object(map) => {
                AttrValue::Map(map.into_iter().map(|(k, v)| (k, v.into())).collect())
            }
        }
    }
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        AttrValue::Bool(value)
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        AttrValue::String(value.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        AttrValue::String(value)
    }
}

impl From<i64> for AttrValue {
    fn from(value: i64) -> Self {
        AttrValue::Number(value.into())
    }
}

impl From<u64> for AttrValue {
    fn from(value: u64) -> Self {
        AttrValue::Number(value.into())
    }
}

/// Non-finite floats have no JSON form and become null.
impl From<f64> for AttrValue {
    fn from(value: f64) -> Self {
        Number::from_f64(value).map_or(AttrValue::Null, AttrValue::Number)
    }
}

impl PartialEq for AttrValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (AttrValue::Null, AttrValue::Null) => true,
            (AttrValue::Bool(a), AttrValue::Bool(b)) => a == b,
            (AttrValue::Number(a), AttrValue::Number(b)) => numbers_equal(a, b),
            (AttrValue::String(a), AttrValue::String(b)) => a == b,
            (AttrValue::List(a), AttrValue::List(b)) => a == b,
            (AttrValue::Map(a), AttrValue::Map(b)) => a == b,
            _ => false,
        }
    }
}

/// Integers compare exactly; a float on either side compares as `f64`,
/// so `1` and `1.0` are equal but `2^53` and `2^53 + 1` are not.
fn numbers_equal(a: &Number, b: &Number) -> bool {
    if a.is_f64() || b.is_f64() {
        return a.as_f64() == b.as_f64();
    }
    match (a.as_i64(), b.as_i64()) {
        (Some(x), Some(y)) => x == y,
        (None, None) => a.as_u64() == b.as_u64(),
        // One side exceeds i64::MAX, the other fits: never equal.
        _ => false,
    }
}

impl From<Attributes> for AttrValue {
    fn from(value: Attributes) -> Self {
        AttrValue::Map(value)
    }
}

impl<'de> Deserialize<'de> for AttrValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(AttrValue::from)
    }
}

/// A dotted path into nested attribute mappings, e.g. `storage_profile.os_disk`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct AttrPath {
    segments: Vec<String>,
}

impl AttrPath {
    pub fn parse(input: &str) -> Result<Self, PathError> {
        let invalid = |reason| PathError {
            path: input.to_string(),
            reason,
        };

        if input.trim().is_empty() {
            return Err(invalid("path is empty"));
        }
        let segments: Vec<String> = input.split('.').map(str::to_string).collect();
        if segments.iter().any(|s| s.is_empty()) {
            return Err(invalid("path contains an empty segment"));
        }
        if segments.iter().any(|s| s.trim() != s) {
            return Err(invalid("segments must not have surrounding whitespace"));
        }
        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Resolve the path against `attrs`.
    ///
    /// Returns `Ok(None)` when any segment is missing or null. Stepping into a
    /// value that is not a mapping is a [`ShapeError`].
    pub fn lookup<'a>(&self, attrs: &'a Attributes) -> Result<Option<&'a AttrValue>, ShapeError> {
        let mut current = attrs;
        let last = self.segments.len() - 1;

        for (i, segment) in self.segments.iter().enumerate() {
            let value = match current.get(segment) {
                None | Some(AttrValue::Null) => return Ok(None),
                Some(value) => value,
            };
            if i == last {
                return Ok(Some(value));
            }
            match value {
                AttrValue::Map(next) => current = next,
                other => {
                    return Err(ShapeError {
                        path: self.segments[..=i].join("."),
                        expected: "a mapping",
                        found: other.kind(),
                    });
                }
            }
        }

        Ok(None)
    }
}

impl FromStr for AttrPath {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AttrPath::parse(s)
    }
}

impl fmt::Display for AttrPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("."))
    }
}
