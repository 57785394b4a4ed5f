//! Rules and the declarative conditions they are built from.

use crate::error::ShapeError;
use crate::model::Resource;
use crate::value::{AttrPath, AttrValue, Attributes};
use std::fmt;
use std::sync::Arc;

/// A total function over a resource's attributes.
///
/// `Ok(true)` means the resource violates the rule. Missing attributes are
/// ordinary input; only a value of the wrong shape may produce an error.
pub trait Predicate: fmt::Debug + Send + Sync {
    fn violated(&self, attrs: &Attributes) -> Result<bool, ShapeError>;
}

/// Declarative violation conditions. Each variant describes when a resource
/// is *non-compliant*.
#[derive(Clone, Debug, PartialEq)]
pub enum Condition {
    /// The value is absent or null.
    Absent(AttrPath),
    /// The value is absent, null, `""`, `[]` or `{}`.
    Empty(AttrPath),
    /// The value is a string containing `needle`. Absent values are compliant.
    Contains { path: AttrPath, needle: String },
    /// The value equals `value`. Absent values are compliant.
    Equals { path: AttrPath, value: AttrValue },
    /// The mapping at `path` has no `key`. An absent mapping has no keys.
    MissingKey { path: AttrPath, key: String },
    /// Any sub-condition holds.
    AnyOf(Vec<Condition>),
    /// Every sub-condition holds.
    AllOf(Vec<Condition>),
}

impl Condition {
    fn eval(&self, attrs: &Attributes) -> Result<bool, ShapeError> {
        match self {
            Condition::Absent(path) => Ok(path.lookup(attrs)?.is_none()),
            Condition::Empty(path) => Ok(path.lookup(attrs)?.is_none_or(AttrValue::is_empty)),
            Condition::Contains { path, needle } => match path.lookup(attrs)? {
                None => Ok(false),
                Some(AttrValue::String(s)) => Ok(s.contains(needle.as_str())),
                Some(other) => Err(shape(path, "a string", other)),
            },
            Condition::Equals { path, value } => Ok(path.lookup(attrs)? == Some(value)),
            Condition::MissingKey { path, key } => match path.lookup(attrs)? {
                None => Ok(true),
                Some(AttrValue::Map(map)) => Ok(!map.contains_key(key)),
                Some(other) => Err(shape(path, "a mapping", other)),
            },
            // Every branch is evaluated so a malformed attribute is reported
            // even when an earlier branch already decided the outcome.
            Condition::AnyOf(all) => {
                let mut hit = false;
                for c in all {
                    hit |= c.eval(attrs)?;
                }
                Ok(hit)
            }
            Condition::AllOf(all) => {
                let mut hit = true;
                for c in all {
                    hit &= c.eval(attrs)?;
                }
                Ok(hit)
            }
        }
    }
}

fn shape(path: &AttrPath, expected: &'static str, found: &AttrValue) -> ShapeError {
    ShapeError {
        path: path.to_string(),
        expected,
        found: found.kind(),
    }
}

impl Predicate for Condition {
    fn violated(&self, attrs: &Attributes) -> Result<bool, ShapeError> {
        self.eval(attrs)
    }
}

/// A named check with the message reported when a resource violates it.
#[derive(Clone, Debug)]
pub struct Rule {
    pub name: String,
    pub message: String,
    predicate: Arc<dyn Predicate>,
}

impl Rule {
    pub fn new(
        name: impl Into<String>,
        message: impl Into<String>,
        predicate: impl Predicate + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
            predicate: Arc::new(predicate),
        }
    }

    /// Returns `Ok(true)` when `resource` violates this rule.
    pub fn check(&self, resource: &Resource) -> Result<bool, ShapeError> {
        self.predicate.violated(&resource.attributes)
    }
}
