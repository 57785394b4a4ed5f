//! Pure compliance evaluation (no IO, no logging).
//!
//! Input: resource records fetched elsewhere, plus an ordered rule set.
//! Output: a sparse violation report, or an error that rejects the whole run.

#![forbid(unsafe_code)]

pub mod builtin;
pub mod error;
pub mod fingerprint;
pub mod model;
pub mod rule;
pub mod value;

mod engine;

#[cfg(test)]
mod proptest;
#[cfg(test)]
mod test_support;

pub use engine::{evaluate, evaluate_parallel};
pub use error::{AuditError, ConfigurationError, EvaluationError, PathError, ShapeError};
pub use model::Resource;
pub use rule::{Condition, Predicate, Rule};
pub use value::{AttrPath, AttrValue, Attributes};
pub use vmguard_types::ViolationReport;
