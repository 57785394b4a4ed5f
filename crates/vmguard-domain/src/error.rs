use thiserror::Error;

/// Malformed or duplicate identifiers in the evaluator's inputs.
///
/// Raised before any resource is evaluated.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("rule at position {index} has an empty name")]
    EmptyRuleName { index: usize },

    #[error("duplicate rule name `{name}`")]
    DuplicateRuleName { name: String },

    #[error("resource at position {index} has an empty identifier")]
    EmptyResourceId { index: usize },

    #[error("duplicate resource identifier `{id}`")]
    DuplicateResourceId { id: String },
}

/// An attribute did not have the shape a condition needs.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("attribute `{path}` is {found}, expected {expected}")]
pub struct ShapeError {
    /// Dotted path up to and including the offending segment.
    pub path: String,
    pub expected: &'static str,
    pub found: &'static str,
}

/// A rule could not be applied to a resource.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("rule `{rule}` cannot be applied to resource `{resource_id}`: {source}")]
pub struct EvaluationError {
    pub resource_id: String,
    pub rule: String,
    #[source]
    pub source: ShapeError,
}

/// Every way an audit run can be rejected. No report is produced alongside.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum AuditError {
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("evaluation error: {0}")]
    Evaluation(#[from] EvaluationError),
}

/// An attribute path string could not be parsed.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("invalid attribute path `{path}`: {reason}")]
pub struct PathError {
    pub path: String,
    pub reason: &'static str,
}
