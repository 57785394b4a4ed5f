use crate::error::{AuditError, ConfigurationError, EvaluationError};
use crate::model::Resource;
use crate::rule::Rule;
use rayon::prelude::*;
use std::collections::BTreeSet;
use vmguard_types::ViolationReport;

/// Evaluate every rule against every resource, in input order.
///
/// Resources without violations are omitted from the report. Any error
/// rejects the whole run; a returned report always covers every resource.
pub fn evaluate(resources: &[Resource], rules: &[Rule]) -> Result<ViolationReport, AuditError> {
    validate(resources, rules)?;

    let mut report = ViolationReport::new();
    for resource in resources {
        let messages = evaluate_resource(resource, rules)?;
        report.insert(resource.id.clone(), messages);
    }
    Ok(report)
}

/// Same contract as [`evaluate`], with resources spread over the rayon pool.
///
/// Rule order inside each entry is unchanged. When several resources fail,
/// the error of the earliest one in input order is returned.
pub fn evaluate_parallel(
    resources: &[Resource],
    rules: &[Rule],
) -> Result<ViolationReport, AuditError> {
    validate(resources, rules)?;

    let outcomes: Vec<Result<Vec<String>, EvaluationError>> = resources
        .par_iter()
        .map(|resource| evaluate_resource(resource, rules))
        .collect();

    let mut report = ViolationReport::new();
    for (resource, outcome) in resources.iter().zip(outcomes) {
        report.insert(resource.id.clone(), outcome?);
    }
    Ok(report)
}

fn evaluate_resource(resource: &Resource, rules: &[Rule]) -> Result<Vec<String>, EvaluationError> {
    let mut messages = Vec::new();
    for rule in rules {
        let violated = rule.check(resource).map_err(|source| EvaluationError {
            resource_id: resource.id.clone(),
            rule: rule.name.clone(),
            source,
        })?;
        if violated {
            messages.push(rule.message.clone());
        }
    }
    Ok(messages)
}

fn validate(resources: &[Resource], rules: &[Rule]) -> Result<(), ConfigurationError> {
    let mut names = BTreeSet::new();
    for (index, rule) in rules.iter().enumerate() {
        if rule.name.trim().is_empty() {
            return Err(ConfigurationError::EmptyRuleName { index });
        }
        if !names.insert(rule.name.as_str()) {
            return Err(ConfigurationError::DuplicateRuleName {
                name: rule.name.clone(),
            });
        }
    }

    let mut ids = BTreeSet::new();
    for (index, resource) in resources.iter().enumerate() {
        if resource.id.trim().is_empty() {
            return Err(ConfigurationError::EmptyResourceId { index });
        }
        if !ids.insert(resource.id.as_str()) {
            return Err(ConfigurationError::DuplicateResourceId {
                id: resource.id.clone(),
            });
        }
    }

    Ok(())
}
