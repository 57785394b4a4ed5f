//! Rendering utilities for CI surfaces (Markdown, GitHub annotations, JSONL).

#![forbid(unsafe_code)]

mod gha;
mod jsonl;
mod markdown;
mod model;

pub use gha::render_github_annotations;
pub use jsonl::render_jsonl;
pub use markdown::render_markdown;
pub use model::{RenderableData, RenderableReport, RenderableVerdictStatus, RenderableViolation};

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::*;

    pub fn violation(resource_id: &str, message: &str) -> RenderableViolation {
        RenderableViolation {
            resource_id: resource_id.to_string(),
            message: message.to_string(),
            fingerprint: None,
        }
    }

    pub fn report(violations: Vec<RenderableViolation>) -> RenderableReport {
        let mut ids: Vec<&str> = violations.iter().map(|v| v.resource_id.as_str()).collect();
        ids.dedup();
        RenderableReport {
            verdict: if violations.is_empty() {
                RenderableVerdictStatus::Pass
            } else {
                RenderableVerdictStatus::Fail
            },
            data: RenderableData {
                profile: "baseline".to_string(),
                resources_scanned: 2,
                resources_excluded: 0,
                rules_evaluated: 3,
                resources_violating: ids.len() as u32,
                violations_total: violations.len() as u32,
            },
            violations,
            error: None,
        }
    }
}
