//! Render use cases: markdown, GitHub annotations and JSONL from in-memory reports.

use vmguard_render::RenderableReport;

pub fn render_markdown(report: &RenderableReport) -> String {
    vmguard_render::render_markdown(report)
}

pub fn render_annotations(report: &RenderableReport, max: usize) -> Vec<String> {
    vmguard_render::render_github_annotations(report)
        .into_iter()
        .take(max)
        .collect()
}

pub fn render_jsonl(report: &RenderableReport) -> String {
    vmguard_render::render_jsonl(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use vmguard_render::{RenderableData, RenderableVerdictStatus, RenderableViolation};

    fn sample_report() -> RenderableReport {
        let violation = |id: &str, message: &str| RenderableViolation {
            resource_id: id.to_string(),
            message: message.to_string(),
            fingerprint: None,
        };
        RenderableReport {
            verdict: RenderableVerdictStatus::Fail,
            violations: vec![
                violation("vm-1", "OS disk is not encrypted."),
                violation("vm-2", "OS disk is not encrypted."),
            ],
            data: RenderableData {
                profile: "baseline".to_string(),
                resources_scanned: 2,
                resources_excluded: 0,
                rules_evaluated: 3,
                resources_violating: 2,
                violations_total: 2,
            },
            error: None,
        }
    }

    #[test]
    fn render_annotations_respects_max() {
        let report = sample_report();
        let annotations = render_annotations(&report, 1);
        assert_eq!(annotations.len(), 1);
    }

    #[test]
    fn render_markdown_smoke() {
        let report = sample_report();
        let markdown = render_markdown(&report);
        assert!(!markdown.is_empty());
    }

    #[test]
    fn render_jsonl_smoke() {
        assert_eq!(render_jsonl(&sample_report()).lines().count(), 2);
    }
}
