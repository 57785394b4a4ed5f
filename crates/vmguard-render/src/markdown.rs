use crate::{RenderableReport, RenderableVerdictStatus};

pub fn render_markdown(report: &RenderableReport) -> String {
    let mut out = String::new();

    out.push_str("# vmguard report\n\n");
    let verdict = match report.verdict {
        RenderableVerdictStatus::Pass => "PASS",
        RenderableVerdictStatus::Fail => "FAIL",
        RenderableVerdictStatus::Error => "ERROR",
    };
    let d = &report.data;
    out.push_str(&format!("- Verdict: **{}**\n", verdict));
    out.push_str(&format!("- Profile: `{}`\n", d.profile));
    out.push_str(&format!(
        "- Resources: {} scanned / {} excluded / {} non-compliant\n",
        d.resources_scanned, d.resources_excluded, d.resources_violating
    ));
    out.push_str(&format!(
        "- Rules: {} / Violations: {}\n\n",
        d.rules_evaluated, d.violations_total
    ));

    if let Some(e) = &report.error {
        out.push_str(&format!("> Error: {}\n", e));
        return out;
    }

    if report.violations.is_empty() {
        out.push_str("No violations.\n");
        return out;
    }

    out.push_str("## Violations\n");

    let mut current: Option<&str> = None;
    for v in &report.violations {
        if current != Some(v.resource_id.as_str()) {
            out.push_str(&format!("\n### `{}`\n\n", v.resource_id));
            current = Some(v.resource_id.as_str());
        }
        out.push_str(&format!("- {}\n", v.message));
    }

    out
}
