use crate::{RenderableReport, RenderableVerdictStatus};

/// Render violations as GitHub Actions workflow command annotations.
///
/// Format:
/// `::error title={resource_id}::{message}`
pub fn render_github_annotations(report: &RenderableReport) -> Vec<String> {
    let mut out = Vec::new();

    if report.verdict == RenderableVerdictStatus::Error {
        let message = report.error.as_deref().unwrap_or("audit did not complete");
        out.push(format!("::error title=vmguard::{}", escape_data(message)));
        return out;
    }

    for v in &report.violations {
        out.push(format!(
            "::error title={}::{}",
            escape_property(&v.resource_id),
            escape_data(&v.message)
        ));
    }

    out
}

fn escape_data(s: &str) -> String {
    s.replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

// Property values additionally reserve `:` and `,`.
fn escape_property(s: &str) -> String {
    escape_data(s).replace(':', "%3A").replace(',', "%2C")
}
