use crate::RenderableReport;
use serde_json::json;

/// One compact JSON object per violation, each line newline-terminated.
///
/// Lines carry `resource_id`, `message` and, when known, `fingerprint`, so a
/// log shipper can forward them without reparsing the receipt.
pub fn render_jsonl(report: &RenderableReport) -> String {
    let mut out = String::new();
    for v in &report.violations {
        let mut line = json!({
            "resource_id": v.resource_id,
            "message": v.message,
        });
        if let Some(fp) = &v.fingerprint {
            line["fingerprint"] = json!(fp);
        }
        out.push_str(&line.to_string());
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{report, violation};

    #[test]
    fn one_line_per_violation() {
        let mut v = violation("vm-1", "OS disk is not encrypted.");
        v.fingerprint = Some("abc".to_string());
        let r = report(vec![v, violation("vm-2", "Missing 'owner' tag for tracking responsibility.")]);

        let out = render_jsonl(&r);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(out.ends_with('\n'));

        let first: serde_json::Value = serde_json::from_str(lines[0]).expect("json line");
        assert_eq!(first["resource_id"], "vm-1");
        assert_eq!(first["fingerprint"], "abc");

        let second: serde_json::Value = serde_json::from_str(lines[1]).expect("json line");
        assert!(second.get("fingerprint").is_none());
    }

    #[test]
    fn empty_report_renders_nothing() {
        assert_eq!(render_jsonl(&report(Vec::new())), "");
    }
}
