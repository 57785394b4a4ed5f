//! The `explain` use case: look up built-in rule documentation.

use vmguard_types::explain::{self, Explanation};

/// Output from the explain use case.
#[derive(Clone, Debug)]
pub enum ExplainOutput {
    /// Found an explanation for the rule.
    Found(Explanation),
    /// Unknown rule; includes the available built-in rule names.
    NotFound {
        rule: String,
        available_rules: &'static [&'static str],
    },
}

/// Look up an explanation for a built-in rule name.
pub fn run_explain(rule: &str) -> ExplainOutput {
    match explain::lookup_explanation(rule) {
        Some(exp) => ExplainOutput::Found(exp),
        None => ExplainOutput::NotFound {
            rule: rule.to_string(),
            available_rules: explain::all_rule_names(),
        },
    }
}

/// Format an explanation for terminal display.
pub fn format_explanation(exp: &Explanation) -> String {
    let mut out = String::new();

    out.push_str(exp.title);
    out.push('\n');
    out.push_str(&"=".repeat(exp.title.len()));
    out.push_str("\n\n");
    out.push_str(exp.description);
    out.push_str("\n\n");
    out.push_str("Remediation\n");
    out.push_str("-----------\n");
    out.push_str(exp.remediation);
    out.push_str("\n\n");
    out.push_str("Examples\n");
    out.push_str("--------\n\n");
    out.push_str("Before (violation):\n");
    out.push_str("```json\n");
    out.push_str(exp.examples.before);
    out.push('\n');
    out.push_str("```\n\n");
    out.push_str("After (compliant):\n");
    out.push_str("```json\n");
    out.push_str(exp.examples.after);
    out.push('\n');
    out.push_str("```\n");

    out
}

/// Format the "not found" error message for terminal display.
pub fn format_not_found(rule: &str, available_rules: &[&'static str]) -> String {
    let mut out = String::new();

    out.push_str(&format!("Unknown rule: {}\n\n", rule));
    out.push_str("Built-in rules:\n");
    for name in available_rules {
        out.push_str(&format!("  - {}\n", name));
    }

    out
}
