//! Shared test utilities for the vmguard workspace.
//!
//! This crate exists because `xtask` needs `normalize_nondeterministic` at
//! runtime (not behind `#[cfg(test)]`), so a `#[cfg(test)]` module inside
//! `vmguard-types` would not suffice.

use serde_json::Value;

const ENVELOPE_KEYS: [&str; 5] = ["schema", "tool", "verdict", "data", "violations"];

/// Normalize non-deterministic receipt fields for golden-file comparison.
///
/// Only the root object is touched, and only when it looks like a receipt
/// (has `schema`, `tool`, `verdict`, `data` and `violations`). Violation keys
/// are arbitrary resource identifiers, so nothing below the root is rewritten.
///
/// - `tool.version` becomes `"__VERSION__"`
/// - `started_at` / `finished_at` become `"__TIMESTAMP__"`
pub fn normalize_nondeterministic(mut value: Value) -> Value {
    let Some(obj) = value.as_object_mut() else {
        return value;
    };
    if !ENVELOPE_KEYS.iter().all(|k| obj.contains_key(*k)) {
        return value;
    }

    if let Some(tool_obj) = obj.get_mut("tool").and_then(Value::as_object_mut)
        && tool_obj.contains_key("version")
    {
        tool_obj.insert(
            "version".to_string(),
            Value::String("__VERSION__".to_string()),
        );
    }

    for key in ["started_at", "finished_at"] {
        if obj.contains_key(key) {
            obj.insert(key.to_string(), Value::String("__TIMESTAMP__".to_string()));
        }
    }

    value
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn normalizes_receipt_envelope() {
        let input = json!({
            "schema": "vmguard.report.v1",
            "tool": { "name": "vmguard", "version": "0.1.0" },
            "started_at": "2026-01-01T00:00:00Z",
            "finished_at": "2026-01-01T00:00:01Z",
            "verdict": "fail",
            "data": { "profile": "baseline" },
            "violations": { "vm-1": ["OS disk is not encrypted."] }
        });

        let result = normalize_nondeterministic(input);

        assert_eq!(result["tool"]["version"], "__VERSION__");
        assert_eq!(result["tool"]["name"], "vmguard");
        assert_eq!(result["started_at"], "__TIMESTAMP__");
        assert_eq!(result["finished_at"], "__TIMESTAMP__");
        assert_eq!(result["violations"]["vm-1"][0], "OS disk is not encrypted.");
    }

    #[test]
    fn resource_named_like_a_timestamp_key_is_untouched() {
        let input = json!({
            "schema": "vmguard.report.v1",
            "tool": { "name": "vmguard", "version": "0.1.0" },
            "started_at": "2026-01-01T00:00:00Z",
            "verdict": "fail",
            "data": {},
            "violations": { "started_at": ["Missing 'owner' tag for tracking responsibility."] }
        });

        let result = normalize_nondeterministic(input);
        assert_eq!(
            result["violations"]["started_at"][0],
            "Missing 'owner' tag for tracking responsibility."
        );
    }

    #[test]
    fn non_envelope_is_returned_unchanged() {
        let input = json!({
            "tool": { "name": "x", "version": "1" },
            "started_at": "2026-01-01T00:00:00Z"
        });
        assert_eq!(normalize_nondeterministic(input.clone()), input);
        assert_eq!(normalize_nondeterministic(json!([1, 2])), json!([1, 2]));
    }
}
