use crate::ViolationReport;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Stable schema identifier for vmguard receipts.
pub const SCHEMA_REPORT_V1: &str = "vmguard.report.v1";

/// Outcome of one audit run. Maps cleanly to CI exit codes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    /// Every resource was evaluated and none violated a rule.
    Pass,
    /// Every resource was evaluated and at least one violated a rule.
    Fail,
    /// The run did not complete; `violations` carries no information.
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ToolMeta {
    pub name: String,
    pub version: String,
}

/// vmguard-specific summary payload for the receipt.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Default)]
pub struct AuditData {
    pub profile: String,

    pub resources_scanned: u32,
    #[serde(default)]
    pub resources_excluded: u32,
    pub rules_evaluated: u32,

    pub resources_violating: u32,
    pub violations_total: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Duplicate or empty rule names / resource identifiers.
    Configuration,
    /// A rule could not be applied to a resource's attribute shape.
    Evaluation,
    /// Anything outside the engine: unreadable files, bad config syntax.
    Runtime,
}

/// Why a run produced no verdict.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RunFailure {
    pub kind: FailureKind,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule: Option<String>,
}

/// The JSON envelope written by `vmguard check`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AuditReceipt {
    /// Versioned schema identifier for the envelope shape.
    pub schema: String,
    pub tool: ToolMeta,
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub started_at: OffsetDateTime,
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub finished_at: OffsetDateTime,
    pub verdict: Verdict,
    pub data: AuditData,
    /// Non-compliant resources only. Always empty when `verdict` is `error`.
    pub violations: ViolationReport,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<RunFailure>,
}

impl AuditReceipt {
    pub fn has_violations(&self) -> bool {
        !self.violations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    fn receipt(verdict: Verdict, violations: ViolationReport) -> AuditReceipt {
        AuditReceipt {
            schema: SCHEMA_REPORT_V1.to_string(),
            tool: ToolMeta {
                name: "vmguard".to_string(),
                version: "0.1.0".to_string(),
            },
            started_at: datetime!(2026-01-02 03:04:05 UTC),
            finished_at: datetime!(2026-01-02 03:04:06 UTC),
            verdict,
            data: AuditData::default(),
            violations,
            error: None,
        }
    }

    #[test]
    fn timestamps_serialize_as_rfc3339() {
        let value = serde_json::to_value(receipt(Verdict::Pass, ViolationReport::new()))
            .expect("serialize");
        assert_eq!(value["started_at"], "2026-01-02T03:04:05Z");
        assert_eq!(value["verdict"], "pass");
        assert!(value.get("error").is_none());
    }

    #[test]
    fn receipt_round_trips_through_json() {
        let mut violations = ViolationReport::new();
        violations.insert("vm-1", vec!["OS disk is not encrypted.".to_string()]);
        let original = receipt(Verdict::Fail, violations);

        let text = serde_json::to_string(&original).expect("serialize");
        let parsed: AuditReceipt = serde_json::from_str(&text).expect("parse");
        assert_eq!(parsed, original);
        assert!(parsed.has_violations());
    }
}
