use anyhow::Context;
use time::OffsetDateTime;
use vmguard_domain::fingerprint::fingerprint_for_violation;
use vmguard_render::{
    RenderableData, RenderableReport, RenderableVerdictStatus, RenderableViolation,
};
use vmguard_types::{
    AuditData, AuditReceipt, FailureKind, RunFailure, SCHEMA_REPORT_V1, ToolMeta, Verdict,
    ViolationReport,
};

pub fn parse_report_json(text: &str) -> anyhow::Result<AuditReceipt> {
    let value: serde_json::Value = serde_json::from_str(text).context("parse report json")?;

    let schema = value
        .get("schema")
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .to_string();

    if schema != SCHEMA_REPORT_V1 {
        anyhow::bail!("unknown report schema: {schema}");
    }

    serde_json::from_value(value).context("parse vmguard v1 report")
}

pub fn serialize_report(receipt: &AuditReceipt) -> anyhow::Result<Vec<u8>> {
    serde_json::to_vec_pretty(receipt).context("serialize report")
}

pub fn to_renderable(receipt: &AuditReceipt) -> RenderableReport {
    let violations = receipt
        .violations
        .iter()
        .flat_map(|(resource_id, messages)| {
            messages.iter().map(move |message| RenderableViolation {
                resource_id: resource_id.to_string(),
                message: message.clone(),
                fingerprint: Some(fingerprint_for_violation(resource_id, message)),
            })
        })
        .collect();

    let d = &receipt.data;
    RenderableReport {
        verdict: match receipt.verdict {
            Verdict::Pass => RenderableVerdictStatus::Pass,
            Verdict::Fail => RenderableVerdictStatus::Fail,
            Verdict::Error => RenderableVerdictStatus::Error,
        },
        violations,
        data: RenderableData {
            profile: d.profile.clone(),
            resources_scanned: d.resources_scanned,
            resources_excluded: d.resources_excluded,
            rules_evaluated: d.rules_evaluated,
            resources_violating: d.resources_violating,
            violations_total: d.violations_total,
        },
        error: receipt.error.as_ref().map(|e| e.message.clone()),
    }
}

/// Receipt for a run that failed outside the engine (unreadable files, bad config).
pub fn runtime_error_receipt(message: &str) -> AuditReceipt {
    let now = OffsetDateTime::now_utc();
    AuditReceipt {
        schema: SCHEMA_REPORT_V1.to_string(),
        tool: ToolMeta {
            name: "vmguard".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        started_at: now,
        finished_at: now,
        verdict: Verdict::Error,
        data: AuditData {
            profile: "unknown".to_string(),
            ..AuditData::default()
        },
        violations: ViolationReport::new(),
        error: Some(RunFailure {
            kind: FailureKind::Runtime,
            message: message.to_string(),
            resource_id: None,
            rule: None,
        }),
    }
}
