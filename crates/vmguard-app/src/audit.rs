//! The `check` use case: evaluate the rule set and produce a receipt.

use crate::rules::resolve_rules;
use anyhow::Context;
use camino::Utf8Path;
use time::OffsetDateTime;
use vmguard_domain::{AuditError, Resource, ViolationReport};
use vmguard_settings::{Overrides, ResolvedConfig};
use vmguard_types::{
    AuditData, AuditReceipt, FailureKind, RunFailure, SCHEMA_REPORT_V1, ToolMeta, Verdict,
};

/// Where the resources come from.
#[derive(Clone, Debug)]
pub enum InventorySource<'a> {
    /// A JSON snapshot file, or a directory of them.
    Path(&'a Utf8Path),
    /// Resources already fetched by the caller.
    Resources(Vec<Resource>),
}

/// Input for the audit use case.
#[derive(Clone, Debug)]
pub struct AuditInput<'a> {
    /// Config file contents (empty string if not found).
    pub config_text: &'a str,
    /// CLI overrides.
    pub overrides: Overrides,
    pub inventory: InventorySource<'a>,
}

/// Output from the audit use case.
#[derive(Clone, Debug)]
pub struct AuditOutput {
    pub receipt: AuditReceipt,
    /// The resolved configuration used.
    pub resolved_config: ResolvedConfig,
}

/// Run the audit use case: resolve config, load inventory, evaluate, produce a receipt.
///
/// Config and inventory problems are returned as `Err`. Failures raised by the
/// engine itself produce an `Ok` receipt with verdict `error`, so the
/// offending resource and rule are preserved in structured form.
pub fn run_audit(input: AuditInput<'_>) -> anyhow::Result<AuditOutput> {
    let started_at = OffsetDateTime::now_utc();

    let resolved = resolve_rules(input.config_text, input.overrides)?;

    let loaded = match input.inventory {
        InventorySource::Path(path) => {
            vmguard_inventory::load_inventory(path).context("load inventory")?
        }
        InventorySource::Resources(resources) => resources,
    };

    let total = loaded.len();
    let resources: Vec<Resource> = loaded
        .into_iter()
        .filter(|r| !resolved.resource_filter.is_excluded(&r.id))
        .collect();
    let excluded = total - resources.len();

    tracing::info!(
        profile = %resolved.profile,
        resources = resources.len(),
        excluded,
        rules = resolved.rules.len(),
        parallel = resolved.parallel,
        "audit started"
    );

    let outcome = if resolved.parallel {
        vmguard_domain::evaluate_parallel(&resources, &resolved.rules)
    } else {
        vmguard_domain::evaluate(&resources, &resolved.rules)
    };

    let mut data = AuditData {
        profile: resolved.profile.clone(),
        resources_scanned: count(resources.len()),
        resources_excluded: count(excluded),
        rules_evaluated: count(resolved.rules.len()),
        resources_violating: 0,
        violations_total: 0,
    };

    let (verdict, violations, error) = match outcome {
        Ok(report) => {
            data.resources_violating = count(report.len());
            data.violations_total = count(report.total_violations());
            let verdict = if report.is_empty() {
                Verdict::Pass
            } else {
                Verdict::Fail
            };
            (verdict, report, None)
        }
        Err(err) => {
            tracing::error!(error = %err, "audit rejected");
            (Verdict::Error, ViolationReport::new(), Some(failure_from(&err)))
        }
    };

    let receipt = AuditReceipt {
        schema: SCHEMA_REPORT_V1.to_string(),
        tool: ToolMeta {
            name: "vmguard".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        started_at,
        finished_at: OffsetDateTime::now_utc(),
        verdict,
        data,
        violations,
        error,
    };

    tracing::info!(
        verdict = ?receipt.verdict,
        violating = receipt.data.resources_violating,
        violations = receipt.data.violations_total,
        "audit finished"
    );

    Ok(AuditOutput {
        receipt,
        resolved_config: resolved,
    })
}

fn failure_from(err: &AuditError) -> RunFailure {
    match err {
        AuditError::Configuration(e) => RunFailure {
            kind: FailureKind::Configuration,
            message: e.to_string(),
            resource_id: None,
            rule: None,
        },
        AuditError::Evaluation(e) => RunFailure {
            kind: FailureKind::Evaluation,
            message: e.to_string(),
            resource_id: Some(e.resource_id.clone()),
            rule: Some(e.rule.clone()),
        },
    }
}

fn count(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

/// Map verdict to exit code: 0 = pass, 2 = violations, 1 = error.
pub fn verdict_exit_code(verdict: Verdict) -> i32 {
    match verdict {
        Verdict::Pass => 0,
        Verdict::Fail => 2,
        Verdict::Error => 1,
    }
}
