//! Use case orchestration for vmguard.
//!
//! This crate provides the application layer: use cases that coordinate the domain, inventory,
//! settings, and render layers. It is intentionally thin and delegates heavy lifting to them.
//!
//! The CLI crate depends on this; it only handles argument parsing and I/O.

#![forbid(unsafe_code)]

mod audit;
mod explain;
mod render;
mod report;
mod rules;
mod sink;

pub use audit::{AuditInput, AuditOutput, InventorySource, run_audit, verdict_exit_code};
pub use explain::{ExplainOutput, format_explanation, format_not_found, run_explain};
pub use render::{render_annotations, render_jsonl, render_markdown};
pub use report::{parse_report_json, runtime_error_receipt, serialize_report, to_renderable};
pub use rules::{format_rules, resolve_rules};
pub use sink::{JsonlSink, ReportSink, TracingSink};
