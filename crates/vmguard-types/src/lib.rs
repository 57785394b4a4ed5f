//! Stable DTOs and IDs used across the vmguard workspace.
//!
//! This crate is intentionally boring:
//! - data types for the emitted receipt
//! - the violation report shape shared by the engine and every output surface
//! - stable rule names and built-in violation messages
//! - explain registry for remediation guidance

#![forbid(unsafe_code)]

pub mod explain;
pub mod ids;
pub mod receipt;
pub mod violations;

pub use explain::{lookup_explanation, ExamplePair, Explanation};
pub use receipt::{
    AuditData, AuditReceipt, FailureKind, RunFailure, ToolMeta, Verdict, SCHEMA_REPORT_V1,
};
pub use violations::ViolationReport;
