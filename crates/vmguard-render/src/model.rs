#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderableVerdictStatus {
    Pass,
    Fail,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableViolation {
    pub resource_id: String,
    pub message: String,
    pub fingerprint: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct RenderableData {
    pub profile: String,
    pub resources_scanned: u32,
    pub resources_excluded: u32,
    pub rules_evaluated: u32,
    pub resources_violating: u32,
    pub violations_total: u32,
}

/// Flattened view of a receipt: one entry per (resource, message) pair,
/// ordered by resource id and then by rule order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableReport {
    pub verdict: RenderableVerdictStatus,
    pub violations: Vec<RenderableViolation>,
    pub data: RenderableData,
    pub error: Option<String>,
}
