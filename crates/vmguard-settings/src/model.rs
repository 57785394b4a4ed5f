use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// `vmguard.toml` schema v1.
///
/// This is a *user-facing* config model: it is intentionally permissive so forward-compat is easy.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct VmguardConfigV1 {
    /// Optional schema string for tooling (`vmguard.config.v1`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// Preset rule set: `baseline` (default) or `none`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,

    /// Evaluate resources concurrently.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parallel: Option<bool>,

    /// Glob patterns over rule names; matching rules are dropped.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub disable: Vec<String>,

    #[serde(default)]
    pub resources: ResourcesConfig,

    /// Custom rules, evaluated after the preset rules in file order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rules: Vec<RuleConfig>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ResourcesConfig {
    /// Glob patterns over resource identifiers; matching resources are not audited.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclude: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RuleConfig {
    pub name: String,
    /// Reported verbatim for every violating resource.
    pub message: String,
    /// When a resource is non-compliant.
    pub when: ConditionConfig,
}

/// Violation condition. Paths are dotted (`storage_profile.os_disk`).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ConditionConfig {
    Absent(String),
    Empty(String),
    Contains(ContainsConfig),
    Equals(EqualsConfig),
    MissingKey(MissingKeyConfig),
    AnyOf(Vec<ConditionConfig>),
    AllOf(Vec<ConditionConfig>),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ContainsConfig {
    pub path: String,
    pub needle: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct EqualsConfig {
    pub path: String,
    /// A string, number or boolean.
    pub value: serde_json::Value,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct MissingKeyConfig {
    pub path: String,
    pub key: String,
}
