//! Config parsing and profile/preset resolution.
//!
//! This crate is intentionally IO-free: it parses and resolves configuration provided as strings.

#![forbid(unsafe_code)]

mod model;
mod presets;
mod resolve;

pub use model::{
    ConditionConfig, ContainsConfig, EqualsConfig, MissingKeyConfig, ResourcesConfig, RuleConfig,
    VmguardConfigV1,
};
pub use resolve::{Overrides, ResolvedConfig, ResourceFilter};

/// Parse `vmguard.toml` (or equivalent) into a typed model.
pub fn parse_config_toml(input: &str) -> anyhow::Result<VmguardConfigV1> {
    let cfg: VmguardConfigV1 = toml::from_str(input)?;
    Ok(cfg)
}

/// Resolve the rule set and run options used by the engine (profile + overrides + custom rules).
pub fn resolve_config(
    cfg: VmguardConfigV1,
    overrides: Overrides,
) -> anyhow::Result<ResolvedConfig> {
    resolve::resolve_config(cfg, overrides)
}
