//! Config resolution shared by `check` and `rules`.

use anyhow::Context;
use vmguard_settings::{Overrides, ResolvedConfig, VmguardConfigV1};

/// Parse and resolve config text. An empty file means defaults.
pub fn resolve_rules(config_text: &str, overrides: Overrides) -> anyhow::Result<ResolvedConfig> {
    let cfg = if config_text.trim().is_empty() {
        VmguardConfigV1::default()
    } else {
        vmguard_settings::parse_config_toml(config_text).context("parse config")?
    };

    let resolved = vmguard_settings::resolve_config(cfg, overrides).context("resolve config")?;
    for rule in &resolved.rules {
        tracing::debug!(rule = %rule.name, "rule resolved");
    }
    Ok(resolved)
}

/// One line per rule, in evaluation order: `name<TAB>message`.
pub fn format_rules(resolved: &ResolvedConfig) -> String {
    let mut out = String::new();
    for rule in &resolved.rules {
        out.push_str(&format!("{}\t{}\n", rule.name, rule.message));
    }
    out
}
