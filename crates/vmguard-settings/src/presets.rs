use vmguard_domain::Rule;
use vmguard_domain::builtin;
use vmguard_types::ids;

/// Preset profiles are opinionated defaults.
///
/// Keep these small and readable. Anything site-specific belongs in `[[rules]]`.
pub fn preset(profile: &str) -> anyhow::Result<Vec<Rule>> {
    match profile {
        ids::PROFILE_BASELINE => Ok(builtin::baseline_rules()),
        ids::PROFILE_NONE => Ok(Vec::new()),
        other => anyhow::bail!(
            "unknown profile: {other} (expected '{}' or '{}')",
            ids::PROFILE_BASELINE,
            ids::PROFILE_NONE
        ),
    }
}
