use crate::model::{ConditionConfig, RuleConfig, VmguardConfigV1};
use crate::presets;
use anyhow::Context;
use globset::{Glob, GlobSet, GlobSetBuilder};
use vmguard_domain::{AttrPath, AttrValue, Condition, Rule};
use vmguard_types::ids;

#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub profile: Option<String>,
    pub parallel: Option<bool>,
}

#[derive(Clone, Debug)]
pub struct ResolvedConfig {
    pub profile: String,
    pub parallel: bool,
    /// Rules in evaluation order.
    pub rules: Vec<Rule>,
    pub resource_filter: ResourceFilter,
}

/// Resource identifiers excluded from the audit by `[resources] exclude`.
#[derive(Clone, Debug, Default)]
pub struct ResourceFilter {
    set: Option<GlobSet>,
}

impl ResourceFilter {
    pub fn from_patterns(patterns: &[String]) -> anyhow::Result<Self> {
        Ok(Self {
            set: build_globset("resources.exclude", patterns)?,
        })
    }

    pub fn is_excluded(&self, resource_id: &str) -> bool {
        self.set
            .as_ref()
            .map(|set| set.is_match(resource_id))
            .unwrap_or(false)
    }
}

pub fn resolve_config(
    cfg: VmguardConfigV1,
    overrides: Overrides,
) -> anyhow::Result<ResolvedConfig> {
    let profile = overrides
        .profile
        .clone()
        .or(cfg.profile.clone())
        .unwrap_or_else(|| ids::PROFILE_BASELINE.to_string());

    let mut rules = presets::preset(&profile)?;

    for (index, rc) in cfg.rules.iter().enumerate() {
        let rule = build_rule(rc).with_context(|| {
            format!("invalid rule #{} ({})", index + 1, display_name(&rc.name))
        })?;
        rules.push(rule);
    }

    if let Some(disabled) = build_globset("disable", &cfg.disable)? {
        for pattern in &cfg.disable {
            let glob = Glob::new(pattern)?.compile_matcher();
            if !rules.iter().any(|r| glob.is_match(&r.name)) {
                anyhow::bail!("disable pattern '{pattern}' matches no rule");
            }
        }
        rules.retain(|r| !disabled.is_match(&r.name));
    }

    let resource_filter = ResourceFilter::from_patterns(&cfg.resources.exclude)?;

    let parallel = overrides.parallel.or(cfg.parallel).unwrap_or(false);

    Ok(ResolvedConfig {
        profile,
        parallel,
        rules,
        resource_filter,
    })
}

fn display_name(name: &str) -> &str {
    if name.trim().is_empty() {
        "<unnamed>"
    } else {
        name
    }
}

fn build_rule(rc: &RuleConfig) -> anyhow::Result<Rule> {
    if rc.message.trim().is_empty() {
        anyhow::bail!("message must not be empty");
    }
    let condition = build_condition(&rc.when)?;
    Ok(Rule::new(rc.name.clone(), rc.message.clone(), condition))
}

fn build_condition(cc: &ConditionConfig) -> anyhow::Result<Condition> {
    Ok(match cc {
        ConditionConfig::Absent(path) => Condition::Absent(parse_path(path)?),
        ConditionConfig::Empty(path) => Condition::Empty(parse_path(path)?),
        ConditionConfig::Contains(c) => {
            if c.needle.is_empty() {
                anyhow::bail!("contains: needle must not be empty");
            }
            Condition::Contains {
                path: parse_path(&c.path)?,
                needle: c.needle.clone(),
            }
        }
        ConditionConfig::Equals(c) => Condition::Equals {
            path: parse_path(&c.path)?,
            value: parse_scalar(&c.value)
                .with_context(|| format!("equals: invalid value for {}", c.path))?,
        },
        ConditionConfig::MissingKey(c) => {
            if c.key.is_empty() {
                anyhow::bail!("missing_key: key must not be empty");
            }
            Condition::MissingKey {
                path: parse_path(&c.path)?,
                key: c.key.clone(),
            }
        }
        ConditionConfig::AnyOf(all) => Condition::AnyOf(build_all("any_of", all)?),
        ConditionConfig::AllOf(all) => Condition::AllOf(build_all("all_of", all)?),
    })
}

fn build_all(kind: &str, all: &[ConditionConfig]) -> anyhow::Result<Vec<Condition>> {
    if all.is_empty() {
        anyhow::bail!("{kind}: needs at least one condition");
    }
    all.iter().map(build_condition).collect()
}

fn parse_path(path: &str) -> anyhow::Result<AttrPath> {
    Ok(AttrPath::parse(path)?)
}

fn parse_scalar(value: &serde_json::Value) -> anyhow::Result<AttrValue> {
    match value {
        serde_json::Value::Bool(_)
        | serde_json::Value::Number(_)
        | serde_json::Value::String(_) => Ok(AttrValue::from(value.clone())),
        other => anyhow::bail!("expected a string, number or boolean, got {other}"),
    }
}

fn build_globset(field: &str, patterns: &[String]) -> anyhow::Result<Option<GlobSet>> {
    if patterns.is_empty() {
        return Ok(None);
    }

    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        // Case-sensitive, like rule names and resource identifiers.
        let glob =
            Glob::new(pattern).with_context(|| format!("invalid {field} glob: {pattern}"))?;
        builder.add(glob);
    }
    let set = builder
        .build()
        .with_context(|| format!("build {field} globs"))?;
    Ok(Some(set))
}
