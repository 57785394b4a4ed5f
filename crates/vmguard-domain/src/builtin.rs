//! The baseline rule set, expressed as ordinary configuration data.
//!
//! Nothing in the engine knows about these rules; operators can drop any of
//! them or add their own next to them.

use crate::rule::{Condition, Rule};
use crate::value::AttrPath;
use vmguard_types::ids;

/// Baseline rules in evaluation order.
pub fn baseline_rules() -> Vec<Rule> {
    vec![
        unrestricted_traffic(),
        os_disk_encryption(),
        owner_tag_required(),
    ]
}

/// No network profile, or a `firewall_rules` tag carrying the `allowAll` marker.
pub fn unrestricted_traffic() -> Rule {
    Rule::new(
        ids::RULE_NETWORK_UNRESTRICTED_TRAFFIC,
        ids::MSG_UNRESTRICTED_TRAFFIC,
        Condition::AnyOf(vec![
            Condition::Absent(path(ids::ATTR_NETWORK_PROFILE)),
            Condition::Contains {
                path: path(ids::ATTR_FIREWALL_RULES_TAG),
                needle: ids::MARKER_ALLOW_ALL.to_string(),
            },
        ]),
    )
}

pub fn os_disk_encryption() -> Rule {
    Rule::new(
        ids::RULE_DISK_OS_ENCRYPTION,
        ids::MSG_OS_DISK_NOT_ENCRYPTED,
        Condition::Empty(path(ids::ATTR_OS_DISK_ENCRYPTION)),
    )
}

pub fn owner_tag_required() -> Rule {
    Rule::new(
        ids::RULE_TAGS_OWNER_REQUIRED,
        ids::MSG_MISSING_OWNER_TAG,
        Condition::MissingKey {
            path: path(ids::ATTR_TAGS),
            key: ids::TAG_OWNER.to_string(),
        },
    )
}

fn path(s: &str) -> AttrPath {
    AttrPath::parse(s).expect("built-in attribute paths are valid")
}
