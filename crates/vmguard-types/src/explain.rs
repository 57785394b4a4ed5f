//! Explain registry for built-in rules.
//!
//! Maps rule names to human-readable explanations with remediation guidance.

use crate::ids;

/// Explanation entry for a rule.
#[derive(Debug, Clone)]
pub struct Explanation {
    /// Short description of the rule.
    pub title: &'static str,
    /// What the rule checks and why it exists.
    pub description: &'static str,
    /// How to fix violations.
    pub remediation: &'static str,
    /// Before/after resource snippets.
    pub examples: ExamplePair,
}

/// Before and after resource snippets (JSON inventory records).
#[derive(Debug, Clone)]
pub struct ExamplePair {
    /// A record that violates the rule.
    pub before: &'static str,
    /// A record that passes the rule.
    pub after: &'static str,
}

/// Look up an explanation by rule name.
///
/// Returns `None` if the name is not a built-in rule.
pub fn lookup_explanation(rule: &str) -> Option<Explanation> {
    match rule {
        ids::RULE_NETWORK_UNRESTRICTED_TRAFFIC => Some(explain_unrestricted_traffic()),
        ids::RULE_DISK_OS_ENCRYPTION => Some(explain_os_encryption()),
        ids::RULE_TAGS_OWNER_REQUIRED => Some(explain_owner_required()),
        _ => None,
    }
}

/// List all built-in rule names, in the order the baseline profile evaluates them.
pub fn all_rule_names() -> &'static [&'static str] {
    &[
        ids::RULE_NETWORK_UNRESTRICTED_TRAFFIC,
        ids::RULE_DISK_OS_ENCRYPTION,
        ids::RULE_TAGS_OWNER_REQUIRED,
    ]
}

fn explain_unrestricted_traffic() -> Explanation {
    Explanation {
        title: "Unrestricted Network Traffic",
        description: "\
Flags virtual machines that may accept traffic from anywhere.

A VM is reported when either:
- it has no `network_profile` at all (absent or null), so no network controls
  can be verified for it, or
- its `firewall_rules` tag contains the `allowAll` marker.

The two conditions are deliberately conservative: the inventory carries no
structured firewall model, so a VM whose network posture cannot be proven is
treated the same as one that openly declares it allows everything.",
        remediation: "\
Attach the VM to a network with an explicit security group and replace the
`allowAll` marker with the rule set actually applied, e.g. `denyAll` plus the
specific inbound allowances the workload needs.",
        examples: ExamplePair {
            before: r#"{
  "id": "vm-web-1",
  "network_profile": null,
  "tags": { "firewall_rules": "allowAll" }
}"#,
            after: r#"{
  "id": "vm-web-1",
  "network_profile": { "network_interfaces": [{ "id": "nic-1" }] },
  "tags": { "firewall_rules": "denyAll" }
}"#,
        },
    }
}

fn explain_os_encryption() -> Explanation {
    Explanation {
        title: "OS Disk Encryption",
        description: "\
Flags virtual machines whose OS disk carries no encryption settings.

The rule inspects `storage_profile.os_disk.encryption_settings` and reports the
VM when that value is absent, null, or empty. An unencrypted OS disk exposes
credentials, logs and application data to anyone who can read the underlying
storage or a snapshot of it.",
        remediation: "\
Enable disk encryption for the OS disk (platform-managed or customer-managed
keys) and make sure the inventory snapshot records the resulting encryption
settings.",
        examples: ExamplePair {
            before: r#"{
  "id": "vm-db-1",
  "storage_profile": { "os_disk": { "encryption_settings": null } }
}"#,
            after: r#"{
  "id": "vm-db-1",
  "storage_profile": { "os_disk": { "encryption_settings": { "enabled": true } } }
}"#,
        },
    }
}

fn explain_owner_required() -> Explanation {
    Explanation {
        title: "Owner Tag Required",
        description: "\
Flags virtual machines without an `owner` key in their tag mapping.

Untagged machines are the ones nobody patches, rotates or decommissions. The
owner tag gives every finding in this report a person or team to route it to.",
        remediation: "\
Add an `owner` tag naming the responsible person or team. The rule checks only
for the presence of the key, so any non-empty convention (email, team alias)
works.",
        examples: ExamplePair {
            before: r#"{
  "id": "vm-batch-7",
  "tags": { "env": "prod" }
}"#,
            after: r#"{
  "id": "vm-batch-7",
  "tags": { "env": "prod", "owner": "data-platform" }
}"#,
        },
    }
}
