//! Stable identifiers and messages for the built-in rules.
//!
//! Rule names are a dotted namespace: `<area>.<concern>`.

// Rules
pub const RULE_NETWORK_UNRESTRICTED_TRAFFIC: &str = "network.unrestricted_traffic";
pub const RULE_DISK_OS_ENCRYPTION: &str = "disk.os_encryption";
pub const RULE_TAGS_OWNER_REQUIRED: &str = "tags.owner_required";

// Messages (part of the report contract; do not reword)
pub const MSG_UNRESTRICTED_TRAFFIC: &str = "VM allows unrestricted traffic.";
pub const MSG_OS_DISK_NOT_ENCRYPTED: &str = "OS disk is not encrypted.";
pub const MSG_MISSING_OWNER_TAG: &str = "Missing 'owner' tag for tracking responsibility.";

// Attribute conventions used by the built-in rules
pub const ATTR_NETWORK_PROFILE: &str = "network_profile";
pub const ATTR_FIREWALL_RULES_TAG: &str = "tags.firewall_rules";
pub const ATTR_OS_DISK_ENCRYPTION: &str = "storage_profile.os_disk.encryption_settings";
pub const ATTR_TAGS: &str = "tags";
pub const TAG_OWNER: &str = "owner";
pub const MARKER_ALLOW_ALL: &str = "allowAll";

// Profiles
pub const PROFILE_BASELINE: &str = "baseline";
pub const PROFILE_NONE: &str = "none";
