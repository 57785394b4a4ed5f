use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Non-compliant resources mapped to their violation messages.
///
/// Serializes as `{ "<resource-id>": ["<message>", ...] }`. Resources that are
/// compliant never appear as keys. Keys are kept in lexicographic order so two
/// reports built from the same input serialize to identical bytes.
///
/// Deserializing drops resources with an empty message list, so a report read
/// back from disk keeps the same invariant as one built with [`insert`].
///
/// [`insert`]: ViolationReport::insert
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, JsonSchema)]
#[serde(transparent)]
pub struct ViolationReport(BTreeMap<String, Vec<String>>);

impl ViolationReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the messages for one resource. An empty list is dropped.
    pub fn insert(&mut self, resource_id: impl Into<String>, messages: Vec<String>) {
        if !messages.is_empty() {
            self.0.insert(resource_id.into(), messages);
        }
    }

    pub fn get(&self, resource_id: &str) -> Option<&[String]> {
        self.0.get(resource_id).map(Vec::as_slice)
    }

    pub fn contains(&self, resource_id: &str) -> bool {
        self.0.contains_key(resource_id)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of non-compliant resources.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Number of messages across all resources.
    pub fn total_violations(&self) -> usize {
        self.0.values().map(Vec::len).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0.iter().map(|(id, msgs)| (id.as_str(), msgs.as_slice()))
    }

    pub fn into_inner(self) -> BTreeMap<String, Vec<String>> {
        self.0
    }
}

impl FromIterator<(String, Vec<String>)> for ViolationReport {
    fn from_iter<I: IntoIterator<Item = (String, Vec<String>)>>(iter: I) -> Self {
        let mut report = Self::new();
        for (resource_id, messages) in iter {
            report.insert(resource_id, messages);
        }
        report
    }
}

impl<'de> Deserialize<'de> for ViolationReport {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let map = BTreeMap::<String, Vec<String>>::deserialize(deserializer)?;
        Ok(map.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_message_lists_are_not_recorded() {
        let mut report = ViolationReport::new();
        report.insert("vm-1", Vec::new());
        assert!(report.is_empty());
        assert!(!report.contains("vm-1"));
    }

    #[test]
    fn serializes_as_plain_mapping_in_key_order() {
        let mut report = ViolationReport::new();
        report.insert("vm-b", vec!["second".to_string()]);
        report.insert("vm-a", vec!["first".to_string(), "again".to_string()]);

        let json = serde_json::to_string(&report).expect("serialize");
        assert_eq!(json, r#"{"vm-a":["first","again"],"vm-b":["second"]}"#);
        assert_eq!(report.total_violations(), 3);
        assert_eq!(report.len(), 2);
    }

    #[test]
    fn deserializing_drops_compliant_resources() {
        let report: ViolationReport =
            serde_json::from_str(r#"{"vm-1":[],"vm-2":["OS disk is not encrypted."]}"#)
                .expect("parse");
        assert!(!report.contains("vm-1"));
        assert_eq!(report.len(), 1);
        assert_eq!(
            serde_json::to_string(&report).expect("serialize"),
            r#"{"vm-2":["OS disk is not encrypted."]}"#
        );
    }
}
