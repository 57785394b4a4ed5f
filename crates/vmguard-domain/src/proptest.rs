//! Property-based tests for the domain crate.
//!
//! These tests use proptest to verify invariants around:
//! - Report determinism and sparsity
//! - Rule-order preservation inside each entry
//! - Sequential and parallel evaluation agreeing

use crate::builtin::baseline_rules;
use crate::engine::{evaluate, evaluate_parallel};
use crate::model::Resource;
use crate::rule::{Condition, Rule};
use crate::value::{AttrPath, AttrValue, Attributes};
use proptest::prelude::*;
use std::collections::BTreeSet;

// ============================================================================
// Strategies for generating arbitrary values
// ============================================================================

/// Attribute keys drawn from a small alphabet so rules actually hit them.
fn arb_key() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("tags".to_string()),
        Just("owner".to_string()),
        Just("network_profile".to_string()),
        Just("firewall_rules".to_string()),
        "[a-z]{1,6}",
    ]
}

fn arb_scalar() -> impl Strategy<Value = AttrValue> {
    prop_oneof![
        Just(AttrValue::Null),
        any::<bool>().prop_map(AttrValue::Bool),
        (-1000i64..1000).prop_map(AttrValue::from),
        prop_oneof![
            Just("allowAll".to_string()),
            Just("denyAll".to_string()),
            Just(String::new()),
            "[a-zA-Z]{0,8}",
        ]
        .prop_map(AttrValue::String),
    ]
}

/// Nested attribute values (mappings up to three levels deep).
fn arb_value() -> impl Strategy<Value = AttrValue> {
    arb_scalar().prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..3).prop_map(AttrValue::List),
            prop::collection::btree_map(arb_key(), inner, 0..4).prop_map(AttrValue::Map),
        ]
    })
}

fn arb_attributes() -> impl Strategy<Value = Attributes> {
    prop::collection::btree_map(arb_key(), arb_value(), 0..5)
}

/// Resources with unique identifiers.
fn arb_resources() -> impl Strategy<Value = Vec<Resource>> {
    prop::collection::vec(arb_attributes(), 0..12).prop_map(|attrs| {
        attrs
            .into_iter()
            .enumerate()
            .map(|(i, a)| Resource::with_attributes(format!("vm-{i}"), a))
            .collect()
    })
}

/// Top-level paths: a lookup that never steps into a nested value.
fn arb_top_level_path() -> impl Strategy<Value = AttrPath> {
    arb_key().prop_map(|key| AttrPath::parse(&key).expect("generated keys are non-empty"))
}

/// Conditions that never raise shape errors, so every run produces a report.
fn arb_total_condition() -> impl Strategy<Value = Condition> {
    prop_oneof![
        arb_top_level_path().prop_map(Condition::Absent),
        arb_top_level_path().prop_map(Condition::Empty),
        (arb_top_level_path(), arb_scalar())
            .prop_map(|(path, value)| Condition::Equals { path, value }),
    ]
}

/// Rules with unique names and messages that encode their position.
fn arb_rules() -> impl Strategy<Value = Vec<Rule>> {
    prop::collection::vec(arb_total_condition(), 0..6).prop_map(|conds| {
        conds
            .into_iter()
            .enumerate()
            .map(|(i, c)| Rule::new(format!("rule.{i}"), format!("message {i}"), c))
            .collect()
    })
}

/// Drop resources whose shape would make any rule (including the baseline) fail.
fn shape_safe(resources: Vec<Resource>, rules: &[Rule]) -> Vec<Resource> {
    resources
        .into_iter()
        .filter(|r| rules.iter().all(|rule| rule.check(r).is_ok()))
        .collect()
}

// ============================================================================
// Property tests: report shape
// ============================================================================

proptest! {
    #[test]
    fn evaluation_is_deterministic(resources in arb_resources(), rules in arb_rules()) {
        let first = evaluate(&resources, &rules);
        let second = evaluate(&resources, &rules);
        prop_assert_eq!(&first, &second);

        if let (Ok(a), Ok(b)) = (first, second) {
            prop_assert_eq!(
                serde_json::to_vec(&a).expect("serialize"),
                serde_json::to_vec(&b).expect("serialize")
            );
        }
    }

    #[test]
    fn empty_rule_set_gives_empty_report(resources in arb_resources()) {
        let report = evaluate(&resources, &[]).expect("no rules cannot fail");
        prop_assert!(report.is_empty());
    }

    #[test]
    fn empty_resource_set_gives_empty_report(rules in arb_rules()) {
        let report = evaluate(&[], &rules).expect("no resources cannot fail");
        prop_assert!(report.is_empty());
    }

    #[test]
    fn compliant_resources_never_appear(resources in arb_resources(), rules in arb_rules()) {
        let report = evaluate(&resources, &rules).expect("total conditions");
        for resource in &resources {
            let violated_any = rules
                .iter()
                .any(|rule| rule.check(resource).expect("total conditions"));
            prop_assert_eq!(report.contains(&resource.id), violated_any);
        }
    }

    #[test]
    fn messages_follow_rule_order(resources in arb_resources(), rules in arb_rules()) {
        let report = evaluate(&resources, &rules).expect("total conditions");
        for (_, messages) in report.iter() {
            let positions: Vec<usize> = messages
                .iter()
                .map(|m| {
                    rules
                        .iter()
                        .position(|r| &r.message == m)
                        .expect("message comes from a rule")
                })
                .collect();
            let mut sorted = positions.clone();
            sorted.sort_unstable();
            prop_assert_eq!(positions, sorted);
        }
    }

    #[test]
    fn parallel_agrees_with_sequential(resources in arb_resources(), rules in arb_rules()) {
        prop_assert_eq!(
            evaluate_parallel(&resources, &rules),
            evaluate(&resources, &rules)
        );
    }

    #[test]
    fn baseline_reports_only_baseline_messages(resources in arb_resources()) {
        let rules = baseline_rules();
        let resources = shape_safe(resources, &rules);
        let known: BTreeSet<&str> = rules.iter().map(|r| r.message.as_str()).collect();

        let report = evaluate(&resources, &rules).expect("shape-safe resources");
        for (_, messages) in report.iter() {
            prop_assert!(!messages.is_empty());
            prop_assert!(messages.len() <= rules.len());
            for m in messages {
                prop_assert!(known.contains(m.as_str()));
            }
        }
    }
}
