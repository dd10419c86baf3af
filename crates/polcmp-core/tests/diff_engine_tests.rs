//! Structural diff engine tests.
//!
//! All tests are pure: JSON values in, reports out.

use polcmp_core::diff::{compare, DiffValue};
use polcmp_core::errors::PcErrorKind;
use proptest::prelude::*;
use serde_json::{json, Value};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn arb_scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|n| json!(n)),
        "[a-z]{0,8}".prop_map(Value::String),
    ]
}

fn arb_json() -> impl Strategy<Value = Value> {
    arb_scalar().prop_recursive(4, 48, 6, |inner| {
        prop_oneof![
            proptest::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
            proptest::collection::vec(("[a-z]{1,6}", inner), 0..6)
                .prop_map(|entries| Value::Object(entries.into_iter().collect())),
        ]
    })
}

/// A policy-shaped document as returned by `GET policies/<id>`.
fn sample_policy(name: &str, firewall_state: &str, rule_ids: &[u64]) -> Value {
    json!({
        "name": name,
        "parentID": 1,
        "policySettings": {
            "firewallSettingEngineOptionVerifyTcpChecksumEnabled": {"value": "false"},
            "platformSettingAgentCommunicationsDirection": {"value": "Agent/Appliance Initiated"}
        },
        "firewall": {
            "state": firewall_state,
            "ruleIDs": rule_ids
        },
        "ID": 7
    })
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn prop_compare_is_reflexive(value in arb_json()) {
        let report = compare(&value, &value).unwrap();
        prop_assert!(report.identical());
        prop_assert!(report.differences().is_empty());
    }

    #[test]
    fn prop_distinct_scalars_yield_one_root_entry(a in arb_scalar(), b in arb_scalar()) {
        prop_assume!(a != b);
        let report = compare(&a, &b).unwrap();
        prop_assert_eq!(report.differences().len(), 1);
        let entry = &report.differences()[0];
        prop_assert_eq!(entry.path.as_str(), "");
        prop_assert_eq!(&entry.value1, &DiffValue::Value(a.clone()));
        prop_assert_eq!(&entry.value2, &DiffValue::Value(b.clone()));
    }

    #[test]
    fn prop_scalar_array_order_is_ignored(items in proptest::collection::vec(arb_scalar(), 0..10)) {
        let mut reversed = items.clone();
        reversed.reverse();
        let report = compare(&Value::Array(items), &Value::Array(reversed)).unwrap();
        prop_assert!(report.identical());
    }
}

// ---------------------------------------------------------------------------
// Objects
// ---------------------------------------------------------------------------

#[test]
fn test_object_value_change_reported_at_key() {
    let report = compare(&json!({"a": 1, "b": 2}), &json!({"a": 1, "b": 3})).unwrap();

    assert!(!report.identical());
    assert_eq!(report.differences().len(), 1);
    let entry = &report.differences()[0];
    assert_eq!(entry.path, "b");
    assert_eq!(entry.value1, DiffValue::Value(json!(2)));
    assert_eq!(entry.value2, DiffValue::Value(json!(3)));
}

#[test]
fn test_missing_right_key_compared_against_null() {
    let report = compare(&json!({"a": 1}), &json!({})).unwrap();

    assert_eq!(report.differences().len(), 1);
    let entry = &report.differences()[0];
    assert_eq!(entry.path, "a");
    assert_eq!(entry.value1, DiffValue::Value(json!(1)));
    assert_eq!(entry.value2, DiffValue::Value(Value::Null));
}

#[test]
fn test_right_only_keys_are_not_visited() {
    let report = compare(&json!({"a": 1}), &json!({"a": 1, "extra": true})).unwrap();
    assert!(report.identical());
}

#[test]
fn test_nested_paths_are_slash_joined() {
    let left = json!({"firewall": {"settings": {"mode": "tap"}}});
    let right = json!({"firewall": {"settings": {"mode": "inline"}}});

    let report = compare(&left, &right).unwrap();

    assert_eq!(report.differences().len(), 1);
    assert_eq!(report.differences()[0].path, "firewall/settings/mode");
}

#[test]
fn test_object_against_scalar_is_single_entry() {
    let report = compare(&json!({"x": {"y": 1}}), &json!({"x": 5})).unwrap();

    assert_eq!(report.differences().len(), 1);
    let entry = &report.differences()[0];
    assert_eq!(entry.path, "x");
    assert_eq!(entry.value1, DiffValue::Value(json!({"y": 1})));
    assert_eq!(entry.value2, DiffValue::Value(json!(5)));
}

#[test]
fn test_differences_follow_left_key_order() {
    let left = json!({"z": 1, "a": 1, "m": {"q": 1, "b": 1}});
    let right = json!({"a": 2, "m": {"b": 2, "q": 2}, "z": 2});

    let report = compare(&left, &right).unwrap();

    let paths: Vec<&str> = report.differences().iter().map(|e| e.path.as_str()).collect();
    assert_eq!(paths, vec!["z", "a", "m/q", "m/b"]);
}

#[test]
fn test_policy_documents_diff() {
    let left = sample_policy("Base Policy", "on", &[10, 11, 12]);
    let right = sample_policy("Linux Servers", "on", &[11, 12, 13]);

    let report = compare(&left, &right).unwrap();

    let paths: Vec<&str> = report.differences().iter().map(|e| e.path.as_str()).collect();
    assert_eq!(paths, vec!["name", "firewall/ruleIDs"]);

    let rules = report.entry_at("firewall/ruleIDs").unwrap();
    assert_eq!(rules.value1, DiffValue::Set(vec![json!(10)]));
    assert_eq!(rules.value2, DiffValue::Set(vec![json!(13)]));
}

// ---------------------------------------------------------------------------
// Arrays
// ---------------------------------------------------------------------------

#[test]
fn test_array_set_difference() {
    let report = compare(&json!({"tags": [1, 2, 3]}), &json!({"tags": [2, 3, 4]})).unwrap();

    assert_eq!(report.differences().len(), 1);
    let entry = &report.differences()[0];
    assert_eq!(entry.path, "tags");
    assert_eq!(entry.value1, DiffValue::Set(vec![json!(1)]));
    assert_eq!(entry.value2, DiffValue::Set(vec![json!(4)]));
}

#[test]
fn test_array_order_independence() {
    let report = compare(&json!([1, 2, 3]), &json!([3, 2, 1])).unwrap();
    assert!(report.identical());
}

#[test]
fn test_one_sided_array_difference_has_empty_other_set() {
    let report = compare(&json!(["a", "b"]), &json!(["a"])).unwrap();

    let entry = report.entry_at("").unwrap();
    assert_eq!(entry.value1, DiffValue::Set(vec![json!("b")]));
    assert_eq!(entry.value2, DiffValue::Set(vec![]));
}

#[test]
fn test_array_against_non_array_uses_equality() {
    let report = compare(&json!({"x": [1]}), &json!({"x": "1"})).unwrap();

    let entry = report.entry_at("x").unwrap();
    assert_eq!(entry.value1, DiffValue::Value(json!([1])));
    assert_eq!(entry.value2, DiffValue::Value(json!("1")));
}

#[test]
fn test_equal_composite_arrays_are_accepted() {
    let doc = json!({"interfaces": [{"name": "eth0"}, {"name": "eth1"}]});
    let report = compare(&doc, &doc.clone()).unwrap();
    assert!(report.identical());
}

#[test]
fn test_unequal_composite_arrays_are_rejected() {
    let left = json!({"interfaces": [{"name": "eth0"}]});
    let right = json!({"interfaces": [{"name": "eth1"}]});

    let err = compare(&left, &right).unwrap_err();

    assert_eq!(err.kind(), PcErrorKind::UnsupportedArrayElement);
    assert_eq!(err.code(), "ERR_UNSUPPORTED_ARRAY_ELEMENT");
    assert_eq!(err.path(), Some("interfaces"));
}

#[test]
fn test_nested_array_element_rejected_even_if_only_on_right() {
    let err = compare(&json!([1]), &json!([1, [2]])).unwrap_err();
    assert_eq!(err.kind(), PcErrorKind::UnsupportedArrayElement);
    assert_eq!(err.path(), Some("<root>"));
}

// ---------------------------------------------------------------------------
// Numbers
// ---------------------------------------------------------------------------

#[test]
fn test_integer_and_integral_float_scalars_are_equal() {
    let report = compare(&json!({"v": 1}), &json!({"v": 1.0})).unwrap();
    assert!(report.identical(), "{:?}", report.differences());
}

#[test]
fn test_signed_zero_is_equal_as_scalar_and_set_member() {
    assert!(compare(&json!(0.0), &json!(-0.0)).unwrap().identical());
    assert!(compare(&json!([0.0, 1]), &json!([1, -0.0])).unwrap().identical());
}

#[test]
fn test_fractional_numbers_still_differ() {
    let report = compare(&json!({"ratio": 0.5}), &json!({"ratio": 0.75})).unwrap();

    assert_eq!(report.differences().len(), 1);
    assert_eq!(report.differences()[0].value1, DiffValue::Value(json!(0.5)));
}
