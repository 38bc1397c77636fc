//! Property-based tests for the validation pipeline

use proptest::prelude::*;
use serde_json::{json, Value};
use sluice::prelude::*;
use sluice::{assert_accepted, assert_missing, assert_rejected, ResultStore};

fn scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::from),
        "[a-z0-9 ]{0,10}".prop_map(Value::from),
    ]
}

fn fresh(options: Options) -> Validator {
    Validator::with_registry(Registry::with_builtins(), options).unwrap()
}

proptest! {
    #[test]
    fn prop_canonize_off_stores_input(value in scalar()) {
        let mut v = fresh(Options::new().canonize(false));
        v.validate("bool", "b", value.clone()).unwrap();
        v.validate("boolArray", "bs", json!([value.clone(), value.clone()])).unwrap();

        assert_accepted!(v, "b", value.clone());
        assert_accepted!(v, "bs", json!([value.clone(), value]));
    }

    #[test]
    fn prop_reset_then_replay_matches_fresh_instance(
        calls in prop::collection::vec(
            (prop::sample::select(vec!["num", "str", "bool", "positiveInt", "numArray"]), scalar()),
            0..10,
        ),
    ) {
        let registry = Registry::with_builtins();
        let replay = |v: &mut Validator| {
            for (i, (name, value)) in calls.iter().enumerate() {
                v.validate(name, &format!("f{}", i % 4), value.clone()).unwrap();
            }
        };

        let mut v = Validator::with_registry(registry.clone(), Options::new()).unwrap();
        replay(&mut v);
        v.reset();
        prop_assert_eq!(v.results(), &ResultStore::new());
        replay(&mut v);

        let mut once = Validator::with_registry(registry, Options::new()).unwrap();
        replay(&mut once);

        prop_assert_eq!(v.results(), once.results());
    }

    #[test]
    fn prop_sequence_short_circuit_stores_original(
        prefix in prop::collection::vec(0i64..1000, 0..6),
        bad in "[a-z]{1,6}",
        suffix in prop::collection::vec(0i64..1000, 0..6),
    ) {
        let mut items: Vec<Value> = prefix.into_iter().map(|n| json!(n.to_string())).collect();
        items.push(json!(bad));
        items.extend(suffix.into_iter().map(Value::from));
        let input = Value::Array(items);

        let mut v = fresh(Options::new());
        v.validate("numArray", "xs", input.clone()).unwrap();

        assert_rejected!(v, "xs", input);
    }

    #[test]
    fn prop_keyed_canonizes_every_value_in_order(
        pairs in prop::collection::vec(("[a-z]{1,5}", 0i64..1000), 0..8),
    ) {
        let input: serde_json::Map<String, Value> = pairs
            .iter()
            .map(|(k, n)| (k.clone(), json!(n.to_string())))
            .collect();
        let expected: serde_json::Map<String, Value> = input
            .iter()
            .map(|(k, v)| (k.clone(), json!(v.as_str().unwrap().parse::<i64>().unwrap())))
            .collect();

        let mut v = fresh(Options::new());
        v.validate("numObject", "m", Value::Object(input.clone())).unwrap();

        let stored = v.valid().unwrap()["m"].clone().unwrap();
        let keys: Vec<_> = stored.as_object().unwrap().keys().cloned().collect();
        let input_keys: Vec<_> = input.keys().cloned().collect();
        prop_assert_eq!(keys, input_keys);
        prop_assert_eq!(stored, Value::Object(expected));
    }

    #[test]
    fn prop_optional_absent_yields_default(default in scalar()) {
        let mut v = fresh(Options::new());
        let options = Options::new().optional(true).default_value(default.clone());
        v.call("num", "n", None, options.clone()).unwrap();
        v.call("numArray", "ns", None, options).unwrap();

        assert_accepted!(v, "n", default.clone());
        assert_accepted!(v, "ns", default);
    }

    #[test]
    fn prop_stop_after_first_error(good in 0i64..100, bad in "[a-z]{1,5}") {
        let mut v = fresh(Options::new().stop_after_first_error(true));
        v.validate("num", "first", good).unwrap();
        v.validate("num", "broken", bad.clone()).unwrap();
        v.validate("num", "later", good).unwrap();

        assert_accepted!(v, "first", good);
        assert_rejected!(v, "broken", bad);
        assert_missing!(v, "later");
    }

    #[test]
    fn prop_key_lives_in_one_partition(first in scalar(), second in scalar()) {
        let mut v = fresh(Options::new());
        v.validate("num", "k", first).unwrap();
        v.validate("num", "k", second).unwrap();

        let accepted = v.results().accepted().contains_key("k");
        let rejected = v.results().rejected().contains_key("k");
        prop_assert!(accepted ^ rejected);
    }
}

#[test]
fn test_optional_absent_without_default_respects_return_undefined() {
    let mut v = fresh(Options::new());
    v.call("str", "kept", None, Options::new().optional(true)).unwrap();
    v.call(
        "str",
        "dropped",
        None,
        Options::new().optional(true).return_undefined(false),
    )
    .unwrap();

    assert_eq!(v.valid().unwrap().get("kept"), Some(&None));
    assert_missing!(v, "dropped");
}

#[test]
fn test_absent_is_not_null() {
    let mut v = fresh(Options::new());
    v.call("defined", "absent", None, Options::new()).unwrap();
    v.call("defined", "null", Some(Value::Null), Options::new()).unwrap();

    assert_rejected!(v, "absent");
    assert_eq!(v.results().rejected()["absent"], None);
    assert_accepted!(v, "null", Value::Null);
}

#[test]
fn test_non_collections_are_rejected_by_collection_shapes() {
    let mut v = fresh(Options::new().return_null_on_errors(false));
    v.validate("numArray", "scalar", 1).unwrap();
    v.validate("numArray", "object", json!({"a": 1})).unwrap();
    v.validate("numObject", "array", json!([1])).unwrap();
    v.validate("numArray", "empty", json!([])).unwrap();

    assert_rejected!(v, "scalar", 1);
    assert_rejected!(v, "object", json!({"a": 1}));
    assert_rejected!(v, "array", json!([1]));
    assert_accepted!(v, "empty", json!([]));
}
