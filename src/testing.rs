//! Testing utilities for code built on Sluice
//!
//! Assertion macros that look into a [`Validator`](crate::Validator)'s result
//! store, and (with the `proptest` feature) strategies for generating JSON
//! input.
//!
//! The macros read the store directly, so they work whatever
//! `returnNullOnErrors` says.
//!
//! # Examples
//!
//! ```rust
//! use serde_json::json;
//! use sluice::{assert_accepted, assert_missing, assert_rejected};
//! use sluice::{Options, Registry, Validator};
//!
//! let mut v = Validator::with_registry(Registry::with_builtins(), Options::new()).unwrap();
//! v.validate("num", "n", "7").unwrap();
//! v.validate("num", "bad", "seven").unwrap();
//!
//! assert_accepted!(v, "n", 7);
//! assert_rejected!(v, "bad", "seven");
//! assert_missing!(v, "other");
//! ```

/// Assert that a field was accepted, optionally with a given value.
///
/// # Example
///
/// ```rust
/// use sluice::{assert_accepted, Options, Registry, Validator};
///
/// let mut v = Validator::with_registry(Registry::with_builtins(), Options::new()).unwrap();
/// v.validate("bool", "flag", "false").unwrap();
/// assert_accepted!(v, "flag");
/// assert_accepted!(v, "flag", false);
/// ```
#[macro_export]
macro_rules! assert_accepted {
    ($validator:expr, $key:expr) => {{
        let results = $crate::Validator::results(&$validator);
        if !results.accepted().contains_key($key) {
            panic!(
                "Expected {:?} to be accepted, rejected: {:?}",
                $key,
                results.rejected().get($key)
            );
        }
    }};
    ($validator:expr, $key:expr, $expected:expr) => {{
        let results = $crate::Validator::results(&$validator);
        match results.accepted().get($key) {
            Some(value) => {
                assert_eq!(value, &Some(::serde_json::Value::from($expected)));
            }
            None => panic!(
                "Expected {:?} to be accepted, rejected: {:?}",
                $key,
                results.rejected().get($key)
            ),
        }
    }};
}

/// Assert that a field was rejected, optionally with a given original input.
///
/// # Example
///
/// ```rust
/// use sluice::{assert_rejected, Options, Registry, Validator};
///
/// let mut v = Validator::with_registry(Registry::with_builtins(), Options::new()).unwrap();
/// v.validate("positiveInt", "id", 0).unwrap();
/// assert_rejected!(v, "id", 0);
/// ```
#[macro_export]
macro_rules! assert_rejected {
    ($validator:expr, $key:expr) => {{
        let results = $crate::Validator::results(&$validator);
        if !results.rejected().contains_key($key) {
            panic!(
                "Expected {:?} to be rejected, accepted: {:?}",
                $key,
                results.accepted().get($key)
            );
        }
    }};
    ($validator:expr, $key:expr, $expected:expr) => {{
        let results = $crate::Validator::results(&$validator);
        match results.rejected().get($key) {
            Some(value) => {
                assert_eq!(value, &Some(::serde_json::Value::from($expected)));
            }
            None => panic!(
                "Expected {:?} to be rejected, accepted: {:?}",
                $key,
                results.accepted().get($key)
            ),
        }
    }};
}

/// Assert that a field is in neither partition.
#[macro_export]
macro_rules! assert_missing {
    ($validator:expr, $key:expr) => {{
        let results = $crate::Validator::results(&$validator);
        if let Some(value) = results.accepted().get($key) {
            panic!("Expected {:?} to be missing, accepted: {:?}", $key, value);
        }
        if let Some(value) = results.rejected().get($key) {
            panic!("Expected {:?} to be missing, rejected: {:?}", $key, value);
        }
    }};
}

#[cfg(feature = "proptest")]
pub use strategies::*;

#[cfg(feature = "proptest")]
mod strategies {
    use proptest::prelude::*;
    use serde_json::Value;

    /// Any JSON scalar: `null`, booleans, integers, finite floats, strings.
    pub fn scalar_value() -> impl Strategy<Value = Value> {
        prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::Bool),
            any::<i64>().prop_map(Value::from),
            (-1.0e9f64..1.0e9).prop_map(Value::from),
            "[a-zA-Z0-9 ]{0,12}".prop_map(Value::from),
        ]
    }

    /// A JSON array of scalars.
    pub fn sequence_value() -> impl Strategy<Value = Value> {
        prop::collection::vec(scalar_value(), 0..8).prop_map(Value::Array)
    }

    /// A JSON object of scalars.
    pub fn keyed_value() -> impl Strategy<Value = Value> {
        prop::collection::vec(("[a-z]{1,6}", scalar_value()), 0..8)
            .prop_map(|pairs| Value::Object(pairs.into_iter().collect()))
    }

    /// Any JSON value up to a small nesting depth.
    pub fn json_value() -> impl Strategy<Value = Value> {
        scalar_value().prop_recursive(3, 32, 6, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
                prop::collection::vec(("[a-z]{1,6}", inner), 0..6)
                    .prop_map(|pairs| Value::Object(pairs.into_iter().collect())),
            ]
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::{Options, Registry, Validator};
    use serde_json::json;

    fn sample() -> Validator {
        let mut v = Validator::with_registry(Registry::with_builtins(), Options::new()).unwrap();
        v.validate("num", "n", "7").unwrap();
        v.validate("num", "bad", "seven").unwrap();
        v.call("str", "none", None, Options::new().optional(true)).unwrap();
        v
    }

    #[test]
    fn assert_accepted_macro() {
        let v = sample();
        assert_accepted!(v, "n");
        assert_accepted!(v, "n", 7);
        assert_accepted!(v, "none");
    }

    #[test]
    fn assert_rejected_macro() {
        let v = sample();
        assert_rejected!(v, "bad");
        assert_rejected!(v, "bad", json!("seven"));
    }

    #[test]
    fn assert_missing_macro() {
        let v = sample();
        assert_missing!(v, "elsewhere");
    }

    #[test]
    #[should_panic(expected = "to be accepted")]
    fn assert_accepted_panics_on_rejection() {
        let v = sample();
        assert_accepted!(v, "bad");
    }

    #[test]
    #[should_panic(expected = "to be rejected")]
    fn assert_rejected_panics_on_acceptance() {
        let v = sample();
        assert_rejected!(v, "n");
    }

    #[test]
    #[should_panic(expected = "to be missing")]
    fn assert_missing_panics_when_present() {
        let v = sample();
        assert_missing!(v, "n");
    }

    #[cfg(feature = "proptest")]
    mod proptest_tests {
        use super::super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn scalars_are_never_containers(value in scalar_value()) {
                prop_assert!(!value.is_array() && !value.is_object());
            }

            #[test]
            fn defined_accepts_any_json(value in json_value()) {
                let mut v = crate::Validator::with_registry(
                    crate::Registry::with_builtins(),
                    crate::Options::new(),
                ).unwrap();
                v.validate("defined", "x", value.clone()).unwrap();
                assert_accepted!(v, "x", value);
            }
        }
    }
}
