//! The `enumerated` family.
//!
//! All three read the `enumerated` option, an object (or an array, keyed by
//! index) listing the allowed entries, and pick the first entry matching the
//! input in declaration order. A failed check canonizes to `null`.
//!
//! A missing or non-container `enumerated` option is a misconfiguration: the
//! check fails and a warning is logged.
//!
//! Non-strict comparisons use loose equality. Strict ones compare without
//! conversion, so keys then only match strings.

use serde_json::Value;
use tracing::warn;

use super::coerce::{loose_eq, strict_eq};
use crate::definition::Outcome;
use crate::error::json_type;
use crate::options::Resolved;

/// Entries of the `enumerated` option as `(key, value)` pairs.
fn entries<'a>(definition: &str, options: &'a Resolved) -> Option<Vec<(Value, &'a Value)>> {
    match options.get("enumerated") {
        Some(Value::Object(map)) => Some(
            map.iter()
                .map(|(k, v)| (Value::String(k.clone()), v))
                .collect(),
        ),
        Some(Value::Array(items)) => Some(
            items
                .iter()
                .enumerate()
                .map(|(i, v)| (Value::String(i.to_string()), v))
                .collect(),
        ),
        other => {
            let found = other.map(json_type).unwrap_or("nothing");
            warn!(definition, found, "enumerated option must be an object or array");
            None
        }
    }
}

fn equals(options: &Resolved, input: Option<&Value>, candidate: &Value) -> bool {
    match input {
        Some(v) if options.strict => strict_eq(v, candidate),
        Some(v) => loose_eq(v, candidate),
        None => false,
    }
}

/// First canonical value `select` yields over the entries.
fn pick(
    definition: &str,
    options: &Resolved,
    select: impl Fn(&Value, &Value) -> Option<Value>,
) -> Outcome {
    entries(definition, options)
        .and_then(|entries| entries.iter().find_map(|(key, entry)| select(key, entry)))
        .map(Outcome::accept)
        .unwrap_or_else(|| Outcome::reject(Some(Value::Null)))
}

/// `enumerated`: the input must equal one of the values.
pub(crate) fn enumerated(value: Option<&Value>, options: &Resolved) -> Outcome {
    pick("enumerated", options, |_, entry| {
        equals(options, value, entry).then(|| entry.clone())
    })
}

/// `enumeratedKey`: the input must equal one of the keys; canonized to the key.
pub(crate) fn enumerated_key(value: Option<&Value>, options: &Resolved) -> Outcome {
    pick("enumeratedKey", options, |key, _| {
        equals(options, value, key).then(|| key.clone())
    })
}

/// `enumeratedKeyValue`: the input must equal one of the keys; canonized to
/// that key's value.
pub(crate) fn enumerated_key_value(value: Option<&Value>, options: &Resolved) -> Outcome {
    pick("enumeratedKeyValue", options, |key, entry| {
        equals(options, value, key).then(|| entry.clone())
    })
}
