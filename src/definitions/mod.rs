//! Built-in definitions and aliases
//!
//! Every registry created with [`Registry::with_builtins`](crate::Registry::with_builtins)
//! (including the process-wide one) starts with:
//!
//! | name                 | accepts                                               |
//! |----------------------|-------------------------------------------------------|
//! | `defined`            | any present value, unchanged                          |
//! | `bool`               | booleans; non-strict also reads strings and truthiness |
//! | `num`                | numbers; non-strict also numeric strings              |
//! | `str`                | strings; non-strict also the text form of scalars     |
//! | `enumerated`         | a value of the `enumerated` option                    |
//! | `enumeratedKey`      | a key of the `enumerated` option                      |
//! | `enumeratedKeyValue` | a key of `enumerated`, canonized to its value         |
//! | `json`               | JSON text, canonized to the parsed value              |
//!
//! and the aliases `notEmptyStr` (`str` with `minLength: 1`) and
//! `positiveInt` (`num` with `integer`, `rangeMin: 1`, `minEq`).

mod boolean;
mod coerce;
mod enumerated;
mod json;
mod number;
mod string;

use std::collections::HashMap;

use once_cell::sync::Lazy;
use parking_lot::Mutex;
use regex::Regex;
use serde_json::Value;
use tracing::warn;

use crate::definition::{Definition, Outcome};
use crate::options::{Options, Resolved};
use crate::registry::Scope;

/// Most compiled `regExp` patterns kept at once. A full cache is emptied
/// before the next pattern is added.
const PATTERN_CACHE_LIMIT: usize = 256;

static PATTERNS: Lazy<Mutex<HashMap<String, Regex>>> = Lazy::new(|| Mutex::new(HashMap::new()));

/// Install the built-ins into a fresh scope.
pub(crate) fn install(scope: &mut Scope) {
    scope.insert_validator("defined", Definition::new(defined));
    scope.insert_validator("bool", Definition::new(boolean::boolean));
    scope.insert_validator("num", Definition::new(number::num));
    scope.insert_validator("str", Definition::new(string::string));
    scope.insert_validator("enumerated", Definition::new(enumerated::enumerated));
    scope.insert_validator("enumeratedKey", Definition::new(enumerated::enumerated_key));
    scope.insert_validator(
        "enumeratedKeyValue",
        Definition::new(enumerated::enumerated_key_value),
    );
    scope.insert_validator("json", Definition::new(json::json));

    scope.insert_alias("notEmptyStr", "str", Options::new().set("minLength", 1));
    scope.insert_alias(
        "positiveInt",
        "num",
        Options::new()
            .set("integer", true)
            .set("rangeMin", 1)
            .set("minEq", true),
    );
}

/// `defined`: present values pass unchanged, even `null`.
fn defined(value: Option<&Value>, _options: &Resolved) -> Outcome {
    match value {
        Some(v) => Outcome::accept(v.clone()),
        None => Outcome::reject(None),
    }
}

/// Whether `input` contains a match of `pattern`.
///
/// Compiled patterns are cached process-wide, up to
/// `PATTERN_CACHE_LIMIT` entries. An invalid pattern never matches.
pub(super) fn pattern_matches(definition: &str, pattern: &str, input: &str) -> bool {
    let mut cache = PATTERNS.lock();
    if let Some(re) = cache.get(pattern) {
        return re.is_match(input);
    }
    match Regex::new(pattern) {
        Ok(re) => {
            let matched = re.is_match(input);
            if cache.len() >= PATTERN_CACHE_LIMIT {
                cache.clear();
            }
            cache.insert(pattern.to_string(), re);
            matched
        }
        Err(e) => {
            warn!(definition, pattern, error = %e, "invalid regExp option");
            false
        }
    }
}
