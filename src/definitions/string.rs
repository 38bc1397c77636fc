//! `str`: text check with length limits, pattern and casing.
//!
//! Non-strict input is read through its text form, so numbers, booleans and
//! `null` pass as their text. Arrays, objects and absent input have no text
//! form and are rejected. Lengths count characters.
//!
//! A `minLength` or `maxLength` of `0` means no limit.

use serde_json::Value;

use super::coerce::text;
use super::pattern_matches;
use crate::definition::Outcome;
use crate::options::Resolved;

pub(crate) fn string(value: Option<&Value>, options: &Resolved) -> Outcome {
    let input = match value {
        Some(Value::String(s)) => s.clone(),
        Some(other) if !options.strict => match text(other) {
            Some(s) => s,
            None => return Outcome::reject(value.cloned()),
        },
        _ => return Outcome::reject(value.cloned()),
    };

    let mut out = input;
    let mut ok = true;
    let length = out.chars().count();

    if let Some(min) = limit(options, "minLength") {
        ok = length >= min;
    }

    if let Some(max) = limit(options, "maxLength") {
        if ok && length > max {
            if options.get_bool("truncate") {
                out = out.chars().take(max).collect();
                out.push_str(options.get_str("append").unwrap_or_default());
            } else {
                ok = false;
            }
        }
    }

    if ok {
        if let Some(pattern) = options.get_str("regExp") {
            ok = pattern_matches("str", pattern, &out);
        }
    }

    if options.get_bool("lowerCase") {
        out = out.to_lowercase();
    } else if options.get_bool("upperCase") {
        out = out.to_uppercase();
    }

    Outcome::new(Some(Value::String(out)), ok)
}

fn limit(options: &Resolved, key: &str) -> Option<usize> {
    options.get_usize(key).filter(|n| *n > 0)
}
