//! `bool`
//!
//! Strict: only JSON booleans pass, unchanged.
//!
//! Non-strict: everything passes. The strings `"false"` and `"0"` read as
//! `false`, any other string as "is it non-empty", and every other value by
//! truthiness (`0`, `null` and absent are `false`).

use serde_json::Value;

use super::coerce::truthy;
use crate::definition::Outcome;
use crate::options::Resolved;

pub(crate) fn boolean(value: Option<&Value>, options: &Resolved) -> Outcome {
    if options.strict {
        return match value {
            Some(Value::Bool(b)) => Outcome::accept(*b),
            other => Outcome::reject(other.cloned()),
        };
    }

    let read = match value {
        Some(Value::String(s)) => !(s == "false" || s == "0" || s.is_empty()),
        other => truthy(other),
    };
    Outcome::accept(read)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{resolve, Options};
    use serde_json::json;

    fn check(value: Option<Value>, strict: bool) -> Outcome {
        let options = resolve(&Options::engine(), &Options::new(), &Options::new().strict(strict));
        boolean(value.as_ref(), &options)
    }

    #[test]
    fn test_non_strict_reads_everything() {
        let cases = [
            (json!(true), true),
            (json!(false), false),
            (json!(1), true),
            (json!(0), false),
            (json!("true"), true),
            (json!("false"), false),
            (json!("1"), true),
            (json!("0"), false),
            (json!(""), false),
            (json!("no"), true),
            (json!(null), false),
            (json!([]), true),
            (json!({}), true),
        ];
        for (input, expected) in cases {
            assert_eq!(check(Some(input.clone()), false), Outcome::accept(expected), "{}", input);
        }
        assert_eq!(check(None, false), Outcome::accept(false));
    }

    #[test]
    fn test_strict_accepts_only_booleans() {
        assert_eq!(check(Some(json!(true)), true), Outcome::accept(true));
        assert_eq!(check(Some(json!(false)), true), Outcome::accept(false));
        assert!(!check(Some(json!("true")), true).ok);
        assert!(!check(Some(json!(1)), true).ok);
        assert!(!check(None, true).ok);
    }
}
