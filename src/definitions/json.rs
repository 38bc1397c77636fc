//! `json`: JSON text, canonized to the parsed value.
//!
//! Numbers, booleans and `null` are their own JSON text and pass unchanged.
//! Arrays, objects and absent input are rejected.

use serde_json::Value;

use crate::definition::Outcome;
use crate::options::Resolved;

pub(crate) fn json(value: Option<&Value>, _options: &Resolved) -> Outcome {
    match value {
        Some(Value::String(s)) => match serde_json::from_str::<Value>(s) {
            Ok(parsed) => Outcome::accept(parsed),
            Err(_) => Outcome::reject(value.cloned()),
        },
        Some(v @ (Value::Number(_) | Value::Bool(_) | Value::Null)) => Outcome::accept(v.clone()),
        _ => Outcome::reject(value.cloned()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{resolve, Options};
    use serde_json::json as j;

    fn check(value: Option<Value>) -> Outcome {
        let options = resolve(&Options::engine(), &Options::new(), &Options::new());
        json(value.as_ref(), &options)
    }

    #[test]
    fn test_parses_json_text() {
        assert_eq!(check(Some(j!("{\"a\": [1, 2]}"))), Outcome::accept(j!({"a": [1, 2]})));
        assert_eq!(check(Some(j!("\"s\""))), Outcome::accept("s"));
        assert_eq!(check(Some(j!("12"))), Outcome::accept(12));
        assert_eq!(check(Some(j!("null"))), Outcome::accept(Value::Null));
    }

    #[test]
    fn test_invalid_text_is_rejected() {
        assert!(!check(Some(j!("{a: 1}"))).ok);
        assert!(!check(Some(j!(""))).ok);
        assert!(!check(Some(j!("undefined"))).ok);
    }

    #[test]
    fn test_scalars_pass_unchanged() {
        assert_eq!(check(Some(j!(5))), Outcome::accept(5));
        assert_eq!(check(Some(j!(true))), Outcome::accept(true));
        assert_eq!(check(Some(j!(null))), Outcome::accept(Value::Null));
    }

    #[test]
    fn test_containers_and_absent_are_rejected() {
        assert!(!check(Some(j!([1]))).ok);
        assert!(!check(Some(j!({}))).ok);
        assert!(!check(None).ok);
    }
}
