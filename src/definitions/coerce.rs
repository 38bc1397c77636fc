//! Coercion rules shared by the built-in definitions.
//!
//! Non-strict checks compare and convert values through the explicit tables
//! below rather than through any implicit conversion.
//!
//! Numeric reading of a value ([`numeric`]):
//!
//! | input                          | result          |
//! |--------------------------------|-----------------|
//! | number                         | itself          |
//! | string, trimmed, finite float  | parsed number   |
//! | anything else                  | not numeric     |
//!
//! Text form of a value ([`text`]):
//!
//! | input   | result                                        |
//! |---------|-----------------------------------------------|
//! | string  | itself                                        |
//! | number  | shortest form, integral floats without `.0`   |
//! | boolean | `"true"` / `"false"`                          |
//! | null    | `"null"`                                      |
//! | array, object, absent | no text form                    |
//!
//! Loose equality ([`loose_eq`]), checked top to bottom:
//!
//! | left / right           | equal when                                   |
//! |------------------------|----------------------------------------------|
//! | boolean / any          | `true` as 1, `false` as 0, then compared again |
//! | number / number        | same numeric value                           |
//! | number / string        | the trimmed string reads as that number (empty reads as 0) |
//! | null / null            | always                                       |
//! | otherwise              | [`strict_eq`]                                |

use serde_json::{Number, Value};

/// Largest integer a float carries exactly.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Numeric reading of a value; only numbers qualify when `strict`.
pub(crate) fn numeric(value: &Value, strict: bool) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) if !strict => parse_finite(s),
        _ => None,
    }
}

fn parse_finite(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// JSON value for a number; integral values in the safe range become integers.
pub(crate) fn number_value(n: f64) -> Value {
    if n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER {
        Value::from(n as i64)
    } else {
        Number::from_f64(n).map(Value::Number).unwrap_or(Value::Null)
    }
}

/// Text form of a value, per the table in the module docs.
pub(crate) fn text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(match n.as_f64() {
            Some(f) if n.is_f64() => f.to_string(),
            _ => n.to_string(),
        }),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null => Some("null".to_string()),
        Value::Array(_) | Value::Object(_) => None,
    }
}

/// Truthiness used by the non-strict boolean check.
pub(crate) fn truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

/// Equality without conversion; numbers compare by value so `1` equals `1.0`.
pub(crate) fn strict_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x.as_f64() == y.as_f64(),
        _ => a == b,
    }
}

/// Equality with the conversions in the module docs.
pub(crate) fn loose_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Bool(x), _) => loose_eq(&Value::from(u8::from(*x)), b),
        (_, Value::Bool(y)) => loose_eq(a, &Value::from(u8::from(*y))),
        (Value::Number(x), Value::Number(y)) => x.as_f64() == y.as_f64(),
        (Value::Number(n), Value::String(s)) | (Value::String(s), Value::Number(n)) => {
            let read = if s.trim().is_empty() {
                Some(0.0)
            } else {
                parse_finite(s)
            };
            read.is_some() && read == n.as_f64()
        }
        (Value::Null, Value::Null) => true,
        _ => strict_eq(a, b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_numeric() {
        assert_eq!(numeric(&json!(3.5), true), Some(3.5));
        assert_eq!(numeric(&json!("12"), false), Some(12.0));
        assert_eq!(numeric(&json!(" 12 "), false), Some(12.0));
        assert_eq!(numeric(&json!("12"), true), None);
        assert_eq!(numeric(&json!(""), false), None);
        assert_eq!(numeric(&json!("1abc"), false), None);
        assert_eq!(numeric(&json!("inf"), false), None);
        assert_eq!(numeric(&json!(true), false), None);
        assert_eq!(numeric(&json!(null), false), None);
    }

    #[test]
    fn test_number_value_prefers_integers() {
        assert_eq!(number_value(456.0), json!(456));
        assert_eq!(number_value(-0.0), json!(0));
        assert_eq!(number_value(3.25), json!(3.25));
    }

    #[test]
    fn test_text() {
        assert_eq!(text(&json!("a")), Some("a".to_string()));
        assert_eq!(text(&json!(10)), Some("10".to_string()));
        assert_eq!(text(&json!(10.0)), Some("10".to_string()));
        assert_eq!(text(&json!(3.141592)), Some("3.141592".to_string()));
        assert_eq!(text(&json!(false)), Some("false".to_string()));
        assert_eq!(text(&json!(null)), Some("null".to_string()));
        assert_eq!(text(&json!([1])), None);
        assert_eq!(text(&json!({})), None);
    }

    #[test]
    fn test_truthy() {
        assert!(!truthy(None));
        assert!(!truthy(Some(&json!(0))));
        assert!(!truthy(Some(&json!(""))));
        assert!(truthy(Some(&json!("0"))));
        assert!(truthy(Some(&json!([]))));
        assert!(truthy(Some(&json!(123))));
    }

    #[test]
    fn test_loose_eq_table() {
        assert!(loose_eq(&json!(6), &json!("6")));
        assert!(loose_eq(&json!(" 6 "), &json!(6)));
        assert!(loose_eq(&json!(true), &json!(1)));
        assert!(loose_eq(&json!("1"), &json!(true)));
        assert!(loose_eq(&json!(0), &json!("")));
        assert!(loose_eq(&json!(null), &json!(null)));
        assert!(!loose_eq(&json!("MONDAY"), &json!(0)));
        assert!(!loose_eq(&json!(null), &json!(0)));
        assert!(!loose_eq(&json!("a"), &json!("A")));
    }

    #[test]
    fn test_strict_eq() {
        assert!(strict_eq(&json!(1), &json!(1.0)));
        assert!(!strict_eq(&json!(1), &json!("1")));
        assert!(strict_eq(&json!([1, 2]), &json!([1, 2])));
    }
}
