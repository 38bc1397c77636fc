//! `num`: numeric check with optional clamping and range limits.
//!
//! Options, applied in this order:
//!
//! - `integer`: drop the fractional part
//! - `min` / `max`: clamp the value (modifies it)
//! - `rangeMin` / `rangeMax`: reject values outside the range (does not
//!   modify); exclusive unless `minEq` / `maxEq` is set
//! - `regExp`: the input's text form must match the pattern
//!
//! With `strict` only JSON numbers pass; otherwise numeric strings are read
//! as numbers too.

use serde_json::Value;

use super::coerce::{number_value, numeric, text};
use super::pattern_matches;
use crate::definition::Outcome;
use crate::options::Resolved;

pub(crate) fn num(value: Option<&Value>, options: &Resolved) -> Outcome {
    let Some(mut n) = value.and_then(|v| numeric(v, options.strict)) else {
        return Outcome::reject(None);
    };

    if options.get_bool("integer") {
        n = n.trunc();
    }
    if let Some(min) = options.get_f64("min") {
        n = n.max(min);
    }
    if let Some(max) = options.get_f64("max") {
        n = n.min(max);
    }

    let mut ok = true;
    if let Some(low) = options.get_f64("rangeMin") {
        ok = if options.get_bool("minEq") { n >= low } else { n > low };
    }
    if ok {
        if let Some(high) = options.get_f64("rangeMax") {
            ok = if options.get_bool("maxEq") { n <= high } else { n < high };
        }
    }
    if ok {
        if let Some(pattern) = options.get_str("regExp") {
            let input = value.and_then(text).unwrap_or_default();
            ok = pattern_matches("num", pattern, &input);
        }
    }

    Outcome::new(Some(number_value(n)), ok)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{resolve, Options};
    use serde_json::json;

    fn check(value: Value, layer: Options) -> Outcome {
        let options = resolve(&Options::engine(), &Options::new(), &layer);
        num(Some(&value), &options)
    }

    #[test]
    fn test_non_strict_reads_numeric_strings() {
        assert_eq!(check(json!("456"), Options::new()), Outcome::accept(456));
        assert_eq!(check(json!(3.141592), Options::new()), Outcome::accept(3.141592));
        assert!(!check(json!("str"), Options::new()).ok);
        assert!(!check(json!(true), Options::new()).ok);
        assert!(!check(json!([1]), Options::new()).ok);
    }

    #[test]
    fn test_strict_accepts_only_numbers() {
        assert!(check(json!(1), Options::new().strict(true)).ok);
        assert!(!check(json!("1"), Options::new().strict(true)).ok);
    }

    #[test]
    fn test_absent_is_rejected() {
        let options = resolve(&Options::engine(), &Options::new(), &Options::new());
        assert!(!num(None, &options).ok);
    }

    #[test]
    fn test_integer_truncates() {
        let o = || Options::new().set("integer", true);
        assert_eq!(check(json!(1.5), o()), Outcome::accept(1));
        assert_eq!(check(json!("6.5"), o()), Outcome::accept(6));
        assert_eq!(check(json!(-1.5), o()), Outcome::accept(-1));
    }

    #[test]
    fn test_clamping() {
        let o = || Options::new().set("min", 0).set("max", 10);
        assert_eq!(check(json!(-5), o()), Outcome::accept(0));
        assert_eq!(check(json!(50), o()), Outcome::accept(10));
        assert_eq!(check(json!(5), o()), Outcome::accept(5));
    }

    #[test]
    fn test_range_exclusive_and_inclusive() {
        let exclusive = || Options::new().set("rangeMin", 1).set("rangeMax", 5);
        assert!(!check(json!(1), exclusive()).ok);
        assert!(check(json!(3), exclusive()).ok);
        assert!(!check(json!(5), exclusive()).ok);

        let inclusive = || exclusive().set("minEq", true).set("maxEq", true);
        assert!(check(json!(1), inclusive()).ok);
        assert!(check(json!(5), inclusive()).ok);
    }

    #[test]
    fn test_clamp_applies_before_range() {
        let o = Options::new().set("min", 2).set("rangeMin", 1);
        assert_eq!(check(json!(-10), o), Outcome::accept(2));
    }

    #[test]
    fn test_reg_exp_matches_input_text() {
        let o = || Options::new().set("regExp", "\\.0$");
        assert!(!check(json!(10.0), o()).ok);
        assert!(check(json!("10.0"), o()).ok);
        assert!(check(json!("10.0"), o().set("integer", true)).ok);

        let years = || Options::new().set("regExp", "20[01]\\d");
        assert!(check(json!(2015), years()).ok);
        assert!(!check(json!(1999), years()).ok);
    }
}
