//! Validator definitions
//!
//! A definition is the pure check-and-canonize function behind one validator
//! name. It receives the (possibly absent) input and the resolved options and
//! returns an [`Outcome`]. The shape adapters decide how often it runs and
//! what gets stored; a definition never touches the result store itself.
//!
//! # Example
//!
//! ```
//! use serde_json::{json, Value};
//! use sluice::{Definition, Outcome};
//!
//! // Accept even integers, canonize them to their half.
//! let half = Definition::new(|value, _options| match value.and_then(Value::as_i64) {
//!     Some(n) if n % 2 == 0 => Outcome::accept(json!(n / 2)),
//!     _ => Outcome::reject(value.cloned()),
//! });
//!
//! # let options = sluice::options::resolve(
//! #     &Default::default(), &Default::default(), &Default::default());
//! assert_eq!(half.check(Some(&json!(8)), &options), Outcome::accept(json!(4)));
//! assert!(!half.check(Some(&json!(3)), &options).ok);
//! ```

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::options::Resolved;

/// Result of checking one value.
///
/// `value` is the canonical form when `ok` is true. When `ok` is false the
/// value is informational only: the store always records the original input
/// for a rejection.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    /// Canonized value; absent is allowed.
    pub value: Option<Value>,
    /// Whether the input passed the check.
    pub ok: bool,
}

impl Outcome {
    /// A passing outcome with its canonical value.
    #[inline]
    pub fn accept(value: impl Into<Value>) -> Self {
        Outcome {
            value: Some(value.into()),
            ok: true,
        }
    }

    /// A passing outcome whose canonical value is absent.
    #[inline]
    pub fn accept_absent() -> Self {
        Outcome {
            value: None,
            ok: true,
        }
    }

    /// A failing outcome.
    #[inline]
    pub fn reject(value: Option<Value>) -> Self {
        Outcome { value, ok: false }
    }

    /// Build from parts.
    #[inline]
    pub fn new(value: Option<Value>, ok: bool) -> Self {
        Outcome { value, ok }
    }
}

type CheckFn = dyn Fn(Option<&Value>, &Resolved) -> Outcome + Send + Sync;

/// A shareable validator definition.
///
/// Cloning is cheap; clones are the same definition (see [`Definition::same_as`]).
#[derive(Clone)]
pub struct Definition(Arc<CheckFn>);

impl Definition {
    /// Wrap a check function.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(Option<&Value>, &Resolved) -> Outcome + Send + Sync + 'static,
    {
        Definition(Arc::new(f))
    }

    /// Run the check.
    #[inline]
    pub fn check(&self, value: Option<&Value>, options: &Resolved) -> Outcome {
        (self.0)(value, options)
    }

    /// Whether both handles point at the same underlying function.
    pub fn same_as(&self, other: &Definition) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Definition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Definition").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{resolve, Options};
    use serde_json::json;

    fn resolved() -> Resolved {
        resolve(&Options::engine(), &Options::new(), &Options::new())
    }

    #[test]
    fn test_outcome_constructors() {
        assert_eq!(Outcome::accept(1), Outcome::new(Some(json!(1)), true));
        assert_eq!(Outcome::accept_absent(), Outcome::new(None, true));
        assert_eq!(Outcome::reject(None), Outcome::new(None, false));
    }

    #[test]
    fn test_definition_sees_options() {
        let def = Definition::new(|v, o| Outcome::new(v.cloned(), o.strict));
        let strict = resolve(&Options::engine(), &Options::new().strict(true), &Options::new());
        assert!(def.check(Some(&json!(1)), &strict).ok);
        assert!(!def.check(Some(&json!(1)), &resolved()).ok);
    }

    #[test]
    fn test_clones_are_the_same_definition() {
        let def = Definition::new(|v, _| Outcome::new(v.cloned(), true));
        let other = Definition::new(|v, _| Outcome::new(v.cloned(), true));
        assert!(def.same_as(&def.clone()));
        assert!(!def.same_as(&other));
    }
}
