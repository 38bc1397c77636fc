//! Shape adapters
//!
//! One definition is exposed under three entry points, one per input shape:
//!
//! | entry point   | shape                  | input                 |
//! |---------------|------------------------|-----------------------|
//! | `name`        | [`Shape::Scalar`]      | any value             |
//! | `nameArray`   | [`Shape::Sequence`]    | JSON array            |
//! | `nameObject`  | [`Shape::Keyed`]       | JSON object (values)  |
//!
//! Each adapter drives the definition over its shape and folds the per-item
//! outcomes into one outcome for the field, which is then recorded in the
//! [`ResultStore`]. Collections short-circuit on their first failing item,
//! and a rejected field always records the input exactly as the caller
//! passed it.

mod collection;
mod scalar;

use std::fmt;

use serde_json::Value;
use tracing::{debug, trace};

use crate::definition::Definition;
use crate::error::TransformError;
use crate::options::Resolved;
use crate::store::ResultStore;
use crate::transform::Stage;

/// Input shape an entry point validates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    /// A single value.
    Scalar,
    /// Every element of an array.
    Sequence,
    /// Every value of an object, in insertion order.
    Keyed,
}

impl Shape {
    /// All shapes, in entry point order.
    pub const ALL: [Shape; 3] = [Shape::Scalar, Shape::Sequence, Shape::Keyed];

    /// Suffix appended to a base name to form this shape's entry point.
    pub fn suffix(self) -> &'static str {
        match self {
            Shape::Scalar => "",
            Shape::Sequence => "Array",
            Shape::Keyed => "Object",
        }
    }

    /// Entry point name of `base` for this shape.
    ///
    /// ```
    /// use sluice::Shape;
    ///
    /// assert_eq!(Shape::Scalar.entry_name("num"), "num");
    /// assert_eq!(Shape::Sequence.entry_name("num"), "numArray");
    /// assert_eq!(Shape::Keyed.entry_name("num"), "numObject");
    /// ```
    pub fn entry_name(self, base: &str) -> String {
        format!("{}{}", base, self.suffix())
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::Scalar => write!(f, "scalar"),
            Shape::Sequence => write!(f, "sequence"),
            Shape::Keyed => write!(f, "keyed"),
        }
    }
}

/// Why a field ended up rejected.
#[derive(Debug)]
pub(crate) enum Failure {
    /// The definition refused the value (or an item of it).
    Rejected,
    /// A user transform failed at this stage.
    Transform(Stage, TransformError),
}

impl Failure {
    pub(crate) fn at(stage: Stage) -> impl FnOnce(TransformError) -> Failure {
        move |err| Failure::Transform(stage, err)
    }
}

/// Validate one field and record its outcome.
///
/// `raw` is the value exactly as the caller supplied it; `options` are the
/// resolved options for this call.
pub(crate) fn run(
    shape: Shape,
    definition: &Definition,
    key: &str,
    raw: Option<Value>,
    options: &Resolved,
    store: &mut ResultStore,
) {
    if options.stop_after_first_error && store.has_rejections() {
        trace!(field = key, "skipped after first error");
        return;
    }

    let result = match shape {
        Shape::Scalar => scalar::validate(definition, raw.clone(), options),
        Shape::Sequence | Shape::Keyed => {
            collection::validate(shape, definition, raw.clone(), options)
        }
    };

    match result {
        Ok(Some(value)) => {
            trace!(field = key, %shape, "accepted");
            store.accept(key, value);
        }
        Ok(None) => trace!(field = key, %shape, "absent value not stored"),
        Err(Failure::Rejected) => {
            trace!(field = key, %shape, "rejected");
            store.reject(key, raw);
        }
        Err(Failure::Transform(stage, err)) => {
            debug!(field = key, %stage, error = %err, "transform failed, field rejected");
            store.reject(key, raw);
        }
    }
}

/// Whether a passing field with this value gets stored.
fn should_store(value: &Option<Value>, options: &Resolved) -> bool {
    value.is_some() || options.return_undefined
}
