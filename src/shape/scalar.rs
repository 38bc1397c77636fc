//! Scalar adapter: one definition call per field.

use serde_json::Value;

use super::{should_store, Failure};
use crate::definition::{Definition, Outcome};
use crate::options::Resolved;
use crate::transform::{apply, Stage};

/// Validate a single value.
///
/// Returns the value to store, `Ok(None)` when a passing field is not stored,
/// or the reason the field is rejected.
pub(super) fn validate(
    definition: &Definition,
    raw: Option<Value>,
    options: &Resolved,
) -> Result<Option<Option<Value>>, Failure> {
    let data = apply(raw, options.pre_transform.as_ref()).map_err(Failure::at(Stage::Pre))?;

    let outcome = if data.is_none() && options.optional {
        Outcome::new(options.default_value.clone(), true)
    } else {
        let item = apply(data.clone(), options.pre_transform_item.as_ref())
            .map_err(Failure::at(Stage::PreItem))?;
        definition.check(item.as_ref(), options)
    };

    if !outcome.ok {
        return Err(Failure::Rejected);
    }
    if !should_store(&outcome.value, options) {
        return Ok(None);
    }

    let value = if options.canonize { outcome.value } else { data };
    let value = apply(value, options.post_transform_item.as_ref())
        .map_err(Failure::at(Stage::PostItem))?;
    let value = apply(value, options.post_transform.as_ref()).map_err(Failure::at(Stage::Post))?;

    Ok(Some(value))
}
