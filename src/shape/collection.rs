//! Sequence and keyed-collection adapters.
//!
//! Both work on a copy of the input so the caller's value is never modified,
//! walk the items in order, and stop at the first item the definition
//! refuses. Nothing canonized before that point leaks into the rejection.

use serde_json::Value;

use super::{should_store, Failure, Shape};
use crate::definition::Definition;
use crate::options::Resolved;
use crate::transform::{apply, Stage};

/// Validate every item of an array (`Shape::Sequence`) or every value of an
/// object (`Shape::Keyed`).
pub(super) fn validate(
    shape: Shape,
    definition: &Definition,
    raw: Option<Value>,
    options: &Resolved,
) -> Result<Option<Option<Value>>, Failure> {
    let data = apply(raw, options.pre_transform.as_ref()).map_err(Failure::at(Stage::Pre))?;

    let value = match (shape, data) {
        (_, None) if options.optional => options.default_value.clone(),
        (Shape::Sequence, Some(Value::Array(mut items))) => {
            drive(items.iter_mut(), definition, options)?;
            Some(Value::Array(items))
        }
        (Shape::Keyed, Some(Value::Object(mut map))) => {
            drive(map.values_mut(), definition, options)?;
            Some(Value::Object(map))
        }
        _ => return Err(Failure::Rejected),
    };

    if !should_store(&value, options) {
        return Ok(None);
    }

    let value = apply(value, options.post_transform.as_ref()).map_err(Failure::at(Stage::Post))?;
    Ok(Some(value))
}

/// Check each slot in order, canonizing passing slots in place.
fn drive<'a>(
    slots: impl Iterator<Item = &'a mut Value>,
    definition: &Definition,
    options: &Resolved,
) -> Result<(), Failure> {
    for slot in slots {
        let item = apply(Some(slot.clone()), options.pre_transform_item.as_ref())
            .map_err(Failure::at(Stage::PreItem))?;

        let outcome = definition.check(item.as_ref(), options);
        if !outcome.ok {
            return Err(Failure::Rejected);
        }

        if options.canonize {
            *slot = outcome.value.unwrap_or(Value::Null);
        }

        let current = std::mem::take(slot);
        *slot = apply(Some(current), options.post_transform_item.as_ref())
            .map_err(Failure::at(Stage::PostItem))?
            .unwrap_or(Value::Null);
    }
    Ok(())
}
