//! Layered validation options
//!
//! Options come from four layers, later layers winning key by key:
//!
//! 1. engine defaults, owned by a [`Registry`](crate::Registry) and read live
//! 2. alias defaults, merged under the call options when an alias forwards
//! 3. instance defaults, given when a [`Validator`](crate::Validator) is built
//! 4. call-site options
//!
//! [`Options`] is one layer: every field may be absent so that a layer only
//! overrides what it sets. [`resolve`] flattens the layers into a
//! [`Resolved`] set that definitions read.
//!
//! Besides the universal options every shape understands, a layer carries an
//! open map of definition-specific options (`maxLength`, `enumerated`, ...).
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//! use sluice::options::{resolve, Options};
//!
//! let engine = Options::engine();
//! let instance = Options::new().strict(true).set("maxLength", 15);
//! let call = Options::new().set("maxLength", 5);
//!
//! let resolved = resolve(&engine, &instance, &call);
//! assert!(resolved.strict);
//! assert!(resolved.canonize);
//! assert_eq!(resolved.get_usize("maxLength"), Some(5));
//! ```

use std::fmt;

use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::definition::Definition;
use crate::error::{json_type, ConfigError};
use crate::transform::Transforms;

/// One layer of options.
///
/// Built with chained setters; any option not set is absent and falls through
/// to the layer below when resolved.
#[derive(Clone, Default)]
pub struct Options {
    strict: Option<bool>,
    canonize: Option<bool>,
    return_null_on_errors: Option<bool>,
    stop_after_first_error: Option<bool>,
    optional: Option<bool>,
    default_value: Option<Value>,
    allow_overwrite_validator: Option<bool>,
    return_undefined: Option<bool>,
    pre_transform: Option<Transforms>,
    pre_transform_item: Option<Transforms>,
    post_transform_item: Option<Transforms>,
    post_transform: Option<Transforms>,
    extra: Map<String, Value>,
    validators: IndexMap<String, Definition>,
}

impl Options {
    /// An empty layer.
    pub fn new() -> Self {
        Self::default()
    }

    /// The baseline engine defaults.
    pub fn engine() -> Self {
        Options {
            strict: Some(false),
            canonize: Some(true),
            return_null_on_errors: Some(true),
            stop_after_first_error: Some(false),
            optional: Some(false),
            default_value: None,
            allow_overwrite_validator: Some(false),
            return_undefined: Some(true),
            ..Default::default()
        }
    }

    /// Stricter type acceptance in definitions.
    pub fn strict(mut self, on: bool) -> Self {
        self.strict = Some(on);
        self
    }

    /// Store the canonized value (`true`) or the input (`false`).
    pub fn canonize(mut self, on: bool) -> Self {
        self.canonize = Some(on);
        self
    }

    /// `valid()` yields nothing while any rejection exists.
    pub fn return_null_on_errors(mut self, on: bool) -> Self {
        self.return_null_on_errors = Some(on);
        self
    }

    /// Once a rejection is recorded, later calls are no-ops.
    pub fn stop_after_first_error(mut self, on: bool) -> Self {
        self.stop_after_first_error = Some(on);
        self
    }

    /// An absent input is valid.
    pub fn optional(mut self, on: bool) -> Self {
        self.optional = Some(on);
        self
    }

    /// Value stored for an absent optional input.
    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    /// Whether registering an existing name replaces it instead of failing.
    pub fn allow_overwrite_validator(mut self, on: bool) -> Self {
        self.allow_overwrite_validator = Some(on);
        self
    }

    /// When `false`, fields whose value resolves to absent are not stored.
    pub fn return_undefined(mut self, on: bool) -> Self {
        self.return_undefined = Some(on);
        self
    }

    /// Transforms applied to the whole input before validation.
    pub fn pre_transform(mut self, transforms: impl Into<Transforms>) -> Self {
        self.pre_transform = Some(transforms.into());
        self
    }

    /// Transforms applied to each item before the definition sees it.
    pub fn pre_transform_item(mut self, transforms: impl Into<Transforms>) -> Self {
        self.pre_transform_item = Some(transforms.into());
        self
    }

    /// Transforms applied to each accepted item.
    pub fn post_transform_item(mut self, transforms: impl Into<Transforms>) -> Self {
        self.post_transform_item = Some(transforms.into());
        self
    }

    /// Transforms applied to the whole accepted value.
    pub fn post_transform(mut self, transforms: impl Into<Transforms>) -> Self {
        self.post_transform = Some(transforms.into());
        self
    }

    /// Set a definition-specific option such as `maxLength`.
    pub fn set(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Validator definition registered on the instance at construction.
    ///
    /// Only read by [`Validator::with_registry`](crate::Validator::with_registry);
    /// it does not take part in option resolution.
    pub fn validator(mut self, name: impl Into<String>, definition: Definition) -> Self {
        self.validators.insert(name.into(), definition);
        self
    }

    /// Build a layer from a JSON object using the camelCase option names.
    ///
    /// Universal options of the wrong JSON type are kept as
    /// definition-specific options rather than rejected.
    ///
    /// # Example
    ///
    /// ```
    /// use serde_json::json;
    /// use sluice::options::{resolve, Options};
    ///
    /// let map = json!({ "optional": true, "defaultValue": -1, "maxLength": 3 });
    /// let layer = Options::from_map(map.as_object().unwrap().clone());
    /// let resolved = resolve(&Options::engine(), &Options::new(), &layer);
    /// assert!(resolved.optional);
    /// assert_eq!(resolved.default_value, Some(json!(-1)));
    /// assert_eq!(resolved.get_usize("maxLength"), Some(3));
    /// ```
    pub fn from_map(map: Map<String, Value>) -> Self {
        let mut options = Options::new();
        for (key, value) in map {
            let flag = value.as_bool();
            match (key.as_str(), flag) {
                ("strict", Some(b)) => options.strict = Some(b),
                ("canonize", Some(b)) => options.canonize = Some(b),
                ("returnNullOnErrors", Some(b)) => options.return_null_on_errors = Some(b),
                ("stopAfterFirstError", Some(b)) => options.stop_after_first_error = Some(b),
                ("optional", Some(b)) => options.optional = Some(b),
                ("allowOverwriteValidator", Some(b)) => {
                    options.allow_overwrite_validator = Some(b)
                }
                ("returnUndefined", Some(b)) => options.return_undefined = Some(b),
                ("defaultValue", _) => options.default_value = Some(value),
                _ => {
                    options.extra.insert(key, value);
                }
            }
        }
        options
    }

    /// Overlay `upper` on top of this layer; `upper` wins where it is set.
    ///
    /// Neither input is modified.
    pub fn overlay(&self, upper: &Options) -> Options {
        let mut extra = self.extra.clone();
        extra.extend(upper.extra.iter().map(|(k, v)| (k.clone(), v.clone())));

        Options {
            strict: upper.strict.or(self.strict),
            canonize: upper.canonize.or(self.canonize),
            return_null_on_errors: upper.return_null_on_errors.or(self.return_null_on_errors),
            stop_after_first_error: upper.stop_after_first_error.or(self.stop_after_first_error),
            optional: upper.optional.or(self.optional),
            default_value: upper
                .default_value
                .clone()
                .or_else(|| self.default_value.clone()),
            allow_overwrite_validator: upper
                .allow_overwrite_validator
                .or(self.allow_overwrite_validator),
            return_undefined: upper.return_undefined.or(self.return_undefined),
            pre_transform: pick(&upper.pre_transform, &self.pre_transform),
            pre_transform_item: pick(&upper.pre_transform_item, &self.pre_transform_item),
            post_transform_item: pick(&upper.post_transform_item, &self.post_transform_item),
            post_transform: pick(&upper.post_transform, &self.post_transform),
            extra,
            validators: IndexMap::new(),
        }
    }

    /// The `allowOverwriteValidator` setting of this layer, if set.
    pub fn allows_overwrite(&self) -> Option<bool> {
        self.allow_overwrite_validator
    }

    /// The `returnNullOnErrors` setting of this layer, if set.
    pub fn returns_null_on_errors(&self) -> Option<bool> {
        self.return_null_on_errors
    }

    /// Definition-specific option of this layer.
    pub fn extra(&self, key: &str) -> Option<&Value> {
        self.extra.get(key)
    }

    pub(crate) fn take_validators(&mut self) -> IndexMap<String, Definition> {
        std::mem::take(&mut self.validators)
    }
}

fn pick(upper: &Option<Transforms>, lower: &Option<Transforms>) -> Option<Transforms> {
    upper.clone().or_else(|| lower.clone())
}

impl fmt::Debug for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Options")
            .field("strict", &self.strict)
            .field("canonize", &self.canonize)
            .field("return_null_on_errors", &self.return_null_on_errors)
            .field("stop_after_first_error", &self.stop_after_first_error)
            .field("optional", &self.optional)
            .field("default_value", &self.default_value)
            .field("allow_overwrite_validator", &self.allow_overwrite_validator)
            .field("return_undefined", &self.return_undefined)
            .field("extra", &self.extra)
            .field("validators", &self.validators.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

impl From<Map<String, Value>> for Options {
    fn from(map: Map<String, Value>) -> Self {
        Options::from_map(map)
    }
}

impl TryFrom<Value> for Options {
    type Error = ConfigError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(Options::from_map(map)),
            Value::Null => Ok(Options::new()),
            other => Err(ConfigError::InvalidSchema {
                reason: format!("options must be an object, got {}", json_type(&other)),
            }),
        }
    }
}

/// Fully resolved options for one validation call.
///
/// Definitions receive this and read the universal flags directly, and
/// definition-specific options through the typed getters.
#[derive(Clone, Debug)]
pub struct Resolved {
    /// Stricter type acceptance.
    pub strict: bool,
    /// Store the canonized value instead of the input.
    pub canonize: bool,
    /// `valid()` yields nothing while rejections exist.
    pub return_null_on_errors: bool,
    /// Skip calls once a rejection is recorded.
    pub stop_after_first_error: bool,
    /// Absent input is valid.
    pub optional: bool,
    /// Stored for absent optional input.
    pub default_value: Option<Value>,
    /// Registration may replace existing names.
    pub allow_overwrite_validator: bool,
    /// Store fields whose value is absent.
    pub return_undefined: bool,
    pub(crate) pre_transform: Option<Transforms>,
    pub(crate) pre_transform_item: Option<Transforms>,
    pub(crate) post_transform_item: Option<Transforms>,
    pub(crate) post_transform: Option<Transforms>,
    extra: Map<String, Value>,
}

impl Resolved {
    /// Definition-specific option.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.extra.get(key).filter(|v| !v.is_null())
    }

    /// Boolean option; JSON truthiness is not applied.
    pub fn get_bool(&self, key: &str) -> bool {
        self.get(key).and_then(Value::as_bool).unwrap_or(false)
    }

    /// Numeric option.
    pub fn get_f64(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(Value::as_f64)
    }

    /// Non-negative integral option, such as a length.
    pub fn get_usize(&self, key: &str) -> Option<usize> {
        self.get(key)
            .and_then(Value::as_u64)
            .and_then(|n| usize::try_from(n).ok())
    }

    /// String option.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }
}

/// Flatten the layers into the options for one call.
///
/// Later layers win key by key; any universal option left unset by every
/// layer takes its [`Options::engine`] baseline.
pub fn resolve(engine: &Options, instance: &Options, call: &Options) -> Resolved {
    let merged = Options::engine().overlay(engine).overlay(instance).overlay(call);

    Resolved {
        strict: merged.strict.unwrap_or(false),
        canonize: merged.canonize.unwrap_or(true),
        return_null_on_errors: merged.return_null_on_errors.unwrap_or(true),
        stop_after_first_error: merged.stop_after_first_error.unwrap_or(false),
        optional: merged.optional.unwrap_or(false),
        default_value: merged.default_value,
        allow_overwrite_validator: merged.allow_overwrite_validator.unwrap_or(false),
        return_undefined: merged.return_undefined.unwrap_or(true),
        pre_transform: merged.pre_transform,
        pre_transform_item: merged.pre_transform_item,
        post_transform_item: merged.post_transform_item,
        post_transform: merged.post_transform,
        extra: merged.extra,
    }
}
