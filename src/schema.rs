//! Schemas: named, ordered field bindings
//!
//! A schema maps field names to the validator entry point (and options) that
//! checks them. Running a schema against a record validates exactly the
//! schema's fields, in the order they were declared; other record fields are
//! ignored.
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//! use sluice::{Options, Registry, Schema, Validator};
//!
//! let registry = Registry::with_builtins();
//! let user = Schema::new()
//!     .field("id", "positiveInt", Options::new())
//!     .field("name", "str", Options::new().set("maxLength", 10).set("truncate", true));
//! registry.add_schema("user", user, Options::new()).unwrap();
//!
//! let mut v = Validator::with_registry(registry, Options::new()).unwrap();
//! let record = json!({ "id": "12", "name": "Ada Lovelace", "admin": true });
//! v.schema("user", record.as_object().unwrap()).unwrap();
//!
//! let valid = v.valid().unwrap();
//! assert_eq!(valid["id"], Some(json!(12)));
//! assert_eq!(valid["name"], Some(json!("Ada Lovela")));
//! assert!(!valid.contains_key("admin"));
//! ```

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::{json_type, ConfigError};
use crate::options::Options;

/// How one schema field is validated.
#[derive(Debug, Clone)]
pub struct FieldRule {
    /// Entry point name (`num`, `strArray`, an alias, ...).
    pub validator: String,
    /// Options passed as call options for this field.
    pub options: Options,
}

/// An ordered set of field bindings.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    fields: IndexMap<String, FieldRule>,
    defaults: Options,
}

#[derive(Deserialize)]
struct RawRule {
    validator: String,
    #[serde(default)]
    options: Option<Map<String, Value>>,
}

impl Schema {
    /// An empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a field; redeclaring a field replaces its rule but keeps its position.
    pub fn field(
        mut self,
        name: impl Into<String>,
        validator: impl Into<String>,
        options: Options,
    ) -> Self {
        self.fields.insert(
            name.into(),
            FieldRule {
                validator: validator.into(),
                options,
            },
        );
        self
    }

    /// Read a schema from `{ field: { "validator": name, "options": {...} } }`.
    ///
    /// # Example
    ///
    /// ```
    /// use serde_json::json;
    /// use sluice::Schema;
    ///
    /// let schema = Schema::from_json(&json!({
    ///     "id": { "validator": "positiveInt" },
    ///     "tags": { "validator": "strArray", "options": { "optional": true } },
    /// })).unwrap();
    ///
    /// let names: Vec<_> = schema.fields().map(|(name, _)| name).collect();
    /// assert_eq!(names, vec!["id", "tags"]);
    /// ```
    pub fn from_json(value: &Value) -> Result<Self, ConfigError> {
        let map = value.as_object().ok_or_else(|| ConfigError::InvalidSchema {
            reason: format!("expected an object, got {}", json_type(value)),
        })?;

        map.iter().try_fold(Schema::new(), |schema, (name, rule)| {
            let raw: RawRule =
                serde_json::from_value(rule.clone()).map_err(|e| ConfigError::InvalidSchema {
                    reason: format!("field {}: {}", name, e),
                })?;
            let options = raw.options.map(Options::from_map).unwrap_or_default();
            Ok(schema.field(name.clone(), raw.validator, options))
        })
    }

    /// Fields in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldRule)> {
        self.fields.iter().map(|(name, rule)| (name.as_str(), rule))
    }

    /// Rule for one field.
    pub fn get(&self, name: &str) -> Option<&FieldRule> {
        self.fields.get(name)
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the schema has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Default options given at registration.
    ///
    /// They are recorded but not applied: each field is validated with its
    /// own rule options only.
    pub fn defaults(&self) -> &Options {
        &self.defaults
    }

    pub(crate) fn with_defaults(mut self, defaults: Options) -> Self {
        self.defaults = defaults;
        self
    }
}
