//! The validator facade
//!
//! A [`Validator`] owns its instance options, a [`ResultStore`] and a local
//! scope of validators, aliases and schemas that shadows the shared
//! [`Registry`] it was built on. Every call looks its entry point up by name,
//! resolves the option layers, runs the shape adapter and records the outcome
//! under the given field key.
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//! use sluice::{Options, Registry, Validator};
//!
//! let registry = Registry::with_builtins();
//! let mut v = Validator::with_registry(registry, Options::new()).unwrap();
//!
//! v.validate("num", "age", "42").unwrap()
//!     .validate("str", "name", "Ada").unwrap()
//!     .validate("bool", "admin", "0").unwrap()
//!     .validate("positiveInt", "id", -3).unwrap();
//!
//! // One rejection hides the accepted values by default.
//! assert!(v.valid().is_none());
//! assert_eq!(v.errors().unwrap()["id"], Some(json!(-3)));
//!
//! v.reset_errors();
//! let valid = v.valid().unwrap();
//! assert_eq!(valid["age"], Some(json!(42)));
//! assert_eq!(valid["admin"], Some(json!(false)));
//! ```
//!
//! # Scopes
//!
//! Names registered on a validator are visible to that validator only and
//! win over shared names. Aliases resolve their target from the scope they
//! were registered in: a local alias sees local and shared names, a shared
//! alias sees shared names only.

use serde_json::{Map, Value};
use tracing::{debug, debug_span};

use crate::definition::Definition;
use crate::error::{json_type, ConfigError, EntryKind};
use crate::options::{resolve, Options};
use crate::registry::{check_name, ensure_free, ensure_present, Entry, Registry, Scope};
use crate::schema::Schema;
use crate::shape::{self, Shape};
use crate::store::{FieldMap, ResultStore};

/// Alias forwarding stops after this many hops.
const MAX_ALIAS_HOPS: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Origin {
    Local,
    Shared,
}

/// A validation session: options, results and local registrations.
#[derive(Debug)]
pub struct Validator {
    options: Options,
    store: ResultStore,
    local: Scope,
    registry: Registry,
}

impl Validator {
    /// A validator on the process-wide registry with no instance options.
    pub fn new() -> Self {
        Validator {
            options: Options::new(),
            store: ResultStore::new(),
            local: Scope::default(),
            registry: Registry::global(),
        }
    }

    /// A validator on the process-wide registry.
    ///
    /// Validators given through [`Options::validator`] are registered locally.
    pub fn with_options(options: Options) -> Result<Self, ConfigError> {
        Self::with_registry(Registry::global(), options)
    }

    /// A validator on the given shared registry.
    ///
    /// ```
    /// use serde_json::json;
    /// use sluice::{Definition, Options, Outcome, Registry, Validator};
    ///
    /// let upper = Definition::new(|v, _| match v.and_then(|v| v.as_str()) {
    ///     Some(s) => Outcome::accept(s.to_uppercase()),
    ///     None => Outcome::reject(v.cloned()),
    /// });
    /// let options = Options::new().validator("shout", upper);
    /// let mut v = Validator::with_registry(Registry::with_builtins(), options).unwrap();
    ///
    /// v.validate("shoutArray", "words", json!(["a", "b"])).unwrap();
    /// assert_eq!(v.valid().unwrap()["words"], Some(json!(["A", "B"])));
    /// ```
    pub fn with_registry(registry: Registry, mut options: Options) -> Result<Self, ConfigError> {
        let validators = options.take_validators();
        let mut validator = Validator {
            options,
            store: ResultStore::new(),
            local: Scope::default(),
            registry,
        };
        for (name, definition) in validators {
            validator.add_validator(&name, definition)?;
        }
        Ok(validator)
    }

    /// Validate `value` under `key` through the entry point `name`.
    ///
    /// `None` is an absent value, which is distinct from JSON `null`.
    /// Fails only when `name` cannot be resolved; rejected data is recorded,
    /// never returned as an error.
    pub fn call(
        &mut self,
        name: &str,
        key: &str,
        value: Option<Value>,
        options: Options,
    ) -> Result<&mut Self, ConfigError> {
        let (definition, shape, call_options) = self.lookup(name, options)?;
        let engine = self.registry.defaults();
        let resolved = resolve(&engine, &self.options, &call_options);
        shape::run(shape, &definition, key, value, &resolved, &mut self.store);
        Ok(self)
    }

    /// [`call`](Self::call) with a present value and no call options.
    pub fn validate(
        &mut self,
        name: &str,
        key: &str,
        value: impl Into<Value>,
    ) -> Result<&mut Self, ConfigError> {
        self.call(name, key, Some(value.into()), Options::new())
    }

    /// [`call`](Self::call) with a present value.
    pub fn validate_with(
        &mut self,
        name: &str,
        key: &str,
        value: impl Into<Value>,
        options: Options,
    ) -> Result<&mut Self, ConfigError> {
        self.call(name, key, Some(value.into()), options)
    }

    /// Run a schema against a record.
    ///
    /// Clears the store, then validates each schema field in declaration
    /// order with `record[field]` (absent when the record lacks it). Record
    /// fields the schema does not name are ignored.
    pub fn schema(&mut self, name: &str, record: &Map<String, Value>) -> Result<&mut Self, ConfigError> {
        let schema = match self.local.schema(name) {
            Some(schema) => schema.clone(),
            None => self
                .registry
                .schema(name)
                .ok_or_else(|| ConfigError::UnknownSchema {
                    name: name.to_string(),
                })?,
        };

        let span = debug_span!("schema", name);
        let _guard = span.enter();
        debug!(fields = schema.len(), "running schema");

        self.store.clear();
        for (field, rule) in schema.fields() {
            self.call(
                &rule.validator,
                field,
                record.get(field).cloned(),
                rule.options.clone(),
            )?;
        }
        Ok(self)
    }

    /// Accepted values.
    ///
    /// `None` when rejections exist and `returnNullOnErrors` is on (engine
    /// defaults overlaid by the instance options).
    pub fn valid(&self) -> Option<&FieldMap> {
        if self.hides_valid() {
            None
        } else {
            Some(self.store.accepted())
        }
    }

    /// Accepted values merged over `base`, which must be a JSON object.
    ///
    /// Accepted fields replace the base's fields of the same name; accepted
    /// absent values remove them. `Ok(None)` under the same condition that
    /// makes [`valid`](Self::valid) return `None`.
    ///
    /// ```
    /// use serde_json::json;
    /// use sluice::{Options, Registry, Validator};
    ///
    /// let mut v = Validator::with_registry(Registry::with_builtins(), Options::new()).unwrap();
    /// v.validate("num", "b", "2").unwrap();
    ///
    /// let merged = v.valid_into(json!({ "a": 1, "b": "old" })).unwrap();
    /// assert_eq!(merged, Some(json!({ "a": 1, "b": 2 })));
    /// assert!(v.valid_into(json!([1])).is_err());
    /// ```
    pub fn valid_into(&self, base: Value) -> Result<Option<Value>, ConfigError> {
        let mut map = match base {
            Value::Object(map) => map,
            other => {
                return Err(ConfigError::InvalidBase {
                    found: json_type(&other),
                })
            }
        };

        if self.hides_valid() {
            return Ok(None);
        }

        for (key, value) in self.store.accepted() {
            match value {
                Some(value) => {
                    map.insert(key.clone(), value.clone());
                }
                None => {
                    map.remove(key);
                }
            }
        }
        Ok(Some(Value::Object(map)))
    }

    /// Rejected original inputs; `None` when there are none.
    pub fn errors(&self) -> Option<&FieldMap> {
        if self.store.has_rejections() {
            Some(self.store.rejected())
        } else {
            None
        }
    }

    /// Both partitions of the store.
    pub fn results(&self) -> &ResultStore {
        &self.store
    }

    /// Clear accepted and rejected values.
    pub fn reset(&mut self) -> &mut Self {
        self.store.clear();
        self
    }

    /// Clear accepted values only.
    pub fn reset_valid(&mut self) -> &mut Self {
        self.store.clear_accepted();
        self
    }

    /// Clear rejected values only.
    pub fn reset_errors(&mut self) -> &mut Self {
        self.store.clear_rejected();
        self
    }

    /// Register a validator visible to this instance only.
    ///
    /// Collides with local and shared names unless the instance options
    /// allow overwriting.
    pub fn add_validator(&mut self, name: &str, definition: Definition) -> Result<&mut Self, ConfigError> {
        check_name(name)?;
        ensure_free(name, self.allows_overwrite(), |n| self.has_entry(n))?;

        self.local.insert_validator(name, definition);
        debug!(scope = "local", name, "validator registered");
        Ok(self)
    }

    /// Register an alias visible to this instance only.
    pub fn add_alias(
        &mut self,
        alias: &str,
        validator: &str,
        defaults: Options,
    ) -> Result<&mut Self, ConfigError> {
        check_name(alias)?;
        ensure_present(validator, |n| self.has_entry(n))?;
        ensure_free(alias, self.allows_overwrite(), |n| self.has_entry(n))?;

        self.local.insert_alias(alias, validator, defaults);
        debug!(scope = "local", alias, validator, "alias registered");
        Ok(self)
    }

    /// Register a schema visible to this instance only.
    ///
    /// Collides only with schemas registered on this instance.
    pub fn add_schema(
        &mut self,
        name: &str,
        schema: Schema,
        defaults: Options,
    ) -> Result<&mut Self, ConfigError> {
        check_name(name)?;
        if !self.allows_overwrite() && self.local.has_schema(name) {
            return Err(ConfigError::Collision {
                kind: EntryKind::Schema,
                name: name.to_string(),
            });
        }

        debug!(scope = "local", name, fields = schema.len(), "schema registered");
        self.local.insert_schema(name, schema.with_defaults(defaults));
        Ok(self)
    }

    /// Whether an entry point is reachable from this instance.
    pub fn has_entry(&self, name: &str) -> bool {
        self.local.contains(name) || self.registry.contains(name)
    }

    /// Whether a schema is reachable from this instance.
    pub fn has_schema(&self, name: &str) -> bool {
        self.local.has_schema(name) || self.registry.has_schema(name)
    }

    /// Definition behind a validator entry point, local first; `None` for
    /// aliases and unknown names.
    pub fn definition(&self, name: &str) -> Option<Definition> {
        match self.local.entry(name) {
            Some(Entry::Validator { definition, .. }) => Some(definition.clone()),
            Some(Entry::Alias { .. }) => None,
            None => self.registry.definition(name),
        }
    }

    /// Instance options.
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// The shared registry this instance reads.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    fn allows_overwrite(&self) -> bool {
        self.options.allows_overwrite().unwrap_or(false)
    }

    fn hides_valid(&self) -> bool {
        let null_on_errors = self
            .registry
            .defaults()
            .overlay(&self.options)
            .returns_null_on_errors()
            .unwrap_or(true);
        null_on_errors && self.store.has_rejections()
    }

    /// Follow aliases from `name` to a validator, folding each alias's
    /// defaults under the options collected so far.
    fn lookup(&self, name: &str, options: Options) -> Result<(Definition, Shape, Options), ConfigError> {
        let mut current = name.to_string();
        let mut origin = Origin::Local;
        let mut options = options;

        for _ in 0..=MAX_ALIAS_HOPS {
            let found = match origin {
                Origin::Local => match self.local.entry(&current) {
                    Some(entry) => Some((entry.clone(), Origin::Local)),
                    None => self.registry.entry(&current).map(|e| (e, Origin::Shared)),
                },
                Origin::Shared => self.registry.entry(&current).map(|e| (e, Origin::Shared)),
            };

            match found {
                None => return Err(ConfigError::UnknownValidator { name: current }),
                Some((Entry::Validator { definition, shape }, _)) => {
                    return Ok((definition, shape, options))
                }
                Some((Entry::Alias { target, defaults }, scope)) => {
                    options = defaults.overlay(&options);
                    current = target;
                    origin = scope;
                }
            }
        }

        Err(ConfigError::AliasDepth {
            name: name.to_string(),
        })
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}
