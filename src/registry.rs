//! Validator, alias and schema registry
//!
//! Names live in two scopes:
//!
//! - the **shared** scope, a [`Registry`], visible to every [`Validator`]
//!   built on it. [`Registry::global`] is the process-wide instance, created
//!   on first use with the built-in definitions and aliases.
//! - the **local** scope of one [`Validator`], which shadows the shared scope
//!   for that instance only.
//!
//! Registering a validator installs three entry points (`name`, `nameArray`,
//! `nameObject`) that share one [`Definition`]. Aliases install three
//! forwarding entry points. Schemas live in their own namespace.
//!
//! A registry is a cheap handle: clones share the same scope, and changes
//! made through any handle (including the live engine defaults) are seen by
//! every validator using it.
//!
//! [`Validator`]: crate::Validator

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::RwLock;
use tracing::debug;

use crate::definition::Definition;
use crate::definitions;
use crate::error::{ConfigError, EntryKind};
use crate::options::Options;
use crate::schema::Schema;
use crate::shape::Shape;

/// What a name resolves to.
#[derive(Debug, Clone)]
pub(crate) enum Entry {
    /// A definition driven by one shape adapter.
    Validator { definition: Definition, shape: Shape },
    /// Forward to another entry point with default options.
    Alias { target: String, defaults: Options },
}

/// One scope's namespaces.
#[derive(Debug, Clone, Default)]
pub(crate) struct Scope {
    entries: HashMap<String, Entry>,
    schemas: HashMap<String, Arc<Schema>>,
}

impl Scope {
    pub(crate) fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub(crate) fn entry(&self, name: &str) -> Option<&Entry> {
        self.entries.get(name)
    }

    pub(crate) fn has_schema(&self, name: &str) -> bool {
        self.schemas.contains_key(name)
    }

    pub(crate) fn schema(&self, name: &str) -> Option<&Arc<Schema>> {
        self.schemas.get(name)
    }

    pub(crate) fn insert_validator(&mut self, name: &str, definition: Definition) {
        for shape in Shape::ALL {
            self.entries.insert(
                shape.entry_name(name),
                Entry::Validator {
                    definition: definition.clone(),
                    shape,
                },
            );
        }
    }

    pub(crate) fn insert_alias(&mut self, alias: &str, validator: &str, defaults: Options) {
        for shape in Shape::ALL {
            self.entries.insert(
                shape.entry_name(alias),
                Entry::Alias {
                    target: shape.entry_name(validator),
                    defaults: defaults.clone(),
                },
            );
        }
    }

    pub(crate) fn insert_schema(&mut self, name: &str, schema: Schema) {
        self.schemas.insert(name.to_string(), Arc::new(schema));
    }

    fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

/// Reject empty and non identifier-like names.
pub(crate) fn check_name(name: &str) -> Result<(), ConfigError> {
    let mut chars = name.chars();
    let valid = match chars.next() {
        Some(first) => {
            (first.is_alphabetic() || first == '_' || first == '$')
                && chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
        }
        None => false,
    };

    if valid {
        Ok(())
    } else {
        Err(ConfigError::InvalidName {
            name: name.to_string(),
        })
    }
}

/// Fail on the first of `base`'s entry points that is already taken, unless
/// overwriting is allowed.
pub(crate) fn ensure_free(
    base: &str,
    allow_overwrite: bool,
    taken: impl Fn(&str) -> bool,
) -> Result<(), ConfigError> {
    if allow_overwrite {
        return Ok(());
    }
    match Shape::ALL
        .iter()
        .map(|shape| shape.entry_name(base))
        .find(|name| taken(name))
    {
        Some(name) => Err(ConfigError::Collision {
            kind: EntryKind::Validator,
            name,
        }),
        None => Ok(()),
    }
}

/// Fail on the first of `base`'s entry points that does not exist.
pub(crate) fn ensure_present(base: &str, exists: impl Fn(&str) -> bool) -> Result<(), ConfigError> {
    match Shape::ALL
        .iter()
        .map(|shape| shape.entry_name(base))
        .find(|name| !exists(name))
    {
        Some(name) => Err(ConfigError::UnknownValidator { name }),
        None => Ok(()),
    }
}

#[derive(Debug)]
struct Shared {
    defaults: Options,
    scope: Scope,
}

static GLOBAL: Lazy<Registry> = Lazy::new(Registry::with_builtins);

/// The shared scope: registered names plus the live engine defaults.
#[derive(Clone)]
pub struct Registry {
    inner: Arc<RwLock<Shared>>,
}

impl Registry {
    /// An empty registry with [`Options::engine`] defaults.
    pub fn new() -> Self {
        Registry {
            inner: Arc::new(RwLock::new(Shared {
                defaults: Options::engine(),
                scope: Scope::default(),
            })),
        }
    }

    /// A fresh registry holding the built-in definitions and aliases.
    ///
    /// Useful for tests and for isolating one component's registrations
    /// from the rest of the process.
    pub fn with_builtins() -> Self {
        let registry = Registry::new();
        {
            let mut shared = registry.inner.write();
            definitions::install(&mut shared.scope);
        }
        registry
    }

    /// Handle to the process-wide registry.
    ///
    /// It is created with the built-ins on first use and lives for the rest
    /// of the process. Changes through any handle are globally visible.
    pub fn global() -> Registry {
        GLOBAL.clone()
    }

    /// Current engine defaults.
    pub fn defaults(&self) -> Options {
        self.inner.read().defaults.clone()
    }

    /// Replace the engine defaults.
    ///
    /// Every validator built on this registry sees the change on its next
    /// call, including validators, aliases and schemas registered earlier.
    pub fn set_defaults(&self, defaults: Options) {
        self.inner.write().defaults = defaults;
    }

    /// Modify the engine defaults.
    ///
    /// `f` runs without the registry lock held, so it may read this
    /// registry. Its result replaces whatever defaults are current when it
    /// returns.
    ///
    /// ```
    /// use sluice::Registry;
    ///
    /// let registry = Registry::with_builtins();
    /// registry.update_defaults(|d| d.allow_overwrite_validator(true));
    /// assert_eq!(registry.defaults().allows_overwrite(), Some(true));
    /// ```
    pub fn update_defaults(&self, f: impl FnOnce(Options) -> Options) {
        let updated = f(self.defaults());
        self.inner.write().defaults = updated;
    }

    /// Register a validator in the shared scope.
    ///
    /// Installs `name`, `nameArray` and `nameObject`. Fails if the name is
    /// not identifier-like, or if any of the three exists and the engine
    /// defaults do not allow overwriting.
    pub fn add_validator(&self, name: &str, definition: Definition) -> Result<&Self, ConfigError> {
        check_name(name)?;
        let mut shared = self.inner.write();
        let allow = shared.defaults.allows_overwrite().unwrap_or(false);
        ensure_free(name, allow, |n| shared.scope.contains(n))?;

        shared.scope.insert_validator(name, definition);
        debug!(scope = "shared", name, "validator registered");
        Ok(self)
    }

    /// Register an alias of an existing validator in the shared scope.
    ///
    /// Calls through the alias use `defaults` under the call options.
    pub fn add_alias(
        &self,
        alias: &str,
        validator: &str,
        defaults: Options,
    ) -> Result<&Self, ConfigError> {
        check_name(alias)?;
        let mut shared = self.inner.write();
        ensure_present(validator, |n| shared.scope.contains(n))?;
        let allow = shared.defaults.allows_overwrite().unwrap_or(false);
        ensure_free(alias, allow, |n| shared.scope.contains(n))?;

        shared.scope.insert_alias(alias, validator, defaults);
        debug!(scope = "shared", alias, validator, "alias registered");
        Ok(self)
    }

    /// Register a schema in the shared scope.
    ///
    /// `defaults` is recorded on the schema but not applied when it runs.
    pub fn add_schema(
        &self,
        name: &str,
        schema: Schema,
        defaults: Options,
    ) -> Result<&Self, ConfigError> {
        check_name(name)?;
        let mut shared = self.inner.write();
        let allow = shared.defaults.allows_overwrite().unwrap_or(false);
        if !allow && shared.scope.has_schema(name) {
            return Err(ConfigError::Collision {
                kind: EntryKind::Schema,
                name: name.to_string(),
            });
        }

        debug!(scope = "shared", name, fields = schema.len(), "schema registered");
        shared.scope.insert_schema(name, schema.with_defaults(defaults));
        Ok(self)
    }

    /// Whether an entry point exists.
    pub fn contains(&self, name: &str) -> bool {
        self.inner.read().scope.contains(name)
    }

    /// Whether a schema exists.
    pub fn has_schema(&self, name: &str) -> bool {
        self.inner.read().scope.has_schema(name)
    }

    /// Definition behind a validator entry point; `None` for aliases.
    pub fn definition(&self, name: &str) -> Option<Definition> {
        match self.inner.read().scope.entry(name) {
            Some(Entry::Validator { definition, .. }) => Some(definition.clone()),
            _ => None,
        }
    }

    /// All entry point names, sorted.
    pub fn names(&self) -> Vec<String> {
        let shared = self.inner.read();
        let mut names: Vec<String> = shared.scope.names().map(str::to_string).collect();
        names.sort();
        names
    }

    pub(crate) fn entry(&self, name: &str) -> Option<Entry> {
        self.inner.read().scope.entry(name).cloned()
    }

    pub(crate) fn schema(&self, name: &str) -> Option<Arc<Schema>> {
        self.inner.read().scope.schema(name).cloned()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let shared = self.inner.read();
        f.debug_struct("Registry")
            .field("entries", &shared.scope.entries.len())
            .field("schemas", &shared.scope.schemas.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::Outcome;

    fn accept_all() -> Definition {
        Definition::new(|v, _| Outcome::new(v.cloned(), true))
    }

    #[test]
    fn test_check_name() {
        assert!(check_name("num").is_ok());
        assert!(check_name("_private").is_ok());
        assert!(check_name("positiveInt2").is_ok());
        assert!(check_name("").is_err());
        assert!(check_name("2fast").is_err());
        assert!(check_name("has space").is_err());
        assert!(check_name("dash-ed").is_err());
    }

    #[test]
    fn test_validator_installs_three_entry_points_sharing_a_definition() {
        let registry = Registry::new();
        registry.add_validator("id", accept_all()).unwrap();

        let scalar = registry.definition("id").unwrap();
        let array = registry.definition("idArray").unwrap();
        let object = registry.definition("idObject").unwrap();
        assert!(scalar.same_as(&array));
        assert!(scalar.same_as(&object));
    }

    #[test]
    fn test_collision_without_overwrite() {
        let registry = Registry::new();
        registry.add_validator("id", accept_all()).unwrap();
        let err = registry.add_validator("id", accept_all()).unwrap_err();
        assert_eq!(
            err,
            ConfigError::Collision {
                kind: EntryKind::Validator,
                name: "id".to_string()
            }
        );
    }

    #[test]
    fn test_collision_on_companion_name() {
        let registry = Registry::new();
        registry.add_validator("idArray", accept_all()).unwrap();
        // "id" is free but its sequence entry point "idArray" is taken
        let err = registry.add_validator("id", accept_all()).unwrap_err();
        assert!(matches!(err, ConfigError::Collision { name, .. } if name == "idArray"));
    }

    #[test]
    fn test_overwrite_allowed_by_defaults() {
        let registry = Registry::new();
        registry.add_validator("id", accept_all()).unwrap();
        registry.update_defaults(|d| d.allow_overwrite_validator(true));

        let replacement = accept_all();
        registry.add_validator("id", replacement.clone()).unwrap();
        assert!(registry.definition("idObject").unwrap().same_as(&replacement));
    }

    #[test]
    fn test_update_defaults_may_read_the_registry() {
        let registry = Registry::new();
        registry.set_defaults(Options::new().strict(true));
        registry.update_defaults(|d| {
            let seen = registry.defaults();
            assert_eq!(seen.allows_overwrite(), d.allows_overwrite());
            d.allow_overwrite_validator(!registry.contains("id"))
        });
        assert_eq!(registry.defaults().allows_overwrite(), Some(true));
    }

    #[test]
    fn test_alias_requires_target() {
        let registry = Registry::new();
        let err = registry.add_alias("short", "missing", Options::new()).unwrap_err();
        assert_eq!(
            err,
            ConfigError::UnknownValidator {
                name: "missing".to_string()
            }
        );
    }

    #[test]
    fn test_alias_installs_forwarding_entries() {
        let registry = Registry::new();
        registry
            .add_validator("str", accept_all())
            .and_then(|r| r.add_alias("short", "str", Options::new().set("maxLength", 3)))
            .unwrap();

        assert!(registry.contains("short"));
        assert!(registry.contains("shortArray"));
        assert!(registry.contains("shortObject"));
        assert!(registry.definition("short").is_none());
        match registry.entry("shortArray") {
            Some(Entry::Alias { target, .. }) => assert_eq!(target, "strArray"),
            other => panic!("expected alias entry, got {:?}", other),
        }
    }

    #[test]
    fn test_alias_cannot_shadow_validator() {
        let registry = Registry::new();
        registry.add_validator("str", accept_all()).unwrap();
        registry.add_validator("num", accept_all()).unwrap();
        assert!(matches!(
            registry.add_alias("str", "num", Options::new()),
            Err(ConfigError::Collision { .. })
        ));
    }

    #[test]
    fn test_schema_namespace_is_separate() {
        let registry = Registry::new();
        registry.add_validator("user", accept_all()).unwrap();
        registry.add_schema("user", Schema::new(), Options::new()).unwrap();
        assert!(registry.has_schema("user"));

        let err = registry.add_schema("user", Schema::new(), Options::new()).unwrap_err();
        assert_eq!(
            err,
            ConfigError::Collision {
                kind: EntryKind::Schema,
                name: "user".to_string()
            }
        );
    }

    #[test]
    fn test_clones_share_scope() {
        let registry = Registry::new();
        let other = registry.clone();
        other.add_validator("id", accept_all()).unwrap();
        assert!(registry.contains("idArray"));
    }

    #[test]
    fn test_builtins_present() {
        let registry = Registry::with_builtins();
        for name in [
            "defined",
            "bool",
            "num",
            "str",
            "enumerated",
            "enumeratedKey",
            "enumeratedKeyValue",
            "json",
            "notEmptyStr",
            "positiveInt",
        ] {
            for shape in Shape::ALL {
                assert!(registry.contains(&shape.entry_name(name)), "{}", name);
            }
        }
    }
}
