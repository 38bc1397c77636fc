//! Error types for registration and retrieval misuse
//!
//! Only programmer/integration mistakes surface as errors. Data that fails a
//! check, or a transform that fails while processing a field, is recorded as a
//! rejection in the [`ResultStore`](crate::store::ResultStore) instead.
//!
//! # Examples
//!
//! ```
//! use sluice::{ConfigError, Registry, Validator};
//!
//! let registry = Registry::with_builtins();
//! let mut validator = Validator::with_registry(registry, Default::default()).unwrap();
//!
//! let err = validator.call("nope", "field", None, Default::default()).unwrap_err();
//! assert_eq!(err, ConfigError::UnknownValidator { name: "nope".to_string() });
//! ```

use std::fmt;

/// Which registry namespace a collision happened in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Validator and alias entry points (`name`, `nameArray`, `nameObject`).
    Validator,
    /// Schemas.
    Schema,
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryKind::Validator => write!(f, "validator"),
            EntryKind::Schema => write!(f, "schema"),
        }
    }
}

/// Misuse of the registration or retrieval API.
///
/// These are never recovered internally: they are returned to the caller as
/// soon as they are detected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The name is empty or not identifier-like.
    InvalidName {
        /// The rejected name.
        name: String,
    },
    /// The name is already registered and overwriting is not allowed.
    Collision {
        /// Namespace of the existing entry.
        kind: EntryKind,
        /// The colliding name.
        name: String,
    },
    /// No validator or alias is registered under this name.
    UnknownValidator {
        /// The missing entry point.
        name: String,
    },
    /// No schema is registered under this name.
    UnknownSchema {
        /// The missing schema.
        name: String,
    },
    /// The base record handed to `valid_into` is not a JSON object.
    InvalidBase {
        /// JSON type name of what was supplied instead.
        found: &'static str,
    },
    /// Alias forwarding did not reach a validator within the hop limit.
    AliasDepth {
        /// The entry point that started the chain.
        name: String,
    },
    /// A JSON schema description could not be read.
    InvalidSchema {
        /// What was wrong with it.
        reason: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidName { name } => {
                write!(f, "the specified name {:?} is not valid", name)
            }
            ConfigError::Collision { kind, name } => {
                write!(f, "the {} {} is already defined", kind, name)
            }
            ConfigError::UnknownValidator { name } => {
                write!(f, "the validator {} is undefined", name)
            }
            ConfigError::UnknownSchema { name } => write!(f, "schema {} not found", name),
            ConfigError::InvalidBase { found } => {
                write!(f, "base needs to be a plain object if specified, got {}", found)
            }
            ConfigError::AliasDepth { name } => {
                write!(f, "alias {} does not resolve to a validator", name)
            }
            ConfigError::InvalidSchema { reason } => write!(f, "invalid schema: {}", reason),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Error raised by a user transform.
///
/// A failing transform never reaches the caller of a validation call: the
/// field is rejected with its original input and the error is logged.
///
/// # Examples
///
/// ```
/// use sluice::TransformError;
///
/// let err = TransformError::new("not a date");
/// assert_eq!(err.message(), "not a date");
/// assert_eq!(err.to_string(), "transform failed: not a date");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformError {
    message: String,
}

impl TransformError {
    /// Create a transform error with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The message the transform failed with.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for TransformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "transform failed: {}", self.message)
    }
}

impl std::error::Error for TransformError {}

/// JSON type name used in error messages.
pub(crate) fn json_type(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
