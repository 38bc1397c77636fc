//! # Sluice
//!
//! > *"Let the clean water through"*
//!
//! A validation and canonicalization engine for dynamically typed (JSON)
//! data.
//!
//! Each named validator checks one value and may rewrite it into a canonical
//! form. A [`Validator`] runs validators over many fields and keeps two
//! buckets: the canonized values that passed and the original inputs that
//! did not.
//!
//! ## Philosophy
//!
//! - **Data problems are results, not errors.** Failed checks and failing
//!   transforms are recorded as rejections. Only API misuse (bad names,
//!   collisions, unknown validators) comes back as [`ConfigError`].
//! - **One definition, three shapes.** Registering `name` installs `name`,
//!   `nameArray` and `nameObject`, all driven by the same definition.
//! - **Layered options.** Engine defaults, instance options, alias defaults
//!   and call options are resolved fresh for every call.
//!
//! ## Quick Example
//!
//! ```rust
//! use serde_json::json;
//! use sluice::{Options, Registry, Validator};
//!
//! let mut v = Validator::with_registry(Registry::with_builtins(), Options::new()).unwrap();
//!
//! v.validate("num", "age", "36").unwrap()
//!     .validate("notEmptyStr", "name", "Ada").unwrap()
//!     .validate_with("strArray", "tags", json!(["Rust", "Math"]),
//!         Options::new().set("lowerCase", true)).unwrap();
//!
//! let valid = v.valid().unwrap();
//! assert_eq!(valid["age"], Some(json!(36)));
//! assert_eq!(valid["tags"], Some(json!(["rust", "math"])));
//! ```
//!
//! Runnable programs live in the `demos/` directory.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod definition;
mod definitions;
pub mod error;
pub mod options;
pub mod registry;
pub mod schema;
pub mod shape;
pub mod store;
pub mod testing;
pub mod transform;
pub mod validator;

// Re-exports
pub use definition::{Definition, Outcome};
pub use error::{ConfigError, EntryKind, TransformError};
pub use options::{Options, Resolved};
pub use registry::Registry;
pub use schema::{FieldRule, Schema};
pub use shape::Shape;
pub use store::{FieldMap, ResultStore};
pub use transform::{Stage, Transform, Transforms};
pub use validator::Validator;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::definition::{Definition, Outcome};
    pub use crate::error::{ConfigError, TransformError};
    pub use crate::options::Options;
    pub use crate::registry::Registry;
    pub use crate::schema::Schema;
    pub use crate::transform::Transform;
    pub use crate::validator::Validator;
}
