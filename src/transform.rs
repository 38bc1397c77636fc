//! Pre- and post-validation transforms
//!
//! A transform is a function from one value to another. Transforms are
//! configured per option layer either as a single function or as an ordered
//! list, and run at four stages around validation:
//!
//! 1. [`Stage::Pre`] on the whole input
//! 2. [`Stage::PreItem`] on each item handed to the definition
//! 3. [`Stage::PostItem`] on each accepted item
//! 4. [`Stage::Post`] on the whole accepted value
//!
//! Values may be absent (`None`), so transforms receive and return
//! `Option<Value>`. [`Transform::map`] and [`Transform::try_map`] cover the
//! common case of only touching present values.
//!
//! # Example
//!
//! ```
//! use serde_json::{json, Value};
//! use sluice::transform::{apply, Transform, Transforms};
//!
//! let trim = Transform::map(|v| match v {
//!     Value::String(s) => Value::String(s.trim().to_string()),
//!     other => other,
//! });
//! let shout = Transform::map(|v| match v {
//!     Value::String(s) => Value::String(s.to_uppercase()),
//!     other => other,
//! });
//!
//! let chain = Transforms::from(vec![trim, shout]);
//! let out = apply(Some(json!("  hi ")), Some(&chain)).unwrap();
//! assert_eq!(out, Some(json!("HI")));
//! ```

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::error::TransformError;

type TransformFn = dyn Fn(Option<Value>) -> Result<Option<Value>, TransformError> + Send + Sync;

/// A single user transform.
#[derive(Clone)]
pub struct Transform(Arc<TransformFn>);

impl Transform {
    /// Wrap a transform that sees absent values too.
    ///
    /// # Example
    ///
    /// ```
    /// use serde_json::json;
    /// use sluice::transform::{apply, Transform, Transforms};
    ///
    /// // Fill in absent input before validation
    /// let fill = Transform::new(|v| Ok(v.or(Some(json!(0)))));
    /// let out = apply(None, Some(&Transforms::from(fill))).unwrap();
    /// assert_eq!(out, Some(json!(0)));
    /// ```
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(Option<Value>) -> Result<Option<Value>, TransformError> + Send + Sync + 'static,
    {
        Transform(Arc::new(f))
    }

    /// Infallible transform over present values; absent values pass through.
    pub fn map<F>(f: F) -> Self
    where
        F: Fn(Value) -> Value + Send + Sync + 'static,
    {
        Transform::new(move |v| Ok(v.map(&f)))
    }

    /// Fallible transform over present values; absent values pass through.
    pub fn try_map<F>(f: F) -> Self
    where
        F: Fn(Value) -> Result<Value, TransformError> + Send + Sync + 'static,
    {
        Transform::new(move |v| v.map(&f).transpose())
    }

    /// Run this transform.
    #[inline]
    pub fn call(&self, value: Option<Value>) -> Result<Option<Value>, TransformError> {
        (self.0)(value)
    }
}

impl fmt::Debug for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transform").finish_non_exhaustive()
    }
}

/// One configured transform stage: a single function or an ordered list.
#[derive(Clone, Debug, Default)]
pub struct Transforms(Vec<Transform>);

impl Transforms {
    /// Number of functions in this stage.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether this stage has no functions.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Transform> for Transforms {
    fn from(transform: Transform) -> Self {
        Transforms(vec![transform])
    }
}

impl From<Vec<Transform>> for Transforms {
    fn from(transforms: Vec<Transform>) -> Self {
        Transforms(transforms)
    }
}

/// Pipeline stage a transform runs at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Whole input, before validation.
    Pre,
    /// Each item, before it is handed to the definition.
    PreItem,
    /// Each accepted item.
    PostItem,
    /// Whole accepted value.
    Post,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Pre => write!(f, "preTransform"),
            Stage::PreItem => write!(f, "preTransformItem"),
            Stage::PostItem => write!(f, "postTransformItem"),
            Stage::Post => write!(f, "postTransform"),
        }
    }
}

/// Thread `value` through every function of a stage, in order.
///
/// An unconfigured stage is the identity. The first failing function stops
/// the stage and its error is returned.
pub fn apply(
    value: Option<Value>,
    transforms: Option<&Transforms>,
) -> Result<Option<Value>, TransformError> {
    match transforms {
        None => Ok(value),
        Some(stage) => stage.0.iter().try_fold(value, |v, t| t.call(v)),
    }
}
