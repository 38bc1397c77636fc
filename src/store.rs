//! Accepted and rejected field values
//!
//! Every field key lives in at most one partition: recording an outcome for a
//! key removes whatever the other partition held for it.

use indexmap::IndexMap;
use serde_json::Value;

/// Field key to value; `None` is a field whose value is absent.
pub type FieldMap = IndexMap<String, Option<Value>>;

/// Per-instance accumulation of outcomes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultStore {
    accepted: FieldMap,
    rejected: FieldMap,
}

impl ResultStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an accepted value.
    pub fn accept(&mut self, key: &str, value: Option<Value>) {
        self.rejected.shift_remove(key);
        self.accepted.insert(key.to_string(), value);
    }

    /// Record a rejected original input.
    pub fn reject(&mut self, key: &str, original: Option<Value>) {
        self.accepted.shift_remove(key);
        self.rejected.insert(key.to_string(), original);
    }

    /// Accepted partition.
    pub fn accepted(&self) -> &FieldMap {
        &self.accepted
    }

    /// Rejected partition.
    pub fn rejected(&self) -> &FieldMap {
        &self.rejected
    }

    /// Whether any rejection is recorded.
    pub fn has_rejections(&self) -> bool {
        !self.rejected.is_empty()
    }

    /// Empty both partitions.
    pub fn clear(&mut self) {
        self.accepted.clear();
        self.rejected.clear();
    }

    /// Empty the accepted partition.
    pub fn clear_accepted(&mut self) {
        self.accepted.clear();
    }

    /// Empty the rejected partition.
    pub fn clear_rejected(&mut self) {
        self.rejected.clear();
    }
}
