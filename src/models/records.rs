//! The plaintext record collection
//!
//! A mapping from secret name to secret value. This is the plaintext domain
//! object: it exists only in memory while a session is unlocked and is
//! rebuilt from decryption on every unlock.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{KeyholdError, KeyholdResult};

/// A name → value mapping of secrets
///
/// Record names are unique; inserting an existing name replaces its value
/// (last write wins). Iteration order is sorted by name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordCollection {
    records: BTreeMap<String, String>,
}

impl RecordCollection {
    /// Create an empty collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the collection is empty
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Look up a secret value by name
    pub fn get(&self, name: &str) -> Option<&str> {
        self.records.get(name).map(String::as_str)
    }

    /// Check whether a name is present
    pub fn contains(&self, name: &str) -> bool {
        self.records.contains_key(name)
    }

    /// Insert or replace a record, returning the previous value if any
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.records.insert(name.into(), value.into())
    }

    /// Remove a record by name, returning its value if it was present
    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.records.remove(name)
    }

    /// Iterate over (name, value) pairs in name order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &String)> {
        self.records.iter()
    }

    /// Iterate over record names in order
    pub fn names(&self) -> impl Iterator<Item = &String> {
        self.records.keys()
    }

    /// Serialize to the canonical byte form used for encryption
    ///
    /// Compact JSON over a sorted map, so the same collection always
    /// produces the same bytes and `from_canonical_slice` reproduces it
    /// exactly, unicode and empty-collection cases included.
    pub fn to_canonical_bytes(&self) -> KeyholdResult<Vec<u8>> {
        serde_json::to_vec(self)
            .map_err(|e| KeyholdError::Json(format!("Failed to serialize records: {}", e)))
    }

    /// Parse a collection back from its canonical byte form
    pub fn from_canonical_slice(bytes: &[u8]) -> KeyholdResult<Self> {
        serde_json::from_slice(bytes)
            .map_err(|e| KeyholdError::Json(format!("Failed to parse records: {}", e)))
    }
}
