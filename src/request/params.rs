//! Request field store.
//!
//! # Responsibilities
//! - Hold the field map for the request currently being built
//! - Normalize field names to uppercase so lookups are case-insensitive
//!
//! Storage is a `BTreeMap` so iteration is already in ascending byte-wise
//! key order, which is exactly the order the canonical signing string needs.

use std::collections::BTreeMap;

/// Uppercase-keyed field map for one outbound gateway request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterStore {
    fields: BTreeMap<String, String>,
}

impl ParameterStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `value` under the uppercased `name`, overwriting any previous
    /// value for that slot.
    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        self.fields.insert(name.to_uppercase(), value.into());
    }

    /// Apply `set` for every pair in the mapping.
    pub fn set_all<I, K, V>(&mut self, entries: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        for (name, value) in entries {
            self.set(name.as_ref(), value);
        }
    }

    /// Look up a field under the uppercased `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(&name.to_uppercase()).map(String::as_str)
    }

    /// Number of stored fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the store holds no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate fields in ascending byte-wise key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
