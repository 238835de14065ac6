//! Named find-and-replace patterns persisted through a key-value store.
//!
//! The whole list lives under one key as a JSON array of `{name, pattern}`
//! records. Every mutation rewrites the full array. A missing or unreadable
//! value loads as an empty list.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::StoreError;

pub const STORAGE_KEY: &str = "findReplacePatterns";

/// Minimal durable storage: string values addressed by string keys.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Process-local store, used by tests and as a fallback when no data
/// directory is available.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedPattern {
    pub name: String,
    pub pattern: String,
}

#[derive(Debug, thiserror::Error)]
pub enum PatternError {
    #[error("Please provide a name and a pattern to save.")]
    Incomplete,

    #[error("Only regular expression patterns can be saved.")]
    NotRegex,

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// The saved pattern list together with the store that backs it.
#[derive(Debug)]
pub struct PatternBook<S> {
    store: S,
    patterns: Vec<SavedPattern>,
}

impl<S: KeyValueStore> PatternBook<S> {
    pub fn load(store: S) -> Self {
        let patterns = match store.get(STORAGE_KEY) {
            None => Vec::new(),
            Some(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                log::warn!("Failed to parse saved patterns, starting empty: {e}");
                Vec::new()
            }),
        };
        PatternBook { store, patterns }
    }

    pub fn patterns(&self) -> &[SavedPattern] {
        &self.patterns
    }

    /// First pattern saved under `name`.
    pub fn find(&self, name: &str) -> Option<&SavedPattern> {
        self.patterns.iter().find(|p| p.name == name)
    }

    /// Appends a pattern. Names are not required to be unique.
    ///
    /// Both fields must be non-blank and only regex-mode patterns are
    /// accepted. The name is stored as given, untrimmed.
    pub fn add(&mut self, name: &str, pattern: &str, regex_mode: bool) -> Result<(), PatternError> {
        if name.trim().is_empty() || pattern.trim().is_empty() {
            return Err(PatternError::Incomplete);
        }
        if !regex_mode {
            return Err(PatternError::NotRegex);
        }

        self.patterns.push(SavedPattern {
            name: name.to_string(),
            pattern: pattern.to_string(),
        });
        self.persist()?;
        Ok(())
    }

    /// Drops every pattern named `name` and returns how many went.
    pub fn remove(&mut self, name: &str) -> Result<usize, PatternError> {
        let before = self.patterns.len();
        self.patterns.retain(|p| p.name != name);
        self.persist()?;
        Ok(before - self.patterns.len())
    }

    pub fn into_store(self) -> S {
        self.store
    }

    fn persist(&mut self) -> Result<(), StoreError> {
        let encoded = serde_json::to_string(&self.patterns).map_err(|source| StoreError::Encode {
            key: STORAGE_KEY.to_string(),
            source,
        })?;
        self.store.set(STORAGE_KEY, &encoded)
    }
}
