//! Persistence adapter: JSON values in a primary key-value store with a
//! secondary store used whenever the primary one fails.

use serde::Serialize;
use serde_json::{Map, Value};
use std::cell::RefCell;
use std::collections::HashMap;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Storage unavailable")]
    Unavailable,
    #[error("Storage error: {0}")]
    Backend(String),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Minimal string store a browser or test double can provide.
pub trait KeyValueStore {
    /// Read a raw value; `Ok(None)` when the key is absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be accessed.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write a raw value.
    ///
    /// # Errors
    ///
    /// Returns an error if the store rejects the write.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// In-process store, used for tests and hosts without browser storage.
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn raw(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.raw(key))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Store that rejects every access, standing in for disabled storage.
#[derive(Debug, Default, Clone, Copy)]
pub struct FailingStore;

impl KeyValueStore for FailingStore {
    fn get_item(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Unavailable)
    }

    fn set_item(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable)
    }
}

pub struct Persistence<P, F> {
    primary: P,
    fallback: F,
}

impl<P: KeyValueStore, F: KeyValueStore> Persistence<P, F> {
    pub const fn new(primary: P, fallback: F) -> Self {
        Self { primary, fallback }
    }

    /// Serialize and write `value`, falling back on any primary failure.
    ///
    /// Failures are logged, never returned.
    pub fn save<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        let json = match serde_json::to_string(value) {
            Ok(json) => json,
            Err(err) => {
                log::error!("{}", StorageError::from(err));
                return;
            }
        };

        if let Err(err) = self.primary.set_item(key, &json) {
            log::warn!("primary storage write failed for {key}: {err}; using fallback");
            if let Err(err) = self.fallback.set_item(key, &json) {
                log::error!("fallback storage write failed for {key}: {err}");
            }
        }
    }

    /// Read and parse the value under `key`.
    ///
    /// Missing keys, unreadable stores and malformed JSON all yield an empty
    /// JSON object.
    #[must_use]
    pub fn load(&self, key: &str) -> Value {
        let raw = match self.primary.get_item(key) {
            Ok(raw) => raw,
            Err(err) => {
                log::warn!("primary storage read failed for {key}: {err}; using fallback");
                self.fallback.get_item(key).unwrap_or_else(|err| {
                    log::error!("fallback storage read failed for {key}: {err}");
                    None
                })
            }
        };

        let Some(raw) = raw.filter(|raw| !raw.is_empty()) else {
            return Value::Object(Map::new());
        };

        match serde_json::from_str(&raw) {
            Ok(Value::Null) => Value::Object(Map::new()),
            Ok(value) => value,
            Err(err) => {
                log::warn!("discarding malformed stored data for {key}: {err}");
                Value::Object(Map::new())
            }
        }
    }

    pub const fn primary(&self) -> &P {
        &self.primary
    }

    pub const fn fallback(&self) -> &F {
        &self.fallback
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn round_trips_through_primary() {
        let store = Persistence::new(MemoryStore::new(), MemoryStore::new());
        let value = json!({"a": [1, 2, {"b": null}], "c": "text"});
        store.save("k", &value);
        assert_eq!(store.load("k"), value);
        assert!(store.fallback().raw("k").is_none());
    }

    #[test]
    fn falls_back_when_primary_fails() {
        let store = Persistence::new(FailingStore, MemoryStore::new());
        let value = json!({"states": {"big-cursor": true}});
        store.save("k", &value);
        assert!(store.fallback().raw("k").is_some());
        assert_eq!(store.load("k"), value);
    }

    #[test]
    fn missing_or_malformed_data_is_empty_object() {
        let store = Persistence::new(MemoryStore::new(), FailingStore);
        assert_eq!(store.load("absent"), json!({}));
        store.primary().set_item("bad", "{not json").unwrap();
        assert_eq!(store.load("bad"), json!({}));
        store.primary().set_item("null", "null").unwrap();
        assert_eq!(store.load("null"), json!({}));
    }

    #[test]
    fn both_stores_failing_degrades_to_empty() {
        let store = Persistence::new(FailingStore, FailingStore);
        store.save("k", &json!({"a": 1}));
        assert_eq!(store.load("k"), json!({}));
    }
}
