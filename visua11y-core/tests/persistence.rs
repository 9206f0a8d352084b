use serde_json::{Value, json};
use visua11y_core::{FailingStore, KeyValueStore, MemoryStore, Persistence, StorageError};

fn samples() -> Vec<Value> {
    vec![
        json!({}),
        json!({"lang": "fr", "offset": [1, 2]}),
        json!({"states": {"custom-palette": {"enabled": true, "colors": {"headings": "#123"}}}}),
        json!([1, "two", 3.5, false]),
        json!("just text"),
    ]
}

#[test]
fn primary_path_round_trips() {
    let store = Persistence::new(MemoryStore::new(), FailingStore);
    for (index, value) in samples().into_iter().enumerate() {
        let key = format!("k{index}");
        store.save(&key, &value);
        assert_eq!(store.load(&key), value);
    }
}

#[test]
fn fallback_path_round_trips() {
    let store = Persistence::new(FailingStore, MemoryStore::new());
    for (index, value) in samples().into_iter().enumerate() {
        let key = format!("k{index}");
        store.save(&key, &value);
        assert_eq!(store.load(&key), value);
    }
}

/// Fails only on writes, like a full quota.
struct QuotaExceeded(MemoryStore);

impl KeyValueStore for QuotaExceeded {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.0.get_item(key)
    }

    fn set_item(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Backend("QuotaExceededError".into()))
    }
}

#[test]
fn readable_primary_is_not_overridden_by_fallback() {
    let fallback = MemoryStore::new();
    fallback.set_item("k", r#"{"from":"cookie"}"#).unwrap();
    let store = Persistence::new(QuotaExceeded(MemoryStore::new()), fallback);
    assert_eq!(store.load("k"), json!({}));

    store.save("k", &json!({"from": "write"}));
    assert_eq!(store.fallback().raw("k").as_deref(), Some(r#"{"from":"write"}"#));
}

#[test]
fn errors_describe_themselves() {
    assert_eq!(StorageError::Unavailable.to_string(), "Storage unavailable");
    assert_eq!(
        StorageError::Backend("denied".into()).to_string(),
        "Storage error: denied"
    );
}
