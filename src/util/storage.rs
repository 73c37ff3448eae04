// Key/value preference storage and JSON accessors over it
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::RwLock;

/// Persistent string-keyed storage, the counterpart of browser local storage.
pub trait PreferenceStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> anyhow::Result<()>;
    fn remove(&self, key: &str) -> anyhow::Result<()>;
    fn clear(&self) -> anyhow::Result<()>;
}

#[derive(Debug, Default)]
pub struct MemoryPreferenceStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get(&self, key: &str) -> Option<String> {
        let entries = self.entries.read().unwrap_or_else(|p| p.into_inner());
        entries.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> anyhow::Result<()> {
        let mut entries = self.entries.write().unwrap_or_else(|p| p.into_inner());
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> anyhow::Result<()> {
        let mut entries = self.entries.write().unwrap_or_else(|p| p.into_inner());
        entries.remove(key);
        Ok(())
    }

    fn clear(&self) -> anyhow::Result<()> {
        let mut entries = self.entries.write().unwrap_or_else(|p| p.into_inner());
        entries.clear();
        Ok(())
    }
}

/// Stored values are decoded as JSON; anything that is not JSON comes back
/// as a plain string.
pub fn get_from_storage(store: &dyn PreferenceStore, key: &str) -> Option<Value> {
    let raw = store.get(key)?;
    if raw.is_empty() {
        return None;
    }
    Some(serde_json::from_str(&raw).unwrap_or(Value::String(raw)))
}

pub fn save_to_storage<T: Serialize + ?Sized>(store: &dyn PreferenceStore, key: &str, value: &T) {
    let result = serde_json::to_string(value)
        .map_err(anyhow::Error::from)
        .and_then(|encoded| store.set(key, &encoded));
    if let Err(e) = result {
        tracing::error!("Storage error for key {}: {}", key, e);
    }
}

pub fn remove_from_storage(store: &dyn PreferenceStore, key: &str) {
    if let Err(e) = store.remove(key) {
        tracing::error!("Storage error removing {}: {}", key, e);
    }
}

pub fn clear_storage(store: &dyn PreferenceStore) {
    if let Err(e) = store.clear() {
        tracing::error!("Storage error clearing: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_round_trip_and_raw_fallback() {
        let store = MemoryPreferenceStore::new();
        save_to_storage(&store, "filters", &json!({"risk": "High"}));
        assert_eq!(get_from_storage(&store, "filters"), Some(json!({"risk": "High"})));

        store.set("theme", "dark").unwrap();
        assert_eq!(get_from_storage(&store, "theme"), Some(json!("dark")));
        assert_eq!(get_from_storage(&store, "missing"), None);
    }

    #[test]
    fn test_remove_and_clear() {
        let store = MemoryPreferenceStore::new();
        store.set("a", "1").unwrap();
        store.set("b", "2").unwrap();

        remove_from_storage(&store, "a");
        assert_eq!(store.get("a"), None);

        clear_storage(&store);
        assert_eq!(store.get("b"), None);
    }
}
