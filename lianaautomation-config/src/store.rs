// Read-only key-value config store consumed by the client

use crate::{OPTIONS_KEY, Result, Settings};
use serde_json::Value;
use std::collections::HashMap;

/// A host-owned key-value store. Values are JSON; the settings live as one
/// mapping under [`OPTIONS_KEY`].
pub trait ConfigStore: Send + Sync {
    /// Look up a key. `None` when absent.
    fn get(&self, key: &str) -> Option<Value>;
}

impl ConfigStore for HashMap<String, Value> {
    fn get(&self, key: &str) -> Option<Value> {
        HashMap::get(self, key).cloned()
    }
}

/// In-memory store for hosts without their own option storage.
#[derive(Debug, Clone, Default)]
pub struct MemoryConfigStore {
    values: HashMap<String, Value>,
}

impl MemoryConfigStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value, replacing any previous one.
    pub fn with(mut self, key: impl Into<String>, value: Value) -> Self {
        self.values.insert(key.into(), value);
        self
    }

    /// Store `settings` under [`OPTIONS_KEY`].
    pub fn with_settings(self, settings: &Settings) -> Self {
        let value = serde_json::to_value(settings).unwrap_or(Value::Null);
        self.with(OPTIONS_KEY, value)
    }
}

impl ConfigStore for MemoryConfigStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.values.get(key).cloned()
    }
}

impl Settings {
    /// Read settings from a host config store. A missing entry yields empty
    /// settings, which fail validation later rather than here.
    pub fn from_store(store: &dyn ConfigStore) -> Result<Self> {
        match store.get(OPTIONS_KEY) {
            Some(value) => Settings::from_value(value),
            None => Ok(Settings::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_options_key_gives_empty_settings() {
        let store = MemoryConfigStore::new();
        let settings = Settings::from_store(&store).unwrap();
        assert_eq!(settings, Settings::default());
        assert!(!settings.is_complete());
    }

    #[test]
    fn test_round_trip_through_store() {
        let settings = Settings::new().with_realm("ACME").with_channel("42");
        let store = MemoryConfigStore::new().with_settings(&settings);
        assert_eq!(Settings::from_store(&store).unwrap(), settings);
    }

    #[test]
    fn test_hashmap_store() {
        let mut map = HashMap::new();
        map.insert(
            OPTIONS_KEY.to_string(),
            json!({ "lianaautomation_user": "u1" }),
        );
        let settings = Settings::from_store(&map).unwrap();
        assert_eq!(settings.user.as_deref(), Some("u1"));
    }
}
