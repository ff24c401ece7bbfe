use std::any::Any;
use std::collections::HashMap;
use std::fmt;

use serde_json::Value;

/// Key/value store handed to every provider constructor and hook.
///
/// Values are stored type-erased; readers name the type they expect.
/// Values seeded from configuration files are stored as [`serde_json::Value`].
#[derive(Default)]
pub struct SharedContext {
    values: HashMap<String, Box<dyn Any>>,
}

impl SharedContext {
    /// Create a new empty context
    pub fn new() -> Self {
        Self {
            values: HashMap::new(),
        }
    }

    /// Create a context seeded with configuration values
    pub fn from_config_values(values: HashMap<String, Value>) -> Self {
        let mut context = Self::new();
        context.extend_values(values);
        context
    }

    /// Store every configuration value, overriding existing keys
    pub fn extend_values(&mut self, values: HashMap<String, Value>) {
        for (key, value) in values {
            self.set(key, value);
        }
    }

    /// Set a shared value
    pub fn set<T: 'static>(&mut self, key: impl Into<String>, value: T) {
        self.values.insert(key.into(), Box::new(value));
    }

    /// Get a shared value
    pub fn get<T: 'static>(&self, key: &str) -> Option<&T> {
        self.values.get(key).and_then(|value| value.downcast_ref::<T>())
    }

    /// Get a mutable reference to a shared value
    pub fn get_mut<T: 'static>(&mut self, key: &str) -> Option<&mut T> {
        self.values.get_mut(key).and_then(|value| value.downcast_mut::<T>())
    }

    /// Get a value seeded from configuration
    pub fn get_value(&self, key: &str) -> Option<&Value> {
        self.get::<Value>(key)
    }

    /// Read a string stored as `String`, `&'static str` or a JSON string.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        let value = self.values.get(key)?;
        if let Some(s) = value.downcast_ref::<String>() {
            return Some(s.as_str());
        }
        if let Some(s) = value.downcast_ref::<&'static str>() {
            return Some(s);
        }
        value.downcast_ref::<Value>().and_then(Value::as_str)
    }

    /// Check if key exists
    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Remove a value; returns whether the key was present
    pub fn remove(&mut self, key: &str) -> bool {
        self.values.remove(key).is_some()
    }

    /// Get all keys, sorted
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.values.keys().cloned().collect();
        keys.sort();
        keys
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl fmt::Debug for SharedContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedContext")
            .field("keys", &self.keys())
            .finish()
    }
}
