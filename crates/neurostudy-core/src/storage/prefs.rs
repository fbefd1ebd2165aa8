//! Preference and energy persistence over a string key-value store.
//!
//! Two keys, both rewritten whole on every change:
//! - `neuro-study-preferences`: the camelCase JSON preference record
//! - `neuro-study-energy-today`: the bare energy string, with no date
//!
//! Reads never fail: a missing or unreadable value falls back to defaults.

use std::cell::RefCell;
use std::collections::HashMap;

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::DatabaseError;
use crate::modes::{EnergyLevel, UserPreferences};

pub const PREFERENCES_KEY: &str = "neuro-study-preferences";
pub const ENERGY_KEY: &str = "neuro-study-energy-today";

pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, DatabaseError>;
    fn set(&self, key: &str, value: &str) -> Result<(), DatabaseError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &T {
    fn get(&self, key: &str) -> Result<Option<String>, DatabaseError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), DatabaseError> {
        (**self).set(key, value)
    }
}

/// In-process store, for guest use and tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, DatabaseError> {
        Ok(self.values.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), DatabaseError> {
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Stored preferences merged over the defaults.
pub fn load_preferences(store: &impl KeyValueStore) -> UserPreferences {
    let raw = match store.get(PREFERENCES_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return UserPreferences::default(),
        Err(e) => {
            tracing::warn!(error = %e, "could not read preferences, using defaults");
            return UserPreferences::default();
        }
    };
    match serde_json::from_str::<Value>(&raw) {
        Ok(Value::Object(stored)) => merge_over_defaults(stored),
        Ok(_) => {
            tracing::warn!("stored preferences are not an object, using defaults");
            UserPreferences::default()
        }
        Err(e) => {
            tracing::warn!(error = %e, "stored preferences are malformed, using defaults");
            UserPreferences::default()
        }
    }
}

/// Lay each stored field over the defaults on its own, so one bad value only
/// costs that field.
fn merge_over_defaults(stored: Map<String, Value>) -> UserPreferences {
    let defaults = UserPreferences::default();
    let mut merged = match serde_json::to_value(&defaults) {
        Ok(Value::Object(map)) => map,
        _ => return defaults,
    };
    let mut current = defaults;

    for (field, value) in stored {
        let previous = merged.insert(field.clone(), value);
        match UserPreferences::deserialize(Value::Object(merged.clone())) {
            Ok(prefs) => current = prefs,
            Err(e) => {
                tracing::warn!(%field, error = %e, "ignoring stored preference");
                match previous {
                    Some(old) => merged.insert(field, old),
                    None => merged.remove(&field),
                };
            }
        }
    }
    current
}

pub fn save_preferences(
    store: &impl KeyValueStore,
    preferences: &UserPreferences,
) -> Result<(), DatabaseError> {
    let json = serde_json::to_string(preferences)
        .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;
    store.set(PREFERENCES_KEY, &json)
}

pub fn load_energy(store: &impl KeyValueStore) -> EnergyLevel {
    match store.get(ENERGY_KEY) {
        Ok(Some(raw)) => raw.parse().unwrap_or_else(|e: String| {
            tracing::warn!(error = %e, "stored energy level is malformed, using normal");
            EnergyLevel::default()
        }),
        Ok(None) => EnergyLevel::default(),
        Err(e) => {
            tracing::warn!(error = %e, "could not read energy level, using normal");
            EnergyLevel::default()
        }
    }
}

pub fn save_energy(store: &impl KeyValueStore, energy: EnergyLevel) -> Result<(), DatabaseError> {
    store.set(ENERGY_KEY, energy.as_str())
}
