//! Typed load/save over a [`KeyValueStore`] with swallow-and-default semantics.
//!
//! Reads never fail: a missing, empty, unreadable or malformed value yields the
//! caller's default. Writes never fail either; errors are logged and dropped so
//! the in-memory state stays authoritative.

use crate::domain::repositories::KeyValueStore;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

pub fn load_or_default<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str, default: T) -> T {
    let raw = match store.get(key) {
        Ok(Some(raw)) if !raw.trim().is_empty() => raw,
        Ok(_) => {
            debug!("No stored value for {}, using default", key);
            return default;
        }
        Err(e) => {
            warn!("Failed to read {} from local storage: {:#}", key, e);
            return default;
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => value,
        Err(e) => {
            warn!("Ignoring malformed value for {}: {}", key, e);
            default
        }
    }
}

pub fn save<T: Serialize + ?Sized>(store: &dyn KeyValueStore, key: &str, value: &T) {
    let encoded = match serde_json::to_string(value) {
        Ok(encoded) => encoded,
        Err(e) => {
            warn!("Failed to encode {} for local storage: {}", key, e);
            return;
        }
    };

    if let Err(e) = store.set(key, &encoded) {
        warn!("Failed to save {} to local storage: {:#}", key, e);
    }
}
