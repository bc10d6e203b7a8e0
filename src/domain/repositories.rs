//! Repository Pattern Abstractions
//!
//! The dashboard persists a handful of values in a browser-style key/value
//! store: string keys mapped to JSON-encoded strings.
//!
//! # Current Implementation
//!
//! - `JsonFileStore`: a single JSON document on disk, rewritten atomically
//! - `InMemoryStore`: thread-safe map for tests and for running without disk
//!
//! # Example
//!
//! ```rust,no_run
//! use tukuapps_dashboard::domain::repositories::KeyValueStore;
//! use tukuapps_dashboard::infrastructure::persistence::InMemoryStore;
//!
//! let store = InMemoryStore::new();
//! store.set("tukuapps_privacy_mode", "true").unwrap();
//! assert_eq!(store.get("tukuapps_privacy_mode").unwrap().as_deref(), Some("true"));
//! ```

use anyhow::Result;

/// Key for the persisted trade list.
pub const TRADES_KEY: &str = "tukuapps_trades";
/// Key for the persisted cash balance.
pub const TRADING_BALANCE_KEY: &str = "tukuapps_trading_balance";
/// Key for the persisted privacy flag.
pub const PRIVACY_MODE_KEY: &str = "tukuapps_privacy_mode";

/// Local string key/value storage
pub trait KeyValueStore: Send + Sync {
    /// Raw value stored under `key`, `None` when absent
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key` if present
    fn remove(&self, key: &str) -> Result<()>;
}
