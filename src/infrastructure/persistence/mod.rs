//! Local key/value persistence for dashboard state.

pub mod in_memory;
pub mod json_file_store;
pub mod persisted_value;

pub use in_memory::InMemoryStore;
pub use json_file_store::JsonFileStore;
pub use persisted_value::{load_or_default, save};
