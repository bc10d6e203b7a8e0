use crate::domain::repositories::KeyValueStore;
use anyhow::{Context, Result, anyhow};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use tracing::{debug, info};

/// Key/value store backed by one JSON object on disk.
///
/// The whole document is cached in memory and rewritten on every change.
pub struct JsonFileStore {
    file_path: PathBuf,
    entries: RwLock<BTreeMap<String, String>>,
}

impl JsonFileStore {
    /// Open the default store at `~/.tukuapps/storage.json`.
    pub fn new() -> Result<Self> {
        let home = std::env::var("HOME").context("Could not find HOME directory")?;
        Self::open(default_path(Path::new(&home)))
    }

    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let file_path = path.into();

        if let Some(dir) = file_path.parent() {
            if !dir.as_os_str().is_empty() && !dir.exists() {
                fs::create_dir_all(dir).context("Failed to create storage directory")?;
            }
        }

        let entries = if file_path.exists() {
            let content =
                fs::read_to_string(&file_path).context("Failed to read storage file")?;
            if content.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&content).context("Failed to parse storage JSON")?
            }
        } else {
            BTreeMap::new()
        };

        info!(
            "Opened local storage at {:?} ({} keys)",
            file_path,
            entries.len()
        );

        Ok(Self {
            file_path,
            entries: RwLock::new(entries),
        })
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    fn flush(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        let content =
            serde_json::to_string_pretty(entries).context("Failed to serialize storage")?;

        // Atomic write: write to temp file then rename
        let temp_path = self.file_path.with_extension("tmp");
        fs::write(&temp_path, content).context("Failed to write temp storage file")?;
        fs::rename(&temp_path, &self.file_path).context("Failed to rename storage file")?;

        debug!("Flushed {} keys to {:?}", entries.len(), self.file_path);
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self
            .entries
            .read()
            .map_err(|_| anyhow!("storage lock poisoned"))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| anyhow!("storage lock poisoned"))?;
        entries.insert(key.to_string(), value.to_string());
        self.flush(&entries)
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| anyhow!("storage lock poisoned"))?;
        if entries.remove(key).is_some() {
            self.flush(&entries)?;
        }
        Ok(())
    }
}

/// `<home>/.tukuapps/storage.json`
pub fn default_path(home: &Path) -> PathBuf {
    home.join(".tukuapps").join("storage.json")
}
