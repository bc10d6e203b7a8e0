//! Local storage configuration parsing from environment variables.

use crate::infrastructure::persistence::json_file_store::default_path;
use anyhow::{Context, Result};
use std::env;
use std::path::{Path, PathBuf};

/// Storage environment configuration
#[derive(Debug, Clone, PartialEq)]
pub struct StorageEnvConfig {
    pub path: PathBuf,
}

impl StorageEnvConfig {
    pub fn from_env() -> Result<Self> {
        let path = match env::var("TUKUAPPS_STORAGE_PATH") {
            Ok(path) if !path.trim().is_empty() => PathBuf::from(path),
            _ => {
                let home = env::var("HOME").context("Could not find HOME directory")?;
                default_path(Path::new(&home))
            }
        };
        Ok(Self { path })
    }
}
