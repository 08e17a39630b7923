//! File-backed key-value store for state that survives restarts.
//!
//! The whole map is kept in memory and rewritten as a bincode file on every
//! `set`. It only ever holds a handful of entries.

use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use movies_core::{KeyValueStore, StoreError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Serialize, Deserialize)]
struct StateFile {
    entries: HashMap<String, String>,
}

#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    state: StateFile,
}

impl FileStore {
    /// Open the store at `path`. A missing file starts empty; an unreadable
    /// one is logged and replaced on the next write.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let state = if path.exists() {
            match load_state(&path) {
                Ok(state) => state,
                Err(e) => {
                    tracing::warn!("Failed to load saved state from {}: {}", path.display(), e);
                    tracing::warn!("Starting from a fresh state file");
                    StateFile::default()
                }
            }
        } else {
            StateFile::default()
        };

        Ok(Self { path, state })
    }

    fn save(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let mut writer = BufWriter::new(File::create(&self.path)?);
        bincode::serialize_into(&mut writer, &self.state)
            .map_err(|e| StoreError::Encoding(e.to_string()))?;
        writer.flush()?;
        Ok(())
    }
}

fn load_state(path: &Path) -> Result<StateFile, StoreError> {
    let file = File::open(path)?;
    bincode::deserialize_from(BufReader::new(file)).map_err(|e| StoreError::Encoding(e.to_string()))
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.state.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.state.entries.insert(key.to_string(), value.to_string());
        self.save()
    }
}
