//! Key/value preference stores

use std::{
    collections::BTreeMap,
    fs,
    path::PathBuf,
    sync::RwLock,
};

use anyhow::{anyhow, Context, Result};
use tracing::{debug, warn};

/// Read/write access to small string preferences
pub trait PreferenceStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// Preferences kept only for the lifetime of the process
#[derive(Debug, Default)]
pub struct MemoryPreferenceStore {
    data: RwLock<BTreeMap<String, String>>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let data = self
            .data
            .read()
            .map_err(|e| anyhow!("Failed to lock preferences: {}", e))?;
        Ok(data.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut data = self
            .data
            .write()
            .map_err(|e| anyhow!("Failed to lock preferences: {}", e))?;
        data.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Preferences persisted as a flat JSON object
pub struct JsonFilePreferenceStore {
    path: PathBuf,
    data: RwLock<BTreeMap<String, String>>,
}

impl JsonFilePreferenceStore {
    /// Open the store at `path`. A missing file starts empty and is created
    /// on the first write; an unreadable one is treated as empty.
    pub fn open(path: PathBuf) -> Result<Self> {
        let data = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read preferences from {}", path.display()))?;
            serde_json::from_str(&contents).unwrap_or_else(|e| {
                warn!("Ignoring malformed preferences in {}: {}", path.display(), e);
                BTreeMap::new()
            })
        } else {
            BTreeMap::new()
        };

        debug!("Opened preference store at {}", path.display());
        Ok(Self {
            path,
            data: RwLock::new(data),
        })
    }

    fn persist(&self, data: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
        }
        let serialized = serde_json::to_string_pretty(data)?;
        fs::write(&self.path, serialized)
            .with_context(|| format!("Failed to write preferences to {}", self.path.display()))
    }
}

impl PreferenceStore for JsonFilePreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let data = self
            .data
            .read()
            .map_err(|e| anyhow!("Failed to lock preferences: {}", e))?;
        Ok(data.get(key).cloned())
    }

    /// The in-memory value only changes once the file write succeeded
    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut data = self
            .data
            .write()
            .map_err(|e| anyhow!("Failed to lock preferences: {}", e))?;
        let mut updated = data.clone();
        updated.insert(key.to_string(), value.to_string());
        self.persist(&updated)?;
        *data = updated;
        Ok(())
    }
}
