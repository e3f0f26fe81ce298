//! Published-state manifest
//!
//! File-backed stores track what is currently live in a TOML manifest:
//! one entry per object with its content hash and the cache-control
//! directive it was written with. The manifest is the store's
//! `RemoteObjectState`, advanced only by successful writes and deletes.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::entities::RemoteObjectState;
use crate::domain::ports::StoreError;
use crate::domain::value_objects::{ContentHash, ObjectPath};

fn default_version() -> u32 {
    1
}

/// Manifest entry for one published object
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    /// Content hash of the published bytes
    pub hash: String,
    /// Cache-control directive the object was written with
    pub cache_control: String,
}

/// TOML manifest of the published tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateManifest {
    #[serde(default = "default_version")]
    version: u32,
    #[serde(default)]
    objects: BTreeMap<String, ManifestEntry>,
}

impl Default for StateManifest {
    fn default() -> Self {
        Self::new()
    }
}

impl StateManifest {
    pub fn new() -> Self {
        Self {
            version: 1,
            objects: BTreeMap::new(),
        }
    }

    /// Load a manifest, returning an empty one if the file does not exist
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        if !path.exists() {
            return Ok(Self::new());
        }

        let content =
            std::fs::read_to_string(path).map_err(|e| StoreError::IoError(e.to_string()))?;
        toml::from_str(&content).map_err(|e| StoreError::CorruptState(e.to_string()))
    }

    /// Save the manifest atomically
    pub fn save(&self, path: &Path) -> Result<(), StoreError> {
        let content =
            toml::to_string_pretty(self).map_err(|e| StoreError::CorruptState(e.to_string()))?;
        super::write_atomic(path, content.as_bytes()).map_err(|e| StoreError::IoError(e.to_string()))
    }

    pub fn set(&mut self, path: &ObjectPath, hash: &ContentHash, cache_control: &str) {
        self.objects.insert(
            path.as_str().to_string(),
            ManifestEntry {
                hash: hash.as_str().to_string(),
                cache_control: cache_control.to_string(),
            },
        );
    }

    pub fn remove(&mut self, path: &ObjectPath) {
        self.objects.remove(path.as_str());
    }

    pub fn get(&self, path: &ObjectPath) -> Option<&ManifestEntry> {
        self.objects.get(path.as_str())
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// View the manifest as the port-level remote state
    pub fn to_remote_state(&self) -> Result<RemoteObjectState, StoreError> {
        let mut state = RemoteObjectState::new();
        for (raw_path, entry) in &self.objects {
            let path = ObjectPath::parse(raw_path)
                .map_err(|e| StoreError::CorruptState(e.to_string()))?;
            state.set(path, ContentHash::new(&entry.hash));
        }
        Ok(state)
    }
}
