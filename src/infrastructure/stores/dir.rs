//! Directory-backed object store
//!
//! Publishes objects as plain files under a root directory, the way a web
//! server document root is laid out. Writes are atomic (tempfile + rename),
//! and the published state lives in a TOML manifest under `.skylift/` inside
//! the root, guarded by an `fs2` file lock so concurrent manifest updates
//! from the worker pool serialize cleanly.

use std::fs;
use std::path::{Path, PathBuf};

use fs2::FileExt;

use crate::domain::entities::RemoteObjectState;
use crate::domain::ports::{ObjectStore, StoreError};
use crate::domain::value_objects::{ContentHash, ObjectPath};

use super::manifest::StateManifest;
use super::write_atomic;

/// Object store over a local directory
#[derive(Debug, Clone)]
pub struct DirStore {
    root: PathBuf,
}

impl DirStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn manifest_path(&self) -> PathBuf {
        self.root.join(".skylift/state.toml")
    }

    fn lock_path(&self) -> PathBuf {
        self.root.join(".skylift/state.lock")
    }

    /// Run `mutate` on the manifest under an exclusive file lock
    fn with_manifest<F>(&self, mutate: F) -> Result<(), StoreError>
    where
        F: FnOnce(&mut StateManifest),
    {
        let lock_path = self.lock_path();
        if let Some(parent) = lock_path.parent() {
            fs::create_dir_all(parent).map_err(|e| StoreError::IoError(e.to_string()))?;
        }

        let lock_file =
            fs::File::create(&lock_path).map_err(|e| StoreError::IoError(e.to_string()))?;
        lock_file
            .lock_exclusive()
            .map_err(|e| StoreError::IoError(e.to_string()))?;

        let result = (|| {
            let mut manifest = StateManifest::load(&self.manifest_path())?;
            mutate(&mut manifest);
            manifest.save(&self.manifest_path())
        })();

        let _ = fs2::FileExt::unlock(&lock_file);
        result
    }
}

impl ObjectStore for DirStore {
    fn display_name(&self) -> String {
        format!("dir:{}", self.root.display())
    }

    fn list(&self) -> Result<RemoteObjectState, StoreError> {
        StateManifest::load(&self.manifest_path())?.to_remote_state()
    }

    fn put(&self, path: &ObjectPath, bytes: &[u8], cache_control: &str) -> Result<(), StoreError> {
        let target = path.join_under(&self.root);
        write_atomic(&target, bytes).map_err(|e| StoreError::IoError(e.to_string()))?;

        let hash = ContentHash::from_bytes(bytes);
        self.with_manifest(|manifest| manifest.set(path, &hash, cache_control))
    }

    fn delete(&self, path: &ObjectPath) -> Result<(), StoreError> {
        let target = path.join_under(&self.root);
        match fs::remove_file(&target) {
            Ok(()) => {}
            // Idempotent: deleting an already-absent object succeeds
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(StoreError::IoError(e.to_string())),
        }

        self.with_manifest(|manifest| manifest.remove(path))
    }
}
