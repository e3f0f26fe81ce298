//! In-memory object store
//!
//! Backs tests for the orchestrator: holds published objects in a map and
//! supports per-path failure injection (fail forever, or fail the first N
//! attempts to exercise the retry path).

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use crate::domain::entities::RemoteObjectState;
use crate::domain::ports::{ObjectStore, StoreError};
use crate::domain::value_objects::{ContentHash, ObjectPath};

#[derive(Debug, Clone)]
struct StoredObject {
    bytes: Vec<u8>,
    hash: ContentHash,
    cache_control: String,
}

#[derive(Debug, Default)]
struct MemoryStoreInner {
    objects: BTreeMap<ObjectPath, StoredObject>,
    /// Paths whose puts fail this many more times (u32::MAX = forever)
    put_failures: BTreeMap<ObjectPath, u32>,
    /// Paths whose deletes fail this many more times (u32::MAX = forever)
    delete_failures: BTreeMap<ObjectPath, u32>,
    put_attempts: BTreeMap<ObjectPath, u32>,
    delete_attempts: BTreeMap<ObjectPath, u32>,
}

/// Shared-handle in-memory store; clones see the same objects
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<MemoryStoreInner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a published object directly, bypassing `put`
    pub fn seed(&self, path: ObjectPath, bytes: &[u8], cache_control: &str) {
        let mut inner = self.inner.lock().unwrap();
        inner.objects.insert(
            path,
            StoredObject {
                bytes: bytes.to_vec(),
                hash: ContentHash::from_bytes(bytes),
                cache_control: cache_control.to_string(),
            },
        );
    }

    /// Make every put to `path` fail
    pub fn fail_puts(&self, path: ObjectPath) {
        self.inner.lock().unwrap().put_failures.insert(path, u32::MAX);
    }

    /// Make the first `times` puts to `path` fail, then succeed
    pub fn fail_puts_times(&self, path: ObjectPath, times: u32) {
        self.inner.lock().unwrap().put_failures.insert(path, times);
    }

    /// Make every delete of `path` fail
    pub fn fail_deletes(&self, path: ObjectPath) {
        self.inner
            .lock()
            .unwrap()
            .delete_failures
            .insert(path, u32::MAX);
    }

    pub fn contains(&self, path: &ObjectPath) -> bool {
        self.inner.lock().unwrap().objects.contains_key(path)
    }

    pub fn object_bytes(&self, path: &ObjectPath) -> Option<Vec<u8>> {
        self.inner
            .lock()
            .unwrap()
            .objects
            .get(path)
            .map(|o| o.bytes.clone())
    }

    pub fn cache_control(&self, path: &ObjectPath) -> Option<String> {
        self.inner
            .lock()
            .unwrap()
            .objects
            .get(path)
            .map(|o| o.cache_control.clone())
    }

    pub fn object_count(&self) -> usize {
        self.inner.lock().unwrap().objects.len()
    }

    pub fn put_attempts(&self, path: &ObjectPath) -> u32 {
        self.inner
            .lock()
            .unwrap()
            .put_attempts
            .get(path)
            .copied()
            .unwrap_or(0)
    }

    pub fn delete_attempts(&self, path: &ObjectPath) -> u32 {
        self.inner
            .lock()
            .unwrap()
            .delete_attempts
            .get(path)
            .copied()
            .unwrap_or(0)
    }

    fn should_fail(failures: &mut BTreeMap<ObjectPath, u32>, path: &ObjectPath) -> bool {
        match failures.get_mut(path) {
            Some(0) => false,
            Some(remaining) => {
                if *remaining != u32::MAX {
                    *remaining -= 1;
                }
                true
            }
            None => false,
        }
    }
}

impl ObjectStore for MemoryStore {
    fn display_name(&self) -> String {
        "memory".to_string()
    }

    fn list(&self) -> Result<RemoteObjectState, StoreError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .objects
            .iter()
            .map(|(path, object)| (path.clone(), object.hash.clone()))
            .collect())
    }

    fn put(&self, path: &ObjectPath, bytes: &[u8], cache_control: &str) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().unwrap();
        *inner.put_attempts.entry(path.clone()).or_insert(0) += 1;

        if Self::should_fail(&mut inner.put_failures, path) {
            return Err(StoreError::IoError(format!(
                "injected put failure for {}",
                path
            )));
        }

        inner.objects.insert(
            path.clone(),
            StoredObject {
                bytes: bytes.to_vec(),
                hash: ContentHash::from_bytes(bytes),
                cache_control: cache_control.to_string(),
            },
        );
        Ok(())
    }

    fn delete(&self, path: &ObjectPath) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().unwrap();
        *inner.delete_attempts.entry(path.clone()).or_insert(0) += 1;

        if Self::should_fail(&mut inner.delete_failures, path) {
            return Err(StoreError::IoError(format!(
                "injected delete failure for {}",
                path
            )));
        }

        inner.objects.remove(path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(s: &str) -> ObjectPath {
        ObjectPath::parse(s).unwrap()
    }

    #[test]
    fn put_then_list_reports_hash() {
        let store = MemoryStore::new();
        store.put(&path("a.html"), b"hello", "no-cache").unwrap();

        let state = store.list().unwrap();
        assert_eq!(state.get(&path("a.html")), Some(&ContentHash::from_bytes(b"hello")));
    }

    #[test]
    fn delete_removes_object() {
        let store = MemoryStore::new();
        store.put(&path("a.html"), b"hello", "no-cache").unwrap();
        store.delete(&path("a.html")).unwrap();
        assert!(!store.contains(&path("a.html")));
    }

    #[test]
    fn injected_put_failure_counts_down() {
        let store = MemoryStore::new();
        store.fail_puts_times(path("flaky.js"), 2);

        assert!(store.put(&path("flaky.js"), b"x", "no-cache").is_err());
        assert!(store.put(&path("flaky.js"), b"x", "no-cache").is_err());
        assert!(store.put(&path("flaky.js"), b"x", "no-cache").is_ok());
        assert_eq!(store.put_attempts(&path("flaky.js")), 3);
    }

    #[test]
    fn permanent_failure_never_succeeds() {
        let store = MemoryStore::new();
        store.fail_puts(path("broken.js"));

        for _ in 0..5 {
            assert!(store.put(&path("broken.js"), b"x", "no-cache").is_err());
        }
    }

    #[test]
    fn clones_share_state() {
        let store = MemoryStore::new();
        let view = store.clone();
        store.put(&path("a.html"), b"x", "no-cache").unwrap();
        assert!(view.contains(&path("a.html")));
    }
}
