//! Remote object state - the last-known published tree
//!
//! A pure data structure mapping object paths to the content hash currently
//! published. Owned by the object store; the orchestrator reads it once at
//! plan time and never mutates it directly.

use std::collections::BTreeMap;

use crate::domain::value_objects::{ContentHash, ObjectPath};

/// Last-known mapping from published path to content hash
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemoteObjectState {
    objects: BTreeMap<ObjectPath, ContentHash>,
}

impl RemoteObjectState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, path: &ObjectPath) -> Option<&ContentHash> {
        self.objects.get(path)
    }

    pub fn contains(&self, path: &ObjectPath) -> bool {
        self.objects.contains_key(path)
    }

    pub fn set(&mut self, path: ObjectPath, hash: ContentHash) {
        self.objects.insert(path, hash);
    }

    pub fn remove(&mut self, path: &ObjectPath) -> Option<ContentHash> {
        self.objects.remove(path)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ObjectPath, &ContentHash)> {
        self.objects.iter()
    }

    pub fn paths(&self) -> impl Iterator<Item = &ObjectPath> {
        self.objects.keys()
    }
}

impl FromIterator<(ObjectPath, ContentHash)> for RemoteObjectState {
    fn from_iter<I: IntoIterator<Item = (ObjectPath, ContentHash)>>(iter: I) -> Self {
        Self {
            objects: iter.into_iter().collect(),
        }
    }
}
