//! Artifact entities - one build's publishable files
//!
//! An `Artifact` is one built file; an `ArtifactSet` is the complete output
//! of one build. Both are immutable once constructed. The set enforces path
//! uniqueness at construction time so a corrupt build is rejected before any
//! remote operation happens.

use std::collections::BTreeMap;

use crate::domain::value_objects::{ContentHash, ObjectPath};
use crate::error::{SkyliftError, SkyliftResult};

/// One built file to be published
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    path: ObjectPath,
    bytes: Vec<u8>,
    hash: ContentHash,
}

impl Artifact {
    /// Create an artifact, computing its content hash
    pub fn new(path: ObjectPath, bytes: Vec<u8>) -> Self {
        let hash = ContentHash::from_bytes(&bytes);
        Self { path, bytes, hash }
    }

    pub fn path(&self) -> &ObjectPath {
        &self.path
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn hash(&self) -> &ContentHash {
        &self.hash
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// The complete, path-unique output of one build
///
/// Iteration order is the lexicographic path order, which keeps plans and
/// reports deterministic for identical inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArtifactSet {
    artifacts: BTreeMap<ObjectPath, Artifact>,
}

impl ArtifactSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from artifacts, rejecting duplicate paths.
    ///
    /// A duplicate means the producer handed us an inconsistent build, so
    /// this fails before any side effect can occur.
    pub fn from_artifacts(artifacts: Vec<Artifact>) -> SkyliftResult<Self> {
        let mut set = Self::new();
        for artifact in artifacts {
            set.insert(artifact)?;
        }
        Ok(set)
    }

    /// Insert an artifact, rejecting a duplicate path
    pub fn insert(&mut self, artifact: Artifact) -> SkyliftResult<()> {
        let path = artifact.path().clone();
        if self.artifacts.contains_key(&path) {
            return Err(SkyliftError::PlanConflict {
                path: path.as_str().to_string(),
            });
        }
        self.artifacts.insert(path, artifact);
        Ok(())
    }

    pub fn get(&self, path: &ObjectPath) -> Option<&Artifact> {
        self.artifacts.get(path)
    }

    pub fn contains(&self, path: &ObjectPath) -> bool {
        self.artifacts.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.artifacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Artifact> {
        self.artifacts.values()
    }

    pub fn paths(&self) -> impl Iterator<Item = &ObjectPath> {
        self.artifacts.keys()
    }

    /// Total payload size in bytes
    pub fn total_bytes(&self) -> usize {
        self.artifacts.values().map(Artifact::len).sum()
    }
}
