//! Deploy plan - the derived set of per-object actions
//!
//! A plan is never stored; it is recomputed from (ArtifactSet,
//! RemoteObjectState) by the planner and consumed by one apply pass.

use crate::domain::value_objects::{ContentHash, ObjectPath};

/// The action to take for one object path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectAction {
    /// Content is new or changed; write it
    Upload,
    /// Published content already matches; leave it alone
    Skip,
    /// Published object no longer exists in the build; remove it
    Delete,
}

impl ObjectAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Upload => "upload",
            Self::Skip => "skip",
            Self::Delete => "delete",
        }
    }
}

/// A planned action for a single object
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedObject {
    /// Object path the action applies to
    pub path: ObjectPath,
    /// Action to take
    pub action: ObjectAction,
    /// Hash of the content that will be live after apply (None for deletes)
    pub new_hash: Option<ContentHash>,
}

/// Result of planning one deployment
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeployPlan {
    /// All planned objects in path order
    pub objects: Vec<PlannedObject>,
}

impl DeployPlan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, object: PlannedObject) {
        self.objects.push(object);
    }

    pub fn uploads(&self) -> impl Iterator<Item = &PlannedObject> {
        self.objects
            .iter()
            .filter(|o| o.action == ObjectAction::Upload)
    }

    pub fn deletes(&self) -> impl Iterator<Item = &PlannedObject> {
        self.objects
            .iter()
            .filter(|o| o.action == ObjectAction::Delete)
    }

    pub fn skips(&self) -> impl Iterator<Item = &PlannedObject> {
        self.objects
            .iter()
            .filter(|o| o.action == ObjectAction::Skip)
    }

    pub fn upload_count(&self) -> usize {
        self.uploads().count()
    }

    pub fn delete_count(&self) -> usize {
        self.deletes().count()
    }

    pub fn skip_count(&self) -> usize {
        self.skips().count()
    }

    pub fn total_objects(&self) -> usize {
        self.objects.len()
    }

    /// True when nothing would be uploaded or deleted
    pub fn is_noop(&self) -> bool {
        self.objects
            .iter()
            .all(|o| o.action == ObjectAction::Skip)
    }
}
