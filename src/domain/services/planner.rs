//! Deploy planning service
//!
//! Pure domain logic: diff one build's artifact set against the last-known
//! published state. No I/O; deterministic for identical inputs, so planning
//! twice always yields the same plan.
//!
//! Decision per path:
//! - in the build, absent remotely            -> upload
//! - in the build, remote hash differs        -> upload
//! - in the build, remote hash matches        -> skip
//! - published, absent from the build         -> delete

use crate::domain::entities::{
    ArtifactSet, DeployPlan, ObjectAction, PlannedObject, RemoteObjectState,
};

/// Pure planning service
pub struct Planner;

impl Planner {
    /// Diff artifacts against remote state into a deploy plan.
    ///
    /// Uploads and skips come out in artifact path order, then deletes in
    /// remote path order; the apply step relies on uploads preceding deletes.
    pub fn plan(artifacts: &ArtifactSet, remote: &RemoteObjectState) -> DeployPlan {
        let mut plan = DeployPlan::new();

        for artifact in artifacts.iter() {
            let action = match remote.get(artifact.path()) {
                Some(published) if published.matches(artifact.hash()) => ObjectAction::Skip,
                _ => ObjectAction::Upload,
            };
            plan.add(PlannedObject {
                path: artifact.path().clone(),
                action,
                new_hash: Some(artifact.hash().clone()),
            });
        }

        for (path, _) in remote.iter() {
            if !artifacts.contains(path) {
                plan.add(PlannedObject {
                    path: path.clone(),
                    action: ObjectAction::Delete,
                    new_hash: None,
                });
            }
        }

        plan
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Artifact;
    use crate::domain::value_objects::{ContentHash, ObjectPath};

    fn path(s: &str) -> ObjectPath {
        ObjectPath::parse(s).unwrap()
    }

    fn artifacts(entries: &[(&str, &[u8])]) -> ArtifactSet {
        ArtifactSet::from_artifacts(
            entries
                .iter()
                .map(|(p, c)| Artifact::new(path(p), c.to_vec()))
                .collect(),
        )
        .unwrap()
    }

    fn remote(entries: &[(&str, &[u8])]) -> RemoteObjectState {
        entries
            .iter()
            .map(|(p, c)| (path(p), ContentHash::from_bytes(c)))
            .collect()
    }

    #[test]
    fn plan_fresh_deploy_uploads_everything() {
        let a = artifacts(&[("index.html", b"home"), ("app.js", b"code")]);
        let r = RemoteObjectState::new();

        let plan = Planner::plan(&a, &r);

        assert_eq!(plan.upload_count(), 2);
        assert_eq!(plan.skip_count(), 0);
        assert_eq!(plan.delete_count(), 0);
    }

    #[test]
    fn plan_unchanged_content_skips() {
        let a = artifacts(&[("index.html", b"home")]);
        let r = remote(&[("index.html", b"home")]);

        let plan = Planner::plan(&a, &r);

        assert_eq!(plan.skip_count(), 1);
        assert!(plan.is_noop());
    }

    #[test]
    fn plan_changed_content_uploads() {
        let a = artifacts(&[("index.html", b"v2")]);
        let r = remote(&[("index.html", b"v1")]);

        let plan = Planner::plan(&a, &r);

        assert_eq!(plan.upload_count(), 1);
        assert_eq!(plan.skip_count(), 0);
    }

    #[test]
    fn plan_vanished_path_deletes() {
        let a = artifacts(&[("index.html", b"home")]);
        let r = remote(&[("index.html", b"home"), ("old.js", b"legacy")]);

        let plan = Planner::plan(&a, &r);

        assert_eq!(plan.skip_count(), 1);
        assert_eq!(plan.delete_count(), 1);
        let delete = plan.deletes().next().unwrap();
        assert_eq!(delete.path.as_str(), "old.js");
        assert!(delete.new_hash.is_none());
    }

    #[test]
    fn plan_is_deterministic() {
        let a = artifacts(&[("a.html", b"a"), ("b.html", b"b"), ("c.html", b"c")]);
        let r = remote(&[("b.html", b"old"), ("z.html", b"gone")]);

        let first = Planner::plan(&a, &r);
        let second = Planner::plan(&a, &r);

        assert_eq!(first, second);
    }

    #[test]
    fn plan_matching_state_is_fixed_point() {
        let a = artifacts(&[("x.html", b"x"), ("y.html", b"y")]);
        // Remote state exactly as a successful apply would leave it.
        let r = remote(&[("x.html", b"x"), ("y.html", b"y")]);

        let plan = Planner::plan(&a, &r);

        assert!(plan.is_noop());
        assert_eq!(plan.upload_count() + plan.delete_count(), 0);
    }
}
