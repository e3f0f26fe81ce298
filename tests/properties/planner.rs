//! Property tests for deploy planning.

use std::collections::BTreeMap;

use proptest::prelude::*;

use skylift::{Artifact, ArtifactSet, ContentHash, ObjectAction, ObjectPath, Planner, RemoteObjectState};

fn path_string() -> impl Strategy<Value = String> {
    let segment = proptest::string::string_regex("[a-z0-9]{1,6}").unwrap();
    proptest::collection::vec(segment, 1..=3).prop_map(|segments| segments.join("/"))
}

/// A random site: unique paths mapped to small content blobs
fn site() -> impl Strategy<Value = BTreeMap<String, Vec<u8>>> {
    proptest::collection::btree_map(path_string(), proptest::collection::vec(any::<u8>(), 0..32), 0..12)
}

fn artifact_set(site: &BTreeMap<String, Vec<u8>>) -> ArtifactSet {
    ArtifactSet::from_artifacts(
        site.iter()
            .map(|(p, c)| Artifact::new(ObjectPath::parse(p).unwrap(), c.clone()))
            .collect(),
    )
    .unwrap()
}

fn remote_state(site: &BTreeMap<String, Vec<u8>>) -> RemoteObjectState {
    site.iter()
        .map(|(p, c)| (ObjectPath::parse(p).unwrap(), ContentHash::from_bytes(c)))
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: planning twice with the same inputs yields the same plan.
    #[test]
    fn property_plan_is_deterministic(build in site(), published in site()) {
        let artifacts = artifact_set(&build);
        let remote = remote_state(&published);

        let first = Planner::plan(&artifacts, &remote);
        let second = Planner::plan(&artifacts, &remote);
        prop_assert_eq!(first, second);
    }

    /// PROPERTY: planning a build against its own published state is a
    /// no-op (convergence).
    #[test]
    fn property_plan_converges_on_identical_state(build in site()) {
        let artifacts = artifact_set(&build);
        let remote = remote_state(&build);

        let plan = Planner::plan(&artifacts, &remote);
        prop_assert!(plan.is_noop());
    }

    /// PROPERTY: simulating a successful apply and re-planning yields an
    /// empty plan (fixed point).
    #[test]
    fn property_apply_then_plan_is_fixed_point(build in site(), published in site()) {
        let artifacts = artifact_set(&build);
        let mut remote = remote_state(&published);

        let plan = Planner::plan(&artifacts, &remote);
        for object in &plan.objects {
            match object.action {
                ObjectAction::Upload => {
                    let hash = object.new_hash.clone().unwrap();
                    remote.set(object.path.clone(), hash);
                }
                ObjectAction::Delete => {
                    remote.remove(&object.path);
                }
                ObjectAction::Skip => {}
            }
        }

        let second = Planner::plan(&artifacts, &remote);
        prop_assert!(second.is_noop(), "second plan not empty: {:?}", second);
        prop_assert_eq!(second.delete_count(), 0);
    }

    /// PROPERTY: every build path appears in the plan exactly once, and
    /// every published-but-vanished path becomes a delete.
    #[test]
    fn property_plan_covers_all_paths(build in site(), published in site()) {
        let artifacts = artifact_set(&build);
        let remote = remote_state(&published);

        let plan = Planner::plan(&artifacts, &remote);

        prop_assert_eq!(
            plan.total_objects(),
            build.len() + published.keys().filter(|p| !build.contains_key(*p)).count()
        );

        for object in plan.deletes() {
            prop_assert!(!build.contains_key(object.path.as_str()));
            prop_assert!(published.contains_key(object.path.as_str()));
        }
    }
}
