//! Property tests for cache policy resolution.

use proptest::prelude::*;

use skylift::{CachePolicy, CacheRule, ObjectPath};

fn path_string() -> impl Strategy<Value = String> {
    let segment = proptest::string::string_regex("[a-z0-9]{1,8}").unwrap();
    proptest::collection::vec(segment, 1..=3).prop_map(|segments| segments.join("/"))
}

fn rules() -> impl Strategy<Value = Vec<CacheRule>> {
    proptest::collection::vec(
        (path_string(), 0u64..=31_536_000, proptest::bool::ANY).prop_map(
            |(prefix, max_age, revalidate)| CacheRule {
                prefix,
                max_age,
                revalidate,
            },
        ),
        0..=8,
    )
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: resolution never panics, whatever the rules.
    #[test]
    fn property_resolve_never_panics(rules in rules(), path in path_string()) {
        let policy = CachePolicy::new(rules);
        let path = ObjectPath::parse(&path).unwrap();
        let _ = policy.resolve(&path);
    }

    /// PROPERTY: the resolved directive comes from the longest matching
    /// prefix, or is the no-cache default when nothing matches.
    #[test]
    fn property_longest_matching_prefix_wins(rules in rules(), path in path_string()) {
        let policy = CachePolicy::new(rules.clone());
        let object = ObjectPath::parse(&path).unwrap();
        let directive = policy.resolve(&object);

        let best = rules
            .iter()
            .filter(|r| path.starts_with(&r.prefix))
            .max_by_key(|r| r.prefix.len());

        match best {
            Some(rule) => {
                prop_assert_eq!(directive.max_age, rule.max_age);
            }
            None => {
                prop_assert_eq!(directive.header_value(), "no-cache");
            }
        }
    }

    /// PROPERTY: resolution is deterministic.
    #[test]
    fn property_resolve_is_deterministic(rules in rules(), path in path_string()) {
        let policy = CachePolicy::new(rules);
        let object = ObjectPath::parse(&path).unwrap();
        prop_assert_eq!(policy.resolve(&object), policy.resolve(&object));
    }
}
