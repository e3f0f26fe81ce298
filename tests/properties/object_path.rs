//! Property tests for object path parsing and normalization.

use proptest::prelude::*;

use skylift::ObjectPath;

fn relative_path_string() -> impl Strategy<Value = String> {
    // Friendly relative paths: non-empty segments of common filename
    // characters, no '.'-only segments, joined with '/'.
    let segment = proptest::string::string_regex("[A-Za-z0-9_-]{1,16}(\\.[A-Za-z0-9]{1,8})?")
        .unwrap();
    proptest::collection::vec(segment, 1..=4).prop_map(|segments| segments.join("/"))
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: parsing never panics on arbitrary input.
    #[test]
    fn property_parse_never_panics(s in ".{0,128}") {
        let _ = ObjectPath::parse(&s);
    }

    /// PROPERTY: a friendly relative path parses to itself.
    #[test]
    fn property_friendly_paths_round_trip(rel in relative_path_string()) {
        let parsed = ObjectPath::parse(&rel).unwrap();
        prop_assert_eq!(parsed.as_str(), rel);
    }

    /// PROPERTY: parsing is idempotent - a parsed path re-parses unchanged.
    #[test]
    fn property_parse_is_idempotent(rel in relative_path_string()) {
        let once = ObjectPath::parse(&rel).unwrap();
        let twice = ObjectPath::parse(once.as_str()).unwrap();
        prop_assert_eq!(once, twice);
    }

    /// PROPERTY: normalized paths never contain traversal or empty segments.
    #[test]
    fn property_normalized_paths_are_clean(s in ".{0,128}") {
        if let Ok(path) = ObjectPath::parse(&s) {
            prop_assert!(!path.as_str().starts_with('/'));
            for segment in path.as_str().split('/') {
                prop_assert!(!segment.is_empty());
                prop_assert_ne!(segment, "..");
                prop_assert_ne!(segment, ".");
            }
        }
    }

    /// PROPERTY: a path with a `..` segment is always rejected.
    #[test]
    fn property_traversal_always_rejected(
        prefix in relative_path_string(),
        suffix in relative_path_string()
    ) {
        let sneaky = format!("{}/../{}", prefix, suffix);
        prop_assert!(ObjectPath::parse(&sneaky).is_err());
    }
}
