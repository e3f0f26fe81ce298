//! Cache policy resolution
//!
//! Maps object paths to a `Cache-Control` directive via prefix rules.
//! Longest matching prefix wins; unmatched paths get the conservative
//! `no-cache` default so a missing rule never pins a stale object.

use serde::{Deserialize, Serialize};

use super::ObjectPath;

/// Cache directive applied to one class of objects
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheDirective {
    /// `max-age` in seconds
    pub max_age: u64,
    /// Require revalidation once stale
    pub revalidate: bool,
}

impl CacheDirective {
    /// The conservative default for unmatched paths
    pub fn no_cache() -> Self {
        Self {
            max_age: 0,
            revalidate: true,
        }
    }

    /// Render as a `Cache-Control` header value
    pub fn header_value(&self) -> String {
        if self.max_age == 0 && self.revalidate {
            "no-cache".to_string()
        } else if self.revalidate {
            format!("max-age={}, must-revalidate", self.max_age)
        } else {
            format!("max-age={}", self.max_age)
        }
    }
}

/// One path-prefix rule in a cache policy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheRule {
    /// Path prefix this rule covers (e.g. `assets/`)
    pub prefix: String,
    /// `max-age` in seconds
    pub max_age: u64,
    /// Require revalidation once stale
    #[serde(default)]
    pub revalidate: bool,
}

/// Static cache policy for a deployment environment
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachePolicy {
    #[serde(default)]
    rules: Vec<CacheRule>,
}

impl CachePolicy {
    pub fn new(rules: Vec<CacheRule>) -> Self {
        Self { rules }
    }

    /// Policy with no rules: everything resolves to `no-cache`
    pub fn conservative() -> Self {
        Self::default()
    }

    pub fn rules(&self) -> &[CacheRule] {
        &self.rules
    }

    /// Resolve the directive for a path.
    ///
    /// Longest matching prefix wins; ties cannot occur because equal-length
    /// matching prefixes are identical strings.
    pub fn resolve(&self, path: &ObjectPath) -> CacheDirective {
        self.rules
            .iter()
            .filter(|r| path.as_str().starts_with(&r.prefix))
            .max_by_key(|r| r.prefix.len())
            .map(|r| CacheDirective {
                max_age: r.max_age,
                revalidate: r.revalidate,
            })
            .unwrap_or_else(CacheDirective::no_cache)
    }
}
