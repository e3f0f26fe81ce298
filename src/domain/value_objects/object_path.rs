//! Object Path Value Object
//!
//! The key of a published object, relative to the store root. Always stored
//! with forward slashes so plans and manifests are identical across platforms.
//!
//! Construction rejects anything that could write outside the store root:
//! absolute paths, `..` traversal, empty segments.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{SkyliftError, SkyliftResult};

/// Normalized relative path of a published object
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectPath(String);

impl ObjectPath {
    /// Parse and normalize a path string into an object path.
    ///
    /// Accepts `/` and `\` separators, collapses `.` segments, and rejects:
    /// - empty paths
    /// - absolute paths (leading separator or drive prefix)
    /// - `..` segments (store escape)
    pub fn parse(raw: &str) -> SkyliftResult<Self> {
        let normalized = raw.replace('\\', "/");

        if normalized.is_empty() {
            return Err(invalid(raw, "path is empty"));
        }
        if normalized.starts_with('/') {
            return Err(invalid(raw, "path is absolute"));
        }
        if normalized.contains(':') {
            return Err(invalid(raw, "path contains a drive or scheme prefix"));
        }

        let mut segments = Vec::new();
        for segment in normalized.split('/') {
            match segment {
                "" | "." => continue,
                ".." => return Err(invalid(raw, "path escapes the store root")),
                s => segments.push(s),
            }
        }

        if segments.is_empty() {
            return Err(invalid(raw, "path has no segments"));
        }

        Ok(Self(segments.join("/")))
    }

    /// Build an object path from a filesystem path relative to the scan root
    pub fn from_relative(path: &Path) -> SkyliftResult<Self> {
        Self::parse(&path.to_string_lossy())
    }

    /// The normalized path string
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Resolve this object path under a local root directory
    pub fn join_under(&self, root: &Path) -> std::path::PathBuf {
        let mut full = root.to_path_buf();
        for segment in self.0.split('/') {
            full.push(segment);
        }
        full
    }
}

fn invalid(raw: &str, reason: &str) -> SkyliftError {
    SkyliftError::InvalidObjectPath {
        path: raw.to_string(),
        reason: reason.to_string(),
    }
}

impl fmt::Display for ObjectPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for ObjectPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
