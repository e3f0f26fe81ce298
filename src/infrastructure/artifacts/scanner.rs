//! Artifact scanner
//!
//! Walks a build output directory into an `ArtifactSet`. Hidden files are
//! included (`.well-known/` and friends must deploy); a `.skyliftignore`
//! file in the build root excludes paths with gitignore syntax, and is
//! itself never published.

use std::path::Path;

use ignore::WalkBuilder;

use crate::domain::entities::{Artifact, ArtifactSet};
use crate::domain::value_objects::ObjectPath;
use crate::error::{SkyliftError, SkyliftResult};

/// Name of the optional ignore file in the build root
pub const IGNORE_FILE: &str = ".skyliftignore";

/// Scan a build directory into an artifact set
pub fn scan_artifacts(root: &Path) -> SkyliftResult<ArtifactSet> {
    if !root.is_dir() {
        return Err(SkyliftError::ArtifactsNotFound {
            path: root.to_path_buf(),
        });
    }

    let walker = WalkBuilder::new(root)
        .standard_filters(false)
        .add_custom_ignore_filename(IGNORE_FILE)
        .build();

    let mut artifacts = Vec::new();
    for entry in walker {
        let entry = entry.map_err(|e| SkyliftError::Io(std::io::Error::other(e.to_string())))?;
        if !entry.file_type().map(|t| t.is_file()).unwrap_or(false) {
            continue;
        }
        if entry.file_name() == IGNORE_FILE {
            continue;
        }

        let relative = entry
            .path()
            .strip_prefix(root)
            .map_err(|e| SkyliftError::Io(std::io::Error::other(e.to_string())))?;
        let path = ObjectPath::from_relative(relative)?;
        let bytes = std::fs::read(entry.path())?;
        artifacts.push(Artifact::new(path, bytes));
    }

    ArtifactSet::from_artifacts(artifacts)
}
