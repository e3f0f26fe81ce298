//! Object store implementations

mod dir;
mod manifest;
mod memory;
mod ssh;

pub use dir::DirStore;
pub use manifest::{ManifestEntry, StateManifest};
pub use memory::MemoryStore;
pub use ssh::{has_ssh, SshStore};

use std::io::Write;
use std::path::Path;

/// Write bytes to a file atomically via tempfile + rename.
///
/// Readers see either the previous content or the new content, never a
/// partial write.
pub(crate) fn write_atomic(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let parent = path.parent().unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(parent)?;

    let mut tmp = tempfile::NamedTempFile::new_in(parent)?;
    tmp.write_all(bytes)?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
