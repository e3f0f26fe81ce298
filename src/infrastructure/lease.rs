//! Filesystem environment lease
//!
//! One deploy per environment, enforced with an `fs2` exclusive lock on
//! `<dir>/<environment>.lock`. Non-blocking: a held lock means another
//! deploy is running, and this one refuses to start. The lock releases when
//! the guard drops, including on panic or process death.

use std::fs;
use std::path::{Path, PathBuf};

use fs2::FileExt;

use crate::domain::ports::{EnvironmentLease, LeaseError};

/// Lease directory resolution: explicit dir, or `~/.skylift/leases`
pub fn default_lease_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".skylift/leases"))
}

/// Filesystem-backed environment lease
#[derive(Debug, Clone)]
pub struct FsLease {
    dir: PathBuf,
}

impl FsLease {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

/// Holds the exclusive lock for one environment until dropped
#[derive(Debug)]
pub struct FsLeaseGuard {
    file: fs::File,
    path: PathBuf,
}

impl FsLeaseGuard {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for FsLeaseGuard {
    fn drop(&mut self) {
        let _ = fs2::FileExt::unlock(&self.file);
    }
}

impl EnvironmentLease for FsLease {
    type Guard = FsLeaseGuard;

    fn acquire(&self, environment: &str) -> Result<FsLeaseGuard, LeaseError> {
        fs::create_dir_all(&self.dir).map_err(|e| LeaseError::Backend(e.to_string()))?;

        let path = self.dir.join(format!("{}.lock", environment));
        let file = fs::File::create(&path).map_err(|e| LeaseError::Backend(e.to_string()))?;

        match file.try_lock_exclusive() {
            Ok(()) => Ok(FsLeaseGuard { file, path }),
            Err(e) if e.kind() == fs2::lock_contended_error().kind() => Err(LeaseError::Busy {
                environment: environment.to_string(),
            }),
            Err(e) => Err(LeaseError::Backend(e.to_string())),
        }
    }
}
