//! Object Store Port
//!
//! Abstracts the remote store that published objects live in (a directory,
//! an SSH host, an in-memory fake). Every operation reports success or
//! failure for a single object; no multi-object atomicity is assumed, which
//! is why the orchestrator collects per-path failures instead of aborting.

use crate::domain::entities::RemoteObjectState;
use crate::domain::value_objects::ObjectPath;

/// Error during a single store operation
#[derive(Debug, Clone)]
pub enum StoreError {
    /// File system or local I/O error
    IoError(String),
    /// Remote connection error
    ConnectionError(String),
    /// Command execution error (ssh/scp transports)
    CommandFailed(String),
    /// Published state manifest is unreadable
    CorruptState(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IoError(msg) => write!(f, "I/O error: {}", msg),
            Self::ConnectionError(msg) => write!(f, "Connection error: {}", msg),
            Self::CommandFailed(msg) => write!(f, "Command failed: {}", msg),
            Self::CorruptState(msg) => write!(f, "Corrupt state: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {}

/// Trait for object stores
///
/// Constructed with explicit, scoped credentials/locations; the orchestrator
/// never reaches into ambient environment state.
pub trait ObjectStore: Send + Sync {
    /// A display name for this store (shown in reports and logs)
    fn display_name(&self) -> String;

    /// Read the last-known published state
    fn list(&self) -> Result<RemoteObjectState, StoreError>;

    /// Write one object with the resolved cache-control directive.
    ///
    /// Must be atomic per object: readers see either the old or the new
    /// content, never a partial write.
    fn put(&self, path: &ObjectPath, bytes: &[u8], cache_control: &str) -> Result<(), StoreError>;

    /// Remove one object
    fn delete(&self, path: &ObjectPath) -> Result<(), StoreError>;
}

impl ObjectStore for Box<dyn ObjectStore> {
    fn display_name(&self) -> String {
        (**self).display_name()
    }

    fn list(&self) -> Result<RemoteObjectState, StoreError> {
        (**self).list()
    }

    fn put(&self, path: &ObjectPath, bytes: &[u8], cache_control: &str) -> Result<(), StoreError> {
        (**self).put(path, bytes, cache_control)
    }

    fn delete(&self, path: &ObjectPath) -> Result<(), StoreError> {
        (**self).delete(path)
    }
}
