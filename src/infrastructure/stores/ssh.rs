//! SSH-backed object store
//!
//! Publishes objects to a remote host over `scp`/`ssh` subprocesses. The
//! published state is tracked in a local manifest file (the remote end is a
//! plain document root and has no state of its own) - the same plan-time
//! snapshot model the orchestrator documents: external mutation of the
//! remote tree between runs is not detected.

use std::io::Write;
use std::path::PathBuf;
use std::process::Command;

use crate::domain::entities::RemoteObjectState;
use crate::domain::ports::{ObjectStore, StoreError};
use crate::domain::value_objects::{ContentHash, ObjectPath};

use super::manifest::StateManifest;

/// Check if ssh is available on this system
pub fn has_ssh() -> bool {
    Command::new("ssh")
        .arg("-V")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

/// Object store on a remote host, reached via scp/ssh
#[derive(Debug, Clone)]
pub struct SshStore {
    /// Remote host, e.g. `deploy@web01`
    host: String,
    /// Remote document root, e.g. `/var/www/site`
    remote_root: String,
    /// Local manifest tracking what was last published
    state_path: PathBuf,
}

impl SshStore {
    pub fn new(
        host: impl Into<String>,
        remote_root: impl Into<String>,
        state_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            host: host.into(),
            remote_root: remote_root.into(),
            state_path: state_path.into(),
        }
    }

    /// Parse a `user@host:/path` destination string
    pub fn parse_destination(dest: &str) -> Option<(String, String)> {
        let (host, path) = dest.split_once(':')?;
        if host.is_empty() || path.is_empty() {
            return None;
        }
        Some((host.to_string(), path.to_string()))
    }

    fn remote_path(&self, path: &ObjectPath) -> String {
        format!("{}/{}", self.remote_root.trim_end_matches('/'), path.as_str())
    }

    /// Run a command on the remote host through ssh
    fn ssh(&self, remote_command: &str) -> Result<(), StoreError> {
        let output = Command::new("ssh")
            .arg("-o")
            .arg("BatchMode=yes")
            .arg(&self.host)
            .arg(remote_command)
            .output()
            .map_err(|e| StoreError::ConnectionError(e.to_string()))?;

        if output.status.success() {
            Ok(())
        } else {
            Err(StoreError::CommandFailed(format!(
                "ssh {}: {}",
                remote_command,
                String::from_utf8_lossy(&output.stderr).trim()
            )))
        }
    }

    fn update_manifest<F>(&self, mutate: F) -> Result<(), StoreError>
    where
        F: FnOnce(&mut StateManifest),
    {
        let mut manifest = StateManifest::load(&self.state_path)?;
        mutate(&mut manifest);
        manifest.save(&self.state_path)
    }
}

impl ObjectStore for SshStore {
    fn display_name(&self) -> String {
        format!("ssh:{}:{}", self.host, self.remote_root)
    }

    fn list(&self) -> Result<RemoteObjectState, StoreError> {
        StateManifest::load(&self.state_path)?.to_remote_state()
    }

    fn put(&self, path: &ObjectPath, bytes: &[u8], cache_control: &str) -> Result<(), StoreError> {
        let remote_path = self.remote_path(path);

        // Stage locally, then one scp per object.
        let mut staged = tempfile::NamedTempFile::new()
            .map_err(|e| StoreError::IoError(e.to_string()))?;
        staged
            .write_all(bytes)
            .map_err(|e| StoreError::IoError(e.to_string()))?;

        if let Some(remote_dir) = remote_path.rsplit_once('/').map(|(dir, _)| dir) {
            self.ssh(&format!("mkdir -p '{}'", remote_dir))?;
        }

        let output = Command::new("scp")
            .arg("-q")
            .arg("-o")
            .arg("BatchMode=yes")
            .arg(staged.path())
            .arg(format!("{}:{}", self.host, remote_path))
            .output()
            .map_err(|e| StoreError::ConnectionError(e.to_string()))?;

        if !output.status.success() {
            return Err(StoreError::CommandFailed(format!(
                "scp to {}: {}",
                remote_path,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        let hash = ContentHash::from_bytes(bytes);
        self.update_manifest(|manifest| manifest.set(path, &hash, cache_control))
    }

    fn delete(&self, path: &ObjectPath) -> Result<(), StoreError> {
        // rm -f: deleting an already-absent object succeeds
        self.ssh(&format!("rm -f '{}'", self.remote_path(path)))?;
        self.update_manifest(|manifest| manifest.remove(path))
    }
}
