//! Error types for Skylift
//!
//! Uses `thiserror` for library errors; per-object transfer failures are
//! collected into the deploy report instead of surfacing here.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for Skylift operations
pub type SkyliftResult<T> = Result<T, SkyliftError>;

/// Main error type for Skylift operations
#[derive(Error, Debug)]
pub enum SkyliftError {
    /// Duplicate path in a build's artifact set (corrupt build input)
    #[error("duplicate artifact path '{path}' - the build output is inconsistent")]
    PlanConflict { path: String },

    /// Object path is absolute, empty, or escapes the artifact root
    #[error("invalid object path '{path}': {reason}")]
    InvalidObjectPath { path: String, reason: String },

    /// Another deploy currently holds the lease for this environment
    #[error("environment '{environment}' is locked by another deploy")]
    EnvironmentBusy { environment: String },

    /// Requested environment is not present in the configuration
    #[error("unknown environment '{name}' - define it in skylift.toml")]
    UnknownEnvironment { name: String },

    /// Configuration file could not be parsed
    #[error("invalid configuration in {file}: {message}")]
    Config { file: PathBuf, message: String },

    /// Artifact directory not found or unreadable
    #[error("artifact directory not found: {path}")]
    ArtifactsNotFound { path: PathBuf },

    /// Published state could not be read from the object store
    #[error("object store unavailable: {message}")]
    StoreUnavailable { message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Deploy was aborted by user at the confirmation prompt
    #[error("deploy aborted by user")]
    DeployAborted,
}
