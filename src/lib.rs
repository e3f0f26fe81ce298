//! Skylift - static-asset deploy orchestrator
//!
//! Skylift turns a completed static-site build into a live, cache-correct
//! deployment: it diffs the build output against the last published state of
//! an object store, uploads only what changed (then deletes what vanished),
//! applies cache-control policy per object, and batches one CDN invalidation
//! for the paths that actually changed, polling it to completion.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;

// Re-exports for convenience
pub use application::{
    DeployOptions, DeployReport, DeployUseCase, InvalidationOutcome, ObjectOutcome, RetryPolicy,
    RunState, VerifyOptions,
};
pub use config::{Config, EnvironmentConfig};
pub use domain::entities::{Artifact, ArtifactSet, DeployPlan, ObjectAction, RemoteObjectState};
pub use domain::ports::{CdnClient, DeployEvent, DeployEventSink, ObjectStore};
pub use domain::services::Planner;
pub use domain::value_objects::{CachePolicy, CacheRule, ContentHash, ObjectPath};
pub use error::{SkyliftError, SkyliftResult};
pub use infrastructure::{scan_artifacts, DirStore, FsLease, JsonEventSink, MemoryStore, SshStore};
