//! CDN Invalidation Port
//!
//! Abstracts the downstream cache layer. Submission must be idempotent:
//! resubmitting the same path batch after a transient failure is harmless.

use crate::domain::value_objects::ObjectPath;

/// Opaque identifier of a submitted invalidation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidationId(pub String);

impl std::fmt::Display for InvalidationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Reported state of a submitted invalidation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidationStatus {
    /// Still propagating
    Pending,
    /// Fully propagated
    Done,
    /// The CDN reports the invalidation failed
    Failed,
}

/// Error during a CDN operation
#[derive(Debug, Clone)]
pub enum CdnError {
    /// Submission was rejected or the transport failed
    SubmitFailed(String),
    /// Status query failed
    StatusFailed(String),
}

impl std::fmt::Display for CdnError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SubmitFailed(msg) => write!(f, "invalidation submit failed: {}", msg),
            Self::StatusFailed(msg) => write!(f, "invalidation status failed: {}", msg),
        }
    }
}

impl std::error::Error for CdnError {}

/// Trait for CDN invalidation clients
pub trait CdnClient: Send + Sync {
    /// A display name for this CDN (shown in reports and logs)
    fn display_name(&self) -> String;

    /// Submit one batched invalidation for the given paths
    fn submit(&self, paths: &[ObjectPath]) -> Result<InvalidationId, CdnError>;

    /// Query the state of a previously submitted invalidation
    fn status(&self, id: &InvalidationId) -> Result<InvalidationStatus, CdnError>;
}

impl CdnClient for Box<dyn CdnClient> {
    fn display_name(&self) -> String {
        (**self).display_name()
    }

    fn submit(&self, paths: &[ObjectPath]) -> Result<InvalidationId, CdnError> {
        (**self).submit(paths)
    }

    fn status(&self, id: &InvalidationId) -> Result<InvalidationStatus, CdnError> {
        (**self).status(id)
    }
}
