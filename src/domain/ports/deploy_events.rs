//! Deploy Event Port
//!
//! Provides an observable interface for deploy runs. Enables progress
//! reporting, NDJSON event streams for CI, and debugging.

use crate::domain::value_objects::ObjectPath;

/// Phase of a deploy run, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeployPhase {
    Planning,
    Applying,
    Invalidating,
    Verifying,
}

impl DeployPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Planning => "planning",
            Self::Applying => "applying",
            Self::Invalidating => "invalidating",
            Self::Verifying => "verifying",
        }
    }
}

/// Event emitted during a deploy run
#[derive(Debug, Clone)]
pub enum DeployEvent {
    /// Deploy started
    Started {
        environment: String,
        store: String,
        artifact_count: usize,
    },

    /// A phase began
    PhaseStarted { phase: DeployPhase },

    /// Planning finished
    Planned {
        uploads: usize,
        deletes: usize,
        skips: usize,
    },

    /// One object was uploaded
    ObjectUploaded { path: ObjectPath },

    /// One object was deleted
    ObjectDeleted { path: ObjectPath },

    /// One object was skipped (already published with this content)
    ObjectSkipped { path: ObjectPath },

    /// One object operation failed after all retries
    ObjectFailed { path: ObjectPath, error: String },

    /// One object retry is pending
    ObjectRetried { path: ObjectPath, attempt: u32 },

    /// Invalidation batch was submitted
    InvalidationSubmitted { id: String, path_count: usize },

    /// Invalidation confirmed propagated
    InvalidationConfirmed { id: String },

    /// Invalidation state could not be confirmed within the deadline
    InvalidationUnconfirmed { reason: String },

    /// Deploy finished
    Completed {
        state: String,
        uploaded: usize,
        deleted: usize,
        skipped: usize,
        failed: usize,
    },
}

/// Trait for receiving deploy events
///
/// Implementations:
/// - `JsonEventSink`: NDJSON event stream for CI
/// - `NoopEventSink`: silent operation
pub trait DeployEventSink: Send + Sync {
    /// Handle a deploy event
    fn on_event(&self, event: DeployEvent);

    /// Check if this sink wants per-object events
    fn wants_detailed_events(&self) -> bool {
        true
    }
}

/// No-op event sink for silent operation
pub struct NoopEventSink;

impl DeployEventSink for NoopEventSink {
    fn on_event(&self, _event: DeployEvent) {
        // Do nothing
    }

    fn wants_detailed_events(&self) -> bool {
        false
    }
}
