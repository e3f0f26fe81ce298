//! NDJSON event sink
//!
//! Streams one JSON object per line to stdout for CI consumption.

use serde_json::json;

use crate::domain::ports::{DeployEvent, DeployEventSink};

/// Event sink that prints NDJSON to stdout
#[derive(Debug, Default)]
pub struct JsonEventSink;

impl JsonEventSink {
    pub fn new() -> Self {
        Self
    }

    fn render(event: &DeployEvent) -> serde_json::Value {
        match event {
            DeployEvent::Started {
                environment,
                store,
                artifact_count,
            } => json!({
                "event": "start",
                "environment": environment,
                "store": store,
                "artifacts": artifact_count,
            }),
            DeployEvent::PhaseStarted { phase } => json!({
                "event": "phase",
                "phase": phase.as_str(),
            }),
            DeployEvent::Planned {
                uploads,
                deletes,
                skips,
            } => json!({
                "event": "planned",
                "uploads": uploads,
                "deletes": deletes,
                "skips": skips,
            }),
            DeployEvent::ObjectUploaded { path } => json!({
                "event": "object",
                "outcome": "uploaded",
                "path": path.as_str(),
            }),
            DeployEvent::ObjectDeleted { path } => json!({
                "event": "object",
                "outcome": "deleted",
                "path": path.as_str(),
            }),
            DeployEvent::ObjectSkipped { path } => json!({
                "event": "object",
                "outcome": "skipped",
                "path": path.as_str(),
            }),
            DeployEvent::ObjectFailed { path, error } => json!({
                "event": "object",
                "outcome": "failed",
                "path": path.as_str(),
                "error": error,
            }),
            DeployEvent::ObjectRetried { path, attempt } => json!({
                "event": "retry",
                "path": path.as_str(),
                "attempt": attempt,
            }),
            DeployEvent::InvalidationSubmitted { id, path_count } => json!({
                "event": "invalidation",
                "outcome": "submitted",
                "id": id,
                "paths": path_count,
            }),
            DeployEvent::InvalidationConfirmed { id } => json!({
                "event": "invalidation",
                "outcome": "confirmed",
                "id": id,
            }),
            DeployEvent::InvalidationUnconfirmed { reason } => json!({
                "event": "invalidation",
                "outcome": "unconfirmed",
                "reason": reason,
            }),
            DeployEvent::Completed {
                state,
                uploaded,
                deleted,
                skipped,
                failed,
            } => json!({
                "event": "complete",
                "state": state,
                "uploaded": uploaded,
                "deleted": deleted,
                "skipped": skipped,
                "failed": failed,
            }),
        }
    }
}

impl DeployEventSink for JsonEventSink {
    fn on_event(&self, event: DeployEvent) {
        println!("{}", Self::render(&event));
    }
}
