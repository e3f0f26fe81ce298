//! Deploy Report
//!
//! Per-path outcomes plus the invalidation outcome for one run. Partial
//! success is always visible here; nothing is upgraded to success silently.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde_json::json;

use crate::domain::value_objects::ObjectPath;

/// Terminal state of a deploy run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    /// Every upload succeeded and invalidation confirmed within the deadline
    Succeeded,
    /// Content is correct at origin but something downstream is unconfirmed
    /// (CDN propagation, failed deletes, cancellation)
    PartiallyFailed,
    /// At least one required upload failed
    Failed,
}

impl RunState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Succeeded => "succeeded",
            Self::PartiallyFailed => "partially-failed",
            Self::Failed => "failed",
        }
    }

    /// Process exit code for this state
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Succeeded => 0,
            Self::Failed => 1,
            Self::PartiallyFailed => 2,
        }
    }
}

/// Outcome of one object's planned action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObjectOutcome {
    /// New or changed content was written
    Uploaded,
    /// Stale object was removed
    Deleted,
    /// Published content already matched
    Skipped,
    /// Upload failed after all retries (fatal for the run)
    UploadFailed { error: String },
    /// Delete failed after all retries (non-fatal; the object is stale, not missing)
    DeleteFailed { error: String },
    /// Operation was never attempted because the run was cancelled
    Cancelled,
}

impl ObjectOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Uploaded => "uploaded",
            Self::Deleted => "deleted",
            Self::Skipped => "skipped",
            Self::UploadFailed { .. } => "upload-failed",
            Self::DeleteFailed { .. } => "delete-failed",
            Self::Cancelled => "cancelled",
        }
    }

    /// True for outcomes that changed the published tree
    pub fn changed(&self) -> bool {
        matches!(self, Self::Uploaded | Self::Deleted)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::UploadFailed { error } | Self::DeleteFailed { error } => Some(error),
            _ => None,
        }
    }
}

/// Final disposition of the CDN invalidation for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidationOutcome {
    /// Nothing changed, so no invalidation was needed
    NotNeeded,
    /// Submitted; verification was disabled by request
    Submitted { id: String },
    /// Submitted and confirmed propagated
    Completed { id: String },
    /// Submitted but not confirmed within the deadline (may still complete)
    Unconfirmed { id: String, reason: String },
    /// Submission failed after all retries; cached copies expire naturally
    SubmitFailed { error: String },
}

impl InvalidationOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotNeeded => "not-needed",
            Self::Submitted { .. } => "submitted",
            Self::Completed { .. } => "completed",
            Self::Unconfirmed { .. } => "unconfirmed",
            Self::SubmitFailed { .. } => "submit-failed",
        }
    }

    /// True when this outcome degrades an otherwise clean run
    pub fn degrades_run(&self) -> bool {
        matches!(self, Self::Unconfirmed { .. } | Self::SubmitFailed { .. })
    }
}

/// Report for one deploy run
#[derive(Debug, Clone)]
pub struct DeployReport {
    /// Target environment name
    pub environment: String,
    /// Terminal state
    pub state: RunState,
    /// Per-path outcomes, in path order
    pub outcomes: BTreeMap<ObjectPath, ObjectOutcome>,
    /// Invalidation disposition
    pub invalidation: InvalidationOutcome,
    /// Whether this was a dry run (no side effects happened)
    pub dry_run: bool,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl DeployReport {
    pub fn uploaded(&self) -> usize {
        self.count(|o| matches!(o, ObjectOutcome::Uploaded))
    }

    pub fn deleted(&self) -> usize {
        self.count(|o| matches!(o, ObjectOutcome::Deleted))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, ObjectOutcome::Skipped))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| o.error().is_some())
    }

    pub fn cancelled(&self) -> usize {
        self.count(|o| matches!(o, ObjectOutcome::Cancelled))
    }

    fn count(&self, predicate: impl Fn(&ObjectOutcome) -> bool) -> usize {
        self.outcomes.values().filter(|o| predicate(o)).count()
    }

    pub fn is_success(&self) -> bool {
        self.state == RunState::Succeeded
    }

    /// One-line human summary
    pub fn summary_line(&self) -> String {
        format!(
            "{} uploaded, {} deleted, {} skipped, {} failed",
            self.uploaded(),
            self.deleted(),
            self.skipped(),
            self.failed()
        )
    }

    /// JSON representation for `--json` output
    pub fn to_json(&self) -> serde_json::Value {
        let objects: Vec<serde_json::Value> = self
            .outcomes
            .iter()
            .map(|(path, outcome)| {
                let mut entry = json!({
                    "path": path.as_str(),
                    "outcome": outcome.as_str(),
                });
                if let Some(error) = outcome.error() {
                    entry["error"] = json!(error);
                }
                entry
            })
            .collect();

        let invalidation = match &self.invalidation {
            InvalidationOutcome::NotNeeded => json!({ "outcome": "not-needed" }),
            InvalidationOutcome::Submitted { id } => {
                json!({ "outcome": "submitted", "id": id })
            }
            InvalidationOutcome::Completed { id } => {
                json!({ "outcome": "completed", "id": id })
            }
            InvalidationOutcome::Unconfirmed { id, reason } => {
                json!({ "outcome": "unconfirmed", "id": id, "reason": reason })
            }
            InvalidationOutcome::SubmitFailed { error } => {
                json!({ "outcome": "submit-failed", "error": error })
            }
        };

        json!({
            "event": "report",
            "environment": self.environment,
            "state": self.state.as_str(),
            "dry_run": self.dry_run,
            "uploaded": self.uploaded(),
            "deleted": self.deleted(),
            "skipped": self.skipped(),
            "failed": self.failed(),
            "cancelled": self.cancelled(),
            "objects": objects,
            "invalidation": invalidation,
            "started_at": self.started_at.to_rfc3339(),
            "finished_at": self.finished_at.to_rfc3339(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(s: &str) -> ObjectPath {
        ObjectPath::parse(s).unwrap()
    }

    fn report_with(outcomes: Vec<(&str, ObjectOutcome)>, state: RunState) -> DeployReport {
        let now = Utc::now();
        DeployReport {
            environment: "staging".to_string(),
            state,
            outcomes: outcomes
                .into_iter()
                .map(|(p, o)| (path(p), o))
                .collect(),
            invalidation: InvalidationOutcome::NotNeeded,
            dry_run: false,
            started_at: now,
            finished_at: now,
        }
    }

    #[test]
    fn counts_by_outcome() {
        let report = report_with(
            vec![
                ("a.html", ObjectOutcome::Uploaded),
                ("b.html", ObjectOutcome::Uploaded),
                ("c.html", ObjectOutcome::Skipped),
                ("d.html", ObjectOutcome::Deleted),
                (
                    "e.html",
                    ObjectOutcome::UploadFailed {
                        error: "timeout".to_string(),
                    },
                ),
            ],
            RunState::Failed,
        );

        assert_eq!(report.uploaded(), 2);
        assert_eq!(report.deleted(), 1);
        assert_eq!(report.skipped(), 1);
        assert_eq!(report.failed(), 1);
        assert_eq!(report.cancelled(), 0);
    }

    #[test]
    fn summary_line_is_stable() {
        let report = report_with(
            vec![
                ("a.html", ObjectOutcome::Uploaded),
                ("b.html", ObjectOutcome::Uploaded),
                ("c.html", ObjectOutcome::Deleted),
                ("d.html", ObjectOutcome::Skipped),
                ("e.html", ObjectOutcome::Skipped),
                ("f.html", ObjectOutcome::Skipped),
            ],
            RunState::Succeeded,
        );
        insta::assert_snapshot!(report.summary_line(), @"2 uploaded, 1 deleted, 3 skipped, 0 failed");
    }

    #[test]
    fn exit_codes_map_to_states() {
        assert_eq!(RunState::Succeeded.exit_code(), 0);
        assert_eq!(RunState::Failed.exit_code(), 1);
        assert_eq!(RunState::PartiallyFailed.exit_code(), 2);
    }

    #[test]
    fn json_report_carries_per_path_errors() {
        let report = report_with(
            vec![(
                "app.js",
                ObjectOutcome::UploadFailed {
                    error: "connection reset".to_string(),
                },
            )],
            RunState::Failed,
        );

        let value = report.to_json();
        assert_eq!(value["state"], "failed");
        assert_eq!(value["objects"][0]["path"], "app.js");
        assert_eq!(value["objects"][0]["outcome"], "upload-failed");
        assert_eq!(value["objects"][0]["error"], "connection reset");
    }

    #[test]
    fn changed_is_upload_or_delete() {
        assert!(ObjectOutcome::Uploaded.changed());
        assert!(ObjectOutcome::Deleted.changed());
        assert!(!ObjectOutcome::Skipped.changed());
        assert!(!ObjectOutcome::Cancelled.changed());
    }
}
