//! Deploy Use Case
//!
//! Orchestrates one deployment run:
//! 1. Plan: diff the build against the last published state (no side effects)
//! 2. Apply: upload changed objects, then delete vanished ones
//! 3. Invalidate: one batched CDN invalidation for the paths that changed
//! 4. Verify: poll the invalidation to completion within a bounded deadline
//!
//! This use case is pure orchestration - diffing lives in the planner, and
//! all I/O goes through the store/CDN ports, so the whole run is testable
//! with in-memory fakes.
//!
//! Failure policy: per-object operations are independent; one object's
//! failure never aborts its siblings. A failed upload makes the run `Failed`
//! (required content is missing), a failed delete or an unconfirmed
//! invalidation only makes it `PartiallyFailed` (content is correct at
//! origin). Invalidation is attempted for whatever did change, even when
//! other objects failed.

use std::collections::{BTreeMap, VecDeque};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc, Mutex};
use std::time::Instant;

use chrono::Utc;

use crate::domain::entities::{ArtifactSet, DeployPlan, ObjectAction, PlannedObject};
use crate::domain::ports::{
    CdnClient, DeployEvent, DeployEventSink, DeployPhase, InvalidationId, NoopEventSink,
    ObjectStore,
};
use crate::domain::services::Planner;
use crate::domain::value_objects::{CachePolicy, ObjectPath};
use crate::error::{SkyliftError, SkyliftResult};

use super::options::DeployOptions;
use super::report::{DeployReport, InvalidationOutcome, ObjectOutcome, RunState};
use super::retry::with_retry;

/// Result of one pooled transfer
enum TransferResult {
    Done,
    Failed(String),
    Cancelled,
}

/// Deploy use case - orchestrates one run against a store and a CDN
///
/// Both collaborators are passed in at construction time as explicit,
/// already-scoped capability objects; the orchestrator holds no credentials
/// and no state between runs.
pub struct DeployUseCase<S, C>
where
    S: ObjectStore,
    C: CdnClient,
{
    store: S,
    cdn: C,
    event_sink: Arc<dyn DeployEventSink>,
    cancel: Arc<AtomicBool>,
}

impl<S, C> DeployUseCase<S, C>
where
    S: ObjectStore,
    C: CdnClient,
{
    pub fn new(store: S, cdn: C) -> Self {
        Self {
            store,
            cdn,
            event_sink: Arc::new(NoopEventSink),
            cancel: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Report progress through the given sink
    pub fn with_event_sink(mut self, event_sink: Arc<dyn DeployEventSink>) -> Self {
        self.event_sink = event_sink;
        self
    }

    /// Observe the given flag between object operations; a set flag stops
    /// new work (in-flight writes are not rolled back)
    pub fn with_cancel_flag(mut self, cancel: Arc<AtomicBool>) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Stage 1: plan the deployment (reads remote state, no writes)
    pub fn plan(&self, artifacts: &ArtifactSet) -> SkyliftResult<DeployPlan> {
        let remote = self
            .store
            .list()
            .map_err(|e| SkyliftError::StoreUnavailable {
                message: e.to_string(),
            })?;
        Ok(Planner::plan(artifacts, &remote))
    }

    /// Execute one full deployment run
    pub fn deploy(
        &self,
        artifacts: &ArtifactSet,
        policy: &CachePolicy,
        options: &DeployOptions,
    ) -> SkyliftResult<DeployReport> {
        let started_at = Utc::now();

        self.event(DeployEvent::Started {
            environment: options.environment.clone(),
            store: self.store.display_name(),
            artifact_count: artifacts.len(),
        });

        self.event(DeployEvent::PhaseStarted {
            phase: DeployPhase::Planning,
        });
        let plan = self.plan(artifacts)?;
        self.event(DeployEvent::Planned {
            uploads: plan.upload_count(),
            deletes: plan.delete_count(),
            skips: plan.skip_count(),
        });

        if options.dry_run {
            return Ok(self.dry_run_report(&plan, options, started_at));
        }

        self.event(DeployEvent::PhaseStarted {
            phase: DeployPhase::Applying,
        });
        let outcomes = self.apply(artifacts, &plan, policy, options);

        let changed: Vec<ObjectPath> = outcomes
            .iter()
            .filter(|(_, outcome)| outcome.changed())
            .map(|(path, _)| path.clone())
            .collect();

        self.event(DeployEvent::PhaseStarted {
            phase: DeployPhase::Invalidating,
        });
        let mut invalidation = if changed.is_empty() {
            InvalidationOutcome::NotNeeded
        } else {
            self.invalidate(&changed, options)
        };

        if options.verify.enabled {
            if let InvalidationOutcome::Submitted { id } = invalidation.clone() {
                self.event(DeployEvent::PhaseStarted {
                    phase: DeployPhase::Verifying,
                });
                invalidation = self.verify(InvalidationId(id), options);
            }
        }

        let state = resolve_state(&outcomes, &invalidation);
        let report = DeployReport {
            environment: options.environment.clone(),
            state,
            outcomes,
            invalidation,
            dry_run: false,
            started_at,
            finished_at: Utc::now(),
        };

        self.event(DeployEvent::Completed {
            state: report.state.as_str().to_string(),
            uploaded: report.uploaded(),
            deleted: report.deleted(),
            skipped: report.skipped(),
            failed: report.failed(),
        });

        Ok(report)
    }

    /// Stage 2: execute the plan's transfers.
    ///
    /// Uploads run strictly before deletes so a still-referenced path is
    /// never briefly absent during the deploy. Within each class, objects
    /// transfer concurrently on a bounded worker pool.
    pub fn apply(
        &self,
        artifacts: &ArtifactSet,
        plan: &DeployPlan,
        policy: &CachePolicy,
        options: &DeployOptions,
    ) -> BTreeMap<ObjectPath, ObjectOutcome> {
        let mut outcomes = BTreeMap::new();

        for object in plan.skips() {
            self.event(DeployEvent::ObjectSkipped {
                path: object.path.clone(),
            });
            outcomes.insert(object.path.clone(), ObjectOutcome::Skipped);
        }

        let uploads: Vec<&PlannedObject> = plan.uploads().collect();
        let upload_results = self.run_transfers(&uploads, options, |object| {
            let artifact = artifacts
                .get(&object.path)
                .ok_or_else(|| "artifact missing from build set".to_string())?;
            let cache_control = policy.resolve(&object.path).header_value();
            with_retry(
                options.retry,
                |attempt| {
                    self.event(DeployEvent::ObjectRetried {
                        path: object.path.clone(),
                        attempt,
                    });
                },
                || self.store.put(&object.path, artifact.bytes(), &cache_control),
            )
            .map_err(|e| e.to_string())?;
            self.event(DeployEvent::ObjectUploaded {
                path: object.path.clone(),
            });
            Ok(())
        });
        for (path, result) in upload_results {
            let outcome = match result {
                TransferResult::Done => ObjectOutcome::Uploaded,
                TransferResult::Failed(error) => {
                    self.event(DeployEvent::ObjectFailed {
                        path: path.clone(),
                        error: error.clone(),
                    });
                    ObjectOutcome::UploadFailed { error }
                }
                TransferResult::Cancelled => ObjectOutcome::Cancelled,
            };
            outcomes.insert(path, outcome);
        }

        let deletes: Vec<&PlannedObject> = plan.deletes().collect();
        let delete_results = self.run_transfers(&deletes, options, |object| {
            with_retry(
                options.retry,
                |attempt| {
                    self.event(DeployEvent::ObjectRetried {
                        path: object.path.clone(),
                        attempt,
                    });
                },
                || self.store.delete(&object.path),
            )
            .map_err(|e| e.to_string())?;
            self.event(DeployEvent::ObjectDeleted {
                path: object.path.clone(),
            });
            Ok(())
        });
        for (path, result) in delete_results {
            let outcome = match result {
                TransferResult::Done => ObjectOutcome::Deleted,
                TransferResult::Failed(error) => {
                    self.event(DeployEvent::ObjectFailed {
                        path: path.clone(),
                        error: error.clone(),
                    });
                    ObjectOutcome::DeleteFailed { error }
                }
                TransferResult::Cancelled => ObjectOutcome::Cancelled,
            };
            outcomes.insert(path, outcome);
        }

        outcomes
    }

    /// Stage 3: submit one batched invalidation for the changed paths.
    ///
    /// Resubmission after a transient failure is safe: the CDN contract
    /// makes duplicate batches harmless.
    fn invalidate(&self, changed: &[ObjectPath], options: &DeployOptions) -> InvalidationOutcome {
        let submitted = with_retry(options.retry, |_| {}, || self.cdn.submit(changed));
        match submitted {
            Ok(id) => {
                self.event(DeployEvent::InvalidationSubmitted {
                    id: id.0.clone(),
                    path_count: changed.len(),
                });
                InvalidationOutcome::Submitted { id: id.0 }
            }
            Err(err) => {
                let error = err.to_string();
                self.event(DeployEvent::InvalidationUnconfirmed {
                    reason: error.clone(),
                });
                InvalidationOutcome::SubmitFailed { error }
            }
        }
    }

    /// Stage 4: poll the invalidation until it completes or the deadline
    /// passes. A timeout is not a hard failure; propagation may still
    /// complete asynchronously.
    fn verify(&self, id: InvalidationId, options: &DeployOptions) -> InvalidationOutcome {
        let deadline = Instant::now() + options.verify.timeout;

        loop {
            match self.cdn.status(&id) {
                Ok(crate::domain::ports::InvalidationStatus::Done) => {
                    self.event(DeployEvent::InvalidationConfirmed { id: id.0.clone() });
                    return InvalidationOutcome::Completed { id: id.0 };
                }
                Ok(crate::domain::ports::InvalidationStatus::Failed) => {
                    let reason = "CDN reported the invalidation failed".to_string();
                    self.event(DeployEvent::InvalidationUnconfirmed {
                        reason: reason.clone(),
                    });
                    return InvalidationOutcome::Unconfirmed { id: id.0, reason };
                }
                // Pending and transient status errors both mean "ask again"
                Ok(crate::domain::ports::InvalidationStatus::Pending) | Err(_) => {}
            }

            if self.cancel.load(Ordering::SeqCst) {
                let reason = "verification cancelled".to_string();
                self.event(DeployEvent::InvalidationUnconfirmed {
                    reason: reason.clone(),
                });
                return InvalidationOutcome::Unconfirmed { id: id.0, reason };
            }

            if Instant::now() >= deadline {
                let reason = format!(
                    "not confirmed within {}s; propagation may still complete",
                    options.verify.timeout.as_secs()
                );
                self.event(DeployEvent::InvalidationUnconfirmed {
                    reason: reason.clone(),
                });
                return InvalidationOutcome::Unconfirmed { id: id.0, reason };
            }

            std::thread::sleep(options.verify.poll_interval);
        }
    }

    /// Run transfers on a bounded worker pool, collecting per-path results.
    ///
    /// Objects are independent; ordering within one class does not matter.
    /// A set cancel flag stops new transfers but does not interrupt ones
    /// already in flight.
    fn run_transfers<F>(
        &self,
        objects: &[&PlannedObject],
        options: &DeployOptions,
        op: F,
    ) -> Vec<(ObjectPath, TransferResult)>
    where
        F: Fn(&PlannedObject) -> Result<(), String> + Sync,
    {
        if objects.is_empty() {
            return Vec::new();
        }

        let queue: Mutex<VecDeque<&PlannedObject>> =
            Mutex::new(objects.iter().copied().collect());
        let (tx, rx) = mpsc::channel();
        let workers = options.concurrency.max(1).min(objects.len());

        std::thread::scope(|scope| {
            for _ in 0..workers {
                let tx = tx.clone();
                let queue = &queue;
                let op = &op;
                scope.spawn(move || loop {
                    let next = queue.lock().unwrap().pop_front();
                    let Some(object) = next else { break };

                    let result = if self.cancel.load(Ordering::SeqCst) {
                        TransferResult::Cancelled
                    } else {
                        match op(object) {
                            Ok(()) => TransferResult::Done,
                            Err(error) => TransferResult::Failed(error),
                        }
                    };
                    let _ = tx.send((object.path.clone(), result));
                });
            }
            drop(tx);
        });

        rx.into_iter().collect()
    }

    fn dry_run_report(
        &self,
        plan: &DeployPlan,
        options: &DeployOptions,
        started_at: chrono::DateTime<Utc>,
    ) -> DeployReport {
        let outcomes = plan
            .objects
            .iter()
            .map(|object| {
                let outcome = match object.action {
                    ObjectAction::Upload => ObjectOutcome::Uploaded,
                    ObjectAction::Skip => ObjectOutcome::Skipped,
                    ObjectAction::Delete => ObjectOutcome::Deleted,
                };
                (object.path.clone(), outcome)
            })
            .collect();

        DeployReport {
            environment: options.environment.clone(),
            state: RunState::Succeeded,
            outcomes,
            invalidation: InvalidationOutcome::NotNeeded,
            dry_run: true,
            started_at,
            finished_at: Utc::now(),
        }
    }

    fn event(&self, event: DeployEvent) {
        self.event_sink.on_event(event);
    }
}

/// Resolve the terminal run state from per-object outcomes and the
/// invalidation disposition.
fn resolve_state(
    outcomes: &BTreeMap<ObjectPath, ObjectOutcome>,
    invalidation: &InvalidationOutcome,
) -> RunState {
    let any_upload_failed = outcomes
        .values()
        .any(|o| matches!(o, ObjectOutcome::UploadFailed { .. }));
    if any_upload_failed {
        return RunState::Failed;
    }

    let any_partial = outcomes
        .values()
        .any(|o| matches!(o, ObjectOutcome::DeleteFailed { .. } | ObjectOutcome::Cancelled));
    if any_partial || invalidation.degrades_run() {
        return RunState::PartiallyFailed;
    }

    RunState::Succeeded
}
