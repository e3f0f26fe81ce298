//! Recording CDN client
//!
//! Test fake: captures submitted batches and plays back a scripted sequence
//! of statuses. Submission failures can be injected to exercise the retry
//! and partial-failure paths.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::domain::ports::{CdnClient, CdnError, InvalidationId, InvalidationStatus};
use crate::domain::value_objects::ObjectPath;

#[derive(Debug, Default)]
struct RecordingCdnInner {
    batches: Vec<Vec<ObjectPath>>,
    /// Fail this many submissions before accepting one (u32::MAX = forever)
    submit_failures: u32,
    /// Statuses returned in order; exhausted script returns Done
    scripted_statuses: VecDeque<InvalidationStatus>,
    status_calls: u32,
    next_id: u32,
}

/// Shared-handle recording CDN; clones observe the same state
#[derive(Debug, Clone, Default)]
pub struct RecordingCdn {
    inner: Arc<Mutex<RecordingCdnInner>>,
}

impl RecordingCdn {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the next `times` submissions (u32::MAX = all of them)
    pub fn fail_submits(&self, times: u32) {
        self.inner.lock().unwrap().submit_failures = times;
    }

    /// Script the sequence of statuses returned by `status`
    pub fn script_statuses(&self, statuses: Vec<InvalidationStatus>) {
        self.inner.lock().unwrap().scripted_statuses = statuses.into();
    }

    /// Batches accepted so far (failed submissions are not recorded)
    pub fn batches(&self) -> Vec<Vec<ObjectPath>> {
        self.inner.lock().unwrap().batches.clone()
    }

    pub fn status_calls(&self) -> u32 {
        self.inner.lock().unwrap().status_calls
    }
}

impl CdnClient for RecordingCdn {
    fn display_name(&self) -> String {
        "recording".to_string()
    }

    fn submit(&self, paths: &[ObjectPath]) -> Result<InvalidationId, CdnError> {
        let mut inner = self.inner.lock().unwrap();

        if inner.submit_failures > 0 {
            if inner.submit_failures != u32::MAX {
                inner.submit_failures -= 1;
            }
            return Err(CdnError::SubmitFailed("injected submit failure".to_string()));
        }

        let mut batch: Vec<ObjectPath> = paths.to_vec();
        batch.sort();
        inner.batches.push(batch);
        inner.next_id += 1;
        Ok(InvalidationId(format!("inv-{}", inner.next_id)))
    }

    fn status(&self, _id: &InvalidationId) -> Result<InvalidationStatus, CdnError> {
        let mut inner = self.inner.lock().unwrap();
        inner.status_calls += 1;
        Ok(inner
            .scripted_statuses
            .pop_front()
            .unwrap_or(InvalidationStatus::Done))
    }
}
