//! Null CDN client
//!
//! For environments with no CDN in front of the store. Submissions succeed
//! immediately and report done, so the orchestrator's flow is identical with
//! and without a CDN configured.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::domain::ports::{CdnClient, CdnError, InvalidationId, InvalidationStatus};
use crate::domain::value_objects::ObjectPath;

/// CDN client that accepts everything and confirms instantly
#[derive(Debug, Default)]
pub struct NullCdn {
    counter: AtomicU64,
}

impl NullCdn {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CdnClient for NullCdn {
    fn display_name(&self) -> String {
        "none".to_string()
    }

    fn submit(&self, _paths: &[ObjectPath]) -> Result<InvalidationId, CdnError> {
        let n = self.counter.fetch_add(1, Ordering::SeqCst);
        Ok(InvalidationId(format!("noop-{}", n)))
    }

    fn status(&self, _id: &InvalidationId) -> Result<InvalidationStatus, CdnError> {
        Ok(InvalidationStatus::Done)
    }
}
