//! Deploy use case: plan, apply, invalidate, verify

mod options;
mod report;
mod retry;
mod use_case;


pub use options::{DeployOptions, RetryPolicy, VerifyOptions};
pub use report::{DeployReport, InvalidationOutcome, ObjectOutcome, RunState};
pub use retry::with_retry;
pub use use_case::DeployUseCase;
