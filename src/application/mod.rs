//! Application layer: use cases composing domain services and ports

pub mod deploy;

pub use deploy::{
    DeployOptions, DeployReport, DeployUseCase, InvalidationOutcome, ObjectOutcome, RetryPolicy,
    RunState, VerifyOptions,
};
