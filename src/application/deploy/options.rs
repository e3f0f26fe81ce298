//! Deploy Options
//!
//! Configuration types for a single deploy run.

use std::time::Duration;

/// Retry policy for per-object transfers and invalidation submission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts (first try included)
    pub attempts: u32,
    /// Delay before the first retry; doubles on each subsequent retry
    pub base_delay: Duration,
}

impl RetryPolicy {
    /// No retries at all (single attempt)
    pub fn none() -> Self {
        Self {
            attempts: 1,
            base_delay: Duration::ZERO,
        }
    }

    /// Retries without sleeping, for tests
    pub fn immediate(attempts: u32) -> Self {
        Self {
            attempts,
            base_delay: Duration::ZERO,
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: 3,
            base_delay: Duration::from_millis(250),
        }
    }
}

/// How invalidation propagation is confirmed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerifyOptions {
    /// Poll the CDN until the invalidation completes
    pub enabled: bool,
    /// Give up polling after this long (run becomes partially-failed)
    pub timeout: Duration,
    /// Sleep between status polls
    pub poll_interval: Duration,
}

impl Default for VerifyOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            timeout: Duration::from_secs(300),
            poll_interval: Duration::from_secs(5),
        }
    }
}

impl VerifyOptions {
    /// Polling disabled; a submitted invalidation is left unverified
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }
}

/// Options for one deploy run
#[derive(Debug, Clone)]
pub struct DeployOptions {
    /// Target environment name (reporting only; the lease is taken by the caller)
    pub environment: String,
    /// Plan and report without touching the store or CDN
    pub dry_run: bool,
    /// Worker pool size for object transfers
    pub concurrency: usize,
    /// Retry policy for transfers and invalidation submission
    pub retry: RetryPolicy,
    /// Propagation verification behavior
    pub verify: VerifyOptions,
}

impl DeployOptions {
    pub fn new(environment: impl Into<String>) -> Self {
        Self {
            environment: environment.into(),
            dry_run: false,
            concurrency: 4,
            retry: RetryPolicy::default(),
            verify: VerifyOptions::default(),
        }
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_verify(mut self, verify: VerifyOptions) -> Self {
        self.verify = verify;
        self
    }
}
