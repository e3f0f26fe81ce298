//! Environment Lease Port
//!
//! One deploy per target environment: two plans computed against stale,
//! mutually-inconsistent remote state must never interleave their applies.
//! The lease is held for the whole run and released on drop.

/// Error acquiring a lease
#[derive(Debug, Clone)]
pub enum LeaseError {
    /// Another deploy currently holds the lease
    Busy { environment: String },
    /// The lease backend failed
    Backend(String),
}

impl std::fmt::Display for LeaseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Busy { environment } => {
                write!(f, "environment '{}' is locked by another deploy", environment)
            }
            Self::Backend(msg) => write!(f, "lease backend error: {}", msg),
        }
    }
}

impl std::error::Error for LeaseError {}

/// Trait for acquiring per-environment deploy leases
pub trait EnvironmentLease {
    /// Guard type that releases the lease when dropped
    type Guard;

    /// Try to acquire the lease for the named environment.
    ///
    /// Non-blocking: a held lease returns `LeaseError::Busy` immediately
    /// rather than queueing deploys.
    fn acquire(&self, environment: &str) -> Result<Self::Guard, LeaseError>;
}
