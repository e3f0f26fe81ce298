//! Domain ports - trait boundaries to the outside world
//!
//! The orchestrator only ever talks to an object store, a CDN, an event
//! sink, and a lease through these traits, so every external collaborator
//! can be replaced with a fake in tests.

mod cdn;
mod deploy_events;
mod environment_lease;
mod object_store;

pub use cdn::{CdnClient, CdnError, InvalidationId, InvalidationStatus};
pub use deploy_events::{DeployEvent, DeployEventSink, DeployPhase, NoopEventSink};
pub use environment_lease::{EnvironmentLease, LeaseError};
pub use object_store::{ObjectStore, StoreError};
