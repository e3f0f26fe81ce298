//! Infrastructure layer: implementations of the domain ports

pub mod artifacts;
pub mod cdn;
pub mod events;
pub mod lease;
pub mod stores;

pub use artifacts::scan_artifacts;
pub use cdn::{CommandCdn, NullCdn, RecordingCdn};
pub use events::JsonEventSink;
pub use lease::{default_lease_dir, FsLease, FsLeaseGuard};
pub use stores::{DirStore, MemoryStore, SshStore};
