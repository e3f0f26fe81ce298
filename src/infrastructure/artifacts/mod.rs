//! Artifact production from build output

mod scanner;

pub use scanner::{scan_artifacts, IGNORE_FILE};
