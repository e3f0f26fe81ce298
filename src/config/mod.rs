//! Configuration: environment descriptors and loading

mod loader;
mod types;

pub use loader::{load_or_default, load_with_warnings, ConfigWarning, CONFIG_FILE};
pub use types::{CdnConfig, Config, EnvironmentConfig};
