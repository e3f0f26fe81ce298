//! Configuration loading
//!
//! Parses `skylift.toml`, collecting non-fatal warnings for unknown keys so
//! a typo in a rule name surfaces instead of silently doing nothing.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{SkyliftError, SkyliftResult};

use super::types::Config;

/// Default configuration file name, looked up in the working directory
pub const CONFIG_FILE: &str = "skylift.toml";

/// Non-fatal configuration warning surfaced to CLI users
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    /// The unknown key path (e.g. `environments.staging.cache_rules`)
    pub key: String,
    pub file: PathBuf,
}

/// Load configuration and collect warnings for unknown keys
pub fn load_with_warnings(path: &Path) -> SkyliftResult<(Config, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path)?;

    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(&content);

    let config: Config = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| SkyliftError::Config {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|key| ConfigWarning {
            key,
            file: path.to_path_buf(),
        })
        .collect();

    Ok((config, warnings))
}

/// Load configuration from an explicit path, or `skylift.toml` in `dir`
pub fn load_or_default(dir: &Path, explicit: Option<&Path>) -> SkyliftResult<(Config, Vec<ConfigWarning>)> {
    if let Some(path) = explicit {
        return load_with_warnings(path);
    }

    let default_path = dir.join(CONFIG_FILE);
    if default_path.exists() {
        load_with_warnings(&default_path)
    } else {
        Ok((Config::default(), Vec::new()))
    }
}
