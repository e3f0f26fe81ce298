//! Configuration types
//!
//! `skylift.toml` describes the deployable environments: where objects go,
//! which CDN (if any) fronts them, and the cache policy per path class.
//!
//! ```toml
//! default_environment = "staging"
//!
//! [environments.staging]
//! root = "/srv/www/staging"
//!
//! [environments.production]
//! remote = "deploy@web01:/var/www/site"
//!
//! [environments.production.cdn]
//! name = "edge"
//! submit = ["edgectl", "invalidate", "--dist", "E2ABC"]
//! status = ["edgectl", "invalidation-status"]
//!
//! [[environments.production.cache.rules]]
//! prefix = "assets/"
//! max_age = 31536000
//! ```

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::CachePolicy;
use crate::error::{SkyliftError, SkyliftResult};

/// CDN command configuration for one environment
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CdnConfig {
    /// Display name (defaults to the first submit argv element)
    #[serde(default)]
    pub name: Option<String>,
    /// Invalidation submit command; changed paths are appended
    pub submit: Vec<String>,
    /// Invalidation status command; the invalidation id is appended.
    /// Empty means the vendor has no status query.
    #[serde(default)]
    pub status: Vec<String>,
}

impl CdnConfig {
    pub fn display_name(&self) -> String {
        self.name
            .clone()
            .or_else(|| self.submit.first().cloned())
            .unwrap_or_else(|| "cdn".to_string())
    }
}

/// One deployable environment
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentConfig {
    /// Local directory store root
    #[serde(default)]
    pub root: Option<PathBuf>,
    /// Remote store destination (`user@host:/path`)
    #[serde(default)]
    pub remote: Option<String>,
    /// CDN in front of this store, if any
    #[serde(default)]
    pub cdn: Option<CdnConfig>,
    /// Cache policy for published objects
    #[serde(default)]
    pub cache: CachePolicy,
}

impl EnvironmentConfig {
    /// Validate this environment, returning human-readable problems
    pub fn problems(&self) -> Vec<String> {
        let mut problems = Vec::new();

        match (&self.root, &self.remote) {
            (None, None) => {
                problems.push("no store configured: set either 'root' or 'remote'".to_string())
            }
            (Some(_), Some(_)) => {
                problems.push("both 'root' and 'remote' are set: pick one store".to_string())
            }
            _ => {}
        }

        if let Some(remote) = &self.remote {
            if !remote.contains(':') {
                problems.push(format!(
                    "remote '{}' is not of the form user@host:/path",
                    remote
                ));
            }
        }

        if let Some(cdn) = &self.cdn {
            if cdn.submit.is_empty() {
                problems.push("cdn.submit command is empty".to_string());
            }
        }

        for rule in self.cache.rules() {
            if rule.prefix.is_empty() {
                problems.push("cache rule with empty prefix matches everything".to_string());
            }
            if rule.prefix.starts_with('/') {
                problems.push(format!(
                    "cache rule prefix '{}' must be relative (object paths have no leading '/')",
                    rule.prefix
                ));
            }
        }

        problems
    }
}

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Environment used when `--env` is not given
    #[serde(default)]
    pub default_environment: Option<String>,
    /// Where leases and remote-store state files live
    /// (defaults to `~/.skylift`)
    #[serde(default)]
    pub state_dir: Option<PathBuf>,
    /// Deployable environments by name
    #[serde(default)]
    pub environments: BTreeMap<String, EnvironmentConfig>,
}

impl Config {
    /// Look up an environment by name
    pub fn environment(&self, name: &str) -> SkyliftResult<&EnvironmentConfig> {
        self.environments
            .get(name)
            .ok_or_else(|| SkyliftError::UnknownEnvironment {
                name: name.to_string(),
            })
    }

    /// Resolve the environment name to deploy: the `--env` flag, the
    /// configured default, or the sole configured environment.
    pub fn resolve_environment_name(&self, flag: Option<&str>) -> SkyliftResult<String> {
        if let Some(name) = flag {
            self.environment(name)?;
            return Ok(name.to_string());
        }

        if let Some(name) = &self.default_environment {
            self.environment(name)?;
            return Ok(name.clone());
        }

        if self.environments.len() == 1 {
            if let Some(name) = self.environments.keys().next() {
                return Ok(name.clone());
            }
        }

        Err(SkyliftError::UnknownEnvironment {
            name: "(none given)".to_string(),
        })
    }

    /// Resolve the state directory, falling back to `~/.skylift`
    pub fn state_dir(&self) -> PathBuf {
        self.state_dir.clone().unwrap_or_else(|| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".skylift")
        })
    }
}
