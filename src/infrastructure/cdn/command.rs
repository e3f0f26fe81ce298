//! Command-backed CDN client
//!
//! Drives a vendor CLI (e.g. a cloud provider's invalidation command)
//! through configured argv templates instead of linking a vendor SDK.
//!
//! Contract with the configured commands:
//! - submit argv + one `/`-prefixed path per changed object; exit 0 and
//!   print the invalidation id as the first non-empty stdout line
//! - status argv + the invalidation id; exit 0 and print one of
//!   `pending`, `done`, `failed` as the first non-empty stdout line
//!
//! An empty status argv means the vendor offers no status query; submitted
//! invalidations are then reported done immediately.

use std::process::Command;

use crate::domain::ports::{CdnClient, CdnError, InvalidationId, InvalidationStatus};
use crate::domain::value_objects::ObjectPath;

/// CDN client that shells out to configured commands
#[derive(Debug, Clone)]
pub struct CommandCdn {
    name: String,
    submit_argv: Vec<String>,
    status_argv: Vec<String>,
}

impl CommandCdn {
    pub fn new(name: impl Into<String>, submit_argv: Vec<String>, status_argv: Vec<String>) -> Self {
        Self {
            name: name.into(),
            submit_argv,
            status_argv,
        }
    }

    /// The argv that would be run for a submission (exposed for validation)
    pub fn submit_argv_for(&self, paths: &[ObjectPath]) -> Vec<String> {
        let mut argv = self.submit_argv.clone();
        argv.extend(paths.iter().map(|p| format!("/{}", p.as_str())));
        argv
    }

    fn first_stdout_line(output: &std::process::Output) -> Option<String> {
        String::from_utf8_lossy(&output.stdout)
            .lines()
            .map(str::trim)
            .find(|line| !line.is_empty())
            .map(str::to_string)
    }

    /// First whitespace-separated token of stdout; status commands may print
    /// trailing detail after the status word
    fn first_stdout_token(output: &std::process::Output) -> Option<String> {
        Self::first_stdout_line(output)
            .and_then(|line| line.split_whitespace().next().map(str::to_string))
    }

    fn run(argv: &[String]) -> Result<std::process::Output, String> {
        let (program, args) = argv.split_first().ok_or("empty command")?;
        Command::new(program)
            .args(args)
            .output()
            .map_err(|e| e.to_string())
    }
}

impl CdnClient for CommandCdn {
    fn display_name(&self) -> String {
        self.name.clone()
    }

    fn submit(&self, paths: &[ObjectPath]) -> Result<InvalidationId, CdnError> {
        let argv = self.submit_argv_for(paths);
        let output = Self::run(&argv).map_err(CdnError::SubmitFailed)?;

        if !output.status.success() {
            return Err(CdnError::SubmitFailed(
                String::from_utf8_lossy(&output.stderr).trim().to_string(),
            ));
        }

        Self::first_stdout_line(&output)
            .map(InvalidationId)
            .ok_or_else(|| CdnError::SubmitFailed("command printed no invalidation id".to_string()))
    }

    fn status(&self, id: &InvalidationId) -> Result<InvalidationStatus, CdnError> {
        if self.status_argv.is_empty() {
            return Ok(InvalidationStatus::Done);
        }

        let mut argv = self.status_argv.clone();
        argv.push(id.0.clone());
        let output = Self::run(&argv).map_err(CdnError::StatusFailed)?;

        if !output.status.success() {
            return Err(CdnError::StatusFailed(
                String::from_utf8_lossy(&output.stderr).trim().to_string(),
            ));
        }

        match Self::first_stdout_token(&output).as_deref() {
            Some(s) if s.eq_ignore_ascii_case("pending") => Ok(InvalidationStatus::Pending),
            Some(s) if s.eq_ignore_ascii_case("done") => Ok(InvalidationStatus::Done),
            Some(s) if s.eq_ignore_ascii_case("failed") => Ok(InvalidationStatus::Failed),
            other => Err(CdnError::StatusFailed(format!(
                "unexpected status output: {:?}",
                other
            ))),
        }
    }
}
