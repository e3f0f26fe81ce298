//! Skylift CLI - static-asset deploy orchestrator
//!
//! Usage: skylift <COMMAND>
//!
//! Commands:
//!   deploy  Deploy built artifacts to an environment
//!   plan    Preview the deploy plan without writing
//!   status  Show the last-known published state
//!   check   Validate the configuration

mod cli;

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{anyhow, bail, Result};
use clap::Parser;
use is_terminal::IsTerminal;

use skylift::application::{DeployOptions, DeployReport, DeployUseCase, VerifyOptions};
use skylift::config::{load_or_default, Config, ConfigWarning, EnvironmentConfig};
use skylift::domain::entities::DeployPlan;
use skylift::domain::ports::{
    CdnClient, DeployEventSink, EnvironmentLease, LeaseError, NoopEventSink, ObjectStore,
};
use skylift::domain::value_objects::ObjectPath;
use skylift::error::SkyliftError;
use skylift::infrastructure::{
    scan_artifacts, CommandCdn, DirStore, FsLease, JsonEventSink, NullCdn, SshStore,
};
use skylift::RunState;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Deploy {
            artifacts,
            env,
            config,
            dry_run,
            yes,
            no_verify,
            concurrency,
        } => cmd_deploy(
            &artifacts,
            env.as_deref(),
            config.as_deref(),
            dry_run,
            yes,
            no_verify,
            concurrency,
            cli.json,
            cli.verbose,
        ),
        Commands::Plan {
            artifacts,
            env,
            config,
        } => cmd_plan(&artifacts, env.as_deref(), config.as_deref(), cli.json),
        Commands::Status { env, config } => cmd_status(env.as_deref(), config.as_deref(), cli.json),
        Commands::Check { config } => cmd_check(config.as_deref(), cli.json),
    }
}

/// Load configuration from the working directory, printing warnings
fn load_config(explicit: Option<&Path>, json: bool) -> Result<Config> {
    let cwd = std::env::current_dir()?;
    let (config, warnings) = load_or_default(&cwd, explicit)?;
    print_config_warnings(&warnings, json);
    Ok(config)
}

fn print_config_warnings(warnings: &[ConfigWarning], json: bool) {
    for warning in warnings {
        if json {
            println!(
                "{}",
                serde_json::json!({
                    "event": "config-warning",
                    "key": warning.key,
                    "file": warning.file.display().to_string(),
                })
            );
        } else {
            eprintln!(
                "⚠ Unknown config key '{}' in {}",
                warning.key,
                warning.file.display()
            );
        }
    }
}

/// Build the object store for an environment
fn build_store(
    name: &str,
    env: &EnvironmentConfig,
    state_dir: &Path,
) -> Result<Box<dyn ObjectStore>> {
    if let Some(root) = &env.root {
        return Ok(Box::new(DirStore::new(root)));
    }

    if let Some(remote) = &env.remote {
        let (host, remote_root) = SshStore::parse_destination(remote)
            .ok_or_else(|| anyhow!("remote '{}' is not of the form user@host:/path", remote))?;
        let state_path = state_dir.join("state").join(format!("{}.toml", name));
        return Ok(Box::new(SshStore::new(host, remote_root, state_path)));
    }

    bail!("environment '{}' has no store configured", name)
}

/// Build the CDN client for an environment
fn build_cdn(env: &EnvironmentConfig) -> Box<dyn CdnClient> {
    match &env.cdn {
        Some(cdn) => Box::new(CommandCdn::new(
            cdn.display_name(),
            cdn.submit.clone(),
            cdn.status.clone(),
        )),
        None => Box::new(NullCdn::new()),
    }
}

#[allow(clippy::too_many_arguments)]
fn cmd_deploy(
    artifacts_dir: &PathBuf,
    env: Option<&str>,
    config_path: Option<&Path>,
    dry_run: bool,
    yes: bool,
    no_verify: bool,
    concurrency: Option<usize>,
    json: bool,
    verbose: u8,
) -> Result<()> {
    let config = load_config(config_path, json)?;
    let env_name = config.resolve_environment_name(env)?;
    let env_config = config.environment(&env_name)?.clone();

    let artifacts = scan_artifacts(artifacts_dir)?;

    if !json {
        println!("🚀 Skylift Deploy");
        println!("Environment: {}", env_name);
        println!("Artifacts: {} files from {}", artifacts.len(), artifacts_dir.display());
        if dry_run {
            println!("Mode: Dry run");
        }
    }

    // One deploy per environment; a held lease means another run is active.
    let state_dir = config.state_dir();
    let lease = FsLease::new(state_dir.join("leases"));
    let _lease_guard = lease.acquire(&env_name).map_err(|e| match e {
        LeaseError::Busy { environment } => {
            anyhow::Error::from(SkyliftError::EnvironmentBusy { environment })
        }
        LeaseError::Backend(message) => anyhow!("lease backend error: {}", message),
    })?;

    let store = build_store(&env_name, &env_config, &state_dir)?;
    let cdn = build_cdn(&env_config);

    let cancel = Arc::new(AtomicBool::new(false));
    {
        let cancel = cancel.clone();
        ctrlc::set_handler(move || {
            cancel.store(true, Ordering::SeqCst);
        })?;
    }

    let event_sink: Arc<dyn DeployEventSink> = if json {
        Arc::new(JsonEventSink::new())
    } else {
        Arc::new(NoopEventSink)
    };

    let use_case = DeployUseCase::new(store, cdn)
        .with_event_sink(event_sink)
        .with_cancel_flag(cancel);

    let mut options = DeployOptions::new(&env_name).with_dry_run(dry_run);
    if no_verify {
        options = options.with_verify(VerifyOptions::disabled());
    }
    if let Some(n) = concurrency {
        options = options.with_concurrency(n);
    }

    // Preview the plan before asking for confirmation.
    let plan = use_case.plan(&artifacts)?;
    if !json {
        println!(
            "\nPlan: {} uploads, {} deletes, {} unchanged",
            plan.upload_count(),
            plan.delete_count(),
            plan.skip_count()
        );
    }

    if !dry_run && !yes && !json && !plan.is_noop() && std::io::stdin().is_terminal() {
        let proceed = dialoguer::Confirm::new()
            .with_prompt(format!("Deploy to '{}'?", env_name))
            .default(true)
            .interact()?;
        if !proceed {
            return Err(SkyliftError::DeployAborted.into());
        }
    }

    let report = use_case.deploy(&artifacts, &env_config.cache, &options)?;

    if json {
        println!("{}", report.to_json());
    } else {
        print_report(&report, verbose);
    }

    if report.state != RunState::Succeeded {
        std::process::exit(report.state.exit_code());
    }
    Ok(())
}

fn print_report(report: &DeployReport, verbose: u8) {
    use skylift::application::{InvalidationOutcome, ObjectOutcome};

    println!("\n📊 Deploy Results:");
    println!("  {}", report.summary_line());

    if verbose > 0 || report.failed() > 0 {
        for (path, outcome) in &report.outcomes {
            match outcome {
                ObjectOutcome::UploadFailed { error } | ObjectOutcome::DeleteFailed { error } => {
                    println!("  ✗ {}: {}", path, error);
                }
                _ if verbose > 0 => {
                    println!("  {} {}", outcome_icon(outcome), path);
                }
                _ => {}
            }
        }
    }

    match &report.invalidation {
        InvalidationOutcome::NotNeeded => println!("Invalidation: not needed"),
        InvalidationOutcome::Submitted { id } => {
            println!("Invalidation: submitted ({}), not verified", id)
        }
        InvalidationOutcome::Completed { id } => println!("Invalidation: completed ({})", id),
        InvalidationOutcome::Unconfirmed { id, reason } => {
            println!("Invalidation: unconfirmed ({}) - {}", id, reason)
        }
        InvalidationOutcome::SubmitFailed { error } => {
            println!("Invalidation: submit failed - {}", error)
        }
    }

    let icon = match report.state {
        RunState::Succeeded => "🟢",
        RunState::PartiallyFailed => "🟡",
        RunState::Failed => "🔴",
    };
    println!("{} Result: {}", icon, report.state.as_str());
}

fn outcome_icon(outcome: &skylift::application::ObjectOutcome) -> &'static str {
    use skylift::application::ObjectOutcome;
    match outcome {
        ObjectOutcome::Uploaded => "↑",
        ObjectOutcome::Deleted => "✗",
        ObjectOutcome::Skipped => "=",
        ObjectOutcome::Cancelled => "∅",
        _ => "✗",
    }
}

fn cmd_plan(
    artifacts_dir: &PathBuf,
    env: Option<&str>,
    config_path: Option<&Path>,
    json: bool,
) -> Result<()> {
    let config = load_config(config_path, json)?;
    let env_name = config.resolve_environment_name(env)?;
    let env_config = config.environment(&env_name)?.clone();

    let artifacts = scan_artifacts(artifacts_dir)?;
    let state_dir = config.state_dir();
    let store = build_store(&env_name, &env_config, &state_dir)?;
    let cdn = build_cdn(&env_config);

    let use_case = DeployUseCase::new(store, cdn);
    let plan = use_case.plan(&artifacts)?;

    if json {
        println!("{}", plan_to_json(&env_name, &plan));
    } else {
        println!("📊 Skylift Plan");
        println!("Environment: {}", env_name);
        println!();

        for object in plan.uploads() {
            println!("  ↑ upload {}", object.path);
        }
        for object in plan.deletes() {
            println!("  ✗ delete {}", object.path);
        }
        if plan.skip_count() > 0 {
            println!("  = {} unchanged", plan.skip_count());
        }

        println!();
        println!(
            "Summary: {} uploads, {} deletes, {} unchanged",
            plan.upload_count(),
            plan.delete_count(),
            plan.skip_count()
        );
    }

    Ok(())
}

fn plan_to_json(environment: &str, plan: &DeployPlan) -> serde_json::Value {
    let collect = |iter: &mut dyn Iterator<Item = &ObjectPath>| -> Vec<String> {
        iter.map(|p| p.as_str().to_string()).collect()
    };

    serde_json::json!({
        "event": "plan",
        "environment": environment,
        "uploads": collect(&mut plan.uploads().map(|o| &o.path)),
        "deletes": collect(&mut plan.deletes().map(|o| &o.path)),
        "skips": plan.skip_count(),
    })
}

fn cmd_status(env: Option<&str>, config_path: Option<&Path>, json: bool) -> Result<()> {
    let config = load_config(config_path, json)?;
    let env_name = config.resolve_environment_name(env)?;
    let env_config = config.environment(&env_name)?.clone();

    let state_dir = config.state_dir();
    let store = build_store(&env_name, &env_config, &state_dir)?;
    let state = store
        .list()
        .map_err(|e| SkyliftError::StoreUnavailable {
            message: e.to_string(),
        })?;

    if json {
        let objects: Vec<serde_json::Value> = state
            .iter()
            .map(|(path, hash)| {
                serde_json::json!({
                    "path": path.as_str(),
                    "hash": hash.as_str(),
                })
            })
            .collect();
        println!(
            "{}",
            serde_json::json!({
                "event": "status",
                "environment": env_name,
                "store": store.display_name(),
                "objects": objects,
            })
        );
    } else {
        println!("📦 Skylift Status");
        println!("Environment: {}", env_name);
        println!("Store: {}", store.display_name());
        println!();

        if state.is_empty() {
            println!("Nothing published yet.");
        } else {
            for (path, hash) in state.iter() {
                let hex = hash.hex();
                println!("  {}  {}", &hex[..hex.len().min(12)], path);
            }
            println!();
            println!("{} objects published", state.len());
        }
    }

    Ok(())
}

fn cmd_check(config_path: Option<&Path>, json: bool) -> Result<()> {
    let config = load_config(config_path, json)?;

    let mut errors = 0usize;
    let mut results: Vec<(String, Vec<String>)> = Vec::new();

    for (name, env) in &config.environments {
        let problems = env.problems();
        errors += problems.len();
        results.push((name.clone(), problems));
    }

    if json {
        let environments: Vec<serde_json::Value> = results
            .iter()
            .map(|(name, problems)| {
                serde_json::json!({
                    "environment": name,
                    "problems": problems,
                })
            })
            .collect();
        println!(
            "{}",
            serde_json::json!({
                "event": "check",
                "environments": environments,
                "errors": errors,
                "success": errors == 0,
            })
        );
    } else {
        println!("🩺 Skylift Check");
        println!();

        if config.environments.is_empty() {
            println!("⚠ No environments configured.");
        }

        for (name, problems) in &results {
            if problems.is_empty() {
                println!("✓ {}", name);
            } else {
                for problem in problems {
                    println!("✗ {}: {}", name, problem);
                }
            }
        }

        println!();
        if errors == 0 {
            println!("🟢 Configuration looks good.");
        } else {
            println!("🔴 {} problem(s) found.", errors);
        }
    }

    if errors > 0 {
        std::process::exit(1);
    }
    Ok(())
}
