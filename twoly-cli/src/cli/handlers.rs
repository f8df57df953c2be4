//! CLI command handlers

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::env;
use std::path::PathBuf;
use twoly_core::identity::{self, RawFacts, ResolvedIdentity, Signal, TransportRole};
use twoly_core::models::{EnvFile, RuntimeSettings, LOG_LEVEL, NATS_SERVERS};
use twoly_core::services::logging;

/// JSON document printed by `resolve --json`
#[derive(Debug, Serialize)]
struct ResolveReport<'a> {
    identity: &'a ResolvedIdentity,
    transports: &'static [TransportRole],
    warnings: Vec<String>,
    workspace_id: Option<&'a str>,
    nats_servers: &'a str,
    resolved_at: DateTime<Utc>,
}

/// Handle the 'resolve' command
pub fn handle_resolve(env_file: Option<PathBuf>, json: bool) -> Result<()> {
    let file = load_env_file(env_file)?;
    let lookup = file.overlay(|name| env::var(name).ok());
    let facts = RawFacts::from_lookup(&lookup);
    let settings = RuntimeSettings::from_lookup(&lookup);

    // Another subscriber may already be installed by an embedding process.
    let _ = logging::init_logging(settings.log_level());

    let resolution = identity::resolve_with(facts, logging::log_discard).map_err(|e| {
        logging::log_configuration_error(&e);
        e
    })?;

    if let Err(errors) = settings.validate() {
        anyhow::bail!("Invalid runtime settings: {}", errors.join("; "));
    }
    if settings.workspace_id.is_none() {
        tracing::warn!("WORKSPACE_ID is not set");
    }

    let identity = &resolution.identity;
    logging::log_resolution(identity);

    if json {
        let report = ResolveReport {
            identity,
            transports: identity.transports(),
            warnings: resolution.warnings.iter().map(ToString::to_string).collect(),
            workspace_id: settings.workspace_id.as_deref(),
            nats_servers: &settings.nats_servers,
            resolved_at: Utc::now(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("mode:          {}", identity.mode());
    println!("runtime name:  {}", identity.runtime_name());
    if let Some(toolset) = identity.toolset_name() {
        println!("toolset name:  {}", toolset);
    }
    match identity.tier() {
        Some(tier) => println!("credential:    {} key (redacted)", tier),
        None => println!("credential:    none"),
    }
    if let Some(port) = identity.remote_port() {
        println!("remote port:   {}", port);
    }
    let transports: Vec<&str> = identity.transports().iter().map(|t| t.as_str()).collect();
    println!("transports:    {}", transports.join(", "));
    for warning in &resolution.warnings {
        println!("warning:       {}", warning);
    }

    Ok(())
}

/// Handle the 'signals' command
///
/// Reports where each signal comes from without printing any value.
pub fn handle_signals(env_file: Option<PathBuf>) -> Result<()> {
    let file = load_env_file(env_file)?;

    let names = Signal::ALL
        .iter()
        .map(|signal| signal.name())
        .chain([NATS_SERVERS, LOG_LEVEL]);

    println!("signal\tsource");
    for name in names {
        let from_env = env::var(name).map(|v| !v.is_empty()).unwrap_or(false);
        let source = if from_env {
            "env"
        } else if file.get(name).is_some_and(|v| !v.is_empty()) {
            "file"
        } else {
            "unset"
        };
        println!("{}\t{}", name, source);
    }
    Ok(())
}

/// Handle the 'config --init' command
pub fn handle_config_init(env_file: Option<PathBuf>) -> Result<()> {
    let path = match env_file {
        Some(path) => path,
        None => EnvFile::default_path()?,
    };
    EnvFile::write_template(&path)?;
    println!("Wrote env file template to {}", path.display());
    Ok(())
}

fn load_env_file(env_file: Option<PathBuf>) -> Result<EnvFile> {
    let path = match env_file {
        Some(path) => path,
        None => match EnvFile::default_path() {
            Ok(path) => path,
            Err(_) => return Ok(EnvFile::default()),
        },
    };
    EnvFile::load_from_file(&path)
        .with_context(|| format!("Failed to load env file {}", path.display()))
}
