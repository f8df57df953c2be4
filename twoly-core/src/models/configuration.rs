//! Ambient runtime settings
//!
//! Values the runtime reads next to its identity signals but which play no
//! part in mode resolution.

use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::str::FromStr;
use url::Url;

/// Message bus address used when `NATS_SERVERS` is not set
pub const DEFAULT_NATS_SERVERS: &str = "nats://localhost:4222";

pub const NATS_SERVERS: &str = "NATS_SERVERS";
pub const LOG_LEVEL: &str = "LOG_LEVEL";

const NATS_SCHEMES: &[&str] = &["nats", "tls", "ws", "wss"];

/// Logging level configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum LogLevel {
    #[serde(rename = "error")]
    Error,
    #[serde(rename = "warn")]
    Warn,
    #[serde(rename = "info")]
    #[default]
    Info,
    #[serde(rename = "debug")]
    Debug,
    #[serde(rename = "trace")]
    Trace,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "error" => Ok(LogLevel::Error),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            "trace" => Ok(LogLevel::Trace),
            other => Err(format!("unknown log level '{}'", other)),
        }
    }
}

/// Settings collected alongside the identity facts
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuntimeSettings {
    /// Workspace the runtime belongs to, consumed downstream
    pub workspace_id: Option<String>,
    /// Comma-separated message bus URLs
    pub nats_servers: String,
    /// Raw `LOG_LEVEL` value, if any
    pub log_level: Option<String>,
}

impl Default for RuntimeSettings {
    fn default() -> Self {
        Self {
            workspace_id: None,
            nats_servers: DEFAULT_NATS_SERVERS.to_string(),
            log_level: None,
        }
    }
}

impl RuntimeSettings {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| lookup(name).filter(|v| !v.is_empty());
        Self {
            workspace_id: read("WORKSPACE_ID"),
            nats_servers: read(NATS_SERVERS).unwrap_or_else(|| DEFAULT_NATS_SERVERS.to_string()),
            log_level: read(LOG_LEVEL),
        }
    }

    /// Effective log level, falling back to the default on bad input
    pub fn log_level(&self) -> LogLevel {
        self.log_level
            .as_deref()
            .and_then(|raw| raw.parse().ok())
            .unwrap_or_default()
    }

    /// Parsed message bus URLs
    pub fn nats_server_urls(&self) -> Result<Vec<Url>, String> {
        self.nats_servers
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|raw| {
                let url = Url::parse(raw).map_err(|e| format!("{}: {}", raw, e))?;
                if NATS_SCHEMES.contains(&url.scheme()) {
                    Ok(url)
                } else {
                    Err(format!("{}: unsupported scheme '{}'", raw, url.scheme()))
                }
            })
            .collect()
    }

    /// Validate settings values
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        match self.nats_server_urls() {
            Ok(urls) if urls.is_empty() => {
                errors.push("NATS_SERVERS must list at least one server".to_string())
            }
            Ok(_) => {}
            Err(e) => errors.push(format!("NATS_SERVERS contains an invalid URL ({})", e)),
        }

        if let Some(raw) = &self.log_level {
            if let Err(e) = raw.parse::<LogLevel>() {
                errors.push(format!("LOG_LEVEL is invalid: {}", e));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
