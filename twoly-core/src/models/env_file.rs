//! Runtime env file
//!
//! A TOML file holding fallback values for the runtime's signals, keyed by
//! the exact signal names. Values from the real environment always win.

use super::configuration::{LOG_LEVEL, NATS_SERVERS};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EnvFileError {
    #[error("failed to read env file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse env file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("env file already exists: {0}")]
    AlreadyExists(PathBuf),

    #[error("could not determine config directory")]
    NoConfigDir,
}

/// Fallback values for runtime signals
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "SCREAMING_SNAKE_CASE")]
pub struct EnvFile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workspace_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub toolset_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub runtime_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub master_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub toolset_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub runtime_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote_port: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workspace_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nats_servers: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
}

const TEMPLATE: &str = r#"# 2ly runtime env file
#
# Fallback values for runtime signals. Variables set in the process
# environment take precedence over anything in this file.

# Workspace the runtime belongs to
# WORKSPACE_ID = ""

# Exactly one credential. SYSTEM_KEY and MASTER_KEY are dropped when a more
# specific key is present.
# SYSTEM_KEY = ""
# WORKSPACE_KEY = ""
# TOOLSET_KEY = ""
# RUNTIME_KEY = ""

# Role: a toolset (stdio) or a runtime (edge), optionally serving MCP on a port
# TOOLSET_NAME = ""
# RUNTIME_NAME = ""
# REMOTE_PORT = "3000"

# NATS_SERVERS = "nats://localhost:4222"
# LOG_LEVEL = "info"
"#;

impl EnvFile {
    /// Load an env file, returning an empty one if the file does not exist
    pub fn load_from_file(path: &Path) -> Result<Self, EnvFileError> {
        if !path.exists() {
            return Ok(EnvFile::default());
        }
        let content = std::fs::read_to_string(path).map_err(|source| EnvFileError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| EnvFileError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Write a commented template, refusing to overwrite an existing file
    pub fn write_template(path: &Path) -> Result<(), EnvFileError> {
        if path.exists() {
            return Err(EnvFileError::AlreadyExists(path.to_path_buf()));
        }
        let io_err = |source: std::io::Error| EnvFileError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        std::fs::write(path, TEMPLATE).map_err(io_err)
    }

    /// `<config dir>/2ly/runtime.toml`
    pub fn default_path() -> Result<PathBuf, EnvFileError> {
        let config_dir = dirs::config_dir().ok_or(EnvFileError::NoConfigDir)?;
        Ok(config_dir.join("2ly").join("runtime.toml"))
    }

    /// Value for a signal name
    pub fn get(&self, name: &str) -> Option<&str> {
        let value = match name {
            "SYSTEM_KEY" => &self.system_key,
            "WORKSPACE_KEY" => &self.workspace_key,
            "TOOLSET_KEY" => &self.toolset_key,
            "RUNTIME_KEY" => &self.runtime_key,
            "MASTER_KEY" => &self.master_key,
            "TOOLSET_NAME" => &self.toolset_name,
            "RUNTIME_NAME" => &self.runtime_name,
            "REMOTE_PORT" => &self.remote_port,
            "WORKSPACE_ID" => &self.workspace_id,
            NATS_SERVERS => &self.nats_servers,
            LOG_LEVEL => &self.log_level,
            _ => return None,
        };
        value.as_deref()
    }

    /// Layer this file under another lookup
    ///
    /// An empty value from `lookup` counts as unset and falls through to
    /// the file.
    pub fn overlay<'a, F>(&'a self, lookup: F) -> impl Fn(&str) -> Option<String> + 'a
    where
        F: Fn(&str) -> Option<String> + 'a,
    {
        move |name: &str| {
            lookup(name)
                .filter(|v| !v.is_empty())
                .or_else(|| self.get(name).map(str::to_string))
        }
    }
}
