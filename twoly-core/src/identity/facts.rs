//! Fact collection
//!
//! Reads the recognized identity signals once, at process start. The only
//! interpretation applied here is the presence test: a signal is set iff its
//! value is a non-empty string.

use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;

/// Named configuration signals recognized by identity resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Signal {
    SystemKey,
    WorkspaceKey,
    ToolsetKey,
    RuntimeKey,
    /// Legacy credential, only ever discarded
    MasterKey,
    ToolsetName,
    RuntimeName,
    RemotePort,
    WorkspaceId,
}

impl Signal {
    /// Every recognized signal, in collection order
    pub const ALL: [Signal; 9] = [
        Signal::SystemKey,
        Signal::WorkspaceKey,
        Signal::ToolsetKey,
        Signal::RuntimeKey,
        Signal::MasterKey,
        Signal::ToolsetName,
        Signal::RuntimeName,
        Signal::RemotePort,
        Signal::WorkspaceId,
    ];

    /// Environment variable name of the signal
    pub fn name(self) -> &'static str {
        match self {
            Signal::SystemKey => "SYSTEM_KEY",
            Signal::WorkspaceKey => "WORKSPACE_KEY",
            Signal::ToolsetKey => "TOOLSET_KEY",
            Signal::RuntimeKey => "RUNTIME_KEY",
            Signal::MasterKey => "MASTER_KEY",
            Signal::ToolsetName => "TOOLSET_NAME",
            Signal::RuntimeName => "RUNTIME_NAME",
            Signal::RemotePort => "REMOTE_PORT",
            Signal::WorkspaceId => "WORKSPACE_ID",
        }
    }

    /// Whether the signal carries secret key material
    pub fn is_secret(self) -> bool {
        matches!(
            self,
            Signal::SystemKey
                | Signal::WorkspaceKey
                | Signal::ToolsetKey
                | Signal::RuntimeKey
                | Signal::MasterKey
        )
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Raw identity facts as read from the environment
///
/// Absent and empty values are both `None`. Whitespace-only values are kept
/// as set; they fail later, at authentication.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct RawFacts {
    pub system_key: Option<String>,
    pub workspace_key: Option<String>,
    pub toolset_key: Option<String>,
    pub runtime_key: Option<String>,
    pub master_key: Option<String>,
    pub toolset_name: Option<String>,
    pub runtime_name: Option<String>,
    pub remote_port: Option<String>,
    pub workspace_id: Option<String>,
}

impl RawFacts {
    /// Collect facts from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Collect facts through an arbitrary lookup keyed by signal name
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut facts = RawFacts::default();
        for signal in Signal::ALL {
            *facts.slot_mut(signal) = present(lookup(signal.name()));
        }
        facts
    }

    /// Collect facts from name/value pairs, later pairs overriding earlier ones
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut facts = RawFacts::default();
        for (name, value) in pairs {
            if let Some(signal) = Signal::ALL.iter().find(|s| s.name() == name.as_ref()) {
                *facts.slot_mut(*signal) = present(Some(value.into()));
            }
        }
        facts
    }

    /// Value of a signal, if set
    pub fn get(&self, signal: Signal) -> Option<&str> {
        self.slot(signal).as_deref()
    }

    /// Whether a signal is set
    pub fn is_set(&self, signal: Signal) -> bool {
        self.slot(signal).is_some()
    }

    /// Clear a signal, returning its previous value
    pub(crate) fn clear(&mut self, signal: Signal) -> Option<String> {
        self.slot_mut(signal).take()
    }

    fn slot(&self, signal: Signal) -> &Option<String> {
        match signal {
            Signal::SystemKey => &self.system_key,
            Signal::WorkspaceKey => &self.workspace_key,
            Signal::ToolsetKey => &self.toolset_key,
            Signal::RuntimeKey => &self.runtime_key,
            Signal::MasterKey => &self.master_key,
            Signal::ToolsetName => &self.toolset_name,
            Signal::RuntimeName => &self.runtime_name,
            Signal::RemotePort => &self.remote_port,
            Signal::WorkspaceId => &self.workspace_id,
        }
    }

    fn slot_mut(&mut self, signal: Signal) -> &mut Option<String> {
        match signal {
            Signal::SystemKey => &mut self.system_key,
            Signal::WorkspaceKey => &mut self.workspace_key,
            Signal::ToolsetKey => &mut self.toolset_key,
            Signal::RuntimeKey => &mut self.runtime_key,
            Signal::MasterKey => &mut self.master_key,
            Signal::ToolsetName => &mut self.toolset_name,
            Signal::RuntimeName => &mut self.runtime_name,
            Signal::RemotePort => &mut self.remote_port,
            Signal::WorkspaceId => &mut self.workspace_id,
        }
    }
}

// Key material never reaches logs through Debug.
impl fmt::Debug for RawFacts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut dbg = f.debug_struct("RawFacts");
        for signal in Signal::ALL {
            let value = match self.get(signal) {
                Some(_) if signal.is_secret() => Some("<redacted>"),
                other => other,
            };
            dbg.field(signal.name(), &value);
        }
        dbg.finish()
    }
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
