//! Consistency validation
//!
//! Checks run in a fixed order and the first violation is returned.

use super::facts::{RawFacts, Signal};
use super::runtime_mode::CredentialTier;
use super::ConfigurationError;
use std::fmt;

const TOOLSET_SIGNALS: [Signal; 2] = [Signal::ToolsetName, Signal::ToolsetKey];
const RUNTIME_SIGNALS: [Signal; 2] = [Signal::RuntimeName, Signal::RuntimeKey];
const ROLE_SIGNALS: [Signal; 5] = [
    Signal::ToolsetName,
    Signal::ToolsetKey,
    Signal::RuntimeName,
    Signal::RuntimeKey,
    Signal::RemotePort,
];

/// The single credential that survived precedence and validation
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    tier: CredentialTier,
    key: String,
}

impl Credential {
    pub fn tier(&self) -> CredentialTier {
        self.tier
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("tier", &self.tier)
            .field("key", &"<redacted>")
            .finish()
    }
}

/// Facts that passed every consistency check
///
/// Only [`validate`] constructs this, so mode selection never sees an
/// inconsistent fact set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedFacts {
    pub(crate) credential: Option<Credential>,
    pub(crate) toolset_name: Option<String>,
    pub(crate) has_toolset_key: bool,
    pub(crate) runtime_name: Option<String>,
    pub(crate) remote_port: Option<u16>,
}

/// Validate post-precedence facts
pub fn validate(facts: &RawFacts) -> Result<ValidatedFacts, ConfigurationError> {
    let credentials: Vec<CredentialTier> = CredentialTier::ALL
        .into_iter()
        .filter(|tier| facts.is_set(tier.signal()))
        .collect();
    if credentials.len() > 1 {
        return Err(ConfigurationError::MultipleCredentials);
    }

    if facts.is_set(Signal::SystemKey) && !facts.is_set(Signal::RuntimeName) {
        return Err(ConfigurationError::SystemKeyRequiresRuntimeName);
    }

    if facts.is_set(Signal::WorkspaceKey) && !facts.is_set(Signal::ToolsetName) {
        return Err(ConfigurationError::WorkspaceKeyRequiresToolsetName);
    }

    let any_toolset = any_set(facts, &TOOLSET_SIGNALS);
    if any_set(facts, &RUNTIME_SIGNALS) && any_toolset {
        return Err(ConfigurationError::RuntimeAndToolset);
    }

    if facts.is_set(Signal::RemotePort) && any_toolset {
        return Err(ConfigurationError::RemotePortWithToolset);
    }

    if !any_set(facts, &ROLE_SIGNALS) {
        return Err(ConfigurationError::MissingRoleSignal);
    }

    let remote_port = facts.remote_port.as_deref().map(parse_port).transpose()?;

    let credential = credentials.first().and_then(|tier| {
        facts.get(tier.signal()).map(|key| Credential {
            tier: *tier,
            key: key.to_string(),
        })
    });

    Ok(ValidatedFacts {
        credential,
        toolset_name: facts.toolset_name.clone(),
        has_toolset_key: facts.is_set(Signal::ToolsetKey),
        runtime_name: facts.runtime_name.clone(),
        remote_port,
    })
}

fn any_set(facts: &RawFacts, signals: &[Signal]) -> bool {
    signals.iter().any(|signal| facts.is_set(*signal))
}

fn parse_port(value: &str) -> Result<u16, ConfigurationError> {
    match value.trim().parse::<u16>() {
        Ok(port) if port > 0 => Ok(port),
        _ => Err(ConfigurationError::InvalidRemotePort(value.to_string())),
    }
}
