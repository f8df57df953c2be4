//! Runtime identity resolution
//!
//! Decides, once per process and before any transport is opened, which role
//! the runtime plays and which single credential it authenticates with.
//!
//! collect -> apply precedence -> validate -> select mode

mod facts;
mod precedence;
mod resolved;
mod runtime_mode;
mod selection;
mod validation;

pub use facts::{RawFacts, Signal};
pub use precedence::{apply_precedence, DiscardWarning};
pub use resolved::ResolvedIdentity;
pub use runtime_mode::{CredentialTier, RuntimeMode, TransportRole};
pub use selection::{
    select_mode, RUNTIME_KEY_RUNTIME_NAME, STANDALONE_RUNTIME_NAME, TOOLSET_KEY_RUNTIME_NAME,
};
pub use validation::{validate, Credential, ValidatedFacts};

use thiserror::Error;

/// Startup misconfiguration
///
/// Every variant is fatal; the message is the complete diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("Only one of SYSTEM_KEY, WORKSPACE_KEY, TOOLSET_KEY, or RUNTIME_KEY can be set")]
    MultipleCredentials,

    #[error("SYSTEM_KEY requires RUNTIME_NAME")]
    SystemKeyRequiresRuntimeName,

    #[error("WORKSPACE_KEY requires TOOLSET_NAME")]
    WorkspaceKeyRequiresToolsetName,

    #[error("trying to start both a runtime and a toolset, this is not supported")]
    RuntimeAndToolset,

    #[error("REMOTE_PORT is mutually exclusive with TOOLSET_NAME and TOOLSET_KEY")]
    RemotePortWithToolset,

    #[error(
        "At least one of TOOLSET_NAME, TOOLSET_KEY, RUNTIME_NAME, RUNTIME_KEY, or REMOTE_PORT must be set"
    )]
    MissingRoleSignal,

    #[error("REMOTE_PORT must be a valid port number: {0}")]
    InvalidRemotePort(String),
}

/// Outcome of a successful resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub identity: ResolvedIdentity,
    /// Discarded credentials, in rule order
    pub warnings: Vec<DiscardWarning>,
}

/// Resolve raw facts into a runtime identity
pub fn resolve(facts: RawFacts) -> Result<Resolution, ConfigurationError> {
    resolve_with(facts, |_| {})
}

/// Resolve raw facts, reporting each discarded credential as it happens
///
/// Discards are reported before validation runs, so they are visible even
/// when resolution then fails.
pub fn resolve_with<F>(facts: RawFacts, mut on_discard: F) -> Result<Resolution, ConfigurationError>
where
    F: FnMut(&DiscardWarning),
{
    let (facts, warnings) = apply_precedence(facts);
    warnings.iter().for_each(&mut on_discard);

    let validated = validate(&facts)?;
    Ok(Resolution {
        identity: select_mode(validated),
        warnings,
    })
}
