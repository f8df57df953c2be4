//! Mode selection
//!
//! Maps a validated fact set to exactly one runtime mode. Validation already
//! rules out toolset/runtime and toolset/port combinations, so the branches
//! below cannot overlap.

use super::resolved::ResolvedIdentity;
use super::runtime_mode::{CredentialTier, RuntimeMode};
use super::validation::ValidatedFacts;

/// Runtime name used when only `REMOTE_PORT` is set
pub const STANDALONE_RUNTIME_NAME: &str = "standalone-mcp";
/// Runtime name used for a toolset identified only by its key
pub const TOOLSET_KEY_RUNTIME_NAME: &str = "mcp";
/// Runtime name used for an edge runtime identified only by its key
pub const RUNTIME_KEY_RUNTIME_NAME: &str = "edge";

/// Select the runtime mode and derive a runtime name where none was given
pub fn select_mode(facts: ValidatedFacts) -> ResolvedIdentity {
    let ValidatedFacts {
        credential,
        toolset_name,
        has_toolset_key,
        runtime_name,
        remote_port,
    } = facts;

    let has_runtime_key = credential
        .as_ref()
        .is_some_and(|c| c.tier() == CredentialTier::Runtime);

    let (mode, runtime_name) = if toolset_name.is_some() || has_toolset_key {
        let derived = match &toolset_name {
            Some(name) => format!("mcp:{}", name),
            None => TOOLSET_KEY_RUNTIME_NAME.to_string(),
        };
        (RuntimeMode::McpStdio, runtime_name.unwrap_or(derived))
    } else if runtime_name.is_some() || has_runtime_key {
        let mode = if remote_port.is_some() {
            RuntimeMode::EdgeMcpStream
        } else {
            RuntimeMode::Edge
        };
        let name = runtime_name.unwrap_or_else(|| RUNTIME_KEY_RUNTIME_NAME.to_string());
        (mode, name)
    } else {
        // Only REMOTE_PORT can remain once validation passed.
        (
            RuntimeMode::StandaloneMcpStream,
            STANDALONE_RUNTIME_NAME.to_string(),
        )
    };

    ResolvedIdentity {
        mode,
        credential,
        toolset_name,
        runtime_name,
        remote_port,
    }
}
