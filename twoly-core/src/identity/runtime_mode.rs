//! Runtime modes and credential tiers

use super::facts::Signal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Operating role of the runtime process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RuntimeMode {
    /// Expose a single toolset over standard I/O
    McpStdio,
    /// Register on the message bus as a named edge runtime
    Edge,
    /// Edge runtime that also serves MCP over a network stream
    EdgeMcpStream,
    /// Serve MCP over a network stream without edge registration
    StandaloneMcpStream,
}

/// Transport role the bootstrap layer constructs for a mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TransportRole {
    McpStdio,
    Edge,
    McpStream,
}

impl RuntimeMode {
    pub fn as_str(self) -> &'static str {
        match self {
            RuntimeMode::McpStdio => "MCP_STDIO",
            RuntimeMode::Edge => "EDGE",
            RuntimeMode::EdgeMcpStream => "EDGE_MCP_STREAM",
            RuntimeMode::StandaloneMcpStream => "STANDALONE_MCP_STREAM",
        }
    }

    /// Transports to construct, in start-up order
    pub fn transports(self) -> &'static [TransportRole] {
        match self {
            RuntimeMode::McpStdio => &[TransportRole::McpStdio],
            RuntimeMode::Edge => &[TransportRole::Edge],
            RuntimeMode::EdgeMcpStream => &[TransportRole::Edge, TransportRole::McpStream],
            RuntimeMode::StandaloneMcpStream => &[TransportRole::McpStream],
        }
    }

    /// Whether the mode listens on `REMOTE_PORT`
    pub fn serves_stream(self) -> bool {
        self.transports().contains(&TransportRole::McpStream)
    }
}

impl fmt::Display for RuntimeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TransportRole {
    pub fn as_str(self) -> &'static str {
        match self {
            TransportRole::McpStdio => "mcp-stdio",
            TransportRole::Edge => "edge",
            TransportRole::McpStream => "mcp-stream",
        }
    }
}

impl fmt::Display for TransportRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Authentication scope of a credential
///
/// Ordered by increasing specificity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CredentialTier {
    System,
    Workspace,
    Toolset,
    Runtime,
}

impl CredentialTier {
    pub const ALL: [CredentialTier; 4] = [
        CredentialTier::System,
        CredentialTier::Workspace,
        CredentialTier::Toolset,
        CredentialTier::Runtime,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CredentialTier::System => "system",
            CredentialTier::Workspace => "workspace",
            CredentialTier::Toolset => "toolset",
            CredentialTier::Runtime => "runtime",
        }
    }

    /// Signal carrying this tier's key
    pub fn signal(self) -> Signal {
        match self {
            CredentialTier::System => Signal::SystemKey,
            CredentialTier::Workspace => Signal::WorkspaceKey,
            CredentialTier::Toolset => Signal::ToolsetKey,
            CredentialTier::Runtime => Signal::RuntimeKey,
        }
    }
}

impl fmt::Display for CredentialTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
