//! Resolved runtime identity

use super::runtime_mode::{CredentialTier, RuntimeMode, TransportRole};
use super::validation::Credential;
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

/// The single identity and mode a runtime process carries
///
/// Built once by [`super::resolve`] and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedIdentity {
    pub(crate) mode: RuntimeMode,
    pub(crate) credential: Option<Credential>,
    pub(crate) toolset_name: Option<String>,
    pub(crate) runtime_name: String,
    pub(crate) remote_port: Option<u16>,
}

impl ResolvedIdentity {
    pub fn mode(&self) -> RuntimeMode {
        self.mode
    }

    pub fn tier(&self) -> Option<CredentialTier> {
        self.credential.as_ref().map(Credential::tier)
    }

    /// Key material of the surviving credential
    pub fn key(&self) -> Option<&str> {
        self.credential.as_ref().map(Credential::key)
    }

    pub fn toolset_name(&self) -> Option<&str> {
        self.toolset_name.as_deref()
    }

    /// Explicit or derived runtime name
    pub fn runtime_name(&self) -> &str {
        &self.runtime_name
    }

    pub fn remote_port(&self) -> Option<u16> {
        self.remote_port
    }

    pub fn transports(&self) -> &'static [TransportRole] {
        self.mode.transports()
    }
}

// Serialized form is for diagnostics; the key is never written out.
impl Serialize for ResolvedIdentity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ResolvedIdentity", 6)?;
        state.serialize_field("mode", &self.mode)?;
        state.serialize_field("tier", &self.tier())?;
        state.serialize_field("key", &self.key().map(|_| "<redacted>"))?;
        state.serialize_field("toolset_name", &self.toolset_name)?;
        state.serialize_field("runtime_name", &self.runtime_name)?;
        state.serialize_field("remote_port", &self.remote_port)?;
        state.end()
    }
}
