//! Credential precedence
//!
//! When a more specific credential is present, broader credentials inherited
//! from a shared environment are dropped. Every rule is evaluated against the
//! incoming facts, so no rule can mask another.

use super::facts::{RawFacts, Signal};
use serde::{Deserialize, Serialize};
use std::fmt;

/// `(kept, discarded)` pairs, in evaluation order
const PRECEDENCE_RULES: [(Signal, Signal); 3] = [
    (Signal::ToolsetKey, Signal::MasterKey),
    (Signal::RuntimeKey, Signal::SystemKey),
    (Signal::WorkspaceKey, Signal::SystemKey),
];

/// A credential dropped in favour of a more specific one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscardWarning {
    pub kept: Signal,
    pub discarded: Signal,
}

impl fmt::Display for DiscardWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} provided -> ignoring {}", self.kept, self.discarded)
    }
}

/// Drop less specific credentials
///
/// Returns the remaining facts and one warning per rule that actually
/// discarded a value.
pub fn apply_precedence(facts: RawFacts) -> (RawFacts, Vec<DiscardWarning>) {
    let mut resolved = facts.clone();
    let mut warnings = Vec::new();

    for (kept, discarded) in PRECEDENCE_RULES {
        if facts.is_set(kept) && facts.is_set(discarded) {
            resolved.clear(discarded);
            warnings.push(DiscardWarning { kept, discarded });
        }
    }

    (resolved, warnings)
}
