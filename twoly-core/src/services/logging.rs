//! Logging service

use crate::identity::{ConfigurationError, DiscardWarning, ResolvedIdentity};
use crate::models::LogLevel;
use tracing_subscriber::EnvFilter;

/// Crates whose events pass the level filter
const LOG_TARGETS: &[&str] = &["twoly_core", "twoly_runtime"];

/// Initialize logging with the specified level
pub fn init_logging(level: LogLevel) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let directives = LOG_TARGETS
        .iter()
        .map(|target| format!("{}={}", target, level))
        .collect::<Vec<_>>()
        .join(",");

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(directives)?)
        .with_writer(std::io::stderr)
        .try_init()
}

/// Log a credential dropped by precedence
pub fn log_discard(warning: &DiscardWarning) {
    tracing::warn!(
        kept = warning.kept.name(),
        discarded = warning.discarded.name(),
        "{}",
        warning
    );
}

/// Log the resolved identity (never the key)
pub fn log_resolution(identity: &ResolvedIdentity) {
    tracing::info!(
        mode = identity.mode().as_str(),
        tier = identity.tier().map(|t| t.as_str()),
        runtime_name = identity.runtime_name(),
        toolset_name = identity.toolset_name().unwrap_or(""),
        remote_port = identity.remote_port(),
        "Runtime identity resolved"
    );
}

/// Log a resolution failure
pub fn log_configuration_error(error: &ConfigurationError) {
    tracing::error!(error = %error, "Runtime configuration rejected");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::{resolve, RawFacts};
    use std::sync::Once;

    static INIT: Once = Once::new();

    fn init_test_logging() {
        INIT.call_once(|| {
            let _ = init_logging(LogLevel::Debug);
        });
    }

    #[test]
    fn test_logging_initialization() {
        // A second global subscriber is refused rather than panicking
        init_test_logging();
        assert!(init_logging(LogLevel::Info).is_err());
    }

    #[test]
    fn test_log_functions() {
        init_test_logging();

        let facts = RawFacts::from_pairs([("MASTER_KEY", "mk1"), ("TOOLSET_KEY", "tsk1")]);
        let resolution = resolve(facts).unwrap();
        for warning in &resolution.warnings {
            log_discard(warning);
        }
        log_resolution(&resolution.identity);
        log_configuration_error(&ConfigurationError::MissingRoleSignal);
    }
}
