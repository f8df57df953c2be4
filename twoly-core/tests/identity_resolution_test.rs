use twoly_core::identity::{
    resolve, ConfigurationError, CredentialTier, RawFacts, Resolution, RuntimeMode, Signal,
    TransportRole,
};

fn resolve_pairs(pairs: &[(&str, &str)]) -> Result<Resolution, ConfigurationError> {
    resolve(RawFacts::from_pairs(pairs.iter().copied()))
}

fn error_message(pairs: &[(&str, &str)]) -> String {
    resolve_pairs(pairs)
        .expect_err("resolution should fail")
        .to_string()
}

#[test]
fn toolset_name_runs_mcp_stdio() {
    let resolution =
        resolve_pairs(&[("TOOLSET_NAME", "filesystem"), ("WORKSPACE_ID", "ws1")]).unwrap();

    let identity = &resolution.identity;
    assert_eq!(identity.mode(), RuntimeMode::McpStdio);
    assert_eq!(identity.runtime_name(), "mcp:filesystem");
    assert_eq!(identity.transports(), &[TransportRole::McpStdio]);
    assert!(resolution.warnings.is_empty());
}

#[test]
fn toolset_and_runtime_name_conflict() {
    assert_eq!(
        error_message(&[
            ("TOOLSET_NAME", "filesystem"),
            ("RUNTIME_NAME", "edge-runtime"),
            ("WORKSPACE_ID", "ws1"),
        ]),
        "trying to start both a runtime and a toolset, this is not supported"
    );
}

#[test]
fn toolset_key_with_remote_port_rejected() {
    assert_eq!(
        error_message(&[("TOOLSET_KEY", "tsk_1"), ("REMOTE_PORT", "3000")]),
        "REMOTE_PORT is mutually exclusive with TOOLSET_NAME and TOOLSET_KEY"
    );
}

#[test]
fn runtime_name_runs_edge() {
    let resolution = resolve_pairs(&[("RUNTIME_NAME", "edge-1"), ("WORKSPACE_ID", "ws1")]).unwrap();
    assert_eq!(resolution.identity.mode(), RuntimeMode::Edge);
    assert_eq!(resolution.identity.runtime_name(), "edge-1");
}

#[test]
fn runtime_name_with_port_runs_edge_mcp_stream() {
    let resolution = resolve_pairs(&[
        ("RUNTIME_NAME", "edge-2"),
        ("REMOTE_PORT", "3001"),
        ("WORKSPACE_ID", "ws1"),
    ])
    .unwrap();

    let identity = &resolution.identity;
    assert_eq!(identity.mode(), RuntimeMode::EdgeMcpStream);
    assert_eq!(identity.remote_port(), Some(3001));
    assert_eq!(
        identity.transports(),
        &[TransportRole::Edge, TransportRole::McpStream]
    );
}

#[test]
fn port_only_runs_standalone_mcp_stream() {
    let resolution = resolve_pairs(&[("REMOTE_PORT", "3002"), ("WORKSPACE_ID", "ws1")]).unwrap();

    let identity = &resolution.identity;
    assert_eq!(identity.mode(), RuntimeMode::StandaloneMcpStream);
    assert_eq!(identity.runtime_name(), "standalone-mcp");
    assert_eq!(identity.remote_port(), Some(3002));
}

#[test]
fn workspace_id_alone_is_not_enough() {
    assert_eq!(
        error_message(&[("WORKSPACE_ID", "ws1")]),
        "At least one of TOOLSET_NAME, TOOLSET_KEY, RUNTIME_NAME, RUNTIME_KEY, or REMOTE_PORT must be set"
    );
}

#[test]
fn master_key_discarded_for_toolset_key() {
    let resolution = resolve_pairs(&[("MASTER_KEY", "mk1"), ("TOOLSET_KEY", "tsk1")]).unwrap();

    assert_eq!(resolution.identity.mode(), RuntimeMode::McpStdio);
    assert_eq!(resolution.identity.tier(), Some(CredentialTier::Toolset));
    assert_eq!(resolution.identity.key(), Some("tsk1"));
    assert_eq!(resolution.warnings.len(), 1);
    assert_eq!(
        resolution.warnings[0].to_string(),
        "TOOLSET_KEY provided -> ignoring MASTER_KEY"
    );
}

#[test]
fn system_key_discarded_for_runtime_key() {
    let resolution = resolve_pairs(&[("SYSTEM_KEY", "sk1"), ("RUNTIME_KEY", "rtk1")]).unwrap();

    assert_eq!(resolution.identity.tier(), Some(CredentialTier::Runtime));
    assert_eq!(resolution.identity.key(), Some("rtk1"));
    assert_eq!(resolution.identity.mode(), RuntimeMode::Edge);
    assert_eq!(
        resolution.warnings[0].to_string(),
        "RUNTIME_KEY provided -> ignoring SYSTEM_KEY"
    );
}

#[test]
fn workspace_key_requires_toolset_name() {
    assert_eq!(
        error_message(&[("WORKSPACE_KEY", "wsk1")]),
        "WORKSPACE_KEY requires TOOLSET_NAME"
    );
}

#[test]
fn workspace_and_toolset_keys_conflict() {
    assert_eq!(
        error_message(&[
            ("WORKSPACE_KEY", "wsk1"),
            ("TOOLSET_KEY", "tsk1"),
            ("TOOLSET_NAME", "t1"),
        ]),
        "Only one of SYSTEM_KEY, WORKSPACE_KEY, TOOLSET_KEY, or RUNTIME_KEY can be set"
    );
}

#[test]
fn system_key_with_runtime_name_carries_system_tier() {
    let resolution = resolve_pairs(&[("SYSTEM_KEY", "sk1"), ("RUNTIME_NAME", "edge-1")]).unwrap();
    assert_eq!(resolution.identity.tier(), Some(CredentialTier::System));
    assert_eq!(resolution.identity.mode(), RuntimeMode::Edge);
}

#[test]
fn workspace_key_with_toolset_name_carries_workspace_tier() {
    let resolution =
        resolve_pairs(&[("WORKSPACE_KEY", "wsk1"), ("TOOLSET_NAME", "fs")]).unwrap();
    assert_eq!(resolution.identity.tier(), Some(CredentialTier::Workspace));
    assert_eq!(resolution.identity.mode(), RuntimeMode::McpStdio);
}

#[test]
fn explicit_runtime_name_is_never_replaced() {
    let resolution = resolve_pairs(&[("RUNTIME_NAME", "standalone"), ("REMOTE_PORT", "9000")])
        .unwrap();
    assert_eq!(resolution.identity.runtime_name(), "standalone");
    assert_eq!(resolution.identity.mode(), RuntimeMode::EdgeMcpStream);
}

#[test]
fn resolution_is_deterministic() {
    let combos: Vec<Vec<(&str, &str)>> = vec![
        vec![("TOOLSET_NAME", "fs"), ("MASTER_KEY", "mk")],
        vec![("SYSTEM_KEY", "sk"), ("WORKSPACE_KEY", "wsk"), ("TOOLSET_NAME", "fs")],
        vec![("REMOTE_PORT", "3002")],
        vec![("RUNTIME_KEY", "rtk"), ("TOOLSET_KEY", "tsk")],
        vec![],
    ];

    for pairs in combos {
        assert_eq!(resolve_pairs(&pairs), resolve_pairs(&pairs));
    }
}

/// Every combination of the recognized signals resolves to one mode with at
/// most one surviving credential, or fails.
#[test]
fn at_most_one_credential_survives_any_combination() {
    let signals = [
        Signal::SystemKey,
        Signal::WorkspaceKey,
        Signal::ToolsetKey,
        Signal::RuntimeKey,
        Signal::MasterKey,
        Signal::ToolsetName,
        Signal::RuntimeName,
        Signal::RemotePort,
    ];

    for mask in 0u32..(1 << signals.len()) {
        let pairs: Vec<(&str, &str)> = signals
            .iter()
            .enumerate()
            .filter(|(i, _)| mask & (1 << i) != 0)
            .map(|(_, signal)| {
                let value = if *signal == Signal::RemotePort { "3000" } else { "x" };
                (signal.name(), value)
            })
            .collect();

        let facts = RawFacts::from_pairs(pairs.iter().copied());
        let Ok(resolution) = resolve(facts.clone()) else {
            continue;
        };
        let identity = resolution.identity;

        if let Some(tier) = identity.tier() {
            assert!(facts.is_set(tier.signal()), "mask {:#b}", mask);
        }
        if identity.mode().serves_stream() {
            assert!(identity.remote_port().is_some(), "mask {:#b}", mask);
        }
        if identity.mode() == RuntimeMode::McpStdio {
            assert!(!facts.is_set(Signal::RemotePort), "mask {:#b}", mask);
            assert!(!facts.is_set(Signal::RuntimeName), "mask {:#b}", mask);
        }
        assert!(!identity.runtime_name().is_empty());
    }
}
