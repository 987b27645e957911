//! Integration tests for state loading across all file formats.

use lbrender::config::model::{LbMethod, LogicalConfig, Protocol, ResourceStatus};
use lbrender::config::sources::parse_config_str;
use lbrender::config::validation::validate;

fn load_example(name: &str) -> String {
    let path = format!("example/{name}");
    std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("failed to read {path}: {e}"))
}

#[test]
fn yaml_example_loads_and_validates() {
    let content = load_example("lbrender.yaml");
    let config = parse_config_str("yaml", &content, "lbrender.yaml").unwrap();
    validate(&config).unwrap();
    assert_eq!(config.members.len(), 2);
    assert_eq!(config.eligible_members().count(), 2);
}

#[test]
fn yaml_full_example_loads_and_validates() {
    let content = load_example("full.yaml");
    let config = parse_config_str("yaml", &content, "full.yaml").unwrap();
    validate(&config).unwrap();

    assert_eq!(config.vip.protocol, Protocol::Https);
    assert_eq!(config.vip.connection_limit, 8192);
    assert_eq!(config.pool.lb_method, LbMethod::LeastConnections);

    // Two of the three members are ineligible (status / admin_state_up)
    assert_eq!(config.members.len(), 3);
    assert_eq!(config.eligible_members().count(), 1);
    assert_eq!(config.members[1].status, ResourceStatus::PendingCreate);

    // The first monitor is disabled, so the HTTPS one governs
    let monitor = config.active_monitor().unwrap();
    assert_eq!(monitor.http_method, "HEAD");
    assert_eq!(monitor.expected_codes, "200-205, 301");
}

#[cfg(feature = "json")]
#[test]
fn json_example_loads_and_validates() {
    let content = load_example("lbrender.json");
    let config = parse_config_str("json", &content, "lbrender.json").unwrap();
    validate(&config).unwrap();
    assert_eq!(config.members.len(), 2);
}

#[cfg(feature = "toml")]
#[test]
fn toml_example_loads_and_validates() {
    let content = load_example("lbrender.toml");
    let config = parse_config_str("toml", &content, "lbrender.toml").unwrap();
    validate(&config).unwrap();
    assert_eq!(config.members.len(), 2);
}

#[cfg(all(feature = "json", feature = "toml"))]
#[test]
fn all_formats_produce_equivalent_configs() {
    let yaml_content = load_example("lbrender.yaml");
    let json_content = load_example("lbrender.json");
    let toml_content = load_example("lbrender.toml");

    let yaml_config = parse_config_str("yaml", &yaml_content, "yaml").unwrap();
    let json_config = parse_config_str("json", &json_content, "json").unwrap();
    let toml_config = parse_config_str("toml", &toml_content, "toml").unwrap();

    assert_eq!(yaml_config.vip.id, json_config.vip.id);
    assert_eq!(yaml_config.vip.id, toml_config.vip.id);
    assert_eq!(yaml_config.pool.id, json_config.pool.id);
    assert_eq!(yaml_config.pool.id, toml_config.pool.id);
    assert_eq!(yaml_config.members.len(), json_config.members.len());
    assert_eq!(yaml_config.members.len(), toml_config.members.len());

    // Defaults fill in the same way regardless of format
    assert_eq!(yaml_config.members[0].weight, 1);
    assert_eq!(json_config.members[0].weight, 1);
    assert_eq!(toml_config.members[0].weight, 1);
}

#[test]
fn unsupported_format_returns_error() {
    let result = parse_config_str("xml", "{}", "test.xml");
    assert!(result.is_err());
}

#[test]
fn missing_vip_fails_to_parse() {
    let incomplete = r#"{"pool": {"id": "p", "protocol": "TCP"}}"#;
    let result: Result<LogicalConfig, _> = serde_json::from_str(incomplete);
    assert!(result.is_err());
}

#[test]
fn invalid_state_fails_validation() {
    let no_bind = r#"{
        "vip": {"id": "v", "protocol": "TCP", "protocol_port": 80, "port": {}},
        "pool": {"id": "p", "protocol": "TCP"}
    }"#;
    let config: LogicalConfig = serde_json::from_str(no_bind).unwrap();
    assert!(validate(&config).is_err());
}

#[tokio::test]
async fn file_source_detects_content_changes() {
    use lbrender::config::sources::source_for_path;
    use lbrender::config::ConfigSource;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.yaml");
    std::fs::copy("example/lbrender.yaml", &path).unwrap();

    let source = source_for_path(&path).unwrap();
    assert_eq!(source.name(), "yaml");

    let (config, version) = source.load().await.unwrap();
    assert_eq!(config.members.len(), 2);
    assert!(!source.has_changed(&version).await.unwrap());

    let mut content = std::fs::read_to_string(&path).unwrap();
    content.push_str("\nhealthmonitors: []\n");
    std::fs::write(&path, content).unwrap();
    assert!(source.has_changed(&version).await.unwrap());
}

#[tokio::test]
async fn file_source_rejects_invalid_state() {
    use lbrender::config::sources::source_for_path;
    use lbrender::error::LbrenderError;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.yaml");
    std::fs::write(
        &path,
        "vip:\n  id: v\n  protocol: TCP\n  protocol_port: 80\n  port: {}\npool:\n  id: p\n  protocol: TCP\n",
    )
    .unwrap();

    let source = source_for_path(&path).unwrap();
    let err = source.load().await.unwrap_err();
    assert!(matches!(err, LbrenderError::StateValidation { .. }));
}

#[tokio::test]
async fn missing_state_file_is_reported() {
    use lbrender::config::sources::source_for_path;
    use lbrender::error::LbrenderError;

    let dir = tempfile::tempdir().unwrap();
    let source = source_for_path(&dir.path().join("absent.yaml")).unwrap();
    let err = source.load().await.unwrap_err();
    assert!(matches!(err, LbrenderError::StateFileNotFound { .. }));
}

#[test]
fn unrecognized_lb_method_is_preserved() {
    let content = r#"{
        "vip": {"id": "v", "protocol": "TCP", "protocol_port": 80,
                "port": {"fixed_ips": [{"ip_address": "10.0.0.5"}]}},
        "pool": {"id": "p", "protocol": "TCP", "lb_method": "WEIGHTED_FASTEST"}
    }"#;
    let config: LogicalConfig = serde_json::from_str(content).unwrap();
    validate(&config).unwrap();
    assert_eq!(config.pool.lb_method.as_str(), "WEIGHTED_FASTEST");
}
