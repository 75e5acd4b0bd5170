//! Node config and genesis loading

use bloomex_cli::config::{load_config, load_genesis, ConfigError, NodeConfig, DEFAULT_TGE};
use bloomex_economics::constants::TOTAL_SUPPLY;
use bloomex_economics::{BucketKind, GenesisConfig};
use std::io::Write;
use tempfile::NamedTempFile;

fn write_temp(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_full_config() {
    let file = write_temp(
        r#"
[node]
listen_addr = "0.0.0.0:8080"
admin_token = "secret"
tge = 1800000000

[logging]
level = "debug"
"#,
    );

    let config = load_config(file.path()).unwrap();
    assert_eq!(config.node.listen_addr, "0.0.0.0:8080");
    assert_eq!(config.node.admin_token.as_deref(), Some("secret"));
    assert_eq!(config.node.tge, Some(1_800_000_000));
    assert_eq!(config.logging.level, "debug");
}

#[test]
fn test_missing_sections_use_defaults() {
    let file = write_temp("");
    let config = load_config(file.path()).unwrap();

    assert_eq!(config.node.listen_addr, "127.0.0.1:24200");
    assert!(config.node.admin_token.is_none());
    assert!(config.node.genesis_file.is_none());
    assert_eq!(config.logging.level, "info");
}

#[test]
fn test_malformed_config_is_parse_error() {
    let file = write_temp("[node\nlisten_addr = ");
    assert!(matches!(load_config(file.path()), Err(ConfigError::ParseError(_))));
}

#[test]
fn test_missing_config_is_io_error() {
    let result = load_config(std::path::Path::new("/nonexistent/bloomexd.toml"));
    assert!(matches!(result, Err(ConfigError::IoError(_))));
}

#[test]
fn test_builtin_genesis_uses_default_tge() {
    let genesis = load_genesis(&NodeConfig::default()).unwrap();
    assert_eq!(genesis.tge, DEFAULT_TGE);
    assert_eq!(genesis.total_allocated(), TOTAL_SUPPLY);
}

#[test]
fn test_genesis_file_round_trip() {
    let mut genesis = GenesisConfig::bloomex(1_800_000_000);
    genesis.buckets.retain(|b| b.kind != BucketKind::Community);
    let file = write_temp(&genesis.to_json().unwrap());

    let node = NodeConfig {
        genesis_file: Some(file.path().to_string_lossy().to_string()),
        ..NodeConfig::default()
    };
    let loaded = load_genesis(&node).unwrap();
    assert_eq!(loaded, genesis);

    let engine = loaded.build().unwrap();
    assert_eq!(engine.total_allocated(), TOTAL_SUPPLY - 1_500_000_000);
}

#[test]
fn test_invalid_genesis_json() {
    let file = write_temp("{ \"tge\": \"soon\" }");
    let node = NodeConfig {
        genesis_file: Some(file.path().to_string_lossy().to_string()),
        ..NodeConfig::default()
    };
    assert!(matches!(load_genesis(&node), Err(ConfigError::GenesisError(_))));
}

#[test]
fn test_sample_files_parse() {
    let config: bloomex_cli::config::Config =
        toml::from_str(include_str!("../../config/bloomexd.toml")).unwrap();
    assert_eq!(config.node.admin_token.as_deref(), Some("change-me"));

    let genesis = GenesisConfig::from_json(include_str!("../../config/genesis.json")).unwrap();
    assert_eq!(genesis.total_allocated(), TOTAL_SUPPLY);
    assert_eq!(genesis.buckets, GenesisConfig::bloomex(genesis.tge).buckets);

    let engine = genesis.build().unwrap();
    let advisor = engine.grants_for("advisor-1");
    assert_eq!(advisor.len(), 1);
    assert_eq!(advisor[0].schedule.start, genesis.tge + 30 * 86_400);
}
