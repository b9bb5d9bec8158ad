//! Tests for loading server configuration from TOML files.

use std::fs;
use tempfile::TempDir;

use boardwire_server::ServerConfig;

fn write_config(dir: &TempDir, content: &str) -> std::path::PathBuf {
    let path = dir.path().join("boardwire.toml");
    fs::write(&path, content).expect("Failed to write TOML");
    path
}

#[test]
fn test_full_config_file() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_config(
        &dir,
        r#"host = "0.0.0.0"
port = 9100
command_capacity = 16
sync_timeout_secs = 2
"#,
    );

    let config = ServerConfig::from_file(&path).expect("Load failed");
    assert_eq!(config.host(), "0.0.0.0");
    assert_eq!(*config.port(), 9100);
    assert_eq!(*config.command_capacity(), 16);
    assert_eq!(config.sync_timeout().as_secs(), 2);
}

#[test]
fn test_missing_keys_keep_defaults() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_config(&dir, "port = 8123\n");

    let config = ServerConfig::from_file(&path).expect("Load failed");
    assert_eq!(config.host(), "127.0.0.1");
    assert_eq!(*config.port(), 8123);
}

#[test]
fn test_invalid_toml_is_an_error() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_config(&dir, "port = \"not a number\"");

    let err = ServerConfig::from_file(&path).unwrap_err();
    assert!(err.message.starts_with("Failed to parse config"));
}

#[test]
fn test_missing_file_is_an_error() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let err = ServerConfig::from_file(dir.path().join("absent.toml")).unwrap_err();
    assert!(err.message.starts_with("Failed to read config file"));
}
