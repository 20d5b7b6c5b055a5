use flowdoc::core::config::{AppConfig, StorageBackend};
use std::env;
use std::path::Path;

fn clear_env() {
    env::remove_var("GEMINI_API_KEY");
    env::remove_var("DRIVE_ACCESS_TOKEN");
    env::remove_var("FLOWDOC_LOG");
}

#[test]
#[serial_test::serial]
fn test_defaults_when_no_file_present() {
    clear_env();
    let config = AppConfig::load(Some(Path::new("/nonexistent/flowdoc.toml")));
    assert!(config.is_err());

    let config = AppConfig::default();
    assert_eq!(config.ai.model, "gemini-pro");
    assert_eq!(config.storage.backend, StorageBackend::Drive);
    assert_eq!(config.batch.op_timeout_secs, 120);
    assert_eq!(config.ai.max_context_bytes, 10_000);
    assert_eq!(config.logging.default_level, "info");
    assert!(!config.logging.enable_file);
}

#[test]
#[serial_test::serial]
fn test_file_values_override_defaults() {
    clear_env();
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("flowdoc.toml");
    std::fs::write(
        &path,
        r#"
[ai]
model = "gemini-1.5-flash"
request_timeout_secs = 30
max_context_bytes = 4096

[storage]
backend = "local"

[batch]
op_timeout_secs = 45

[logging]
default_level = "debug"
enable_file = true
"#,
    )
    .unwrap();

    let config = AppConfig::load(Some(&path)).unwrap();
    assert_eq!(config.ai.model, "gemini-1.5-flash");
    assert_eq!(config.ai.request_timeout_secs, 30);
    assert_eq!(config.ai.max_context_bytes, 4096);
    assert_eq!(config.storage.backend, StorageBackend::Local);
    assert_eq!(config.batch.op_timeout_secs, 45);
    assert_eq!(config.logging.default_level, "debug");
    assert!(config.logging.enable_file);
}

#[test]
#[serial_test::serial]
fn test_env_overrides_win_over_file() {
    clear_env();
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("flowdoc.toml");
    std::fs::write(
        &path,
        r#"
[ai]
api_key = "from-file"

[storage]
access_token = "from-file"
"#,
    )
    .unwrap();

    env::set_var("GEMINI_API_KEY", "from-env");
    env::set_var("DRIVE_ACCESS_TOKEN", "token-from-env");
    env::set_var("FLOWDOC_LOG", "trace");

    let config = AppConfig::load(Some(&path)).unwrap();
    clear_env();

    assert_eq!(config.ai.api_key.as_deref(), Some("from-env"));
    assert_eq!(config.storage.access_token.as_deref(), Some("token-from-env"));
    assert_eq!(config.logging.default_level, "trace");
}

#[test]
#[serial_test::serial]
fn test_blank_env_values_are_ignored() {
    clear_env();
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("flowdoc.toml");
    std::fs::write(&path, "[ai]\napi_key = \"from-file\"\n").unwrap();

    env::set_var("GEMINI_API_KEY", "  ");
    let config = AppConfig::load(Some(&path)).unwrap();
    clear_env();

    assert_eq!(config.ai.api_key.as_deref(), Some("from-file"));
}

#[test]
#[serial_test::serial]
fn test_invalid_endpoint_is_rejected() {
    clear_env();
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("flowdoc.toml");
    std::fs::write(&path, "[ai]\nendpoint = \"not a url\"\n").unwrap();

    let err = AppConfig::load(Some(&path)).unwrap_err();
    assert!(err.to_string().contains("ai.endpoint"));
}

#[test]
#[serial_test::serial]
fn test_zero_timeout_is_rejected() {
    clear_env();
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("flowdoc.toml");
    std::fs::write(&path, "[batch]\nop_timeout_secs = 0\n").unwrap();

    let err = AppConfig::load(Some(&path)).unwrap_err();
    assert!(err.to_string().contains("op_timeout_secs"));
}

#[test]
#[serial_test::serial]
fn test_invalid_level_is_rejected() {
    clear_env();
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("flowdoc.toml");
    std::fs::write(&path, "[logging]\ndefault_level = \"!!not-a-level\"\n").unwrap();

    let err = AppConfig::load(Some(&path)).unwrap_err();
    assert!(err.to_string().contains("default_level"));
}
