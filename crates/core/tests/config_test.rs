use pretty_assertions::assert_eq;
use std::io::Write;
use wintail_core::config::{Config, TailConfig};

#[test]
fn test_tail_config_defaults() {
    let config = TailConfig::default();
    assert_eq!(config.mailbox_capacity, 1024);
    assert!(config.strip_bom);
}

#[test]
fn test_from_toml_str_partial_sections() {
    let config = Config::from_toml_str(
        r#"
        [tail]
        mailbox_capacity = 16

        [watcher]
        compare_contents = true
        "#,
    )
    .unwrap();

    assert_eq!(config.tail.mailbox_capacity, 16);
    assert!(config.tail.strip_bom);
    assert!(config.watcher.compare_contents);
    assert_eq!(config.watcher.poll_interval_ms, 500);
    assert_eq!(config.validation.mailbox_capacity, 64);
}

#[test]
fn test_from_toml_str_invalid() {
    let result = Config::from_toml_str("[tail]\nmailbox_capacity = \"lots\"");
    assert!(result.is_err());
    assert!(result
        .unwrap_err()
        .to_string()
        .contains("Failed to parse TOML"));
}

#[test]
fn test_from_file_missing_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::from_file(&dir.path().join("absent.toml")).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_load_from_file() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(file, "[validation]\nmailbox_capacity = 8").unwrap();
    writeln!(file, "[tail]\nstrip_bom = false").unwrap();

    let config = Config::load(Some(file.path())).unwrap();
    assert_eq!(config.validation.mailbox_capacity, 8);
    assert!(!config.tail.strip_bom);
    assert_eq!(config.tail.mailbox_capacity, 1024);
}

#[test]
fn test_load_rejects_invalid_values() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(file, "[tail]\nmailbox_capacity = 0").unwrap();

    let result = Config::load(Some(file.path()));
    assert!(result.is_err());
}
