use std::path::{Path, PathBuf};
use taskboard::config::{GlobalConfig, LogConfig, ThemeConfig};
use tempfile::TempDir;

// === ThemeConfig Tests ===

#[test]
fn test_parse_hex_valid() {
    assert_eq!(ThemeConfig::parse_hex("#FFFFFF"), Some((255, 255, 255)));
    assert_eq!(ThemeConfig::parse_hex("#000000"), Some((0, 0, 0)));
    assert_eq!(ThemeConfig::parse_hex("#FF0000"), Some((255, 0, 0)));
    assert_eq!(ThemeConfig::parse_hex("#5cfff7"), Some((92, 255, 247)));
}

#[test]
fn test_parse_hex_without_hash() {
    assert_eq!(ThemeConfig::parse_hex("FFFFFF"), Some((255, 255, 255)));
}

#[test]
fn test_parse_hex_invalid() {
    assert_eq!(ThemeConfig::parse_hex("#FFF"), None); // Too short
    assert_eq!(ThemeConfig::parse_hex("#FFFFFFF"), None); // Too long
    assert_eq!(ThemeConfig::parse_hex("#GGGGGG"), None); // Invalid hex chars
    assert_eq!(ThemeConfig::parse_hex("#ÿÿÿ"), None); // Multi-byte
    assert_eq!(ThemeConfig::parse_hex(""), None); // Empty
}

#[test]
fn test_theme_config_default() {
    let theme = ThemeConfig::default();

    // Verify all default colors are valid hex
    assert!(ThemeConfig::parse_hex(&theme.color_selected).is_some());
    assert!(ThemeConfig::parse_hex(&theme.color_normal).is_some());
    assert!(ThemeConfig::parse_hex(&theme.color_dimmed).is_some());
    assert!(ThemeConfig::parse_hex(&theme.color_text).is_some());
    assert!(ThemeConfig::parse_hex(&theme.color_column_header).is_some());
    assert!(ThemeConfig::parse_hex(&theme.color_dragging).is_some());
    assert!(ThemeConfig::parse_hex(&theme.color_delete).is_some());
}

// === GlobalConfig Tests ===

#[test]
fn test_global_config_default() {
    let config = GlobalConfig::default();

    assert!(config.storage.path.is_none());
    assert_eq!(config.log.level, "info");
    assert!(!config.log.json);
    assert!(config.log.dir.is_none());
}

#[test]
fn test_log_config_default() {
    let log = LogConfig::default();
    assert_eq!(log.level, "info");
}

#[test]
fn test_load_missing_file_gives_defaults() {
    let dir = TempDir::new().unwrap();

    let config = GlobalConfig::load_from(&dir.path().join("config.toml")).unwrap();

    assert!(config.storage.path.is_none());
    assert_eq!(config.log.level, "info");
}

#[test]
fn test_load_partial_toml_fills_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r##"
[storage]
path = "/tmp/board.json"

[theme]
color_selected = "#123456"
"##,
    )
    .unwrap();

    let config = GlobalConfig::load_from(&path).unwrap();

    assert_eq!(config.storage.path, Some(PathBuf::from("/tmp/board.json")));
    assert_eq!(config.theme.color_selected, "#123456");
    assert_eq!(config.theme.color_normal, ThemeConfig::default().color_normal);
    assert_eq!(config.log.level, "info");
}

#[test]
fn test_load_invalid_toml_errors() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[storage\npath = ").unwrap();

    assert!(GlobalConfig::load_from(&path).is_err());
}

#[test]
fn test_save_and_load_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    let mut config = GlobalConfig::default();
    config.log.level = "taskboard=debug".to_string();
    config.log.json = true;
    config.storage.path = Some(PathBuf::from("/data/tasks.json"));
    config.save_to(&path).unwrap();

    let loaded = GlobalConfig::load_from(&path).unwrap();
    assert_eq!(loaded.log.level, "taskboard=debug");
    assert!(loaded.log.json);
    assert_eq!(loaded.storage.path, Some(PathBuf::from("/data/tasks.json")));
}

// === Path resolution ===

#[test]
fn test_store_path_prefers_cli_override() {
    let mut config = GlobalConfig::default();
    config.storage.path = Some(PathBuf::from("/from/config.json"));

    let path = config.store_path(Some(Path::new("/from/cli.json"))).unwrap();
    assert_eq!(path, PathBuf::from("/from/cli.json"));
}

#[test]
fn test_store_path_uses_config_value() {
    let mut config = GlobalConfig::default();
    config.storage.path = Some(PathBuf::from("/from/config.json"));

    assert_eq!(config.store_path(None).unwrap(), PathBuf::from("/from/config.json"));
}

#[test]
fn test_log_dir_uses_config_value() {
    let mut config = GlobalConfig::default();
    config.log.dir = Some(PathBuf::from("/var/log/taskboard"));

    assert_eq!(config.log_dir().unwrap(), PathBuf::from("/var/log/taskboard"));
}
