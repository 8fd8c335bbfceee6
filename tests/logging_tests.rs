use taskboard::config::LogConfig;
use taskboard::logging::{self, LOG_FILE_NAME};
use tempfile::TempDir;

// Installs the global subscriber, so this file holds a single test
#[test]
fn test_init_writes_json_lines_to_log_file() {
    let dir = TempDir::new().unwrap();
    let config = LogConfig {
        level: "info".to_string(),
        json: true,
        dir: None,
    };

    let guard = logging::init(&config, dir.path()).unwrap();
    tracing::info!(todo = 2, "board loaded");
    tracing::debug!("filtered out at info");
    drop(guard);

    let content = std::fs::read_to_string(dir.path().join(LOG_FILE_NAME)).unwrap();
    let line = content.lines().find(|l| l.contains("board loaded")).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(line).unwrap();
    assert_eq!(parsed["level"], "INFO");
    assert_eq!(parsed["fields"]["todo"], 2);
    assert!(!content.contains("filtered out"));
}
