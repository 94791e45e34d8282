//! Integration tests for configuration loader
//!
//! Tests the end-to-end behavior of loading configuration from files.

use std::io::Write;

use bookslot_infra::config;
use tempfile::NamedTempFile;

#[test]
fn test_load_config_from_json_file() {
    let json_content = r#"{
        "store": {
            "spreadsheet_id": "sheet-json",
            "worksheet": "Schedule",
            "access_token": "token-123",
            "request_timeout_secs": 7
        },
        "schedule": {
            "timezone": "Europe/Berlin",
            "page_size": 4
        },
        "reminders": {
            "day_before_hour": 18,
            "on_day_hour": 9,
            "misfire_grace_secs": 120
        },
        "telegram": {
            "bot_token": "bot-abc"
        }
    }"#;

    let mut temp_file = NamedTempFile::new().expect("Failed to create temp file");
    temp_file.write_all(json_content.as_bytes()).expect("Failed to write to temp file");

    let path = temp_file.path().with_extension("json");
    std::fs::copy(temp_file.path(), &path).expect("Failed to copy file");

    let result = config::load_from_file(Some(path.clone()));
    assert!(result.is_ok(), "Failed to load config from JSON file");

    let config = result.unwrap();
    assert_eq!(config.store.spreadsheet_id, "sheet-json");
    assert_eq!(config.store.request_timeout_secs, 7);
    assert_eq!(config.store.base_url, "https://sheets.googleapis.com");
    assert_eq!(config.schedule.timezone, chrono_tz::Europe::Berlin);
    assert_eq!(config.schedule.page_size, 4);
    assert_eq!(config.reminders.day_before_hour, 18);
    assert_eq!(config.reminders.on_day_hour, 9);
    assert_eq!(config.reminders.misfire_grace_secs, 120);
    assert_eq!(config.telegram.bot_token, "bot-abc");
    assert_eq!(config.http.listen_addr, "127.0.0.1:8080");

    std::fs::remove_file(path).ok();
}

#[test]
fn test_load_config_from_toml_file() {
    let toml_content = r#"
[store]
spreadsheet_id = "sheet-toml"
worksheet = "Расписание"
access_token = "token-456"

[telegram]
bot_token = "bot-def"
api_base = "http://localhost:9000"

[http]
listen_addr = "0.0.0.0:3000"
"#;

    let mut temp_file = NamedTempFile::new().expect("Failed to create temp file");
    temp_file.write_all(toml_content.as_bytes()).expect("Failed to write to temp file");

    let path = temp_file.path().with_extension("toml");
    std::fs::copy(temp_file.path(), &path).expect("Failed to copy file");

    let result = config::load_from_file(Some(path.clone()));
    assert!(result.is_ok(), "Failed to load config from TOML file");

    let config = result.unwrap();
    assert_eq!(config.store.spreadsheet_id, "sheet-toml");
    assert_eq!(config.store.worksheet, "Расписание");
    assert_eq!(config.telegram.api_base, "http://localhost:9000");
    assert_eq!(config.http.listen_addr, "0.0.0.0:3000");

    std::fs::remove_file(path).ok();
}

#[test]
fn test_minimal_config_gets_defaults() {
    let json_content = r#"{
        "store": {
            "spreadsheet_id": "sheet-min",
            "worksheet": "Schedule",
            "access_token": "token-min"
        },
        "telegram": {
            "bot_token": "bot-min"
        }
    }"#;

    let mut temp_file = NamedTempFile::new().expect("Failed to create temp file");
    temp_file.write_all(json_content.as_bytes()).expect("Failed to write to temp file");

    let path = temp_file.path().with_extension("json");
    std::fs::copy(temp_file.path(), &path).expect("Failed to copy file");

    let config = config::load_from_file(Some(path.clone())).expect("minimal config loads");
    assert_eq!(config.schedule.timezone, chrono_tz::Europe::Moscow);
    assert_eq!(config.schedule.page_size, 6);
    assert_eq!(config.reminders.day_before_hour, 12);
    assert_eq!(config.reminders.on_day_hour, 8);
    assert_eq!(config.reminders.misfire_grace_secs, 600);
    assert_eq!(config.store.request_timeout_secs, 10);

    std::fs::remove_file(path).ok();
}

#[test]
fn test_missing_file_is_a_config_error() {
    let result = config::load_from_file(Some(std::path::PathBuf::from("/nonexistent/config.json")));
    assert!(result.is_err());
}

#[test]
fn test_unsupported_extension_is_rejected() {
    let mut temp_file = NamedTempFile::new().expect("Failed to create temp file");
    temp_file.write_all(b"whatever").expect("Failed to write to temp file");

    let path = temp_file.path().with_extension("yaml");
    std::fs::copy(temp_file.path(), &path).expect("Failed to copy file");

    let result = config::load_from_file(Some(path.clone()));
    assert!(result.is_err());

    std::fs::remove_file(path).ok();
}
