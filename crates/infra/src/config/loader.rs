//! Configuration loader
//!
//! Loads application configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If incomplete, falls back to loading from file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `BOOKSLOT_SPREADSHEET_ID`: Spreadsheet id of the schedule store
//! - `BOOKSLOT_WORKSHEET`: Worksheet (tab) name holding the schedule
//! - `BOOKSLOT_STORE_ACCESS_TOKEN`: Bearer token for the store API
//! - `BOOKSLOT_STORE_BASE_URL`: Store API origin (optional)
//! - `BOOKSLOT_STORE_TIMEOUT_SECS`: Store request timeout (optional)
//! - `BOOKSLOT_TIMEZONE`: IANA timezone for dates and reminders (optional)
//! - `BOOKSLOT_PAGE_SIZE`: Availability page size (optional)
//! - `BOOKSLOT_DAY_BEFORE_HOUR`: Local hour of the day-before reminder (optional)
//! - `BOOKSLOT_ON_DAY_HOUR`: Local hour of the on-day reminder (optional)
//! - `BOOKSLOT_GRACE_SECS`: Reminder misfire grace window (optional)
//! - `BOOKSLOT_TELEGRAM_TOKEN`: Bot token for the chat platform
//! - `BOOKSLOT_TELEGRAM_API_BASE`: Bot API origin (optional)
//! - `BOOKSLOT_HTTP_LISTEN_ADDR`: HTTP surface listen address (optional)
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./config.json` or `./config.toml` (current working directory)
//! 2. `./bookslot.json` or `./bookslot.toml` (current working directory)
//! 3. `../config.json` or `../config.toml` (parent directory)
//! 4. Relative to executable location

use std::path::{Path, PathBuf};

use bookslot_domain::{BookslotError, Config, Result};
use chrono_tz::Tz;

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables. If any required
/// variables are missing, falls back to loading from a config file.
///
/// # Errors
/// Returns `BookslotError::Config` if:
/// - Configuration cannot be loaded from either source
/// - File format is invalid
/// - Required fields are missing
pub fn load() -> Result<Config> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Failed to load from environment, trying file");
            load_from_file(None)
        }
    }
}

/// Load configuration from environment variables
///
/// The spreadsheet id, worksheet, store token and bot token must be
/// present; everything else falls back to its default.
///
/// # Errors
/// Returns `BookslotError::Config` if required variables are missing
/// or have invalid values.
pub fn load_from_env() -> Result<Config> {
    let spreadsheet_id = env_var("BOOKSLOT_SPREADSHEET_ID")?;
    let worksheet = env_var("BOOKSLOT_WORKSHEET")?;
    let access_token = env_var("BOOKSLOT_STORE_ACCESS_TOKEN")?;
    let bot_token = env_var("BOOKSLOT_TELEGRAM_TOKEN")?;

    let defaults = default_config(spreadsheet_id, worksheet, access_token, bot_token);
    let mut config = defaults;

    if let Ok(base_url) = std::env::var("BOOKSLOT_STORE_BASE_URL") {
        config.store.base_url = base_url;
    }
    if let Ok(timeout) = std::env::var("BOOKSLOT_STORE_TIMEOUT_SECS") {
        config.store.request_timeout_secs = parse_num(&timeout, "store timeout")?;
    }
    if let Ok(tz) = std::env::var("BOOKSLOT_TIMEZONE") {
        config.schedule.timezone = tz
            .parse::<Tz>()
            .map_err(|e| BookslotError::Config(format!("Invalid timezone: {e}")))?;
    }
    if let Ok(page_size) = std::env::var("BOOKSLOT_PAGE_SIZE") {
        config.schedule.page_size = parse_num(&page_size, "page size")?;
    }
    if let Ok(hour) = std::env::var("BOOKSLOT_DAY_BEFORE_HOUR") {
        config.reminders.day_before_hour = parse_num(&hour, "day-before hour")?;
    }
    if let Ok(hour) = std::env::var("BOOKSLOT_ON_DAY_HOUR") {
        config.reminders.on_day_hour = parse_num(&hour, "on-day hour")?;
    }
    if let Ok(grace) = std::env::var("BOOKSLOT_GRACE_SECS") {
        config.reminders.misfire_grace_secs = parse_num(&grace, "grace window")?;
    }
    if let Ok(api_base) = std::env::var("BOOKSLOT_TELEGRAM_API_BASE") {
        config.telegram.api_base = api_base;
    }
    if let Ok(listen_addr) = std::env::var("BOOKSLOT_HTTP_LISTEN_ADDR") {
        config.http.listen_addr = listen_addr;
    }

    Ok(config)
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `BookslotError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File contents do not parse
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let path = match path {
        Some(path) => {
            if !path.exists() {
                return Err(BookslotError::Config(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            path
        }
        None => probe_config_paths()
            .into_iter()
            .find(|p| p.exists())
            .ok_or_else(|| BookslotError::Config("No config file found".to_string()))?,
    };

    let contents = std::fs::read_to_string(&path)
        .map_err(|e| BookslotError::Config(format!("Failed to read {}: {e}", path.display())))?;

    let config = match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => serde_json::from_str(&contents)
            .map_err(|e| BookslotError::Config(format!("Invalid JSON config: {e}")))?,
        Some("toml") => toml::from_str(&contents)
            .map_err(|e| BookslotError::Config(format!("Invalid TOML config: {e}")))?,
        other => {
            return Err(BookslotError::Config(format!(
                "Unsupported config format: {other:?}"
            )))
        }
    };

    tracing::info!(path = %path.display(), "Configuration loaded from file");
    Ok(config)
}

/// Candidate config file paths, most specific first.
pub fn probe_config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();
    for dir in [Path::new("."), Path::new("..")] {
        for name in ["config", "bookslot"] {
            for ext in ["json", "toml"] {
                paths.push(dir.join(format!("{name}.{ext}")));
            }
        }
    }
    if let Ok(exe) = std::env::current_exe() {
        if let Some(dir) = exe.parent() {
            for ext in ["json", "toml"] {
                paths.push(dir.join(format!("config.{ext}")));
            }
        }
    }
    paths
}

// Route the required fields through serde so every optional field picks up
// the same defaults a file load would.
#[allow(clippy::unwrap_used)] // literal shape matches Config
fn default_config(
    spreadsheet_id: String,
    worksheet: String,
    access_token: String,
    bot_token: String,
) -> Config {
    let seed = serde_json::json!({
        "store": {
            "spreadsheet_id": spreadsheet_id,
            "worksheet": worksheet,
            "access_token": access_token,
        },
        "telegram": { "bot_token": bot_token },
    });
    serde_json::from_value(seed).unwrap()
}

fn env_var(name: &str) -> Result<String> {
    std::env::var(name)
        .map_err(|_| BookslotError::Config(format!("Missing environment variable: {name}")))
}

fn parse_num<T: std::str::FromStr>(value: &str, what: &str) -> Result<T>
where
    T::Err: std::fmt::Display,
{
    value
        .parse::<T>()
        .map_err(|e| BookslotError::Config(format!("Invalid {what}: {e}")))
}
