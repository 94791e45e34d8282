//! Configuration structures
//!
//! Defined here so every layer shares one shape; the infra loader fills
//! them from environment variables or a config file.

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_DAY_BEFORE_HOUR, DEFAULT_MISFIRE_GRACE_SECS, DEFAULT_ON_DAY_HOUR, DEFAULT_PAGE_SIZE,
};

/// Top-level application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub store: StoreConfig,
    #[serde(default)]
    pub schedule: ScheduleConfig,
    #[serde(default)]
    pub reminders: ReminderConfig,
    pub telegram: TelegramConfig,
    #[serde(default)]
    pub http: HttpConfig,
}

/// Schedule store (spreadsheet) connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    pub spreadsheet_id: String,
    pub worksheet: String,
    /// API origin; tests point this at a mock server.
    #[serde(default = "default_store_base_url")]
    pub base_url: String,
    /// Bearer token presented to the store API.
    pub access_token: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

/// Availability listing and view settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleConfig {
    /// Timezone all date inference and reminder fire times use.
    #[serde(default = "default_timezone")]
    pub timezone: Tz,
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self { timezone: default_timezone(), page_size: default_page_size() }
    }
}

/// Reminder fire-time policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReminderConfig {
    /// Local hour of the day-before reminder.
    #[serde(default = "default_day_before_hour")]
    pub day_before_hour: u32,
    /// Local hour of the on-day reminder.
    #[serde(default = "default_on_day_hour")]
    pub on_day_hour: u32,
    /// How long past its target a job may still fire before being dropped.
    #[serde(default = "default_misfire_grace_secs")]
    pub misfire_grace_secs: u64,
}

impl Default for ReminderConfig {
    fn default() -> Self {
        Self {
            day_before_hour: default_day_before_hour(),
            on_day_hour: default_on_day_hour(),
            misfire_grace_secs: default_misfire_grace_secs(),
        }
    }
}

/// Chat-platform delivery settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelegramConfig {
    pub bot_token: String,
    /// Bot API origin; tests point this at a mock server.
    #[serde(default = "default_telegram_api_base")]
    pub api_base: String,
}

/// HTTP surface settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self { listen_addr: default_listen_addr() }
    }
}

fn default_store_base_url() -> String {
    "https://sheets.googleapis.com".to_string()
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_timezone() -> Tz {
    chrono_tz::Europe::Moscow
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

fn default_day_before_hour() -> u32 {
    DEFAULT_DAY_BEFORE_HOUR
}

fn default_on_day_hour() -> u32 {
    DEFAULT_ON_DAY_HOUR
}

fn default_misfire_grace_secs() -> u64 {
    DEFAULT_MISFIRE_GRACE_SECS
}

fn default_telegram_api_base() -> String {
    "https://api.telegram.org".to_string()
}

fn default_listen_addr() -> String {
    "127.0.0.1:8080".to_string()
}
