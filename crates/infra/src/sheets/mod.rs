//! Google Sheets schedule store
//!
//! The spreadsheet is the system's only persistent state. This module
//! holds the REST client, the DTOs of the values API, the bearer-token
//! seam, and the adapter implementing the core `ScheduleStore` port.

pub mod auth;
pub mod client;
pub mod store;
pub mod types;

pub use auth::{AccessTokenProvider, StaticTokenProvider};
pub use client::SheetsClient;
pub use store::SheetsScheduleStore;
