//! # Bookslot Domain
//!
//! Business domain types and models for Bookslot.
//!
//! This crate contains:
//! - Schedule data types (snapshot, rows, slot cells, availability entries)
//! - Occupant markers and their parsing rules
//! - Booking/cancellation outcome types and reminder keys
//! - Domain error types and Result definitions
//! - Configuration structures
//! - Date-label and location-cell parsing utilities
//!
//! ## Architecture
//! - No dependencies on other Bookslot crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod types;
pub mod utils;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
pub use utils::date_label;
pub use utils::location::{parse_location_info, LocationInfo};
