//! Domain parsing utilities

pub mod date_label;
pub mod location;
