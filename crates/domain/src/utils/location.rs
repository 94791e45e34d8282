//! Venue location cell parsing
//!
//! A fixed auxiliary cell holds up to three newline-separated lines: the
//! street address and two map links. The links may be wrapped in extra
//! text, so URLs are extracted leniently.

use once_cell::sync::Lazy;
use regex::Regex;

#[allow(clippy::unwrap_used)] // literal pattern
static URL: Lazy<Regex> = Lazy::new(|| Regex::new(r"https?://\S+").unwrap());

const NO_ADDRESS: &str = "Address not specified";

/// Parsed venue location block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationInfo {
    pub address: String,
    pub primary_map_link: String,
    pub secondary_map_link: String,
}

/// Parse the raw location cell. Missing lines yield empty links and a
/// placeholder address.
pub fn parse_location_info(raw: Option<&str>) -> LocationInfo {
    let lines: Vec<&str> = raw
        .unwrap_or_default()
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    LocationInfo {
        address: lines.first().map_or_else(|| NO_ADDRESS.to_string(), |l| (*l).to_string()),
        primary_map_link: lines.get(1).map_or_else(String::new, |l| extract_url(l)),
        secondary_map_link: lines.get(2).map_or_else(String::new, |l| extract_url(l)),
    }
}

fn extract_url(line: &str) -> String {
    URL.find(line).map_or_else(|| line.to_string(), |m| m.as_str().to_string())
}
