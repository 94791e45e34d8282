//! Occupant identity and claim markers
//!
//! A claim is persisted as a text marker in a slot cell. The canonical
//! marker embeds an `ID: <id>` tag and is parsed back into a structured
//! [`Occupant`]; historical cells may instead carry a bare profile link,
//! which only the legacy compatibility check recognizes.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

#[allow(clippy::unwrap_used)] // literal pattern
static ID_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"ID:\s*(\d+)").unwrap());

#[allow(clippy::unwrap_used)] // literal pattern
static HANDLE_LINK: Lazy<Regex> = Lazy::new(|| Regex::new(r"t\.me/([A-Za-z0-9_]+)").unwrap());

/// The identity making or holding a claim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Occupant {
    /// Chat-platform user id.
    pub owner_id: i64,
    /// Optional public handle, without the leading `@`.
    pub handle: Option<String>,
}

impl Occupant {
    pub fn new(owner_id: i64, handle: Option<String>) -> Self {
        Self { owner_id, handle }
    }

    /// Render the canonical cell marker written on a successful claim.
    ///
    /// The profile link keeps historical cells and the new format mutually
    /// readable; the `ID:` tag is what parsing keys on.
    pub fn marker(&self) -> String {
        match &self.handle {
            Some(handle) => format!("https://t.me/{handle}\n(ID: {})", self.owner_id),
            None => format!("(ID: {})", self.owner_id),
        }
    }

    /// Parse a canonical marker back into a structured occupant.
    ///
    /// Requires the `ID: <digits>` tag; extra formatting around it is
    /// tolerated. The handle is recovered from a profile link when present.
    pub fn parse_marker(raw: &str) -> Option<Self> {
        let owner_id = ID_MARKER.captures(raw)?.get(1)?.as_str().parse::<i64>().ok()?;
        let handle = HANDLE_LINK.captures(raw).and_then(|c| c.get(1)).map(|m| m.as_str().to_string());
        Some(Self { owner_id, handle })
    }

    /// Compatibility check for historical cells without an `ID:` tag.
    ///
    /// Matches by profile-link containment, the way legacy data was keyed.
    /// Only called when [`parse_marker`](Self::parse_marker) fails.
    pub fn legacy_marker_matches(raw: &str, owner: &Self) -> bool {
        match &owner.handle {
            Some(handle) => raw.contains(&format!("https://t.me/{handle}")),
            None => false,
        }
    }

    /// Short display form for logs and notifications.
    pub fn display(&self) -> String {
        match &self.handle {
            Some(handle) => format!("@{handle}"),
            None => format!("id {}", self.owner_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marker_round_trips() {
        let owner = Occupant::new(555, Some("panda".into()));
        let parsed = Occupant::parse_marker(&owner.marker()).unwrap();
        assert_eq!(parsed, owner);
    }

    #[test]
    fn marker_without_handle_round_trips() {
        let owner = Occupant::new(42, None);
        let parsed = Occupant::parse_marker(&owner.marker()).unwrap();
        assert_eq!(parsed, owner);
    }

    #[test]
    fn parse_tolerates_surrounding_formatting() {
        let parsed = Occupant::parse_marker("booked!\n@someone (ID:9001) confirmed").unwrap();
        assert_eq!(parsed.owner_id, 9001);
    }

    #[test]
    fn parse_rejects_cells_without_id_tag() {
        assert!(Occupant::parse_marker("https://t.me/panda").is_none());
        assert!(Occupant::parse_marker("walk-in guest").is_none());
    }

    #[test]
    fn legacy_link_matches_by_handle_only() {
        let owner = Occupant::new(555, Some("panda".into()));
        assert!(Occupant::legacy_marker_matches("https://t.me/panda", &owner));
        assert!(!Occupant::legacy_marker_matches("https://t.me/otter", &owner));

        let no_handle = Occupant::new(555, None);
        assert!(!Occupant::legacy_marker_matches("https://t.me/panda", &no_handle));
    }
}
