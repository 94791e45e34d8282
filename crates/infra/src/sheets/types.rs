//! Google Sheets values API DTOs

use serde::{Deserialize, Serialize};

/// A block of cell values, as read from or written to the values API.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueRange {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub major_dimension: Option<String>,
    /// Absent entirely when the requested range is empty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<Vec<String>>>,
}

/// Spreadsheet metadata, narrowed to the title field we request.
#[derive(Debug, Clone, Deserialize)]
pub struct SpreadsheetMeta {
    pub properties: SpreadsheetProperties,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpreadsheetProperties {
    pub title: String,
}
