//! Schedule store adapter
//!
//! Implements the core `ScheduleStore` port against one worksheet. Rows
//! and columns are one-based sheet coordinates throughout; A1 references
//! are built here and nowhere else.

use async_trait::async_trait;
use bookslot_core::ScheduleStore;
use bookslot_domain::constants::FIRST_DATA_ROW;
use bookslot_domain::{BookslotError, Result, SlotIndex};

use super::client::SheetsClient;

/// `ScheduleStore` over the Google Sheets values API.
pub struct SheetsScheduleStore {
    client: SheetsClient,
    worksheet: String,
}

impl SheetsScheduleStore {
    pub fn new(client: SheetsClient, worksheet: impl Into<String>) -> Self {
        Self { client, worksheet: worksheet.into() }
    }

    fn range(&self, a1: &str) -> String {
        // Quoted worksheet names survive spaces and non-Latin titles.
        format!("'{}'!{a1}", self.worksheet)
    }

    fn whole_sheet(&self) -> String {
        format!("'{}'", self.worksheet)
    }
}

/// A1 reference for one-based sheet coordinates, e.g. `(2, 6)` → `F2`.
fn cell_ref(row: u32, column: u32) -> Result<String> {
    if row == 0 || column == 0 || column > 26 {
        return Err(BookslotError::CellAddressInvalid(format!("row {row}, column {column}")));
    }
    let letter = char::from(b'A' + (column - 1) as u8);
    Ok(format!("{letter}{row}"))
}

#[async_trait]
impl ScheduleStore for SheetsScheduleStore {
    async fn read_all_rows(&self) -> Result<Vec<Vec<String>>> {
        self.client.get_values(&self.whole_sheet()).await
    }

    async fn read_cell(&self, row: u32, column: u32) -> Result<String> {
        let a1 = cell_ref(row, column)?;
        let values = self.client.get_values(&self.range(&a1)).await?;
        Ok(values
            .into_iter()
            .next()
            .and_then(|mut fields| if fields.is_empty() { None } else { Some(fields.remove(0)) })
            .unwrap_or_default())
    }

    async fn write_cell(&self, row: u32, slot: SlotIndex, value: &str) -> Result<()> {
        if row < FIRST_DATA_ROW {
            return Err(BookslotError::CellAddressInvalid(format!(
                "row {row} is inside the header area"
            )));
        }
        let a1 = cell_ref(row, slot.column())?;
        self.client
            .update_values(&self.range(&a1), vec![vec![value.to_string()]])
            .await
    }

    async fn spreadsheet_title(&self) -> Result<String> {
        self.client.title().await
    }
}
