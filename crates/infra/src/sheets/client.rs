//! Google Sheets REST client
//!
//! Thin typed wrapper over the v4 values API: read a range, update a
//! range, fetch the spreadsheet title. Every request carries a bearer
//! token and a bounded timeout.

use std::sync::Arc;
use std::time::Duration;

use bookslot_domain::{BookslotError, Result, StoreConfig};
use reqwest::Client;
use tracing::debug;

use super::auth::AccessTokenProvider;
use super::types::{SpreadsheetMeta, ValueRange};

/// HTTP client for one spreadsheet.
pub struct SheetsClient {
    http: Client,
    base_url: String,
    spreadsheet_id: String,
    tokens: Arc<dyn AccessTokenProvider>,
}

impl SheetsClient {
    pub fn new(config: &StoreConfig, tokens: Arc<dyn AccessTokenProvider>) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| BookslotError::Internal(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            spreadsheet_id: config.spreadsheet_id.clone(),
            tokens,
        })
    }

    fn values_url(&self, range: &str) -> String {
        format!(
            "{}/v4/spreadsheets/{}/values/{}",
            self.base_url, self.spreadsheet_id, range
        )
    }

    /// Read a range; empty ranges come back as an empty row list.
    pub async fn get_values(&self, range: &str) -> Result<Vec<Vec<String>>> {
        let token = self.tokens.access_token().await?;
        let response = self
            .http
            .get(self.values_url(range))
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| BookslotError::StoreUnavailable(format!("values read failed: {e}")))?;

        let response = check_status(response).await?;
        let body: ValueRange = response
            .json()
            .await
            .map_err(|e| BookslotError::StoreUnavailable(format!("malformed values response: {e}")))?;
        Ok(body.values.unwrap_or_default())
    }

    /// Overwrite a range with raw (unparsed) input values.
    pub async fn update_values(&self, range: &str, values: Vec<Vec<String>>) -> Result<()> {
        let token = self.tokens.access_token().await?;
        let body = ValueRange { range: None, major_dimension: None, values: Some(values) };
        let response = self
            .http
            .put(format!("{}?valueInputOption=RAW", self.values_url(range)))
            .bearer_auth(token)
            .json(&body)
            .send()
            .await
            .map_err(|e| BookslotError::StoreUnavailable(format!("values write failed: {e}")))?;

        check_status(response).await?;
        debug!(range, "wrote cell range");
        Ok(())
    }

    /// Human-facing spreadsheet title.
    pub async fn title(&self) -> Result<String> {
        let token = self.tokens.access_token().await?;
        let url = format!(
            "{}/v4/spreadsheets/{}?fields=properties.title",
            self.base_url, self.spreadsheet_id
        );
        let response = self
            .http
            .get(url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| BookslotError::StoreUnavailable(format!("metadata read failed: {e}")))?;

        let response = check_status(response).await?;
        let meta: SpreadsheetMeta = response
            .json()
            .await
            .map_err(|e| BookslotError::StoreUnavailable(format!("malformed metadata: {e}")))?;
        Ok(meta.properties.title)
    }
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_else(|_| "<unreadable body>".to_string());
    Err(BookslotError::StoreUnavailable(format!("store API error ({status}): {body}")))
}
