//! Telegram Bot API client
//!
//! Outbound half of the chat transport: sends messages with optional
//! inline keyboards and acknowledges callback queries. Implements the
//! core `MessageSink` port for reminder delivery.

use async_trait::async_trait;
use bookslot_core::view::{Button, ButtonAction};
use bookslot_domain::{BookslotError, Result, TelegramConfig};
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

/// HTTP client for one bot token.
pub struct TelegramClient {
    http: Client,
    api_base: String,
    token: String,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    ok: bool,
    description: Option<String>,
}

impl TelegramClient {
    pub fn new(config: &TelegramConfig) -> Result<Self> {
        let http = Client::new();
        Ok(Self {
            http,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            token: config.bot_token.clone(),
        })
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{method}", self.api_base, self.token)
    }

    async fn call(&self, method: &str, payload: Value) -> Result<()> {
        let response = self
            .http
            .post(self.method_url(method))
            .json(&payload)
            .send()
            .await
            .map_err(|e| BookslotError::Delivery(format!("{method} request failed: {e}")))?;

        let status = response.status();
        let body: ApiResponse = response
            .json()
            .await
            .map_err(|e| BookslotError::Delivery(format!("{method} malformed response: {e}")))?;
        if !status.is_success() || !body.ok {
            return Err(BookslotError::Delivery(format!(
                "{method} rejected ({status}): {}",
                body.description.unwrap_or_default()
            )));
        }
        Ok(())
    }

    /// Send an HTML-formatted message, with an inline keyboard when given.
    pub async fn send_message(
        &self,
        chat_id: i64,
        text: &str,
        keyboard: Option<&[Vec<Button>]>,
    ) -> Result<()> {
        let mut payload = json!({
            "chat_id": chat_id,
            "text": text,
            "parse_mode": "HTML",
        });
        if let Some(rows) = keyboard {
            payload["reply_markup"] = json!({ "inline_keyboard": keyboard_json(rows) });
        }
        self.call("sendMessage", payload).await?;
        debug!(chat_id, "message sent");
        Ok(())
    }

    /// Acknowledge a callback query, optionally with an alert popup.
    pub async fn answer_callback_query(
        &self,
        callback_query_id: &str,
        text: Option<&str>,
        show_alert: bool,
    ) -> Result<()> {
        let mut payload = json!({ "callback_query_id": callback_query_id });
        if let Some(text) = text {
            payload["text"] = json!(text);
            payload["show_alert"] = json!(show_alert);
        }
        self.call("answerCallbackQuery", payload).await
    }
}

fn keyboard_json(rows: &[Vec<Button>]) -> Value {
    Value::Array(
        rows.iter()
            .map(|row| {
                Value::Array(
                    row.iter()
                        .map(|button| match &button.action {
                            ButtonAction::Callback(data) => {
                                json!({ "text": button.label, "callback_data": data })
                            }
                            ButtonAction::Url(url) => json!({ "text": button.label, "url": url }),
                        })
                        .collect(),
                )
            })
            .collect(),
    )
}

#[async_trait]
impl bookslot_core::MessageSink for TelegramClient {
    async fn deliver(&self, owner_id: i64, text: &str) -> Result<()> {
        self.send_message(owner_id, text, None).await
    }
}
