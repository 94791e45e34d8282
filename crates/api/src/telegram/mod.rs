//! Telegram webhook transport
//!
//! Inbound half of the chat front end: `Update` payloads arrive on the
//! webhook route, become intents for the core dispatcher, and the
//! resulting replies go back out through the Bot API client.

pub mod update;
pub mod webhook;

pub use update::Update;
pub use webhook::{webhook_handler, WebhookState};
