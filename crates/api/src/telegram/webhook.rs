//! Webhook route handler

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use bookslot_core::{ChatFrontend, Intent};
use bookslot_domain::{Occupant, Result};
use bookslot_infra::telegram::TelegramClient;
use tracing::{debug, warn};

use super::update::{CallbackQuery, Message, Update};

/// State shared by the webhook route.
pub struct WebhookState {
    frontend: Arc<ChatFrontend>,
    telegram: Arc<TelegramClient>,
}

impl WebhookState {
    pub fn new(frontend: Arc<ChatFrontend>, telegram: Arc<TelegramClient>) -> Self {
        Self { frontend, telegram }
    }
}

/// `POST /telegram/webhook` - Bot API update delivery.
///
/// Always answers 200; the Bot API retries non-2xx deliveries and a
/// failed dispatch must not replay user actions.
pub async fn webhook_handler(
    State(state): State<Arc<WebhookState>>,
    Json(update): Json<Update>,
) -> StatusCode {
    debug!(update_id = update.update_id, "webhook update received");
    if let Err(err) = process_update(&state, update).await {
        warn!(error = %err, "failed to process webhook update");
    }
    StatusCode::OK
}

async fn process_update(state: &WebhookState, update: Update) -> Result<()> {
    if let Some(callback) = update.callback_query {
        return process_callback(state, callback).await;
    }
    if let Some(message) = update.message {
        return process_message(state, message).await;
    }
    Ok(())
}

async fn process_callback(state: &WebhookState, callback: CallbackQuery) -> Result<()> {
    // Always acknowledge, or the client keeps its spinner.
    if let Err(err) = state.telegram.answer_callback_query(&callback.id, None, false).await {
        warn!(error = %err, "failed to answer callback query");
    }

    let owner = Occupant::new(callback.from.id, callback.from.username);
    let intent = callback
        .data
        .as_deref()
        .map_or(Intent::Noop, Intent::from_callback_data);

    let reply = state.frontend.handle(&owner, intent).await;
    if !reply.is_empty() {
        state
            .telegram
            .send_message(owner.owner_id, &reply.text, Some(&reply.keyboard))
            .await?;
    }
    Ok(())
}

async fn process_message(state: &WebhookState, message: Message) -> Result<()> {
    let Some(from) = message.from else {
        return Ok(());
    };
    let Some(intent) = message.text.as_deref().and_then(Intent::from_command) else {
        // Free text outside the command set is ignored.
        return Ok(());
    };

    let owner = Occupant::new(from.id, from.username);
    let reply = state.frontend.handle(&owner, intent).await;
    if !reply.is_empty() {
        state
            .telegram
            .send_message(message.chat.id, &reply.text, Some(&reply.keyboard))
            .await?;
    }
    Ok(())
}
