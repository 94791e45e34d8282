//! REST API router and configuration.

use std::sync::Arc;

use axum::{
    http::Method,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};

use crate::context::AppContext;
use crate::handlers::{
    book_handler, health_handler, my_bookings_handler, schedule_handler, ApiState,
};
use crate::telegram::webhook::{webhook_handler, WebhookState};

/// Create the application router.
///
/// Endpoints:
/// - GET  /health            - Liveness probe
/// - GET  /api/schedule      - Full schedule
/// - POST /api/book          - Claim a specific slot
/// - GET  /api/my-bookings   - An owner's active claims
/// - POST /telegram/webhook  - Chat transport updates
pub fn create_router(context: &AppContext) -> Router {
    let api_state = Arc::new(ApiState::new(context.booking.clone(), context.telegram.clone()));
    let webhook_state = Arc::new(WebhookState::new(
        context.frontend.clone(),
        context.telegram.clone(),
    ));

    // The mini-app front end is served from another origin.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/schedule", get(schedule_handler))
        .route("/book", post(book_handler))
        .route("/my-bookings", get(my_bookings_handler))
        .with_state(api_state);

    Router::new()
        .route("/health", get(health_handler))
        .nest("/api", api_routes)
        .route(
            "/telegram/webhook",
            post(webhook_handler).with_state(webhook_state),
        )
        .layer(cors)
}
