//! Bookslot - spreadsheet-backed slot booking service
//!
//! Main entry point: loads configuration, wires the object graph, starts
//! the reminder scheduler, restores pending reminders from the schedule
//! store, and serves the HTTP surface.

use bookslot_api::{create_router, AppContext};
use bookslot_domain::{BookslotError, Result};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging FIRST so we can see .env loading
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load environment variables from .env file
    match dotenvy::dotenv() {
        Ok(path) => info!(path = %path.display(), "Loaded .env"),
        Err(e) => warn!(error = %e, "Could not load .env file"),
    }

    let config = bookslot_infra::config::load()?;
    info!(
        spreadsheet = %config.store.spreadsheet_id,
        worksheet = %config.store.worksheet,
        timezone = %config.schedule.timezone,
        "Bookslot starting"
    );

    let context = AppContext::new(config).await?;
    context.reminders.start().await.map_err(BookslotError::from)?;

    // The spreadsheet is the only reminder state; rebuild jobs from it in
    // the background while the surfaces come up.
    let reminders = context.reminders.clone();
    tokio::spawn(async move {
        if let Err(err) = reminders.reconstruct().await {
            error!(error = %err, "reminder reconstruction failed");
        }
    });

    let listen_addr = context.config.http.listen_addr.clone();
    let router = create_router(&context);
    let listener = tokio::net::TcpListener::bind(&listen_addr)
        .await
        .map_err(|e| BookslotError::Config(format!("cannot bind {listen_addr}: {e}")))?;
    info!(addr = %listen_addr, "HTTP surface listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| BookslotError::Internal(format!("server error: {e}")))?;

    context.reminders.shutdown().await.map_err(BookslotError::from)?;
    info!("Bookslot stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!(error = %err, "failed to listen for shutdown signal");
    }
}
