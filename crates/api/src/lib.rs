//! # Bookslot API
//!
//! Application layer: the HTTP surface and the Telegram webhook
//! transport, plus the dependency wiring and the main entry point.
//!
//! ## Architecture
//! - Depends on `bookslot-domain`, `bookslot-core`, and `bookslot-infra`
//! - Wires up the hexagonal architecture
//! - Exposes the booking operations over REST and over the chat webhook

pub mod context;
pub mod handlers;
pub mod rest;
pub mod telegram;

// Re-export for convenience
pub use context::AppContext;
pub use rest::create_router;
