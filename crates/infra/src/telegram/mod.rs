//! Telegram Bot API delivery

pub mod client;

pub use client::TelegramClient;
