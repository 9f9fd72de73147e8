//! # relay-telegram
//!
//! Telegram transport layer: adapters, [`relay_core::Bot`] implementation, minimal config,
//! webhook server and long-polling runner. Converts updates to core messages and runs the
//! handler chain; no resolving or dispatch logic lives here.

mod adapters;
mod bot_adapter;
mod config;
mod runner;
mod webhook;

pub use adapters::{TelegramMessageWrapper, TelegramUserWrapper};
pub use bot_adapter::{plan_photo_batches, PhotoBatch, TelegramBotAdapter, MEDIA_GROUP_MAX};
pub use config::TelegramConfig;
pub use runner::run_repl;
pub use webhook::{process_update, serve_webhook, webhook_router};
