//! # relay-core
//!
//! Core types and traits for the link relay bot: [`Bot`], [`Handler`], message and user types,
//! and tracing initialization. Transport-agnostic; used by relay-telegram, handler-chain and media-handlers.

pub mod bot;
pub mod error;
pub mod logger;
pub mod types;

pub use bot::{parse_message_id, Bot};
pub use error::{HandlerError, RelayError, Result};
pub use logger::init_tracing;
pub use types::{Chat, Handler, HandlerResponse, Message, ToCoreMessage, ToCoreUser, User};
