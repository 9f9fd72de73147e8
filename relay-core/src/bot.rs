//! Bot abstraction for sending text and relaying media.
//!
//! [`Bot`] is transport-agnostic; relay-telegram implements it via teloxide and tests substitute
//! recording mocks. Media is always referenced by remote URL; nothing is downloaded or re-uploaded.

use crate::error::{RelayError, Result};
use crate::types::{Chat, Message};
use async_trait::async_trait;

/// Abstraction for sending and editing messages and relaying media. Implementations map to a transport (e.g. Telegram).
#[async_trait]
pub trait Bot: Send + Sync {
    /// Sends a text message to the given chat.
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()>;
    /// Sends a reply to the given message (same chat).
    async fn reply_to(&self, message: &Message, text: &str) -> Result<()>;
    /// Edits an already-sent message. `message_id` is transport-specific (e.g. Telegram numeric string).
    async fn edit_message(&self, chat: &Chat, message_id: &str, text: &str) -> Result<()>;
    /// Sends a message and returns its id (for later `edit_message`). May return empty string if not supported.
    async fn send_message_and_return_id(&self, chat: &Chat, text: &str) -> Result<String>;
    /// Sends a photo by remote URL.
    async fn send_photo(&self, chat: &Chat, url: &str) -> Result<()>;
    /// Sends a video by remote URL.
    async fn send_video(&self, chat: &Chat, url: &str) -> Result<()>;
    /// Sends several photos as one grouped message, in the given order.
    async fn send_media_group(&self, chat: &Chat, urls: &[String]) -> Result<()>;
}

/// Parses a message id string into an i32. Used by edit_message.
pub fn parse_message_id(s: &str) -> Result<i32> {
    s.parse()
        .map_err(|_| RelayError::Bot(format!("Invalid message_id for edit: {}", s)))
}
