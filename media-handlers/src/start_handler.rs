//! `/start` greeting.

use std::sync::Arc;

use async_trait::async_trait;
use relay_core::{Bot, Handler, HandlerResponse, Message, Result};
use tracing::{info, instrument};

use crate::messages::MSG_START;

/// Replies to `/start` with the greeting and stops the chain; everything else continues.
pub struct StartCommandHandler {
    bot: Arc<dyn Bot>,
    bot_username: Option<String>,
}

impl StartCommandHandler {
    pub fn new(bot: Arc<dyn Bot>) -> Self {
        Self {
            bot,
            bot_username: None,
        }
    }

    /// Own username (without `@`); `/start@<name>` is only answered when it matches.
    pub fn with_bot_username(mut self, username: impl Into<String>) -> Self {
        self.bot_username = Some(username.into());
        self
    }
}

/// True for `/start` (optionally followed by arguments), and for `/start@<bot_username>`.
/// Commands addressed to any other bot, or to a bot when our username is unknown, do not match.
pub fn is_start_command(text: &str, bot_username: Option<&str>) -> bool {
    let Some(command) = text.split_whitespace().next() else {
        return false;
    };
    match command.split_once('@') {
        None => command == "/start",
        Some((name, target)) => {
            name == "/start" && bot_username.is_some_and(|own| own.eq_ignore_ascii_case(target))
        }
    }
}

#[async_trait]
impl Handler for StartCommandHandler {
    #[instrument(skip(self, message))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        if !is_start_command(&message.content, self.bot_username.as_deref()) {
            return Ok(HandlerResponse::Continue);
        }
        info!(user_id = message.user.id, chat_id = message.chat.id, "step: /start");
        self.bot.reply_to(message, MSG_START).await?;
        Ok(HandlerResponse::Reply(MSG_START.to_string()))
    }
}
