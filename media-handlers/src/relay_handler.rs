//! 链接解析 Handler：发送“正在解析中...”占位消息，调用解析接口，再按媒体类型转发。

use std::sync::Arc;

use async_trait::async_trait;
use media_resolver::LinkResolver;
use relay_core::{Bot, Handler, HandlerError, HandlerResponse, Message, Result};
use tracing::{error, info, instrument, warn};

use crate::dispatcher::MediaDispatcher;
use crate::messages;

/// Marker a message must contain to be treated as a link.
const LINK_MARKER: &str = "http";

/// Handles every text message: resolve the link it carries and relay the media.
///
/// The placeholder is the only intermediate UI state; it ends up showing either the resolved
/// title, a failure notice, or the text of an unexpected error.
pub struct MediaRelayHandler {
    bot: Arc<dyn Bot>,
    resolver: Arc<dyn LinkResolver>,
    dispatcher: Arc<MediaDispatcher>,
}

impl MediaRelayHandler {
    pub fn new(
        bot: Arc<dyn Bot>,
        resolver: Arc<dyn LinkResolver>,
        dispatcher: Arc<MediaDispatcher>,
    ) -> Self {
        Self {
            bot,
            resolver,
            dispatcher,
        }
    }

    /// Runs resolve and dispatch, editing the placeholder on the way. Returns the final placeholder text.
    async fn relay(&self, message: &Message, placeholder_id: &str) -> Result<String> {
        if !message.content.contains(LINK_MARKER) {
            info!(chat_id = message.chat.id, "step: no link in message");
            self.bot
                .edit_message(&message.chat, placeholder_id, messages::MSG_INVALID_LINK)
                .await?;
            return Ok(messages::MSG_INVALID_LINK.to_string());
        }

        let resolved = match self.resolver.resolve(&message.content).await {
            Ok(resolved) => resolved,
            Err(e) => {
                warn!(error = %e, chat_id = message.chat.id, "Link resolution failed");
                self.bot
                    .edit_message(&message.chat, placeholder_id, messages::MSG_RESOLVE_FAILED)
                    .await?;
                return Ok(messages::MSG_RESOLVE_FAILED.to_string());
            }
        };

        let status = messages::resolved(&resolved);
        self.bot
            .edit_message(&message.chat, placeholder_id, &status)
            .await?;

        self.dispatcher
            .dispatch_resolved(&message.chat, &resolved)
            .await?;
        info!(chat_id = message.chat.id, "step: media dispatched");
        Ok(status)
    }
}

#[async_trait]
impl Handler for MediaRelayHandler {
    #[instrument(skip(self, message), fields(chat_id = message.chat.id, message_id = %message.id))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        let placeholder_id = self
            .bot
            .send_message_and_return_id(&message.chat, messages::MSG_RESOLVING)
            .await?;
        if placeholder_id.is_empty() {
            return Err(HandlerError::MissingPlaceholder.into());
        }

        match self.relay(message, &placeholder_id).await {
            Ok(status) => Ok(HandlerResponse::Reply(status)),
            Err(e) => {
                error!(error = %e, chat_id = message.chat.id, "Relay failed");
                let text = messages::unexpected(&e);
                self.bot
                    .edit_message(&message.chat, &placeholder_id, &text)
                    .await?;
                Ok(HandlerResponse::Reply(text))
            }
        }
    }
}
