//! Wraps teloxide::Bot and implements [`relay_core::Bot`]. Production code sends messages via Telegram; tests can substitute another Bot impl.

use async_trait::async_trait;
use relay_core::{parse_message_id, Bot as CoreBot, Chat, Message, RelayError, Result};
use teloxide::{
    prelude::*,
    types::{ChatId, InputFile, InputMedia, InputMediaPhoto, MessageId},
};
use tracing::debug;

/// Telegram accepts between 2 and 10 items in one media group.
pub const MEDIA_GROUP_MAX: usize = 10;

/// One outgoing send when relaying a list of photos.
#[derive(Debug, PartialEq, Eq)]
pub enum PhotoBatch<'a> {
    /// A lone photo; groups of one are rejected by Telegram.
    Single(&'a str),
    /// Two to [`MEDIA_GROUP_MAX`] photos sent as one album.
    Group(&'a [String]),
}

/// Splits `urls` into album-sized chunks, preserving order. A trailing chunk of one becomes [`PhotoBatch::Single`].
pub fn plan_photo_batches(urls: &[String]) -> Vec<PhotoBatch<'_>> {
    urls.chunks(MEDIA_GROUP_MAX)
        .map(|chunk| match chunk {
            [only] => PhotoBatch::Single(only.as_str()),
            _ => PhotoBatch::Group(chunk),
        })
        .collect()
}

fn to_input_file(url: &str) -> Result<InputFile> {
    let parsed = reqwest::Url::parse(url)
        .map_err(|e| RelayError::Bot(format!("Invalid media url {}: {}", url, e)))?;
    Ok(InputFile::url(parsed))
}

fn bot_err(e: teloxide::RequestError) -> RelayError {
    RelayError::Bot(e.to_string())
}

/// Thin wrapper around teloxide::Bot that implements relay-core's Bot trait.
#[derive(Clone)]
pub struct TelegramBotAdapter {
    bot: teloxide::Bot,
}

impl TelegramBotAdapter {
    /// Creates an adapter from an existing teloxide Bot.
    pub fn new(bot: teloxide::Bot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl CoreBot for TelegramBotAdapter {
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()> {
        self.bot
            .send_message(ChatId(chat.id), text.to_string())
            .await
            .map_err(bot_err)?;
        Ok(())
    }

    async fn send_message_and_return_id(&self, chat: &Chat, text: &str) -> Result<String> {
        let sent = self
            .bot
            .send_message(ChatId(chat.id), text.to_string())
            .await
            .map_err(bot_err)?;
        Ok(sent.id.to_string())
    }

    async fn reply_to(&self, message: &Message, text: &str) -> Result<()> {
        self.send_message(&message.chat, text).await
    }

    async fn edit_message(&self, chat: &Chat, message_id: &str, text: &str) -> Result<()> {
        let id = parse_message_id(message_id)?;
        self.bot
            .edit_message_text(ChatId(chat.id), MessageId(id), text)
            .await
            .map_err(bot_err)?;
        Ok(())
    }

    async fn send_photo(&self, chat: &Chat, url: &str) -> Result<()> {
        let file = to_input_file(url)?;
        self.bot
            .send_photo(ChatId(chat.id), file)
            .await
            .map_err(bot_err)?;
        Ok(())
    }

    async fn send_video(&self, chat: &Chat, url: &str) -> Result<()> {
        let file = to_input_file(url)?;
        self.bot
            .send_video(ChatId(chat.id), file)
            .await
            .map_err(bot_err)?;
        Ok(())
    }

    async fn send_media_group(&self, chat: &Chat, urls: &[String]) -> Result<()> {
        for batch in plan_photo_batches(urls) {
            match batch {
                PhotoBatch::Single(url) => self.send_photo(chat, url).await?,
                PhotoBatch::Group(group) => {
                    debug!(chat_id = chat.id, count = group.len(), "Sending media group");
                    let media = group
                        .iter()
                        .map(|url| {
                            to_input_file(url)
                                .map(|file| InputMedia::Photo(InputMediaPhoto::new(file)))
                        })
                        .collect::<Result<Vec<_>>>()?;
                    self.bot
                        .send_media_group(ChatId(chat.id), media)
                        .await
                        .map_err(bot_err)?;
                }
            }
        }
        Ok(())
    }
}
