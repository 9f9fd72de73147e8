//! Mock implementation of [`relay_core::Bot`] that records every call.
//!
//! Calls are recorded before a configured failure is returned, so tests can assert both on what
//! was attempted and on how failures were reported.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use relay_core::{Bot, Chat, Message, RelayError, Result};

/// One recorded call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BotCall {
    Placeholder { chat_id: i64, text: String },
    Send { chat_id: i64, text: String },
    Reply { chat_id: i64, text: String },
    Edit { chat_id: i64, message_id: String, text: String },
    Photo { chat_id: i64, url: String },
    Video { chat_id: i64, url: String },
    MediaGroup { chat_id: i64, urls: Vec<String> },
}

pub struct MockBot {
    placeholder_id: String,
    calls: Mutex<Vec<BotCall>>,
    failing_urls: Mutex<HashSet<String>>,
    fail_media_group: AtomicBool,
    fail_send_message: AtomicBool,
    fail_placeholder: AtomicBool,
}

impl MockBot {
    /// Placeholder id returned by `send_message_and_return_id` is `"100"`.
    pub fn new() -> Self {
        Self {
            placeholder_id: "100".to_string(),
            calls: Mutex::new(Vec::new()),
            failing_urls: Mutex::new(HashSet::new()),
            fail_media_group: AtomicBool::new(false),
            fail_send_message: AtomicBool::new(false),
            fail_placeholder: AtomicBool::new(false),
        }
    }

    /// `send_photo` / `send_video` fail for this URL.
    pub fn fail_url(self, url: &str) -> Self {
        self.failing_urls.lock().unwrap().insert(url.to_string());
        self
    }

    pub fn fail_media_group(self) -> Self {
        self.fail_media_group.store(true, Ordering::SeqCst);
        self
    }

    pub fn fail_send_message(self) -> Self {
        self.fail_send_message.store(true, Ordering::SeqCst);
        self
    }

    pub fn fail_placeholder(self) -> Self {
        self.fail_placeholder.store(true, Ordering::SeqCst);
        self
    }

    pub fn placeholder_id(&self) -> &str {
        &self.placeholder_id
    }

    pub fn calls(&self) -> Vec<BotCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn photos(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                BotCall::Photo { url, .. } => Some(url),
                _ => None,
            })
            .collect()
    }

    pub fn videos(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                BotCall::Video { url, .. } => Some(url),
                _ => None,
            })
            .collect()
    }

    pub fn media_groups(&self) -> Vec<Vec<String>> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                BotCall::MediaGroup { urls, .. } => Some(urls),
                _ => None,
            })
            .collect()
    }

    /// Texts of plain `send_message` calls, in order.
    pub fn sent_texts(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                BotCall::Send { text, .. } => Some(text),
                _ => None,
            })
            .collect()
    }

    /// Texts of `edit_message` calls, in order.
    pub fn edits(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                BotCall::Edit { text, .. } => Some(text),
                _ => None,
            })
            .collect()
    }

    /// True if any photo, video or media group was sent.
    pub fn relayed_any(&self) -> bool {
        self.calls().iter().any(|c| {
            matches!(
                c,
                BotCall::Photo { .. } | BotCall::Video { .. } | BotCall::MediaGroup { .. }
            )
        })
    }

    fn record(&self, call: BotCall) {
        self.calls.lock().unwrap().push(call);
    }

    fn check_url(&self, url: &str) -> Result<()> {
        if self.failing_urls.lock().unwrap().contains(url) {
            return Err(RelayError::Bot(format!("Bad Request: failed to get HTTP URL content {}", url)));
        }
        Ok(())
    }
}

#[async_trait]
impl Bot for MockBot {
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()> {
        self.record(BotCall::Send {
            chat_id: chat.id,
            text: text.to_string(),
        });
        if self.fail_send_message.load(Ordering::SeqCst) {
            return Err(RelayError::Bot("Forbidden: bot was blocked by the user".to_string()));
        }
        Ok(())
    }

    async fn reply_to(&self, message: &Message, text: &str) -> Result<()> {
        self.record(BotCall::Reply {
            chat_id: message.chat.id,
            text: text.to_string(),
        });
        Ok(())
    }

    async fn edit_message(&self, chat: &Chat, message_id: &str, text: &str) -> Result<()> {
        self.record(BotCall::Edit {
            chat_id: chat.id,
            message_id: message_id.to_string(),
            text: text.to_string(),
        });
        Ok(())
    }

    async fn send_message_and_return_id(&self, chat: &Chat, text: &str) -> Result<String> {
        self.record(BotCall::Placeholder {
            chat_id: chat.id,
            text: text.to_string(),
        });
        if self.fail_placeholder.load(Ordering::SeqCst) {
            return Err(RelayError::Bot("Too Many Requests: retry after 5".to_string()));
        }
        Ok(self.placeholder_id.clone())
    }

    async fn send_photo(&self, chat: &Chat, url: &str) -> Result<()> {
        self.record(BotCall::Photo {
            chat_id: chat.id,
            url: url.to_string(),
        });
        self.check_url(url)
    }

    async fn send_video(&self, chat: &Chat, url: &str) -> Result<()> {
        self.record(BotCall::Video {
            chat_id: chat.id,
            url: url.to_string(),
        });
        self.check_url(url)
    }

    async fn send_media_group(&self, chat: &Chat, urls: &[String]) -> Result<()> {
        self.record(BotCall::MediaGroup {
            chat_id: chat.id,
            urls: urls.to_vec(),
        });
        if self.fail_media_group.load(Ordering::SeqCst) {
            return Err(RelayError::Bot("Bad Request: group send failed".to_string()));
        }
        Ok(())
    }
}
