//! Media dispatch: per-URL size checks and relay, plus grouped photo sends.
//!
//! Every probe and send is awaited in input order. A failed relay is reported to the chat and does
//! not stop the URLs after it; only a failure to *report* propagates to the caller.

use std::sync::Arc;

use media_resolver::{MediaType, ResolveResult, SizeProber, UrlList};
use relay_core::{Bot, Chat, Result};
use tracing::{info, instrument, warn};

use crate::messages;

/// Largest photo relayed inline (10 MiB).
pub const MAX_PHOTO_SIZE: u64 = 10 * 1024 * 1024;
/// Largest video relayed inline (50 MiB).
pub const MAX_VIDEO_SIZE: u64 = 50 * 1024 * 1024;

/// Inline size limit for a media type; `None` for types that are never relayed.
pub fn size_limit(media_type: &MediaType) -> Option<u64> {
    match media_type {
        MediaType::Photo => Some(MAX_PHOTO_SIZE),
        MediaType::Video => Some(MAX_VIDEO_SIZE),
        MediaType::Unknown(_) => None,
    }
}

/// What to do when a size probe fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownSizePolicy {
    /// Treat the size as 0 and relay.
    #[default]
    Allow,
    /// Ask the user to download manually.
    Block,
}

/// Outcome of the dispatch decision for one URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    RelayPhoto,
    RelayVideo,
    TooLarge,
    SizeUnknown,
    Unrecognized,
}

/// Decides how one URL is handled. Sizes equal to the limit are still relayed.
pub fn decide(media_type: &MediaType, size: Option<u64>, policy: UnknownSizePolicy) -> Decision {
    let Some(limit) = size_limit(media_type) else {
        return Decision::Unrecognized;
    };
    let size = match (size, policy) {
        (Some(size), _) => size,
        (None, UnknownSizePolicy::Allow) => 0,
        (None, UnknownSizePolicy::Block) => return Decision::SizeUnknown,
    };
    if size > limit {
        Decision::TooLarge
    } else if *media_type == MediaType::Photo {
        Decision::RelayPhoto
    } else {
        Decision::RelayVideo
    }
}

/// Result of dispatching one URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchOutcome {
    pub decision: Decision,
    /// False when the send failed and a "send failed" notice went out instead.
    pub delivered: bool,
}

/// Result of a grouped photo dispatch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchOutcome {
    /// URLs passed to the grouped send, in input order.
    pub grouped: Vec<String>,
    /// URLs reported individually instead.
    pub rejected: Vec<String>,
    pub group_failed: bool,
}

/// Relays resolved media into a chat, enforcing the size limits.
pub struct MediaDispatcher {
    bot: Arc<dyn Bot>,
    prober: Arc<dyn SizeProber>,
    unknown_size: UnknownSizePolicy,
}

impl MediaDispatcher {
    pub fn new(bot: Arc<dyn Bot>, prober: Arc<dyn SizeProber>) -> Self {
        Self {
            bot,
            prober,
            unknown_size: UnknownSizePolicy::default(),
        }
    }

    pub fn with_unknown_size_policy(mut self, policy: UnknownSizePolicy) -> Self {
        self.unknown_size = policy;
        self
    }

    /// Dispatches everything a resolve returned.
    ///
    /// A bare URL goes through [`Self::dispatch`]; a list of photos is sent as a group; any other
    /// list is dispatched URL by URL in resolver order.
    #[instrument(skip(self, chat, result), fields(chat_id = chat.id, media_type = %result.media_type))]
    pub async fn dispatch_resolved(&self, chat: &Chat, result: &ResolveResult) -> Result<()> {
        match (&result.url_list, &result.media_type) {
            (UrlList::Single(url), media_type) => {
                self.dispatch(chat, url, media_type).await?;
            }
            (UrlList::Many(urls), MediaType::Photo) => {
                self.dispatch_photo_batch(chat, urls).await?;
            }
            (UrlList::Many(urls), media_type) => {
                for url in urls {
                    self.dispatch(chat, url, media_type).await?;
                }
            }
        }
        Ok(())
    }

    /// Probes and relays a single URL. Unrecognized types are not probed.
    #[instrument(skip(self, chat), fields(chat_id = chat.id))]
    pub async fn dispatch(
        &self,
        chat: &Chat,
        url: &str,
        media_type: &MediaType,
    ) -> Result<DispatchOutcome> {
        let size = match size_limit(media_type) {
            Some(_) => self.prober.probe(url).await,
            None => None,
        };
        let decision = decide(media_type, size, self.unknown_size);
        info!(size = ?size, decision = ?decision, "step: dispatch decided");

        match self.execute(chat, url, media_type, decision).await {
            Ok(()) => Ok(DispatchOutcome {
                decision,
                delivered: true,
            }),
            Err(e) => {
                warn!(error = %e, decision = ?decision, "Media send failed");
                self.bot
                    .send_message(chat, &messages::send_failed(&e))
                    .await?;
                Ok(DispatchOutcome {
                    decision,
                    delivered: false,
                })
            }
        }
    }

    async fn execute(
        &self,
        chat: &Chat,
        url: &str,
        media_type: &MediaType,
        decision: Decision,
    ) -> Result<()> {
        match decision {
            Decision::RelayPhoto => self.bot.send_photo(chat, url).await,
            Decision::RelayVideo => self.bot.send_video(chat, url).await,
            Decision::TooLarge => {
                self.bot
                    .send_message(chat, &messages::too_large(media_type, url))
                    .await
            }
            Decision::SizeUnknown => {
                self.bot
                    .send_message(chat, &messages::size_unknown(url))
                    .await
            }
            Decision::Unrecognized => {
                self.bot
                    .send_message(chat, &messages::unrecognized(media_type))
                    .await
            }
        }
    }

    /// Probes every photo, reports the oversized ones individually and sends the rest as one group.
    ///
    /// No grouped send happens when nothing qualifies. A failed grouped send yields a single notice.
    #[instrument(skip(self, chat, urls), fields(chat_id = chat.id, url_count = urls.len()))]
    pub async fn dispatch_photo_batch(&self, chat: &Chat, urls: &[String]) -> Result<BatchOutcome> {
        let mut outcome = BatchOutcome::default();

        for url in urls {
            let size = self.prober.probe(url).await;
            match decide(&MediaType::Photo, size, self.unknown_size) {
                Decision::RelayPhoto => outcome.grouped.push(url.clone()),
                Decision::SizeUnknown => {
                    self.bot
                        .send_message(chat, &messages::size_unknown(url))
                        .await?;
                    outcome.rejected.push(url.clone());
                }
                _ => {
                    self.bot
                        .send_message(chat, &messages::too_large(&MediaType::Photo, url))
                        .await?;
                    outcome.rejected.push(url.clone());
                }
            }
        }

        info!(
            grouped = outcome.grouped.len(),
            rejected = outcome.rejected.len(),
            "step: photo batch probed"
        );

        if outcome.grouped.is_empty() {
            return Ok(outcome);
        }

        if let Err(e) = self.bot.send_media_group(chat, &outcome.grouped).await {
            warn!(error = %e, "Media group send failed");
            self.bot
                .send_message(chat, &messages::group_send_failed(&e))
                .await?;
            outcome.group_failed = true;
        }

        Ok(outcome)
    }
}
