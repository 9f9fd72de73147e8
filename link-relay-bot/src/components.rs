//! Component factory: builds the shared services and the handler chain from config.

use anyhow::Result;
use handler_chain::HandlerChain;
use media_handlers::{
    LoggingHandler, MediaDispatcher, MediaRelayHandler, StartCommandHandler, UnknownSizePolicy,
};
use media_resolver::{ApiResolver, HttpSizeProber, LinkResolver, SizeProber};
use relay_core::Bot;
use relay_telegram::{TelegramBotAdapter, TelegramConfig};
use std::sync::Arc;
use teloxide::prelude::Requester;
use tracing::{info, instrument, warn};

use super::config::RelayConfig;

/// Everything an entry point needs: the teloxide Bot (for polling) and the assembled chain.
pub struct RelayComponents {
    pub teloxide_bot: teloxide::Bot,
    pub handler_chain: HandlerChain,
}

/// Builds Telegram access, resolver and prober (sharing one HTTP client) and the handler chain.
/// The bot's own username is looked up with getMe so `/start@<name>` can be told apart from other bots.
#[instrument(skip(config), fields(resolver = %config.resolver_url))]
pub async fn build_components(config: &RelayConfig) -> Result<RelayComponents> {
    let mut telegram = TelegramConfig::with_token(config.bot_token.clone());
    if let Some(url) = &config.telegram_api_url {
        telegram = telegram.with_api_url(url.clone());
    }
    let teloxide_bot = telegram.build_bot()?;

    let client = reqwest::Client::new();
    let resolver: Arc<dyn LinkResolver> =
        Arc::new(ApiResolver::with_client(client.clone(), config.resolver_url.clone()));
    let prober: Arc<dyn SizeProber> = Arc::new(HttpSizeProber::with_client(client));
    let bot: Arc<dyn Bot> = Arc::new(TelegramBotAdapter::new(teloxide_bot.clone()));

    let bot_username = match teloxide_bot.get_me().await {
        Ok(me) => me.user.username.clone(),
        Err(e) => {
            warn!(error = %e, "getMe failed; /start addressed to a bot name will be ignored");
            None
        }
    };

    let handler_chain =
        build_handler_chain(bot, resolver, prober, config.unknown_size, bot_username);
    info!(handlers = handler_chain.len(), policy = ?config.unknown_size, "Components built");

    Ok(RelayComponents {
        teloxide_bot,
        handler_chain,
    })
}

/// Chain order: logging, `/start`, then link relay.
pub fn build_handler_chain(
    bot: Arc<dyn Bot>,
    resolver: Arc<dyn LinkResolver>,
    prober: Arc<dyn SizeProber>,
    policy: UnknownSizePolicy,
    bot_username: Option<String>,
) -> HandlerChain {
    let dispatcher =
        Arc::new(MediaDispatcher::new(bot.clone(), prober).with_unknown_size_policy(policy));
    let mut start = StartCommandHandler::new(bot.clone());
    if let Some(username) = bot_username {
        start = start.with_bot_username(username);
    }
    HandlerChain::new()
        .add_handler(Arc::new(LoggingHandler))
        .add_handler(Arc::new(start))
        .add_handler(Arc::new(MediaRelayHandler::new(bot, resolver, dispatcher)))
}
