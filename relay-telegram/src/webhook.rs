//! Webhook entry point: one HTTP POST per Telegram update.
//!
//! The update is processed to completion before the response is written, so the platform sees
//! `200 ok` only after every outbound call has finished and `500 Error` when processing failed.

use anyhow::{Context, Result};
use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Router,
};
use handler_chain::HandlerChain;
use relay_core::ToCoreMessage;
use std::net::SocketAddr;
use teloxide::types::{Update, UpdateKind};
use tracing::{debug, error, info, instrument};

use super::adapters::TelegramMessageWrapper;

/// Parses one update body and runs the chain for text messages.
/// Returns `Ok(true)` when the chain ran, `Ok(false)` when the update carried no text message.
pub async fn process_update(chain: &HandlerChain, body: &[u8]) -> Result<bool> {
    let update: Update = serde_json::from_slice(body).context("Invalid update body")?;

    let msg = match &update.kind {
        UpdateKind::Message(msg) if msg.text().is_some() => msg,
        _ => {
            debug!(update_id = update.id.0, "Ignoring update without text message");
            return Ok(false);
        }
    };

    let core_msg = TelegramMessageWrapper(msg).to_core();
    info!(
        update_id = update.id.0,
        user_id = core_msg.user.id,
        chat_id = core_msg.chat.id,
        message_content = %core_msg.content,
        "Received message"
    );
    chain.handle(&core_msg).await?;
    Ok(true)
}

async fn handle_update(State(chain): State<HandlerChain>, body: Bytes) -> (StatusCode, &'static str) {
    match process_update(&chain, &body).await {
        Ok(_) => (StatusCode::OK, "ok"),
        Err(e) => {
            error!(error = %e, "Webhook update failed");
            (StatusCode::INTERNAL_SERVER_ERROR, "Error")
        }
    }
}

async fn health() -> &'static str {
    "ok"
}

/// Router with the update route at `path` and `GET /health`.
pub fn webhook_router(path: &str, chain: HandlerChain) -> Router {
    Router::new()
        .route(path, post(handle_update))
        .route("/health", get(health))
        .with_state(chain)
}

/// Binds `addr` and serves the webhook until Ctrl-C.
#[instrument(skip(chain))]
pub async fn serve_webhook(addr: SocketAddr, path: &str, chain: HandlerChain) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!(addr = %addr, path = %path, "Webhook listening");

    axum::serve(listener, webhook_router(path, chain))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutdown signal received");
        })
        .await
        .context("Webhook server failed")?;
    Ok(())
}
