//! link-relay CLI: serve the Telegram webhook or poll for updates. Config from env and optional CLI args.

mod components;
mod config;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use relay_core::init_tracing;
use relay_telegram::{run_repl, serve_webhook};
use std::net::SocketAddr;
use tracing::info;

use components::build_components;
use config::{parse_addr, RelayConfig};

#[derive(Parser)]
#[command(name = "link-relay")]
#[command(about = "Telegram bot that relays photos and videos behind shared links", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the webhook (token can override BOT_TOKEN, addr can override WEBHOOK_ADDR).
    Serve {
        #[arg(short, long)]
        token: Option<String>,
        #[arg(short, long, value_parser = parse_addr_arg)]
        addr: Option<SocketAddr>,
    },
    /// Long-poll Telegram for updates (local development without a public URL).
    Poll {
        #[arg(short, long)]
        token: Option<String>,
    },
}

fn parse_addr_arg(raw: &str) -> std::result::Result<SocketAddr, String> {
    parse_addr(raw).map_err(|e| e.to_string())
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { token, addr } => {
            let mut config = RelayConfig::load(token)?;
            if let Some(addr) = addr {
                config.webhook_addr = addr;
            }
            init_tracing(&config.log_file).context("Failed to initialize tracing")?;
            info!(addr = %config.webhook_addr, path = %config.webhook_path, "Starting webhook server");

            let components = build_components(&config).await?;
            serve_webhook(config.webhook_addr, &config.webhook_path, components.handler_chain).await
        }
        Commands::Poll { token } => {
            let config = RelayConfig::load(token)?;
            init_tracing(&config.log_file).context("Failed to initialize tracing")?;
            info!("Starting long polling");

            let components = build_components(&config).await?;
            run_repl(components.teloxide_bot, components.handler_chain).await
        }
    }
}
