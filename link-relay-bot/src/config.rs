use media_handlers::UnknownSizePolicy;
use media_resolver::DEFAULT_RESOLVER_URL;
use relay_core::{RelayError, Result};
use std::env;
use std::net::SocketAddr;

const DEFAULT_LOG_FILE: &str = "logs/link-relay.log";
const DEFAULT_WEBHOOK_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_WEBHOOK_PATH: &str = "/api/index";

/// Relay bot 配置，从环境变量加载
#[derive(Debug, Clone)]
pub struct RelayConfig {
    pub bot_token: String,
    /// 可选：Telegram Bot API 基础 URL（本地 Bot API 或测试 mock）。
    /// 环境变量：`TELEGRAM_API_URL` 或 `TELOXIDE_API_URL`。
    pub telegram_api_url: Option<String>,
    pub log_file: String,
    pub resolver_url: String,
    pub webhook_addr: SocketAddr,
    pub webhook_path: String,
    pub unknown_size: UnknownSizePolicy,
}

impl RelayConfig {
    /// 从环境变量加载配置；传入 token 时覆盖 BOT_TOKEN / TELEGRAM_TOKEN。
    pub fn load(token: Option<String>) -> Result<Self> {
        let bot_token = match token {
            Some(t) => t,
            None => env::var("BOT_TOKEN")
                .or_else(|_| env::var("TELEGRAM_TOKEN"))
                .map_err(|_| RelayError::Config("BOT_TOKEN not set".to_string()))?,
        };
        if bot_token.trim().is_empty() {
            return Err(RelayError::Config("bot token is empty".to_string()));
        }

        let telegram_api_url = env::var("TELEGRAM_API_URL")
            .or_else(|_| env::var("TELOXIDE_API_URL"))
            .ok();
        let log_file = env::var("LOG_FILE").unwrap_or_else(|_| DEFAULT_LOG_FILE.to_string());
        let resolver_url =
            env::var("RESOLVER_API_URL").unwrap_or_else(|_| DEFAULT_RESOLVER_URL.to_string());

        let webhook_addr = parse_addr(
            &env::var("WEBHOOK_ADDR").unwrap_or_else(|_| DEFAULT_WEBHOOK_ADDR.to_string()),
        )?;

        let webhook_path =
            env::var("WEBHOOK_PATH").unwrap_or_else(|_| DEFAULT_WEBHOOK_PATH.to_string());
        validate_webhook_path(&webhook_path)?;

        let unknown_size = match env::var("BLOCK_UNKNOWN_SIZE") {
            Ok(raw) => {
                let block: bool = raw.trim().parse().map_err(|_| {
                    RelayError::Config(format!("BLOCK_UNKNOWN_SIZE must be true or false: {}", raw))
                })?;
                if block {
                    UnknownSizePolicy::Block
                } else {
                    UnknownSizePolicy::Allow
                }
            }
            Err(_) => UnknownSizePolicy::Allow,
        };

        Ok(Self {
            bot_token,
            telegram_api_url,
            log_file,
            resolver_url,
            webhook_addr,
            webhook_path,
            unknown_size,
        })
    }
}

/// Accepts only literal routes: a leading `/`, then unreserved URL characters and `/`.
/// Route syntax such as `{id}`, `{*rest}` or `:id` is rejected here instead of panicking in the router.
pub fn validate_webhook_path(path: &str) -> Result<()> {
    if !path.starts_with('/') {
        return Err(RelayError::Config(format!(
            "WEBHOOK_PATH must start with '/': {}",
            path
        )));
    }
    if let Some(c) = path
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '/' | '-' | '.' | '_' | '~')))
    {
        return Err(RelayError::Config(format!(
            "WEBHOOK_PATH contains unsupported character {:?}: {}",
            c, path
        )));
    }
    Ok(())
}

/// Parses a listen address such as `0.0.0.0:3000`.
pub fn parse_addr(raw: &str) -> Result<SocketAddr> {
    raw.trim()
        .parse()
        .map_err(|_| RelayError::Config(format!("invalid listen address: {}", raw)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        for key in [
            "BOT_TOKEN",
            "TELEGRAM_TOKEN",
            "TELEGRAM_API_URL",
            "TELOXIDE_API_URL",
            "LOG_FILE",
            "RESOLVER_API_URL",
            "WEBHOOK_ADDR",
            "WEBHOOK_PATH",
            "BLOCK_UNKNOWN_SIZE",
        ] {
            env::remove_var(key);
        }
    }

    #[test]
    #[serial]
    fn test_load_config_with_defaults() {
        clear_env();
        env::set_var("BOT_TOKEN", "test_token");

        let config = RelayConfig::load(None).unwrap();

        assert_eq!(config.bot_token, "test_token");
        assert!(config.telegram_api_url.is_none());
        assert_eq!(config.log_file, "logs/link-relay.log");
        assert_eq!(config.resolver_url, "https://api.lau.plus/media/newapi.php");
        assert_eq!(config.webhook_addr.to_string(), "0.0.0.0:3000");
        assert_eq!(config.webhook_path, "/api/index");
        assert_eq!(config.unknown_size, UnknownSizePolicy::Allow);
    }

    #[test]
    #[serial]
    fn test_load_config_with_custom_values() {
        clear_env();
        env::set_var("TELEGRAM_TOKEN", "alt_token");
        env::set_var("TELOXIDE_API_URL", "http://127.0.0.1:8081");
        env::set_var("LOG_FILE", "/tmp/relay.log");
        env::set_var("RESOLVER_API_URL", "http://resolver.local/api");
        env::set_var("WEBHOOK_ADDR", "127.0.0.1:8080");
        env::set_var("WEBHOOK_PATH", "/hook");
        env::set_var("BLOCK_UNKNOWN_SIZE", "true");

        let config = RelayConfig::load(None).unwrap();

        assert_eq!(config.bot_token, "alt_token");
        assert_eq!(config.telegram_api_url.as_deref(), Some("http://127.0.0.1:8081"));
        assert_eq!(config.log_file, "/tmp/relay.log");
        assert_eq!(config.resolver_url, "http://resolver.local/api");
        assert_eq!(config.webhook_addr.to_string(), "127.0.0.1:8080");
        assert_eq!(config.webhook_path, "/hook");
        assert_eq!(config.unknown_size, UnknownSizePolicy::Block);
    }

    #[test]
    #[serial]
    fn test_load_config_with_override_token() {
        clear_env();
        env::set_var("BOT_TOKEN", "env_token");

        let config = RelayConfig::load(Some("override_token".to_string())).unwrap();

        assert_eq!(config.bot_token, "override_token");
    }

    #[test]
    fn test_validate_webhook_path_accepts_literal_routes() {
        for path in ["/", "/api/index", "/hook-v2/tg_bot.update", "/~relay"] {
            assert!(validate_webhook_path(path).is_ok(), "rejected {}", path);
        }
    }

    #[test]
    #[serial]
    fn test_missing_token_is_config_error() {
        clear_env();

        let err = RelayConfig::load(None).unwrap_err();

        assert!(matches!(err, RelayError::Config(_)));
    }

    #[test]
    #[serial]
    fn test_invalid_values_are_config_errors() {
        clear_env();
        env::set_var("BOT_TOKEN", "test_token");

        env::set_var("WEBHOOK_ADDR", "not-an-addr");
        assert!(matches!(RelayConfig::load(None), Err(RelayError::Config(_))));
        env::remove_var("WEBHOOK_ADDR");

        for path in ["api/index", "/api/{", "/api/{id}", "/api/{*rest}", "/api/:id", "/api index"] {
            env::set_var("WEBHOOK_PATH", path);
            assert!(
                matches!(RelayConfig::load(None), Err(RelayError::Config(_))),
                "accepted {}",
                path
            );
        }
        env::remove_var("WEBHOOK_PATH");

        env::set_var("BLOCK_UNKNOWN_SIZE", "sometimes");
        assert!(matches!(RelayConfig::load(None), Err(RelayError::Config(_))));
        env::remove_var("BLOCK_UNKNOWN_SIZE");

        assert!(matches!(
            RelayConfig::load(Some("  ".to_string())),
            Err(RelayError::Config(_))
        ));
    }
}
