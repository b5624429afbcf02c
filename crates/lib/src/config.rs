//! Configuration types and loading.
//!
//! Config is loaded from a JSON file (default `~/.tgbot/config.json`) and environment. Bot
//! credentials and the API base can come from `TGBOT_ID`, `TGBOT_TOKEN` and `TGBOT_API_BASE`.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::api::{Api, ApiOptions, SetWebhookOptions, DEFAULT_API_BASE};
use crate::dispatcher::DEFAULT_POLL_TIMEOUT;

/// Top-level config.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default)]
    pub bot: BotConfig,

    /// Webhook settings. Long polling is used while `url` is unset.
    #[serde(default)]
    pub webhook: WebhookConfig,
}

/// Bot credentials and polling.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BotConfig {
    /// Numeric bot id, the part of the token before ':'. Overridden by TGBOT_ID env.
    pub id: Option<i64>,

    /// Bot secret, either the part after ':' or the whole "id:secret" token.
    /// Overridden by TGBOT_TOKEN env.
    pub token: Option<String>,

    /// Long-poll timeout in seconds (default 15).
    #[serde(default = "default_poll_timeout")]
    pub poll_timeout: u64,

    /// Bot API base URL. Overridden by TGBOT_API_BASE env.
    pub api_base: Option<String>,
}

fn default_poll_timeout() -> u64 {
    DEFAULT_POLL_TIMEOUT
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            id: None,
            token: None,
            poll_timeout: default_poll_timeout(),
            api_base: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookConfig {
    /// Public HTTPS URL the Bot API posts to. Its path is served locally.
    pub url: Option<String>,

    /// Local bind address (default "127.0.0.1:8443").
    #[serde(default = "default_webhook_listen")]
    pub listen: String,

    /// Secret token required in X-Telegram-Bot-Api-Secret-Token. A random one is used when unset.
    pub secret: Option<String>,

    pub max_connections: Option<i64>,

    #[serde(default)]
    pub drop_pending_updates: bool,
}

fn default_webhook_listen() -> String {
    "127.0.0.1:8443".to_string()
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            url: None,
            listen: default_webhook_listen(),
            secret: None,
            max_connections: None,
            drop_pending_updates: false,
        }
    }
}

fn env_value(name: &str) -> Option<String> {
    std::env::var(name).ok().and_then(|s| {
        let t = s.trim();
        if t.is_empty() {
            None
        } else {
            Some(t.to_string())
        }
    })
}

/// Split "id:secret" into its parts.
fn split_token(token: &str) -> Option<(i64, &str)> {
    let (id, secret) = token.split_once(':')?;
    Some((id.parse().ok()?, secret))
}

/// Bot secret: TGBOT_TOKEN env, then config. A full "id:secret" token yields its secret part.
pub fn resolve_token(config: &Config) -> Option<String> {
    let token = env_value("TGBOT_TOKEN").or_else(|| {
        config
            .bot
            .token
            .as_ref()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
    })?;
    Some(match split_token(&token) {
        Some((_, secret)) => secret.to_string(),
        None => token,
    })
}

/// Bot id: TGBOT_ID env, then config, then the id part of a full token.
pub fn resolve_id(config: &Config) -> Option<i64> {
    if let Some(id) = env_value("TGBOT_ID").and_then(|s| s.parse().ok()) {
        return Some(id);
    }
    config.bot.id.or_else(|| {
        env_value("TGBOT_TOKEN")
            .or_else(|| config.bot.token.clone())
            .and_then(|t| split_token(t.trim()).map(|(id, _)| id))
    })
}

/// API base URL: TGBOT_API_BASE env, then config, then the public Bot API.
pub fn resolve_api_base(config: &Config) -> String {
    env_value("TGBOT_API_BASE")
        .or_else(|| config.bot.api_base.clone())
        .map(|b| b.trim_end_matches('/').to_string())
        .unwrap_or_else(|| DEFAULT_API_BASE.to_string())
}

/// Webhook secret from config, or a fresh random token.
pub fn resolve_webhook_secret(config: &Config) -> String {
    config
        .webhook
        .secret
        .clone()
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| uuid::Uuid::new_v4().simple().to_string())
}

impl Config {
    /// Fails when credentials are missing after env overrides.
    pub fn validate(&self) -> Result<()> {
        if resolve_id(self).is_none() {
            bail!("bot id is not set (bot.id in config or TGBOT_ID)");
        }
        if resolve_token(self).is_none() {
            bail!("bot token is not set (bot.token in config or TGBOT_TOKEN)");
        }
        Ok(())
    }

    /// API client for the resolved credentials.
    pub fn api(&self) -> Result<Api> {
        self.validate()?;
        let id = resolve_id(self).context("bot id")?;
        let token = resolve_token(self).context("bot token")?;
        Ok(Api::new(
            id,
            token,
            ApiOptions {
                client: None,
                base_url: Some(resolve_api_base(self)),
            },
        ))
    }

    /// setWebhook options for this config, with `secret` as the secret token.
    pub fn webhook_options(&self, secret: String) -> SetWebhookOptions {
        SetWebhookOptions {
            max_connections: self.webhook.max_connections,
            drop_pending_updates: self.webhook.drop_pending_updates.then_some(true),
            secret_token: Some(secret),
            ..Default::default()
        }
    }
}

/// Config file path: TGBOT_CONFIG_PATH, else `~/.tgbot/config.json`.
pub fn default_config_path() -> PathBuf {
    std::env::var("TGBOT_CONFIG_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            dirs::home_dir()
                .map(|h| h.join(".tgbot").join("config.json"))
                .unwrap_or_else(|| PathBuf::from("config.json"))
        })
}

/// Load config from `path` or the default path. Missing file => default config.
/// Returns the config and the path that was used.
pub fn load_config(path: Option<PathBuf>) -> Result<(Config, PathBuf)> {
    let path = path.unwrap_or_else(default_config_path);
    let config = if !path.exists() {
        log::debug!("config file not found, using defaults: {}", path.display());
        Config::default()
    } else {
        let s = std::fs::read_to_string(&path)
            .with_context(|| format!("reading config from {}", path.display()))?;
        serde_json::from_str(&s)
            .with_context(|| format!("parsing config from {}", path.display()))?
    };
    Ok((config, path))
}
