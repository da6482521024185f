//! # Configuration
//!
//! Manages the loading and parsing of the application's configuration file
//! (`data/config.yaml`). Secrets can be inlined or resolved from the
//! environment through the `*_env` indirection.

use anyhow::{Context, Result};
use serde::Deserialize;

/// Main application configuration structure.
/// Matches the layout of `data/config.yaml`.
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub services: ServicesConfig,
}

/// Configuration for the connected services.
#[derive(Debug, Deserialize, Clone)]
pub struct ServicesConfig {
    pub discord: DiscordConfig,
    #[serde(default)]
    pub shipdata: ShipDataConfig,
    #[serde(default)]
    pub redis: RedisConfig,
}

/// Discord gateway credentials.
#[derive(Debug, Default, Deserialize, Clone)]
pub struct DiscordConfig {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub token_env: Option<String>, // e.g. "DISCORD_BOT_TOKEN"
}

impl DiscordConfig {
    pub fn resolve_token(&self) -> Result<String> {
        resolve_secret(
            self.token.as_deref(),
            self.token_env.as_deref(),
            "DISCORD_BOT_TOKEN",
        )
        .context("Discord bot token not configured")
    }
}

/// The external ship-data service.
#[derive(Debug, Deserialize, Clone)]
pub struct ShipDataConfig {
    #[serde(default = "default_shipdata_url")]
    pub base_url: String,
    #[serde(default)]
    pub auth_token: Option<String>,
    #[serde(default)]
    pub auth_token_env: Option<String>, // e.g. "BOT_AUTH_TOKEN"
}

impl Default for ShipDataConfig {
    fn default() -> Self {
        Self {
            base_url: default_shipdata_url(),
            auth_token: None,
            auth_token_env: None,
        }
    }
}

impl ShipDataConfig {
    /// Credential attached to command-generation requests.
    pub fn resolve_auth_token(&self) -> Result<String> {
        resolve_secret(
            self.auth_token.as_deref(),
            self.auth_token_env.as_deref(),
            "BOT_AUTH_TOKEN",
        )
        .context("Generator credential not configured")
    }
}

fn default_shipdata_url() -> String {
    "http://localhost:5000".to_string()
}

/// The persistence backend.
#[derive(Debug, Default, Deserialize, Clone)]
pub struct RedisConfig {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub url_env: Option<String>, // e.g. "REDIS_URL"
}

impl RedisConfig {
    pub fn resolve_url(&self) -> Result<String> {
        resolve_secret(self.url.as_deref(), self.url_env.as_deref(), "REDIS_URL")
            .context("Redis connection string not configured")
    }
}

/// Prefer the inlined value, then the configured (or default) environment variable.
fn resolve_secret(
    literal: Option<&str>,
    env_override: Option<&str>,
    default_var: &str,
) -> Result<String> {
    if let Some(value) = literal {
        if !value.is_empty() {
            return Ok(value.to_string());
        }
    }
    let var = env_override.unwrap_or(default_var);
    std::env::var(var).with_context(|| format!("environment variable {var} is unset"))
}
