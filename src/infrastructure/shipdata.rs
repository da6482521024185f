//! # Ship-Data Service Client
//!
//! HTTP client for the external ship-data service. Implements
//! `ShipDataProvider` for the dispatcher. Requests carry no explicit timeout;
//! a hung call hangs the message's handling task.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;

use crate::domain::config::ShipDataConfig;
use crate::domain::traits::ShipDataProvider;

pub struct ShipDataClient {
    http: Client,
    base_url: String,
    auth_token: String,
}

impl ShipDataClient {
    pub fn new(config: &ShipDataConfig) -> Self {
        // A missing generator credential is not fatal: lookups don't need it,
        // and generation requests will fail per-call and be logged there.
        let auth_token = match config.resolve_auth_token() {
            Ok(token) => token,
            Err(e) => {
                tracing::warn!("Generator credential unavailable: {e:#}");
                String::new()
            }
        };

        Self {
            http: Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            auth_token,
        }
    }
}

/// Response format of the command-generation endpoint.
#[derive(Debug, Deserialize)]
struct MudaeCommandResponse {
    #[serde(rename = "mudaeCommand")]
    mudae_command: String,
}

async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, String> {
    let status = response.status();
    if !status.is_success() {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unable to read error response".to_string());
        return Err(format!("HTTP {status}: {body}"));
    }
    Ok(response)
}

#[async_trait]
impl ShipDataProvider for ShipDataClient {
    async fn ships_for(&self, character: &str) -> Result<Value, String> {
        let url = format!("{}/ships/{}", self.base_url, character);

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| format!("HTTP request failed: {e}"))?;
        let response = ensure_success(response).await?;

        response
            .json::<Value>()
            .await
            .map_err(|e| format!("Failed to parse response: {e}"))
    }

    async fn mudae_command(&self) -> Result<String, String> {
        let url = format!("{}/mudae-command", self.base_url);

        let mut request = self.http.get(&url);
        if !self.auth_token.is_empty() {
            request = request.header("Authorization", self.auth_token.as_str());
        }

        let response = request
            .send()
            .await
            .map_err(|e| format!("HTTP request failed: {e}"))?;
        let response = ensure_success(response).await?;

        let parsed: MudaeCommandResponse = response
            .json()
            .await
            .map_err(|e| format!("Failed to parse response: {e}"))?;
        Ok(parsed.mudae_command)
    }
}
