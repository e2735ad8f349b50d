// src/fetch/auth.rs

use anyhow::{Context, Result};
use reqwest::Client;
use serde::Deserialize;

const TOKEN_URL: &str = "https://api.dropbox.com/oauth2/token";

/// Credentials for the refresh-token grant. Built once at startup and passed
/// explicitly to whoever needs a token; nothing here is process-global.
#[derive(Debug, Clone)]
pub struct DropboxAuth {
    pub refresh_token: String,
    pub app_key: String,
    pub app_secret: String,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

impl DropboxAuth {
    /// Read credentials from `DP_TOKEN`, `DP_APP_TOKEN` and `DP_SECRET`.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            refresh_token: std::env::var("DP_TOKEN").context("DP_TOKEN not set")?,
            app_key: std::env::var("DP_APP_TOKEN").context("DP_APP_TOKEN not set")?,
            app_secret: std::env::var("DP_SECRET").context("DP_SECRET not set")?,
        })
    }

    /// Exchange the refresh token for a short-lived access token.
    pub async fn access_token(&self, client: &Client) -> Result<String> {
        let resp = client
            .post(TOKEN_URL)
            .form(&[
                ("grant_type", "refresh_token"),
                ("refresh_token", self.refresh_token.as_str()),
                ("client_id", self.app_key.as_str()),
                ("client_secret", self.app_secret.as_str()),
            ])
            .send()
            .await
            .context("POST oauth2/token")?
            .error_for_status()
            .context("token endpoint rejected the refresh grant")?;

        let token: TokenResponse = resp.json().await.context("parsing token response")?;
        Ok(token.access_token)
    }
}
