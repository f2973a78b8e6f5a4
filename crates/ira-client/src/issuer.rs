//! Refresh-token exchange against the token-issuing endpoint.
//!
//! [`TokenIssuer`] is the seam the [`crate::CredentialStore`] refreshes through; [`SecureTokenIssuer`]
//! is the HTTP implementation (`grant_type=refresh_token` form POST, API key as `key` query param).

use async_trait::async_trait;
use reqwest::header::{ACCEPT, ORIGIN};
use serde::Deserialize;
use serde_json::Value;
use tracing::{info, instrument, warn};

use crate::config::IraConfig;
use crate::credential::Credential;
use crate::error::{IraError, Result};
use crate::http;
use crate::mask::mask_token;

/// Exchanges the long-lived secret for a fresh credential. Does not persist anything.
#[async_trait]
pub trait TokenIssuer: Send + Sync {
    async fn exchange(&self) -> Result<Credential>;
}

/// Token endpoint client (Google secure-token style API).
#[derive(Clone)]
pub struct SecureTokenIssuer {
    client: reqwest::Client,
    token_url: String,
    api_key: String,
    refresh_token: String,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    message: String,
}

impl SecureTokenIssuer {
    pub fn new(
        client: reqwest::Client,
        token_url: impl Into<String>,
        api_key: impl Into<String>,
        refresh_token: impl Into<String>,
    ) -> Self {
        Self {
            client,
            token_url: token_url.into(),
            api_key: api_key.into(),
            refresh_token: refresh_token.into(),
        }
    }

    pub fn from_config(client: reqwest::Client, config: &IraConfig) -> Self {
        Self::new(
            client,
            config.token_url.clone(),
            config.api_key.clone(),
            config.refresh_token.clone(),
        )
    }
}

/// The request URL carries the API key as `?key=`; drop it before the error is displayed anywhere.
fn network_error(e: reqwest::Error) -> IraError {
    IraError::Network(e.without_url())
}

/// `error.message` from a 400 body, or the raw body when it has another shape.
fn invalid_grant_message(body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .map(|b| b.error.message)
        .unwrap_or_else(|_| body.to_string())
}

#[async_trait]
impl TokenIssuer for SecureTokenIssuer {
    #[instrument(skip(self), fields(token_url = %self.token_url))]
    async fn exchange(&self) -> Result<Credential> {
        if self.api_key.is_empty() || self.refresh_token.is_empty() {
            return Err(IraError::Config(
                "KEY and REFRESH_TOKEN must be set to refresh credentials".to_string(),
            ));
        }

        info!(
            api_key = %mask_token(&self.api_key),
            refresh_token = %mask_token(&self.refresh_token),
            "Requesting new access token"
        );

        let response = self
            .client
            .post(&self.token_url)
            .query(&[("key", self.api_key.as_str())])
            .header(ACCEPT, "*/*")
            .header(ORIGIN, http::ORIGIN)
            .form(&[
                ("grant_type", "refresh_token"),
                ("refresh_token", self.refresh_token.as_str()),
            ])
            .send()
            .await
            .map_err(network_error)?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(network_error)?;

        match status {
            200 => {
                let value: Value = serde_json::from_str(&body).map_err(|e| {
                    IraError::UnexpectedResponse(format!("token response is not JSON: {}", e))
                })?;
                let map = match value {
                    Value::Object(map) => map,
                    _ => {
                        return Err(IraError::UnexpectedResponse(
                            "token response is not a JSON object".to_string(),
                        ))
                    }
                };
                let credential = Credential::from_map(map).map_err(|e| {
                    IraError::UnexpectedResponse(format!("token response: {}", e))
                })?;
                info!(
                    user_id = %credential.user_id,
                    access_token = %mask_token(&credential.access_token),
                    "Access token issued"
                );
                Ok(credential)
            }
            400 => {
                let message = invalid_grant_message(&body);
                warn!(message = %message, "Token endpoint rejected refresh token");
                Err(IraError::InvalidGrant { message })
            }
            status => {
                warn!(status, "Token endpoint returned unexpected status");
                Err(IraError::Upstream { status, body })
            }
        }
    }
}
