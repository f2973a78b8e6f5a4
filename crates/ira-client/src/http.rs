//! Shared HTTP client construction and the browser headers the upstream service expects.

use std::time::Duration;

use crate::error::{IraError, Result};

pub(crate) const ORIGIN: &str = "https://ira.rumik.ai";
pub(crate) const REFERER: &str = "https://ira.rumik.ai/";
const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";

/// Builds the reqwest client used for both token and chat requests. Every request inherits `timeout`.
pub fn build_http_client(timeout: Duration) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(BROWSER_USER_AGENT)
        .build()
        .map_err(IraError::Network)
}
