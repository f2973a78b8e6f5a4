//! Client configuration: secrets, endpoints, protocol variant and limits. Loaded from env.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::error::{IraError, Result};

pub const DEFAULT_TOKEN_URL: &str = "https://securetoken.googleapis.com/v1/token";
pub const DEFAULT_LEGACY_CHAT_URL: &str = "https://rumik-ai.onrender.com/v1/users/messages";
pub const DEFAULT_V3_CHAT_URL: &str = "https://api-ira.rumik.ai/api/v3/data/messages";
pub const DEFAULT_CREDENTIALS_FILE: &str = "IraAI.json";
pub const DEFAULT_TIMEOUT_SECS: u64 = 100;
pub const DEFAULT_AUTH_MAX_ATTEMPTS: u32 = 3;

/// Wire-protocol variant of the chat service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Protocol {
    /// `firebaseId` + fixed numeric `chemistryId`; every returned message is part of the reply.
    Legacy,
    /// Random hex `chemistry_id`; only `assistant` messages are part of the reply.
    DataV3,
}

impl Protocol {
    pub fn default_chat_url(&self) -> &'static str {
        match self {
            Protocol::Legacy => DEFAULT_LEGACY_CHAT_URL,
            Protocol::DataV3 => DEFAULT_V3_CHAT_URL,
        }
    }
}

impl FromStr for Protocol {
    type Err = IraError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "legacy" | "v1" => Ok(Protocol::Legacy),
            "v3" | "data-v3" => Ok(Protocol::DataV3),
            other => Err(IraError::Config(format!(
                "IRA_PROTOCOL must be 'legacy' or 'v3', got '{}'",
                other
            ))),
        }
    }
}

/// Everything needed to build a CredentialStore and a ChatClient.
#[derive(Debug, Clone)]
pub struct IraConfig {
    /// IRA_API_KEY or KEY
    pub api_key: String,
    /// IRA_REFRESH_TOKEN or REFRESH_TOKEN
    pub refresh_token: String,
    pub credentials_file: PathBuf,
    pub protocol: Protocol,
    pub token_url: String,
    pub chat_url: String,
    /// Numeric chemistry id sent by the legacy protocol.
    pub chemistry_id: u64,
    pub timeout: Duration,
    /// Upper bound on load/refresh rounds before giving up with AuthUnrecoverable.
    pub auth_max_attempts: u32,
}

impl IraConfig {
    /// Config with defaults for everything except the two secrets.
    pub fn new(api_key: impl Into<String>, refresh_token: impl Into<String>) -> Self {
        let protocol = Protocol::DataV3;
        Self {
            api_key: api_key.into(),
            refresh_token: refresh_token.into(),
            credentials_file: PathBuf::from(DEFAULT_CREDENTIALS_FILE),
            protocol,
            token_url: DEFAULT_TOKEN_URL.to_string(),
            chat_url: protocol.default_chat_url().to_string(),
            chemistry_id: 1,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            auth_max_attempts: DEFAULT_AUTH_MAX_ATTEMPTS,
        }
    }

    /// Load from environment variables. Missing secrets load as empty strings and only fail
    /// once a refresh is attempted, so an existing credentials file keeps working without them.
    pub fn from_env() -> Result<Self> {
        let api_key = env::var("IRA_API_KEY")
            .or_else(|_| env::var("KEY"))
            .unwrap_or_default();
        let refresh_token = env::var("IRA_REFRESH_TOKEN")
            .or_else(|_| env::var("REFRESH_TOKEN"))
            .unwrap_or_default();
        let protocol = match env::var("IRA_PROTOCOL") {
            Ok(s) => s.parse()?,
            Err(_) => Protocol::DataV3,
        };
        let credentials_file = env::var("IRA_CREDENTIALS_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CREDENTIALS_FILE));
        let token_url =
            env::var("IRA_TOKEN_URL").unwrap_or_else(|_| DEFAULT_TOKEN_URL.to_string());
        let chat_url = env::var("IRA_CHAT_URL")
            .unwrap_or_else(|_| protocol.default_chat_url().to_string());
        let chemistry_id = env::var("IRA_CHEMISTRY_ID")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(1);
        let timeout_secs = env::var("IRA_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        let auth_max_attempts = env::var("IRA_AUTH_MAX_ATTEMPTS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_AUTH_MAX_ATTEMPTS);

        Ok(Self {
            api_key,
            refresh_token,
            credentials_file,
            protocol,
            token_url,
            chat_url,
            chemistry_id,
            timeout: Duration::from_secs(timeout_secs),
            auth_max_attempts,
        })
    }

    pub fn with_protocol(mut self, protocol: Protocol) -> Self {
        self.protocol = protocol;
        self.chat_url = protocol.default_chat_url().to_string();
        self
    }

    pub fn with_credentials_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.credentials_file = path.into();
        self
    }

    pub fn with_token_url(mut self, url: impl Into<String>) -> Self {
        self.token_url = url.into();
        self
    }

    pub fn with_chat_url(mut self, url: impl Into<String>) -> Self {
        self.chat_url = url.into();
        self
    }

    /// Validate config (URLs parse, attempt bound and timeout are non-zero).
    pub fn validate(&self) -> Result<()> {
        for (name, url) in [("IRA_TOKEN_URL", &self.token_url), ("IRA_CHAT_URL", &self.chat_url)] {
            if reqwest::Url::parse(url).is_err() {
                return Err(IraError::Config(format!("{} is not a valid URL: {}", name, url)));
            }
        }
        if self.auth_max_attempts == 0 {
            return Err(IraError::Config("IRA_AUTH_MAX_ATTEMPTS must be at least 1".into()));
        }
        if self.timeout.is_zero() {
            return Err(IraError::Config("IRA_TIMEOUT_SECS must be at least 1".into()));
        }
        Ok(())
    }
}
