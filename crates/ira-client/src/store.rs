//! CredentialStore: guarantees callers a usable (access_token, user_id) pair.
//!
//! The file is only written by a refresh. Initialization alternates load and refresh a bounded
//! number of times, then gives up with `AuthUnrecoverable`. Refreshes are serialized behind one
//! mutex so concurrent token expiries collapse into a single exchange.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::{info, instrument, warn};

use crate::config::DEFAULT_AUTH_MAX_ATTEMPTS;
use crate::credential::{read_credential_file, write_credential_file, Credential};
use crate::error::{IraError, Result};
use crate::issuer::TokenIssuer;
use crate::mask::mask_token;

pub struct CredentialStore {
    path: PathBuf,
    issuer: Arc<dyn TokenIssuer>,
    max_attempts: u32,
    current: RwLock<Option<Credential>>,
    refresh_lock: Mutex<()>,
}

impl CredentialStore {
    pub fn new(path: impl Into<PathBuf>, issuer: Arc<dyn TokenIssuer>) -> Self {
        Self {
            path: path.into(),
            issuer,
            max_attempts: DEFAULT_AUTH_MAX_ATTEMPTS,
            current: RwLock::new(None),
            refresh_lock: Mutex::new(()),
        }
    }

    /// Max refreshes during initialization (at least 1).
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the credentials file. Never touches the file or the cached credential.
    pub async fn load(&self) -> Result<Credential> {
        read_credential_file(&self.path).await
    }

    /// Exchanges the refresh token, persists the result and caches it.
    pub async fn refresh(&self) -> Result<Credential> {
        let _guard = self.refresh_lock.lock().await;
        self.refresh_locked().await
    }

    /// Loads the credential, refreshing when the file is missing, corrupt or incomplete.
    /// Returns the cached credential if one is already held.
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub async fn initialize(&self) -> Result<Credential> {
        let _guard = self.refresh_lock.lock().await;
        if let Some(credential) = self.current.read().await.clone() {
            return Ok(credential);
        }

        let mut refreshes = 0;
        let mut last_refresh_error: Option<String> = None;
        loop {
            let load_error = match self.load().await {
                Ok(credential) => {
                    info!(
                        user_id = %credential.user_id,
                        access_token = %mask_token(&credential.access_token),
                        "Credentials loaded"
                    );
                    *self.current.write().await = Some(credential.clone());
                    return Ok(credential);
                }
                Err(e) if e.is_credential_error() => e,
                Err(e) => return Err(e),
            };

            if refreshes >= self.max_attempts {
                let reason = last_refresh_error.unwrap_or_else(|| load_error.to_string());
                warn!(attempts = refreshes, reason = %reason, "Giving up on credentials");
                return Err(IraError::AuthUnrecoverable {
                    attempts: refreshes,
                    reason,
                });
            }

            refreshes += 1;
            warn!(attempt = refreshes, error = %load_error, "Credentials unusable, refreshing");
            match self.refresh_locked().await {
                Ok(_) => last_refresh_error = None,
                Err(e) => {
                    warn!(attempt = refreshes, error = %e, "Token refresh failed");
                    last_refresh_error = Some(e.to_string());
                }
            }
        }
    }

    /// Cached credential, initializing on first use.
    pub async fn current(&self) -> Result<Credential> {
        if let Some(credential) = self.current.read().await.clone() {
            return Ok(credential);
        }
        self.initialize().await
    }

    /// Refresh after `stale` was rejected. If another caller already replaced `stale`
    /// while this one waited for the lock, the newer credential is returned without a new exchange.
    pub async fn refresh_expired(&self, stale: &Credential) -> Result<Credential> {
        let _guard = self.refresh_lock.lock().await;
        if let Some(current) = self.current.read().await.clone() {
            if current.access_token != stale.access_token {
                info!("Token already refreshed by a concurrent request");
                return Ok(current);
            }
        }
        self.refresh_locked().await
    }

    async fn refresh_locked(&self) -> Result<Credential> {
        let credential = self.issuer.exchange().await?;
        write_credential_file(&self.path, &credential).await?;
        info!(path = %self.path.display(), "Token saved");
        *self.current.write().await = Some(credential.clone());
        Ok(credential)
    }
}
