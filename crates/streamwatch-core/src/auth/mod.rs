//! App access tokens for the Twitch API (OAuth client-credentials grant).
//!
//! The token lives only in process memory. There is no expiry tracking: a
//! token is reused until a caller sees it rejected and calls
//! [`CredentialCache::invalidate`].

pub mod error;

use serde::{Deserialize, Serialize};
use std::fmt;
use tokio::sync::Mutex;
use tracing::{debug, info};

pub use error::{AuthError, Result};

use crate::config::{Secret, TwitchConfig};

/// A bearer token issued by the platform.
#[derive(Clone)]
pub struct AccessToken {
    token: Secret,
    expires_in: Option<u64>,
}

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: Secret::new(token),
            expires_in: None,
        }
    }

    pub fn bearer(&self) -> &str {
        self.token.expose()
    }

    /// Lifetime reported by the platform at issue time, in seconds.
    pub fn expires_in(&self) -> Option<u64> {
        self.expires_in
    }

    /// First and last few characters, for display.
    pub fn masked(&self) -> String {
        let value = self.bearer();
        let chars: Vec<char> = value.chars().collect();
        if chars.len() <= 8 {
            return "*".repeat(chars.len());
        }
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{head}…{tail}")
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessToken")
            .field("token", &self.token)
            .field("expires_in", &self.expires_in)
            .finish()
    }
}

#[derive(Serialize)]
struct TokenRequest<'a> {
    client_id: &'a str,
    client_secret: &'a str,
    grant_type: &'static str,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    expires_in: Option<u64>,
}

/// Acquires and memoizes the app access token.
pub struct CredentialCache {
    http: reqwest::Client,
    auth_url: String,
    client_id: Option<String>,
    client_secret: Option<Secret>,
    cached: Mutex<Option<AccessToken>>,
}

impl CredentialCache {
    pub fn new(config: &TwitchConfig, http: reqwest::Client) -> Self {
        Self {
            http,
            auth_url: config.auth_url.clone(),
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            cached: Mutex::new(None),
        }
    }

    pub fn client_id(&self) -> Option<&str> {
        self.client_id.as_deref()
    }

    /// Return the cached token, exchanging client credentials for a new one
    /// when the cache is empty.
    ///
    /// The cache lock is held across the exchange so concurrent first
    /// callers share one request.
    pub async fn get_credential(&self) -> Result<AccessToken> {
        let mut cached = self.cached.lock().await;
        if let Some(token) = cached.as_ref() {
            return Ok(token.clone());
        }

        let token = self.exchange().await?;
        *cached = Some(token.clone());
        Ok(token)
    }

    /// Drop the cached token so the next [`get_credential`](Self::get_credential)
    /// performs a fresh exchange.
    pub async fn invalidate(&self) {
        let mut cached = self.cached.lock().await;
        if cached.take().is_some() {
            debug!("cached access token invalidated");
        }
    }

    /// Drop the cached token only if it is still `rejected`.
    ///
    /// A concurrent caller may already have replaced it with a fresh one,
    /// which is kept.
    pub async fn invalidate_if(&self, rejected: &AccessToken) {
        let mut cached = self.cached.lock().await;
        if cached
            .as_ref()
            .is_some_and(|token| token.bearer() == rejected.bearer())
        {
            *cached = None;
            debug!("rejected access token invalidated");
        }
    }

    async fn exchange(&self) -> Result<AccessToken> {
        let (Some(client_id), Some(client_secret)) =
            (self.client_id.as_deref(), self.client_secret.as_ref())
        else {
            return Err(AuthError::MissingClientCredentials);
        };

        let request = TokenRequest {
            client_id,
            client_secret: client_secret.expose(),
            grant_type: "client_credentials",
        };

        debug!(url = %self.auth_url, "requesting app access token");
        let response = self.http.post(&self.auth_url).form(&request).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AuthError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let body: TokenResponse = response
            .json()
            .await
            .map_err(|e| AuthError::InvalidResponse(e.to_string()))?;

        let access_token = body
            .access_token
            .filter(|t| !t.trim().is_empty())
            .ok_or(AuthError::MissingToken)?;

        info!(expires_in = ?body.expires_in, "obtained app access token");
        Ok(AccessToken {
            token: Secret::new(access_token),
            expires_in: body.expires_in,
        })
    }
}
