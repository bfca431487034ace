//! Live/offline status resolution against the Helix streams endpoint.

pub mod error;
pub mod helix;

use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{debug, warn};

pub use error::{ResolveError, Result};

use crate::auth::{AccessToken, CredentialCache};
use crate::config::TwitchConfig;
use helix::{HelixStream, StreamsResponse, sized_thumbnail};

/// Metadata of a live broadcast, ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiveStream {
    pub user_login: String,
    pub display_name: String,
    pub category: String,
    pub title: String,
    pub viewer_count: u64,
    /// Thumbnail with dimensions already substituted.
    pub thumbnail_url: String,
    pub url: String,
    pub started_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamStatus {
    /// The channel name as the caller spelled it.
    pub channel: String,
    pub live: Option<LiveStream>,
}

impl StreamStatus {
    pub fn is_live(&self) -> bool {
        self.live.is_some()
    }
}

/// Result for one channel of a batch lookup.
#[derive(Debug)]
pub struct ChannelStatus {
    pub channel: String,
    pub outcome: Result<StreamStatus>,
}

impl ChannelStatus {
    pub fn is_live(&self) -> bool {
        self.outcome.as_ref().is_ok_and(StreamStatus::is_live)
    }
}

pub struct StatusResolver {
    http: reqwest::Client,
    api_base_url: String,
    web_base_url: String,
    credentials: Arc<CredentialCache>,
}

impl StatusResolver {
    /// Build a resolver with its own HTTP client and credential cache.
    ///
    /// Every request made through it honors `config.request_timeout`.
    pub fn new(config: &TwitchConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| ResolveError::Network(format!("failed to build HTTP client: {e}")))?;
        let credentials = Arc::new(CredentialCache::new(config, http.clone()));
        Ok(Self::with_credentials(config, http, credentials))
    }

    pub fn with_credentials(
        config: &TwitchConfig,
        http: reqwest::Client,
        credentials: Arc<CredentialCache>,
    ) -> Self {
        Self {
            http,
            api_base_url: config.api_base_url.trim_end_matches('/').to_string(),
            web_base_url: config.web_base_url.trim_end_matches('/').to_string(),
            credentials,
        }
    }

    pub fn credentials(&self) -> &Arc<CredentialCache> {
        &self.credentials
    }

    /// Look up one channel. Registry membership is not required.
    ///
    /// A 401 from the platform invalidates the rejected token and the lookup
    /// is retried once with a fresh one.
    pub async fn resolve_one(&self, channel: &str) -> Result<StreamStatus> {
        let token = self.credentials.get_credential().await?;
        match self.query(channel, &token).await {
            Err(e) if e.is_unauthorized() => {
                debug!(channel, "access token rejected, re-authenticating");
                self.credentials.invalidate_if(&token).await;
                let token = self.credentials.get_credential().await?;
                self.query(channel, &token).await
            }
            other => other,
        }
    }

    /// Look up channels one at a time, in order.
    ///
    /// Failing to obtain a token at all fails the whole call. Once a token
    /// is in hand, each channel's failure is recorded in its own entry and
    /// the batch continues.
    pub async fn resolve_many(&self, channels: &[String]) -> Result<Vec<ChannelStatus>> {
        if channels.is_empty() {
            return Ok(Vec::new());
        }

        self.credentials.get_credential().await?;

        let mut results = Vec::with_capacity(channels.len());
        for channel in channels {
            let outcome = self.resolve_one(channel).await;
            if let Err(e) = &outcome {
                warn!(channel = %channel, error = %e, "failed to resolve live status");
            }
            results.push(ChannelStatus {
                channel: channel.clone(),
                outcome,
            });
        }
        Ok(results)
    }

    async fn query(&self, channel: &str, token: &AccessToken) -> Result<StreamStatus> {
        let login = channel.to_lowercase();
        let url = format!("{}/streams", self.api_base_url);

        debug!(channel, login = %login, "querying stream status");
        let response = self
            .http
            .get(&url)
            .header("Client-ID", self.credentials.client_id().unwrap_or_default())
            .bearer_auth(token.bearer())
            .query(&[("user_login", login.as_str())])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ResolveError::Http {
                status: status.as_u16(),
                message,
            });
        }

        let body: StreamsResponse = response
            .json()
            .await
            .map_err(|e| ResolveError::InvalidResponse(e.to_string()))?;

        Ok(StreamStatus {
            channel: channel.to_string(),
            live: body
                .data
                .into_iter()
                .next()
                .map(|stream| self.live_stream(stream)),
        })
    }

    fn live_stream(&self, stream: HelixStream) -> LiveStream {
        LiveStream {
            url: format!("{}/{}", self.web_base_url, stream.user_login),
            thumbnail_url: sized_thumbnail(&stream.thumbnail_url),
            user_login: stream.user_login,
            display_name: stream.user_name,
            category: stream.game_name,
            title: stream.title,
            viewer_count: stream.viewer_count,
            started_at: stream.started_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::AuthError;
    use crate::test_utils::{MockStream, MockTwitch};
    use std::time::Duration;

    fn names(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_string()).collect()
    }

    #[tokio::test]
    async fn live_channel_carries_metadata() {
        let mock = MockTwitch::start().await.unwrap();
        mock.set_live(MockStream::new("alice", "Chess", "Rapid games", 120))
            .await;
        let resolver = StatusResolver::new(&mock.config()).unwrap();

        let status = resolver.resolve_one("Alice").await.unwrap();

        assert_eq!(status.channel, "Alice");
        let live = status.live.unwrap();
        assert_eq!(live.category, "Chess");
        assert_eq!(live.title, "Rapid games");
        assert_eq!(live.viewer_count, 120);
        assert_eq!(live.url, format!("{}/alice", mock.base_url()));
        assert!(live.thumbnail_url.ends_with("live_user_alice-640x360.jpg"));
        assert!(live.started_at.is_some());
        assert_eq!(mock.queried_logins().await, vec!["alice"]);
    }

    #[tokio::test]
    async fn empty_result_is_offline() {
        let mock = MockTwitch::start().await.unwrap();
        let resolver = StatusResolver::new(&mock.config()).unwrap();

        let status = resolver.resolve_one("ghost").await.unwrap();
        assert!(!status.is_live());
        assert_eq!(mock.stream_calls(), 1);
    }

    #[tokio::test]
    async fn consecutive_lookups_share_one_token() {
        let mock = MockTwitch::start().await.unwrap();
        let resolver = StatusResolver::new(&mock.config()).unwrap();

        resolver.resolve_one("alice").await.unwrap();
        resolver.resolve_many(&names(&["bob", "carol"])).await.unwrap();
        assert_eq!(mock.token_calls(), 1);

        resolver.credentials().invalidate().await;
        resolver.resolve_one("alice").await.unwrap();
        assert_eq!(mock.token_calls(), 2);
    }

    #[tokio::test]
    async fn rejected_token_is_refreshed_once() {
        let mock = MockTwitch::start().await.unwrap();
        let resolver = StatusResolver::new(&mock.config()).unwrap();

        resolver.resolve_one("alice").await.unwrap();
        mock.revoke_tokens().await;

        let status = resolver.resolve_one("alice").await.unwrap();
        assert!(!status.is_live());
        assert_eq!(mock.token_calls(), 2);
        assert_eq!(mock.stream_calls(), 3);
    }

    #[tokio::test]
    async fn empty_batch_makes_no_requests() {
        let mock = MockTwitch::start().await.unwrap();
        let resolver = StatusResolver::new(&mock.config()).unwrap();

        assert!(resolver.resolve_many(&[]).await.unwrap().is_empty());
        assert_eq!(mock.token_calls(), 0);
        assert_eq!(mock.stream_calls(), 0);
    }

    #[tokio::test]
    async fn batch_isolates_per_channel_failures() {
        let mock = MockTwitch::start().await.unwrap();
        mock.set_live(MockStream::new("alice", "Chess", "Rapid games", 120))
            .await;
        mock.set_live(MockStream::new("carol", "Art", "Painting", 7))
            .await;
        mock.fail_lookups_for("bob").await;
        let resolver = StatusResolver::new(&mock.config()).unwrap();

        let results = resolver
            .resolve_many(&names(&["alice", "Bob", "carol"]))
            .await
            .unwrap();

        let channels: Vec<&str> = results.iter().map(|r| r.channel.as_str()).collect();
        assert_eq!(channels, vec!["alice", "Bob", "carol"]);
        assert!(results[0].is_live());
        assert!(matches!(
            results[1].outcome,
            Err(ResolveError::Http { status: 500, .. })
        ));
        assert!(results[2].is_live());
        assert_eq!(mock.queried_logins().await, vec!["alice", "bob", "carol"]);
    }

    #[tokio::test]
    async fn batch_fails_when_no_token_can_be_obtained() {
        let mock = MockTwitch::start().await.unwrap();
        mock.reject_token_requests(true);
        let resolver = StatusResolver::new(&mock.config()).unwrap();

        let err = resolver
            .resolve_many(&names(&["alice"]))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ResolveError::Auth(AuthError::Rejected { status: 400, .. })
        ));
        assert_eq!(mock.stream_calls(), 0);
    }

    #[tokio::test]
    async fn slow_platform_times_out() {
        let mock = MockTwitch::start().await.unwrap();
        mock.delay_streams(Duration::from_millis(500));
        let mut config = mock.config();
        config.request_timeout = Duration::from_millis(100);
        let resolver = StatusResolver::new(&config).unwrap();

        let err = resolver.resolve_one("alice").await.unwrap_err();
        assert!(matches!(err, ResolveError::Timeout));
    }
}
