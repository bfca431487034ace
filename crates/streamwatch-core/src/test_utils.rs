//! Test utilities for streamwatch-core
//!
//! This module provides helpers for testing that need to be accessible
//! across crate boundaries: an in-memory registry store and a mock of the
//! Twitch token and streams endpoints.

use async_trait::async_trait;
use axum::{
    Form, Json, Router,
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    routing::{get, post},
};
use serde_json::{Value, json};
use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use crate::config::TwitchConfig;
use crate::registry::{RegistryError, RegistryStore};

pub const MOCK_CLIENT_ID: &str = "test-client-id";
pub const MOCK_CLIENT_SECRET: &str = "test-client-secret";

/// In-memory registry storage - doesn't touch the filesystem
#[derive(Default)]
pub struct InMemoryRegistryStore {
    names: Mutex<Vec<String>>,
    saves: AtomicUsize,
    fail_saves: AtomicBool,
}

impl InMemoryRegistryStore {
    pub fn with_names(names: &[&str]) -> Self {
        Self {
            names: Mutex::new(names.iter().map(|s| (*s).to_string()).collect()),
            ..Self::default()
        }
    }

    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    pub fn fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl RegistryStore for InMemoryRegistryStore {
    async fn load(&self) -> Vec<String> {
        self.names.lock().await.clone()
    }

    async fn save(&self, names: &[String]) -> crate::registry::Result<()> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(RegistryError::Io {
                path: PathBuf::from("<memory>"),
                source: std::io::Error::other("simulated write failure"),
            });
        }
        *self.names.lock().await = names.to_vec();
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// One live stream the mock platform reports.
#[derive(Debug, Clone)]
pub struct MockStream {
    pub user_login: String,
    pub user_name: String,
    pub game_name: String,
    pub title: String,
    pub viewer_count: u64,
}

impl MockStream {
    pub fn new(login: &str, game_name: &str, title: &str, viewer_count: u64) -> Self {
        Self {
            user_login: login.to_lowercase(),
            user_name: login.to_string(),
            game_name: game_name.to_string(),
            title: title.to_string(),
            viewer_count,
        }
    }

    fn to_json(&self) -> Value {
        json!({
            "id": "40952121085",
            "user_id": "101051819",
            "user_login": self.user_login,
            "user_name": self.user_name,
            "game_id": "743",
            "game_name": self.game_name,
            "type": "live",
            "title": self.title,
            "viewer_count": self.viewer_count,
            "started_at": "2026-10-17T15:00:00Z",
            "language": "en",
            "thumbnail_url": format!(
                "https://static-cdn.jtvnw.net/previews-ttv/live_user_{}-{{width}}x{{height}}.jpg",
                self.user_login
            ),
            "tags": [],
            "is_mature": false
        })
    }
}

#[derive(Default)]
struct MockState {
    token_calls: AtomicUsize,
    stream_calls: AtomicUsize,
    issued_tokens: AtomicUsize,
    valid_token: Mutex<Option<String>>,
    live: Mutex<HashMap<String, MockStream>>,
    failing_logins: Mutex<HashSet<String>>,
    queried_logins: Mutex<Vec<String>>,
    reject_token_requests: AtomicBool,
    omit_access_token: AtomicBool,
    stream_delay_ms: AtomicU64,
}

/// A local HTTP server standing in for the Twitch token and Helix streams
/// endpoints. The server stops when this value is dropped.
pub struct MockTwitch {
    base_url: String,
    state: Arc<MockState>,
    task: JoinHandle<()>,
}

impl MockTwitch {
    pub async fn start() -> std::io::Result<Self> {
        let state = Arc::new(MockState::default());
        let router = Router::new()
            .route("/oauth2/token", post(token_handler))
            .route("/helix/streams", get(streams_handler))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let task = tokio::spawn(async move {
            let _ = axum::serve(listener, router).await;
        });

        Ok(Self {
            base_url: format!("http://{addr}"),
            state,
            task,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Config pointing at this server with valid client credentials.
    pub fn config(&self) -> TwitchConfig {
        TwitchConfig::with_base_url(&self.base_url)
            .with_credentials(MOCK_CLIENT_ID, MOCK_CLIENT_SECRET)
    }

    pub async fn set_live(&self, stream: MockStream) {
        self.state
            .live
            .lock()
            .await
            .insert(stream.user_login.clone(), stream);
    }

    /// Make stream lookups for `login` answer with a server error.
    pub async fn fail_lookups_for(&self, login: &str) {
        self.state
            .failing_logins
            .lock()
            .await
            .insert(login.to_lowercase());
    }

    /// Invalidate every token issued so far; stream lookups with an old
    /// token get 401 until a new token is exchanged.
    pub async fn revoke_tokens(&self) {
        *self.state.valid_token.lock().await = None;
    }

    pub fn reject_token_requests(&self, reject: bool) {
        self.state
            .reject_token_requests
            .store(reject, Ordering::SeqCst);
    }

    pub fn omit_access_token(&self, omit: bool) {
        self.state.omit_access_token.store(omit, Ordering::SeqCst);
    }

    pub fn delay_streams(&self, delay: Duration) {
        self.state
            .stream_delay_ms
            .store(delay.as_millis() as u64, Ordering::SeqCst);
    }

    pub fn token_calls(&self) -> usize {
        self.state.token_calls.load(Ordering::SeqCst)
    }

    pub fn stream_calls(&self) -> usize {
        self.state.stream_calls.load(Ordering::SeqCst)
    }

    /// `user_login` values received by the streams endpoint, in order.
    pub async fn queried_logins(&self) -> Vec<String> {
        self.state.queried_logins.lock().await.clone()
    }
}

impl Drop for MockTwitch {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn token_handler(
    State(state): State<Arc<MockState>>,
    Form(form): Form<HashMap<String, String>>,
) -> (StatusCode, Json<Value>) {
    state.token_calls.fetch_add(1, Ordering::SeqCst);

    let credentials_ok = form.get("client_id").map(String::as_str) == Some(MOCK_CLIENT_ID)
        && form.get("client_secret").map(String::as_str) == Some(MOCK_CLIENT_SECRET)
        && form.get("grant_type").map(String::as_str) == Some("client_credentials");

    if state.reject_token_requests.load(Ordering::SeqCst) || !credentials_ok {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "status": 400, "message": "invalid client secret" })),
        );
    }

    if state.omit_access_token.load(Ordering::SeqCst) {
        return (
            StatusCode::OK,
            Json(json!({ "expires_in": 5_011_271, "token_type": "bearer" })),
        );
    }

    let n = state.issued_tokens.fetch_add(1, Ordering::SeqCst) + 1;
    let token = format!("mock-token-{n}");
    *state.valid_token.lock().await = Some(token.clone());

    (
        StatusCode::OK,
        Json(json!({
            "access_token": token,
            "expires_in": 5_011_271,
            "token_type": "bearer"
        })),
    )
}

async fn streams_handler(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> (StatusCode, Json<Value>) {
    state.stream_calls.fetch_add(1, Ordering::SeqCst);

    let delay = state.stream_delay_ms.load(Ordering::SeqCst);
    if delay > 0 {
        tokio::time::sleep(Duration::from_millis(delay)).await;
    }

    let client_id = headers.get("client-id").and_then(|v| v.to_str().ok());
    if client_id != Some(MOCK_CLIENT_ID) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "Unauthorized", "status": 401, "message": "Client ID missing" })),
        );
    }

    let bearer = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(ToOwned::to_owned);
    let valid = state.valid_token.lock().await.clone();
    if bearer.is_none() || bearer != valid {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "Unauthorized", "status": 401, "message": "Invalid OAuth token" })),
        );
    }

    let login = query.get("user_login").cloned().unwrap_or_default();
    state.queried_logins.lock().await.push(login.clone());

    if state.failing_logins.lock().await.contains(&login) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "Internal Server Error", "status": 500, "message": "" })),
        );
    }

    let data: Vec<Value> = state
        .live
        .lock()
        .await
        .get(&login)
        .map(MockStream::to_json)
        .into_iter()
        .collect();

    (
        StatusCode::OK,
        Json(json!({ "data": data, "pagination": {} })),
    )
}
