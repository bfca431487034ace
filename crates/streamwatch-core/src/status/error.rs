use thiserror::Error;

use crate::auth::AuthError;

pub type Result<T> = std::result::Result<T, ResolveError>;

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("request to Twitch timed out")]
    Timeout,

    #[error("request to Twitch failed: {0}")]
    Network(String),

    #[error("Twitch returned status {status}: {message}")]
    Http { status: u16, message: String },

    #[error("invalid response from Twitch: {0}")]
    InvalidResponse(String),
}

impl ResolveError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ResolveError::Http { status: 401, .. })
    }
}

impl From<reqwest::Error> for ResolveError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ResolveError::Timeout
        } else {
            ResolveError::Network(err.to_string())
        }
    }
}
