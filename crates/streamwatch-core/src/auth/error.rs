use thiserror::Error;

pub type Result<T> = std::result::Result<T, AuthError>;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error(
        "Twitch client credentials are not configured (set TWITCH_CLIENT_ID and TWITCH_CLIENT_SECRET)"
    )]
    MissingClientCredentials,

    #[error("credential exchange request failed: {0}")]
    Network(String),

    #[error("credential exchange rejected with status {status}: {message}")]
    Rejected { status: u16, message: String },

    #[error("credential exchange response did not contain an access token")]
    MissingToken,

    #[error("invalid credential exchange response: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for AuthError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AuthError::Network(format!("request timed out: {err}"))
        } else {
            AuthError::Network(err.to_string())
        }
    }
}
