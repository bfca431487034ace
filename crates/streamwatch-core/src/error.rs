use thiserror::Error;

use crate::status::ResolveError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Resolve(#[from] ResolveError),
    #[error("Configuration error: {0}")]
    Configuration(String),
}
