// Channel registry and live-status resolution, without any transport

pub mod auth;
pub mod config;
pub mod error;
pub mod registry;
pub mod status;
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
pub mod tools;
pub mod utils;
