//! Wire types for the Helix `GET /streams` endpoint.

use chrono::{DateTime, Utc};
use serde::Deserialize;

pub const THUMBNAIL_WIDTH: u32 = 640;
pub const THUMBNAIL_HEIGHT: u32 = 360;

#[derive(Debug, Deserialize)]
pub struct StreamsResponse {
    pub data: Vec<HelixStream>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HelixStream {
    pub user_login: String,
    pub user_name: String,
    #[serde(default)]
    pub game_name: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub viewer_count: u64,
    #[serde(default)]
    pub thumbnail_url: String,
    #[serde(default)]
    pub started_at: Option<DateTime<Utc>>,
}

/// Fill the `{width}`/`{height}` placeholders of a thumbnail template.
pub fn sized_thumbnail(template: &str) -> String {
    template
        .replace("{width}", &THUMBNAIL_WIDTH.to_string())
        .replace("{height}", &THUMBNAIL_HEIGHT.to_string())
}
