pub mod live;
pub mod streamers;

pub use live::{CHECK_LIVE_STATUS_TOOL_NAME, LIST_LIVE_STREAMERS_TOOL_NAME};
pub use streamers::{
    ADD_STREAMER_TOOL_NAME, DELETE_STREAMER_TOOL_NAME, LIST_STREAMERS_TOOL_NAME,
    UPDATE_STREAMER_TOOL_NAME,
};

use crate::ToolSpec;
use crate::schema::ToolSchema;

/// Every tool the server exposes, in registration order.
pub const ALL_TOOL_NAMES: [&str; 6] = [
    ADD_STREAMER_TOOL_NAME,
    UPDATE_STREAMER_TOOL_NAME,
    DELETE_STREAMER_TOOL_NAME,
    LIST_STREAMERS_TOOL_NAME,
    CHECK_LIVE_STATUS_TOOL_NAME,
    LIST_LIVE_STREAMERS_TOOL_NAME,
];

pub fn all_schemas() -> Vec<ToolSchema> {
    vec![
        streamers::AddStreamerToolSpec::schema(),
        streamers::UpdateStreamerToolSpec::schema(),
        streamers::DeleteStreamerToolSpec::schema(),
        streamers::ListStreamersToolSpec::schema(),
        live::CheckLiveStatusToolSpec::schema(),
        live::ListLiveStreamersToolSpec::schema(),
    ]
}

/// Parameters for tools that take no arguments.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize, schemars::JsonSchema)]
pub struct NoParams {}
