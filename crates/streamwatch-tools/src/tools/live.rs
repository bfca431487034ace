use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::NoParams;
use crate::ToolSpec;

pub const CHECK_LIVE_STATUS_TOOL_NAME: &str = "check-live-status";
pub const LIST_LIVE_STREAMERS_TOOL_NAME: &str = "list-live-streamers";

pub struct CheckLiveStatusToolSpec;

impl ToolSpec for CheckLiveStatusToolSpec {
    type Params = CheckLiveStatusParams;

    const NAME: &'static str = CHECK_LIVE_STATUS_TOOL_NAME;
    const DISPLAY_NAME: &'static str = "Check Live Status";
    const DESCRIPTION: &'static str =
        "Checks if a given streamer is currently live on Twitch and returns stream info if live.";
}

pub struct ListLiveStreamersToolSpec;

impl ToolSpec for ListLiveStreamersToolSpec {
    type Params = NoParams;

    const NAME: &'static str = LIST_LIVE_STREAMERS_TOOL_NAME;
    const DISPLAY_NAME: &'static str = "List Live Streamers";
    const DESCRIPTION: &'static str =
        "Returns the list of streamers from your list who are currently live on Twitch";
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CheckLiveStatusParams {
    /// Name of the streamer
    pub name: String,
}
