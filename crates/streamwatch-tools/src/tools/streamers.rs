use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::NoParams;
use crate::ToolSpec;

pub const ADD_STREAMER_TOOL_NAME: &str = "add-streamer";
pub const UPDATE_STREAMER_TOOL_NAME: &str = "update-streamer";
pub const DELETE_STREAMER_TOOL_NAME: &str = "delete-streamer";
pub const LIST_STREAMERS_TOOL_NAME: &str = "list-streamers";

pub struct AddStreamerToolSpec;

impl ToolSpec for AddStreamerToolSpec {
    type Params = AddStreamerParams;

    const NAME: &'static str = ADD_STREAMER_TOOL_NAME;
    const DISPLAY_NAME: &'static str = "Add Streamer";
    const DESCRIPTION: &'static str = "Adds a new streamer to the list";
}

pub struct UpdateStreamerToolSpec;

impl ToolSpec for UpdateStreamerToolSpec {
    type Params = UpdateStreamerParams;

    const NAME: &'static str = UPDATE_STREAMER_TOOL_NAME;
    const DISPLAY_NAME: &'static str = "Update Streamer";
    const DESCRIPTION: &'static str = "Updates an existing streamer's name";
}

pub struct DeleteStreamerToolSpec;

impl ToolSpec for DeleteStreamerToolSpec {
    type Params = DeleteStreamerParams;

    const NAME: &'static str = DELETE_STREAMER_TOOL_NAME;
    const DISPLAY_NAME: &'static str = "Delete Streamer";
    const DESCRIPTION: &'static str = "Deletes a streamer from the list";
}

pub struct ListStreamersToolSpec;

impl ToolSpec for ListStreamersToolSpec {
    type Params = NoParams;

    const NAME: &'static str = LIST_STREAMERS_TOOL_NAME;
    const DISPLAY_NAME: &'static str = "List Streamers";
    const DESCRIPTION: &'static str = "Lists all current streamers";
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct AddStreamerParams {
    /// Name of the streamer to add
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStreamerParams {
    /// Current name of the streamer
    pub old_name: String,
    /// New name for the streamer
    pub new_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DeleteStreamerParams {
    /// Name of the streamer to delete
    pub name: String,
}
