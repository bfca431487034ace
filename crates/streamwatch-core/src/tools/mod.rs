//! The tool façade: the six operations an agent can invoke.
//!
//! Every operation returns the text shown to the agent. Soft outcomes
//! ("already exists", "not found", "is offline") are `Ok` text; only
//! invalid arguments and hard failures are `Err`.

pub mod format;
pub mod validation;

use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, instrument};

use streamwatch_tools::ToolError;
use streamwatch_tools::ToolSpec;
use streamwatch_tools::tools::live::{CheckLiveStatusToolSpec, ListLiveStreamersToolSpec};
use streamwatch_tools::tools::streamers::{
    AddStreamerToolSpec, DeleteStreamerToolSpec, ListStreamersToolSpec, UpdateStreamerToolSpec,
};
use streamwatch_tools::tools::{
    ADD_STREAMER_TOOL_NAME, CHECK_LIVE_STATUS_TOOL_NAME, DELETE_STREAMER_TOOL_NAME,
    LIST_LIVE_STREAMERS_TOOL_NAME, LIST_STREAMERS_TOOL_NAME, UPDATE_STREAMER_TOOL_NAME,
};

use crate::config::Settings;
use crate::registry::Registry;
use crate::status::StatusResolver;

/// Cheap to clone; clones share one registry and one credential cache.
#[derive(Clone)]
pub struct StreamerTools {
    registry: Arc<Registry>,
    resolver: Arc<StatusResolver>,
}

impl StreamerTools {
    pub fn new(registry: Arc<Registry>, resolver: Arc<StatusResolver>) -> Self {
        Self { registry, resolver }
    }

    pub fn from_settings(settings: &Settings) -> crate::error::Result<Self> {
        let registry = Registry::json_file(&settings.registry_path);
        let resolver = StatusResolver::new(&settings.twitch)?;
        Ok(Self::new(Arc::new(registry), Arc::new(resolver)))
    }

    pub fn resolver(&self) -> &Arc<StatusResolver> {
        &self.resolver
    }

    #[instrument(skip(self))]
    pub async fn add(&self, name: &str) -> Result<String, ToolError> {
        let name = validation::channel_name(ADD_STREAMER_TOOL_NAME, "name", name)?;
        let outcome = self
            .registry
            .add(&name)
            .await
            .map_err(|e| ToolError::execution(ADD_STREAMER_TOOL_NAME, e.to_string()))?;
        Ok(format::added(&name, outcome))
    }

    #[instrument(skip(self))]
    pub async fn update(&self, old_name: &str, new_name: &str) -> Result<String, ToolError> {
        let old_name = validation::existing_name(UPDATE_STREAMER_TOOL_NAME, "oldName", old_name)?;
        let new_name = validation::channel_name(UPDATE_STREAMER_TOOL_NAME, "newName", new_name)?;
        let outcome = self
            .registry
            .update(&old_name, &new_name)
            .await
            .map_err(|e| ToolError::execution(UPDATE_STREAMER_TOOL_NAME, e.to_string()))?;
        Ok(format::updated(&old_name, &new_name, outcome))
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, name: &str) -> Result<String, ToolError> {
        let name = validation::existing_name(DELETE_STREAMER_TOOL_NAME, "name", name)?;
        let outcome = self
            .registry
            .delete(&name)
            .await
            .map_err(|e| ToolError::execution(DELETE_STREAMER_TOOL_NAME, e.to_string()))?;
        Ok(format::deleted(&name, outcome))
    }

    pub async fn list(&self) -> Result<String, ToolError> {
        Ok(format::streamer_list(&self.registry.list().await))
    }

    #[instrument(skip(self))]
    pub async fn check_live(&self, name: &str) -> Result<String, ToolError> {
        let name = validation::channel_name(CHECK_LIVE_STATUS_TOOL_NAME, "name", name)?;
        let status = self
            .resolver
            .resolve_one(&name)
            .await
            .map_err(|e| ToolError::execution(CHECK_LIVE_STATUS_TOOL_NAME, e.to_string()))?;
        Ok(format::stream_status(&status))
    }

    #[instrument(skip(self))]
    pub async fn list_live(&self) -> Result<String, ToolError> {
        let names = self.registry.list().await;
        let results = self
            .resolver
            .resolve_many(&names)
            .await
            .map_err(|e| ToolError::execution(LIST_LIVE_STREAMERS_TOOL_NAME, e.to_string()))?;
        Ok(format::live_list(&results))
    }

    /// Dispatch by wire name with raw JSON arguments.
    pub async fn call(&self, tool_name: &str, arguments: Value) -> Result<String, ToolError> {
        debug!(tool = tool_name, "dispatching tool call");
        match tool_name {
            ADD_STREAMER_TOOL_NAME => {
                let params = AddStreamerToolSpec::parse_params(arguments)?;
                self.add(&params.name).await
            }
            UPDATE_STREAMER_TOOL_NAME => {
                let params = UpdateStreamerToolSpec::parse_params(arguments)?;
                self.update(&params.old_name, &params.new_name).await
            }
            DELETE_STREAMER_TOOL_NAME => {
                let params = DeleteStreamerToolSpec::parse_params(arguments)?;
                self.delete(&params.name).await
            }
            LIST_STREAMERS_TOOL_NAME => {
                ListStreamersToolSpec::parse_params(empty_if_null(arguments))?;
                self.list().await
            }
            CHECK_LIVE_STATUS_TOOL_NAME => {
                let params = CheckLiveStatusToolSpec::parse_params(arguments)?;
                self.check_live(&params.name).await
            }
            LIST_LIVE_STREAMERS_TOOL_NAME => {
                ListLiveStreamersToolSpec::parse_params(empty_if_null(arguments))?;
                self.list_live().await
            }
            other => Err(ToolError::UnknownTool {
                name: other.to_string(),
            }),
        }
    }
}

fn empty_if_null(arguments: Value) -> Value {
    if arguments.is_null() {
        Value::Object(serde_json::Map::new())
    } else {
        arguments
    }
}
