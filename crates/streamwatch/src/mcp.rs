//! MCP adapter over [`StreamerTools`].
//!
//! Tool names, descriptions and input schemas come from
//! `streamwatch_tools`; calls are dispatched by wire name through
//! [`StreamerTools::call`].

use rmcp::model::{
    CallToolRequestParam, CallToolResult, Content, JsonObject, ListToolsResult,
    PaginatedRequestParam, ServerCapabilities, ServerInfo, Tool,
};
use rmcp::service::RequestContext;
use rmcp::{ErrorData, RoleServer, ServerHandler};
use serde_json::Value;
use std::future::Future;
use tracing::warn;

use streamwatch_core::tools::StreamerTools;
use streamwatch_tools::tools::all_schemas;
use streamwatch_tools::{ToolError, ToolSchema};

pub const SERVER_NAME: &str = "Streamer Manager";

#[derive(Clone)]
pub struct StreamerServer {
    tools: StreamerTools,
}

impl StreamerServer {
    pub fn new(tools: StreamerTools) -> Self {
        Self { tools }
    }
}

fn to_mcp_tool(schema: ToolSchema) -> Tool {
    let input_schema: JsonObject = match serde_json::to_value(&schema.input_schema) {
        Ok(Value::Object(map)) => map,
        _ => JsonObject::new(),
    };
    Tool::new(schema.name, schema.description, input_schema)
}

fn into_result(result: Result<String, ToolError>) -> Result<CallToolResult, ErrorData> {
    match result {
        Ok(text) => Ok(CallToolResult::success(vec![Content::text(text)])),
        Err(err) if err.is_caller_error() => Err(ErrorData::invalid_params(err.to_string(), None)),
        Err(err) => {
            warn!(tool = err.tool_name(), error = %err, "tool call failed");
            Err(ErrorData::internal_error(err.to_string(), None))
        }
    }
}

impl ServerHandler for StreamerServer {
    fn get_info(&self) -> ServerInfo {
        let mut info = ServerInfo {
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            instructions: Some(
                "Keeps a list of Twitch streamers and reports which of them are live.".to_string(),
            ),
            ..Default::default()
        };
        info.server_info.name = SERVER_NAME.to_string();
        info.server_info.version = env!("CARGO_PKG_VERSION").to_string();
        info
    }

    fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> impl Future<Output = Result<ListToolsResult, ErrorData>> + Send + '_ {
        let tools = all_schemas().into_iter().map(to_mcp_tool).collect();
        std::future::ready(Ok(ListToolsResult {
            tools,
            next_cursor: None,
        }))
    }

    fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> impl Future<Output = Result<CallToolResult, ErrorData>> + Send + '_ {
        async move {
            let arguments = request.arguments.map_or(Value::Null, Value::Object);
            into_result(self.tools.call(&request.name, arguments).await)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use streamwatch_tools::tools::ALL_TOOL_NAMES;

    #[test]
    fn advertised_tools_come_from_the_contract() {
        let tools: Vec<Tool> = all_schemas().into_iter().map(to_mcp_tool).collect();
        let names: Vec<&str> = tools.iter().map(|t| t.name.as_ref()).collect();
        assert_eq!(names, ALL_TOOL_NAMES);

        let update = &tools[1];
        assert_eq!(update.input_schema.get("type"), Some(&Value::from("object")));
        assert!(update.input_schema["properties"].get("oldName").is_some());
    }

    #[test]
    fn caller_errors_map_to_invalid_params() {
        let err = into_result(Err(ToolError::invalid_params("add-streamer", "bad")))
            .unwrap_err();
        assert_eq!(err.code, rmcp::model::ErrorCode::INVALID_PARAMS);

        let err = into_result(Err(ToolError::execution("list-live-streamers", "timed out")))
            .unwrap_err();
        assert_eq!(err.code, rmcp::model::ErrorCode::INTERNAL_ERROR);
    }
}
