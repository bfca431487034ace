use rmcp::model::{CallToolRequestParam, CallToolResult, ErrorCode, RawContent};
use rmcp::service::{RoleClient, RunningService, ServiceError, ServiceExt};
use serde_json::{Value, json};
use std::sync::Arc;

use streamwatch::mcp::{SERVER_NAME, StreamerServer};
use streamwatch_core::registry::Registry;
use streamwatch_core::status::StatusResolver;
use streamwatch_core::test_utils::{InMemoryRegistryStore, MockStream, MockTwitch};
use streamwatch_core::tools::StreamerTools;
use streamwatch_tools::tools::{ALL_TOOL_NAMES, all_schemas};

async fn connect(mock: &MockTwitch, names: &[&str]) -> RunningService<RoleClient, ()> {
    let registry = Arc::new(Registry::new(Arc::new(InMemoryRegistryStore::with_names(
        names,
    ))));
    let resolver = Arc::new(StatusResolver::new(&mock.config()).unwrap());
    let server = StreamerServer::new(StreamerTools::new(registry, resolver));

    let (server_io, client_io) = tokio::io::duplex(64 * 1024);
    tokio::spawn(async move {
        if let Ok(running) = server.serve(server_io).await {
            let _ = running.waiting().await;
        }
    });

    ().serve(client_io).await.unwrap()
}

async fn call(
    client: &RunningService<RoleClient, ()>,
    name: &str,
    arguments: Value,
) -> Result<CallToolResult, ServiceError> {
    client
        .call_tool(CallToolRequestParam {
            name: name.to_string().into(),
            arguments: arguments.as_object().cloned(),
        })
        .await
}

fn text_of(result: &CallToolResult) -> String {
    result
        .content
        .iter()
        .flatten()
        .filter_map(|content| match &content.raw {
            RawContent::Text(text) => Some(text.text.clone()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[tokio::test]
async fn server_advertises_all_tools() {
    let mock = MockTwitch::start().await.unwrap();
    let client = connect(&mock, &[]).await;

    let info = client.peer_info().unwrap();
    assert_eq!(info.server_info.name, SERVER_NAME);

    let tools = client.list_tools(Default::default()).await.unwrap().tools;
    let mut names: Vec<String> = tools.iter().map(|t| t.name.to_string()).collect();
    names.sort();
    let mut expected: Vec<String> = ALL_TOOL_NAMES.iter().map(|s| (*s).to_string()).collect();
    expected.sort();
    assert_eq!(names, expected);

    for schema in all_schemas() {
        let tool = tools.iter().find(|t| t.name == schema.name.as_str()).unwrap();
        assert_eq!(tool.description.as_deref(), Some(schema.description.as_str()));
    }

    let update = tools
        .iter()
        .find(|t| t.name == "update-streamer")
        .unwrap();
    let properties = update.input_schema.get("properties").unwrap();
    assert!(properties.get("oldName").is_some());
    assert!(properties.get("newName").is_some());

    client.cancel().await.unwrap();
}

#[tokio::test]
async fn registry_round_trip_through_mcp() {
    let mock = MockTwitch::start().await.unwrap();
    let client = connect(&mock, &["alice", "bob"]).await;

    let result = call(
        &client,
        "update-streamer",
        json!({ "oldName": "alice", "newName": "alicia" }),
    )
    .await
    .unwrap();
    assert_eq!(text_of(&result), "Streamer \"alice\" updated to \"alicia\".");

    let result = call(&client, "list-streamers", json!({})).await.unwrap();
    assert_eq!(text_of(&result), "alicia, bob");

    let result = call(&client, "delete-streamer", json!({ "name": "ghost" }))
        .await
        .unwrap();
    assert_eq!(text_of(&result), "Streamer \"ghost\" not found.");
    assert_ne!(result.is_error, Some(true));

    client.cancel().await.unwrap();
}

#[tokio::test]
async fn live_status_through_mcp() {
    let mock = MockTwitch::start().await.unwrap();
    mock.set_live(MockStream::new("alice", "Chess", "Rapid games", 120))
        .await;
    let client = connect(&mock, &["alice", "bob"]).await;

    let result = call(&client, "list-live-streamers", json!({}))
        .await
        .unwrap();
    assert_eq!(text_of(&result), "Streamers currently live: alice");

    let result = call(&client, "check-live-status", json!({ "name": "alice" }))
        .await
        .unwrap();
    let text = text_of(&result);
    assert!(text.contains("Chess"));
    assert!(text.contains("Rapid games"));
    assert!(text.contains("120"));

    let result = call(&client, "check-live-status", json!({ "name": "ghost" }))
        .await
        .unwrap();
    assert_eq!(text_of(&result), "\"ghost\" is offline.");

    assert_eq!(mock.token_calls(), 1);
    client.cancel().await.unwrap();
}

#[tokio::test]
async fn invalid_arguments_are_rejected() {
    let mock = MockTwitch::start().await.unwrap();
    let client = connect(&mock, &[]).await;

    let err = call(&client, "add-streamer", json!({ "name": "   " }))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::McpError(ref e) if e.code == ErrorCode::INVALID_PARAMS));

    let err = call(&client, "add-streamer", json!({})).await.unwrap_err();
    assert!(matches!(err, ServiceError::McpError(ref e) if e.code == ErrorCode::INVALID_PARAMS));

    let err = call(&client, "get-weather", json!({})).await.unwrap_err();
    assert!(matches!(err, ServiceError::McpError(ref e) if e.code == ErrorCode::INVALID_PARAMS));

    client.cancel().await.unwrap();
}

#[tokio::test]
async fn platform_failures_are_hard_errors() {
    let mock = MockTwitch::start().await.unwrap();
    mock.reject_token_requests(true);
    let client = connect(&mock, &["alice"]).await;

    let err = call(&client, "check-live-status", json!({ "name": "alice" }))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::McpError(ref e) if e.code == ErrorCode::INTERNAL_ERROR));

    client.cancel().await.unwrap();
}
