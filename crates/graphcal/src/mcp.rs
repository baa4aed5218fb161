//! Model Context Protocol server exposing the catalog as tools.
//!
//! [`McpService`] implements `rmcp::ServerHandler`: `tools/list` returns one
//! tool per endpoint and `tools/call` dispatches by name through
//! [`CalendarApi::call_json`].
//!
//! Error mapping:
//!
//! - unknown tool name: `resource_not_found`
//! - missing, unknown, or mistyped arguments: `invalid_params`
//! - Graph or network failures: a tool result with `is_error` set, carrying
//!   the Graph status and body so the caller can react to it

use std::{borrow::Cow, sync::Arc};

use rmcp::{
    ErrorData, RoleServer,
    handler::server::ServerHandler,
    model::{
        CallToolRequestParam, CallToolResult, Content, JsonObject, ListToolsResult,
        PaginatedRequestParam, ServerCapabilities, ServerInfo, Tool,
    },
    service::RequestContext,
};
use serde_json::Value;
use tracing::{debug, warn};

use crate::{
    api::CalendarApi,
    descriptor::ResponseShape,
    error::Error,
    tool::ToolInfo,
    transport::Transport,
};

const INSTRUCTIONS: &str = "Tools for the Outlook calendar surface of Microsoft Graph. \
    Every tool takes the path identifiers of its resource (user_id, calendar_id, event_id, ...) \
    plus optional OData query arguments (select, filter, top, ...) and body fields.";

/// MCP server handler over a [`CalendarApi`].
pub struct McpService<T> {
    api: Arc<CalendarApi<T>>,
    tools: Arc<Vec<Tool>>,
    info: ServerInfo,
}

impl<T> Clone for McpService<T> {
    fn clone(&self) -> Self {
        Self {
            api: Arc::clone(&self.api),
            tools: Arc::clone(&self.tools),
            info: self.info.clone(),
        }
    }
}

impl<T: Transport + 'static> McpService<T> {
    /// Uses a default [`ServerInfo`] with tools capability enabled.
    pub fn new(api: CalendarApi<T>) -> Self {
        Self::with_info(api, default_server_info())
    }

    pub fn with_info(api: CalendarApi<T>, info: ServerInfo) -> Self {
        let tools = api
            .catalog()
            .iter()
            .map(|descriptor| tool_to_mcp(&ToolInfo::from_descriptor(descriptor), descriptor.response))
            .collect();
        Self {
            api: Arc::new(api),
            tools: Arc::new(tools),
            info,
        }
    }

    pub fn api(&self) -> &CalendarApi<T> {
        &self.api
    }

    /// The tools advertised by `tools/list`.
    pub fn tools(&self) -> &[Tool] {
        &self.tools
    }
}

impl<T: Transport + 'static> ServerHandler for McpService<T> {
    fn get_info(&self) -> ServerInfo {
        self.info.clone()
    }

    fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> impl std::future::Future<Output = Result<ListToolsResult, ErrorData>> + Send + '_ {
        let tools = Arc::clone(&self.tools);
        async move { Ok(ListToolsResult::with_all_items(tools.as_ref().clone())) }
    }

    fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> impl std::future::Future<Output = Result<CallToolResult, ErrorData>> + Send + '_ {
        let api = Arc::clone(&self.api);
        let structured = self
            .tools
            .iter()
            .any(|tool| tool.name == request.name && tool.output_schema.is_some());
        async move {
            let input = request.arguments.map_or(Value::Null, Value::Object);
            debug!(tool = %request.name, "Calling tool");
            let result = api.call_json(&request.name, input).await;
            into_call_result(&request.name, structured, result)
        }
    }
}

fn default_server_info() -> ServerInfo {
    ServerInfo {
        capabilities: ServerCapabilities::builder().enable_tools().build(),
        instructions: Some(INSTRUCTIONS.to_string()),
        ..Default::default()
    }
}

/// Converts tool metadata to the MCP format. MCP output schemas must describe
/// an object, so count and empty responses advertise none.
fn tool_to_mcp(info: &ToolInfo, shape: ResponseShape) -> Tool {
    let output_schema = match shape {
        ResponseShape::Resource | ResponseShape::Collection => {
            schema_to_object_option(info.output_schema.clone())
        }
        ResponseShape::Count | ResponseShape::Empty => None,
    };
    Tool {
        name: Cow::Owned(info.name.clone()),
        title: None,
        description: (!info.description.is_empty()).then(|| Cow::Owned(info.description.clone())),
        input_schema: Arc::new(schema_to_object(info.input_schema.clone())),
        output_schema,
        annotations: None,
        icons: None,
        meta: None,
    }
}

fn schema_to_object(value: Value) -> JsonObject {
    match value {
        Value::Object(map) => map,
        _ => JsonObject::default(),
    }
}

fn schema_to_object_option(value: Value) -> Option<Arc<JsonObject>> {
    match value {
        Value::Object(map) => Some(Arc::new(map)),
        _ => None,
    }
}

/// Maps an endpoint result onto MCP. A tool advertising an output schema
/// always answers with structured content, so an empty Graph response
/// becomes `{}` there.
fn into_call_result(
    tool: &str,
    structured: bool,
    result: crate::Result<Value>,
) -> Result<CallToolResult, ErrorData> {
    match result {
        Ok(value @ Value::Object(_)) => Ok(CallToolResult::structured(value)),
        Ok(Value::Null) if structured => Ok(CallToolResult::structured(Value::Object(
            JsonObject::default(),
        ))),
        Ok(Value::Null) => Ok(CallToolResult::success(Vec::new())),
        Ok(value) => Ok(CallToolResult::success(vec![Content::text(value.to_string())])),
        Err(Error::UnknownEndpoint(name)) => Err(ErrorData::resource_not_found(
            format!("tool not found: {name}"),
            None,
        )),
        Err(err) if err.is_local() => Err(ErrorData::invalid_params(err.to_string(), None)),
        Err(err) => {
            warn!(tool, error = %err, "Tool call failed");
            Ok(CallToolResult::error(vec![Content::text(err.to_string())]))
        }
    }
}

#[cfg(test)]
mod tests {
    use rmcp::{
        ServiceError, ServiceExt,
        model::{CallToolRequestParam, ErrorCode},
        service::RunningService,
    };
    use serde_json::json;
    use tokio::task::JoinHandle;

    use super::*;
    use crate::testing::RecordingTransport;

    fn service() -> McpService<RecordingTransport> {
        McpService::new(CalendarApi::new(RecordingTransport::new()))
    }

    fn tool<'a>(service: &'a McpService<RecordingTransport>, name: &str) -> &'a Tool {
        service.tools().iter().find(|t| t.name == name).unwrap()
    }

    fn object(value: Value) -> JsonObject {
        match value {
            Value::Object(map) => map,
            _ => JsonObject::default(),
        }
    }

    /// Connects an rmcp client to `service` over an in-memory pipe.
    async fn connect(
        service: McpService<RecordingTransport>,
    ) -> (RunningService<rmcp::RoleClient, ()>, JoinHandle<()>) {
        let (server_io, client_io) = tokio::io::duplex(64 * 1024);
        let server = tokio::spawn(async move {
            let running = service.serve(server_io).await.expect("server should initialize");
            let _ = running.waiting().await;
        });
        let client = ().serve(client_io).await.expect("client should initialize");
        (client, server)
    }

    fn call(name: &str, arguments: Value) -> CallToolRequestParam {
        CallToolRequestParam {
            name: name.to_string().into(),
            arguments: Some(object(arguments)),
        }
    }

    #[test]
    fn test_every_endpoint_is_advertised() {
        let service = service();
        assert_eq!(service.tools().len(), service.api().catalog().len());
        let tool = tool(&service, "user_calendar_get_event");
        assert_eq!(tool.input_schema["type"], json!("object"));
        assert!(tool.output_schema.is_some());
        assert!(tool.description.is_some());
    }

    #[test]
    fn test_count_and_empty_tools_have_no_output_schema() {
        let service = service();
        assert!(tool(&service, "user_count_event").output_schema.is_none());
        assert!(tool(&service, "user_event_update_extension").output_schema.is_none());
        assert!(tool(&service, "user_event_dismiss_reminder").output_schema.is_none());
    }

    #[test]
    fn test_server_info_enables_tools() {
        assert!(service().get_info().capabilities.tools.is_some());
    }

    #[test]
    fn test_graph_errors_become_tool_errors() {
        let result = into_call_result(
            "user_get_event",
            true,
            Err(Error::Http {
                status: 403,
                body: "{\"error\":{\"code\":\"ErrorAccessDenied\"}}".to_string(),
            }),
        )
        .unwrap();
        assert_eq!(result.is_error, Some(true));
    }

    #[test]
    fn test_object_results_are_structured() {
        let result = into_call_result("user_get_event", true, Ok(json!({ "id": "e1" }))).unwrap();
        assert_eq!(result.structured_content, Some(json!({ "id": "e1" })));

        let result = into_call_result("user_count_event", false, Ok(json!(3))).unwrap();
        assert_eq!(result.structured_content, None);
        assert_ne!(result.is_error, Some(true));
    }

    #[test]
    fn test_empty_result_is_structured_when_schema_advertised() {
        let result = into_call_result("user_update_event", true, Ok(Value::Null)).unwrap();
        assert_eq!(result.structured_content, Some(json!({})));

        let result =
            into_call_result("user_event_dismiss_reminder", false, Ok(Value::Null)).unwrap();
        assert_eq!(result.structured_content, None);
        assert!(result.content.is_empty());
    }

    #[tokio::test]
    async fn test_client_lists_every_tool() {
        let service = service();
        let expected = service.tools().len();
        let (client, server) = connect(service).await;

        let tools = client.list_all_tools().await.unwrap();
        assert_eq!(tools.len(), expected);
        assert!(tools.iter().any(|t| t.name == "user_event_dismiss_reminder"));

        client.cancel().await.unwrap();
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_client_call_dispatches_one_request() {
        let service = McpService::new(CalendarApi::new(RecordingTransport::responding(
            crate::transport::RawResponse::json(200, &json!({ "id": "e1", "subject": "Sync" })),
        )));
        let handle = service.clone();
        let (client, server) = connect(service).await;

        let result = client
            .call_tool(call(
                "user_calendar_get_event",
                json!({ "user_id": "u1", "event_id": "e1", "select": ["subject"] }),
            ))
            .await
            .unwrap();

        assert_eq!(result.structured_content, Some(json!({ "id": "e1", "subject": "Sync" })));
        let calls = handle.api().transport().calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(
            calls[0].url,
            format!("{}/users/u1/calendar/events/e1", crate::testing::TEST_BASE_URL)
        );

        client.cancel().await.unwrap();
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_client_bad_calls_map_to_protocol_errors_without_io() {
        let service = service();
        let handle = service.clone();
        let (client, server) = connect(service).await;

        let cases = [
            (
                call("user_calendar_delete_event", json!({ "event_id": "e1" })),
                ErrorCode::INVALID_PARAMS,
                "user-id",
            ),
            (
                call(
                    "user_calendar_delete_event",
                    json!({ "user_id": "u1", "event_id": "e1", "colour": "red" }),
                ),
                ErrorCode::INVALID_PARAMS,
                "colour",
            ),
            (
                call("user_list_event", json!({ "user_id": "u1", "top": "ten" })),
                ErrorCode::INVALID_PARAMS,
                "top",
            ),
            (
                call("user_get_weather", json!({})),
                ErrorCode::RESOURCE_NOT_FOUND,
                "user_get_weather",
            ),
        ];

        for (request, code, mentions) in cases {
            let name = request.name.clone();
            match client.call_tool(request).await {
                Err(ServiceError::McpError(err)) => {
                    assert_eq!(err.code, code, "wrong code for {name}");
                    assert!(err.message.contains(mentions), "{}", err.message);
                }
                other => panic!("expected protocol error for {name}, got {other:?}"),
            }
        }
        assert!(handle.api().transport().calls().is_empty());

        client.cancel().await.unwrap();
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_client_graph_failure_is_tool_error() {
        let service = McpService::new(CalendarApi::new(RecordingTransport::failing(
            404,
            "{\"error\":{\"code\":\"ErrorItemNotFound\"}}",
        )));
        let (client, server) = connect(service).await;

        let result = client
            .call_tool(call(
                "user_event_dismiss_reminder",
                json!({ "user_id": "u1", "event_id": "e1" }),
            ))
            .await
            .unwrap();
        assert_eq!(result.is_error, Some(true));

        client.cancel().await.unwrap();
        server.await.unwrap();
    }
}
