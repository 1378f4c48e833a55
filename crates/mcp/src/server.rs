//! JSON-RPC 2.0 server over stdio.
//!
//! Requests arrive one per line on stdin; responses leave one per line on
//! stdout. stdout carries protocol frames only, so all diagnostics go to
//! stderr via `tracing`. Each request is handled on its own task and
//! responses are funneled through a single writer so concurrent replies
//! never interleave.

use crate::protocol::{
    CallToolParams, CallToolResult, InitializeResult, JsonRpcError, JsonRpcRequest,
    JsonRpcResponse, ListResourceTemplatesResult, ListResourcesResult, ListToolsResult,
    ReadResourceParams, ResourcesCapability, ServerCapabilities, ServerInfo, ToolsCapability,
    PROTOCOL_VERSION,
};
use crate::resources::ResourceCatalog;
use crate::tools::ToolRegistry;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

pub struct McpServer {
    tools: Arc<ToolRegistry>,
    resources: Arc<ResourceCatalog>,
}

impl McpServer {
    pub fn new(tools: ToolRegistry, resources: ResourceCatalog) -> Self {
        Self {
            tools: Arc::new(tools),
            resources: Arc::new(resources),
        }
    }

    /// Run the request loop until stdin closes.
    pub async fn run(&self) -> std::io::Result<()> {
        let stdin = BufReader::new(tokio::io::stdin());
        let mut lines = stdin.lines();

        let (tx, mut rx) = mpsc::channel::<String>(32);
        let writer = tokio::spawn(async move {
            let mut stdout = tokio::io::stdout();
            while let Some(line) = rx.recv().await {
                if stdout.write_all(line.as_bytes()).await.is_err() {
                    break;
                }
                if stdout.write_all(b"\n").await.is_err() {
                    break;
                }
                let _ = stdout.flush().await;
            }
        });

        info!("server ready");

        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }

            let tools = Arc::clone(&self.tools);
            let resources = Arc::clone(&self.resources);
            let tx = tx.clone();

            tokio::spawn(async move {
                let response = match serde_json::from_str::<JsonRpcRequest>(&line) {
                    Ok(request) => handle_request(&tools, &resources, request).await,
                    Err(e) => {
                        warn!(error = %e, "unparseable request line");
                        Some(JsonRpcResponse::error(
                            serde_json::Value::Null,
                            JsonRpcError::parse_error(),
                        ))
                    }
                };

                if let Some(response) = response {
                    match serde_json::to_string(&response) {
                        Ok(json) => {
                            let _ = tx.send(json).await;
                        }
                        Err(e) => error!(error = %e, "response serialization failed"),
                    }
                }
            });
        }

        drop(tx);
        let _ = writer.await;
        info!("stdin closed, shutting down");
        Ok(())
    }
}

/// Dispatch a single request. Returns `None` for notifications.
pub async fn handle_request(
    tools: &ToolRegistry,
    resources: &ResourceCatalog,
    request: JsonRpcRequest,
) -> Option<JsonRpcResponse> {
    debug!(method = %request.method, "request");

    if request.is_notification() {
        // notifications/initialized and friends: acknowledged silently.
        return None;
    }
    let id = request.id.clone().unwrap_or(serde_json::Value::Null);

    let response = match request.method.as_str() {
        "initialize" => JsonRpcResponse::success(
            id,
            InitializeResult {
                protocol_version: PROTOCOL_VERSION.to_string(),
                capabilities: ServerCapabilities {
                    tools: Some(ToolsCapability {
                        list_changed: false,
                    }),
                    resources: Some(ResourcesCapability {
                        list_changed: false,
                    }),
                },
                server_info: ServerInfo {
                    name: "qualer-mcp".to_string(),
                    version: env!("CARGO_PKG_VERSION").to_string(),
                },
            },
        ),
        "ping" => JsonRpcResponse::success(id, serde_json::json!({})),
        "tools/list" => JsonRpcResponse::success(
            id,
            ListToolsResult {
                tools: tools.list_schemas(),
            },
        ),
        "tools/call" => {
            let params: CallToolParams =
                match serde_json::from_value(request.params.unwrap_or_default()) {
                    Ok(p) => p,
                    Err(e) => {
                        return Some(JsonRpcResponse::error(
                            id,
                            JsonRpcError::invalid_params(format!("invalid tool call params: {}", e)),
                        ))
                    }
                };

            match tools.get(&params.name) {
                Some(tool) => {
                    // Remote and input failures become structured error
                    // results, not protocol errors: the host always gets
                    // a well-formed tools/call response.
                    let result = match tool.execute(params.arguments).await {
                        Ok(result) => result,
                        Err(e) => {
                            warn!(tool = %params.name, error = %e, "tool call failed");
                            CallToolResult::from_error(&e)
                        }
                    };
                    JsonRpcResponse::success(id, result)
                }
                None => JsonRpcResponse::error(
                    id,
                    JsonRpcError::method_not_found(&format!("tools/call:{}", params.name)),
                ),
            }
        }
        "resources/list" => {
            // Only templated resources are exposed; the concrete list is empty.
            JsonRpcResponse::success(id, ListResourcesResult { resources: vec![] })
        }
        "resources/templates/list" => JsonRpcResponse::success(
            id,
            ListResourceTemplatesResult {
                resource_templates: resources.templates(),
            },
        ),
        "resources/read" => {
            let params: ReadResourceParams =
                match serde_json::from_value(request.params.unwrap_or_default()) {
                    Ok(p) => p,
                    Err(e) => {
                        return Some(JsonRpcResponse::error(
                            id,
                            JsonRpcError::invalid_params(format!("invalid read params: {}", e)),
                        ))
                    }
                };

            match resources.read(&params.uri).await {
                Ok(result) => JsonRpcResponse::success(id, result),
                Err(e) => {
                    warn!(uri = %params.uri, error = %e, "resource read failed");
                    JsonRpcResponse::error(
                        id,
                        JsonRpcError::internal_error(
                            serde_json::to_string(&e.to_envelope())
                                .unwrap_or_else(|_| e.to_string()),
                        ),
                    )
                }
            }
        }
        other => JsonRpcResponse::error(id, JsonRpcError::method_not_found(other)),
    };

    Some(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::{
        GetAssetTool, GetServiceOrderTool, ListServiceOrderDocumentsTool,
        ListWorkItemDocumentsTool, SearchAssetsTool, SearchServiceOrdersTool,
    };
    use qualer_sdk::{QualerClient, SharedClient};
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn fixtures(server: &MockServer) -> (ToolRegistry, ResourceCatalog) {
        let client = QualerClient::builder()
            .base_url(server.uri())
            .token("tok-test")
            .build()
            .unwrap();
        let shared = Arc::new(SharedClient::with_client(client));

        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(GetServiceOrderTool::new(Arc::clone(&shared))));
        registry.register(Arc::new(SearchServiceOrdersTool::new(Arc::clone(&shared))));
        registry.register(Arc::new(GetAssetTool::new(Arc::clone(&shared))));
        registry.register(Arc::new(SearchAssetsTool::new(Arc::clone(&shared))));
        registry.register(Arc::new(ListServiceOrderDocumentsTool::new(Arc::clone(
            &shared,
        ))));
        registry.register(Arc::new(ListWorkItemDocumentsTool::new(Arc::clone(
            &shared,
        ))));

        (registry, ResourceCatalog::new(shared))
    }

    fn request(id: i64, method: &str, params: serde_json::Value) -> JsonRpcRequest {
        JsonRpcRequest {
            jsonrpc: "2.0".to_string(),
            id: Some(json!(id)),
            method: method.to_string(),
            params: Some(params),
        }
    }

    #[tokio::test]
    async fn test_initialize_reports_capabilities() {
        let server = MockServer::start().await;
        let (tools, resources) = fixtures(&server);

        let response = handle_request(&tools, &resources, request(1, "initialize", json!({})))
            .await
            .unwrap();
        let result = response.result.unwrap();
        assert_eq!(result["protocolVersion"], PROTOCOL_VERSION);
        assert_eq!(result["serverInfo"]["name"], "qualer-mcp");
        assert!(result["capabilities"]["tools"].is_object());
        assert!(result["capabilities"]["resources"].is_object());
    }

    #[tokio::test]
    async fn test_notification_gets_no_response() {
        let server = MockServer::start().await;
        let (tools, resources) = fixtures(&server);

        let notification = JsonRpcRequest {
            jsonrpc: "2.0".to_string(),
            id: None,
            method: "notifications/initialized".to_string(),
            params: None,
        };
        assert!(handle_request(&tools, &resources, notification)
            .await
            .is_none());
    }

    #[tokio::test]
    async fn test_tools_list_names_all_six_tools() {
        let server = MockServer::start().await;
        let (tools, resources) = fixtures(&server);

        let response = handle_request(&tools, &resources, request(2, "tools/list", json!({})))
            .await
            .unwrap();
        let listed = response.result.unwrap();
        let names: Vec<&str> = listed["tools"]
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["name"].as_str().unwrap())
            .collect();
        assert_eq!(
            names,
            vec![
                "get_asset",
                "get_service_order",
                "list_service_order_documents",
                "list_work_item_documents",
                "search_assets",
                "search_service_orders",
            ]
        );
    }

    #[tokio::test]
    async fn test_tool_call_success_round_trip() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/service-orders/7"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 7, "number": "SO-7", "status": "Open"
            })))
            .mount(&server)
            .await;
        let (tools, resources) = fixtures(&server);

        let response = handle_request(
            &tools,
            &resources,
            request(
                3,
                "tools/call",
                json!({"name": "get_service_order", "arguments": {"so_id": 7}}),
            ),
        )
        .await
        .unwrap();

        let result = response.result.unwrap();
        assert!(result.get("isError").is_none());
        let text = result["content"][0]["text"].as_str().unwrap();
        let parsed: serde_json::Value = serde_json::from_str(text).unwrap();
        assert_eq!(parsed["number"], "SO-7");
    }

    #[tokio::test]
    async fn test_tool_failure_is_error_result_not_protocol_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/assets/99"))
            .respond_with(ResponseTemplate::new(404).set_body_string("missing"))
            .mount(&server)
            .await;
        let (tools, resources) = fixtures(&server);

        let response = handle_request(
            &tools,
            &resources,
            request(
                4,
                "tools/call",
                json!({"name": "get_asset", "arguments": {"asset_id": 99}}),
            ),
        )
        .await
        .unwrap();

        assert!(response.error.is_none());
        let result = response.result.unwrap();
        assert_eq!(result["isError"], true);
        let text = result["content"][0]["text"].as_str().unwrap();
        let envelope: serde_json::Value = serde_json::from_str(text).unwrap();
        assert_eq!(envelope["kind"], "not_found");
        assert_eq!(envelope["status"], 404);
    }

    #[tokio::test]
    async fn test_unknown_tool_is_method_not_found() {
        let server = MockServer::start().await;
        let (tools, resources) = fixtures(&server);

        let response = handle_request(
            &tools,
            &resources,
            request(5, "tools/call", json!({"name": "upload_document"})),
        )
        .await
        .unwrap();
        assert_eq!(response.error.unwrap().code, -32601);
    }

    #[tokio::test]
    async fn test_unknown_method_is_method_not_found() {
        let server = MockServer::start().await;
        let (tools, resources) = fixtures(&server);

        let response = handle_request(&tools, &resources, request(6, "prompts/list", json!({})))
            .await
            .unwrap();
        assert_eq!(response.error.unwrap().code, -32601);
    }

    #[tokio::test]
    async fn test_resource_templates_listed() {
        let server = MockServer::start().await;
        let (tools, resources) = fixtures(&server);

        let response = handle_request(
            &tools,
            &resources,
            request(7, "resources/templates/list", json!({})),
        )
        .await
        .unwrap();
        let result = response.result.unwrap();
        assert_eq!(result["resourceTemplates"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_resource_read_round_trip() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/assets/12"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 12, "name": "Caliper"
            })))
            .mount(&server)
            .await;
        let (tools, resources) = fixtures(&server);

        let response = handle_request(
            &tools,
            &resources,
            request(8, "resources/read", json!({"uri": "qualer://asset/12"})),
        )
        .await
        .unwrap();
        let result = response.result.unwrap();
        assert_eq!(result["contents"][0]["mimeType"], "application/json");
    }

    #[tokio::test]
    async fn test_ping_returns_empty_object() {
        let server = MockServer::start().await;
        let (tools, resources) = fixtures(&server);

        let response = handle_request(&tools, &resources, request(9, "ping", json!({})))
            .await
            .unwrap();
        assert_eq!(response.result.unwrap(), json!({}));
    }
}
