//! Service order tools.

use super::{json_result, json_schema_integer, json_schema_object, json_schema_string, parse_args, Tool};
use crate::protocol::{CallToolResult, ToolSchema};
use qualer_sdk::{PageRequest, QualerResult, ServiceOrderFilter, SharedClient};
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;

/// Fetch a single service order by id.
pub struct GetServiceOrderTool {
    client: Arc<SharedClient>,
}

impl GetServiceOrderTool {
    pub fn new(client: Arc<SharedClient>) -> Self {
        Self { client }
    }
}

#[derive(Debug, Deserialize)]
struct GetServiceOrderArgs {
    so_id: i64,
}

#[async_trait::async_trait]
impl Tool for GetServiceOrderTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "get_service_order".to_string(),
            description: "Fetch a single service order by its ID. Returns full details \
                          including status, client info, and timestamps."
                .to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "so_id": json_schema_integer("Service order ID to retrieve")
                }),
                vec!["so_id"],
            ),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> QualerResult<CallToolResult> {
        let args: GetServiceOrderArgs = parse_args(arguments)?;
        debug!(so_id = args.so_id, "get_service_order");

        let client = self.client.get().await?;
        let so = client.service_orders().get(args.so_id).await?;
        json_result(&so)
    }
}

/// Search service orders with optional filters and pagination.
pub struct SearchServiceOrdersTool {
    client: Arc<SharedClient>,
}

impl SearchServiceOrdersTool {
    pub fn new(client: Arc<SharedClient>) -> Self {
        Self { client }
    }
}

#[derive(Debug, Deserialize)]
struct SearchServiceOrdersArgs {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    client_company_id: Option<i64>,
    #[serde(default)]
    limit: Option<u32>,
    #[serde(default)]
    cursor: Option<String>,
}

#[async_trait::async_trait]
impl Tool for SearchServiceOrdersTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "search_service_orders".to_string(),
            description: "Search service orders with optional filters and pagination. \
                          Returns paginated results with a cursor token for additional pages."
                .to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "status": json_schema_string("Filter by status (e.g. Open, Closed)"),
                    "client_company_id": json_schema_integer("Filter by client company ID"),
                    "limit": json_schema_integer("Maximum items to return (1-100, default 25)"),
                    "cursor": json_schema_string("Pagination cursor from a previous response")
                }),
                vec![],
            ),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> QualerResult<CallToolResult> {
        let args: SearchServiceOrdersArgs = parse_args(arguments)?;
        debug!(status = ?args.status, "search_service_orders");

        let filter = ServiceOrderFilter {
            status: args.status,
            client_company_id: args.client_company_id,
        };
        let page = PageRequest {
            limit: args.limit,
            cursor: args.cursor,
        };

        let client = self.client.get().await?;
        let result = client.service_orders().search(&filter, &page).await?;
        json_result(&result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qualer_sdk::QualerClient;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn shared(server: &MockServer) -> Arc<SharedClient> {
        let client = QualerClient::builder()
            .base_url(server.uri())
            .token("tok-test")
            .build()
            .unwrap();
        Arc::new(SharedClient::with_client(client))
    }

    #[tokio::test]
    async fn test_get_tool_returns_pretty_json() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/service-orders/42"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 42, "number": "SO-42", "status": "Open"
            })))
            .mount(&server)
            .await;

        let tool = GetServiceOrderTool::new(shared(&server));
        let result = tool.execute(json!({"so_id": 42})).await.unwrap();
        assert_eq!(result.is_error, None);

        let crate::protocol::ToolContent::Text { text } = &result.content[0];
        let parsed: serde_json::Value = serde_json::from_str(text).unwrap();
        assert_eq!(parsed["id"], 42);
        assert_eq!(parsed["number"], "SO-42");
    }

    #[tokio::test]
    async fn test_get_tool_rejects_wrong_argument_type_without_network() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(0)
            .mount(&server)
            .await;

        let tool = GetServiceOrderTool::new(shared(&server));
        let err = tool.execute(json!({"so_id": "forty-two"})).await.unwrap_err();
        assert_eq!(err.kind(), "invalid");

        let err = tool.execute(json!({})).await.unwrap_err();
        assert_eq!(err.kind(), "invalid");
    }

    #[tokio::test]
    async fn test_search_tool_passes_filters_through() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/service-orders"))
            .and(wiremock::matchers::query_param("status", "Open"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [{"id": 1, "number": "SO-1", "status": "Open"}],
                "total_count": 1
            })))
            .mount(&server)
            .await;

        let tool = SearchServiceOrdersTool::new(shared(&server));
        let result = tool
            .execute(json!({"status": "Open", "limit": 10}))
            .await
            .unwrap();

        let crate::protocol::ToolContent::Text { text } = &result.content[0];
        let parsed: serde_json::Value = serde_json::from_str(text).unwrap();
        assert_eq!(parsed["items"][0]["id"], 1);
        assert_eq!(parsed["total_count"], 1);
        assert!(parsed.get("next_cursor").is_none());
    }

    #[tokio::test]
    async fn test_missing_credential_is_config_error_without_network() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(0)
            .mount(&server)
            .await;

        // Empty slot with no QUALER_TOKEN in the environment: the first
        // use surfaces the configuration error.
        std::env::remove_var(qualer_sdk::config::ENV_TOKEN);
        let tool = GetServiceOrderTool::new(Arc::new(SharedClient::new()));
        let err = tool.execute(json!({"so_id": 1})).await.unwrap_err();
        assert!(matches!(err, qualer_sdk::QualerError::Config(_)));
        assert_eq!(err.kind(), "invalid");
    }
}
