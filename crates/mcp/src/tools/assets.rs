//! Asset tools.

use super::{json_result, json_schema_integer, json_schema_object, json_schema_string, parse_args, Tool};
use crate::protocol::{CallToolResult, ToolSchema};
use qualer_sdk::{AssetFilter, PageRequest, QualerResult, SharedClient};
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;

/// Fetch a single asset/equipment record by id.
pub struct GetAssetTool {
    client: Arc<SharedClient>,
}

impl GetAssetTool {
    pub fn new(client: Arc<SharedClient>) -> Self {
        Self { client }
    }
}

#[derive(Debug, Deserialize)]
struct GetAssetArgs {
    asset_id: i64,
}

#[async_trait::async_trait]
impl Tool for GetAssetTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "get_asset".to_string(),
            description: "Fetch a single asset/equipment record by its ID. Returns full \
                          details including serial number, model, manufacturer, and location."
                .to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "asset_id": json_schema_integer("Asset ID to retrieve")
                }),
                vec!["asset_id"],
            ),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> QualerResult<CallToolResult> {
        let args: GetAssetArgs = parse_args(arguments)?;
        debug!(asset_id = args.asset_id, "get_asset");

        let client = self.client.get().await?;
        let asset = client.assets().get(args.asset_id).await?;
        json_result(&asset)
    }
}

/// Search assets with a free-text query and optional filters.
pub struct SearchAssetsTool {
    client: Arc<SharedClient>,
}

impl SearchAssetsTool {
    pub fn new(client: Arc<SharedClient>) -> Self {
        Self { client }
    }
}

#[derive(Debug, Deserialize)]
struct SearchAssetsArgs {
    query: String,
    #[serde(default)]
    client_company_id: Option<i64>,
    #[serde(default)]
    limit: Option<u32>,
    #[serde(default)]
    cursor: Option<String>,
}

#[async_trait::async_trait]
impl Tool for SearchAssetsTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "search_assets".to_string(),
            description: "Search assets with a free-text query and optional filters. The \
                          query matches asset name, serial number, model, and manufacturer. \
                          Returns paginated results with a cursor token for additional pages."
                .to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "query": json_schema_string("Search query (name, serial number, model, etc.)"),
                    "client_company_id": json_schema_integer("Filter by client company ID"),
                    "limit": json_schema_integer("Maximum items to return (1-100, default 25)"),
                    "cursor": json_schema_string("Pagination cursor from a previous response")
                }),
                vec!["query"],
            ),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> QualerResult<CallToolResult> {
        let args: SearchAssetsArgs = parse_args(arguments)?;
        debug!(query = %args.query, "search_assets");

        let filter = AssetFilter {
            query: args.query,
            client_company_id: args.client_company_id,
        };
        let page = PageRequest {
            limit: args.limit,
            cursor: args.cursor,
        };

        let client = self.client.get().await?;
        let result = client.assets().search(&filter, &page).await?;
        json_result(&result)
    }
}
