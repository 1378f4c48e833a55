//! Document listing tools.

use super::{json_result, json_schema_integer, json_schema_object, parse_args, Tool};
use crate::protocol::{CallToolResult, ToolSchema};
use qualer_sdk::{QualerResult, SharedClient};
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;

/// List documents attached to a service order.
pub struct ListServiceOrderDocumentsTool {
    client: Arc<SharedClient>,
}

impl ListServiceOrderDocumentsTool {
    pub fn new(client: Arc<SharedClient>) -> Self {
        Self { client }
    }
}

#[derive(Debug, Deserialize)]
struct ServiceOrderDocumentsArgs {
    so_id: i64,
}

#[async_trait::async_trait]
impl Tool for ListServiceOrderDocumentsTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "list_service_order_documents".to_string(),
            description: "List all documents attached to a service order. Returns metadata \
                          for each document (filename, content type, size). An order with \
                          no documents returns an empty list."
                .to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "so_id": json_schema_integer("Service order ID to list documents for")
                }),
                vec!["so_id"],
            ),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> QualerResult<CallToolResult> {
        let args: ServiceOrderDocumentsArgs = parse_args(arguments)?;
        debug!(so_id = args.so_id, "list_service_order_documents");

        let client = self.client.get().await?;
        let docs = client.documents().for_service_order(args.so_id).await?;
        json_result(&docs)
    }
}

/// List documents attached to a work item (service order item).
pub struct ListWorkItemDocumentsTool {
    client: Arc<SharedClient>,
}

impl ListWorkItemDocumentsTool {
    pub fn new(client: Arc<SharedClient>) -> Self {
        Self { client }
    }
}

#[derive(Debug, Deserialize)]
struct WorkItemDocumentsArgs {
    item_id: i64,
}

#[async_trait::async_trait]
impl Tool for ListWorkItemDocumentsTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "list_work_item_documents".to_string(),
            description: "List all documents attached to a work item (service order item). \
                          Returns metadata for each document. A work item with no documents \
                          returns an empty list."
                .to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "item_id": json_schema_integer("Work item ID to list documents for")
                }),
                vec!["item_id"],
            ),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> QualerResult<CallToolResult> {
        let args: WorkItemDocumentsArgs = parse_args(arguments)?;
        debug!(item_id = args.item_id, "list_work_item_documents");

        let client = self.client.get().await?;
        let docs = client.documents().for_work_item(args.item_id).await?;
        json_result(&docs)
    }
}
