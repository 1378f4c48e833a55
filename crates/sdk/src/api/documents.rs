//! Document listing endpoints.
//!
//! Documents are read-only metadata; an entity with zero attached
//! documents is a valid, non-error result.

use super::check_id;
use crate::client::QualerClient;
use crate::error::QualerResult;
use crate::schema;
use crate::types::Document;

/// Documents API.
pub struct DocumentsApi<'a> {
    client: &'a QualerClient,
}

impl<'a> DocumentsApi<'a> {
    pub(crate) fn new(client: &'a QualerClient) -> Self {
        Self { client }
    }

    /// List documents attached to a service order.
    pub async fn for_service_order(&self, so_id: i64) -> QualerResult<Vec<Document>> {
        let so_id = check_id("so_id", so_id)?;
        let raw = self
            .client
            .http
            .get(&format!("/api/v1/service-orders/{}/documents", so_id))
            .await?;
        schema::document_list(&raw)
    }

    /// List documents attached to a work item (service order item).
    pub async fn for_work_item(&self, item_id: i64) -> QualerResult<Vec<Document>> {
        let item_id = check_id("item_id", item_id)?;
        let raw = self
            .client
            .http
            .get(&format!("/api/v1/service-order-items/{}/documents", item_id))
            .await?;
        schema::document_list(&raw)
    }
}
