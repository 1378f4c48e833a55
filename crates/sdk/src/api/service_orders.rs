//! Service orders API endpoints.

use super::{check_id, next_cursor, resolve_window, PageRequest};
use crate::client::QualerClient;
use crate::cursor;
use crate::error::QualerResult;
use crate::schema;
use crate::types::{Page, ServiceOrder};

/// Filters accepted by [`ServiceOrdersApi::search`].
#[derive(Debug, Clone, Default)]
pub struct ServiceOrderFilter {
    /// Filter by status (e.g. "Open", "Closed").
    pub status: Option<String>,
    /// Filter by client company.
    pub client_company_id: Option<i64>,
}

impl ServiceOrderFilter {
    /// Fingerprint binding cursors to this filter set.
    fn fingerprint(&self) -> String {
        let client_company_id = self.client_company_id.map(|v| v.to_string());
        cursor::fingerprint(&[
            ("status", self.status.as_deref()),
            ("client_company_id", client_company_id.as_deref()),
        ])
    }
}

/// Service orders API.
pub struct ServiceOrdersApi<'a> {
    client: &'a QualerClient,
}

impl<'a> ServiceOrdersApi<'a> {
    pub(crate) fn new(client: &'a QualerClient) -> Self {
        Self { client }
    }

    /// Fetch a single service order by id.
    pub async fn get(&self, so_id: i64) -> QualerResult<ServiceOrder> {
        let so_id = check_id("so_id", so_id)?;
        let raw = self
            .client
            .http
            .get(&format!("/api/v1/service-orders/{}", so_id))
            .await?;
        schema::service_order(&raw)
    }

    /// Search service orders with optional filters and pagination.
    pub async fn search(
        &self,
        filter: &ServiceOrderFilter,
        page: &PageRequest,
    ) -> QualerResult<Page<ServiceOrder>> {
        if let Some(id) = filter.client_company_id {
            check_id("client_company_id", id)?;
        }

        let fingerprint = filter.fingerprint();
        let (offset, limit) = resolve_window(page, &fingerprint)?;

        let mut query: Vec<(&str, String)> = vec![
            ("offset", offset.to_string()),
            ("limit", limit.to_string()),
        ];
        if let Some(status) = &filter.status {
            query.push(("status", status.clone()));
        }
        if let Some(id) = filter.client_company_id {
            query.push(("client_company_id", id.to_string()));
        }

        let raw = self
            .client
            .http
            .get_with_query("/api/v1/service-orders", &query)
            .await?;
        let remote = schema::page(&raw, schema::service_order)?;

        let next = next_cursor(
            offset,
            remote.items.len(),
            limit,
            remote.total_count,
            &fingerprint,
        );
        Ok(Page {
            items: remote.items,
            next_cursor: next,
            total_count: remote.total_count,
        })
    }
}
