//! Assets API endpoints.

use super::{check_id, next_cursor, resolve_window, PageRequest};
use crate::client::QualerClient;
use crate::cursor;
use crate::error::{QualerError, QualerResult};
use crate::schema;
use crate::types::{Asset, Page};

/// Filters accepted by [`AssetsApi::search`].
#[derive(Debug, Clone)]
pub struct AssetFilter {
    /// Free-text query matched against name, serial number, model and
    /// manufacturer. Required and non-empty.
    pub query: String,
    /// Filter by client company.
    pub client_company_id: Option<i64>,
}

impl AssetFilter {
    fn fingerprint(&self) -> String {
        let client_company_id = self.client_company_id.map(|v| v.to_string());
        cursor::fingerprint(&[
            ("q", Some(self.query.as_str())),
            ("client_company_id", client_company_id.as_deref()),
        ])
    }
}

/// Assets API.
pub struct AssetsApi<'a> {
    client: &'a QualerClient,
}

impl<'a> AssetsApi<'a> {
    pub(crate) fn new(client: &'a QualerClient) -> Self {
        Self { client }
    }

    /// Fetch a single asset by id.
    pub async fn get(&self, asset_id: i64) -> QualerResult<Asset> {
        let asset_id = check_id("asset_id", asset_id)?;
        let raw = self
            .client
            .http
            .get(&format!("/api/v1/assets/{}", asset_id))
            .await?;
        schema::asset(&raw)
    }

    /// Search assets by free-text query, with pagination.
    ///
    /// The query is forwarded to the listing endpoint, and a local
    /// case-insensitive substring guard is applied to the fetched page so
    /// a server without native text filtering never leaks non-matching
    /// rows. Cursor arithmetic always reflects the unfiltered remote page
    /// size: a page may carry fewer than `limit` matches while a
    /// continuation cursor still points at the next remote window.
    pub async fn search(
        &self,
        filter: &AssetFilter,
        page: &PageRequest,
    ) -> QualerResult<Page<Asset>> {
        if filter.query.trim().is_empty() {
            return Err(QualerError::Invalid("query must not be empty".to_string()));
        }
        if let Some(id) = filter.client_company_id {
            check_id("client_company_id", id)?;
        }

        let fingerprint = filter.fingerprint();
        let (offset, limit) = resolve_window(page, &fingerprint)?;

        let mut query: Vec<(&str, String)> = vec![
            ("q", filter.query.clone()),
            ("offset", offset.to_string()),
            ("limit", limit.to_string()),
        ];
        if let Some(id) = filter.client_company_id {
            query.push(("client_company_id", id.to_string()));
        }

        let raw = self
            .client
            .http
            .get_with_query("/api/v1/assets", &query)
            .await?;
        let remote = schema::page(&raw, schema::asset)?;

        // Cursor math uses the page size before local filtering.
        let fetched = remote.items.len();
        let next = next_cursor(offset, fetched, limit, remote.total_count, &fingerprint);

        let needle = filter.query.to_lowercase();
        let items = remote
            .items
            .into_iter()
            .filter(|asset| matches_query(asset, &needle))
            .collect();

        Ok(Page {
            items,
            next_cursor: next,
            total_count: remote.total_count,
        })
    }
}

/// Case-insensitive substring match across the searchable asset fields.
fn matches_query(asset: &Asset, needle: &str) -> bool {
    let mut haystacks = [
        Some(asset.name.as_str()),
        asset.serial_number.as_deref(),
        asset.model.as_deref(),
        asset.manufacturer.as_deref(),
    ]
    .into_iter()
    .flatten();
    haystacks.any(|h| h.to_lowercase().contains(needle))
}
