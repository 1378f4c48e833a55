//! Entity records produced by the Qualer API.
//!
//! Entities are constructed by the validation pass in [`crate::schema`]
//! and are immutable afterwards. They derive `Serialize` only: inbound
//! JSON never deserializes directly into these shapes.

use serde::Serialize;

/// A service order (e.g. a calibration job) in Qualer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServiceOrder {
    pub id: i64,
    /// Service order number (e.g. "SO-12345").
    pub number: String,
    /// Current status (e.g. "Open", "In Progress", "Closed").
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_company_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_company_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// An asset/equipment record in Qualer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Asset {
    pub id: i64,
    /// Asset name or description.
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serial_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manufacturer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_company_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

/// Metadata for a document attached to a service order or work item.
/// Read-only; this layer never mutates documents.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    pub id: i64,
    pub filename: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_bytes: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uploaded_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uploaded_by: Option<String>,
}

/// One page of a search-style listing.
///
/// `next_cursor` is present only when more results exist; decoding then
/// re-encoding an unmodified cursor yields the same token.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_count: Option<u64>,
}
