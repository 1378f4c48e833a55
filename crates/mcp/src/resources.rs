//! Read-only resource views.
//!
//! Resources are side-effect-free projections of fetch operations: the
//! entity is retrieved through the same SDK path as the corresponding
//! tool and rendered as indented JSON.

use crate::protocol::{ReadResourceResult, ResourceContent, ResourceTemplateSchema};
use qualer_sdk::{QualerError, QualerResult, SharedClient};
use std::sync::Arc;

const SERVICE_ORDER_TEMPLATE: &str = "qualer://service-order/{so_id}";
const ASSET_TEMPLATE: &str = "qualer://asset/{asset_id}";

/// The catalog of resource views exposed by this server.
pub struct ResourceCatalog {
    client: Arc<SharedClient>,
}

impl ResourceCatalog {
    pub fn new(client: Arc<SharedClient>) -> Self {
        Self { client }
    }

    /// URI templates advertised via `resources/templates/list`.
    pub fn templates(&self) -> Vec<ResourceTemplateSchema> {
        vec![
            ResourceTemplateSchema {
                uri_template: SERVICE_ORDER_TEMPLATE.to_string(),
                name: "Service Order".to_string(),
                description: "Read-only view of a service order as formatted JSON".to_string(),
                mime_type: "application/json".to_string(),
            },
            ResourceTemplateSchema {
                uri_template: ASSET_TEMPLATE.to_string(),
                name: "Asset".to_string(),
                description: "Read-only view of an asset as formatted JSON".to_string(),
                mime_type: "application/json".to_string(),
            },
        ]
    }

    /// Resolve a `qualer://` URI and render the entity.
    pub async fn read(&self, uri: &str) -> QualerResult<ReadResourceResult> {
        let text = match parse_uri(uri)? {
            ResourceRef::ServiceOrder(id) => {
                let client = self.client.get().await?;
                let so = client.service_orders().get(id).await?;
                to_pretty_json(&so)?
            }
            ResourceRef::Asset(id) => {
                let client = self.client.get().await?;
                let asset = client.assets().get(id).await?;
                to_pretty_json(&asset)?
            }
        };

        Ok(ReadResourceResult {
            contents: vec![ResourceContent {
                uri: uri.to_string(),
                mime_type: "application/json".to_string(),
                text,
            }],
        })
    }
}

enum ResourceRef {
    ServiceOrder(i64),
    Asset(i64),
}

fn parse_uri(uri: &str) -> QualerResult<ResourceRef> {
    let invalid = || {
        QualerError::Invalid(format!(
            "unknown resource URI {:?}; expected {} or {}",
            uri, SERVICE_ORDER_TEMPLATE, ASSET_TEMPLATE
        ))
    };

    let rest = uri.strip_prefix("qualer://").ok_or_else(invalid)?;
    let (kind, id_str) = rest.split_once('/').ok_or_else(invalid)?;
    let id: i64 = id_str
        .parse()
        .map_err(|_| QualerError::Invalid(format!("resource id {:?} is not an integer", id_str)))?;

    match kind {
        "service-order" => Ok(ResourceRef::ServiceOrder(id)),
        "asset" => Ok(ResourceRef::Asset(id)),
        _ => Err(invalid()),
    }
}

fn to_pretty_json<T: serde::Serialize>(value: &T) -> QualerResult<String> {
    serde_json::to_string_pretty(value)
        .map_err(|e| QualerError::Invalid(format!("result serialization failed: {}", e)))
}
