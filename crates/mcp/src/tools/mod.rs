//! Tool handlers exposed to the host runtime.

pub mod assets;
pub mod documents;
pub mod service_orders;
mod registry;

pub use assets::{GetAssetTool, SearchAssetsTool};
pub use documents::{ListServiceOrderDocumentsTool, ListWorkItemDocumentsTool};
pub use registry::{json_schema_integer, json_schema_object, json_schema_string, Tool, ToolRegistry};
pub use service_orders::{GetServiceOrderTool, SearchServiceOrdersTool};

use crate::protocol::CallToolResult;
use qualer_sdk::{QualerError, QualerResult};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Parse tool arguments into their typed form. Absent, wrongly-typed, or
/// extra-shaped arguments are local input errors: rejected before any
/// network call.
pub(crate) fn parse_args<T: DeserializeOwned>(arguments: serde_json::Value) -> QualerResult<T> {
    serde_json::from_value(arguments)
        .map_err(|e| QualerError::Invalid(format!("invalid arguments: {}", e)))
}

/// Render a successful result as indented JSON text content.
pub(crate) fn json_result<T: Serialize>(value: &T) -> QualerResult<CallToolResult> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|e| QualerError::Invalid(format!("result serialization failed: {}", e)))?;
    Ok(CallToolResult::text(text))
}
