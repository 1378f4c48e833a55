//! Strict validation of untrusted remote JSON into typed entities.
//!
//! Each entity kind has a dedicated, total validation function: every
//! declared field is type-checked, failures name the offending field
//! path, and an entity is never partially constructed. Fields the server
//! adds that we do not declare are silently dropped.

use crate::error::{QualerError, QualerResult};
use crate::types::{Asset, Document, ServiceOrder};
use serde_json::Value;

/// One remote listing page before cursor arithmetic is applied.
#[derive(Debug, Clone, PartialEq)]
pub struct RawPage<T> {
    pub items: Vec<T>,
    pub total_count: Option<u64>,
}

/// Validate a service order body.
pub fn service_order(raw: &Value) -> QualerResult<ServiceOrder> {
    let obj = as_object(raw, "")?;
    Ok(ServiceOrder {
        id: require_id(obj, "id")?,
        number: require_string(obj, "number")?,
        status: require_string(obj, "status")?,
        client_company_id: optional_integer(obj, "client_company_id")?,
        client_company_name: optional_string(obj, "client_company_name")?,
        created_at: optional_string(obj, "created_at")?,
        updated_at: optional_string(obj, "updated_at")?,
    })
}

/// Validate an asset body.
pub fn asset(raw: &Value) -> QualerResult<Asset> {
    let obj = as_object(raw, "")?;
    Ok(Asset {
        id: require_id(obj, "id")?,
        name: require_string(obj, "name")?,
        serial_number: optional_string(obj, "serial_number")?,
        model: optional_string(obj, "model")?,
        manufacturer: optional_string(obj, "manufacturer")?,
        client_company_id: optional_integer(obj, "client_company_id")?,
        location: optional_string(obj, "location")?,
    })
}

/// Validate a single document record.
pub fn document(raw: &Value) -> QualerResult<Document> {
    let obj = as_object(raw, "")?;
    Ok(Document {
        id: require_id(obj, "id")?,
        filename: require_string(obj, "filename")?,
        content_type: optional_string(obj, "content_type")?,
        size_bytes: optional_integer(obj, "size_bytes")?,
        uploaded_at: optional_string(obj, "uploaded_at")?,
        uploaded_by: optional_string(obj, "uploaded_by")?,
    })
}

/// Validate a document sub-collection body: `{"documents": [...]}`.
/// An empty collection is a valid result.
pub fn document_list(raw: &Value) -> QualerResult<Vec<Document>> {
    let obj = as_object(raw, "")?;
    let items = match obj.get("documents") {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::Array(items)) => items,
        Some(other) => {
            return Err(QualerError::validation(
                "documents",
                format!("expected an array, got {}", type_name(other)),
            ))
        }
    };

    items
        .iter()
        .enumerate()
        .map(|(i, item)| document(item).map_err(|e| prefix_path(e, &format!("documents[{}]", i))))
        .collect()
}

/// Validate a listing page body: `{"items": [...], "total_count"?: n}`,
/// applying `item` to each element.
pub fn page<T>(raw: &Value, item: fn(&Value) -> QualerResult<T>) -> QualerResult<RawPage<T>> {
    let obj = as_object(raw, "")?;
    let raw_items: &[Value] = match obj.get("items") {
        None | Some(Value::Null) => &[],
        Some(Value::Array(items)) => items,
        Some(other) => {
            return Err(QualerError::validation(
                "items",
                format!("expected an array, got {}", type_name(other)),
            ))
        }
    };

    let items = raw_items
        .iter()
        .enumerate()
        .map(|(i, v)| item(v).map_err(|e| prefix_path(e, &format!("items[{}]", i))))
        .collect::<QualerResult<Vec<T>>>()?;

    let total_count = match obj.get("total_count") {
        None | Some(Value::Null) => None,
        Some(v) => Some(v.as_u64().ok_or_else(|| {
            QualerError::validation(
                "total_count",
                format!("expected a non-negative integer, got {}", type_name(v)),
            )
        })?),
    };

    Ok(RawPage { items, total_count })
}

// Field extraction helpers. All failures carry the field path.

type Object = serde_json::Map<String, Value>;

fn as_object<'a>(raw: &'a Value, path: &str) -> QualerResult<&'a Object> {
    raw.as_object().ok_or_else(|| {
        QualerError::validation(
            if path.is_empty() { "(root)" } else { path },
            format!("expected an object, got {}", type_name(raw)),
        )
    })
}

/// A required identifier: an integer strictly greater than zero.
/// Numeric strings are rejected.
fn require_id(obj: &Object, field: &str) -> QualerResult<i64> {
    let value = obj
        .get(field)
        .ok_or_else(|| QualerError::validation(field, "required field is missing"))?;
    let id = value.as_i64().ok_or_else(|| {
        QualerError::validation(field, format!("expected an integer, got {}", type_name(value)))
    })?;
    if id <= 0 {
        return Err(QualerError::validation(
            field,
            format!("expected a positive identifier, got {}", id),
        ));
    }
    Ok(id)
}

fn require_string(obj: &Object, field: &str) -> QualerResult<String> {
    match obj.get(field) {
        None | Some(Value::Null) => {
            Err(QualerError::validation(field, "required field is missing"))
        }
        Some(Value::String(s)) => Ok(s.clone()),
        Some(other) => Err(QualerError::validation(
            field,
            format!("expected a string, got {}", type_name(other)),
        )),
    }
}

fn optional_string(obj: &Object, field: &str) -> QualerResult<Option<String>> {
    match obj.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(QualerError::validation(
            field,
            format!("expected a string, got {}", type_name(other)),
        )),
    }
}

fn optional_integer(obj: &Object, field: &str) -> QualerResult<Option<i64>> {
    match obj.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(v) => match v.as_i64() {
            Some(n) => Ok(Some(n)),
            None => Err(QualerError::validation(
                field,
                format!("expected an integer, got {}", type_name(v)),
            )),
        },
    }
}

fn prefix_path(e: QualerError, prefix: &str) -> QualerError {
    match e {
        QualerError::Validation { path, detail } => QualerError::Validation {
            path: if path == "(root)" {
                prefix.to_string()
            } else {
                format!("{}.{}", prefix, path)
            },
            detail,
        },
        other => other,
    }
}

fn type_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_valid_service_order() {
        let raw = json!({
            "id": 123,
            "number": "SO-12345",
            "status": "Open",
            "client_company_id": 42,
            "client_company_name": "ACME Corp",
            "created_at": "2024-01-15T10:00:00Z"
        });

        let so = service_order(&raw).unwrap();
        assert_eq!(so.id, 123);
        assert_eq!(so.number, "SO-12345");
        assert_eq!(so.status, "Open");
        assert_eq!(so.client_company_id, Some(42));
        assert_eq!(so.updated_at, None);
    }

    #[test]
    fn test_unknown_fields_are_dropped() {
        let raw = json!({
            "id": 1,
            "number": "SO-1",
            "status": "Open",
            "some_new_server_field": {"nested": true}
        });

        assert!(service_order(&raw).is_ok());
    }

    #[test]
    fn test_missing_required_field_names_path() {
        let raw = json!({"id": 1, "status": "Open"});
        let err = service_order(&raw).unwrap_err();
        match err {
            QualerError::Validation { path, .. } => assert_eq!(path, "number"),
            other => panic!("expected Validation, got {:?}", other),
        }
    }

    #[test]
    fn test_numeric_string_id_is_rejected() {
        let raw = json!({"id": "123", "number": "SO-1", "status": "Open"});
        let err = service_order(&raw).unwrap_err();
        match err {
            QualerError::Validation { path, detail } => {
                assert_eq!(path, "id");
                assert!(detail.contains("integer"));
            }
            other => panic!("expected Validation, got {:?}", other),
        }
    }

    #[test]
    fn test_zero_and_negative_ids_are_rejected() {
        for bad in [0, -5] {
            let raw = json!({"id": bad, "name": "Gauge"});
            assert!(asset(&raw).is_err(), "id {} should be rejected", bad);
        }
    }

    #[test]
    fn test_wrong_type_for_optional_field_fails() {
        let raw = json!({"id": 1, "name": "Gauge", "serial_number": 42});
        let err = asset(&raw).unwrap_err();
        match err {
            QualerError::Validation { path, .. } => assert_eq!(path, "serial_number"),
            other => panic!("expected Validation, got {:?}", other),
        }
    }

    #[test]
    fn test_null_optional_field_is_none() {
        let raw = json!({"id": 1, "name": "Gauge", "serial_number": null});
        let a = asset(&raw).unwrap();
        assert_eq!(a.serial_number, None);
    }

    #[test]
    fn test_document_list_empty_and_missing_key() {
        assert!(document_list(&json!({"documents": []})).unwrap().is_empty());
        assert!(document_list(&json!({})).unwrap().is_empty());
    }

    #[test]
    fn test_document_list_names_element_path() {
        let raw = json!({"documents": [
            {"id": 1, "filename": "cert.pdf"},
            {"id": 2}
        ]});
        let err = document_list(&raw).unwrap_err();
        match err {
            QualerError::Validation { path, .. } => assert_eq!(path, "documents[1].filename"),
            other => panic!("expected Validation, got {:?}", other),
        }
    }

    #[test]
    fn test_page_of_assets() {
        let raw = json!({
            "items": [
                {"id": 1, "name": "Caliper", "serial_number": "X123"},
                {"id": 2, "name": "Scale"}
            ],
            "total_count": 7
        });

        let p = page(&raw, asset).unwrap();
        assert_eq!(p.items.len(), 2);
        assert_eq!(p.total_count, Some(7));
    }

    #[test]
    fn test_page_rejects_bad_element() {
        let raw = json!({"items": [{"id": -1, "name": "Caliper"}]});
        let err = page(&raw, asset).unwrap_err();
        match err {
            QualerError::Validation { path, .. } => assert_eq!(path, "items[0].id"),
            other => panic!("expected Validation, got {:?}", other),
        }
    }

    #[test]
    fn test_non_object_root_is_rejected() {
        let err = service_order(&json!([1, 2, 3])).unwrap_err();
        assert_eq!(err.kind(), "remote_fault");
    }
}
