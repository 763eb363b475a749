//! Firestore REST wire format.
//!
//! Pure request/response shaping for the hosted document store; the browser
//! crate owns the HTTP transport. Keeping the codec here lets it be tested
//! natively.
//!
//! Wire mapping:
//! - get: `GET {base}/{path}`; 404 means absent
//! - merge: `PATCH {base}/{path}?updateMask.fieldPaths=…` (one per field)
//! - overwrite: `PATCH {base}/{path}`
//! - create-only: `PATCH {base}/{path}?currentDocument.exists=false`
//! - query: `POST {base}[/{parent}]:runQuery` with a `structuredQuery`

#[cfg(test)]
#[path = "firestore_test.rs"]
mod firestore_test;

use serde_json::{Map, Value, json};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::config::ClientConfig;
use crate::document::{CollectionPath, DocPath, Document, FieldValue, Fields, Filter, WriteMode};
use crate::error::StoreError;

pub const API_ROOT: &str = "https://firestore.googleapis.com/v1";

/// Base URL of one database's document tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FirestoreEndpoint {
    base: String,
}

impl FirestoreEndpoint {
    #[must_use]
    pub fn new(project_id: &str, database: &str) -> Self {
        Self {
            base: format!(
                "{API_ROOT}/projects/{}/databases/{}/documents",
                encode_component(project_id),
                encode_component(database)
            ),
        }
    }

    #[must_use]
    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(&config.project_id, &config.database)
    }

    #[must_use]
    pub fn base(&self) -> &str {
        &self.base
    }

    #[must_use]
    pub fn document_url(&self, path: &DocPath) -> String {
        format!("{}/{}", self.base, encode_path(&path.to_string()))
    }

    /// URL for a `PATCH` write of `fields` under `mode`.
    #[must_use]
    pub fn write_url(&self, path: &DocPath, fields: &Fields, mode: WriteMode) -> String {
        let url = self.document_url(path);
        match mode {
            WriteMode::Overwrite => url,
            WriteMode::CreateOnly => format!("{url}?currentDocument.exists=false"),
            WriteMode::Merge => {
                let mask: Vec<String> = fields
                    .keys()
                    .map(|name| format!("updateMask.fieldPaths={}", encode_component(&field_path(name))))
                    .collect();
                if mask.is_empty() { url } else { format!("{url}?{}", mask.join("&")) }
            }
        }
    }

    /// `runQuery` URL for the parent of `collection`.
    #[must_use]
    pub fn run_query_url(&self, collection: &CollectionPath) -> String {
        match collection.parent() {
            Some(parent) => format!("{}/{}:runQuery", self.base, encode_path(&parent.to_string())),
            None => format!("{}:runQuery", self.base),
        }
    }
}

// =============================================================================
// ENCODING
// =============================================================================

/// Encode one field value as a Firestore typed value.
///
/// # Errors
///
/// Returns [`StoreError::Malformed`] for timestamps outside the RFC 3339 range.
pub fn encode_value(value: &FieldValue) -> Result<Value, StoreError> {
    Ok(match value {
        FieldValue::Null => json!({ "nullValue": null }),
        FieldValue::Bool(b) => json!({ "booleanValue": b }),
        FieldValue::Integer(i) => json!({ "integerValue": i.to_string() }),
        FieldValue::Double(d) => json!({ "doubleValue": d }),
        FieldValue::String(s) => json!({ "stringValue": s }),
        FieldValue::Timestamp(ts) => {
            let formatted = ts.format(&Rfc3339).map_err(|e| StoreError::Malformed(e.to_string()))?;
            json!({ "timestampValue": formatted })
        }
        FieldValue::Array(items) => {
            let values = items.iter().map(encode_value).collect::<Result<Vec<_>, _>>()?;
            json!({ "arrayValue": { "values": values } })
        }
        FieldValue::Map(fields) => json!({ "mapValue": { "fields": encode_fields(fields)? } }),
    })
}

/// Encode a field map (the `fields` object of a document).
///
/// # Errors
///
/// Propagates [`encode_value`] failures.
pub fn encode_fields(fields: &Fields) -> Result<Value, StoreError> {
    let mut out = Map::new();
    for (name, value) in fields {
        out.insert(name.clone(), encode_value(value)?);
    }
    Ok(Value::Object(out))
}

/// Request body for a document write.
///
/// # Errors
///
/// Propagates [`encode_value`] failures.
pub fn encode_document(fields: &Fields) -> Result<Value, StoreError> {
    Ok(json!({ "fields": encode_fields(fields)? }))
}

/// `runQuery` body: equality filters AND-ed together, at most `limit` rows.
///
/// # Errors
///
/// Propagates [`encode_value`] failures.
pub fn run_query_body(collection: &CollectionPath, filters: &[Filter], limit: Option<u32>) -> Result<Value, StoreError> {
    let clauses = filters
        .iter()
        .map(|f| {
            encode_value(&f.value).map(|value| {
                json!({
                    "fieldFilter": {
                        "field": { "fieldPath": field_path(&f.field) },
                        "op": "EQUAL",
                        "value": value,
                    }
                })
            })
        })
        .collect::<Result<Vec<_>, StoreError>>()?;

    let mut query = json!({ "from": [{ "collectionId": collection.id() }] });
    let condition = match clauses.len() {
        0 => None,
        1 => clauses.into_iter().next(),
        _ => Some(json!({ "compositeFilter": { "op": "AND", "filters": clauses } })),
    };
    if let Some(obj) = query.as_object_mut() {
        if let Some(condition) = condition {
            obj.insert("where".to_owned(), condition);
        }
        if let Some(limit) = limit {
            obj.insert("limit".to_owned(), json!(limit));
        }
    }
    Ok(json!({ "structuredQuery": query }))
}

// =============================================================================
// DECODING
// =============================================================================

/// Decode a Firestore typed value.
///
/// # Errors
///
/// Returns [`StoreError::Malformed`] for unknown or ill-typed values.
pub fn decode_value(value: &Value) -> Result<FieldValue, StoreError> {
    let obj = value.as_object().ok_or_else(|| malformed("value is not an object", value))?;
    let (kind, inner) = obj.iter().next().ok_or_else(|| malformed("empty value", value))?;

    match kind.as_str() {
        "nullValue" => Ok(FieldValue::Null),
        "booleanValue" => inner.as_bool().map(FieldValue::Bool).ok_or_else(|| malformed("booleanValue", inner)),
        "integerValue" => decode_integer(inner).map(FieldValue::Integer),
        "doubleValue" => inner.as_f64().map(FieldValue::Double).ok_or_else(|| malformed("doubleValue", inner)),
        "stringValue" | "referenceValue" | "bytesValue" => inner
            .as_str()
            .map(|s| FieldValue::String(s.to_owned()))
            .ok_or_else(|| malformed(kind, inner)),
        "timestampValue" => {
            let raw = inner.as_str().ok_or_else(|| malformed("timestampValue", inner))?;
            OffsetDateTime::parse(raw, &Rfc3339)
                .map(FieldValue::Timestamp)
                .map_err(|e| StoreError::Malformed(format!("timestampValue {raw}: {e}")))
        }
        "arrayValue" => {
            let values = match inner.get("values").and_then(Value::as_array) {
                Some(values) => values.iter().map(decode_value).collect::<Result<Vec<_>, _>>()?,
                None => Vec::new(),
            };
            Ok(FieldValue::Array(values))
        }
        "mapValue" => Ok(FieldValue::Map(decode_fields(inner.get("fields"))?)),
        "geoPointValue" => {
            let mut fields = Fields::new();
            for axis in ["latitude", "longitude"] {
                let coord = inner.get(axis).and_then(Value::as_f64).unwrap_or_default();
                fields.insert(axis.to_owned(), FieldValue::Double(coord));
            }
            Ok(FieldValue::Map(fields))
        }
        other => Err(StoreError::Malformed(format!("unsupported value type: {other}"))),
    }
}

fn decode_integer(inner: &Value) -> Result<i64, StoreError> {
    match inner {
        Value::String(s) => s.parse::<i64>().map_err(|e| StoreError::Malformed(format!("integerValue {s}: {e}"))),
        Value::Number(n) => n.as_i64().ok_or_else(|| malformed("integerValue", inner)),
        _ => Err(malformed("integerValue", inner)),
    }
}

fn decode_fields(fields: Option<&Value>) -> Result<Fields, StoreError> {
    let Some(fields) = fields else {
        return Ok(Fields::new());
    };
    let obj = fields.as_object().ok_or_else(|| malformed("fields is not an object", fields))?;
    obj.iter()
        .map(|(name, value)| decode_value(value).map(|decoded| (name.clone(), decoded)))
        .collect()
}

/// Decode a document resource (`{ name, fields, … }`).
///
/// # Errors
///
/// Returns [`StoreError::Malformed`] if the name or any field is invalid.
pub fn decode_document(value: &Value) -> Result<Document, StoreError> {
    let name = value
        .get("name")
        .and_then(Value::as_str)
        .ok_or_else(|| malformed("document without name", value))?;
    let id = name.rsplit('/').next().unwrap_or(name).to_owned();
    Ok(Document { id, fields: decode_fields(value.get("fields"))? })
}

/// Decode a `runQuery` response stream (array of `{ document?, readTime }`).
///
/// # Errors
///
/// Returns [`StoreError::Malformed`] if the body is not an array or holds a bad document.
pub fn decode_query_response(value: &Value) -> Result<Vec<Document>, StoreError> {
    let rows = value.as_array().ok_or_else(|| malformed("runQuery response is not an array", value))?;
    rows.iter()
        .filter_map(|row| row.get("document"))
        .map(decode_document)
        .collect()
}

/// Map a non-success HTTP status to a store error.
#[must_use]
pub fn status_error(status: u16, body: &str) -> StoreError {
    let message = serde_json::from_str::<Value>(body)
        .into_iter()
        .find_map(|v| v.pointer("/error/message").and_then(Value::as_str).map(str::to_owned))
        .unwrap_or_else(|| body.trim().to_owned());
    match status {
        409 | 412 => StoreError::Conflict(message),
        0 => StoreError::Unreachable(message),
        _ => StoreError::Rejected { status, message },
    }
}

// =============================================================================
// HELPERS
// =============================================================================

fn malformed(what: &str, value: &Value) -> StoreError {
    StoreError::Malformed(format!("{what}: {value}"))
}

/// Quote a field name unless it is a simple identifier.
fn field_path(name: &str) -> String {
    let simple = name.chars().next().is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    if simple {
        name.to_owned()
    } else {
        format!("`{}`", name.replace('\\', "\\\\").replace('`', "\\`"))
    }
}

/// Percent-encode each segment of a slash-separated path.
fn encode_path(path: &str) -> String {
    path.split('/').map(encode_component).collect::<Vec<_>>().join("/")
}

fn encode_component(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for byte in raw.bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'_' | b'.' | b'~' | b'(' | b')') {
            out.push(char::from(byte));
        } else {
            out.push_str(&format!("%{byte:02X}"));
        }
    }
    out
}
