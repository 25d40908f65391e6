//! Cloud Firestore REST gateway
//!
//! Talks to the documents API (v1). Field values travel in Firestore's
//! typed-value envelope; [`to_fields`] / [`from_fields`] translate between
//! that envelope and the plain JSON the rest of the service works with.

use super::{
    BackendError, BackendResult, Direction, Document, DocumentStore, FieldFilter, OrderBy,
};
use async_trait::async_trait;
use serde_json::{Map, Value, json};
use std::time::Duration;

const FIRESTORE_HOST: &str = "https://firestore.googleapis.com/v1";
const PAGE_SIZE: usize = 300;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Document store backed by the managed Firestore project
pub struct FirestoreStore {
    client: reqwest::Client,
    project_id: String,
    api_key: String,
}

impl FirestoreStore {
    pub fn new(
        project_id: impl Into<String>,
        api_key: impl Into<String>,
    ) -> BackendResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| BackendError::Unavailable(e.to_string()))?;
        Ok(Self {
            client,
            project_id: project_id.into(),
            api_key: api_key.into(),
        })
    }

    fn documents_root(&self) -> String {
        format!(
            "{FIRESTORE_HOST}/projects/{}/databases/(default)/documents",
            self.project_id
        )
    }

    fn document_url(&self, collection: &str, id: &str) -> String {
        format!("{}/{collection}/{id}", self.documents_root())
    }
}

/// Surface non-2xx responses as gateway errors
async fn check(response: reqwest::Response) -> BackendResult<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    match status.as_u16() {
        401 | 403 => Err(BackendError::Denied(format!("{status}: {body}"))),
        404 => Err(BackendError::NotFound(body)),
        _ => Err(BackendError::Unavailable(format!("{status}: {body}"))),
    }
}

fn transport(err: reqwest::Error) -> BackendError {
    BackendError::Unavailable(err.to_string())
}

fn malformed(err: impl std::fmt::Display) -> BackendError {
    BackendError::Malformed(err.to_string())
}

// ── Typed-value codec ───────────────────────────────────────────────

/// Plain JSON value -> Firestore typed value
fn to_value(value: &Value) -> Value {
    match value {
        Value::Null => json!({"nullValue": null}),
        Value::Bool(b) => json!({"booleanValue": b}),
        Value::Number(n) => {
            // Integers are strings on the wire
            if let Some(i) = n.as_i64() {
                json!({"integerValue": i.to_string()})
            } else {
                json!({"doubleValue": n.as_f64()})
            }
        }
        Value::String(s) => json!({"stringValue": s}),
        Value::Array(items) => {
            let values: Vec<Value> = items.iter().map(to_value).collect();
            json!({"arrayValue": {"values": values}})
        }
        Value::Object(map) => json!({"mapValue": {"fields": to_fields(map)}}),
    }
}

fn to_fields(map: &Map<String, Value>) -> Value {
    let fields: Map<String, Value> = map.iter().map(|(k, v)| (k.clone(), to_value(v))).collect();
    Value::Object(fields)
}

/// Firestore typed value -> plain JSON value
fn from_value(value: &Value) -> BackendResult<Value> {
    let map = value
        .as_object()
        .ok_or_else(|| malformed("expected a typed value object"))?;
    let (kind, inner) = map
        .iter()
        .next()
        .ok_or_else(|| malformed("empty typed value"))?;

    Ok(match kind.as_str() {
        "nullValue" => Value::Null,
        "booleanValue" | "doubleValue" => inner.clone(),
        // Timestamps and references stay RFC 3339 / path strings
        "stringValue" | "timestampValue" | "referenceValue" => inner.clone(),
        "integerValue" => {
            let n = inner
                .as_str()
                .and_then(|s| s.parse::<i64>().ok())
                .or_else(|| inner.as_i64())
                .ok_or_else(|| malformed(format!("bad integerValue: {inner}")))?;
            Value::from(n)
        }
        "arrayValue" => {
            let values = inner
                .get("values")
                .and_then(Value::as_array)
                .cloned()
                .unwrap_or_default();
            Value::Array(
                values
                    .iter()
                    .map(from_value)
                    .collect::<BackendResult<Vec<_>>>()?,
            )
        }
        "mapValue" => {
            let fields = inner
                .get("fields")
                .and_then(Value::as_object)
                .cloned()
                .unwrap_or_default();
            Value::Object(from_fields(&fields)?)
        }
        other => return Err(malformed(format!("unsupported value kind: {other}"))),
    })
}

fn from_fields(fields: &Map<String, Value>) -> BackendResult<Map<String, Value>> {
    fields
        .iter()
        .map(|(k, v)| Ok((k.clone(), from_value(v)?)))
        .collect()
}

fn parse_document(raw: &Value) -> BackendResult<Document> {
    let name = raw
        .get("name")
        .and_then(Value::as_str)
        .ok_or_else(|| malformed("document without a name"))?;
    let id = name.rsplit('/').next().unwrap_or(name).to_string();
    let fields = raw
        .get("fields")
        .and_then(Value::as_object)
        .cloned()
        .unwrap_or_default();
    Ok(Document {
        id,
        data: Value::Object(from_fields(&fields)?),
    })
}

fn as_object(data: &Value) -> BackendResult<&Map<String, Value>> {
    data.as_object()
        .ok_or_else(|| malformed("document data must be an object"))
}

#[async_trait]
impl DocumentStore for FirestoreStore {
    async fn list(&self, collection: &str) -> BackendResult<Vec<Document>> {
        let url = format!("{}/{collection}", self.documents_root());
        let mut docs = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut request = self.client.get(&url).query(&[
                ("pageSize", PAGE_SIZE.to_string()),
                ("key", self.api_key.clone()),
            ]);
            if let Some(token) = &page_token {
                request = request.query(&[("pageToken", token.as_str())]);
            }

            let response = check(request.send().await.map_err(transport)?).await?;
            let body: Value = response.json().await.map_err(malformed)?;

            if let Some(raw_docs) = body.get("documents").and_then(Value::as_array) {
                for raw in raw_docs {
                    docs.push(parse_document(raw)?);
                }
            }

            match body.get("nextPageToken").and_then(Value::as_str) {
                Some(next) => page_token = Some(next.to_string()),
                None => break,
            }
        }

        Ok(docs)
    }

    async fn get(&self, collection: &str, id: &str) -> BackendResult<Option<Document>> {
        let response = self
            .client
            .get(self.document_url(collection, id))
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await
            .map_err(transport)?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let body: Value = check(response).await?.json().await.map_err(malformed)?;
        Ok(Some(parse_document(&body)?))
    }

    async fn add(&self, collection: &str, data: Value) -> BackendResult<Document> {
        let fields = to_fields(as_object(&data)?);
        let response = self
            .client
            .post(format!("{}/{collection}", self.documents_root()))
            .query(&[("key", self.api_key.as_str())])
            .json(&json!({"fields": fields}))
            .send()
            .await
            .map_err(transport)?;

        let body: Value = check(response).await?.json().await.map_err(malformed)?;
        parse_document(&body)
    }

    async fn update(&self, collection: &str, id: &str, patch: Value) -> BackendResult<()> {
        let fields = as_object(&patch)?;

        // The update mask limits the merge to the named fields; everything
        // else in the stored document stays untouched.
        let mut params: Vec<(&str, String)> = vec![
            ("key", self.api_key.clone()),
            ("currentDocument.exists", "true".to_string()),
        ];
        for field in fields.keys() {
            params.push(("updateMask.fieldPaths", field.clone()));
        }

        let response = self
            .client
            .patch(self.document_url(collection, id))
            .query(&params)
            .json(&json!({"fields": to_fields(fields)}))
            .send()
            .await
            .map_err(transport)?;

        check(response).await?;
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> BackendResult<()> {
        let response = self
            .client
            .delete(self.document_url(collection, id))
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await
            .map_err(transport)?;

        check(response).await?;
        Ok(())
    }

    async fn query(
        &self,
        collection: &str,
        filter: Option<FieldFilter>,
        order_by: Option<OrderBy>,
    ) -> BackendResult<Vec<Document>> {
        let mut structured = json!({"from": [{"collectionId": collection}]});

        if let Some(filter) = filter {
            structured["where"] = json!({
                "fieldFilter": {
                    "field": {"fieldPath": filter.field},
                    "op": "EQUAL",
                    "value": to_value(&filter.value),
                }
            });
        }

        if let Some(order) = order_by {
            let direction = match order.direction {
                Direction::Ascending => "ASCENDING",
                Direction::Descending => "DESCENDING",
            };
            structured["orderBy"] =
                json!([{"field": {"fieldPath": order.field}, "direction": direction}]);
        }

        let response = self
            .client
            .post(format!("{}:runQuery", self.documents_root()))
            .query(&[("key", self.api_key.as_str())])
            .json(&json!({"structuredQuery": structured}))
            .send()
            .await
            .map_err(transport)?;

        let body: Value = check(response).await?.json().await.map_err(malformed)?;
        let entries = body
            .as_array()
            .ok_or_else(|| malformed("runQuery response is not an array"))?;

        let mut docs = Vec::new();
        for entry in entries {
            // Entries without a document carry readTime/skippedResults only
            if let Some(raw) = entry.get("document") {
                docs.push(parse_document(raw)?);
            }
        }
        Ok(docs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integers_travel_as_strings() {
        let encoded = to_value(&json!(42));
        assert_eq!(encoded, json!({"integerValue": "42"}));
        assert_eq!(from_value(&encoded).unwrap(), json!(42));
    }

    #[test]
    fn nested_maps_and_arrays_round_trip() {
        let plain = json!({
            "name": {"en": "Tea", "lo": "ຊາ"},
            "items": [{"quantity": 2, "price": 3.5}],
            "isAvailable": true,
        });
        let encoded = to_fields(plain.as_object().unwrap());
        let decoded = from_fields(encoded.as_object().unwrap()).unwrap();
        assert_eq!(Value::Object(decoded), plain);
    }

    #[test]
    fn timestamps_decode_to_strings() {
        let decoded = from_value(&json!({"timestampValue": "2025-05-01T10:00:00Z"})).unwrap();
        assert_eq!(decoded, json!("2025-05-01T10:00:00Z"));
    }

    #[test]
    fn document_id_is_the_last_name_segment() {
        let raw = json!({
            "name": "projects/p/databases/(default)/documents/categories/abc123",
            "fields": {"slug": {"stringValue": "drinks"}},
        });
        let doc = parse_document(&raw).unwrap();
        assert_eq!(doc.id, "abc123");
        assert_eq!(doc.data["slug"], "drinks");
    }
}
