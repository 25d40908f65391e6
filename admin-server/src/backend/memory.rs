//! In-memory backend
//!
//! Backs tests and local development (`BACKEND=memory`). Collections live in
//! `DashMap`s and queries filter/sort over cloned snapshots. Unlike the
//! managed provider, the auth gateway here issues and revokes tokens for
//! real, so sign-out is observable in tests.

use super::{
    AuthGateway, BackendError, BackendResult, BlobRef, BlobStore, Document, DocumentStore,
    Direction, FieldFilter, OrderBy, StaffSession,
};
use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::Value;
use std::cmp::Ordering;
use uuid::Uuid;

struct StoredBlob {
    bytes: Vec<u8>,
    content_type: String,
}

/// In-process implementation of all three backend contracts
#[derive(Default)]
pub struct MemoryBackend {
    collections: DashMap<String, DashMap<String, Value>>,
    blobs: DashMap<String, StoredBlob>,
    sessions: DashMap<String, StaffSession>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a session token (local sign-in and tests)
    pub fn issue_session(&self, uid: impl Into<String>) -> String {
        let token = Uuid::new_v4().to_string();
        let session = StaffSession {
            uid: uid.into(),
            email: None,
            display_name: None,
        };
        self.sessions.insert(token.clone(), session);
        token
    }

    /// Stored size of a blob, `None` when absent
    pub fn blob_size(&self, path: &str) -> Option<usize> {
        self.blobs.get(path).map(|b| b.bytes.len())
    }

    pub fn blob_content_type(&self, path: &str) -> Option<String> {
        self.blobs.get(path).map(|b| b.content_type.clone())
    }
}

/// Order two field values; missing fields sort first
fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(x), Some(y)) => match (x, y) {
            (Value::String(x), Value::String(y)) => x.cmp(y),
            (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
            _ => x
                .as_f64()
                .partial_cmp(&y.as_f64())
                .unwrap_or(Ordering::Equal),
        },
    }
}

#[async_trait]
impl DocumentStore for MemoryBackend {
    async fn list(&self, collection: &str) -> BackendResult<Vec<Document>> {
        let docs = match self.collections.get(collection) {
            Some(col) => col
                .iter()
                .map(|entry| Document {
                    id: entry.key().clone(),
                    data: entry.value().clone(),
                })
                .collect(),
            None => Vec::new(),
        };
        Ok(docs)
    }

    async fn get(&self, collection: &str, id: &str) -> BackendResult<Option<Document>> {
        let doc = self.collections.get(collection).and_then(|col| {
            col.get(id).map(|data| Document {
                id: id.to_string(),
                data: data.clone(),
            })
        });
        Ok(doc)
    }

    async fn add(&self, collection: &str, data: Value) -> BackendResult<Document> {
        let id = Uuid::new_v4().simple().to_string();
        self.collections
            .entry(collection.to_string())
            .or_default()
            .insert(id.clone(), data.clone());
        Ok(Document { id, data })
    }

    async fn update(&self, collection: &str, id: &str, patch: Value) -> BackendResult<()> {
        let col = self
            .collections
            .get(collection)
            .ok_or_else(|| BackendError::NotFound(format!("{collection}/{id}")))?;
        let mut doc = col
            .get_mut(id)
            .ok_or_else(|| BackendError::NotFound(format!("{collection}/{id}")))?;

        match (doc.value_mut(), patch) {
            (Value::Object(existing), Value::Object(fields)) => {
                for (key, value) in fields {
                    existing.insert(key, value);
                }
                Ok(())
            }
            _ => Err(BackendError::Malformed(format!(
                "merge patch for {collection}/{id} must be an object"
            ))),
        }
    }

    async fn delete(&self, collection: &str, id: &str) -> BackendResult<()> {
        // Idempotent, like the managed provider
        if let Some(col) = self.collections.get(collection) {
            col.remove(id);
        }
        Ok(())
    }

    async fn query(
        &self,
        collection: &str,
        filter: Option<FieldFilter>,
        order_by: Option<OrderBy>,
    ) -> BackendResult<Vec<Document>> {
        let mut docs = self.list(collection).await?;

        if let Some(filter) = filter {
            docs.retain(|doc| doc.data.get(&filter.field) == Some(&filter.value));
        }

        if let Some(order) = order_by {
            docs.sort_by(|a, b| {
                let ord = compare_values(a.data.get(&order.field), b.data.get(&order.field));
                match order.direction {
                    Direction::Ascending => ord,
                    Direction::Descending => ord.reverse(),
                }
            });
        }

        Ok(docs)
    }
}

#[async_trait]
impl BlobStore for MemoryBackend {
    async fn upload(
        &self,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> BackendResult<BlobRef> {
        self.blobs.insert(
            path.to_string(),
            StoredBlob {
                bytes,
                content_type: content_type.to_string(),
            },
        );
        Ok(BlobRef {
            path: path.to_string(),
            token: None,
        })
    }

    async fn download_url(&self, blob: &BlobRef) -> BackendResult<String> {
        if !self.blobs.contains_key(&blob.path) {
            return Err(BackendError::NotFound(blob.path.clone()));
        }
        Ok(format!("memory://{}", blob.path))
    }
}

#[async_trait]
impl AuthGateway for MemoryBackend {
    async fn verify_session(&self, token: &str) -> BackendResult<Option<StaffSession>> {
        Ok(self.sessions.get(token).map(|s| s.clone()))
    }

    async fn sign_out(&self, token: &str) -> BackendResult<()> {
        self.sessions.remove(token);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn update_merges_without_touching_other_fields() {
        let backend = MemoryBackend::new();
        let doc = backend
            .add("orders", json!({"status": "pending", "total": 12.5}))
            .await
            .unwrap();

        backend
            .update("orders", &doc.id, json!({"status": "completed"}))
            .await
            .unwrap();

        let stored = backend.get("orders", &doc.id).await.unwrap().unwrap();
        assert_eq!(stored.data["status"], "completed");
        assert_eq!(stored.data["total"], 12.5);
    }

    #[tokio::test]
    async fn query_filters_and_orders_descending() {
        let backend = MemoryBackend::new();
        for (status, at) in [
            ("pending", "2025-05-01T10:00:00Z"),
            ("completed", "2025-05-02T10:00:00Z"),
            ("pending", "2025-05-03T10:00:00Z"),
        ] {
            backend
                .add("orders", json!({"status": status, "createdAt": at}))
                .await
                .unwrap();
        }

        let docs = backend
            .query(
                "orders",
                Some(FieldFilter::eq("status", "pending")),
                Some(OrderBy::desc("createdAt")),
            )
            .await
            .unwrap();

        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].data["createdAt"], "2025-05-03T10:00:00Z");
    }

    #[tokio::test]
    async fn uploaded_blobs_resolve_to_urls() {
        let backend = MemoryBackend::new();
        let blob = backend
            .upload("menuItems/abc.jpg", vec![1, 2, 3], "image/jpeg")
            .await
            .unwrap();

        assert_eq!(backend.blob_size("menuItems/abc.jpg"), Some(3));
        assert_eq!(
            backend.blob_content_type("menuItems/abc.jpg").as_deref(),
            Some("image/jpeg")
        );
        assert_eq!(
            backend.download_url(&blob).await.unwrap(),
            "memory://menuItems/abc.jpg"
        );

        let missing = BlobRef {
            path: "menuItems/missing.jpg".into(),
            token: None,
        };
        assert!(backend.download_url(&missing).await.is_err());
    }

    #[tokio::test]
    async fn sign_out_revokes_the_session() {
        let backend = MemoryBackend::new();
        let token = backend.issue_session("staff-1");

        assert!(backend.verify_session(&token).await.unwrap().is_some());
        backend.sign_out(&token).await.unwrap();
        assert!(backend.verify_session(&token).await.unwrap().is_none());
    }
}
