//! Backend gateway
//!
//! Everything durable lives in an external managed backend: a document
//! database, a blob store, and an identity provider. This module formalizes
//! the contract the admin service expects from that backend and ships two
//! families of implementations:
//!
//! - [`memory`] - in-process store for tests and local development
//! - [`firestore`] / [`storage`] / [`identity`] - REST gateways to the
//!   managed provider
//!
//! The gateways are thin invocations. No retry, no backoff, no caching: one
//! failed call aborts the user action that issued it.

pub mod firestore;
pub mod identity;
pub mod memory;
pub mod storage;

pub use firestore::FirestoreStore;
pub use identity::IdentityGateway;
pub use memory::MemoryBackend;
pub use storage::StorageBucket;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use shared::AppError;
use thiserror::Error;

/// Collection names in the managed document store
pub mod collections {
    pub const MENU_ITEMS: &str = "menuItems";
    pub const CATEGORIES: &str = "categories";
    pub const ORDERS: &str = "orders";
    pub const USERS: &str = "users";
}

/// Backend gateway error types
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("Backend unavailable: {0}")]
    Unavailable(String),

    #[error("Permission denied: {0}")]
    Denied(String),

    #[error("Document not found: {0}")]
    NotFound(String),

    #[error("Malformed backend response: {0}")]
    Malformed(String),
}

/// Result type for gateway operations
pub type BackendResult<T> = Result<T, BackendError>;

impl From<BackendError> for AppError {
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::NotFound(msg) => AppError::NotFound(msg),
            other => AppError::Backend(other.to_string()),
        }
    }
}

/// A raw document: backend-assigned id plus its data
///
/// The id is the document name, not a field inside the data.
#[derive(Debug, Clone)]
pub struct Document {
    pub id: String,
    pub data: Value,
}

impl Document {
    /// Decode into a model, injecting the document id
    pub fn decode<T: DeserializeOwned>(self) -> BackendResult<T> {
        let mut data = self.data;
        if let Value::Object(map) = &mut data {
            map.insert("id".to_string(), Value::String(self.id.clone()));
        }
        serde_json::from_value(data)
            .map_err(|e| BackendError::Malformed(format!("document {}: {e}", self.id)))
    }
}

/// Serialize a model into document data
///
/// The id never lives inside the stored document; strip it if the model
/// serialized one.
pub fn encode<T: Serialize>(model: &T) -> BackendResult<Value> {
    let mut value =
        serde_json::to_value(model).map_err(|e| BackendError::Malformed(e.to_string()))?;
    if let Value::Object(map) = &mut value {
        map.remove("id");
    }
    Ok(value)
}

/// Single-field equality filter, the only filter shape the dashboard uses
#[derive(Debug, Clone)]
pub struct FieldFilter {
    pub field: String,
    pub value: Value,
}

impl FieldFilter {
    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

/// Single-field ordering
#[derive(Debug, Clone)]
pub struct OrderBy {
    pub field: String,
    pub direction: Direction,
}

impl OrderBy {
    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: Direction::Descending,
        }
    }
}

/// Document database contract
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// All documents of a collection
    async fn list(&self, collection: &str) -> BackendResult<Vec<Document>>;

    /// Single document, `None` when absent
    async fn get(&self, collection: &str, id: &str) -> BackendResult<Option<Document>>;

    /// Create a document with a backend-assigned id
    async fn add(&self, collection: &str, data: Value) -> BackendResult<Document>;

    /// Merge the given top-level fields into an existing document
    async fn update(&self, collection: &str, id: &str, patch: Value) -> BackendResult<()>;

    /// Delete a document
    async fn delete(&self, collection: &str, id: &str) -> BackendResult<()>;

    /// Filtered and/or ordered listing
    async fn query(
        &self,
        collection: &str,
        filter: Option<FieldFilter>,
        order_by: Option<OrderBy>,
    ) -> BackendResult<Vec<Document>>;
}

/// Reference to an uploaded blob
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlobRef {
    pub path: String,
    /// Access token minted by the provider, when it mints one
    pub token: Option<String>,
}

/// Blob storage contract
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Upload bytes, returning a reference to the stored object
    async fn upload(&self, path: &str, bytes: Vec<u8>, content_type: &str)
    -> BackendResult<BlobRef>;

    /// Resolve a reference to a retrievable URL
    async fn download_url(&self, blob: &BlobRef) -> BackendResult<String>;
}

/// The signed-in staff member behind a session token
#[derive(Debug, Clone)]
pub struct StaffSession {
    pub uid: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
}

/// Identity provider contract
#[async_trait]
pub trait AuthGateway: Send + Sync {
    /// Resolve a bearer token to the signed-in staff member, `None` when the
    /// session is no longer valid
    async fn verify_session(&self, token: &str) -> BackendResult<Option<StaffSession>>;

    /// End the session, where the provider supports revocation
    async fn sign_out(&self, token: &str) -> BackendResult<()>;
}
