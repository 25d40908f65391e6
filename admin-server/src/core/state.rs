//! Server state
//!
//! [`ServerState`] holds the gateway handles and the services built on them.
//! Everything is behind `Arc`, so cloning per request is cheap.

use std::sync::Arc;

use crate::backend::{
    AuthGateway, BlobStore, DocumentStore, FirestoreStore, IdentityGateway, MemoryBackend,
    StorageBucket,
};
use crate::core::{BackendKind, Config};
use crate::services::{CatalogService, OrderService, StatsService, UserService};
use shared::{AppError, AppResult};

/// Shared per-request state: gateways plus the services built on them
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub documents: Arc<dyn DocumentStore>,
    pub blobs: Arc<dyn BlobStore>,
    pub auth: Arc<dyn AuthGateway>,
    pub catalog: CatalogService,
    pub orders: OrderService,
    pub users: UserService,
    pub stats: StatsService,
}

impl ServerState {
    /// Build state for the configured backend
    pub fn initialize(config: &Config) -> AppResult<Self> {
        match config.backend {
            BackendKind::Memory => {
                tracing::info!("Using in-memory backend");
                let backend = Arc::new(MemoryBackend::new());
                Ok(Self::with_backend(
                    config.clone(),
                    backend.clone(),
                    backend.clone(),
                    backend,
                ))
            }
            BackendKind::Firebase => {
                let project_id = config.firebase_project_id.clone().ok_or_else(|| {
                    AppError::internal("FIREBASE_PROJECT_ID is required for the firebase backend")
                })?;
                let api_key = config.firebase_api_key.clone().ok_or_else(|| {
                    AppError::internal("FIREBASE_API_KEY is required for the firebase backend")
                })?;
                let bucket = config.storage_bucket().ok_or_else(|| {
                    AppError::internal("FIREBASE_STORAGE_BUCKET could not be determined")
                })?;

                tracing::info!(project = %project_id, "Using managed firebase backend");
                let documents = Arc::new(FirestoreStore::new(&project_id, &api_key)?);
                let blobs = Arc::new(StorageBucket::new(bucket)?);
                let auth = Arc::new(IdentityGateway::new(&api_key)?);
                Ok(Self::with_backend(config.clone(), documents, blobs, auth))
            }
        }
    }

    /// Assemble state from explicit gateways
    ///
    /// Tests use this with a shared [`MemoryBackend`] behind all three
    /// handles.
    pub fn with_backend(
        config: Config,
        documents: Arc<dyn DocumentStore>,
        blobs: Arc<dyn BlobStore>,
        auth: Arc<dyn AuthGateway>,
    ) -> Self {
        Self {
            catalog: CatalogService::new(documents.clone()),
            orders: OrderService::new(documents.clone()),
            users: UserService::new(documents.clone()),
            stats: StatsService::new(documents.clone()),
            config,
            documents,
            blobs,
            auth,
        }
    }
}
