//! Category API Handlers
//!
//! Deletion refusal (category still referenced by menu items) comes back as
//! 422 with the blocking count in the body, distinct from backend failures.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use shared::AppResult;
use shared::models::{Category, CategoryCreate, CategoryUpdate};

/// GET /api/categories - all categories, sequence ascending
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Category>>> {
    Ok(Json(state.catalog.list_categories().await?))
}

/// POST /api/categories - create a category
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<CategoryCreate>,
) -> AppResult<Json<Vec<Category>>> {
    Ok(Json(state.catalog.create_category(payload).await?))
}

/// PUT /api/categories/:id - update a category
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<CategoryUpdate>,
) -> AppResult<Json<Vec<Category>>> {
    Ok(Json(state.catalog.update_category(&id, payload).await?))
}

/// DELETE /api/categories/:id - delete a category (refused while in use)
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Vec<Category>>> {
    Ok(Json(state.catalog.delete_category(&id).await?))
}
