//! Menu Item API Handlers
//!
//! Mutations return the re-fetched collection so the dashboard replaces its
//! state in one round trip instead of patching locally.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use shared::AppResult;
use shared::models::{MenuItem, MenuItemCreate, MenuItemUpdate};

/// GET /api/menu-items - all menu items
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<MenuItem>>> {
    Ok(Json(state.catalog.list_items().await?))
}

/// GET /api/menu-items/:id - single menu item
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<MenuItem>> {
    Ok(Json(state.catalog.get_item(&id).await?))
}

/// POST /api/menu-items - create a menu item
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<MenuItemCreate>,
) -> AppResult<Json<Vec<MenuItem>>> {
    Ok(Json(state.catalog.create_item(payload).await?))
}

/// PUT /api/menu-items/:id - update a menu item
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<MenuItemUpdate>,
) -> AppResult<Json<Vec<MenuItem>>> {
    Ok(Json(state.catalog.update_item(&id, payload).await?))
}

/// DELETE /api/menu-items/:id - delete a menu item
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Vec<MenuItem>>> {
    Ok(Json(state.catalog.delete_item(&id).await?))
}
