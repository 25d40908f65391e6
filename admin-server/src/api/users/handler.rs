//! User API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use shared::AppResult;
use shared::models::User;

/// GET /api/users - all users with derived order counts
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<User>>> {
    Ok(Json(state.users.list_users().await?))
}

/// GET /api/users/:id - single user
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<User>> {
    Ok(Json(state.users.get_user(&id).await?))
}

/// DELETE /api/users/:id - delete a user account
///
/// The account's orders stay; their denormalized user name keeps history
/// readable. The dashboard warns when the order count is non-zero.
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    state.users.delete_user(&id).await?;
    Ok(Json(true))
}
