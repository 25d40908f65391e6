//! Stats API Handlers

use axum::{Json, extract::State};

use crate::core::ServerState;
use crate::services::DashboardStats;
use shared::AppResult;

/// GET /api/stats - dashboard counters and panels
pub async fn dashboard(State(state): State<ServerState>) -> AppResult<Json<DashboardStats>> {
    Ok(Json(state.stats.dashboard().await?))
}
