//! Session API Handlers
//!
//! Sign-in itself happens against the identity provider from the dashboard;
//! this service only observes the resulting session and forwards sign-out.

use axum::{
    Extension, Json,
    extract::State,
    http::HeaderMap,
};
use serde::Serialize;

use crate::auth::{StaffSession, extract_bearer};
use crate::core::ServerState;
use shared::{AppError, AppResult};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub uid: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

/// GET /api/auth/session - the signed-in staff member
pub async fn session(Extension(session): Extension<StaffSession>) -> Json<SessionResponse> {
    Json(SessionResponse {
        uid: session.uid,
        email: session.email,
        display_name: session.display_name,
    })
}

/// POST /api/auth/sign-out - end the current session
pub async fn sign_out(
    State(state): State<ServerState>,
    headers: HeaderMap,
) -> AppResult<Json<bool>> {
    let token = headers
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(extract_bearer)
        .ok_or(AppError::Unauthorized)?;

    state.auth.sign_out(token).await?;
    Ok(Json(true))
}
