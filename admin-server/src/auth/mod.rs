//! Authentication Middleware
//!
//! Every `/api/*` request carries a bearer session token minted by the
//! identity provider. The middleware resolves it through the
//! [`AuthGateway`](crate::backend::AuthGateway) and injects the
//! [`StaffSession`] into request extensions; handlers that care read it via
//! `Extension<StaffSession>`.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::core::ServerState;
use shared::AppError;

pub use crate::backend::StaffSession;

/// Require a verified session for API routes
pub async fn require_auth(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    // Allow OPTIONS requests for CORS preflight (skip auth)
    if req.method() == http::Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    // Non-API routes (health) stay public
    if !req.uri().path().starts_with("/api/") {
        return Ok(next.run(req).await);
    }

    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let token = match auth_header.and_then(extract_bearer) {
        Some(token) => token.to_string(),
        None => {
            tracing::warn!(uri = %req.uri(), "Request without bearer token");
            return Err(AppError::Unauthorized);
        }
    };

    match state.auth.verify_session(&token).await {
        Ok(Some(session)) => {
            tracing::debug!(uid = %session.uid, "Session verified");
            req.extensions_mut().insert(session);
            Ok(next.run(req).await)
        }
        Ok(None) => {
            tracing::warn!(uri = %req.uri(), "Stale or invalid session token");
            Err(AppError::InvalidToken)
        }
        Err(e) => Err(e.into()),
    }
}

/// Extract the token from an Authorization header value
pub fn extract_bearer(header: &str) -> Option<&str> {
    header.strip_prefix("Bearer ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bearer_extraction() {
        assert_eq!(extract_bearer("Bearer abc123"), Some("abc123"));
        assert_eq!(extract_bearer("Basic abc123"), None);
        assert_eq!(extract_bearer(""), None);
    }
}
