//! API routing
//!
//! # Structure
//!
//! - [`health`] - liveness probe (public)
//! - [`auth`] - session endpoints
//! - [`menu_items`] - menu item management
//! - [`categories`] - category management
//! - [`orders`] - order review and status transitions
//! - [`users`] - customer account administration
//! - [`stats`] - dashboard counters
//! - [`upload`] - image upload

pub mod auth;
pub mod categories;
pub mod health;
pub mod menu_items;
pub mod orders;
pub mod stats;
pub mod upload;
pub mod users;

mod middleware;

use axum::Router;
use axum::middleware as axum_middleware;
use http::{HeaderName, HeaderValue};
use tower_http::cors::CorsLayer;
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::core::ServerState;

/// Custom request ID generator
#[derive(Clone)]
struct XRequestId;

impl MakeRequestId for XRequestId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string();
        Some(RequestId::new(HeaderValue::from_str(&id).unwrap()))
    }
}

/// Build a router with all routes registered (no middleware, no state)
pub fn build_router() -> Router<ServerState> {
    Router::new()
        // Health - public route
        .merge(health::router())
        // Session endpoints
        .merge(auth::router())
        // Dashboard resources - session required
        .merge(menu_items::router())
        .merge(categories::router())
        .merge(orders::router())
        .merge(users::router())
        .merge(stats::router())
        .merge(upload::router())
}

/// Build the fully configured application with middleware and state
pub fn build_app(state: &ServerState) -> Router {
    build_router()
        // CORS - the dashboard is served from its own origin
        .layer(CorsLayer::permissive())
        // Request logging - outermost, executed first
        .layer(axum_middleware::from_fn(middleware::logging_middleware))
        // Trace - request tracing (logs at INFO level)
        .layer(TraceLayer::new_for_http())
        // Request ID - generate and propagate a unique id per request
        .layer(SetRequestIdLayer::new(
            HeaderName::from_static("x-request-id"),
            XRequestId,
        ))
        .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
            "x-request-id",
        )))
        // Session check - injects StaffSession before routes run
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            crate::auth::require_auth,
        ))
        .with_state(state.clone())
}
