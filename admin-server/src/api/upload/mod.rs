//! Image Upload API module

mod handler;

use axum::{Router, extract::DefaultBodyLimit, routing::post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/upload", post(handler::upload))
        // Multipart overhead on top of the image size limit
        .layer(DefaultBodyLimit::max(handler::MAX_FILE_SIZE + 64 * 1024))
}
