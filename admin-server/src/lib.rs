//! Padaek Admin Server - back office for the food-ordering app
//!
//! Staff manage a three-language menu, move orders through their lifecycle,
//! and administer customer accounts. All durable state lives in an external
//! managed backend; this service validates, orchestrates, and invokes it.
//!
//! # Module structure
//!
//! ```text
//! admin-server/src/
//! ├── core/       # config, state, server
//! ├── backend/    # gateway traits + memory/firebase implementations
//! ├── catalog/    # catalog integrity rules (pure)
//! ├── lifecycle/  # order status lifecycle (pure)
//! ├── services/   # one service per dashboard area
//! ├── api/        # HTTP routes and handlers
//! ├── auth/       # session middleware
//! └── utils/      # validation, logging
//! ```

pub mod api;
pub mod auth;
pub mod backend;
pub mod catalog;
pub mod core;
pub mod lifecycle;
pub mod services;
pub mod utils;

// Re-export public types
pub use crate::core::{BackendKind, Config, Server, ServerState};
pub use auth::StaffSession;
pub use shared::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};
