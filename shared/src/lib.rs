//! Shared types for the Padaek admin service
//!
//! Common types used by the admin server and its tests: the data model,
//! locale content, and error types.

pub mod error;
pub mod locale;
pub mod models;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use error::{AppError, AppResult};
pub use locale::{Locale, LocaleText};
