//! Service layer
//!
//! One service per dashboard area. Every mutating action is a single awaited
//! backend call; catalog mutations are followed by a full re-fetch of the
//! affected collection, order/user mutations update the local copy only
//! after the write succeeds. Last write wins between concurrent staff
//! edits; no locking, no versioning.

pub mod catalog_service;
pub mod order_service;
pub mod stats_service;
pub mod user_service;

pub use catalog_service::CatalogService;
pub use order_service::OrderService;
pub use stats_service::{DashboardStats, PopularItem, StatsService};
pub use user_service::UserService;
