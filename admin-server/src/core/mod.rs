//! Core module - configuration, state, server

pub mod config;
pub mod server;
pub mod state;

pub use config::{BackendKind, Config};
pub use server::Server;
pub use state::ServerState;
