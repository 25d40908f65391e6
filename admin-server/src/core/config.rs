//! Server configuration
//!
//! # Environment variables
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | HTTP_PORT | 8090 | bind port |
//! | BACKEND | memory | `memory` or `firebase` |
//! | FIREBASE_PROJECT_ID | - | required for the firebase backend |
//! | FIREBASE_API_KEY | - | required for the firebase backend |
//! | FIREBASE_STORAGE_BUCKET | {project}.appspot.com | blob bucket |
//! | LOG_LEVEL | info | tracing level |
//! | LOG_DIR | unset | daily-rolling file logs when set |
//! | ENVIRONMENT | development | diagnostics only |

/// Which backend family the gateways talk to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    /// In-process store for tests and local development
    Memory,
    /// The managed provider
    Firebase,
}

impl BackendKind {
    fn from_env_value(value: &str) -> Self {
        match value {
            "firebase" => BackendKind::Firebase,
            _ => BackendKind::Memory,
        }
    }
}

/// Admin server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP API port
    pub http_port: u16,
    pub backend: BackendKind,
    pub firebase_project_id: Option<String>,
    pub firebase_api_key: Option<String>,
    pub firebase_storage_bucket: Option<String>,
    pub log_level: String,
    /// When set, logs also go to daily-rolling files in this directory
    pub log_dir: Option<String>,
    /// development | staging | production
    pub environment: String,
}

impl Config {
    /// Load configuration from environment variables, with defaults
    pub fn from_env() -> Self {
        Self {
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8090),
            backend: BackendKind::from_env_value(
                &std::env::var("BACKEND").unwrap_or_else(|_| "memory".into()),
            ),
            firebase_project_id: std::env::var("FIREBASE_PROJECT_ID").ok(),
            firebase_api_key: std::env::var("FIREBASE_API_KEY").ok(),
            firebase_storage_bucket: std::env::var("FIREBASE_STORAGE_BUCKET").ok(),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok(),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
        }
    }

    /// Bucket name, defaulting to the project's default bucket
    pub fn storage_bucket(&self) -> Option<String> {
        self.firebase_storage_bucket.clone().or_else(|| {
            self.firebase_project_id
                .as_ref()
                .map(|project| format!("{project}.appspot.com"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_bucket_defaults_from_project() {
        let mut config = Config {
            http_port: 8090,
            backend: BackendKind::Firebase,
            firebase_project_id: Some("padaek-prod".into()),
            firebase_api_key: Some("key".into()),
            firebase_storage_bucket: None,
            log_level: "info".into(),
            log_dir: None,
            environment: "test".into(),
        };
        assert_eq!(config.storage_bucket().as_deref(), Some("padaek-prod.appspot.com"));

        config.firebase_storage_bucket = Some("custom-bucket".into());
        assert_eq!(config.storage_bucket().as_deref(), Some("custom-bucket"));
    }
}
