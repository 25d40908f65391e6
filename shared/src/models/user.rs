//! User Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Customer account
///
/// Read-only from the admin's perspective except for deletion. `order_count`
/// is derived at read time by counting orders whose `userId` matches; it is
/// never stored in the document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub order_count: usize,
}
