//! User Service - customer account inspection and deletion
//!
//! Accounts are read-only here except for deletion. The order count shown
//! next to each user is derived at read time by counting orders; it is never
//! stored, so it cannot go stale.

use crate::backend::{DocumentStore, FieldFilter, collections};
use serde_json::Value;
use shared::models::User;
use shared::{AppError, AppResult};
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Clone)]
pub struct UserService {
    documents: Arc<dyn DocumentStore>,
}

impl UserService {
    pub fn new(documents: Arc<dyn DocumentStore>) -> Self {
        Self { documents }
    }

    /// All users with their derived order counts
    pub async fn list_users(&self) -> AppResult<Vec<User>> {
        let user_docs = self.documents.list(collections::USERS).await?;
        let order_docs = self.documents.list(collections::ORDERS).await?;

        let mut counts: HashMap<String, usize> = HashMap::new();
        for doc in &order_docs {
            if let Some(user_id) = doc.data.get("userId").and_then(Value::as_str) {
                *counts.entry(user_id.to_string()).or_default() += 1;
            }
        }

        let mut users = Vec::with_capacity(user_docs.len());
        for doc in user_docs {
            let mut user: User = doc.decode()?;
            user.order_count = counts.get(&user.id).copied().unwrap_or(0);
            users.push(user);
        }
        Ok(users)
    }

    pub async fn get_user(&self, id: &str) -> AppResult<User> {
        let doc = self
            .documents
            .get(collections::USERS, id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User {id} not found")))?;

        let mut user: User = doc.decode()?;
        user.order_count = self
            .documents
            .query(collections::ORDERS, Some(FieldFilter::eq("userId", id)), None)
            .await?
            .len();
        Ok(user)
    }

    /// Delete a user account
    ///
    /// The user's orders are left in place; their denormalized `userName`
    /// keeps the history readable.
    pub async fn delete_user(&self, id: &str) -> AppResult<()> {
        // Existence check so a stale id surfaces as 404, not a silent no-op
        self.get_user(id).await?;

        self.documents.delete(collections::USERS, id).await?;
        tracing::info!(id = %id, "User deleted");
        Ok(())
    }
}
