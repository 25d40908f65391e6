//! Order Service - order review and status transitions
//!
//! Orders are written by the customer app; the only field this service ever
//! touches is `status`, and only along the legal lifecycle. The transition
//! write is a single-field merge committed after the UI's explicit
//! confirmation: no inventory adjustment, no notification dispatch.

use crate::backend::{DocumentStore, FieldFilter, OrderBy, collections};
use crate::lifecycle;
use serde_json::json;
use shared::models::{Order, OrderStatus};
use shared::{AppError, AppResult};
use std::sync::Arc;

#[derive(Clone)]
pub struct OrderService {
    documents: Arc<dyn DocumentStore>,
}

impl OrderService {
    pub fn new(documents: Arc<dyn DocumentStore>) -> Self {
        Self { documents }
    }

    /// Orders, newest first, optionally filtered by status
    pub async fn list_orders(&self, status: Option<OrderStatus>) -> AppResult<Vec<Order>> {
        let filter = status.map(|s| FieldFilter::eq("status", s.as_str()));
        let docs = self
            .documents
            .query(collections::ORDERS, filter, Some(OrderBy::desc("createdAt")))
            .await?;
        docs.into_iter()
            .map(|doc| doc.decode::<Order>().map_err(AppError::from))
            .collect()
    }

    pub async fn get_order(&self, id: &str) -> AppResult<Order> {
        let doc = self
            .documents
            .get(collections::ORDERS, id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Order {id} not found")))?;
        Ok(doc.decode()?)
    }

    /// Move an order to `target`, returning the updated copy
    ///
    /// Illegal transitions (including from terminal states) are refused
    /// before any backend call. The local copy changes only after the write
    /// succeeds, so a failed write leaves nothing to roll back.
    pub async fn transition(&self, id: &str, target: OrderStatus) -> AppResult<Order> {
        let mut order = self.get_order(id).await?;

        if !lifecycle::can_transition(order.status, target) {
            return Err(AppError::validation(format!(
                "Cannot change order status from {} to {}",
                order.status, target
            )));
        }

        self.documents
            .update(collections::ORDERS, id, json!({"status": target}))
            .await?;
        tracing::info!(id = %id, from = %order.status, to = %target, "Order status updated");

        order.status = target;
        Ok(order)
    }
}
