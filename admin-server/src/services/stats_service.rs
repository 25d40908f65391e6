//! Stats Service - dashboard landing-page counters
//!
//! Everything here is derived from full collection reads at request time.
//! Nothing is cached or stored; the dashboard is a low-traffic back office.

use crate::backend::{DocumentStore, OrderBy, collections};
use serde::Serialize;
use shared::models::{Order, OrderStatus};
use shared::{AppError, AppResult};
use std::collections::HashMap;
use std::sync::Arc;

/// How many orders the "recent" panel shows
const RECENT_ORDERS: usize = 5;

/// How many items the "popular" panel shows
const POPULAR_ITEMS: usize = 5;

/// Dashboard counters and panels
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub users: usize,
    pub menu_items: usize,
    pub orders: usize,
    pub pending_orders: usize,
    pub recent_orders: Vec<Order>,
    pub popular_items: Vec<PopularItem>,
}

/// A menu item ranked by total ordered quantity
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PopularItem {
    /// Menu item id as stored in the order lines
    pub id: String,
    pub name: String,
    pub quantity: i64,
}

/// Rank items by summed quantity across order lines
///
/// Keys on the denormalized line id/name pair: lines are historical copies,
/// so a renamed menu item counts under the name customers actually ordered.
fn popular_items(orders: &[Order], limit: usize) -> Vec<PopularItem> {
    let mut totals: HashMap<&str, PopularItem> = HashMap::new();
    for order in orders {
        for line in &order.items {
            totals
                .entry(line.id.as_str())
                .and_modify(|entry| entry.quantity += i64::from(line.quantity))
                .or_insert_with(|| PopularItem {
                    id: line.id.clone(),
                    name: line.name.clone(),
                    quantity: i64::from(line.quantity),
                });
        }
    }

    let mut ranked: Vec<PopularItem> = totals.into_values().collect();
    ranked.sort_by(|a, b| b.quantity.cmp(&a.quantity).then_with(|| a.name.cmp(&b.name)));
    ranked.truncate(limit);
    ranked
}

#[derive(Clone)]
pub struct StatsService {
    documents: Arc<dyn DocumentStore>,
}

impl StatsService {
    pub fn new(documents: Arc<dyn DocumentStore>) -> Self {
        Self { documents }
    }

    pub async fn dashboard(&self) -> AppResult<DashboardStats> {
        let users = self.documents.list(collections::USERS).await?.len();
        let menu_items = self.documents.list(collections::MENU_ITEMS).await?.len();

        let orders: Vec<Order> = self
            .documents
            .query(collections::ORDERS, None, Some(OrderBy::desc("createdAt")))
            .await?
            .into_iter()
            .map(|doc| doc.decode::<Order>().map_err(AppError::from))
            .collect::<AppResult<_>>()?;

        let pending_orders = orders
            .iter()
            .filter(|o| o.status == OrderStatus::Pending)
            .count();
        let recent_orders = orders.iter().take(RECENT_ORDERS).cloned().collect();
        let popular = popular_items(&orders, POPULAR_ITEMS);

        Ok(DashboardStats {
            users,
            menu_items,
            orders: orders.len(),
            pending_orders,
            recent_orders,
            popular_items: popular,
        })
    }
}
