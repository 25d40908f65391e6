//! Order API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};

use crate::core::ServerState;
use crate::lifecycle;
use shared::AppResult;
use shared::models::{Order, OrderStatus};

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// Status tab; omitted means all orders
    pub status: Option<OrderStatus>,
}

/// Order plus the transitions the UI may offer for it
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDetail {
    #[serde(flatten)]
    pub order: Order,
    pub available_transitions: Vec<OrderStatus>,
}

impl From<Order> for OrderDetail {
    fn from(order: Order) -> Self {
        let available_transitions = lifecycle::available_transitions(order.status).to_vec();
        Self {
            order,
            available_transitions,
        }
    }
}

/// GET /api/orders?status= - orders, newest first
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<Order>>> {
    Ok(Json(state.orders.list_orders(query.status).await?))
}

/// GET /api/orders/:id - order detail with offered transitions
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<OrderDetail>> {
    Ok(Json(state.orders.get_order(&id).await?.into()))
}

#[derive(Debug, Deserialize)]
pub struct StatusUpdate {
    pub status: OrderStatus,
}

/// PUT /api/orders/:id/status - confirmed status transition
///
/// The dashboard asks for confirmation before calling this; the server only
/// checks legality and writes the single field.
pub async fn update_status(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<StatusUpdate>,
) -> AppResult<Json<OrderDetail>> {
    Ok(Json(state.orders.transition(&id, payload.status).await?.into()))
}
