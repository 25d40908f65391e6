//! End-to-end dashboard flows against the in-memory backend
//!
//! Services are wired straight to a shared [`MemoryBackend`], the same way
//! `ServerState::with_backend` wires them in local development.

use std::sync::Arc;

use admin_server::AppError;
use admin_server::backend::{DocumentStore, MemoryBackend, collections};
use admin_server::services::{CatalogService, OrderService, StatsService, UserService};
use rust_decimal::Decimal;
use serde_json::json;
use shared::LocaleText;
use shared::models::{CategoryCreate, MenuItemCreate, OrderStatus};

fn backend() -> Arc<MemoryBackend> {
    Arc::new(MemoryBackend::new())
}

async fn seed_order(docs: &MemoryBackend, user_id: &str, status: &str, created_at: &str) -> String {
    let doc = docs
        .add(
            collections::ORDERS,
            json!({
                "userId": user_id,
                "userName": "Khamla",
                "items": [
                    {"id": "m1", "name": "Laap", "price": 6.5, "quantity": 2},
                    {"id": "m2", "name": "Sticky rice", "price": 1.5, "quantity": 2},
                ],
                "total": 16.0,
                "status": status,
                "address": "Rue Setthathirath, Vientiane",
                "phone": "+856 20 5555 1234",
                "createdAt": created_at,
            }),
        )
        .await
        .unwrap();
    doc.id
}

async fn seed_user(docs: &MemoryBackend, name: &str, email: &str) -> String {
    let doc = docs
        .add(
            collections::USERS,
            json!({
                "name": name,
                "email": email,
                "phone": "+856 20 5555 0000",
                "address": "Vientiane",
                "createdAt": "2025-04-01T08:00:00Z",
            }),
        )
        .await
        .unwrap();
    doc.id
}

fn item_create(name: &str, category: &str) -> MenuItemCreate {
    MenuItemCreate {
        name: LocaleText::new(name),
        description: LocaleText::new("House specialty"),
        price: Decimal::new(650, 2),
        category: category.to_string(),
        image_url: None,
        is_available: None,
    }
}

// ── Catalog ─────────────────────────────────────────────────────────

#[tokio::test]
async fn category_creation_derives_slug_and_assigns_sequence() {
    let backend = backend();
    let catalog = CatalogService::new(backend.clone());

    let categories = catalog
        .create_category(CategoryCreate {
            name: LocaleText::new("Iced Drinks"),
            slug: None,
        })
        .await
        .unwrap();
    assert_eq!(categories.len(), 1);
    assert_eq!(categories[0].slug, "iced-drinks");
    assert_eq!(categories[0].sequence, 1);

    let categories = catalog
        .create_category(CategoryCreate {
            name: LocaleText::new("Mains"),
            slug: None,
        })
        .await
        .unwrap();
    assert_eq!(categories.len(), 2);
    // Listing is sequence ascending
    assert_eq!(categories[1].slug, "mains");
    assert_eq!(categories[1].sequence, 2);
}

#[tokio::test]
async fn duplicate_slugs_are_refused() {
    let backend = backend();
    let catalog = CatalogService::new(backend.clone());

    catalog
        .create_category(CategoryCreate {
            name: LocaleText::new("Drinks"),
            slug: None,
        })
        .await
        .unwrap();

    let err = catalog
        .create_category(CategoryCreate {
            name: LocaleText::new("More Drinks"),
            slug: Some("drinks".into()),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)), "got {err:?}");
}

#[tokio::test]
async fn referenced_category_survives_deletion_attempts() {
    let backend = backend();
    let catalog = CatalogService::new(backend.clone());

    let categories = catalog
        .create_category(CategoryCreate {
            name: LocaleText::new("Drinks"),
            slug: None,
        })
        .await
        .unwrap();
    let category_id = categories[0].id.clone();

    let items = catalog
        .create_item(item_create("Lao iced coffee", "drinks"))
        .await
        .unwrap();
    let item_id = items[0].id.clone();

    // Refused with the blocking count while the item references the slug
    let err = catalog.delete_category(&category_id).await.unwrap_err();
    assert!(
        matches!(err, AppError::CategoryInUse { count: 1, .. }),
        "got {err:?}"
    );
    assert_eq!(catalog.list_categories().await.unwrap().len(), 1);

    // Once the item is gone the deletion goes through
    catalog.delete_item(&item_id).await.unwrap();
    let categories = catalog.delete_category(&category_id).await.unwrap();
    assert!(categories.is_empty());
    assert!(catalog.list_categories().await.unwrap().is_empty());
}

#[tokio::test]
async fn menu_items_require_an_existing_category() {
    let backend = backend();
    let catalog = CatalogService::new(backend.clone());

    let err = catalog
        .create_item(item_create("Orphan dish", "no-such-category"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)), "got {err:?}");

    catalog
        .create_category(CategoryCreate {
            name: LocaleText::new("Mains"),
            slug: None,
        })
        .await
        .unwrap();
    let items = catalog
        .create_item(item_create("Laap", "mains"))
        .await
        .unwrap();
    assert_eq!(items.len(), 1);
    assert!(items[0].is_available);
}

// ── Orders ──────────────────────────────────────────────────────────

#[tokio::test]
async fn order_moves_through_its_lifecycle_once() {
    let backend = backend();
    let orders = OrderService::new(backend.clone());
    let id = seed_order(&backend, "u1", "pending", "2025-05-01T10:00:00Z").await;

    let order = orders.transition(&id, OrderStatus::Processing).await.unwrap();
    assert_eq!(order.status, OrderStatus::Processing);

    let order = orders.transition(&id, OrderStatus::Completed).await.unwrap();
    assert_eq!(order.status, OrderStatus::Completed);

    // Terminal: nothing further is accepted
    let err = orders
        .transition(&id, OrderStatus::Cancelled)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)), "got {err:?}");

    // The stored document was not touched by the refused transition
    let stored = backend
        .get(collections::ORDERS, &id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.data["status"], "completed");
}

#[tokio::test]
async fn refused_transition_writes_nothing() {
    let backend = backend();
    let orders = OrderService::new(backend.clone());
    let id = seed_order(&backend, "u1", "cancelled", "2025-05-01T10:00:00Z").await;

    let err = orders
        .transition(&id, OrderStatus::Processing)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)), "got {err:?}");

    let stored = backend
        .get(collections::ORDERS, &id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.data["status"], "cancelled");
}

#[tokio::test]
async fn order_listing_filters_by_status_newest_first() {
    let backend = backend();
    let orders = OrderService::new(backend.clone());

    seed_order(&backend, "u1", "pending", "2025-05-01T10:00:00Z").await;
    seed_order(&backend, "u2", "completed", "2025-05-02T10:00:00Z").await;
    seed_order(&backend, "u1", "pending", "2025-05-03T10:00:00Z").await;

    let all = orders.list_orders(None).await.unwrap();
    assert_eq!(all.len(), 3);
    assert!(all[0].created_at > all[1].created_at);
    assert!(all[1].created_at > all[2].created_at);

    let pending = orders.list_orders(Some(OrderStatus::Pending)).await.unwrap();
    assert_eq!(pending.len(), 2);
    assert!(pending.iter().all(|o| o.status == OrderStatus::Pending));
}

// ── Users ───────────────────────────────────────────────────────────

#[tokio::test]
async fn user_order_counts_are_derived_at_read_time() {
    let backend = backend();
    let users = UserService::new(backend.clone());

    let khamla = seed_user(&backend, "Khamla", "khamla@example.com").await;
    let noy = seed_user(&backend, "Noy", "noy@example.com").await;
    seed_order(&backend, &khamla, "pending", "2025-05-01T10:00:00Z").await;
    seed_order(&backend, &khamla, "completed", "2025-05-02T10:00:00Z").await;

    let listed = users.list_users().await.unwrap();
    assert_eq!(listed.len(), 2);
    let by_id = |id: &str| listed.iter().find(|u| u.id == id).unwrap();
    assert_eq!(by_id(&khamla).order_count, 2);
    assert_eq!(by_id(&noy).order_count, 0);

    // The count never lives in the stored document
    let stored = backend
        .get(collections::USERS, &khamla)
        .await
        .unwrap()
        .unwrap();
    assert!(stored.data.get("orderCount").is_none());
}

#[tokio::test]
async fn deleted_users_disappear_but_their_orders_stay() {
    let backend = backend();
    let users = UserService::new(backend.clone());

    let id = seed_user(&backend, "Khamla", "khamla@example.com").await;
    seed_order(&backend, &id, "completed", "2025-05-01T10:00:00Z").await;

    users.delete_user(&id).await.unwrap();
    assert!(users.list_users().await.unwrap().is_empty());
    assert_eq!(backend.list(collections::ORDERS).await.unwrap().len(), 1);

    let err = users.delete_user(&id).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)), "got {err:?}");
}

// ── Stats ───────────────────────────────────────────────────────────

#[tokio::test]
async fn dashboard_counters_reflect_the_collections() {
    let backend = backend();
    let catalog = CatalogService::new(backend.clone());
    let stats = StatsService::new(backend.clone());

    catalog
        .create_category(CategoryCreate {
            name: LocaleText::new("Mains"),
            slug: None,
        })
        .await
        .unwrap();
    catalog.create_item(item_create("Laap", "mains")).await.unwrap();

    seed_user(&backend, "Khamla", "khamla@example.com").await;
    for day in 1..=7 {
        let status = if day % 2 == 0 { "completed" } else { "pending" };
        seed_order(&backend, "u1", status, &format!("2025-05-0{day}T10:00:00Z")).await;
    }

    let dashboard = stats.dashboard().await.unwrap();
    assert_eq!(dashboard.users, 1);
    assert_eq!(dashboard.menu_items, 1);
    assert_eq!(dashboard.orders, 7);
    assert_eq!(dashboard.pending_orders, 4);

    // Recent panel is capped and newest first
    assert_eq!(dashboard.recent_orders.len(), 5);
    assert_eq!(
        dashboard.recent_orders[0].created_at.to_rfc3339(),
        "2025-05-07T10:00:00+00:00"
    );

    // Every seeded order carries the same two lines
    assert_eq!(dashboard.popular_items.len(), 2);
    assert_eq!(dashboard.popular_items[0].quantity, 14);
}
