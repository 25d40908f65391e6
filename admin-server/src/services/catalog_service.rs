//! Catalog Service - menu item and category management
//!
//! Enforces the catalog integrity rules before touching the backend:
//! referenced categories cannot be deleted, slugs stay unique, sequences are
//! assigned monotonically. All reads pull the full collection; mutations
//! return the re-fetched collection so the caller replaces its state in one
//! step.

use crate::backend::{self, DocumentStore, collections};
use crate::catalog;
use crate::utils::validation::{
    MAX_DESCRIPTION_LEN, MAX_NAME_LEN, MAX_SLUG_LEN, validate_locale_text, validate_price,
    validate_required_text, validate_slug,
};
use shared::models::{
    Category, CategoryCreate, CategoryUpdate, MenuItem, MenuItemCreate, MenuItemUpdate,
};
use shared::{AppError, AppResult};
use std::sync::Arc;

#[derive(Clone)]
pub struct CatalogService {
    documents: Arc<dyn DocumentStore>,
}

impl CatalogService {
    pub fn new(documents: Arc<dyn DocumentStore>) -> Self {
        Self { documents }
    }

    // ── Menu items ──────────────────────────────────────────────────

    pub async fn list_items(&self) -> AppResult<Vec<MenuItem>> {
        let docs = self.documents.list(collections::MENU_ITEMS).await?;
        docs.into_iter()
            .map(|doc| doc.decode::<MenuItem>().map_err(AppError::from))
            .collect()
    }

    pub async fn get_item(&self, id: &str) -> AppResult<MenuItem> {
        let doc = self
            .documents
            .get(collections::MENU_ITEMS, id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Menu item {id} not found")))?;
        Ok(doc.decode()?)
    }

    /// Create a menu item and return the re-fetched collection
    pub async fn create_item(&self, data: MenuItemCreate) -> AppResult<Vec<MenuItem>> {
        validate_locale_text(&data.name, "name", MAX_NAME_LEN)?;
        validate_locale_text(&data.description, "description", MAX_DESCRIPTION_LEN)?;
        validate_price(data.price)?;
        validate_required_text(&data.category, "category", MAX_SLUG_LEN)?;
        self.ensure_category_exists(&data.category).await?;

        let item = MenuItem {
            id: String::new(),
            name: data.name,
            description: data.description,
            price: data.price,
            category: data.category,
            image_url: data.image_url,
            is_available: data.is_available.unwrap_or(true),
        };

        let created = self
            .documents
            .add(collections::MENU_ITEMS, backend::encode(&item)?)
            .await?;
        tracing::info!(id = %created.id, name = %item.name.en, "Menu item created");

        self.list_items().await
    }

    /// Update a menu item and return the re-fetched collection
    pub async fn update_item(&self, id: &str, data: MenuItemUpdate) -> AppResult<Vec<MenuItem>> {
        // Existence check keeps the merge from resurrecting deleted items
        self.get_item(id).await?;

        if let Some(name) = &data.name {
            validate_locale_text(name, "name", MAX_NAME_LEN)?;
        }
        if let Some(description) = &data.description {
            validate_locale_text(description, "description", MAX_DESCRIPTION_LEN)?;
        }
        if let Some(price) = data.price {
            validate_price(price)?;
        }
        if let Some(category) = &data.category {
            validate_required_text(category, "category", MAX_SLUG_LEN)?;
            self.ensure_category_exists(category).await?;
        }

        let patch = serde_json::to_value(&data).map_err(|e| AppError::internal(e.to_string()))?;
        self.documents
            .update(collections::MENU_ITEMS, id, patch)
            .await?;
        tracing::info!(id = %id, "Menu item updated");

        self.list_items().await
    }

    /// Delete a menu item and return the re-fetched collection
    pub async fn delete_item(&self, id: &str) -> AppResult<Vec<MenuItem>> {
        self.documents.delete(collections::MENU_ITEMS, id).await?;
        tracing::info!(id = %id, "Menu item deleted");

        self.list_items().await
    }

    async fn ensure_category_exists(&self, slug: &str) -> AppResult<()> {
        let categories = self.list_categories().await?;
        if !categories.iter().any(|c| c.slug == slug) {
            return Err(AppError::validation(format!("Unknown category '{slug}'")));
        }
        Ok(())
    }

    // ── Categories ──────────────────────────────────────────────────

    /// All categories, stable-sorted by sequence ascending
    pub async fn list_categories(&self) -> AppResult<Vec<Category>> {
        let docs = self.documents.list(collections::CATEGORIES).await?;
        let mut categories: Vec<Category> = docs
            .into_iter()
            .map(|doc| doc.decode::<Category>().map_err(AppError::from))
            .collect::<AppResult<_>>()?;
        categories.sort_by_key(|c| c.sequence);
        Ok(categories)
    }

    /// Create a category and return the re-fetched collection
    ///
    /// The slug is taken as given or derived from the English name; the
    /// sequence is always `max(existing) + 1`.
    pub async fn create_category(&self, data: CategoryCreate) -> AppResult<Vec<Category>> {
        validate_locale_text(&data.name, "name", MAX_NAME_LEN)?;

        let slug = match data.slug {
            Some(s) if !s.trim().is_empty() => s.trim().to_string(),
            _ => catalog::derive_slug(&data.name.en),
        };
        validate_slug(&slug)?;

        let categories = self.list_categories().await?;
        if !catalog::is_slug_unique(&slug, &categories, None) {
            return Err(AppError::conflict(format!(
                "A category with slug '{slug}' already exists"
            )));
        }

        let category = Category {
            id: String::new(),
            name: data.name,
            slug,
            sequence: catalog::next_sequence(&categories),
        };

        let created = self
            .documents
            .add(collections::CATEGORIES, backend::encode(&category)?)
            .await?;
        tracing::info!(id = %created.id, slug = %category.slug, "Category created");

        self.list_categories().await
    }

    /// Update a category and return the re-fetched collection
    pub async fn update_category(&self, id: &str, data: CategoryUpdate) -> AppResult<Vec<Category>> {
        let categories = self.list_categories().await?;
        if !categories.iter().any(|c| c.id == id) {
            return Err(AppError::not_found(format!("Category {id} not found")));
        }

        if let Some(name) = &data.name {
            validate_locale_text(name, "name", MAX_NAME_LEN)?;
        }
        if let Some(slug) = &data.slug {
            validate_slug(slug)?;
            if !catalog::is_slug_unique(slug, &categories, Some(id)) {
                return Err(AppError::conflict(format!(
                    "A category with slug '{slug}' already exists"
                )));
            }
        }

        let patch = serde_json::to_value(&data).map_err(|e| AppError::internal(e.to_string()))?;
        self.documents
            .update(collections::CATEGORIES, id, patch)
            .await?;
        tracing::info!(id = %id, "Category updated");

        self.list_categories().await
    }

    /// Delete a category and return the re-fetched collection
    ///
    /// Refused while any menu item references the category's slug; the
    /// refusal carries the blocking count for display. Sequences are not
    /// renumbered; gaps are accepted.
    pub async fn delete_category(&self, id: &str) -> AppResult<Vec<Category>> {
        let categories = self.list_categories().await?;
        let category = categories
            .iter()
            .find(|c| c.id == id)
            .ok_or_else(|| AppError::not_found(format!("Category {id} not found")))?;

        let items = self.list_items().await?;
        let check = catalog::can_delete_category(category, &items);
        if !check.allowed {
            return Err(AppError::CategoryInUse {
                slug: category.slug.clone(),
                count: check.blocking_count,
            });
        }

        self.documents.delete(collections::CATEGORIES, id).await?;
        tracing::info!(id = %id, slug = %category.slug, "Category deleted");

        self.list_categories().await
    }
}
