//! Menu Item Model

use crate::locale::LocaleText;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Menu item entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    /// Document id (assigned by the backend, absent inside the stored document)
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub name: LocaleText,
    pub description: LocaleText,
    /// Unit price, non-negative
    pub price: Decimal,
    /// Category reference (slug, not document id)
    pub category: String,
    #[serde(default)]
    pub image_url: Option<String>,
    /// Disabled items stay in the catalog but are hidden from customers
    #[serde(default = "default_true")]
    pub is_available: bool,
}

fn default_true() -> bool {
    true
}

/// Create menu item payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemCreate {
    pub name: LocaleText,
    pub description: LocaleText,
    pub price: Decimal,
    pub category: String,
    pub image_url: Option<String>,
    pub is_available: Option<bool>,
}

/// Update menu item payload
///
/// Serializes to a merge patch: absent fields are left untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<LocaleText>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<LocaleText>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_available: Option<bool>,
}
