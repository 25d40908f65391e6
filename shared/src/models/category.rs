//! Category Model

use crate::locale::LocaleText;
use serde::{Deserialize, Serialize};

/// Category entity
///
/// Menu items reference a category by `slug`, never by document id. The slug
/// is unique across all categories.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub name: LocaleText,
    pub slug: String,
    /// Display order; assigned max+1 on creation, freely editable afterwards
    #[serde(default)]
    pub sequence: i32,
}

/// Create category payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryCreate {
    pub name: LocaleText,
    /// Derived from the English name when omitted
    pub slug: Option<String>,
}

/// Update category payload
///
/// Serializes to a merge patch: absent fields are left untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<LocaleText>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sequence: Option<i32>,
}
