//! Catalog integrity rules
//!
//! Pure functions over collections already fetched into memory. Menu items
//! reference a category by slug, and a category may not be deleted while any
//! item still points at it. Slugs are unique across categories; sequences
//! are assigned monotonically on creation and never renumbered.

use shared::models::{Category, MenuItem};

#[cfg(test)]
mod tests;

/// Outcome of a category deletion check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryDeletion {
    pub allowed: bool,
    /// Menu items still referencing the category's slug
    pub blocking_count: usize,
}

/// Whether a category can be deleted, with the count of blocking items
pub fn can_delete_category(category: &Category, menu_items: &[MenuItem]) -> CategoryDeletion {
    let blocking_count = menu_items
        .iter()
        .filter(|item| item.category == category.slug)
        .count();
    CategoryDeletion {
        allowed: blocking_count == 0,
        blocking_count,
    }
}

/// Whether no other category carries the candidate slug
///
/// When editing, the category being edited is excluded via `excluding_id`.
pub fn is_slug_unique(
    candidate: &str,
    categories: &[Category],
    excluding_id: Option<&str>,
) -> bool {
    !categories
        .iter()
        .any(|c| c.slug == candidate && excluding_id != Some(c.id.as_str()))
}

/// Display order for a newly created category: 1 when empty, else max + 1
///
/// Hand-edited collisions are tolerated; listing is a stable ascending sort.
pub fn next_sequence(categories: &[Category]) -> i32 {
    categories
        .iter()
        .map(|c| c.sequence)
        .max()
        .map_or(1, |max| max + 1)
}

/// Derive a slug from the English name
///
/// Lowercase, non-alphanumeric runs collapsed to a single hyphen, leading
/// and trailing hyphens trimmed.
pub fn derive_slug(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_hyphen = false;
    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(ch.to_ascii_lowercase());
        } else {
            pending_hyphen = true;
        }
    }
    slug
}
