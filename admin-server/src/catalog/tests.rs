use super::*;
use rust_decimal::Decimal;
use shared::LocaleText;

fn category(id: &str, slug: &str, sequence: i32) -> Category {
    Category {
        id: id.to_string(),
        name: LocaleText::new(slug),
        slug: slug.to_string(),
        sequence,
    }
}

fn item(category_slug: &str) -> MenuItem {
    MenuItem {
        id: String::new(),
        name: LocaleText::new("Item"),
        description: LocaleText::new("A dish"),
        price: Decimal::new(450, 2),
        category: category_slug.to_string(),
        image_url: None,
        is_available: true,
    }
}

#[test]
fn delete_allowed_only_with_zero_references() {
    let drinks = category("c1", "drinks", 1);

    let check = can_delete_category(&drinks, &[]);
    assert!(check.allowed);
    assert_eq!(check.blocking_count, 0);

    let check = can_delete_category(&drinks, &[item("drinks")]);
    assert!(!check.allowed);
    assert_eq!(check.blocking_count, 1);

    let items = [item("drinks"), item("mains"), item("drinks"), item("drinks")];
    let check = can_delete_category(&drinks, &items);
    assert!(!check.allowed);
    assert_eq!(check.blocking_count, 3);
}

#[test]
fn delete_ignores_items_of_other_categories() {
    let drinks = category("c1", "drinks", 1);
    let check = can_delete_category(&drinks, &[item("mains"), item("desserts")]);
    assert!(check.allowed);
    assert_eq!(check.blocking_count, 0);
}

#[test]
fn slug_uniqueness_without_exclusion() {
    let categories = [category("X", "burgers", 1)];
    assert!(!is_slug_unique("burgers", &categories, None));
    assert!(is_slug_unique("drinks", &categories, None));
}

#[test]
fn slug_uniqueness_excludes_the_edited_category() {
    let categories = [category("X", "burgers", 1)];
    // Keeping its own slug is fine
    assert!(is_slug_unique("burgers", &categories, Some("X")));
    // Taking another category's slug is not
    assert!(!is_slug_unique("burgers", &categories, Some("Y")));
}

#[test]
fn next_sequence_starts_at_one() {
    assert_eq!(next_sequence(&[]), 1);
}

#[test]
fn next_sequence_is_max_plus_one() {
    let categories = [category("a", "a", 1), category("b", "b", 5)];
    assert_eq!(next_sequence(&categories), 6);
}

#[test]
fn derive_slug_normalizes() {
    assert_eq!(derive_slug("Iced Drinks"), "iced-drinks");
    assert_eq!(derive_slug("  Noodle Soup!  "), "noodle-soup");
    assert_eq!(derive_slug("Café & Bakery"), "caf-bakery");
    assert_eq!(derive_slug("---"), "");
    assert_eq!(derive_slug("rice"), "rice");
}
