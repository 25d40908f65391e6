//! Input validation helpers
//!
//! Centralized text length constants and validation functions. The backend
//! stores whatever it is given, so limits are enforced here, at the form
//! boundary. Validation failures are the inline-form error class: the
//! operation is not attempted.

use rust_decimal::Decimal;
use shared::{AppError, LocaleText};

// ── Text length limits ──────────────────────────────────────────────

/// Entity names (per language)
pub const MAX_NAME_LEN: usize = 200;

/// Menu item descriptions (per language)
pub const MAX_DESCRIPTION_LEN: usize = 1000;

/// Category slugs
pub const MAX_SLUG_LEN: usize = 64;

// ── Validation helpers ──────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(())
}

/// Validate locale text: English is required, every language obeys the limit.
pub fn validate_locale_text(
    value: &LocaleText,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if value.is_blank() {
        return Err(AppError::validation(format!(
            "{field} is required (at least in English)"
        )));
    }
    for (code, text) in [("en", &value.en), ("lo", &value.lo), ("th", &value.th)] {
        if text.len() > max_len {
            return Err(AppError::validation(format!(
                "{field} ({code}) is too long ({} chars, max {max_len})",
                text.len()
            )));
        }
    }
    Ok(())
}

/// Validate that a price is non-negative.
pub fn validate_price(price: Decimal) -> Result<(), AppError> {
    if price < Decimal::ZERO {
        return Err(AppError::validation("price must not be negative"));
    }
    Ok(())
}

/// Validate a slug: lowercase alphanumerics and hyphens only.
pub fn validate_slug(slug: &str) -> Result<(), AppError> {
    validate_required_text(slug, "slug", MAX_SLUG_LEN)?;
    if !slug
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(AppError::validation(
            "slug may only contain lowercase letters, digits and hyphens",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_required_text_is_rejected() {
        assert!(validate_required_text("   ", "name", MAX_NAME_LEN).is_err());
        assert!(validate_required_text("ok", "name", MAX_NAME_LEN).is_ok());
    }

    #[test]
    fn locale_text_requires_english() {
        let missing = LocaleText {
            en: String::new(),
            lo: "ຊາ".into(),
            th: String::new(),
        };
        assert!(validate_locale_text(&missing, "name", MAX_NAME_LEN).is_err());
        assert!(validate_locale_text(&LocaleText::new("Tea"), "name", MAX_NAME_LEN).is_ok());
    }

    #[test]
    fn negative_prices_are_rejected() {
        assert!(validate_price(Decimal::new(-1, 2)).is_err());
        assert!(validate_price(Decimal::ZERO).is_ok());
        assert!(validate_price(Decimal::new(450, 2)).is_ok());
    }

    #[test]
    fn slug_characters_are_restricted() {
        assert!(validate_slug("iced-drinks").is_ok());
        assert!(validate_slug("Iced-Drinks").is_err());
        assert!(validate_slug("drinks!").is_err());
        assert!(validate_slug("").is_err());
    }
}
