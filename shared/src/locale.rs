//! Locale content
//!
//! The product ships in three fixed languages. A [`LocaleText`] carries the
//! parallel text for one logical field (a name or a description); there is no
//! fallback chain beyond "use English when the requested language is empty".

use serde::{Deserialize, Serialize};

/// Display language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Lo,
    Th,
}

impl Locale {
    pub fn as_str(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Lo => "lo",
            Locale::Th => "th",
        }
    }

    /// Parse a locale code; unknown codes fall back to English
    pub fn from_code(code: &str) -> Self {
        match code {
            "lo" => Locale::Lo,
            "th" => Locale::Th,
            _ => Locale::En,
        }
    }
}

/// Parallel text in the three product languages
///
/// Early documents stored these fields as bare strings. Deserialization
/// accepts both shapes: a bare string populates all three languages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LocaleText {
    pub en: String,
    #[serde(default)]
    pub lo: String,
    #[serde(default)]
    pub th: String,
}

impl LocaleText {
    pub fn new(en: impl Into<String>) -> Self {
        Self {
            en: en.into(),
            lo: String::new(),
            th: String::new(),
        }
    }

    /// Text for the requested locale, falling back to English when empty
    pub fn get(&self, locale: Locale) -> &str {
        let text = match locale {
            Locale::En => &self.en,
            Locale::Lo => &self.lo,
            Locale::Th => &self.th,
        };
        if text.is_empty() { &self.en } else { text }
    }

    /// Whether the required English text is missing
    pub fn is_blank(&self) -> bool {
        self.en.trim().is_empty()
    }
}

impl<'de> Deserialize<'de> for LocaleText {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Text {
                en: String,
                #[serde(default)]
                lo: String,
                #[serde(default)]
                th: String,
            },
            // Legacy single-language documents
            Plain(String),
        }

        Ok(match Repr::deserialize(deserializer)? {
            Repr::Text { en, lo, th } => LocaleText { en, lo, th },
            Repr::Plain(s) => LocaleText {
                en: s.clone(),
                lo: s.clone(),
                th: s,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_falls_back_to_english_when_empty() {
        let text = LocaleText::new("Fried rice");
        assert_eq!(text.get(Locale::Lo), "Fried rice");
        assert_eq!(text.get(Locale::En), "Fried rice");
    }

    #[test]
    fn get_prefers_requested_locale() {
        let text = LocaleText {
            en: "Fried rice".into(),
            lo: "ເຂົ້າຜັດ".into(),
            th: "ข้าวผัด".into(),
        };
        assert_eq!(text.get(Locale::Lo), "ເຂົ້າຜັດ");
        assert_eq!(text.get(Locale::Th), "ข้าวผัด");
    }

    #[test]
    fn deserializes_legacy_plain_string() {
        let text: LocaleText = serde_json::from_value(serde_json::json!("Noodles")).unwrap();
        assert_eq!(text.en, "Noodles");
        assert_eq!(text.lo, "Noodles");
        assert_eq!(text.th, "Noodles");
    }

    #[test]
    fn deserializes_multi_language_map() {
        let text: LocaleText =
            serde_json::from_value(serde_json::json!({"en": "Tea", "th": "ชา"})).unwrap();
        assert_eq!(text.en, "Tea");
        assert_eq!(text.lo, "");
        assert_eq!(text.get(Locale::Lo), "Tea");
    }
}
