//! Category → style registry for tagged segments.
//!
//! Categories are an open set. Known categories map to a style entry and
//! everything else falls back to `default`.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Style key used for categories with no registered style.
pub const DEFAULT_STYLE_KEY: &str = "default";

/// Category that backends use for name guesses; rendered and filtered as `person`.
pub const POSSIBLE_NAMES_CATEGORY: &str = "possible_names";

/// Canonical category for person names.
pub const PERSON_CATEGORY: &str = "person";

/// Resolve category aliases used for styling and filtering.
pub fn canonical_category(category: &str) -> &str {
    if category == POSSIBLE_NAMES_CATEGORY {
        PERSON_CATEGORY
    } else {
        category
    }
}

/// Highlight colors for one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryStyle {
    pub light: String,
    pub dark: String,
}

impl CategoryStyle {
    pub fn new(light: impl Into<String>, dark: impl Into<String>) -> Self {
        Self {
            light: light.into(),
            dark: dark.into(),
        }
    }

    pub fn color(&self, dark_mode: bool) -> &str {
        if dark_mode {
            &self.dark
        } else {
            &self.light
        }
    }
}

/// Registry of category styles with a `default` fallback.
#[derive(Debug, Clone)]
pub struct CategoryStyles {
    styles: HashMap<String, CategoryStyle>,
    fallback: CategoryStyle,
}

impl CategoryStyles {
    /// Registry seeded with the standard palette.
    pub fn new() -> Self {
        let palette = [
            (PERSON_CATEGORY, "rgba(79, 70, 229, 0.2)", "rgba(129, 140, 248, 0.3)"),
            ("organization", "rgba(245, 158, 11, 0.2)", "rgba(251, 191, 36, 0.3)"),
            ("location", "rgba(16, 185, 129, 0.2)", "rgba(52, 211, 153, 0.3)"),
            ("date", "rgba(236, 72, 153, 0.2)", "rgba(244, 114, 182, 0.3)"),
            ("email", "rgba(6, 182, 212, 0.2)", "rgba(34, 211, 238, 0.3)"),
            ("phone", "rgba(168, 85, 247, 0.2)", "rgba(196, 181, 253, 0.3)"),
            ("url", "rgba(239, 68, 68, 0.2)", "rgba(248, 113, 113, 0.3)"),
            ("money", "rgba(5, 150, 105, 0.2)", "rgba(16, 185, 129, 0.3)"),
        ];

        let styles = palette
            .into_iter()
            .map(|(key, light, dark)| (key.to_string(), CategoryStyle::new(light, dark)))
            .collect();

        Self {
            styles,
            fallback: CategoryStyle::new("rgba(107, 114, 128, 0.2)", "rgba(156, 163, 175, 0.3)"),
        }
    }

    /// Add or replace the style for a category.
    pub fn with_style(mut self, category: &str, style: CategoryStyle) -> Self {
        self.insert(category, style);
        self
    }

    /// Registering `default` replaces the fallback style.
    pub fn insert(&mut self, category: &str, style: CategoryStyle) {
        let key = category.to_lowercase();
        if key == DEFAULT_STYLE_KEY {
            self.fallback = style;
        } else {
            self.styles.insert(key, style);
        }
    }

    /// Style key for a category: the lowercased category when registered,
    /// otherwise `default`. Aliases are resolved first.
    pub fn style_key(&self, category: &str) -> String {
        let key = canonical_category(category).to_lowercase();
        if self.styles.contains_key(&key) {
            key
        } else {
            DEFAULT_STYLE_KEY.to_string()
        }
    }

    pub fn style(&self, category: &str) -> &CategoryStyle {
        let key = canonical_category(category).to_lowercase();
        self.styles.get(&key).unwrap_or(&self.fallback)
    }

    pub fn fallback(&self) -> &CategoryStyle {
        &self.fallback
    }

    pub fn is_known(&self, category: &str) -> bool {
        self.styles
            .contains_key(&canonical_category(category).to_lowercase())
    }

    /// Registered category keys, sorted. The fallback is not included.
    pub fn categories(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.styles.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }
}

impl Default for CategoryStyles {
    fn default() -> Self {
        Self::new()
    }
}

/// Display label for a category: first letter uppercased.
pub fn category_label(category: &str) -> String {
    let mut chars = canonical_category(category).chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_categories() {
        let styles = CategoryStyles::new();
        assert_eq!(styles.style_key("person"), "person");
        assert_eq!(styles.style_key("money"), "money");
        assert!(styles.is_known("url"));
    }

    #[test]
    fn test_unknown_category_falls_back() {
        let styles = CategoryStyles::new();
        assert_eq!(styles.style_key("technology"), DEFAULT_STYLE_KEY);
        assert_eq!(styles.style("technology"), styles.fallback());
        assert!(!styles.is_known("technology"));
        assert_eq!(styles.style_key(DEFAULT_STYLE_KEY), DEFAULT_STYLE_KEY);
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let styles = CategoryStyles::new();
        assert_eq!(styles.style_key("PERSON"), "person");
        assert_eq!(styles.style_key("Organization"), "organization");
    }

    #[test]
    fn test_possible_names_alias() {
        let styles = CategoryStyles::new();
        assert_eq!(canonical_category("possible_names"), "person");
        assert_eq!(styles.style_key("possible_names"), "person");
        assert_eq!(category_label("possible_names"), "Person");
    }

    #[test]
    fn test_extension() {
        let styles = CategoryStyles::new()
            .with_style("Technology", CategoryStyle::new("#eee", "#111"));
        assert_eq!(styles.style_key("technology"), "technology");
        assert_eq!(styles.style("TECHNOLOGY").color(true), "#111");
        assert_eq!(styles.style("technology").color(false), "#eee");
    }

    #[test]
    fn test_override_fallback() {
        let styles = CategoryStyles::new().with_style("default", CategoryStyle::new("#ccc", "#333"));
        assert_eq!(styles.style("anything").color(false), "#ccc");
        assert!(!styles.categories().contains(&DEFAULT_STYLE_KEY));
    }

    #[test]
    fn test_labels() {
        assert_eq!(category_label("organization"), "Organization");
        assert_eq!(category_label(""), "");
        assert_eq!(category_label("élan"), "Élan");
    }
}
