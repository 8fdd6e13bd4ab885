//! Search, cache and rendering settings.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value as JsonValue;

use crate::error::ConfigError;

pub const DEFAULT_ITEMS_PER_PAGE: usize = 20;

/// Everything a search run needs besides the data itself.
///
/// Decodes from JSON with every key optional:
///
/// ```rust
/// use json_search_core::search_config::SearchConfig;
///
/// let config = SearchConfig::from_json_str(r#"{
///     "search_fields": ["name", "tags"],
///     "items_per_page": "-3",
///     "cache_duration": 60
/// }"#)?;
///
/// assert_eq!(config.search_fields, vec!["name", "tags"]);
/// assert_eq!(config.items_per_page, 20);
/// assert_eq!(config.pagination_class, "pagination");
/// # Ok::<(), json_search_core::error::ConfigError>(())
/// ```
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct SearchConfig {
    /// Fields compared against the search term, in order.
    pub search_fields: Vec<String>,

    /// Always at least 1. Zero, negative and non-numeric input fall back to
    /// [`DEFAULT_ITEMS_PER_PAGE`].
    #[serde(deserialize_with = "deserialize_items_per_page")]
    pub items_per_page: usize,

    /// Snapshot lifetime in seconds; `0` disables caching.
    pub cache_duration: u64,

    /// Where the snapshot lives. Caching stays off while this is `None`.
    pub cache_path: Option<PathBuf>,

    /// Markup with `[field]` placeholders, rendered once per record.
    pub template: String,

    pub no_results_message: String,
    pub pagination_class: String,
    pub hide_if_single_page: bool,
    pub search_button_label: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            search_fields: Vec::new(),
            items_per_page: DEFAULT_ITEMS_PER_PAGE,
            cache_duration: 0,
            cache_path: None,
            template: String::new(),
            no_results_message: "No results found.".to_string(),
            pagination_class: "pagination".to_string(),
            hide_if_single_page: false,
            search_button_label: "Search".to_string(),
        }
    }
}

impl SearchConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_duration)
    }
}

/// Coerces an arbitrary JSON value into a page size.
///
/// Numbers and numeric strings are truncated toward zero; anything that ends
/// up below 1 becomes [`DEFAULT_ITEMS_PER_PAGE`].
pub fn coerce_items_per_page(value: &JsonValue) -> usize {
    let number = match value {
        JsonValue::Number(n) => n.as_f64(),
        JsonValue::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    match number.map(f64::trunc) {
        Some(n) if n.is_finite() && n >= 1.0 => n.min(usize::MAX as f64) as usize,
        _ => DEFAULT_ITEMS_PER_PAGE,
    }
}

fn deserialize_items_per_page<'de, D>(deserializer: D) -> Result<usize, D::Error>
where
    D: Deserializer<'de>,
{
    let value = JsonValue::deserialize(deserializer)?;
    Ok(coerce_items_per_page(&value))
}
