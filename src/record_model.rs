//! Data model definitions for searchable records.
//!
//! This module defines the structures that flow through the search pipeline.
//! The primary model is [`Record`], a loosely-shaped JSON object whose fields
//! are looked up optionally, and [`PageResult`], one page sliced out of a
//! filtered collection.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

/// One entry of the source collection.
///
/// A `Record` keeps the field order of the source document and makes no
/// assumptions about its shape: every lookup goes through [`Record::field`],
/// which treats a missing field and an unusable value the same way.
///
/// # Field values
///
/// - **Scalars**: strings, numbers and booleans
/// - **Sequences**: arrays whose scalar elements are kept in order
/// - **Absent**: missing keys, `null` and nested objects
///
/// # Examples
///
/// ```rust
/// use json_search_core::record_model::{FieldValue, Record};
/// use serde_json::json;
///
/// let record: Record = serde_json::from_value(json!({
///     "name": "Lamp",
///     "price": 12.5,
///     "tags": ["red", "desk"],
/// }))?;
///
/// assert_eq!(record.field("name"), Some(FieldValue::Scalar("Lamp".into())));
/// assert_eq!(record.field("price").map(|v| v.to_text().into_owned()), Some("12.5".to_string()));
/// assert_eq!(record.field("tags").map(|v| v.to_text().into_owned()), Some("red, desk".to_string()));
/// assert_eq!(record.field("missing"), None);
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq)]
#[serde(transparent)]
pub struct Record(Map<String, JsonValue>);

/// The decoded source document: records in source order.
pub type Collection = Vec<Record>;

/// A usable field value, borrowed from the record where possible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue<'a> {
    Scalar(Cow<'a, str>),
    Sequence(Vec<Cow<'a, str>>),
}

impl Record {
    /// Looks up a field, returning `None` when it is missing or holds
    /// `null` or a nested object.
    pub fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match self.0.get(name)? {
            JsonValue::Array(items) => Some(FieldValue::Sequence(
                items.iter().filter_map(scalar_text).collect(),
            )),
            other => scalar_text(other).map(FieldValue::Scalar),
        }
    }
}

impl<'a> FieldValue<'a> {
    /// Flattens the value into display text; sequences are joined with `", "`.
    pub fn to_text(&self) -> Cow<'_, str> {
        match self {
            FieldValue::Scalar(text) => Cow::Borrowed(text.as_ref()),
            FieldValue::Sequence(items) => Cow::Owned(items.join(", ")),
        }
    }
}

fn scalar_text(value: &JsonValue) -> Option<Cow<'_, str>> {
    match value {
        JsonValue::String(text) => Some(Cow::Borrowed(text.as_str())),
        JsonValue::Number(number) => Some(Cow::Owned(number.to_string())),
        JsonValue::Bool(flag) => Some(Cow::Owned(flag.to_string())),
        JsonValue::Null | JsonValue::Array(_) | JsonValue::Object(_) => None,
    }
}

/// One page of a filtered collection.
///
/// `total_pages` is computed over the filtered items, not the raw
/// collection. A `total_pages` of `0` means there were no matches at all;
/// callers should show their "no results" output rather than an empty page.
///
/// # Examples
///
/// ```rust
/// use json_search_core::paginator::paginate;
///
/// let letters = ["a", "b", "c", "d", "e"];
/// let page = paginate(&letters, "2", 2);
///
/// assert_eq!(page.items, vec!["c", "d"]);
/// assert_eq!(page.page, 2);
/// assert_eq!(page.total_pages, 3);
/// ```
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct PageResult<T> {
    /// At most `items_per_page` entries, in filtered order.
    pub items: Vec<T>,

    /// The 1-based page that was requested, after sanitization.
    pub page: u64,

    /// Number of pages the filtered collection spans.
    pub total_pages: usize,
}

impl<T> PageResult<T> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
