//! Markup generation for records, pagination controls and the search form.
//!
//! Every value that reaches the output passes through
//! [`sanitize_text`]; there is no way to opt out of escaping.

use std::sync::OnceLock;

use regex::{Captures, Regex};

use crate::record_model::{PageResult, Record};
use crate::sanitizer::sanitize_text;

fn placeholder_pattern() -> &'static Regex {
    static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
    PLACEHOLDER.get_or_init(|| Regex::new(r"\[([^\[\]]+)\]").expect("valid regex"))
}

/// Expands `[field]` placeholders in `template` with values from `record`.
///
/// Substitution is a single pass: text coming out of a field is never
/// scanned for further placeholders. Placeholders naming a field the record
/// does not have are kept verbatim.
///
/// ```rust
/// use json_search_core::record_model::Record;
/// use json_search_core::renderer::render_record;
/// use serde_json::json;
///
/// let record: Record = serde_json::from_value(json!({"name": "<i>x</i>", "tags": ["a", "b"]}))?;
/// assert_eq!(render_record(&record, "[name] - [tags] [other]"), "x - a, b [other]");
/// # Ok::<(), serde_json::Error>(())
/// ```
pub fn render_record(record: &Record, template: &str) -> String {
    placeholder_pattern()
        .replace_all(template, |caps: &Captures<'_>| match record.field(&caps[1]) {
            Some(value) => sanitize_text(&value.to_text()),
            None => caps[0].to_string(),
        })
        .into_owned()
}

/// Renders every record on the page, or `no_results_message` when the page
/// is empty.
pub fn render_results(page: &PageResult<&Record>, template: &str, no_results_message: &str) -> String {
    if page.is_empty() {
        return no_results_message.to_string();
    }

    page.items
        .iter()
        .map(|record| render_record(record, template))
        .collect()
}

/// One `?page=N` link per page.
///
/// Nothing is emitted when `hide_if_single_page` is set and there is at most
/// one page.
pub fn render_pagination(total_pages: usize, css_class: &str, hide_if_single_page: bool) -> String {
    if hide_if_single_page && total_pages <= 1 {
        return String::new();
    }

    let mut out = format!("<ul class='{}'>", sanitize_text(css_class));
    for page in 1..=total_pages {
        out.push_str(&format!(
            "<li class='page-item'><a class='page-link' href='?page={page}'>{page}</a></li>"
        ));
    }
    out.push_str("</ul>");
    out
}

/// A GET form whose `search` box is pre-filled with the sanitized term.
pub fn render_search_form(term: &str, button_label: &str) -> String {
    let mut out = String::from("<form action='' method='GET'>");
    out.push_str(&format!(
        "<input type='text' name='search' value='{}'>",
        sanitize_text(term)
    ));
    out.push_str(&format!(
        "<button type='submit'>{}</button>",
        sanitize_text(button_label)
    ));
    out.push_str("</form>");
    out
}
