//! Input normalization applied before any value is compared or rendered.
//!
//! Both functions strip markup tags, trim surrounding whitespace and escape
//! the characters that carry meaning in markup. Character entities that are
//! already well formed (`&amp;`, `&#39;`, `&#x27;`) are left alone, so
//! running [`sanitize_text`] over its own output changes nothing.
//!
//! Search comparisons use [`comparison_text`] on both sides instead, so that
//! a term is matched against the characters a value really holds and never
//! against the entity spelling of them.

use std::sync::OnceLock;

use regex::Regex;

fn tag_pattern() -> &'static Regex {
    static TAG: OnceLock<Regex> = OnceLock::new();
    TAG.get_or_init(|| Regex::new(r"<[^>]*>").expect("valid regex"))
}

fn entity_pattern() -> &'static Regex {
    static ENTITY: OnceLock<Regex> = OnceLock::new();
    ENTITY.get_or_init(|| {
        Regex::new(r"^&(?:[A-Za-z][A-Za-z0-9]*|#[0-9]+|#[xX][0-9A-Fa-f]+);").expect("valid regex")
    })
}

fn decodable_entity_pattern() -> &'static Regex {
    static DECODABLE: OnceLock<Regex> = OnceLock::new();
    DECODABLE.get_or_init(|| {
        Regex::new(r"&(?:amp|lt|gt|quot|#0*39|#[xX]0*27);").expect("valid regex")
    })
}

fn leading_number_pattern() -> &'static Regex {
    static NUMBER: OnceLock<Regex> = OnceLock::new();
    NUMBER.get_or_init(|| {
        Regex::new(r"^[+-]?(?P<int>[0-9]+)?(?P<frac>\.[0-9]*)?(?P<exp>[eE][+-]?[0-9]+)?")
            .expect("valid regex")
    })
}

/// Makes free-form text safe to embed verbatim in markup.
///
/// ```rust
/// use json_search_core::sanitizer::sanitize_text;
///
/// assert_eq!(sanitize_text("  <b>Tom</b> & \"Jerry\" "), "Tom &amp; &quot;Jerry&quot;");
/// ```
pub fn sanitize_text(input: &str) -> String {
    let stripped = tag_pattern().replace_all(input, "");
    escape_markup(stripped.trim())
}

/// Reads a non-negative integer out of request input.
///
/// The leading number is parsed the way `intval` reads a numeric string:
/// plain digits, decimals and exponent notation (`"1e3"` is 1000), then the
/// fraction is dropped and the absolute value is returned. Anything
/// non-numeric yields `0`; values past `u64::MAX` saturate.
pub fn sanitize_int(input: &str) -> u64 {
    let text = sanitize_text(input);
    let Some(caps) = leading_number_pattern().captures(&text) else {
        return 0;
    };
    let int_part = caps.name("int").map(|m| m.as_str());
    let has_frac_digits = caps.name("frac").is_some_and(|m| m.as_str().len() > 1);
    if int_part.is_none() && !has_frac_digits {
        return 0;
    }

    if caps.name("frac").is_none() && caps.name("exp").is_none() {
        // exact path, no float rounding for long digit strings
        return int_part.unwrap_or("0").bytes().fold(0u64, |acc, digit| {
            acc.saturating_mul(10).saturating_add(u64::from(digit - b'0'))
        });
    }

    // float-to-int casts saturate and map NaN to 0
    caps[0].parse::<f64>().map(|n| n.abs().trunc() as u64).unwrap_or(0)
}

/// Normalizes text for search comparison: tags stripped and whitespace
/// trimmed like [`sanitize_text`], but with the basic markup entities
/// decoded back into the characters they stand for.
///
/// ```rust
/// use json_search_core::sanitizer::{comparison_text, sanitize_text};
///
/// assert_eq!(comparison_text(&sanitize_text("<b>Tom & Jerry</b>")), "Tom & Jerry");
/// assert_eq!(comparison_text("O'Brien"), "O'Brien");
/// ```
pub fn comparison_text(input: &str) -> String {
    let stripped = tag_pattern().replace_all(input, "");
    decodable_entity_pattern()
        .replace_all(stripped.trim(), |caps: &regex::Captures<'_>| match &caps[0] {
            "&amp;" => "&",
            "&lt;" => "<",
            "&gt;" => ">",
            "&quot;" => "\"",
            _ => "'",
        })
        .into_owned()
}

fn escape_markup(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for (idx, ch) in value.char_indices() {
        match ch {
            '&' if entity_pattern().is_match(&value[idx..]) => out.push('&'),
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            other => out.push(other),
        }
    }
    out
}
