//! Case-insensitive substring filtering over configured fields.

use log::debug;

use crate::record_model::{FieldValue, Record};
use crate::sanitizer::{comparison_text, sanitize_text};

/// Keeps the records where any of `fields` contains `term`.
///
/// The term is sanitized with [`sanitize_text`] and then compared, through
/// [`comparison_text`], against values with their tags stripped but nothing
/// escaped, so `tom & jerry` finds `Tom & Jerry` while `amp` does not. An
/// empty term, a term that sanitizes to nothing, or an empty field list
/// keeps every record.
/// Surviving records stay in source order.
pub fn filter_records<'a, I>(records: I, term: &str, fields: &[String]) -> Vec<&'a Record>
where
    I: IntoIterator<Item = &'a Record>,
{
    let needle = comparison_text(&sanitize_text(term)).to_lowercase();
    if needle.is_empty() || fields.is_empty() {
        return records.into_iter().collect();
    }

    let matched: Vec<&Record> = records
        .into_iter()
        .filter(|record| record_matches(record, &needle, fields))
        .collect();
    debug!("Filter '{}' kept {} records", needle, matched.len());
    matched
}

fn record_matches(record: &Record, needle: &str, fields: &[String]) -> bool {
    fields.iter().any(|field| match record.field(field) {
        Some(FieldValue::Scalar(value)) => contains_term(&value, needle),
        Some(FieldValue::Sequence(items)) => items.iter().any(|item| contains_term(item, needle)),
        None => false,
    })
}

fn contains_term(value: &str, needle: &str) -> bool {
    comparison_text(value).to_lowercase().contains(needle)
}
