//! Page slicing over an already-filtered collection.

use log::debug;

use crate::record_model::PageResult;
use crate::sanitizer::sanitize_int;

/// Resolves raw request input into a 1-based page number.
pub fn page_number(raw: &str) -> u64 {
    sanitize_int(raw).max(1)
}

/// `ceil(count / items_per_page)`, or `0` when there is nothing to show.
pub fn total_pages(count: usize, items_per_page: usize) -> usize {
    count.div_ceil(items_per_page.max(1))
}

/// Slices one page out of `items`.
///
/// Pages past the end produce an empty page alongside the real page count,
/// never an error.
pub fn paginate<T: Clone>(items: &[T], page: &str, items_per_page: usize) -> PageResult<T> {
    let per_page = items_per_page.max(1);
    let page = page_number(page);

    let start = usize::try_from(page - 1)
        .ok()
        .and_then(|offset| offset.checked_mul(per_page));
    let slice: &[T] = match start {
        Some(start) if start < items.len() => {
            let end = start.saturating_add(per_page).min(items.len());
            &items[start..end]
        }
        _ => &[],
    };
    debug!("Page {} holds {} of {} items", page, slice.len(), items.len());

    PageResult {
        items: slice.to_vec(),
        page,
        total_pages: total_pages(items.len(), per_page),
    }
}
