//! Client-side search and pagination shared by every listing.
//!
//! The ledger returns whole collections; filtering and page slicing happen
//! locally, always in that order.

/// Rows per page on every listing.
pub const PAGE_SIZE: usize = 50;

/// Page buttons shown at once by a pagination control.
pub const MAX_VISIBLE_PAGES: usize = 5;

/// Text a record exposes to the search box.
///
/// Absent fields are reported as `""` so they simply never match.
pub trait Searchable {
    fn search_fields(&self) -> Vec<&str>;
}

/// Case-insensitive substring match over the record's search fields.
///
/// An empty term matches everything.
pub fn matches<T: Searchable + ?Sized>(record: &T, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    let needle = term.to_lowercase();
    record
        .search_fields()
        .into_iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

/// Records matching `term`, in their original order.
pub fn filter<'a, T: Searchable>(records: &'a [T], term: &str) -> Vec<&'a T> {
    records.iter().filter(|r| matches(*r, term)).collect()
}

/// Number of pages needed for `len` rows (zero rows means zero pages).
pub fn total_pages(len: usize, per_page: usize) -> usize {
    if per_page == 0 {
        return 0;
    }
    len.div_ceil(per_page)
}

/// One page of an already-filtered listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based page number.
    pub number: usize,
    pub per_page: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

/// Slice page `number` (1-based) out of `items`.
///
/// A page past the end is empty rather than an error.
pub fn paginate<T>(items: Vec<T>, number: usize, per_page: usize) -> Page<T> {
    let total_items = items.len();
    let total_pages = total_pages(total_items, per_page);
    let number = number.max(1);
    let start = (number - 1).saturating_mul(per_page);

    let items = items.into_iter().skip(start).take(per_page).collect();

    Page {
        items,
        number,
        per_page,
        total_items,
        total_pages,
    }
}

/// Page numbers to display, centred on `current` where possible.
///
/// Shows at most `max_visible` numbers and shifts the window when it would run
/// past either end.
pub fn page_window(current: usize, total: usize, max_visible: usize) -> Vec<usize> {
    if total == 0 || max_visible == 0 {
        return Vec::new();
    }
    let current = current.clamp(1, total);
    let half = max_visible / 2;

    let mut start = current.saturating_sub(half).max(1);
    let mut end = (current + half).min(total);

    if end - start + 1 < max_visible {
        if start == 1 {
            end = (start + max_visible - 1).min(total);
        } else {
            start = (end + 1).saturating_sub(max_visible).max(1);
        }
    }

    (start..=end).collect()
}
