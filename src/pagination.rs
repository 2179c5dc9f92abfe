/// Pagination
///
/// Slices an ordered collection into fixed-size pages. Page numbers arrive
/// as raw request input; resolution never fails:
///
/// - missing, non-numeric, zero or negative values resolve to page 1,
/// - values beyond the last page resolve to the last page,
/// - an empty collection has exactly one (empty) page.
use serde::Deserialize;

/// Query-string parameters carrying the requested page.
#[derive(Debug, Clone, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
}

/// Resolved page position within a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageMeta {
    /// 1-based page number, already clamped into range.
    pub number: i64,
    /// Items per page.
    pub size: i64,
    /// Items in the whole collection.
    pub total_items: i64,
    /// Always at least 1.
    pub total_pages: i64,
}

impl PageMeta {
    pub fn has_next(&self) -> bool {
        self.number < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.number > 1
    }

    /// Offset of the first item on this page.
    pub fn offset(&self) -> i64 {
        (self.number - 1) * self.size
    }
}

/// One page of items plus its position metadata.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub meta: PageMeta,
}

/// Resolve a raw requested page against the collection size.
pub fn resolve(requested: Option<&str>, total_items: i64, page_size: i64) -> PageMeta {
    debug_assert!(page_size > 0);

    let total_pages = if total_items <= 0 {
        1
    } else {
        (total_items + page_size - 1) / page_size
    };

    let number = requested
        .and_then(|raw| raw.trim().parse::<i64>().ok())
        .filter(|n| *n >= 1)
        .unwrap_or(1)
        .min(total_pages);

    PageMeta {
        number,
        size: page_size,
        total_items: total_items.max(0),
        total_pages,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_page_resolves_to_first() {
        let meta = resolve(None, 25, 10);
        assert_eq!(meta.number, 1);
        assert_eq!(meta.total_pages, 3);
        assert_eq!(meta.offset(), 0);
        assert!(meta.has_next());
        assert!(!meta.has_previous());
    }

    #[test]
    fn non_numeric_and_non_positive_resolve_to_first() {
        for raw in ["abc", "", " ", "0", "-3", "1.5"] {
            let meta = resolve(Some(raw), 25, 10);
            assert_eq!(meta.number, 1, "raw page {:?}", raw);
        }
    }

    #[test]
    fn out_of_range_resolves_to_last() {
        let meta = resolve(Some("99"), 25, 10);
        assert_eq!(meta.number, 3);
        assert_eq!(meta.offset(), 20);
        assert!(!meta.has_next());
        assert!(meta.has_previous());
    }

    #[test]
    fn empty_collection_has_one_empty_page() {
        let meta = resolve(Some("7"), 0, 10);
        assert_eq!(meta.number, 1);
        assert_eq!(meta.total_pages, 1);
        assert_eq!(meta.total_items, 0);
        assert!(!meta.has_next());
        assert!(!meta.has_previous());
    }

    #[test]
    fn exact_multiple_has_no_partial_page() {
        let meta = resolve(Some("2"), 20, 10);
        assert_eq!(meta.total_pages, 2);
        assert_eq!(meta.number, 2);
        assert!(!meta.has_next());
    }

    #[test]
    fn page_item_counts_match_contract() {
        // For N items and page size P, page k holds min(P, N - (k-1)*P).
        let (n, p) = (12i64, 10i64);
        let meta1 = resolve(Some("1"), n, p);
        let meta2 = resolve(Some("2"), n, p);
        assert_eq!((n - meta1.offset()).min(p), 10);
        assert_eq!((n - meta2.offset()).min(p), 2);
        assert_eq!(meta2.total_pages, 2);
    }

    #[test]
    fn whitespace_padded_numbers_parse() {
        let meta = resolve(Some(" 2 "), 25, 10);
        assert_eq!(meta.number, 2);
        assert_eq!(meta.offset(), 10);
    }
}
