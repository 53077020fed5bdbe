//! Page envelopes as the list controller sees them: items plus pagination
//! metadata, normalized from the wire form.

use codelearn_api::types::PageData;

/// One fetched page.
///
/// `total_pages` is never below 1, even for an empty list, so page 1 is
/// always a valid page. Whether pagination controls are worth showing is a
/// separate question answered by [`Pagination::shows_controls`].
#[derive(Clone, Debug, PartialEq)]
pub struct PageEnvelope<T> {
    pub total_records: u64,
    pub total_pages: u32,
    pub current_page: u32,
    pub items: Vec<T>,
}

impl<T> PageEnvelope<T> {
    /// Normalizes a wire page. The server's `total_pages` wins when it is
    /// positive; otherwise it is computed from `total_records` and `page_size`.
    pub fn from_wire(data: PageData<T>, page_size: u32) -> Self {
        let total_records = u64::try_from(data.total_records).unwrap_or(0);
        let reported = u32::try_from(data.total_pages).unwrap_or(0);
        let total_pages = if reported > 0 {
            reported
        } else {
            pages_for(total_records, page_size)
        };
        Self {
            total_records,
            total_pages: total_pages.max(1),
            current_page: u32::try_from(data.current_page).unwrap_or(1).max(1),
            items: data.data,
        }
    }

    /// An empty first page.
    pub fn empty() -> Self {
        Self {
            total_records: 0,
            total_pages: 1,
            current_page: 1,
            items: Vec::new(),
        }
    }

    pub fn map_items<U>(self, f: impl FnMut(T) -> U) -> PageEnvelope<U> {
        PageEnvelope {
            total_records: self.total_records,
            total_pages: self.total_pages,
            current_page: self.current_page,
            items: self.items.into_iter().map(f).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn pagination(&self) -> Pagination {
        Pagination {
            current_page: self.current_page,
            total_pages: self.total_pages,
            total_records: self.total_records,
        }
    }
}

/// Number of pages needed for `total_records` at `page_size`, at least 1.
pub fn pages_for(total_records: u64, page_size: u32) -> u32 {
    let page_size = u64::from(page_size.max(1));
    let pages = total_records.div_ceil(page_size).max(1);
    u32::try_from(pages).unwrap_or(u32::MAX)
}

/// Pagination metadata of the last successful fetch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pagination {
    pub current_page: u32,
    pub total_pages: u32,
    pub total_records: u64,
}

impl Pagination {
    /// Whether `page` is a page the controls may navigate to.
    pub fn contains(&self, page: u32) -> bool {
        (1..=self.total_pages).contains(&page)
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    /// Controls are hidden for lists with no records at all.
    pub fn shows_controls(&self) -> bool {
        self.total_records > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wire(total_records: i64, total_pages: i64, current_page: i64) -> PageData<u32> {
        PageData {
            total_records,
            total_records_page: 0,
            current_page,
            total_pages,
            prev_pages: None,
            next_pages: None,
            data: vec![],
        }
    }

    #[test]
    fn eighteen_records_at_six_per_page_is_three_pages() {
        assert_eq!(pages_for(18, 6), 3);
        assert_eq!(pages_for(19, 6), 4);
        let env = PageEnvelope::from_wire(wire(18, 0, 1), 6);
        assert_eq!(env.total_pages, 3);
        assert!(!env.pagination().contains(4));
    }

    #[test]
    fn zero_records_clamps_to_one_page_without_controls() {
        let env = PageEnvelope::from_wire(wire(0, 0, 0), 9);
        assert_eq!(env.total_pages, 1);
        assert_eq!(env.current_page, 1);
        assert!(!env.pagination().shows_controls());
        assert!(env.pagination().contains(1));
    }

    #[test]
    fn server_total_pages_wins_when_positive() {
        let env = PageEnvelope::from_wire(wire(18, 9, 2), 6);
        assert_eq!(env.total_pages, 9);
        assert!(env.pagination().has_previous());
        assert!(env.pagination().has_next());
    }

    #[test]
    fn negative_counts_are_clamped() {
        let env = PageEnvelope::from_wire(wire(-5, -1, -2), 6);
        assert_eq!(env.total_records, 0);
        assert_eq!(env.total_pages, 1);
        assert_eq!(env.current_page, 1);
    }
}
