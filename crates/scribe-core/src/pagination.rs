//! Page-number pagination.

/// Blogs per listing page.
pub const DEFAULT_PAGE_SIZE: u64 = 5;

/// A requested page (1-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub per_page: u64,
}

impl PageRequest {
    pub fn new(page: u64, per_page: u64) -> Self {
        Self {
            page: page.max(1),
            per_page: per_page.max(1),
        }
    }

    /// Parse a raw `page` query value. `None` means the first page.
    pub fn parse(raw: Option<&str>, per_page: u64) -> Option<Self> {
        let page = match raw.map(str::trim) {
            None | Some("") => 1,
            Some(value) => value.parse::<u64>().ok().filter(|p| *p >= 1)?,
        };
        Some(Self::new(page, per_page))
    }

    /// Items before this page. Saturates for pages far past any real listing.
    pub fn offset(&self) -> u64 {
        (self.page - 1).saturating_mul(self.per_page)
    }

    pub fn limit(&self) -> u64 {
        self.per_page
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(1, DEFAULT_PAGE_SIZE)
    }
}

/// One page of results together with the total item count.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: u64, request: PageRequest) -> Self {
        Self {
            items,
            total,
            page: request.page,
            per_page: request.per_page,
        }
    }

    /// Slice an already ordered, complete result set.
    pub fn from_all(all: Vec<T>, request: PageRequest) -> Self {
        let total = all.len() as u64;
        let items = all
            .into_iter()
            .skip(usize::try_from(request.offset()).unwrap_or(usize::MAX))
            .take(usize::try_from(request.limit()).unwrap_or(usize::MAX))
            .collect();
        Self::new(items, total, request)
    }

    /// Number of pages; an empty listing still has one (empty) page.
    pub fn num_pages(&self) -> u64 {
        self.total.div_ceil(self.per_page).max(1)
    }

    /// Whether the requested page exists.
    pub fn is_valid(&self) -> bool {
        self.page >= 1 && self.page <= self.num_pages()
    }

    pub fn has_next(&self) -> bool {
        self.page < self.num_pages()
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paginate(total: usize, page: u64) -> Page<usize> {
        Page::from_all((0..total).collect(), PageRequest::new(page, DEFAULT_PAGE_SIZE))
    }

    #[test]
    fn test_twelve_items_make_three_pages() {
        let sizes: Vec<usize> = (1..=3).map(|p| paginate(12, p).items.len()).collect();
        assert_eq!(sizes, vec![5, 5, 2]);
        assert_eq!(paginate(12, 1).num_pages(), 3);
    }

    #[test]
    fn test_next_and_previous() {
        let first = paginate(12, 1);
        assert!(first.has_next());
        assert!(!first.has_previous());

        let last = paginate(12, 3);
        assert!(!last.has_next());
        assert!(last.has_previous());
        assert_eq!(last.items, vec![10, 11]);
    }

    #[test]
    fn test_empty_listing_has_one_page() {
        let page = paginate(0, 1);
        assert_eq!(page.num_pages(), 1);
        assert!(page.is_valid());
        assert!(!paginate(0, 2).is_valid());
    }

    #[test]
    fn test_parse_page_values() {
        assert_eq!(PageRequest::parse(None, 5).unwrap().page, 1);
        assert_eq!(PageRequest::parse(Some("3"), 5).unwrap().offset(), 10);
        assert!(PageRequest::parse(Some("0"), 5).is_none());
        assert!(PageRequest::parse(Some("-1"), 5).is_none());
        assert!(PageRequest::parse(Some("two"), 5).is_none());
    }

    #[test]
    fn test_huge_page_is_out_of_range() {
        let request = PageRequest::parse(Some(&u64::MAX.to_string()), DEFAULT_PAGE_SIZE).unwrap();
        assert_eq!(request.offset(), u64::MAX);

        let page = paginate(3, u64::MAX);
        assert!(page.items.is_empty());
        assert!(!page.is_valid());
    }
}
