//! Offset pagination and the load-more controller.

/// Default number of posts per page.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// One page cut from an ordered collection.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: usize,
    /// 1-based page number.
    pub page: usize,
    pub limit: usize,
    pub has_more: bool,
    /// Offset of the following page, present while `has_more`.
    pub next_cursor: Option<usize>,
}

impl<T: Clone> Page<T> {
    /// Cut `items[offset .. offset + limit]`. A zero limit is treated as 1.
    pub fn slice(items: &[T], offset: usize, limit: usize) -> Self {
        let limit = limit.max(1);
        let total = items.len();
        let start = offset.min(total);
        let end = offset.saturating_add(limit).min(total);
        let has_more = offset.saturating_add(limit) < total;

        Self {
            items: items[start..end].to_vec(),
            total,
            page: offset / limit + 1,
            limit,
            has_more,
            next_cursor: has_more.then(|| offset + limit),
        }
    }
}

impl<T> Page<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            limit: self.limit,
            has_more: self.has_more,
            next_cursor: self.next_cursor,
        }
    }
}

/// Load-more controller: hands out successive pages of a collection.
#[derive(Debug, Clone)]
pub struct Paginator {
    page_size: usize,
    offset: usize,
    has_more: bool,
}

impl Paginator {
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            offset: 0,
            has_more: true,
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    /// Return the page at the current offset and advance past it.
    pub fn load_page<T: Clone>(&mut self, items: &[T]) -> Page<T> {
        let page = Page::slice(items, self.offset, self.page_size);
        self.has_more = page.has_more;
        self.offset = (self.offset + self.page_size).min(items.len());
        page
    }

    /// Back to the first page, e.g. after a filter change or refresh.
    pub fn reset(&mut self) {
        self.offset = 0;
        self.has_more = true;
    }
}

impl Default for Paginator {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}
