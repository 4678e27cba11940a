//! Page arithmetic for the listing.

/// Rows per listing page.
pub const PAGE_SIZE: u64 = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pagination {
    pub page: u64,
    pub page_size: u64,
    pub total: u64,
    pub total_pages: u64,
    /// 0 when there is no previous page.
    pub prev_page: u64,
    /// 0 when there is no next page.
    pub next_page: u64,
}

impl Pagination {
    /// `requested` is clamped to the last page. With `total == 0` it is left as-is and
    /// every counter is 0.
    pub fn compute(total: u64, requested: u64, page_size: u64) -> Self {
        let requested = requested.max(1);
        if total == 0 || page_size == 0 {
            return Pagination {
                page: requested,
                page_size,
                total,
                total_pages: 0,
                prev_page: 0,
                next_page: 0,
            };
        }
        let total_pages = total.div_ceil(page_size);
        let page = requested.min(total_pages);
        Pagination {
            page,
            page_size,
            total,
            total_pages,
            prev_page: if page > 1 { page - 1 } else { 0 },
            next_page: if page < total_pages { page + 1 } else { 0 },
        }
    }

    pub fn offset(&self) -> u64 {
        (self.page - 1).saturating_mul(self.page_size)
    }

    /// No row query is needed.
    pub fn is_empty(&self) -> bool {
        self.total_pages == 0
    }
}
