//! View-model handed to the listing templates.

use super::{ListingParams, Pagination, TableSpec};
use crate::sql::SortDirection;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FilterInput {
    pub param: &'static str,
    pub label: &'static str,
    pub value: String,
}

/// Pages shown on each side of the current one.
pub const PAGE_WINDOW: u64 = 2;

/// Pager entry. A `gap` stands for the skipped pages between two links.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageLink {
    pub number: u64,
    pub current: bool,
    pub gap: bool,
}

impl PageLink {
    fn ellipsis() -> Self {
        PageLink {
            number: 0,
            current: false,
            gap: true,
        }
    }
}

/// First page, last page and the window around `page`, with gaps where pages are skipped.
pub fn page_links(page: u64, total_pages: u64) -> Vec<PageLink> {
    let mut links = Vec::new();
    if total_pages == 0 {
        return links;
    }
    let lo = page.saturating_sub(PAGE_WINDOW).max(1);
    let hi = page.saturating_add(PAGE_WINDOW).min(total_pages);
    let mut last = 0;
    for number in std::iter::once(1).chain(lo..=hi).chain(std::iter::once(total_pages)) {
        if number <= last {
            continue;
        }
        if number > last + 1 {
            links.push(PageLink::ellipsis());
        }
        links.push(PageLink {
            number,
            current: number == page,
            gap: false,
        });
        last = number;
    }
    links
}

/// Clickable column header. Clicking the active column flips direction; others start ascending.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SortHeader {
    pub label: &'static str,
    pub active: bool,
    pub dir: SortDirection,
    pub href: String,
}

impl SortHeader {
    /// Arrow for the active column, empty otherwise.
    pub fn marker(&self) -> &'static str {
        match (self.active, self.dir) {
            (false, _) => "",
            // `dir` is the direction the link switches to.
            (true, SortDirection::Desc) => "▲",
            (true, SortDirection::Asc) => "▼",
        }
    }
}

#[derive(Clone, Debug)]
pub struct ListingView {
    pub version: String,
    pub page: u64,
    pub page_size: u64,
    pub total: u64,
    pub total_pages: u64,
    pub prev_page: u64,
    pub next_page: u64,
    pub sort: &'static str,
    pub dir: SortDirection,
    pub filters: Vec<FilterInput>,
    pub base_query_prefix: String,
    pub page_links: Vec<PageLink>,
    pub headers: Vec<SortHeader>,
}

impl ListingView {
    pub fn new(spec: &TableSpec, params: &ListingParams, version: String, pagination: Pagination) -> Self {
        let filters: Vec<FilterInput> = params
            .filters
            .iter()
            .map(|(f, v)| FilterInput {
                param: f.param,
                label: f.label,
                value: v.to_string(),
            })
            .collect();

        let headers = spec
            .sortable
            .iter()
            .map(|c| {
                let active = c.column == params.sort;
                let dir = if active { params.dir.reversed() } else { SortDirection::Asc };
                SortHeader {
                    label: c.label,
                    active,
                    dir,
                    href: sort_href(&filters, c.column, dir),
                }
            })
            .collect();

        ListingView {
            version,
            page: pagination.page,
            page_size: pagination.page_size,
            total: pagination.total,
            total_pages: pagination.total_pages,
            prev_page: pagination.prev_page,
            next_page: pagination.next_page,
            sort: params.sort,
            dir: params.dir,
            filters,
            base_query_prefix: params.base_query_prefix.clone(),
            page_links: page_links(pagination.page, pagination.total_pages),
            headers,
        }
    }
}

/// Active filters plus the new sort; drops `page` so the result starts at page 1.
fn sort_href(filters: &[FilterInput], column: &str, dir: SortDirection) -> String {
    let mut pairs: Vec<(&str, &str)> = filters
        .iter()
        .filter(|f| !f.value.is_empty())
        .map(|f| (f.param, f.value.as_str()))
        .collect();
    pairs.push(("sort", column));
    pairs.push(("dir", dir.as_str()));
    format!("?{}", serde_urlencoded::to_string(&pairs).unwrap_or_default())
}
