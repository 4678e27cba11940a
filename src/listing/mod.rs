//! Filtered, sorted, paginated listing: parse request, count, fetch one page.

mod pagination;
mod params;
mod view;

pub use pagination::{Pagination, PAGE_SIZE};
pub use params::{query_pairs, FilterField, Filters, ListingParams, SortableColumn, TableSpec};
pub use view::{page_links, FilterInput, ListingView, PageLink, SortHeader, PAGE_WINDOW};

use crate::error::{tolerate_missing_table, AppError};
use crate::models::{GateConfigRow, GatewayConfig, TaxRate};
use crate::sql::{self, Match, QueryBuf};
use crate::store::GateStore;
use async_trait::async_trait;

pub const TAX_RATES: TableSpec = TableSpec {
    table: "sys_tax_rate",
    columns: TaxRate::COLUMNS,
    sortable: &[
        SortableColumn { column: "id", label: "ID" },
        SortableColumn { column: "tax_category_id", label: "Tax category" },
        SortableColumn { column: "start_date", label: "Start date" },
        SortableColumn { column: "end_date", label: "End date" },
        SortableColumn { column: "rate_percent", label: "Rate %" },
    ],
    filters: &[
        FilterField { param: "id", column: "id", label: "ID", op: Match::Exact },
        FilterField { param: "tax_category_id", column: "tax_category_id", label: "Tax category", op: Match::Exact },
        FilterField { param: "start_date", column: "start_date", label: "Start date", op: Match::Contains },
        FilterField { param: "end_date", column: "end_date", label: "End date", op: Match::Contains },
        FilterField { param: "rate_percent", column: "rate_percent", label: "Rate %", op: Match::Exact },
    ],
};

pub const GATE_CONFIGS: TableSpec = TableSpec {
    table: "mnp_gate_config",
    columns: GatewayConfig::COLUMNS,
    sortable: &[
        SortableColumn { column: "id", label: "ID" },
        SortableColumn { column: "engine", label: "Engine" },
        SortableColumn { column: "max_workers", label: "Max workers" },
        SortableColumn { column: "cache_days", label: "Cache days" },
    ],
    filters: &[
        FilterField { param: "id", column: "id", label: "ID", op: Match::Exact },
        FilterField { param: "engine", column: "engine", label: "Engine", op: Match::Contains },
    ],
};

/// A row type that can back the listing page.
#[async_trait]
pub trait Listing: Sized + Send + 'static {
    const TABLE: &'static TableSpec;

    async fn fetch(store: &dyn GateStore, query: &QueryBuf) -> Result<Vec<Self>, sqlx::Error>;
}

#[async_trait]
impl Listing for TaxRate {
    const TABLE: &'static TableSpec = &TAX_RATES;

    async fn fetch(store: &dyn GateStore, query: &QueryBuf) -> Result<Vec<Self>, sqlx::Error> {
        store.tax_rates(query).await
    }
}

#[async_trait]
impl Listing for GateConfigRow {
    const TABLE: &'static TableSpec = &GATE_CONFIGS;

    async fn fetch(store: &dyn GateStore, query: &QueryBuf) -> Result<Vec<Self>, sqlx::Error> {
        let configs = store.gate_configs(query).await?;
        Ok(configs.into_iter().map(GateConfigRow::from).collect())
    }
}

/// One listing page as loaded from the store.
#[derive(Debug)]
pub struct ListingPage<L> {
    pub version: String,
    pub rows: Vec<L>,
    pub pagination: Pagination,
}

/// Version lookup, then count, then (unless empty) the page query, in that order.
/// A missing table yields an empty page instead of an error.
pub async fn load<L: Listing>(
    store: &dyn GateStore,
    params: &ListingParams,
) -> Result<ListingPage<L>, AppError> {
    let spec = L::TABLE;
    let version = store.server_version().await.map_err(AppError::Version)?;

    let conditions = params.filters.conditions();
    let filter = sql::where_clause(&conditions);
    let total = tolerate_missing_table(
        store.count(&sql::count(spec.table, &filter)).await,
        || 0,
        AppError::Count,
    )?;

    let pagination = Pagination::compute(total, params.page, PAGE_SIZE);
    if pagination.is_empty() {
        return Ok(ListingPage { version, rows: Vec::new(), pagination });
    }

    let query = sql::select_page(
        spec.table,
        spec.columns,
        &filter,
        params.sort,
        params.dir,
        pagination.page_size,
        pagination.offset(),
    );
    let rows = tolerate_missing_table(L::fetch(store, &query).await, Vec::new, AppError::Query)?;
    Ok(ListingPage { version, rows, pagination })
}
