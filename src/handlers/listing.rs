//! `/` handlers: one per listing variant, wired at startup.

use crate::error::AppError;
use crate::listing::{self, query_pairs, Listing, ListingParams, ListingView};
use crate::models::{GateConfigRow, TaxRate};
use crate::state::AppState;
use crate::views::{render, GateConfigListingPage, TaxRatePage};
use axum::{
    extract::{RawQuery, State},
    response::Html,
};

async fn load_view<L: Listing>(
    state: &AppState,
    raw: Option<&str>,
) -> Result<(ListingView, Vec<L>), AppError> {
    let params = ListingParams::parse(L::TABLE, &query_pairs(raw));
    let page = listing::load::<L>(state.store.as_ref(), &params).await?;
    let view = ListingView::new(L::TABLE, &params, page.version, page.pagination);
    Ok((view, page.rows))
}

pub async fn tax_rates(
    State(state): State<AppState>,
    RawQuery(raw): RawQuery,
) -> Result<Html<String>, AppError> {
    let (view, rows) = load_view::<TaxRate>(&state, raw.as_deref()).await?;
    render(&TaxRatePage { view, rows })
}

pub async fn gate_configs(
    State(state): State<AppState>,
    RawQuery(raw): RawQuery,
) -> Result<Html<String>, AppError> {
    let (view, rows) = load_view::<GateConfigRow>(&state, raw.as_deref()).await?;
    render(&GateConfigListingPage { view, rows })
}
