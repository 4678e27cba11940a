//! Router assembly.

mod common;
mod pages;

pub use common::common_routes;
pub use pages::page_routes;

use crate::config::HomeListing;
use crate::state::AppState;
use axum::Router;
use tower_http::trace::TraceLayer;

/// Full application router with request tracing.
pub fn app(state: AppState, home: HomeListing) -> Router {
    Router::new()
        .merge(page_routes(home))
        .merge(common_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
