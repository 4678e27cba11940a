//! Admin page routes.

use crate::config::HomeListing;
use crate::handlers::{export_configs, gate_configs, mnp_gate, mnp_gates, tax_rates};
use crate::state::AppState;
use axum::{routing::get, Router};

/// `/` serves exactly one listing, chosen by `home`.
pub fn page_routes(home: HomeListing) -> Router<AppState> {
    let home_route = match home {
        HomeListing::TaxRates => get(tax_rates),
        HomeListing::GateConfigs => get(gate_configs),
    };
    Router::new()
        .route("/", home_route)
        .route("/mnp-gate", get(mnp_gate))
        .route("/mnp-gates", get(mnp_gates))
        .route("/mnp-gate.json", get(export_configs))
}
