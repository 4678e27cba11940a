//! Askama page templates (compiled from `templates/`).

use crate::error::AppError;
use crate::listing::ListingView;
use crate::models::{GateConfigRow, GatewayInstance, TaxRate};
use askama::Template;
use axum::response::Html;

#[derive(Template)]
#[template(path = "home.html")]
pub struct TaxRatePage {
    pub view: ListingView,
    pub rows: Vec<TaxRate>,
}

#[derive(Template)]
#[template(path = "gate_configs.html")]
pub struct GateConfigListingPage {
    pub view: ListingView,
    pub rows: Vec<GateConfigRow>,
}

#[derive(Template)]
#[template(path = "mnp_gate.html")]
pub struct MnpGatePage {
    pub configs: Vec<GateConfigRow>,
}

#[derive(Template)]
#[template(path = "mnp_gates.html")]
pub struct MnpGatesPage {
    pub gates: Vec<GatewayInstance>,
}

pub fn render<T: Template>(page: &T) -> Result<Html<String>, AppError> {
    Ok(Html(page.render()?))
}
