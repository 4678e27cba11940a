//! Unfiltered `mnp_gate_config` / `mnp_gate` pages and the config JSON export.

use crate::error::{tolerate_missing_table, AppError};
use crate::export::{self, ConfigExport};
use crate::models::{GateConfigRow, GatewayConfig, GatewayInstance};
use crate::sql;
use crate::state::AppState;
use crate::views::{render, MnpGatePage, MnpGatesPage};
use axum::{
    extract::State,
    http::header,
    response::{Html, IntoResponse, Response},
};

const GATE_CONFIG_TABLE: &str = "mnp_gate_config";
const GATE_TABLE: &str = "mnp_gate";

async fn all_configs(state: &AppState) -> Result<Vec<GatewayConfig>, AppError> {
    let query = sql::select_all(GATE_CONFIG_TABLE, GatewayConfig::COLUMNS);
    tolerate_missing_table(state.store.gate_configs(&query).await, Vec::new, AppError::Query)
}

pub async fn mnp_gate(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let configs = all_configs(&state).await?;
    render(&MnpGatePage {
        configs: configs.into_iter().map(GateConfigRow::from).collect(),
    })
}

pub async fn mnp_gates(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let query = sql::select_all(GATE_TABLE, GatewayInstance::COLUMNS);
    let gates = tolerate_missing_table(state.store.gates(&query).await, Vec::new, AppError::Query)?;
    render(&MnpGatesPage { gates })
}

pub async fn export_configs(State(state): State<AppState>) -> Result<Response, AppError> {
    let configs: Vec<ConfigExport> = all_configs(&state)
        .await?
        .into_iter()
        .map(ConfigExport::from)
        .collect();
    let body = export::encode(&configs)?;
    Ok((
        [(header::CONTENT_TYPE, "application/json; charset=utf-8")],
        body,
    )
        .into_response())
}
