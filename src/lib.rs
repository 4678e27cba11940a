//! Gate admin: read-only HTML listings of the tax-rate and MNP gateway tables, plus a JSON
//! export of gateway configuration.

pub mod config;
pub mod error;
pub mod export;
pub mod handlers;
pub mod listing;
pub mod models;
pub mod routes;
pub mod sql;
pub mod state;
pub mod store;
pub mod views;

pub use config::{HomeListing, Settings};
pub use error::{AppError, ConfigError};
pub use routes::app;
pub use state::AppState;
pub use store::{GateStore, MySqlStore};
