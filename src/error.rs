//! Typed errors and HTTP mapping.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use sqlx::mysql::MySqlDatabaseError;
use thiserror::Error;

/// MySQL `ER_NO_SUCH_TABLE`.
const ER_NO_SUCH_TABLE: u16 = 1146;
/// MySQL `ER_BAD_TABLE_ERROR`.
const ER_BAD_TABLE_ERROR: u16 = 1051;
/// SQLSTATE both of the above map to.
const SQLSTATE_NO_SUCH_TABLE: &str = "42S02";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing environment variable {0}")]
    Missing(&'static str),
    #[error("invalid value for {key}: '{value}'")]
    Invalid { key: &'static str, value: String },
}

/// Request-time failures. Every variant renders as a plain-text 500.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Version(#[source] sqlx::Error),
    #[error("Count query error: {0}")]
    Count(#[source] sqlx::Error),
    #[error("Database query error: {0}")]
    Query(#[source] sqlx::Error),
    #[error("Template render error: {0}")]
    Render(#[from] askama::Error),
    #[error("JSON encode error: {0}")]
    Encode(#[from] serde_json::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            self.to_string(),
        )
            .into_response()
    }
}

/// True when the driver reports that the queried table does not exist.
pub fn is_missing_table(err: &sqlx::Error) -> bool {
    let sqlx::Error::Database(db) = err else {
        return false;
    };
    if let Some(mysql) = db.try_downcast_ref::<MySqlDatabaseError>() {
        return matches!(mysql.number(), ER_NO_SUCH_TABLE | ER_BAD_TABLE_ERROR);
    }
    db.code().as_deref() == Some(SQLSTATE_NO_SUCH_TABLE) || db.message().contains("doesn't exist")
}

/// Maps a missing-table error to `Ok(fallback)`; any other error goes through `wrap`.
pub fn tolerate_missing_table<T>(
    result: Result<T, sqlx::Error>,
    fallback: impl FnOnce() -> T,
    wrap: fn(sqlx::Error) -> AppError,
) -> Result<T, AppError> {
    match result {
        Ok(v) => Ok(v),
        Err(e) if is_missing_table(&e) => {
            tracing::warn!(error = %e, "table missing, treating as empty");
            Ok(fallback())
        }
        Err(e) => Err(wrap(e)),
    }
}
