//! Display records for the three tables and their row mappers.
//!
//! Nullable columns are collapsed at this boundary: text to `""`, integers to `0`.
//! `GatewayConfig` is the exception and keeps its options, because the JSON export
//! reports them as-is.

use rust_decimal::Decimal;
use sqlx::mysql::MySqlRow;
use sqlx::Row;

/// Row of `sys_tax_rate`.
#[derive(Clone, Debug, PartialEq)]
pub struct TaxRate {
    pub id: i64,
    pub tax_category: i64,
    pub start_date: String,
    pub end_date: String,
    pub rate_percent: Decimal,
}

impl TaxRate {
    pub const COLUMNS: &'static [&'static str] =
        &["id", "tax_category_id", "start_date", "end_date", "rate_percent"];

    pub fn from_row(row: &MySqlRow) -> Result<Self, sqlx::Error> {
        Ok(TaxRate {
            id: int_cell(row, "id")?,
            tax_category: int_cell(row, "tax_category_id")?,
            start_date: text_cell(row, "start_date")?,
            end_date: text_cell(row, "end_date")?,
            rate_percent: decimal_cell(row, "rate_percent")?,
        })
    }
}

/// Row of `mnp_gate_config` as stored.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GatewayConfig {
    pub id: i64,
    pub engine: Option<String>,
    pub max_workers: Option<i64>,
    pub cache_days: Option<i64>,
    pub config_text: Option<String>,
}

impl GatewayConfig {
    pub const COLUMNS: &'static [&'static str] = &["id", "engine", "max_workers", "cache_days", "config"];

    pub fn from_row(row: &MySqlRow) -> Result<Self, sqlx::Error> {
        Ok(GatewayConfig {
            id: int_cell(row, "id")?,
            engine: opt_text_cell(row, "engine")?,
            max_workers: opt_int_cell(row, "max_workers")?,
            cache_days: opt_int_cell(row, "cache_days")?,
            config_text: opt_text_cell(row, "config")?,
        })
    }
}

/// `mnp_gate_config` row for display.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GateConfigRow {
    pub id: i64,
    pub engine: String,
    pub max_workers: i64,
    pub cache_days: i64,
    pub config: String,
}

impl From<GatewayConfig> for GateConfigRow {
    fn from(c: GatewayConfig) -> Self {
        GateConfigRow {
            id: c.id,
            engine: c.engine.unwrap_or_default(),
            max_workers: c.max_workers.unwrap_or_default(),
            cache_days: c.cache_days.unwrap_or_default(),
            config: c.config_text.unwrap_or_default(),
        }
    }
}

/// Row of `mnp_gate` (full schema).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GatewayInstance {
    pub id: i64,
    pub instance_id: i64,
    pub group_id: i64,
    pub supplier_id: i64,
    pub name: String,
    pub code_name: String,
    pub engine_id: i64,
    pub throughput_queries: i64,
    pub connection: String,
    pub billing_account_id: i64,
    pub price_list_id: i64,
    pub kind: String,
    pub linked_mnp_account_id: i64,
    pub status: String,
    pub insert_dt: String,
    pub status_dt: String,
    pub setup_date: String,
}

impl GatewayInstance {
    pub const COLUMNS: &'static [&'static str] = &[
        "id",
        "instance_id",
        "group_id",
        "supplier_id",
        "name",
        "code_name",
        "engine_id",
        "throughput_queries",
        "connection",
        "billing_account_id",
        "price_list_id",
        "type",
        "linked_mnp_account_id",
        "status",
        "insert_dt",
        "status_dt",
        "setup_date",
    ];

    pub fn from_row(row: &MySqlRow) -> Result<Self, sqlx::Error> {
        Ok(GatewayInstance {
            id: int_cell(row, "id")?,
            instance_id: int_cell(row, "instance_id")?,
            group_id: int_cell(row, "group_id")?,
            supplier_id: int_cell(row, "supplier_id")?,
            name: text_cell(row, "name")?,
            code_name: text_cell(row, "code_name")?,
            engine_id: int_cell(row, "engine_id")?,
            throughput_queries: int_cell(row, "throughput_queries")?,
            connection: text_cell(row, "connection")?,
            billing_account_id: int_cell(row, "billing_account_id")?,
            price_list_id: int_cell(row, "price_list_id")?,
            kind: text_cell(row, "type")?,
            linked_mnp_account_id: int_cell(row, "linked_mnp_account_id")?,
            status: text_cell(row, "status")?,
            insert_dt: text_cell(row, "insert_dt")?,
            status_dt: text_cell(row, "status_dt")?,
            setup_date: text_cell(row, "setup_date")?,
        })
    }
}

fn int_cell(row: &MySqlRow, name: &str) -> Result<i64, sqlx::Error> {
    opt_int_cell(row, name).map(or_zero)
}

fn text_cell(row: &MySqlRow, name: &str) -> Result<String, sqlx::Error> {
    opt_text_cell(row, name).map(or_zero)
}

/// NULL collapses to the type's zero value (`0`, `""`).
fn or_zero<T: Default>(v: Option<T>) -> T {
    v.unwrap_or_default()
}

/// BIGINT UNSIGNED values above `i64::MAX` saturate.
fn unsigned_to_i64(n: u64) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}

fn date_text(d: chrono::NaiveDate) -> String {
    d.format("%Y-%m-%d").to_string()
}

fn datetime_text(d: chrono::NaiveDateTime) -> String {
    d.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Compact JSON text of a native `JSON` column.
fn json_text(v: serde_json::Value) -> String {
    v.to_string()
}

/// DOUBLE/FLOAT rates; non-finite values read as zero.
fn float_to_decimal(f: f64) -> Decimal {
    Decimal::try_from(f).unwrap_or_default()
}

/// Integer column of any width or signedness.
fn opt_int_cell(row: &MySqlRow, name: &str) -> Result<Option<i64>, sqlx::Error> {
    if let Ok(v) = row.try_get::<Option<i64>, _>(name) {
        return Ok(v);
    }
    if let Ok(v) = row.try_get::<Option<u64>, _>(name) {
        return Ok(v.map(unsigned_to_i64));
    }
    if let Ok(v) = row.try_get::<Option<bool>, _>(name) {
        return Ok(v.map(i64::from));
    }
    row.try_get::<Option<i64>, _>(name)
}

/// Text column, or a date/time or `JSON` column rendered as text.
fn opt_text_cell(row: &MySqlRow, name: &str) -> Result<Option<String>, sqlx::Error> {
    if let Ok(v) = row.try_get::<Option<String>, _>(name) {
        return Ok(v);
    }
    if let Ok(v) = row.try_get::<Option<serde_json::Value>, _>(name) {
        return Ok(v.map(json_text));
    }
    if let Ok(v) = row.try_get::<Option<chrono::NaiveDate>, _>(name) {
        return Ok(v.map(date_text));
    }
    if let Ok(v) = row.try_get::<Option<chrono::NaiveDateTime>, _>(name) {
        return Ok(v.map(datetime_text));
    }
    if let Ok(v) = row.try_get::<Option<chrono::DateTime<chrono::Utc>>, _>(name) {
        return Ok(v.map(|d| datetime_text(d.naive_utc())));
    }
    if let Ok(v) = row.try_get::<Option<Vec<u8>>, _>(name) {
        return Ok(v.map(|b| String::from_utf8_lossy(&b).into_owned()));
    }
    row.try_get::<Option<String>, _>(name)
}

fn decimal_cell(row: &MySqlRow, name: &str) -> Result<Decimal, sqlx::Error> {
    if let Ok(v) = row.try_get::<Option<Decimal>, _>(name) {
        return Ok(or_zero(v));
    }
    if let Ok(v) = row.try_get::<Option<f64>, _>(name) {
        return Ok(v.map(float_to_decimal).unwrap_or_default());
    }
    row.try_get::<Option<Decimal>, _>(name).map(or_zero)
}
