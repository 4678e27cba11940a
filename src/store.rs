//! Database access behind a trait so handlers can run against a fake in tests.

use crate::models::{GatewayConfig, GatewayInstance, TaxRate};
use crate::sql::{bind_all, bind_all_scalar, QueryBuf};
use async_trait::async_trait;
use sqlx::mysql::{MySqlPool, MySqlPoolOptions};

/// Read-only access to the admin tables. Queries are built by [`crate::sql`].
#[async_trait]
pub trait GateStore: Send + Sync {
    /// `SELECT VERSION()`.
    async fn server_version(&self) -> Result<String, sqlx::Error>;

    /// Runs a `SELECT COUNT(*)` query.
    async fn count(&self, query: &QueryBuf) -> Result<u64, sqlx::Error>;

    async fn tax_rates(&self, query: &QueryBuf) -> Result<Vec<TaxRate>, sqlx::Error>;

    async fn gate_configs(&self, query: &QueryBuf) -> Result<Vec<GatewayConfig>, sqlx::Error>;

    async fn gates(&self, query: &QueryBuf) -> Result<Vec<GatewayInstance>, sqlx::Error>;

    /// Liveness probe for `/ready`.
    async fn ping(&self) -> Result<(), sqlx::Error>;
}

pub struct MySqlStore {
    pool: MySqlPool,
}

impl MySqlStore {
    /// Opens the pool and verifies the server answers.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, sqlx::Error> {
        let pool = MySqlPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        sqlx::query("SELECT 1").execute(&pool).await?;
        tracing::info!("database connection established");
        Ok(MySqlStore { pool })
    }

    async fn fetch<T: Send>(
        &self,
        query: &QueryBuf,
        map: fn(&sqlx::mysql::MySqlRow) -> Result<T, sqlx::Error>,
    ) -> Result<Vec<T>, sqlx::Error> {
        tracing::debug!(sql = %query.sql, params = ?query.params, "query");
        let rows = bind_all(sqlx::query(&query.sql), &query.params)
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(map).collect()
    }
}

#[async_trait]
impl GateStore for MySqlStore {
    async fn server_version(&self) -> Result<String, sqlx::Error> {
        sqlx::query_scalar("SELECT VERSION()").fetch_one(&self.pool).await
    }

    async fn count(&self, query: &QueryBuf) -> Result<u64, sqlx::Error> {
        tracing::debug!(sql = %query.sql, params = ?query.params, "count");
        let total: i64 = bind_all_scalar(sqlx::query_scalar(&query.sql), &query.params)
            .fetch_one(&self.pool)
            .await?;
        Ok(u64::try_from(total).unwrap_or(0))
    }

    async fn tax_rates(&self, query: &QueryBuf) -> Result<Vec<TaxRate>, sqlx::Error> {
        self.fetch(query, TaxRate::from_row).await
    }

    async fn gate_configs(&self, query: &QueryBuf) -> Result<Vec<GatewayConfig>, sqlx::Error> {
        self.fetch(query, GatewayConfig::from_row).await
    }

    async fn gates(&self, query: &QueryBuf) -> Result<Vec<GatewayInstance>, sqlx::Error> {
        self.fetch(query, GatewayInstance::from_row).await
    }

    async fn ping(&self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await.map(|_| ())
    }
}
