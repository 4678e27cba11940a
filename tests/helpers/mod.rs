//! In-memory `GateStore` and request helpers shared by the HTTP tests.
#![allow(dead_code)]

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{Request, Response};
use axum::Router;
use gate_admin::models::{GatewayConfig, GatewayInstance, TaxRate};
use gate_admin::sql::QueryBuf;
use gate_admin::{app, AppState, GateStore, HomeListing};
use sqlx::error::{DatabaseError, ErrorKind};
use std::borrow::Cow;
use std::fmt;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

#[derive(Debug)]
struct FakeDbError {
    code: &'static str,
    message: &'static str,
}

impl fmt::Display for FakeDbError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message)
    }
}

impl std::error::Error for FakeDbError {}

impl DatabaseError for FakeDbError {
    fn message(&self) -> &str {
        self.message
    }

    fn code(&self) -> Option<Cow<'_, str>> {
        Some(Cow::Borrowed(self.code))
    }

    fn as_error(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
        self
    }

    fn as_error_mut(&mut self) -> &mut (dyn std::error::Error + Send + Sync + 'static) {
        self
    }

    fn into_error(self: Box<Self>) -> Box<dyn std::error::Error + Send + Sync + 'static> {
        self
    }

    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

/// Failure injected into one store call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fail {
    MissingTable,
    Broken,
}

impl Fail {
    fn error(self) -> sqlx::Error {
        let e = match self {
            Fail::MissingTable => FakeDbError {
                code: "42S02",
                message: "Table 'bulk_gate.sys_tax_rate' doesn't exist",
            },
            Fail::Broken => FakeDbError {
                code: "HY000",
                message: "Lost connection to MySQL server during query",
            },
        };
        sqlx::Error::Database(Box::new(e))
    }
}

#[derive(Default)]
pub struct FakeStore {
    pub total: Option<u64>,
    pub tax_rates: Vec<TaxRate>,
    pub configs: Vec<GatewayConfig>,
    pub gates: Vec<GatewayInstance>,
    pub fail_version: Option<Fail>,
    pub fail_count: Option<Fail>,
    pub fail_rows: Option<Fail>,
    pub fail_ping: bool,
    /// Every query received, in call order.
    pub seen: Mutex<Vec<QueryBuf>>,
}

impl FakeStore {
    fn record(&self, query: &QueryBuf) {
        self.seen.lock().unwrap().push(query.clone());
    }

    pub fn queries(&self) -> Vec<QueryBuf> {
        self.seen.lock().unwrap().clone()
    }

    fn rows<T: Clone>(&self, query: &QueryBuf, rows: &[T]) -> Result<Vec<T>, sqlx::Error> {
        self.record(query);
        match self.fail_rows {
            Some(f) => Err(f.error()),
            None => Ok(rows.to_vec()),
        }
    }
}

#[async_trait]
impl GateStore for FakeStore {
    async fn server_version(&self) -> Result<String, sqlx::Error> {
        match self.fail_version {
            Some(f) => Err(f.error()),
            None => Ok("8.0.36-fake".to_string()),
        }
    }

    async fn count(&self, query: &QueryBuf) -> Result<u64, sqlx::Error> {
        self.record(query);
        match self.fail_count {
            Some(f) => Err(f.error()),
            None => Ok(self
                .total
                .unwrap_or((self.tax_rates.len() + self.configs.len()) as u64)),
        }
    }

    async fn tax_rates(&self, query: &QueryBuf) -> Result<Vec<TaxRate>, sqlx::Error> {
        self.rows(query, &self.tax_rates)
    }

    async fn gate_configs(&self, query: &QueryBuf) -> Result<Vec<GatewayConfig>, sqlx::Error> {
        self.rows(query, &self.configs)
    }

    async fn gates(&self, query: &QueryBuf) -> Result<Vec<GatewayInstance>, sqlx::Error> {
        self.rows(query, &self.gates)
    }

    async fn ping(&self) -> Result<(), sqlx::Error> {
        if self.fail_ping {
            Err(sqlx::Error::PoolTimedOut)
        } else {
            Ok(())
        }
    }
}

pub fn router(store: &Arc<FakeStore>, home: HomeListing) -> Router {
    let state = AppState {
        store: Arc::clone(store) as Arc<dyn GateStore>,
    };
    app(state, home)
}

pub struct TestResponse {
    pub status: u16,
    pub content_type: String,
    pub body: String,
}

pub async fn get(router: Router, uri: &str) -> TestResponse {
    let resp: Response<Body> = router
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = resp.status().as_u16();
    let content_type = resp
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    TestResponse {
        status,
        content_type,
        body: String::from_utf8(bytes.to_vec()).unwrap(),
    }
}
