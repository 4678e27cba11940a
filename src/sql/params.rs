//! Positional parameters and binding onto sqlx MySQL queries.

use sqlx::mysql::{MySql, MySqlArguments};
use sqlx::query::{Query, QueryScalar};

/// A value bound to a `?` placeholder.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BindValue {
    /// Filter input, bound verbatim; MySQL coerces it for numeric columns.
    Text(String),
    /// LIMIT / OFFSET.
    Unsigned(u64),
}

impl From<&str> for BindValue {
    fn from(s: &str) -> Self {
        BindValue::Text(s.to_string())
    }
}

impl From<u64> for BindValue {
    fn from(n: u64) -> Self {
        BindValue::Unsigned(n)
    }
}

/// Binds in order; placeholder order is the order `params` was built in.
pub fn bind_all<'q>(
    mut query: Query<'q, MySql, MySqlArguments>,
    params: &'q [BindValue],
) -> Query<'q, MySql, MySqlArguments> {
    for p in params {
        query = match p {
            BindValue::Text(s) => query.bind(s.as_str()),
            BindValue::Unsigned(n) => query.bind(*n),
        };
    }
    query
}

/// [`bind_all`] for scalar queries such as `COUNT(*)`.
pub fn bind_all_scalar<'q, O>(
    mut query: QueryScalar<'q, MySql, O, MySqlArguments>,
    params: &'q [BindValue],
) -> QueryScalar<'q, MySql, O, MySqlArguments> {
    for p in params {
        query = match p {
            BindValue::Text(s) => query.bind(s.as_str()),
            BindValue::Unsigned(n) => query.bind(*n),
        };
    }
    query
}
