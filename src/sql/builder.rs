//! Builds parameterized COUNT and SELECT statements for the listing tables.
//! Identifiers come from static table descriptions only; values are always `?` parameters.

use super::params::BindValue;
use std::fmt;

/// Quote identifier for MySQL (safe: only from static table descriptions).
fn quoted(s: &str) -> String {
    format!("`{}`", s.replace('`', "``"))
}

fn column_list(columns: &[&str]) -> String {
    columns.iter().map(|c| quoted(c)).collect::<Vec<_>>().join(", ")
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<BindValue>,
}

/// How a filter value is compared against its column.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Match {
    /// `col = ?`
    Exact,
    /// `col LIKE ?` with the value wrapped in `%`.
    Contains,
}

/// One active filter: column, comparison, raw value.
#[derive(Clone, Copy, Debug)]
pub struct Condition<'a> {
    pub column: &'a str,
    pub op: Match,
    pub value: &'a str,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// Exactly `asc` or `desc`; anything else is `None`.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "asc" => Some(SortDirection::Asc),
            "desc" => Some(SortDirection::Desc),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }

    pub fn reversed(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// WHERE clause (with leading space, or empty) and its parameters in placeholder order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WhereClause {
    pub sql: String,
    pub params: Vec<BindValue>,
}

/// Conjunction of the given conditions, one parameter per condition, in input order.
pub fn where_clause(conditions: &[Condition<'_>]) -> WhereClause {
    let mut parts = Vec::with_capacity(conditions.len());
    let mut params = Vec::with_capacity(conditions.len());
    for c in conditions {
        match c.op {
            Match::Exact => {
                parts.push(format!("{} = ?", quoted(c.column)));
                params.push(BindValue::Text(c.value.to_string()));
            }
            Match::Contains => {
                parts.push(format!("{} LIKE ?", quoted(c.column)));
                params.push(BindValue::Text(format!("%{}%", c.value)));
            }
        }
    }
    let sql = if parts.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", parts.join(" AND "))
    };
    WhereClause { sql, params }
}

/// `SELECT COUNT(*)` sharing the listing's WHERE clause and parameters.
pub fn count(table: &str, filter: &WhereClause) -> QueryBuf {
    QueryBuf {
        sql: format!("SELECT COUNT(*) FROM {}{}", quoted(table), filter.sql),
        params: filter.params.clone(),
    }
}

/// One page of rows. `sort` must be a whitelisted column; LIMIT and OFFSET are appended as parameters.
pub fn select_page(
    table: &str,
    columns: &[&str],
    filter: &WhereClause,
    sort: &str,
    dir: SortDirection,
    limit: u64,
    offset: u64,
) -> QueryBuf {
    let mut params = filter.params.clone();
    params.push(limit.into());
    params.push(offset.into());
    QueryBuf {
        sql: format!(
            "SELECT {} FROM {}{} ORDER BY {} {} LIMIT ? OFFSET ?",
            column_list(columns),
            quoted(table),
            filter.sql,
            quoted(sort),
            dir.as_str().to_uppercase(),
        ),
        params,
    }
}

/// Unfiltered, unpaginated SELECT of the given columns.
pub fn select_all(table: &str, columns: &[&str]) -> QueryBuf {
    QueryBuf {
        sql: format!("SELECT {} FROM {}", column_list(columns), quoted(table)),
        params: Vec::new(),
    }
}
