//! Values bound to a statement out-of-band from its text.

use sqlx::postgres::{PgArguments, Postgres};
use sqlx::query::Query;
use std::fmt;

/// A value that can be bound to a PostgreSQL statement.
#[derive(Clone, PartialEq)]
pub enum SqlParam {
    Null,
    Int(i64),
    Text(String),
    /// Bound like `Text`, but never printed (password hashes).
    Redacted(String),
}

impl fmt::Debug for SqlParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SqlParam::Null => f.write_str("NULL"),
            SqlParam::Int(n) => write!(f, "{}", n),
            SqlParam::Text(s) => write!(f, "{:?}", s),
            SqlParam::Redacted(_) => f.write_str("<redacted>"),
        }
    }
}

impl From<i64> for SqlParam {
    fn from(n: i64) -> Self {
        SqlParam::Int(n)
    }
}

impl From<String> for SqlParam {
    fn from(s: String) -> Self {
        SqlParam::Text(s)
    }
}

impl From<&str> for SqlParam {
    fn from(s: &str) -> Self {
        SqlParam::Text(s.to_string())
    }
}

impl From<Option<String>> for SqlParam {
    fn from(v: Option<String>) -> Self {
        v.map(SqlParam::Text).unwrap_or(SqlParam::Null)
    }
}

/// Bind every param in order ($1, $2, ...), each with its native PostgreSQL type.
pub fn bind_params<'q>(
    mut query: Query<'q, Postgres, PgArguments>,
    params: &'q [SqlParam],
) -> Query<'q, Postgres, PgArguments> {
    for p in params {
        query = match p {
            SqlParam::Null => query.bind(None::<String>),
            SqlParam::Int(n) => query.bind(*n),
            SqlParam::Text(s) | SqlParam::Redacted(s) => query.bind(s.as_str()),
        };
    }
    query
}
