//! In-memory gateway and request helpers shared by the router tests.
#![allow(dead_code)]

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{Map, Value};
use shop_api::{app, AppState, JsonRow, SqlParam, SqlStore, StorageError, WriteOutcome};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

/// Columns carrying a uniqueness constraint, with the constraint name
/// PostgreSQL would report.
const UNIQUE: &[(&str, &str, &str)] = &[
    ("users", "username", "users_username_key"),
    ("users", "phone", "users_phone_key"),
];

#[derive(Default)]
struct Table {
    rows: Vec<JsonRow>,
    next_id: i64,
}

impl Table {
    fn push(&mut self, mut row: JsonRow) -> i64 {
        self.next_id += 1;
        let id = self.next_id;
        row.insert("id".into(), Value::from(id));
        self.rows.push(row);
        id
    }
}

/// Interprets the statements the handlers issue against in-memory tables.
pub struct MemoryStore {
    tables: Mutex<BTreeMap<String, Table>>,
    statements: AtomicUsize,
    failure: Mutex<Option<String>>,
    blind_precheck: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Arc<Self> {
        let tables = ["goods", "users", "evaluations", "collections"]
            .into_iter()
            .map(|t| (t.to_string(), Table::default()))
            .collect();
        Arc::new(MemoryStore {
            tables: Mutex::new(tables),
            statements: AtomicUsize::new(0),
            failure: Mutex::new(None),
            blind_precheck: AtomicBool::new(false),
        })
    }

    /// Insert a row directly, bypassing the statement counter. Returns its id.
    pub fn seed(&self, table: &str, row: Value) -> i64 {
        let Value::Object(row) = row else {
            panic!("seed rows must be objects");
        };
        self.tables.lock().unwrap().get_mut(table).unwrap().push(row)
    }

    pub fn rows(&self, table: &str) -> Vec<JsonRow> {
        self.tables.lock().unwrap()[table].rows.clone()
    }

    /// Statements issued through the gateway so far.
    pub fn statement_count(&self) -> usize {
        self.statements.load(Ordering::SeqCst)
    }

    /// Make every following statement fail with an engine error.
    pub fn fail_with(&self, message: &str) {
        *self.failure.lock().unwrap() = Some(message.to_string());
    }

    /// Make the `username = $1 OR phone = $2` lookup return nothing, as if a
    /// concurrent registration had not committed yet.
    pub fn blind_precheck(&self) {
        self.blind_precheck.store(true, Ordering::SeqCst);
    }

    fn begin(&self) -> Result<(), StorageError> {
        self.statements.fetch_add(1, Ordering::SeqCst);
        match self.failure.lock().unwrap().as_ref() {
            Some(msg) => Err(StorageError::Engine(msg.clone())),
            None => Ok(()),
        }
    }
}

fn param_value(p: &SqlParam) -> Value {
    match p {
        SqlParam::Null => Value::Null,
        SqlParam::Int(n) => Value::from(*n),
        SqlParam::Text(s) | SqlParam::Redacted(s) => Value::from(s.as_str()),
    }
}

/// `col = $n` against a row.
fn condition_holds(cond: &str, row: &JsonRow, params: &[SqlParam]) -> bool {
    let (col, placeholder) = cond.split_once(" = ").expect("condition shape");
    let index: usize = placeholder.trim_start_matches('$').parse().expect("placeholder");
    row.get(col) == Some(&param_value(&params[index - 1]))
}

#[async_trait]
impl SqlStore for MemoryStore {
    async fn fetch_all(&self, sql: &'static str, params: &[SqlParam]) -> Result<Vec<JsonRow>, StorageError> {
        self.begin()?;
        if sql == "SELECT 1" {
            let mut row = Map::new();
            row.insert("?column?".into(), Value::from(1));
            return Ok(vec![row]);
        }
        let rest = sql.strip_prefix("SELECT * FROM ").expect("unsupported read");
        let tables = self.tables.lock().unwrap();
        match rest.split_once(" WHERE ") {
            None => Ok(tables[rest].rows.clone()),
            Some((table, filter)) => {
                if filter.contains(" OR ") && self.blind_precheck.load(Ordering::SeqCst) {
                    return Ok(Vec::new());
                }
                Ok(tables[table]
                    .rows
                    .iter()
                    .filter(|row| filter.split(" OR ").any(|c| condition_holds(c, row, params)))
                    .cloned()
                    .collect())
            }
        }
    }

    async fn execute(&self, sql: &'static str, params: &[SqlParam]) -> Result<WriteOutcome, StorageError> {
        self.begin()?;
        let mut tables = self.tables.lock().unwrap();

        if let Some(rest) = sql.strip_prefix("INSERT INTO ") {
            let (table, rest) = rest.split_once(" (").expect("insert table");
            let (columns, _) = rest.split_once(')').expect("insert columns");
            let mut row = Map::new();
            for (col, p) in columns.split(", ").zip(params) {
                row.insert(col.to_string(), param_value(p));
            }
            let target = tables.get_mut(table).expect("known table");
            for (t, col, constraint) in UNIQUE {
                if *t == table && target.rows.iter().any(|r| r.get(*col) == row.get(*col)) {
                    return Err(StorageError::Duplicate {
                        constraint: Some(constraint.to_string()),
                        message: format!("duplicate key value violates unique constraint \"{}\"", constraint),
                    });
                }
            }
            let id = target.push(row);
            return Ok(WriteOutcome {
                last_insert_id: Some(id),
                rows_affected: 1,
            });
        }

        if let Some(rest) = sql.strip_prefix("DELETE FROM ") {
            let (table, _) = rest.split_once(" WHERE id = $1").expect("delete by id");
            let id = param_value(&params[0]);
            let target = tables.get_mut(table).expect("known table");
            let before = target.rows.len();
            target.rows.retain(|r| r.get("id") != Some(&id));
            let removed = (before - target.rows.len()) as u64;
            return Ok(WriteOutcome {
                last_insert_id: if removed > 0 { id.as_i64() } else { None },
                rows_affected: removed,
            });
        }

        panic!("unsupported write: {}", sql);
    }
}

pub fn router(store: &Arc<MemoryStore>) -> Router {
    router_with_detail(store, false)
}

pub fn router_with_detail(store: &Arc<MemoryStore>, expose_error_detail: bool) -> Router {
    let store: Arc<dyn SqlStore> = store.clone();
    app(AppState::new(store, expose_error_detail), 100 * 1024)
}

/// Send one request; the body is parsed as JSON when possible, otherwise
/// returned as a JSON string.
pub async fn send(router: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    send_request(router, request).await
}

pub async fn send_request(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = serde_json::from_slice(&bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
    (status, value)
}
