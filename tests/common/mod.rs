//! Scripted in-memory executor and request helpers shared by integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use db_explorer::sql::QueryBuf;
use db_explorer::{explorer_routes, load_catalog, AppState, Cell, ColumnMeta, ExecOutcome, Executor};
use serde_json::Value;
use std::collections::{BTreeMap, VecDeque};
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

/// Replays queued results in order and records every statement it receives.
#[derive(Default)]
pub struct ScriptedExecutor {
    pub tables: BTreeMap<String, Vec<ColumnMeta>>,
    pub broken_table: Option<String>,
    rows: Mutex<VecDeque<Result<Vec<Vec<Cell>>, sqlx::Error>>>,
    outcomes: Mutex<VecDeque<Result<ExecOutcome, sqlx::Error>>>,
    log: Mutex<Vec<QueryBuf>>,
}

impl ScriptedExecutor {
    pub fn with_table(mut self, name: &str, columns: Vec<ColumnMeta>) -> Self {
        self.tables.insert(name.to_string(), columns);
        self
    }

    pub fn push_rows(&self, rows: Vec<Vec<Cell>>) {
        self.rows.lock().unwrap().push_back(Ok(rows));
    }

    pub fn push_outcome(&self, rows_affected: u64, last_insert_id: u64) {
        self.outcomes.lock().unwrap().push_back(Ok(ExecOutcome {
            rows_affected,
            last_insert_id,
        }));
    }

    pub fn push_exec_error(&self, message: &str) {
        self.outcomes
            .lock()
            .unwrap()
            .push_back(Err(sqlx::Error::Protocol(message.to_string())));
    }

    pub fn push_query_error(&self, message: &str) {
        self.rows
            .lock()
            .unwrap()
            .push_back(Err(sqlx::Error::Decode(message.to_string().into())));
    }

    pub fn statements(&self) -> Vec<QueryBuf> {
        std::mem::take(&mut *self.log.lock().unwrap())
    }
}

#[async_trait]
impl Executor for ScriptedExecutor {
    async fn list_tables(&self) -> Result<Vec<String>, sqlx::Error> {
        Ok(self.tables.keys().cloned().collect())
    }

    async fn describe_columns(&self, table: &str) -> Result<Vec<ColumnMeta>, sqlx::Error> {
        if self.broken_table.as_deref() == Some(table) {
            return Err(sqlx::Error::Protocol(format!("cannot describe {}", table)));
        }
        Ok(self.tables.get(table).cloned().unwrap_or_default())
    }

    async fn execute(&self, q: &QueryBuf) -> Result<ExecOutcome, sqlx::Error> {
        self.log.lock().unwrap().push(q.clone());
        self.outcomes.lock().unwrap().pop_front().unwrap_or(Ok(ExecOutcome::default()))
    }

    async fn query(&self, q: &QueryBuf) -> Result<Vec<Vec<Cell>>, sqlx::Error> {
        self.log.lock().unwrap().push(q.clone());
        self.rows.lock().unwrap().pop_front().unwrap_or(Ok(Vec::new()))
    }

    async fn ping(&self) -> Result<(), sqlx::Error> {
        Ok(())
    }
}

pub fn column(name: &str, ty: &str, nullable: bool, key: &str) -> ColumnMeta {
    ColumnMeta {
        name: name.to_string(),
        column_type: ty.to_string(),
        is_nullable: if nullable { "YES" } else { "NO" }.to_string(),
        column_key: key.to_string(),
        column_default: None,
    }
}

/// `users(id PK int, name varchar(255) NOT NULL, bio text NULL)` plus a key-less `audit_log`.
pub fn sample_executor() -> ScriptedExecutor {
    ScriptedExecutor::default()
        .with_table(
            "users",
            vec![
                column("id", "int", false, "PRI"),
                column("name", "varchar(255)", false, ""),
                column("bio", "text", true, ""),
            ],
        )
        .with_table(
            "items",
            vec![
                column("id", "int", false, "PRI"),
                column("title", "varchar(255)", false, ""),
                column("price", "int", true, ""),
            ],
        )
        .with_table("audit_log", vec![column("line", "text", true, "")])
}

pub async fn app(executor: Arc<ScriptedExecutor>) -> Router {
    app_with_limit(executor, 1024 * 1024).await
}

pub async fn app_with_limit(executor: Arc<ScriptedExecutor>, body_limit: usize) -> Router {
    let catalog = load_catalog(executor.as_ref()).await.unwrap();
    explorer_routes(AppState::new(executor, catalog), body_limit)
}

pub async fn send(app: &Router, method: Method, uri: &str, body: &str) -> (StatusCode, Value) {
    let req = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::from(body.to_string()))
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}
