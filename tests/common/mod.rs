//! Common test utilities and helpers
//!
//! A scripted in-memory [`Database`] so the panes can be driven end to end
//! without a server.

#![allow(dead_code)]

use std::sync::Mutex;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use sqlpane::config::Settings;
use sqlpane::db::{
    CellValue, ColumnDef, DataType, Database, QueryResults, Row, SchemaTree,
};
use sqlpane::error::{DbError, DbResult};

/// Mock database with canned answers. Every executed statement is recorded.
pub struct MockDatabase {
    pub name: DbResult<String>,
    pub tables: DbResult<Vec<String>>,
    pub results: DbResult<QueryResults>,
    pub executed: Mutex<Vec<String>>,
}

impl MockDatabase {
    /// A database called `sample` with `users` and `orders`.
    pub fn sample() -> Self {
        Self {
            name: Ok("sample".to_string()),
            tables: Ok(vec!["users".to_string(), "orders".to_string()]),
            results: Ok(one_row_results()),
            executed: Mutex::new(Vec::new()),
        }
    }

    pub fn with_name_error(mut self, msg: &str) -> Self {
        self.name = Err(DbError::SchemaLoadFailed(msg.to_string()));
        self
    }

    pub fn with_tables_error(mut self, msg: &str) -> Self {
        self.tables = Err(DbError::SchemaLoadFailed(msg.to_string()));
        self
    }

    pub fn with_query_error(mut self, msg: &str) -> Self {
        self.results = Err(DbError::QueryFailed(msg.to_string()));
        self
    }

    pub fn executed(&self) -> Vec<String> {
        self.executed.lock().unwrap().clone()
    }
}

impl Database for MockDatabase {
    async fn name(&self) -> DbResult<String> {
        self.name.clone()
    }

    async fn list_tables(&self) -> DbResult<Vec<String>> {
        self.tables.clone()
    }

    async fn execute_query(&self, sql: &str) -> DbResult<QueryResults> {
        self.executed.lock().unwrap().push(sql.to_string());
        self.results.clone()
    }
}

/// `id | name` with a single row.
pub fn one_row_results() -> QueryResults {
    QueryResults::new(
        vec![
            ColumnDef::new("id", DataType::Integer),
            ColumnDef::new("name", DataType::Text),
        ],
        vec![Row {
            values: vec![CellValue::Integer(1), CellValue::Text("Alice".to_string())],
        }],
        std::time::Duration::from_millis(3),
    )
}

pub fn sample_tree() -> SchemaTree {
    SchemaTree::from_tables("sample", &["users", "orders"])
}

pub fn settings() -> Settings {
    Settings::default()
}

pub fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

pub fn ctrl(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
}
