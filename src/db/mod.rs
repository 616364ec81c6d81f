//! Database collaborator
//!
//! The console only needs three things from a database: its name, its table
//! names, and a way to run SQL. Everything else lives behind [`Database`],
//! which also lets tests drive the panes with a mock.

pub mod postgres;
pub mod schema;
pub mod types;

pub use postgres::PostgresProvider;
pub use schema::{FlatEntry, NodeId, SchemaTree, Selection, TreeNode, discover};
pub use types::{CellValue, ColumnDef, DataType, QueryResults, Row};

use crate::error::DbResult;

/// Database operations used by the schema tree and the executor
#[allow(async_fn_in_trait)]
pub trait Database: Send + Sync {
    /// Name of the connected database (the tree's root title).
    async fn name(&self) -> DbResult<String>;

    /// Table names to list under the root.
    async fn list_tables(&self) -> DbResult<Vec<String>>;

    /// Run a statement and collect its rows.
    async fn execute_query(&self, sql: &str) -> DbResult<QueryResults>;
}
