//! Schema tree
//!
//! Database -> tables -> per-table query shortcuts, stored as an arena of
//! nodes addressed by [`NodeId`]. The flat display list is derived from the
//! open/closed state and rebuilt in full after every toggle.

use crate::db::Database;
use crate::error::{DbError, DbResult};
use tracing::{debug, info, warn};

/// Title of the root node when no schema could be discovered.
pub const PLACEHOLDER_TITLE: &str = "No connection";

/// Stable index of a node in its tree's arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// A node of the schema tree
#[derive(Debug, Clone)]
pub struct TreeNode {
    pub title: String,
    pub children: Vec<NodeId>,
    pub parent: Option<NodeId>,
    pub is_open: bool,
    /// SQL loaded into the editor when this node is selected
    pub query: Option<String>,
}

impl TreeNode {
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// One row of the flattened tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatEntry {
    pub id: NodeId,
    pub title: String,
    pub level: usize,
    pub is_open: bool,
    pub is_leaf: bool,
}

/// What selecting a flat entry did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// The node carries a query; nothing was toggled.
    LoadQuery(String),
    /// The node was opened or closed.
    Toggled,
}

/// Per-table shortcut leaves, in display order.
const TABLE_LEAVES: [(&str, fn(&str) -> String); 3] = [
    ("list", list_query),
    ("column", column_query),
    ("foreign key", foreign_key_query),
];

/// Collapsible schema tree
#[derive(Debug, Clone)]
pub struct SchemaTree {
    nodes: Vec<TreeNode>,
    root: NodeId,
    flat: Vec<FlatEntry>,
}

impl SchemaTree {
    /// A tree holding a single closed root.
    pub fn new(root_title: impl Into<String>) -> Self {
        let mut tree = Self {
            nodes: vec![TreeNode {
                title: root_title.into(),
                children: Vec::new(),
                parent: None,
                is_open: false,
                query: None,
            }],
            root: NodeId(0),
            flat: Vec::new(),
        };
        tree.flatten();
        tree
    }

    /// Root named after the database, one child per table, three query
    /// leaves per table. Everything starts closed.
    pub fn from_tables<S: AsRef<str>>(database: &str, tables: &[S]) -> Self {
        let mut tree = Self::new(database);
        let root = tree.root;
        for table in tables {
            let table = table.as_ref();
            let table_id = tree.add_child(root, table, None);
            for (title, template) in TABLE_LEAVES {
                tree.add_child(table_id, title, Some(template(table)));
            }
        }
        tree.flatten();
        tree
    }

    /// Single childless root signalling that discovery failed.
    pub fn placeholder() -> Self {
        Self::new(PLACEHOLDER_TITLE)
    }

    /// Build from discovery results, degrading to the placeholder if either
    /// the name or the table listing failed.
    pub fn from_discovery(name: DbResult<String>, tables: DbResult<Vec<String>>) -> Self {
        match (name, tables) {
            (Ok(name), Ok(tables)) => Self::from_tables(&name, &tables),
            _ => Self::placeholder(),
        }
    }

    /// Append a child under `parent`. The flat list is not rebuilt.
    pub fn add_child(
        &mut self,
        parent: NodeId,
        title: impl Into<String>,
        query: Option<String>,
    ) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(TreeNode {
            title: title.into(),
            children: Vec::new(),
            parent: Some(parent),
            is_open: false,
            query,
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> Option<&TreeNode> {
        self.nodes.get(id.0)
    }

    /// Total number of nodes, open or not.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// The current flat display list.
    pub fn flat(&self) -> &[FlatEntry] {
        &self.flat
    }

    /// Recompute the flat list: pre-order, descending only into open nodes.
    pub fn flatten(&mut self) {
        let mut flat = Vec::with_capacity(self.nodes.len());
        self.visit(self.root, 0, &mut flat);
        self.flat = flat;
    }

    fn visit(&self, id: NodeId, level: usize, out: &mut Vec<FlatEntry>) {
        let node = &self.nodes[id.0];
        out.push(FlatEntry {
            id,
            title: node.title.clone(),
            level,
            is_open: node.is_open,
            is_leaf: node.is_leaf(),
        });
        if node.is_open {
            for &child in &node.children {
                self.visit(child, level + 1, out);
            }
        }
    }

    /// Flip a node's open state and rebuild the flat list.
    pub fn toggle(&mut self, id: NodeId) {
        let Some(node) = self.nodes.get_mut(id.0) else {
            return;
        };
        node.is_open = !node.is_open;
        debug!(title = %node.title, open = node.is_open, "tree node toggled");
        self.flatten();
    }

    /// The non-empty query carried by a node, if any.
    pub fn query_for(&self, id: NodeId) -> Option<&str> {
        self.node(id)
            .and_then(|n| n.query.as_deref())
            .filter(|q| !q.is_empty())
    }

    /// Select the flat entry at `index`: load its query if it has one,
    /// otherwise toggle it.
    pub fn select(&mut self, index: usize) -> Option<Selection> {
        let id = self.flat.get(index)?.id;
        if let Some(query) = self.query_for(id) {
            return Some(Selection::LoadQuery(query.to_string()));
        }
        self.toggle(id);
        Some(Selection::Toggled)
    }
}

/// Ask the database for its name and tables and build the tree.
///
/// Never fails: without a database, or on any error, the placeholder tree
/// comes back together with the error to report.
pub async fn discover<D: Database>(db: Option<&D>) -> (SchemaTree, Option<DbError>) {
    let Some(db) = db else {
        info!("no database connection, using placeholder tree");
        return (SchemaTree::placeholder(), Some(DbError::NotConnected));
    };

    let name = db.name().await;
    let tables = match &name {
        Ok(_) => db.list_tables().await,
        Err(e) => Err(e.clone()),
    };

    let error = match (&name, &tables) {
        (Err(e), _) | (_, Err(e)) => Some(e.clone()),
        _ => None,
    };
    match &error {
        Some(e) => warn!(error = %e, "schema discovery failed"),
        None => info!(
            tables = tables.as_ref().map_or(0, Vec::len),
            "schema discovered"
        ),
    }

    (SchemaTree::from_discovery(name, tables), error)
}

/// Double-quote an identifier.
pub fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Single-quote a string literal.
pub fn quote_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

pub fn list_query(table: &str) -> String {
    format!("SELECT * FROM {};", quote_ident(table))
}

pub fn column_query(table: &str) -> String {
    format!(
        "SELECT column_name, data_type, is_nullable, column_default\n\
         FROM information_schema.columns\n\
         WHERE table_schema = current_schema() AND table_name = {}\n\
         ORDER BY ordinal_position;",
        quote_literal(table)
    )
}

pub fn foreign_key_query(table: &str) -> String {
    format!(
        "SELECT kcu.column_name, ccu.table_name AS foreign_table, ccu.column_name AS foreign_column\n\
         FROM information_schema.table_constraints tc\n\
         JOIN information_schema.key_column_usage kcu\n  \
         ON tc.constraint_name = kcu.constraint_name AND tc.table_schema = kcu.table_schema\n\
         JOIN information_schema.constraint_column_usage ccu\n  \
         ON ccu.constraint_name = tc.constraint_name AND ccu.table_schema = tc.table_schema\n\
         WHERE tc.constraint_type = 'FOREIGN KEY'\n  \
         AND tc.table_schema = current_schema() AND tc.table_name = {};",
        quote_literal(table)
    )
}
