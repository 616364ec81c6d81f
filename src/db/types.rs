//! Query result types
//!
//! What the database hands back from an execution. The editor and tree
//! never look inside; only the results pane renders it.

use std::time::Duration;

/// Rows and columns returned by one execution
#[derive(Debug, Clone, Default)]
pub struct QueryResults {
    pub columns: Vec<ColumnDef>,
    pub rows: Vec<Row>,
    pub execution_time: Duration,
}

impl QueryResults {
    pub fn new(columns: Vec<ColumnDef>, rows: Vec<Row>, execution_time: Duration) -> Self {
        Self {
            columns,
            rows,
            execution_time,
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// One-line summary for the status line, e.g. `3 rows (12ms)`.
    pub fn summary(&self) -> String {
        let n = self.row_count();
        format!(
            "{} row{} ({}ms)",
            n,
            if n == 1 { "" } else { "s" },
            self.execution_time.as_millis()
        )
    }
}

/// A result column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDef {
    pub name: String,
    pub data_type: DataType,
}

impl ColumnDef {
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
        }
    }
}

/// Column types the results pane distinguishes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataType {
    SmallInt,
    Integer,
    BigInt,
    Real,
    Double,
    Numeric,
    Text,
    Boolean,
    Date,
    Time,
    Timestamp,
    TimestampTz,
    Interval,
    Json,
    Jsonb,
    Bytea,
    Uuid,
    Array(Box<DataType>),
    Unknown(String),
}

impl DataType {
    /// Whether values of this type should be right-aligned.
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            DataType::SmallInt
                | DataType::Integer
                | DataType::BigInt
                | DataType::Real
                | DataType::Double
                | DataType::Numeric
        )
    }
}

/// One result row, values in column order
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub values: Vec<CellValue>,
}

/// A single value
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Null,
    Integer(i64),
    Float(f64),
    Text(String),
    Boolean(bool),
    Json(serde_json::Value),
    Binary(Vec<u8>),
    DateTime(String),
    Uuid(String),
    Array(Vec<CellValue>),
}

impl CellValue {
    /// Text shown in a cell, cut to `max_chars` characters with `...`.
    pub fn display_string(&self, max_chars: usize) -> String {
        let full = match self {
            CellValue::Null => "NULL".to_string(),
            CellValue::Integer(i) => i.to_string(),
            CellValue::Float(f) => f.to_string(),
            CellValue::Text(s) | CellValue::DateTime(s) | CellValue::Uuid(s) => s.clone(),
            CellValue::Boolean(b) => b.to_string(),
            CellValue::Json(v) => v.to_string(),
            CellValue::Binary(b) => format!("<binary {} bytes>", b.len()),
            CellValue::Array(items) => {
                let parts: Vec<String> = items.iter().map(|v| v.display_string(usize::MAX)).collect();
                format!("{{{}}}", parts.join(","))
            }
        };

        // newlines would break the table grid
        let full = full.replace('\n', " ");
        if full.chars().count() > max_chars {
            let kept: String = full.chars().take(max_chars.saturating_sub(3)).collect();
            format!("{}...", kept)
        } else {
            full
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_truncates_by_chars() {
        let val = CellValue::Text("Hello, world!".to_string());
        assert_eq!(val.display_string(5), "He...");
        assert_eq!(val.display_string(100), "Hello, world!");
        let accented = CellValue::Text("éééééé".to_string());
        assert_eq!(accented.display_string(5), "éé...");
    }

    #[test]
    fn test_display_flattens_newlines() {
        let val = CellValue::Text("a\nb".to_string());
        assert_eq!(val.display_string(10), "a b");
    }

    #[test]
    fn test_null_and_array_display() {
        assert!(CellValue::Null.is_null());
        assert_eq!(CellValue::Null.display_string(10), "NULL");
        let arr = CellValue::Array(vec![CellValue::Integer(1), CellValue::Integer(2)]);
        assert_eq!(arr.display_string(100), "{1,2}");
    }

    #[test]
    fn test_summary_pluralises() {
        let mut results = QueryResults::new(
            vec![ColumnDef::new("id", DataType::Integer)],
            vec![Row {
                values: vec![CellValue::Integer(1)],
            }],
            Duration::from_millis(12),
        );
        assert_eq!(results.summary(), "1 row (12ms)");
        results.rows.clear();
        assert_eq!(results.summary(), "0 rows (12ms)");
    }

    #[test]
    fn test_numeric_types() {
        assert!(DataType::BigInt.is_numeric());
        assert!(!DataType::Text.is_numeric());
    }
}
