//! SQL literal rendering and INSERT statement building.
//!
//! All generated text flows through `SqlValue`, so quote characters in
//! faker-produced strings can never corrupt a statement.

use std::fmt;

/// A single SQL literal value.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Int(i64),
    Float(f64),
    Str(String),
    Bool(bool),
}

impl SqlValue {
    /// NULL for `None`, a quoted string otherwise.
    pub fn opt_str(value: Option<String>) -> Self {
        match value {
            Some(s) => SqlValue::Str(s),
            None => SqlValue::Null,
        }
    }
}

impl fmt::Display for SqlValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SqlValue::Null => write!(f, "NULL"),
            SqlValue::Int(n) => write!(f, "{}", n),
            SqlValue::Float(n) => write!(f, "{:.2}", n),
            SqlValue::Str(s) => write!(f, "'{}'", escape_string(s)),
            SqlValue::Bool(b) => write!(f, "{}", if *b { "TRUE" } else { "FALSE" }),
        }
    }
}

/// Escape a string for embedding in a single-quoted SQL literal.
fn escape_string(s: &str) -> String {
    s.replace('\'', "''")
}

/// Render one `(v1, v2, ...)` tuple.
pub fn values_tuple(values: &[SqlValue]) -> String {
    let rendered: Vec<String> = values.iter().map(|v| v.to_string()).collect();
    format!("({})", rendered.join(", "))
}

/// Render a single-row INSERT statement.
pub fn insert_statement(table: &str, columns: &[&str], values: &[SqlValue]) -> String {
    debug_assert_eq!(columns.len(), values.len());
    format!(
        "INSERT INTO {} ({}) VALUES {};",
        table,
        columns.join(", "),
        values_tuple(values)
    )
}

/// Render a multi-row INSERT statement, one tuple per line.
pub fn multi_row_insert(table: &str, columns: &[&str], rows: &[Vec<SqlValue>]) -> String {
    let tuples: Vec<String> = rows.iter().map(|r| values_tuple(r)).collect();
    format!(
        "INSERT INTO {} ({}) VALUES\n{};",
        table,
        columns.join(", "),
        tuples.join(",\n")
    )
}
