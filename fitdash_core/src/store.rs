//! Tabular store abstraction.
//!
//! A store holds the exercise log and body metrics as plain rows of text
//! cells under a header row, the way a spreadsheet does. Typed views are
//! parsed from these snapshots in [`crate::tables`].

use crate::error::StoreError;
use crate::types::Table;

/// Result type for store operations
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Snapshot of one table: header row plus data rows
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Sheet {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Sheet {
    /// Empty sheet carrying the table's standard headers
    pub fn for_table(table: Table) -> Self {
        Self {
            headers: table.headers().iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    /// Position of a named column
    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h.trim() == name)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Store sink/source for the two dashboard tables
pub trait TabularStore {
    /// Every row of a table, in stored order
    fn read_all(&self, table: Table) -> StoreResult<Sheet>;

    /// Append a batch of rows as one write. Either every row lands or none do.
    fn append_many(&mut self, table: Table, rows: Vec<Vec<String>>) -> StoreResult<()>;

    /// Append a single row
    fn append_one(&mut self, table: Table, row: Vec<String>) -> StoreResult<()> {
        self.append_many(table, vec![row])
    }
}

/// Reject rows whose width does not match the table layout
pub fn check_width(table: Table, row: &[String]) -> StoreResult<()> {
    let expected = table.headers().len();
    if row.len() != expected {
        return Err(StoreError::MalformedRow(format!(
            "{} expects {} cells, got {}",
            table,
            expected,
            row.len()
        )));
    }
    Ok(())
}
