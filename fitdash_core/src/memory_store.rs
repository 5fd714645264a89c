//! In-process store backend.
//!
//! Holds tables in memory and can be told to fail, which makes the commit
//! contract testable without a real backend.

use crate::error::StoreError;
use crate::store::{check_width, Sheet, StoreResult, TabularStore};
use crate::types::Table;
use std::cell::Cell;
use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: HashMap<Table, Sheet>,
    failure: Option<String>,
    contacts: Cell<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a table with rows under its standard headers
    pub fn with_rows(mut self, table: Table, rows: Vec<Vec<String>>) -> Self {
        let mut sheet = Sheet::for_table(table);
        sheet.rows = rows;
        self.tables.insert(table, sheet);
        self
    }

    /// Seed a table with an arbitrary sheet (e.g. missing columns)
    pub fn with_sheet(mut self, table: Table, sheet: Sheet) -> Self {
        self.tables.insert(table, sheet);
        self
    }

    /// Make every following call fail with the given cause
    pub fn fail_with(&mut self, cause: impl Into<String>) {
        self.failure = Some(cause.into());
    }

    /// Stop failing
    pub fn recover(&mut self) {
        self.failure = None;
    }

    /// Number of calls made against this store, successful or not
    pub fn contacts(&self) -> usize {
        self.contacts.get()
    }

    /// Stored rows of a table
    pub fn rows(&self, table: Table) -> &[Vec<String>] {
        self.tables
            .get(&table)
            .map(|s| s.rows.as_slice())
            .unwrap_or(&[])
    }

    fn touch(&self) -> StoreResult<()> {
        self.contacts.set(self.contacts.get() + 1);
        match &self.failure {
            Some(cause) => Err(StoreError::Unavailable(cause.clone())),
            None => Ok(()),
        }
    }
}

impl TabularStore for MemoryStore {
    fn read_all(&self, table: Table) -> StoreResult<Sheet> {
        self.touch()?;
        Ok(self.tables.get(&table).cloned().unwrap_or_default())
    }

    fn append_many(&mut self, table: Table, rows: Vec<Vec<String>>) -> StoreResult<()> {
        self.touch()?;
        for row in &rows {
            check_width(table, row)?;
        }
        self.tables
            .entry(table)
            .or_insert_with(|| Sheet::for_table(table))
            .rows
            .extend(rows);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_is_sticky_until_recover() {
        let mut store = MemoryStore::new();
        store.fail_with("offline");

        let row = vec!["2024-01-01".to_string(), "2000".into(), "80".into()];
        assert!(store.append_one(Table::BodyMetrics, row.clone()).is_err());
        assert!(store.read_all(Table::BodyMetrics).is_err());

        store.recover();
        store.append_one(Table::BodyMetrics, row).unwrap();
        assert_eq!(store.rows(Table::BodyMetrics).len(), 1);
        assert_eq!(store.contacts(), 3);
    }

    #[test]
    fn test_unwritten_table_has_no_columns() {
        let store = MemoryStore::new();
        let sheet = store.read_all(Table::ExerciseLog).unwrap();
        assert!(sheet.headers.is_empty());
    }
}
