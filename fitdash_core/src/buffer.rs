//! Session-scoped buffer of exercise-log rows awaiting commit.
//!
//! Rows are only ever appended. The buffer empties in exactly two ways: a
//! successful bulk commit, or an explicit reset. A failed commit leaves
//! every row in place so the user can retry without re-entering anything.

use crate::error::CommitError;
use crate::store::TabularStore;
use crate::types::{ExerciseLogRow, Table};
use uuid::Uuid;

#[derive(Debug)]
pub struct PendingEntryBuffer {
    session_id: Uuid,
    rows: Vec<ExerciseLogRow>,
}

impl Default for PendingEntryBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl PendingEntryBuffer {
    /// Start an empty buffer for a new session
    pub fn new() -> Self {
        let session_id = Uuid::new_v4();
        tracing::debug!(%session_id, "Started entry session");
        Self {
            session_id,
            rows: Vec::new(),
        }
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// Append a row. Callers guarantee sets and amount are at least 1.
    pub fn add(&mut self, row: ExerciseLogRow) {
        tracing::debug!(
            session_id = %self.session_id,
            "Buffered {} ({} pending)",
            row.exercise,
            self.rows.len() + 1
        );
        self.rows.push(row);
    }

    /// Pending rows in entry order
    pub fn list(&self) -> &[ExerciseLogRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Discard every pending row; returns how many were dropped
    pub fn reset(&mut self) -> usize {
        let dropped = self.rows.len();
        self.rows.clear();
        tracing::info!(session_id = %self.session_id, "Discarded {} pending rows", dropped);
        dropped
    }

    /// Write all pending rows to the exercise log as one batch
    ///
    /// On success the buffer is cleared and the number of committed rows is
    /// returned. On failure nothing is removed.
    pub fn commit<S: TabularStore + ?Sized>(&mut self, store: &mut S) -> Result<usize, CommitError> {
        if self.rows.is_empty() {
            return Err(CommitError::EmptyBuffer);
        }

        let batch: Vec<Vec<String>> = self.rows.iter().map(ExerciseLogRow::to_cells).collect();
        match store.append_many(Table::ExerciseLog, batch) {
            Ok(()) => {
                let committed = self.rows.len();
                self.rows.clear();
                tracing::info!(session_id = %self.session_id, "Committed {} rows", committed);
                Ok(committed)
            }
            Err(e) => {
                tracing::warn!(
                    session_id = %self.session_id,
                    "Commit of {} rows failed, keeping them: {}",
                    self.rows.len(),
                    e
                );
                Err(CommitError::Store(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::get_default_catalog;
    use crate::memory_store::MemoryStore;
    use crate::types::Measure;
    use chrono::NaiveDate;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn sample_rows() -> Vec<ExerciseLogRow> {
        let catalog = get_default_catalog();
        vec![
            catalog.prescribe("Barbell Squats", day(1)).unwrap(),
            catalog.prescribe("Plank", day(1)).unwrap(),
            ExerciseLogRow::new(day(1), "Pull-ups", 3, Measure::Repetitions(6), "Back", Some("5 kg")),
        ]
    }

    #[test]
    fn test_list_keeps_entry_order() {
        let mut buffer = PendingEntryBuffer::new();
        for row in sample_rows() {
            buffer.add(row);
        }
        let names: Vec<_> = buffer.list().iter().map(|r| r.exercise.as_str()).collect();
        assert_eq!(names, vec!["Barbell Squats", "Plank", "Pull-ups"]);
    }

    #[test]
    fn test_successful_commit_sends_rows_in_order_and_clears() {
        let mut store = MemoryStore::new();
        let mut buffer = PendingEntryBuffer::new();
        let rows = sample_rows();
        for row in rows.clone() {
            buffer.add(row);
        }

        let committed = buffer.commit(&mut store).unwrap();
        assert_eq!(committed, 3);
        assert!(buffer.is_empty());

        let expected: Vec<Vec<String>> = rows.iter().map(ExerciseLogRow::to_cells).collect();
        assert_eq!(store.rows(Table::ExerciseLog), expected.as_slice());
        assert_eq!(store.contacts(), 1);
    }

    #[test]
    fn test_failed_commit_leaves_buffer_intact() {
        crate::logging::init_test();
        let mut store = MemoryStore::new();
        store.fail_with("permission denied");

        let mut buffer = PendingEntryBuffer::new();
        for row in sample_rows() {
            buffer.add(row);
        }
        let before = buffer.list().to_vec();

        let err = buffer.commit(&mut store).unwrap_err();
        assert!(matches!(err, CommitError::Store(_)));
        assert!(err.to_string().contains("permission denied"));
        assert_eq!(buffer.list(), before.as_slice());
        assert!(store.rows(Table::ExerciseLog).is_empty());
    }

    #[test]
    fn test_retry_after_failure_commits_everything_once() {
        let mut store = MemoryStore::new();
        let mut buffer = PendingEntryBuffer::new();
        for row in sample_rows() {
            buffer.add(row);
        }

        store.fail_with("offline");
        assert!(buffer.commit(&mut store).is_err());

        store.recover();
        assert_eq!(buffer.commit(&mut store).unwrap(), 3);
        assert_eq!(store.rows(Table::ExerciseLog).len(), 3);
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_empty_commit_never_contacts_store() {
        let mut store = MemoryStore::new();
        let mut buffer = PendingEntryBuffer::new();

        let err = buffer.commit(&mut store).unwrap_err();
        assert!(matches!(err, CommitError::EmptyBuffer));
        assert!(err.is_warning());
        assert_eq!(store.contacts(), 0);
    }

    #[test]
    fn test_reset_discards_rows() {
        let mut buffer = PendingEntryBuffer::new();
        for row in sample_rows() {
            buffer.add(row);
        }
        assert_eq!(buffer.reset(), 3);
        assert!(buffer.is_empty());
    }
}
