//! Single-row submission of calorie and body-weight entries.

use crate::error::CommitError;
use crate::store::TabularStore;
use crate::types::{BodyMetricRow, Table};

/// Validate and append one body-metric row
///
/// Both calories and body weight must be positive; otherwise the store is
/// not contacted. The row is borrowed, so after a store failure the caller
/// still holds it and can submit it again unchanged.
pub fn submit<S: TabularStore + ?Sized>(row: &BodyMetricRow, store: &mut S) -> Result<(), CommitError> {
    validate(row)?;

    store
        .append_one(Table::BodyMetrics, row.to_cells())
        .map_err(|e| {
            tracing::warn!("Body metric submission for {} failed: {}", row.date, e);
            CommitError::Store(e)
        })?;

    tracing::info!(
        "Recorded {} kcal and {} body weight for {}",
        row.calories,
        row.body_weight,
        row.date
    );
    Ok(())
}

/// Local checks only
pub fn validate(row: &BodyMetricRow) -> Result<(), CommitError> {
    if row.calories == 0 {
        return Err(CommitError::InvalidInput(
            "calorie intake must be greater than zero".into(),
        ));
    }
    if !row.body_weight.is_finite() || row.body_weight <= 0.0 {
        return Err(CommitError::InvalidInput(
            "body weight must be greater than zero".into(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory_store::MemoryStore;
    use chrono::NaiveDate;

    fn row(calories: u32, body_weight: f64) -> BodyMetricRow {
        BodyMetricRow {
            date: NaiveDate::from_ymd_opt(2024, 1, 3).unwrap(),
            calories,
            body_weight,
        }
    }

    #[test]
    fn test_submit_appends_one_row() {
        let mut store = MemoryStore::new();
        submit(&row(2200, 80.4), &mut store).unwrap();

        assert_eq!(
            store.rows(Table::BodyMetrics),
            &[vec!["2024-01-03".to_string(), "2200".into(), "80.4".into()]]
        );
    }

    #[test]
    fn test_zero_calories_never_contacts_store() {
        let mut store = MemoryStore::new();
        let err = submit(&row(0, 80.0), &mut store).unwrap_err();
        assert!(matches!(err, CommitError::InvalidInput(_)));
        assert_eq!(store.contacts(), 0);
    }

    #[test]
    fn test_zero_weight_never_contacts_store() {
        let mut store = MemoryStore::new();
        let err = submit(&row(1800, 0.0), &mut store).unwrap_err();
        assert!(matches!(err, CommitError::InvalidInput(_)));
        assert_eq!(store.contacts(), 0);

        assert!(validate(&row(1800, f64::NAN)).is_err());
    }

    #[test]
    fn test_failed_submit_can_be_retried_with_same_row() {
        let mut store = MemoryStore::new();
        let entry = row(2000, 79.9);

        store.fail_with("quota exceeded");
        let err = submit(&entry, &mut store).unwrap_err();
        assert!(matches!(err, CommitError::Store(_)));
        assert!(!err.is_warning());

        store.recover();
        submit(&entry, &mut store).unwrap();
        assert_eq!(store.rows(Table::BodyMetrics).len(), 1);
    }
}
