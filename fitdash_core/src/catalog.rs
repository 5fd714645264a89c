//! Default exercise catalog.
//!
//! The catalog maps exercise names to their muscle group and default
//! prescription. It keeps insertion order so choice lists are stable.

use crate::types::*;
use crate::{Error, Result};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Cached default catalog - built once and reused across all operations
static DEFAULT_CATALOG: Lazy<Catalog> = Lazy::new(build_default_catalog_internal);

/// Get a reference to the cached default catalog
pub fn get_default_catalog() -> &'static Catalog {
    &DEFAULT_CATALOG
}

/// Builds the default catalog
///
/// Prefer `get_default_catalog()` unless the catalog is about to be extended.
pub fn build_default_catalog() -> Catalog {
    build_default_catalog_internal()
}

/// Ordered, immutable lookup table of exercises
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
    index: HashMap<String, usize>,
}

impl Catalog {
    /// Build a catalog from entries; a repeated name replaces the earlier
    /// prescription but keeps its position
    pub fn from_entries(entries: impl IntoIterator<Item = CatalogEntry>) -> Self {
        let mut catalog = Catalog::default();
        for entry in entries {
            catalog.insert(entry);
        }
        catalog
    }

    /// Default catalog extended with user-defined exercises
    pub fn with_custom(custom: impl IntoIterator<Item = CatalogEntry>) -> Self {
        let mut catalog = build_default_catalog();
        for entry in custom {
            tracing::debug!("Adding custom exercise '{}'", entry.name);
            catalog.insert(entry);
        }
        catalog
    }

    fn insert(&mut self, entry: CatalogEntry) {
        match self.index.get(&entry.name) {
            Some(&pos) => self.entries[pos] = entry,
            None => {
                self.index.insert(entry.name.clone(), self.entries.len());
                self.entries.push(entry);
            }
        }
    }

    /// Prescription for an exercise
    pub fn lookup(&self, name: &str) -> Result<&ExercisePrescription> {
        self.index
            .get(name)
            .map(|&pos| &self.entries[pos].prescription)
            .ok_or_else(|| Error::UnknownExercise(name.to_string()))
    }

    /// Exercise names in catalog order
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.name.as_str()).collect()
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Unit an exercise is measured in; unknown exercises count repetitions
    pub fn measure_kind(&self, name: &str) -> MeasureKind {
        self.lookup(name)
            .map(|p| p.measure.kind())
            .unwrap_or(MeasureKind::Repetitions)
    }

    /// Log row built from the default prescription
    pub fn prescribe(&self, name: &str, date: NaiveDate) -> Result<ExerciseLogRow> {
        let p = self.lookup(name)?;
        Ok(ExerciseLogRow::new(
            date,
            name,
            p.sets,
            p.measure,
            p.muscle.clone(),
            None,
        ))
    }

    /// Validate the catalog for consistency and completeness
    ///
    /// Returns a list of validation errors, or empty Vec if valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        for entry in &self.entries {
            let name = &entry.name;
            let p = &entry.prescription;
            if name.trim().is_empty() {
                errors.push("Exercise has empty name".to_string());
            }
            if p.muscle.trim().is_empty() {
                errors.push(format!("Exercise '{}' has empty muscle group", name));
            }
            if p.sets == 0 {
                errors.push(format!("Exercise '{}' prescribes zero sets", name));
            }
            if p.measure.amount() == 0 {
                errors.push(format!("Exercise '{}' prescribes a zero amount", name));
            }
        }

        errors
    }
}

fn entry(name: &str, muscle: &str, sets: u32, measure: Measure) -> CatalogEntry {
    CatalogEntry {
        name: name.into(),
        prescription: ExercisePrescription {
            muscle: muscle.into(),
            sets,
            measure,
        },
    }
}

/// Internal function that actually builds the catalog
fn build_default_catalog_internal() -> Catalog {
    use Measure::*;

    Catalog::from_entries([
        entry("Barbell Squats", "Quads", 4, Repetitions(8)),
        entry("Hip Thrusts", "Glutes", 3, Repetitions(8)),
        entry("Standing Calf Raise", "Calves", 4, Repetitions(12)),
        entry("Cable Crunches", "Core", 3, Repetitions(12)),
        // Held for time rather than counted
        entry("Plank", "Core", 3, DurationSeconds(30)),
        entry("Pull-ups", "Back", 3, Repetitions(8)),
        entry("Barbell Rows", "Back", 3, Repetitions(8)),
        entry("Incline Dumbbell Curls", "Biceps", 3, Repetitions(8)),
    ])
}
