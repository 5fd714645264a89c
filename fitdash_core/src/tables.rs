//! Typed views over store snapshots.
//!
//! Columns are located by header name. Rows that cannot be parsed are
//! logged and skipped rather than failing the whole table.

use crate::catalog::Catalog;
use crate::store::{Sheet, StoreResult, TabularStore};
use crate::types::*;
use chrono::NaiveDate;

/// Date layouts accepted when reading rows back
const READ_DATE_FORMATS: &[&str] = &[DATE_FORMAT, "%Y/%m/%d", "%Y-%m-%d %H:%M:%S"];

fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    READ_DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
}

fn parse_count(raw: &str) -> Option<u32> {
    raw.trim().parse().ok()
}

fn parse_weight(raw: &str) -> Option<f64> {
    raw.trim()
        .replace(',', ".")
        .parse()
        .ok()
        .filter(|w: &f64| w.is_finite() && *w >= 0.0)
}

fn cell(row: &[String], column: Option<usize>) -> &str {
    column
        .and_then(|c| row.get(c))
        .map(String::as_str)
        .unwrap_or("")
}

/// Full exercise-log history
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ExerciseLogTable {
    pub rows: Vec<ExerciseLogRow>,
    /// Whether the source carried a `Muscle` column at all
    pub has_muscle_column: bool,
}

impl ExerciseLogTable {
    /// Parse a sheet, recovering each row's measure kind from the catalog
    pub fn from_sheet(sheet: &Sheet, catalog: &Catalog) -> Self {
        let date_col = sheet.column("Date");
        let exercise_col = sheet.column("Exercise");
        let sets_col = sheet.column("Sets");
        let amount_col = sheet.column("Rep");
        let muscle_col = sheet.column("Muscle");
        let weight_col = sheet.column("Weight");

        let mut rows = Vec::with_capacity(sheet.len());
        for (i, raw) in sheet.rows.iter().enumerate() {
            let exercise = cell(raw, exercise_col).trim();
            let parsed = (
                parse_date(cell(raw, date_col)),
                parse_count(cell(raw, sets_col)),
                parse_count(cell(raw, amount_col)),
            );
            match parsed {
                (Some(date), Some(sets), Some(amount)) if !exercise.is_empty() => {
                    let measure = Measure::of_kind(catalog.measure_kind(exercise), amount);
                    let weight = cell(raw, weight_col);
                    rows.push(ExerciseLogRow::new(
                        date,
                        exercise,
                        sets,
                        measure,
                        cell(raw, muscle_col).trim(),
                        Some(weight),
                    ));
                }
                _ => tracing::warn!("Skipping unparsable exercise-log row {}: {:?}", i + 1, raw),
            }
        }

        Self {
            rows,
            has_muscle_column: muscle_col.is_some(),
        }
    }

    /// Fetch and parse the exercise log
    pub fn load<S: TabularStore + ?Sized>(store: &S, catalog: &Catalog) -> StoreResult<Self> {
        let sheet = store.read_all(Table::ExerciseLog)?;
        Ok(Self::from_sheet(&sheet, catalog))
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl From<Vec<ExerciseLogRow>> for ExerciseLogTable {
    fn from(rows: Vec<ExerciseLogRow>) -> Self {
        Self {
            rows,
            has_muscle_column: true,
        }
    }
}

/// Full body-metric history
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BodyMetricTable {
    pub rows: Vec<BodyMetricRow>,
}

impl BodyMetricTable {
    pub fn from_sheet(sheet: &Sheet) -> Self {
        let date_col = sheet.column("Date");
        let calories_col = sheet.column("Calories");
        let weight_col = sheet.column("Weight");

        let mut rows = Vec::with_capacity(sheet.len());
        for (i, raw) in sheet.rows.iter().enumerate() {
            let calories = match cell(raw, calories_col).trim() {
                "" => Some(0),
                c => parse_count(c),
            };
            match (
                parse_date(cell(raw, date_col)),
                calories,
                parse_weight(cell(raw, weight_col)),
            ) {
                (Some(date), Some(calories), Some(body_weight)) => rows.push(BodyMetricRow {
                    date,
                    calories,
                    body_weight,
                }),
                _ => tracing::warn!("Skipping unparsable body-metric row {}: {:?}", i + 1, raw),
            }
        }

        Self { rows }
    }

    /// Fetch and parse the body metrics
    pub fn load<S: TabularStore + ?Sized>(store: &S) -> StoreResult<Self> {
        let sheet = store.read_all(Table::BodyMetrics)?;
        Ok(Self::from_sheet(&sheet))
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl From<Vec<BodyMetricRow>> for BodyMetricTable {
    fn from(rows: Vec<BodyMetricRow>) -> Self {
        Self { rows }
    }
}
