//! Core domain types for the fitness dashboard.
//!
//! This module defines the fundamental types used throughout the system:
//! - Exercise measures and prescriptions
//! - Exercise-log and body-metric rows
//! - The named tables rows are stored in

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Placeholder stored in the weight column when no load was recorded
pub const NO_WEIGHT: &str = "N/A";

/// Date format used in every stored row
pub const DATE_FORMAT: &str = "%Y-%m-%d";

// ============================================================================
// Measure Types
// ============================================================================

/// How the work of a set is counted
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum MeasureKind {
    Repetitions,
    DurationSeconds,
}

impl MeasureKind {
    /// Prompt label for an amount of this kind
    pub fn label(&self) -> &'static str {
        match self {
            MeasureKind::Repetitions => "Repetitions",
            MeasureKind::DurationSeconds => "Duration (seconds)",
        }
    }
}

/// Amount performed per set, tagged with its unit
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "amount", rename_all = "snake_case")]
pub enum Measure {
    Repetitions(u32),
    DurationSeconds(u32),
}

impl Measure {
    /// Raw amount, regardless of unit
    pub fn amount(&self) -> u32 {
        match self {
            Measure::Repetitions(n) | Measure::DurationSeconds(n) => *n,
        }
    }

    pub fn kind(&self) -> MeasureKind {
        match self {
            Measure::Repetitions(_) => MeasureKind::Repetitions,
            Measure::DurationSeconds(_) => MeasureKind::DurationSeconds,
        }
    }

    /// Same unit, different amount
    pub fn with_amount(&self, amount: u32) -> Self {
        Self::of_kind(self.kind(), amount)
    }

    pub fn of_kind(kind: MeasureKind, amount: u32) -> Self {
        match kind {
            MeasureKind::Repetitions => Measure::Repetitions(amount),
            MeasureKind::DurationSeconds => Measure::DurationSeconds(amount),
        }
    }
}

impl fmt::Display for Measure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Measure::Repetitions(n) => write!(f, "{} reps", n),
            Measure::DurationSeconds(n) => write!(f, "{} s", n),
        }
    }
}

// ============================================================================
// Catalog Types
// ============================================================================

/// Default prescription for an exercise
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExercisePrescription {
    pub muscle: String,
    pub sets: u32,
    pub measure: Measure,
}

/// A named catalog entry
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct CatalogEntry {
    pub name: String,
    pub prescription: ExercisePrescription,
}

// ============================================================================
// Row Types
// ============================================================================

/// One performed exercise, as written to the exercise log
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExerciseLogRow {
    pub date: NaiveDate,
    pub exercise: String,
    pub sets: u32,
    pub measure: Measure,
    pub muscle: String,
    /// `N/A` or free-form load text such as "60 kg"
    pub weight: String,
}

impl ExerciseLogRow {
    /// Build a row; a blank weight is stored as `N/A`
    pub fn new(
        date: NaiveDate,
        exercise: impl Into<String>,
        sets: u32,
        measure: Measure,
        muscle: impl Into<String>,
        weight: Option<&str>,
    ) -> Self {
        let weight = match weight.map(str::trim) {
            Some(w) if !w.is_empty() => w.to_string(),
            _ => NO_WEIGHT.to_string(),
        };
        Self {
            date,
            exercise: exercise.into(),
            sets,
            measure,
            muscle: muscle.into(),
            weight,
        }
    }

    pub fn has_weight(&self) -> bool {
        self.weight != NO_WEIGHT
    }

    /// Cells in exercise-log column order
    pub fn to_cells(&self) -> Vec<String> {
        vec![
            self.date.format(DATE_FORMAT).to_string(),
            self.exercise.clone(),
            self.sets.to_string(),
            self.measure.amount().to_string(),
            self.muscle.clone(),
            self.weight.clone(),
        ]
    }

    /// Human-readable summary line
    pub fn describe(&self) -> String {
        let mut line = format!(
            "{} - {} sets of {} ({})",
            self.exercise,
            self.sets,
            self.measure.amount(),
            self.muscle
        );
        if self.has_weight() {
            line.push_str(&format!(", Weight: {}", self.weight));
        }
        line
    }
}

/// One day's calorie intake and body weight
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct BodyMetricRow {
    pub date: NaiveDate,
    pub calories: u32,
    pub body_weight: f64,
}

impl BodyMetricRow {
    /// Cells in body-metrics column order
    pub fn to_cells(&self) -> Vec<String> {
        vec![
            self.date.format(DATE_FORMAT).to_string(),
            self.calories.to_string(),
            self.body_weight.to_string(),
        ]
    }
}

// ============================================================================
// Table Types
// ============================================================================

/// The two tables held by the store
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Table {
    ExerciseLog,
    BodyMetrics,
}

impl Table {
    /// Column headers in stored order
    pub fn headers(&self) -> &'static [&'static str] {
        match self {
            Table::ExerciseLog => &["Date", "Exercise", "Sets", "Rep", "Muscle", "Weight"],
            Table::BodyMetrics => &["Date", "Calories", "Weight"],
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Table::ExerciseLog => "exercise_log",
            Table::BodyMetrics => "body_metrics",
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, DATE_FORMAT).unwrap()
    }

    #[test]
    fn test_blank_weight_becomes_placeholder() {
        let row = ExerciseLogRow::new(
            date("2024-01-01"),
            "Plank",
            3,
            Measure::DurationSeconds(30),
            "Core",
            Some("  "),
        );
        assert_eq!(row.weight, NO_WEIGHT);
        assert!(!row.has_weight());
    }

    #[test]
    fn test_cells_follow_header_order() {
        let row = ExerciseLogRow::new(
            date("2024-01-02"),
            "Barbell Squats",
            4,
            Measure::Repetitions(8),
            "Quads",
            Some("60 kg"),
        );
        assert_eq!(row.to_cells().len(), Table::ExerciseLog.headers().len());
        assert_eq!(
            row.to_cells(),
            vec!["2024-01-02", "Barbell Squats", "4", "8", "Quads", "60 kg"]
        );
    }

    #[test]
    fn test_describe_mentions_weight_only_when_present() {
        let mut row = ExerciseLogRow::new(
            date("2024-01-02"),
            "Pull-ups",
            3,
            Measure::Repetitions(8),
            "Back",
            None,
        );
        assert_eq!(row.describe(), "Pull-ups - 3 sets of 8 (Back)");

        row.weight = "10 kg".into();
        assert_eq!(row.describe(), "Pull-ups - 3 sets of 8 (Back), Weight: 10 kg");
    }

    #[test]
    fn test_measure_keeps_kind() {
        let plank = Measure::DurationSeconds(30);
        assert_eq!(plank.with_amount(45), Measure::DurationSeconds(45));
        assert_eq!(plank.kind().label(), "Duration (seconds)");
    }
}
