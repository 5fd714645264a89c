//! Dashboard aggregations.
//!
//! Pure functions over fetched tables, recomputed on every render.

use crate::tables::{BodyMetricTable, ExerciseLogTable};
use crate::types::MeasureKind;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

/// Total amount per exercise across all history
///
/// Repetitions and seconds are summed into the same number, so a timed
/// exercise contributes its seconds. Use [`exercise_volume_by_measure`]
/// when the units must stay apart.
pub fn exercise_volume(table: &ExerciseLogTable) -> BTreeMap<String, u64> {
    let mut volume = BTreeMap::new();
    for row in &table.rows {
        *volume.entry(row.exercise.clone()).or_insert(0) += u64::from(row.measure.amount());
    }
    volume
}

/// Per-exercise totals, split by unit
pub fn exercise_volume_by_measure(
    table: &ExerciseLogTable,
) -> BTreeMap<MeasureKind, BTreeMap<String, u64>> {
    let mut volume: BTreeMap<MeasureKind, BTreeMap<String, u64>> = BTreeMap::new();
    for row in &table.rows {
        *volume
            .entry(row.measure.kind())
            .or_default()
            .entry(row.exercise.clone())
            .or_insert(0) += u64::from(row.measure.amount());
    }
    volume
}

/// Most frequently logged muscle group
///
/// Ties go to whichever maximal value appears first in the data. Blank
/// muscle cells are skipped rather than counted as a group of their own, so
/// a column of mostly blanks still reports the most common named muscle.
/// `None` when the column is missing or holds no named muscle.
pub fn top_muscle_group(table: &ExerciseLogTable) -> Option<String> {
    if !table.has_muscle_column {
        return None;
    }

    // (muscle, count) in first-seen order
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for row in &table.rows {
        let muscle = row.muscle.as_str();
        if muscle.is_empty() {
            continue;
        }
        match counts.iter_mut().find(|(m, _)| *m == muscle) {
            Some((_, n)) => *n += 1,
            None => counts.push((muscle, 1)),
        }
    }

    let best = counts.iter().map(|(_, n)| *n).max()?;
    counts
        .into_iter()
        .find(|(_, n)| *n == best)
        .map(|(m, _)| m.to_string())
}

/// Body weight over time, oldest first
///
/// The sort is stable, so entries sharing a date keep their stored order.
pub fn weight_trend(table: &BodyMetricTable) -> Vec<(NaiveDate, f64)> {
    let mut series: Vec<(NaiveDate, f64)> =
        table.rows.iter().map(|r| (r.date, r.body_weight)).collect();
    series.sort_by_key(|(date, _)| *date);
    series
}

/// Body weight of the chronologically last entry
pub fn latest_weight(table: &BodyMetricTable) -> Option<f64> {
    weight_trend(table).last().map(|(_, w)| *w)
}

/// Weight still to lose before reaching the target, never negative
pub fn weight_remaining(current: f64, target: f64) -> f64 {
    (current - target).max(0.0)
}

/// Current, target and remaining weight
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct WeightGoal {
    pub current: f64,
    pub target: f64,
    pub remaining: f64,
}

/// What the muscle-group panel can show
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
#[serde(tag = "status", content = "muscle", rename_all = "snake_case")]
pub enum MuscleSummary {
    Top(String),
    NoData,
    ColumnMissing,
}

/// Everything the metrics screen shows, computed in one pass
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct MetricsReport {
    pub exercise_volume: BTreeMap<String, u64>,
    pub top_muscle_group: MuscleSummary,
    pub weight_goal: Option<WeightGoal>,
    pub weight_trend: Vec<(NaiveDate, f64)>,
}

impl MetricsReport {
    pub fn build(exercise: &ExerciseLogTable, body: &BodyMetricTable, target_weight: f64) -> Self {
        let top_muscle_group = if !exercise.has_muscle_column {
            MuscleSummary::ColumnMissing
        } else {
            top_muscle_group(exercise).map_or(MuscleSummary::NoData, MuscleSummary::Top)
        };

        let weight_goal = latest_weight(body).map(|current| WeightGoal {
            current,
            target: target_weight,
            remaining: weight_remaining(current, target_weight),
        });

        Self {
            exercise_volume: exercise_volume(exercise),
            top_muscle_group,
            weight_goal,
            weight_trend: weight_trend(body),
        }
    }
}
