#![forbid(unsafe_code)]

//! Core domain model and business logic for the Fitdash workout dashboard.
//!
//! This crate provides:
//! - Domain types (measures, prescriptions, log rows)
//! - Exercise catalog
//! - Tabular store trait with CSV and in-memory backends
//! - Session-scoped pending entry buffer and body-metric submission
//! - Dashboard aggregations

pub mod types;
pub mod error;
pub mod catalog;
pub mod config;
pub mod logging;
pub mod store;
pub mod workbook;
pub mod memory_store;
pub mod tables;
pub mod buffer;
pub mod body_metrics;
pub mod report;

// Re-export commonly used types
pub use error::{CommitError, Error, Result, StoreError};
pub use types::*;
pub use catalog::{build_default_catalog, get_default_catalog, Catalog};
pub use config::Config;
pub use store::{Sheet, TabularStore};
pub use workbook::CsvWorkbook;
pub use memory_store::MemoryStore;
pub use tables::{BodyMetricTable, ExerciseLogTable};
pub use buffer::PendingEntryBuffer;
pub use report::{MetricsReport, MuscleSummary, WeightGoal};
