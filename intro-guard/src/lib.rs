//! # intro-guard - Results file introspection
//!
//! intro-guard inspects a tabular results file produced by a measurement
//! process and decides, per configured column, whether the column is *sane*
//! (every value lies inside its validation bounds) and whether a chosen
//! value is *acceptable* (inside numeric bounds, or containing / not
//! containing given text).
//!
//! ## Quick Start
//!
//! ```rust
//! use intro_guard::core::{evaluate, CellValue, Table, TargetColumn};
//! use serde_json::json;
//!
//! let table = Table::builder("Collection #", vec!["r1".into(), "r2".into()])
//!     .column("RMS", vec![CellValue::Number(0.2), CellValue::Number(0.4)])
//!     .build()?;
//!
//! let options = json!({"value_row": "r2", "acceptable_max": 0.5});
//! let targets = vec![TargetColumn::new("RMS", options.as_object().unwrap().clone())];
//!
//! let report = evaluate(&table, &targets)?;
//! assert!(report.verdict("RMS").unwrap().introspection_ok);
//! # Ok::<(), intro_guard::error::IntroError>(())
//! ```
//!
//! ## Outcomes
//!
//! - A target column missing from the table is skipped with a warning.
//! - A wrongly typed option is ignored with a warning.
//! - Failed introspection is reported, and the run moves on.
//! - Conflicting options, a sanity failure or a comparison value of the
//!   wrong type end the run with an [`error::IntroError`].
//!
//! ## Architecture
//!
//! - **`core`**: table model, option resolution, column evaluation, suites
//! - **`constraints`**: exclusive numeric fences and substring criteria
//! - **`sources`**: CSV loading through Arrow
//! - **`config`**: YAML / JSON configuration documents
//! - **`formatters`**: human and JSON report output
//! - **`logging`**: `tracing` subscriber setup

pub mod config;
pub mod constraints;
pub mod core;
pub mod error;
pub mod formatters;
pub mod logging;
pub mod prelude;
pub mod sources;

#[cfg(test)]
pub mod test_helpers;
