//! Core introspection types.
//!
//! ## Overview
//!
//! - **[`Table`]**: the loaded results file, rows keyed by collection id
//! - **[`ColumnSpec`]**: validated introspection parameters for one column,
//!   produced from raw options by [`ColumnSpec::resolve`]
//! - **[`ColumnEvaluator`]**: sanity validation and introspection of one
//!   column, producing a [`Verdict`]
//! - **[`IntrospectionSuite`]**: the ordered target columns run over a table,
//!   producing an [`IntrospectionReport`]
//!
//! ## Flow
//!
//! ```text
//! TargetColumn (raw options)
//!     └── ColumnSpec::resolve ── warnings ──┐
//!             └── ColumnEvaluator::evaluate │
//!                     ├── Skipped            ├── IntrospectionReport
//!                     ├── Evaluated(Verdict) ┘
//!                     └── Err(IntroError)  (ends the run)
//! ```

mod evaluator;
mod level;
mod result;
mod spec;
mod suite;
mod table;
mod value;

pub use evaluator::ColumnEvaluator;
pub use level::Level;
pub use result::{ColumnOutcome, IntrospectionIssue, IntrospectionReport, ReportMetrics, Verdict};
pub use spec::{ColumnSpec, OptionKind, ResolutionWarning, ResolvedSpec, SpecOption};
pub use suite::{evaluate, IntrospectionSuite, TargetColumn};
pub use table::{Column, Table, TableBuilder};
pub use value::CellValue;
