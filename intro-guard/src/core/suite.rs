//! Introspection suites: the ordered list of target columns run over a table.

use super::{
    ColumnEvaluator, ColumnOutcome, ColumnSpec, IntrospectionIssue, IntrospectionReport, Level,
    Table,
};
use crate::prelude::*;
use serde::de::{self, Deserializer};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{info, instrument, warn};

/// One configured target column with its raw, untyped options.
///
/// In configuration documents a target is a single-key mapping from the
/// column name to its options:
///
/// ```yaml
/// - RMS:
///     value_row: Averages
///     acceptable_max: 0.5
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TargetColumn {
    pub column: String,
    pub options: Map<String, Value>,
}

impl TargetColumn {
    pub fn new(column: impl Into<String>, options: Map<String, Value>) -> Self {
        Self {
            column: column.into(),
            options,
        }
    }
}

impl<'de> Deserialize<'de> for TargetColumn {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let entry = Map::<String, Value>::deserialize(deserializer)?;
        if entry.len() != 1 {
            return Err(de::Error::custom(format!(
                "each introspection target must name exactly one column, found {}",
                entry.len()
            )));
        }
        let Some((column, options)) = entry.into_iter().next() else {
            return Err(de::Error::custom("empty introspection target"));
        };
        let options = match options {
            Value::Object(map) => map,
            Value::Null => Map::new(),
            other => {
                return Err(de::Error::custom(format!(
                    "options for column '{column}' must be a mapping, found {other}"
                )))
            }
        };
        Ok(TargetColumn { column, options })
    }
}

impl Serialize for TargetColumn {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.column, &self.options)?;
        map.end()
    }
}

/// An ordered set of target columns evaluated against one table.
///
/// Columns are handled strictly in order. Missing columns are skipped with a
/// warning; the first fatal error (configuration conflict, sanity failure,
/// wrong value type) stops the run and no report is produced.
///
/// # Examples
///
/// ```rust
/// use intro_guard::core::{CellValue, IntrospectionSuite, Table, TargetColumn};
/// use serde_json::json;
///
/// let table = Table::builder("Collection #", vec!["r1".into(), "r2".into()])
///     .column("RMS", vec![CellValue::Number(0.2), CellValue::Number(0.4)])
///     .build()
///     .unwrap();
///
/// let options = json!({"value_row": "r2", "acceptable_max": 0.5});
/// let suite = IntrospectionSuite::new("results.csv")
///     .target(TargetColumn::new("RMS", options.as_object().unwrap().clone()));
///
/// let report = suite.run(&table).unwrap();
/// assert!(report.all_passed());
/// ```
#[derive(Debug, Clone, Default)]
pub struct IntrospectionSuite {
    name: String,
    targets: Vec<TargetColumn>,
}

impl IntrospectionSuite {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            targets: Vec::new(),
        }
    }

    /// Adds a target column.
    pub fn target(mut self, target: TargetColumn) -> Self {
        self.targets.push(target);
        self
    }

    /// Adds several target columns.
    pub fn targets(mut self, targets: impl IntoIterator<Item = TargetColumn>) -> Self {
        self.targets.extend(targets);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Runs every target column against `table`.
    #[instrument(skip_all, fields(suite = %self.name, targets = self.targets.len()))]
    pub fn run(&self, table: &Table) -> Result<IntrospectionReport> {
        let evaluator = ColumnEvaluator::new(table);
        let mut report = IntrospectionReport::new(&self.name);

        for target in &self.targets {
            // Existence first, so options of a misspelled column never abort the run
            if !table.has_column(&target.column) {
                warn!(
                    column = %target.column,
                    "Column does not exist in the table, check for spelling errors; skipping it"
                );
                report.add_issue(IntrospectionIssue {
                    column: target.column.clone(),
                    level: Level::Warning,
                    message: format!("column '{}' does not exist in the table", target.column),
                });
                report.add_outcome(ColumnOutcome::Skipped {
                    column: target.column.clone(),
                    reason: "column not found".to_string(),
                });
                continue;
            }

            let resolved = ColumnSpec::resolve(&target.column, &target.options, table)?;
            for warning in resolved.warnings {
                report.add_issue(warning.into());
            }

            let outcome = evaluator.evaluate(&resolved.spec)?;
            if let Some(verdict) = outcome.verdict().filter(|v| !v.introspection_ok) {
                report.add_issue(IntrospectionIssue {
                    column: verdict.column.clone(),
                    level: Level::Warning,
                    message: format!(
                        "value {} in row '{}' is not {}",
                        verdict.value, verdict.row, verdict.criteria
                    ),
                });
            }
            report.add_outcome(outcome);
        }

        info!(
            evaluated = report.metrics.evaluated,
            passed = report.metrics.passed,
            failed = report.metrics.failed,
            skipped = report.metrics.skipped,
            "Introspection finished"
        );
        Ok(report)
    }
}

/// Evaluates `targets` against `table` in order.
///
/// Shorthand for an unnamed [`IntrospectionSuite`].
pub fn evaluate(table: &Table, targets: &[TargetColumn]) -> Result<IntrospectionReport> {
    IntrospectionSuite::new("introspection")
        .targets(targets.iter().cloned())
        .run(table)
}
