//! Introspection verdicts and reports.

use super::{CellValue, Level, ResolutionWarning};
use crate::constraints::Criteria;
use serde::{Deserialize, Serialize};

/// The outcome of evaluating one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    pub column: String,
    /// Row the comparison value was taken from
    pub row: String,
    /// The comparison value
    pub value: CellValue,
    /// Smallest numeric value in the column, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column_min: Option<f64>,
    /// Largest numeric value in the column, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column_max: Option<f64>,
    pub sanity_ok: bool,
    pub introspection_ok: bool,
    /// Criteria the comparison value was checked against
    pub criteria: Criteria,
}

impl Verdict {
    /// Returns true if both sanity and introspection passed.
    pub fn passed(&self) -> bool {
        self.sanity_ok && self.introspection_ok
    }
}

/// What happened to a configured target column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "lowercase")]
pub enum ColumnOutcome {
    /// The column was sanity-checked and introspected
    Evaluated(Verdict),
    /// The column could not be evaluated and was passed over
    Skipped { column: String, reason: String },
}

impl ColumnOutcome {
    pub fn column(&self) -> &str {
        match self {
            ColumnOutcome::Evaluated(verdict) => &verdict.column,
            ColumnOutcome::Skipped { column, .. } => column,
        }
    }

    pub fn verdict(&self) -> Option<&Verdict> {
        match self {
            ColumnOutcome::Evaluated(verdict) => Some(verdict),
            ColumnOutcome::Skipped { .. } => None,
        }
    }
}

/// A problem worth reporting that did not stop the run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntrospectionIssue {
    pub column: String,
    pub level: Level,
    pub message: String,
}

impl From<ResolutionWarning> for IntrospectionIssue {
    fn from(warning: ResolutionWarning) -> Self {
        Self {
            column: warning.column,
            level: Level::Warning,
            message: warning.message,
        }
    }
}

/// Counts over the outcomes of one report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportMetrics {
    /// Columns that produced a verdict
    pub evaluated: usize,
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
}

/// All outcomes of running the introspection suite over one table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntrospectionReport {
    /// Name of the suite, usually the results file path
    pub name: String,
    /// When the report was created (RFC 3339)
    pub timestamp: String,
    pub metrics: ReportMetrics,
    pub outcomes: Vec<ColumnOutcome>,
    pub issues: Vec<IntrospectionIssue>,
}

impl IntrospectionReport {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            metrics: ReportMetrics::default(),
            outcomes: Vec::new(),
            issues: Vec::new(),
        }
    }

    /// Records a column outcome and updates the metrics.
    pub fn add_outcome(&mut self, outcome: ColumnOutcome) {
        match &outcome {
            ColumnOutcome::Evaluated(verdict) => {
                self.metrics.evaluated += 1;
                if verdict.passed() {
                    self.metrics.passed += 1;
                } else {
                    self.metrics.failed += 1;
                }
            }
            ColumnOutcome::Skipped { .. } => self.metrics.skipped += 1,
        }
        self.outcomes.push(outcome);
    }

    pub fn add_issue(&mut self, issue: IntrospectionIssue) {
        self.issues.push(issue);
    }

    /// Returns true if every evaluated column passed.
    pub fn all_passed(&self) -> bool {
        self.metrics.failed == 0
    }

    /// Verdicts of the evaluated columns, in configuration order.
    pub fn verdicts(&self) -> impl Iterator<Item = &Verdict> {
        self.outcomes.iter().filter_map(ColumnOutcome::verdict)
    }

    /// Looks up the verdict for a column.
    pub fn verdict(&self, column: &str) -> Option<&Verdict> {
        self.verdicts().find(|v| v.column == column)
    }

    /// Gets all issues of a specific level.
    pub fn issues_by_level(&self, level: Level) -> Vec<&IntrospectionIssue> {
        self.issues
            .iter()
            .filter(|issue| issue.level == level)
            .collect()
    }
}
