//! Report formatting.
//!
//! Formatters turn an [`IntrospectionReport`] into text for the console
//! ([`HumanFormatter`]) or for other tools ([`JsonFormatter`]).
//!
//! # Examples
//!
//! ```rust
//! use intro_guard::core::IntrospectionReport;
//! use intro_guard::formatters::{HumanFormatter, ReportFormatter};
//!
//! let report = IntrospectionReport::new("results.csv");
//! let text = HumanFormatter::new().format(&report).unwrap();
//! assert!(text.contains("results.csv"));
//! ```

use crate::core::{ColumnOutcome, IntrospectionReport, Level};
use crate::prelude::*;
use std::fmt::Write;

const RULE_WIDTH: usize = 40;

/// Trait for formatting introspection reports.
pub trait ReportFormatter {
    fn format(&self, report: &IntrospectionReport) -> Result<String>;
}

/// Formats reports as JSON.
#[derive(Debug, Clone, Default)]
pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables pretty printing.
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

impl ReportFormatter for JsonFormatter {
    fn format(&self, report: &IntrospectionReport) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(report)
        } else {
            serde_json::to_string(report)
        };
        json.map_err(|e| IntroError::Serialization(e.to_string()))
    }
}

/// Formats reports for people reading a terminal.
#[derive(Debug, Clone)]
pub struct HumanFormatter {
    include_issues: bool,
    min_issue_level: Level,
}

impl Default for HumanFormatter {
    fn default() -> Self {
        Self {
            include_issues: true,
            min_issue_level: Level::Warning,
        }
    }
}

impl HumanFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether the issue list is printed.
    pub fn with_issues(mut self, include: bool) -> Self {
        self.include_issues = include;
        self
    }

    /// Only prints issues at or above `level`.
    pub fn with_min_issue_level(mut self, level: Level) -> Self {
        self.min_issue_level = level;
        self
    }
}

impl ReportFormatter for HumanFormatter {
    fn format(&self, report: &IntrospectionReport) -> Result<String> {
        let mut out = String::new();
        let rule = "-".repeat(RULE_WIDTH);
        write_line(&mut out, format_args!("{rule}"))?;
        write_line(&mut out, format_args!("File introspection: {}", report.name))?;
        write_line(&mut out, format_args!("{rule}"))?;

        for outcome in &report.outcomes {
            match outcome {
                ColumnOutcome::Evaluated(verdict) => {
                    let status = if verdict.introspection_ok {
                        "PASS"
                    } else {
                        "FAIL"
                    };
                    write_line(
                        &mut out,
                        format_args!(
                            "[{status}] {}: value {} in row '{}' (expected {})",
                            verdict.column, verdict.value, verdict.row, verdict.criteria
                        ),
                    )?;
                    if let (Some(min), Some(max)) = (verdict.column_min, verdict.column_max) {
                        write_line(
                            &mut out,
                            format_args!("       column range {min} to {max}, sanity ok"),
                        )?;
                    }
                }
                ColumnOutcome::Skipped { column, reason } => {
                    write_line(&mut out, format_args!("[SKIP] {column}: {reason}"))?;
                }
            }
        }

        let metrics = &report.metrics;
        write_line(
            &mut out,
            format_args!(
                "\n{} evaluated, {} passed, {} failed, {} skipped",
                metrics.evaluated, metrics.passed, metrics.failed, metrics.skipped
            ),
        )?;

        if self.include_issues {
            let issues: Vec<_> = report
                .issues
                .iter()
                .filter(|issue| issue.level.is_at_least(self.min_issue_level))
                .collect();
            if !issues.is_empty() {
                write_line(&mut out, format_args!("\nIssues:"))?;
                for issue in issues {
                    write_line(
                        &mut out,
                        format_args!("  [{}] {}: {}", issue.level, issue.column, issue.message),
                    )?;
                }
            }
        }

        Ok(out)
    }
}

fn write_line(out: &mut String, args: std::fmt::Arguments<'_>) -> Result<()> {
    out.write_fmt(args)
        .and_then(|_| out.write_char('\n'))
        .map_err(|e| IntroError::Serialization(e.to_string()))
}
