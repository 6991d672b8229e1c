//! Per-column sanity validation and introspection.

use super::{CellValue, ColumnOutcome, ColumnSpec, Table, Verdict};
use crate::constraints::Criteria;
use crate::logging::truncate_field;
use crate::prelude::*;
use tracing::{debug, error, info, warn};

const MAX_LOGGED_VALUE_LENGTH: usize = 256;

/// Evaluates resolved column specs against one table.
///
/// Each evaluation walks the column through
/// `pending -> skipped | sanity failed | sanity ok -> introspected`.
/// Skipping and failed introspection are normal outcomes; a sanity failure
/// or a comparison value of the wrong kind is returned as an error and ends
/// the run.
///
/// # Examples
///
/// ```rust
/// use intro_guard::core::{CellValue, ColumnEvaluator, ColumnSpec, Table};
///
/// let table = Table::builder("Collection #", vec!["r1".into(), "r2".into()])
///     .column("RMS", vec![CellValue::Number(0.2), CellValue::Number(0.4)])
///     .build()
///     .unwrap();
///
/// let spec = ColumnSpec {
///     value_row: Some("r2".into()),
///     acceptable_max: Some(0.5),
///     ..ColumnSpec::new("RMS")
/// };
///
/// let outcome = ColumnEvaluator::new(&table).evaluate(&spec).unwrap();
/// assert!(outcome.verdict().unwrap().introspection_ok);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ColumnEvaluator<'a> {
    table: &'a Table,
}

impl<'a> ColumnEvaluator<'a> {
    pub fn new(table: &'a Table) -> Self {
        Self { table }
    }

    /// Evaluates one column.
    ///
    /// # Errors
    ///
    /// - [`IntroError::SanityCheckFailed`] if the column's values touch or
    ///   cross the validation bounds
    /// - [`IntroError::TypeMismatch`] if the comparison value is text under
    ///   numeric criteria, is not text under textual criteria, or the column
    ///   holds text and has sanity bounds
    ///
    /// An empty comparison cell under numeric criteria is a failed
    /// introspection.
    /// - [`IntroError::Configuration`] if no comparison row or no criteria
    ///   can be determined
    pub fn evaluate(&self, spec: &ColumnSpec) -> Result<ColumnOutcome> {
        let column_name = spec.column_name.as_str();
        let Some(column) = self.table.column(column_name) else {
            warn!(
                column = %column_name,
                "Column does not exist in the table, check for spelling errors; skipping it"
            );
            return Ok(ColumnOutcome::Skipped {
                column: column_name.to_string(),
                reason: "column not found".to_string(),
            });
        };

        let range = column.numeric_range();
        let sanity = spec.sanity_fence();
        if !sanity.is_unbounded() {
            if column.has_text() {
                error!(column = %column_name, "Column holds text and cannot be sanity checked");
                return Err(IntroError::type_mismatch(column_name, "number", "string"));
            }
            if let Some((min, max)) = range {
                if !sanity.admits_range(min, max) {
                    error!(
                        column = %column_name,
                        column_min = min,
                        column_max = max,
                        expected = %sanity,
                        "Column has abnormal values"
                    );
                    return Err(IntroError::SanityCheckFailed {
                        column: column_name.to_string(),
                        min,
                        max,
                        expected: sanity.description(),
                    });
                }
            }
        }
        debug!(column = %column_name, ?range, "Column verified");

        let row = self.comparison_row(spec)?;
        let value = self
            .table
            .value(row, column_name)
            .cloned()
            .ok_or_else(|| IntroError::RowNotFound {
                row: row.to_string(),
                column: column_name.to_string(),
            })?;

        let criteria = spec.criteria()?;
        let introspection_ok = match &criteria {
            Criteria::Numeric(fence) => match &value {
                CellValue::Number(n) => fence.admits(*n),
                // An empty cell is a failed introspection, not a broken run
                CellValue::Null => false,
                CellValue::Text(_) => return Err(mismatch(column_name, &value, &criteria)),
            },
            Criteria::Textual(text) => {
                let CellValue::Text(s) = &value else {
                    return Err(mismatch(column_name, &value, &criteria));
                };
                text.admits(s)
            }
        };

        let logged_value = truncate_field(&value.to_string(), MAX_LOGGED_VALUE_LENGTH);
        if introspection_ok {
            info!(
                column = %column_name,
                row = %row,
                value = %logged_value,
                criteria = %criteria,
                sanity = true,
                introspection = true,
                "Introspection passed"
            );
        } else {
            warn!(
                column = %column_name,
                row = %row,
                value = %logged_value,
                criteria = %criteria,
                sanity = true,
                introspection = false,
                "Introspection failed"
            );
        }

        Ok(ColumnOutcome::Evaluated(Verdict {
            column: column_name.to_string(),
            row: row.to_string(),
            value,
            column_min: range.map(|(min, _)| min),
            column_max: range.map(|(_, max)| max),
            sanity_ok: true,
            introspection_ok,
            criteria,
        }))
    }

    /// Picks the row whose value is compared, never guessing one.
    fn comparison_row<'s>(&self, spec: &'s ColumnSpec) -> Result<&'s str>
    where
        'a: 's,
    {
        match (spec.use_latest_row, spec.value_row.as_deref()) {
            (true, None) => self.table.last_row_id().ok_or_else(|| {
                IntroError::configuration(format!(
                    "column '{}': 'use_latest_row' is set but the table has no rows",
                    spec.column_name
                ))
            }),
            (false, Some(row)) => Ok(row),
            (true, Some(_)) => Err(IntroError::configuration(format!(
                "column '{}': 'use_latest_row' cannot be true while 'value_row' is set",
                spec.column_name
            ))),
            (false, None) => Err(IntroError::configuration(format!(
                "column '{}': no comparison row; set 'use_latest_row' or a valid 'value_row'",
                spec.column_name
            ))),
        }
    }
}

fn mismatch(column: &str, value: &CellValue, criteria: &Criteria) -> IntroError {
    error!(
        column = %column,
        expected = criteria.expected_kind(),
        found = value.kind(),
        "Comparison value has the wrong type"
    );
    IntroError::type_mismatch(column, criteria.expected_kind(), value.kind())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::rms_table;

    fn evaluate(spec: ColumnSpec) -> Result<ColumnOutcome> {
        let table = rms_table();
        ColumnEvaluator::new(&table).evaluate(&spec)
    }

    fn numbers_table(values: &[f64]) -> Table {
        let rows = (1..=values.len()).map(|i| i.to_string()).collect();
        Table::builder("Collection #", rows)
            .column("x", values.iter().map(|&v| CellValue::Number(v)).collect())
            .build()
            .unwrap()
    }

    #[test]
    fn test_value_row_passes() {
        let outcome = evaluate(ColumnSpec {
            value_row: Some("r2".into()),
            acceptable_max: Some(0.5),
            ..ColumnSpec::new("RMS")
        })
        .unwrap();
        let verdict = outcome.verdict().unwrap();
        assert_eq!(verdict.row, "r2");
        assert_eq!(verdict.value, CellValue::Number(0.4));
        assert_eq!(verdict.column_min, Some(0.2));
        assert_eq!(verdict.column_max, Some(0.4));
        assert!(verdict.sanity_ok);
        assert!(verdict.introspection_ok);
    }

    #[test]
    fn test_latest_row_is_last() {
        let outcome = evaluate(ColumnSpec {
            use_latest_row: true,
            acceptable_max: Some(0.3),
            ..ColumnSpec::new("RMS")
        })
        .unwrap();
        let verdict = outcome.verdict().unwrap();
        assert_eq!(verdict.row, "r2");
        assert!(!verdict.introspection_ok);
    }

    #[test]
    fn test_missing_column_is_skipped() {
        let outcome = evaluate(ColumnSpec {
            value_row: Some("r1".into()),
            acceptable_max: Some(0.5),
            ..ColumnSpec::new("rms")
        })
        .unwrap();
        assert!(matches!(outcome, ColumnOutcome::Skipped { ref column, .. } if column == "rms"));
    }

    #[test]
    fn test_sanity_fences_are_exclusive() {
        let table = numbers_table(&[1.0, 2.0, 3.0]);
        let evaluator = ColumnEvaluator::new(&table);
        let spec = |min: f64| ColumnSpec {
            validation_min: Some(min),
            use_latest_row: true,
            acceptable_max: Some(10.0),
            ..ColumnSpec::new("x")
        };

        let err = evaluator.evaluate(&spec(1.0)).unwrap_err();
        assert!(matches!(
            err,
            IntroError::SanityCheckFailed { min, max, .. } if min == 1.0 && max == 3.0
        ));
        assert!(evaluator.evaluate(&spec(0.0)).is_ok());
    }

    #[test]
    fn test_sanity_failure_stops_before_introspection() {
        // value_row is bogus, but the sanity failure is reported first
        let err = evaluate(ColumnSpec {
            validation_max: Some(0.3),
            value_row: Some("nope".into()),
            acceptable_max: Some(0.5),
            ..ColumnSpec::new("RMS")
        })
        .unwrap_err();
        assert!(matches!(err, IntroError::SanityCheckFailed { .. }));
    }

    #[test]
    fn test_numeric_fences_are_exclusive() {
        let table = numbers_table(&[5.0]);
        let evaluator = ColumnEvaluator::new(&table);
        let check = |min: Option<f64>, max: Option<f64>| {
            evaluator
                .evaluate(&ColumnSpec {
                    value_row: Some("1".into()),
                    acceptable_min: min,
                    acceptable_max: max,
                    ..ColumnSpec::new("x")
                })
                .unwrap()
                .verdict()
                .unwrap()
                .introspection_ok
        };

        assert!(!check(Some(5.0), None));
        assert!(check(Some(4.0), None));
        assert!(!check(None, Some(5.0)));
        assert!(check(None, Some(6.0)));
    }

    #[test]
    fn test_textual_introspection() {
        let contains = evaluate(ColumnSpec {
            value_row: Some("r1".into()),
            contains_str: Some("123".into()),
            ..ColumnSpec::new("status")
        })
        .unwrap();
        assert!(contains.verdict().unwrap().introspection_ok);

        let does_not_contain = evaluate(ColumnSpec {
            value_row: Some("r1".into()),
            does_not_contain_str: Some("123".into()),
            ..ColumnSpec::new("status")
        })
        .unwrap();
        assert!(!does_not_contain.verdict().unwrap().introspection_ok);
    }

    #[test]
    fn test_textual_criteria_on_number_is_fatal() {
        let err = evaluate(ColumnSpec {
            value_row: Some("r1".into()),
            contains_str: Some("0.2".into()),
            ..ColumnSpec::new("RMS")
        })
        .unwrap_err();
        assert!(matches!(
            err,
            IntroError::TypeMismatch { ref expected, ref found, .. }
                if expected == "string" && found == "number"
        ));
    }

    #[test]
    fn test_numeric_criteria_on_text_is_fatal() {
        let err = evaluate(ColumnSpec {
            value_row: Some("r1".into()),
            acceptable_max: Some(1.0),
            ..ColumnSpec::new("status")
        })
        .unwrap_err();
        assert!(matches!(err, IntroError::TypeMismatch { .. }));
    }

    #[test]
    fn test_sanity_bounds_on_text_column_are_fatal() {
        let err = evaluate(ColumnSpec {
            validation_min: Some(0.0),
            value_row: Some("r1".into()),
            contains_str: Some("abc".into()),
            ..ColumnSpec::new("status")
        })
        .unwrap_err();
        assert!(matches!(err, IntroError::TypeMismatch { .. }));
    }

    #[test]
    fn test_missing_row_selection_is_explicit_error() {
        let err = evaluate(ColumnSpec {
            acceptable_max: Some(0.5),
            ..ColumnSpec::new("RMS")
        })
        .unwrap_err();
        assert!(err.to_string().contains("no comparison row"));
    }

    #[test]
    fn test_latest_row_on_empty_table() {
        let table = Table::builder("id", Vec::new())
            .column("x", Vec::new())
            .build()
            .unwrap();
        let err = ColumnEvaluator::new(&table)
            .evaluate(&ColumnSpec {
                use_latest_row: true,
                acceptable_max: Some(1.0),
                ..ColumnSpec::new("x")
            })
            .unwrap_err();
        assert!(matches!(err, IntroError::Configuration(_)));
    }

    #[test]
    fn test_null_comparison_value_fails_introspection() {
        let table = Table::builder("id", vec!["a".into(), "b".into()])
            .column("x", vec![CellValue::Number(0.2), CellValue::Null])
            .build()
            .unwrap();
        let outcome = ColumnEvaluator::new(&table)
            .evaluate(&ColumnSpec {
                use_latest_row: true,
                acceptable_max: Some(0.5),
                ..ColumnSpec::new("x")
            })
            .unwrap();
        let verdict = outcome.verdict().unwrap();
        assert_eq!(verdict.value, CellValue::Null);
        assert!(verdict.sanity_ok);
        assert!(!verdict.introspection_ok);
    }
}
