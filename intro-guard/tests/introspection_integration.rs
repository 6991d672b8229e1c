//! End-to-end tests: configuration file, CSV results file, suite run.

use intro_guard::config::IntrospectionConfig;
use intro_guard::core::{CellValue, ColumnOutcome, IntrospectionReport, Level};
use intro_guard::error::{IntroError, Result};
use intro_guard::formatters::{HumanFormatter, JsonFormatter, ReportFormatter};
use intro_guard::sources::{CsvSource, TableSource};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const RESULTS_CSV: &str = "\
Collection #,RMS,Peak,Status,Notes
1,0.21,1.5,ok,first run
2,0.34,1.9,ok,
3,0.29,2.4,FAIL: clipped,retake
Averages,0.28,1.93,done,
";

fn write_run(dir: &Path, config_yaml: &str) -> IntrospectionConfig {
    fs::write(dir.join("results.csv"), RESULTS_CSV).unwrap();
    let config_path = dir.join("introspection.yaml");
    fs::write(&config_path, config_yaml).unwrap();
    IntrospectionConfig::from_path(&config_path).unwrap()
}

fn run_first_file(config: &IntrospectionConfig) -> Result<IntrospectionReport> {
    let file = &config.files[0];
    let table = CsvSource::new(file)
        .with_index_column(&config.index_column)
        .load()?;
    config.suite_for(file).run(&table)
}

#[test]
fn test_end_to_end_passing_run() {
    let dir = TempDir::new().unwrap();
    let config = write_run(
        dir.path(),
        r#"
files: [results.csv]
introspection_target_columns:
  - RMS:
      validation_min: 0
      validation_max: 1
      use_latest_row: true
      acceptable_max: 0.3
  - Status:
      value_row: Averages
      contains_str: done
"#,
    );
    assert_eq!(config.files[0], dir.path().join("results.csv"));

    let report = run_first_file(&config).unwrap();
    assert!(report.all_passed());
    assert_eq!(report.metrics.evaluated, 2);
    assert_eq!(report.metrics.passed, 2);

    let rms = report.verdict("RMS").unwrap();
    assert_eq!(rms.row, "Averages");
    assert_eq!(rms.value, CellValue::Number(0.28));
    assert_eq!(rms.column_min, Some(0.21));
    assert_eq!(rms.column_max, Some(0.34));
    assert!(rms.sanity_ok);

    let status = report.verdict("Status").unwrap();
    assert_eq!(status.value, CellValue::Text("done".into()));
}

#[test]
fn test_failed_introspection_is_reported() {
    let dir = TempDir::new().unwrap();
    let config = write_run(
        dir.path(),
        r#"
files: [results.csv]
introspection_target_columns:
  - Peak:
      value_row: "3"
      acceptable_min: 1.0
      acceptable_max: 2.0
  - Status:
      value_row: "3"
      does_not_contain_str: FAIL
"#,
    );

    let report = run_first_file(&config).unwrap();
    assert!(!report.all_passed());
    assert_eq!(report.metrics.failed, 2);
    assert!(!report.verdict("Peak").unwrap().introspection_ok);
    assert!(!report.verdict("Status").unwrap().introspection_ok);
    assert_eq!(report.issues_by_level(Level::Warning).len(), 2);

    let text = HumanFormatter::new().format(&report).unwrap();
    assert!(text.contains("[FAIL] Peak: value 2.4 in row '3'"));
    assert!(text.contains("does not contain 'FAIL'"));
}

#[test]
fn test_sanity_failure_stops_the_run() {
    let dir = TempDir::new().unwrap();
    let config = write_run(
        dir.path(),
        r#"
files: [results.csv]
introspection_target_columns:
  - Peak:
      validation_max: 2.4
      use_latest_row: true
      acceptable_max: 3
  - RMS:
      use_latest_row: true
      acceptable_max: 3
"#,
    );

    let err = run_first_file(&config).unwrap_err();
    match err {
        IntroError::SanityCheckFailed {
            column, min, max, ..
        } => {
            assert_eq!(column, "Peak");
            assert_eq!(min, 1.5);
            assert_eq!(max, 2.4);
        }
        other => panic!("expected a sanity failure, got {other:?}"),
    }
}

#[test]
fn test_missing_column_is_skipped() {
    let dir = TempDir::new().unwrap();
    let config = write_run(
        dir.path(),
        r#"
files: [results.csv]
introspection_target_columns:
  - Rms:
      use_latest_row: true
      acceptable_max: 0.5
  - RMS:
      use_latest_row: true
      acceptable_max: 0.5
"#,
    );

    let report = run_first_file(&config).unwrap();
    assert_eq!(report.metrics.skipped, 1);
    assert_eq!(report.metrics.passed, 1);
    assert!(matches!(
        &report.outcomes[0],
        ColumnOutcome::Skipped { column, .. } if column == "Rms"
    ));
    assert!(report.issues[0].message.contains("does not exist"));
}

#[test]
fn test_unknown_value_row_is_discarded() {
    // The missing row is dropped with a warning, leaving use_latest_row
    let dir = TempDir::new().unwrap();
    let config = write_run(
        dir.path(),
        r#"
files: [results.csv]
introspection_target_columns:
  - RMS:
      value_row: "99"
      use_latest_row: true
      acceptable_max: 0.5
"#,
    );

    let report = run_first_file(&config).unwrap();
    assert_eq!(report.verdict("RMS").unwrap().row, "Averages");
    assert!(report
        .issues
        .iter()
        .any(|issue| issue.message.contains("'99'")));
}

#[test]
fn test_conflicting_row_selection_is_fatal() {
    let dir = TempDir::new().unwrap();
    let config = write_run(
        dir.path(),
        r#"
files: [results.csv]
introspection_target_columns:
  - RMS:
      value_row: "2"
      use_latest_row: true
      acceptable_max: 0.5
"#,
    );

    let err = run_first_file(&config).unwrap_err();
    assert!(err.is_configuration());
}

#[test]
fn test_text_column_with_numeric_criteria_is_fatal() {
    let dir = TempDir::new().unwrap();
    let config = write_run(
        dir.path(),
        r#"
files: [results.csv]
introspection_target_columns:
  - Status:
      use_latest_row: true
      acceptable_min: 0
"#,
    );

    let err = run_first_file(&config).unwrap_err();
    assert!(matches!(err, IntroError::TypeMismatch { .. }));
}

#[test]
fn test_json_configuration_and_output() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("results.csv"), RESULTS_CSV).unwrap();
    let config_path = dir.path().join("introspection.json");
    fs::write(
        &config_path,
        r#"{"files": ["results.csv"],
            "introspection_target_columns": [
              {"Notes": {"value_row": "3", "contains_str": "retake"}}
            ]}"#,
    )
    .unwrap();

    let config = IntrospectionConfig::from_path(&config_path).unwrap();
    let report = run_first_file(&config).unwrap();
    assert!(report.all_passed());

    let json = JsonFormatter::new().format(&report).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["outcomes"][0]["column"], "Notes");
    assert_eq!(value["outcomes"][0]["value"], "retake");
    assert_eq!(value["outcomes"][0]["criteria"]["kind"], "textual");
}

#[test]
fn test_missing_index_column() {
    let dir = TempDir::new().unwrap();
    let config = write_run(
        dir.path(),
        r#"
files: [results.csv]
index_column: Run
introspection_target_columns: []
"#,
    );

    let err = run_first_file(&config).unwrap_err();
    assert!(matches!(err, IntroError::DataSource { .. }));
}

#[test]
fn test_missing_configuration_file() {
    let err = IntrospectionConfig::from_path("/nonexistent/introspection.yaml").unwrap_err();
    assert!(err.to_string().contains("introspection.yaml"));
}

#[test]
fn test_empty_comparison_cell_does_not_stop_the_run() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("partial.csv"),
        "Collection #,RMS,Peak\n1,0.2,1.0\n2,,1.5\n",
    )
    .unwrap();
    let config_path = dir.path().join("introspection.yaml");
    fs::write(
        &config_path,
        r#"
files: [partial.csv]
introspection_target_columns:
  - RMS:
      use_latest_row: true
      acceptable_max: 0.5
  - Peak:
      use_latest_row: true
      acceptable_max: 2
"#,
    )
    .unwrap();
    let config = IntrospectionConfig::from_path(&config_path).unwrap();

    let report = run_first_file(&config).unwrap();
    assert_eq!(report.metrics.evaluated, 2);

    let rms = report.verdict("RMS").unwrap();
    assert_eq!(rms.value, CellValue::Null);
    assert!(!rms.introspection_ok);
    assert!(report.verdict("Peak").unwrap().introspection_ok);
    assert_eq!(report.issues_by_level(Level::Warning).len(), 1);
}
