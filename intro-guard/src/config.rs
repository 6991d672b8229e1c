//! Declarative introspection configuration.
//!
//! A configuration document lists the results files to inspect, the column
//! their rows are indexed by, and the target columns with their options:
//!
//! ```yaml
//! files:
//!   - results/latest.csv
//! index_column: "Collection #"
//! introspection_target_columns:
//!   - RMS:
//!       validation_max: 1.0
//!       use_latest_row: true
//!       acceptable_max: 0.5
//!   - Status:
//!       value_row: Averages
//!       does_not_contain_str: FAIL
//! ```
//!
//! Documents ending in `.json` are read as JSON, everything else as YAML.
//! Relative file paths are resolved against the configuration file's
//! directory.

use crate::core::{IntrospectionSuite, TargetColumn};
use crate::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Index column used when the document does not name one.
pub const DEFAULT_INDEX_COLUMN: &str = "Collection #";

fn default_index_column() -> String {
    DEFAULT_INDEX_COLUMN.to_string()
}

/// The parsed configuration document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntrospectionConfig {
    /// Results files to inspect, in order
    pub files: Vec<PathBuf>,
    /// Column holding the row identifiers
    #[serde(default = "default_index_column")]
    pub index_column: String,
    /// Target columns and their raw options
    #[serde(default)]
    pub introspection_target_columns: Vec<TargetColumn>,
}

impl IntrospectionConfig {
    /// Reads a configuration file, choosing the format by extension.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read configuration {}", path.display()))?;

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let mut config = if is_json {
            Self::from_json_str(&contents)
        } else {
            Self::from_yaml_str(&contents)
        }
        .with_context(|| format!("invalid configuration {}", path.display()))?;

        if let Some(base) = path.parent() {
            config.resolve_paths(base);
        }
        debug!(
            config = %path.display(),
            files = config.files.len(),
            targets = config.introspection_target_columns.len(),
            "Loaded configuration"
        );
        Ok(config)
    }

    pub fn from_yaml_str(contents: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_str(contents: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(contents)
            .map_err(|e| IntroError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks document-level requirements.
    pub fn validate(&self) -> Result<()> {
        if self.files.is_empty() {
            return Err(IntroError::configuration(
                "at least one results file must be listed under 'files'",
            ));
        }
        if self.index_column.trim().is_empty() {
            return Err(IntroError::configuration("'index_column' cannot be empty"));
        }
        Ok(())
    }

    /// Makes relative file paths relative to `base`.
    pub fn resolve_paths(&mut self, base: &Path) {
        for file in &mut self.files {
            if file.is_relative() {
                *file = base.join(&*file);
            }
        }
    }

    /// Builds the introspection suite for one results file.
    pub fn suite_for(&self, file: &Path) -> IntrospectionSuite {
        IntrospectionSuite::new(file.display().to_string())
            .targets(self.introspection_target_columns.iter().cloned())
    }
}
