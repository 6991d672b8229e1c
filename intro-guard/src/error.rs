//! Error types for the intro-guard introspection library.
//!
//! Every fatal outcome of a run is represented by the `IntroError` enum.
//! Recoverable problems (a misspelled column, a wrongly typed option) are
//! never errors; they are logged and collected as report issues instead.

use thiserror::Error;

/// The main error type for intro-guard.
///
/// Any of these ends the current run. Callers decide how to translate them
/// into process termination.
#[derive(Error, Debug)]
pub enum IntroError {
    /// Conflicting, missing or malformed introspection configuration.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A column's overall value range crossed its validation bounds.
    #[error("Sanity check failed for column '{column}': values range from {min} to {max}, expected {expected}")]
    SanityCheckFailed {
        /// Column whose values are abnormal
        column: String,
        /// Smallest numeric value in the column
        min: f64,
        /// Largest numeric value in the column
        max: f64,
        /// Human-readable description of the bounds
        expected: String,
    },

    /// A value did not have the type its criteria require.
    #[error("Type mismatch in column '{column}': expected {expected}, found {found}")]
    TypeMismatch {
        column: String,
        expected: String,
        found: String,
    },

    /// The comparison row does not exist in the table.
    #[error("Row '{row}' not found in column '{column}'")]
    RowNotFound { row: String, column: String },

    /// Error from data source operations.
    #[error("Data source error: {message}")]
    DataSource {
        /// Type of data source (e.g., "CSV")
        source_type: String,
        /// Detailed error message
        message: String,
        /// Optional underlying error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Error from Arrow operations.
    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    /// Error from I/O operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error when parsing a configuration document.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Error from serialization operations.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// A type alias for `Result<T, IntroError>`.
pub type Result<T> = std::result::Result<T, IntroError>;

impl IntroError {
    /// Creates a new configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Creates a new data source error.
    pub fn data_source(source_type: impl Into<String>, message: impl Into<String>) -> Self {
        Self::DataSource {
            source_type: source_type.into(),
            message: message.into(),
            source: None,
        }
    }

    /// Creates a new data source error with a source error.
    pub fn data_source_with_source(
        source_type: impl Into<String>,
        message: impl Into<String>,
        source: Box<dyn std::error::Error + Send + Sync>,
    ) -> Self {
        Self::DataSource {
            source_type: source_type.into(),
            message: message.into(),
            source: Some(source),
        }
    }

    /// Creates a new type mismatch error for a column.
    pub fn type_mismatch(
        column: impl Into<String>,
        expected: impl Into<String>,
        found: impl Into<String>,
    ) -> Self {
        Self::TypeMismatch {
            column: column.into(),
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// Returns true for errors caused by the introspection configuration
    /// rather than by the data itself.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            IntroError::Configuration(_) | IntroError::TypeMismatch { .. } | IntroError::Parse(_)
        )
    }
}

impl From<serde_yaml::Error> for IntroError {
    fn from(err: serde_yaml::Error) -> Self {
        IntroError::Parse(err.to_string())
    }
}

impl From<serde_json::Error> for IntroError {
    fn from(err: serde_json::Error) -> Self {
        IntroError::Serialization(err.to_string())
    }
}

/// Extension trait for adding context to errors.
pub trait ErrorContext<T> {
    /// Adds context to an error.
    fn context(self, msg: &str) -> Result<T>;

    /// Adds context with a lazy message.
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ErrorContext<T> for std::result::Result<T, E>
where
    E: Into<IntroError>,
{
    fn context(self, msg: &str) -> Result<T> {
        self.with_context(|| msg.to_string())
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| match e.into() {
            IntroError::Io(inner) => {
                IntroError::data_source_with_source("file", f(), Box::new(inner))
            }
            IntroError::Configuration(inner) => {
                IntroError::Configuration(format!("{}: {inner}", f()))
            }
            IntroError::Parse(inner) => IntroError::Parse(format!("{}: {inner}", f())),
            other => other,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_configuration_error() {
        let err = IntroError::configuration("no introspection parameters");
        assert_eq!(
            err.to_string(),
            "Configuration error: no introspection parameters"
        );
        assert!(err.is_configuration());
    }

    #[test]
    fn test_sanity_error_message() {
        let err = IntroError::SanityCheckFailed {
            column: "RMS".to_string(),
            min: 0.2,
            max: 0.4,
            expected: "less than 0.3".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Sanity check failed for column 'RMS': values range from 0.2 to 0.4, expected less than 0.3"
        );
        assert!(!err.is_configuration());
    }

    #[test]
    fn test_type_mismatch() {
        let err = IntroError::type_mismatch("status", "string", "number");
        assert_eq!(
            err.to_string(),
            "Type mismatch in column 'status': expected string, found number"
        );
    }

    #[test]
    fn test_data_source_with_source() {
        let source = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let err = IntroError::data_source_with_source("CSV", "cannot open", Box::new(source));
        assert_eq!(err.to_string(), "Data source error: cannot open");
        assert!(err.source().is_some());
    }

    #[test]
    fn test_error_context() {
        let result: std::result::Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "missing",
        ));
        let err = result.context("reading results.csv").unwrap_err();
        assert!(err.to_string().contains("reading results.csv"));
    }
}
