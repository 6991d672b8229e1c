//! Column introspection specs and their resolution from raw configuration.
//!
//! A target column is configured with an untyped mapping of option names to
//! values. [`ColumnSpec::resolve`] walks the fixed set of recognized
//! [`SpecOption`]s, types each value, applies defaults and finally checks
//! the cross-field rules:
//!
//! 1. `use_latest_row` and `value_row` cannot both select the comparison row
//! 2. numeric (`acceptable_*`) and textual (`*contain*_str`) criteria cannot
//!    be mixed
//! 3. at least one introspection criterion must be present
//!
//! Wrongly typed values and unknown row identifiers are not fatal: they are
//! reported as [`ResolutionWarning`]s and the option falls back to its
//! default. Violating a cross-field rule is a configuration error.

use super::Table;
use crate::constraints::{Criteria, Fence, TextCriteria};
use crate::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use tracing::{error, warn};

/// Value kind an option accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
    /// Integer or floating point (booleans are not numbers)
    Number,
    Text,
    Boolean,
}

impl OptionKind {
    fn describe(&self) -> &'static str {
        match self {
            OptionKind::Number => "an integer or float",
            OptionKind::Text => "a string",
            OptionKind::Boolean => "a boolean",
        }
    }

    fn accept(&self, value: &Value) -> Option<OptionValue> {
        match (self, value) {
            (OptionKind::Number, Value::Number(n)) => n.as_f64().map(OptionValue::Number),
            (OptionKind::Text, Value::String(s)) => Some(OptionValue::Text(s.clone())),
            (OptionKind::Boolean, Value::Bool(b)) => Some(OptionValue::Boolean(*b)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum OptionValue {
    Number(f64),
    Text(String),
    Boolean(bool),
}

/// The recognized per-column configuration options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecOption {
    ValidationMin,
    ValidationMax,
    UseLatestRow,
    ValueRow,
    AcceptableMin,
    AcceptableMax,
    ContainsStr,
    DoesNotContainStr,
}

impl SpecOption {
    /// All options, in resolution order.
    pub const ALL: [SpecOption; 8] = [
        SpecOption::ValidationMin,
        SpecOption::ValidationMax,
        SpecOption::UseLatestRow,
        SpecOption::ValueRow,
        SpecOption::AcceptableMin,
        SpecOption::AcceptableMax,
        SpecOption::ContainsStr,
        SpecOption::DoesNotContainStr,
    ];

    /// The configuration key of this option.
    pub fn key(&self) -> &'static str {
        match self {
            SpecOption::ValidationMin => "validation_min",
            SpecOption::ValidationMax => "validation_max",
            SpecOption::UseLatestRow => "use_latest_row",
            SpecOption::ValueRow => "value_row",
            SpecOption::AcceptableMin => "acceptable_min",
            SpecOption::AcceptableMax => "acceptable_max",
            SpecOption::ContainsStr => "contains_str",
            SpecOption::DoesNotContainStr => "does_not_contain_str",
        }
    }

    pub fn kind(&self) -> OptionKind {
        match self {
            SpecOption::ValidationMin
            | SpecOption::ValidationMax
            | SpecOption::AcceptableMin
            | SpecOption::AcceptableMax => OptionKind::Number,
            SpecOption::ValueRow | SpecOption::ContainsStr | SpecOption::DoesNotContainStr => {
                OptionKind::Text
            }
            SpecOption::UseLatestRow => OptionKind::Boolean,
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|option| option.key() == key)
    }
}

impl fmt::Display for SpecOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// A recoverable problem found while resolving a column's options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolutionWarning {
    pub column: String,
    /// The offending configuration key
    pub option: String,
    pub message: String,
}

/// The validated introspection parameters for one column.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ColumnSpec {
    pub column_name: String,
    pub validation_min: Option<f64>,
    pub validation_max: Option<f64>,
    pub use_latest_row: bool,
    pub value_row: Option<String>,
    pub acceptable_min: Option<f64>,
    pub acceptable_max: Option<f64>,
    pub contains_str: Option<String>,
    pub does_not_contain_str: Option<String>,
}

/// A resolved spec together with the warnings raised while resolving it.
#[derive(Debug, Clone)]
pub struct ResolvedSpec {
    pub spec: ColumnSpec,
    pub warnings: Vec<ResolutionWarning>,
}

impl ColumnSpec {
    /// Creates a spec with every option at its default.
    pub fn new(column_name: impl Into<String>) -> Self {
        Self {
            column_name: column_name.into(),
            ..Default::default()
        }
    }

    /// Resolves the raw option mapping of `column_name` against `table`.
    ///
    /// # Errors
    ///
    /// Returns [`IntroError::Configuration`] when the resolved options break
    /// one of the cross-field rules.
    pub fn resolve(
        column_name: &str,
        raw: &Map<String, Value>,
        table: &Table,
    ) -> Result<ResolvedSpec> {
        let mut spec = ColumnSpec::new(column_name);
        let mut warnings = Vec::new();
        let mut warn_about = |option: &str, message: String| {
            warn!(column = %column_name, option = %option, "{message}");
            warnings.push(ResolutionWarning {
                column: column_name.to_string(),
                option: option.to_string(),
                message,
            });
        };

        for key in raw.keys() {
            if SpecOption::from_key(key).is_none() {
                warn_about(
                    key.as_str(),
                    format!("'{key}' is not a recognized option; ignoring it"),
                );
            }
        }

        for option in SpecOption::ALL {
            let Some(value) = raw.get(option.key()).filter(|v| !v.is_null()) else {
                continue;
            };
            match option.kind().accept(value) {
                Some(typed) => spec.set(option, typed),
                None => warn_about(
                    option.key(),
                    format!(
                        "'{option}' for column '{column_name}' is not {}; using the default",
                        option.kind().describe()
                    ),
                ),
            }
        }

        if let Some(row) = &spec.value_row {
            if !table.contains_row(row) {
                warn_about(
                    SpecOption::ValueRow.key(),
                    format!("'value_row' '{row}' does not exist in the table; ignoring it"),
                );
                spec.value_row = None;
            }
        }

        spec.check_consistency()?;
        Ok(ResolvedSpec { spec, warnings })
    }

    fn set(&mut self, option: SpecOption, value: OptionValue) {
        match (option, value) {
            (SpecOption::ValidationMin, OptionValue::Number(n)) => self.validation_min = Some(n),
            (SpecOption::ValidationMax, OptionValue::Number(n)) => self.validation_max = Some(n),
            (SpecOption::AcceptableMin, OptionValue::Number(n)) => self.acceptable_min = Some(n),
            (SpecOption::AcceptableMax, OptionValue::Number(n)) => self.acceptable_max = Some(n),
            (SpecOption::UseLatestRow, OptionValue::Boolean(b)) => self.use_latest_row = b,
            (SpecOption::ValueRow, OptionValue::Text(s)) => self.value_row = Some(s),
            (SpecOption::ContainsStr, OptionValue::Text(s)) => self.contains_str = Some(s),
            (SpecOption::DoesNotContainStr, OptionValue::Text(s)) => {
                self.does_not_contain_str = Some(s)
            }
            // `OptionKind::accept` only produces values of the option's kind
            _ => {}
        }
    }

    fn has_numeric_criteria(&self) -> bool {
        self.acceptable_min.is_some() || self.acceptable_max.is_some()
    }

    fn has_textual_criteria(&self) -> bool {
        self.contains_str.is_some() || self.does_not_contain_str.is_some()
    }

    /// Checks the cross-field rules, in order, stopping at the first
    /// violation.
    pub fn check_consistency(&self) -> Result<()> {
        let violation = if self.use_latest_row && self.value_row.is_some() {
            Some(
                "'use_latest_row' cannot be true while 'value_row' is set; \
                 choose one row to compare",
            )
        } else if self.has_numeric_criteria() && self.has_textual_criteria() {
            Some(
                "numeric ('acceptable_min', 'acceptable_max') and textual \
                 ('contains_str', 'does_not_contain_str') introspection cannot be combined",
            )
        } else if !self.has_numeric_criteria() && !self.has_textual_criteria() {
            Some(
                "no introspection parameters defined; set 'acceptable_min' and/or \
                 'acceptable_max' for numbers, or 'contains_str' and/or \
                 'does_not_contain_str' for text",
            )
        } else {
            None
        };

        match violation {
            Some(message) => {
                error!(column = %self.column_name, "{message}");
                Err(IntroError::configuration(format!(
                    "column '{}': {message}",
                    self.column_name
                )))
            }
            None => Ok(()),
        }
    }

    /// The whole-column sanity bounds.
    pub fn sanity_fence(&self) -> Fence {
        Fence::new(self.validation_min, self.validation_max)
    }

    /// The introspection criteria of this spec.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when there are no criteria or they mix
    /// numeric and textual ones.
    pub fn criteria(&self) -> Result<Criteria> {
        match (self.has_numeric_criteria(), self.has_textual_criteria()) {
            (true, false) => Ok(Criteria::Numeric(Fence::new(
                self.acceptable_min,
                self.acceptable_max,
            ))),
            (false, true) => Ok(Criteria::Textual(TextCriteria::new(
                self.contains_str.clone(),
                self.does_not_contain_str.clone(),
            ))),
            _ => Err(IntroError::configuration(format!(
                "column '{}' needs either numeric or textual introspection criteria",
                self.column_name
            ))),
        }
    }
}
