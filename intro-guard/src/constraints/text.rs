//! Substring presence criteria for textual values.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Substring criteria for a textual comparison value.
///
/// Matching is case-sensitive and literal; no pattern syntax is interpreted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextCriteria {
    /// The value must contain this substring
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contains: Option<String>,
    /// The value must not contain this substring
    #[serde(skip_serializing_if = "Option::is_none")]
    pub does_not_contain: Option<String>,
}

impl TextCriteria {
    pub fn new(contains: Option<String>, does_not_contain: Option<String>) -> Self {
        Self {
            contains,
            does_not_contain,
        }
    }

    /// Returns true if `value` satisfies both substring predicates.
    pub fn admits(&self, value: &str) -> bool {
        let missing = matches!(&self.contains, Some(needle) if !value.contains(needle.as_str()));
        let present =
            matches!(&self.does_not_contain, Some(needle) if value.contains(needle.as_str()));
        !(missing || present)
    }

    /// Returns a human-readable description of the criteria.
    pub fn description(&self) -> String {
        match (&self.contains, &self.does_not_contain) {
            (Some(c), Some(d)) => format!("contains '{c}' and does not contain '{d}'"),
            (Some(c), None) => format!("contains '{c}'"),
            (None, Some(d)) => format!("does not contain '{d}'"),
            (None, None) => "any text".to_string(),
        }
    }
}

impl fmt::Display for TextCriteria {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}
