//! Acceptance criteria applied to column values.
//!
//! - [`Fence`]: exclusive numeric bounds, used both for whole-column sanity
//!   validation and for numeric introspection of a single value
//! - [`TextCriteria`]: substring presence and absence for textual values
//! - [`Criteria`]: the introspection criteria of one column, either numeric
//!   or textual but never both

mod fence;
mod text;

pub use fence::Fence;
pub use text::TextCriteria;

use serde::{Deserialize, Serialize};
use std::fmt;

/// Introspection criteria for a single comparison value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Criteria {
    /// The value must be a number strictly inside the fence
    Numeric(Fence),
    /// The value must be text satisfying the substring predicates
    Textual(TextCriteria),
}

impl Criteria {
    /// The value kind these criteria apply to.
    pub fn expected_kind(&self) -> &'static str {
        match self {
            Criteria::Numeric(_) => "number",
            Criteria::Textual(_) => "string",
        }
    }

    pub fn description(&self) -> String {
        match self {
            Criteria::Numeric(fence) => fence.description(),
            Criteria::Textual(text) => text.description(),
        }
    }
}

impl fmt::Display for Criteria {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}
