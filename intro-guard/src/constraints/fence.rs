//! Exclusive numeric bounds.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A pair of optional, exclusive numeric bounds.
///
/// A value touching a bound is outside the fence: `lower` admits only values
/// strictly greater than it and `upper` only values strictly less than it.
/// A missing bound admits everything on that side.
///
/// # Examples
///
/// ```rust
/// use intro_guard::constraints::Fence;
///
/// let fence = Fence::new(Some(4.0), None);
/// assert!(fence.admits(5.0));
/// assert!(!fence.admits(4.0));
///
/// let unbounded = Fence::default();
/// assert!(unbounded.admits(f64::MAX));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Fence {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lower: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upper: Option<f64>,
}

impl Fence {
    pub fn new(lower: Option<f64>, upper: Option<f64>) -> Self {
        Self { lower, upper }
    }

    /// Returns true if neither bound is set.
    pub fn is_unbounded(&self) -> bool {
        self.lower.is_none() && self.upper.is_none()
    }

    /// Returns true if `value` lies strictly inside the fence.
    pub fn admits(&self, value: f64) -> bool {
        self.admits_range(value, value)
    }

    /// Returns true if a range of values with the given extremes lies
    /// strictly inside the fence.
    pub fn admits_range(&self, min: f64, max: f64) -> bool {
        let below = matches!(self.lower, Some(lower) if min <= lower);
        let above = matches!(self.upper, Some(upper) if max >= upper);
        !(below || above)
    }

    /// Returns a human-readable description of the fence.
    pub fn description(&self) -> String {
        match (self.lower, self.upper) {
            (Some(lower), Some(upper)) => format!("greater than {lower} and less than {upper}"),
            (Some(lower), None) => format!("greater than {lower}"),
            (None, Some(upper)) => format!("less than {upper}"),
            (None, None) => "any value".to_string(),
        }
    }
}

impl fmt::Display for Fence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}
