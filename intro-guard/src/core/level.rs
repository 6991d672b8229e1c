//! Report issue severity levels.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The severity level of an introspection issue.
///
/// Levels are ordered by severity: Error > Warning > Info.
///
/// - **Error**: the issue ended the run (never present in a completed report,
///   but used when logging fatal outcomes)
/// - **Warning**: recoverable configuration problems and failed introspections
/// - **Info**: observations that need no action
///
/// # Examples
///
/// ```rust
/// use intro_guard::core::Level;
///
/// assert!(Level::Error > Level::Warning);
/// assert!(Level::Warning.is_at_least(Level::Info));
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    /// Informational level
    Info = 0,
    /// Warning level - should be reviewed but did not stop the run
    #[default]
    Warning = 1,
    /// Error level - stopped the run
    Error = 2,
}

impl Level {
    /// Returns the string representation of the level.
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Info => "info",
            Level::Warning => "warning",
            Level::Error => "error",
        }
    }

    /// Checks if this level is at least as severe as another level.
    pub fn is_at_least(&self, other: Level) -> bool {
        *self >= other
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
