//! Prelude for commonly used types and traits in intro-guard.

pub use crate::error::{ErrorContext, IntroError, Result};
pub use crate::formatters::ReportFormatter;
pub use crate::logging::setup::LoggingConfig;
pub use crate::sources::TableSource;
