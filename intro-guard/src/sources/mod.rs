//! Table sources for intro-guard.
//!
//! A source turns a results file into an in-memory [`Table`]. Only CSV is
//! supported; the [`TableSource`] trait is the seam for other formats.

use crate::core::Table;
use crate::prelude::*;
use std::fmt::Debug;

mod csv;

pub use csv::{CsvOptions, CsvSource};

/// A source that can materialize a results table.
///
/// # Examples
///
/// ```rust,no_run
/// use intro_guard::sources::{CsvSource, TableSource};
///
/// # fn example() -> intro_guard::prelude::Result<()> {
/// let source = CsvSource::new("results.csv").with_index_column("Collection #");
/// let table = source.load()?;
/// println!("{} rows from {}", table.num_rows(), source.description());
/// # Ok(())
/// # }
/// ```
pub trait TableSource: Debug {
    /// Reads the whole source into a table.
    fn load(&self) -> Result<Table>;

    /// Returns a human-readable description of this source.
    fn description(&self) -> String;
}
