//! In-memory results table.
//!
//! A [`Table`] is a row-indexed, column-indexed grid of [`CellValue`]s. Rows
//! are keyed by the textual rendering of the index column (for example a
//! collection number or `Averages`). Tables are built once by a data source
//! and only read afterwards.

use super::CellValue;
use crate::prelude::*;
use std::collections::HashMap;

/// A named column of cells, one per table row.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: String,
    values: Vec<CellValue>,
}

impl Column {
    pub fn new(name: impl Into<String>, values: Vec<CellValue>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the smallest and largest numeric value in the column.
    ///
    /// Null and textual cells are ignored. Returns `None` when the column has
    /// no numeric cells at all.
    pub fn numeric_range(&self) -> Option<(f64, f64)> {
        self.values
            .iter()
            .filter_map(CellValue::as_number)
            .filter(|n| !n.is_nan())
            .fold(None, |range, n| match range {
                None => Some((n, n)),
                Some((min, max)) => Some((min.min(n), max.max(n))),
            })
    }

    /// Returns true if any cell holds text.
    pub fn has_text(&self) -> bool {
        self.values.iter().any(|v| v.as_text().is_some())
    }
}

/// A read-only results table.
///
/// # Examples
///
/// ```rust
/// use intro_guard::core::{CellValue, Table};
///
/// let table = Table::builder("Collection #", vec!["r1".into(), "r2".into()])
///     .column("RMS", vec![CellValue::Number(0.2), CellValue::Number(0.4)])
///     .build()
///     .unwrap();
///
/// assert_eq!(table.last_row_id(), Some("r2"));
/// assert_eq!(table.value("r2", "RMS"), Some(&CellValue::Number(0.4)));
/// ```
#[derive(Debug, Clone)]
pub struct Table {
    index_name: String,
    row_ids: Vec<String>,
    row_positions: HashMap<String, usize>,
    columns: Vec<Column>,
    column_positions: HashMap<String, usize>,
}

impl Table {
    /// Creates a table, checking that row identifiers and column names are
    /// unique and that every column has one cell per row.
    pub fn try_new(
        index_name: impl Into<String>,
        row_ids: Vec<String>,
        columns: Vec<Column>,
    ) -> Result<Self> {
        let mut row_positions = HashMap::with_capacity(row_ids.len());
        for (position, row) in row_ids.iter().enumerate() {
            if row_positions.insert(row.clone(), position).is_some() {
                return Err(IntroError::data_source(
                    "table",
                    format!("duplicate row identifier '{row}'"),
                ));
            }
        }

        let mut column_positions = HashMap::with_capacity(columns.len());
        for (position, column) in columns.iter().enumerate() {
            if column.values.len() != row_ids.len() {
                return Err(IntroError::data_source(
                    "table",
                    format!(
                        "column '{}' has {} values but the table has {} rows",
                        column.name,
                        column.values.len(),
                        row_ids.len()
                    ),
                ));
            }
            if column_positions.insert(column.name.clone(), position).is_some() {
                return Err(IntroError::data_source(
                    "table",
                    format!("duplicate column name '{}'", column.name),
                ));
            }
        }

        Ok(Self {
            index_name: index_name.into(),
            row_ids,
            row_positions,
            columns,
            column_positions,
        })
    }

    /// Starts building a table with the given index column and rows.
    pub fn builder(index_name: impl Into<String>, row_ids: Vec<String>) -> TableBuilder {
        TableBuilder {
            index_name: index_name.into(),
            row_ids,
            columns: Vec::new(),
        }
    }

    /// Name of the column the rows are indexed by.
    pub fn index_name(&self) -> &str {
        &self.index_name
    }

    /// Row identifiers in file order.
    pub fn row_ids(&self) -> &[String] {
        &self.row_ids
    }

    /// Column names in file order, excluding the index column.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(Column::name)
    }

    pub fn num_rows(&self) -> usize {
        self.row_ids.len()
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn contains_row(&self, row: &str) -> bool {
        self.row_positions.contains_key(row)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_positions.contains_key(name)
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.column_positions
            .get(name)
            .map(|&position| &self.columns[position])
    }

    /// Identifier of the last row, if the table is not empty.
    pub fn last_row_id(&self) -> Option<&str> {
        self.row_ids.last().map(String::as_str)
    }

    /// Returns the cell at the given row and column.
    pub fn value(&self, row: &str, column: &str) -> Option<&CellValue> {
        let row_position = *self.row_positions.get(row)?;
        self.column(column).and_then(|c| c.values.get(row_position))
    }
}

/// Builder for [`Table`], mostly useful for tests and in-memory data.
#[derive(Debug)]
pub struct TableBuilder {
    index_name: String,
    row_ids: Vec<String>,
    columns: Vec<Column>,
}

impl TableBuilder {
    /// Adds a column of cells.
    pub fn column(mut self, name: impl Into<String>, values: Vec<CellValue>) -> Self {
        self.columns.push(Column::new(name, values));
        self
    }

    pub fn build(self) -> Result<Table> {
        Table::try_new(self.index_name, self.row_ids, self.columns)
    }
}
