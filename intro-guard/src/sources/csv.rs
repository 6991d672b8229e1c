//! CSV file source implementation.

use super::TableSource;
use crate::config::DEFAULT_INDEX_COLUMN;
use crate::core::{CellValue, Column, Table};
use crate::prelude::*;
use arrow::array::{Array, ArrayRef, AsArray};
use arrow::compute::cast;
use arrow::csv::reader::Format;
use arrow::csv::ReaderBuilder;
use arrow::datatypes::{DataType, Float64Type};
use arrow::util::display::{ArrayFormatter, FormatOptions};
use std::fs::File;
use std::io::Seek;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Options for configuring CSV file reading.
#[derive(Debug, Clone)]
pub struct CsvOptions {
    /// Whether the CSV file has a header row
    pub has_header: bool,
    /// Field delimiter (default: ',')
    pub delimiter: u8,
    /// Column whose values identify the rows
    pub index_column: String,
    /// Maximum records to read for schema inference (None reads all)
    pub schema_infer_max_records: Option<usize>,
    /// Rows decoded per Arrow batch
    pub batch_size: usize,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            has_header: true,
            delimiter: b',',
            index_column: DEFAULT_INDEX_COLUMN.to_string(),
            schema_infer_max_records: None,
            batch_size: 1024,
        }
    }
}

/// A CSV results file.
///
/// Column types are inferred by Arrow: integer and floating point columns
/// become numeric cells, everything else is kept as text.
///
/// # Examples
///
/// ```rust,no_run
/// use intro_guard::sources::{CsvOptions, CsvSource, TableSource};
///
/// # fn example() -> intro_guard::prelude::Result<()> {
/// let table = CsvSource::new("results.csv").load()?;
///
/// let options = CsvOptions {
///     delimiter: b';',
///     index_column: "run".to_string(),
///     ..Default::default()
/// };
/// let table = CsvSource::with_options("results_eu.csv", options).load()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct CsvSource {
    path: PathBuf,
    options: CsvOptions,
}

impl CsvSource {
    /// Creates a CSV source with default options.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_options(path, CsvOptions::default())
    }

    pub fn with_options(path: impl Into<PathBuf>, options: CsvOptions) -> Self {
        Self {
            path: path.into(),
            options,
        }
    }

    /// Sets the column used as the row index.
    pub fn with_index_column(mut self, index_column: impl Into<String>) -> Self {
        self.options.index_column = index_column.into();
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn options(&self) -> &CsvOptions {
        &self.options
    }

    fn open(&self) -> Result<File> {
        File::open(&self.path).map_err(|e| {
            IntroError::data_source_with_source(
                "CSV",
                format!("failed to open {}", self.path.display()),
                Box::new(e),
            )
        })
    }
}

impl TableSource for CsvSource {
    #[instrument(skip(self), fields(path = %self.path.display(), index = %self.options.index_column))]
    fn load(&self) -> Result<Table> {
        let mut file = self.open()?;
        let format = Format::default()
            .with_header(self.options.has_header)
            .with_delimiter(self.options.delimiter);
        let (schema, records) =
            format.infer_schema(&mut file, self.options.schema_infer_max_records)?;
        file.rewind()?;
        debug!(records, fields = schema.fields().len(), "Inferred CSV schema");

        let schema = Arc::new(schema);
        let index_position = schema.index_of(&self.options.index_column).map_err(|_| {
            IntroError::data_source(
                "CSV",
                format!(
                    "index column '{}' not found in {}",
                    self.options.index_column,
                    self.path.display()
                ),
            )
        })?;

        let reader = ReaderBuilder::new(Arc::clone(&schema))
            .with_format(format)
            .with_batch_size(self.options.batch_size)
            .build(file)?;

        let mut row_ids = Vec::new();
        let mut cells: Vec<Vec<CellValue>> = vec![Vec::new(); schema.fields().len()];
        for batch in reader {
            let batch = batch?;
            for (position, array) in batch.columns().iter().enumerate() {
                if position == index_position {
                    row_ids.extend(row_identifiers(array, row_ids.len())?);
                } else {
                    cells[position].extend(cell_values(array)?);
                }
            }
        }

        let columns = schema
            .fields()
            .iter()
            .zip(cells)
            .enumerate()
            .filter(|(position, _)| *position != index_position)
            .map(|(_, (field, values))| Column::new(field.name().as_str(), values))
            .collect();

        let table = Table::try_new(self.options.index_column.clone(), row_ids, columns)?;
        info!(
            rows = table.num_rows(),
            columns = table.num_columns(),
            "Loaded results table"
        );
        debug!(
            index = %table.index_name(),
            row_ids = ?table.row_ids(),
            columns = ?table.column_names().collect::<Vec<_>>(),
            "Results table contents"
        );
        Ok(table)
    }

    fn description(&self) -> String {
        format!("CSV file {}", self.path.display())
    }
}

/// Renders index cells as row identifiers; an empty index cell is an error.
fn row_identifiers(array: &ArrayRef, offset: usize) -> Result<Vec<String>> {
    let formatter = ArrayFormatter::try_new(array.as_ref(), &FormatOptions::default())?;
    (0..array.len())
        .map(|i| {
            if array.is_null(i) || array.data_type() == &DataType::Null {
                Err(IntroError::data_source(
                    "CSV",
                    format!("row {} has an empty index value", offset + i + 1),
                ))
            } else {
                Ok(formatter.value(i).to_string())
            }
        })
        .collect()
}

fn cell_values(array: &ArrayRef) -> Result<Vec<CellValue>> {
    let data_type = array.data_type();
    if data_type == &DataType::Null {
        return Ok(vec![CellValue::Null; array.len()]);
    }
    if data_type.is_numeric() {
        let numbers = cast(array.as_ref(), &DataType::Float64)?;
        return Ok(numbers
            .as_primitive::<Float64Type>()
            .iter()
            .map(CellValue::from)
            .collect());
    }

    let formatter = ArrayFormatter::try_new(array.as_ref(), &FormatOptions::default())?;
    Ok((0..array.len())
        .map(|i| {
            if array.is_null(i) {
                CellValue::Null
            } else {
                CellValue::Text(formatter.value(i).to_string())
            }
        })
        .collect())
}
