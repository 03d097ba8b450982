//! Read-only tabular dataset snapshot

mod column;
mod summary;
mod table;

use std::fs::File;
use std::io::Read;
use std::path::Path;

use thiserror::Error;

pub use column::{Column, ColumnData};
pub use summary::NumericSummary;
pub(crate) use table::render_table;

/// Cell spellings treated as missing when loading CSV data
const MISSING_MARKERS: &[&str] = &["", "NA", "N/A", "NaN", "nan", "null", "NULL", "None"];

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Column '{column}' has {found} rows, expected {expected}")]
    ColumnLength {
        column: String,
        expected: usize,
        found: usize,
    },
}

/// Named columns of equal length
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    columns: Vec<Column>,
}

impl Dataset {
    pub fn new(columns: Vec<Column>) -> Result<Self, DatasetError> {
        if let Some(first) = columns.first() {
            let expected = first.len();

            if let Some(bad) = columns.iter().find(|c| c.len() != expected) {
                return Err(DatasetError::ColumnLength {
                    column: bad.name().to_string(),
                    expected,
                    found: bad.len(),
                });
            }
        }

        Ok(Self { columns })
    }

    /// Load a dataset from CSV with a header row.
    ///
    /// A column is numeric when every non-missing cell parses as a number.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, DatasetError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
        let mut cells: Vec<Vec<Option<String>>> = vec![Vec::new(); headers.len()];

        for record in reader.records() {
            let record = record?;

            for (index, column) in cells.iter_mut().enumerate() {
                let cell = record
                    .get(index)
                    .filter(|value| !MISSING_MARKERS.contains(value))
                    .map(str::to_string);
                column.push(cell);
            }
        }

        let columns = headers
            .into_iter()
            .zip(cells)
            .map(|(name, values)| infer_column(name, values))
            .collect();

        Self::new(columns)
    }

    pub fn from_csv_path(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let file = File::open(path)?;
        Self::from_csv_reader(file)
    }

    pub fn row_count(&self) -> usize {
        self.columns.first().map(Column::len).unwrap_or(0)
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(Column::name).collect()
    }

    pub fn numeric_columns(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter().filter(|c| c.is_numeric())
    }

    pub fn text_columns(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter().filter(|c| !c.is_numeric())
    }

    /// First `n` rows rendered as an aligned table without an index column
    pub fn head_table(&self, n: usize) -> String {
        let headers = self.column_names();
        let rows: Vec<Vec<String>> = (0..self.row_count().min(n))
            .map(|row| self.columns.iter().map(|c| c.display_cell(row)).collect())
            .collect();

        render_table(&headers, &rows, None)
    }

    /// Summary statistics table, one column per numeric column
    pub fn describe_table(&self) -> Option<String> {
        let numeric: Vec<&Column> = self.numeric_columns().collect();
        if numeric.is_empty() {
            return None;
        }

        let headers: Vec<&str> = numeric.iter().map(|c| c.name()).collect();
        let summaries: Vec<NumericSummary> =
            numeric.iter().filter_map(|c| c.summary()).collect();

        let rows: Vec<Vec<String>> = (0..NumericSummary::LABELS.len())
            .map(|stat| {
                summaries
                    .iter()
                    .map(|s| format_statistic(s.values()[stat]))
                    .collect()
            })
            .collect();

        Some(render_table(&headers, &rows, Some(&NumericSummary::LABELS[..])))
    }

    /// One-line description used when the remote model is unavailable
    pub fn shape_summary(&self) -> String {
        format!(
            "Dataset has {} rows and {} columns. Columns: {}",
            self.row_count(),
            self.column_count(),
            self.column_names().join(", ")
        )
    }
}

fn format_statistic(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else {
        format!("{:.6}", value)
    }
}

fn infer_column(name: String, values: Vec<Option<String>>) -> Column {
    let parsed: Option<Vec<Option<f64>>> = values
        .iter()
        .map(|cell| match cell {
            Some(raw) => raw.parse::<f64>().ok().map(Some),
            None => Some(None),
        })
        .collect();

    match parsed {
        Some(numbers) => Column::numeric(name, numbers),
        None => Column::text(name, values),
    }
}
