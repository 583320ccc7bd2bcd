//! In-memory tabular record set read from and written back to a CSV file
//! or Excel workbook.
//!
//! Row 0 is the header. Columns are located by substring match on the
//! header, so `submission status (auto)` still matches `submission status`.

use thiserror::Error;

pub mod file;

pub use file::{processed_path, read_table, write_table, TableFormat};

/// Failures reading, writing or addressing a tabular file.
#[derive(Error, Debug)]
pub enum TableError {
    /// The file extension is not a supported tabular format.
    #[error("unsupported file format: '{0}' (supported: .csv, .xlsx, .xls)")]
    UnsupportedFormat(String),

    /// The workbook has no worksheet to read.
    #[error("no worksheet found in {0}")]
    NoWorksheet(String),

    /// No header cell contains the requested column name.
    #[error("column '{0}' not found in header")]
    MissingColumn(String),

    /// The requested row range does not fit the table.
    #[error("invalid row range: {0}")]
    InvalidRange(String),

    /// The Excel reader or writer failed.
    #[error("Excel error: {0}")]
    Excel(String),

    /// The CSV reader or writer failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The underlying file could not be accessed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Ordered rows of string cells; the first row is the header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordTable {
    rows: Vec<Vec<String>>,
}

impl RecordTable {
    /// Wraps raw rows.
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }

    /// Returns all rows, header included.
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Consumes the table and returns its rows.
    pub fn into_rows(self) -> Vec<Vec<String>> {
        self.rows
    }

    /// Returns the header row, empty when the table has no rows.
    pub fn header(&self) -> &[String] {
        self.rows.first().map(Vec::as_slice).unwrap_or_default()
    }

    /// Total number of rows, header included.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true when there is not even a header.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the index of the first header cell containing `needle`.
    pub fn find_column(&self, needle: &str) -> Option<usize> {
        self.header().iter().position(|cell| cell.contains(needle))
    }

    /// Returns the index of `name`, appending it when absent.
    ///
    /// Appending pads every data row with empty cells up to the new header
    /// width.
    pub fn ensure_column(&mut self, name: &str) -> usize {
        if let Some(index) = self.find_column(name) {
            return index;
        }

        if self.rows.is_empty() {
            self.rows.push(Vec::new());
        }
        self.rows[0].push(name.to_string());
        let width = self.rows[0].len();
        for row in self.rows.iter_mut().skip(1) {
            if row.len() < width {
                row.resize(width, String::new());
            }
        }
        width - 1
    }

    /// Returns the cell at `(row, column)`, if present.
    pub fn cell(&self, row: usize, column: usize) -> Option<&str> {
        self.rows.get(row)?.get(column).map(String::as_str)
    }

    /// Overwrites the cell at `(row, column)`.
    ///
    /// Data rows shorter than `column` are padded first. Returns false when
    /// the row does not exist.
    pub fn set_cell(&mut self, row: usize, column: usize, value: &str) -> bool {
        let Some(cells) = self.rows.get_mut(row) else {
            return false;
        };
        if cells.len() <= column {
            cells.resize(column + 1, String::new());
        }
        cells[column] = value.to_string();
        true
    }
}
