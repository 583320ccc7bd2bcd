//! File persistence for [`RecordTable`]: CSV and Excel workbooks.
//!
//! The format follows the file extension. Excel input (`.xlsx` or `.xls`)
//! is read from its first worksheet; Excel output is always `.xlsx`.

use std::path::{Path, PathBuf};

use calamine::{open_workbook_auto, Reader};
use csv::{ReaderBuilder, WriterBuilder};
use rust_xlsxwriter::Workbook;
use tracing::debug;

use super::{RecordTable, TableError};

/// On-disk tabular formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    /// Comma-separated values.
    Csv,
    /// Excel workbook (`.xlsx`, or legacy `.xls` on input).
    Excel,
}

impl TableFormat {
    /// Picks the format from the file extension, case-insensitively.
    pub fn from_path(path: &Path) -> Result<Self, TableError> {
        let extension = path
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        match extension.as_str() {
            "csv" => Ok(Self::Csv),
            "xlsx" | "xls" => Ok(Self::Excel),
            _ => Err(TableError::UnsupportedFormat(format!(".{extension}"))),
        }
    }

    /// Extension used for files written in this format.
    pub fn output_extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Excel => "xlsx",
        }
    }
}

/// Reads every row of a tabular file; rows may have differing lengths.
pub fn read_table(path: &Path) -> Result<RecordTable, TableError> {
    let table = match TableFormat::from_path(path)? {
        TableFormat::Csv => read_csv(path)?,
        TableFormat::Excel => read_excel(path)?,
    };
    debug!(path = %path.display(), rows = table.len(), "Read tabular file");
    Ok(table)
}

/// Writes every row of `table`, replacing the file.
pub fn write_table(path: &Path, table: &RecordTable) -> Result<(), TableError> {
    match TableFormat::from_path(path)? {
        TableFormat::Csv => write_csv(path, table)?,
        TableFormat::Excel => write_excel(path, table)?,
    }
    debug!(path = %path.display(), rows = table.len(), "Wrote tabular file");
    Ok(())
}

/// Returns the output path for a processed file: `<stem>_processed.csv`
/// for CSV input, `<stem>_processed.xlsx` for Excel input.
pub fn processed_path(path: &Path) -> Result<PathBuf, TableError> {
    let format = TableFormat::from_path(path)?;
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(path.with_file_name(format!(
        "{stem}_processed.{}",
        format.output_extension()
    )))
}

fn read_csv(path: &Path) -> Result<RecordTable, TableError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;

    let mut rows = Vec::new();
    for record in reader.records() {
        rows.push(record?.iter().map(String::from).collect());
    }
    Ok(RecordTable::new(rows))
}

fn write_csv(path: &Path, table: &RecordTable) -> Result<(), TableError> {
    let mut writer = WriterBuilder::new().flexible(true).from_path(path)?;
    for row in table.rows() {
        writer.write_record(row)?;
    }
    writer.flush()?;
    Ok(())
}

fn read_excel(path: &Path) -> Result<RecordTable, TableError> {
    let mut workbook =
        open_workbook_auto(path).map_err(|e| TableError::Excel(e.to_string()))?;
    let sheet = workbook.sheet_names().first().cloned();
    let Some(sheet) = sheet else {
        return Err(TableError::NoWorksheet(path.display().to_string()));
    };
    debug!(path = %path.display(), sheet, "Reading first worksheet");

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| TableError::NoWorksheet(path.display().to_string()))?
        .map_err(|e| TableError::Excel(e.to_string()))?;

    // The used range may start below or right of A1; keep cell positions.
    let (first_row, first_column) = range.start().unwrap_or((0, 0));
    let mut rows: Vec<Vec<String>> = vec![Vec::new(); first_row as usize];
    for cells in range.rows() {
        let mut row = vec![String::new(); first_column as usize];
        row.extend(cells.iter().map(ToString::to_string));
        while row.last().is_some_and(String::is_empty) {
            row.pop();
        }
        rows.push(row);
    }
    Ok(RecordTable::new(rows))
}

fn write_excel(path: &Path, table: &RecordTable) -> Result<(), TableError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    for (row_index, row) in table.rows().iter().enumerate() {
        let row_number = u32::try_from(row_index)
            .map_err(|_| TableError::Excel(format!("row {row_index} exceeds worksheet limits")))?;
        for (column_index, value) in row.iter().enumerate() {
            if value.is_empty() {
                continue;
            }
            let column_number = u16::try_from(column_index).map_err(|_| {
                TableError::Excel(format!("column {column_index} exceeds worksheet limits"))
            })?;
            worksheet
                .write_string(row_number, column_number, value)
                .map_err(|e| TableError::Excel(e.to_string()))?;
        }
    }

    workbook
        .save(path)
        .map_err(|e| TableError::Excel(e.to_string()))
}
