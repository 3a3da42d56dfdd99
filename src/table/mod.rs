// src/table/mod.rs
// =============================================================================
// Reading the input spreadsheet and writing the result spreadsheet.
//
// Only a minimal schema matters to us:
// - a header row containing a "URL" column (required)
// - an optional "Status" column; cells that hold a status we wrote earlier
//   count as already resolved and are not checked again
//
// Every other column is carried through to the output as text: a numeric or
// date cell read from a spreadsheet comes back as a string cell holding the
// same digits. Rows keep their positions, so the output has one record per
// input record; only blank rows at the very end of the input are dropped.
//
// Submodules:
// - csv: .csv files (csv crate)
// - xlsx: .xlsx/.xlsm/.xls/.ods in (calamine), .xlsx out (rust_xlsxwriter)
// - sample: a small demo input file
// =============================================================================

mod csv;
mod sample;
mod xlsx;

pub use sample::sample_table;

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::checker::Status;
use crate::engine::Row;
use crate::error::{ExportError, InputError};

pub const URL_COLUMN: &str = "URL";
pub const STATUS_COLUMN: &str = "Status";
/// Status given at load time to rows whose URL cell is blank
pub const MISSING_URL_REASON: &str = "missing URL";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    Csv,
    Xlsx,
}

impl TableFormat {
    /// Picks the format from the file extension (case-insensitive)
    pub fn from_path(path: &Path) -> Result<Self, InputError> {
        let ext = path
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "csv" => Ok(TableFormat::Csv),
            // Everything calamine reads is written back as .xlsx
            "xlsx" | "xlsm" | "xls" | "ods" => Ok(TableFormat::Xlsx),
            _ => Err(InputError::UnsupportedFormat(path.to_path_buf())),
        }
    }

    /// Format to write `path` in. Only formats we can produce are accepted.
    pub fn for_output(path: &Path) -> Result<Self, ExportError> {
        let ext = path
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "csv" => Ok(TableFormat::Csv),
            "xlsx" => Ok(TableFormat::Xlsx),
            _ => Err(ExportError::UnsupportedOutput(path.to_path_buf())),
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            TableFormat::Csv => "csv",
            TableFormat::Xlsx => "xlsx",
        }
    }
}

/// A header row plus data rows, all as text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub headers: Vec<String>,
    pub records: Vec<Vec<String>>,
}

impl Table {
    pub fn read(path: &Path) -> Result<(Self, TableFormat), InputError> {
        let format = TableFormat::from_path(path)?;
        let mut table = match format {
            TableFormat::Csv => csv::read(path)?,
            TableFormat::Xlsx => xlsx::read(path)?,
        };

        // Blank lines at the end of a file are formatting, not data. Blank
        // rows in the middle keep their place and resolve as missing URLs.
        while table.records.last().is_some_and(|record| is_blank(record)) {
            table.records.pop();
        }

        Ok((table, format))
    }

    pub fn render(&self, format: TableFormat) -> Result<Vec<u8>, ExportError> {
        match format {
            TableFormat::Csv => csv::write(self),
            TableFormat::Xlsx => xlsx::write(self),
        }
    }

    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers
            .iter()
            .position(|header| header.trim_start_matches('\u{feff}').trim() == name)
    }

    /// Turns the data rows into engine rows, keyed by their position
    pub fn to_rows(&self) -> Result<Vec<Row>, InputError> {
        if self.headers.iter().all(|header| header.trim().is_empty()) {
            return Err(InputError::Empty);
        }
        let url_col = self.column(URL_COLUMN).ok_or(InputError::MissingUrlColumn)?;
        if self.records.is_empty() {
            return Err(InputError::Empty);
        }
        let status_col = self.column(STATUS_COLUMN);

        let rows = self
            .records
            .iter()
            .enumerate()
            .map(|(index, record)| {
                let url = cell(record, url_col).trim().to_string();
                let status = if url.is_empty() {
                    Some(Status::Invalid(MISSING_URL_REASON.to_string()))
                } else {
                    status_col.and_then(|col| existing_status(index, cell(record, col)))
                };
                Row { index, url, status }
            })
            .collect();

        Ok(rows)
    }

    /// Copy of this table with the Status column filled from `rows`.
    ///
    /// The column is appended when missing. Unresolved rows get a blank cell.
    pub fn with_statuses(&self, rows: &[Row]) -> Table {
        let mut headers = self.headers.clone();
        let status_col = match self.column(STATUS_COLUMN) {
            Some(col) => col,
            None => {
                headers.push(STATUS_COLUMN.to_string());
                headers.len() - 1
            }
        };

        let statuses: HashMap<usize, &Status> = rows
            .iter()
            .filter_map(|row| row.status.as_ref().map(|status| (row.index, status)))
            .collect();

        let records = self
            .records
            .iter()
            .enumerate()
            .map(|(index, record)| {
                let mut record = record.clone();
                if record.len() < headers.len() {
                    record.resize(headers.len(), String::new());
                }
                record[status_col] = statuses
                    .get(&index)
                    .map(|status| status.to_string())
                    .unwrap_or_default();
                record
            })
            .collect();

        Table { headers, records }
    }
}

/// Where the result of checking a `input_format` file goes.
///
/// An explicit `output` path decides the format by its own extension;
/// otherwise the result mirrors the input format under a default name.
pub fn output_target(
    input_format: TableFormat,
    output: Option<PathBuf>,
    default_stem: &str,
) -> Result<(PathBuf, TableFormat), ExportError> {
    match output {
        Some(path) => {
            let format = TableFormat::for_output(&path)?;
            Ok((path, format))
        }
        None => {
            let path = PathBuf::from(format!("{}.{}", default_stem, input_format.extension()));
            Ok((path, input_format))
        }
    }
}

fn is_blank(record: &[String]) -> bool {
    record.iter().all(|cell| cell.trim().is_empty())
}

fn cell(record: &[String], col: usize) -> &str {
    record.get(col).map(String::as_str).unwrap_or("")
}

fn existing_status(index: usize, text: &str) -> Option<Status> {
    if text.trim().is_empty() {
        return None;
    }
    match text.parse() {
        Ok(status) => Some(status),
        Err(e) => {
            warn!(
                row = index,
                error = %e,
                "unrecognised Status cell, the URL will be checked again"
            );
            None
        }
    }
}
