// Spreadsheet input/output
//
// Reading goes through calamine, which understands .xlsx, .xlsm, .xls and
// .ods. Only the first worksheet is used. Writing always produces .xlsx.

use calamine::{open_workbook_auto, Data, Reader};
use rust_xlsxwriter::{Format, Workbook};
use std::path::Path;

use super::Table;
use crate::error::{ExportError, InputError};

pub fn read(path: &Path) -> Result<Table, InputError> {
    let read_error = |message: String| InputError::Read {
        path: path.to_path_buf(),
        message,
    };

    let mut workbook = open_workbook_auto(path).map_err(|e| read_error(e.to_string()))?;
    let range = match workbook.worksheet_range_at(0) {
        Some(range) => range.map_err(|e| read_error(e.to_string()))?,
        None => return Err(InputError::Empty),
    };

    let mut rows = range.rows();
    let headers = match rows.next() {
        Some(header_row) => header_row.iter().map(cell_text).collect(),
        None => return Err(InputError::Empty),
    };
    let records = rows
        .map(|row| row.iter().map(cell_text).collect())
        .collect();

    Ok(Table { headers, records })
}

// Spreadsheets store whole numbers as floats; print 3.0 as "3"
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(n) if n.fract() == 0.0 && n.abs() < 1e15 => format!("{}", *n as i64),
        other => other.to_string(),
    }
}

pub fn write(table: &Table) -> Result<Vec<u8>, ExportError> {
    let too_large = || ExportError::TooLarge {
        rows: table.records.len() + 1,
        columns: table.headers.len(),
    };

    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();
    let worksheet = workbook.add_worksheet();

    for (col, header) in table.headers.iter().enumerate() {
        let col = u16::try_from(col).map_err(|_| too_large())?;
        worksheet.write_string_with_format(0, col, header, &header_format)?;
    }

    for (row, record) in table.records.iter().enumerate() {
        let row = u32::try_from(row + 1).map_err(|_| too_large())?;
        for (col, value) in record.iter().enumerate() {
            if value.is_empty() {
                continue;
            }
            let col = u16::try_from(col).map_err(|_| too_large())?;
            worksheet.write_string(row, col, value)?;
        }
    }

    Ok(workbook.save_to_buffer()?)
}
