// ============================================================
// SPREADSHEET WRITER
// ============================================================
// Single-sheet .xlsx output with German date display for the time column

use rust_xlsxwriter::{Format, Workbook, Worksheet};
use tracing::debug;

use crate::domain::error::{AppError, Result};
use crate::domain::table::{CellValue, Table};

pub const DEFAULT_SHEET_NAME: &str = "Daten";
pub const GERMAN_DATETIME_FORMAT: &str = "dd/mm/yyyy hh:mm";

/// Write header and data rows into one sheet named `sheet_name`.
///
/// Date-time cells of `time_column` get the `dd/mm/yyyy hh:mm` number format.
/// Other cells are written as strings or numbers according to their value.
pub fn to_spreadsheet(table: &Table, time_column: &str, sheet_name: &str) -> Result<Vec<u8>> {
    let time_index = table
        .column_index(time_column)
        .ok_or_else(|| AppError::ColumnNotFound(time_column.to_string()))?;

    let mut workbook = Workbook::new();
    let datetime_format = Format::new().set_num_format(GERMAN_DATETIME_FORMAT);

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet_name)?;

    for (col, column) in table.columns().iter().enumerate() {
        let col = to_col(col)?;
        worksheet.write_string(0, col, column.name())?;

        for (row, cell) in column.cells().iter().enumerate() {
            let row = to_row(row + 1)?;
            let is_time_column = usize::from(col) == time_index;
            write_cell(worksheet, row, col, cell, is_time_column, &datetime_format)?;
        }
    }

    debug!(
        rows = table.row_count(),
        columns = table.column_count(),
        "Spreadsheet written"
    );

    Ok(workbook.save_to_buffer()?)
}

fn write_cell(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    cell: &CellValue,
    is_time_column: bool,
    datetime_format: &Format,
) -> Result<()> {
    match cell {
        CellValue::Null => {}
        CellValue::Text(value) => {
            worksheet.write_string(row, col, value)?;
        }
        CellValue::Integer(value) => {
            worksheet.write_number(row, col, *value as f64)?;
        }
        CellValue::Float(value) => {
            worksheet.write_number(row, col, *value)?;
        }
        CellValue::DateTime(value) if is_time_column => {
            worksheet.write_datetime_with_format(row, col, value, datetime_format)?;
        }
        CellValue::DateTime(value) => {
            worksheet.write_string(row, col, cell_text(value))?;
        }
    }
    Ok(())
}

fn cell_text(value: &chrono::NaiveDateTime) -> String {
    value.format("%Y-%m-%d %H:%M:%S").to_string()
}

fn to_row(index: usize) -> Result<u32> {
    u32::try_from(index)
        .map_err(|_| AppError::ExportError(format!("row {} exceeds spreadsheet limits", index)))
}

fn to_col(index: usize) -> Result<u16> {
    u16::try_from(index)
        .map_err(|_| AppError::ExportError(format!("column {} exceeds spreadsheet limits", index)))
}
