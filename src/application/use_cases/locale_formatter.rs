// ============================================================
// LOCALE FORMATTER
// ============================================================
// German display conventions: parsed time column, decimal-comma numbers
//
// Terminal transform: numeric columns become text and cannot be filtered
// numerically afterwards, so this runs only right before spreadsheet export.

use chrono::NaiveDateTime;
use tracing::debug;

use crate::domain::error::{AppError, Result};
use crate::domain::table::{CellValue, Column, ColumnType, Table};

/// Source pattern of the time column, `YYYY/MM/DD hh:mm`
pub const SOURCE_TIME_PATTERN: &str = "%Y/%m/%d %H:%M";

/// Convert `time_column` to date-times and every numeric column to
/// two-decimal text with a decimal comma. The input is left untouched.
pub fn format(table: &Table, time_column: &str) -> Result<Table> {
    table.require_column(time_column)?;

    let columns = table
        .columns()
        .iter()
        .map(|column| {
            if column.name() == time_column {
                parse_time_column(column)
            } else if column.kind().is_numeric() {
                Ok(decimal_comma_column(column))
            } else {
                Ok(column.clone())
            }
        })
        .collect::<Result<Vec<_>>>()?;

    debug!(time_column, columns = columns.len(), "Locale formatting applied");
    Table::new(columns)
}

fn parse_time_column(column: &Column) -> Result<Column> {
    let cells = column
        .cells()
        .iter()
        .enumerate()
        .map(|(row, cell)| match cell {
            CellValue::Null | CellValue::DateTime(_) => Ok(cell.clone()),
            other => {
                let text = other.to_display_string();
                parse_source_time(&text)
                    .map(CellValue::DateTime)
                    .ok_or_else(|| {
                        AppError::ParseError(format!(
                            "column '{}' row {}: '{}' does not match YYYY/MM/DD hh:mm",
                            column.name(),
                            row + 1,
                            text
                        ))
                    })
            }
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Column::new(column.name(), ColumnType::DateTime, cells))
}

/// Parse exactly `YYYY/MM/DD hh:mm`. Unpadded fields and surrounding
/// whitespace are rejected, which chrono alone would accept.
pub fn parse_source_time(value: &str) -> Option<NaiveDateTime> {
    let shape_ok = value.len() == 16
        && value.bytes().enumerate().all(|(idx, b)| match idx {
            4 | 7 => b == b'/',
            10 => b == b' ',
            13 => b == b':',
            _ => b.is_ascii_digit(),
        });
    if !shape_ok {
        return None;
    }
    NaiveDateTime::parse_from_str(value, SOURCE_TIME_PATTERN).ok()
}

fn decimal_comma_column(column: &Column) -> Column {
    let cells = column
        .cells()
        .iter()
        .map(|cell| match cell {
            CellValue::Integer(value) => CellValue::Text(format!("{},00", value)),
            CellValue::Float(value) => CellValue::Text(decimal_comma(*value)),
            other => other.clone(),
        })
        .collect();

    Column::new(column.name(), ColumnType::Text, cells)
}

/// `3.1` becomes `"3,10"`
pub fn decimal_comma(value: f64) -> String {
    format!("{:.2}", value).replace('.', ",")
}
