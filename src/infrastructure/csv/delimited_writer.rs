// ============================================================
// DELIMITED WRITER
// ============================================================
// Serialize a table as UTF-8 delimited text with a header row

use csv::{QuoteStyle, Terminator, WriterBuilder};

use crate::domain::error::{AppError, Result};
use crate::domain::table::Table;

/// Header row, then one line per record. No row index column.
///
/// Fields containing the delimiter, a quote or a line break are quoted.
pub fn to_delimited(table: &Table, delimiter: u8) -> Result<Vec<u8>> {
    let mut writer = WriterBuilder::new()
        .delimiter(delimiter)
        .quote_style(QuoteStyle::Necessary)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(table.column_names())?;

    for index in 0..table.row_count() {
        let row = table.row(index).ok_or_else(|| {
            AppError::Internal(format!("row {} missing while exporting", index))
        })?;
        writer.write_record(row.iter().map(|cell| cell.to_display_string()))?;
    }

    writer
        .into_inner()
        .map_err(|e| AppError::ExportError(format!("Failed to flush CSV output: {}", e)))
}
