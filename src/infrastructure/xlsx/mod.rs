// ============================================================
// XLSX INFRASTRUCTURE LAYER
// ============================================================

mod spreadsheet_writer;

pub use spreadsheet_writer::{to_spreadsheet, DEFAULT_SHEET_NAME, GERMAN_DATETIME_FORMAT};
