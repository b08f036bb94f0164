// ============================================================
// TABLE DOMAIN LAYER
// ============================================================
// Core types for loaded tables, uploads and export artifacts
// No I/O, no async

mod cell;
mod edit_step;
mod encoding_label;
mod export_artifact;
mod load_options;
mod raw_file;
mod tabular;

pub use cell::{CellValue, ColumnType};
pub use edit_step::EditStep;
pub use encoding_label::EncodingLabel;
pub use export_artifact::{export_stem, ExportArtifact, CSV_MIME, XLSX_MIME};
pub use load_options::{DelimiterChoice, LoadOptions};
pub use raw_file::RawFile;
pub use tabular::{Column, Table};
