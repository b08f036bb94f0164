pub mod use_cases;

pub use use_cases::locale_formatter;
pub use use_cases::table_editor;
pub use use_cases::table_export::TableExporter;
pub use use_cases::table_loader::{LoadedTable, TableLoader, UploadState};
