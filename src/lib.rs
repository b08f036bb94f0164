//! Upload a CSV file in an unknown encoding, repair mis-decoded headers,
//! select, rename and filter its columns, and export it either as a
//! semicolon-separated CSV or as a German-formatted spreadsheet.

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;

mod app;

pub use app::run;
pub use application::{LoadedTable, TableExporter, TableLoader, UploadState};
pub use domain::error::{AppError, Result};
pub use infrastructure::config::AppConfig;
