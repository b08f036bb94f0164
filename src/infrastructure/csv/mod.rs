// ============================================================
// CSV INFRASTRUCTURE LAYER
// ============================================================
// Encoding detection, header repair, parsing, type inference and writing

mod column_analyzer;
mod csv_parser;
mod delimited_writer;
pub mod encoding_detector;
pub mod header_repair;

pub use column_analyzer::ColumnAnalyzer;
pub use csv_parser::{CsvParser, RawCsv};
pub use delimited_writer::to_delimited;
