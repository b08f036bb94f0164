// ============================================================
// TABLE EXPORT USE CASE
// ============================================================
// Build downloadable CSV and spreadsheet artifacts

use tracing::info;

use super::locale_formatter;
use crate::domain::error::Result;
use crate::domain::table::{export_stem, ExportArtifact, Table, CSV_MIME, XLSX_MIME};
use crate::infrastructure::config::ExportConfig;
use crate::infrastructure::csv::to_delimited;
use crate::infrastructure::xlsx::to_spreadsheet;

pub struct TableExporter {
    config: ExportConfig,
}

impl Default for TableExporter {
    fn default() -> Self {
        Self::new(ExportConfig::default())
    }
}

impl TableExporter {
    pub fn new(config: ExportConfig) -> Self {
        Self { config }
    }

    /// Semicolon-separated (by default) UTF-8 CSV named `<stem>_semicolon.csv`
    pub fn export_csv(&self, table: &Table, upload_name: &str) -> Result<ExportArtifact> {
        let delimiter = self.config.csv_delimiter_byte()?;
        let bytes = to_delimited(table, delimiter)?;
        let file_name = self.file_name(upload_name, &self.config.csv_suffix);

        info!(file_name = %file_name, bytes = bytes.len(), "CSV export ready");
        Ok(ExportArtifact::new(file_name, CSV_MIME, bytes))
    }

    /// Locale-format the table, then write it as `<stem>_de.xlsx`
    pub fn export_spreadsheet(
        &self,
        table: &Table,
        time_column: &str,
        upload_name: &str,
    ) -> Result<ExportArtifact> {
        let formatted = locale_formatter::format(table, time_column)?;
        let bytes = to_spreadsheet(&formatted, time_column, &self.config.sheet_name)?;
        let file_name = self.file_name(upload_name, &self.config.xlsx_suffix);

        info!(file_name = %file_name, bytes = bytes.len(), "Spreadsheet export ready");
        Ok(ExportArtifact::new(file_name, XLSX_MIME, bytes))
    }

    fn file_name(&self, upload_name: &str, suffix: &str) -> String {
        format!("{}{}", export_stem(upload_name, &self.config.fallback_stem), suffix)
    }
}
