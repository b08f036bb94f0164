// ============================================================
// EXPORT ARTIFACT
// ============================================================
// Downloadable bytes with their file name and MIME type

use serde::{Deserialize, Serialize};

pub const CSV_MIME: &str = "text/csv";
pub const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportArtifact {
    pub file_name: String,
    pub mime_type: String,
    #[serde(skip)]
    pub bytes: Vec<u8>,
}

impl ExportArtifact {
    pub fn new(file_name: String, mime_type: &str, bytes: Vec<u8>) -> Self {
        Self {
            file_name,
            mime_type: mime_type.to_string(),
            bytes,
        }
    }

    /// `Content-Disposition` value offering the bytes as a download
    pub fn content_disposition(&self) -> String {
        let escaped = self.file_name.replace('\\', "_").replace('"', "_");
        format!("attachment; filename=\"{}\"", escaped)
    }
}

/// Stem of a declared upload name with directories and the last extension removed.
///
/// Characters that are unsafe in download names become `_`. Returns `fallback`
/// when nothing usable is left.
pub fn export_stem(file_name: &str, fallback: &str) -> String {
    let base = file_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or("")
        .trim();

    let stem = match base.rfind('.') {
        Some(0) | None => base,
        Some(idx) => &base[..idx],
    };

    let cleaned: String = stem
        .chars()
        .map(|c| {
            if c.is_control() || matches!(c, ':' | '*' | '?' | '"' | '<' | '>' | '|') {
                '_'
            } else {
                c
            }
        })
        .collect();

    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        fallback.to_string()
    } else {
        cleaned.to_string()
    }
}
