use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AppError {
    /// Bytes are not valid under the detected or declared encoding.
    DecodeError(String),
    /// Malformed delimited text, or a time value not matching the expected pattern.
    ParseError(String),
    ColumnNotFound(String),
    /// No file was provided. Callers treat this as the idle state, not a failure.
    EmptyInput,
    ValidationError(String),
    ExportError(String),
    ConfigError(String),
    IoError(String),
    Internal(String),
}

impl AppError {
    /// Stable tag used by the HTTP layer.
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::DecodeError(_) => "decode_error",
            AppError::ParseError(_) => "parse_error",
            AppError::ColumnNotFound(_) => "column_not_found",
            AppError::EmptyInput => "empty_input",
            AppError::ValidationError(_) => "validation_error",
            AppError::ExportError(_) => "export_error",
            AppError::ConfigError(_) => "config_error",
            AppError::IoError(_) => "io_error",
            AppError::Internal(_) => "internal",
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, AppError::EmptyInput)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::DecodeError(msg) => write!(f, "Decode error: {}", msg),
            AppError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            AppError::ColumnNotFound(name) => write!(f, "Column not found: {}", name),
            AppError::EmptyInput => write!(f, "No file provided"),
            AppError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            AppError::ExportError(msg) => write!(f, "Export error: {}", msg),
            AppError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            AppError::IoError(msg) => write!(f, "IO error: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::IoError(err.to_string())
    }
}

impl From<csv::Error> for AppError {
    fn from(err: csv::Error) -> Self {
        match err.kind() {
            csv::ErrorKind::Io(_) => AppError::IoError(err.to_string()),
            _ => AppError::ParseError(err.to_string()),
        }
    }
}

impl From<rust_xlsxwriter::XlsxError> for AppError {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        AppError::ExportError(err.to_string())
    }
}

impl From<figment::Error> for AppError {
    fn from(err: figment::Error) -> Self {
        AppError::ConfigError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
