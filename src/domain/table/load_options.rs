// ============================================================
// LOAD OPTIONS
// ============================================================
// How uploaded bytes are decoded and split into fields

use serde::{Deserialize, Serialize};

use crate::domain::error::{AppError, Result};

/// Field separator used when reading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DelimiterChoice {
    /// Sniff among comma, semicolon, tab and pipe
    Auto,
    Char(u8),
}

impl Default for DelimiterChoice {
    fn default() -> Self {
        DelimiterChoice::Char(b',')
    }
}

impl DelimiterChoice {
    /// Parse `"auto"` or a single ASCII character (`"\t"` and `"tab"` mean tab)
    pub fn parse(value: &str) -> Result<Self> {
        match value {
            "auto" => Ok(DelimiterChoice::Auto),
            "\t" | "tab" => Ok(DelimiterChoice::Char(b'\t')),
            other => {
                let bytes = other.as_bytes();
                match bytes {
                    [b] if b.is_ascii() && !matches!(b, b'"' | b'\n' | b'\r') => {
                        Ok(DelimiterChoice::Char(*b))
                    }
                    _ => Err(AppError::ValidationError(format!(
                        "delimiter must be 'auto' or a single ASCII character, got '{}'",
                        other
                    ))),
                }
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadOptions {
    /// Declared encoding label. `None` means detect from the bytes.
    #[serde(default)]
    pub encoding: Option<String>,

    #[serde(default)]
    pub delimiter: DelimiterChoice,
}

impl LoadOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_encoding(mut self, label: impl Into<String>) -> Self {
        self.encoding = Some(label.into());
        self
    }

    pub fn with_delimiter(mut self, delimiter: DelimiterChoice) -> Self {
        self.delimiter = delimiter;
        self
    }
}
