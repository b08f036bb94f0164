// ============================================================
// ENCODING LABEL
// ============================================================
// Resolved text encoding of an uploaded file

use encoding_rs::Encoding;
use serde::{Serialize, Serializer};
use std::fmt;

use crate::domain::error::{AppError, Result};

/// A text encoding known to the decoder.
///
/// Labels resolve through the WHATWG table, so `ISO-8859-1` and `latin1`
/// both name windows-1252.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodingLabel(&'static Encoding);

impl EncodingLabel {
    pub fn utf8() -> Self {
        Self(encoding_rs::UTF_8)
    }

    pub fn from_encoding(encoding: &'static Encoding) -> Self {
        Self(encoding)
    }

    /// Resolve a user-facing label such as `"utf-8"` or `"ISO-8859-1"`
    pub fn parse(label: &str) -> Result<Self> {
        Encoding::for_label(label.trim().as_bytes())
            .map(Self)
            .ok_or_else(|| AppError::DecodeError(format!("unknown encoding label '{}'", label)))
    }

    pub fn encoding(&self) -> &'static Encoding {
        self.0
    }

    pub fn name(&self) -> &'static str {
        self.0.name()
    }
}

impl fmt::Display for EncodingLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl Serialize for EncodingLabel {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}
