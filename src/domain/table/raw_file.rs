// ============================================================
// RAW FILE
// ============================================================
// Uploaded bytes plus the read cursor shared by detector and loader

use std::io::Cursor;

/// An uploaded file: immutable bytes, its declared name and a read cursor
#[derive(Debug, Clone)]
pub struct RawFile {
    file_name: String,
    cursor: Cursor<Vec<u8>>,
}

impl RawFile {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            cursor: Cursor::new(bytes),
        }
    }

    /// Declared upload name. Only used to name export artifacts.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn bytes(&self) -> &[u8] {
        self.cursor.get_ref()
    }

    pub fn position(&self) -> u64 {
        self.cursor.position()
    }

    pub fn cursor_mut(&mut self) -> &mut Cursor<Vec<u8>> {
        &mut self.cursor
    }
}
