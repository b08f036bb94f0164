// ============================================================
// TABLE LOADER USE CASE
// ============================================================
// Detect encoding, decode, parse and repair headers of an upload

use std::borrow::Cow;
use std::io::Read;

use encoding_rs::Encoding;
use serde::Serialize;
use tracing::{debug, info};

use crate::domain::error::{AppError, Result};
use crate::domain::table::{DelimiterChoice, EncodingLabel, LoadOptions, RawFile, Table};
use crate::infrastructure::csv::{encoding_detector, header_repair, CsvParser};

/// A decoded upload together with the encoding it was read with
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoadedTable {
    pub file_name: String,
    pub encoding: EncodingLabel,
    pub table: Table,
}

/// Either nothing has been uploaded yet, or a table is ready
#[derive(Debug, Clone, PartialEq)]
pub enum UploadState {
    Idle,
    Loaded(LoadedTable),
}

/// Decode `bytes` strictly under `encoding`, failing instead of substituting
pub fn decode(bytes: &[u8], encoding: EncodingLabel) -> Result<String> {
    encoding
        .encoding()
        .decode_without_bom_handling_and_without_replacement(bytes)
        .map(Cow::into_owned)
        .ok_or_else(|| {
            AppError::DecodeError(format!("file content is not valid {}", encoding))
        })
}

/// Decode comma-separated bytes under `encoding` and repair column names.
///
/// Zero bytes mean nothing was uploaded and yield `EmptyInput`.
pub fn load(bytes: &[u8], encoding: EncodingLabel) -> Result<Table> {
    if bytes.is_empty() {
        return Err(AppError::EmptyInput);
    }
    let text = decode(bytes, encoding)?;
    parse_repaired(&text, &CsvParser::new())
}

fn parse_repaired(text: &str, parser: &CsvParser) -> Result<Table> {
    parser
        .parse_content(text)?
        .map_headers(header_repair::repair_name)
        .into_table()
}

pub struct TableLoader {
    options: LoadOptions,
}

impl Default for TableLoader {
    fn default() -> Self {
        Self::new(LoadOptions::default())
    }
}

impl TableLoader {
    pub fn new(options: LoadOptions) -> Self {
        Self { options }
    }

    /// Resolve the upload into the idle state or a loaded table
    pub fn open(&self, upload: Option<RawFile>) -> Result<UploadState> {
        match upload {
            None => Ok(UploadState::Idle),
            Some(mut file) => match self.load_file(&mut file) {
                Ok(loaded) => Ok(UploadState::Loaded(loaded)),
                Err(err) if err.is_idle() => Ok(UploadState::Idle),
                Err(err) => Err(err),
            },
        }
    }

    /// Detect without consuming the cursor, then read the file from it
    pub fn load_file(&self, file: &mut RawFile) -> Result<LoadedTable> {
        let detected = encoding_detector::detect_stream(file.cursor_mut())?;

        let mut bytes = Vec::new();
        file.cursor_mut().read_to_end(&mut bytes)?;

        let (encoding, body) = self.resolve_encoding(&bytes, Some(detected))?;
        let table = self.parse(body, encoding)?;
        Ok(self.finish(file.file_name(), encoding, table))
    }

    /// Load raw bytes that are not attached to a cursor
    pub fn load_bytes(&self, file_name: &str, bytes: &[u8]) -> Result<LoadedTable> {
        let (encoding, body) = self.resolve_encoding(bytes, None)?;
        let table = self.parse(body, encoding)?;
        Ok(self.finish(file_name, encoding, table))
    }

    /// BOM wins over a declared label, which wins over detection
    fn resolve_encoding<'a>(
        &self,
        bytes: &'a [u8],
        detected: Option<EncodingLabel>,
    ) -> Result<(EncodingLabel, &'a [u8])> {
        if bytes.is_empty() {
            return Err(AppError::EmptyInput);
        }

        if let Some((encoding, bom_len)) = Encoding::for_bom(bytes) {
            debug!(encoding = encoding.name(), "Byte order mark found");
            return Ok((EncodingLabel::from_encoding(encoding), &bytes[bom_len..]));
        }

        let label = match (&self.options.encoding, detected) {
            (Some(declared), _) => EncodingLabel::parse(declared)?,
            (None, Some(detected)) => detected,
            (None, None) => encoding_detector::detect(bytes),
        };
        Ok((label, bytes))
    }

    fn parse(&self, body: &[u8], encoding: EncodingLabel) -> Result<Table> {
        let text = decode(body, encoding)?;
        let delimiter = match self.options.delimiter {
            DelimiterChoice::Auto => CsvParser::detect_delimiter(&text),
            DelimiterChoice::Char(b) => b,
        };
        parse_repaired(&text, &CsvParser::new().with_delimiter(delimiter))
    }

    fn finish(&self, file_name: &str, encoding: EncodingLabel, table: Table) -> LoadedTable {
        info!(
            encoding = %encoding,
            rows = table.row_count(),
            columns = table.column_count(),
            "Table loaded"
        );
        LoadedTable {
            file_name: file_name.to_string(),
            encoding,
            table,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::table::{CellValue, ColumnType};

    #[test]
    fn test_scenario_latin1_header_is_repaired() {
        // UTF-8 bytes of "℃" read as ISO-8859-1 give "â„ƒ"
        let bytes = "Temp (\u{2103})\n1,5\n2,7\n".as_bytes();
        let latin1 = EncodingLabel::parse("ISO-8859-1").unwrap();

        let table = load(bytes, latin1).unwrap();
        assert_eq!(table.column_names(), vec!["Temp (°C)"]);
        assert_eq!(table.row_count(), 2);
    }

    #[test]
    fn test_double_encoded_utf8_file_is_repaired() {
        let bytes = "Temp (â„ƒ);StraÃŸe;Winkel Â°\n21;Hauptstr.;90\n".as_bytes();
        let loader = TableLoader::new(LoadOptions::new().with_delimiter(DelimiterChoice::Char(b';')));

        let loaded = loader.load_bytes("messung.csv", bytes).unwrap();
        assert_eq!(loaded.encoding.name(), "UTF-8");
        assert_eq!(
            loaded.table.column_names(),
            vec!["Temp (°C)", "Straße", "Winkel °"]
        );
    }

    #[test]
    fn test_invalid_bytes_fail_with_decode_error() {
        let bytes = b"Stadt\nK\xf6ln\n";
        let err = load(bytes, EncodingLabel::utf8()).unwrap_err();
        assert_eq!(err.kind(), "decode_error");
    }

    #[test]
    fn test_declared_encoding_wins_over_detection() {
        let bytes = b"Stadt,Wert\nK\xf6ln,1\n";
        let loader = TableLoader::new(LoadOptions::new().with_encoding("utf-8"));
        let err = loader.load_bytes("x.csv", bytes).unwrap_err();
        assert_eq!(err.kind(), "decode_error");

        let loader = TableLoader::new(LoadOptions::new().with_encoding("latin1"));
        let loaded = loader.load_bytes("x.csv", bytes).unwrap();
        assert_eq!(
            loaded.table.column("Stadt").unwrap().cells(),
            &[CellValue::Text("Köln".into())]
        );
    }

    #[test]
    fn test_unknown_declared_encoding() {
        let loader = TableLoader::new(LoadOptions::new().with_encoding("no-such-encoding"));
        let err = loader.load_bytes("x.csv", b"a\n1\n").unwrap_err();
        assert_eq!(err.kind(), "decode_error");
    }

    #[test]
    fn test_bom_is_stripped() {
        let mut bytes = vec![0xEF, 0xBB, 0xBF];
        bytes.extend_from_slice(b"Stadt,Wert\nBerlin,1\n");
        let loaded = TableLoader::default().load_bytes("x.csv", &bytes).unwrap();
        assert_eq!(loaded.table.column_names(), vec!["Stadt", "Wert"]);
        assert_eq!(loaded.table.column("Wert").unwrap().kind(), ColumnType::Integer);
    }

    #[test]
    fn test_auto_delimiter() {
        let loader = TableLoader::new(LoadOptions::new().with_delimiter(DelimiterChoice::Auto));
        let loaded = loader
            .load_bytes("x.csv", b"Stadt;Wert\nBerlin;1,5\nHamburg;2,5\n")
            .unwrap();
        assert_eq!(loaded.table.column_names(), vec!["Stadt", "Wert"]);
    }

    #[test]
    fn test_load_file_reads_from_cursor_after_detection() {
        let mut file = RawFile::new("daten.csv", b"Stadt,Wert\nBerlin,1\n".to_vec());
        let loaded = TableLoader::default().load_file(&mut file).unwrap();
        assert_eq!(loaded.file_name, "daten.csv");
        assert_eq!(loaded.table.row_count(), 1);
        assert_eq!(file.position(), file.bytes().len() as u64);
    }

    #[test]
    fn test_open_distinguishes_idle_from_failure() {
        let loader = TableLoader::default();
        assert_eq!(loader.open(None).unwrap(), UploadState::Idle);
        assert_eq!(
            loader.open(Some(RawFile::new("leer.csv", Vec::new()))).unwrap(),
            UploadState::Idle
        );
        assert!(loader
            .open(Some(RawFile::new("kaputt.csv", b"a,b\n1,\"x\n".to_vec())))
            .is_err());
        assert!(matches!(
            loader.open(Some(RawFile::new("ok.csv", b"a\n1\n".to_vec()))),
            Ok(UploadState::Loaded(_))
        ));
    }

    #[test]
    fn test_load_without_bytes_is_idle_not_parse_failure() {
        let err = load(b"", EncodingLabel::utf8()).unwrap_err();
        assert_eq!(err, AppError::EmptyInput);
        assert!(err.is_idle());
    }

    #[test]
    fn test_empty_bytes_are_empty_input() {
        let err = TableLoader::default().load_bytes("x.csv", b"").unwrap_err();
        assert!(err.is_idle());
    }

    #[test]
    fn test_ragged_rows_are_parse_errors() {
        let err = TableLoader::default()
            .load_bytes("x.csv", b"a,b,c\n1,2,3\n4\n")
            .unwrap_err();
        assert_eq!(err.kind(), "parse_error");
    }
}
