// ============================================================
// ENCODING DETECTOR
// ============================================================
// Statistical best guess of the text encoding of uploaded bytes

use std::io::{Read, Seek, SeekFrom};

use chardetng::EncodingDetector as Chardet;
use tracing::debug;

use crate::domain::table::EncodingLabel;
use crate::domain::error::Result;

/// Guess the encoding of `bytes` in a single pass over the whole buffer.
///
/// Empty and pure-ASCII input yields UTF-8.
pub fn detect(bytes: &[u8]) -> EncodingLabel {
    if bytes.is_ascii() {
        return EncodingLabel::utf8();
    }

    let mut detector = Chardet::new();
    detector.feed(bytes, true);
    let label = EncodingLabel::from_encoding(detector.guess(None, true));

    debug!(encoding = %label, bytes = bytes.len(), "Detected encoding");
    label
}

/// Detect from everything after the current cursor, then restore the cursor.
pub fn detect_stream<R: Read + Seek>(reader: &mut R) -> Result<EncodingLabel> {
    let start = reader.stream_position()?;

    let mut buffer = Vec::new();
    let read = reader.read_to_end(&mut buffer);
    reader.seek(SeekFrom::Start(start))?;
    read?;

    Ok(detect(&buffer))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_empty_input_defaults_to_utf8() {
        assert_eq!(detect(b"").name(), "UTF-8");
    }

    #[test]
    fn test_detects_utf8() {
        let bytes = "Stadt,Straße,Temperatur °C\nMünchen,Hauptstraße,21\n".as_bytes();
        assert_eq!(detect(bytes).name(), "UTF-8");
    }

    #[test]
    fn test_detects_single_byte_german_text() {
        let (bytes, _, _) = encoding_rs::WINDOWS_1252
            .encode("Stadt;Straße;Größe\nMünchen;Hauptstraße;groß\nKöln;Äußere Straße;süß\n");
        let label = detect(&bytes);
        assert_ne!(label.name(), "UTF-8");
        let (decoded, had_errors) = label.encoding().decode_without_bom_handling(&bytes);
        assert!(!had_errors);
        assert!(decoded.contains("Straße"));
    }

    #[test]
    fn test_detect_stream_restores_cursor() {
        let mut cursor = Cursor::new(b"a,b\n1,2\n".to_vec());
        cursor.set_position(2);

        let label = detect_stream(&mut cursor).unwrap();
        assert_eq!(label.name(), "UTF-8");
        assert_eq!(cursor.position(), 2);

        let mut rest = String::new();
        cursor.read_to_string(&mut rest).unwrap();
        assert_eq!(rest, "b\n1,2\n");
    }
}
