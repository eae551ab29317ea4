//! Safe input reading: existence and size checks, then DOCX, PDF or plain text
//! decoding depending on the extension.

use std::fs;
use std::io::{Cursor, Read};
use std::path::Path;

use encoding_rs::{UTF_16BE, UTF_16LE, WINDOWS_1252};
use quick_xml::events::Event;
use quick_xml::Reader;
use tracing::{debug, info, warn};
use zip::ZipArchive;

use crate::errors::AppError;

const CONTENT_TYPES_PART: &str = "[Content_Types].xml";
const DOCUMENT_PART: &str = "word/document.xml";

/// Reads a résumé or job description from disk.
///
/// `.docx` and `.pdf` are extracted; anything else is decoded as text.
pub fn read_file_safely(path: &Path, max_bytes: u64) -> Result<String, AppError> {
    if !path.is_file() {
        return Err(AppError::NotFound(path.to_path_buf()));
    }

    let size = fs::metadata(path)?.len();
    if size == 0 {
        return Err(AppError::EmptyFile(path.to_path_buf()));
    }
    if size > max_bytes {
        return Err(AppError::FileTooLarge {
            size,
            limit: max_bytes,
        });
    }

    info!(path = %path.display(), bytes = size, "reading input file");

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();

    let text = match extension.as_str() {
        "docx" => read_docx_text(path)?,
        "pdf" => pdf_extract::extract_text(path).map_err(|e| AppError::Pdf(e.to_string()))?,
        _ => decode_text(&fs::read(path)?)?,
    };

    if text.trim().is_empty() {
        return Err(AppError::EmptyDocument(path.to_path_buf()));
    }
    info!(chars = text.chars().count(), "input file read");
    Ok(text)
}

// ────────────────────────────────────────────────────────────────────────────
// DOCX
// ────────────────────────────────────────────────────────────────────────────

/// Non-empty paragraphs of a `.docx`, one per line.
///
/// A package without `[Content_Types].xml` is still read straight from the
/// ZIP/XML parts, the way converters recover damaged documents.
pub fn read_docx_text(path: &Path) -> Result<String, AppError> {
    let bytes = fs::read(path)?;
    let mut archive = open_package(&bytes)?;
    if archive.by_name(CONTENT_TYPES_PART).is_err() {
        warn!(path = %path.display(), "DOCX has no content types part, falling back to raw XML extraction");
    }
    let text = document_text(&mut archive)?;
    if text.is_empty() {
        return Err(AppError::EmptyDocument(path.to_path_buf()));
    }
    Ok(text)
}

/// Raw ZIP/XML extraction with no package validation, used by the converter.
pub fn extract_docx_zip_text(bytes: &[u8]) -> Result<String, AppError> {
    let mut archive = open_package(bytes)?;
    document_text(&mut archive)
}

fn open_package(bytes: &[u8]) -> Result<ZipArchive<Cursor<&[u8]>>, AppError> {
    ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| AppError::CorruptDocx(format!("not a valid ZIP/DOCX archive ({e})")))
}

fn document_text(archive: &mut ZipArchive<Cursor<&[u8]>>) -> Result<String, AppError> {
    let mut xml = String::new();
    archive
        .by_name(DOCUMENT_PART)
        .map_err(|_| AppError::CorruptDocx(format!("missing {DOCUMENT_PART}")))?
        .read_to_string(&mut xml)?;
    Ok(paragraphs_from_xml(&xml)?.join("\n"))
}

/// Concatenates the `w:t` runs of every `w:p`, skipping empty paragraphs.
pub fn paragraphs_from_xml(xml: &str) -> Result<Vec<String>, AppError> {
    let mut reader = Reader::from_str(xml);
    let mut paragraphs = Vec::new();
    let mut current = String::new();
    let mut in_text = false;

    loop {
        match reader.read_event()? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"p" => current.clear(),
                b"t" => in_text = true,
                _ => {}
            },
            Event::Empty(e) => {
                if e.local_name().as_ref() == b"tab" {
                    current.push('\t');
                }
            }
            Event::Text(t) if in_text => current.push_str(&t.unescape()?),
            Event::End(e) => match e.local_name().as_ref() {
                b"t" => in_text = false,
                b"p" => {
                    if !current.trim().is_empty() {
                        paragraphs.push(std::mem::take(&mut current));
                    }
                    current.clear();
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }
    debug!(paragraphs = paragraphs.len(), "document XML parsed");
    Ok(paragraphs)
}

// ────────────────────────────────────────────────────────────────────────────
// Plain text
// ────────────────────────────────────────────────────────────────────────────

/// UTF-8 (BOM stripped), then BOM-sniffed UTF-16, then Windows-1252, which
/// maps every byte and so always succeeds.
pub fn decode_text(bytes: &[u8]) -> Result<String, AppError> {
    let without_bom = bytes.strip_prefix(&[0xEF, 0xBB, 0xBF][..]).unwrap_or(bytes);
    if let Ok(text) = std::str::from_utf8(without_bom) {
        return Ok(text.to_string());
    }

    let utf16 = if let Some(rest) = bytes.strip_prefix(&[0xFF, 0xFE][..]) {
        Some((UTF_16LE, rest))
    } else {
        bytes.strip_prefix(&[0xFE, 0xFF][..]).map(|rest| (UTF_16BE, rest))
    };
    if let Some((encoding, rest)) = utf16 {
        let (text, had_errors) = encoding.decode_without_bom_handling(rest);
        if had_errors {
            return Err(AppError::Decode(format!("malformed {} text", encoding.name())));
        }
        debug!(encoding = encoding.name(), "decoded text");
        return Ok(text.into_owned());
    }

    let (text, _) = WINDOWS_1252.decode_without_bom_handling(bytes);
    debug!(encoding = "windows-1252", "decoded text");
    Ok(text.into_owned())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use zip::write::FileOptions;
    use zip::ZipWriter;

    use super::*;

    const BODY: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>
<w:p><w:r><w:t>Jane</w:t></w:r><w:r><w:t xml:space="preserve"> Doe</w:t></w:r></w:p>
<w:p></w:p>
<w:p><w:pPr><w:pStyle w:val="Heading1"/></w:pPr><w:r><w:t>R&amp;D</w:t></w:r></w:p>
</w:body></w:document>"#;

    fn package(parts: &[(&str, &str)]) -> Vec<u8> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        for (name, body) in parts {
            zip.start_file(*name, FileOptions::default()).unwrap();
            zip.write_all(body.as_bytes()).unwrap();
        }
        zip.finish().unwrap().into_inner()
    }

    fn write_temp(dir: &tempfile::TempDir, name: &str, bytes: &[u8]) -> std::path::PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, bytes).unwrap();
        path
    }

    const LIMIT: u64 = 50 * 1024 * 1024;

    #[test]
    fn test_missing_empty_and_oversized_files() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            read_file_safely(&dir.path().join("nope.txt"), LIMIT),
            Err(AppError::NotFound(_))
        ));

        let empty = write_temp(&dir, "empty.txt", b"");
        assert!(matches!(read_file_safely(&empty, LIMIT), Err(AppError::EmptyFile(_))));

        let big = write_temp(&dir, "big.txt", b"0123456789");
        assert!(matches!(
            read_file_safely(&big, 5),
            Err(AppError::FileTooLarge { size: 10, limit: 5 })
        ));
    }

    #[test]
    fn test_plain_text_with_utf8_bom() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_temp(&dir, "resume.txt", "\u{feff}Jane Doe\nRésumé".as_bytes());
        assert_eq!(read_file_safely(&path, LIMIT).unwrap(), "Jane Doe\nRésumé");
    }

    #[test]
    fn test_utf16_with_bom() {
        let mut le = vec![0xFF, 0xFE];
        le.extend("Café".encode_utf16().flat_map(|u| u.to_le_bytes()));
        assert_eq!(decode_text(&le).unwrap(), "Café");

        let mut be = vec![0xFE, 0xFF];
        be.extend("Naïve".encode_utf16().flat_map(|u| u.to_be_bytes()));
        assert_eq!(decode_text(&be).unwrap(), "Naïve");
    }

    #[test]
    fn test_cp1252_bytes() {
        // "Résumé – €5" in Windows-1252.
        let bytes = [0x52, 0xE9, 0x73, 0x75, 0x6D, 0xE9, 0x20, 0x96, 0x20, 0x80, 0x35];
        assert_eq!(decode_text(&bytes).unwrap(), "Résumé – €5");
    }

    #[test]
    fn test_any_bytes_decode() {
        let text = decode_text(&[0x81, 0xFF, 0x00, 0x9D]).unwrap();
        assert_eq!(text.chars().count(), 4);
        assert_eq!(text.chars().nth(1), Some('ÿ'));
    }

    #[test]
    fn test_docx_paragraphs_skip_empty() {
        let dir = tempfile::tempdir().unwrap();
        let bytes = package(&[("[Content_Types].xml", "<Types/>"), (DOCUMENT_PART, BODY)]);
        let path = write_temp(&dir, "resume.DOCX", &bytes);
        assert_eq!(read_file_safely(&path, LIMIT).unwrap(), "Jane Doe\nR&D");
    }

    #[test]
    fn test_docx_without_content_types_is_recovered() {
        let dir = tempfile::tempdir().unwrap();
        let bytes = package(&[(DOCUMENT_PART, BODY)]);
        let path = write_temp(&dir, "damaged.docx", &bytes);
        assert_eq!(read_docx_text(&path).unwrap(), "Jane Doe\nR&D");
    }

    #[test]
    fn test_corrupt_docx() {
        let dir = tempfile::tempdir().unwrap();
        let not_zip = write_temp(&dir, "fake.docx", b"plain text pretending");
        let err = read_file_safely(&not_zip, LIMIT).unwrap_err();
        assert!(matches!(err, AppError::CorruptDocx(_)));
        assert!(err.hint().unwrap().contains(".txt"));

        let no_body = write_temp(&dir, "nobody.docx", &package(&[("other.xml", "<x/>")]));
        assert!(matches!(read_docx_text(&no_body), Err(AppError::CorruptDocx(_))));
    }

    #[test]
    fn test_docx_without_text_is_empty_document() {
        let dir = tempfile::tempdir().unwrap();
        let blank = r#"<w:document xmlns:w="x"><w:body><w:p/><w:p></w:p></w:body></w:document>"#;
        let path = write_temp(&dir, "blank.docx", &package(&[(DOCUMENT_PART, blank)]));
        assert!(matches!(read_file_safely(&path, LIMIT), Err(AppError::EmptyDocument(_))));
    }
}
