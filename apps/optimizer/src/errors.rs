use std::path::PathBuf;

use thiserror::Error;

/// Application-level error type.
/// Every fallible operation in the optimizer returns `Result<T, AppError>`;
/// `main` renders it as an `Error:` line plus a troubleshooting hint.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("File is empty: {}", .0.display())]
    EmptyFile(PathBuf),

    #[error("Document contains no readable text: {}", .0.display())]
    EmptyDocument(PathBuf),

    #[error("File too large: {size} bytes (limit {limit} bytes)")]
    FileTooLarge { size: u64, limit: u64 },

    #[error("Corrupt or unsupported DOCX: {0}")]
    CorruptDocx(String),

    #[error("Could not decode text: {0}")]
    Decode(String),

    #[error("PDF extraction failed: {0}")]
    Pdf(String),

    #[error("{0} is required")]
    MissingInput(&'static str),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Stable machine-readable code, mirrored in logs.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::EmptyFile(_) => "EMPTY_FILE",
            AppError::EmptyDocument(_) => "EMPTY_DOCUMENT",
            AppError::FileTooLarge { .. } => "FILE_TOO_LARGE",
            AppError::CorruptDocx(_) => "CORRUPT_DOCX",
            AppError::Decode(_) => "DECODE_ERROR",
            AppError::Pdf(_) => "PDF_ERROR",
            AppError::MissingInput(_) => "MISSING_INPUT",
            AppError::Io(_) => "IO_ERROR",
            AppError::Zip(_) => "ARCHIVE_ERROR",
            AppError::Xml(_) => "XML_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Troubleshooting tip shown under the error message, if one applies.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            AppError::NotFound(_) => Some("Check the path and make sure the file still exists."),
            AppError::EmptyFile(_) | AppError::EmptyDocument(_) => {
                Some("Make sure the file actually contains your text before loading it.")
            }
            AppError::FileTooLarge { .. } => {
                Some("Résumés and job descriptions should be well under 50MB; export plain text instead.")
            }
            AppError::CorruptDocx(_) | AppError::Zip(_) | AppError::Xml(_) => Some(
                "Open the document in Word or LibreOffice, save it as .txt, and try again \
                 (or run `resume-optimizer convert <file.docx>`).",
            ),
            AppError::Decode(_) => Some("Re-save the file as UTF-8 text and try again."),
            AppError::Pdf(_) => Some("Copy the PDF text into a .txt file and try again."),
            AppError::MissingInput(_) => {
                Some("Pass it as an argument, a file path, or run without arguments for interactive mode.")
            }
            AppError::Io(_) | AppError::Internal(_) => None,
        }
    }

    /// Logs the error at the level matching its severity.
    pub fn log(&self) {
        match self {
            AppError::Io(e) => tracing::error!("I/O error: {e}"),
            AppError::Internal(e) => tracing::error!("Internal error: {e:?}"),
            other => tracing::warn!(code = other.code(), "{other}"),
        }
    }
}
