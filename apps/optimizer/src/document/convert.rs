//! `convert` subcommand: DOCX → plain text, for documents the main reader
//! rejects or for users who want an editable text copy.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::document::reader::extract_docx_zip_text;
use crate::errors::AppError;

/// Writes the paragraph text of `input` to `output`, or to
/// `{stem}_converted.txt` next to the input. Returns the written path.
pub fn convert_docx_to_txt(input: &Path, output: Option<&Path>) -> Result<PathBuf, AppError> {
    if !input.is_file() {
        return Err(AppError::NotFound(input.to_path_buf()));
    }
    let text = extract_docx_zip_text(&fs::read(input)?)?;
    if text.trim().is_empty() {
        return Err(AppError::EmptyDocument(input.to_path_buf()));
    }

    let target = match output {
        Some(path) => path.to_path_buf(),
        None => default_output(input),
    };
    fs::write(&target, &text)?;
    info!(input = %input.display(), output = %target.display(), chars = text.chars().count(), "DOCX converted");
    Ok(target)
}

fn default_output(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("document");
    input.with_file_name(format!("{stem}_converted.txt"))
}
