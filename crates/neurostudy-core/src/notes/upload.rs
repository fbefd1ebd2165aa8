//! Upload validation and text extraction.

use std::fmt;
use std::path::Path;

use crate::error::UploadError;

pub const MAX_FILE_SIZE: u64 = 5 * 1024 * 1024;

pub const PDF_FALLBACK_TEXT: &str =
    "PDF content could not be extracted. Please try a .txt or .md file.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadKind {
    Text,
    Markdown,
    Pdf,
}

impl UploadKind {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "txt" => Some(UploadKind::Text),
            "md" => Some(UploadKind::Markdown),
            "pdf" => Some(UploadKind::Pdf),
            _ => None,
        }
    }
}

impl fmt::Display for UploadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            UploadKind::Text => "text",
            UploadKind::Markdown => "markdown",
            UploadKind::Pdf => "pdf",
        };
        write!(f, "{s}")
    }
}

/// Check size first, then extension. The extension is whatever follows the
/// last `.` in the file name.
pub fn validate_upload(name: &str, size: u64) -> Result<UploadKind, UploadError> {
    if size > MAX_FILE_SIZE {
        return Err(UploadError::TooLarge {
            size,
            limit: MAX_FILE_SIZE,
        });
    }
    let extension = name.rsplit('.').next().unwrap_or_default();
    UploadKind::from_extension(extension).ok_or_else(|| UploadError::UnsupportedType {
        extension: extension.to_string(),
    })
}

/// Turn file bytes into text for the notes request.
///
/// PDFs get a crude pass: anything outside printable ASCII becomes a space
/// and whitespace runs collapse to one space.
pub fn extract_text(kind: UploadKind, bytes: &[u8]) -> String {
    let raw = String::from_utf8_lossy(bytes);
    match kind {
        UploadKind::Text | UploadKind::Markdown => raw.into_owned(),
        UploadKind::Pdf => {
            let printable: String = raw
                .chars()
                .map(|c| match c {
                    '\x20'..='\x7e' | '\n' | '\r' | '\t' => c,
                    _ => ' ',
                })
                .collect();
            let collapsed = printable.split_whitespace().collect::<Vec<_>>().join(" ");
            if collapsed.is_empty() {
                PDF_FALLBACK_TEXT.to_string()
            } else {
                collapsed
            }
        }
    }
}

/// Validate and read a file from disk.
pub fn read_upload(path: &Path) -> Result<(UploadKind, String), UploadError> {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or(UploadError::Unreadable)?;
    let size = std::fs::metadata(path)
        .map_err(|_| UploadError::Unreadable)?
        .len();
    let kind = validate_upload(name, size)?;
    let bytes = std::fs::read(path).map_err(|e| {
        tracing::warn!(path = %path.display(), error = %e, "failed to read upload");
        UploadError::Unreadable
    })?;
    Ok((kind, extract_text(kind, &bytes)))
}
