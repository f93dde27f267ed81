//! File intake: which documents the parse endpoint accepts and how a chosen
//! path becomes a [`SelectedFile`].

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// A document type the parse endpoint accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Docx,
}

impl DocumentKind {
    pub fn all() -> &'static [DocumentKind] {
        &[DocumentKind::Pdf, DocumentKind::Docx]
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Pdf => "application/pdf",
            Self::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
        }
    }

    /// File extension without the leading dot.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Docx => "docx",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Pdf => "PDF",
            Self::Docx => "DOCX",
        }
    }

    /// Classify a path by its extension (case-insensitive).
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        Self::all()
            .iter()
            .copied()
            .find(|kind| ext.eq_ignore_ascii_case(kind.extension()))
    }
}

/// Why a dropped or picked path was not accepted.
#[derive(Error, Debug)]
pub enum IntakeError {
    #[error("unsupported file type: {0} (expected PDF or DOCX)")]
    UnsupportedType(String),
    #[error("file not found: {0}")]
    NotFound(String),
    #[error("not a regular file: {0}")]
    NotAFile(String),
}

/// The user's chosen resume.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub path: PathBuf,
    /// File name component, shown as "Selected: ...".
    pub name: String,
    pub kind: DocumentKind,
}

impl SelectedFile {
    /// Accept `path` if it names an existing PDF or DOCX file.
    pub fn from_path(path: impl Into<PathBuf>) -> Result<Self, IntakeError> {
        let path = path.into();
        let display = path.display().to_string();
        let kind = DocumentKind::from_path(&path)
            .ok_or_else(|| IntakeError::UnsupportedType(display.clone()))?;

        let meta = std::fs::metadata(&path).map_err(|_| IntakeError::NotFound(display.clone()))?;
        if !meta.is_file() {
            return Err(IntakeError::NotAFile(display));
        }

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or(display);

        Ok(Self { path, name, kind })
    }
}

/// Normalise a path dropped onto the terminal.
///
/// Terminals paste dropped files as text: possibly quoted, possibly with
/// backslash-escaped spaces, possibly as a `file://` URI, usually with a
/// trailing newline. Only the first line is considered.
pub fn clean_dropped_path(raw: &str) -> Option<PathBuf> {
    let line = raw.lines().map(str::trim).find(|l| !l.is_empty())?;

    let unquoted = line
        .strip_prefix('\'')
        .and_then(|s| s.strip_suffix('\''))
        .or_else(|| line.strip_prefix('"').and_then(|s| s.strip_suffix('"')))
        .unwrap_or(line);

    // Only URIs are percent-encoded; a plain path may contain a literal '%'
    let decoded: Cow<'_, str> = match unquoted.strip_prefix("file://") {
        Some(uri_path) => urlencoding::decode(uri_path).unwrap_or(Cow::Borrowed(uri_path)),
        None => Cow::Borrowed(unquoted),
    };

    let mut cleaned = String::with_capacity(decoded.len());
    let mut chars = decoded.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\\' && chars.peek() == Some(&' ') {
            continue;
        }
        cleaned.push(c);
    }

    if cleaned.is_empty() {
        None
    } else {
        Some(PathBuf::from(cleaned))
    }
}
