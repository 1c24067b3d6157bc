//! Document-level types.

use super::{PdfContent, SheetContent, WordContent};
use crate::error::{Error, Result};
use crate::identity;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Read;
use std::path::Path;

/// A normalized document, tagged by kind.
///
/// The JSON form carries the kind in a `type` field. Both the short
/// extraction tags (`docx`, `pdf`, `xlsx`) and the descriptive names
/// (`word`, `page-oriented`, `spreadsheet`) are accepted on input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Document {
    /// Word-processing document
    #[serde(rename = "docx", alias = "word")]
    Word(WordContent),

    /// Page-oriented document
    #[serde(rename = "pdf", alias = "page-oriented")]
    Pdf(PdfContent),

    /// Spreadsheet workbook
    #[serde(rename = "xlsx", alias = "spreadsheet")]
    Spreadsheet(SheetContent),
}

impl Document {
    /// Get the kind of this document.
    pub fn kind(&self) -> DocumentKind {
        match self {
            Document::Word(_) => DocumentKind::Word,
            Document::Pdf(_) => DocumentKind::Pdf,
            Document::Spreadsheet(_) => DocumentKind::Spreadsheet,
        }
    }

    /// Parse a document from a JSON string.
    ///
    /// A missing or unrecognized `type` is reported as
    /// [`Error::InvalidDocument`] rather than producing an empty document.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::InvalidDocument(e.to_string()))
    }

    /// Parse a document from an already decoded JSON value.
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        serde_json::from_value(value).map_err(|e| Error::InvalidDocument(e.to_string()))
    }

    /// Parse a document from a reader yielding JSON.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        serde_json::from_reader(reader).map_err(|e| Error::InvalidDocument(e.to_string()))
    }

    /// Load a document from a JSON file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        Self::from_json(&data)
    }

    /// Number of top-level structural units: paragraphs, pages or sheets.
    pub fn unit_count(&self) -> usize {
        match self {
            Document::Word(word) => word.paragraphs.len(),
            Document::Pdf(pdf) => pdf.pages.len(),
            Document::Spreadsheet(book) => book.sheets.len(),
        }
    }

    /// Assign a fallback identity to every annotation that has none.
    ///
    /// Uses the same key derivation as the annotation comparator, so a
    /// document passed through this method compares identically to one
    /// that was not. Returns the number of identities assigned.
    pub fn assign_annotation_ids(&mut self) -> usize {
        let Document::Pdf(pdf) = self else {
            return 0;
        };

        let mut assigned = 0;
        for annotation in &mut pdf.annotations {
            if annotation.explicit_id().is_none() {
                annotation.id = Some(identity::annotation_key(annotation));
                assigned += 1;
            }
        }
        assigned
    }
}

/// The kind of a normalized document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentKind {
    /// Word-processing document
    #[serde(rename = "docx", alias = "word")]
    Word,

    /// Page-oriented document
    #[serde(rename = "pdf", alias = "page-oriented")]
    Pdf,

    /// Spreadsheet workbook
    #[serde(rename = "xlsx", alias = "spreadsheet")]
    Spreadsheet,
}

impl DocumentKind {
    /// Tag used for this kind in documents and change records.
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentKind::Word => "docx",
            DocumentKind::Pdf => "pdf",
            DocumentKind::Spreadsheet => "xlsx",
        }
    }

    /// Detect the kind from a source file extension (without the dot).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "docx" | "doc" => Some(DocumentKind::Word),
            "pdf" => Some(DocumentKind::Pdf),
            "xlsx" | "xls" => Some(DocumentKind::Spreadsheet),
            _ => None,
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
