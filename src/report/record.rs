//! Change record types.
//!
//! Field names are part of the output contract: report templates key off
//! them (`content_html` vs `content`, `coordinate`, `page_number`,
//! `sheet_name`), so they must not be renamed.

use crate::diff::WordDiff;
use crate::model::DocumentKind;
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether an element was added, deleted or modified.
///
/// Determined solely by which side holds a value: revised only → `Added`,
/// original only → `Deleted`, both but unequal → `Modified`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeType {
    Added,
    Deleted,
    Modified,
}

impl ChangeType {
    /// The classification seen from the other direction.
    pub fn inverse(&self) -> Self {
        match self {
            ChangeType::Added => ChangeType::Deleted,
            ChangeType::Deleted => ChangeType::Added,
            ChangeType::Modified => ChangeType::Modified,
        }
    }
}

impl fmt::Display for ChangeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ChangeType::Added => "added",
            ChangeType::Deleted => "deleted",
            ChangeType::Modified => "modified",
        })
    }
}

/// One reported difference, tagged by `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChangeRecord {
    /// Paragraph or page sentence added, deleted or modified
    TextChange(TextChange),
    SheetAdded(SheetChange),
    SheetDeleted(SheetChange),
    CellAdded(CellPresenceChange),
    CellDeleted(CellPresenceChange),
    CellModified(CellValueChange),
    ParagraphStyleChange(ParagraphStyleChange),
    RunFormattingChange(RunFormattingChange),
    CellFormattingChange(CellFormattingChange),
    TableCountChange(CountChange),
    TableRowCountChange(TableRowCountChange),
    TableCellChange(TableCellChange),
    ImageCountChange(CountChange),
    ImageSizeChange(ImageSizeChange),
    ImageContentChange(ImageContentChange),
    AnnotationChange(AnnotationChange),
    /// The two documents are of different kinds
    DocumentTypeChange(DocumentTypeChange),
    ParagraphCountChange(CountChange),
    PageCountChange(CountChange),
    SheetCountChange(CountChange),
}

impl ChangeRecord {
    /// The `type` tag of this record.
    pub fn type_tag(&self) -> &'static str {
        match self {
            ChangeRecord::TextChange(_) => "text_change",
            ChangeRecord::SheetAdded(_) => "sheet_added",
            ChangeRecord::SheetDeleted(_) => "sheet_deleted",
            ChangeRecord::CellAdded(_) => "cell_added",
            ChangeRecord::CellDeleted(_) => "cell_deleted",
            ChangeRecord::CellModified(_) => "cell_modified",
            ChangeRecord::ParagraphStyleChange(_) => "paragraph_style_change",
            ChangeRecord::RunFormattingChange(_) => "run_formatting_change",
            ChangeRecord::CellFormattingChange(_) => "cell_formatting_change",
            ChangeRecord::TableCountChange(_) => "table_count_change",
            ChangeRecord::TableRowCountChange(_) => "table_row_count_change",
            ChangeRecord::TableCellChange(_) => "table_cell_change",
            ChangeRecord::ImageCountChange(_) => "image_count_change",
            ChangeRecord::ImageSizeChange(_) => "image_size_change",
            ChangeRecord::ImageContentChange(_) => "image_content_change",
            ChangeRecord::AnnotationChange(_) => "annotation_change",
            ChangeRecord::DocumentTypeChange(_) => "document_type_change",
            ChangeRecord::ParagraphCountChange(_) => "paragraph_count_change",
            ChangeRecord::PageCountChange(_) => "page_count_change",
            ChangeRecord::SheetCountChange(_) => "sheet_count_change",
        }
    }

    /// The add/delete/modify classification of this record.
    pub fn change_type(&self) -> ChangeType {
        match self {
            ChangeRecord::TextChange(c) => c.change_type,
            ChangeRecord::SheetAdded(c) | ChangeRecord::SheetDeleted(c) => c.change_type,
            ChangeRecord::CellAdded(c) | ChangeRecord::CellDeleted(c) => c.change_type,
            ChangeRecord::CellModified(c) => c.change_type,
            ChangeRecord::ParagraphStyleChange(c) => c.change_type,
            ChangeRecord::RunFormattingChange(c) => c.change_type,
            ChangeRecord::CellFormattingChange(c) => c.change_type,
            ChangeRecord::TableCountChange(c)
            | ChangeRecord::ImageCountChange(c)
            | ChangeRecord::ParagraphCountChange(c)
            | ChangeRecord::PageCountChange(c)
            | ChangeRecord::SheetCountChange(c) => c.change_type,
            ChangeRecord::TableRowCountChange(c) => c.change_type,
            ChangeRecord::TableCellChange(c) => c.change_type,
            ChangeRecord::ImageSizeChange(c) => c.change_type,
            ChangeRecord::ImageContentChange(c) => c.change_type,
            ChangeRecord::AnnotationChange(c) => c.change_type,
            ChangeRecord::DocumentTypeChange(c) => c.change_type,
        }
    }
}

/// Where a text change sits in its document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextLocation {
    /// Paragraph index (0-indexed) of a word-processing document
    Paragraph(usize),
    /// Page number (1-indexed) of a page-oriented document
    Page(u32),
}

impl TextLocation {
    fn document_type(&self) -> DocumentKind {
        match self {
            TextLocation::Paragraph(_) => DocumentKind::Word,
            TextLocation::Page(_) => DocumentKind::Pdf,
        }
    }
}

/// A paragraph- or sentence-level text change.
///
/// `added`/`deleted` records carry `content`; `modified` records carry the
/// highlighted diff and both texts instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextChange {
    pub change_type: ChangeType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_html: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub added_terms: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_terms: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub similarity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paragraph_index: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_number: Option<u32>,
    pub document_type: DocumentKind,
}

impl TextChange {
    fn located(change_type: ChangeType, location: TextLocation) -> Self {
        let (paragraph_index, page_number) = match location {
            TextLocation::Paragraph(index) => (Some(index), None),
            TextLocation::Page(number) => (None, Some(number)),
        };
        Self {
            change_type,
            content: None,
            content_html: None,
            old_text: None,
            new_text: None,
            added_terms: None,
            deleted_terms: None,
            similarity: None,
            paragraph_index,
            page_number,
            document_type: location.document_type(),
        }
    }

    /// Text present only in the revised document.
    pub fn added(content: impl Into<String>, location: TextLocation) -> Self {
        Self {
            content: Some(content.into()),
            ..Self::located(ChangeType::Added, location)
        }
    }

    /// Text present only in the original document.
    pub fn deleted(content: impl Into<String>, location: TextLocation) -> Self {
        Self {
            content: Some(content.into()),
            ..Self::located(ChangeType::Deleted, location)
        }
    }

    /// Text present on both sides but different.
    pub fn modified(old: &str, new: &str, diff: WordDiff, location: TextLocation) -> Self {
        Self {
            content_html: Some(diff.html),
            old_text: Some(old.to_string()),
            new_text: Some(new.to_string()),
            added_terms: Some(diff.added_terms),
            deleted_terms: Some(diff.deleted_terms),
            similarity: Some(diff.similarity),
            ..Self::located(ChangeType::Modified, location)
        }
    }
}

/// A whole sheet added or deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheetChange {
    pub change_type: ChangeType,
    pub content: String,
    pub sheet_name: String,
    pub document_type: DocumentKind,
}

/// A cell present on one side only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellPresenceChange {
    pub change_type: ChangeType,
    pub content: String,
    pub value: String,
    pub coordinate: String,
    pub sheet_name: String,
    pub document_type: DocumentKind,
}

/// A cell whose value changed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellValueChange {
    pub change_type: ChangeType,
    pub coordinate: String,
    pub sheet_name: String,
    pub document_type: DocumentKind,
    pub old_value: String,
    pub new_value: String,
    pub content_html: String,
    pub added_terms: Vec<String>,
    pub deleted_terms: Vec<String>,
    pub similarity: f64,
}

/// A paragraph whose style name changed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParagraphStyleChange {
    pub change_type: ChangeType,
    pub paragraph_index: usize,
    pub old_style: Option<String>,
    pub new_style: Option<String>,
    pub document_type: DocumentKind,
}

/// A run whose text is unchanged but whose formatting differs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunFormattingChange {
    pub change_type: ChangeType,
    pub paragraph_index: usize,
    pub run_index: usize,
    pub text: String,
    /// One `"attr: old → new"` entry per differing attribute
    pub changes: Vec<String>,
    pub document_type: DocumentKind,
}

/// A cell whose value is unchanged but whose style differs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellFormattingChange {
    pub change_type: ChangeType,
    pub coordinate: String,
    pub sheet_name: String,
    /// One `"attr: old → new"` entry per differing attribute
    pub changes: Vec<String>,
    pub document_type: DocumentKind,
}

/// A difference in the number of paragraphs, pages, sheets, tables or
/// images.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountChange {
    pub change_type: ChangeType,
    pub original_count: usize,
    pub revised_count: usize,
    pub document_type: DocumentKind,
}

impl CountChange {
    pub fn new(original_count: usize, revised_count: usize, document_type: DocumentKind) -> Self {
        Self {
            change_type: ChangeType::Modified,
            original_count,
            revised_count,
            document_type,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRowCountChange {
    pub change_type: ChangeType,
    pub table_index: usize,
    pub original_rows: usize,
    pub revised_rows: usize,
    pub document_type: DocumentKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableCellChange {
    pub change_type: ChangeType,
    pub table_index: usize,
    pub row_index: usize,
    pub cell_index: usize,
    pub old_text: String,
    pub new_text: String,
    pub document_type: DocumentKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageSizeChange {
    pub change_type: ChangeType,
    pub image_index: usize,
    pub old_size: Option<(u32, u32)>,
    pub new_size: Option<(u32, u32)>,
    pub document_type: DocumentKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageContentChange {
    pub change_type: ChangeType,
    pub image_index: usize,
    /// Pixel similarity in [0, 1]; 0.0 when a payload failed to decode
    pub similarity: f64,
    pub document_type: DocumentKind,
}

/// An annotation added, deleted or modified.
///
/// `added`/`deleted` records carry the annotation's own fields, serialized
/// as `null` when absent; `modified` records carry `old`/`new` snapshots and
/// the list of changed fields.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AnnotationChange {
    pub change_type: ChangeType,
    pub document_type: DocumentKind,
    pub id: String,
    pub page_number: u32,
    pub subtype: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub rect: Option<Vec<f64>>,
    #[serde(default)]
    pub quadpoints: Option<Vec<f64>>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub color: Option<Vec<f64>>,
    /// Highlighted contents diff, present when the contents changed
    #[serde(default)]
    pub content_html: Option<String>,
    #[serde(default)]
    pub old: Option<AnnotationSnapshot>,
    #[serde(default)]
    pub new: Option<AnnotationSnapshot>,
    #[serde(default)]
    pub changed_fields: Option<Vec<String>>,
}

impl Serialize for AnnotationChange {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let presence = self.change_type != ChangeType::Modified;
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("change_type", &self.change_type)?;
        map.serialize_entry("document_type", &self.document_type)?;
        map.serialize_entry("id", &self.id)?;
        map.serialize_entry("page_number", &self.page_number)?;
        map.serialize_entry("subtype", &self.subtype)?;
        optional_entry(&mut map, "content", &self.content, presence)?;
        optional_entry(&mut map, "rect", &self.rect, presence)?;
        optional_entry(&mut map, "quadpoints", &self.quadpoints, presence)?;
        optional_entry(&mut map, "author", &self.author, presence)?;
        optional_entry(&mut map, "subject", &self.subject, presence)?;
        optional_entry(&mut map, "color", &self.color, presence)?;
        optional_entry(&mut map, "content_html", &self.content_html, false)?;
        optional_entry(&mut map, "old", &self.old, false)?;
        optional_entry(&mut map, "new", &self.new, false)?;
        optional_entry(&mut map, "changed_fields", &self.changed_fields, false)?;
        map.end()
    }
}

/// Write `key` when `value` is present, or as `null` when `always` is set.
fn optional_entry<M: SerializeMap, T: Serialize>(
    map: &mut M,
    key: &'static str,
    value: &Option<T>,
    always: bool,
) -> Result<(), M::Error> {
    if always || value.is_some() {
        map.serialize_entry(key, value)?;
    }
    Ok(())
}

/// The compared fields of one side of a modified annotation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationSnapshot {
    pub contents: String,
    pub rect: Option<Vec<f64>>,
    pub quadpoints: Option<Vec<f64>>,
    pub color: Option<Vec<f64>>,
    pub author: Option<String>,
    pub subject: Option<String>,
    pub subtype: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentTypeChange {
    pub change_type: ChangeType,
    pub original_type: DocumentKind,
    pub revised_type: DocumentKind,
}
