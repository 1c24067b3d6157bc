//! Comparison result envelope with source metadata.

use crate::model::{Document, DocumentKind};
use crate::report::ChangeReport;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A change report together with what was compared and when.
///
/// Serializes flat: the report's category lists and `summary` sit next to
/// `metadata` at the top level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub metadata: ComparisonMetadata,

    #[serde(flatten)]
    pub report: ChangeReport,
}

impl ComparisonResult {
    /// Wrap a report with the metadata of its comparison.
    pub fn new(metadata: ComparisonMetadata, report: ChangeReport) -> Self {
        Self { metadata, report }
    }

    /// Get the total number of changes.
    pub fn total_changes(&self) -> usize {
        self.report.summary.total_changes
    }
}

/// Describes the two compared documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonMetadata {
    /// Original document path or label
    pub original_file: String,

    /// Revised document path or label
    pub revised_file: String,

    /// Kind of the original document
    pub document_type: DocumentKind,

    /// Kind of the revised document, when it differs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revised_document_type: Option<DocumentKind>,

    /// When the comparison ran
    pub compared_at: DateTime<Utc>,
}

impl ComparisonMetadata {
    /// Describe a comparison of `original` against `revised`.
    pub fn new(
        original_file: impl Into<String>,
        revised_file: impl Into<String>,
        original: &Document,
        revised: &Document,
    ) -> Self {
        let revised_kind = revised.kind();
        Self {
            original_file: original_file.into(),
            revised_file: revised_file.into(),
            document_type: original.kind(),
            revised_document_type: (revised_kind != original.kind()).then_some(revised_kind),
            compared_at: Utc::now(),
        }
    }
}
