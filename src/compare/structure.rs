//! Structural comparison: document kind and top-level unit counts.

use crate::model::Document;
use crate::report::{ChangeRecord, ChangeType, CountChange, DocumentTypeChange};

/// Compare the document kinds, then paragraph, page or sheet counts.
///
/// A kind mismatch yields exactly one `document_type_change` record.
pub fn structural_changes(original: &Document, revised: &Document) -> Vec<ChangeRecord> {
    let (old_kind, new_kind) = (original.kind(), revised.kind());
    if old_kind != new_kind {
        return vec![ChangeRecord::DocumentTypeChange(DocumentTypeChange {
            change_type: ChangeType::Modified,
            original_type: old_kind,
            revised_type: new_kind,
        })];
    }

    let (old_count, new_count) = (original.unit_count(), revised.unit_count());
    if old_count == new_count {
        return Vec::new();
    }

    let count = CountChange::new(old_count, new_count, old_kind);
    let record = match original {
        Document::Word(_) => ChangeRecord::ParagraphCountChange(count),
        Document::Pdf(_) => ChangeRecord::PageCountChange(count),
        Document::Spreadsheet(_) => ChangeRecord::SheetCountChange(count),
    };
    log::debug!("structural comparator: {}", record.type_tag());
    vec![record]
}
