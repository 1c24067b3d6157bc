//! Image comparison for word-processing documents.

use crate::model::{Document, DocumentKind, Image};
use crate::report::{
    ChangeRecord, ChangeType, CountChange, Diagnostic, ImageContentChange, ImageSizeChange,
};
use crate::similarity::ImageSimilarity;

/// Records and recovered problems from comparing image lists.
#[derive(Debug, Default)]
pub struct ImageComparison {
    pub records: Vec<ChangeRecord>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Compare image counts, pixel dimensions and pixel content.
///
/// Images are paired by position. A pair scoring below `threshold` is
/// reported with its score. A scorer failure counts as similarity 0.0 and
/// is kept as a diagnostic; it never aborts the comparison.
pub fn image_changes(
    original: &Document,
    revised: &Document,
    scorer: &dyn ImageSimilarity,
    threshold: f64,
) -> ImageComparison {
    let mut result = ImageComparison::default();
    let (Document::Word(a), Document::Word(b)) = (original, revised) else {
        return result;
    };

    if a.images.len() != b.images.len() {
        result.records.push(ChangeRecord::ImageCountChange(CountChange::new(
            a.images.len(),
            b.images.len(),
            DocumentKind::Word,
        )));
    }

    for (index, (old, new)) in a.images.iter().zip(&b.images).enumerate() {
        if old.size != new.size {
            result.records.push(ChangeRecord::ImageSizeChange(ImageSizeChange {
                change_type: ChangeType::Modified,
                image_index: index,
                old_size: old.size,
                new_size: new.size,
                document_type: DocumentKind::Word,
            }));
        }

        let similarity = score(index, old, new, scorer, &mut result.diagnostics);
        if similarity < threshold {
            result.records.push(ChangeRecord::ImageContentChange(ImageContentChange {
                change_type: ChangeType::Modified,
                image_index: index,
                similarity,
                document_type: DocumentKind::Word,
            }));
        }
    }

    log::debug!(
        "image comparator ({}): {} records, {} diagnostics",
        scorer.name(),
        result.records.len(),
        result.diagnostics.len()
    );
    result
}

fn score(
    index: usize,
    old: &Image,
    new: &Image,
    scorer: &dyn ImageSimilarity,
    diagnostics: &mut Vec<Diagnostic>,
) -> f64 {
    // Identical payloads are identical pixels, decodable or not.
    if old.data == new.data {
        return 1.0;
    }

    match scorer.similarity(old, new) {
        Ok(s) if s.is_finite() => s.clamp(0.0, 1.0),
        Ok(s) => {
            log::warn!("image {}: scorer returned {}, using 0.0", index, s);
            diagnostics.push(Diagnostic::new(
                format!("image {}", index),
                format!("non-finite similarity {}", s),
            ));
            0.0
        }
        Err(e) => {
            log::warn!("image {}: similarity failed: {}", index, e);
            diagnostics.push(Diagnostic::new(format!("image {}", index), e.to_string()));
            0.0
        }
    }
}
