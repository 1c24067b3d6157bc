//! Change detection orchestrator.
//!
//! [`ChangeDetector`] runs the text, formatting, table, image, annotation
//! and structural comparators in that fixed order and assembles their
//! record lists into a [`ChangeReport`]. When the two documents are of
//! different kinds, only the structural comparator runs and the report
//! holds a single `document_type_change` record.

mod options;

pub use options::{DetectOptions, DEFAULT_IMAGE_THRESHOLD};

use crate::compare;
use crate::model::Document;
use crate::report::{Category, ChangeReport};
use crate::similarity::{ImageSimilarity, PayloadSimilarity};
use rayon::prelude::*;
use std::sync::Arc;

/// Compares pairs of normalized documents.
///
/// # Example
///
/// ```
/// use docdiff::{ChangeDetector, Document, WordContent};
///
/// let original = Document::Word(WordContent::from_texts(["Hello world"]));
/// let revised = Document::Word(WordContent::from_texts(["Hello there world"]));
///
/// let report = ChangeDetector::new().detect(&original, &revised);
/// assert_eq!(report.summary.total_changes, 1);
/// ```
#[derive(Clone)]
pub struct ChangeDetector {
    options: DetectOptions,
    similarity: Arc<dyn ImageSimilarity>,
}

impl ChangeDetector {
    /// Create a detector with default options.
    pub fn new() -> Self {
        Self::with_options(DetectOptions::default())
    }

    /// Create a detector with the given options.
    pub fn with_options(options: DetectOptions) -> Self {
        Self {
            options,
            similarity: Arc::new(PayloadSimilarity),
        }
    }

    /// Use a different image similarity scorer.
    pub fn with_similarity(mut self, similarity: impl ImageSimilarity + 'static) -> Self {
        self.similarity = Arc::new(similarity);
        self
    }

    /// Get the detection options.
    pub fn options(&self) -> &DetectOptions {
        &self.options
    }

    /// Compare two documents.
    pub fn detect(&self, original: &Document, revised: &Document) -> ChangeReport {
        if original.kind() != revised.kind() {
            log::debug!(
                "document kinds differ ({} vs {}), skipping content comparison",
                original.kind(),
                revised.kind()
            );
            return ChangeReport::builder()
                .category(
                    Category::Structural,
                    compare::structural_changes(original, revised),
                )
                .build();
        }

        let images = compare::image_changes(
            original,
            revised,
            self.similarity.as_ref(),
            self.options.image_similarity_threshold,
        );

        let report = ChangeReport::builder()
            .category(
                Category::Text,
                compare::text_changes(original, revised, &self.options),
            )
            .category(
                Category::Formatting,
                compare::formatting_changes(original, revised),
            )
            .category(Category::Table, compare::table_changes(original, revised))
            .category(Category::Image, images.records)
            .category(
                Category::Annotation,
                compare::annotation_changes(original, revised),
            )
            .category(
                Category::Structural,
                compare::structural_changes(original, revised),
            )
            .diagnostics(images.diagnostics)
            .build();

        log::debug!(
            "{} comparison: {} changes ({})",
            original.kind(),
            report.summary.total_changes,
            report.summary.severity
        );
        report
    }

    /// Compare many independent document pairs.
    ///
    /// Reports come back in input order. Pairs are spread across the rayon
    /// thread pool unless the options ask for sequential processing.
    pub fn detect_batch(&self, pairs: &[(Document, Document)]) -> Vec<ChangeReport> {
        if self.options.parallel && pairs.len() > 1 {
            pairs
                .par_iter()
                .map(|(original, revised)| self.detect(original, revised))
                .collect()
        } else {
            pairs
                .iter()
                .map(|(original, revised)| self.detect(original, revised))
                .collect()
        }
    }
}

impl Default for ChangeDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ChangeDetector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangeDetector")
            .field("options", &self.options)
            .field("similarity", &self.similarity.name())
            .finish()
    }
}

/// Compare two documents with default options.
pub fn detect(original: &Document, revised: &Document) -> ChangeReport {
    ChangeDetector::new().detect(original, revised)
}

/// Compare two documents with custom options.
pub fn detect_with_options(
    original: &Document,
    revised: &Document,
    options: DetectOptions,
) -> ChangeReport {
    ChangeDetector::with_options(options).detect(original, revised)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;
    use crate::model::{Image, PdfContent, SheetContent, WordContent};

    #[test]
    fn test_kind_mismatch_short_circuits() {
        let original = Document::Word(WordContent::from_texts(["a", "b"]));
        let revised = Document::Spreadsheet(SheetContent::new());

        let report = detect(&original, &revised);
        assert_eq!(report.summary.total_changes, 1);
        assert_eq!(report.structural_changes.len(), 1);
        assert!(report.text_changes.is_empty());
    }

    #[test]
    fn test_identical_documents() {
        let doc = Document::Pdf(PdfContent::from_page_texts(["One. Two.", "Three."]));
        let report = detect(&doc, &doc.clone());
        assert!(report.is_empty());
        assert!(report.diagnostics.is_empty());
    }

    #[test]
    fn test_categories_are_filled() {
        let original = Document::Word(WordContent::from_texts(["a", "b"]));
        let revised = Document::Word(WordContent::from_texts(["a", "b", "c"]));

        let report = detect(&original, &revised);
        assert_eq!(report.summary.text_changes_count, 1);
        assert_eq!(report.summary.structural_changes_count, 1);
        assert_eq!(report.summary.total_changes, 2);
    }

    struct Failing;

    impl ImageSimilarity for Failing {
        fn name(&self) -> &str {
            "failing"
        }

        fn similarity(&self, _: &Image, _: &Image) -> Result<f64> {
            Err(crate::Error::ImageDecode("broken".to_string()))
        }
    }

    #[test]
    fn test_similarity_failure_becomes_diagnostic() {
        let image = |data: &str| Image::new(0, data, 4, 4);
        let original = Document::Word(WordContent {
            images: vec![image("AAAA")],
            ..WordContent::default()
        });
        let revised = Document::Word(WordContent {
            images: vec![image("BBBB")],
            ..WordContent::default()
        });

        let report = ChangeDetector::new()
            .with_similarity(Failing)
            .detect(&original, &revised);
        assert_eq!(report.image_changes.len(), 1);
        assert_eq!(report.diagnostics.len(), 1);
        assert_eq!(report.diagnostics[0].reason, "Image decoding error: broken");
    }

    #[test]
    fn test_batch_keeps_input_order() {
        let pairs = vec![
            (
                Document::Word(WordContent::from_texts(["x"])),
                Document::Word(WordContent::from_texts(["y"])),
            ),
            (
                Document::Word(WordContent::from_texts(["x"])),
                Document::Word(WordContent::from_texts(["x"])),
            ),
            (
                Document::Word(WordContent::from_texts(["x"])),
                Document::Word(WordContent::from_texts(["x", "y", "z"])),
            ),
        ];

        for detector in [
            ChangeDetector::new(),
            ChangeDetector::with_options(DetectOptions::new().sequential()),
        ] {
            let totals: Vec<_> = detector
                .detect_batch(&pairs)
                .iter()
                .map(|r| r.summary.total_changes)
                .collect();
            assert_eq!(totals, vec![1, 0, 3]);
        }
    }
}
