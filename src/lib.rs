//! # docdiff
//!
//! Change detection between two revisions of a document.
//!
//! This library compares two normalized documents (word-processing,
//! page-oriented or spreadsheet) and produces a categorized change report:
//! text, formatting, table, image, annotation and structural changes, each
//! record classified as added, deleted or modified.
//!
//! ## Quick Start
//!
//! ```
//! use docdiff::{detect, Document, WordContent};
//!
//! let original = Document::Word(WordContent::from_texts(["Hello world"]));
//! let revised = Document::Word(WordContent::from_texts(["Hello there world"]));
//!
//! let report = detect(&original, &revised);
//! assert_eq!(report.summary.total_changes, 1);
//! ```
//!
//! ## Features
//!
//! - **Word-level diffs**: modified text carries `<ins>`/`<del>` markup and
//!   added/deleted term lists
//! - **Sentence alignment**: page text is aligned sentence by sentence
//! - **Stable annotation identity**: un-named annotations get a
//!   content-derived key, so unchanged notes never churn
//! - **Pluggable image scoring**: pixel similarity is supplied through the
//!   [`ImageSimilarity`] trait
//! - **Parallel batches**: many document pairs are compared with Rayon

pub mod compare;
pub mod detector;
pub mod diff;
pub mod error;
pub mod extract;
pub mod identity;
pub mod model;
pub mod render;
pub mod report;
mod repr;
pub mod similarity;

// Re-export commonly used types
pub use detector::{detect, detect_with_options, ChangeDetector, DetectOptions};
pub use diff::{word_diff, Segmentation, WordDiff};
pub use error::{Error, Result};
pub use extract::{DocumentExtractor, ExtractorRegistry, JsonExtractor};
pub use model::{
    Annotation, Cell, CellValue, Document, DocumentKind, Image, Page, Paragraph, PdfContent, Run,
    Sheet, SheetContent, Table, TableCell, WordContent,
};
pub use render::{ComparisonMetadata, ComparisonResult, JsonFormat};
pub use report::{
    Category, ChangeRecord, ChangeReport, ChangeSummary, ChangeType, Diagnostic, Severity,
};
pub use similarity::{ImageSimilarity, PayloadSimilarity};

use std::path::Path;

/// Load a normalized document from a file.
///
/// The extractor is chosen by file extension.
///
/// # Example
///
/// ```no_run
/// use docdiff::load_document;
///
/// let doc = load_document("contract.v1.json").unwrap();
/// println!("{}", doc.kind());
/// ```
pub fn load_document<P: AsRef<Path>>(path: P) -> Result<Document> {
    ExtractorRegistry::with_defaults().load(path.as_ref())
}

/// Compare two document files.
///
/// # Arguments
///
/// * `original` - Path to the original document
/// * `revised` - Path to the revised document
///
/// # Example
///
/// ```no_run
/// use docdiff::compare_files;
///
/// let result = compare_files("contract.v1.json", "contract.v2.json").unwrap();
/// println!("{} changes", result.total_changes());
/// ```
pub fn compare_files<P: AsRef<Path>, Q: AsRef<Path>>(
    original: P,
    revised: Q,
) -> Result<ComparisonResult> {
    compare_files_with_options(original, revised, DetectOptions::default())
}

/// Compare two document files with custom options.
pub fn compare_files_with_options<P: AsRef<Path>, Q: AsRef<Path>>(
    original: P,
    revised: Q,
    options: DetectOptions,
) -> Result<ComparisonResult> {
    let detector = ChangeDetector::with_options(options);
    compare_files_with(&detector, original.as_ref(), revised.as_ref())
}

/// Compare two document files with a configured detector.
pub fn compare_files_with(
    detector: &ChangeDetector,
    original: &Path,
    revised: &Path,
) -> Result<ComparisonResult> {
    let registry = ExtractorRegistry::with_defaults();
    let original_doc = registry.load(original)?;
    let revised_doc = registry.load(revised)?;

    let report = detector.detect(&original_doc, &revised_doc);
    let metadata = ComparisonMetadata::new(
        original.display().to_string(),
        revised.display().to_string(),
        &original_doc,
        &revised_doc,
    );
    Ok(ComparisonResult::new(metadata, report))
}

/// Compare two documents and render the report as JSON.
///
/// # Example
///
/// ```
/// use docdiff::{diff_to_json, Document, PdfContent};
///
/// let a = Document::Pdf(PdfContent::from_page_texts(["Draft."]));
/// let b = Document::Pdf(PdfContent::from_page_texts(["Final."]));
/// let json = diff_to_json(&a, &b).unwrap();
/// assert!(json.contains("text_changes"));
/// ```
pub fn diff_to_json(original: &Document, revised: &Document) -> Result<String> {
    let report = detect(original, revised);
    render::to_json(&report, JsonFormat::Pretty)
}

/// Compare two documents and render the report as plain text.
pub fn diff_to_text(original: &Document, revised: &Document) -> String {
    render::to_text(&detect(original, revised))
}
