//! Change report produced by one comparison.
//!
//! A [`ChangeReport`] holds six ordered record lists, one per [`Category`],
//! plus a [`ChangeSummary`] derived from them. It is built once by the
//! detector and not mutated afterwards.

mod record;

pub use record::{
    AnnotationChange, AnnotationSnapshot, CellFormattingChange, CellPresenceChange,
    CellValueChange, ChangeRecord, ChangeType, CountChange, DocumentTypeChange,
    ImageContentChange, ImageSizeChange, ParagraphStyleChange, RunFormattingChange, SheetChange,
    TableCellChange, TableRowCountChange, TextChange, TextLocation,
};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// The six change categories, in report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Text,
    Formatting,
    Table,
    Image,
    Annotation,
    Structural,
}

impl Category {
    /// All categories in report order.
    pub const ALL: [Category; 6] = [
        Category::Text,
        Category::Formatting,
        Category::Table,
        Category::Image,
        Category::Annotation,
        Category::Structural,
    ];

    /// Key of this category's list in the report.
    pub fn key(&self) -> &'static str {
        match self {
            Category::Text => "text_changes",
            Category::Formatting => "formatting_changes",
            Category::Table => "table_changes",
            Category::Image => "image_changes",
            Category::Annotation => "annotation_changes",
            Category::Structural => "structural_changes",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Text => "Text",
            Category::Formatting => "Formatting",
            Category::Table => "Tables",
            Category::Image => "Images",
            Category::Annotation => "Annotations",
            Category::Structural => "Structure",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Overall severity of a comparison, by total change count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Ten changes or fewer
    #[default]
    Low,
    /// Eleven to fifty changes
    Medium,
    /// More than fifty changes
    High,
}

impl Severity {
    pub fn from_total(total: usize) -> Self {
        match total {
            0..=10 => Severity::Low,
            11..=50 => Severity::Medium,
            _ => Severity::High,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
        })
    }
}

/// Per-category counts of a report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChangeSummary {
    pub total_changes: usize,
    pub text_changes_count: usize,
    pub formatting_changes_count: usize,
    pub table_changes_count: usize,
    pub image_changes_count: usize,
    pub annotation_changes_count: usize,
    pub structural_changes_count: usize,

    /// Record count per `type` tag
    #[serde(default)]
    pub changes_by_type: BTreeMap<String, usize>,

    #[serde(default)]
    pub severity: Severity,
}

impl ChangeSummary {
    /// Count for one category.
    pub fn count(&self, category: Category) -> usize {
        match category {
            Category::Text => self.text_changes_count,
            Category::Formatting => self.formatting_changes_count,
            Category::Table => self.table_changes_count,
            Category::Image => self.image_changes_count,
            Category::Annotation => self.annotation_changes_count,
            Category::Structural => self.structural_changes_count,
        }
    }
}

/// A per-element problem that was recovered from during detection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// The element concerned (e.g. `image 2`)
    pub element: String,
    /// What went wrong
    pub reason: String,
}

impl Diagnostic {
    pub fn new(element: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            element: element.into(),
            reason: reason.into(),
        }
    }
}

/// The itemized differences between two documents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChangeReport {
    pub text_changes: Vec<ChangeRecord>,
    pub formatting_changes: Vec<ChangeRecord>,
    pub table_changes: Vec<ChangeRecord>,
    pub image_changes: Vec<ChangeRecord>,
    pub annotation_changes: Vec<ChangeRecord>,
    pub structural_changes: Vec<ChangeRecord>,
    pub summary: ChangeSummary,

    /// Recovered per-element problems; omitted from JSON when empty
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<Diagnostic>,
}

/// Builder collecting category lists before the summary is computed.
#[derive(Debug, Default)]
pub struct ReportBuilder {
    report: ChangeReport,
}

impl ReportBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the record list of a category.
    pub fn category(mut self, category: Category, records: Vec<ChangeRecord>) -> Self {
        *self.report.list_mut(category) = records;
        self
    }

    /// Attach recovered per-element problems.
    pub fn diagnostics(mut self, diagnostics: Vec<Diagnostic>) -> Self {
        self.report.diagnostics = diagnostics;
        self
    }

    /// Compute the summary and return the finished report.
    pub fn build(mut self) -> ChangeReport {
        self.report.summary = self.report.compute_summary();
        self.report
    }
}

impl ChangeReport {
    /// Start building a report.
    pub fn builder() -> ReportBuilder {
        ReportBuilder::new()
    }

    /// Records of one category.
    pub fn records(&self, category: Category) -> &[ChangeRecord] {
        match category {
            Category::Text => &self.text_changes,
            Category::Formatting => &self.formatting_changes,
            Category::Table => &self.table_changes,
            Category::Image => &self.image_changes,
            Category::Annotation => &self.annotation_changes,
            Category::Structural => &self.structural_changes,
        }
    }

    fn list_mut(&mut self, category: Category) -> &mut Vec<ChangeRecord> {
        match category {
            Category::Text => &mut self.text_changes,
            Category::Formatting => &mut self.formatting_changes,
            Category::Table => &mut self.table_changes,
            Category::Image => &mut self.image_changes,
            Category::Annotation => &mut self.annotation_changes,
            Category::Structural => &mut self.structural_changes,
        }
    }

    /// All records with their category, in report order.
    pub fn iter(&self) -> impl Iterator<Item = (Category, &ChangeRecord)> {
        Category::ALL
            .into_iter()
            .flat_map(move |category| self.records(category).iter().map(move |r| (category, r)))
    }

    /// Total number of records.
    pub fn total_changes(&self) -> usize {
        Category::ALL.iter().map(|c| self.records(*c).len()).sum()
    }

    /// Check if no differences were found.
    pub fn is_empty(&self) -> bool {
        self.total_changes() == 0
    }

    fn compute_summary(&self) -> ChangeSummary {
        let mut changes_by_type = BTreeMap::new();
        for (_, record) in self.iter() {
            *changes_by_type
                .entry(record.type_tag().to_string())
                .or_insert(0) += 1;
        }

        let total_changes = self.total_changes();
        ChangeSummary {
            total_changes,
            text_changes_count: self.text_changes.len(),
            formatting_changes_count: self.formatting_changes.len(),
            table_changes_count: self.table_changes.len(),
            image_changes_count: self.image_changes.len(),
            annotation_changes_count: self.annotation_changes.len(),
            structural_changes_count: self.structural_changes.len(),
            changes_by_type,
            severity: Severity::from_total(total_changes),
        }
    }
}
