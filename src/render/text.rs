//! Plain text rendering for change reports.

use crate::report::{Category, ChangeRecord, ChangeReport, TextChange};
use std::fmt::Write;

/// Render a report as a plain text listing, one line per record.
pub fn to_text(report: &ChangeReport) -> String {
    let mut out = String::new();
    let summary = &report.summary;
    let _ = writeln!(
        out,
        "Total changes: {} (severity: {})",
        summary.total_changes, summary.severity
    );

    for category in Category::ALL {
        let records = report.records(category);
        if records.is_empty() {
            continue;
        }
        let _ = writeln!(out, "\n{} ({})", category.label(), records.len());
        for record in records {
            let _ = writeln!(out, "  [{}] {}", record.change_type(), describe(record));
        }
    }

    if !report.diagnostics.is_empty() {
        let _ = writeln!(out, "\nDiagnostics ({})", report.diagnostics.len());
        for diagnostic in &report.diagnostics {
            let _ = writeln!(out, "  {}: {}", diagnostic.element, diagnostic.reason);
        }
    }

    out
}

/// One-line human-readable description of a record.
pub fn describe(record: &ChangeRecord) -> String {
    match record {
        ChangeRecord::TextChange(c) => describe_text(c),
        ChangeRecord::SheetAdded(c) | ChangeRecord::SheetDeleted(c) => c.content.clone(),
        ChangeRecord::CellAdded(c) | ChangeRecord::CellDeleted(c) => {
            format!("{}!{}: {}", c.sheet_name, c.coordinate, quoted(&c.value))
        }
        ChangeRecord::CellModified(c) => format!(
            "{}!{}: {} → {}",
            c.sheet_name,
            c.coordinate,
            quoted(&c.old_value),
            quoted(&c.new_value)
        ),
        ChangeRecord::ParagraphStyleChange(c) => format!(
            "paragraph {}: style {} → {}",
            c.paragraph_index,
            c.old_style.as_deref().unwrap_or("None"),
            c.new_style.as_deref().unwrap_or("None")
        ),
        ChangeRecord::RunFormattingChange(c) => format!(
            "paragraph {}, run {} ({}): {}",
            c.paragraph_index,
            c.run_index,
            quoted(&c.text),
            c.changes.join("; ")
        ),
        ChangeRecord::CellFormattingChange(c) => {
            format!("{}!{}: {}", c.sheet_name, c.coordinate, c.changes.join("; "))
        }
        ChangeRecord::TableCountChange(c) => {
            format!("tables: {} → {}", c.original_count, c.revised_count)
        }
        ChangeRecord::ImageCountChange(c) => {
            format!("images: {} → {}", c.original_count, c.revised_count)
        }
        ChangeRecord::ParagraphCountChange(c) => {
            format!("paragraphs: {} → {}", c.original_count, c.revised_count)
        }
        ChangeRecord::PageCountChange(c) => {
            format!("pages: {} → {}", c.original_count, c.revised_count)
        }
        ChangeRecord::SheetCountChange(c) => {
            format!("sheets: {} → {}", c.original_count, c.revised_count)
        }
        ChangeRecord::TableRowCountChange(c) => format!(
            "table {}: rows {} → {}",
            c.table_index, c.original_rows, c.revised_rows
        ),
        ChangeRecord::TableCellChange(c) => format!(
            "table {}, row {}, cell {}: {} → {}",
            c.table_index,
            c.row_index,
            c.cell_index,
            quoted(&c.old_text),
            quoted(&c.new_text)
        ),
        ChangeRecord::ImageSizeChange(c) => format!(
            "image {}: {} → {}",
            c.image_index,
            size(c.old_size),
            size(c.new_size)
        ),
        ChangeRecord::ImageContentChange(c) => {
            format!("image {}: similarity {:.2}", c.image_index, c.similarity)
        }
        ChangeRecord::AnnotationChange(c) => {
            let subtype = c.subtype.as_deref().unwrap_or("annotation");
            let detail = match &c.changed_fields {
                Some(fields) => format!("changed {}", fields.join(", ")),
                None => quoted(c.content.as_deref().unwrap_or("")),
            };
            format!("page {} {} {}: {}", c.page_number, subtype, c.id, detail)
        }
        ChangeRecord::DocumentTypeChange(c) => {
            format!("document type: {} → {}", c.original_type, c.revised_type)
        }
    }
}

fn describe_text(change: &TextChange) -> String {
    let location = match (change.paragraph_index, change.page_number) {
        (Some(index), _) => format!("paragraph {}", index),
        (None, Some(page)) => format!("page {}", page),
        (None, None) => "text".to_string(),
    };

    match (&change.content, &change.old_text, &change.new_text) {
        (Some(content), _, _) => format!("{}: {}", location, quoted(content)),
        (None, Some(old), Some(new)) => {
            format!("{}: {} → {}", location, quoted(old), quoted(new))
        }
        _ => location,
    }
}

const MAX_QUOTED_CHARS: usize = 60;

/// Quote a value, shortening long text.
fn quoted(text: &str) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(MAX_QUOTED_CHARS).collect();
    if chars.next().is_some() {
        format!("\"{}…\"", head)
    } else {
        format!("\"{}\"", head)
    }
}

fn size(size: Option<(u32, u32)>) -> String {
    match size {
        Some((w, h)) => format!("{}x{}", w, h),
        None => "unknown".to_string(),
    }
}
