//! Text comparison: paragraphs, page sentences and cell values.

use super::{coordinate_order, CellIndex};
use crate::detector::DetectOptions;
use crate::diff::{word_diff, OpTag, SequenceMatcher};
use crate::model::{Document, DocumentKind, PdfContent, Sheet, SheetContent, WordContent};
use crate::report::{
    CellPresenceChange, CellValueChange, ChangeRecord, ChangeType, SheetChange, TextChange,
    TextLocation,
};
use std::borrow::Cow;
use std::collections::HashSet;

/// Compare the textual content of two documents of the same kind.
pub fn text_changes(
    original: &Document,
    revised: &Document,
    options: &DetectOptions,
) -> Vec<ChangeRecord> {
    let records = match (original, revised) {
        (Document::Word(a), Document::Word(b)) => paragraph_changes(a, b, options),
        (Document::Pdf(a), Document::Pdf(b)) => page_changes(a, b, options),
        (Document::Spreadsheet(a), Document::Spreadsheet(b)) => workbook_changes(a, b, options),
        _ => Vec::new(),
    };
    log::debug!("text comparator: {} records", records.len());
    records
}

/// Index-aligned paragraph comparison.
fn paragraph_changes(
    original: &WordContent,
    revised: &WordContent,
    options: &DetectOptions,
) -> Vec<ChangeRecord> {
    let count = original.paragraphs.len().max(revised.paragraphs.len());
    let mut records = Vec::new();

    for index in 0..count {
        let old = original.paragraphs.get(index).map_or("", |p| p.text.as_str());
        let new = revised.paragraphs.get(index).map_or("", |p| p.text.as_str());
        let location = TextLocation::Paragraph(index);

        // Whitespace-only text equals empty text once normalized.
        if !options.is_exact() && options.same_text(old, new) {
            continue;
        }
        let change = if !old.is_empty() && new.is_empty() {
            TextChange::deleted(old, location)
        } else if !new.is_empty() && old.is_empty() {
            TextChange::added(new, location)
        } else if !options.same_text(old, new) {
            TextChange::modified(old, new, word_diff(old, new), location)
        } else {
            continue;
        };
        records.push(ChangeRecord::TextChange(change));
    }

    records
}

/// Page-aligned, sentence-level comparison.
///
/// A page missing on one side compares as empty text.
fn page_changes(
    original: &PdfContent,
    revised: &PdfContent,
    options: &DetectOptions,
) -> Vec<ChangeRecord> {
    let count = original.pages.len().max(revised.pages.len());
    let mut records = Vec::new();

    for index in 0..count {
        let old = original.pages.get(index).map_or("", |p| p.text.as_str());
        let new = revised.pages.get(index).map_or("", |p| p.text.as_str());
        if old == new {
            continue;
        }
        let page_number = u32::try_from(index + 1).unwrap_or(u32::MAX);
        sentence_changes(old, new, page_number, options, &mut records);
    }

    records
}

fn sentence_changes(
    old: &str,
    new: &str,
    page_number: u32,
    options: &DetectOptions,
    records: &mut Vec<ChangeRecord>,
) {
    let location = TextLocation::Page(page_number);
    let a = options.page_segmentation.split(old);
    let b = options.page_segmentation.split(new);

    let a_keys: Vec<Cow<'_, str>> = a.iter().map(|s| options.normalize(s)).collect();
    let b_keys: Vec<Cow<'_, str>> = b.iter().map(|s| options.normalize(s)).collect();
    let matcher = SequenceMatcher::new(&a_keys, &b_keys);

    let deleted = |s: &str| ChangeRecord::TextChange(TextChange::deleted(s, location));
    let added = |s: &str| ChangeRecord::TextChange(TextChange::added(s, location));

    for op in matcher.opcodes() {
        let old_span = &a[op.a_range()];
        let new_span = &b[op.b_range()];
        match op.tag {
            OpTag::Equal => {}
            OpTag::Delete => records.extend(old_span.iter().map(|s| deleted(*s))),
            OpTag::Insert => records.extend(new_span.iter().map(|s| added(*s))),
            OpTag::Replace => {
                let paired = old_span.len().min(new_span.len());
                for (o, n) in old_span.iter().zip(new_span) {
                    if options.same_text(o, n) {
                        continue;
                    }
                    records.push(ChangeRecord::TextChange(TextChange::modified(
                        o,
                        n,
                        word_diff(o, n),
                        location,
                    )));
                }
                records.extend(old_span[paired..].iter().map(|s| deleted(*s)));
                records.extend(new_span[paired..].iter().map(|s| added(*s)));
            }
        }
    }
}

/// Name-matched sheets, coordinate-matched cells.
fn workbook_changes(
    original: &SheetContent,
    revised: &SheetContent,
    options: &DetectOptions,
) -> Vec<ChangeRecord> {
    let mut records = Vec::new();

    for name in sheet_names(original, revised) {
        match (original.sheet(name), revised.sheet(name)) {
            (None, Some(_)) => records.push(ChangeRecord::SheetAdded(SheetChange {
                change_type: ChangeType::Added,
                content: format!("Sheet added: {}", name),
                sheet_name: name.to_string(),
                document_type: DocumentKind::Spreadsheet,
            })),
            (Some(_), None) => records.push(ChangeRecord::SheetDeleted(SheetChange {
                change_type: ChangeType::Deleted,
                content: format!("Sheet deleted: {}", name),
                sheet_name: name.to_string(),
                document_type: DocumentKind::Spreadsheet,
            })),
            (Some(a), Some(b)) => cell_changes(a, b, options, &mut records),
            (None, None) => {}
        }
    }

    records
}

/// Original sheet names in workbook order, then names only in the revision.
fn sheet_names<'d>(original: &'d SheetContent, revised: &'d SheetContent) -> Vec<&'d str> {
    let mut seen = HashSet::new();
    original
        .sheets
        .iter()
        .chain(&revised.sheets)
        .map(|s| s.name.as_str())
        .filter(|name| seen.insert(*name))
        .collect()
}

fn cell_changes(
    original: &Sheet,
    revised: &Sheet,
    options: &DetectOptions,
    records: &mut Vec<ChangeRecord>,
) {
    let old_cells = CellIndex::new(original);
    let new_cells = CellIndex::new(revised);

    let mut seen = HashSet::new();
    let mut coordinates: Vec<&str> = old_cells
        .coordinates()
        .chain(new_cells.coordinates())
        .filter(|c| seen.insert(*c))
        .collect();
    coordinates.sort_by(|a, b| coordinate_order(a, b));

    let sheet_name = &revised.name;
    for coordinate in coordinates {
        let presence = |change_type: ChangeType, value: String| CellPresenceChange {
            change_type,
            content: value.clone(),
            value,
            coordinate: coordinate.to_string(),
            sheet_name: sheet_name.clone(),
            document_type: DocumentKind::Spreadsheet,
        };

        match (old_cells.get(coordinate), new_cells.get(coordinate)) {
            (None, Some(cell)) => records.push(ChangeRecord::CellAdded(presence(
                ChangeType::Added,
                cell.value.to_string(),
            ))),
            (Some(cell), None) => records.push(ChangeRecord::CellDeleted(presence(
                ChangeType::Deleted,
                cell.value.to_string(),
            ))),
            (Some(old), Some(new)) => {
                let old_value = old.value.to_string();
                let new_value = new.value.to_string();
                if options.same_text(&old_value, &new_value) {
                    continue;
                }
                let diff = word_diff(&old_value, &new_value);
                records.push(ChangeRecord::CellModified(CellValueChange {
                    change_type: ChangeType::Modified,
                    coordinate: coordinate.to_string(),
                    sheet_name: sheet_name.clone(),
                    document_type: DocumentKind::Spreadsheet,
                    old_value,
                    new_value,
                    content_html: diff.html,
                    added_terms: diff.added_terms,
                    deleted_terms: diff.deleted_terms,
                    similarity: diff.similarity,
                }));
            }
            (None, None) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Cell, Page};

    fn word(texts: &[&str]) -> Document {
        Document::Word(WordContent::from_texts(texts.iter().copied()))
    }

    fn pdf(pages: &[&str]) -> Document {
        Document::Pdf(PdfContent::from_page_texts(pages.iter().copied()))
    }

    fn text_records(records: &[ChangeRecord]) -> Vec<&TextChange> {
        records
            .iter()
            .map(|r| match r {
                ChangeRecord::TextChange(t) => t,
                other => panic!("unexpected record {:?}", other),
            })
            .collect()
    }

    #[test]
    fn test_paragraph_modified() {
        let records = text_changes(
            &word(&["Hello world"]),
            &word(&["Hello there world"]),
            &DetectOptions::default(),
        );
        let changes = text_records(&records);
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].change_type, ChangeType::Modified);
        assert_eq!(changes[0].added_terms.as_deref(), Some(&["there".to_string()][..]));
        assert_eq!(changes[0].paragraph_index, Some(0));
    }

    #[test]
    fn test_paragraph_added_and_deleted() {
        let options = DetectOptions::default();
        let records = text_changes(&word(&["a", "b"]), &word(&["a", "b", "c"]), &options);
        let changes = text_records(&records);
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].change_type, ChangeType::Added);
        assert_eq!(changes[0].content.as_deref(), Some("c"));
        assert_eq!(changes[0].paragraph_index, Some(2));

        let records = text_changes(&word(&["a", "gone"]), &word(&["a", ""]), &options);
        let changes = text_records(&records);
        assert_eq!(changes[0].change_type, ChangeType::Deleted);
        assert_eq!(changes[0].content.as_deref(), Some("gone"));
    }

    #[test]
    fn test_empty_paragraphs_are_not_reported() {
        let records = text_changes(&word(&["a", ""]), &word(&["a"]), &DetectOptions::default());
        assert!(records.is_empty());
    }

    #[test]
    fn test_ignore_case_suppresses_paragraph_change() {
        let options = DetectOptions::new().with_ignore_case(true);
        let records = text_changes(&word(&["Hello World"]), &word(&["hello world"]), &options);
        assert!(records.is_empty());
    }

    #[test]
    fn test_ignore_whitespace_blank_paragraph_is_not_deleted() {
        let options = DetectOptions::new().with_ignore_whitespace(true);
        let records = text_changes(&word(&["a", "  "]), &word(&["a", ""]), &options);
        assert!(records.is_empty());

        let records = text_changes(&word(&["\t"]), &word(&["x"]), &options);
        let changes = text_records(&records);
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].change_type, ChangeType::Modified);

        let exact = DetectOptions::default();
        let records = text_changes(&word(&["  "]), &word(&[""]), &exact);
        assert_eq!(text_records(&records)[0].change_type, ChangeType::Deleted);
    }

    #[test]
    fn test_page_sentence_insert() {
        let records = text_changes(
            &pdf(&["First. Second."]),
            &pdf(&["First. Inserted. Second."]),
            &DetectOptions::default(),
        );
        let changes = text_records(&records);
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].change_type, ChangeType::Added);
        assert_eq!(changes[0].content.as_deref(), Some("Inserted."));
        assert_eq!(changes[0].page_number, Some(1));
    }

    #[test]
    fn test_page_replace_pairs_then_leftovers() {
        let records = text_changes(
            &pdf(&["Keep. Old one. Old two."]),
            &pdf(&["Keep. New one."]),
            &DetectOptions::default(),
        );
        let changes = text_records(&records);
        assert_eq!(changes.len(), 2);
        assert_eq!(changes[0].change_type, ChangeType::Modified);
        assert_eq!(changes[0].old_text.as_deref(), Some("Old one."));
        assert_eq!(changes[0].new_text.as_deref(), Some("New one."));
        assert_eq!(changes[1].change_type, ChangeType::Deleted);
        assert_eq!(changes[1].content.as_deref(), Some("Old two."));
    }

    #[test]
    fn test_extra_page_is_added_text() {
        let original = pdf(&["Same."]);
        let revised = Document::Pdf(PdfContent {
            pages: vec![Page::new(1, "Same."), Page::new(2, "Extra. Page.")],
            annotations: Vec::new(),
        });
        let records = text_changes(&original, &revised, &DetectOptions::default());
        let changes = text_records(&records);
        assert_eq!(changes.len(), 2);
        assert!(changes
            .iter()
            .all(|c| c.change_type == ChangeType::Added && c.page_number == Some(2)));
    }

    #[test]
    fn test_line_segmentation() {
        let options = DetectOptions::new().by_lines();
        let records = text_changes(&pdf(&["a. b\nc"]), &pdf(&["a. x\nc"]), &options);
        let changes = text_records(&records);
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].old_text.as_deref(), Some("a. b"));
    }

    fn book(sheets: Vec<Sheet>) -> Document {
        Document::Spreadsheet(SheetContent { sheets })
    }

    #[test]
    fn test_cell_added() {
        let original = book(vec![Sheet::new("Sheet1").with_cell(Cell::new("A1", 10))]);
        let revised = book(vec![Sheet::new("Sheet1")
            .with_cell(Cell::new("A1", 10))
            .with_cell(Cell::new("B1", 5))]);

        let records = text_changes(&original, &revised, &DetectOptions::default());
        assert_eq!(records.len(), 1);
        match &records[0] {
            ChangeRecord::CellAdded(c) => {
                assert_eq!(c.coordinate, "B1");
                assert_eq!(c.value, "5");
                assert_eq!(c.content, "5");
                assert_eq!(c.sheet_name, "Sheet1");
            }
            other => panic!("unexpected record {:?}", other),
        }
    }

    #[test]
    fn test_cell_modified_and_ordering() {
        let original = book(vec![Sheet::new("S")
            .with_cell(Cell::new("B2", "old"))
            .with_cell(Cell::new("A10", 1))
            .with_cell(Cell::new("A2", 1.5))]);
        let revised = book(vec![Sheet::new("S")
            .with_cell(Cell::new("B2", "new"))
            .with_cell(Cell::new("A2", 2.5))]);

        let records = text_changes(&original, &revised, &DetectOptions::default());
        let tags: Vec<_> = records.iter().map(|r| r.type_tag()).collect();
        assert_eq!(tags, vec!["cell_modified", "cell_modified", "cell_deleted"]);

        match &records[0] {
            ChangeRecord::CellModified(c) => {
                assert_eq!(c.coordinate, "A2");
                assert_eq!(c.old_value, "1.5");
                assert_eq!(c.new_value, "2.5");
            }
            other => panic!("unexpected record {:?}", other),
        }
    }

    #[test]
    fn test_sheet_added_and_deleted() {
        let original = book(vec![Sheet::new("Old"), Sheet::new("Kept")]);
        let revised = book(vec![Sheet::new("Kept"), Sheet::new("New")]);

        let records = text_changes(&original, &revised, &DetectOptions::default());
        assert_eq!(records.len(), 2);
        match (&records[0], &records[1]) {
            (ChangeRecord::SheetDeleted(d), ChangeRecord::SheetAdded(a)) => {
                assert_eq!(d.content, "Sheet deleted: Old");
                assert_eq!(a.content, "Sheet added: New");
                assert_eq!(a.sheet_name, "New");
            }
            other => panic!("unexpected records {:?}", other),
        }
    }

    #[test]
    fn test_kind_mismatch_yields_nothing() {
        let records = text_changes(&word(&["a"]), &pdf(&["a"]), &DetectOptions::default());
        assert!(records.is_empty());
    }
}
