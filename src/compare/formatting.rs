//! Formatting comparison for word-processing documents and spreadsheets.
//!
//! Only elements whose content is unchanged are inspected; a content change
//! is already reported by the text comparator. Pairing is positional:
//! paragraphs and runs by index, sheets by workbook position.

use super::{coordinate_order, CellIndex};
use crate::model::{
    Cell, CellBorder, CellFill, CellFont, Document, DocumentKind, Run, SheetContent, WordContent,
};
use crate::report::{
    CellFormattingChange, ChangeRecord, ChangeType, ParagraphStyleChange, RunFormattingChange,
};
use crate::repr::{opt_repr, AttrRepr};

/// Compare paragraph styles, run formatting and cell styles.
pub fn formatting_changes(original: &Document, revised: &Document) -> Vec<ChangeRecord> {
    let records = match (original, revised) {
        (Document::Word(a), Document::Word(b)) => word_formatting(a, b),
        (Document::Spreadsheet(a), Document::Spreadsheet(b)) => sheet_formatting(a, b),
        _ => Vec::new(),
    };
    log::debug!("formatting comparator: {} records", records.len());
    records
}

fn word_formatting(original: &WordContent, revised: &WordContent) -> Vec<ChangeRecord> {
    let mut records = Vec::new();

    for (index, (old, new)) in original.paragraphs.iter().zip(&revised.paragraphs).enumerate() {
        if old.style != new.style {
            records.push(ChangeRecord::ParagraphStyleChange(ParagraphStyleChange {
                change_type: ChangeType::Modified,
                paragraph_index: index,
                old_style: old.style.clone(),
                new_style: new.style.clone(),
                document_type: DocumentKind::Word,
            }));
        }

        for (run_index, (old_run, new_run)) in old.runs.iter().zip(&new.runs).enumerate() {
            if old_run.text != new_run.text {
                continue;
            }
            let changes = run_differences(old_run, new_run);
            if changes.is_empty() {
                continue;
            }
            records.push(ChangeRecord::RunFormattingChange(RunFormattingChange {
                change_type: ChangeType::Modified,
                paragraph_index: index,
                run_index,
                text: old_run.text.clone(),
                changes,
                document_type: DocumentKind::Word,
            }));
        }
    }

    records
}

fn run_differences(old: &Run, new: &Run) -> Vec<String> {
    let mut changes = Vec::new();
    push_change(&mut changes, "bold", old.bold.as_ref(), new.bold.as_ref());
    push_change(&mut changes, "italic", old.italic.as_ref(), new.italic.as_ref());
    push_change(&mut changes, "underline", old.underline.as_ref(), new.underline.as_ref());
    push_change(&mut changes, "font_name", old.font_name.as_ref(), new.font_name.as_ref());
    push_change(&mut changes, "font_size", old.font_size.as_ref(), new.font_size.as_ref());
    push_change(&mut changes, "font_color", old.font_color.as_ref(), new.font_color.as_ref());
    changes
}

/// Record `attr: old → new` when the two values differ.
fn push_change<T: PartialEq + AttrRepr>(
    changes: &mut Vec<String>,
    attr: &str,
    old: Option<&T>,
    new: Option<&T>,
) {
    if old != new {
        changes.push(format!("{}: {} → {}", attr, opt_repr(old), opt_repr(new)));
    }
}

fn sheet_formatting(original: &SheetContent, revised: &SheetContent) -> Vec<ChangeRecord> {
    let mut records = Vec::new();

    for (old_sheet, new_sheet) in original.sheets.iter().zip(&revised.sheets) {
        if old_sheet.name != new_sheet.name {
            continue;
        }
        let new_cells = CellIndex::new(new_sheet);
        let mut old_cells: Vec<(&str, &Cell)> = CellIndex::new(old_sheet).iter().collect();
        old_cells.sort_by(|(a, _), (b, _)| coordinate_order(a, b));

        for (coordinate, old_cell) in old_cells {
            let Some(new_cell) = new_cells.get(coordinate) else {
                continue;
            };
            if !old_cell.value.same_value(&new_cell.value) {
                continue;
            }
            let changes = cell_differences(old_cell, new_cell);
            if changes.is_empty() {
                continue;
            }
            records.push(ChangeRecord::CellFormattingChange(CellFormattingChange {
                change_type: ChangeType::Modified,
                coordinate: coordinate.to_string(),
                sheet_name: old_sheet.name.clone(),
                changes,
                document_type: DocumentKind::Spreadsheet,
            }));
        }
    }

    records
}

/// Absent style blocks compare as blocks with every attribute absent.
fn cell_differences(old: &Cell, new: &Cell) -> Vec<String> {
    let mut changes = Vec::new();

    let no_font = CellFont::default();
    let (of, nf) = (
        old.font.as_ref().unwrap_or(&no_font),
        new.font.as_ref().unwrap_or(&no_font),
    );
    push_change(&mut changes, "font_name", of.name.as_ref(), nf.name.as_ref());
    push_change(&mut changes, "font_size", of.size.as_ref(), nf.size.as_ref());
    push_change(&mut changes, "font_bold", of.bold.as_ref(), nf.bold.as_ref());
    push_change(&mut changes, "font_italic", of.italic.as_ref(), nf.italic.as_ref());
    push_change(&mut changes, "font_color", of.color.as_ref(), nf.color.as_ref());

    let no_fill = CellFill::default();
    let (ofl, nfl) = (
        old.fill.as_ref().unwrap_or(&no_fill),
        new.fill.as_ref().unwrap_or(&no_fill),
    );
    push_change(&mut changes, "fill_color", ofl.fg_color.as_ref(), nfl.fg_color.as_ref());

    let no_border = CellBorder::default();
    let (ob, nb) = (
        old.border.as_ref().unwrap_or(&no_border),
        new.border.as_ref().unwrap_or(&no_border),
    );
    push_change(&mut changes, "border_left", ob.left.as_ref(), nb.left.as_ref());
    push_change(&mut changes, "border_right", ob.right.as_ref(), nb.right.as_ref());
    push_change(&mut changes, "border_top", ob.top.as_ref(), nb.top.as_ref());
    push_change(&mut changes, "border_bottom", ob.bottom.as_ref(), nb.bottom.as_ref());

    changes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Paragraph, Sheet};

    fn word(paragraphs: Vec<Paragraph>) -> Document {
        let mut content = WordContent::new();
        for paragraph in paragraphs {
            content.add_paragraph(paragraph);
        }
        Document::Word(content)
    }

    #[test]
    fn test_paragraph_style_change() {
        let original = word(vec![Paragraph::new(0, "Title").with_style("Normal")]);
        let revised = word(vec![Paragraph::new(0, "Title").with_style("Heading 1")]);

        let records = formatting_changes(&original, &revised);
        assert_eq!(records.len(), 1);
        match &records[0] {
            ChangeRecord::ParagraphStyleChange(c) => {
                assert_eq!(c.old_style.as_deref(), Some("Normal"));
                assert_eq!(c.new_style.as_deref(), Some("Heading 1"));
            }
            other => panic!("unexpected record {:?}", other),
        }
    }

    #[test]
    fn test_run_formatting_change() {
        let original = word(vec![Paragraph::new(0, "Bold text")
            .with_run(Run::new("Bold text").with_font("Arial", 12.0))]);
        let revised = word(vec![Paragraph::new(0, "Bold text")
            .with_run(Run::new("Bold text").bold(true).with_font("Arial", 14.0))]);

        let records = formatting_changes(&original, &revised);
        assert_eq!(records.len(), 1);
        match &records[0] {
            ChangeRecord::RunFormattingChange(c) => {
                assert_eq!(c.run_index, 0);
                assert_eq!(c.text, "Bold text");
                assert_eq!(
                    c.changes,
                    vec!["bold: None → True", "font_size: 12.0 → 14.0"]
                );
            }
            other => panic!("unexpected record {:?}", other),
        }
    }

    #[test]
    fn test_runs_with_changed_text_are_skipped() {
        let original = word(vec![Paragraph::new(0, "a").with_run(Run::new("a"))]);
        let revised = word(vec![Paragraph::new(0, "b").with_run(Run::new("b").bold(true))]);
        assert!(formatting_changes(&original, &revised).is_empty());
    }

    fn book(cell: Cell) -> Document {
        Document::Spreadsheet(SheetContent::new().with_sheet(Sheet::new("Sheet1").with_cell(cell)))
    }

    #[test]
    fn test_cell_style_change() {
        let original = book(Cell::new("A1", 10));
        let revised = book(
            Cell::new("A1", 10.0)
                .with_font(CellFont {
                    bold: Some(true),
                    ..CellFont::default()
                })
                .with_border(CellBorder {
                    left: Some("thin".into()),
                    ..CellBorder::default()
                }),
        );

        let records = formatting_changes(&original, &revised);
        assert_eq!(records.len(), 1);
        match &records[0] {
            ChangeRecord::CellFormattingChange(c) => {
                assert_eq!(c.coordinate, "A1");
                assert_eq!(c.sheet_name, "Sheet1");
                assert_eq!(c.changes, vec!["font_bold: None → True", "border_left: None → thin"]);
            }
            other => panic!("unexpected record {:?}", other),
        }
    }

    #[test]
    fn test_cell_with_changed_value_is_skipped() {
        let original = book(Cell::new("A1", 1));
        let revised = book(Cell::new("A1", 2).with_fill(CellFill {
            pattern_type: Some("solid".into()),
            fg_color: Some("FFFF0000".into()),
        }));
        assert!(formatting_changes(&original, &revised).is_empty());
    }

    #[test]
    fn test_cell_records_in_row_major_order() {
        let bold = || CellFont {
            bold: Some(true),
            ..CellFont::default()
        };
        let original = Document::Spreadsheet(SheetContent::new().with_sheet(
            Sheet::new("Sheet1")
                .with_cell(Cell::new("B2", 1))
                .with_cell(Cell::new("A10", 2))
                .with_cell(Cell::new("A1", 3)),
        ));
        let revised = Document::Spreadsheet(SheetContent::new().with_sheet(
            Sheet::new("Sheet1")
                .with_cell(Cell::new("A1", 3).with_font(bold()))
                .with_cell(Cell::new("B2", 1).with_font(bold()))
                .with_cell(Cell::new("A10", 2).with_font(bold())),
        ));

        let coordinates: Vec<_> = formatting_changes(&original, &revised)
            .iter()
            .map(|r| match r {
                ChangeRecord::CellFormattingChange(c) => c.coordinate.clone(),
                other => panic!("unexpected record {:?}", other),
            })
            .collect();
        assert_eq!(coordinates, vec!["A1", "B2", "A10"]);
    }

    #[test]
    fn test_sheets_pair_by_position() {
        let original = Document::Spreadsheet(
            SheetContent::new().with_sheet(Sheet::new("A").with_cell(Cell::new("A1", 1))),
        );
        let revised = Document::Spreadsheet(SheetContent::new().with_sheet(
            Sheet::new("B").with_cell(Cell::new("A1", 1).with_font(CellFont {
                italic: Some(true),
                ..CellFont::default()
            })),
        ));
        assert!(formatting_changes(&original, &revised).is_empty());
    }
}
