//! Table comparison for word-processing documents.

use crate::model::{Document, DocumentKind, Table};
use crate::report::{ChangeRecord, ChangeType, CountChange, TableCellChange, TableRowCountChange};

/// Compare table counts, row counts and cell texts.
///
/// Tables, rows and cells are paired by position; surplus elements on the
/// longer side are covered by the count records only.
pub fn table_changes(original: &Document, revised: &Document) -> Vec<ChangeRecord> {
    let (Document::Word(a), Document::Word(b)) = (original, revised) else {
        return Vec::new();
    };

    let mut records = Vec::new();
    if a.tables.len() != b.tables.len() {
        records.push(ChangeRecord::TableCountChange(CountChange::new(
            a.tables.len(),
            b.tables.len(),
            DocumentKind::Word,
        )));
    }

    for (table_index, (old, new)) in a.tables.iter().zip(&b.tables).enumerate() {
        compare_table(table_index, old, new, &mut records);
    }

    log::debug!("table comparator: {} records", records.len());
    records
}

fn compare_table(table_index: usize, old: &Table, new: &Table, records: &mut Vec<ChangeRecord>) {
    if old.row_count() != new.row_count() {
        records.push(ChangeRecord::TableRowCountChange(TableRowCountChange {
            change_type: ChangeType::Modified,
            table_index,
            original_rows: old.row_count(),
            revised_rows: new.row_count(),
            document_type: DocumentKind::Word,
        }));
    }

    for (row_index, (old_row, new_row)) in old.rows.iter().zip(&new.rows).enumerate() {
        for (cell_index, (old_cell, new_cell)) in old_row.iter().zip(new_row).enumerate() {
            if old_cell.text == new_cell.text {
                continue;
            }
            records.push(ChangeRecord::TableCellChange(TableCellChange {
                change_type: ChangeType::Modified,
                table_index,
                row_index,
                cell_index,
                old_text: old_cell.text.clone(),
                new_text: new_cell.text.clone(),
                document_type: DocumentKind::Word,
            }));
        }
    }
}
