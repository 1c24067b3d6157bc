//! Per-category comparators.
//!
//! Each comparator is a pure function of the two documents and returns a
//! freshly built record list. A comparator that does not apply to the
//! documents' kind returns an empty list. Kind mismatches are handled by
//! the detector before any comparator runs.

mod annotations;
mod formatting;
mod images;
mod structure;
mod tables;
mod text;

pub use annotations::annotation_changes;
pub use formatting::formatting_changes;
pub use images::{image_changes, ImageComparison};
pub use structure::structural_changes;
pub use tables::table_changes;
pub use text::text_changes;

use crate::model::{parse_coordinate, Cell, Sheet};
use std::cmp::Ordering;
use std::collections::HashMap;

/// Cells of a sheet keyed by coordinate, in first-occurrence order.
///
/// When a coordinate repeats, the later cell replaces the earlier one but
/// keeps its position.
pub(crate) struct CellIndex<'d> {
    order: Vec<&'d str>,
    cells: HashMap<&'d str, &'d Cell>,
}

impl<'d> CellIndex<'d> {
    pub(crate) fn new(sheet: &'d Sheet) -> Self {
        let mut order = Vec::with_capacity(sheet.cells.len());
        let mut cells = HashMap::with_capacity(sheet.cells.len());
        for cell in &sheet.cells {
            let coordinate = cell.coordinate.as_str();
            if cells.insert(coordinate, cell).is_none() {
                order.push(coordinate);
            }
        }
        Self { order, cells }
    }

    pub(crate) fn get(&self, coordinate: &str) -> Option<&'d Cell> {
        self.cells.get(coordinate).copied()
    }

    /// Cells in first-occurrence order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = (&'d str, &'d Cell)> + '_ {
        self.order.iter().map(move |c| (*c, self.cells[c]))
    }

    pub(crate) fn coordinates(&self) -> impl Iterator<Item = &'d str> + '_ {
        self.order.iter().copied()
    }
}

/// Row-major coordinate order; unparsable coordinates sort last, by text.
pub(crate) fn coordinate_order(a: &str, b: &str) -> Ordering {
    match (parse_coordinate(a), parse_coordinate(b)) {
        (Some(pa), Some(pb)) => pa.cmp(&pb).then_with(|| a.cmp(b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_index_last_wins_first_position() {
        let sheet = Sheet::new("S")
            .with_cell(Cell::new("A1", 1))
            .with_cell(Cell::new("B1", 2))
            .with_cell(Cell::new("A1", 3));
        let index = CellIndex::new(&sheet);

        let coords: Vec<_> = index.coordinates().collect();
        assert_eq!(coords, vec!["A1", "B1"]);
        assert_eq!(index.get("A1").map(|c| c.value.to_string()), Some("3".into()));
        assert!(index.get("C1").is_none());
        assert_eq!(index.iter().count(), 2);
    }

    #[test]
    fn test_coordinate_order() {
        let mut coords = vec!["B1", "zz", "A10", "A2", "AA1", "1A"];
        coords.sort_by(|a, b| coordinate_order(a, b));
        assert_eq!(coords, vec!["B1", "AA1", "A2", "A10", "1A", "zz"]);
    }
}
