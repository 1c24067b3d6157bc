//! Normalized document model consumed by the change detector.
//!
//! This module defines the format-agnostic representation produced by the
//! extraction layer. A [`Document`] is tagged with its kind (`docx`, `pdf`
//! or `xlsx`) and carries only the structures the comparators inspect.
//! Every optional field is modeled as an `Option`, so an absent value and
//! an empty value are never conflated by accident.

mod document;
mod page;
mod sheet;
mod word;

pub use document::{Document, DocumentKind};
pub use page::{Annotation, Page, PdfContent};
pub use sheet::{Cell, CellBorder, CellFill, CellFont, CellValue, Sheet, SheetContent};
pub(crate) use sheet::parse_coordinate;
pub use word::{Image, Paragraph, Run, Table, TableCell, WordContent};
