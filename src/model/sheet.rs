//! Spreadsheet types.

use crate::repr;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Content of a spreadsheet workbook.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetContent {
    /// Sheets in workbook order
    pub sheets: Vec<Sheet>,
}

impl SheetContent {
    /// Create an empty workbook.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a sheet.
    pub fn with_sheet(mut self, sheet: Sheet) -> Self {
        self.sheets.push(sheet);
        self
    }

    /// Find the first sheet with the given name.
    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.name == name)
    }
}

/// A worksheet with its non-empty cells.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Sheet {
    pub name: String,

    /// Last used row (1-indexed)
    pub max_row: u32,

    /// Last used column (1-indexed)
    pub max_column: u32,

    /// Non-empty cells. Input may group them in rows; they are flattened.
    #[serde(deserialize_with = "deserialize_cells")]
    pub cells: Vec<Cell>,
}

impl Sheet {
    /// Create an empty sheet.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Add a cell, growing the sheet extents to cover it.
    pub fn with_cell(mut self, cell: Cell) -> Self {
        if let Some((row, column)) = cell.position() {
            self.max_row = self.max_row.max(row);
            self.max_column = self.max_column.max(column);
        }
        self.cells.push(cell);
        self
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CellLayout {
    Rows(Vec<Vec<Cell>>),
    Flat(Vec<Cell>),
}

fn deserialize_cells<'de, D>(deserializer: D) -> Result<Vec<Cell>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match CellLayout::deserialize(deserializer)? {
        CellLayout::Rows(rows) => rows.into_iter().flatten().collect(),
        CellLayout::Flat(cells) => cells,
    })
}

/// A non-empty cell.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Cell {
    /// A1-style coordinate (e.g. `B12`)
    pub coordinate: String,

    pub value: CellValue,

    /// Type name inferred by the extractor (e.g. `int`, `str`)
    pub data_type: Option<String>,

    pub font: Option<CellFont>,
    pub fill: Option<CellFill>,
    pub border: Option<CellBorder>,
}

impl Cell {
    /// Create a cell with a value and no style information.
    pub fn new(coordinate: impl Into<String>, value: impl Into<CellValue>) -> Self {
        let value = value.into();
        Self {
            coordinate: coordinate.into(),
            data_type: Some(value.type_name().to_string()),
            value,
            font: None,
            fill: None,
            border: None,
        }
    }

    pub fn with_font(mut self, font: CellFont) -> Self {
        self.font = Some(font);
        self
    }

    pub fn with_fill(mut self, fill: CellFill) -> Self {
        self.fill = Some(fill);
        self
    }

    pub fn with_border(mut self, border: CellBorder) -> Self {
        self.border = Some(border);
        self
    }

    /// Parse the coordinate into a 1-indexed (row, column) pair.
    pub fn position(&self) -> Option<(u32, u32)> {
        parse_coordinate(&self.coordinate)
    }
}

/// Parse an A1-style coordinate into a 1-indexed (row, column) pair.
pub(crate) fn parse_coordinate(coordinate: &str) -> Option<(u32, u32)> {
    let split = coordinate.find(|c: char| c.is_ascii_digit())?;
    let (letters, digits) = coordinate.split_at(split);
    if letters.is_empty() || !letters.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }

    let mut column: u32 = 0;
    for c in letters.chars() {
        let digit = c.to_ascii_uppercase() as u32 - 'A' as u32 + 1;
        column = column.checked_mul(26)?.checked_add(digit)?;
    }
    let row = digits.parse().ok()?;
    Some((row, column))
}

/// A scalar cell value of mixed type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl CellValue {
    /// Type name in the extractor's vocabulary.
    pub fn type_name(&self) -> &'static str {
        match self {
            CellValue::Null => "NoneType",
            CellValue::Bool(_) => "bool",
            CellValue::Int(_) => "int",
            CellValue::Float(_) => "float",
            CellValue::Text(_) => "str",
        }
    }

    fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            CellValue::Int(i) => Some(*i as f64),
            CellValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Value equality with numeric widening, so `10` equals `10.0`.
    pub fn same_value(&self, other: &CellValue) -> bool {
        match (self.as_number(), other.as_number()) {
            (Some(a), Some(b)) => a == b,
            _ => self == other,
        }
    }
}

/// Renders the value as reported in change records; `Null` renders empty.
impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Null => Ok(()),
            CellValue::Bool(b) => f.write_str(repr::bool_repr(*b)),
            CellValue::Int(i) => write!(f, "{}", i),
            CellValue::Float(v) => f.write_str(&repr::float_repr(*v)),
            CellValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for CellValue {
    fn from(v: i64) -> Self {
        CellValue::Int(v)
    }
}

impl From<i32> for CellValue {
    fn from(v: i32) -> Self {
        CellValue::Int(v as i64)
    }
}

impl From<f64> for CellValue {
    fn from(v: f64) -> Self {
        CellValue::Float(v)
    }
}

impl From<bool> for CellValue {
    fn from(v: bool) -> Self {
        CellValue::Bool(v)
    }
}

impl From<&str> for CellValue {
    fn from(v: &str) -> Self {
        CellValue::Text(v.to_string())
    }
}

impl From<String> for CellValue {
    fn from(v: String) -> Self {
        CellValue::Text(v)
    }
}

/// Font attributes of a cell.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CellFont {
    pub name: Option<String>,
    pub size: Option<f64>,
    pub bold: Option<bool>,
    pub italic: Option<bool>,
    /// ARGB hex color string
    pub color: Option<String>,
}

/// Fill attributes of a cell.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CellFill {
    pub pattern_type: Option<String>,
    /// Foreground ARGB hex color string
    pub fg_color: Option<String>,
}

/// Border line styles of a cell (e.g. `thin`, `double`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CellBorder {
    pub left: Option<String>,
    pub right: Option<String>,
    pub top: Option<String>,
    pub bottom: Option<String>,
}
