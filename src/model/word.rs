//! Word-processing document types.

use serde::{Deserialize, Serialize};

/// Content of a word-processing document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WordContent {
    /// Body paragraphs in document order
    pub paragraphs: Vec<Paragraph>,

    /// Tables in document order
    pub tables: Vec<Table>,

    /// Embedded images in relationship order
    pub images: Vec<Image>,
}

impl WordContent {
    /// Create an empty document body.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a body from plain paragraph texts (no runs, no style).
    pub fn from_texts<S: Into<String>>(texts: impl IntoIterator<Item = S>) -> Self {
        let paragraphs = texts
            .into_iter()
            .enumerate()
            .map(|(index, text)| Paragraph::new(index, text))
            .collect();
        Self {
            paragraphs,
            ..Self::default()
        }
    }

    /// Add a paragraph, assigning it the next index.
    pub fn add_paragraph(&mut self, mut paragraph: Paragraph) {
        paragraph.index = self.paragraphs.len();
        self.paragraphs.push(paragraph);
    }
}

/// A body paragraph.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Paragraph {
    /// Position in the document (0-indexed)
    pub index: usize,

    /// Full paragraph text
    pub text: String,

    /// Paragraph style name
    pub style: Option<String>,

    /// Formatting runs
    pub runs: Vec<Run>,
}

impl Paragraph {
    /// Create a paragraph with text only.
    pub fn new(index: usize, text: impl Into<String>) -> Self {
        Self {
            index,
            text: text.into(),
            style: None,
            runs: Vec::new(),
        }
    }

    /// Set the style name.
    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = Some(style.into());
        self
    }

    /// Append a run.
    pub fn with_run(mut self, run: Run) -> Self {
        self.runs.push(run);
        self
    }
}

/// A run of uniformly formatted text.
///
/// Formatting flags are tri-state: `None` means inherited from the style.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Run {
    pub text: String,
    pub bold: Option<bool>,
    pub italic: Option<bool>,
    pub underline: Option<bool>,
    pub font_name: Option<String>,
    /// Font size in points
    pub font_size: Option<f64>,
    /// Font color as a hex RGB string (e.g. `FF0000`)
    pub font_color: Option<String>,
}

impl Run {
    /// Create a run with text and no explicit formatting.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn bold(mut self, bold: bool) -> Self {
        self.bold = Some(bold);
        self
    }

    pub fn italic(mut self, italic: bool) -> Self {
        self.italic = Some(italic);
        self
    }

    pub fn with_font(mut self, name: impl Into<String>, size: f64) -> Self {
        self.font_name = Some(name.into());
        self.font_size = Some(size);
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.font_color = Some(color.into());
        self
    }
}

/// A table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Table {
    /// Position in the document (0-indexed)
    pub index: usize,

    /// Table style name
    pub style: Option<String>,

    /// Rows, each an ordered list of cells
    pub rows: Vec<Vec<TableCell>>,
}

impl Table {
    /// Create a table from rows of cell texts.
    pub fn from_rows<S: Into<String>>(
        index: usize,
        rows: impl IntoIterator<Item = Vec<S>>,
    ) -> Self {
        Self {
            index,
            style: None,
            rows: rows
                .into_iter()
                .map(|row| row.into_iter().map(TableCell::text).collect())
                .collect(),
        }
    }

    /// Get the number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// A table cell.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableCell {
    /// Full cell text
    pub text: String,

    /// Texts of the paragraphs inside the cell
    pub paragraphs: Vec<String>,
}

impl TableCell {
    /// Create a single-paragraph cell.
    pub fn text(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            paragraphs: vec![text.clone()],
            text,
        }
    }
}

/// An embedded image.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Image {
    /// Position among the document's images (0-indexed)
    pub index: usize,

    /// Base64-encoded pixel payload
    pub data: String,

    /// Source image format (e.g. `PNG`)
    pub format: Option<String>,

    /// Pixel dimensions as (width, height)
    pub size: Option<(u32, u32)>,

    /// Color mode (e.g. `RGB`, `RGBA`)
    pub mode: Option<String>,
}

impl Image {
    /// Create an image from a base64 payload and its pixel dimensions.
    pub fn new(index: usize, data: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            index,
            data: data.into(),
            format: Some("PNG".to_string()),
            size: Some((width, height)),
            mode: Some("RGB".to_string()),
        }
    }
}
