//! Page-oriented document types.

use serde::{Deserialize, Serialize};

/// Content of a page-oriented document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfContent {
    /// Pages in document order
    pub pages: Vec<Page>,

    /// Annotations of all pages, flattened in page order
    pub annotations: Vec<Annotation>,
}

impl PdfContent {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a document from per-page texts.
    pub fn from_page_texts<S: Into<String>>(texts: impl IntoIterator<Item = S>) -> Self {
        let pages = texts
            .into_iter()
            .enumerate()
            .map(|(i, text)| Page::new(i as u32 + 1, text))
            .collect();
        Self {
            pages,
            annotations: Vec::new(),
        }
    }
}

/// A single page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Page {
    /// Page number (1-indexed)
    pub page_number: u32,

    /// Extracted page text
    pub text: String,

    /// Page rotation in degrees
    pub rotation: i32,

    /// Page boundary box as [left, bottom, right, top]
    pub mediabox: Option<[f64; 4]>,
}

impl Page {
    /// Create a page with text and no rotation.
    pub fn new(page_number: u32, text: impl Into<String>) -> Self {
        Self {
            page_number,
            text: text.into(),
            rotation: 0,
            mediabox: None,
        }
    }
}

/// A page annotation (highlight, note, free text, ...).
///
/// Identity comes from `id` when present; otherwise it is derived from the
/// page, subtype, rectangle and contents (see [`crate::identity`]).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Annotation {
    /// Explicit annotation name
    pub id: Option<String>,
    /// Page the annotation sits on (1-indexed)
    pub page_number: u32,
    /// Annotation subtype (e.g. `Highlight`, `Text`, `FreeText`)
    pub subtype: Option<String>,
    /// Bounding rectangle [x1, y1, x2, y2]
    pub rect: Option<Vec<f64>>,
    /// Quadrilateral points of text markup annotations
    pub quadpoints: Option<Vec<f64>>,
    /// Comment body
    pub contents: Option<String>,
    pub author: Option<String>,
    pub subject: Option<String>,
    /// RGB color, components in 0..1
    pub color: Option<Vec<f64>>,
    /// Annotation flag bits
    pub flags: Option<u32>,
    /// Modification timestamp as found in the file
    pub modified: Option<String>,
    /// Creation timestamp as found in the file
    pub created: Option<String>,
}

impl Annotation {
    /// Create an annotation on a page with the given subtype.
    pub fn new(page_number: u32, subtype: impl Into<String>) -> Self {
        Self {
            page_number,
            subtype: Some(subtype.into()),
            ..Self::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_contents(mut self, contents: impl Into<String>) -> Self {
        self.contents = Some(contents.into());
        self
    }

    pub fn with_rect(mut self, rect: [f64; 4]) -> Self {
        self.rect = Some(rect.to_vec());
        self
    }

    pub fn with_color(mut self, r: f64, g: f64, b: f64) -> Self {
        self.color = Some(vec![r, g, b]);
        self
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// The explicit name, if present and non-empty.
    pub fn explicit_id(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.is_empty())
    }

    /// Contents, with absent treated as empty.
    pub fn contents_text(&self) -> &str {
        self.contents.as_deref().unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_page_texts_numbers_pages() {
        let doc = PdfContent::from_page_texts(["one", "two"]);
        assert_eq!(doc.pages[0].page_number, 1);
        assert_eq!(doc.pages[1].page_number, 2);
    }

    #[test]
    fn test_empty_id_is_not_explicit() {
        let annotation = Annotation::new(1, "Text").with_id("");
        assert_eq!(annotation.explicit_id(), None);

        let annotation = Annotation::new(1, "Text").with_id("NM-1");
        assert_eq!(annotation.explicit_id(), Some("NM-1"));
    }

    #[test]
    fn test_annotation_missing_fields_deserialize_as_absent() {
        let annotation: Annotation =
            serde_json::from_str(r#"{"page_number": 2, "subtype": "Highlight"}"#).unwrap();
        assert_eq!(annotation.rect, None);
        assert_eq!(annotation.author, None);
        assert_eq!(annotation.contents_text(), "");
    }
}
