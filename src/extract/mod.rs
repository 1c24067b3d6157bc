//! Extraction seam producing normalized documents.
//!
//! Reading native office and PDF files is the job of an extraction layer
//! outside this crate. Extractors plug in through [`DocumentExtractor`] and
//! are dispatched by file extension through an [`ExtractorRegistry`]. The
//! built-in [`JsonExtractor`] loads documents that were already normalized.
//!
//! # Example
//!
//! ```no_run
//! use docdiff::extract::ExtractorRegistry;
//! use std::path::Path;
//!
//! fn main() -> docdiff::Result<()> {
//!     let registry = ExtractorRegistry::with_defaults();
//!     let doc = registry.load(Path::new("report.v1.json"))?;
//!     println!("{} with {} units", doc.kind(), doc.unit_count());
//!     Ok(())
//! }
//! ```

mod json;

pub use json::JsonExtractor;

use crate::error::{Error, Result};
use crate::model::{Document, DocumentKind};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

/// Trait for document extractors.
///
/// Implement this trait to load a new source format into a [`Document`].
/// Implementations must leave every un-named annotation either without an
/// id or with the key [`crate::identity::annotation_key`] derives for it.
pub trait DocumentExtractor: Send + Sync {
    /// Get the supported file extensions for this extractor.
    ///
    /// Extensions should be lowercase without the leading dot (e.g., `["json"]`).
    fn supported_extensions(&self) -> &[&str];

    /// Get the name of this extractor.
    fn name(&self) -> &str;

    /// Extract a document from a file.
    fn extract(&self, path: &Path) -> Result<Document>;

    /// Extract a document from bytes.
    fn extract_bytes(&self, bytes: &[u8]) -> Result<Document>;

    /// Check if this extractor supports the given extension.
    fn supports_extension(&self, ext: &str) -> bool {
        let ext_lower = ext.to_lowercase();
        self.supported_extensions().iter().any(|e| *e == ext_lower)
    }
}

/// Registry for document extractors, keyed by file extension.
pub struct ExtractorRegistry {
    extractors: HashMap<String, Arc<dyn DocumentExtractor>>,
    by_name: HashMap<String, Arc<dyn DocumentExtractor>>,
}

impl ExtractorRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            extractors: HashMap::new(),
            by_name: HashMap::new(),
        }
    }

    /// Create a registry with the built-in extractors (normalized JSON).
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(JsonExtractor::new()));
        registry
    }

    /// Register an extractor for all its supported extensions.
    pub fn register(&mut self, extractor: Arc<dyn DocumentExtractor>) {
        for ext in extractor.supported_extensions() {
            self.extractors.insert(ext.to_lowercase(), extractor.clone());
        }
        self.by_name
            .insert(extractor.name().to_lowercase(), extractor);
    }

    /// Get an extractor by file extension.
    pub fn get_by_extension(&self, ext: &str) -> Option<Arc<dyn DocumentExtractor>> {
        self.extractors.get(&ext.to_lowercase()).cloned()
    }

    /// Get an extractor by name.
    pub fn get_by_name(&self, name: &str) -> Option<Arc<dyn DocumentExtractor>> {
        self.by_name.get(&name.to_lowercase()).cloned()
    }

    /// Check if an extension is supported.
    pub fn supports(&self, ext: &str) -> bool {
        self.extractors.contains_key(&ext.to_lowercase())
    }

    /// Get all supported extensions, sorted.
    pub fn supported_extensions(&self) -> Vec<&str> {
        let mut exts: Vec<&str> = self.extractors.keys().map(|s| s.as_str()).collect();
        exts.sort_unstable();
        exts
    }

    /// Load a document using the extractor registered for its extension.
    pub fn load(&self, path: &Path) -> Result<Document> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| Error::UnsupportedFormat(format!("{} has no extension", path.display())))?;

        let extractor = self
            .get_by_extension(ext)
            .ok_or_else(|| unsupported(ext))?;

        log::debug!("loading {} with {} extractor", path.display(), extractor.name());
        extractor.extract(path)
    }

    /// Load a document from bytes, choosing the extractor by extension.
    pub fn load_bytes(&self, bytes: &[u8], ext: &str) -> Result<Document> {
        let extractor = self
            .get_by_extension(ext)
            .ok_or_else(|| unsupported(ext))?;
        extractor.extract_bytes(bytes)
    }
}

fn unsupported(ext: &str) -> Error {
    match DocumentKind::from_extension(ext) {
        Some(kind) => Error::UnsupportedFormat(format!(
            "no extractor registered for .{} ({}) files; supply a normalized JSON document",
            ext, kind
        )),
        None => Error::UnsupportedFormat(format!("no extractor for extension: {}", ext)),
    }
}

impl Default for ExtractorRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_with_defaults() {
        let registry = ExtractorRegistry::with_defaults();
        assert!(registry.supports("json"));
        assert!(registry.supports("JSON"));
        assert!(!registry.supports("docx"));
        assert_eq!(registry.supported_extensions(), vec!["json"]);
    }

    #[test]
    fn test_registry_get_by_name() {
        let registry = ExtractorRegistry::with_defaults();
        let extractor = registry.get_by_name("json");
        assert!(extractor.is_some());
        assert_eq!(extractor.unwrap().name(), "json");
    }

    #[test]
    fn test_native_format_is_unsupported() {
        let registry = ExtractorRegistry::with_defaults();
        let err = registry.load(Path::new("contract.docx")).unwrap_err();
        assert!(matches!(err, Error::UnsupportedFormat(_)));
        assert!(err.to_string().contains("docx"));

        let err = registry.load(Path::new("README")).unwrap_err();
        assert!(matches!(err, Error::UnsupportedFormat(_)));
    }

    #[test]
    fn test_load_bytes() {
        let registry = ExtractorRegistry::with_defaults();
        let doc = registry
            .load_bytes(br#"{"type": "pdf", "pages": [{"page_number": 1, "text": "x"}]}"#, "json")
            .unwrap();
        assert_eq!(doc.kind(), DocumentKind::Pdf);
        assert_eq!(doc.unit_count(), 1);
    }
}
