//! Detection options and configuration.

use crate::diff::Segmentation;
use std::borrow::Cow;

/// Default similarity below which two images are reported as different.
pub const DEFAULT_IMAGE_THRESHOLD: f64 = 0.95;

/// Options for comparing two documents.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectOptions {
    /// Image similarity below this value yields an `image_content_change`
    pub image_similarity_threshold: f64,

    /// How page text is cut into alignment units
    pub page_segmentation: Segmentation,

    /// Treat texts differing only in letter case as equal
    pub ignore_case: bool,

    /// Treat texts differing only in whitespace runs as equal
    pub ignore_whitespace: bool,

    /// Whether batch detection fans out across threads
    pub parallel: bool,
}

impl DetectOptions {
    /// Create new detect options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the image similarity threshold (clamped to [0, 1]).
    pub fn with_image_threshold(mut self, threshold: f64) -> Self {
        self.image_similarity_threshold = threshold.clamp(0.0, 1.0);
        self
    }

    /// Set the page text segmentation policy.
    pub fn with_segmentation(mut self, segmentation: Segmentation) -> Self {
        self.page_segmentation = segmentation;
        self
    }

    /// Segment page text by lines instead of sentences.
    pub fn by_lines(mut self) -> Self {
        self.page_segmentation = Segmentation::Lines;
        self
    }

    /// Enable or disable case-insensitive text comparison.
    pub fn with_ignore_case(mut self, ignore: bool) -> Self {
        self.ignore_case = ignore;
        self
    }

    /// Enable or disable whitespace-insensitive text comparison.
    pub fn with_ignore_whitespace(mut self, ignore: bool) -> Self {
        self.ignore_whitespace = ignore;
        self
    }

    /// Enable or disable parallel batch detection.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Disable parallel batch detection.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Whether text is compared verbatim.
    pub fn is_exact(&self) -> bool {
        !self.ignore_case && !self.ignore_whitespace
    }

    /// The form of `text` that takes part in equality checks.
    pub fn normalize<'t>(&self, text: &'t str) -> Cow<'t, str> {
        if self.is_exact() {
            return Cow::Borrowed(text);
        }

        let mut text = Cow::Borrowed(text);
        if self.ignore_whitespace {
            text = Cow::Owned(text.split_whitespace().collect::<Vec<_>>().join(" "));
        }
        if self.ignore_case {
            text = Cow::Owned(text.to_lowercase());
        }
        text
    }

    /// Whether two texts count as unchanged.
    pub fn same_text(&self, a: &str, b: &str) -> bool {
        a == b || (!self.is_exact() && self.normalize(a) == self.normalize(b))
    }
}

impl Default for DetectOptions {
    fn default() -> Self {
        Self {
            image_similarity_threshold: DEFAULT_IMAGE_THRESHOLD,
            page_segmentation: Segmentation::Sentences,
            ignore_case: false,
            ignore_whitespace: false,
            parallel: true,
        }
    }
}
