//! Image similarity seam.
//!
//! Pixel-level scoring is delegated: the detector is given an
//! [`ImageSimilarity`] implementation and only compares its score against
//! a threshold. A failed comparison is recovered by the image comparator
//! (score 0.0, plus a diagnostic), never propagated.

use crate::error::{Error, Result};
use crate::model::Image;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;

/// Scores how alike two images are.
pub trait ImageSimilarity: Send + Sync {
    /// Get the name of this scorer.
    fn name(&self) -> &str;

    /// Similarity in [0, 1], 1.0 meaning identical.
    ///
    /// Returns an error when either payload cannot be decoded.
    fn similarity(&self, original: &Image, revised: &Image) -> Result<f64>;
}

/// Compares decoded image payloads byte for byte.
///
/// Identical payloads score 1.0, anything else 0.0. Callers that need a
/// perceptual score (e.g. structural similarity over decoded pixels) plug
/// in their own [`ImageSimilarity`].
#[derive(Debug, Clone, Copy, Default)]
pub struct PayloadSimilarity;

impl PayloadSimilarity {
    pub fn new() -> Self {
        Self
    }
}

impl ImageSimilarity for PayloadSimilarity {
    fn name(&self) -> &str {
        "payload"
    }

    fn similarity(&self, original: &Image, revised: &Image) -> Result<f64> {
        let a = decode_payload(&original.data)?;
        let b = decode_payload(&revised.data)?;
        Ok(if a == b { 1.0 } else { 0.0 })
    }
}

/// Decode a base64 image payload.
pub fn decode_payload(data: &str) -> Result<Vec<u8>> {
    if data.is_empty() {
        return Err(Error::ImageDecode("empty image payload".to_string()));
    }
    STANDARD
        .decode(data.trim())
        .map_err(|e| Error::ImageDecode(e.to_string()))
}
