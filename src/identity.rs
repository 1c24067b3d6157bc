//! Stable identity for annotations.
//!
//! An annotation keeps its explicit name when it has one. Otherwise its key
//! is `AUTO-` followed by the first ten hex digits of the MD5 digest of
//! `page:subtype:rect:contents`, where `rect` is the comma-joined rectangle
//! rounded to three decimals and `contents` is limited to 64 characters.
//!
//! Extraction and comparison must agree on this derivation, or unchanged
//! un-named annotations show up as deleted/added pairs. Two distinct
//! annotations sharing page, subtype, rounded rectangle and contents prefix
//! collide onto one key.

use crate::model::Annotation;
use crate::repr;
use md5::{Digest, Md5};

/// Prefix of derived keys.
pub const FALLBACK_PREFIX: &str = "AUTO-";

/// Number of contents characters that enter the fallback key.
const CONTENTS_PREFIX_CHARS: usize = 64;

/// Number of digest hex digits kept in the fallback key.
const DIGEST_HEX_CHARS: usize = 10;

/// Resolve the identity key of an annotation.
pub fn annotation_key(annotation: &Annotation) -> String {
    match annotation.explicit_id() {
        Some(id) => id.to_string(),
        None => fallback_key(annotation),
    }
}

/// Derive the content-based key, ignoring any explicit name.
pub fn fallback_key(annotation: &Annotation) -> String {
    let rect = round_floats(annotation.rect.as_deref())
        .unwrap_or_default()
        .into_iter()
        .map(repr::float_repr)
        .collect::<Vec<_>>()
        .join(",");
    let contents: String = annotation
        .contents_text()
        .chars()
        .take(CONTENTS_PREFIX_CHARS)
        .collect();

    let base = format!(
        "{}:{}:{}:{}",
        annotation.page_number,
        annotation.subtype.as_deref().unwrap_or(""),
        rect,
        contents
    );

    let digest = format!("{:x}", Md5::digest(base.as_bytes()));
    format!("{}{}", FALLBACK_PREFIX, &digest[..DIGEST_HEX_CHARS])
}

/// Round every component to three decimals.
///
/// Absorbs floating-point noise between re-serializations of the same
/// geometry or color. `None` stays `None`.
pub fn round_floats(values: Option<&[f64]>) -> Option<Vec<f64>> {
    values.map(|v| v.iter().copied().map(repr::round3).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn md5_hex(input: &str) -> String {
        format!("{:x}", Md5::digest(input.as_bytes()))
    }

    #[test]
    fn test_explicit_id_wins() {
        let annotation = Annotation::new(1, "Text")
            .with_id("note1")
            .with_contents("hello");
        assert_eq!(annotation_key(&annotation), "note1");
    }

    #[test]
    fn test_empty_id_falls_back() {
        let annotation = Annotation::new(1, "Text").with_id("");
        assert!(annotation_key(&annotation).starts_with(FALLBACK_PREFIX));
    }

    #[test]
    fn test_fallback_hash_input() {
        let annotation = Annotation::new(3, "Highlight")
            .with_rect([10.0, 20.12345, 30.5, 40.0])
            .with_contents("note");

        let expected = format!(
            "AUTO-{}",
            &md5_hex("3:Highlight:10.0,20.123,30.5,40.0:note")[..10]
        );
        assert_eq!(fallback_key(&annotation), expected);
    }

    #[test]
    fn test_fallback_without_rect_or_subtype() {
        let annotation = Annotation {
            page_number: 2,
            ..Annotation::default()
        };
        let expected = format!("AUTO-{}", &md5_hex("2:::")[..10]);
        assert_eq!(fallback_key(&annotation), expected);
    }

    #[test]
    fn test_fallback_absorbs_float_noise() {
        let a = Annotation::new(1, "Square").with_rect([1.0, 2.0, 3.0, 4.0]);
        let b = Annotation::new(1, "Square").with_rect([1.0000001, 2.0, 2.9999999, 4.0]);
        assert_eq!(annotation_key(&a), annotation_key(&b));
    }

    #[test]
    fn test_fallback_uses_contents_prefix() {
        let long_a = format!("{}{}", "x".repeat(64), "tail one");
        let long_b = format!("{}{}", "x".repeat(64), "tail two");
        let a = Annotation::new(1, "Text").with_contents(long_a);
        let b = Annotation::new(1, "Text").with_contents(long_b);
        assert_eq!(annotation_key(&a), annotation_key(&b));
    }

    #[test]
    fn test_contents_prefix_counts_characters() {
        // Multi-byte characters must not be split mid-codepoint.
        let text = "가".repeat(70);
        let annotation = Annotation::new(1, "Text").with_contents(text);
        let base = format!("1:Text::{}", "가".repeat(64));
        assert_eq!(
            fallback_key(&annotation),
            format!("AUTO-{}", &md5_hex(&base)[..10])
        );
    }

    #[test]
    fn test_key_is_idempotent() {
        let annotation = Annotation::new(5, "Ink").with_rect([0.1, 0.2, 0.3, 0.4]);
        assert_eq!(annotation_key(&annotation), annotation_key(&annotation.clone()));
    }

    #[test]
    fn test_round_floats() {
        assert_eq!(round_floats(None), None);
        assert_eq!(
            round_floats(Some(&[0.12345, 1.0])),
            Some(vec![0.123, 1.0])
        );
    }
}
