//! Text alignment primitives.
//!
//! - [`SequenceMatcher`] aligns any two sequences of hashable items and
//!   yields the span-level edit script ([`Opcode`]s).
//! - [`word_diff`] tokenizes two texts and renders the edit script as
//!   highlighted HTML plus the added/deleted terms.
//! - [`split_sentences`] / [`split_lines`] cut page text into the units the
//!   page comparator aligns.

mod matcher;
mod segment;
mod tokens;

pub use matcher::{Match, OpTag, Opcode, SequenceMatcher};
pub use segment::{split_lines, split_sentences, Segmentation};
pub use tokens::{escape_html, tokenize, word_diff, WordDiff};
