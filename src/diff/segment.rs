//! Sentence and line segmentation.

use serde::{Deserialize, Serialize};

/// How page text is cut into alignment units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Segmentation {
    /// Split after `.`, `!` or `?` followed by whitespace, and at newlines
    #[default]
    Sentences,
    /// Split on newlines only
    Lines,
}

impl Segmentation {
    /// Segment text with this policy.
    pub fn split<'t>(&self, text: &'t str) -> Vec<&'t str> {
        match self {
            Segmentation::Sentences => split_sentences(text),
            Segmentation::Lines => split_lines(text),
        }
    }
}

fn is_terminal(c: char) -> bool {
    matches!(c, '.' | '!' | '?')
}

/// Split text into sentences.
///
/// A whitespace run directly after a terminal `.`, `!` or `?` is a
/// separator and is consumed entirely. Elsewhere only newline runs
/// separate, leaving any surrounding spaces on the fragments. Empty
/// fragments are dropped.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let mut parts = Vec::new();
    let mut start = 0;
    let mut i = 0;

    while i < chars.len() {
        let (pos, c) = chars[i];
        let after_terminal = i > 0 && is_terminal(chars[i - 1].1);

        let run_end = if after_terminal && c.is_whitespace() {
            Some(skip_while(&chars, i, char::is_whitespace))
        } else if c == '\n' {
            Some(skip_while(&chars, i, |c| c == '\n'))
        } else {
            None
        };

        match run_end {
            Some(end) => {
                parts.push(&text[start..pos]);
                start = chars.get(end).map_or(text.len(), |(p, _)| *p);
                i = end;
            }
            None => i += 1,
        }
    }
    parts.push(&text[start..]);

    parts.retain(|p| !p.is_empty());
    parts
}

fn skip_while(chars: &[(usize, char)], from: usize, pred: impl Fn(char) -> bool) -> usize {
    let mut end = from;
    while end < chars.len() && pred(chars[end].1) {
        end += 1;
    }
    end
}

/// Split text on newline characters, dropping empty lines.
pub fn split_lines(text: &str) -> Vec<&str> {
    text.split('\n').filter(|line| !line.is_empty()).collect()
}
