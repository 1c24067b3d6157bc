//! Word-level diff with HTML highlighting.

use super::{OpTag, SequenceMatcher};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Opening/closing markers around inserted text.
const INS_OPEN: &str = r#"<ins class="diff-add">"#;
const INS_CLOSE: &str = "</ins>";

/// Opening/closing markers around deleted text.
const DEL_OPEN: &str = r#"<del class="diff-del">"#;
const DEL_CLOSE: &str = "</del>";

fn token_regex() -> &'static Regex {
    static TOKEN_RE: OnceLock<Regex> = OnceLock::new();
    TOKEN_RE.get_or_init(|| Regex::new(r"\w+|[^\w\s]+|\s+").expect("token pattern is valid"))
}

/// Split text into word, punctuation and whitespace runs.
///
/// Every character belongs to exactly one token, so concatenating the
/// tokens reproduces the input.
pub fn tokenize(text: &str) -> Vec<&str> {
    token_regex().find_iter(text).map(|m| m.as_str()).collect()
}

/// Result of a word-level diff.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WordDiff {
    /// Escaped new-side rendering with `<del>`/`<ins>` markers
    pub html: String,

    /// Non-whitespace tokens present only in the new text
    pub added_terms: Vec<String>,

    /// Non-whitespace tokens present only in the old text
    pub deleted_terms: Vec<String>,

    /// Token-level similarity in [0, 1]
    pub similarity: f64,
}

/// Diff two texts token by token.
pub fn word_diff(old: &str, new: &str) -> WordDiff {
    let a = tokenize(old);
    let b = tokenize(new);
    let matcher = SequenceMatcher::new(&a, &b);
    let opcodes = matcher.opcodes();

    let mut html = String::with_capacity(old.len().max(new.len()) + 32);
    let mut added_terms = Vec::new();
    let mut deleted_terms = Vec::new();
    let mut matched = 0;

    for op in opcodes {
        let old_span = &a[op.a_range()];
        let new_span = &b[op.b_range()];
        match op.tag {
            OpTag::Equal => {
                matched += old_span.len();
                push_escaped(&mut html, old_span);
            }
            OpTag::Insert => {
                push_marked(&mut html, INS_OPEN, INS_CLOSE, new_span);
                added_terms.extend(terms(new_span));
            }
            OpTag::Delete => {
                push_marked(&mut html, DEL_OPEN, DEL_CLOSE, old_span);
                deleted_terms.extend(terms(old_span));
            }
            OpTag::Replace => {
                push_marked(&mut html, DEL_OPEN, DEL_CLOSE, old_span);
                push_marked(&mut html, INS_OPEN, INS_CLOSE, new_span);
                added_terms.extend(terms(new_span));
                deleted_terms.extend(terms(old_span));
            }
        }
    }

    let total = a.len() + b.len();
    let similarity = if total == 0 {
        1.0
    } else {
        2.0 * matched as f64 / total as f64
    };

    WordDiff {
        html,
        added_terms,
        deleted_terms,
        similarity,
    }
}

fn terms<'t>(tokens: &'t [&'t str]) -> impl Iterator<Item = String> + 't {
    tokens
        .iter()
        .filter(|t| !t.chars().all(char::is_whitespace))
        .map(|t| t.to_string())
}

fn push_marked(out: &mut String, open: &str, close: &str, tokens: &[&str]) {
    out.push_str(open);
    push_escaped(out, tokens);
    out.push_str(close);
}

fn push_escaped(out: &mut String, tokens: &[&str]) {
    for token in tokens {
        escape_html_into(out, token);
    }
}

/// Escape `&`, `<`, `>`, `"` and `'` for inclusion in HTML.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    escape_html_into(&mut out, text);
    out
}

fn escape_html_into(out: &mut String, text: &str) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_keeps_everything() {
        let text = "Hello,  world!\tIt's 3.14 — ok\n";
        let tokens = tokenize(text);
        assert_eq!(tokens.concat(), text);
        assert_eq!(&tokens[..4], &["Hello", ",", "  ", "world"]);
    }

    #[test]
    fn test_tokenize_unicode_words() {
        assert_eq!(tokenize("변경 사항"), vec!["변경", " ", "사항"]);
    }

    #[test]
    fn test_insertion() {
        let diff = word_diff("Hello world", "Hello there world");
        assert_eq!(diff.added_terms, vec!["there"]);
        assert!(diff.deleted_terms.is_empty());
        assert_eq!(
            diff.html,
            r#"Hello <ins class="diff-add">there </ins>world"#
        );
    }

    #[test]
    fn test_replacement() {
        let diff = word_diff("total: 10", "total: 12");
        assert_eq!(diff.added_terms, vec!["12"]);
        assert_eq!(diff.deleted_terms, vec!["10"]);
        assert_eq!(
            diff.html,
            r#"total: <del class="diff-del">10</del><ins class="diff-add">12</ins>"#
        );
    }

    #[test]
    fn test_deletion_escapes_markup() {
        let diff = word_diff("a <b> c", "a c");
        assert_eq!(diff.deleted_terms, vec!["<", "b", ">"]);
        assert!(diff.html.contains("&lt;b&gt;"));
        assert!(!diff.html.contains("<b>"));
    }

    #[test]
    fn test_identical_texts() {
        let diff = word_diff("same text", "same text");
        assert_eq!(diff.html, "same text");
        assert!(diff.added_terms.is_empty());
        assert!(diff.deleted_terms.is_empty());
        assert_eq!(diff.similarity, 1.0);
    }

    #[test]
    fn test_empty_old_side() {
        let diff = word_diff("", "new words");
        assert_eq!(diff.added_terms, vec!["new", "words"]);
        assert_eq!(diff.similarity, 0.0);
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html(r#"<a href="x">'&'</a>"#), "&lt;a href=&quot;x&quot;&gt;&#x27;&amp;&#x27;&lt;/a&gt;");
    }
}
