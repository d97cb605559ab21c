//! A status line split on whitespace, keeping the raw text.
//!
//! Chat records carry free text whose spacing matters, so decoders need the
//! raw remainder after the first few words as well as the words themselves.

use std::ops::Range;

/// A whitespace-tokenized line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    raw: String,
    spans: Vec<Range<usize>>,
}

impl Line {
    /// Splits a raw line on ASCII whitespace.
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let mut spans = Vec::new();
        let mut start = None;
        for (index, byte) in raw.bytes().enumerate() {
            match (byte.is_ascii_whitespace(), start) {
                (true, Some(begin)) => {
                    spans.push(begin..index);
                    start = None;
                }
                (false, None) => start = Some(index),
                _ => {}
            }
        }
        if let Some(begin) = start {
            spans.push(begin..raw.len());
        }
        Self { raw, spans }
    }

    /// Rebuilds a line from tokens that were split elsewhere.
    pub fn from_tokens<S: AsRef<str>>(tokens: &[S]) -> Self {
        let joined = tokens
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<_>>()
            .join(" ");
        Self::new(joined)
    }

    /// The line exactly as received.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Number of tokens.
    pub fn len(&self) -> usize {
        self.spans.len()
    }

    /// Whether the line holds nothing but whitespace.
    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// Token at `index`.
    pub fn token(&self, index: usize) -> Option<&str> {
        self.spans.get(index).map(|span| &self.raw[span.clone()])
    }

    /// Token at `index`, or the empty string past the end.
    pub fn word(&self, index: usize) -> &str {
        self.token(index).unwrap_or("")
    }

    /// Iterates over all tokens.
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.spans.iter().map(|span| &self.raw[span.clone()])
    }

    /// Raw text from the start of token `index` to the end of the line.
    pub fn rest(&self, index: usize) -> Option<&str> {
        self.spans.get(index).map(|span| &self.raw[span.start..])
    }

    /// Whether the tokens starting at `index` equal `words`.
    pub fn has_words(&self, index: usize, words: &[&str]) -> bool {
        words
            .iter()
            .enumerate()
            .all(|(offset, word)| self.token(index + offset) == Some(*word))
    }
}

/// Drops one trailing `suffix` character, if present.
pub fn chomp(text: &str, suffix: char) -> &str {
    text.strip_suffix(suffix).unwrap_or(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_collapses_whitespace() {
        let line = Line::new("  12 JoeBlack   hello\tthere  ");
        assert_eq!(line.len(), 4);
        assert_eq!(line.token(0), Some("12"));
        assert_eq!(line.token(3), Some("there"));
        assert_eq!(line.token(4), None);
    }

    #[test]
    fn test_rest_keeps_inner_spacing() {
        let line = Line::new("12 JoeBlack hello   there");
        assert_eq!(line.rest(2), Some("hello   there"));
        assert_eq!(line.rest(4), None);
    }

    #[test]
    fn test_blank_line_is_empty() {
        assert!(Line::new(" \t ").is_empty());
        assert!(Line::new("").is_empty());
    }

    #[test]
    fn test_has_words() {
        let line = Line::new("Settings of variables:");
        assert!(line.has_words(0, &["Settings", "of", "variables:"]));
        assert!(!line.has_words(1, &["of", "variables:", "extra"]));
    }

    #[test]
    fn test_chomp_single_char() {
        assert_eq!(chomp("4.", '.'), "4");
        assert_eq!(chomp("4..", '.'), "4.");
        assert_eq!(chomp("4", '.'), "4");
    }

    #[test]
    fn test_from_tokens_round_trips_words() {
        let line = Line::from_tokens(&["JoeBlack", "rolls", "3", "and", "4."]);
        assert_eq!(line.raw(), "JoeBlack rolls 3 and 4.");
        assert_eq!(line.len(), 5);
    }
}
