//! Text normalization: lowercase once, then enumerate candidate phrases.
//!
//! A candidate phrase is a window of 1..=N contiguous word tokens, so a
//! multi-word symptom name ("sore throat") can be found as one phrase.
//! Windows made only of stop words, or shorter than a minimum length, are
//! skipped: partial-ratio scoring would otherwise accept tiny tokens like
//! "it" because they occur inside longer symptom names. Wider windows come
//! first at each position so the matcher can let a multi-word match shadow
//! the single words inside it.

use std::sync::LazyLock;

use regex::Regex;

/// Runs of letters/digits, keeping inner apostrophes ("i'm", "can't").
static WORD_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\p{Alphabetic}\p{Nd}]+(?:'[\p{Alphabetic}\p{Nd}]+)*").unwrap());

/// Sorted for binary search. Must be lowercase.
const STOP_WORDS: &[&str] = &[
    "a", "about", "after", "all", "also", "am", "an", "and", "any", "are", "as", "at", "be",
    "been", "but", "by", "can", "could", "did", "do", "does", "for", "from", "get", "got", "had",
    "has", "have", "having", "he", "her", "him", "his", "how", "i", "i'm", "if", "in", "into",
    "is", "it", "it's", "its", "just", "me", "my", "of", "on", "or", "our", "really", "she", "so",
    "some", "that", "the", "their", "them", "then", "there", "they", "this", "to", "too", "very",
    "was", "we", "were", "what", "when", "where", "which", "while", "with", "you", "your",
];

pub fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.binary_search(&word).is_ok()
}

/// Word tokens of `text`, in order.
pub fn words(text: &str) -> impl Iterator<Item = &str> + '_ {
    WORD_PATTERN.find_iter(text).map(|m| m.as_str())
}

/// Phrase enumeration settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Normalizer {
    /// Widest window, in words.
    pub max_words: usize,
    /// Shortest phrase considered, in chars (spaces included).
    pub min_chars: usize,
}

impl Normalizer {
    pub fn new(max_words: usize, min_chars: usize) -> Self {
        Self {
            max_words: max_words.max(1),
            min_chars,
        }
    }

    /// The single case-folding point of the pipeline.
    pub fn lowercase(text: &str) -> String {
        text.to_lowercase()
    }

    /// Lazily yield candidate phrases of already-lowercased text.
    pub fn phrases<'t>(&self, lowered: &'t str) -> Phrases<'t> {
        Phrases {
            tokens: words(lowered).collect(),
            start: 0,
            width: 0,
            max_words: self.max_words,
            min_chars: self.min_chars,
        }
    }
}

/// A candidate phrase and the token span it covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Phrase {
    pub text: String,
    /// Index of the first token.
    pub start: usize,
    /// Width in tokens.
    pub len: usize,
}

impl Phrase {
    /// One past the last token.
    pub fn end(&self) -> usize {
        self.start + self.len
    }
}

/// Iterator over phrase windows, ordered by start token, widest first.
#[derive(Debug, Clone)]
pub struct Phrases<'t> {
    tokens: Vec<&'t str>,
    start: usize,
    /// Width of the next window at `start`; 0 until `start` is entered.
    width: usize,
    max_words: usize,
    min_chars: usize,
}

impl Phrases<'_> {
    fn advance(&mut self) -> Option<(usize, usize)> {
        if self.start >= self.tokens.len() {
            return None;
        }
        if self.width == 0 {
            self.width = self.max_words.min(self.tokens.len() - self.start);
        }
        let window = (self.start, self.width);
        self.width -= 1;
        if self.width == 0 {
            self.start += 1;
        }
        Some(window)
    }
}

impl Iterator for Phrases<'_> {
    type Item = Phrase;

    fn next(&mut self) -> Option<Phrase> {
        while let Some((start, len)) = self.advance() {
            let window = &self.tokens[start..start + len];
            if window.iter().all(|w| is_stop_word(w)) {
                continue;
            }
            let text = window.join(" ");
            if text.chars().count() < self.min_chars {
                continue;
            }
            return Some(Phrase { text, start, len });
        }
        None
    }
}
