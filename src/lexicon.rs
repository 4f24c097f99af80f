//! The lexicon: words considered correctly spelled.
//!
//! How to populate a lexicon
//! - Runtime: `Lexicon::from_path` / `Lexicon::from_reader` read a
//!   newline-delimited word list (optionally `word count` lines), or
//!   `(word, frequency)` pairs are collected into one.
//! - Compile-time: the `include_lexicon!` proc-macro embeds a word list as a
//!   `phf` map and hands it to `Lexicon::from_static`.
//!
//! Every word is stored lowercased and trimmed. Frequencies default to 1 and
//! only matter to the frequency-based corrector.

use std::collections::HashMap;
use std::io::{self, BufRead};
use std::path::Path;

use tracing::info;

use crate::error::{Error, Result};

/// Line format of a lexicon source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LexiconFormat {
    /// One word per line.
    #[default]
    WordList,
    /// `word count` per line, separated by whitespace.
    Frequencies,
}

#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    /// Words in first-insertion order.
    words: Vec<String>,
    frequencies: HashMap<String, usize>,
}

impl Lexicon {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a lexicon from plain words, each with frequency 1.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::from_iter(words.into_iter().map(|w| (w, 1)))
    }

    /// Build a lexicon from a map emitted by `include_lexicon!`.
    ///
    /// `phf` iteration order is unspecified, so words are inserted sorted.
    pub fn from_static(map: &'static phf::Map<&'static str, usize>) -> Self {
        let mut entries: Vec<(&str, usize)> = map.entries().map(|(k, v)| (*k, *v)).collect();
        entries.sort_unstable();
        Self::from_iter(entries)
    }

    /// Insert entries, adding frequencies of words already present.
    pub fn load_iter<I, S>(&mut self, iter: I)
    where
        I: IntoIterator<Item = (S, usize)>,
        S: AsRef<str>,
    {
        for (word, freq) in iter {
            let word = word.as_ref().trim().to_lowercase();
            if word.is_empty() {
                continue;
            }
            match self.frequencies.get_mut(&word) {
                Some(f) => *f += freq,
                None => {
                    self.frequencies.insert(word.clone(), freq);
                    self.words.push(word);
                }
            }
        }
    }

    /// Read a lexicon source. Blank lines and `#` comments are skipped.
    pub fn from_reader<R: BufRead>(reader: R, format: LexiconFormat) -> Result<Self> {
        let mut lexicon = Self::new();
        for (lineno, line) in reader.lines().enumerate() {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            let entry = match format {
                LexiconFormat::WordList => (trimmed, 1),
                LexiconFormat::Frequencies => parse_frequency_line(trimmed, lineno + 1)?,
            };
            lexicon.load_iter(std::iter::once(entry));
        }
        if lexicon.is_empty() {
            return Err(Error::EmptyLexicon);
        }
        info!(words = lexicon.len(), "lexicon loaded");
        Ok(lexicon)
    }

    pub fn from_path(path: impl AsRef<Path>, format: LexiconFormat) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(io::BufReader::new(file), format)
    }

    /// Membership test; `word` is expected lowercased.
    pub fn contains(&self, word: &str) -> bool {
        self.frequencies.contains_key(word)
    }

    pub fn frequency(&self, word: &str) -> Option<usize> {
        self.frequencies.get(word).copied()
    }

    /// Words in first-insertion order.
    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// `(word, frequency)` pairs in first-insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> + '_ {
        self.words
            .iter()
            .map(|w| (w.as_str(), self.frequencies.get(w).copied().unwrap_or(0)))
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Build a lexicon from `(word, frequency)` pairs.
impl<S: AsRef<str>> FromIterator<(S, usize)> for Lexicon {
    fn from_iter<I: IntoIterator<Item = (S, usize)>>(iter: I) -> Self {
        let mut lexicon = Self::new();
        lexicon.load_iter(iter);
        lexicon
    }
}

fn parse_frequency_line(line: &str, lineno: usize) -> Result<(&str, usize)> {
    let invalid = || Error::InvalidFrequency {
        line: lineno,
        content: line.to_string(),
    };
    let mut parts = line.split_whitespace();
    let word = parts.next().ok_or_else(invalid)?;
    let freq = parts
        .next()
        .ok_or_else(invalid)?
        .parse::<usize>()
        .map_err(|_| invalid())?;
    Ok((word, freq))
}
