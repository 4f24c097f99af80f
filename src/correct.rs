//! Spelling correction against the lexicon.
//!
//! Sentences are split on whitespace only, and the whitespace between tokens
//! is kept as written. Punctuation stays attached to its token: a token whose
//! words are all known ("fever,", "run-down") is left alone, while "acn," is
//! looked up as-is and may be left uncorrected.

use std::borrow::Cow;

use crate::config::CorrectionStrategy;
use crate::fuzz;
use crate::lexicon::Lexicon;
use crate::normalize;
use crate::symspell::SymSpell;

#[derive(Debug, Clone)]
enum Engine {
    ClosestMatch { cutoff: f64 },
    Frequency(SymSpell),
}

/// Rewrites out-of-lexicon tokens to their best lexicon correction.
#[derive(Debug, Clone)]
pub struct SpellCorrector {
    lexicon: Lexicon,
    engine: Engine,
}

impl SpellCorrector {
    pub fn new(lexicon: Lexicon, strategy: CorrectionStrategy) -> Self {
        let engine = match strategy {
            CorrectionStrategy::ClosestMatch { cutoff } => Engine::ClosestMatch { cutoff },
            CorrectionStrategy::Frequency { max_edit_distance } => {
                Engine::Frequency(SymSpell::from_lexicon(max_edit_distance, &lexicon))
            }
        };
        Self { lexicon, engine }
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    /// Correct one token.
    ///
    /// Known tokens (compared lowercased) come back untouched; corrections
    /// are lowercase lexicon words. Without a confident correction the token
    /// is returned as-is.
    pub fn correct_word<'a>(&self, token: &'a str) -> Cow<'a, str> {
        let lowered = token.to_lowercase();
        if self.is_known(&lowered) {
            return Cow::Borrowed(token);
        }
        let suggestion = match &self.engine {
            Engine::ClosestMatch { cutoff } => self.closest_match(&lowered, *cutoff),
            Engine::Frequency(index) => index.find_top(&lowered).map(|s| s.term),
        };
        match suggestion {
            Some(word) => Cow::Owned(word),
            None => Cow::Borrowed(token),
        }
    }

    /// Correct every whitespace-delimited token. Whitespace is copied through
    /// unchanged.
    pub fn correct_sentence(&self, sentence: &str) -> String {
        let mut out = String::with_capacity(sentence.len());
        let mut token_start = None;
        for (i, c) in sentence.char_indices() {
            if c.is_whitespace() {
                if let Some(start) = token_start.take() {
                    out.push_str(&self.correct_word(&sentence[start..i]));
                }
                out.push(c);
            } else if token_start.is_none() {
                token_start = Some(i);
            }
        }
        if let Some(start) = token_start {
            out.push_str(&self.correct_word(&sentence[start..]));
        }
        out
    }

    /// A lexicon word, or a token whose words are all lexicon words. Tokens
    /// without any word (bare punctuation) count as known.
    fn is_known(&self, lowered: &str) -> bool {
        self.lexicon.contains(lowered)
            || normalize::words(lowered).all(|w| self.lexicon.contains(w))
    }

    /// Most similar lexicon word on a 0..=1 scale; the first word in lexicon
    /// order wins ties.
    fn closest_match(&self, word: &str, cutoff: f64) -> Option<String> {
        let mut best: Option<(&str, f64)> = None;
        for candidate in self.lexicon.words() {
            let score = fuzz::ratio(word, candidate) / 100.0;
            if best.map_or(true, |(_, s)| score > s) {
                best = Some((candidate, score));
            }
        }
        best.filter(|(_, score)| *score >= cutoff)
            .map(|(w, _)| w.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lexicon() -> Lexicon {
        Lexicon::from_iter(vec![
            ("i", 900usize),
            ("have", 500),
            ("and", 800),
            ("it", 850),
            ("hurts", 40),
            ("acne", 10),
            ("ache", 30),
            ("fever", 25),
            ("throat", 15),
            ("cough", 5),
            ("rough", 50),
        ])
    }

    fn both() -> Vec<SpellCorrector> {
        vec![
            SpellCorrector::new(lexicon(), CorrectionStrategy::ClosestMatch { cutoff: 0.8 }),
            SpellCorrector::new(
                lexicon(),
                CorrectionStrategy::Frequency {
                    max_edit_distance: 2,
                },
            ),
        ]
    }

    #[test]
    fn test_correct_sentence_is_identity_on_known_words() {
        for corrector in both() {
            let sentence = "I have acne and it hurts";
            assert_eq!(corrector.correct_sentence(sentence), sentence);
        }
    }

    #[test]
    fn test_single_typo_is_corrected() {
        for corrector in both() {
            assert_eq!(corrector.correct_word("acn"), "acne");
            assert_eq!(corrector.correct_word("Fevr"), "fever");
            assert_eq!(
                corrector.correct_sentence("I have acn and it hurts"),
                "I have acne and it hurts"
            );
        }
    }

    #[test]
    fn test_unknown_word_passes_through() {
        for corrector in both() {
            assert_eq!(corrector.correct_word("xyzzy"), "xyzzy");
            assert!(matches!(corrector.correct_word("xyzzy"), Cow::Borrowed(_)));
        }
    }

    #[test]
    fn test_strategies_differ_on_frequency() {
        // "xough" is one substitution from both "cough" and "rough".
        let correctors = both();
        assert_eq!(correctors[0].correct_word("xough"), "cough");
        assert_eq!(correctors[1].correct_word("xough"), "rough");
    }

    #[test]
    fn test_attached_punctuation_stays_in_token() {
        for corrector in both() {
            // Known words keep their punctuation.
            assert!(matches!(corrector.correct_word("fever,"), Cow::Borrowed("fever,")));
            assert_eq!(corrector.correct_word("(throat)"), "(throat)");
            assert_eq!(corrector.correct_word("it-hurts"), "it-hurts");
            assert_eq!(corrector.correct_word("--"), "--");
        }
        let closest = SpellCorrector::new(lexicon(), CorrectionStrategy::ClosestMatch { cutoff: 0.8 });
        // The comma counts against short tokens: "acn," is left alone.
        assert_eq!(closest.correct_word("acn,"), "acn,");
    }

    #[test]
    fn test_sentence_whitespace_is_preserved() {
        for corrector in both() {
            let sentence = "  I  have\tacne and it hurts \n";
            assert_eq!(corrector.correct_sentence(sentence), sentence);
            assert_eq!(
                corrector.correct_sentence("I  have\tacn "),
                "I  have\tacne "
            );
            assert_eq!(corrector.correct_sentence(""), "");
            assert_eq!(corrector.correct_sentence(" \t "), " \t ");
        }
    }
}
